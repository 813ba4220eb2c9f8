mod cli_main;

use std::process;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli_main::{Cli, Commands, StatsFormat};
use plasmid_designer::io::export::export_skew_curve_to_path;
use plasmid_designer::io::fasta::read_genome;
use plasmid_designer::pipeline::{run_batch, run_design};
use plasmid_designer::seq::analyze_skew;
use plasmid_designer::stats::{calculate_stats, stats_tsv};
use plasmid_designer::DesignerError;

fn init_logging(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = std::env::var("PLASMID_LOG")
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);

        let exit_code = match e.downcast_ref::<DesignerError>() {
            Some(DesignerError::Config(_)) => 2,
            Some(DesignerError::Io(_)) => 3,
            Some(DesignerError::InvalidSequence(_)) => 4,
            Some(DesignerError::CatalogLoad { .. }) | Some(DesignerError::DesignLoad { .. }) => 5,
            None => 1,
        };
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        None => {
            run_design(cli.design.into_config())?;
        }

        Some(Commands::Design(args)) => {
            run_design(args.into_config())?;
        }

        Some(Commands::Skew { input, curve, step }) => {
            let genome = read_genome(&input)
                .with_context(|| format!("loading genome {}", input.display()))?;
            let (skew, min, max) = analyze_skew(&genome).context("analysing GC skew")?;
            println!("length\t{}", genome.len());
            println!("skew_min\t{}\t{}", min.position, min.value);
            println!("skew_max\t{}\t{}", max.position, max.value);

            if let Some(path) = curve {
                export_skew_curve_to_path(&skew, step, &path)
                    .with_context(|| format!("writing skew curve to {}", path.display()))?;
                info!("Skew curve written to {}", path.display());
            }
        }

        Some(Commands::Stats { input, format }) => {
            info!("Calculating sequence statistics for: {}", input.display());
            let stats = calculate_stats(&input)
                .with_context(|| format!("computing statistics for {}", input.display()))?;

            match format {
                StatsFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&stats)?);
                }
                StatsFormat::Tsv => {
                    let (header, row) = stats_tsv(&stats);
                    println!("{}", header);
                    println!("{}", row);
                }
            }
        }

        Some(Commands::Batch { inputs, output_dir, threads, reports, parts }) => {
            let start = Instant::now();
            let config = parts.into_config();
            let summary = run_batch(&inputs, &config, &output_dir, threads, reports)?;

            for success in &summary.succeeded {
                println!(
                    "{}\t{}\t{} bp\t{} skipped",
                    success.input.display(),
                    success.output.display(),
                    success.length,
                    success.skipped
                );
            }
            for failure in &summary.failed {
                eprintln!("{}\tFAILED\t{}", failure.input.display(), failure.error);
            }
            info!("Batch completed in {:.2}s", start.elapsed().as_secs_f32());

            if !summary.all_succeeded() {
                anyhow::bail!("{} of {} genomes failed", summary.failed.len(), inputs.len());
            }
        }
    }
    Ok(())
}
