//! Parallel batch design over many genomes.
//!
//! Each genome runs through its own pipeline instance; the only thing shared
//! between workers is the read-only [`DesignInputs`].

use std::path::{Path, PathBuf};
use std::time::Instant;

use ahash::{AHashMap, AHashSet};
use anyhow::Context;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tracing::{error, info, warn};

use crate::config::DesignConfig;
use crate::io::fasta::read_genome;
use crate::io::report::ReportFormat;
use crate::pipeline::design::{design_plasmid, write_outcome, DesignInputs};

#[derive(Debug, Clone)]
pub struct BatchSuccess {
    pub input: PathBuf,
    pub output: PathBuf,
    pub length: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone)]
pub struct BatchFailure {
    pub input: PathBuf,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub succeeded: Vec<BatchSuccess>,
    pub failed: Vec<BatchFailure>,
}

impl BatchSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

fn output_stem(input: &Path) -> String {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "genome".to_string());
    let name = name.strip_suffix(".gz").unwrap_or(&name);
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => name.to_string(),
    }
}

/// One output stem per genome. Stems shared by several inputs get the input
/// index appended, so no two genomes write the same file.
fn unique_stems(genomes: &[PathBuf]) -> Vec<String> {
    let stems: Vec<String> = genomes.iter().map(|g| output_stem(g)).collect();
    let mut counts: AHashMap<&str, usize> = AHashMap::new();
    for stem in &stems {
        *counts.entry(stem.as_str()).or_insert(0) += 1;
    }

    let mut used: AHashSet<String> = AHashSet::new();
    let mut unique = Vec::with_capacity(stems.len());
    for (i, stem) in stems.iter().enumerate() {
        let mut candidate = stem.clone();
        if counts.get(stem.as_str()).copied().unwrap_or(0) > 1 || used.contains(&candidate) {
            candidate = format!("{}.{}", stem, i + 1);
            let mut k = 1;
            while used.contains(&candidate) {
                candidate = format!("{}.{}_{}", stem, i + 1, k);
                k += 1;
            }
            warn!(
                "Output name '{}' is shared by several inputs; writing {} as '{}'",
                stem,
                genomes[i].display(),
                candidate
            );
        }
        used.insert(candidate.clone());
        unique.push(candidate);
    }
    unique
}

fn run_one(
    input: &Path,
    stem: &str,
    inputs: &DesignInputs,
    config: &DesignConfig,
    output_dir: &Path,
    write_reports: bool,
) -> anyhow::Result<BatchSuccess> {
    let output = output_dir.join(format!("{}.plasmid.fa", stem));
    let report = write_reports.then(|| {
        let ext = match config.report_format {
            ReportFormat::Json => "json",
            ReportFormat::Tsv => "tsv",
        };
        output_dir.join(format!("{}.report.{}", stem, ext))
    });

    let genome = read_genome(input).with_context(|| format!("loading genome {}", input.display()))?;
    let outcome = design_plasmid(&genome, inputs, config).context("designing plasmid")?;
    let record_id = format!("{}_{}", config.record_id, stem);
    write_outcome(&outcome, &output, &record_id, report.as_deref(), config)?;

    Ok(BatchSuccess {
        input: input.to_path_buf(),
        output,
        length: outcome.assembly.len(),
        skipped: outcome.assembly.skipped().len(),
    })
}

/// Design one plasmid per genome in `genomes`, writing `<stem>.plasmid.fa`
/// into `output_dir`. A failing genome is recorded and does not stop the others.
pub fn run_batch(
    genomes: &[PathBuf],
    config: &DesignConfig,
    output_dir: &Path,
    threads: usize,
    write_reports: bool,
) -> anyhow::Result<BatchSummary> {
    let start = Instant::now();
    config.validate()?;
    let mut config = config.clone();
    config.resolve_design_fallback().context("resolving design file")?;
    let config = &config;
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;

    let inputs = DesignInputs::load(config)?;
    let pool = ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .context("building thread pool")?;
    info!("Designing {} plasmids with {} threads", genomes.len(), threads);
    let stems = unique_stems(genomes);

    let results: Vec<(PathBuf, anyhow::Result<BatchSuccess>)> = pool.install(|| {
        genomes
            .par_iter()
            .zip(stems.par_iter())
            .map(|(input, stem)| {
                (input.clone(), run_one(input, stem, &inputs, config, output_dir, write_reports))
            })
            .collect()
    });

    let mut summary = BatchSummary::default();
    for (input, result) in results {
        match result {
            Ok(success) => summary.succeeded.push(success),
            Err(e) => {
                error!("{}: {:#}", input.display(), e);
                summary.failed.push(BatchFailure { input, error: format!("{:#}", e) });
            }
        }
    }

    info!(
        "Batch finished in {:.2}s: {} succeeded, {} failed",
        start.elapsed().as_secs_f32(),
        summary.succeeded.len(),
        summary.failed.len()
    );
    Ok(summary)
}
