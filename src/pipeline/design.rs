use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use serde::Serialize;
use tracing::{info, warn};

use crate::assembly::{check_motifs, AssemblyResult, MotifCheck, PlasmidAssembler};
use crate::config::DesignConfig;
use crate::error::Result;
use crate::io::fasta::{read_genome, write_fasta};
use crate::io::report::write_report;
use crate::parts::{load_default_genes, DesignWhitelist, Part, PartCatalog};
use crate::seq::{analyze_skew, extract_ori, NucleotideSequence, OriWindow, SkewExtremum};

/// Summary of the input genome
#[derive(Serialize, Debug, Clone)]
pub struct GenomeSummary {
    pub name: Option<String>,
    pub length: usize,
    pub gc_content: f64,
}

/// Result of one design run: the assembled plasmid and how it was built
#[derive(Serialize, Debug, Clone)]
pub struct DesignOutcome {
    pub genome: GenomeSummary,
    pub skew_minimum: SkewExtremum,
    pub skew_maximum: SkewExtremum,
    pub ori: OriWindow,
    pub ori_requested: bool,
    pub assembly: AssemblyResult,
    pub motif_checks: Vec<MotifCheck>,
}

impl DesignOutcome {
    pub fn sequence(&self) -> &str {
        self.assembly.sequence()
    }
}

/// Loaded, read-only inputs shared by every genome in a run
#[derive(Debug, Clone)]
pub struct DesignInputs {
    pub whitelist: DesignWhitelist,
    pub catalog: PartCatalog,
    pub default_genes: Vec<Part>,
}

impl DesignInputs {
    pub fn load(config: &DesignConfig) -> anyhow::Result<Self> {
        let whitelist = DesignWhitelist::from_path(&config.design, &config.ori_key)
            .context("loading design file")?;
        let catalog = PartCatalog::from_json_path(&config.markers)
            .context("loading marker database")?;
        let default_genes = load_default_genes(&config.default_genes)
            .context("loading default genes database")?;
        Ok(DesignInputs { whitelist, catalog, default_genes })
    }
}

/// Core pipeline on in-memory inputs: skew analysis, ORI extraction,
/// assembly and motif checks.
pub fn design_plasmid(
    genome: &NucleotideSequence,
    inputs: &DesignInputs,
    config: &DesignConfig,
) -> Result<DesignOutcome> {
    let assembler = PlasmidAssembler::new(&config.separator)?;

    info!("Identifying origin of replication by GC skew");
    let (_, skew_minimum, skew_maximum) = analyze_skew(genome)?;
    let ori = extract_ori(genome, skew_minimum.position, config.window_size, config.topology)?;
    info!(
        "ORI identified at index {}. Extracted {}bp ({}{})",
        skew_minimum.position,
        ori.len(),
        config.topology,
        if ori.wrapped { ", wrapped" } else { "" }
    );

    info!("Assembling plasmid (ORI -> markers -> MCS -> default genes)");
    let assembly = assembler.assemble(&ori, &inputs.whitelist, &inputs.catalog, &inputs.default_genes);
    info!(
        "Assembled {} bp from {} parts, {} skipped",
        assembly.len(),
        assembly.included().len(),
        assembly.skipped().len()
    );

    let motif_checks = check_motifs(assembly.sequence().as_bytes(), &config.check_absent);
    for check in &motif_checks {
        let label = check.label.as_deref().unwrap_or(&check.motif);
        if check.is_absent() {
            info!("Verified: {} site ({}) is absent", label, check.motif);
        } else {
            warn!("{} site ({}) is present at {:?}", label, check.motif, check.positions);
        }
    }

    Ok(DesignOutcome {
        genome: GenomeSummary {
            name: genome.name().map(str::to_string),
            length: genome.len(),
            gc_content: genome.gc_content(),
        },
        skew_minimum,
        skew_maximum,
        ori,
        ori_requested: inputs.whitelist.ori_requested(),
        assembly,
        motif_checks,
    })
}

/// Write the plasmid FASTA and, if requested, the provenance report.
pub fn write_outcome(
    outcome: &DesignOutcome,
    output: &Path,
    record_id: &str,
    report: Option<&Path>,
    config: &DesignConfig,
) -> anyhow::Result<()> {
    write_fasta(output, record_id, outcome.sequence())
        .with_context(|| format!("writing plasmid to {}", output.display()))?;
    info!("Plasmid saved to: {}", output.display());

    if let Some(report_path) = report {
        write_report(outcome, report_path, config.report_format)
            .with_context(|| format!("writing report to {}", report_path.display()))?;
        info!("Report saved to: {}", report_path.display());
    }
    Ok(())
}

/// Full single-genome run: resolve inputs, load, design, write.
pub fn run_design(mut config: DesignConfig) -> anyhow::Result<DesignOutcome> {
    let start = Instant::now();
    config.validate()?;
    config.resolve_fallbacks().context("resolving input files")?;

    let genome = read_genome(&config.input)
        .with_context(|| format!("loading genome {}", config.input.display()))?;
    let inputs = DesignInputs::load(&config)?;
    let outcome = design_plasmid(&genome, &inputs, &config).context("designing plasmid")?;

    write_outcome(
        &outcome,
        &config.output,
        &config.record_id,
        config.report.as_deref(),
        &config,
    )?;
    info!("Design completed in {:.2}s", start.elapsed().as_secs_f32());
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parts::{PartCategory, DEFAULT_ORI_KEY};
    use crate::seq::Topology;

    /// Genome whose skew falls steadily to position `min_at` and rises after it
    fn skew_genome(len: usize, min_at: usize) -> NucleotideSequence {
        let bases: String = (0..len)
            .map(|i| if i <= min_at { 'C' } else { 'G' })
            .collect();
        NucleotideSequence::from_str_named("synthetic", &bases).unwrap()
    }

    fn inputs(names: &[&str]) -> DesignInputs {
        DesignInputs {
            whitelist: DesignWhitelist::from_names(names, DEFAULT_ORI_KEY),
            catalog: PartCatalog::from_parts(vec![
                Part::new("MarkerA", PartCategory::Marker, "ATGAAATAA").unwrap(),
                Part::new("EcoRI_site", PartCategory::Mcs, "GAATTC").unwrap(),
            ]),
            default_genes: vec![
                Part::new("DefaultGene1", PartCategory::DefaultGene, "ATGTTTTAA").unwrap(),
                Part::new("DefaultGene2", PartCategory::DefaultGene, "ATGGGGTAA").unwrap(),
            ],
        }
    }

    #[test]
    fn test_design_scenario() {
        let genome = skew_genome(2000, 1000);
        let config = DesignConfig { check_absent: vec![], ..DesignConfig::default() };
        let outcome = design_plasmid(&genome, &inputs(&["MarkerA", "GeneX"]), &config).unwrap();

        assert_eq!(outcome.skew_minimum.position, 1000);
        assert_eq!(outcome.ori.start, 700);
        assert_eq!(outcome.ori.as_bytes(), genome.subsequence(700..1300).unwrap());

        let ori = std::str::from_utf8(outcome.ori.as_bytes()).unwrap();
        let expected = format!(
            "{ori}TACTAGAGATGAAATAATACTAGAGATGTTTTAATACTAGAGATGGGGTAA",
            ori = ori
        );
        assert_eq!(outcome.sequence(), expected);
        assert_eq!(outcome.assembly.skipped_names(), vec!["GeneX"]);
    }

    #[test]
    fn test_unrequested_site_never_appears() {
        let genome = skew_genome(900, 450);
        let outcome = design_plasmid(&genome, &inputs(&["MarkerA"]), &DesignConfig::default()).unwrap();
        assert_eq!(outcome.motif_checks.len(), 1);
        assert!(outcome.motif_checks[0].is_absent());
        assert!(!outcome.sequence().contains("GAATTC"));
    }

    #[test]
    fn test_linear_window_too_large_fails() {
        let genome = skew_genome(100, 50);
        let config = DesignConfig { topology: Topology::Linear, ..DesignConfig::default() };
        assert!(design_plasmid(&genome, &inputs(&[]), &config).is_err());
    }

    #[test]
    fn test_bad_separator_fails_before_assembly() {
        let genome = skew_genome(2000, 1000);
        let config = DesignConfig { separator: "TAC-TAG".to_string(), ..DesignConfig::default() };
        assert!(design_plasmid(&genome, &inputs(&["MarkerA"]), &config).is_err());
    }
}
