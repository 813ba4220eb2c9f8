use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::io::fasta::read_genome;
use crate::seq::{analyze_skew, Composition, NucleotideSequence, SkewExtremum};

#[derive(Serialize, Debug, Clone)]
pub struct Stats {
    pub name: Option<String>,
    pub length: usize,
    pub composition: Composition,
    pub gc_content: f64,
    pub skew_minimum: SkewExtremum,
    pub skew_maximum: SkewExtremum,
}

pub fn sequence_stats(genome: &NucleotideSequence) -> Result<Stats> {
    let (_, skew_minimum, skew_maximum) = analyze_skew(genome)?;
    Ok(Stats {
        name: genome.name().map(str::to_string),
        length: genome.len(),
        composition: genome.composition(),
        gc_content: genome.gc_content(),
        skew_minimum,
        skew_maximum,
    })
}

pub fn calculate_stats(path: &Path) -> Result<Stats> {
    sequence_stats(&read_genome(path)?)
}

/// Header and row for TSV output
pub fn stats_tsv(stats: &Stats) -> (String, String) {
    let header = "name\tlength\tA\tC\tG\tT\tother\tgc_content\tskew_min_pos\tskew_min\tskew_max_pos\tskew_max".to_string();
    let row = format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{:.4}\t{}\t{}\t{}\t{}",
        stats.name.as_deref().unwrap_or("."),
        stats.length,
        stats.composition.a,
        stats.composition.c,
        stats.composition.g,
        stats.composition.t,
        stats.composition.other,
        stats.gc_content,
        stats.skew_minimum.position,
        stats.skew_minimum.value,
        stats.skew_maximum.position,
        stats.skew_maximum.value
    );
    (header, row)
}
