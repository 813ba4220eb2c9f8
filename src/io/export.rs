use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::seq::SkewCurve;

/// Export a skew curve as TSV, keeping every `step`-th position plus the last one
pub fn export_skew_curve<W: Write>(curve: &SkewCurve, step: usize, mut writer: W) -> io::Result<()> {
    let step = step.max(1);
    let last = curve.len().saturating_sub(1);

    writeln!(writer, "position\tskew")?;
    for (i, value) in curve.values().iter().enumerate() {
        if i % step == 0 || i == last {
            writeln!(writer, "{}\t{}", i, value)?;
        }
    }
    Ok(())
}

pub fn export_skew_curve_to_path(curve: &SkewCurve, step: usize, output_path: &Path) -> io::Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    export_skew_curve(curve, step, &mut writer)?;
    writer.flush()
}
