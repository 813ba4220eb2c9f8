use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use clap::ValueEnum;

use crate::pipeline::design::DesignOutcome;

/// Provenance report format
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Json,
    Tsv,
}

/// Write the outcome as pretty JSON
pub fn write_json_report<W: Write>(outcome: &DesignOutcome, writer: W) -> io::Result<()> {
    serde_json::to_writer_pretty(writer, outcome)?;
    Ok(())
}

/// One row per included or skipped part
pub fn write_tsv_report<W: Write>(outcome: &DesignOutcome, mut writer: W) -> io::Result<()> {
    writeln!(writer, "status\tname\tcategory\tstart\tend\tlength")?;
    for part in outcome.assembly.included() {
        writeln!(
            writer,
            "included\t{}\t{}\t{}\t{}\t{}",
            part.name,
            part.category,
            part.start,
            part.end,
            part.end - part.start
        )?;
    }
    for part in outcome.assembly.skipped() {
        writeln!(writer, "skipped\t{}\t{}\t.\t.\t.", part.name, part.category)?;
    }
    Ok(())
}

pub fn write_report(outcome: &DesignOutcome, path: &Path, format: ReportFormat) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    match format {
        ReportFormat::Json => write_json_report(outcome, &mut writer)?,
        ReportFormat::Tsv => write_tsv_report(outcome, &mut writer)?,
    }
    writer.flush()
}
