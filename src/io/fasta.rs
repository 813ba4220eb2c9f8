// src/io/fasta.rs
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use bio::io::fasta;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use tracing::{debug, info};

use crate::error::{DesignerError, Result};
use crate::seq::NucleotideSequence;

/// Output line width for sequence records
pub const FASTA_LINE_WIDTH: usize = 80;

pub enum FastaWriter {
    Plain(BufWriter<File>),
    Compressed(BufWriter<GzEncoder<File>>),
}

fn is_gzip(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "gz")
}

/// Open a FASTA file for reading, handles gzipped files automatically
pub fn open_fasta(path: &Path) -> io::Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    if is_gzip(path) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Read a genome file as one sequence.
///
/// Multi-record files are concatenated in file order and named after the
/// first record. Text without any `>` header is taken as raw sequence.
pub fn read_genome(path: &Path) -> Result<NucleotideSequence> {
    let mut text = String::new();
    open_fasta(path)?.read_to_string(&mut text)?;
    let fallback_name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "genome".to_string());
    let genome = parse_genome(&text, &fallback_name)?;
    info!("Read genome '{}' ({} bp) from {}", genome.name().unwrap_or(&fallback_name), genome.len(), path.display());
    Ok(genome)
}

/// Parse FASTA (or raw) text into a single sequence.
pub fn parse_genome(text: &str, fallback_name: &str) -> Result<NucleotideSequence> {
    if !text.trim_start().starts_with('>') {
        debug!("No FASTA header found, reading raw sequence");
        return NucleotideSequence::new(Some(fallback_name.to_string()), text.as_bytes());
    }

    let reader = fasta::Reader::from_bufread(text.as_bytes());
    let mut name = None;
    let mut bases = Vec::new();
    let mut records = 0usize;
    for record in reader.records() {
        let record = record.map_err(|e| DesignerError::InvalidSequence(e.to_string()))?;
        if name.is_none() {
            name = Some(record.id().to_string());
        }
        debug!("Record '{}' ({} bp)", record.id(), record.seq().len());
        bases.extend_from_slice(record.seq());
        records += 1;
    }
    if records > 1 {
        info!("Concatenated {} FASTA records into one sequence", records);
    }
    NucleotideSequence::new(name.or_else(|| Some(fallback_name.to_string())), &bases)
}

impl FastaWriter {
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        if is_gzip(path) {
            let encoder = GzEncoder::new(file, Compression::default());
            Ok(FastaWriter::Compressed(BufWriter::new(encoder)))
        } else {
            Ok(FastaWriter::Plain(BufWriter::new(file)))
        }
    }

    fn inner(&mut self) -> &mut dyn Write {
        match self {
            FastaWriter::Plain(writer) => writer,
            FastaWriter::Compressed(writer) => writer,
        }
    }

    /// Write one record, wrapping the sequence at [`FASTA_LINE_WIDTH`].
    pub fn write_record(&mut self, header: &str, sequence: &str) -> io::Result<()> {
        let writer = self.inner();
        writeln!(writer, ">{}", header.trim_start_matches('>'))?;
        for chunk in sequence.as_bytes().chunks(FASTA_LINE_WIDTH) {
            writer.write_all(chunk)?;
            writer.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Flush buffers and finish the gzip stream, if any.
    pub fn finish(self) -> io::Result<()> {
        match self {
            FastaWriter::Plain(mut writer) => writer.flush(),
            FastaWriter::Compressed(writer) => {
                let encoder = writer.into_inner().map_err(|e| e.into_error())?;
                encoder.finish()?;
                Ok(())
            }
        }
    }
}

/// Write a single-record FASTA file.
pub fn write_fasta(path: &Path, header: &str, sequence: &str) -> io::Result<()> {
    let mut writer = FastaWriter::new(path)?;
    writer.write_record(header, sequence)?;
    writer.finish()
}
