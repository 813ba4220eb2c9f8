use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use plasmid_designer::config::{
    DesignConfig, DEFAULT_ABSENT_MOTIF, DEFAULT_DESIGN, DEFAULT_GENES_FILE, DEFAULT_INPUT,
    MARKER_DB_FILE, OUTPUT_FILE, OUTPUT_RECORD_ID,
};
use plasmid_designer::assembly::DEFAULT_SEPARATOR;
use plasmid_designer::io::report::ReportFormat;
use plasmid_designer::parts::DEFAULT_ORI_KEY;
use plasmid_designer::seq::{Topology, DEFAULT_WINDOW_SIZE};

#[derive(Parser, Debug)]
#[command(
    name = "plasmid-designer",
    version,
    about = "Find a bacterial ORI by GC skew and assemble a synthetic plasmid around it",
    long_about = None,
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Running without a subcommand is the same as `design`
    #[command(flatten)]
    pub design: DesignArgs,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Design a plasmid from one genome (the default command)
    Design(DesignArgs),

    /// Report the GC-skew extrema of a genome
    Skew {
        /// Input FASTA(.gz) file
        #[arg(short, long, default_value = DEFAULT_INPUT)]
        input: PathBuf,

        /// Optional path to write the skew curve as TSV
        #[arg(long)]
        curve: Option<PathBuf>,

        /// Write every n-th position of the curve
        #[arg(long, default_value_t = 1)]
        step: usize,
    },

    /// Print length, base composition and skew extrema of a genome
    Stats {
        /// Input FASTA(.gz) file
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: StatsFormat,
    },

    /// Design one plasmid per genome in parallel
    Batch {
        /// Input FASTA(.gz) files
        #[arg(required = true, num_args = 1..)]
        inputs: Vec<PathBuf>,

        /// Directory for the output FASTA files
        #[arg(short, long)]
        output_dir: PathBuf,

        /// Number of threads
        #[arg(long, default_value_t = num_cpus::get())]
        threads: usize,

        /// Write a provenance report next to each output
        #[arg(long)]
        reports: bool,

        #[command(flatten)]
        parts: PartsArgs,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsFormat {
    Json,
    Tsv,
}

/// Options shared by every design run
#[derive(Args, Debug, Clone)]
pub struct PartsArgs {
    /// Design file listing the parts to include
    #[arg(short, long, default_value = DEFAULT_DESIGN)]
    pub design: PathBuf,

    /// Marker/gene/MCS database (JSON)
    #[arg(long, default_value = MARKER_DB_FILE)]
    pub markers: PathBuf,

    /// Default genes always appended (JSON)
    #[arg(long, default_value = DEFAULT_GENES_FILE)]
    pub default_genes: PathBuf,

    /// Size of the ORI window around the skew minimum
    #[arg(short, long, default_value_t = DEFAULT_WINDOW_SIZE)]
    pub window_size: usize,

    /// Genome topology used for ORI window extraction
    #[arg(long, value_enum, default_value_t = Topology::Circular)]
    pub topology: Topology,

    /// Sequence placed between adjacent parts
    #[arg(long, default_value = DEFAULT_SEPARATOR)]
    pub separator: String,

    /// Design entry that stands for the detected ORI
    #[arg(long, default_value = DEFAULT_ORI_KEY)]
    pub ori_key: String,

    /// Enzyme names or motifs expected to be absent from the output
    #[arg(long, value_delimiter = ',', default_value = DEFAULT_ABSENT_MOTIF)]
    pub check_absent: Vec<String>,

    /// Skip the absent-motif check
    #[arg(long)]
    pub no_motif_check: bool,

    /// Report format
    #[arg(long, value_enum, default_value = "json")]
    pub report_format: ReportFormat,
}

#[derive(Args, Debug, Clone)]
pub struct DesignArgs {
    /// Input genome FASTA(.gz)
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Output plasmid FASTA(.gz)
    #[arg(short, long, default_value = OUTPUT_FILE)]
    pub output: PathBuf,

    /// FASTA record id of the output
    #[arg(long, default_value = OUTPUT_RECORD_ID)]
    pub record_id: String,

    /// Optional path to write the provenance report
    #[arg(long)]
    pub report: Option<PathBuf>,

    #[command(flatten)]
    pub parts: PartsArgs,
}

impl PartsArgs {
    /// Fill the shared fields of a config
    pub fn apply(self, config: &mut DesignConfig) {
        config.design = self.design;
        config.markers = self.markers;
        config.default_genes = self.default_genes;
        config.window_size = self.window_size;
        config.topology = self.topology;
        config.separator = self.separator;
        config.ori_key = self.ori_key;
        config.check_absent = if self.no_motif_check {
            Vec::new()
        } else {
            self.check_absent.into_iter().filter(|m| !m.trim().is_empty()).collect()
        };
        config.report_format = self.report_format;
    }

    pub fn into_config(self) -> DesignConfig {
        let mut config = DesignConfig::default();
        self.apply(&mut config);
        config
    }
}

impl DesignArgs {
    pub fn into_config(self) -> DesignConfig {
        let mut config = self.parts.into_config();
        config.input = self.input;
        config.output = self.output;
        config.record_id = self.record_id;
        config.report = self.report;
        config
    }
}
