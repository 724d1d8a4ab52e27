//! CLI argument parsing for semdrift

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "semdrift")]
#[command(version)]
#[command(about = "Semantic drift measurement: TF-IDF distance, noise injection and resampling statistics", long_about = None)]
pub struct Cli {
    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Configuration file (TOML)
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Cosine distance between two vectors
    Distance {
        /// First vector (comma-separated)
        #[arg(long, value_delimiter = ',', required = true, allow_negative_numbers = true, allow_hyphen_values = true)]
        u: Vec<f64>,

        /// Second vector (comma-separated)
        #[arg(long, value_delimiter = ',', required = true, allow_negative_numbers = true, allow_hyphen_values = true)]
        v: Vec<f64>,
    },

    /// TF-IDF embedding of a text against a corpus
    Embed {
        /// JSON array of corpus documents
        #[arg(long, value_name = "FILE")]
        corpus: PathBuf,

        /// Text to embed
        #[arg(long)]
        text: String,
    },

    /// Inject character noise into a text
    Noise {
        /// Text to perturb
        #[arg(long)]
        text: String,

        /// Noise level in [0, 1]
        #[arg(long, conflicts_with = "sweep")]
        epsilon: Option<f64>,

        /// Perturb at every standard noise level (0-50%)
        #[arg(long)]
        sweep: bool,

        /// Random seed (overrides [noise] seed)
        #[arg(long)]
        seed: Option<u64>,

        /// Replacement alphabet (overrides [noise] alphabet)
        #[arg(long)]
        alphabet: Option<String>,

        /// Never corrupt whitespace
        #[arg(long = "preserve-whitespace")]
        preserve_whitespace: bool,
    },

    /// Bootstrap confidence interval of the mean
    Bootstrap {
        /// Samples (comma-separated)
        #[arg(long, value_delimiter = ',', required = true, allow_negative_numbers = true, allow_hyphen_values = true)]
        samples: Vec<f64>,

        /// Number of resamples (overrides [bootstrap] resamples)
        #[arg(long)]
        resamples: Option<usize>,

        /// Confidence level (overrides [bootstrap] confidence_level)
        #[arg(long)]
        confidence: Option<f64>,

        /// Random seed (overrides [bootstrap] seed)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// One-way ANOVA across groups
    Anova {
        /// JSON array of sample arrays
        #[arg(long, value_name = "FILE")]
        groups: PathBuf,
    },

    /// Cohen's d and Cliff's delta between two groups
    CohensD {
        /// First group (comma-separated)
        #[arg(long, value_delimiter = ',', required = true, allow_negative_numbers = true, allow_hyphen_values = true)]
        group1: Vec<f64>,

        /// Second group (comma-separated)
        #[arg(long, value_delimiter = ',', required = true, allow_negative_numbers = true, allow_hyphen_values = true)]
        group2: Vec<f64>,
    },

    /// Drift of per-level outputs against the original sentence
    Drift {
        /// JSON file: {"original": "...", "outputs": {"0": "...", ...}}
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
    },
}

impl Command {
    /// Subcommand name as typed on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Command::Distance { .. } => "distance",
            Command::Embed { .. } => "embed",
            Command::Noise { .. } => "noise",
            Command::Bootstrap { .. } => "bootstrap",
            Command::Anova { .. } => "anova",
            Command::CohensD { .. } => "cohens-d",
            Command::Drift { .. } => "drift",
        }
    }
}
