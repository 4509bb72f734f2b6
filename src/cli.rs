//! CLI argument parsing for netmix

use crate::transform::{ScoreChoice, ThresholdPolicy};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "netmix")]
#[command(version)]
#[command(
    about = "Altered-subnetwork discovery with Gaussian mixtures and scan statistics",
    long_about = None
)]
pub struct Cli {
    /// Enable debug tracing output on stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// Show a single-line progress status on stderr
    #[arg(long, global = true)]
    pub progress: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fit the mixture model and write transformed node scores
    Scores(ScoresArgs),
    /// Select every node with a positive score
    PositiveSubset(SubsetArgs),
    /// Select the ranked prefix maximising the scan statistic
    ScanSubset(ScanArgs),
    /// Compare an observed subnetwork with permuted replicates
    Significance(SignificanceArgs),
    /// Extract the solution nodes from Heinz output
    Heinz(HeinzArgs),
    /// Compare a predicted node set with a reference node set
    Compare(CompareArgs),
}

#[derive(Args, Debug)]
pub struct ScoresArgs {
    /// Input node score file
    #[arg(short = 'i', long = "input-file", value_name = "FILE")]
    pub input_file: PathBuf,

    /// Treat input scores as p-values and transform them to z-scores
    #[arg(short = 'p', long = "p-values")]
    pub p_values: bool,

    /// Score to emit
    #[arg(
        long = "score-choice",
        visible_alias = "sc",
        value_enum,
        default_value = "responsibility"
    )]
    pub score_choice: ScoreChoice,

    /// Decision threshold to subtract from the emitted scores
    #[arg(
        long = "threshold-choice",
        visible_alias = "tc",
        value_enum,
        default_value = "mixing_proportion"
    )]
    pub threshold_choice: ThresholdPolicy,

    /// Nodes to leave out of the mixture fit (assumed altered)
    #[arg(long = "outlier-node-file", visible_alias = "onf", value_name = "FILE")]
    pub outlier_node_file: Option<PathBuf>,

    /// Output node score file
    #[arg(short = 'o', long = "output-file", value_name = "FILE")]
    pub output_file: PathBuf,

    /// Also write the expected subnetwork size floor(n * alpha)
    #[arg(long = "output-size-file", visible_alias = "os", value_name = "FILE")]
    pub output_size_file: Option<PathBuf>,

    /// TOML file with EM settings (tolerance, max_iterations, num_restarts, parallel)
    #[arg(long = "em-config", value_name = "FILE")]
    pub em_config: Option<PathBuf>,

    /// Relative log-likelihood improvement at which EM stops
    #[arg(long = "tolerance", value_name = "TOL")]
    pub tolerance: Option<f64>,

    /// Maximum EM iterations per restart
    #[arg(long = "max-iterations", value_name = "N")]
    pub max_iterations: Option<usize>,

    /// Number of EM restarts
    #[arg(long = "restarts", value_name = "N")]
    pub restarts: Option<usize>,

    /// Run EM restarts in parallel
    #[arg(long = "parallel")]
    pub parallel: bool,
}

#[derive(Args, Debug)]
pub struct SubsetArgs {
    /// Transformed node score file
    #[arg(short = 'i', long = "input-file", value_name = "FILE")]
    pub input_file: PathBuf,

    /// Restrict the subset to non-singleton components of this network
    #[arg(short = 'e', long = "edge-list-file", visible_alias = "elf", value_name = "FILE")]
    pub edge_list_file: Option<PathBuf>,

    /// Output node list file
    #[arg(short = 'o', long = "output-file", value_name = "FILE")]
    pub output_file: PathBuf,
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    #[command(flatten)]
    pub subset: SubsetArgs,

    /// Do nothing if the output file already exists
    #[arg(long = "check-output-file", visible_alias = "cof")]
    pub check_output_file: bool,
}

#[derive(Args, Debug)]
pub struct SignificanceArgs {
    /// Observed node score file
    #[arg(long = "observed-score-file", visible_alias = "osf", value_name = "FILE")]
    pub observed_score_file: PathBuf,

    /// Observed subnetwork node list
    #[arg(long = "observed-results-file", visible_alias = "orf", value_name = "FILE")]
    pub observed_results_file: PathBuf,

    /// Node score files of the permuted replicates
    #[arg(
        long = "permuted-score-files",
        visible_alias = "psf",
        value_name = "FILE",
        num_args = 1..,
        required = true
    )]
    pub permuted_score_files: Vec<PathBuf>,

    /// Subnetwork node lists of the permuted replicates, in the same order
    #[arg(
        long = "permuted-results-files",
        visible_alias = "prf",
        value_name = "FILE",
        num_args = 1..,
        required = true
    )]
    pub permuted_results_files: Vec<PathBuf>,

    /// Output report file
    #[arg(short = 'o', long = "output-file", value_name = "FILE")]
    pub output_file: PathBuf,

    /// Report format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct HeinzArgs {
    /// Heinz result file
    #[arg(short = 'i', long = "input-file", value_name = "FILE")]
    pub input_file: PathBuf,

    /// Output node list file
    #[arg(short = 'o', long = "output-file", value_name = "FILE")]
    pub output_file: PathBuf,
}

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Predicted node list
    #[arg(long = "predicted", value_name = "FILE")]
    pub predicted: PathBuf,

    /// Reference node list
    #[arg(long = "reference", value_name = "FILE")]
    pub reference: PathBuf,

    /// Output file (stdout if omitted)
    #[arg(short = 'o', long = "output-file", value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Report format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,
}
