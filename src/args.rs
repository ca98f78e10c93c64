use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to settings (yaml file).
    #[arg(long)]
    pub settings: String,

    /// Path to contact graph as adjacency list.
    #[arg(long, conflicts_with = "weights")]
    pub graph: Option<String>,

    /// Path to contact graph as upper triangular weight list.
    #[arg(long, requires = "nodes")]
    pub weights: Option<String>,

    /// Number of nodes described by the weight list.
    #[arg(long)]
    pub nodes: Option<usize>,

    /// Read the weight list row by row instead of diagonal by diagonal.
    #[arg(long, default_value_t = false)]
    pub row_major: bool,

    /// Number of independent simulation runs.
    #[arg(short, long, default_value_t = 1)]
    pub replicates: usize,

    /// Master seed from which the seeds of all runs are derived.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Directory for output files.
    #[arg(long, short, default_value = "./")]
    pub outdir: String,

    /// Write a diagnostic report of the contact graph.
    #[arg(long, default_value_t = false)]
    pub report: bool,

    /// Path to log file.
    #[arg(long, default_value = "strainspread.log")]
    pub log_file: String,

    /// Increase logging verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Number of threads used for replicates (requires feature `parallel`).
    #[arg(long)]
    pub threads: Option<usize>,

    /// Hide the progress bar.
    #[arg(long, default_value_t = false)]
    pub disable_progress_bar: bool,
}
