use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Run the web interface (default).
    Serve(ServeArgs),
    /// Download the model artifact into the model directory and exit.
    FetchModel,
    /// Analyze a roster file once and print the results.
    Analyze(AnalyzeArgs),
}

impl Default for Commands {
    fn default() -> Self {
        Self::Serve(ServeArgs::default())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Args)]
pub struct ServeArgs {
    /// Interface to bind (overrides `server.host`).
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind; 0 picks a free one (overrides `server.port`).
    #[arg(long)]
    pub port: Option<u16>,

    /// Do not open a browser window after startup.
    #[arg(long)]
    pub no_browser: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Args)]
pub struct AnalyzeArgs {
    /// Roster CSV file.
    pub file: PathBuf,

    /// Date to report on.
    #[arg(long)]
    pub date: String,

    /// Shift to report on.
    #[arg(long)]
    pub shift: String,
}
