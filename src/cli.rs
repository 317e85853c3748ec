use crate::config;
use crate::scan::DEFAULT_SECONDARY_SUFFIX;
use crate::types::NodeType;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "stress-summary")]
#[command(about = "Summarize stress-ng and gpu-burn results for one stress-test run")]
#[command(version)]
pub struct CliArgs {
    /// Date the stress test started, in strict YYYY-MM-DD format (e.g. 2025-01-23)
    #[arg(long = "date", short = 'd', value_name = "YYYY-MM-DD")]
    pub run_date: String,

    /// Type of node the stress test ran on
    #[arg(long, short = 'n', value_enum)]
    pub node_type: NodeType,

    /// Debug mode: log which files are read and how they were classified
    #[arg(long, short = 'g')]
    pub debug: bool,

    /// Detailed report: adds source file, requested/final run time and peak temperature
    #[arg(long, short = 'l')]
    pub detailed: bool,

    /// Root of the stress-test tree (overrides STRESS_SUMMARY_ROOT)
    /// Logs are read from <ROOT>/<node-type>_node/output/<date>
    #[arg(long, value_name = "ROOT")]
    pub root: Option<PathBuf>,

    /// Filename suffix identifying gpu-burn logs
    #[arg(long, value_name = "SUFFIX", default_value = DEFAULT_SECONDARY_SUFFIX)]
    pub secondary_suffix: String,

    /// Also write the report as JSON to this path
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Override console width (default: auto-detect)
    #[arg(long, value_name = "COLUMNS")]
    pub console_width: Option<usize>,

    /// Disable colored rows
    #[arg(long)]
    pub no_color: bool,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        CliArgs::parse()
    }

    /// Validate argument values clap can't check on its own
    pub fn validate(&self) -> Result<(), String> {
        config::parse_run_date(&self.run_date)?;

        if self.secondary_suffix.trim().is_empty() {
            return Err("--secondary-suffix must not be empty".to_string());
        }

        if let Some(width) = self.console_width
            && width < 40
        {
            return Err(format!("--console-width must be at least 40 (got {})", width));
        }

        Ok(())
    }
}
