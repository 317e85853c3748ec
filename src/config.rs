/// Report configuration
///
/// This module handles:
/// - Validating the run date
/// - Resolving the stress-test root directory
/// - Composing the run directory from node type and date
use crate::cli::CliArgs;
use crate::types::NodeType;
use chrono::NaiveDate;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use std::env;
use std::path::{Path, PathBuf};

/// Root used when neither --root nor STRESS_SUMMARY_ROOT is set
pub const DEFAULT_ROOT: &str = "/odyssey/stress_nodes/stress-test";
/// Environment variable overriding the stress-test root
pub const ROOT_ENV: &str = "STRESS_SUMMARY_ROOT";

lazy_static! {
    static ref STRICT_DATE: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex");
}

/// Fully resolved settings for one report invocation
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub node_type: NodeType,
    pub run_date: NaiveDate,
    pub directory: PathBuf,
    pub secondary_suffix: String,
    pub detailed: bool,
    pub json_output: Option<PathBuf>,
}

/// Parse a run date, requiring exactly `YYYY-MM-DD` and a real calendar day
pub fn parse_run_date(date: &str) -> Result<NaiveDate, String> {
    if !STRICT_DATE.is_match(date) {
        return Err(format!("Date must be in strict YYYY-MM-DD format (e.g. 2025-01-23), got '{}'", date));
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| format!("Invalid date '{}': {}", date, e))
}

/// `<root>/<node_type>_node/output/<YYYY-MM-DD>`
pub fn run_directory(root: &Path, node_type: NodeType, run_date: NaiveDate) -> PathBuf {
    root.join(format!("{}_node", node_type.as_str())).join("output").join(run_date.format("%Y-%m-%d").to_string())
}

/// Build the report configuration from CLI arguments
pub fn build_report_config(args: &CliArgs) -> Result<ReportConfig, String> {
    let run_date = parse_run_date(&args.run_date)?;

    let root = match args.root {
        Some(ref root) => root.clone(),
        None => PathBuf::from(env::var(ROOT_ENV).unwrap_or_else(|_| DEFAULT_ROOT.to_string())),
    };
    debug!("Using stress-test root {:?}", root);

    let directory = run_directory(&root, args.node_type, run_date);
    if !directory.is_dir() {
        return Err(format!("No stress-test output directory at {}", directory.display()));
    }

    Ok(ReportConfig {
        node_type: args.node_type,
        run_date,
        directory,
        secondary_suffix: args.secondary_suffix.clone(),
        detailed: args.detailed,
        json_output: args.json.clone(),
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
