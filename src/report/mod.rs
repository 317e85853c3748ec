//! Report generation module - assembly, statistics and rendering.
//!
//! This module handles:
//! - Joining classifier and pairing output into the node report
//! - Calculating summary counts
//! - Console table output
//! - Export to JSON
//!
//! # Module Organization
//!
//! - `model` - Report assembly (NodeRow, NodeReport)
//! - `types` - Summary types (ReportSummary and per-tool counts)
//! - `stats` - Summary statistics
//! - `table` - Console table output (short and detailed modes)
//! - `export` - JSON export

mod export;
mod model;
mod stats;
mod table;
mod types;

pub use model::build_report;

pub use stats::{print_summary, summarize_report};

pub use table::print_report;

pub use export::export_json_report;
