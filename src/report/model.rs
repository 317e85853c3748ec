//! Report model assembly.
//!
//! Joins stress-ng classifications with pairing results and gpu-burn
//! classifications into one row per stress-ng log.

use crate::config::ReportConfig;
use crate::filename::parse_log_name;
use crate::gpu_burn;
use crate::pairing::{self, PairingOutcome};
use crate::scan::{LogFile, LogSet};
use crate::stress_ng;
use crate::types::{NodeType, PairedRunRecord, RunRecord};
use chrono::NaiveDate;
use log::{debug, warn};
use std::path::PathBuf;

/// One report row: a stress-ng run and, on gpu nodes, its gpu-burn result
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NodeRow {
    pub run: RunRecord,
    /// None on node types that don't run gpu-burn
    pub gpu_burn: Option<PairedRunRecord>,
}

/// Everything one invocation reports on
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NodeReport {
    pub node_type: NodeType,
    pub run_date: NaiveDate,
    pub directory: PathBuf,
    pub detailed: bool,
    pub rows: Vec<NodeRow>,
    /// gpu-burn logs that weren't paired with any stress-ng log
    pub unmatched_secondaries: Vec<PairedRunRecord>,
}

/// Build the report for a scanned run directory.
///
/// Empty stress-ng logs and logs whose names don't parse produce no row.
pub fn build_report(config: &ReportConfig, logs: &LogSet) -> NodeReport {
    let mut records: Vec<RunRecord> = Vec::with_capacity(logs.primaries.len());
    for file in &logs.primaries {
        if let Some(record) = classify_primary(file, config.detailed) {
            records.push(record);
        }
    }

    let (rows, unmatched_secondaries) = if config.node_type.runs_gpu_burn() {
        let primaries: Vec<&str> = records.iter().map(|r| r.source_filename.as_str()).collect();
        let secondaries: Vec<&str> = logs.secondaries.iter().map(|f| f.filename.as_str()).collect();
        let outcome = pairing::pair_logs(&primaries, &secondaries);
        join_gpu_burn(records, &outcome, logs)
    } else {
        let rows = records.into_iter().map(|run| NodeRow { run, gpu_burn: None }).collect();
        (rows, Vec::new())
    };

    NodeReport {
        node_type: config.node_type,
        run_date: config.run_date,
        directory: config.directory.clone(),
        detailed: config.detailed,
        rows,
        unmatched_secondaries,
    }
}

fn classify_primary(file: &LogFile, detailed: bool) -> Option<RunRecord> {
    if file.is_empty() {
        debug!("Skipping empty log {}", file.filename);
        return None;
    }
    let Some(name) = parse_log_name(&file.filename) else {
        warn!("Skipping {}: name is not <job_id>_<host>", file.filename);
        return None;
    };

    let classification = stress_ng::classify(&file.text, detailed);
    debug!("{} (job {} on {}): {}", file.filename, name.job_id, name.host, classification.status.as_str());

    Some(RunRecord {
        host: name.host,
        job_id: name.job_id,
        source_filename: file.filename.clone(),
        status: classification.status,
        metrics: classification.metrics,
    })
}

fn classify_secondary(filename: &str, primary: Option<&str>, logs: &LogSet) -> PairedRunRecord {
    let text = logs.secondary(filename).map(|f| f.text.as_str());
    PairedRunRecord {
        source_filename: Some(filename.to_string()),
        matched_primary_filename: primary.map(str::to_string),
        job_id: parse_log_name(filename).map(|n| n.job_id),
        status: gpu_burn::classify(text),
    }
}

fn join_gpu_burn(
    records: Vec<RunRecord>,
    outcome: &PairingOutcome,
    logs: &LogSet,
) -> (Vec<NodeRow>, Vec<PairedRunRecord>) {
    let rows = records
        .into_iter()
        .map(|run| {
            let gpu_burn = match outcome.secondary_for(&run.source_filename) {
                Some(secondary) => classify_secondary(secondary, Some(run.source_filename.as_str()), logs),
                None => PairedRunRecord::did_not_start(),
            };
            debug!("{} -> gpu-burn {}", run.source_filename, gpu_burn.status.as_str());
            NodeRow { run, gpu_burn: Some(gpu_burn) }
        })
        .collect();

    let unmatched = outcome.unmatched.iter().map(|s| classify_secondary(s, None, logs)).collect();

    (rows, unmatched)
}

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;
