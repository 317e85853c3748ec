//! JSON export of the report.

use super::model::NodeReport;
use super::stats::summarize_report;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

/// Export the report as JSON.
///
/// Includes the summary counts alongside every row and unpaired gpu-burn log.
pub fn export_json_report(report: &NodeReport, output_path: &Path) -> io::Result<()> {
    use serde_json::json;

    let summary = summarize_report(report);

    let document = json!({
        "node_type": report.node_type,
        "run_date": report.run_date,
        "directory": report.directory,
        "detailed": report.detailed,
        "summary": summary,
        "rows": report.rows,
        "unmatched_secondaries": report.unmatched_secondaries,
    });

    let file = BufWriter::new(File::create(output_path)?);
    serde_json::to_writer_pretty(file, &document)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::model::NodeRow;
    use crate::types::{NodeType, PairedRunRecord, RunRecord, StressStatus};
    use chrono::NaiveDate;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_export_json_report() {
        let report = NodeReport {
            node_type: NodeType::Gpu,
            run_date: NaiveDate::from_ymd_opt(2025, 1, 23).unwrap(),
            directory: PathBuf::from("/stress/gpu_node/output/2025-01-23"),
            detailed: false,
            rows: vec![NodeRow {
                run: RunRecord {
                    host: "gpu01".to_string(),
                    job_id: 100,
                    source_filename: "100_gpu01.out".to_string(),
                    status: StressStatus::Incomplete,
                    metrics: None,
                },
                gpu_burn: Some(PairedRunRecord::did_not_start()),
            }],
            unmatched_secondaries: vec![],
        };

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("report.json");
        export_json_report(&report, &path).unwrap();

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["node_type"], "gpu");
        assert_eq!(value["run_date"], "2025-01-23");
        assert_eq!(value["summary"]["stress_ng"]["incomplete"], 1);
        assert_eq!(value["summary"]["gpu_burn"]["did_not_start"], 1);
        assert_eq!(value["rows"][0]["run"]["status"], "incomplete");
        assert_eq!(value["rows"][0]["gpu_burn"]["status"], "did_not_start");

        // The rows read back into the same model
        let rows: Vec<NodeRow> = serde_json::from_value(value["rows"].clone()).unwrap();
        assert_eq!(rows, report.rows);
    }
}
