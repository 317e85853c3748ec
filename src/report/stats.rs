//! Statistics and summary generation for the report.

use super::model::NodeReport;
use super::types::{BurnCounts, ReportSummary, StressCounts};

/// Count outcomes per tool across all report rows.
///
/// Unmatched gpu-burn logs are counted separately, not in `gpu_burn`.
pub fn summarize_report(report: &NodeReport) -> ReportSummary {
    let mut stress_ng = StressCounts::default();
    let mut gpu_burn = report.node_type.runs_gpu_burn().then(BurnCounts::default);

    for row in &report.rows {
        stress_ng.add(row.run.status);
        if let (Some(counts), Some(burn)) = (gpu_burn.as_mut(), row.gpu_burn.as_ref()) {
            counts.add(burn.status);
        }
    }

    ReportSummary {
        nodes: report.rows.len(),
        stress_ng,
        gpu_burn,
        unmatched_gpu_burn: report.unmatched_secondaries.len(),
    }
}

/// Print the summary block that follows the table
pub fn print_summary(summary: &ReportSummary) {
    print!("{}", format_summary(summary));
}

/// Format the summary block as a string
pub fn format_summary(summary: &ReportSummary) -> String {
    let mut output = String::new();
    output.push_str("\n=== Summary ===\n");
    output.push_str(&format!("Nodes:               {}\n", summary.nodes));
    output.push_str(&format!(
        "stress-ng  ✓ {}  ✗ {}  … {}\n",
        summary.stress_ng.success, summary.stress_ng.failed, summary.stress_ng.incomplete
    ));
    if let Some(burn) = summary.gpu_burn {
        output.push_str(&format!(
            "gpu-burn   ✓ {}  ✗ {}  … {}  ⊘ {}\n",
            burn.success, burn.failed, burn.incomplete, burn.did_not_start
        ));
        if summary.unmatched_gpu_burn > 0 {
            output.push_str(&format!("Unpaired gpu-burn logs: {}\n", summary.unmatched_gpu_burn));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::model::NodeRow;
    use crate::types::{BurnStatus, NodeType, PairedRunRecord, RunRecord, StressStatus};
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn row(status: StressStatus, burn: Option<BurnStatus>) -> NodeRow {
        NodeRow {
            run: RunRecord {
                host: "gpu01".to_string(),
                job_id: 1,
                source_filename: "1_gpu01.out".to_string(),
                status,
                metrics: None,
            },
            gpu_burn: burn.map(|status| PairedRunRecord { status, ..PairedRunRecord::did_not_start() }),
        }
    }

    fn report(node_type: NodeType, rows: Vec<NodeRow>) -> NodeReport {
        NodeReport {
            node_type,
            run_date: NaiveDate::from_ymd_opt(2025, 1, 23).unwrap(),
            directory: PathBuf::from("/tmp"),
            detailed: false,
            rows,
            unmatched_secondaries: vec![PairedRunRecord::did_not_start()],
        }
    }

    #[test]
    fn test_summarize_gpu_report() {
        let summary = summarize_report(&report(
            NodeType::Gpu,
            vec![
                row(StressStatus::Success, Some(BurnStatus::Success)),
                row(StressStatus::Failed, Some(BurnStatus::DidNotStart)),
                row(StressStatus::Incomplete, Some(BurnStatus::Incomplete)),
            ],
        ));

        assert_eq!(summary.nodes, 3);
        assert_eq!(summary.stress_ng, StressCounts { success: 1, failed: 1, incomplete: 1 });
        assert_eq!(summary.gpu_burn, Some(BurnCounts { success: 1, failed: 0, incomplete: 1, did_not_start: 1 }));
        assert_eq!(summary.unmatched_gpu_burn, 1);
    }

    #[test]
    fn test_cpu_summary_has_no_gpu_burn_counts() {
        let summary = summarize_report(&report(NodeType::Cpu, vec![row(StressStatus::Success, None)]));
        assert_eq!(summary.gpu_burn, None);

        let text = format_summary(&summary);
        assert!(text.contains("stress-ng"));
        assert!(!text.contains("gpu-burn"));
    }
}
