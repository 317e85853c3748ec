//! Table output for the node report.
//!
//! Short mode shows node, job and status columns; detailed mode adds the
//! source file, run times and peak temperature.

use super::model::{NodeReport, NodeRow};
use crate::console_format::{self, TableLayout, TableWriter};
use crate::types::{NodeType, PairedRunRecord, StressStatus};
use std::io::{self, Write};
use term::color::Color;

/// Column headers for the given node type and mode
pub fn report_headers(node_type: NodeType, detailed: bool) -> Vec<&'static str> {
    let mut headers = vec!["Node", "Job ID"];
    if detailed {
        headers.push("File");
    }
    headers.push("stress-ng status");
    if node_type.runs_gpu_burn() {
        headers.push("gpu-burn status");
    }
    if detailed {
        headers.extend(["Requested", "Final runtime", "Peak temp"]);
    }
    headers
}

/// Cells of one row, in the order of [`report_headers`]
pub fn row_cells(row: &NodeRow, node_type: NodeType, detailed: bool) -> Vec<String> {
    let run = &row.run;
    let mut cells = vec![run.host.clone(), run.job_id.to_string()];
    if detailed {
        cells.push(run.source_filename.clone());
    }
    cells.push(run.status.as_str().to_string());
    if node_type.runs_gpu_burn() {
        let burn = row.gpu_burn.clone().unwrap_or_else(PairedRunRecord::did_not_start);
        cells.push(burn.status.as_str().to_string());
    }
    if detailed {
        match &run.metrics {
            Some(metrics) => {
                cells.push(metrics.requested_display());
                cells.push(metrics.final_runtime.display());
                cells.push(metrics.temperature_display());
            }
            None => cells.extend(["-".to_string(), "-".to_string(), "N/A".to_string()]),
        }
    }
    cells
}

/// Row color by stress-ng outcome
fn status_color(status: StressStatus) -> Color {
    match status {
        StressStatus::Success => term::color::GREEN,
        StressStatus::Failed => term::color::RED,
        StressStatus::Incomplete => term::color::YELLOW,
    }
}

/// Render the whole report: title, node table and, in detailed mode, unpaired gpu-burn logs
pub fn write_report<W: Write>(writer: &mut TableWriter<W>, report: &NodeReport, console_width: usize) -> io::Result<()> {
    writer.write_line(&format!(
        "Stress test results for {} nodes, run of {}",
        report.node_type.as_str(),
        report.run_date.format("%Y-%m-%d")
    ))?;
    writer.write_line(&format!("  Logs: {}", report.directory.display()))?;
    writer.write_line("")?;

    if report.rows.is_empty() {
        return writer.write_line("No stress-ng logs found.");
    }

    let headers = report_headers(report.node_type, report.detailed);
    let rows: Vec<Vec<String>> =
        report.rows.iter().map(|r| row_cells(r, report.node_type, report.detailed)).collect();
    // The file name is the column that can give way on narrow consoles
    let flexible = if report.detailed { 2 } else { 0 };
    let layout = TableLayout::fit(&headers, &rows, console_width, flexible);

    writer.write_table_header(&layout)?;
    for (row, cells) in report.rows.iter().zip(rows.iter()) {
        writer.write_row(&layout, cells, Some(status_color(row.run.status)))?;
    }
    writer.write_table_footer(&layout)?;

    if report.detailed && !report.unmatched_secondaries.is_empty() {
        write_unmatched(writer, &report.unmatched_secondaries, console_width)?;
    }

    Ok(())
}

fn write_unmatched<W: Write>(
    writer: &mut TableWriter<W>,
    unmatched: &[PairedRunRecord],
    console_width: usize,
) -> io::Result<()> {
    writer.write_line("")?;
    writer.write_line("gpu-burn logs without a matching stress-ng log:")?;

    let headers = ["File", "Job ID", "gpu-burn status"];
    let rows: Vec<Vec<String>> = unmatched
        .iter()
        .map(|p| {
            vec![
                p.source_filename.clone().unwrap_or_default(),
                p.job_id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
                p.status.as_str().to_string(),
            ]
        })
        .collect();
    let layout = TableLayout::fit(&headers, &rows, console_width, 0);

    writer.write_table_header(&layout)?;
    for cells in &rows {
        writer.write_row(&layout, cells, None)?;
    }
    writer.write_table_footer(&layout)
}

/// Format the report as plain text
#[cfg(test)]
pub fn format_report(report: &NodeReport, console_width: usize) -> String {
    let mut writer = TableWriter::new(Vec::new(), false);
    // Writing into a Vec can't fail
    let _ = write_report(&mut writer, report, console_width);
    String::from_utf8_lossy(&writer.into_inner()).into_owned()
}

/// Print the report to stdout
pub fn print_report(report: &NodeReport, use_colors: bool) {
    let mut writer = TableWriter::new(io::stdout(), use_colors);
    let _ = write_report(&mut writer, report, console_format::console_width());
}
