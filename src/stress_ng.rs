/// stress-ng log classification
///
/// stress-ng logs are streamed append-only, so a run that never printed its
/// completion line may still be running or may have crashed; both are
/// reported as incomplete. Detailed mode also pulls run times and the peak
/// thermal reading out of the log.
use crate::types::{FinalRuntime, RunDuration, RunMetrics, StressStatus};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

/// Printed by stress-ng when all stressors have finished
const COMPLETION_MARKER: &str = "run completed in";
/// Completion line of a run where at least one stressor failed
const FAILED_COMPLETION_MARKER: &str = "unsuccessful run completed";
/// Metrics line of a run with no failed stressors
const ZERO_FAILURES_MARKER: &str = "failed: 0";
/// Announcement of the target run length, written by the job script
const REQUESTED_RUNTIME_MARKER: &str = "requested run time";
/// Periodic thermal zone sample: `therm: <zone> <avg> <max>`
const PERIODIC_THERMAL_MARKER: &str = "therm:";
/// Single reading written once the stressors have stopped
const FINAL_THERMAL_MARKER: &str = "final temp";

lazy_static! {
    // `... run completed in 259200.02s (3 days, 0.02 secs)` or `... completed in 60.00 secs`
    static ref COMPLETION_TIME: Regex = Regex::new(r"(?i)completed in\s+(\d+(?:\.\d+)?)\s*s").expect("valid regex");
}

/// Result of classifying one stress-ng log
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub status: StressStatus,
    pub metrics: Option<RunMetrics>,
}

/// Classify a stress-ng log, extracting metrics when `extended` is set
pub fn classify(text: &str, extended: bool) -> Classification {
    let status = classify_status(text);
    let metrics = extended.then(|| extract_metrics(text, status));
    Classification { status, metrics }
}

/// Determine the run status from the whole log text (case-insensitive)
pub fn classify_status(text: &str) -> StressStatus {
    let lower = text.to_lowercase();

    let completed = lower.contains(COMPLETION_MARKER);

    if completed && lower.contains(FAILED_COMPLETION_MARKER) {
        StressStatus::Failed
    } else if completed && lower.contains(ZERO_FAILURES_MARKER) {
        StressStatus::Success
    } else {
        // Also covers a completion line without a failure count: the outcome
        // can't be confirmed either way.
        StressStatus::Incomplete
    }
}

fn extract_metrics(text: &str, status: StressStatus) -> RunMetrics {
    let requested_runtime = find_requested_runtime(text);

    let final_runtime = if status == StressStatus::Incomplete {
        FinalRuntime::UseAccounting
    } else {
        match find_completion_time(text) {
            Some(d) => FinalRuntime::Reported(d),
            None => FinalRuntime::NotReported,
        }
    };

    RunMetrics { requested_runtime, final_runtime, peak_temperature: peak_temperature(text) }
}

/// Requested run time from the first announcement line.
///
/// The number of seconds is the second-to-last whitespace-separated field.
fn find_requested_runtime(text: &str) -> Option<RunDuration> {
    let line = text.lines().find(|l| l.to_lowercase().contains(REQUESTED_RUNTIME_MARKER))?;
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 2 {
        return None;
    }

    let token = fields[fields.len() - 2];
    let secs = parse_seconds(token);
    if secs.is_none() {
        debug!("Unparseable run time '{}' on line: {}", token, line);
    }
    secs.map(RunDuration::from_secs)
}

/// Final run time from the number right after `completed in` on the completion line
fn find_completion_time(text: &str) -> Option<RunDuration> {
    let line = text.lines().find(|l| l.to_lowercase().contains(COMPLETION_MARKER))?;
    let secs = COMPLETION_TIME.captures(line).and_then(|caps| parse_seconds(&caps[1]));
    if secs.is_none() {
        debug!("No run time on completion line: {}", line);
    }
    secs.map(RunDuration::from_secs)
}

/// Parse a seconds token such as `259200`, `259200.02` or `60.01s`, truncating fractions
fn parse_seconds(token: &str) -> Option<u64> {
    let value: f64 = token.trim_end_matches('s').parse().ok()?;
    if value.is_finite() && value >= 0.0 { Some(value as u64) } else { None }
}

/// Highest thermal reading in the log, or None when the log has no samples
pub fn peak_temperature(text: &str) -> Option<f64> {
    let mut samples = Vec::new();

    for line in text.lines().filter(|l| l.to_lowercase().contains(PERIODIC_THERMAL_MARKER)) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 2 {
            continue;
        }
        // A header line ends in a column label rather than a reading
        let Ok(last) = fields[fields.len() - 1].parse::<f64>() else {
            continue;
        };
        if let Ok(prev) = fields[fields.len() - 2].parse::<f64>() {
            samples.push(prev);
        }
        samples.push(last);
    }

    let final_sample = text
        .lines()
        .rev()
        .find(|l| l.to_lowercase().contains(FINAL_THERMAL_MARKER))
        .and_then(|l| l.split_whitespace().rev().find_map(|f| f.parse::<f64>().ok()));
    samples.extend(final_sample);

    samples.into_iter().filter(|t| t.is_finite()).reduce(f64::max)
}

#[cfg(test)]
#[path = "stress_ng_test.rs"]
mod stress_ng_test;
