/// Core data structures for stress-test results
///
/// This module defines the records produced from stress-ng and gpu-burn logs
/// and the sentinels used when a value could not be extracted.
use std::fmt;

/// Kind of node the stress test ran on
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Cpu,
    Gpu,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Cpu => "cpu",
            NodeType::Gpu => "gpu",
        }
    }

    /// Whether nodes of this type also run gpu-burn
    pub fn runs_gpu_burn(&self) -> bool {
        matches!(self, NodeType::Gpu)
    }
}

/// Outcome of a stress-ng run
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressStatus {
    Success,
    Failed,
    Incomplete,
}

impl StressStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StressStatus::Success => "success",
            StressStatus::Failed => "failed",
            StressStatus::Incomplete => "incomplete run",
        }
    }
}

/// Outcome of a gpu-burn run
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BurnStatus {
    Success,
    Failed,
    Incomplete,
    DidNotStart,
}

impl BurnStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BurnStatus::Success => "success",
            BurnStatus::Failed => "failed",
            BurnStatus::Incomplete => "incomplete run",
            BurnStatus::DidNotStart => "did not start",
        }
    }
}

/// A run length in whole seconds, displayed as `D-HH:MM:SS`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct RunDuration(pub u64);

impl RunDuration {
    pub fn from_secs(secs: u64) -> Self {
        RunDuration(secs)
    }
}

impl fmt::Display for RunDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days = self.0 / 86_400;
        let hours = (self.0 % 86_400) / 3_600;
        let minutes = (self.0 % 3_600) / 60;
        let seconds = self.0 % 60;
        write!(f, "{}-{:02}:{:02}:{:02}", days, hours, minutes, seconds)
    }
}

/// Final run time of a stress-ng log
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalRuntime {
    /// The log reported how long the run took
    Reported(RunDuration),
    /// The run completed but no run-time summary line was found
    NotReported,
    /// The run never completed; the scheduler's accounting has the real figure
    UseAccounting,
}

impl FinalRuntime {
    pub fn display(&self) -> String {
        match self {
            FinalRuntime::Reported(d) => d.to_string(),
            FinalRuntime::NotReported => "-".to_string(),
            FinalRuntime::UseAccounting => "use sacct".to_string(),
        }
    }
}

/// Metrics pulled from a stress-ng log in detailed mode
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RunMetrics {
    pub requested_runtime: Option<RunDuration>,
    pub final_runtime: FinalRuntime,
    /// Peak reading in degrees; None means the log had no thermal samples
    pub peak_temperature: Option<f64>,
}

impl RunMetrics {
    pub fn requested_display(&self) -> String {
        self.requested_runtime.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
    }

    pub fn temperature_display(&self) -> String {
        match self.peak_temperature {
            Some(t) => format!("{:.1}", t),
            None => "N/A".to_string(),
        }
    }
}

/// One record per non-empty stress-ng log
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RunRecord {
    pub host: String,
    pub job_id: u64,
    pub source_filename: String,
    pub status: StressStatus,
    /// Present only when extended extraction was requested
    pub metrics: Option<RunMetrics>,
}

/// A gpu-burn result associated (or not) with a stress-ng log
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PairedRunRecord {
    /// The gpu-burn log, None when pairing found no candidate
    pub source_filename: Option<String>,
    /// The stress-ng log this result belongs to, None when unmatched
    pub matched_primary_filename: Option<String>,
    /// gpu-burn's own job id, numbered independently of stress-ng
    pub job_id: Option<u64>,
    pub status: BurnStatus,
}

impl PairedRunRecord {
    /// Record for a stress-ng log that no gpu-burn log was paired with
    pub fn did_not_start() -> Self {
        Self { source_filename: None, matched_primary_filename: None, job_id: None, status: BurnStatus::DidNotStart }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_multi_day() {
        assert_eq!(RunDuration::from_secs(258_599).to_string(), "2-23:43:19");
    }

    #[test]
    fn test_duration_zero() {
        assert_eq!(RunDuration::from_secs(0).to_string(), "0-00:00:00");
    }

    #[test]
    fn test_duration_pads_each_unit() {
        assert_eq!(RunDuration::from_secs(3_661).to_string(), "0-01:01:01");
    }

    #[test]
    fn test_duration_days_not_padded() {
        assert_eq!(RunDuration::from_secs(12 * 86_400).to_string(), "12-00:00:00");
    }

    #[test]
    fn test_final_runtime_sentinels() {
        assert_eq!(FinalRuntime::UseAccounting.display(), "use sacct");
        assert_eq!(FinalRuntime::NotReported.display(), "-");
        assert_eq!(FinalRuntime::Reported(RunDuration(60)).display(), "0-00:01:00");
    }

    #[test]
    fn test_missing_temperature_is_not_zero() {
        let metrics = RunMetrics { requested_runtime: None, final_runtime: FinalRuntime::NotReported, peak_temperature: None };
        assert_eq!(metrics.temperature_display(), "N/A");

        let zero = RunMetrics { peak_temperature: Some(0.0), ..metrics };
        assert_eq!(zero.temperature_display(), "0.0");
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&BurnStatus::DidNotStart).unwrap();
        assert_eq!(json, "\"did_not_start\"");
        let back: StressStatus = serde_json::from_str("\"incomplete\"").unwrap();
        assert_eq!(back, StressStatus::Incomplete);
    }
}
