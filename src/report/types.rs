//! Summary types for the rendered report.

use crate::types::{BurnStatus, StressStatus};

/// Number of stress-ng runs per outcome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StressCounts {
    pub success: usize,
    pub failed: usize,
    pub incomplete: usize,
}

impl StressCounts {
    pub fn add(&mut self, status: StressStatus) {
        match status {
            StressStatus::Success => self.success += 1,
            StressStatus::Failed => self.failed += 1,
            StressStatus::Incomplete => self.incomplete += 1,
        }
    }
}

/// Number of gpu-burn runs per outcome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BurnCounts {
    pub success: usize,
    pub failed: usize,
    pub incomplete: usize,
    pub did_not_start: usize,
}

impl BurnCounts {
    pub fn add(&mut self, status: BurnStatus) {
        match status {
            BurnStatus::Success => self.success += 1,
            BurnStatus::Failed => self.failed += 1,
            BurnStatus::Incomplete => self.incomplete += 1,
            BurnStatus::DidNotStart => self.did_not_start += 1,
        }
    }
}

/// Report summary statistics.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReportSummary {
    /// Number of nodes (report rows)
    pub nodes: usize,
    pub stress_ng: StressCounts,
    /// Only for node types that run gpu-burn
    pub gpu_burn: Option<BurnCounts>,
    /// gpu-burn logs with no stress-ng log to pair with
    pub unmatched_gpu_burn: usize,
}
