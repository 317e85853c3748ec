/// gpu-burn log classification
///
/// gpu-burn prints `Tested N GPUs:` once it finishes, followed by one
/// `GPU i: OK` (or `GPU i: FAULTY`) line per device.
use crate::types::BurnStatus;
use lazy_static::lazy_static;
use regex::Regex;

/// Per-device verdict printed for a device that passed
const DEVICE_OK_MARKER: &str = ": OK";

lazy_static! {
    static ref TESTED_GPUS: Regex = Regex::new(r"Tested (\d+) GPUs").expect("valid regex");
}

/// Classify a gpu-burn log. `None` means pairing found no log for the node.
pub fn classify(text: Option<&str>) -> BurnStatus {
    let Some(text) = text else {
        return BurnStatus::DidNotStart;
    };

    let Some(declared) = declared_devices(text) else {
        return BurnStatus::Incomplete;
    };

    if count_ok_devices(text) == declared { BurnStatus::Success } else { BurnStatus::Failed }
}

/// Number of devices from the `Tested N GPUs` summary line
fn declared_devices(text: &str) -> Option<usize> {
    TESTED_GPUS.captures(text).and_then(|caps| caps.get(1)).and_then(|m| m.as_str().parse().ok())
}

fn count_ok_devices(text: &str) -> usize {
    text.matches(DEVICE_OK_MARKER).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn burn_log(ok: usize, faulty: usize) -> String {
        let mut log = String::from("GPU 0: NVIDIA A100-SXM4-80GB\n100.0%  proc'd: 4520 (17432 Gflop/s)\n");
        log.push_str(&format!("Tested {} GPUs:\n", ok + faulty));
        for i in 0..ok {
            log.push_str(&format!("\tGPU {}: OK\n", i));
        }
        for i in ok..ok + faulty {
            log.push_str(&format!("\tGPU {}: FAULTY\n", i));
        }
        log
    }

    #[test]
    fn test_all_devices_ok() {
        assert_eq!(classify(Some(&burn_log(4, 0))), BurnStatus::Success);
    }

    #[test]
    fn test_faulty_device_fails() {
        assert_eq!(classify(Some(&burn_log(3, 1))), BurnStatus::Failed);
    }

    #[test]
    fn test_fewer_ok_lines_than_declared() {
        let log = "Tested 4 GPUs:\n\tGPU 0: OK\n\tGPU 1: OK\n\tGPU 2: OK\n";
        assert_eq!(classify(Some(log)), BurnStatus::Failed);
    }

    #[test]
    fn test_missing_summary_is_incomplete() {
        let log = "GPU 0: NVIDIA A100-SXM4-80GB\n45.0%  proc'd: 1200 (17410 Gflop/s)\n";
        assert_eq!(classify(Some(log)), BurnStatus::Incomplete);
        assert_eq!(classify(Some("")), BurnStatus::Incomplete);
    }

    #[test]
    fn test_no_log_did_not_start() {
        assert_eq!(classify(None), BurnStatus::DidNotStart);
    }
}
