/// Log filename parsing
///
/// Every log written by the stress-test jobs is named
/// `<job_id>_<host>[_...].<ext>`, e.g. `48213_gpu07.out` or
/// `48220_gpu07_gpu-burn.txt`. Both classifiers and the pairing engine
/// derive the node and job from the name through this one function.

/// Job id and host decoded from a log filename
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogName {
    pub job_id: u64,
    pub host: String,
}

/// Parse `<job_id>_<host>[_...].<ext>`.
///
/// The host is the second underscore-delimited field, cut at its first dot.
/// Returns None when the job id is not numeric or the host is empty.
pub fn parse_log_name(filename: &str) -> Option<LogName> {
    let mut fields = filename.split('_');
    let job_id = fields.next()?.parse::<u64>().ok()?;
    let host = fields.next()?.split('.').next().unwrap_or_default();

    if host.is_empty() {
        return None;
    }

    Some(LogName { job_id, host: host.to_string() })
}
