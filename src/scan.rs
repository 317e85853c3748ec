/// Directory enumeration and log reading
///
/// Splits a run directory into stress-ng logs and gpu-burn logs and reads
/// their contents. Reading never fails the whole scan: bytes that aren't
/// valid UTF-8 are replaced, and a file that can't be read is kept with
/// empty text so it still shows up (as incomplete) in the report.
use log::{debug, warn};
use std::fs;
use std::io;
use std::path::Path;

/// Extension of stress-ng logs
pub const PRIMARY_EXTENSION: &str = ".out";
/// Default filename suffix of gpu-burn logs
pub const DEFAULT_SECONDARY_SUFFIX: &str = "_gpu-burn.txt";

/// A log file read from the run directory
#[derive(Debug, Clone, PartialEq)]
pub struct LogFile {
    pub filename: String,
    /// Size on disk; zero-byte stress-ng logs are left out of the report
    pub len: u64,
    pub text: String,
}

impl LogFile {
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Logs of one run directory, each list sorted by filename
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogSet {
    pub primaries: Vec<LogFile>,
    pub secondaries: Vec<LogFile>,
}

impl LogSet {
    pub fn secondary(&self, filename: &str) -> Option<&LogFile> {
        self.secondaries.iter().find(|f| f.filename == filename)
    }
}

/// Which tool wrote a file, judged from its name
fn log_kind(filename: &str, secondary_suffix: &str) -> Option<LogKind> {
    if filename.ends_with(secondary_suffix) {
        Some(LogKind::Secondary)
    } else if filename.ends_with(PRIMARY_EXTENSION) {
        Some(LogKind::Primary)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogKind {
    Primary,
    Secondary,
}

/// Read every stress-ng and gpu-burn log in `dir`.
///
/// Only a missing or unreadable directory is an error.
pub fn scan_directory(dir: &Path, secondary_suffix: &str) -> io::Result<LogSet> {
    let mut logs = LogSet::default();

    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Skipping unreadable directory entry in {}: {}", dir.display(), e);
                continue;
            }
        };

        let filename = entry.file_name().to_string_lossy().into_owned();
        let Some(kind) = log_kind(&filename, secondary_suffix) else {
            debug!("Ignoring {}", filename);
            continue;
        };
        if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            continue;
        }

        let file = read_log(&entry.path(), filename);
        match kind {
            LogKind::Primary => logs.primaries.push(file),
            LogKind::Secondary => logs.secondaries.push(file),
        }
    }

    logs.primaries.sort_by(|a, b| a.filename.cmp(&b.filename));
    logs.secondaries.sort_by(|a, b| a.filename.cmp(&b.filename));

    debug!(
        "Found {} stress-ng logs and {} gpu-burn logs in {}",
        logs.primaries.len(),
        logs.secondaries.len(),
        dir.display()
    );

    Ok(logs)
}

fn read_log(path: &Path, filename: String) -> LogFile {
    match fs::read(path) {
        Ok(bytes) => {
            let text = String::from_utf8_lossy(&bytes).into_owned();
            LogFile { filename, len: bytes.len() as u64, text }
        }
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            let len = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
            LogFile { filename, len, text: String::new() }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, contents: &[u8]) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_splits_by_tool_and_sorts() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "200_node02.out", b"b");
        write(temp.path(), "100_node01.out", b"a");
        write(temp.path(), "105_node01_gpu-burn.txt", b"c");
        write(temp.path(), "notes.txt", b"ignored");

        let logs = scan_directory(temp.path(), DEFAULT_SECONDARY_SUFFIX).unwrap();
        let primaries: Vec<&str> = logs.primaries.iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(primaries, vec!["100_node01.out", "200_node02.out"]);
        assert_eq!(logs.secondaries.len(), 1);
        assert_eq!(logs.secondary("105_node01_gpu-burn.txt").unwrap().text, "c");
    }

    #[test]
    fn test_secondary_suffix_takes_precedence_over_extension() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "100_node01.out", b"a");
        write(temp.path(), "101_node01_burn.out", b"b");

        let logs = scan_directory(temp.path(), "_burn.out").unwrap();
        assert_eq!(logs.primaries.len(), 1);
        assert_eq!(logs.secondaries[0].filename, "101_node01_burn.out");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "100_node01.out", b"failed: 0\xff\xfe\nrun completed in 1 secs\n");

        let logs = scan_directory(temp.path(), DEFAULT_SECONDARY_SUFFIX).unwrap();
        let text = &logs.primaries[0].text;
        assert!(text.contains("failed: 0"));
        assert!(text.contains("run completed in"));
    }

    #[test]
    fn test_empty_file_is_flagged() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "100_node01.out", b"");

        let logs = scan_directory(temp.path(), DEFAULT_SECONDARY_SUFFIX).unwrap();
        assert!(logs.primaries[0].is_empty());
    }

    #[test]
    fn test_missing_directory_is_error() {
        let temp = TempDir::new().unwrap();
        assert!(scan_directory(&temp.path().join("nope"), DEFAULT_SECONDARY_SUFFIX).is_err());
    }
}
