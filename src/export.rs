//! Transcript export: plain-text log file with a timestamped name.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Build the export filename for a given moment:
/// `network-test-log_<ISO8601 with ':' and '.' replaced by '-'>.log`.
pub fn log_filename(now: OffsetDateTime) -> String {
    let stamp = now
        .format(&Rfc3339)
        .unwrap_or_else(|_| now.unix_timestamp().to_string());
    format!("network-test-log_{}.log", stamp.replace([':', '.'], "-"))
}

/// Serialize transcript lines (joined with newlines) into a log file under
/// `dir`. Returns the path of the written file.
pub fn write_log_to(dir: &Path, lines: &[String]) -> Result<PathBuf> {
    let path = dir.join(log_filename(OffsetDateTime::now_utc()));
    std::fs::write(&path, lines.join("\n"))
        .with_context(|| format!("write transcript log {}", path.display()))?;
    Ok(path)
}

/// Write the log next to the current working directory, mirroring where a
/// browser download would land it.
pub fn write_log(lines: &[String]) -> Result<PathBuf> {
    let dir = std::env::current_dir().context("get current directory")?;
    write_log_to(&dir, lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn filename_has_no_colons_or_dots_in_the_stamp() {
        let name = log_filename(datetime!(2024-12-27 13:45:30.5 UTC));
        assert!(name.starts_with("network-test-log_"));
        assert!(name.ends_with(".log"));
        let stamp = &name["network-test-log_".len()..name.len() - ".log".len()];
        assert!(!stamp.contains(':') && !stamp.contains('.'), "{stamp}");
    }

    #[test]
    fn export_round_trips_the_snapshot() {
        let t = crate::transcript::TranscriptHandle::new();
        t.append("a");
        t.append("b");
        t.append("c");
        let snapshot = t.snapshot();
        assert_eq!(
            snapshot,
            vec![crate::transcript::WELCOME_LINE, "a", "b", "c"]
        );

        let dir = std::env::temp_dir();
        let path = write_log_to(&dir, &snapshot).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let restored: Vec<&str> = content.split('\n').collect();
        assert_eq!(restored, snapshot);
        std::fs::remove_file(path).ok();
    }
}
