//! Append-only console transcript shared between the step runner and the UI.

use std::sync::{Arc, Mutex, MutexGuard};

/// Seed line present after initialization and after every clear.
pub const WELCOME_LINE: &str =
    "Welcome to the Network Test Console! Select a step and press Enter to run it.";

/// Ordered, append-only sequence of console lines.
///
/// Lines are never reordered or removed individually; the only wholesale
/// mutation is `reset`, which restores the single welcome line.
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            lines: vec![WELCOME_LINE.to_string()],
        }
    }

    pub fn append(&mut self, line: String) {
        self.lines.push(line);
    }

    pub fn reset(&mut self) {
        self.lines.clear();
        self.lines.push(WELCOME_LINE.to_string());
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.lines.clone()
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable handle to a shared transcript.
///
/// The runner task appends through this handle while the UI thread reads it
/// on every render tick; the lock is held only for the single push or copy.
#[derive(Clone)]
pub struct TranscriptHandle {
    inner: Arc<Mutex<Transcript>>,
}

impl TranscriptHandle {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Transcript::new())),
        }
    }

    // A poisoned lock only means a writer panicked mid-push; the line data
    // itself is still a valid Vec, so recover instead of propagating.
    fn lock(&self) -> MutexGuard<'_, Transcript> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn append(&self, line: impl Into<String>) {
        self.lock().append(line.into());
    }

    pub fn reset(&self) {
        self.lock().reset();
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.lock().snapshot()
    }
}

impl Default for TranscriptHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_single_welcome_line() {
        let t = Transcript::new();
        assert_eq!(t.snapshot(), vec![WELCOME_LINE.to_string()]);
    }

    #[test]
    fn append_preserves_order() {
        let t = TranscriptHandle::new();
        t.append("a");
        t.append("b");
        t.append("c");
        assert_eq!(t.snapshot(), vec![WELCOME_LINE, "a", "b", "c"]);
    }

    #[test]
    fn reset_restores_seed_regardless_of_content() {
        let t = TranscriptHandle::new();
        for i in 0..100 {
            t.append(format!("line {i}"));
        }
        t.reset();
        assert_eq!(t.snapshot(), vec![WELCOME_LINE.to_string()]);
    }

    #[test]
    fn long_lines_are_not_truncated() {
        let t = TranscriptHandle::new();
        let long = "x".repeat(64 * 1024);
        t.append(long.clone());
        assert_eq!(t.snapshot()[1], long);
    }
}
