//! Step runner: executes one catalog step at a time against the transcript.

use crate::model::{Pacing, Step};
use crate::sim::LogSink;
use crate::transcript::TranscriptHandle;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use time::macros::format_description;
use time::OffsetDateTime;

const SEPARATOR_WIDTH: usize = 50;

/// Pause between the start markers and the first content line.
const PRE_CONTENT_PAUSE_MS: u64 = 500;

fn separator() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

fn format_stamp(t: OffsetDateTime) -> String {
    let desc = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    t.format(&desc).unwrap_or_else(|_| t.to_string())
}

fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Orchestrates step execution: start/end markers, simulation dispatch, and
/// the mutual-exclusion busy flag.
///
/// The busy flag is claimed with an atomic swap, so a `run` call that arrives
/// while another is in flight returns immediately without touching the
/// transcript. That rejection is a deliberate debounce, not an error, and
/// rejected calls are not queued.
pub struct StepRunner {
    transcript: TranscriptHandle,
    busy: Arc<AtomicBool>,
    pacing: Pacing,
}

impl StepRunner {
    pub fn new(transcript: TranscriptHandle, pacing: Pacing) -> Self {
        Self {
            transcript,
            busy: Arc::new(AtomicBool::new(false)),
            pacing,
        }
    }

    pub fn transcript(&self) -> &TranscriptHandle {
        &self.transcript
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Read-only view of the busy flag for presentation layers.
    pub fn busy_flag(&self) -> Arc<AtomicBool> {
        self.busy.clone()
    }

    /// Run a single step to completion. No-op if another step is in flight.
    ///
    /// The busy flag is cleared on every exit path, including simulation
    /// errors and panics; a failure is surfaced as an appended error line so
    /// the console stays usable.
    pub async fn run(&self, step: &Step) {
        if self.busy.swap(true, Ordering::SeqCst) {
            return;
        }

        let started = Instant::now();
        let sep = separator();
        self.transcript.append(format!("\n{sep}"));
        self.transcript.append(format!(
            "[START] {}: Running \"{}\"",
            format_stamp(now()),
            step.title
        ));
        self.transcript.append(format!("> {}", step.command));
        tokio::time::sleep(self.pacing.scripted(PRE_CONTENT_PAUSE_MS)).await;

        let sink = LogSink::new(self.transcript.clone(), self.pacing);
        match AssertUnwindSafe((step.simulate)(sink)).catch_unwind().await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                self.transcript
                    .append(format!("[ERROR] step \"{}\" failed: {e:#}", step.id));
            }
            Err(_) => {
                self.transcript
                    .append(format!("[ERROR] step \"{}\" panicked", step.id));
            }
        }

        let duration = started.elapsed().as_secs_f64();
        self.transcript.append(format!(
            "\n[END] {}: Finished \"{}\" in {duration:.2}s",
            format_stamp(now()),
            step.title
        ));
        self.transcript.append(format!("{sep}\n"));
        self.busy.store(false, Ordering::SeqCst);
    }
}
