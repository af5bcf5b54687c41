//! Scripted simulation routines, one per catalog step.
//!
//! Each routine has a fixed line/timing structure with randomized numeric
//! content. Nothing here touches the network; the output only imitates the
//! shape of the real tools.

pub mod fast;
pub mod install;
pub mod iperf;
pub mod ping;
pub mod speedtest;
pub mod wget;

use crate::model::Pacing;
use crate::transcript::TranscriptHandle;
use rand::Rng;

/// Append capability handed to simulation routines, bound to the shared
/// transcript plus the session pacing policy.
#[derive(Clone)]
pub struct LogSink {
    transcript: TranscriptHandle,
    pacing: Pacing,
}

impl LogSink {
    pub fn new(transcript: TranscriptHandle, pacing: Pacing) -> Self {
        Self { transcript, pacing }
    }

    /// Append one line, then yield for the per-line delay so output streams
    /// in rather than arriving as a block.
    pub async fn line(&self, line: impl Into<String>) {
        self.transcript.append(line.into());
        tokio::time::sleep(self.pacing.line_delay).await;
    }

    /// Scripted pause between output sections, scaled by the pacing policy.
    pub async fn pause(&self, ms: u64) {
        tokio::time::sleep(self.pacing.scripted(ms)).await;
    }
}

/// Uniform random integer, inclusive of both bounds.
pub fn rand_between(min: u32, max: u32) -> u32 {
    rand::thread_rng().gen_range(min..=max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Pacing;

    #[test]
    fn rand_between_is_inclusive_of_both_bounds() {
        let mut saw_min = false;
        let mut saw_max = false;
        for _ in 0..1000 {
            let v = rand_between(1, 5);
            assert!((1..=5).contains(&v));
            saw_min |= v == 1;
            saw_max |= v == 5;
        }
        assert!(saw_min && saw_max);
    }

    #[test]
    fn rand_between_degenerate_range() {
        for _ in 0..100 {
            assert_eq!(rand_between(7, 7), 7);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn sink_appends_in_order() {
        let t = TranscriptHandle::new();
        let sink = LogSink::new(t.clone(), Pacing::instant());
        sink.line("first").await;
        sink.pause(500).await;
        sink.line("second").await;
        let snap = t.snapshot();
        assert_eq!(&snap[1..], ["first", "second"]);
    }
}
