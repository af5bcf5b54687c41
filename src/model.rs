use crate::sim::LogSink;
use anyhow::Result;
use futures::future::BoxFuture;
use std::time::Duration;

/// Future returned by a step's simulation routine.
pub type SimFuture = BoxFuture<'static, Result<()>>;

/// Simulation entry point: given an append sink, produce the step's scripted
/// output and complete. Plain fn pointer so the catalog can be a static array.
pub type SimFn = fn(LogSink) -> SimFuture;

/// One entry of the step catalog. Immutable, defined once at startup.
///
/// `command` is display-only flavor text resembling a shell invocation; it is
/// never executed.
#[derive(Debug)]
pub struct Step {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub command: &'static str,
    pub simulate: SimFn,
}

/// Pacing policy for simulated output.
///
/// `line_delay` is appended after every emitted line to make the stream feel
/// live; `scale` multiplies the scripted pauses between output sections.
/// Delays are presentation only and carry no semantic meaning.
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    pub line_delay: Duration,
    pub scale: f64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            line_delay: Duration::from_millis(50),
            scale: 1.0,
        }
    }
}

impl Pacing {
    /// Zero-delay pacing, used by tests and `--pace 0` runs.
    pub fn instant() -> Self {
        Self {
            line_delay: Duration::ZERO,
            scale: 0.0,
        }
    }

    /// Scale a scripted pause given in milliseconds.
    pub fn scripted(&self, ms: u64) -> Duration {
        Duration::from_millis((ms as f64 * self.scale).round() as u64)
    }
}
