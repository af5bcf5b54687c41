//! Simulated `fast-cli` upload test.

use super::{rand_between, LogSink};
use anyhow::Result;

pub async fn run(log: LogSink) -> Result<()> {
    log.line("Simulating fast-cli install and run...").await;
    log.line("added 1 package, and audited 2 packages in 2s").await;
    log.line("found 0 vulnerabilities").await;
    log.pause(500).await;
    log.line("Running upload test...").await;
    log.pause(1000).await;
    log.line(format!("\n \u{21E7} {} Mbps", rand_between(80, 150)))
        .await;
    Ok(())
}
