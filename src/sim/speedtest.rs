//! Simulated `speedtest-cli` output.

use super::{rand_between, LogSink};
use anyhow::Result;

pub async fn run(log: LogSink) -> Result<()> {
    log.line("Retrieving speedtest.net configuration...").await;
    log.pause(1000).await;
    log.line("Testing from Example ISP (192.0.2.1)...").await;
    log.pause(1000).await;
    log.line("Retrieving speedtest.net server list...").await;
    log.pause(1500).await;
    log.line("Selecting best server based on ping...").await;
    log.pause(1000).await;
    let ping = rand_between(9, 40);
    log.line(format!(
        "Hosted by Some Server Co (City, ST) [12.34 km]: {}.{} ms",
        ping,
        rand_between(100, 999)
    ))
    .await;
    log.pause(500).await;
    log.line(format!("Testing download speed{}", ".".repeat(80)))
        .await;
    log.pause(2500).await;
    log.line(format!(
        "Download: {}.{} Mbit/s",
        rand_between(80, 500),
        rand_between(10, 99)
    ))
    .await;
    log.pause(500).await;
    log.line(format!("Testing upload speed{}", ".".repeat(82)))
        .await;
    log.pause(2500).await;
    log.line(format!(
        "Upload: {}.{} Mbit/s",
        rand_between(20, 150),
        rand_between(10, 99)
    ))
    .await;
    Ok(())
}
