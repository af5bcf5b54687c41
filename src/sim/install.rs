//! Simulated `apt` prerequisite install transcript.

use super::LogSink;
use anyhow::Result;

pub async fn run(log: LogSink) -> Result<()> {
    log.line("Hit:1 http://archive.ubuntu.com/ubuntu jammy InRelease")
        .await;
    log.pause(150).await;
    log.line("Get:2 http://security.ubuntu.com/ubuntu jammy-security InRelease [110 kB]")
        .await;
    log.pause(150).await;
    log.line("Reading package lists... Done").await;
    log.pause(300).await;
    log.line("Building dependency tree... Done").await;
    log.pause(300).await;
    log.line("Reading state information... Done").await;
    log.pause(200).await;
    log.line("speedtest-cli is already the newest version (2.1.3-1.1).")
        .await;
    log.line("iperf3 is already the newest version (3.9-1).").await;
    log.line("wget is already the newest version (1.21.2-2ubuntu1).")
        .await;
    log.pause(200).await;
    log.line("0 upgraded, 0 newly installed, 0 to remove and 0 not upgraded.")
        .await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Pacing;
    use crate::transcript::TranscriptHandle;

    #[tokio::test(start_paused = true)]
    async fn emits_fixed_apt_transcript() {
        let t = TranscriptHandle::new();
        run(LogSink::new(t.clone(), Pacing::instant()))
            .await
            .unwrap();
        let snap = t.snapshot();
        assert_eq!(snap.len(), 1 + 9);
        assert!(snap[1].starts_with("Hit:1"));
        assert_eq!(
            snap.last().unwrap(),
            "0 upgraded, 0 newly installed, 0 to remove and 0 not upgraded."
        );
    }
}
