//! Simulated `ping -c 4` against ipv6.google.com.

use super::{rand_between, LogSink};
use anyhow::Result;

const HOST: &str = "prg03s06-in-x0e.1e100.net (2a00:1450:4001:82b::200e)";

pub async fn run(log: LogSink) -> Result<()> {
    log.line(format!("PING ipv6.google.com({HOST}) 56 data bytes"))
        .await;
    for seq in 1..=4 {
        log.pause(1000).await;
        log.line(format!(
            "64 bytes from {HOST}: icmp_seq={seq} ttl=117 time={}.{} ms",
            rand_between(10, 30),
            rand_between(1, 9)
        ))
        .await;
    }
    log.line("\n--- ipv6.google.com ping statistics ---").await;
    log.line("4 packets transmitted, 4 received, 0% packet loss, time 3005ms")
        .await;
    log.line("rtt min/avg/max/mdev = 12.345/15.678/18.901/2.345 ms")
        .await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Pacing;
    use crate::transcript::TranscriptHandle;

    #[tokio::test(start_paused = true)]
    async fn emits_four_replies_in_sequence() {
        let t = TranscriptHandle::new();
        run(LogSink::new(t.clone(), Pacing::instant()))
            .await
            .unwrap();
        let snap = t.snapshot();
        let replies: Vec<&String> = snap
            .iter()
            .filter(|l| l.starts_with("64 bytes from"))
            .collect();
        assert_eq!(replies.len(), 4);
        for (i, line) in replies.iter().enumerate() {
            assert!(line.contains(&format!("icmp_seq={}", i + 1)));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn latency_stays_within_bounds() {
        for _ in 0..300 {
            let t = TranscriptHandle::new();
            run(LogSink::new(t.clone(), Pacing::instant()))
                .await
                .unwrap();
            for line in t.snapshot() {
                let Some(idx) = line.find("time=") else {
                    continue;
                };
                let value = line[idx + 5..]
                    .strip_suffix(" ms")
                    .and_then(|v| v.parse::<f64>().ok())
                    .unwrap_or_else(|| panic!("malformed reply line: {line}"));
                assert!((10.1..=30.9).contains(&value), "time {value}");
            }
        }
    }
}
