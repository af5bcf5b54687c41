//! Simulated `iperf3` runs against a prefix of the configured server list.

use super::{rand_between, LogSink};
use crate::catalog::IPERF_SERVERS;
use anyhow::Result;

/// How many servers from the configured list actually get "tested".
/// Deliberate truncation to keep the demo short.
const SERVER_LIMIT: usize = 4;

fn port_of(server: &str) -> &str {
    server.split_once(':').map(|(_, p)| p).unwrap_or("5201")
}

pub async fn run(log: LogSink) -> Result<()> {
    for server in IPERF_SERVERS.iter().take(SERVER_LIMIT) {
        let port = port_of(server);
        log.line(format!("\n> iperf3 -c {server}")).await;
        log.line(format!("Connecting to host {server}, port {port}"))
            .await;
        log.pause(1000).await;
        let stream_id = rand_between(1, 5);
        log.line(format!(
            "[  {stream_id} ] local 192.168.1.10 port {} connected to {server} port {port}",
            rand_between(50000, 60000)
        ))
        .await;
        log.pause(500).await;
        log.line("[ ID] Interval           Transfer     Bitrate         Retr  Cwnd")
            .await;
        log.line(format!(
            "[  {stream_id} ]   0.00-1.00   sec  {} MBytes  {} Mbits/sec    0    128 KBytes",
            rand_between(5, 20),
            rand_between(40, 160)
        ))
        .await;
        log.pause(1000).await;
        log.line(format!(
            "[  {stream_id} ]   1.00-2.00   sec  {} MBytes  {} Mbits/sec    0    128 KBytes",
            rand_between(5, 20),
            rand_between(40, 160)
        ))
        .await;
        log.pause(1000).await;
        log.line("- - - - - - - - - - - - - - - - - - - - - - - - -")
            .await;
        log.line("[ ID] Interval           Transfer     Bitrate         Retr")
            .await;
        log.line(format!(
            "[  {stream_id} ]   0.00-2.00   sec  {} MBytes  {} Mbits/sec    0             sender",
            rand_between(10, 40),
            rand_between(40, 160)
        ))
        .await;
    }
    log.line("\nFinished iperf3 tests.").await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Pacing;
    use crate::transcript::TranscriptHandle;

    #[test]
    fn port_defaults_when_unspecified() {
        assert_eq!(port_of("iperf.he.net"), "5201");
        assert_eq!(port_of("bouygues.iperf.fr:5209"), "5209");
    }

    #[tokio::test(start_paused = true)]
    async fn tests_exactly_four_servers() {
        let t = TranscriptHandle::new();
        run(LogSink::new(t.clone(), Pacing::instant()))
            .await
            .unwrap();
        let snap = t.snapshot();
        let connects = snap
            .iter()
            .filter(|l| l.starts_with("Connecting to host"))
            .count();
        assert_eq!(connects, SERVER_LIMIT);
        assert_eq!(snap.last().unwrap(), "\nFinished iperf3 tests.");
    }

    fn field_after<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
        line.split(marker).nth(1)?.split_whitespace().next()
    }

    #[tokio::test(start_paused = true)]
    async fn randomized_fields_stay_within_bounds() {
        for _ in 0..250 {
            let t = TranscriptHandle::new();
            run(LogSink::new(t.clone(), Pacing::instant()))
                .await
                .unwrap();
            for line in t.snapshot() {
                // Stream id rows look like "[  3 ] ..."; headers use "[ ID]".
                if let Some(rest) = line.strip_prefix("[  ") {
                    let id: u32 = rest[..rest.find(" ]").unwrap()]
                        .trim()
                        .parse()
                        .unwrap_or_else(|_| panic!("malformed stream id in {line}"));
                    assert!((1..=5).contains(&id), "stream id {id} in {line}");
                }

                if line.contains(" local 192.168.1.10 port ") {
                    let port: u32 = field_after(&line, " local 192.168.1.10 port ")
                        .and_then(|v| v.parse().ok())
                        .unwrap_or_else(|| panic!("malformed port line: {line}"));
                    assert!((50000..=60000).contains(&port), "port {port} in {line}");
                }

                if let Some(transfer) = field_after(&line, "sec  ") {
                    let mbytes: u32 = transfer
                        .parse()
                        .unwrap_or_else(|_| panic!("malformed transfer in {line}"));
                    if line.ends_with("sender") {
                        assert!((10..=40).contains(&mbytes), "summary transfer in {line}");
                    } else {
                        assert!((5..=20).contains(&mbytes), "interval transfer in {line}");
                    }
                }

                if let Some(idx) = line.find(" Mbits/sec") {
                    let rate: u32 = line[..idx]
                        .rsplit(' ')
                        .next()
                        .and_then(|v| v.parse().ok())
                        .unwrap_or_else(|| panic!("malformed bitrate line: {line}"));
                    assert!((40..=160).contains(&rate), "bitrate {rate} in {line}");
                }
            }
        }
    }
}
