//! Simulated `wget` downloads with a progress bar over a prefix of the
//! configured URL list.

use super::{rand_between, LogSink};
use crate::catalog::WGET_URLS;
use anyhow::Result;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// How many URLs from the configured list actually get "downloaded".
/// Deliberate truncation to keep the demo short.
const URL_LIMIT: usize = 3;

/// Total width of the rendered progress bar in cells.
const BAR_WIDTH: usize = 20;

/// Percent step per progress tick; 0..=100 yields 21 ticks.
const PERCENT_STEP: u32 = 5;

fn short_url(url: &str) -> String {
    if url.chars().count() > 60 {
        let head: String = url.chars().take(57).collect();
        format!("{head}...")
    } else {
        url.to_string()
    }
}

/// Render one progress line. The bar fills left to right, one cell per tick,
/// reaching all 20 cells only at 100%.
fn progress_line(percent: u32, speed: u32, speed_frac: u32) -> String {
    let filled = (percent / PERCENT_STEP) as usize;
    let bar = "❚".repeat(filled);
    let eta = (100 - percent).div_ceil(speed);
    format!("/dev/null          [{bar:<BAR_WIDTH$}]  {percent}%  {speed}.{speed_frac}MB/s    eta {eta}s")
}

pub async fn run(log: LogSink) -> Result<()> {
    for url in WGET_URLS.iter().take(URL_LIMIT) {
        log.line(format!(
            "\n> wget -O /dev/null --show-progress {}",
            short_url(url)
        ))
        .await;
        let stamp = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default();
        log.line(format!("--{stamp}--  {url}")).await;
        log.line("Resolving host... resolved. Connecting...").await;
        log.pause(500).await;
        log.line("HTTP request sent, awaiting response... 200 OK")
            .await;
        log.line("Length: 104857600 (100M) [application/zip]").await;
        log.line("Saving to: ‘/dev/null’").await;
        log.pause(200).await;
        for tick in 0..=(100 / PERCENT_STEP) {
            let percent = tick * PERCENT_STEP;
            let speed = rand_between(8, 25);
            log.line(progress_line(percent, speed, rand_between(10, 99)))
                .await;
            log.pause(100).await;
        }
        log.line("‘/dev/null’ saved [104857600/104857600]").await;
    }
    log.line("\nFinished wget tests.").await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Pacing;
    use crate::transcript::TranscriptHandle;

    fn bar_cells(line: &str) -> (usize, usize) {
        let open = line.find('[').unwrap();
        let close = line.find(']').unwrap();
        let bar = &line[open + 1..close];
        let filled = bar.chars().filter(|&c| c == '❚').count();
        (filled, bar.chars().count())
    }

    #[test]
    fn bar_is_twenty_cells_and_full_only_at_hundred() {
        for percent in (0..=100).step_by(PERCENT_STEP as usize) {
            let line = progress_line(percent, 10, 50);
            let (filled, total) = bar_cells(&line);
            assert_eq!(total, BAR_WIDTH);
            assert_eq!(filled == BAR_WIDTH, percent == 100);
        }
    }

    #[test]
    fn eta_reaches_zero_at_completion() {
        assert!(progress_line(100, 8, 10).contains("eta 0s"));
        assert!(progress_line(0, 10, 10).contains("eta 10s"));
    }

    #[test]
    fn long_urls_are_abbreviated() {
        let url = format!("http://example.com/{}", "a".repeat(80));
        let short = short_url(&url);
        assert_eq!(short.chars().count(), 60);
        assert!(short.ends_with("..."));
        assert_eq!(short_url("http://example.com/x"), "http://example.com/x");
    }

    #[tokio::test(start_paused = true)]
    async fn progress_speeds_stay_within_bounds() {
        // 20 runs x 3 URLs x 21 ticks = 1260 sampled speed values.
        for _ in 0..20 {
            let t = TranscriptHandle::new();
            run(LogSink::new(t.clone(), Pacing::instant()))
                .await
                .unwrap();
            for line in t.snapshot() {
                let Some(idx) = line.find("MB/s") else {
                    continue;
                };
                let speed: f64 = line[..idx]
                    .rsplit(' ')
                    .next()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or_else(|| panic!("malformed progress line: {line}"));
                assert!((8.10..=25.99).contains(&speed), "speed {speed} in {line}");
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn progress_percents_are_exact_and_monotonic() {
        let t = TranscriptHandle::new();
        run(LogSink::new(t.clone(), Pacing::instant()))
            .await
            .unwrap();
        let snap = t.snapshot();

        let per_url: Vec<Vec<&String>> = snap
            .split(|l| l.starts_with("\n> wget"))
            .skip(1)
            .map(|chunk| chunk.iter().filter(|l| l.contains("eta ")).collect())
            .collect();
        assert_eq!(per_url.len(), URL_LIMIT);

        for progress in per_url {
            let percents: Vec<u32> = progress
                .iter()
                .map(|l| {
                    let end = l.find('%').unwrap();
                    let start = l[..end].rfind("  ").unwrap() + 2;
                    l[start..end].parse().unwrap()
                })
                .collect();
            let expected: Vec<u32> = (0..=20).map(|i| i * PERCENT_STEP).collect();
            assert_eq!(percents, expected);

            let mut last_filled = 0;
            for line in progress {
                let (filled, _) = bar_cells(line);
                assert!(filled >= last_filled, "bar shrank in {line}");
                last_filled = filled;
            }
            assert_eq!(last_filled, BAR_WIDTH);
        }
    }
}
