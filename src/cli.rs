use crate::catalog;
use crate::model::{Pacing, Step};
use crate::runner::StepRunner;
use crate::transcript::TranscriptHandle;
use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use std::io::Write;
use std::time::Duration;
use tokio::sync::mpsc;

/// Output line routing for the stdout/stderr writer.
enum OutputLine {
    Stdout(String),
    Stderr(String),
}

/// Spawn a blocking writer for stdout/stderr to avoid blocking async tasks.
fn spawn_output_writer() -> (
    mpsc::UnboundedSender<OutputLine>,
    tokio::task::JoinHandle<()>,
) {
    let (tx, mut rx) = mpsc::unbounded_channel::<OutputLine>();
    let handle = tokio::task::spawn_blocking(move || {
        let stdout = std::io::stdout();
        let stderr = std::io::stderr();
        let mut out = std::io::LineWriter::new(stdout.lock());
        let mut err = std::io::LineWriter::new(stderr.lock());

        while let Some(line) = rx.blocking_recv() {
            match line {
                OutputLine::Stdout(msg) => {
                    let _ = writeln!(out, "{}", msg);
                }
                OutputLine::Stderr(msg) => {
                    let _ = writeln!(err, "{}", msg);
                }
            }
        }

        let _ = out.flush();
        let _ = err.flush();
    });
    (tx, handle)
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "netdemo",
    version,
    about = "Simulated network-diagnostic console (no real commands are run)"
)]
pub struct Cli {
    /// Stream transcript lines to stdout and exit (no TUI)
    #[arg(long)]
    pub text: bool,

    /// Print the final transcript as JSON and exit (no TUI)
    #[arg(long)]
    pub json: bool,

    /// Steps to run in text mode, in order (comma-separated ids; default: all)
    #[arg(long, value_delimiter = ',')]
    pub steps: Vec<String>,

    /// List available steps and exit
    #[arg(long)]
    pub list: bool,

    /// Delay appended after every transcript line
    #[arg(long, default_value = "50ms")]
    pub line_delay: humantime::Duration,

    /// Multiplier applied to scripted pauses between output sections (0 disables them)
    #[arg(long, default_value_t = 1.0)]
    pub pace: f64,

    /// Write the transcript to a timestamped .log file after a text run
    #[arg(long)]
    pub export_log: bool,
}

pub async fn run(args: Cli) -> Result<()> {
    if args.list {
        return list_steps();
    }

    if !args.steps.is_empty() && !(args.text || args.json) {
        return Err(anyhow::anyhow!(
            "--steps requires --text or --json; the TUI always shows the full catalog"
        ));
    }

    if args.text || args.json || args.export_log {
        return run_text(args).await;
    }

    #[cfg(feature = "tui")]
    {
        crate::tui::run(args).await
    }
    #[cfg(not(feature = "tui"))]
    {
        // Fallback when built without TUI support.
        run_text(args).await
    }
}

/// Build the pacing policy from CLI arguments.
pub fn build_pacing(args: &Cli) -> Pacing {
    Pacing {
        line_delay: Duration::from(args.line_delay),
        scale: args.pace.max(0.0),
    }
}

/// Resolve a step-id selection against the catalog; empty means all steps.
fn resolve_steps(ids: &[String]) -> Result<Vec<&'static Step>> {
    if ids.is_empty() {
        return Ok(catalog::STEPS.iter().collect());
    }
    ids.iter()
        .map(|id| {
            catalog::find(id).ok_or_else(|| {
                let known: Vec<&str> = catalog::STEPS.iter().map(|s| s.id).collect();
                anyhow::anyhow!("unknown step \"{id}\" (known: {})", known.join(", "))
            })
        })
        .collect()
}

fn list_steps() -> Result<()> {
    for step in catalog::STEPS {
        println!("{:<10} {}", step.id, step.title);
        println!("{:<10} $ {}", "", step.command);
    }
    Ok(())
}

/// Transcript shape for `--json` output.
#[derive(Serialize)]
struct TranscriptExport {
    timestamp_utc: String,
    steps: Vec<&'static str>,
    lines: Vec<String>,
}

/// Send any transcript lines not yet printed to the writer.
fn flush_new(
    transcript: &TranscriptHandle,
    printed: &mut usize,
    tx: &mpsc::UnboundedSender<OutputLine>,
) {
    let snap = transcript.snapshot();
    for line in &snap[*printed..] {
        let _ = tx.send(OutputLine::Stdout(line.clone()));
    }
    *printed = snap.len();
}

/// Headless mode: run the selected steps sequentially, streaming lines as the
/// simulations produce them.
async fn run_text(args: Cli) -> Result<()> {
    let steps = resolve_steps(&args.steps)?;
    let pacing = build_pacing(&args);
    let runner = StepRunner::new(TranscriptHandle::new(), pacing);
    let (out_tx, out_handle) = spawn_output_writer();

    let stream_lines = !args.json;
    let mut printed = 0usize;
    if stream_lines {
        flush_new(runner.transcript(), &mut printed, &out_tx);
    }

    for step in &steps {
        let run = runner.run(step);
        tokio::pin!(run);
        loop {
            tokio::select! {
                _ = &mut run => {
                    if stream_lines {
                        flush_new(runner.transcript(), &mut printed, &out_tx);
                    }
                    break;
                }
                _ = tokio::time::sleep(Duration::from_millis(25)), if stream_lines => {
                    flush_new(runner.transcript(), &mut printed, &out_tx);
                }
            }
        }
    }

    let snapshot = runner.transcript().snapshot();
    if args.json {
        let export = TranscriptExport {
            timestamp_utc: time::OffsetDateTime::now_utc()
                .format(&time::format_description::well_known::Rfc3339)
                .unwrap_or_default(),
            steps: steps.iter().map(|s| s.id).collect(),
            lines: snapshot.clone(),
        };
        let _ = out_tx.send(OutputLine::Stdout(serde_json::to_string_pretty(&export)?));
    }

    if args.export_log {
        let path = crate::export::write_log(&snapshot)?;
        let _ = out_tx.send(OutputLine::Stderr(format!("Saved: {}", path.display())));
    }

    drop(out_tx);
    let _ = out_handle.await;
    Ok(())
}
