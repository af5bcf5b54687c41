mod clipboard;
mod help;

use crate::catalog::STEPS;
use crate::cli::Cli;
use crate::model::Step;
use crate::runner::StepRunner;
use crate::transcript::TranscriptHandle;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::{io, time::Duration, time::Instant};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Commands emitted by the UI thread to the async controller.
#[derive(Debug, Clone, Copy)]
enum UiCommand {
    Run(&'static Step),
    Quit,
}

struct UiState {
    tab: usize,
    selected: usize,
    running: Option<usize>,
    /// Lines scrolled back from the tail; 0 means follow live output.
    scroll_back: usize,
    info: String,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tab: 0,
            selected: 0,
            running: None,
            scroll_back: 0,
            info: String::new(),
        }
    }
}

pub async fn run(args: Cli) -> Result<()> {
    let pacing = crate::cli::build_pacing(&args);
    let runner = Arc::new(StepRunner::new(TranscriptHandle::new(), pacing));
    // Unbounded channel avoids backpressure between the UI thread and the runtime.
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<UiCommand>();

    let transcript = runner.transcript().clone();
    let busy = runner.busy_flag();
    // TUI runs in a dedicated thread to keep all blocking terminal I/O out of
    // the Tokio runtime.
    let ui_handle = std::thread::spawn(move || run_threaded(transcript, busy, cmd_tx));

    let res = run_controller(runner, cmd_rx).await;

    let join_res = tokio::task::spawn_blocking(move || ui_handle.join()).await;
    if let Ok(joined) = join_res {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(anyhow::anyhow!("TUI thread panicked")),
        }
    }

    res
}

/// Dispatch step runs requested by the UI. The runner's busy flag debounces,
/// so a request that arrives while a step is in flight is silently dropped.
async fn run_controller(
    runner: Arc<StepRunner>,
    mut cmd_rx: UnboundedReceiver<UiCommand>,
) -> Result<()> {
    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            UiCommand::Run(step) => {
                let r = runner.clone();
                tokio::spawn(async move { r.run(step).await });
            }
            UiCommand::Quit => break,
        }
    }
    Ok(())
}

/// Run the TUI loop on a dedicated thread.
fn run_threaded(
    transcript: TranscriptHandle,
    busy: Arc<AtomicBool>,
    cmd_tx: UnboundedSender<UiCommand>,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let mut state = UiState::default();
    let tick_rate = Duration::from_millis(50);
    let mut last_tick = Instant::now();

    let res = loop {
        let is_busy = busy.load(Ordering::SeqCst);
        if !is_busy {
            state.running = None;
        }

        if last_tick.elapsed() >= tick_rate {
            terminal
                .draw(|f| draw(f.area(), f, &state, &transcript, is_busy))
                .ok();
            last_tick = Instant::now();
        }

        // Poll input with a short timeout to avoid blocking the render loop.
        if event::poll(Duration::from_millis(10)).unwrap_or(false) {
            if let Ok(Event::Key(k)) = event::read() {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                match (k.modifiers, k.code) {
                    (_, KeyCode::Char('q')) | (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
                        let _ = cmd_tx.send(UiCommand::Quit);
                        break Ok(());
                    }
                    (_, KeyCode::Enter) => {
                        // Disabled controls are the only busy signal; rejected
                        // requests are not queued.
                        if !is_busy {
                            state.running = Some(state.selected);
                            state.scroll_back = 0;
                            let _ = cmd_tx.send(UiCommand::Run(&STEPS[state.selected]));
                        }
                    }
                    (_, KeyCode::Up) | (_, KeyCode::Char('k')) => {
                        state.selected = state.selected.saturating_sub(1);
                    }
                    (_, KeyCode::Down) | (_, KeyCode::Char('j')) => {
                        state.selected = (state.selected + 1).min(STEPS.len() - 1);
                    }
                    (_, KeyCode::Char('d')) => {
                        match crate::export::write_log(&transcript.snapshot()) {
                            Ok(p) => state.info = format!("Saved: {}", p.display()),
                            Err(e) => state.info = format!("Save failed: {e:#}"),
                        }
                    }
                    (_, KeyCode::Char('c')) => {
                        transcript.reset();
                        state.scroll_back = 0;
                        state.info = "Console cleared".into();
                    }
                    (_, KeyCode::Char('y')) => {
                        let text = transcript.snapshot().join("\n");
                        match clipboard::copy_to_clipboard(&text) {
                            Ok(()) => state.info = "Transcript copied to clipboard".into(),
                            Err(e) => state.info = format!("Clipboard copy failed: {e:#}"),
                        }
                    }
                    (_, KeyCode::PageUp) => {
                        state.scroll_back = state.scroll_back.saturating_add(10);
                    }
                    (_, KeyCode::PageDown) => {
                        state.scroll_back = state.scroll_back.saturating_sub(10);
                    }
                    (_, KeyCode::End) => {
                        state.scroll_back = 0;
                    }
                    (_, KeyCode::Char('?')) => {
                        state.tab = if state.tab == 1 { 0 } else { 1 };
                    }
                    (_, KeyCode::Esc) => {
                        state.tab = 0;
                    }
                    _ => {}
                }
            }
        }
    };

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}

fn draw(area: Rect, f: &mut Frame, state: &UiState, transcript: &TranscriptHandle, busy: bool) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    if state.tab == 1 {
        help::draw_help(rows[0], f);
    } else {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(46), Constraint::Min(0)])
            .split(rows[0]);

        draw_steps(cols[0], f, state, busy);
        draw_console(cols[1], f, state, transcript, busy);
    }

    draw_status(rows[1], f, state, busy);
}

fn draw_steps(area: Rect, f: &mut Frame, state: &UiState, busy: bool) {
    let mut lines: Vec<Line> = Vec::new();
    for (i, step) in STEPS.iter().enumerate() {
        let selected = i == state.selected;
        let marker = if selected { "▶ " } else { "  " };
        let mut title_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        if selected {
            title_style = title_style.bg(Color::DarkGray);
        }
        let suffix = if state.running == Some(i) && busy {
            "  (running…)"
        } else {
            ""
        };
        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(step.title, title_style),
            Span::styled(suffix, Style::default().fg(Color::Yellow)),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  $ {}", step.command),
            Style::default().fg(Color::Yellow),
        )));
        lines.push(Line::from(Span::styled(
            format!("  {}", step.description),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(""));
    }

    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Steps"));
    f.render_widget(p, area);
}

/// Style a rendered console line by its prefix convention.
fn line_style(sub: &str) -> Style {
    if sub.starts_with('>') {
        Style::default().fg(Color::Green)
    } else if sub.starts_with("[START]") || sub.starts_with("[END]") {
        Style::default().fg(Color::Yellow)
    } else if sub.starts_with("[ERROR]") {
        Style::default().fg(Color::Red)
    } else if sub.len() == 50 && sub.bytes().all(|b| b == b'-') {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Gray)
    }
}

fn draw_console(area: Rect, f: &mut Frame, state: &UiState, transcript: &TranscriptHandle, busy: bool) {
    // Transcript entries may embed newlines (the scripted output does this on
    // purpose); split them into rendered lines before styling.
    let snapshot = transcript.snapshot();
    let rendered: Vec<Line> = snapshot
        .iter()
        .flat_map(|entry| entry.split('\n'))
        .map(|sub| Line::from(Span::styled(sub.to_string(), line_style(sub))))
        .collect();

    // Follow the tail unless the user scrolled back.
    let viewport = area.height.saturating_sub(2) as usize;
    let end = rendered.len() - state.scroll_back.min(rendered.len());
    let start = end.saturating_sub(viewport);

    let title = if busy {
        "Live Output - running"
    } else {
        "Live Output"
    };
    let p = Paragraph::new(rendered[start..end].to_vec())
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(p, area);
}

fn draw_status(area: Rect, f: &mut Frame, state: &UiState, busy: bool) {
    let mut spans = vec![Span::styled(
        " ↑/↓ select  Enter run  d download  c clear  y copy  ? help  q quit ",
        Style::default().fg(Color::DarkGray),
    )];
    if busy {
        spans.push(Span::styled(
            " [running…] ",
            Style::default().fg(Color::Yellow),
        ));
    }
    if !state.info.is_empty() {
        spans.push(Span::styled(
            format!(" {}", state.info),
            Style::default().fg(Color::Cyan),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
