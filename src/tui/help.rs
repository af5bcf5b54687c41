use ratatui::{
    layout::Rect,
    style::Color,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn keybind(key: &'static str, pad: &'static str, action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(key, Style::default().fg(Color::Magenta)),
        Span::raw(pad),
        Span::raw(action),
    ])
}

pub fn draw_help(area: Rect, f: &mut Frame) {
    let p = Paragraph::new(vec![
        Line::from("Keybinds:"),
        keybind("q / Ctrl-C", "   ", "Quit"),
        keybind("↑/↓ or k/j", "   ", "Select step"),
        keybind("Enter", "        ", "Run selected step"),
        keybind("d", "            ", "Download transcript as .log file"),
        keybind("c", "            ", "Clear console"),
        keybind("y", "            ", "Copy transcript to clipboard"),
        keybind("PgUp/PgDn", "    ", "Scroll console"),
        keybind("End", "          ", "Jump back to live output"),
        keybind("?", "            ", "Toggle this help"),
        Line::from(""),
        Line::from("All command output is simulated; nothing is executed and"),
        Line::from("no network traffic is generated."),
    ])
    .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(p, area);
}
