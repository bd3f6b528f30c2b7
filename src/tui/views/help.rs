use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::centered_rect;

fn section(title: &str) -> Line<'static> {
    Line::from(vec![Span::styled(
        title.to_string(),
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    )])
}

/// Draw the modal help overlay describing tabs and shortcuts.
pub fn draw_help_overlay(f: &mut Frame, area: Rect) {
    let block = Block::default().title("Help").borders(Borders::ALL);
    let help_area = centered_rect(70, 80, area);

    f.render_widget(Clear, help_area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "folio - Help",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        section("Timeline (Meta, Files):"),
        Line::from("  ←/→         Move slider by 1"),
        Line::from("  PgUp/PgDn   Move slider by 10"),
        Line::from("  Home/End    Earliest / all commits"),
        Line::from("  n/p         Next / previous story step"),
        Line::from(""),
        section("Brush (Meta):"),
        Line::from("  b           Toggle brush"),
        Line::from("  w/a/s/d     Move brush"),
        Line::from("  W/A/S/D     Resize brush"),
        Line::from("  Esc         Clear brush"),
        Line::from("  c           Copy selected commit ids"),
        Line::from(""),
        section("Projects:"),
        Line::from("  /           Search all fields"),
        Line::from("  ↑/↓         Move in year legend"),
        Line::from("  Enter       Toggle year filter"),
        Line::from("  Esc         Clear year filter"),
        Line::from(""),
        section("General:"),
        Line::from("  Tab / 1-3   Switch tab"),
        Line::from("  t           Cycle colour scheme"),
        Line::from("  r           Reset all filters"),
        Line::from("  h, F1       Toggle this help"),
        Line::from("  q           Quit application"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press 'h' or 'Esc' to close this help",
            Style::default().fg(Color::Gray),
        )]),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(ratatui::widgets::Wrap { trim: true });
    f.render_widget(help_paragraph, help_area);
}
