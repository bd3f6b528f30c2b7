use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

use crate::projects::LOAD_FAILED;
use crate::view::ProjectView;

use super::super::draw::{hex_color, Palette};
use super::super::layout::{fits, visible_window};
use super::super::state::TuiState;

/// Render the search box, the per-year chart with its legend, and the project list.
pub fn draw_projects_view(
    f: &mut Frame,
    area: Rect,
    view: &ProjectView,
    state: &TuiState,
    palette: &Palette,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    draw_search(f, rows[0], state, palette);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(body[0]);

    draw_year_chart(f, left[0], view);
    draw_legend(f, left[1], view, state, palette);
    draw_cards(f, body[1], view, state, palette);
}

fn draw_search(f: &mut Frame, area: Rect, state: &TuiState, palette: &Palette) {
    if !fits(area, 10, 3) {
        return;
    }
    let (title, style) = if state.search_mode {
        ("Search (Enter to apply, Esc to clear)", Style::default().fg(palette.accent))
    } else {
        ("Search (/)", palette.dim())
    };
    let cursor = if state.search_mode { "_" } else { "" };
    let input = Paragraph::new(format!("{}{cursor}", state.filter.query))
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(input, area);
}

fn draw_year_chart(f: &mut Frame, area: Rect, view: &ProjectView) {
    if !fits(area, 12, 5) || view.slices.is_empty() {
        return;
    }
    let bars: Vec<Bar> = view
        .slices
        .iter()
        .map(|slice| {
            let mut style = Style::default().fg(hex_color(&slice.color));
            if slice.selected {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Bar::default()
                .value(slice.count as u64)
                .label(Line::from(slice.label.clone()))
                .style(style)
        })
        .collect();

    let chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title("Projects per year"))
        .data(BarGroup::default().bars(&bars))
        .bar_width(5)
        .bar_gap(1);
    f.render_widget(chart, area);
}

fn draw_legend(f: &mut Frame, area: Rect, view: &ProjectView, state: &TuiState, palette: &Palette) {
    if !fits(area, 12, 3) {
        return;
    }
    let total: usize = view.slices.iter().map(|s| s.count).sum();
    let height = area.height.saturating_sub(2) as usize;
    let window = visible_window(view.slices.len(), state.legend_selected, height);

    let items: Vec<ListItem> = view.slices[window.clone()]
        .iter()
        .enumerate()
        .map(|(offset, slice)| {
            let index = window.start + offset;
            let share = if total == 0 { 0.0 } else { slice.count as f64 / total as f64 * 100.0 };
            let mut label = Style::default();
            if slice.selected {
                label = label.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }
            if index == state.legend_selected {
                label = label.fg(palette.accent);
            }
            ListItem::new(Line::from(vec![
                Span::styled("■ ", Style::default().fg(hex_color(&slice.color))),
                Span::styled(format!("{:<10}", slice.label), label),
                Span::styled(format!("{:>3} ({share:.0}%)", slice.count), palette.dim()),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Years (↑/↓, Enter toggles)"),
    );
    f.render_widget(list, area);
}

fn draw_cards(f: &mut Frame, area: Rect, view: &ProjectView, state: &TuiState, palette: &Palette) {
    if !fits(area, 20, 3) {
        return;
    }
    let block = Block::default().borders(Borders::ALL).title(view.title.clone());

    if let Some(err) = &state.projects_error {
        let lines = vec![
            Line::from(Span::styled(LOAD_FAILED, Style::default().fg(palette.selected))),
            Line::from(Span::styled(err.clone(), palette.dim())),
        ];
        f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), area);
        return;
    }

    let mut lines = Vec::new();
    for card in &view.cards {
        let mut heading = vec![Span::styled(card.heading.clone(), palette.title())];
        if let Some(year) = &card.year {
            heading.push(Span::styled(format!("  {year}"), palette.dim()));
        }
        lines.push(Line::from(heading));
        lines.push(Line::from(card.description.clone()));
        lines.push(Line::from(Span::styled(card.image.clone(), palette.dim())));
        if let Some(url) = &card.url {
            lines.push(Line::from(Span::styled(
                url.clone(),
                Style::default().add_modifier(Modifier::UNDERLINED),
            )));
        }
        lines.push(Line::from(""));
    }

    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), area);
}
