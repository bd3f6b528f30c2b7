use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, Gauge, GraphType, Paragraph, Wrap};
use ratatui::Frame;

use crate::selection::{Brush, PlotScales, HOURS_PER_DAY};
use crate::view::MetaView;

use super::super::draw::Palette;
use super::super::layout::fits;

const STAMP: &str = "%b %-d, %Y %-I:%M %p";

/// Hour-of-day value for a plot pixel row.
fn hour_at(scales: &PlotScales, y: f64) -> f64 {
    let area = &scales.area;
    let span = area.bottom() - area.top();
    if span <= 0.0 {
        return 0.0;
    }
    ((area.bottom() - y) / span * HOURS_PER_DAY).clamp(0.0, HOURS_PER_DAY)
}

/// Brush outline in chart coordinates (x pixels, y hours).
fn brush_outline(scales: &PlotScales, brush: &Brush) -> Vec<(f64, f64)> {
    let low = hour_at(scales, brush.y1);
    let high = hour_at(scales, brush.y0);
    vec![
        (brush.x0, low),
        (brush.x1, low),
        (brush.x1, high),
        (brush.x0, high),
        (brush.x0, low),
    ]
}

/// Render the slider, the commit scatter plot, the summary and the brushed selection.
pub fn draw_meta_view(
    f: &mut Frame,
    area: Rect,
    view: &MetaView,
    scales: &PlotScales,
    brush: Option<&Brush>,
    palette: &Palette,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(area);

    draw_slider(f, rows[0], view, palette);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(rows[1]);
    draw_scatter(f, body[0], view, scales, brush, palette);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(3)])
        .split(body[1]);
    draw_summary(f, side[0], view, palette);
    draw_selection(f, side[1], view, palette);

    draw_step(f, rows[2], view, palette);
}

fn draw_slider(f: &mut Frame, area: Rect, view: &MetaView, palette: &Palette) {
    if !fits(area, 10, 3) {
        return;
    }
    let label = match view.cutoff {
        Some(cutoff) => cutoff.format(STAMP).to_string(),
        None => "No commits".to_string(),
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Timeline (←/→, PgUp/PgDn)"))
        .gauge_style(Style::default().fg(palette.accent))
        .ratio((view.control / 100.0).clamp(0.0, 1.0))
        .label(label);
    f.render_widget(gauge, area);
}

fn draw_scatter(
    f: &mut Frame,
    area: Rect,
    view: &MetaView,
    scales: &PlotScales,
    brush: Option<&Brush>,
    palette: &Palette,
) {
    if !fits(area, 20, 6) {
        return;
    }

    let plot = &scales.area;
    let (mut plain, mut picked) = (Vec::new(), Vec::new());
    for point in &view.points {
        let xy = (point.x, point.hour_frac);
        if point.selected {
            picked.push(xy);
        } else {
            plain.push(xy);
        }
    }
    let outline = brush.map(|b| brush_outline(scales, b)).unwrap_or_default();

    let mut datasets = vec![
        Dataset::default()
            .name("commits")
            .marker(Marker::Braille)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(palette.accent))
            .data(&plain),
        Dataset::default()
            .name("selected")
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(palette.selected).add_modifier(Modifier::BOLD))
            .data(&picked),
    ];
    if !outline.is_empty() {
        datasets.push(
            Dataset::default()
                .name("brush")
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(palette.dim())
                .data(&outline),
        );
    }

    let (first, last) = match scales.x_domain() {
        Some((a, b)) => (a.format("%Y-%m-%d").to_string(), b.format("%Y-%m-%d").to_string()),
        None => (String::new(), String::new()),
    };

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Commits by time of day (b brush, wasd move, WASD size)"),
        )
        .x_axis(
            Axis::default()
                .style(palette.dim())
                .bounds([plot.left(), plot.right()])
                .labels(vec![Span::raw(first), Span::raw(last)]),
        )
        .y_axis(
            Axis::default()
                .style(palette.dim())
                .bounds([0.0, HOURS_PER_DAY])
                .labels(
                    ["00:00", "06:00", "12:00", "18:00", "24:00"]
                        .into_iter()
                        .map(Span::raw)
                        .collect(),
                ),
        );
    f.render_widget(chart, area);
}

fn draw_summary(f: &mut Frame, area: Rect, view: &MetaView, palette: &Palette) {
    if !fits(area, 12, 3) {
        return;
    }
    let s = &view.summary;
    let entry = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label:<14}"), palette.dim()),
            Span::styled(value, Style::default().fg(palette.fg).add_modifier(Modifier::BOLD)),
        ])
    };
    let lines = vec![
        entry("Commits", s.commits.to_string()),
        entry("Files", s.files.to_string()),
        entry("Total LOC", s.total_loc.to_string()),
        entry("Max depth", s.max_depth.to_string()),
        entry("Longest line", s.longest_line.to_string()),
        entry("Max lines", s.max_lines.to_string()),
    ];
    let panel = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Summary"));
    f.render_widget(panel, area);
}

fn draw_selection(f: &mut Frame, area: Rect, view: &MetaView, palette: &Palette) {
    if !fits(area, 12, 3) {
        return;
    }
    let mut lines = vec![Line::from(Span::styled(view.selection_text.clone(), palette.title()))];
    let bar_width = area.width.saturating_sub(24) as f64;
    for share in &view.breakdown {
        let bar = "█".repeat((share.share * bar_width).round() as usize);
        lines.push(Line::from(vec![
            Span::raw(format!("{:<8}", share.kind)),
            Span::styled(format!("{:>5} ", share.lines), palette.dim()),
            Span::styled(format!("{:>5.1}% ", share.share * 100.0), palette.dim()),
            Span::styled(bar, Style::default().fg(palette.selected)),
        ]));
    }
    let panel = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Selection (c copies ids)"));
    f.render_widget(panel, area);
}

fn draw_step(f: &mut Frame, area: Rect, view: &MetaView, palette: &Palette) {
    if !fits(area, 10, 3) {
        return;
    }
    let text = match &view.step {
        Some(step) => Line::from(Span::raw(step.text.clone())),
        None => Line::from(Span::styled("Press n / p to step through the commit story", palette.dim())),
    };
    let panel = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Story"))
        .wrap(Wrap { trim: true });
    f.render_widget(panel, area);
}
