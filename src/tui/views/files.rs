use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::units::kind_palette;
use crate::view::MetaView;

use super::super::draw::{kind_color, Palette};
use super::super::layout::fits;
use super::{header_cell, truncate};

/// Render one row per file with a dot per edited line, coloured by kind.
pub fn draw_files_view(f: &mut Frame, area: Rect, view: &MetaView, palette: &Palette) {
    if !fits(area, 30, 5) {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let kinds = kind_palette(&view.units);
    let slot = |kind: &str| kinds.iter().position(|k| k == kind).unwrap_or(0);

    let legend: Vec<Span> = kinds
        .iter()
        .enumerate()
        .flat_map(|(i, kind)| {
            [
                Span::styled("● ", Style::default().fg(kind_color(i))),
                Span::raw(format!("{kind}  ")),
            ]
        })
        .collect();
    f.render_widget(
        Paragraph::new(Line::from(legend)).block(Block::default().borders(Borders::ALL).title("Kinds")),
        chunks[0],
    );

    let dot_room = chunks[1].width.saturating_sub(44) as usize;
    let rows: Vec<Row> = view
        .units
        .iter()
        .map(|file| {
            let mut dots = Vec::new();
            let mut left = dot_room;
            for (kind, count) in &file.kinds {
                let n = (*count).min(left);
                left -= n;
                dots.push(Span::styled("•".repeat(n), Style::default().fg(kind_color(slot(kind)))));
            }
            if file.lines > dot_room {
                dots.push(Span::styled("…", palette.dim()));
            }
            Row::new(vec![
                Cell::from(truncate(&file.path, 30)),
                Cell::from(file.lines.to_string()),
                Cell::from(Line::from(dots)),
            ])
        })
        .collect();

    let title = format!("Files at {:.0}% ({} files)", view.control, view.units.len());
    let table = Table::new(
        rows,
        [
            Constraint::Length(32),
            Constraint::Length(7),
            Constraint::Min(0),
        ],
    )
    .header(Row::new([
        header_cell("File", palette.accent),
        header_cell("Lines", palette.accent),
        header_cell("Units", palette.accent),
    ]))
    .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(table, chunks[1]);
}
