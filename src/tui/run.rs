use std::io;

use crossterm::event::{poll, read, Event, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::Terminal;

use crate::cli::CommonArgs;
use crate::fetch::{HttpFetcher, Source};
use crate::meta::{load_dataset, Dataset};
use crate::projects::{load_projects, Project};
use crate::selection::{PlotArea, PlotScales};
use crate::store::Store;
use crate::view::{MetaView, ProjectView};

use super::draw::Palette;
use super::events::{handle_key, Action};
use super::input::{copy_to_clipboard, selection_clipboard_text};
use super::state::{Tab, TuiState};
use super::views::{draw_files_view, draw_help_overlay, draw_meta_view, draw_projects_view};

fn to_io(err: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err.to_string())
}

pub fn run(common: &CommonArgs) -> io::Result<()> {
    let fetcher = HttpFetcher::new();
    let dataset = load_dataset(common, &fetcher, true).map_err(to_io)?;

    let mut projects_error = None;
    let projects: Vec<Project> = match load_projects(&Source::parse(&common.projects), &fetcher) {
        Ok(projects) => projects,
        Err(err) => {
            tracing::warn!(%err, "could not load project catalogue");
            projects_error = Some(err.to_string());
            Vec::new()
        }
    };

    let mut store = match Store::new(common.store.as_ref()) {
        Ok(store) => Some(store),
        Err(err) => {
            tracing::warn!(%err, "preference store unavailable; theme changes won't persist");
            None
        }
    };
    let theme = store.as_ref().map(|s| s.color_scheme()).unwrap_or_default();

    let plot = PlotArea::default();
    let scales = PlotScales::new(dataset.timeline.commits(), plot);

    let mut state = TuiState::new(theme);
    state.projects_error = projects_error;

    enable_raw_mode()?;
    with_teardown(
        || {
            let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
            terminal.clear()?;
            let session = Session {
                dataset: &dataset,
                projects: &projects,
                scales: &scales,
                plot: &plot,
            };
            let outcome = session.event_loop(&mut terminal, &mut state, store.as_mut());
            terminal.clear()?;
            outcome
        },
        disable_raw_mode,
    )
}

/// Run `body`, then `teardown` whether or not `body` failed. The first error wins.
fn with_teardown<T>(
    body: impl FnOnce() -> io::Result<T>,
    teardown: impl FnOnce() -> io::Result<()>,
) -> io::Result<T> {
    let outcome = body();
    let restored = teardown();
    let value = outcome?;
    restored?;
    Ok(value)
}

struct Session<'a> {
    dataset: &'a Dataset,
    projects: &'a [Project],
    scales: &'a PlotScales,
    plot: &'a PlotArea,
}

impl Session<'_> {
    fn event_loop<B: Backend>(
        &self,
        terminal: &mut Terminal<B>,
        state: &mut TuiState,
        mut store: Option<&mut Store>,
    ) -> io::Result<()> {
        let Session { dataset, projects, scales, plot } = *self;
        loop {
            let meta = MetaView::build(&dataset.timeline, scales, &state.filter);
            let catalogue = ProjectView::build(projects, &state.filter);
            let palette = Palette::for_scheme(state.theme);

            let draw_result = terminal.draw(|f| {
                let size = f.size();
                f.render_widget(Block::default().style(palette.base()), size);

                if state.show_help {
                    draw_help_overlay(f, size);
                    return;
                }

                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(3),
                        Constraint::Min(0),
                        Constraint::Length(1),
                    ])
                    .split(size);

                let tabs = Tabs::new(Tab::ALL.iter().map(|t| t.title()).collect::<Vec<_>>())
                    .block(Block::default().borders(Borders::ALL).title(format!("folio · {}", dataset.source)))
                    .highlight_style(palette.title().add_modifier(Modifier::BOLD))
                    .select(state.tab.index());
                f.render_widget(tabs, chunks[0]);

                match state.tab {
                    Tab::Meta => draw_meta_view(f, chunks[1], &meta, scales, state.filter.brush.as_ref(), &palette),
                    Tab::Files => draw_files_view(f, chunks[1], &meta, &palette),
                    Tab::Projects => draw_projects_view(f, chunks[1], &catalogue, state, &palette),
                }

                let status = match state.current_status() {
                    Some(message) => Span::styled(message.to_string(), palette.title()),
                    None => Span::styled(
                        format!("theme: {} · h help · q quit", state.theme.label()),
                        palette.dim(),
                    ),
                };
                f.render_widget(Paragraph::new(Line::from(status)), chunks[2]);
            });

            if let Err(e) = draw_result {
                eprintln!("TUI draw error: {}", e);
            }

            if !poll(std::time::Duration::from_millis(200))? {
                continue;
            }
            let Event::Key(key_event) = read()? else {
                continue;
            };
            if key_event.kind != KeyEventKind::Press {
                continue;
            }

            match handle_key(key_event.code, state, &dataset.timeline, projects, plot) {
                Action::Quit => return Ok(()),
                Action::Continue => {}
                Action::CopySelection => {
                    let text = selection_clipboard_text(&meta.selected);
                    if text.is_empty() {
                        state.set_status("Nothing selected to copy");
                    } else {
                        match copy_to_clipboard(&text) {
                            Ok(()) => state.set_status(format!("Copied {} commit ids", meta.selected.len())),
                            Err(err) => state.set_status(format!("Clipboard error: {err}")),
                        }
                    }
                }
                Action::CycleTheme => {
                    state.theme = state.theme.next();
                    if let Some(store) = store.as_deref_mut() {
                        if let Err(err) = store.set_color_scheme(state.theme) {
                            state.set_status(format!("Could not save theme: {err}"));
                            continue;
                        }
                    }
                    state.set_status(format!("Theme: {}", state.theme.label()));
                }
            }
        }
    }
}
