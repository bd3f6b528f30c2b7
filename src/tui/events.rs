use crossterm::event::KeyCode;

use crate::projects::Project;
use crate::selection::{Brush, PlotArea};
use crate::state::FilterState;
use crate::timeline::{Timeline, CONTROL_MAX, CONTROL_MIN};
use crate::view::ProjectView;

use super::state::{Tab, TuiState};

/// Pixels the brush moves or grows per key press.
pub const BRUSH_STEP: f64 = 20.0;
const SLIDER_STEP: f64 = 1.0;
const SLIDER_PAGE: f64 = 10.0;

/// What the run loop must do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
    CopySelection,
    CycleTheme,
}

fn update(state: &mut TuiState, f: impl FnOnce(FilterState) -> FilterState) {
    let current = std::mem::take(&mut state.filter);
    state.filter = f(current);
}

/// Brush dropped in the middle of the plot.
pub fn default_brush(area: &PlotArea) -> Brush {
    let cx = (area.left() + area.right()) / 2.0;
    let cy = (area.top() + area.bottom()) / 2.0;
    Brush::new((cx - 100.0, cy - 100.0), (cx + 100.0, cy + 100.0))
}

pub fn handle_key(
    code: KeyCode,
    state: &mut TuiState,
    timeline: &Timeline,
    projects: &[Project],
    area: &PlotArea,
) -> Action {
    if state.show_help {
        match code {
            KeyCode::Char('q') => return Action::Quit,
            KeyCode::Char('h') | KeyCode::F(1) | KeyCode::Esc => state.show_help = false,
            _ => {}
        }
        return Action::Continue;
    }

    if state.search_mode {
        handle_search_input(code, state, projects);
        return Action::Continue;
    }

    match code {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Char('h') | KeyCode::F(1) => state.show_help = true,
        KeyCode::Char('t') => return Action::CycleTheme,
        KeyCode::Char('c') => return Action::CopySelection,
        KeyCode::Char('r') => {
            update(state, |_| FilterState::reset());
            state.legend_selected = 0;
        }
        KeyCode::Tab => state.tab = state.tab.next(),
        KeyCode::BackTab => state.tab = state.tab.prev(),
        KeyCode::Char('1') => state.tab = Tab::Meta,
        KeyCode::Char('2') => state.tab = Tab::Files,
        KeyCode::Char('3') => state.tab = Tab::Projects,
        _ => match state.tab {
            Tab::Meta => handle_meta_input(code, state, timeline, area),
            Tab::Files => handle_slider_input(code, state, timeline),
            Tab::Projects => handle_projects_input(code, state, projects),
        },
    }
    Action::Continue
}

/// Slider and narrative keys, shared by the Meta and Files tabs.
pub fn handle_slider_input(code: KeyCode, state: &mut TuiState, timeline: &Timeline) {
    let control = state.filter.control;
    match code {
        KeyCode::Left => update(state, |f| f.with_control(control - SLIDER_STEP, timeline)),
        KeyCode::Right => update(state, |f| f.with_control(control + SLIDER_STEP, timeline)),
        KeyCode::PageDown => update(state, |f| f.with_control(control - SLIDER_PAGE, timeline)),
        KeyCode::PageUp => update(state, |f| f.with_control(control + SLIDER_PAGE, timeline)),
        KeyCode::Home => update(state, |f| f.with_control(CONTROL_MIN, timeline)),
        KeyCode::End => update(state, |f| f.with_control(CONTROL_MAX, timeline)),
        KeyCode::Char('n') => {
            let next = state.filter.step.map_or(0, |s| s + 1);
            update(state, |f| f.with_step(next, timeline));
        }
        KeyCode::Char('p') => {
            let prev = state.filter.step.map_or(0, |s| s.saturating_sub(1));
            update(state, |f| f.with_step(prev, timeline));
        }
        _ => {}
    }
}

pub fn handle_meta_input(code: KeyCode, state: &mut TuiState, timeline: &Timeline, area: &PlotArea) {
    let brush = state.filter.brush;
    let moved = match (code, brush) {
        (KeyCode::Char('b'), None) => Some(Some(default_brush(area))),
        (KeyCode::Char('b'), Some(_)) | (KeyCode::Esc, Some(_)) => Some(None),
        (KeyCode::Char('w'), Some(b)) => Some(Some(b.translated(0.0, -BRUSH_STEP))),
        (KeyCode::Char('s'), Some(b)) => Some(Some(b.translated(0.0, BRUSH_STEP))),
        (KeyCode::Char('a'), Some(b)) => Some(Some(b.translated(-BRUSH_STEP, 0.0))),
        (KeyCode::Char('d'), Some(b)) => Some(Some(b.translated(BRUSH_STEP, 0.0))),
        (KeyCode::Char('W'), Some(b)) => Some(Some(b.resized(0.0, -BRUSH_STEP))),
        (KeyCode::Char('S'), Some(b)) => Some(Some(b.resized(0.0, BRUSH_STEP))),
        (KeyCode::Char('A'), Some(b)) => Some(Some(b.resized(-BRUSH_STEP, 0.0))),
        (KeyCode::Char('D'), Some(b)) => Some(Some(b.resized(BRUSH_STEP, 0.0))),
        _ => None,
    };

    match moved {
        Some(brush) => update(state, |f| f.with_brush(brush)),
        None => handle_slider_input(code, state, timeline),
    }
}

pub fn handle_projects_input(code: KeyCode, state: &mut TuiState, projects: &[Project]) {
    let legend_len = ProjectView::build(projects, &state.filter).slices.len();
    match code {
        KeyCode::Char('/') => state.search_mode = true,
        KeyCode::Up => state.legend_selected = state.legend_selected.saturating_sub(1),
        KeyCode::Down => {
            if state.legend_selected + 1 < legend_len {
                state.legend_selected += 1;
            }
        }
        KeyCode::Enter => {
            let label = ProjectView::build(projects, &state.filter)
                .slices
                .get(state.legend_selected)
                .map(|s| s.label.clone());
            if let Some(label) = label {
                update(state, |f| f.toggle_year(&label));
            }
        }
        KeyCode::Esc => {
            if let Some(year) = state.filter.selected_year.clone() {
                update(state, |f| f.toggle_year(&year));
            }
        }
        _ => {}
    }
}

pub fn handle_search_input(code: KeyCode, state: &mut TuiState, projects: &[Project]) {
    let mut query = state.filter.query.clone();
    match code {
        KeyCode::Esc => {
            state.search_mode = false;
            query.clear();
        }
        KeyCode::Enter => state.search_mode = false,
        KeyCode::Backspace => {
            query.pop();
        }
        KeyCode::Char(c) => query.push(c),
        _ => return,
    }
    update(state, |f| f.with_query(query));

    let legend_len = ProjectView::build(projects, &state.filter).slices.len();
    state.legend_selected = state.legend_selected.min(legend_len.saturating_sub(1));
}
