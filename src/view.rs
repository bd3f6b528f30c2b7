//! Everything a renderer draws, derived from data plus one [`FilterState`].
//!
//! Renderers (console output, the terminal explorer) only read these views;
//! no filtering happens at draw time.

use crate::model::{Commit, Summary};
use crate::projects::{self, Project, ProjectCard, YearSlice};
use crate::selection::{
    language_breakdown, radius, selected_commits, selection_text, LanguageShare, PlotScales,
};
use crate::state::FilterState;
use crate::summary::summarize_rows;
use crate::timeline::{Instant, Step, Timeline};
use crate::units::{file_units, FileUnits};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub hour_frac: f64,
    pub total_lines: usize,
    pub selected: bool,
}

#[derive(Debug, Serialize)]
pub struct MetaView<'a> {
    pub control: f64,
    pub cutoff: Option<Instant>,
    pub step: Option<Step>,
    pub visible: Vec<&'a Commit>,
    /// Whole repository; the slider never changes it.
    pub summary: Summary,
    /// Counters over `visible` only.
    pub visible_summary: Summary,
    /// Drawn in order: largest dots first so small ones stay clickable.
    pub points: Vec<ScatterPoint>,
    pub selected: Vec<&'a Commit>,
    pub selection_text: String,
    pub breakdown: Vec<LanguageShare>,
    pub units: Vec<FileUnits>,
}

impl<'a> MetaView<'a> {
    pub fn build(timeline: &'a Timeline, scales: &PlotScales, state: &FilterState) -> Self {
        let visible = timeline.visible(state.cutoff.as_ref());
        let selected = selected_commits(state.brush.as_ref(), scales, &visible);

        let min_lines = timeline.commits().iter().map(|c| c.total_lines).min().unwrap_or(0);
        let max_lines = timeline.commits().iter().map(|c| c.total_lines).max().unwrap_or(0);

        let mut points: Vec<ScatterPoint> = visible
            .iter()
            .map(|c| {
                let (x, y) = scales.point(c);
                ScatterPoint {
                    id: c.id.clone(),
                    x,
                    y,
                    r: radius(c.total_lines, min_lines, max_lines),
                    hour_frac: c.hour_frac,
                    total_lines: c.total_lines,
                    selected: selected.iter().any(|s| s.id == c.id),
                }
            })
            .collect();
        points.sort_by(|a, b| b.total_lines.cmp(&a.total_lines));

        let step = state.step.and_then(|i| timeline.step(i));

        Self {
            control: state.control,
            cutoff: state.cutoff,
            step,
            summary: timeline.summary().clone(),
            visible_summary: summarize_rows(visible.iter().flat_map(|c| c.lines())),
            units: file_units(&visible),
            selection_text: selection_text(selected.len()),
            breakdown: language_breakdown(&selected),
            points,
            selected,
            visible,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectView<'a> {
    pub title: String,
    pub shown: Vec<&'a Project>,
    pub cards: Vec<ProjectCard>,
    /// Pie over the query matches, so wedges stay put while a year is picked.
    pub slices: Vec<YearSlice>,
}

impl<'a> ProjectView<'a> {
    pub fn build(all: &'a [Project], state: &FilterState) -> Self {
        let matching = projects::search(all, &state.query);
        let slices = projects::pie(&matching, state.selected_year.as_deref());
        let shown = projects::visible(all, &state.query, state.selected_year.as_deref());
        Self {
            title: projects::title_line(shown.len()),
            cards: shown.iter().map(|p| ProjectCard::from(*p)).collect(),
            shown,
            slices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commits::fixtures::row;
    use crate::commits::group_commits;
    use crate::projects::parse_projects;
    use crate::selection::{Brush, PlotArea};
    use pretty_assertions::assert_eq;

    fn timeline() -> Timeline {
        Timeline::new(group_commits(
            vec![
                row("a", "x.js", 1, "2024-01-01T09:00:00Z"),
                row("b", "x.js", 2, "2024-01-06T09:00:00Z"),
                row("b", "y.css", 1, "2024-01-06T09:00:00Z"),
                row("c", "z.html", 3, "2024-01-11T21:00:00Z"),
            ],
            None,
        ))
    }

    #[test]
    fn default_state_shows_all_commits_and_selects_none() {
        let tl = timeline();
        let scales = PlotScales::new(tl.commits(), PlotArea::default());
        let view = MetaView::build(&tl, &scales, &FilterState::default());
        assert_eq!(view.visible.len(), 3);
        assert!(view.selected.is_empty());
        assert_eq!(view.selection_text, "No commits selected");
        assert_eq!(view.summary.total_loc, 4);
        assert_eq!(view.points[0].id, "b");
    }

    #[test]
    fn slider_cascade_narrows_every_view() {
        let tl = timeline();
        let scales = PlotScales::new(tl.commits(), PlotArea::default());
        let state = FilterState::default().with_control(50.0, &tl);
        let view = MetaView::build(&tl, &scales, &state);
        assert_eq!(view.visible.len(), 2);
        assert_eq!(view.visible_summary.commits, 2);
        assert_eq!(view.units.len(), 2);
        assert!(view.points.iter().all(|p| p.id != "c"));
    }

    #[test]
    fn summary_ignores_the_slider() {
        let tl = timeline();
        let scales = PlotScales::new(tl.commits(), PlotArea::default());
        for control in [0.0, 50.0, 100.0] {
            let state = FilterState::default().with_control(control, &tl);
            let view = MetaView::build(&tl, &scales, &state);
            assert_eq!(view.summary.commits, 3);
            assert_eq!(view.summary.total_loc, 4);
            assert_eq!(&view.summary, tl.summary());
        }
        let first_only = FilterState::default().with_control(0.0, &tl);
        let view = MetaView::build(&tl, &scales, &first_only);
        assert_eq!(view.visible_summary.commits, 1);
    }

    #[test]
    fn brush_only_selects_visible_commits() {
        let tl = timeline();
        let scales = PlotScales::new(tl.commits(), PlotArea::default());
        let everything = Brush::new((0.0, 0.0), (1000.0, 600.0));
        let state = FilterState::default()
            .with_brush(Some(everything))
            .with_control(50.0, &tl);
        let view = MetaView::build(&tl, &scales, &state);
        assert_eq!(view.selection_text, "2 commits selected");
        assert_eq!(view.breakdown.iter().map(|b| b.lines).sum::<usize>(), 3);
        assert!(view.points.iter().all(|p| p.selected));
    }

    #[test]
    fn step_view_carries_narrative_text() {
        let tl = timeline();
        let scales = PlotScales::new(tl.commits(), PlotArea::default());
        let state = FilterState::default().with_step(2, &tl);
        let view = MetaView::build(&tl, &scales, &state);
        assert_eq!(view.step.map(|s| s.commit), Some("c".to_string()));
        assert_eq!(view.visible.len(), 3);
    }

    #[test]
    fn project_view_keeps_pie_while_year_filters_list() {
        let all = parse_projects(
            r#"[{"title":"A","year":2023},{"title":"B","year":2024},{"title":"C","year":2024}]"#,
        )
        .unwrap();
        let state = FilterState::default().toggle_year("2024");
        let view = ProjectView::build(&all, &state);
        assert_eq!(view.title, "2 Projects");
        assert_eq!(view.slices.len(), 2);
        assert!(view.slices[1].selected);
        assert_eq!(view.cards[0].heading, "B");

        let searched = ProjectView::build(&all, &state.with_query("a"));
        assert_eq!(searched.slices.len(), 1);
        assert!(searched.shown.is_empty());
    }
}
