use super::load::{load_dataset, Dataset};
use super::output::*;
use crate::cli::{CommonArgs, PlotArgs};
use crate::fetch::HttpFetcher;
use crate::selection::{Brush, PlotArea, PlotScales};
use crate::state::FilterState;
use crate::view::MetaView;

fn load(common: &CommonArgs, quiet: bool) -> anyhow::Result<Dataset> {
    load_dataset(common, &HttpFetcher::new(), !quiet)
}

/// Slider position wins over a step; neither means "show everything".
fn state_for(dataset: &Dataset, at: Option<f64>, step: Option<usize>) -> FilterState {
    let state = FilterState::default();
    match (at, step) {
        (Some(control), _) => state.with_control(control, &dataset.timeline),
        (None, Some(step)) => state.with_step(step, &dataset.timeline),
        (None, None) => state,
    }
}

pub fn summary(common: &CommonArgs, json: bool) -> anyhow::Result<()> {
    let dataset = load(common, json)?;
    if json {
        output_summary_json(&dataset)
    } else {
        output_summary_table(&dataset);
        Ok(())
    }
}

pub fn commits(
    common: &CommonArgs,
    at: Option<f64>,
    step: Option<usize>,
    json: bool,
    ndjson: bool,
) -> anyhow::Result<()> {
    let dataset = load(common, json || ndjson)?;
    let state = state_for(&dataset, at, step);
    let scales = PlotScales::new(dataset.timeline.commits(), PlotArea::default());
    let view = MetaView::build(&dataset.timeline, &scales, &state);

    if json {
        output_commits_json(&dataset, &view)
    } else if ndjson {
        output_commits_ndjson(&view)
    } else {
        output_commits_table(&view);
        Ok(())
    }
}

pub fn select(
    common: &CommonArgs,
    from: (f64, f64),
    to: (f64, f64),
    at: Option<f64>,
    plot: PlotArgs,
    json: bool,
) -> anyhow::Result<()> {
    let dataset = load(common, json)?;
    let area = PlotArea::sized(plot.width, plot.height);
    let brush = Brush::new(from, to);
    let state = state_for(&dataset, at, None).with_brush(Some(brush));
    let scales = PlotScales::new(dataset.timeline.commits(), area);
    let view = MetaView::build(&dataset.timeline, &scales, &state);

    if json {
        output_selection_json(&dataset, area, brush, &view)
    } else {
        output_selection_table(brush, &view);
        Ok(())
    }
}

pub fn units(common: &CommonArgs, at: Option<f64>, json: bool) -> anyhow::Result<()> {
    let dataset = load(common, json)?;
    let state = state_for(&dataset, at, None);
    let scales = PlotScales::new(dataset.timeline.commits(), PlotArea::default());
    let view = MetaView::build(&dataset.timeline, &scales, &state);

    if json {
        output_units_json(&dataset, &view)
    } else {
        output_units_table(&view);
        Ok(())
    }
}

pub fn story(common: &CommonArgs, json: bool) -> anyhow::Result<()> {
    let dataset = load(common, json)?;
    let steps = dataset.timeline.narrative();
    if json {
        output_story_json(&dataset, &steps)
    } else {
        output_story_table(&steps);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commits::fixtures::row;
    use crate::commits::group_commits;
    use crate::model::Summary;
    use crate::timeline::Timeline;

    fn dataset() -> Dataset {
        let rows = vec![
            row("a", "x.js", 1, "2024-01-01T09:00:00Z"),
            row("b", "x.js", 2, "2024-01-06T09:00:00Z"),
            row("c", "z.html", 3, "2024-01-11T21:00:00Z"),
        ];
        Dataset {
            source: "loc.csv".into(),
            dropped: 0,
            summary: Summary::default(),
            timeline: Timeline::new(group_commits(rows, None)),
        }
    }

    #[test]
    fn no_flags_shows_everything() {
        let state = state_for(&dataset(), None, None);
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn slider_zero_keeps_only_the_first_commit() {
        let data = dataset();
        let state = state_for(&data, Some(0.0), None);
        assert_eq!(data.timeline.visible(state.cutoff.as_ref()).len(), 1);
    }

    #[test]
    fn step_moves_the_cutoff_to_its_commit() {
        let data = dataset();
        let state = state_for(&data, None, Some(1));
        assert_eq!(state.step, Some(1));
        let ids: Vec<_> = data
            .timeline
            .visible(state.cutoff.as_ref())
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
