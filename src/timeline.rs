use crate::commits::sort_by_datetime;
use crate::model::{Commit, Summary};
use crate::summary::summarize_rows;
use chrono::{DateTime, Duration, FixedOffset};
use serde::{Deserialize, Serialize};

pub const CONTROL_MIN: f64 = 0.0;
pub const CONTROL_MAX: f64 = 100.0;

pub type Instant = DateTime<FixedOffset>;

/// Linear mapping between an instant domain and a numeric range.
///
/// A zero-length domain maps every instant to the middle of the range and
/// inverts every value to the single domain instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    start: Instant,
    end: Instant,
    range: (f64, f64),
}

impl TimeScale {
    pub fn new(domain: (Instant, Instant), range: (f64, f64)) -> Self {
        let (a, b) = domain;
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        Self { start, end, range }
    }

    /// Scale over the extent of the given commits, `None` when there are none.
    pub fn over<'a, I>(commits: I, range: (f64, f64)) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Commit>,
    {
        let mut extent: Option<(Instant, Instant)> = None;
        for commit in commits {
            let t = commit.datetime;
            extent = Some(match extent {
                None => (t, t),
                Some((lo, hi)) => (lo.min(t), hi.max(t)),
            });
        }
        extent.map(|domain| Self::new(domain, range))
    }

    pub fn domain(&self) -> (Instant, Instant) {
        (self.start, self.end)
    }

    fn span_ms(&self) -> i64 {
        (self.end - self.start).num_milliseconds()
    }

    pub fn scale(&self, t: &Instant) -> f64 {
        let (r0, r1) = self.range;
        let span = self.span_ms();
        if span == 0 {
            return (r0 + r1) / 2.0;
        }
        let ratio = (*t - self.start).num_milliseconds() as f64 / span as f64;
        r0 + ratio * (r1 - r0)
    }

    pub fn invert(&self, value: f64) -> Instant {
        let (r0, r1) = self.range;
        let span = self.span_ms();
        if span == 0 || r0 == r1 {
            return self.start;
        }
        let ratio = (value - r0) / (r1 - r0);
        self.start + Duration::milliseconds((ratio * span as f64).round() as i64)
    }
}

/// One scrollytelling step, bound to the commit it reveals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    pub index: usize,
    pub commit: String,
    pub cutoff: Instant,
    pub text: String,
}

/// Commits in ascending time order with the slider scale over their extent.
pub struct Timeline {
    commits: Vec<Commit>,
    scale: Option<TimeScale>,
    summary: Summary,
}

impl Timeline {
    pub fn new(mut commits: Vec<Commit>) -> Self {
        sort_by_datetime(&mut commits);
        let scale = TimeScale::over(&commits, (CONTROL_MIN, CONTROL_MAX));
        let summary = summarize_rows(commits.iter().flat_map(|c| c.lines()));
        Self {
            commits,
            scale,
            summary,
        }
    }

    /// Counters over every commit, independent of any cutoff.
    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    pub fn scale(&self) -> Option<&TimeScale> {
        self.scale.as_ref()
    }

    /// Cutoff instant for a slider position; control is clamped to 0..=100.
    ///
    /// The ends map exactly onto the earliest and latest commit.
    pub fn cutoff_at(&self, control: f64) -> Option<Instant> {
        let scale = self.scale.as_ref()?;
        let control = clamp_control(control);
        let (start, end) = scale.domain();
        Some(if control <= CONTROL_MIN {
            start
        } else if control >= CONTROL_MAX {
            end
        } else {
            scale.invert(control)
        })
    }

    /// Slider position that reproduces `cutoff`, clamped to 0..=100.
    pub fn control_at(&self, cutoff: &Instant) -> f64 {
        match &self.scale {
            Some(scale) if scale.span_ms() > 0 => clamp_control(scale.scale(cutoff)),
            _ => CONTROL_MAX,
        }
    }

    /// Cutoff bound to narrative step `step`; indices past the end clamp to
    /// the last commit.
    pub fn step_cutoff(&self, step: usize) -> Option<Instant> {
        let last = self.commits.len().checked_sub(1)?;
        Some(self.commits[step.min(last)].datetime)
    }

    /// Commits at or before `cutoff`; `None` means no cutoff.
    pub fn visible(&self, cutoff: Option<&Instant>) -> Vec<&Commit> {
        match cutoff {
            Some(cutoff) => filter_until(&self.commits, cutoff),
            None => self.commits.iter().collect(),
        }
    }

    /// Narrative step `index`, or `None` past the last commit.
    pub fn step(&self, index: usize) -> Option<Step> {
        let commit = self.commits.get(index)?;
        Some(Step {
            index,
            commit: commit.id.clone(),
            cutoff: commit.datetime,
            text: step_text(index, commit),
        })
    }

    pub fn narrative(&self) -> Vec<Step> {
        (0..self.commits.len()).filter_map(|i| self.step(i)).collect()
    }
}

/// Commits with `datetime <= cutoff`, in input order. Inclusive boundary.
pub fn filter_until<'a>(commits: &'a [Commit], cutoff: &Instant) -> Vec<&'a Commit> {
    commits.iter().filter(|c| c.datetime <= *cutoff).collect()
}

fn clamp_control(control: f64) -> f64 {
    if control.is_nan() {
        CONTROL_MAX
    } else {
        control.clamp(CONTROL_MIN, CONTROL_MAX)
    }
}

fn step_text(index: usize, commit: &Commit) -> String {
    let when = commit.datetime.format("%b %-d, %Y at %-I:%M %p");
    let who = if commit.author.is_empty() { "someone" } else { commit.author.as_str() };
    let what = if index == 0 { "the first commit" } else { "another commit" };
    let files = commit.file_count();
    format!(
        "On {when}, {who} made {what}: {} {} edited across {} {}.",
        commit.total_lines,
        if commit.total_lines == 1 { "line" } else { "lines" },
        files,
        if files == 1 { "file" } else { "files" },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commits::fixtures::row;
    use crate::commits::group_commits;
    use pretty_assertions::assert_eq;

    fn at(s: &str) -> Instant {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn timeline() -> Timeline {
        Timeline::new(group_commits(
            vec![
                row("c", "x.js", 1, "2024-01-11T00:00:00Z"),
                row("a", "x.js", 2, "2024-01-01T00:00:00Z"),
                row("b", "y.js", 1, "2024-01-06T00:00:00Z"),
                row("a", "y.js", 2, "2024-01-01T00:00:00Z"),
            ],
            None,
        ))
    }

    fn ids(commits: &[&Commit]) -> Vec<String> {
        commits.iter().map(|c| c.id.clone()).collect()
    }

    #[test]
    fn control_100_shows_everything() {
        let tl = timeline();
        let cutoff = tl.cutoff_at(100.0).unwrap();
        assert_eq!(ids(&tl.visible(Some(&cutoff))), vec!["a", "b", "c"]);
    }

    #[test]
    fn control_0_cuts_at_earliest_instant_inclusively() {
        let tl = timeline();
        let cutoff = tl.cutoff_at(0.0).unwrap();
        assert_eq!(cutoff, at("2024-01-01T00:00:00Z"));
        assert_eq!(ids(&tl.visible(Some(&cutoff))), vec!["a"]);
    }

    #[test]
    fn commit_just_after_cutoff_is_excluded() {
        let commits = group_commits(
            vec![
                row("a", "x.js", 1, "2024-01-01T00:00:00Z"),
                row("b", "x.js", 2, "2024-01-01T00:00:00.001Z"),
            ],
            None,
        );
        let cutoff = at("2024-01-01T00:00:00Z");
        assert_eq!(ids(&filter_until(&commits, &cutoff)), vec!["a"]);
    }

    #[test]
    fn midpoint_interpolates_linearly() {
        let tl = timeline();
        let cutoff = tl.cutoff_at(50.0).unwrap();
        assert_eq!(cutoff, at("2024-01-06T00:00:00Z"));
        assert_eq!(ids(&tl.visible(Some(&cutoff))), vec!["a", "b"]);
    }

    #[test]
    fn out_of_range_controls_clamp() {
        let tl = timeline();
        assert_eq!(tl.cutoff_at(-5.0), tl.cutoff_at(0.0));
        assert_eq!(tl.cutoff_at(250.0), tl.cutoff_at(100.0));
        assert_eq!(tl.cutoff_at(f64::NAN), tl.cutoff_at(100.0));
    }

    #[test]
    fn control_at_inverts_cutoff_at() {
        let tl = timeline();
        for control in [0.0, 25.0, 50.0, 80.0, 100.0] {
            let cutoff = tl.cutoff_at(control).unwrap();
            assert!((tl.control_at(&cutoff) - control).abs() < 1e-6);
        }
    }

    #[test]
    fn step_cutoff_follows_commit_order_and_clamps() {
        let tl = timeline();
        assert_eq!(tl.step_cutoff(1), Some(at("2024-01-06T00:00:00Z")));
        assert_eq!(tl.step_cutoff(99), Some(at("2024-01-11T00:00:00Z")));
        let cutoff = tl.step_cutoff(1).unwrap();
        assert_eq!(tl.control_at(&cutoff), 50.0);
    }

    #[test]
    fn single_instant_domain_is_degenerate_but_total() {
        let tl = Timeline::new(group_commits(
            vec![row("a", "x.js", 1, "2024-01-01T00:00:00Z")],
            None,
        ));
        let cutoff = tl.cutoff_at(37.0).unwrap();
        assert_eq!(tl.visible(Some(&cutoff)).len(), 1);
        assert_eq!(tl.control_at(&cutoff), 100.0);
    }

    #[test]
    fn empty_timeline_has_no_cutoff() {
        let tl = Timeline::new(Vec::new());
        assert!(tl.cutoff_at(50.0).is_none());
        assert!(tl.step_cutoff(0).is_none());
        assert!(tl.visible(None).is_empty());
    }

    #[test]
    fn narrative_has_one_step_per_commit() {
        let steps = timeline().narrative();
        assert_eq!(steps.len(), 3);
        assert!(steps[0].text.contains("first commit"));
        assert!(steps[0].text.contains("2 lines edited across 2 files"));
        assert!(steps[2].text.contains("another commit"));
    }

    #[test]
    fn single_step_matches_the_narrative() {
        let tl = timeline();
        let steps = tl.narrative();
        let one = tl.step(1).unwrap();
        assert_eq!(one.commit, steps[1].commit);
        assert_eq!(one.text, steps[1].text);
        assert!(tl.step(3).is_none());
    }

    #[test]
    fn summary_covers_every_commit() {
        let tl = timeline();
        assert_eq!(tl.summary().commits, 3);
        assert_eq!(Timeline::new(Vec::new()).summary().commits, 0);
    }

    #[test]
    fn scale_maps_domain_onto_range() {
        let scale = TimeScale::new(
            (at("2024-01-01T00:00:00Z"), at("2024-01-02T00:00:00Z")),
            (20.0, 990.0),
        );
        assert_eq!(scale.scale(&at("2024-01-01T00:00:00Z")), 20.0);
        assert_eq!(scale.scale(&at("2024-01-02T00:00:00Z")), 990.0);
        assert_eq!(scale.invert(505.0), at("2024-01-01T12:00:00Z"));
    }
}
