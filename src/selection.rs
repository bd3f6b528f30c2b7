use crate::model::Commit;
use crate::timeline::{Instant, TimeScale};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const HOURS_PER_DAY: f64 = 24.0;
pub const MIN_RADIUS: f64 = 2.0;
pub const MAX_RADIUS: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Pixel canvas of the scatter plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl Default for PlotArea {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
            margin: Margin {
                top: 10.0,
                right: 10.0,
                bottom: 30.0,
                left: 20.0,
            },
        }
    }
}

impl PlotArea {
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn left(&self) -> f64 {
        self.margin.left
    }

    pub fn right(&self) -> f64 {
        self.width - self.margin.right
    }

    pub fn top(&self) -> f64 {
        self.margin.top
    }

    pub fn bottom(&self) -> f64 {
        self.height - self.margin.bottom
    }
}

/// Rectangle in plot pixel space, corners normalised so `x0 <= x1`, `y0 <= y1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brush {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Brush {
    pub fn new(a: (f64, f64), b: (f64, f64)) -> Self {
        Self {
            x0: a.0.min(b.0),
            y0: a.1.min(b.1),
            x1: a.0.max(b.0),
            y1: a.1.max(b.1),
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.x0 <= x && x <= self.x1 && self.y0 <= y && y <= self.y1
    }

    /// Shift by `(dx, dy)`.
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self::new((self.x0 + dx, self.y0 + dy), (self.x1 + dx, self.y1 + dy))
    }

    /// Grow (or shrink, with negative deltas) the far corner.
    pub fn resized(self, dw: f64, dh: f64) -> Self {
        let x1 = (self.x1 + dw).max(self.x0);
        let y1 = (self.y1 + dh).max(self.y0);
        Self::new((self.x0, self.y0), (x1, y1))
    }
}

/// The scales a commit is drawn with: time across, hour of day down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotScales {
    pub area: PlotArea,
    x: Option<TimeScale>,
}

impl PlotScales {
    /// `commits` sets the x domain; usually every commit, so points keep
    /// their place while the timeline filter changes.
    pub fn new<'a, I>(commits: I, area: PlotArea) -> Self
    where
        I: IntoIterator<Item = &'a Commit>,
    {
        let x = TimeScale::over(commits, (area.left(), area.right()));
        Self { area, x }
    }

    pub fn x(&self, commit: &Commit) -> f64 {
        match &self.x {
            Some(scale) => scale.scale(&commit.datetime),
            None => self.area.left(),
        }
    }

    /// Midnight at the bottom, 24:00 at the top.
    pub fn y(&self, commit: &Commit) -> f64 {
        let (bottom, top) = (self.area.bottom(), self.area.top());
        bottom + (commit.hour_frac / HOURS_PER_DAY) * (top - bottom)
    }

    pub fn point(&self, commit: &Commit) -> (f64, f64) {
        (self.x(commit), self.y(commit))
    }

    pub fn x_domain(&self) -> Option<(Instant, Instant)> {
        self.x.as_ref().map(|s| s.domain())
    }
}

/// Whether `commit`'s plotted point falls inside the brush. No brush, no
/// selection.
pub fn is_commit_selected(brush: Option<&Brush>, scales: &PlotScales, commit: &Commit) -> bool {
    match brush {
        Some(brush) => {
            let (x, y) = scales.point(commit);
            brush.contains(x, y)
        }
        None => false,
    }
}

pub fn selected_commits<'a>(
    brush: Option<&Brush>,
    scales: &PlotScales,
    commits: &[&'a Commit],
) -> Vec<&'a Commit> {
    commits
        .iter()
        .copied()
        .filter(|c| is_commit_selected(brush, scales, c))
        .collect()
}

pub fn selection_text(selected: usize) -> String {
    match selected {
        0 => "No commits selected".to_string(),
        1 => "1 commit selected".to_string(),
        n => format!("{n} commits selected"),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageShare {
    pub kind: String,
    pub lines: usize,
    pub share: f64,
}

/// Lines per content type across the selected commits, largest first.
pub fn language_breakdown(selected: &[&Commit]) -> Vec<LanguageShare> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut total = 0usize;
    for commit in selected {
        for row in commit.lines() {
            *counts.entry(row.kind.as_str()).or_insert(0) += 1;
            total += 1;
        }
    }

    let mut shares: Vec<LanguageShare> = counts
        .into_iter()
        .map(|(kind, lines)| LanguageShare {
            kind: kind.to_string(),
            lines,
            share: lines as f64 / total as f64,
        })
        .collect();
    shares.sort_by(|a, b| b.lines.cmp(&a.lines).then_with(|| a.kind.cmp(&b.kind)));
    shares
}

/// Dot radius by square root of edited lines, so area tracks size.
pub fn radius(total_lines: usize, min_lines: usize, max_lines: usize) -> f64 {
    if max_lines <= min_lines {
        return (MIN_RADIUS + MAX_RADIUS) / 2.0;
    }
    let lo = (min_lines as f64).sqrt();
    let hi = (max_lines as f64).sqrt();
    let t = ((total_lines as f64).sqrt() - lo) / (hi - lo);
    MIN_RADIUS + t.clamp(0.0, 1.0) * (MAX_RADIUS - MIN_RADIUS)
}
