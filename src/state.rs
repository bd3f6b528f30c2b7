use crate::selection::Brush;
use crate::timeline::{Instant, Timeline, CONTROL_MAX};
use serde::{Deserialize, Serialize};

/// Snapshot of everything the user has dialled in.
///
/// Controllers never mutate a snapshot; each returns the next one, and the
/// views are re-derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub control: f64,
    pub cutoff: Option<Instant>,
    pub step: Option<usize>,
    pub brush: Option<Brush>,
    pub query: String,
    pub selected_year: Option<String>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            control: CONTROL_MAX,
            cutoff: None,
            step: None,
            brush: None,
            query: String::new(),
            selected_year: None,
        }
    }
}

impl FilterState {
    /// Slider moved.
    pub fn with_control(self, control: f64, timeline: &Timeline) -> Self {
        let cutoff = timeline.cutoff_at(control);
        let control = cutoff.map_or(CONTROL_MAX, |c| timeline.control_at(&c));
        Self {
            control,
            cutoff,
            step: None,
            ..self
        }
    }

    /// Narrative step scrolled into view; the slider follows.
    pub fn with_step(self, step: usize, timeline: &Timeline) -> Self {
        match timeline.step_cutoff(step) {
            Some(cutoff) => Self {
                control: timeline.control_at(&cutoff),
                cutoff: Some(cutoff),
                step: Some(step.min(timeline.commits().len().saturating_sub(1))),
                ..self
            },
            None => self,
        }
    }

    pub fn with_brush(self, brush: Option<Brush>) -> Self {
        Self { brush, ..self }
    }

    pub fn with_query(self, query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..self
        }
    }

    /// Select `year`, or clear the selection if it is already selected.
    pub fn toggle_year(self, year: &str) -> Self {
        let selected_year = match self.selected_year.as_deref() {
            Some(current) if current == year => None,
            _ => Some(year.to_string()),
        };
        Self {
            selected_year,
            ..self
        }
    }

    /// Back to showing everything.
    pub fn reset() -> Self {
        Self::default()
    }
}
