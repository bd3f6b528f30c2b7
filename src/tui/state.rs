use crate::state::FilterState;
use crate::store::ColorScheme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Meta,
    Files,
    Projects,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Meta, Tab::Files, Tab::Projects];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Meta => "Meta",
            Tab::Files => "Files",
            Tab::Projects => "Projects",
        }
    }

    pub fn index(self) -> usize {
        Tab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

pub struct TuiState {
    pub tab: Tab,
    pub filter: FilterState,
    pub theme: ColorScheme,
    pub show_help: bool,
    pub search_mode: bool,
    /// Cursor into the year legend of the Projects tab.
    pub legend_selected: usize,
    pub projects_error: Option<String>,
    pub status_message: Option<(String, std::time::Instant)>,
}

impl TuiState {
    pub fn new(theme: ColorScheme) -> Self {
        Self {
            tab: Tab::Meta,
            filter: FilterState::default(),
            theme,
            show_help: false,
            search_mode: false,
            legend_selected: 0,
            projects_error: None,
            status_message: None,
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), std::time::Instant::now()));
    }

    /// Status line text, dropped once it is a few seconds old.
    pub fn current_status(&self) -> Option<&str> {
        self.status_message
            .as_ref()
            .filter(|(_, at)| at.elapsed() < std::time::Duration::from_secs(4))
            .map(|(msg, _)| msg.as_str())
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new(ColorScheme::default())
    }
}
