use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Commit timeline, project catalogue and profile analytics for a portfolio site")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, default_value = "loc.csv", help = "Per-line change table (path or http(s) URL)")]
    pub data: String,

    #[arg(long, default_value = "lib/projects.json", help = "Project catalogue (path or http(s) URL)")]
    pub projects: String,

    #[arg(long, help = "Directory holding the preference store (default: ./.folio)")]
    pub store: Option<PathBuf>,

    #[arg(long, help = "Repository web URL used to link commits, e.g. https://github.com/me/site")]
    pub repo_url: Option<String>,
}

#[derive(Args, Clone, Copy)]
pub struct PlotArgs {
    #[arg(long, default_value_t = 1000.0, help = "Plot width in pixels")]
    pub width: f64,

    #[arg(long, default_value_t = 600.0, help = "Plot height in pixels")]
    pub height: f64,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Headline counters over every row
    Summary {
        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Commits visible at a slider position or narrative step
    Commits {
        #[arg(long, help = "Slider position 0-100 (100 shows everything)")]
        at: Option<f64>,

        #[arg(long, conflicts_with = "at", help = "Narrative step index")]
        step: Option<usize>,

        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Commits inside a brush rectangle in plot pixel space
    Select {
        #[arg(long, allow_hyphen_values = true)]
        x0: f64,
        #[arg(long, allow_hyphen_values = true)]
        y0: f64,
        #[arg(long, allow_hyphen_values = true)]
        x1: f64,
        #[arg(long, allow_hyphen_values = true)]
        y1: f64,

        #[arg(long, help = "Slider position 0-100 applied before selecting")]
        at: Option<f64>,

        #[clap(flatten)]
        plot: PlotArgs,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Files and line units of the visible commits
    Units {
        #[arg(long, help = "Slider position 0-100")]
        at: Option<f64>,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Narrative, one step per commit
    Story {
        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Search and list projects
    Projects {
        #[arg(long, help = "Case-insensitive search across all fields")]
        search: Option<String>,

        #[arg(long, help = "Only projects from this year")]
        year: Option<String>,

        #[arg(long, help = "Show only the first N projects")]
        latest: Option<usize>,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Projects per year, as pie wedges
    Pie {
        #[arg(long, help = "Case-insensitive search across all fields")]
        search: Option<String>,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// GitHub profile counters
    Profile {
        #[arg(help = "GitHub username")]
        username: String,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Show or set the colour scheme preference (light, dark, auto)
    Theme {
        scheme: Option<String>,
    },
    /// Interactive terminal explorer
    #[command(alias = "tui", alias = "ui")]
    Explore,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        let common = self.common;
        match self.command {
            Commands::Summary { json } => crate::meta::summary(&common, json),
            Commands::Commits { at, step, json, ndjson } => {
                crate::meta::commits(&common, at, step, json, ndjson)
            }
            Commands::Select { x0, y0, x1, y1, at, plot, json } => {
                crate::meta::select(&common, (x0, y0), (x1, y1), at, plot, json)
            }
            Commands::Units { at, json } => crate::meta::units(&common, at, json),
            Commands::Story { json } => crate::meta::story(&common, json),
            Commands::Projects { search, year, latest, json } => {
                crate::catalog::projects(&common, search, year, latest, json)
            }
            Commands::Pie { search, json } => crate::catalog::pie(&common, search, json),
            Commands::Profile { username, json } => crate::profile::exec(&username, json),
            Commands::Theme { scheme } => crate::store::exec_theme(&common, scheme.as_deref()),
            Commands::Explore => crate::tui::run(&common).map_err(|e| anyhow::anyhow!(e)),
        }
    }
}
