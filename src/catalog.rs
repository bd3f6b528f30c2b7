use crate::cli::CommonArgs;
use crate::fetch::{FetchJson, HttpFetcher, Source};
use crate::model::{PieOutput, ProjectsOutput, SCHEMA_VERSION};
use crate::projects::{latest, load_projects, Project, LOAD_FAILED};
use crate::state::FilterState;
use crate::view::ProjectView;
use chrono::Utc;
use console::style;

/// Catalogue, or an empty list plus the failure message when it can't be read.
fn load_or_empty(source: &Source, fetcher: &dyn FetchJson, quiet: bool) -> Vec<Project> {
    match load_projects(source, fetcher) {
        Ok(projects) => projects,
        Err(err) => {
            tracing::warn!(%source, %err, "could not load project catalogue");
            if !quiet {
                eprintln!("{}", style(LOAD_FAILED).red());
            }
            Vec::new()
        }
    }
}

fn filter_state(search: Option<String>, year: Option<&str>) -> FilterState {
    let state = FilterState::default().with_query(search.unwrap_or_default());
    match year {
        Some(year) => state.toggle_year(year),
        None => state,
    }
}

pub fn projects(
    common: &CommonArgs,
    search: Option<String>,
    year: Option<String>,
    latest_n: Option<usize>,
    json: bool,
) -> anyhow::Result<()> {
    let source = Source::parse(&common.projects);
    let mut all = load_or_empty(&source, &HttpFetcher::new(), json);
    if let Some(n) = latest_n {
        all.truncate(latest(&all, n).len());
    }

    let state = filter_state(search, year.as_deref());
    let view = ProjectView::build(&all, &state);

    if json {
        let output = ProjectsOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            source: source.to_string(),
            query: &state.query,
            year: state.selected_year.as_deref(),
            title: &view.title,
            projects: &view.cards,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", style(&view.title).bold());
    println!("{}", "─".repeat(60));
    for card in &view.cards {
        match &card.year {
            Some(year) => println!("{} {}", style(&card.heading).cyan().bold(), style(year).dim()),
            None => println!("{}", style(&card.heading).cyan().bold()),
        }
        println!("  {}", card.description);
        println!("  {}", style(&card.image).dim());
        if let Some(url) = &card.url {
            println!("  {}", style(url).underlined());
        }
        println!();
    }
    Ok(())
}

pub fn pie(common: &CommonArgs, search: Option<String>, json: bool) -> anyhow::Result<()> {
    let source = Source::parse(&common.projects);
    let all = load_or_empty(&source, &HttpFetcher::new(), json);
    let state = filter_state(search, None);
    let view = ProjectView::build(&all, &state);

    if json {
        let output = PieOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            source: source.to_string(),
            query: &state.query,
            slices: &view.slices,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if view.slices.is_empty() {
        println!("No projects to chart");
        return Ok(());
    }

    let total: usize = view.slices.iter().map(|s| s.count).sum();
    println!("{}", style("Projects per year").bold());
    println!("{}", "─".repeat(40));
    for slice in &view.slices {
        let share = slice.count as f64 / total as f64;
        let bar = "█".repeat((share * 30.0).round() as usize);
        println!(
            "{:<10} {:>4} {:>6.1}% {} {}",
            slice.label,
            slice.count,
            share * 100.0,
            style(bar).green(),
            style(&slice.color).dim()
        );
    }
    Ok(())
}
