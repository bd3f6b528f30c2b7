use super::load::Dataset;
use crate::model::{
    CommitsOutput, SelectionOutput, StoryOutput, SummaryOutput, UnitsOutput, SCHEMA_VERSION,
};
use crate::selection::{Brush, PlotArea};
use crate::summary::history_span;
use crate::timeline::Step;
use crate::view::MetaView;
use anyhow::Result;
use chrono::Utc;
use console::style;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M %:z";

pub fn output_summary_json(dataset: &Dataset) -> Result<()> {
    let output = SummaryOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        source: dataset.source.clone(),
        dropped_rows: dataset.dropped,
        summary: dataset.summary.clone(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn output_summary_table(dataset: &Dataset) {
    let s = &dataset.summary;
    println!("{}", style("Summary").bold());
    println!("{}", "─".repeat(40));
    println!("{:<16} {:>10}", "Commits", s.commits);
    println!("{:<16} {:>10}", "Files", s.files);
    println!("{:<16} {:>10}", "Total LOC", s.total_loc);
    println!("{:<16} {:>10}", "Max depth", s.max_depth);
    println!("{:<16} {:>10}", "Longest line", s.longest_line);
    println!("{:<16} {:>10}", "Max lines", s.max_lines);

    if let (Some(first), Some(last)) = (s.first, s.last) {
        println!();
        println!("{:<16} {}", "First commit", first.format(DATETIME_FORMAT));
        println!("{:<16} {}", "Last commit", last.format(DATETIME_FORMAT));
        if let Some(span) = history_span(s) {
            // Rounded down to whole days.
            let days = std::time::Duration::from_secs(span.as_secs() / 86_400 * 86_400);
            println!("{:<16} {}", "History", humantime::format_duration(days));
        }
    }

    if dataset.dropped > 0 {
        println!(
            "\n{}",
            style(format!("{} malformed rows skipped", dataset.dropped)).dim()
        );
    }
}

pub fn output_commits_json(dataset: &Dataset, view: &MetaView) -> Result<()> {
    let output = CommitsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        source: dataset.source.clone(),
        control: view.control,
        cutoff: view.cutoff,
        commits: &view.visible,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn output_commits_ndjson(view: &MetaView) -> Result<()> {
    for commit in &view.visible {
        println!("{}", serde_json::to_string(commit)?);
    }
    Ok(())
}

pub fn output_commits_table(view: &MetaView) {
    if let Some(cutoff) = view.cutoff {
        println!(
            "Showing commits until {} (slider {:.1})",
            style(cutoff.format(DATETIME_FORMAT)).cyan(),
            view.control
        );
    }
    if let Some(step) = &view.step {
        println!("{}", style(&step.text).italic());
    }

    if view.visible.is_empty() {
        println!("No commits to display");
        return;
    }

    println!(
        "{:<10} {:<20} {:<18} {:>6} {:>6}",
        style("Commit").bold(),
        style("When").bold(),
        style("Author").bold(),
        style("Lines").bold(),
        style("Files").bold()
    );
    println!("{}", "─".repeat(66));

    for commit in &view.visible {
        println!(
            "{:<10} {:<20} {:<18} {:>6} {:>6}",
            commit.short_id(),
            commit.datetime.format("%Y-%m-%d %H:%M"),
            truncate(&commit.author, 18),
            commit.total_lines,
            commit.file_count()
        );
    }

    println!("{}", "─".repeat(66));
    println!(
        "{} commits, {} lines across {} files",
        view.visible_summary.commits, view.visible_summary.total_loc, view.visible_summary.files
    );
}

pub fn output_selection_json(
    dataset: &Dataset,
    area: PlotArea,
    brush: Brush,
    view: &MetaView,
) -> Result<()> {
    let output = SelectionOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        source: dataset.source.clone(),
        area,
        brush,
        cutoff: view.cutoff,
        selection: view.selection_text.clone(),
        selected: &view.selected,
        breakdown: &view.breakdown,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn output_selection_table(brush: Brush, view: &MetaView) {
    println!(
        "Brush ({:.0}, {:.0}) to ({:.0}, {:.0})",
        brush.x0, brush.y0, brush.x1, brush.y1
    );
    println!("{}", style(&view.selection_text).bold());

    for commit in &view.selected {
        let target = commit.url.as_deref().unwrap_or(&commit.id);
        println!("  {} {}", style(commit.short_id()).cyan(), style(target).dim());
    }

    if view.breakdown.is_empty() {
        return;
    }
    println!("\n{}", style("Languages").bold());
    println!("{}", "─".repeat(40));
    for share in &view.breakdown {
        println!(
            "{:<12} {:>6} lines {:>6.1}%",
            share.kind,
            share.lines,
            share.share * 100.0
        );
    }
}

pub fn output_units_json(dataset: &Dataset, view: &MetaView) -> Result<()> {
    let output = UnitsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        source: dataset.source.clone(),
        cutoff: view.cutoff,
        files: &view.units,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn output_units_table(view: &MetaView) {
    if view.units.is_empty() {
        println!("No files to display");
        return;
    }

    println!("{}", style("Files by edited lines").bold());
    println!("{}", "─".repeat(60));

    let width = view.units.iter().map(|f| f.path.len()).max().unwrap_or(0).min(40);
    for file in &view.units {
        let dots = "•".repeat(file.lines.min(40));
        let kinds: Vec<String> = file.kinds.iter().map(|(k, n)| format!("{k}:{n}")).collect();
        println!(
            "{:<width$} {:>5} {} {}",
            truncate(&file.path, width),
            file.lines,
            style(dots).green(),
            style(kinds.join(" ")).dim(),
        );
    }
}

pub fn output_story_json(dataset: &Dataset, steps: &[Step]) -> Result<()> {
    let output = StoryOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        source: dataset.source.clone(),
        steps,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn output_story_table(steps: &[Step]) {
    if steps.is_empty() {
        println!("No commits to narrate");
        return;
    }
    for step in steps {
        println!("{:>4}  {}", style(step.index).dim(), step.text);
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("alice", 8), "alice");
        assert_eq!(truncate("a very long author", 8), "a very …");
    }
}
