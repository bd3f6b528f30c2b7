use crate::cli::CommonArgs;
use crate::commits::group_commits;
use crate::fetch::{FetchJson, Source};
use crate::loader::load_source;
use crate::model::Summary;
use crate::summary::summarize;
use crate::timeline::Timeline;
use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Rows loaded once and turned into the whole-repository summary plus the
/// commit timeline.
pub struct Dataset {
    pub source: String,
    pub dropped: usize,
    pub summary: Summary,
    pub timeline: Timeline,
}

pub fn load_dataset(
    common: &CommonArgs,
    fetcher: &dyn FetchJson,
    show_progress: bool,
) -> anyhow::Result<Dataset> {
    let source = Source::parse(&common.data);

    let pb = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    } else {
        ProgressBar::hidden()
    };
    pb.set_message(format!("Loading rows from {source}..."));

    let report = load_source(&source, fetcher)
        .with_context(|| format!("Failed to load rows from {source}"))?;

    let summary = summarize(&report.rows);
    let dropped = report.dropped;
    let commits = group_commits(report.rows, common.repo_url.as_deref());

    pb.finish_and_clear();
    if dropped > 0 {
        tracing::warn!(dropped, "skipped malformed rows");
    }

    Ok(Dataset {
        source: source.to_string(),
        dropped,
        summary,
        timeline: Timeline::new(commits),
    })
}
