use crate::projects::{ProjectCard, YearSlice};
use crate::selection::{Brush, LanguageShare, PlotArea};
use crate::timeline::Step;
use crate::units::FileUnits;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// One changed source line as recorded in `loc.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub commit: String,
    pub file: String,
    pub line: u32,
    pub depth: u32,
    pub length: u32,
    pub date: NaiveDate,
    pub datetime: DateTime<FixedOffset>,
    pub timezone: Option<String>,
    pub author: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// All rows sharing one commit identifier.
///
/// `lines` is owned by the commit and skipped by serde, so JSON output only
/// carries the per-commit summary fields. Read it through [`Commit::lines`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commit {
    pub id: String,
    pub url: Option<String>,
    pub author: String,
    pub date: NaiveDate,
    pub datetime: DateTime<FixedOffset>,
    pub hour_frac: f64,
    pub total_lines: usize,
    #[serde(skip)]
    pub(crate) lines: Vec<Row>,
}

impl Commit {
    pub fn lines(&self) -> &[Row] {
        &self.lines
    }

    pub fn short_id(&self) -> String {
        self.id.chars().take(8).collect()
    }

    /// Number of distinct files touched by this commit.
    pub fn file_count(&self) -> usize {
        let mut files: Vec<&str> = self.lines.iter().map(|r| r.file.as_str()).collect();
        files.sort_unstable();
        files.dedup();
        files.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub commits: usize,
    pub files: usize,
    pub total_loc: usize,
    pub max_depth: u32,
    pub longest_line: u32,
    pub max_lines: u32,
    pub first: Option<DateTime<FixedOffset>>,
    pub last: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub dropped_rows: usize,
    pub summary: Summary,
}

#[derive(Debug, Serialize)]
pub struct CommitsOutput<'a> {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub control: f64,
    pub cutoff: Option<DateTime<FixedOffset>>,
    pub commits: &'a [&'a Commit],
}

#[derive(Debug, Serialize)]
pub struct SelectionOutput<'a> {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub area: PlotArea,
    pub brush: Brush,
    pub cutoff: Option<DateTime<FixedOffset>>,
    pub selection: String,
    pub selected: &'a [&'a Commit],
    pub breakdown: &'a [LanguageShare],
}

#[derive(Debug, Serialize)]
pub struct UnitsOutput<'a> {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub cutoff: Option<DateTime<FixedOffset>>,
    pub files: &'a [FileUnits],
}

#[derive(Debug, Serialize)]
pub struct StoryOutput<'a> {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub steps: &'a [Step],
}

#[derive(Debug, Serialize)]
pub struct ProjectsOutput<'a> {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub query: &'a str,
    pub year: Option<&'a str>,
    pub title: &'a str,
    pub projects: &'a [ProjectCard],
}

#[derive(Debug, Serialize)]
pub struct PieOutput<'a> {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub query: &'a str,
    pub slices: &'a [YearSlice],
}
