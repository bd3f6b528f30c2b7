use crate::error::Result;
use crate::fetch::{FetchJson, Source};
use crate::model::Row;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use std::fs::File;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Rows that survived parsing plus how many were discarded.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub rows: Vec<Row>,
    pub dropped: usize,
}

#[derive(Error, Debug)]
enum DropReason {
    #[error("missing commit id")]
    MissingCommit,
    #[error("missing file path")]
    MissingFile,
    #[error("line number {0:?} is not a positive integer")]
    BadLine(String),
    #[error("unparseable date {0:?}")]
    BadDate(String),
    #[error("malformed record: {0}")]
    Malformed(String),
}

/// Column positions resolved once from the header record.
struct Columns {
    commit: Option<usize>,
    file: [Option<usize>; 3],
    line: Option<usize>,
    depth: Option<usize>,
    length: Option<usize>,
    date: Option<usize>,
    datetime: Option<usize>,
    timezone: Option<usize>,
    author: Option<usize>,
    kind: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        Self {
            commit: find("commit"),
            file: [find("file"), find("path"), find("filepath")],
            line: find("line"),
            depth: find("depth"),
            length: find("length"),
            date: find("date"),
            datetime: find("datetime"),
            timezone: find("timezone"),
            author: find("author"),
            kind: find("type"),
        }
    }

    fn parse(&self, record: &csv::StringRecord) -> std::result::Result<Row, DropReason> {
        let get = |idx: Option<usize>| idx.and_then(|i| record.get(i)).unwrap_or("").trim();

        let commit = get(self.commit);
        if commit.is_empty() {
            return Err(DropReason::MissingCommit);
        }

        let file = self
            .file
            .iter()
            .map(|&idx| get(idx))
            .find(|f| !f.is_empty())
            .ok_or(DropReason::MissingFile)?;

        let raw_line = get(self.line);
        let line = parse_line_number(raw_line).ok_or_else(|| DropReason::BadLine(raw_line.to_string()))?;

        let timezone = Some(get(self.timezone))
            .filter(|tz| !tz.is_empty())
            .map(str::to_string);
        let offset = timezone.as_deref().and_then(parse_offset);

        let raw_date = get(self.date);
        let raw_datetime = get(self.datetime);
        let explicit = if raw_datetime.is_empty() {
            None
        } else {
            let parsed = parse_datetime(raw_datetime, offset);
            if parsed.is_none() {
                tracing::debug!(datetime = raw_datetime, "unparseable datetime, using date at midday");
            }
            parsed
        };

        let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
            .ok()
            .or_else(|| explicit.map(|dt| dt.date_naive()))
            .ok_or_else(|| DropReason::BadDate(raw_date.to_string()))?;

        let datetime = match explicit {
            Some(dt) => dt,
            None => midday(date, offset).ok_or_else(|| DropReason::BadDate(raw_date.to_string()))?,
        };

        let kind = match get(self.kind) {
            "" => kind_from_path(file),
            k => k.to_string(),
        };

        Ok(Row {
            commit: commit.to_string(),
            file: file.to_string(),
            line,
            depth: parse_count(get(self.depth)),
            length: parse_count(get(self.length)),
            date,
            datetime,
            timezone,
            author: get(self.author).to_string(),
            kind,
        })
    }
}

/// Parse `loc.csv` rows from any reader, dropping rows that cannot be placed
/// on the timeline instead of failing the whole load.
pub fn load_rows<R: io::Read>(reader: R) -> Result<LoadReport> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let columns = Columns::from_headers(&headers);
    if columns.commit.is_none() {
        tracing::warn!("row source has no `commit` column; every row will be dropped");
    }

    let mut report = LoadReport::default();
    for (idx, record) in rdr.records().enumerate() {
        let parsed = match record {
            Ok(record) => columns.parse(&record),
            Err(err) if matches!(err.kind(), csv::ErrorKind::Io(_)) => return Err(err.into()),
            Err(err) => Err(DropReason::Malformed(err.to_string())),
        };
        match parsed {
            Ok(row) => report.rows.push(row),
            Err(reason) => {
                report.dropped += 1;
                // header is record 1
                tracing::debug!(record = idx + 2, %reason, "dropping row");
            }
        }
    }

    tracing::info!(rows = report.rows.len(), dropped = report.dropped, "loaded rows");
    Ok(report)
}

pub fn load_path<P: AsRef<Path>>(path: P) -> Result<LoadReport> {
    load_rows(File::open(path)?)
}

pub fn load_source(source: &Source, fetcher: &dyn FetchJson) -> Result<LoadReport> {
    match source {
        Source::Path(path) => load_path(path),
        Source::Url(_) => {
            let text = source.read_to_string(fetcher)?;
            load_rows(text.as_bytes())
        }
    }
}

fn parse_line_number(raw: &str) -> Option<u32> {
    let value: f64 = raw.parse().ok()?;
    if !value.is_finite() || value < 1.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
        return None;
    }
    Some(value as u32)
}

fn parse_count(raw: &str) -> u32 {
    if let Ok(v) = raw.parse::<u32>() {
        return v;
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v.min(u32::MAX as f64) as u32,
        _ => 0,
    }
}

/// Accepts `Z`, `+HH`, `+HHMM` and `+HH:MM`.
pub fn parse_offset(raw: &str) -> Option<FixedOffset> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0);
    }
    let sign = match raw.chars().next()? {
        '+' => 1,
        '-' => -1,
        _ => return None,
    };
    let digits: String = raw[1..].chars().filter(|c| *c != ':').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes): (i32, i32) = match digits.len() {
        1 | 2 => (digits.parse().ok()?, 0),
        4 => (digits[..2].parse().ok()?, digits[2..].parse().ok()?),
        _ => return None,
    };
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// RFC 3339 first, then naive forms interpreted in `offset` (UTC if none).
pub fn parse_datetime(raw: &str, offset: Option<FixedOffset>) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S %z") {
        return Some(dt);
    }

    let offset = offset.or_else(|| FixedOffset::east_opt(0))?;
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .and_then(|naive| offset.from_local_datetime(&naive).single())
}

fn midday(date: NaiveDate, offset: Option<FixedOffset>) -> Option<DateTime<FixedOffset>> {
    let offset = offset.or_else(|| FixedOffset::east_opt(0))?;
    let naive = date.and_hms_opt(12, 0, 0)?;
    offset.from_local_datetime(&naive).single()
}

fn kind_from_path(file: &str) -> String {
    Path::new(file)
        .extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_else(|| "unknown".to_string())
}
