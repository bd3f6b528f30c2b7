use crate::model::{Commit, Row};
use chrono::Timelike;
use std::collections::HashMap;

/// Group rows by commit id, keeping the order in which ids first appear.
///
/// Each commit takes author, date and datetime from its first row and owns
/// every row carrying its id. When `repo_url` is set, commits link to
/// `<repo_url>/commit/<id>`.
pub fn group_commits<I>(rows: I, repo_url: Option<&str>) -> Vec<Commit>
where
    I: IntoIterator<Item = Row>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Vec<Row>> = Vec::new();

    for row in rows {
        match index.get(&row.commit) {
            Some(&i) => groups[i].push(row),
            None => {
                index.insert(row.commit.clone(), groups.len());
                groups.push(vec![row]);
            }
        }
    }

    let base = repo_url.map(|u| u.trim_end_matches('/'));
    groups
        .into_iter()
        .filter_map(|lines| build_commit(lines, base))
        .collect()
}

fn build_commit(lines: Vec<Row>, repo_url: Option<&str>) -> Option<Commit> {
    let first = lines.first()?;
    let id = first.commit.clone();
    let author = first.author.clone();
    let date = first.date;
    let datetime = first.datetime;
    Some(Commit {
        url: repo_url.map(|base| format!("{base}/commit/{id}")),
        author,
        date,
        datetime,
        hour_frac: hour_fraction(&datetime),
        total_lines: lines.len(),
        id,
        lines,
    })
}

/// Hour of day as a real number, e.g. 14:30 is 14.5.
pub fn hour_fraction<T: Timelike>(t: &T) -> f64 {
    t.hour() as f64 + t.minute() as f64 / 60.0
}

/// Stable ascending sort by commit instant.
pub fn sort_by_datetime(commits: &mut [Commit]) {
    commits.sort_by(|a, b| a.datetime.cmp(&b.datetime));
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::model::Row;
    use chrono::{DateTime, NaiveDate};

    pub fn row(commit: &str, file: &str, line: u32, datetime: &str) -> Row {
        let datetime = DateTime::parse_from_rfc3339(datetime).unwrap();
        Row {
            commit: commit.to_string(),
            file: file.to_string(),
            line,
            depth: 0,
            length: 0,
            date: datetime.date_naive(),
            datetime,
            timezone: None,
            author: "u".to_string(),
            kind: file.rsplit('.').next().unwrap_or("").to_string(),
        }
    }

    pub fn simple(commit: &str, file: &str, line: u32, depth: u32, length: u32) -> Row {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        Row {
            depth,
            length,
            date,
            ..row(commit, file, line, "2024-01-01T12:00:00Z")
        }
    }
}
