use crate::model::{Row, Summary};
use std::collections::{HashMap, HashSet};

/// Headline counters over the full row set. Empty input yields all zeros.
pub fn summarize(rows: &[Row]) -> Summary {
    summarize_rows(rows)
}

/// Same counters over any borrowed row sequence, e.g. the rows of the
/// commits currently visible.
pub fn summarize_rows<'a, I>(rows: I) -> Summary
where
    I: IntoIterator<Item = &'a Row>,
{
    let mut commits: HashSet<&str> = HashSet::new();
    let mut lines_per_file: HashMap<&str, u32> = HashMap::new();
    let mut summary = Summary::default();

    for row in rows {
        commits.insert(row.commit.as_str());
        let max = lines_per_file.entry(row.file.as_str()).or_insert(0);
        *max = (*max).max(row.line);

        summary.total_loc += 1;
        summary.max_depth = summary.max_depth.max(row.depth);
        summary.longest_line = summary.longest_line.max(row.length);
        summary.first = Some(summary.first.map_or(row.datetime, |t| t.min(row.datetime)));
        summary.last = Some(summary.last.map_or(row.datetime, |t| t.max(row.datetime)));
    }

    summary.commits = commits.len();
    summary.files = lines_per_file.len();
    summary.max_lines = lines_per_file.values().copied().max().unwrap_or(0);
    summary
}

/// Wall-clock span covered by the summary, if any.
pub fn history_span(summary: &Summary) -> Option<std::time::Duration> {
    let (first, last) = (summary.first?, summary.last?);
    (last - first).to_std().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commits::fixtures::{row, simple};
    use pretty_assertions::assert_eq;

    #[test]
    fn two_line_example() {
        let rows = vec![simple("a", "x.js", 1, 1, 10), simple("a", "x.js", 2, 1, 5)];
        let summary = summarize(&rows);
        assert_eq!(summary.commits, 1);
        assert_eq!(summary.files, 1);
        assert_eq!(summary.total_loc, 2);
        assert_eq!(summary.max_depth, 1);
        assert_eq!(summary.longest_line, 10);
        assert_eq!(summary.max_lines, 2);
    }

    #[test]
    fn empty_rows_give_zeroes() {
        assert_eq!(summarize(&[]), Summary::default());
    }

    #[test]
    fn max_lines_is_the_largest_per_file_maximum() {
        let rows = vec![
            simple("a", "x.js", 3, 0, 1),
            simple("a", "x.js", 40, 0, 1),
            simple("b", "y.js", 12, 4, 80),
            simple("c", "z.css", 7, 2, 3),
        ];
        let summary = summarize(&rows);
        assert_eq!(summary.commits, 3);
        assert_eq!(summary.files, 3);
        assert_eq!(summary.max_lines, 40);
        assert_eq!(summary.max_depth, 4);
        assert_eq!(summary.longest_line, 80);
    }

    #[test]
    fn span_covers_first_to_last_instant() {
        let rows = vec![
            row("a", "x.js", 1, "2024-01-01T00:00:00Z"),
            row("b", "x.js", 2, "2024-01-03T00:00:00Z"),
        ];
        let span = history_span(&summarize(&rows)).unwrap();
        assert_eq!(span.as_secs(), 2 * 24 * 3600);
        assert_eq!(history_span(&Summary::default()), None);
    }
}
