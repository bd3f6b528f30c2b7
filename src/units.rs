use crate::model::Commit;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One file of the unit chart: a dot per edited line, grouped by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileUnits {
    pub path: String,
    pub lines: usize,
    /// `(kind, count)` in the order kinds first appear in this file.
    pub kinds: Vec<(String, usize)>,
}

/// Files touched by `commits`, biggest first (ties by path).
pub fn file_units(commits: &[&Commit]) -> Vec<FileUnits> {
    let mut by_file: HashMap<&str, Vec<(&str, usize)>> = HashMap::new();

    for row in commits.iter().flat_map(|c| c.lines()) {
        let kinds = by_file.entry(row.file.as_str()).or_default();
        match kinds.iter_mut().find(|(k, _)| *k == row.kind) {
            Some((_, n)) => *n += 1,
            None => kinds.push((row.kind.as_str(), 1)),
        }
    }

    let mut files: Vec<FileUnits> = by_file
        .into_iter()
        .map(|(path, kinds)| FileUnits {
            path: path.to_string(),
            lines: kinds.iter().map(|(_, n)| n).sum(),
            kinds: kinds.into_iter().map(|(k, n)| (k.to_string(), n)).collect(),
        })
        .collect();
    files.sort_by(|a, b| b.lines.cmp(&a.lines).then_with(|| a.path.cmp(&b.path)));
    files
}

/// Stable colour slot per kind, assigned in first-seen order across `files`.
pub fn kind_palette(files: &[FileUnits]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for (kind, _) in files.iter().flat_map(|f| &f.kinds) {
        if !seen.iter().any(|k| k == kind) {
            seen.push(kind.clone());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commits::fixtures::row;
    use crate::commits::group_commits;
    use pretty_assertions::assert_eq;

    #[test]
    fn files_are_sorted_by_line_count() {
        let commits = group_commits(
            vec![
                row("a", "style.css", 1, "2024-01-01T10:00:00Z"),
                row("a", "main.js", 1, "2024-01-01T10:00:00Z"),
                row("b", "main.js", 2, "2024-01-02T10:00:00Z"),
                row("b", "index.html", 1, "2024-01-02T10:00:00Z"),
            ],
            None,
        );
        let refs: Vec<&Commit> = commits.iter().collect();
        let files = file_units(&refs);
        let order: Vec<_> = files.iter().map(|f| (f.path.as_str(), f.lines)).collect();
        assert_eq!(order, vec![("main.js", 2), ("index.html", 1), ("style.css", 1)]);
        assert_eq!(files[0].kinds, vec![("js".to_string(), 2)]);
        assert_eq!(kind_palette(&files), vec!["js", "html", "css"]);
    }

    #[test]
    fn only_given_commits_contribute() {
        let commits = group_commits(
            vec![
                row("a", "main.js", 1, "2024-01-01T10:00:00Z"),
                row("b", "main.js", 2, "2024-01-02T10:00:00Z"),
            ],
            None,
        );
        let files = file_units(&[&commits[0]]);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].lines, 1);
        assert!(file_units(&[]).is_empty());
    }
}
