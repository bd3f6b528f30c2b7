use crate::error::{FolioError, Result};
use crate::fetch::{FetchJson, Source};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

pub const UNTITLED: &str = "Untitled Project";
pub const NO_DESCRIPTION: &str = "No description available.";
pub const PLACEHOLDER_IMAGE: &str = "images/placeholder.svg";
pub const UNKNOWN_YEAR: &str = "Unknown";
pub const LOAD_FAILED: &str = "Could not load projects.";

/// Tableau10, indexed by wedge position.
pub const PALETTE: [&str; 10] = [
    "#4e79a7", "#f28e2c", "#e15759", "#76b7b2", "#59a14f", "#edc949", "#af7aa1", "#ff9da7",
    "#9c755f", "#bab0ab",
];

/// A catalogue entry. Every field is optional; unknown fields are kept so
/// search sees them too.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Project {
    /// Year as a comparable string; absent or null years are `"Unknown"`.
    pub fn year_key(&self) -> String {
        match &self.year {
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => UNKNOWN_YEAR.to_string(),
        }
    }

    fn search_text(&self) -> String {
        let named = [
            self.title.as_ref().map(|s| Value::String(s.clone())),
            self.image.as_ref().map(|s| Value::String(s.clone())),
            self.description.as_ref().map(|s| Value::String(s.clone())),
            self.year.clone(),
            self.url.as_ref().map(|s| Value::String(s.clone())),
        ];
        named
            .into_iter()
            .flatten()
            .chain(self.extra.values().cloned())
            .map(|v| match v {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n")
            .to_lowercase()
    }

    /// Case-insensitive substring match over all field values.
    pub fn matches(&self, query: &str) -> bool {
        query.is_empty() || self.search_text().contains(&query.to_lowercase())
    }
}

pub fn parse_projects(text: &str) -> Result<Vec<Project>> {
    match serde_json::from_str::<Value>(text)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<Project>(item) {
                Ok(project) => Some(project),
                Err(err) => {
                    tracing::debug!(%err, "skipping malformed project");
                    None
                }
            })
            .collect()),
        _ => Err(FolioError::Parse("projects document is not a JSON array".to_string())),
    }
}

pub fn load_projects(source: &Source, fetcher: &dyn FetchJson) -> Result<Vec<Project>> {
    let text = source.read_to_string(fetcher)?;
    parse_projects(&text)
}

pub fn search<'a>(projects: &'a [Project], query: &str) -> Vec<&'a Project> {
    projects.iter().filter(|p| p.matches(query)).collect()
}

/// Projects matching the query and, when one is selected, the year.
pub fn visible<'a>(projects: &'a [Project], query: &str, year: Option<&str>) -> Vec<&'a Project> {
    projects
        .iter()
        .filter(|p| p.matches(query))
        .filter(|p| year.map_or(true, |y| p.year_key() == y))
        .collect()
}

/// The first `n` projects, as the home page shows them.
pub fn latest(projects: &[Project], n: usize) -> &[Project] {
    &projects[..n.min(projects.len())]
}

/// Numeric years ascending, then anything else lexicographically.
pub fn compare_year_keys(a: &str, b: &str) -> Ordering {
    let num = |s: &str| s.parse::<f64>().ok().filter(|v| v.is_finite());
    match (num(a), num(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

pub fn group_by_year(projects: &[&Project]) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for project in projects {
        *counts.entry(project.year_key()).or_insert(0) += 1;
    }
    let mut groups: Vec<_> = counts.into_iter().collect();
    groups.sort_by(|a, b| compare_year_keys(&a.0, &b.0));
    groups
}

/// One wedge and legend entry of the year pie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSlice {
    pub label: String,
    pub count: usize,
    pub start_angle: f64,
    pub end_angle: f64,
    pub color: String,
    pub selected: bool,
}

/// Wedges laid out clockwise from 0 in group order, sized by count.
pub fn pie(projects: &[&Project], selected: Option<&str>) -> Vec<YearSlice> {
    let groups = group_by_year(projects);
    let total: usize = groups.iter().map(|(_, n)| n).sum();
    let mut angle = 0.0;
    groups
        .into_iter()
        .enumerate()
        .map(|(i, (label, count))| {
            let sweep = if total == 0 {
                0.0
            } else {
                std::f64::consts::TAU * count as f64 / total as f64
            };
            let slice = YearSlice {
                selected: selected == Some(label.as_str()),
                label,
                count,
                start_angle: angle,
                end_angle: angle + sweep,
                color: PALETTE[i % PALETTE.len()].to_string(),
            };
            angle += sweep;
            slice
        })
        .collect()
}

/// Display form of a project with fallbacks filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectCard {
    pub heading: String,
    pub image: String,
    pub description: String,
    pub year: Option<String>,
    pub url: Option<String>,
}

impl From<&Project> for ProjectCard {
    fn from(p: &Project) -> Self {
        let non_empty = |s: &Option<String>| s.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);
        Self {
            heading: non_empty(&p.title).unwrap_or_else(|| UNTITLED.to_string()),
            image: non_empty(&p.image).unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            description: non_empty(&p.description).unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            year: p.year.as_ref().map(|_| p.year_key()),
            url: non_empty(&p.url),
        }
    }
}

pub fn title_line(count: usize) -> String {
    format!("{count} Projects")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn catalogue() -> Vec<Project> {
        parse_projects(
            &json!([
                {"title": "A", "year": 2023},
                {"title": "B", "year": 2024},
                {"title": "C", "year": "2023", "tags": ["rust"]},
                {"description": "no year"},
            ])
            .to_string(),
        )
        .unwrap()
    }

    fn titles(projects: &[&Project]) -> Vec<String> {
        projects.iter().map(|p| ProjectCard::from(*p).heading).collect()
    }

    #[test]
    fn search_matches_any_field_value() {
        let projects = parse_projects(r#"[{"title":"A","year":2023},{"title":"B","year":2024}]"#).unwrap();
        assert_eq!(titles(&search(&projects, "2023")), vec!["A"]);
    }

    #[test]
    fn search_is_case_insensitive_and_sees_extra_fields() {
        let projects = catalogue();
        assert_eq!(titles(&search(&projects, "RUST")), vec!["C"]);
        assert_eq!(titles(&search(&projects, "")).len(), 4);
    }

    #[test]
    fn year_toggle_composes_with_query() {
        let projects = catalogue();
        assert_eq!(titles(&visible(&projects, "", Some("2023"))), vec!["A", "C"]);
        assert_eq!(titles(&visible(&projects, "c", Some("2023"))), vec!["C"]);
        assert_eq!(titles(&visible(&projects, "", None)).len(), 4);
    }

    #[test]
    fn numbers_and_strings_share_a_year_key() {
        let projects = catalogue();
        let refs: Vec<&Project> = projects.iter().collect();
        assert_eq!(
            group_by_year(&refs),
            vec![
                ("2023".to_string(), 2),
                ("2024".to_string(), 1),
                (UNKNOWN_YEAR.to_string(), 1)
            ]
        );
    }

    #[test]
    fn year_keys_sort_numeric_first_then_lexicographic() {
        let mut keys = vec!["Unknown", "2024", "2019", "TBD", "2100"];
        keys.sort_by(|a, b| compare_year_keys(a, b));
        assert_eq!(keys, vec!["2019", "2024", "2100", "TBD", "Unknown"]);
    }

    #[test]
    fn pie_wedges_cover_the_circle() {
        let projects = catalogue();
        let refs: Vec<&Project> = projects.iter().collect();
        let slices = pie(&refs, Some("2024"));
        assert_eq!(slices.len(), 3);
        assert_eq!(slices[0].start_angle, 0.0);
        assert!((slices[2].end_angle - std::f64::consts::TAU).abs() < 1e-9);
        assert!(slices[1].selected && !slices[0].selected);
        assert_eq!(slices[0].color, PALETTE[0]);
        assert!(pie(&[], None).is_empty());
    }

    #[test]
    fn cards_fall_back_for_missing_fields() {
        let card = ProjectCard::from(&Project::default());
        assert_eq!(card.heading, UNTITLED);
        assert_eq!(card.description, NO_DESCRIPTION);
        assert_eq!(card.image, PLACEHOLDER_IMAGE);
        assert_eq!(card.year, None);
    }

    #[test]
    fn latest_takes_at_most_n() {
        let projects = catalogue();
        assert_eq!(latest(&projects, 3).len(), 3);
        assert_eq!(latest(&projects, 10).len(), 4);
        assert_eq!(title_line(3), "3 Projects");
    }

    #[test]
    fn non_array_documents_are_rejected() {
        assert!(matches!(parse_projects("{}"), Err(FolioError::Parse(_))));
        assert!(matches!(parse_projects("[oops"), Err(FolioError::Serde(_))));
    }
}
