use assert_cmd::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

const LOC_CSV: &str = "\
commit,file,line,depth,length,date,datetime,timezone,author,type
a,index.html,1,0,10,2024-01-01,2024-01-01T09:00:00+00:00,+00:00,me,html
a,index.html,2,1,20,2024-01-01,2024-01-01T09:00:00+00:00,+00:00,me,html
b,style.css,1,0,5,2024-01-06,2024-01-06T14:30:00+00:00,+00:00,me,css
c,index.html,3,2,40,2024-01-11,2024-01-11T21:00:00+00:00,+00:00,me,html
,orphan.js,1,0,1,2024-01-12,2024-01-12T10:00:00+00:00,+00:00,me,js
";

const PROJECTS_JSON: &str = r#"[
  {"title": "Lab 1", "year": 2023, "description": "First lab"},
  {"title": "Lab 2", "year": "2023", "url": "https://example.com/lab2"},
  {"title": "Portfolio", "year": 2024, "image": "images/site.png"}
]"#;

fn write_fixtures(dir: &Path) {
    fs::write(dir.join("loc.csv"), LOC_CSV).unwrap();
    fs::create_dir_all(dir.join("lib")).unwrap();
    fs::write(dir.join("lib/projects.json"), PROJECTS_JSON).unwrap();
}

fn folio(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .arg("--store")
        .arg(dir.join(".folio"));
    cmd
}

fn json_of(cmd: &mut Command) -> serde_json::Value {
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).unwrap()
}

#[test]
fn summary_json_counts_rows() {
    let dir = tempdir().unwrap();
    write_fixtures(dir.path());

    let v = json_of(folio(dir.path()).args(["summary", "--json"]));
    assert_eq!(v["version"], 1);
    assert_eq!(v["dropped_rows"], 1);
    let s = &v["summary"];
    assert_eq!(s["commits"], 3);
    assert_eq!(s["files"], 2);
    assert_eq!(s["total_loc"], 4);
    assert_eq!(s["max_depth"], 2);
    assert_eq!(s["longest_line"], 40);
    assert_eq!(s["max_lines"], 3);
}

#[test]
fn slider_at_zero_shows_only_the_first_commit() {
    let dir = tempdir().unwrap();
    write_fixtures(dir.path());

    let v = json_of(folio(dir.path()).args(["commits", "--at", "0", "--json"]));
    let commits = v["commits"].as_array().unwrap();
    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0]["id"], "a");
    assert_eq!(commits[0]["total_lines"], 2);
    assert!(commits[0].get("lines").is_none());
}

#[test]
fn step_reveals_commits_up_to_it() {
    let dir = tempdir().unwrap();
    write_fixtures(dir.path());

    let v = json_of(folio(dir.path()).args(["commits", "--step", "1", "--json"]));
    let ids: Vec<&str> = v["commits"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn brush_over_the_whole_plot_selects_everything() {
    let dir = tempdir().unwrap();
    write_fixtures(dir.path());

    let v = json_of(folio(dir.path()).args([
        "select", "--x0", "0", "--y0", "0", "--x1", "1000", "--y1", "600", "--json",
    ]));
    assert_eq!(v["selection"], "3 commits selected");
    let breakdown = v["breakdown"].as_array().unwrap();
    assert_eq!(breakdown[0]["kind"], "html");
    assert_eq!(breakdown[0]["lines"], 3);
}

#[test]
fn story_has_a_step_per_commit() {
    let dir = tempdir().unwrap();
    write_fixtures(dir.path());

    let v = json_of(folio(dir.path()).args(["story", "--json"]));
    let steps = v["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 3);
    assert!(steps[0]["text"].as_str().unwrap().contains("the first commit"));
    assert!(steps[1]["text"].as_str().unwrap().contains("another commit"));
}

#[test]
fn projects_search_matches_year_values() {
    let dir = tempdir().unwrap();
    write_fixtures(dir.path());

    let v = json_of(folio(dir.path()).args(["projects", "--search", "2023", "--json"]));
    assert_eq!(v["title"], "2 Projects");
    let cards = v["projects"].as_array().unwrap();
    assert_eq!(cards[0]["heading"], "Lab 1");
    assert_eq!(cards[0]["image"], "images/placeholder.svg");
    assert_eq!(cards[1]["description"], "No description available.");
}

#[test]
fn pie_orders_years_ascending() {
    let dir = tempdir().unwrap();
    write_fixtures(dir.path());

    let v = json_of(folio(dir.path()).args(["pie", "--json"]));
    let labels: Vec<&str> = v["slices"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["2023", "2024"]);
}

#[test]
fn missing_catalogue_lists_nothing() {
    let dir = tempdir().unwrap();
    write_fixtures(dir.path());

    let v = json_of(
        folio(dir.path()).args(["--projects", "nowhere.json", "projects", "--json"]),
    );
    assert_eq!(v["title"], "0 Projects");
    assert!(v["projects"].as_array().unwrap().is_empty());
}

#[test]
fn missing_row_source_is_an_error() {
    let dir = tempdir().unwrap();
    folio(dir.path())
        .args(["--data", "absent.csv", "summary", "--json"])
        .assert()
        .failure();
}

#[test]
fn theme_is_persisted() {
    let dir = tempdir().unwrap();

    folio(dir.path()).args(["theme", "dark"]).assert().success();
    let out = folio(dir.path())
        .arg("theme")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Dark"));

    folio(dir.path()).args(["theme", "sepia"]).assert().failure();
}
