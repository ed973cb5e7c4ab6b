use regex::Regex;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

struct TestContext {
    _dir: TempDir,
    catalog_path: PathBuf,
    config_path: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let catalog_path = dir.path().join("cards.csv");
        let config_path = dir.path().join("config.json");

        fs::write(
            &catalog_path,
            "id,name,elixir,type,tags\n\
             a,Alpha,2,troop,swarm\n\
             b,Bravo,8,troop,win\n\
             c,Charlie,4,troop,spell\n\
             d,Delta,4,troop,spell\n\
             e,Echo,3,troop,air\n\
             f,Foxtrot,2,troop,\n\
             g,Golf,5,troop,building\n\
             h,Hotel,3,troop,support\n\
             x,Xray,8,troop,\n",
        )
        .unwrap();
        fs::write(&config_path, r#"{"engine":{"max_suggestions":1}}"#).unwrap();

        Self {
            _dir: dir,
            catalog_path,
            config_path,
        }
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_deckforge"))
            .arg("--catalog")
            .arg(&self.catalog_path)
            .args(args)
            .output()
            .expect("Failed to execute binary")
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn evaluate_json_reports_score() {
    let ctx = TestContext::new();
    let output = ctx.run(&["evaluate", "--deck", "a,b,c,d,e,f,g,h", "--json"]);
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(summary["score"], 89);
    assert_eq!(summary["preset"], "baseline");
    assert_eq!(summary["metrics"]["spellCoverage"], 100);
}

#[test]
fn evaluate_table_lists_suggestions() {
    let ctx = TestContext::new();
    let output = ctx.run(&["evaluate", "--deck", "a,x,c,d,e,f,g,h"]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(Regex::new(r"\b59\b").unwrap().is_match(&text), "{}", text);
    assert!(Regex::new(r"\+30").unwrap().is_match(&text), "{}", text);
}

#[test]
fn incomplete_deck_has_no_score() {
    let ctx = TestContext::new();
    let output = ctx.run(&["evaluate", "--deck", "a,b,c", "--json"]);
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert!(summary["score"].is_null());
    assert!(summary["metrics"].is_null());
}

#[test]
fn config_file_and_flags_merge() {
    let ctx = TestContext::new();
    let config = ctx.config_path.to_str().unwrap();

    let from_file = ctx.run(&[
        "--config-file",
        config,
        "evaluate",
        "--deck",
        "a,x,c,d,e,f,g,h",
        "--json",
    ]);
    let summary: serde_json::Value = serde_json::from_str(&stdout(&from_file)).unwrap();
    assert_eq!(summary["suggestions"].as_array().unwrap().len(), 1);

    let overridden = ctx.run(&[
        "--config-file",
        config,
        "evaluate",
        "--deck",
        "a,x,c,d,e,f,g,h",
        "--max-suggestions",
        "2",
        "--json",
    ]);
    let summary: serde_json::Value = serde_json::from_str(&stdout(&overridden)).unwrap();
    assert_eq!(summary["suggestions"].as_array().unwrap().len(), 2);
}

#[test]
fn suggest_climbs_to_reference_deck() {
    let ctx = TestContext::new();
    let output = ctx.run(&["suggest", "--deck", "a,x,c,d,e,f,g,h", "--rounds", "2", "--json"]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("a,b,c,d,e,f,g,h"), "{}", text);
}

#[test]
fn unknown_card_fails() {
    let ctx = TestContext::new();
    let output = ctx.run(&["evaluate", "--deck", "a,nope"]);
    assert!(!output.status.success());
}
