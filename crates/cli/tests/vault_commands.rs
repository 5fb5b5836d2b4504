use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::{TempDir, tempdir};

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn sample_vault() -> TempDir {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    write_file(
        &root.join("note1.md"),
        "---\ntitle: Note One\ntags: [project]\n---\nLinks to [[note2]] and [[missing]]. #idea\n",
    );
    write_file(&root.join("note2.md"), "Back to [[note1|the first]].\n");
    write_file(&root.join("sub/lonely.md"), "nobody links here #idea\n");
    write_file(&root.join(".trash/old.md"), "[[note1]]\n");
    tmp
}

fn ng(vault: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ng"));
    cmd.arg("--vault").arg(vault.path());
    cmd
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn index_prints_statistics() {
    let vault = sample_vault();
    ng(&vault)
        .arg("index")
        .assert()
        .success()
        .stdout(predicate::str::contains("Indexing complete:"))
        .stdout(predicate::str::contains("Files found:     3"))
        .stdout(predicate::str::contains("Links indexed:   3"))
        .stdout(predicate::str::contains("Broken links:    1"));
}

#[test]
fn index_json_dumps_entries() {
    let vault = sample_vault();
    let root = vault.path().canonicalize().unwrap();
    let json = json_stdout(ng(&vault).args(["index", "--json"]));

    let note1 = &json[root.join("note1.md").to_str().unwrap()];
    assert_eq!(note1["title"], "Note One");
    assert_eq!(note1["tags"], serde_json::json!(["project", "idea"]));
    assert_eq!(note1["backlinks"], serde_json::json!([root.join("note2.md")]));
}

#[test]
fn search_ranks_and_limits() {
    let vault = sample_vault();
    let json = json_stdout(ng(&vault).args(["search", "LONELY", "--json"]));
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["title"], "lonely.md");
    assert_eq!(json[0]["score"], 10);

    let json = json_stdout(ng(&vault).args(["search", "links", "--json", "--limit", "1"]));
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["score"], 5);
}

#[test]
fn search_without_hits() {
    let vault = sample_vault();
    ng(&vault)
        .args(["search", "zebra"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(no results found)"));
}

#[test]
fn parse_prints_metadata() {
    let vault = sample_vault();
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ng"));
    cmd.arg("parse").arg(vault.path().join("note2.md"));
    let json = json_stdout(&mut cmd);
    assert_eq!(json["links"], serde_json::json!(["note1"]));
    assert_eq!(json["tags"], serde_json::json!([]));
}

#[test]
fn parse_missing_file_fails() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ng"));
    cmd.args(["parse", "/nonexistent/note.md"]);
    cmd.assert().failure().stderr(predicate::str::contains("Error reading"));
}

#[test]
fn links_by_name() {
    let vault = sample_vault();
    ng(&vault)
        .args(["links", "note1", "--backlinks", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("note2.md"))
        .stdout(predicate::str::contains("old.md").not());

    ng(&vault)
        .args(["links", "note1.md", "--outlinks"])
        .assert()
        .success()
        .stdout(predicate::str::contains("note2.md"))
        .stdout(predicate::str::contains("(unresolved)"));
}

#[test]
fn links_unknown_note_fails() {
    let vault = sample_vault();
    ng(&vault)
        .args(["links", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Note not found"));
}

#[test]
fn tags_summary_and_filter() {
    let vault = sample_vault();
    ng(&vault)
        .arg("tags")
        .assert()
        .success()
        .stdout(predicate::str::contains("#idea"))
        .stdout(predicate::str::contains("#project"));

    let json = json_stdout(ng(&vault).args(["tags", "#idea", "--json"]));
    let paths: Vec<&str> =
        json.as_array().unwrap().iter().map(|n| n["path"].as_str().unwrap()).collect();
    assert_eq!(paths.len(), 2);
    assert!(paths[0].ends_with("note1.md"));
    assert!(paths[1].ends_with("lonely.md"));
}

#[test]
fn graph_has_nodes_and_edges() {
    let vault = sample_vault();
    let json = json_stdout(ng(&vault).arg("graph"));
    assert_eq!(json["nodes"].as_array().unwrap().len(), 3);
    assert_eq!(json["edges"].as_array().unwrap().len(), 2);
}

#[test]
fn orphans_and_unresolved() {
    let vault = sample_vault();
    ng(&vault)
        .args(["orphans", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lonely.md"))
        .stdout(predicate::str::contains("note1.md").not());

    let json = json_stdout(ng(&vault).args(["unresolved", "--json"]));
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["target"], "missing");
}
