use notegraph_core::config::loader::ConfigLoader;
use notegraph_core::index::ResolutionPolicy;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn write_file(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn load_default_profile_ok() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    let toml = r#"
version = 1
profile = "default"

[profiles.default]
vault_root = "/tmp/vault"
excluded_folders = ["{{vault_root}}/archive", "templates"]

[index]
resolution = "same-directory"
parallel = false

[logging]
level = "debug"
file = "{{vault_root}}/.notegraph.log"
"#;

    write_file(&cfg_path, toml);

    let rc = ConfigLoader::load(Some(&cfg_path), None).expect("should load");
    assert_eq!(rc.active_profile, "default");
    assert_eq!(rc.vault_root.display().to_string(), "/tmp/vault");
    assert_eq!(rc.extension, "md");
    assert_eq!(rc.hidden_prefix, ".");
    assert_eq!(
        rc.excluded_folders,
        vec![PathBuf::from("/tmp/vault/archive"), PathBuf::from("templates")]
    );
    assert_eq!(rc.index.resolution, ResolutionPolicy::SameDirectory);
    assert!(!rc.index.parallel);
    assert_eq!(rc.logging.level, "debug");
    assert_eq!(rc.logging.file, Some(PathBuf::from("/tmp/vault/.notegraph.log")));
}

#[test]
fn defaults_when_sections_absent() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    let toml = r#"
version = 1

[profiles.default]
vault_root = "/tmp/vault"
extension = ".txt"
hidden_prefix = "_"
"#;
    write_file(&cfg_path, toml);

    let rc = ConfigLoader::load(Some(&cfg_path), None).expect("should load");
    assert_eq!(rc.extension, "txt");
    assert_eq!(rc.hidden_prefix, "_");
    assert!(rc.excluded_folders.is_empty());
    assert_eq!(rc.index.resolution, ResolutionPolicy::Lexicographic);
    assert!(rc.index.parallel);
    assert_eq!(rc.logging.level, "info");
    assert!(rc.logging.file.is_none());
}

#[test]
fn load_with_profile_override_ok() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("notegraph/config.toml");
    let toml = r#"
version = 1
profile = "default"

[profiles.default]
vault_root = "/tmp/def"

[profiles.work]
vault_root = "/tmp/work"
"#;
    write_file(&cfg_path, toml);

    let rc = ConfigLoader::load(Some(&cfg_path), Some("work")).expect("should load");
    assert_eq!(rc.active_profile, "work");
    assert_eq!(rc.vault_root.display().to_string(), "/tmp/work");
}

#[test]
fn first_match_is_an_alias_for_lexicographic() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    write_file(
        &cfg_path,
        "version = 1\n[profiles.default]\nvault_root = \"/tmp/v\"\n[index]\nresolution = \"first-match\"\n",
    );

    let rc = ConfigLoader::load(Some(&cfg_path), None).expect("should load");
    assert_eq!(rc.index.resolution, ResolutionPolicy::Lexicographic);
}
