use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn status_reads_config_file_and_flags_unknown_env() {
    let tmp = tempdir().expect("tempdir");
    fs::create_dir_all(tmp.path().join("site/projects")).expect("mkdir content");
    let config = tmp.path().join("folio.toml");
    fs::write(
        &config,
        r#"[content]
root = "site/projects"
read_workers = 2

[logging]
filter = "warn"
format = "json"
"#,
    )
    .expect("write config");

    assert_cmd::cargo::cargo_bin_cmd!("folio")
        .current_dir(tmp.path())
        .env("FOLIO_HOME", tmp.path())
        .env("FOLIO_CONFIG_PATH", &config)
        .env_remove("FOLIO_CONTENT_DIR")
        .env_remove("FOLIO_READ_WORKERS")
        .env_remove("FOLIO_LOG")
        .env_remove("FOLIO_LOG_FORMAT")
        .env("FOLIO_CONTNET_DIR", "typo")
        .arg("status")
        .assert()
        .failure()
        .stdout(predicate::str::contains("content_root=site/projects"))
        .stdout(predicate::str::contains("read_workers=2"))
        .stdout(predicate::str::contains("log_format=json"))
        .stdout(predicate::str::contains(
            "unrecognized environment variable FOLIO_CONTNET_DIR",
        ));
}

#[test]
fn invalid_config_is_rejected() {
    let tmp = tempdir().expect("tempdir");
    let config = tmp.path().join("folio.toml");
    fs::write(&config, "[content]\nroot = \"x\"\nread_workers = 0\n").expect("write config");

    assert_cmd::cargo::cargo_bin_cmd!("folio")
        .current_dir(tmp.path())
        .env("FOLIO_HOME", tmp.path())
        .env("FOLIO_CONFIG_PATH", &config)
        .env_remove("FOLIO_READ_WORKERS")
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid read workers"));
}
