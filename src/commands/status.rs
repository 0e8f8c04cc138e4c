use anyhow::Result;
use std::collections::BTreeSet;
use std::env;

use crate::commands::CommandReport;
use crate::content::config::{FolioConfig, resolve_config_path};

include!(concat!(env!("OUT_DIR"), "/folio_env_allowlist.rs"));

const ENV_PREFIX: &str = "FOLIO_";

/// Splits the `FOLIO_*` names in `set` into recognized and unrecognized.
fn classify_env_keys<'a>(
    set: impl IntoIterator<Item = &'a str>,
    allowlist: &[&str],
) -> (BTreeSet<&'a str>, BTreeSet<&'a str>) {
    let mut known = BTreeSet::new();
    let mut unknown = BTreeSet::new();
    for key in set {
        if !key.starts_with(ENV_PREFIX) {
            continue;
        }
        if allowlist.contains(&key) {
            known.insert(key);
        } else {
            unknown.insert(key);
        }
    }
    (known, unknown)
}

pub fn run(cfg: &FolioConfig) -> Result<CommandReport> {
    let mut report = CommandReport::new("status");

    report.detail(format!("version={}", env!("CARGO_PKG_VERSION")));
    match resolve_config_path() {
        Some(path) if path.exists() => report.detail(format!("config={}", path.display())),
        _ => report.detail("config=<defaults>"),
    }
    report.detail(format!("content_root={}", cfg.content.root.display()));
    report.detail(format!("read_workers={}", cfg.content.read_workers));
    report.detail(format!("log_filter={}", cfg.logging.filter));
    report.detail(format!("log_format={}", cfg.logging.format));

    if !cfg.content.root.is_dir() {
        report.issue(format!(
            "content root does not exist: {}",
            cfg.content.root.display()
        ));
    }

    let vars = env::vars().map(|(key, _)| key).collect::<Vec<_>>();
    let (known, unknown) = classify_env_keys(
        vars.iter().map(String::as_str),
        GENERATED_FOLIO_ENV_ALLOWLIST,
    );
    for key in known {
        report.detail(format!("env {key} set"));
    }
    for key in unknown {
        report.issue(format!("unrecognized environment variable {key}"));
    }

    Ok(report)
}
