use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "folio.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolioContentConfig {
    pub root: PathBuf,
    #[serde(default = "default_read_workers")]
    pub read_workers: usize,
}

fn default_read_workers() -> usize {
    4
}

impl Default for FolioContentConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("content/projects"),
            read_workers: default_read_workers(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolioLoggingConfig {
    pub filter: String,
    pub format: String,
}

impl Default for FolioLoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FolioConfig {
    pub content: FolioContentConfig,
    pub logging: FolioLoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PartialFolioConfig {
    content: Option<FolioContentConfig>,
    logging: Option<FolioLoggingConfig>,
}

fn env_or_usize(var: &str, fallback: usize) -> usize {
    match env::var(var) {
        Ok(v) => v.trim().parse::<usize>().ok().unwrap_or(fallback),
        Err(_) => fallback,
    }
}

fn env_or_string(var: &str, fallback: &str) -> String {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => fallback.to_string(),
    }
}

fn env_or_path(var: &str, fallback: PathBuf) -> PathBuf {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => PathBuf::from(v.trim()),
        _ => fallback,
    }
}

pub fn validate(cfg: &FolioConfig) -> Result<()> {
    if cfg.content.root.as_os_str().is_empty() {
        return Err(anyhow!("invalid content root: cannot be empty"));
    }
    if cfg.content.read_workers == 0 {
        return Err(anyhow!("invalid read workers: must be >= 1"));
    }
    if cfg.logging.format != "text" && cfg.logging.format != "json" {
        return Err(anyhow!("invalid log format: use `text` or `json`"));
    }
    if cfg.logging.filter.trim().is_empty() {
        return Err(anyhow!("invalid log filter: cannot be empty"));
    }
    Ok(())
}

/// `FOLIO_CONFIG_PATH`, then `./folio.toml`, then the user config dir.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(custom) = env::var("FOLIO_CONFIG_PATH") {
        let trimmed = custom.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("folio").join(CONFIG_FILE_NAME))
}

fn merge_file_config(base: &mut FolioConfig) -> Result<()> {
    let Some(path) = resolve_config_path() else {
        return Ok(());
    };
    if !path.exists() {
        return Ok(());
    }

    let raw = fs::read_to_string(&path)?;
    let parsed: PartialFolioConfig = toml::from_str(&raw)
        .map_err(|err| anyhow!("failed to parse folio config {}: {err}", path.display()))?;
    if let Some(content) = parsed.content {
        base.content = content;
    }
    if let Some(logging) = parsed.logging {
        base.logging = logging;
    }
    Ok(())
}

pub fn load_config() -> Result<FolioConfig> {
    let mut cfg = FolioConfig::default();
    merge_file_config(&mut cfg)?;

    cfg.content.root = env_or_path("FOLIO_CONTENT_DIR", cfg.content.root);
    cfg.content.read_workers = env_or_usize("FOLIO_READ_WORKERS", cfg.content.read_workers);
    cfg.logging.filter = env_or_string("FOLIO_LOG", &cfg.logging.filter);
    cfg.logging.format = env_or_string("FOLIO_LOG_FORMAT", &cfg.logging.format);

    validate(&cfg)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = FolioConfig::default();
        validate(&cfg).expect("defaults");
        assert_eq!(cfg.content.root, PathBuf::from("content/projects"));
        assert_eq!(cfg.content.read_workers, 4);
    }

    #[test]
    fn rejects_zero_workers_and_unknown_format() {
        let mut cfg = FolioConfig::default();
        cfg.content.read_workers = 0;
        assert!(validate(&cfg).is_err());

        let mut cfg = FolioConfig::default();
        cfg.logging.format = "yaml".into();
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn partial_file_keeps_missing_sections() {
        let parsed: PartialFolioConfig =
            toml::from_str("[content]\nroot = \"site/projects\"\n").expect("parse");
        let content = parsed.content.expect("content section");
        assert_eq!(content.root, PathBuf::from("site/projects"));
        assert_eq!(content.read_workers, 4);
        assert!(parsed.logging.is_none());
    }
}
