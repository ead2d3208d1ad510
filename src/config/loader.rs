use crate::config::Config;
use crate::utils::{atomic_write, get_hatchbot_home};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_hatchbot_home()?.join("config.json"))
}

pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let default_path = get_config_path().unwrap_or_else(|_| PathBuf::from("config.json"));
    let path = config_path.unwrap_or(default_path.as_path());

    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config JSON from {}", path.display()))?;
        return Ok(config);
    }

    Ok(Config::default())
}

pub fn save_config(config: &Config, config_path: Option<&Path>) -> Result<()> {
    let default_path = get_config_path().unwrap_or_else(|_| PathBuf::from("config.json"));
    let path = config_path.unwrap_or(default_path.as_path());

    let content = serde_json::to_string_pretty(config)?;
    atomic_write(path, &content)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_returns_default_when_missing() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = load_config(Some(&dir.path().join("nope.json"))).expect("load");
        assert_eq!(config.api.base_url, crate::config::DEFAULT_API_BASE_URL);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.api.base_url = "http://portal:9000/api".to_string();
        config.chat.scripted = true;
        save_config(&config, Some(&path)).expect("save");

        let loaded = load_config(Some(&path)).expect("load");
        assert_eq!(loaded.api.base_url, "http://portal:9000/api");
        assert!(loaded.chat.scripted);
    }

    #[test]
    fn load_rejects_malformed_json() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").expect("write");
        assert!(load_config(Some(&path)).is_err());
    }
}
