use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

/// Environment variable consulted for the credential when none is passed.
pub const API_KEY_ENV: &str = "WEATHER_API_KEY";

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

/// Settings persisted between runs of the `weather` binary.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// base_url = "https://api.weatherapi.com/v1"
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-sdk", "weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key).filter(|k| !k.trim().is_empty());
    }

    pub fn api_key(&self) -> Option<&str> {
        non_empty(self.api_key.as_deref())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Resolve the credential: explicit value first, then `lookup(env_var)`.
/// Empty strings count as absent.
pub fn resolve_api_key(
    explicit: Option<String>,
    env_var: &str,
    lookup: impl FnOnce(&str) -> Option<String>,
) -> Option<String> {
    explicit
        .filter(|k| !k.trim().is_empty())
        .or_else(|| lookup(env_var).filter(|k| !k.trim().is_empty()))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_key_wins_over_environment() {
        let key = resolve_api_key(Some("EXPLICIT".into()), API_KEY_ENV, |_| {
            Some("FROM_ENV".into())
        });
        assert_eq!(key.as_deref(), Some("EXPLICIT"));
    }

    #[test]
    fn environment_is_consulted_by_name() {
        let key = resolve_api_key(None, "CUSTOM_VAR", |name| {
            (name == "CUSTOM_VAR").then(|| "FROM_ENV".to_string())
        });
        assert_eq!(key.as_deref(), Some("FROM_ENV"));
    }

    #[test]
    fn empty_values_count_as_missing() {
        let key = resolve_api_key(Some("  ".into()), API_KEY_ENV, |_| Some(String::new()));
        assert_eq!(key, None);
    }

    #[test]
    fn parses_partial_config() {
        let cfg = Config::from_toml("timeout_secs = 5\n").expect("valid toml");

        assert_eq!(cfg.api_key(), None);
        assert_eq!(cfg.base_url, None);
        assert_eq!(cfg.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn set_api_key_ignores_blank_input() {
        let mut cfg = Config::default();

        cfg.set_api_key("KEY".into());
        assert_eq!(cfg.api_key(), Some("KEY"));

        cfg.set_api_key("   ".into());
        assert_eq!(cfg.api_key(), None);
    }

    #[test]
    fn roundtrips_through_toml() {
        let cfg = Config {
            api_key: Some("KEY".into()),
            base_url: Some("http://localhost:8080/v1".into()),
            timeout_secs: Some(3),
        };

        let text = toml::to_string_pretty(&cfg).unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), cfg);
    }
}
