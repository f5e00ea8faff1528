//! TOML-based configuration.
//!
//! Stores:
//! - the holiday calendar used for business-day counting
//! - the default strategy and suggestion count
//! - an optional override for where learned weights live
//!
//! Configuration is stored at `<data_dir>/config.toml`.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::{DateIntelligence, FixedHolidays};
use crate::error::ConfigError;
use crate::scoring::{Strategy, DEFAULT_SUGGESTION_LIMIT};
use crate::weights::FileWeightStore;

/// Returns the data directory, creating it if needed.
///
/// `TASKRANK_HOME` wins when set. Otherwise `~/.config/taskrank`, or
/// `~/.config/taskrank-dev` when `TASKRANK_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("TASKRANK_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("TASKRANK_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("taskrank-dev")
            } else {
                base_dir.join("taskrank")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}

/// Holiday calendar configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Non-working dates, `YYYY-MM-DD`.
    #[serde(default)]
    pub holidays: Vec<String>,
}

/// Scoring defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Strategy used when a command does not name one.
    #[serde(default)]
    pub default_strategy: Option<Strategy>,
    #[serde(default = "default_suggest_limit")]
    pub suggest_limit: usize,
}

/// Weight persistence configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightsConfig {
    /// Weights file; defaults to `<data_dir>/weights.json`.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub weights: WeightsConfig,
}

fn default_suggest_limit() -> usize {
    DEFAULT_SUGGESTION_LIMIT
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            default_strategy: None,
            suggest_limit: default_suggest_limit(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }
        key.split('.').try_fold(root, |node, part| node.get(part))
    }

    /// Parse `value` into the JSON type of the existing entry at `key`.
    /// Unset optional entries (null) accept any scalar as a string.
    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let (parent_path, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, key),
        };
        if leaf.is_empty() {
            return Err(unknown());
        }

        let mut parent = root;
        if let Some(path) = parent_path {
            for part in path.split('.') {
                parent = parent.get_mut(part).ok_or_else(unknown)?;
            }
        }
        let obj = parent.as_object_mut().ok_or_else(unknown)?;
        let existing = obj.get(leaf).ok_or_else(unknown)?;

        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
            ),
            serde_json::Value::Number(_) => {
                if let Ok(n) = value.parse::<u64>() {
                    serde_json::Value::Number(n.into())
                } else {
                    value
                        .parse::<f64>()
                        .ok()
                        .and_then(serde_json::Number::from_f64)
                        .map(serde_json::Value::Number)
                        .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                }
            }
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
            }
            serde_json::Value::Null if value.is_empty() || value == "none" => serde_json::Value::Null,
            _ => serde_json::Value::String(value.to_string()),
        };

        obj.insert(leaf.to_string(), new_value);
        Ok(())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing defaults when no file exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.clone(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| save_failed(e.to_string()))?;
        debug!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        match Self::get_json_value_by_path(&json, key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key and save. The new configuration must
    /// still deserialize and build a valid calendar.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.holidays()?;
        *self = updated;
        self.save()
    }

    /// The configured holiday set.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first entry that is not a date.
    pub fn holidays(&self) -> Result<FixedHolidays, ConfigError> {
        FixedHolidays::parse(&self.calendar.holidays)
    }

    /// Date helpers over the configured holidays.
    ///
    /// # Errors
    ///
    /// Returns an error if a holiday entry is not a date.
    pub fn date_intelligence(&self) -> Result<DateIntelligence, ConfigError> {
        Ok(DateIntelligence::new(Arc::new(self.holidays()?)))
    }

    /// The weight store this configuration points at.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory is needed and cannot be created.
    pub fn weight_store(&self) -> Result<FileWeightStore, ConfigError> {
        let path = match &self.weights.file {
            Some(path) => path.clone(),
            None => data_dir()?.join("weights.json"),
        };
        Ok(FileWeightStore::new(path))
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.scoring.suggest_limit, 3);
    }

    #[test]
    fn parses_full_file() {
        let cfg: Config = toml::from_str(
            r#"
            [calendar]
            holidays = ["2026-12-25", "2027-01-01"]

            [scoring]
            default_strategy = "deadline"
            suggest_limit = 5

            [weights]
            file = "/tmp/w.json"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.scoring.default_strategy, Some(Strategy::Deadline));
        assert_eq!(cfg.scoring.suggest_limit, 5);
        assert_eq!(cfg.holidays().unwrap().len(), 2);
        assert_eq!(cfg.weight_store().unwrap().path(), std::path::Path::new("/tmp/w.json"));
    }

    #[test]
    fn empty_file_uses_defaults() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("scoring.suggest_limit").as_deref(), Some("3"));
        assert_eq!(cfg.get("calendar.holidays").as_deref(), Some("[]"));
        assert!(cfg.get("scoring.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_json_value_updates_number() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "scoring.suggest_limit", "7").unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "scoring.suggest_limit").unwrap(),
            &serde_json::Value::Number(7.into())
        );
    }

    #[test]
    fn set_json_value_fills_unset_option() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "scoring.default_strategy", "impact").unwrap();
        let cfg: Config = serde_json::from_value(json).unwrap();
        assert_eq!(cfg.scoring.default_strategy, Some(Strategy::Impact));
    }

    #[test]
    fn set_json_value_parses_arrays() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "calendar.holidays", r#"["2026-05-01"]"#).unwrap();
        let cfg: Config = serde_json::from_value(json).unwrap();
        assert_eq!(cfg.calendar.holidays, ["2026-05-01"]);
    }

    #[test]
    fn set_json_value_rejects_unknown_key() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let err = Config::set_json_value_by_path(&mut json, "scoring.nonexistent", "1").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKey(_)));
    }

    #[test]
    fn set_json_value_rejects_invalid_number() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let err = Config::set_json_value_by_path(&mut json, "scoring.suggest_limit", "lots").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn invalid_holiday_fails_calendar_build() {
        let cfg = Config {
            calendar: CalendarConfig {
                holidays: vec!["25/12/2026".into()],
            },
            ..Default::default()
        };
        assert!(cfg.date_intelligence().is_err());
    }
}
