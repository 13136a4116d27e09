use crate::error::{Result, SprigError};
use crate::identify::plant_id::DEFAULT_ENDPOINT;
use crate::identify::IdentifierKind;
use crate::reminders::DEFAULT_SOON_DAYS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_LOOKUP_DELAY_MS: u64 = 2000;

/// Keys accepted by `sprig config <key> [value]`.
pub const CONFIG_KEYS: &[&str] = &[
    "identifier",
    "plant-id-api-key",
    "plant-id-endpoint",
    "lookup-delay-ms",
    "soon-days",
];

/// Configuration for sprig, stored as config.json in the data directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct SprigConfig {
    /// Which identifier `sprig identify` uses.
    #[serde(default)]
    pub identifier: IdentifierKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plant_id_api_key: Option<String>,

    #[serde(default = "default_endpoint")]
    pub plant_id_endpoint: String,

    /// Delay before the catalog identifier answers.
    #[serde(default = "default_lookup_delay_ms")]
    pub lookup_delay_ms: u64,

    /// Watering due within this many days is shown as "soon".
    #[serde(default = "default_soon_days")]
    pub soon_days: i64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_lookup_delay_ms() -> u64 {
    DEFAULT_LOOKUP_DELAY_MS
}

fn default_soon_days() -> i64 {
    DEFAULT_SOON_DAYS
}

impl Default for SprigConfig {
    fn default() -> Self {
        Self {
            identifier: IdentifierKind::default(),
            plant_id_api_key: None,
            plant_id_endpoint: default_endpoint(),
            lookup_delay_ms: DEFAULT_LOOKUP_DELAY_MS,
            soon_days: DEFAULT_SOON_DAYS,
        }
    }
}

impl SprigConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(SprigError::Io)?;
        let config: SprigConfig =
            serde_json::from_str(&content).map_err(SprigError::Serialization)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(SprigError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(SprigError::Serialization)?;
        fs::write(config_path, content).map_err(SprigError::Io)?;
        Ok(())
    }

    /// Current value of `key` as shown to the user. The API key is masked.
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "identifier" => self.identifier.to_string(),
            "plant-id-api-key" => match &self.plant_id_api_key {
                Some(k) => mask_secret(k),
                None => String::new(),
            },
            "plant-id-endpoint" => self.plant_id_endpoint.clone(),
            "lookup-delay-ms" => self.lookup_delay_ms.to_string(),
            "soon-days" => self.soon_days.to_string(),
            other => return Err(unknown_key(other)),
        };
        Ok(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "identifier" => {
                self.identifier = value.parse().map_err(SprigError::Config)?;
            }
            "plant-id-api-key" => {
                self.plant_id_api_key = (!value.is_empty()).then(|| value.to_string());
            }
            "plant-id-endpoint" => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(SprigError::Config(format!(
                        "plant-id-endpoint must be an http(s) URL, got '{}'",
                        value
                    )));
                }
                self.plant_id_endpoint = value.to_string();
            }
            "lookup-delay-ms" => {
                self.lookup_delay_ms = value.parse().map_err(|_| {
                    SprigError::Config(format!("lookup-delay-ms must be a number, got '{}'", value))
                })?;
            }
            "soon-days" => {
                let days: i64 = value.parse().map_err(|_| {
                    SprigError::Config(format!("soon-days must be a number, got '{}'", value))
                })?;
                if days < 0 {
                    return Err(SprigError::Config("soon-days cannot be negative".to_string()));
                }
                self.soon_days = days;
            }
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> SprigError {
    SprigError::Config(format!(
        "unknown config key '{}' (expected one of: {})",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = SprigConfig::default();
        assert_eq!(config.identifier, IdentifierKind::Catalog);
        assert_eq!(config.lookup_delay_ms, 2000);
        assert_eq!(config.soon_days, 2);
        assert_eq!(config.plant_id_endpoint, "https://api.plant.id/v2/identify");
    }

    #[test]
    fn test_load_missing_config() {
        let dir = TempDir::new().unwrap();
        let config = SprigConfig::load(dir.path()).unwrap();
        assert_eq!(config, SprigConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("data");

        let mut config = SprigConfig::default();
        config.set("identifier", "plant_id").unwrap();
        config.set("plant-id-api-key", "abc123xyz").unwrap();
        config.save(&nested).unwrap();

        let loaded = SprigConfig::load(&nested).unwrap();
        assert_eq!(loaded.identifier, IdentifierKind::PlantId);
        assert_eq!(loaded.plant_id_api_key.as_deref(), Some("abc123xyz"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"soon_days": 5}"#).unwrap();
        let config = SprigConfig::load(dir.path()).unwrap();
        assert_eq!(config.soon_days, 5);
        assert_eq!(config.lookup_delay_ms, 2000);
    }

    #[test]
    fn test_get_masks_api_key() {
        let mut config = SprigConfig::default();
        assert_eq!(config.get("plant-id-api-key").unwrap(), "");
        config.set("plant-id-api-key", "secretkey9876").unwrap();
        assert_eq!(config.get("plant-id-api-key").unwrap(), "****9876");
        config.set("plant-id-api-key", "").unwrap();
        assert!(config.plant_id_api_key.is_none());
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = SprigConfig::default();
        assert!(config.set("soon-days", "-1").is_err());
        assert!(config.set("lookup-delay-ms", "soon").is_err());
        assert!(config.set("identifier", "vision").is_err());
        assert!(config.set("plant-id-endpoint", "ftp://x").is_err());
        assert!(config.set("color", "red").is_err());
        assert!(config.get("color").is_err());
        assert_eq!(config, SprigConfig::default());
    }

    #[test]
    fn test_set_numeric_values() {
        let mut config = SprigConfig::default();
        config.set("lookup-delay-ms", "0").unwrap();
        config.set("soon-days", "3").unwrap();
        assert_eq!(config.get("lookup-delay-ms").unwrap(), "0");
        assert_eq!(config.get("soon-days").unwrap(), "3");
    }
}
