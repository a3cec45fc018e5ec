use crate::analytics::CapitalizationMarkers;
use crate::error::{LinearError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

pub const DEFAULT_API_URL: &str = "https://api.linear.app/graphql";
pub const SETTINGS_FILE: &str = "config.toml";

pub const ENV_API_KEY: &str = "LINEAR_API_KEY";
pub const ENV_API_URL: &str = "LINEAR_API_URL";
pub const ENV_DEFAULT_TEAM: &str = "LINEAR_DEFAULT_TEAM";
pub const ENV_CAPITALIZATION_LABELS: &str = "LINEAR_CAPITALIZATION_LABELS";

/// Non-secret settings read from an optional TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub defaults: DefaultSettings,

    #[serde(default)]
    pub analytics: AnalyticsSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_api_url")]
    pub url: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            url: default_api_url(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultSettings {
    #[serde(default)]
    pub team: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsSettings {
    #[serde(default = "default_capitalization_labels")]
    pub capitalization_labels: Vec<String>,
}

fn default_capitalization_labels() -> Vec<String> {
    CapitalizationMarkers::default().into_inner()
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            capitalization_labels: default_capitalization_labels(),
        }
    }
}

impl Settings {
    /// Loads settings from an explicit path, or from the platform config
    /// directory when present. A missing default file yields defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LinearError::Config(format!("Cannot read settings file {}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&content)?)
    }

    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("app", "linear", "linear-analytics")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
    }
}

/// Fully resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    api_key: Option<String>,
    pub api_url: Url,
    pub default_team: Option<String>,
    pub capitalization_markers: CapitalizationMarkers,
}

impl Config {
    /// Loads `.env` from the working directory, then resolves settings
    /// against the process environment.
    pub fn load(settings_path: Option<&Path>) -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(LinearError::Config(format!("Cannot parse .env file: {}", e)));
            }
        }
        let settings = Settings::load(settings_path)?;
        Self::resolve(settings, |name| std::env::var(name).ok())
    }

    /// Environment values take precedence over the settings file.
    pub fn resolve<F>(settings: Settings, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| {
            env(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let raw_url = non_blank(ENV_API_URL).unwrap_or(settings.api.url);
        let api_url = Url::parse(&raw_url)
            .map_err(|e| LinearError::Config(format!("Invalid API URL '{}': {}", raw_url, e)))?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(LinearError::Config(format!(
                "API URL must use http or https, got '{}'",
                api_url.scheme()
            )));
        }

        let capitalization_markers = match non_blank(ENV_CAPITALIZATION_LABELS) {
            Some(raw) => CapitalizationMarkers::parse(&raw),
            None => CapitalizationMarkers::new(settings.analytics.capitalization_labels),
        };

        Ok(Self {
            api_key: non_blank(ENV_API_KEY),
            api_url,
            default_team: non_blank(ENV_DEFAULT_TEAM).or(settings.defaults.team),
            capitalization_markers,
        })
    }

    pub fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            LinearError::Config(format!(
                "{} is not set. Create a personal API key in Linear (Settings > API) \
                 and export it or add it to a .env file.",
                ENV_API_KEY
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_resolve_defaults() {
        let config = Config::resolve(Settings::default(), env_from(&[])).unwrap();
        assert_eq!(config.api_url.as_str(), DEFAULT_API_URL);
        assert!(config.default_team.is_none());
        assert!(config.api_key().is_err());
        assert_eq!(
            config.capitalization_markers,
            CapitalizationMarkers::default()
        );
    }

    #[test]
    fn test_env_overrides_settings() {
        let mut settings = Settings::default();
        settings.defaults.team = Some("Design".to_string());

        let config = Config::resolve(
            settings,
            env_from(&[
                (ENV_API_KEY, "lin_api_abc"),
                (ENV_API_URL, "http://localhost:8080/graphql"),
                (ENV_DEFAULT_TEAM, "Engineering"),
                (ENV_CAPITALIZATION_LABELS, "R&D, Capex"),
            ]),
        )
        .unwrap();

        assert_eq!(config.api_key().unwrap(), "lin_api_abc");
        assert_eq!(config.api_url.as_str(), "http://localhost:8080/graphql");
        assert_eq!(config.default_team.as_deref(), Some("Engineering"));
        assert_eq!(config.capitalization_markers.as_slice(), ["r&d", "capex"]);
    }

    #[test]
    fn test_blank_api_key_is_missing() {
        let config =
            Config::resolve(Settings::default(), env_from(&[(ENV_API_KEY, "  ")])).unwrap();
        let err = config.api_key().unwrap_err();
        assert!(err.to_string().contains(ENV_API_KEY));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let result = Config::resolve(Settings::default(), env_from(&[(ENV_API_URL, "not a url")]));
        assert!(matches!(result, Err(LinearError::Config(_))));

        let result = Config::resolve(
            Settings::default(),
            env_from(&[(ENV_API_URL, "ftp://example.com")]),
        );
        assert!(matches!(result, Err(LinearError::Config(_))));
    }

    #[test]
    fn test_settings_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[defaults]
team = "Platform"

[analytics]
capitalization_labels = ["Capitalizable"]
"#,
        )
        .unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.api.url, DEFAULT_API_URL);
        assert_eq!(settings.defaults.team.as_deref(), Some("Platform"));
        assert_eq!(settings.analytics.capitalization_labels, vec!["Capitalizable"]);
    }

    #[test]
    fn test_missing_explicit_settings_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = Settings::load(Some(&temp_dir.path().join("nope.toml")));
        assert!(matches!(result, Err(LinearError::Config(_))));
    }
}
