use crate::application::analysis_client::DEFAULT_MODEL;
use crate::domain::dashboard::DashboardEntry;
use crate::domain::locale::Locale;
use serde::Deserialize;

pub const API_KEY_VARS: [&str; 2] = ["API_KEY", "GEMINI_API_KEY"];

#[derive(Debug, Deserialize, Clone)]
pub struct ShellConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub analysis: AnalysisSettings,
    #[serde(default)]
    pub shell: ShellSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalysisSettings {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Unset means the HTTP client's own behavior applies
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ShellSettings {
    #[serde(default)]
    pub default_locale: Locale,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardsConfig {
    #[serde(default)]
    pub dashboards: Vec<DashboardEntry>,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

/// `config/shell` plus `SHELL__SECTION__KEY` environment overrides
pub fn load_shell_config() -> anyhow::Result<ShellConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/shell").required(false))
        .add_source(config::Environment::with_prefix("SHELL").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_dashboards_config() -> anyhow::Result<DashboardsConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboards"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// The credential gating every analysis call. Absence is not an error.
pub fn load_api_key() -> Option<String> {
    API_KEY_VARS
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
}
