use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const ENV_PREFIX: &str = "CAMPO";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required configuration, set the {env_var} environment variable")]
    MissingEnvVar { env_var: String },

    #[error(transparent)]
    Other(#[from] config::ConfigError),
}

/// Environment variable that feeds a dotted settings path, e.g.
/// `provider.api_key` -> `CAMPO_PROVIDER__API_KEY`.
pub fn to_env_var(path: &str) -> String {
    format!("{}_{}", ENV_PREFIX, path.replace('.', "__").to_uppercase())
}

// serde only reports the leaf name of a missing field
fn qualify_field(field: &str) -> &str {
    match field {
        "api_key" => "provider.api_key",
        "provider" => "provider.api_key",
        other => other,
    }
}

/// Sampling parameters sent with every chat completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    #[serde(default)]
    pub temperature: f32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default)]
    pub frequency_penalty: f32,
    #[serde(default)]
    pub presence_penalty: f32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            temperature: 0.0,
            top_p: default_top_p(),
            max_tokens: default_max_tokens(),
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSettings {
    pub api_key: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
    #[serde(default = "default_chat_url")]
    pub chat_url: String,
    #[serde(default = "default_project_id")]
    pub project_id: String,
    #[serde(default = "default_model_id")]
    pub model_id: String,
    #[serde(default)]
    pub sampling: SamplingConfig,
}

impl ProviderSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            token_url: default_token_url(),
            chat_url: default_chat_url(),
            project_id: default_project_id(),
            model_id: default_model_id(),
            sampling: SamplingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_search_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: default_search_endpoint(),
            max_results: default_max_results(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlertSettings {
    #[serde(default = "default_alerts_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_alerts_file")]
    pub file_name: String,
}

impl AlertSettings {
    pub fn log_path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            dir: default_alerts_dir(),
            file_name: default_alerts_file(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgentSettings {
    #[serde(default = "default_region")]
    pub default_region: String,
    #[serde(default = "default_language")]
    pub default_language: String,
    #[serde(default = "default_date_range_days")]
    pub date_range_days: u32,
    /// Character budget for the search context pasted into a prompt.
    #[serde(default = "default_context_limit")]
    pub context_limit: usize,
    /// Directory of `<task>.txt` files overriding the built-in prompt templates.
    #[serde(default)]
    pub template_dir: Option<PathBuf>,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            default_region: default_region(),
            default_language: default_language(),
            date_range_days: default_date_range_days(),
            context_limit: default_context_limit(),
            template_dir: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub provider: ProviderSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub alerts: AlertSettings,
    #[serde(default)]
    pub agents: AgentSettings,
}

impl Settings {
    /// Settings built in code, with every optional section at its default.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            provider: ProviderSettings::new(api_key),
            search: SearchSettings::default(),
            alerts: AlertSettings::default(),
            agents: AgentSettings::default(),
        }
    }

    /// Load from the environment only.
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Load from an optional TOML file, overridden by `CAMPO_*` environment variables.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        match config.try_deserialize::<Self>() {
            Ok(settings) => Ok(settings),
            Err(err) => {
                tracing::debug!("Configuration error: {:?}", &err);

                let error_str = err.to_string();
                if error_str.starts_with("missing field") {
                    let field = error_str
                        .trim_start_matches("missing field `")
                        .trim_end_matches('`');
                    Err(ConfigError::MissingEnvVar {
                        env_var: to_env_var(qualify_field(field)),
                    })
                } else if let config::ConfigError::NotFound(field) = &err {
                    Err(ConfigError::MissingEnvVar {
                        env_var: to_env_var(qualify_field(field)),
                    })
                } else {
                    Err(ConfigError::Other(err))
                }
            }
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_top_p() -> f32 {
    1.0
}

fn default_max_tokens() -> u32 {
    14000
}

fn default_token_url() -> String {
    "https://iam.cloud.ibm.com/identity/token".to_string()
}

fn default_chat_url() -> String {
    "https://us-south.ml.cloud.ibm.com/ml/v1/text/chat?version=2023-05-29".to_string()
}

fn default_project_id() -> String {
    String::new()
}

fn default_model_id() -> String {
    "ibm/granite-3-8b-instruct".to_string()
}

fn default_search_endpoint() -> String {
    "https://html.duckduckgo.com/html/".to_string()
}

fn default_max_results() -> usize {
    5
}

fn default_alerts_dir() -> PathBuf {
    PathBuf::from("alertas_agricolas")
}

fn default_alerts_file() -> String {
    "ALERTAS_AGRICOLAS_CONSOLIDADAS.txt".to_string()
}

fn default_region() -> String {
    "Perú".to_string()
}

fn default_language() -> String {
    "ESPAÑOL".to_string()
}

fn default_date_range_days() -> u32 {
    7
}

fn default_context_limit() -> usize {
    3000
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use std::io::Write;

    fn clean_env() {
        for (key, _) in env::vars() {
            if key.starts_with("CAMPO_") {
                env::remove_var(&key);
            }
        }
    }

    #[test]
    #[serial]
    fn test_default_settings() {
        clean_env();
        env::set_var("CAMPO_PROVIDER__API_KEY", "test-key");

        let settings = Settings::new().unwrap();
        assert_eq!(settings.provider.api_key, "test-key");
        assert_eq!(settings.provider.model_id, "ibm/granite-3-8b-instruct");
        assert_eq!(settings.provider.sampling, SamplingConfig::default());
        assert_eq!(settings.provider.sampling.max_tokens, 14000);
        assert!(settings.search.enabled);
        assert_eq!(settings.agents.default_region, "Perú");
        assert_eq!(settings.agents.default_language, "ESPAÑOL");
        assert_eq!(settings.agents.date_range_days, 7);
        assert_eq!(settings.agents.context_limit, 3000);
        assert_eq!(
            settings.alerts.log_path(),
            PathBuf::from("alertas_agricolas").join("ALERTAS_AGRICOLAS_CONSOLIDADAS.txt")
        );

        clean_env();
    }

    #[test]
    #[serial]
    fn test_environment_override() {
        clean_env();
        env::set_var("CAMPO_PROVIDER__API_KEY", "test-key");
        env::set_var("CAMPO_PROVIDER__SAMPLING__TEMPERATURE", "0.7");
        env::set_var("CAMPO_SEARCH__ENABLED", "false");
        env::set_var("CAMPO_AGENTS__CONTEXT_LIMIT", "800");

        let settings = Settings::new().unwrap();
        assert_eq!(settings.provider.sampling.temperature, 0.7);
        assert!(!settings.search.enabled);
        assert_eq!(settings.agents.context_limit, 800);

        clean_env();
    }

    #[test]
    #[serial]
    fn test_missing_api_key_names_env_var() {
        clean_env();

        let err = Settings::new().unwrap_err();
        match err {
            ConfigError::MissingEnvVar { env_var } => {
                assert_eq!(env_var, "CAMPO_PROVIDER__API_KEY")
            }
            other => panic!("Expected MissingEnvVar, got {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_toml_file_then_env() {
        clean_env();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[provider]\napi_key = \"from-file\"\nproject_id = \"proj\"\n\n[agents]\ndefault_region = \"Colombia\""
        )
        .unwrap();
        env::set_var("CAMPO_PROVIDER__API_KEY", "from-env");

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.provider.api_key, "from-env");
        assert_eq!(settings.provider.project_id, "proj");
        assert_eq!(settings.agents.default_region, "Colombia");

        clean_env();
    }

    #[test]
    fn test_to_env_var() {
        assert_eq!(to_env_var("provider.api_key"), "CAMPO_PROVIDER__API_KEY");
        assert_eq!(to_env_var("alerts.dir"), "CAMPO_ALERTS__DIR");
    }
}
