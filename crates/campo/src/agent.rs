use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::agents::AgentKind;
use crate::alerts::AlertStore;
use crate::clock::{Clock, SystemClock};
use crate::config::{AgentSettings, SamplingConfig, Settings};
use crate::errors::{CampoError, Result};
use crate::locale::{Language, Region};
use crate::providers::base::ChatProvider;
use crate::providers::chat::ChatClient;
use crate::search::SearchAdapter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Completed,
    Error,
}

/// Per-run parameters. Anything left unset falls back to the configured defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskParams {
    pub region: Option<String>,
    pub language: Option<String>,
    pub products: Option<Vec<String>>,
    pub date_range_days: Option<u32>,
    pub limit: Option<usize>,
}

impl TaskParams {
    pub fn for_region(region: impl Into<String>) -> Self {
        Self {
            region: Some(region.into()),
            ..Self::default()
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// Outcome of one agent execution. Only the analysis text is persisted, in the alert log.
#[derive(Debug, Clone, Serialize)]
pub struct AgentResult {
    pub agent: String,
    pub task: String,
    pub region: String,
    pub language: String,
    pub status: AgentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub data_sources: usize,
}

impl AgentResult {
    pub fn completed(
        kind: AgentKind,
        region: &Region,
        language: Language,
        analysis: String,
        data_sources: usize,
    ) -> Self {
        Self {
            agent: kind.agent_name().to_string(),
            task: kind.task().to_string(),
            region: region.display.to_string(),
            language: language.to_string(),
            status: AgentStatus::Completed,
            analysis: Some(analysis),
            error: None,
            data_sources,
        }
    }

    pub fn failed(kind: AgentKind, region: &Region, language: Language, error: &CampoError) -> Self {
        Self {
            agent: kind.agent_name().to_string(),
            task: kind.task().to_string(),
            region: region.display.to_string(),
            language: language.to_string(),
            status: AgentStatus::Error,
            analysis: None,
            error: Some(error.to_string()),
            data_sources: 0,
        }
    }

    /// Error record for a name nothing is registered under.
    pub fn not_found(name: &str) -> Self {
        Self {
            agent: name.to_string(),
            task: String::new(),
            region: String::new(),
            language: String::new(),
            status: AgentStatus::Error,
            analysis: None,
            error: Some(CampoError::NotFound(name.to_string()).to_string()),
            data_sources: 0,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == AgentStatus::Completed
    }

    /// Human-readable line, prefixed with a success or failure marker.
    pub fn headline(&self) -> String {
        match (&self.status, &self.error) {
            (AgentStatus::Completed, _) => format!("✅ {} completed for {}", self.agent, self.region),
            (AgentStatus::Error, Some(error)) => format!("❌ {}: {}", self.agent, error),
            (AgentStatus::Error, None) => format!("❌ {}: failed", self.agent),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentHealth {
    Operational,
    /// Runs, but with reduced inputs (e.g. search sentinels instead of results).
    Degraded(String),
    Failing(String),
}

impl AgentHealth {
    /// Whether the dependencies validate well enough to execute.
    pub fn is_ready(&self) -> bool {
        !matches!(self, AgentHealth::Failing(_))
    }
}

impl fmt::Display for AgentHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentHealth::Operational => write!(f, "✅ Operativo"),
            AgentHealth::Degraded(reason) => write!(f, "⚠️ Con problemas: {}", reason),
            AgentHealth::Failing(reason) => write!(f, "❌ Error: {}", reason),
        }
    }
}

/// A task-specific pipeline from web search to a stored analysis.
pub trait Agent: Send + Sync {
    fn name(&self) -> &str;

    fn kind(&self) -> AgentKind;

    fn description(&self) -> &str;

    /// Run the whole pipeline. Failures come back as `status = error` records.
    fn execute(&self, params: &TaskParams) -> AgentResult;

    fn health_check(&self) -> AgentHealth;

    /// Short on-demand answer that is not written to the alert log.
    fn quick_brief(&self, _params: &TaskParams) -> Result<String> {
        Err(CampoError::Validation(format!(
            "{} has no quick brief",
            self.name()
        )))
    }
}

/// Collaborators shared by every agent.
pub struct AgentContext {
    pub chat: Arc<dyn ChatProvider>,
    pub search: Arc<SearchAdapter>,
    pub alerts: Arc<AlertStore>,
    pub clock: Arc<dyn Clock>,
    pub settings: AgentSettings,
    pub sampling: SamplingConfig,
}

impl AgentContext {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let chat = ChatClient::new(&settings.provider, clock.clone())?;

        Ok(Self {
            chat: Arc::new(chat),
            search: Arc::new(SearchAdapter::from_settings(&settings.search)),
            alerts: Arc::new(AlertStore::from_settings(&settings.alerts, clock.clone())),
            clock,
            settings: settings.agents.clone(),
            sampling: settings.provider.sampling.clone(),
        })
    }

    pub fn region(&self, params: &TaskParams) -> Region {
        Region::resolve(params.region.as_deref(), &self.settings.default_region)
    }

    pub fn language(&self, params: &TaskParams) -> Language {
        params
            .language
            .as_deref()
            .and_then(Language::parse)
            .unwrap_or_else(|| Language::resolve(Some(&self.settings.default_language)))
    }

    pub fn date_range_days(&self, params: &TaskParams) -> u32 {
        params.date_range_days.unwrap_or(self.settings.date_range_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::AgentKind;

    #[test]
    fn test_result_serialization_shape() {
        let region = Region::resolve(Some("colombia"), "Perú");
        let result = AgentResult::completed(
            AgentKind::Flood,
            &region,
            Language::Espanol,
            "texto".to_string(),
            9,
        );
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["status"], "completed");
        assert_eq!(value["agent"], "PREDICTOR_INUNDACIONES");
        assert_eq!(value["region"], "Colombia");
        assert_eq!(value["language"], "ESPAÑOL");
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_not_found_record() {
        let result = AgentResult::not_found("FOO");
        assert_eq!(result.status, AgentStatus::Error);
        assert!(result.error.as_deref().unwrap().contains("FOO"));
        assert!(result.headline().starts_with("❌ FOO"));
    }

    #[test]
    fn test_health_readiness() {
        assert!(AgentHealth::Operational.is_ready());
        assert!(AgentHealth::Degraded("search".into()).is_ready());
        assert!(!AgentHealth::Failing("auth".into()).is_ready());
        assert_eq!(AgentHealth::Operational.to_string(), "✅ Operativo");
    }
}
