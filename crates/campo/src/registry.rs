use std::sync::Arc;

use serde::Serialize;
use strum::IntoEnumIterator;

use crate::agent::{Agent, AgentContext, AgentHealth, AgentResult, TaskParams};
use crate::agents::{AgentKind, TaskAgent};
use crate::alerts::AlertStore;
use crate::errors::{CampoError, Result};

/// Number of recent results carried in a summary.
const SUMMARY_TAIL: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct ExecutionSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Percentage of completed executions, 0 when nothing ran.
    pub success_rate: f64,
    pub last_results: Vec<AgentResult>,
}

/// Named agents, run sequentially in registration order.
pub struct AgentRegistry {
    ctx: Arc<AgentContext>,
    agents: Vec<Box<dyn Agent>>,
    results: Vec<AgentResult>,
}

impl AgentRegistry {
    pub fn new(ctx: Arc<AgentContext>) -> Self {
        Self {
            ctx,
            agents: Vec::new(),
            results: Vec::new(),
        }
    }

    /// A registry with one agent per `AgentKind`.
    pub fn with_all_agents(ctx: Arc<AgentContext>) -> Result<Self> {
        let mut registry = Self::new(ctx.clone());
        for kind in AgentKind::iter() {
            registry.register(Box::new(TaskAgent::new(kind, ctx.clone())?));
        }
        Ok(registry)
    }

    /// Add an agent. A name already present is replaced where it stands.
    pub fn register(&mut self, agent: Box<dyn Agent>) {
        match self.agents.iter().position(|a| a.name() == agent.name()) {
            Some(idx) => {
                tracing::debug!("Replacing agent {}", agent.name());
                self.agents[idx] = agent;
            }
            None => {
                tracing::debug!("Registered agent {}", agent.name());
                self.agents.push(agent);
            }
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.agents.iter().map(|a| a.name()).collect()
    }

    /// Look up by agent name or task id, ignoring case.
    fn find(&self, name: &str) -> Option<&dyn Agent> {
        self.agents
            .iter()
            .find(|a| {
                a.name().eq_ignore_ascii_case(name) || AgentKind::parse(name) == Some(a.kind())
            })
            .map(|a| a.as_ref())
    }

    /// Run one agent. Unknown names are an error; everything else comes back as a record.
    pub fn try_run(&mut self, name: &str, params: &TaskParams) -> Result<AgentResult> {
        let agent = self
            .find(name)
            .ok_or_else(|| CampoError::NotFound(name.to_string()))?;

        let result = match agent.health_check() {
            AgentHealth::Failing(reason) => {
                tracing::warn!("{} failed its health check: {}", agent.name(), reason);
                let error = CampoError::Validation(reason);
                AgentResult::failed(
                    agent.kind(),
                    &self.ctx.region(params),
                    self.ctx.language(params),
                    &error,
                )
            }
            _ => agent.execute(params),
        };

        self.results.push(result.clone());
        Ok(result)
    }

    /// Run one agent, turning an unknown name into an error record.
    pub fn run(&mut self, name: &str, params: &TaskParams) -> AgentResult {
        match self.try_run(name, params) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("{}", e);
                AgentResult::not_found(name)
            }
        }
    }

    /// Run the named agents in the given order. One failure never stops the batch.
    pub fn run_many<S: AsRef<str>>(&mut self, names: &[S], params: &TaskParams) -> Vec<AgentResult> {
        names
            .iter()
            .map(|name| self.run(name.as_ref(), params))
            .collect()
    }

    pub fn run_all(&mut self, params: &TaskParams) -> Vec<AgentResult> {
        let names: Vec<String> = self.names().into_iter().map(String::from).collect();
        self.run_many(&names, params)
    }

    pub fn status(&self) -> Vec<(String, AgentHealth)> {
        self.agents
            .iter()
            .map(|a| (a.name().to_string(), a.health_check()))
            .collect()
    }

    pub fn describe(&self) -> Vec<(String, String)> {
        self.agents
            .iter()
            .map(|a| (a.name().to_string(), a.description().to_string()))
            .collect()
    }

    /// The shared alert log every run appends to.
    pub fn alerts(&self) -> &AlertStore {
        &self.ctx.alerts
    }

    pub fn start_session(&self, label: &str) -> Result<()> {
        self.ctx.alerts.start_session(label)
    }

    pub fn quick_brief(&self, name: &str, params: &TaskParams) -> Result<String> {
        self.find(name)
            .ok_or_else(|| CampoError::NotFound(name.to_string()))?
            .quick_brief(params)
    }

    /// Every recorded execution, oldest first.
    pub fn history(&self) -> &[AgentResult] {
        &self.results
    }

    pub fn summary(&self) -> ExecutionSummary {
        let total = self.results.len();
        let succeeded = self.results.iter().filter(|r| r.is_completed()).count();
        let success_rate = if total == 0 {
            0.0
        } else {
            succeeded as f64 / total as f64 * 100.0
        };

        ExecutionSummary {
            total,
            succeeded,
            failed: total - succeeded,
            success_rate,
            last_results: self.results[total.saturating_sub(SUMMARY_TAIL)..].to_vec(),
        }
    }
}
