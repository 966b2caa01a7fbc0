use std::sync::Arc;

use super::kind::AgentKind;
use crate::agent::{Agent, AgentContext, AgentHealth, AgentResult, TaskParams};
use crate::errors::{CampoError, Result};
use crate::locale::{Language, Region};
use crate::prompt_template::{PromptContext, PromptTemplate};
use crate::search::queries::topic_queries;

const DEFAULT_BRIEF_LIMIT: usize = 3;

/// Keep at most `limit` characters, never splitting a code point.
fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Agent for one `AgentKind`: search, prompt, analyse, record.
pub struct TaskAgent {
    kind: AgentKind,
    ctx: Arc<AgentContext>,
    template: PromptTemplate,
    brief: Option<PromptTemplate>,
}

impl TaskAgent {
    /// Build with the kind's prompt, or `<template_dir>/<task>.txt` when that file exists.
    pub fn new(kind: AgentKind, ctx: Arc<AgentContext>) -> Result<Self> {
        let override_path = ctx
            .settings
            .template_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.txt", kind.task())))
            .filter(|path| path.is_file());

        let template = match override_path {
            Some(path) => {
                tracing::debug!("Loading {} template from {}", kind, path.display());
                PromptTemplate::from_file(kind.task(), path)?
            }
            None => PromptTemplate::new(kind.task(), kind.template())?,
        };

        let brief = kind
            .brief_template()
            .map(|body| PromptTemplate::new(format!("{}_brief", kind.task()), body))
            .transpose()?;

        Ok(Self {
            kind,
            ctx,
            template,
            brief,
        })
    }

    /// Replace the analysis prompt.
    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    fn products(&self, region: &Region, params: &TaskParams) -> Vec<String> {
        match &params.products {
            Some(products) if !products.is_empty() => products.clone(),
            _ => region.products(),
        }
    }

    /// Every query an execution issues, in order.
    pub fn queries(&self, region: &Region, params: &TaskParams, date_text: &str) -> Vec<String> {
        let mut queries = topic_queries(self.kind.topic(), region);
        let r = region.search;

        match self.kind {
            AgentKind::Flood => queries.extend([
                format!("inundaciones {} {} agricultura", r, date_text),
                format!("alerta lluvia {} {} cultivos", r, date_text),
                format!("emergencia {} {} cultivos agua", r, date_text),
            ]),
            AgentKind::Market => queries.extend(
                self.products(region, params)
                    .iter()
                    .map(|product| format!("precio {} {} mercado {}", product, r, date_text)),
            ),
            _ => {}
        }

        queries
    }

    fn prompt_context(&self, region: &Region, language: Language, params: &TaskParams) -> PromptContext {
        let today = self.ctx.clock.local_now().date_naive();
        PromptContext {
            agent_name: self.kind.agent_name().to_string(),
            region: region.display.to_string(),
            language: language.to_string(),
            date_context: language.date_context(today, self.ctx.date_range_days(params)),
            products: self.products(region, params).join(", "),
            topic: self.kind.topic().to_string(),
            limit: params.limit.unwrap_or(DEFAULT_BRIEF_LIMIT),
            ..PromptContext::default()
        }
    }

    fn analyze(&self, region: &Region, language: Language, params: &TaskParams) -> Result<(String, usize)> {
        let today = self.ctx.clock.local_now().date_naive();
        let queries = self.queries(region, params, &language.date_text(today));
        let results = self.ctx.search.search_multiple(&queries);

        let combined = results.join("\n");
        let mut context = self.prompt_context(region, language, params);
        context.data = truncate_chars(&combined, self.ctx.settings.context_limit).to_string();

        let prompt = self.template.render(&context)?;
        let analysis = self
            .ctx
            .chat
            .send(&prompt, language.system_prompt(), &self.ctx.sampling)?;

        self.ctx
            .alerts
            .append(&self.kind.alert_type(), &analysis, region.display)?;

        Ok((analysis, results.len()))
    }
}

impl Agent for TaskAgent {
    fn name(&self) -> &str {
        self.kind.agent_name()
    }

    fn kind(&self) -> AgentKind {
        self.kind
    }

    fn description(&self) -> &str {
        self.kind.description()
    }

    fn execute(&self, params: &TaskParams) -> AgentResult {
        let region = self.ctx.region(params);
        let language = self.ctx.language(params);
        tracing::info!("{} analysing {} in {}", self.kind, region.display, language);

        match self.analyze(&region, language, params) {
            Ok((analysis, sources)) => {
                tracing::info!("{} completed with {} sources", self.kind, sources);
                AgentResult::completed(self.kind, &region, language, analysis, sources)
            }
            Err(e) => {
                tracing::error!("{} failed for {}: {}", self.kind, region.display, e);
                AgentResult::failed(self.kind, &region, language, &e)
            }
        }
    }

    fn health_check(&self) -> AgentHealth {
        if let Err(e) = self.ctx.chat.validate() {
            return AgentHealth::Failing(e.to_string());
        }
        if !self.ctx.search.is_available() {
            return AgentHealth::Degraded("web search unavailable".to_string());
        }
        AgentHealth::Operational
    }

    fn quick_brief(&self, params: &TaskParams) -> Result<String> {
        let template = self.brief.as_ref().ok_or_else(|| {
            CampoError::Validation(format!("{} has no quick brief", self.kind))
        })?;

        let region = self.ctx.region(params);
        let language = self.ctx.language(params);
        let today = self.ctx.clock.local_now().date_naive();
        let query = self
            .kind
            .brief_query(&region, &language.date_text(today))
            .ok_or_else(|| CampoError::Validation(format!("{} has no quick brief", self.kind)))?;

        let found = self.ctx.search.search(&query);
        let mut context = self.prompt_context(&region, language, params);
        context.data = truncate_chars(&found, self.ctx.settings.context_limit).to_string();

        let prompt = template.render(&context)?;
        self.ctx
            .chat
            .send(&prompt, language.system_prompt(), &self.ctx.sampling)
    }
}
