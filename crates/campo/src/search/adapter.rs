use crate::config::SearchSettings;
use crate::errors::Result;

use super::duckduckgo::DuckDuckGoSearch;

const UNAVAILABLE_PREFIX: &str = "❌ Búsqueda web no disponible para:";
const ERROR_PREFIX: &str = "❌ Error en búsqueda web:";

/// Something that can answer a web query with plain text.
pub trait SearchBackend: Send + Sync {
    fn run(&self, query: &str) -> Result<String>;
}

/// Text standing in for results when no backend could be initialized.
pub fn unavailable_text(query: &str) -> String {
    format!("{} {}", UNAVAILABLE_PREFIX, query)
}

pub fn error_text(error: &dyn std::fmt::Display) -> String {
    format!("{} {}", ERROR_PREFIX, error)
}

/// True for the placeholder strings produced instead of real results.
pub fn is_sentinel(text: &str) -> bool {
    text.starts_with(UNAVAILABLE_PREFIX) || text.starts_with(ERROR_PREFIX)
}

/// Wraps a search backend so that failures come back as text, never as errors.
///
/// Callers get the same `String` for real results and for sentinels and pass
/// both into prompts unchanged.
pub struct SearchAdapter {
    backend: Option<Box<dyn SearchBackend>>,
}

impl SearchAdapter {
    pub fn new(backend: Box<dyn SearchBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    pub fn unavailable() -> Self {
        Self { backend: None }
    }

    /// Keep the backend if it initialized, otherwise degrade to sentinels.
    pub fn from_init<B: SearchBackend + 'static>(backend: Result<B>) -> Self {
        match backend {
            Ok(backend) => {
                tracing::info!("Web search backend initialized");
                Self::new(Box::new(backend))
            }
            Err(e) => {
                tracing::warn!("Could not initialize web search backend: {}", e);
                Self::unavailable()
            }
        }
    }

    pub fn from_settings(settings: &SearchSettings) -> Self {
        if !settings.enabled {
            tracing::info!("Web search disabled by configuration");
            return Self::unavailable();
        }
        Self::from_init(DuckDuckGoSearch::new(&settings.endpoint, settings.max_results))
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    pub fn search(&self, query: &str) -> String {
        let Some(backend) = &self.backend else {
            return unavailable_text(query);
        };

        tracing::info!("Searching web: {}", query);
        match backend.run(query) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Search for {:?} failed: {}", query, e);
                error_text(&e)
            }
        }
    }

    /// One entry per query, in input order.
    pub fn search_multiple(&self, queries: &[String]) -> Vec<String> {
        queries.iter().map(|query| self.search(query)).collect()
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use crate::errors::CampoError;
    use std::sync::Mutex;

    /// Backend answering from a closure and recording every query.
    pub struct FnBackend<F> {
        answer: F,
        pub queries: Mutex<Vec<String>>,
    }

    impl<F> FnBackend<F>
    where
        F: Fn(&str) -> Result<String> + Send + Sync,
    {
        pub fn new(answer: F) -> Self {
            Self {
                answer,
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    impl<F> SearchBackend for FnBackend<F>
    where
        F: Fn(&str) -> Result<String> + Send + Sync,
    {
        fn run(&self, query: &str) -> Result<String> {
            self.queries.lock().unwrap().push(query.to_string());
            (self.answer)(query)
        }
    }

    pub fn echo_backend() -> FnBackend<impl Fn(&str) -> Result<String> + Send + Sync> {
        FnBackend::new(|q: &str| Ok(format!("results for {}", q)))
    }

    pub fn failing_on(needle: &'static str) -> FnBackend<impl Fn(&str) -> Result<String> + Send + Sync> {
        FnBackend::new(move |q: &str| {
            if q.contains(needle) {
                Err(CampoError::Parse("rate limited".to_string()))
            } else {
                Ok(format!("results for {}", q))
            }
        })
    }
}
