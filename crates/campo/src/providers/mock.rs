use std::sync::Mutex;

use crate::config::SamplingConfig;
use crate::errors::{CampoError, Result};
use crate::providers::base::ChatProvider;

/// A mock provider that returns pre-configured responses and records prompts
pub struct MockProvider {
    responses: Mutex<Vec<Result<String>>>,
    pub prompts: Mutex<Vec<(String, String)>>,
    healthy: bool,
}

impl MockProvider {
    pub fn new(responses: Vec<Result<String>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            prompts: Mutex::new(Vec::new()),
            healthy: true,
        }
    }

    pub fn unhealthy() -> Self {
        Self {
            healthy: false,
            ..Self::new(vec![])
        }
    }

    pub fn last_prompt(&self) -> Option<(String, String)> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

impl ChatProvider for MockProvider {
    fn send(
        &self,
        user_message: &str,
        system_message: &str,
        _sampling: &SamplingConfig,
    ) -> Result<String> {
        self.prompts
            .lock()
            .unwrap()
            .push((user_message.to_string(), system_message.to_string()));

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(String::new())
        } else {
            responses.remove(0)
        }
    }

    fn validate(&self) -> Result<()> {
        if self.healthy {
            Ok(())
        } else {
            Err(CampoError::Auth("mock credentials rejected".to_string()))
        }
    }
}
