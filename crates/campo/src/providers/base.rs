use crate::config::SamplingConfig;
use crate::errors::Result;

/// A hosted chat model that turns a system + user message pair into text.
pub trait ChatProvider: Send + Sync {
    /// Send one exchange and return the first choice's content.
    fn send(&self, user_message: &str, system_message: &str, sampling: &SamplingConfig)
        -> Result<String>;

    /// Check that credentials are usable without spending a completion.
    fn validate(&self) -> Result<()>;
}
