pub mod kind;
pub mod task;
mod templates;

pub use kind::AgentKind;
pub use task::TaskAgent;
