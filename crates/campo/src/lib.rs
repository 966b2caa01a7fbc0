pub mod agent;
pub mod agents;
pub mod alerts;
pub mod clock;
pub mod config;
pub mod errors;
pub mod locale;
pub mod prompt_template;
pub mod providers;
pub mod registry;
pub mod search;
