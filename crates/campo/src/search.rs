pub mod adapter;
pub mod duckduckgo;
pub mod queries;

pub use adapter::{SearchAdapter, SearchBackend};
pub use duckduckgo::DuckDuckGoSearch;
