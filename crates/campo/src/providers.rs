pub mod base;
pub mod chat;
pub mod token;

#[cfg(test)]
pub mod mock;
