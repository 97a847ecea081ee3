pub mod config;
pub mod credential_store;

pub use config::*;
