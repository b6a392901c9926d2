pub mod api;
pub mod config;
pub mod corpus;
pub mod errors;
pub mod llm;
pub mod logging;
pub mod models;
pub mod rag;
pub mod registry;

#[cfg(test)]
mod config_tests;
#[cfg(test)]
pub mod tests;

pub use config::AppConfig;
pub use errors::*;
