//! HTTP API module for the question-answering service

pub mod handlers;
pub mod routes;
pub mod server;
pub mod types;

pub use server::serve_api;
