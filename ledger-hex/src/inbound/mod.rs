//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the application layer.

pub mod credentials;
mod handlers;
mod server;

pub use server::HttpServer;
