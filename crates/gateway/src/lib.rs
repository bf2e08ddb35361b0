//! HTTP gateway for Sentinel.
//!
//! This crate provides:
//! - The axum server exposing the orchestrated `/v1/agents/execute` endpoint
//!   and standalone per-specialist endpoints
//! - JWT token issuance and validation (identity verification itself is
//!   delegated to an external identity store)
//! - Tracing and Prometheus metrics bootstrap

pub mod auth;
pub mod server;
pub mod telemetry;

pub use auth::AuthService;
pub use server::{GatewayConfig, GatewayServer};
pub use telemetry::{configure_tracing, setup_metrics_recorder};
