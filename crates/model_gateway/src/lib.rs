//! Model gateway for Sentinel.
//!
//! This crate provides:
//! - Rig-based LLM client adapters (OpenAI, Anthropic, OpenAI-compatible)
//! - Configuration-driven client construction with fail-loud credential checks
//! - A bounded-timeout decorator so a stalled backend call fails the request
//!   instead of hanging it

pub mod factory;
pub mod rig_client;
pub mod timeout;

pub use factory::client_from_config;
pub use rig_client::{RigConfig, RigLlmClient, RigProvider};
pub use timeout::TimeoutClient;
