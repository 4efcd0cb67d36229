//! Core types and trait definitions for the Switchboard dashboard.
//!
//! This crate is deliberately free of HTTP and runtime dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod ai_config;
pub mod analytics;
pub mod chat;
pub mod crm;
pub mod error;
pub mod event;
pub mod intent;
pub mod job;
pub mod social;
pub mod store;
pub mod training;

pub use error::{Error, Result};
