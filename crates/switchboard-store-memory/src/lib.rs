//! In-process backend for the Switchboard dashboard state.
//!
//! Every collection sits behind its own [`tokio::sync::Mutex`], so appends to
//! one log never wait on another. Nothing survives a restart.

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::MemoryStore;

#[cfg(test)]
mod tests;
