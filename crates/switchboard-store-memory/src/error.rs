//! Error type for `switchboard-store-memory`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] switchboard_core::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
