//! Error types for `nook-core`.

use thiserror::Error;

use crate::model::{ResidentId, UnitAddress};

#[derive(Debug, Error)]
pub enum Error {
  #[error("missing required field: {0}")]
  MissingField(&'static str),

  #[error("passwords do not match")]
  PasswordMismatch,

  #[error("email already registered: {0}")]
  DuplicateEmail(String),

  #[error("unit {0} is already registered")]
  DuplicateUnit(UnitAddress),

  #[error("invalid email or password")]
  InvalidCredentials,

  #[error("message text is empty")]
  EmptyMessage,

  #[error("no active session; sign in first")]
  NoActiveSession,

  #[error("unit number must be a positive integer, got {0:?}")]
  InvalidUnitNumber(String),

  #[error("resident not found: {0}")]
  RecipientNotFound(ResidentId),

  #[error("password hashing failed: {0}")]
  PasswordHash(String),

  #[error("record store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error raised at the [`RecordStore`](crate::store::RecordStore)
  /// boundary.
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
