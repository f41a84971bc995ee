//! Error type for `nook-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The database could not be opened, queried or written.
  #[error("record store unavailable: {0}")]
  Unavailable(#[from] tokio_rusqlite::Error),

  /// A stored document exists but does not decode.
  #[error("stored document {key:?} is corrupt: {source}")]
  Corrupt {
    key:    String,
    #[source]
    source: serde_json::Error,
  },

  #[error("failed to encode document {key:?}: {source}")]
  Encode {
    key:    &'static str,
    #[source]
    source: serde_json::Error,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
