//! Encoding and decoding between the core records and the JSON documents
//! stored in the `documents` table.
//!
//! Timestamps are stored as RFC 3339 strings. Documents are compact JSON in
//! the records' own serde shape.

use chrono::{DateTime, Utc};
use nook_core::store::{Collection, Document, Snapshot};
use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

// ─── Documents ───────────────────────────────────────────────────────────────

/// A row of the `documents` table, as read.
pub struct RawDocument {
  pub key:        String,
  pub value_json: String,
}

pub fn encode_document<T>(collection: Collection, value: &T) -> Result<String>
where
  T: Serialize + ?Sized,
{
  serde_json::to_string(value).map_err(|source| Error::Encode {
    key: collection.key(),
    source,
  })
}

/// Encode one document for writing. `None` means the row is to be removed.
pub fn encode_write(document: &Document<'_>) -> Result<(&'static str, Option<String>)> {
  let collection = document.collection();
  let value_json = match document {
    Document::Accounts(accounts) => Some(encode_document(collection, accounts)?),
    Document::Residents(residents) => Some(encode_document(collection, residents)?),
    Document::Messages(messages) => Some(encode_document(collection, messages)?),
    Document::Session(Some(session)) => Some(encode_document(collection, session)?),
    Document::Session(None) => None,
  };
  Ok((collection.key(), value_json))
}

pub fn decode_document<T: DeserializeOwned>(raw: &RawDocument) -> Result<T> {
  serde_json::from_str(&raw.value_json).map_err(|source| Error::Corrupt {
    key: raw.key.clone(),
    source,
  })
}

/// Assemble a [`Snapshot`] from whatever rows exist. Missing rows leave the
/// defaults in place; rows with unknown keys are ignored.
pub fn decode_snapshot(rows: &[RawDocument]) -> Result<Snapshot> {
  let mut snapshot = Snapshot::default();

  for raw in rows {
    match Collection::ALL.into_iter().find(|c| c.key() == raw.key) {
      Some(Collection::Accounts) => snapshot.accounts = decode_document(raw)?,
      Some(Collection::Residents) => snapshot.residents = decode_document(raw)?,
      Some(Collection::Messages) => snapshot.messages = decode_document(raw)?,
      Some(Collection::Session) => snapshot.session = decode_document(raw)?,
      None => warn!(key = %raw.key, "ignoring unknown document"),
    }
  }

  Ok(snapshot)
}
