//! [`SqliteStore`]: the SQLite implementation of [`RecordStore`].

use std::path::Path;

use chrono::Utc;
use tracing::debug;

use nook_core::store::{Document, RecordStore, Snapshot};

use crate::{
  Result,
  encode::{RawDocument, decode_snapshot, encode_dt, encode_write},
  schema::SCHEMA,
};

const UPSERT: &str = "INSERT INTO documents (key, value_json, updated_at) VALUES (?1, ?2, ?3)
   ON CONFLICT (key) DO UPDATE SET
     value_json = excluded.value_json,
     updated_at = excluded.updated_at";

const DELETE: &str = "DELETE FROM documents WHERE key = ?1";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Nook record store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Write a single raw row, bypassing encoding.
  #[cfg(test)]
  pub(crate) async fn put(&self, key: &'static str, value_json: String) -> Result<()> {
    let at_str = encode_dt(Utc::now());
    self
      .conn
      .call(move |conn| {
        conn.execute(UPSERT, rusqlite::params![key, value_json, at_str])?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = crate::Error;

  async fn load(&self) -> Result<Snapshot> {
    let rows: Vec<RawDocument> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT key, value_json FROM documents")?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawDocument {
              key:        row.get(0)?,
              value_json: row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    debug!(documents = rows.len(), "documents read");
    decode_snapshot(&rows)
  }

  async fn save<'a>(&'a self, documents: &'a [Document<'a>]) -> Result<()> {
    // Encode everything up front so a bad document fails before any row is
    // touched.
    let writes = documents
      .iter()
      .map(encode_write)
      .collect::<Result<Vec<_>>>()?;
    let at_str = encode_dt(Utc::now());
    let keys: Vec<&'static str> = writes.iter().map(|(key, _)| *key).collect();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        for (key, value_json) in &writes {
          match value_json {
            Some(json) => tx.execute(UPSERT, rusqlite::params![key, json, at_str])?,
            None => tx.execute(DELETE, rusqlite::params![key])?,
          };
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    debug!(?keys, "documents written");
    Ok(())
  }
}
