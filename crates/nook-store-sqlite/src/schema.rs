//! SQL schema for the Nook SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per persisted collection; value_json holds the whole document.
-- A missing row means the collection is empty (or, for the session, absent).
CREATE TABLE IF NOT EXISTS documents (
    key         TEXT PRIMARY KEY,  -- 'accounts' | 'residents' | 'messages' | 'current_session'
    value_json  TEXT NOT NULL,
    updated_at  TEXT NOT NULL      -- ISO 8601 UTC
);

PRAGMA user_version = 1;
";
