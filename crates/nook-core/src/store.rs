//! The `RecordStore` trait: the persistence port of the community state.
//!
//! The trait is implemented by storage backends (e.g. `nook-store-sqlite`).
//! The state is persisted as four top-level documents; each mutation
//! rewrites every document it touched in full, in a single batch.

use std::future::Future;

use crate::model::{Account, Message, Resident, Session};

/// The persisted documents, keyed by [`Collection::key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
  Accounts,
  Residents,
  Messages,
  Session,
}

impl Collection {
  pub const ALL: [Collection; 4] = [
    Collection::Accounts,
    Collection::Residents,
    Collection::Messages,
    Collection::Session,
  ];

  /// Storage key of the document.
  pub fn key(self) -> &'static str {
    match self {
      Collection::Accounts => "accounts",
      Collection::Residents => "residents",
      Collection::Messages => "messages",
      Collection::Session => "current_session",
    }
  }
}

/// Everything a store holds, as loaded at start-up. Absent documents load as
/// empty collections and no session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
  pub accounts:  Vec<Account>,
  pub residents: Vec<Resident>,
  pub messages:  Vec<Message>,
  pub session:   Option<Session>,
}

/// One document to replace, borrowed from the in-memory collections.
#[derive(Debug, Clone, Copy)]
pub enum Document<'a> {
  Accounts(&'a [Account]),
  Residents(&'a [Resident]),
  Messages(&'a [Message]),
  /// `None` removes the stored session.
  Session(Option<&'a Session>),
}

impl Document<'_> {
  pub fn collection(&self) -> Collection {
    match self {
      Document::Accounts(_) => Collection::Accounts,
      Document::Residents(_) => Collection::Residents,
      Document::Messages(_) => Collection::Messages,
      Document::Session(_) => Collection::Session,
    }
  }
}

/// Abstraction over a durable key-value backend.
///
/// All methods return `Send` futures so the trait can be used from
/// multi-threaded async runtimes.
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read every document. Missing documents default to empty; documents that
  /// exist but cannot be decoded are an error.
  fn load(&self) -> impl Future<Output = Result<Snapshot, Self::Error>> + Send + '_;

  /// Replace every document in `documents` as one unit: either all of them
  /// are written, or the store is left as it was.
  fn save<'a>(
    &'a self,
    documents: &'a [Document<'a>],
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
