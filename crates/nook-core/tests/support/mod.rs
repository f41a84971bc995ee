//! An in-memory [`RecordStore`] for driving `Community` in tests.

#![allow(dead_code)]

use std::sync::{
  Mutex,
  atomic::{AtomicBool, Ordering},
};

use nook_core::{
  form::SignUpForm,
  store::{Collection, Document, RecordStore, Snapshot},
};

#[derive(Debug, thiserror::Error)]
#[error("memory store rejected the write")]
pub struct WriteRejected;

/// Holds the documents in a [`Snapshot`] and records which keys were
/// written, in order.
///
/// A batch is applied to a copy and only swapped in once every document in
/// it was accepted, so a rejected batch leaves the snapshot untouched.
#[derive(Default)]
pub struct MemoryStore {
  snapshot:    Mutex<Snapshot>,
  writes:      Mutex<Vec<&'static str>>,
  fail_writes: AtomicBool,
  reject:      Mutex<Option<Collection>>,
}

impl MemoryStore {
  pub fn with(snapshot: Snapshot) -> Self {
    Self { snapshot: Mutex::new(snapshot), ..Self::default() }
  }

  pub fn snapshot(&self) -> Snapshot { self.snapshot.lock().unwrap().clone() }

  pub fn writes(&self) -> Vec<&'static str> { self.writes.lock().unwrap().clone() }

  pub fn clear_writes(&self) { self.writes.lock().unwrap().clear(); }

  pub fn fail_writes(&self, fail: bool) { self.fail_writes.store(fail, Ordering::SeqCst); }

  /// Reject any batch that reaches a write of `collection`, after the
  /// documents before it in the batch were staged.
  pub fn reject(&self, collection: Option<Collection>) { *self.reject.lock().unwrap() = collection; }

  fn accept(&self, collection: Collection) -> Result<(), WriteRejected> {
    if self.fail_writes.load(Ordering::SeqCst) || *self.reject.lock().unwrap() == Some(collection) {
      return Err(WriteRejected);
    }
    Ok(())
  }
}

impl RecordStore for MemoryStore {
  type Error = WriteRejected;

  async fn load(&self) -> Result<Snapshot, WriteRejected> { Ok(self.snapshot()) }

  async fn save<'a>(&'a self, documents: &'a [Document<'a>]) -> Result<(), WriteRejected> {
    let mut staged = self.snapshot();
    let mut keys = Vec::new();
    for document in documents {
      self.accept(document.collection())?;
      match *document {
        Document::Accounts(accounts) => staged.accounts = accounts.to_vec(),
        Document::Residents(residents) => staged.residents = residents.to_vec(),
        Document::Messages(messages) => staged.messages = messages.to_vec(),
        Document::Session(session) => staged.session = session.cloned(),
      }
      keys.push(document.collection().key());
    }
    *self.snapshot.lock().unwrap() = staged;
    self.writes.lock().unwrap().extend(keys);
    Ok(())
  }
}

pub fn sign_up_form(email: &str, name: &str, zone: &str, building: &str, unit: &str) -> SignUpForm {
  SignUpForm {
    email:            email.into(),
    password:         "correct horse".into(),
    confirm_password: "correct horse".into(),
    name:             name.into(),
    zone_id:          zone.into(),
    building_id:      building.into(),
    unit_number:      unit.into(),
    phone:            String::new(),
  }
}
