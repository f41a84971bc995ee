//! [`CommunityState`]: the in-memory collections and the current session.

use chrono::{NaiveDate, Utc};
use tracing::warn;

use crate::{
  Result,
  auth::hash_password,
  model::{Account, Message, Resident, ResidentId, Session, UnitAddress},
  store::{Collection, Document, Snapshot},
};

pub const DEMO_EMAIL: &str = "demo@example.com";
pub const DEMO_PASSWORD: &str = "demo123";

/// Everything one client process knows about its community.
///
/// Accounts and residents are separate collections that share ids: every
/// account has a resident record holding its profile, but residents added
/// by someone else have no account. Operations live in [`crate::auth`] and
/// [`crate::messaging`]; directory reads go through [`crate::directory`]
/// over [`CommunityState::residents`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommunityState {
  pub(crate) accounts:  Vec<Account>,
  pub(crate) residents: Vec<Resident>,
  pub(crate) messages:  Vec<Message>,
  pub(crate) session:   Option<Session>,
}

impl From<Snapshot> for CommunityState {
  fn from(snapshot: Snapshot) -> Self {
    Self {
      accounts:  snapshot.accounts,
      residents: snapshot.residents,
      messages:  snapshot.messages,
      session:   snapshot.session,
    }
  }
}

impl CommunityState {
  pub fn accounts(&self) -> &[Account] { &self.accounts }

  pub fn residents(&self) -> &[Resident] { &self.residents }

  pub fn messages(&self) -> &[Message] { &self.messages }

  pub fn session(&self) -> Option<&Session> { self.session.as_ref() }

  /// Borrow the collection stored as `collection`.
  pub fn document(&self, collection: Collection) -> Document<'_> {
    match collection {
      Collection::Accounts => Document::Accounts(&self.accounts),
      Collection::Residents => Document::Residents(&self.residents),
      Collection::Messages => Document::Messages(&self.messages),
      Collection::Session => Document::Session(self.session.as_ref()),
    }
  }

  /// Copy the collections out in their persisted shape.
  pub fn to_snapshot(&self) -> Snapshot {
    Snapshot {
      accounts:  self.accounts.clone(),
      residents: self.residents.clone(),
      messages:  self.messages.clone(),
      session:   self.session.clone(),
    }
  }

  pub fn resident(&self, id: ResidentId) -> Option<&Resident> {
    self.residents.iter().find(|r| r.id == id)
  }

  pub(crate) fn resident_mut(&mut self, id: ResidentId) -> Option<&mut Resident> {
    self.residents.iter_mut().find(|r| r.id == id)
  }

  /// The signed-in account, if any.
  pub fn current_account(&self) -> Option<&Account> {
    let session = self.session.as_ref()?;
    self.accounts.iter().find(|a| a.id == session.account_id)
  }

  /// The resident profile of the signed-in account, if any.
  pub fn current_resident(&self) -> Option<&Resident> {
    self.resident(self.session.as_ref()?.account_id)
  }

  pub fn unit_taken(&self, address: &UnitAddress) -> bool {
    self.residents.iter().any(|r| &r.address == address)
  }

  /// Materialise the demo account when no account exists yet.
  ///
  /// Returns `true` when the collections changed. Skipped, with a warning,
  /// if another resident already occupies the demo unit.
  pub fn seed_demo(&mut self) -> Result<bool> {
    if !self.accounts.is_empty() {
      return Ok(false);
    }

    let address = UnitAddress::parse("A", "1", "101")?;
    if self.unit_taken(&address) {
      warn!(%address, "demo unit already occupied; not seeding demo account");
      return Ok(false);
    }

    let id = ResidentId::new();
    let joined_date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default();

    self.accounts.push(Account {
      id,
      email: DEMO_EMAIL.to_owned(),
      password_hash: hash_password(DEMO_PASSWORD)?,
      created_at: Utc::now(),
    });
    self.residents.push(Resident {
      id,
      name: "Demo User".to_owned(),
      email: Some(DEMO_EMAIL.to_owned()),
      phone: Some("555-0123".to_owned()),
      address,
      joined_date,
      is_online: false,
      registered_by: None,
    });
    Ok(true)
  }
}
