//! The session gate: sign-up, sign-in, sign-out and resident registration.
//!
//! Credentials are argon2 PHC strings; plaintext passwords never leave the
//! form that carried them. Every operation validates fully before touching a
//! collection, so a rejected attempt leaves the state unchanged.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString,
};
use chrono::Utc;
use rand_core::OsRng;
use tracing::{info, warn};

use crate::{
  CommunityState, Error, Result,
  form::{NewAccount, NewResident, ResidentForm, SignUpForm, normalize_email},
  model::{Account, Resident, ResidentId, Session, UnitAddress},
};

// ─── Password hashing ────────────────────────────────────────────────────────

/// Hash `password` with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|e| Error::PasswordHash(e.to_string()))
}

/// Check `password` against a stored PHC string. A malformed hash never
/// verifies.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
  let Ok(parsed) = PasswordHash::new(password_hash) else {
    return false;
  };
  Argon2::default()
    .verify_password(password.as_bytes(), &parsed)
    .is_ok()
}

// ─── Session gate ────────────────────────────────────────────────────────────

impl CommunityState {
  fn ensure_unit_free(&self, address: &UnitAddress) -> Result<()> {
    if self.unit_taken(address) {
      warn!(%address, "rejected registration of occupied unit");
      return Err(Error::DuplicateUnit(address.clone()));
    }
    Ok(())
  }

  fn set_online(&mut self, id: ResidentId, online: bool) {
    if let Some(resident) = self.resident_mut(id) {
      resident.is_online = online;
    }
  }

  /// Create an account and its resident record, and sign it in.
  pub fn sign_up(&mut self, form: SignUpForm) -> Result<Account> {
    let new = NewAccount::try_from(form)?;

    if self.accounts.iter().any(|a| a.email == new.email) {
      warn!("rejected sign-up with an existing email");
      return Err(Error::DuplicateEmail(new.email));
    }
    self.ensure_unit_free(&new.address)?;

    let password_hash = hash_password(&new.password)?;
    let now = Utc::now();
    let id = ResidentId::new();

    let account = Account {
      id,
      email: new.email.clone(),
      password_hash,
      created_at: now,
    };
    let resident = Resident {
      id,
      name: new.name,
      email: Some(new.email),
      phone: new.phone,
      address: new.address,
      joined_date: now.date_naive(),
      is_online: true,
      registered_by: None,
    };

    self.end_session();
    info!(%id, address = %resident.address, "account created");
    self.accounts.push(account.clone());
    self.residents.push(resident);
    self.session = Some(Session { account_id: id, signed_in_at: now });
    Ok(account)
  }

  /// Verify credentials and make that account the current session.
  ///
  /// Any account already signed in is signed out first.
  pub fn sign_in(&mut self, email: &str, password: &str) -> Result<Account> {
    if email.trim().is_empty() {
      return Err(Error::MissingField("email"));
    }
    if password.is_empty() {
      return Err(Error::MissingField("password"));
    }

    let email = normalize_email(email);
    let account = self
      .accounts
      .iter()
      .find(|a| a.email == email)
      .filter(|a| verify_password(password, &a.password_hash))
      .cloned()
      .ok_or_else(|| {
        warn!("rejected sign-in");
        Error::InvalidCredentials
      })?;

    self.end_session();
    self.set_online(account.id, true);
    self.session = Some(Session {
      account_id:   account.id,
      signed_in_at: Utc::now(),
    });
    info!(id = %account.id, "signed in");
    Ok(account)
  }

  /// Mark the current account offline and clear the session. Returns the id
  /// that was signed out, or `None` when nobody was signed in.
  pub fn sign_out(&mut self) -> Option<ResidentId> {
    let id = self.end_session()?;
    info!(%id, "signed out");
    Some(id)
  }

  fn end_session(&mut self) -> Option<ResidentId> {
    let session = self.session.take()?;
    self.set_online(session.account_id, false);
    Some(session.account_id)
  }

  /// Add a resident on behalf of the signed-in account. No login is created
  /// for the new record; it is attributed through `registered_by`.
  ///
  /// When the form has no email, the acting account's email is recorded.
  pub fn register_resident(&mut self, form: ResidentForm) -> Result<Resident> {
    let new = NewResident::try_from(form)?;

    let acting = self.current_resident().ok_or(Error::NoActiveSession)?;
    let registered_by = acting.name.clone();
    let fallback_email = self.current_account().map(|a| a.email.clone());

    self.ensure_unit_free(&new.address)?;

    let resident = Resident {
      id: ResidentId::new(),
      name: new.name,
      email: new.email.or(fallback_email),
      phone: new.phone,
      address: new.address,
      joined_date: Utc::now().date_naive(),
      is_online: false,
      registered_by: Some(registered_by),
    };

    info!(id = %resident.id, address = %resident.address, "resident registered");
    self.residents.push(resident.clone());
    Ok(resident)
  }
}
