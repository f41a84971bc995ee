//! [`Community`]: the community state bound to a [`RecordStore`].
//!
//! Each mutating call runs the in-memory operation, then rewrites every
//! document that operation touched in one batch. If the store rejects the
//! batch, nothing was written and the in-memory state is rolled back to what
//! it was before the call.

use tracing::{debug, info};

use crate::{
  CommunityState, Error, Result,
  form::{ResidentForm, SignUpForm},
  model::{Account, Message, Resident, ResidentId},
  store::{Collection, Document, RecordStore},
};

pub struct Community<S> {
  store: S,
  state: CommunityState,
}

impl<S: RecordStore> Community<S> {
  /// Load the state from `store`, seeding the demo account on first use.
  pub async fn open(store: S) -> Result<Self> {
    let snapshot = store.load().await.map_err(Error::store)?;
    debug!(
      accounts = snapshot.accounts.len(),
      residents = snapshot.residents.len(),
      messages = snapshot.messages.len(),
      "loaded community state"
    );

    let mut community = Self { store, state: snapshot.into() };
    if community.state.seed_demo()? {
      info!("seeded demo account");
      community
        .persist(&[Collection::Accounts, Collection::Residents])
        .await?;
    }
    Ok(community)
  }

  pub fn state(&self) -> &CommunityState { &self.state }

  pub fn store(&self) -> &S { &self.store }

  pub async fn sign_up(&mut self, form: SignUpForm) -> Result<Account> {
    self
      .apply(
        &[Collection::Accounts, Collection::Residents, Collection::Session],
        |state| state.sign_up(form),
      )
      .await
  }

  pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<Account> {
    self
      .apply(&[Collection::Residents, Collection::Session], |state| {
        state.sign_in(email, password)
      })
      .await
  }

  pub async fn sign_out(&mut self) -> Result<Option<ResidentId>> {
    self
      .apply(&[Collection::Residents, Collection::Session], |state| {
        Ok(state.sign_out())
      })
      .await
  }

  pub async fn register_resident(&mut self, form: ResidentForm) -> Result<Resident> {
    self
      .apply(&[Collection::Residents], |state| state.register_resident(form))
      .await
  }

  pub async fn send_message(&mut self, to: ResidentId, text: &str) -> Result<Message> {
    self
      .apply(&[Collection::Messages], |state| state.send_message(to, text))
      .await
  }

  async fn apply<T>(
    &mut self,
    touched: &[Collection],
    op: impl FnOnce(&mut CommunityState) -> Result<T>,
  ) -> Result<T> {
    let before = self.state.clone();
    let out = op(&mut self.state)?;
    if let Err(e) = self.persist(touched).await {
      self.state = before;
      return Err(e);
    }
    Ok(out)
  }

  async fn persist(&self, touched: &[Collection]) -> Result<()> {
    let documents: Vec<Document<'_>> =
      touched.iter().map(|&c| self.state.document(c)).collect();
    self.store.save(&documents).await.map_err(Error::store)?;
    debug!(
      keys = ?touched.iter().map(|c| c.key()).collect::<Vec<_>>(),
      "saved documents"
    );
    Ok(())
  }
}
