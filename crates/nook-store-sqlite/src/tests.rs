//! Integration tests for `SqliteStore` against an in-memory database.

use nook_core::{
  Community, CommunityState, Error as CoreError,
  form::SignUpForm,
  state::{DEMO_EMAIL, DEMO_PASSWORD},
  store::{Collection, Document, RecordStore},
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn sign_up(email: &str, name: &str, unit: &str) -> SignUpForm {
  SignUpForm {
    email:            email.into(),
    password:         "pw".into(),
    confirm_password: "pw".into(),
    name:             name.into(),
    zone_id:          "A".into(),
    building_id:      "1".into(),
    unit_number:      unit.into(),
    phone:            "555-0199".into(),
  }
}

// ─── Documents ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_store_loads_empty_snapshot() {
  let s = store().await;
  let snapshot = s.load().await.unwrap();
  assert!(snapshot.accounts.is_empty());
  assert!(snapshot.residents.is_empty());
  assert!(snapshot.messages.is_empty());
  assert!(snapshot.session.is_none());
}

#[tokio::test]
async fn saved_collections_load_back() {
  let s = store().await;

  let mut state = CommunityState::default();
  state.seed_demo().unwrap();
  let ada = state.sign_up(sign_up("ada@example.com", "Ada", "102")).unwrap();
  let demo_id = state.accounts()[0].id;
  state.send_message(demo_id, "hello from 102").unwrap();

  s.save(&Collection::ALL.map(|c| state.document(c)))
    .await
    .unwrap();

  let loaded = s.load().await.unwrap();
  assert_eq!(loaded, state.to_snapshot());
  assert_eq!(loaded.session.map(|s| s.account_id), Some(ada.id));
}

#[tokio::test]
async fn saving_replaces_the_previous_document() {
  let s = store().await;

  let mut state = CommunityState::default();
  state.sign_up(sign_up("ada@example.com", "Ada", "101")).unwrap();
  s.save(&[Document::Residents(state.residents())]).await.unwrap();

  state.sign_up(sign_up("bob@example.com", "Bob", "102")).unwrap();
  s.save(&[Document::Residents(state.residents())]).await.unwrap();

  assert_eq!(s.load().await.unwrap().residents.len(), 2);
}

#[tokio::test]
async fn clearing_the_session_removes_it() {
  let s = store().await;

  let mut state = CommunityState::default();
  state.sign_up(sign_up("ada@example.com", "Ada", "101")).unwrap();
  s.save(&[Document::Session(state.session())]).await.unwrap();
  assert!(s.load().await.unwrap().session.is_some());

  s.save(&[Document::Session(None)]).await.unwrap();
  assert!(s.load().await.unwrap().session.is_none());
}

/// Make SQLite abort any insert of `key`, so a batch fails partway through.
async fn reject_inserts_of(s: &SqliteStore, key: &'static str) {
  s.conn
    .call(move |conn| {
      conn.execute_batch(&format!(
        "CREATE TRIGGER reject_{key} BEFORE INSERT ON documents
         WHEN NEW.key = '{key}'
         BEGIN SELECT RAISE(ABORT, 'rejected'); END;"
      ))?;
      Ok(())
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn failed_batch_writes_nothing() {
  let s = store().await;

  let mut state = CommunityState::default();
  state.sign_up(sign_up("ada@example.com", "Ada", "101")).unwrap();
  reject_inserts_of(&s, "current_session").await;

  let result = s
    .save(&[
      Document::Accounts(state.accounts()),
      Document::Residents(state.residents()),
      Document::Session(state.session()),
    ])
    .await;
  assert!(matches!(result, Err(Error::Unavailable(_))));

  let loaded = s.load().await.unwrap();
  assert!(loaded.accounts.is_empty());
  assert!(loaded.residents.is_empty());
}

#[tokio::test]
async fn corrupt_document_fails_closed() {
  let s = store().await;
  s.put("residents", "[{\"not\": \"a resident\"}]".into())
    .await
    .unwrap();

  match s.load().await {
    Err(Error::Corrupt { key, .. }) => assert_eq!(key, "residents"),
    other => panic!("expected Corrupt, got {other:?}"),
  }
}

#[tokio::test]
async fn unknown_documents_are_ignored() {
  let s = store().await;
  s.put("theme", "\"dark\"".into()).await.unwrap();
  assert!(s.load().await.unwrap().accounts.is_empty());
}

// ─── Through Community ───────────────────────────────────────────────────────

#[tokio::test]
async fn community_state_survives_reopen() {
  let s = store().await;

  let mut community = Community::open(s.clone()).await.unwrap();
  let account = community.sign_in(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();
  community
    .sign_up(sign_up("ada@example.com", "Ada", "102"))
    .await
    .unwrap();
  community
    .send_message(account.id, "thanks for the tour")
    .await
    .unwrap();

  let reopened = Community::open(s).await.unwrap();
  let state = reopened.state();
  assert_eq!(state.accounts().len(), 2);
  assert_eq!(state.residents().len(), 2);
  assert_eq!(state.inbox_count(account.id), 1);
  assert_eq!(state.current_resident().map(|r| r.name.as_str()), Some("Ada"));
  // The demo account was signed out when Ada signed up.
  assert!(!state.resident(account.id).unwrap().is_online);
}

#[tokio::test]
async fn failed_sign_up_leaves_no_account_without_resident() {
  let s = store().await;
  let mut community = Community::open(s.clone()).await.unwrap();
  let before = s.load().await.unwrap();
  reject_inserts_of(&s, "current_session").await;

  let result = community
    .sign_up(sign_up("ada@example.com", "Ada", "102"))
    .await;
  assert!(matches!(result, Err(CoreError::Store(_))));
  assert_eq!(s.load().await.unwrap(), before);

  // The email and unit are still free after a restart.
  let mut reopened = Community::open(s.clone()).await.unwrap();
  assert!(matches!(
    reopened.sign_in("ada@example.com", "pw").await,
    Err(CoreError::InvalidCredentials)
  ));
  let unit = nook_core::model::UnitAddress::parse("A", "1", "102").unwrap();
  assert!(!reopened.state().unit_taken(&unit));
}

#[tokio::test]
async fn corrupt_store_refuses_to_open() {
  let s = store().await;
  s.put("accounts", "{".into()).await.unwrap();

  let result = Community::open(s).await;
  assert!(matches!(result, Err(CoreError::Store(_))));
}
