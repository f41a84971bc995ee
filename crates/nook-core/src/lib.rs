//! Core types and operations for the Nook community directory.
//!
//! This crate is deliberately free of database and terminal dependencies.
//! Persistence is reached only through the [`store::RecordStore`] port; the
//! directory model, the session gate and the messaging ledger are plain
//! functions over an explicit [`state::CommunityState`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
#![allow(async_fn_in_trait)]

pub mod auth;
pub mod community;
pub mod directory;
pub mod error;
pub mod form;
pub mod messaging;
pub mod model;
pub mod state;
pub mod store;

pub use community::Community;
pub use error::{Error, Result};
pub use state::CommunityState;
