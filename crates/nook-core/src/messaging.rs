//! The messaging ledger: append-only one-way notes between residents.
//!
//! Sending records a message; nothing is delivered or pushed. Recipients see
//! their messages by filtering the ledger on their id.

use chrono::Utc;
use tracing::info;

use crate::{
  CommunityState, Error, Result,
  model::{Message, MessageId, ResidentId},
};

impl CommunityState {
  /// Record a message from the signed-in resident to `to`.
  pub fn send_message(&mut self, to: ResidentId, text: &str) -> Result<Message> {
    let from = self.current_resident().ok_or(Error::NoActiveSession)?;
    if text.trim().is_empty() {
      return Err(Error::EmptyMessage);
    }
    let recipient = self.resident(to).ok_or(Error::RecipientNotFound(to))?;

    let message = Message {
      id:        MessageId::new(),
      from:      from.clone(),
      to:        recipient.clone(),
      message:   text.to_owned(),
      timestamp: Utc::now(),
      read:      false,
    };

    info!(id = %message.id, from = %message.from.id, to = %to, "message recorded");
    self.messages.push(message.clone());
    Ok(message)
  }

  /// Messages addressed to `resident`, oldest first.
  pub fn messages_for(&self, resident: ResidentId) -> Vec<&Message> {
    self.messages.iter().filter(|m| m.to.id == resident).collect()
  }

  /// Number of messages addressed to `resident`.
  pub fn inbox_count(&self, resident: ResidentId) -> usize {
    self.messages.iter().filter(|m| m.to.id == resident).count()
  }
}
