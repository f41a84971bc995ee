//! Domain records: residents, accounts, sessions and messages.
//!
//! Every field that takes part in the directory hierarchy is a validated
//! newtype: zones and buildings are non-empty trimmed labels, unit numbers
//! are positive integers. Records that fail validation never reach the
//! in-memory collections, and stored documents that fail it never load.

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Identifiers ─────────────────────────────────────────────────────────────

/// Identity shared by a resident record and, when present, its account.
///
/// UUID v7, so ids sort by creation time.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ResidentId(Uuid);

impl ResidentId {
  pub fn new() -> Self { Self(Uuid::now_v7()) }
}

impl Default for ResidentId {
  fn default() -> Self { Self::new() }
}

impl fmt::Display for ResidentId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

impl FromStr for ResidentId {
  type Err = uuid::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Uuid::parse_str(s.trim()).map(Self)
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MessageId(Uuid);

impl MessageId {
  pub fn new() -> Self { Self(Uuid::now_v7()) }
}

impl Default for MessageId {
  fn default() -> Self { Self::new() }
}

impl fmt::Display for MessageId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

// ─── Hierarchy labels ────────────────────────────────────────────────────────

/// Trim `raw` and reject it if nothing is left.
fn required(raw: &str, field: &'static str) -> Result<String> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return Err(Error::MissingField(field));
  }
  Ok(trimmed.to_owned())
}

/// Top-level grouping of buildings. Ordered lexicographically.
#[derive(
  Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct ZoneId(String);

impl ZoneId {
  pub fn parse(raw: &str) -> Result<Self> { required(raw, "zone").map(Self) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl TryFrom<String> for ZoneId {
  type Error = Error;

  fn try_from(raw: String) -> Result<Self> { Self::parse(&raw) }
}

impl From<ZoneId> for String {
  fn from(id: ZoneId) -> Self { id.0 }
}

impl fmt::Display for ZoneId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// A building within a zone. Ordered lexicographically.
#[derive(
  Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct BuildingId(String);

impl BuildingId {
  pub fn parse(raw: &str) -> Result<Self> {
    required(raw, "building").map(Self)
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl TryFrom<String> for BuildingId {
  type Error = Error;

  fn try_from(raw: String) -> Result<Self> { Self::parse(&raw) }
}

impl From<BuildingId> for String {
  fn from(id: BuildingId) -> Self { id.0 }
}

impl fmt::Display for BuildingId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// A dwelling number whose leading digits denote the floor: unit 203 is
/// position 3 on floor 2.
///
/// Always a positive integer. Stored as its decimal string so persisted
/// documents keep the `"101"` shape.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct UnitNumber(u32);

impl UnitNumber {
  /// Parse a unit number entered by a user. Only ASCII digits are accepted;
  /// zero is rejected.
  pub fn parse(raw: &str) -> Result<Self> {
    let trimmed = required(raw, "unit")?;
    if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
      return Err(Error::InvalidUnitNumber(trimmed));
    }
    match trimmed.parse::<u32>() {
      Ok(n) if n > 0 => Ok(Self(n)),
      _ => Err(Error::InvalidUnitNumber(trimmed)),
    }
  }

  pub fn get(self) -> u32 { self.0 }

  pub fn floor(self) -> u32 { self.0 / 100 }

  pub fn position(self) -> u32 { self.0 % 100 }
}

impl TryFrom<String> for UnitNumber {
  type Error = Error;

  fn try_from(raw: String) -> Result<Self> { Self::parse(&raw) }
}

impl From<UnitNumber> for String {
  fn from(unit: UnitNumber) -> Self { unit.0.to_string() }
}

impl fmt::Display for UnitNumber {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

/// The composite uniqueness key of a resident record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitAddress {
  pub zone_id:     ZoneId,
  pub building_id: BuildingId,
  pub unit_number: UnitNumber,
}

impl UnitAddress {
  pub fn parse(zone: &str, building: &str, unit: &str) -> Result<Self> {
    Ok(Self {
      zone_id:     ZoneId::parse(zone)?,
      building_id: BuildingId::parse(building)?,
      unit_number: UnitNumber::parse(unit)?,
    })
  }
}

impl fmt::Display for UnitAddress {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "zone {} / building {} / unit {}",
      self.zone_id, self.building_id, self.unit_number
    )
  }
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// A directory entry for one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resident {
  pub id:            ResidentId,
  pub name:          String,
  pub email:         Option<String>,
  pub phone:         Option<String>,
  #[serde(flatten)]
  pub address:       UnitAddress,
  pub joined_date:   NaiveDate,
  pub is_online:     bool,
  /// Name of the signed-in user who added this resident, when it was not a
  /// self-registration.
  pub registered_by: Option<String>,
}

/// Login credentials for a resident. Shares its `id` with the resident
/// record that holds the profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
  pub id:            ResidentId,
  /// Normalised (trimmed, lowercase) address; unique across accounts.
  pub email:         String,
  /// Argon2 PHC string, e.g. `$argon2id$v=19$…`.
  pub password_hash: String,
  pub created_at:    DateTime<Utc>,
}

/// The single signed-in account of this process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
  pub account_id:   ResidentId,
  pub signed_in_at: DateTime<Utc>,
}

/// A one-way note between residents. Immutable once recorded.
///
/// `from` and `to` are snapshots of the resident records at send time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
  pub id:        MessageId,
  pub from:      Resident,
  pub to:        Resident,
  pub message:   String,
  pub timestamp: DateTime<Utc>,
  /// Always `false`; nothing marks a message as read.
  pub read:      bool,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unit_number_floor_and_position() {
    let unit = UnitNumber::parse("203").unwrap();
    assert_eq!(unit.floor(), 2);
    assert_eq!(unit.position(), 3);

    let unit = UnitNumber::parse("101").unwrap();
    assert_eq!(unit.floor(), 1);
    assert_eq!(unit.position(), 1);

    let unit = UnitNumber::parse("7").unwrap();
    assert_eq!(unit.floor(), 0);
    assert_eq!(unit.position(), 7);
  }

  #[test]
  fn unit_number_rejects_non_numeric() {
    for raw in ["12a", "-5", "1.5", "two", "0", "00", "99999999999"] {
      assert!(
        matches!(UnitNumber::parse(raw), Err(Error::InvalidUnitNumber(_))),
        "{raw:?} should be rejected"
      );
    }
  }

  #[test]
  fn unit_number_empty_is_missing_field() {
    assert!(matches!(UnitNumber::parse("  "), Err(Error::MissingField("unit"))));
  }

  #[test]
  fn unit_number_trims_and_drops_leading_zeros() {
    assert_eq!(UnitNumber::parse(" 0101 ").unwrap().get(), 101);
  }

  #[test]
  fn labels_are_trimmed() {
    assert_eq!(ZoneId::parse("  A ").unwrap().as_str(), "A");
    assert!(matches!(BuildingId::parse(""), Err(Error::MissingField("building"))));
  }

  #[test]
  fn resident_serialises_flat_with_string_unit() {
    let resident = Resident {
      id:            ResidentId::new(),
      name:          "Ada".into(),
      email:         None,
      phone:         None,
      address:       UnitAddress::parse("A", "1", "101").unwrap(),
      joined_date:   NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
      is_online:     false,
      registered_by: None,
    };

    let json = serde_json::to_value(&resident).unwrap();
    assert_eq!(json["zone_id"], "A");
    assert_eq!(json["building_id"], "1");
    assert_eq!(json["unit_number"], "101");

    let back: Resident = serde_json::from_value(json).unwrap();
    assert_eq!(back, resident);
  }

  #[test]
  fn stored_non_numeric_unit_fails_to_load() {
    let json = serde_json::json!({
      "id": ResidentId::new(),
      "name": "Ada",
      "email": null,
      "phone": null,
      "zone_id": "A",
      "building_id": "1",
      "unit_number": "1O1",
      "joined_date": "2025-01-01",
      "is_online": false,
      "registered_by": null,
    });
    assert!(serde_json::from_value::<Resident>(json).is_err());
  }
}
