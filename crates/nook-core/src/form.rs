//! Raw form input and the validated records built from it.
//!
//! Forms carry exactly what the user typed. Conversion into [`NewAccount`] or
//! [`NewResident`] checks field presence, password confirmation and unit
//! number format in one place, before any collection is consulted.

use crate::{
  Error, Result,
  model::UnitAddress,
};

/// Input of the sign-up screen.
#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
  pub email:            String,
  pub password:         String,
  pub confirm_password: String,
  pub name:             String,
  pub zone_id:          String,
  pub building_id:      String,
  pub unit_number:      String,
  pub phone:            String,
}

/// Input of the "add resident" screen.
#[derive(Debug, Clone, Default)]
pub struct ResidentForm {
  pub name:        String,
  pub zone_id:     String,
  pub building_id: String,
  pub unit_number: String,
  pub email:       String,
  pub phone:       String,
}

/// A sign-up that passed validation. The password is still in the clear
/// here; it is hashed before anything is stored.
#[derive(Debug, Clone)]
pub struct NewAccount {
  pub email:    String,
  pub password: String,
  pub name:     String,
  pub phone:    Option<String>,
  pub address:  UnitAddress,
}

/// A resident registration that passed validation.
#[derive(Debug, Clone)]
pub struct NewResident {
  pub name:    String,
  pub email:   Option<String>,
  pub phone:   Option<String>,
  pub address: UnitAddress,
}

/// Lowercase and trim an email address for storage and comparison.
pub fn normalize_email(raw: &str) -> String { raw.trim().to_lowercase() }

fn optional(raw: &str) -> Option<String> {
  let trimmed = raw.trim();
  (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

fn present(raw: &str, field: &'static str) -> Result<()> {
  if raw.trim().is_empty() {
    return Err(Error::MissingField(field));
  }
  Ok(())
}

impl TryFrom<SignUpForm> for NewAccount {
  type Error = Error;

  fn try_from(form: SignUpForm) -> Result<Self> {
    present(&form.email, "email")?;
    if form.password.is_empty() {
      return Err(Error::MissingField("password"));
    }
    present(&form.name, "name")?;
    present(&form.zone_id, "zone")?;
    present(&form.building_id, "building")?;
    present(&form.unit_number, "unit")?;

    if form.password != form.confirm_password {
      return Err(Error::PasswordMismatch);
    }

    let address =
      UnitAddress::parse(&form.zone_id, &form.building_id, &form.unit_number)?;

    Ok(Self {
      email: normalize_email(&form.email),
      password: form.password,
      name: form.name.trim().to_owned(),
      phone: optional(&form.phone),
      address,
    })
  }
}

impl TryFrom<ResidentForm> for NewResident {
  type Error = Error;

  fn try_from(form: ResidentForm) -> Result<Self> {
    present(&form.name, "name")?;
    let address =
      UnitAddress::parse(&form.zone_id, &form.building_id, &form.unit_number)?;

    Ok(Self {
      name: form.name.trim().to_owned(),
      email: optional(&form.email).map(|e| normalize_email(&e)),
      phone: optional(&form.phone),
      address,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sign_up() -> SignUpForm {
    SignUpForm {
      email:            " Ada@Example.com ".into(),
      password:         "hunter2".into(),
      confirm_password: "hunter2".into(),
      name:             "Ada".into(),
      zone_id:          "A".into(),
      building_id:      "1".into(),
      unit_number:      "101".into(),
      phone:            String::new(),
    }
  }

  #[test]
  fn valid_sign_up_normalises_fields() {
    let account = NewAccount::try_from(sign_up()).unwrap();
    assert_eq!(account.email, "ada@example.com");
    assert_eq!(account.phone, None);
    assert_eq!(account.address.unit_number.get(), 101);
  }

  #[test]
  fn each_required_field_is_checked() {
    let cases: [(fn(&mut SignUpForm), &str); 6] = [
      (|f: &mut SignUpForm| f.email.clear(), "email"),
      (|f: &mut SignUpForm| f.password.clear(), "password"),
      (|f: &mut SignUpForm| f.name = "   ".into(), "name"),
      (|f: &mut SignUpForm| f.zone_id.clear(), "zone"),
      (|f: &mut SignUpForm| f.building_id.clear(), "building"),
      (|f: &mut SignUpForm| f.unit_number.clear(), "unit"),
    ];
    for (blank, field) in cases {
      let mut form = sign_up();
      blank(&mut form);
      match NewAccount::try_from(form) {
        Err(Error::MissingField(f)) => assert_eq!(f, field),
        other => panic!("expected MissingField({field}), got {other:?}"),
      }
    }
  }

  #[test]
  fn mismatched_confirmation_is_rejected() {
    let mut form = sign_up();
    form.confirm_password = "hunter3".into();
    assert!(matches!(NewAccount::try_from(form), Err(Error::PasswordMismatch)));
  }

  #[test]
  fn non_numeric_unit_is_rejected() {
    let mut form = sign_up();
    form.unit_number = "10B".into();
    assert!(matches!(
      NewAccount::try_from(form),
      Err(Error::InvalidUnitNumber(_))
    ));
  }

  #[test]
  fn resident_form_email_is_optional() {
    let form = ResidentForm {
      name:        "Grace".into(),
      zone_id:     "B".into(),
      building_id: "2".into(),
      unit_number: "305".into(),
      email:       " ".into(),
      phone:       "555-0100".into(),
    };
    let resident = NewResident::try_from(form).unwrap();
    assert_eq!(resident.email, None);
    assert_eq!(resident.phone.as_deref(), Some("555-0100"));
  }
}
