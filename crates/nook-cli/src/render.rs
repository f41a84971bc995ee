//! Plain-text rendering of the directory screens.

use std::fmt::Write as _;

use nook_core::{
  CommunityState,
  directory::{self, BuildingPlan, ZoneGroup},
  model::Resident,
};

const ONLINE: &str = "●";

fn presence(resident: &Resident) -> &'static str {
  if resident.is_online { ONLINE } else { " " }
}

/// One line per resident, as in the list screen.
pub fn resident_line(resident: &Resident) -> String {
  let mut line = format!(
    "{} {:<24} unit {:>5}  {}",
    presence(resident),
    resident.name,
    resident.address.unit_number,
    resident.id,
  );
  if let Some(email) = &resident.email {
    let _ = write!(line, "  {email}");
  }
  if let Some(phone) = &resident.phone {
    let _ = write!(line, "  {phone}");
  }
  let _ = write!(line, "  joined {}", resident.joined_date.format("%Y-%m-%d"));
  if let Some(by) = &resident.registered_by {
    let _ = write!(line, "  (added by {by})");
  }
  line
}

/// The three dashboard counters shown to a signed-in resident.
pub fn dashboard(state: &CommunityState, me: &Resident) -> String {
  format!(
    "Total residents: {}\nActive zones: {}\nYour messages: {}\n",
    state.residents().len(),
    directory::unique_zones(state.residents()).len(),
    state.inbox_count(me.id),
  )
}

/// The list screen: zones, their buildings, their residents.
pub fn list(zones: &[ZoneGroup<'_>]) -> String {
  let mut out = String::new();
  for zone in zones {
    let _ = writeln!(out, "Zone {}", zone.zone_id);
    for building in &zone.buildings {
      let _ = writeln!(
        out,
        "  Building {} ({} residents)",
        building.building_id,
        building.residents.len()
      );
      for resident in &building.residents {
        let _ = writeln!(out, "    {}", resident_line(resident));
      }
    }
  }
  out
}

/// The floor-plan screen: each building drawn top floor first, one cell per
/// unit.
pub fn plans(plans: &[BuildingPlan<'_>]) -> String {
  let mut out = String::new();
  for plan in plans {
    let _ = writeln!(out, "Zone {} · Building {}", plan.zone_id, plan.building_id);
    for floor in &plan.floors {
      let cells: Vec<String> = floor
        .units
        .iter()
        .map(|u| format!("[{} {}{}]", u.unit_number, u.resident.name, presence_suffix(u.resident)))
        .collect();
      let _ = writeln!(out, "  Floor {:>3} | {}", floor.floor, cells.join(" "));
    }
    out.push('\n');
  }
  out
}

fn presence_suffix(resident: &Resident) -> &'static str {
  if resident.is_online { " ●" } else { "" }
}
