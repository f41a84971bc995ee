//! The directory model: navigable groupings derived from the flat resident
//! collection.
//!
//! Every function here is pure and total: it borrows a snapshot of the
//! residents, never mutates it, and returns the same output for the same
//! input. They are cheap enough to call on every render.

use std::{
  collections::{BTreeMap, BTreeSet},
  fmt,
};

use crate::model::{BuildingId, Resident, UnitNumber, ZoneId};

// ─── Keys and filters ────────────────────────────────────────────────────────

/// A building identified across zones; displayed as `zone-building`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BuildingKey {
  pub zone_id:     ZoneId,
  pub building_id: BuildingId,
}

impl fmt::Display for BuildingKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}-{}", self.zone_id, self.building_id)
  }
}

/// The zone and building selectors of the directory screens. `None` means
/// "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryFilter {
  pub zone:     Option<ZoneId>,
  /// Matches the building id in every zone that passes the zone filter.
  pub building: Option<BuildingId>,
}

impl DirectoryFilter {
  fn admits_zone(&self, zone: &ZoneId) -> bool {
    self.zone.as_ref().is_none_or(|z| z == zone)
  }

  fn admits_building(&self, building: &BuildingId) -> bool {
    self.building.as_ref().is_none_or(|b| b == building)
  }
}

// ─── Groupings ───────────────────────────────────────────────────────────────

/// Distinct zones present, sorted lexicographically.
pub fn unique_zones(residents: &[Resident]) -> Vec<ZoneId> {
  residents
    .iter()
    .map(|r| r.address.zone_id.clone())
    .collect::<BTreeSet<_>>()
    .into_iter()
    .collect()
}

/// Distinct buildings within `zone`, sorted lexicographically.
pub fn unique_buildings(residents: &[Resident], zone: &ZoneId) -> Vec<BuildingId> {
  residents
    .iter()
    .filter(|r| &r.address.zone_id == zone)
    .map(|r| r.address.building_id.clone())
    .collect::<BTreeSet<_>>()
    .into_iter()
    .collect()
}

/// Every distinct building across all zones, sorted by its `zone-building`
/// string form.
pub fn all_building_keys(residents: &[Resident]) -> Vec<BuildingKey> {
  residents
    .iter()
    .map(|r| {
      let key = BuildingKey {
        zone_id:     r.address.zone_id.clone(),
        building_id: r.address.building_id.clone(),
      };
      (key.to_string(), key)
    })
    .collect::<BTreeMap<_, _>>()
    .into_values()
    .collect()
}

/// Residents of one building, ordered by numeric unit number ascending.
pub fn residents_in_building<'a>(
  residents: &'a [Resident],
  zone:      &ZoneId,
  building:  &BuildingId,
) -> Vec<&'a Resident> {
  let mut found: Vec<&Resident> = residents
    .iter()
    .filter(|r| &r.address.zone_id == zone && &r.address.building_id == building)
    .collect();
  found.sort_by_key(|r| r.address.unit_number);
  found
}

/// Options for the building selector: the buildings of the selected zone, or
/// every building key when no zone is selected.
pub fn building_choices(
  residents: &[Resident],
  zone:      Option<&ZoneId>,
) -> Vec<BuildingKey> {
  match zone {
    Some(zone) => unique_buildings(residents, zone)
      .into_iter()
      .map(|building_id| BuildingKey { zone_id: zone.clone(), building_id })
      .collect(),
    None => all_building_keys(residents),
  }
}

// ─── Floor layout ────────────────────────────────────────────────────────────

/// One resident placed on a floor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedUnit<'a> {
  /// Position on the floor: the unit number modulo 100.
  pub position:    u32,
  pub unit_number: UnitNumber,
  pub resident:    &'a Resident,
}

/// One storey of a building elevation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Floor<'a> {
  /// The unit number divided by 100.
  pub floor: u32,
  /// Ordered by ascending position.
  pub units: Vec<PlacedUnit<'a>>,
}

/// Lay residents out as a building elevation: floors from the top down,
/// units left to right.
pub fn building_layout<'a>(
  residents: impl IntoIterator<Item = &'a Resident>,
) -> Vec<Floor<'a>> {
  let mut floors: BTreeMap<u32, Vec<PlacedUnit<'a>>> = BTreeMap::new();

  for resident in residents {
    let unit = resident.address.unit_number;
    floors.entry(unit.floor()).or_default().push(PlacedUnit {
      position: unit.position(),
      unit_number: unit,
      resident,
    });
  }

  floors
    .into_iter()
    .rev()
    .map(|(floor, mut units)| {
      units.sort_by_key(|u| u.position);
      Floor { floor, units }
    })
    .collect()
}

// ─── Screen views ────────────────────────────────────────────────────────────

/// A building's residents, as the list screen shows them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildingGroup<'a> {
  pub building_id: BuildingId,
  pub residents:   Vec<&'a Resident>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneGroup<'a> {
  pub zone_id:   ZoneId,
  pub buildings: Vec<BuildingGroup<'a>>,
}

/// Zones, then buildings, then residents, restricted by `filter`.
///
/// Zones left without any building after filtering are omitted.
pub fn list_view<'a>(
  residents: &'a [Resident],
  filter:    &DirectoryFilter,
) -> Vec<ZoneGroup<'a>> {
  unique_zones(residents)
    .into_iter()
    .filter(|zone| filter.admits_zone(zone))
    .filter_map(|zone_id| {
      let buildings: Vec<BuildingGroup<'a>> = unique_buildings(residents, &zone_id)
        .into_iter()
        .filter(|building| filter.admits_building(building))
        .map(|building_id| BuildingGroup {
          residents: residents_in_building(residents, &zone_id, &building_id),
          building_id,
        })
        .collect();
      (!buildings.is_empty()).then_some(ZoneGroup { zone_id, buildings })
    })
    .collect()
}

/// The elevation of one building on the floor-plan screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildingPlan<'a> {
  pub zone_id:     ZoneId,
  pub building_id: BuildingId,
  pub floors:      Vec<Floor<'a>>,
}

/// Floor plans for every building passing `filter`, in zone then building
/// order. Buildings with an empty layout are omitted.
pub fn floor_plan_view<'a>(
  residents: &'a [Resident],
  filter:    &DirectoryFilter,
) -> Vec<BuildingPlan<'a>> {
  list_view(residents, filter)
    .into_iter()
    .flat_map(|zone| {
      let zone_id = zone.zone_id;
      zone.buildings.into_iter().map(move |group| BuildingPlan {
        zone_id:     zone_id.clone(),
        building_id: group.building_id,
        floors:      building_layout(group.residents),
      })
    })
    .filter(|plan| !plan.floors.is_empty())
    .collect()
}
