//! Service details a customer picks on the second registration step.

use serde::Serialize;

use crate::catalog::PriceCatalogs;
use crate::model::{BuildingTypeKey, EstimatedPrice, PickupFrequencyKey, WasteVolumeKey};

/// Smallest occupant count the form accepts.
pub const MIN_OCCUPANTS: u32 = 1;
/// Largest occupant count the form accepts.
pub const MAX_OCCUPANTS: u32 = 50;

/// Clamp a raw occupant count to the range the form accepts.
#[must_use]
pub fn clamp_occupants(raw: i64) -> u32 {
    let clamped = raw.clamp(i64::from(MIN_OCCUPANTS), i64::from(MAX_OCCUPANTS));
    u32::try_from(clamped).unwrap_or(MIN_OCCUPANTS)
}

/// Optionally signed run of digits at the start of `raw`, saturating at the `i64` bounds.
fn leading_integer(raw: &str) -> Option<i64> {
    let text = raw.trim_start();
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let mut digits = unsigned.chars().map_while(|ch| ch.to_digit(10)).peekable();
    digits.peek()?;
    let magnitude = digits.fold(0_i64, |acc, digit| {
        acc.saturating_mul(10).saturating_add(i64::from(digit))
    });
    Some(if negative { -magnitude } else { magnitude })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// In-progress answers to the service step of registration.
///
/// No price is stored here. Ask for [`RegistrationServiceSelection::estimate`]
/// whenever a price is needed and it is computed from the fields as they are now.
pub struct RegistrationServiceSelection {
    building_type: Option<BuildingTypeKey>,
    occupants: u32,
    waste_volume: Option<WasteVolumeKey>,
    pickup_frequency: Option<PickupFrequencyKey>,
}

impl Default for RegistrationServiceSelection {
    fn default() -> Self {
        Self {
            building_type: None,
            occupants: MIN_OCCUPANTS,
            waste_volume: None,
            pickup_frequency: None,
        }
    }
}

impl RegistrationServiceSelection {
    /// Empty selection with a single occupant.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection with every field already typed.
    #[must_use]
    pub fn with(
        building_type: BuildingTypeKey,
        occupants: u32,
        waste_volume: WasteVolumeKey,
        pickup_frequency: PickupFrequencyKey,
    ) -> Self {
        Self {
            building_type: Some(building_type),
            occupants: clamp_occupants(i64::from(occupants)),
            waste_volume: Some(waste_volume),
            pickup_frequency: Some(pickup_frequency),
        }
    }

    /// Chosen building type, if any.
    #[must_use]
    pub fn building_type(&self) -> Option<BuildingTypeKey> {
        self.building_type
    }

    /// Occupant count, always within `MIN_OCCUPANTS..=MAX_OCCUPANTS`.
    #[must_use]
    pub fn occupants(&self) -> u32 {
        self.occupants
    }

    /// Chosen waste volume, if any.
    #[must_use]
    pub fn waste_volume(&self) -> Option<WasteVolumeKey> {
        self.waste_volume
    }

    /// Chosen pickup frequency, if any.
    #[must_use]
    pub fn pickup_frequency(&self) -> Option<PickupFrequencyKey> {
        self.pickup_frequency
    }

    /// Apply a raw building type value. Blank or unknown input clears the field.
    pub fn set_building_type(&mut self, raw: &str) {
        self.building_type = raw.parse().ok();
    }

    /// Apply a raw waste volume value. Blank or unknown input clears the field.
    pub fn set_waste_volume(&mut self, raw: &str) {
        self.waste_volume = raw.parse().ok();
    }

    /// Apply a raw pickup frequency value. Blank or unknown input clears the field.
    pub fn set_pickup_frequency(&mut self, raw: &str) {
        self.pickup_frequency = raw.parse().ok();
    }

    /// Set the occupant count, clamped to the accepted range.
    pub fn set_occupants(&mut self, occupants: i64) {
        self.occupants = clamp_occupants(occupants);
    }

    /// Apply the occupant field as typed.
    ///
    /// Only the leading integer counts, so `"2.5"` is two and `"12abc"` is twelve.
    /// Input without a leading integer, or a zero, counts as one.
    pub fn set_occupants_input(&mut self, raw: &str) {
        let parsed = leading_integer(raw)
            .filter(|count| *count != 0)
            .unwrap_or(i64::from(MIN_OCCUPANTS));
        self.set_occupants(parsed);
    }

    /// Whether all three catalog keys have been chosen.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.building_type.is_some() && self.waste_volume.is_some() && self.pickup_frequency.is_some()
    }

    /// Price the selection as it stands against the given catalogs.
    #[must_use]
    pub fn estimate(&self, catalogs: &PriceCatalogs) -> Option<EstimatedPrice> {
        catalogs.estimate(self)
    }
}
