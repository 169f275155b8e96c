//! Tiered monthly price estimate for a registration.

use crate::catalog::Catalog;
use crate::model::{
    BuildingType, BuildingTypeKey, EstimatedPrice, PickupFrequency, PickupFrequencyKey,
    WasteVolume, WasteVolumeKey,
};

/// Household size the base prices are quoted for.
pub const BASELINE_OCCUPANTS: u32 = 4;

/// Scale factor for the number of occupants: linear above the baseline, never below 1.
#[must_use]
pub fn occupant_multiplier(occupants: u32) -> f64 {
    (f64::from(occupants) / f64::from(BASELINE_OCCUPANTS)).max(1.0)
}

/// Compute the recommended monthly fee.
///
/// Returns `None` when any of the three keys is missing or absent from its
/// catalog. A partially filled form is a normal state, so this is not an error
/// and never degrades into a zero price.
///
/// The occupant count is taken as given; callers clamp it to the range the form allows.
#[must_use]
pub fn estimate_price(
    building_type: Option<BuildingTypeKey>,
    occupants: u32,
    waste_volume: Option<WasteVolumeKey>,
    pickup_frequency: Option<PickupFrequencyKey>,
    building_types: &Catalog<BuildingType>,
    waste_volumes: &Catalog<WasteVolume>,
    pickup_frequencies: &Catalog<PickupFrequency>,
) -> Option<EstimatedPrice> {
    let base_price = building_types.find(building_type?)?.base_price;
    let volume_multiplier = waste_volumes.find(waste_volume?)?.multiplier;
    let frequency_multiplier = pickup_frequencies.find(pickup_frequency?)?.multiplier;

    #[expect(
        clippy::cast_precision_loss,
        reason = "base prices are far below 2^52"
    )]
    let base = base_price as f64;
    let raw = base * volume_multiplier * frequency_multiplier * occupant_multiplier(occupants);

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "catalog weights are validated finite and non-negative"
    )]
    let amount = raw.round() as u64;
    Some(EstimatedPrice(amount))
}
