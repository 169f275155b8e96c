//! Domain data structures for tenants, catalog keys, catalog records, and prices.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind}: {value:?}")]
/// A raw form value did not name any known catalog key.
pub struct UnknownKey {
    /// Which kind of key was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl UnknownKey {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

/// Common behaviour of the enumerated keys that index a catalog.
pub trait CatalogKey: Copy + Eq + fmt::Debug + fmt::Display + FromStr<Err = UnknownKey> {
    /// Stable lowercase identifier used on forms, in files and on the wire.
    fn slug(self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Kind of building a customer registers for collection.
pub enum BuildingTypeKey {
    /// Flat or apartment.
    Flat,
    /// Duplex.
    Duplex,
    /// Bungalow.
    Bungalow,
    /// Mansion.
    Mansion,
    /// Hotel or lodge.
    Hotel,
    /// Office building.
    Office,
    /// Shop or store.
    Shop,
}

impl BuildingTypeKey {
    /// Every building type in catalog order.
    pub const ALL: [Self; 7] = [
        Self::Flat,
        Self::Duplex,
        Self::Bungalow,
        Self::Mansion,
        Self::Hotel,
        Self::Office,
        Self::Shop,
    ];
}

impl CatalogKey for BuildingTypeKey {
    fn slug(self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Duplex => "duplex",
            Self::Bungalow => "bungalow",
            Self::Mansion => "mansion",
            Self::Hotel => "hotel",
            Self::Office => "office",
            Self::Shop => "shop",
        }
    }
}

impl FromStr for BuildingTypeKey {
    type Err = UnknownKey;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|key| key.slug() == wanted)
            .ok_or_else(|| UnknownKey::new("building type", raw))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Declared amount of waste produced per week.
pub enum WasteVolumeKey {
    /// One or two bags a week.
    Low,
    /// Three to five bags a week.
    Medium,
    /// Six or more bags a week.
    High,
}

impl WasteVolumeKey {
    /// Every waste volume in catalog order.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];
}

impl CatalogKey for WasteVolumeKey {
    fn slug(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for WasteVolumeKey {
    type Err = UnknownKey;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|key| key.slug() == wanted)
            .ok_or_else(|| UnknownKey::new("waste volume", raw))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
/// How often the truck calls each week.
pub enum PickupFrequencyKey {
    /// One pickup per week.
    #[serde(rename = "1x")]
    OncePerWeek,
    /// Two pickups per week.
    #[serde(rename = "2x")]
    TwicePerWeek,
    /// Three pickups per week.
    #[serde(rename = "3x")]
    ThricePerWeek,
}

impl PickupFrequencyKey {
    /// Every pickup frequency in catalog order.
    pub const ALL: [Self; 3] = [Self::OncePerWeek, Self::TwicePerWeek, Self::ThricePerWeek];
}

impl CatalogKey for PickupFrequencyKey {
    fn slug(self) -> &'static str {
        match self {
            Self::OncePerWeek => "1x",
            Self::TwicePerWeek => "2x",
            Self::ThricePerWeek => "3x",
        }
    }
}

impl FromStr for PickupFrequencyKey {
    type Err = UnknownKey;

    /// Accepts both the short slug (`2x`) and the long form (`2x/week`).
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let lowered = raw.trim().to_lowercase();
        let wanted = lowered.strip_suffix("/week").unwrap_or(&lowered);
        Self::ALL
            .into_iter()
            .find(|key| key.slug() == wanted)
            .ok_or_else(|| UnknownKey::new("pickup frequency", raw))
    }
}

impl fmt::Display for BuildingTypeKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.pad(self.slug())
    }
}

impl fmt::Display for WasteVolumeKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.pad(self.slug())
    }
}

impl fmt::Display for PickupFrequencyKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.pad(self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Building type entry with the monthly base price it starts from.
pub struct BuildingType {
    /// Catalog key.
    pub key: BuildingTypeKey,
    /// Human-friendly label shown on the registration form.
    pub label: String,
    /// Monthly base price in whole currency units.
    pub base_price: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Waste volume entry and its price multiplier.
pub struct WasteVolume {
    /// Catalog key.
    pub key: WasteVolumeKey,
    /// Human-friendly label shown on the registration form.
    pub label: String,
    /// Factor applied to the base price.
    pub multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Pickup frequency entry and its price multiplier.
pub struct PickupFrequency {
    /// Catalog key.
    pub key: PickupFrequencyKey,
    /// Human-friendly label shown on the registration form.
    pub label: String,
    /// Factor applied to the base price.
    pub multiplier: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
/// Recommended monthly fee in whole currency units.
pub struct EstimatedPrice(pub u64);

impl EstimatedPrice {
    /// Raw amount.
    #[must_use]
    pub fn amount(self) -> u64 {
        self.0
    }

    /// Render the amount with thousands separators behind the given symbol.
    #[must_use]
    pub fn display_with(self, currency_symbol: &str) -> String {
        let digits = self.0.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (idx, digit) in digits.chars().enumerate() {
            if idx > 0 && (digits.len() - idx) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }
        format!("{currency_symbol}{grouped}")
    }
}

impl fmt::Display for EstimatedPrice {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.display_with("₦"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
/// Identifier for an organization whose price catalogs are used.
pub struct TenantId(pub String);

impl fmt::Display for TenantId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.pad(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Metadata describing a tenant and how its prices are shown.
pub struct TenantMeta {
    /// Unique identifier.
    pub id: TenantId,
    /// Display name of the organization.
    pub name: String,
    /// Symbol placed in front of rendered prices.
    pub currency_symbol: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn building_type_parses_case_insensitively() {
        assert_eq!("Duplex".parse::<BuildingTypeKey>(), Ok(BuildingTypeKey::Duplex));
        assert_eq!(" shop ".parse::<BuildingTypeKey>(), Ok(BuildingTypeKey::Shop));
    }

    #[test]
    fn unknown_and_empty_keys_are_rejected() {
        let err = "castle".parse::<BuildingTypeKey>().unwrap_err();
        assert_eq!(err.kind, "building type");
        assert_eq!(err.value, "castle");
        assert!("".parse::<WasteVolumeKey>().is_err());
        assert!("".parse::<PickupFrequencyKey>().is_err());
    }

    #[test]
    fn pickup_frequency_accepts_long_form() {
        assert_eq!("1x".parse::<PickupFrequencyKey>(), Ok(PickupFrequencyKey::OncePerWeek));
        assert_eq!("3x/week".parse::<PickupFrequencyKey>(), Ok(PickupFrequencyKey::ThricePerWeek));
        assert!("4x/week".parse::<PickupFrequencyKey>().is_err());
    }

    #[test]
    fn slugs_match_serde_names() {
        for key in PickupFrequencyKey::ALL {
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.slug()));
        }
        for key in BuildingTypeKey::ALL {
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{key}\""));
        }
    }

    #[test]
    fn price_renders_with_separators() {
        assert_eq!(EstimatedPrice(0).to_string(), "₦0");
        assert_eq!(EstimatedPrice(960).to_string(), "₦960");
        assert_eq!(EstimatedPrice(8960).to_string(), "₦8,960");
        assert_eq!(EstimatedPrice(1_234_567).display_with("$"), "$1,234,567");
    }
}
