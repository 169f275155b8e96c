//! Ordered lookup tables that feed the price estimator.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::estimator::estimate_price;
use crate::model::{
    BuildingType, BuildingTypeKey, CatalogKey, EstimatedPrice, PickupFrequency,
    PickupFrequencyKey, WasteVolume, WasteVolumeKey,
};
use crate::selection::RegistrationServiceSelection;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
/// Reasons a catalog is rejected at construction time.
pub enum CatalogError {
    /// The same key appears twice.
    #[error("Duplicate catalog key: {0}")]
    DuplicateKey(String),
    /// A multiplier is NaN, infinite, or negative.
    #[error("Invalid multiplier {multiplier} for {key}")]
    InvalidMultiplier {
        /// Offending key.
        key: String,
        /// Rejected value.
        multiplier: f64,
    },
    /// A label is blank.
    #[error("Missing label for {0}")]
    MissingLabel(String),
}

/// A record that can live in a [`Catalog`].
pub trait CatalogEntry {
    /// Key type indexing the record.
    type Key: CatalogKey;

    /// Key of this record.
    fn key(&self) -> Self::Key;

    /// Display label of this record.
    fn label(&self) -> &str;

    /// Check the numeric fields of this record.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] when a weight is unusable.
    fn validate(&self) -> Result<(), CatalogError> {
        Ok(())
    }
}

fn check_multiplier(key: impl CatalogKey, multiplier: f64) -> Result<(), CatalogError> {
    if multiplier.is_finite() && multiplier >= 0.0 {
        Ok(())
    } else {
        Err(CatalogError::InvalidMultiplier {
            key: key.to_string(),
            multiplier,
        })
    }
}

impl CatalogEntry for BuildingType {
    type Key = BuildingTypeKey;

    fn key(&self) -> BuildingTypeKey {
        self.key
    }

    fn label(&self) -> &str {
        &self.label
    }
}

impl CatalogEntry for WasteVolume {
    type Key = WasteVolumeKey;

    fn key(&self) -> WasteVolumeKey {
        self.key
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn validate(&self) -> Result<(), CatalogError> {
        check_multiplier(self.key, self.multiplier)
    }
}

impl CatalogEntry for PickupFrequency {
    type Key = PickupFrequencyKey;

    fn key(&self) -> PickupFrequencyKey {
        self.key
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn validate(&self) -> Result<(), CatalogError> {
        check_multiplier(self.key, self.multiplier)
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Immutable, ordered set of records with unique keys.
///
/// Order is the order the options are offered in, so it is preserved exactly
/// as given. Catalogs hold a handful of entries, a linear scan is all a lookup needs.
pub struct Catalog<T> {
    entries: Vec<T>,
}

impl<T: CatalogEntry> Catalog<T> {
    /// Build a catalog, rejecting duplicate keys, blank labels and bad weights.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] found while walking the entries in order.
    pub fn new(entries: Vec<T>) -> Result<Self, CatalogError> {
        let catalog = Self { entries };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Re-run the construction checks over the current entries.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] found while walking the entries in order.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for (idx, entry) in self.entries.iter().enumerate() {
            let key = entry.key();
            if entry.label().trim().is_empty() {
                return Err(CatalogError::MissingLabel(key.to_string()));
            }
            if self.entries.iter().take(idx).any(|earlier| earlier.key() == key) {
                return Err(CatalogError::DuplicateKey(key.to_string()));
            }
            entry.validate()?;
        }
        Ok(())
    }

    /// Look up the record for a key.
    #[must_use]
    pub fn find(&self, key: T::Key) -> Option<&T> {
        self.entries.iter().find(|entry| entry.key() == key)
    }

    /// Iterate records in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    /// Keys in catalog order.
    pub fn keys(&self) -> impl Iterator<Item = T::Key> + '_ {
        self.entries.iter().map(CatalogEntry::key)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Serialize> Serialize for Catalog<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Catalog<T>
where
    T: CatalogEntry + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<T>::deserialize(deserializer)?;
        Self::new(entries).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// The three catalogs a tenant prices registrations with.
pub struct PriceCatalogs {
    /// Building types and their base prices.
    pub building_types: Catalog<BuildingType>,
    /// Waste volumes and their multipliers.
    pub waste_volumes: Catalog<WasteVolume>,
    /// Pickup frequencies and their multipliers.
    pub pickup_frequencies: Catalog<PickupFrequency>,
}

impl PriceCatalogs {
    /// Assemble and validate the three catalogs.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] when any catalog is malformed.
    pub fn new(
        building_types: Vec<BuildingType>,
        waste_volumes: Vec<WasteVolume>,
        pickup_frequencies: Vec<PickupFrequency>,
    ) -> Result<Self, CatalogError> {
        Ok(Self {
            building_types: Catalog::new(building_types)?,
            waste_volumes: Catalog::new(waste_volumes)?,
            pickup_frequencies: Catalog::new(pickup_frequencies)?,
        })
    }

    /// Check all three catalogs, building types first.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] found.
    pub fn validate(&self) -> Result<(), CatalogError> {
        self.building_types.validate()?;
        self.waste_volumes.validate()?;
        self.pickup_frequencies.validate()
    }

    /// Price the current state of a registration selection.
    #[must_use]
    pub fn estimate(&self, selection: &RegistrationServiceSelection) -> Option<EstimatedPrice> {
        estimate_price(
            selection.building_type(),
            selection.occupants(),
            selection.waste_volume(),
            selection.pickup_frequency(),
            &self.building_types,
            &self.waste_volumes,
            &self.pickup_frequencies,
        )
    }
}
