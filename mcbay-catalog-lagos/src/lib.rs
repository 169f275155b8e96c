//! Built-in price catalogs for the Mcbay Lagos service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::trace;

use mcbay_core::{
    catalog::PriceCatalogs,
    model::{
        BuildingType, BuildingTypeKey, PickupFrequency, PickupFrequencyKey, TenantId, TenantMeta,
        WasteVolume, WasteVolumeKey,
    },
    plugin::TenantPlugin,
    ports::{CatalogPort, PortError},
};

/// Tenant id the built-in catalogs are registered under.
pub const TENANT_ID: &str = "mcbay";

const BUILDING_TYPES: [(BuildingTypeKey, &str, u64); 7] = [
    (BuildingTypeKey::Flat, "Flat/Apartment", 8000),
    (BuildingTypeKey::Duplex, "Duplex", 15000),
    (BuildingTypeKey::Bungalow, "Bungalow", 12000),
    (BuildingTypeKey::Mansion, "Mansion", 25000),
    (BuildingTypeKey::Hotel, "Hotel/Lodge", 30000),
    (BuildingTypeKey::Office, "Office Building", 20000),
    (BuildingTypeKey::Shop, "Shop/Store", 10000),
];

const WASTE_VOLUMES: [(WasteVolumeKey, &str, f64); 3] = [
    (WasteVolumeKey::Low, "Low (1-2 bags/week)", 0.8),
    (WasteVolumeKey::Medium, "Medium (3-5 bags/week)", 1.0),
    (WasteVolumeKey::High, "High (6+ bags/week)", 1.3),
];

const PICKUP_FREQUENCIES: [(PickupFrequencyKey, &str, f64); 3] = [
    (PickupFrequencyKey::OncePerWeek, "1x per week", 0.7),
    (PickupFrequencyKey::TwicePerWeek, "2x per week", 1.0),
    (PickupFrequencyKey::ThricePerWeek, "3x per week", 1.4),
];

/// Build the Lagos catalogs.
///
/// # Errors
///
/// Returns a [`PortError::Catalog`] if the built-in tables fail validation.
pub fn catalogs() -> Result<PriceCatalogs, PortError> {
    let building_types = BUILDING_TYPES
        .into_iter()
        .map(|(key, label, base_price)| BuildingType {
            key,
            label: label.to_owned(),
            base_price,
        })
        .collect();
    let waste_volumes = WASTE_VOLUMES
        .into_iter()
        .map(|(key, label, multiplier)| WasteVolume {
            key,
            label: label.to_owned(),
            multiplier,
        })
        .collect();
    let pickup_frequencies = PICKUP_FREQUENCIES
        .into_iter()
        .map(|(key, label, multiplier)| PickupFrequency {
            key,
            label: label.to_owned(),
            multiplier,
        })
        .collect();

    Ok(PriceCatalogs::new(
        building_types,
        waste_volumes,
        pickup_frequencies,
    )?)
}

/// Catalog source serving the built-in tables.
pub struct LagosCatalogPort {
    meta: TenantMeta,
}

impl LagosCatalogPort {
    /// Create a new catalog port.
    #[must_use]
    pub fn new() -> Self {
        Self {
            meta: tenant_meta(),
        }
    }
}

impl Default for LagosCatalogPort {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogPort for LagosCatalogPort {
    fn tenant(&self) -> &TenantMeta {
        &self.meta
    }

    async fn catalogs(&self) -> Result<PriceCatalogs, PortError> {
        trace!(tenant = %self.meta.id, "serving built-in catalogs");
        catalogs()
    }
}

/// Build the plugin bundle for the built-in tenant.
#[must_use]
pub fn plugin() -> TenantPlugin {
    TenantPlugin {
        meta: tenant_meta(),
        catalog_port: Arc::new(LagosCatalogPort::new()),
    }
}

fn tenant_meta() -> TenantMeta {
    TenantMeta {
        id: TenantId(String::from(TENANT_ID)),
        name: String::from("Mcbay Waste Management Services"),
        currency_symbol: String::from("₦"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_complete_and_ordered() {
        let tables = catalogs().unwrap();
        let buildings: Vec<_> = tables.building_types.keys().collect();
        assert_eq!(buildings, BuildingTypeKey::ALL.to_vec());
        let volumes: Vec<_> = tables.waste_volumes.keys().collect();
        assert_eq!(volumes, WasteVolumeKey::ALL.to_vec());
        let frequencies: Vec<_> = tables.pickup_frequencies.keys().collect();
        assert_eq!(frequencies, PickupFrequencyKey::ALL.to_vec());
    }

    #[test]
    fn plugin_meta_matches_port() {
        let plugin = plugin();
        assert_eq!(plugin.meta.id, TenantId(TENANT_ID.to_owned()));
        assert_eq!(plugin.catalog_port.tenant().id, plugin.meta.id);
    }
}
