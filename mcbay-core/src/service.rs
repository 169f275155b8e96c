//! High-level service facade combining all tenants.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::catalog::PriceCatalogs;
use crate::model::{EstimatedPrice, TenantId, TenantMeta};
use crate::plugin::PluginRegistry;
use crate::ports::PortError;
use crate::selection::RegistrationServiceSelection;

/// Public entry point for catalog lookups and price estimates.
pub struct McbayService {
    registry: Arc<PluginRegistry>,
}

impl McbayService {
    /// Create a new service bound to the provided registry.
    #[must_use]
    pub fn new(registry: Arc<PluginRegistry>) -> Self {
        Self { registry }
    }

    /// List all registered tenants.
    #[must_use]
    pub fn tenants(&self) -> Vec<TenantMeta> {
        self.registry.tenants()
    }

    /// Load the price catalogs of a tenant.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if the tenant is unsupported or its catalog source fails.
    #[instrument(skip_all, fields(tenant = %tenant))]
    pub async fn catalogs_for(&self, tenant: &TenantId) -> Result<PriceCatalogs, PortError> {
        let plugin = self.registry.plugin(tenant)?;
        let catalogs = plugin.catalog_port.catalogs().await.inspect_err(|err| {
            warn!(error = %err, "failed to load price catalogs");
        })?;
        debug!(
            building_types = catalogs.building_types.len(),
            waste_volumes = catalogs.waste_volumes.len(),
            pickup_frequencies = catalogs.pickup_frequencies.len(),
            "loaded price catalogs"
        );
        Ok(catalogs)
    }

    /// Estimate the monthly fee for a selection using a tenant's catalogs.
    ///
    /// `Ok(None)` means the selection is not complete enough to price.
    /// Catalogs are fetched on every call so the price always reflects the
    /// tenant's current tables.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if the tenant is unsupported or its catalog source fails.
    pub async fn estimate(
        &self,
        tenant: &TenantId,
        selection: &RegistrationServiceSelection,
    ) -> Result<Option<EstimatedPrice>, PortError> {
        let catalogs = self.catalogs_for(tenant).await?;
        let estimate = catalogs.estimate(selection);
        debug!(
            tenant = %tenant,
            ?selection,
            estimate = ?estimate.map(EstimatedPrice::amount),
            "estimated price"
        );
        Ok(estimate)
    }
}
