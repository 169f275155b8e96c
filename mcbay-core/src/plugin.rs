//! Registry for all tenant plugins and their ports.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::model::{TenantId, TenantMeta};
use crate::ports::{CatalogPort, PortError};

/// Ports implementing the catalog source for a single tenant.
pub struct TenantPlugin {
    /// Static metadata describing the tenant.
    pub meta: TenantMeta,
    /// Implementation for loading price catalogs.
    pub catalog_port: Arc<dyn CatalogPort>,
}

/// Registry that resolves plugins by tenant identifier.
///
/// A later plugin with the same id replaces an earlier one.
pub struct PluginRegistry {
    plugins: BTreeMap<TenantId, TenantPlugin>,
}

impl PluginRegistry {
    /// Build a registry from the provided plugin list.
    #[must_use]
    pub fn new(plugins: Vec<TenantPlugin>) -> Self {
        let plugins_map = plugins
            .into_iter()
            .map(|plugin| (plugin.meta.id.clone(), plugin))
            .collect();
        Self {
            plugins: plugins_map,
        }
    }

    /// Metadata for all registered tenants, ordered by id.
    #[must_use]
    pub fn tenants(&self) -> Vec<TenantMeta> {
        self.plugins
            .values()
            .map(|plugin| plugin.meta.clone())
            .collect()
    }

    /// Look up a plugin for the given tenant.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::UnsupportedTenant`] when no plugin is registered.
    pub fn plugin(&self, tenant: &TenantId) -> Result<&TenantPlugin, PortError> {
        self.plugins.get(tenant).ok_or(PortError::UnsupportedTenant)
    }
}
