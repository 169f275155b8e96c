//! Tenant plugin that reads price catalogs from a TOML file.
//!
//! The file holds three arrays of tables:
//!
//! ```toml
//! [[building_types]]
//! key = "flat"
//! label = "Flat/Apartment"
//! base_price = 9000
//!
//! [[waste_volumes]]
//! key = "low"
//! label = "Low (1-2 bags/week)"
//! multiplier = 0.8
//!
//! [[pickup_frequencies]]
//! key = "1x"
//! label = "1x per week"
//! multiplier = 0.7
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use mcbay_core::{
    catalog::PriceCatalogs,
    model::TenantMeta,
    plugin::TenantPlugin,
    ports::{CatalogPort, PortError},
};

/// Parse a catalog document.
///
/// # Errors
///
/// Returns [`PortError::Parse`] for malformed TOML, unknown keys, or catalog
/// content that fails validation.
pub fn parse_catalogs(source: &str) -> Result<PriceCatalogs, PortError> {
    toml::from_str(source).map_err(|err| PortError::Parse(err.message().to_owned()))
}

/// Catalog source backed by a file on disk.
///
/// The file is read again on every request so edits apply to the next estimate.
pub struct FileCatalogPort {
    meta: TenantMeta,
    path: PathBuf,
}

impl FileCatalogPort {
    /// Create a port for the given tenant reading from `path`.
    #[must_use]
    pub fn new(meta: TenantMeta, path: impl Into<PathBuf>) -> Self {
        Self {
            meta,
            path: path.into(),
        }
    }

    /// Location of the catalog file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogPort for FileCatalogPort {
    fn tenant(&self) -> &TenantMeta {
        &self.meta
    }

    async fn catalogs(&self) -> Result<PriceCatalogs, PortError> {
        let source = tokio::fs::read_to_string(&self.path)
            .await
            .inspect_err(|err| warn!(path = %self.path.display(), error = %err, "cannot read catalog file"))?;
        let catalogs = parse_catalogs(&source)?;
        debug!(path = %self.path.display(), tenant = %self.meta.id, "loaded catalog file");
        Ok(catalogs)
    }
}

/// Build the plugin bundle for a tenant whose catalogs live in `path`.
#[must_use]
pub fn plugin(meta: TenantMeta, path: impl Into<PathBuf>) -> TenantPlugin {
    TenantPlugin {
        catalog_port: Arc::new(FileCatalogPort::new(meta.clone(), path)),
        meta,
    }
}
