//! Traits describing where tenants' price catalogs come from.

use std::io;

use async_trait::async_trait;

use crate::catalog::{CatalogError, PriceCatalogs};
use crate::model::TenantMeta;

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while loading a tenant's catalogs.
pub enum PortError {
    /// Reading the catalog source failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Catalog source is not well formed.
    #[error("Parse error: {0}")]
    Parse(String),
    /// Catalog content was rejected.
    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
    /// The tenant has no registered plugin.
    #[error("Unsupported tenant")]
    UnsupportedTenant,
    /// Internal provider error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[async_trait]
/// Trait for tenant-specific catalog sources.
pub trait CatalogPort: Send + Sync {
    /// Metadata describing the tenant served by this port.
    fn tenant(&self) -> &TenantMeta;

    /// Load the tenant's current price catalogs.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the source cannot be read or holds an invalid catalog.
    async fn catalogs(&self) -> Result<PriceCatalogs, PortError>;
}
