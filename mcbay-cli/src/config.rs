//! Process configuration read from the environment.

use std::env;
use std::path::PathBuf;

use mcbay_catalog_lagos::TENANT_ID;
use mcbay_core::TenantId;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub(crate) enum ConfigError {
    #[error("Environment variable '{0}' must not be blank")]
    Blank(&'static str),
}

/// Where the process runs; decides the log format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Environment {
    Development,
    Production,
}

impl Environment {
    fn from_env() -> Self {
        match env::var("MCBAY_ENV") {
            Ok(value) if value.trim().eq_ignore_ascii_case("production") => Self::Production,
            _ => Self::Development,
        }
    }

    pub(crate) fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Extra tenant whose catalogs come from a TOML file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct CatalogFile {
    pub(crate) tenant: TenantId,
    pub(crate) tenant_name: String,
    pub(crate) path: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct AppConfig {
    pub(crate) environment: Environment,
    /// Tenant used when a command does not name one.
    pub(crate) default_tenant: TenantId,
    pub(crate) catalog_file: Option<CatalogFile>,
}

impl AppConfig {
    /// Read `MCBAY_ENV`, `MCBAY_TENANT`, `MCBAY_CATALOG_PATH`,
    /// `MCBAY_CATALOG_TENANT` and `MCBAY_CATALOG_TENANT_NAME`.
    pub(crate) fn from_env() -> Result<Self, ConfigError> {
        let default_tenant = non_blank("MCBAY_TENANT")?.unwrap_or_else(|| TENANT_ID.to_owned());

        let catalog_file = match env::var_os("MCBAY_CATALOG_PATH") {
            Some(path) if !path.is_empty() => {
                let tenant =
                    non_blank("MCBAY_CATALOG_TENANT")?.unwrap_or_else(|| "custom".to_owned());
                let tenant_name = non_blank("MCBAY_CATALOG_TENANT_NAME")?
                    .unwrap_or_else(|| tenant.clone());
                Some(CatalogFile {
                    tenant: TenantId(tenant),
                    tenant_name,
                    path: PathBuf::from(path),
                })
            }
            _ => None,
        };

        Ok(Self {
            environment: Environment::from_env(),
            default_tenant: TenantId(default_tenant),
            catalog_file,
        })
    }
}

/// Unset is `None`; set but blank is an error.
fn non_blank(key: &'static str) -> Result<Option<String>, ConfigError> {
    match env::var(key) {
        Ok(value) if value.trim().is_empty() => Err(ConfigError::Blank(key)),
        Ok(value) => Ok(Some(value.trim().to_owned())),
        Err(_) => Ok(None),
    }
}
