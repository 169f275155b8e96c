//! Command-line price estimates for Mcbay service registration.

mod config;
mod output;
mod telemetry;

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mcbay_catalog_file as file_catalog;
use mcbay_catalog_lagos as lagos;
use mcbay_core::{McbayService, PluginRegistry, RegistrationServiceSelection, TenantId, TenantMeta};
use tracing::info;

use crate::config::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "mcbay", version, about = "Estimate monthly waste collection fees")]
struct Cli {
    /// Tenant whose catalogs to use (defaults to MCBAY_TENANT or the built-in tenant).
    #[arg(long, global = true)]
    tenant: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List registered tenants.
    Tenants,
    /// Show the building types, waste volumes and pickup frequencies on offer.
    Options,
    /// Estimate the monthly fee for a service selection.
    Estimate {
        /// Building type key, e.g. `duplex`.
        #[arg(long, default_value = "")]
        building: String,
        /// Number of occupants or flats; clamped to 1..=50.
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        occupants: i64,
        /// Waste volume key: low, medium or high.
        #[arg(long, default_value = "")]
        volume: String,
        /// Pickup frequency key: 1x, 2x or 3x.
        #[arg(long, default_value = "")]
        frequency: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_env().context("invalid configuration")?;
    telemetry::init_tracing(config.environment);

    let mut plugins = vec![lagos::plugin()];
    if let Some(file) = &config.catalog_file {
        info!(tenant = %file.tenant, path = %file.path.display(), "registering catalog file");
        let meta = TenantMeta {
            id: file.tenant.clone(),
            name: file.tenant_name.clone(),
            currency_symbol: String::from("₦"),
        };
        plugins.push(file_catalog::plugin(meta, file.path.clone()));
    }
    let registry = Arc::new(PluginRegistry::new(plugins));
    let service = McbayService::new(registry);

    let tenant = cli
        .tenant
        .map_or_else(|| config.default_tenant.clone(), TenantId);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&service, &tenant, cli.command, &mut out).await?;
    out.flush()?;
    Ok(())
}

async fn run(
    service: &McbayService,
    tenant: &TenantId,
    command: Command,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Tenants => {
            output::write_tenants(out, &service.tenants())?;
        }
        Command::Options => {
            let meta = tenant_meta(service, tenant)?;
            let catalogs = service
                .catalogs_for(tenant)
                .await
                .with_context(|| format!("cannot load catalogs for tenant {tenant}"))?;
            output::write_options(out, &meta, &catalogs)?;
        }
        Command::Estimate {
            building,
            occupants,
            volume,
            frequency,
        } => {
            let meta = tenant_meta(service, tenant)?;
            let mut selection = RegistrationServiceSelection::new();
            selection.set_building_type(&building);
            selection.set_occupants(occupants);
            selection.set_waste_volume(&volume);
            selection.set_pickup_frequency(&frequency);

            let estimate = service
                .estimate(tenant, &selection)
                .await
                .with_context(|| format!("cannot estimate for tenant {tenant}"))?;
            output::write_estimate(out, &meta, &selection, estimate)?;
        }
    }
    Ok(())
}

fn tenant_meta(service: &McbayService, tenant: &TenantId) -> Result<TenantMeta> {
    service
        .tenants()
        .into_iter()
        .find(|meta| &meta.id == tenant)
        .with_context(|| format!("unknown tenant {tenant}"))
}
