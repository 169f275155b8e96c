//! Plain-text rendering of catalogs and estimates.

use std::io::{self, Write};

use mcbay_core::{EstimatedPrice, PriceCatalogs, RegistrationServiceSelection, TenantMeta};

pub(crate) fn write_tenants(out: &mut impl Write, tenants: &[TenantMeta]) -> io::Result<()> {
    for tenant in tenants {
        writeln!(out, "{:<16} {}", tenant.id, tenant.name)?;
    }
    Ok(())
}

pub(crate) fn write_options(
    out: &mut impl Write,
    tenant: &TenantMeta,
    catalogs: &PriceCatalogs,
) -> io::Result<()> {
    writeln!(out, "{}", tenant.name)?;

    writeln!(out, "\nBuilding types (monthly base price)")?;
    for entry in catalogs.building_types.iter() {
        let price = EstimatedPrice(entry.base_price).display_with(&tenant.currency_symbol);
        writeln!(out, "  {:<10} {:<20} {price}", entry.key, entry.label)?;
    }

    writeln!(out, "\nWaste volumes")?;
    for entry in catalogs.waste_volumes.iter() {
        writeln!(out, "  {:<10} {:<24} x{}", entry.key, entry.label, entry.multiplier)?;
    }

    writeln!(out, "\nPickup frequencies")?;
    for entry in catalogs.pickup_frequencies.iter() {
        writeln!(out, "  {:<10} {:<24} x{}", entry.key, entry.label, entry.multiplier)?;
    }
    Ok(())
}

pub(crate) fn write_estimate(
    out: &mut impl Write,
    tenant: &TenantMeta,
    selection: &RegistrationServiceSelection,
    estimate: Option<EstimatedPrice>,
) -> io::Result<()> {
    let describe = |key: Option<String>| key.unwrap_or_else(|| "<not chosen>".to_owned());
    writeln!(
        out,
        "Building: {}  Occupants: {}  Volume: {}  Pickups: {}",
        describe(selection.building_type().map(|key| key.to_string())),
        selection.occupants(),
        describe(selection.waste_volume().map(|key| key.to_string())),
        describe(selection.pickup_frequency().map(|key| key.to_string())),
    )?;
    match estimate {
        Some(price) => writeln!(
            out,
            "Estimated monthly fee: {}",
            price.display_with(&tenant.currency_symbol)
        ),
        None => writeln!(out, "No estimate: choose a known building type, waste volume and pickup frequency"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcbay_core::TenantId;

    fn tenant() -> TenantMeta {
        TenantMeta {
            id: TenantId("mcbay".to_owned()),
            name: "Mcbay Waste Management Services".to_owned(),
            currency_symbol: "₦".to_owned(),
        }
    }

    #[test]
    fn estimate_line_uses_tenant_currency() {
        let mut selection = RegistrationServiceSelection::new();
        selection.set_building_type("flat");
        selection.set_occupants(8);
        selection.set_waste_volume("low");
        selection.set_pickup_frequency("1x");

        let mut out = Vec::new();
        write_estimate(&mut out, &tenant(), &selection, Some(EstimatedPrice(8960))).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Building: flat  Occupants: 8  Volume: low  Pickups: 1x"));
        assert!(text.ends_with("Estimated monthly fee: ₦8,960\n"));
    }

    #[test]
    fn missing_estimate_is_explained() {
        let mut selection = RegistrationServiceSelection::new();
        selection.set_building_type("office");
        let mut out = Vec::new();
        write_estimate(&mut out, &tenant(), &selection, None).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Pickups: <not chosen>"));
        assert!(text.contains("No estimate"));
    }

    #[test]
    fn options_list_every_catalog_in_order() {
        let catalogs = mcbay_catalog_lagos::catalogs().unwrap();
        let mut out = Vec::new();
        write_options(&mut out, &tenant(), &catalogs).unwrap();
        let text = String::from_utf8(out).unwrap();
        let flat = text.find("Flat/Apartment").unwrap();
        let shop = text.find("Shop/Store").unwrap();
        assert!(flat < shop);
        assert!(text.contains("₦25,000"));
        assert!(text.contains("3x per week"));
    }
}
