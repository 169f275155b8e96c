use mcbay_catalog_lagos::{LagosCatalogPort, catalogs};
use mcbay_core::{
    BuildingTypeKey, CatalogPort, EstimatedPrice, PickupFrequencyKey, PriceCatalogs,
    RegistrationServiceSelection, WasteVolumeKey, estimate_price,
};

fn tables() -> PriceCatalogs {
    catalogs().unwrap()
}

fn price(
    tables: &PriceCatalogs,
    building: &str,
    occupants: i64,
    volume: &str,
    frequency: &str,
) -> Option<u64> {
    let mut selection = RegistrationServiceSelection::new();
    selection.set_building_type(building);
    selection.set_occupants(occupants);
    selection.set_waste_volume(volume);
    selection.set_pickup_frequency(frequency);
    selection.estimate(tables).map(EstimatedPrice::amount)
}

#[test]
fn documented_scenarios() {
    let tables = tables();
    assert_eq!(price(&tables, "duplex", 4, "medium", "2x"), Some(15000));
    assert_eq!(price(&tables, "flat", 8, "low", "1x"), Some(8960));
    assert_eq!(price(&tables, "mansion", 1, "high", "3x/week"), Some(45500));
    assert_eq!(price(&tables, "warehouse", 4, "medium", "2x"), None);
    assert_eq!(price(&tables, "office", 12, "medium", ""), None);
}

#[test]
fn function_form_matches_selection_form() {
    let tables = tables();
    let direct = estimate_price(
        Some(BuildingTypeKey::Hotel),
        10,
        Some(WasteVolumeKey::High),
        Some(PickupFrequencyKey::ThricePerWeek),
        &tables.building_types,
        &tables.waste_volumes,
        &tables.pickup_frequencies,
    );
    // 30000 * 1.3 * 1.4 * 2.5
    assert_eq!(direct, Some(EstimatedPrice(136_500)));
    assert_eq!(price(&tables, "hotel", 10, "high", "3x"), Some(136_500));
}

#[test]
fn constant_up_to_baseline_and_monotonic_above() {
    let tables = tables();
    for building in BuildingTypeKey::ALL {
        for volume in WasteVolumeKey::ALL {
            for frequency in PickupFrequencyKey::ALL {
                let at = |occupants: i64| {
                    price(
                        &tables,
                        building.to_string().as_str(),
                        occupants,
                        volume.to_string().as_str(),
                        frequency.to_string().as_str(),
                    )
                    .unwrap()
                };
                let baseline = at(1);
                for occupants in 2..=4 {
                    assert_eq!(at(occupants), baseline, "{building} {volume} {frequency}");
                }
                for occupants in 5..=50 {
                    assert!(
                        at(occupants) >= at(occupants - 1),
                        "{building} {volume} {frequency} at {occupants}"
                    );
                }
                assert!(at(50) > baseline);
            }
        }
    }
}

#[test]
fn larger_multipliers_never_lower_the_price() {
    let tables = tables();
    for building in BuildingTypeKey::ALL {
        for occupants in [1, 4, 9, 50] {
            for frequency in PickupFrequencyKey::ALL {
                let by_volume: Vec<_> = WasteVolumeKey::ALL
                    .iter()
                    .map(|volume| {
                        price(
                            &tables,
                            building.to_string().as_str(),
                            occupants,
                            volume.to_string().as_str(),
                            frequency.to_string().as_str(),
                        )
                    })
                    .collect();
                assert!(by_volume.windows(2).all(|pair| pair.first() <= pair.get(1)));
            }
            for volume in WasteVolumeKey::ALL {
                let by_frequency: Vec<_> = PickupFrequencyKey::ALL
                    .iter()
                    .map(|frequency| {
                        price(
                            &tables,
                            building.to_string().as_str(),
                            occupants,
                            volume.to_string().as_str(),
                            frequency.to_string().as_str(),
                        )
                    })
                    .collect();
                assert!(by_frequency.windows(2).all(|pair| pair.first() <= pair.get(1)));
            }
        }
    }
}

#[test]
fn occupants_outside_form_range_are_clamped() {
    let tables = tables();
    assert_eq!(
        price(&tables, "shop", 0, "medium", "2x"),
        price(&tables, "shop", 1, "medium", "2x")
    );
    assert_eq!(
        price(&tables, "shop", 1000, "medium", "2x"),
        price(&tables, "shop", 50, "medium", "2x")
    );
}

#[test]
fn repeated_calls_agree() {
    let tables = tables();
    let first = price(&tables, "bungalow", 6, "high", "1x");
    let second = price(&tables, "bungalow", 6, "high", "1x");
    assert_eq!(first, second);
    assert!(first.is_some());
}

#[tokio::test]
async fn port_serves_the_same_tables() {
    let port = LagosCatalogPort::new();
    let served = port.catalogs().await.unwrap();
    assert_eq!(served, tables());
    assert_eq!(port.tenant().currency_symbol, "₦");
}
