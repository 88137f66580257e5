use std::path::PathBuf;

use circularity_core::parser::ProductSystemData;
use circularity_core::{read_table, ProductSystem};

fn supply_chain() -> ProductSystemData {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../circularity-parser/tests/data/complete_supply_chain.csv");
    read_table(&path, ';').expect("fixture loads").data
}

#[test]
fn derived_totals_match_reference_figures() {
    let system = ProductSystem::new(supply_chain(), 5, 10);

    assert!((system.mass() - 1227.11).abs() < 0.01);
    assert!((system.recycled_input() - 27.0).abs() < 0.01);
    assert!((system.waste_eliminated() - 1185.11).abs() < 0.01);
    assert!((system.primary_materials_energy() - 1.44e7).abs() < 0.01);
    assert!((system.secondary_materials_energy() - 7.2e6).abs() < 0.01);
}

#[test]
fn summary_bundles_parameters_and_totals() {
    let system = ProductSystem::new(supply_chain(), 5, 10);
    let summary = system.summary();

    assert_eq!(summary.product_lifetime, 5);
    assert_eq!(summary.product_utility, 10);
    assert_eq!(summary.process_count, 3);
    assert!((summary.mass - system.mass()).abs() < 1e-9);
    assert!((summary.waste_eliminated - system.waste_eliminated()).abs() < 1e-9);
    assert!((summary.recycled_input - system.recycled_input()).abs() < 1e-9);
}

#[test]
fn setters_update_parameters() {
    let mut system = ProductSystem::new(supply_chain(), 5, 10);
    system.set_product_lifetime(8);
    system.set_product_utility(15);

    assert_eq!(system.product_lifetime(), 8);
    assert_eq!(system.product_utility(), 15);
}

#[test]
fn replacing_data_is_reflected_immediately() {
    let mut system = ProductSystem::new(supply_chain(), 5, 10);
    assert!(system.mass() > 0.0);

    system.set_data(ProductSystemData::default());
    assert_eq!(system.data(), &ProductSystemData::default());
    assert_eq!(system.mass(), 0.0);
    assert_eq!(system.summary().process_count, 0);
}
