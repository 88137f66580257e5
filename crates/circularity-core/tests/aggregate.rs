use std::path::PathBuf;

use circularity_core::aggregate::{total_mass, total_recycled_input, total_waste_eliminated};
use circularity_core::parser::{OutputFlowKind, ProductSystemData};
use circularity_core::{read_table, total_by_output_kind, FlowTotals};

fn supply_chain() -> ProductSystemData {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../circularity-parser/tests/data/complete_supply_chain.csv");
    read_table(&path, ';').expect("fixture loads").data
}

#[test]
fn every_output_flow_lands_in_exactly_one_kind() {
    let data = supply_chain();
    let counted: usize = OutputFlowKind::ALL
        .iter()
        .map(|kind| data.output_flows().filter(|flow| flow.kind == *kind).count())
        .sum();
    assert_eq!(counted, data.output_flows().count());
    assert_eq!(counted, 9);
}

#[test]
fn waste_eliminated_is_virgin_minus_recovered() {
    let data = supply_chain();
    let virgin = total_by_output_kind(data.processes(), OutputFlowKind::VirginMaterial);
    let recovered = total_by_output_kind(data.processes(), OutputFlowKind::RecoveredRecycledMaterial);
    assert!((virgin - 1200.11).abs() < 1e-9);
    assert!((recovered - 15.0).abs() < 1e-9);
    assert!((total_waste_eliminated(data.processes()) - (virgin - recovered)).abs() < 1e-9);
}

#[test]
fn single_pass_totals_agree_with_per_kind_sums() {
    let data = supply_chain();
    let totals = FlowTotals::from_processes(data.processes());

    for kind in OutputFlowKind::ALL {
        assert!((totals.get(kind) - total_by_output_kind(data.processes(), kind)).abs() < 1e-9);
    }
    assert!((totals.mass() - total_mass(data.processes())).abs() < 1e-9);
    assert!((totals.recycled_input() - total_recycled_input(data.processes())).abs() < 1e-9);
    assert!((totals.waste_eliminated() - total_waste_eliminated(data.processes())).abs() < 1e-9);

    let every_flow: f64 = data.output_flows().map(|flow| flow.value).sum();
    assert!((totals.sum() - every_flow).abs() < 1e-6);
}

#[test]
fn totals_of_empty_collection_are_zero() {
    assert_eq!(total_by_output_kind(&[], OutputFlowKind::VirginMaterial), 0.0);
    assert_eq!(FlowTotals::from_processes(&[]), FlowTotals::default());
    assert_eq!(total_mass(&[]), 0.0);
}
