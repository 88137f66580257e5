use circularity_parser::{OutputFlowKind, Process, ProductSystemData};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::{self, FlowTotals};

/// A parsed product system together with its lifetime (L) and utility (U).
///
/// Every derived quantity is recomputed from the current process list on
/// each call, so replacing the data never leaves stale figures behind.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSystem {
    data: ProductSystemData,
    product_lifetime: i32,
    product_utility: i32,
}

/// Derived scalars of a [`ProductSystem`] at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub product_lifetime: i32,
    pub product_utility: i32,
    pub process_count: usize,
    pub waste_eliminated: f64,
    pub recycled_input: f64,
    pub mass: f64,
    pub primary_materials_energy: f64,
    pub secondary_materials_energy: f64,
}

impl ProductSystem {
    pub fn new(data: ProductSystemData, product_lifetime: i32, product_utility: i32) -> Self {
        Self {
            data,
            product_lifetime,
            product_utility,
        }
    }

    pub fn data(&self) -> &ProductSystemData {
        &self.data
    }

    pub fn processes(&self) -> &[Process] {
        self.data.processes()
    }

    pub fn set_data(&mut self, data: ProductSystemData) {
        self.data = data;
    }

    pub fn product_lifetime(&self) -> i32 {
        self.product_lifetime
    }

    pub fn set_product_lifetime(&mut self, product_lifetime: i32) {
        self.product_lifetime = product_lifetime;
    }

    pub fn product_utility(&self) -> i32 {
        self.product_utility
    }

    pub fn set_product_utility(&mut self, product_utility: i32) {
        self.product_utility = product_utility;
    }

    pub fn flow_value(&self, kind: OutputFlowKind) -> f64 {
        aggregate::total_by_output_kind(self.processes(), kind)
    }

    pub fn totals(&self) -> FlowTotals {
        FlowTotals::from_processes(self.processes())
    }

    pub fn waste_eliminated(&self) -> f64 {
        aggregate::total_waste_eliminated(self.processes())
    }

    pub fn recycled_input(&self) -> f64 {
        aggregate::total_recycled_input(self.processes())
    }

    pub fn mass(&self) -> f64 {
        aggregate::total_mass(self.processes())
    }

    pub fn primary_materials_energy(&self) -> f64 {
        self.flow_value(OutputFlowKind::MainMaterialsProductionEnergy)
    }

    pub fn secondary_materials_energy(&self) -> f64 {
        self.flow_value(OutputFlowKind::SecondaryMaterialsProductionEnergy)
    }

    pub fn summary(&self) -> ProductSummary {
        let totals = self.totals();
        let summary = ProductSummary {
            product_lifetime: self.product_lifetime,
            product_utility: self.product_utility,
            process_count: self.data.len(),
            waste_eliminated: totals.waste_eliminated(),
            recycled_input: totals.recycled_input(),
            mass: totals.mass(),
            primary_materials_energy: totals.main_materials_energy,
            secondary_materials_energy: totals.secondary_materials_energy,
        };
        debug!(
            mass = summary.mass,
            recycled_input = summary.recycled_input,
            waste_eliminated = summary.waste_eliminated,
            "Computed product system totals"
        );
        summary
    }
}
