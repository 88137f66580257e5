use circularity_parser::{OutputFlowKind, Process};
use serde::{Deserialize, Serialize};

/// Sums the value of every output flow of `kind` across all processes.
pub fn total_by_output_kind(processes: &[Process], kind: OutputFlowKind) -> f64 {
    processes
        .iter()
        .flat_map(|process| process.output_flows.iter())
        .filter(|flow| flow.kind == kind)
        .map(|flow| flow.value)
        .sum()
}

/// W = V - Rr
pub fn total_waste_eliminated(processes: &[Process]) -> f64 {
    total_by_output_kind(processes, OutputFlowKind::VirginMaterial)
        - total_by_output_kind(processes, OutputFlowKind::RecoveredRecycledMaterial)
}

/// Ri = R + Rr
pub fn total_recycled_input(processes: &[Process]) -> f64 {
    total_by_output_kind(processes, OutputFlowKind::RecycledMaterial)
        + total_by_output_kind(processes, OutputFlowKind::RecoveredRecycledMaterial)
}

/// M = V + Ri
pub fn total_mass(processes: &[Process]) -> f64 {
    total_by_output_kind(processes, OutputFlowKind::VirginMaterial) + total_recycled_input(processes)
}

/// Per-kind output totals gathered in one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowTotals {
    pub virgin_material: f64,
    pub recycled_material: f64,
    pub recovered_recycled_material: f64,
    pub main_materials_energy: f64,
    pub secondary_materials_energy: f64,
    pub transport: f64,
}

impl FlowTotals {
    pub fn from_processes(processes: &[Process]) -> Self {
        let mut totals = FlowTotals::default();
        for flow in processes.iter().flat_map(|process| process.output_flows.iter()) {
            *totals.slot_mut(flow.kind) += flow.value;
        }
        totals
    }

    pub fn get(&self, kind: OutputFlowKind) -> f64 {
        match kind {
            OutputFlowKind::VirginMaterial => self.virgin_material,
            OutputFlowKind::RecycledMaterial => self.recycled_material,
            OutputFlowKind::RecoveredRecycledMaterial => self.recovered_recycled_material,
            OutputFlowKind::MainMaterialsProductionEnergy => self.main_materials_energy,
            OutputFlowKind::SecondaryMaterialsProductionEnergy => self.secondary_materials_energy,
            OutputFlowKind::TransportMaterial => self.transport,
        }
    }

    fn slot_mut(&mut self, kind: OutputFlowKind) -> &mut f64 {
        match kind {
            OutputFlowKind::VirginMaterial => &mut self.virgin_material,
            OutputFlowKind::RecycledMaterial => &mut self.recycled_material,
            OutputFlowKind::RecoveredRecycledMaterial => &mut self.recovered_recycled_material,
            OutputFlowKind::MainMaterialsProductionEnergy => &mut self.main_materials_energy,
            OutputFlowKind::SecondaryMaterialsProductionEnergy => {
                &mut self.secondary_materials_energy
            }
            OutputFlowKind::TransportMaterial => &mut self.transport,
        }
    }

    pub fn waste_eliminated(&self) -> f64 {
        self.virgin_material - self.recovered_recycled_material
    }

    pub fn recycled_input(&self) -> f64 {
        self.recycled_material + self.recovered_recycled_material
    }

    pub fn mass(&self) -> f64 {
        self.virgin_material + self.recycled_input()
    }

    pub fn sum(&self) -> f64 {
        OutputFlowKind::ALL.iter().map(|kind| self.get(*kind)).sum()
    }
}
