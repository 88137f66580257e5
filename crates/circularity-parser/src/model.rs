use std::fmt;

use serde::{Deserialize, Serialize};

use crate::units::{Measured, UnitTag};

/// Closed classification of a process output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFlowKind {
    #[serde(rename = "Virgin Material")]
    VirginMaterial,
    #[serde(rename = "Recycled Material")]
    RecycledMaterial,
    #[serde(rename = "Recovered Recycled Material")]
    RecoveredRecycledMaterial,
    #[serde(rename = "Energy for Main Materials Production")]
    MainMaterialsProductionEnergy,
    #[serde(rename = "Energy for Secondary Materials Production")]
    SecondaryMaterialsProductionEnergy,
    #[serde(rename = "Transportation")]
    TransportMaterial,
}

impl OutputFlowKind {
    pub const ALL: [OutputFlowKind; 6] = [
        OutputFlowKind::VirginMaterial,
        OutputFlowKind::RecycledMaterial,
        OutputFlowKind::RecoveredRecycledMaterial,
        OutputFlowKind::MainMaterialsProductionEnergy,
        OutputFlowKind::SecondaryMaterialsProductionEnergy,
        OutputFlowKind::TransportMaterial,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OutputFlowKind::VirginMaterial => "Virgin Material",
            OutputFlowKind::RecycledMaterial => "Recycled Material",
            OutputFlowKind::RecoveredRecycledMaterial => "Recovered Recycled Material",
            OutputFlowKind::MainMaterialsProductionEnergy => "Energy for Main Materials Production",
            OutputFlowKind::SecondaryMaterialsProductionEnergy => {
                "Energy for Secondary Materials Production"
            }
            OutputFlowKind::TransportMaterial => "Transportation",
        }
    }
}

impl fmt::Display for OutputFlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<&str> for OutputFlowKind {
    type Error = String;

    /// Exact, case-sensitive match against the canonical labels.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        OutputFlowKind::ALL
            .into_iter()
            .find(|kind| kind.label() == value)
            .ok_or_else(|| format!("output flow kind '{value}' not recognized"))
    }
}

/// Shared surface of input and output flows.
pub trait Flow: Measured {
    fn category(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputFlow {
    pub name: String,
    pub category: String,
    pub value: f64,
    pub unit: UnitTag,
}

impl InputFlow {
    pub fn new(name: impl Into<String>, category: impl Into<String>, value: f64, unit: UnitTag) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            value,
            unit,
        }
    }
}

impl Measured for InputFlow {
    fn value(&self) -> f64 {
        self.value
    }

    fn unit(&self) -> UnitTag {
        self.unit
    }

    fn set_measurement(&mut self, value: f64, unit: UnitTag) {
        self.value = value;
        self.unit = unit;
    }
}

impl Flow for InputFlow {
    fn category(&self) -> &str {
        &self.category
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputFlow {
    pub kind: OutputFlowKind,
    pub category: String,
    pub value: f64,
    pub unit: UnitTag,
}

impl OutputFlow {
    pub fn new(kind: OutputFlowKind, category: impl Into<String>, value: f64, unit: UnitTag) -> Self {
        Self {
            kind,
            category: category.into(),
            value,
            unit,
        }
    }
}

impl Measured for OutputFlow {
    fn value(&self) -> f64 {
        self.value
    }

    fn unit(&self) -> UnitTag {
        self.unit
    }

    fn set_measurement(&mut self, value: f64, unit: UnitTag) {
        self.value = value;
        self.unit = unit;
    }
}

impl Flow for OutputFlow {
    fn category(&self) -> &str {
        &self.category
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    pub name: String,
    pub category: String,
    pub input_flows: Vec<InputFlow>,
    pub output_flows: Vec<OutputFlow>,
}

impl Process {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        input_flows: Vec<InputFlow>,
        output_flows: Vec<OutputFlow>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            input_flows,
            output_flows,
        }
    }

    pub fn flow_count(&self) -> usize {
        self.input_flows.len().max(self.output_flows.len())
    }
}

/// Every process read from one table, in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductSystemData {
    processes: Vec<Process>,
}

impl ProductSystemData {
    pub fn new(processes: Vec<Process>) -> Self {
        Self { processes }
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn output_flows(&self) -> impl Iterator<Item = &OutputFlow> {
        self.processes
            .iter()
            .flat_map(|process| process.output_flows.iter())
    }
}

impl FromIterator<Process> for ProductSystemData {
    fn from_iter<I: IntoIterator<Item = Process>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
