use std::fmt;

use circularity_parser::{Process, ProductSystemData};
use tracing::debug;

use crate::error::{CoreError, Result};

/// Selection applied to the processes of a loaded table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProcessFilter {
    #[default]
    All,
    Category(String),
    Name(String),
}

impl ProcessFilter {
    pub fn matches(&self, process: &Process) -> bool {
        match self {
            ProcessFilter::All => true,
            ProcessFilter::Category(category) => process.category == *category,
            ProcessFilter::Name(name) => process.name == *name,
        }
    }
}

impl fmt::Display for ProcessFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessFilter::All => f.write_str("all processes"),
            ProcessFilter::Category(category) => write!(f, "category '{category}'"),
            ProcessFilter::Name(name) => write!(f, "name '{name}'"),
        }
    }
}

/// Returns a new view holding the matching processes in table order.
///
/// `data` is left untouched. An empty selection is an error, including
/// [`ProcessFilter::All`] over an empty table.
pub fn filter_processes(data: &ProductSystemData, filter: &ProcessFilter) -> Result<ProductSystemData> {
    let selected: ProductSystemData = data
        .processes()
        .iter()
        .filter(|process| filter.matches(process))
        .cloned()
        .collect();

    if selected.is_empty() {
        return Err(CoreError::EmptyResult {
            filter: filter.to_string(),
        });
    }
    debug!(%filter, selected = selected.len(), total = data.len(), "Filtered processes");
    Ok(selected)
}
