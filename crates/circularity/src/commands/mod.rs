pub mod analyze;
pub mod processes;
pub mod units;

use circularity_core::ProcessFilter;
use clap::Args;

/// Narrows the analysis to one category or one process name.
#[derive(Args, Debug, Default, Clone)]
pub struct SelectionArgs {
    /// Keep only processes in this category
    #[arg(long, conflicts_with = "name")]
    pub category: Option<String>,
    /// Keep only processes with this exact name
    #[arg(long)]
    pub name: Option<String>,
}

impl SelectionArgs {
    pub fn filter(&self) -> ProcessFilter {
        match (&self.category, &self.name) {
            (Some(category), _) => ProcessFilter::Category(category.clone()),
            (None, Some(name)) => ProcessFilter::Name(name.clone()),
            (None, None) => ProcessFilter::All,
        }
    }
}
