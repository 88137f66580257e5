pub mod aggregate;
pub mod calculator;
pub mod error;
pub mod filters;
pub mod ingestion;
pub mod product_system;
pub mod report;

pub use aggregate::{total_by_output_kind, FlowTotals};
pub use calculator::{CircularityEngine, CircularityResult};
pub use error::{CoreError, Result};
pub use filters::{filter_processes, ProcessFilter};
pub use ingestion::{compute_hash, load_table, read_table, LoadedTable};
pub use product_system::{ProductSummary, ProductSystem};
pub use report::{export_report, write_report, AnalysisReport};

pub use circularity_parser as parser;
