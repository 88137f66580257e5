pub mod errors;
pub mod model;
pub mod table;
pub mod units;

pub use errors::{FlowSide, ParserError};
pub use model::{Flow, InputFlow, OutputFlow, OutputFlowKind, Process, ProductSystemData};
pub use table::{parse_rows, parse_table, ParserState, TableParser, DEFAULT_DELIMITER};
pub use units::{Measured, UnitError, UnitFamily, UnitTag};
