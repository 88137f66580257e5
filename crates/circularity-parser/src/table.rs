use tracing::{debug, info};

use crate::errors::{FlowSide, ParserError};
use crate::model::{Flow, InputFlow, OutputFlow, OutputFlowKind, Process, ProductSystemData};
use crate::units::{UnitError, UnitTag};

pub const DEFAULT_DELIMITER: char = ';';

const HEADER_NAME: usize = 3;
const HEADER_CATEGORY: usize = 4;
const HEADER_FIELDS: usize = 5;
const LAYOUT_ROWS_AFTER_HEADER: usize = 2;

const INPUT_NAME: usize = 0;
const INPUT_CATEGORY: usize = 1;
const INPUT_QUANTITY: usize = 2;
const INPUT_UNIT: usize = 3;
const OUTPUT_KIND: usize = 4;
const OUTPUT_CATEGORY: usize = 5;
const OUTPUT_QUANTITY: usize = 6;
const OUTPUT_UNIT: usize = 7;
const FLOW_FIELDS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    AwaitingRow,
    AccumulatingFlows,
}

#[derive(Debug, Default)]
struct ProcessBlock {
    name: String,
    category: String,
    input_flows: Vec<InputFlow>,
    output_flows: Vec<OutputFlow>,
}

impl ProcessBlock {
    fn has_flows(&self) -> bool {
        !self.input_flows.is_empty() || !self.output_flows.is_empty()
    }
}

/// Rebuilds processes from pre-split rows, one row at a time.
///
/// A row whose first field is blank opens a new process block; the two rows
/// after it are layout rows and are ignored. Every other row contributes one
/// input flow and one output flow to the open block.
#[derive(Debug)]
pub struct TableParser {
    state: ParserState,
    block: ProcessBlock,
    layout_rows_pending: usize,
    processes: Vec<Process>,
}

impl Default for TableParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TableParser {
    pub fn new() -> Self {
        Self {
            state: ParserState::AwaitingRow,
            block: ProcessBlock::default(),
            layout_rows_pending: 0,
            processes: Vec::new(),
        }
    }

    pub fn state(&self) -> ParserState {
        self.state
    }

    pub fn finished_processes(&self) -> &[Process] {
        &self.processes
    }

    /// Feeds one row. `line` is the 1-based position used in error messages.
    pub fn push_row<S: AsRef<str>>(&mut self, line: usize, fields: &[S]) -> Result<(), ParserError> {
        if self.layout_rows_pending > 0 {
            self.layout_rows_pending -= 1;
            return Ok(());
        }

        if is_header_row(fields) {
            self.start_block(line, fields)
        } else {
            let (input, output) = parse_flow_row(line, fields)?;
            self.block.input_flows.push(input);
            self.block.output_flows.push(output);
            self.state = ParserState::AccumulatingFlows;
            Ok(())
        }
    }

    /// Closes the open block, keeping it only if it collected flows.
    pub fn flush(&mut self) {
        let block = std::mem::take(&mut self.block);
        self.state = ParserState::AwaitingRow;
        if !block.has_flows() {
            return;
        }
        debug!(
            process = %block.name,
            category = %block.category,
            flows = block.input_flows.len(),
            "Finalized process"
        );
        self.processes.push(Process::new(
            block.name,
            block.category,
            block.input_flows,
            block.output_flows,
        ));
    }

    pub fn finish(mut self) -> ProductSystemData {
        self.flush();
        ProductSystemData::new(self.processes)
    }

    fn start_block<S: AsRef<str>>(&mut self, line: usize, fields: &[S]) -> Result<(), ParserError> {
        if fields.len() < HEADER_FIELDS {
            return Err(ParserError::MalformedRow {
                line,
                expected: HEADER_FIELDS,
                found: fields.len(),
            });
        }
        self.flush();
        self.block.name = fields[HEADER_NAME].as_ref().to_string();
        self.block.category = fields[HEADER_CATEGORY].as_ref().to_string();
        self.layout_rows_pending = LAYOUT_ROWS_AFTER_HEADER;
        self.state = ParserState::AccumulatingFlows;
        Ok(())
    }
}

fn is_header_row<S: AsRef<str>>(fields: &[S]) -> bool {
    fields
        .first()
        .map_or(true, |first| first.as_ref().trim().is_empty())
}

fn parse_flow_row<S: AsRef<str>>(
    line: usize,
    fields: &[S],
) -> Result<(InputFlow, OutputFlow), ParserError> {
    if fields.len() < FLOW_FIELDS {
        return Err(ParserError::MalformedRow {
            line,
            expected: FLOW_FIELDS,
            found: fields.len(),
        });
    }
    let field = |idx: usize| field_at(fields, idx);

    let input_name = field(INPUT_NAME);
    let input_quantity = parse_quantity(line, "input quantity", field(INPUT_QUANTITY))?;
    let input_unit = parse_unit(line, field(INPUT_UNIT))?;
    if input_quantity == 0.0 {
        return Err(ParserError::ZeroQuantity {
            line,
            side: FlowSide::Input,
            name: input_name.to_string(),
        });
    }

    let output_kind = parse_output_kind(line, field(OUTPUT_KIND))?;
    let output_quantity = parse_quantity(line, "output quantity", field(OUTPUT_QUANTITY))?;
    let output_unit = parse_unit(line, field(OUTPUT_UNIT))?;
    if output_quantity.ceil() == 0.0 {
        return Err(ParserError::ZeroQuantity {
            line,
            side: FlowSide::Output,
            name: output_kind.label().to_string(),
        });
    }

    let input = normalized(InputFlow::new(
        input_name,
        field(INPUT_CATEGORY),
        input_quantity,
        input_unit,
    ));
    let output = normalized(OutputFlow::new(
        output_kind,
        field(OUTPUT_CATEGORY),
        output_quantity,
        output_unit,
    ));
    Ok((input, output))
}

fn field_at<S: AsRef<str>>(fields: &[S], idx: usize) -> &str {
    fields[idx].as_ref()
}

fn normalized<F: Flow>(mut flow: F) -> F {
    flow.normalize();
    flow
}

fn parse_quantity(line: usize, column: &'static str, value: &str) -> Result<f64, ParserError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|source| ParserError::InvalidNumericField {
            line,
            column,
            value: value.to_string(),
            source,
        })
}

/// Accepts a bare symbol or a qualified `Family.SYMBOL` tag. A cell whose
/// prefix names no family is an unknown symbol, not a foreign family.
fn parse_unit(line: usize, symbol: &str) -> Result<UnitTag, ParserError> {
    symbol.parse::<UnitTag>().map_err(|err| match err {
        UnitError::UnsupportedFamily(_) => ParserError::UnitNotRecognized {
            line,
            symbol: symbol.to_string(),
        },
        other => ParserError::from_unit(line, other),
    })
}

fn parse_output_kind(line: usize, label: &str) -> Result<OutputFlowKind, ParserError> {
    OutputFlowKind::try_from(label).map_err(|_| ParserError::FlowKindNotRecognized {
        line,
        label: label.to_string(),
    })
}

/// Parses an in-memory sequence of pre-split rows.
pub fn parse_rows<I, R, S>(rows: I) -> Result<ProductSystemData, ParserError>
where
    I: IntoIterator<Item = R>,
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let mut parser = TableParser::new();
    for (idx, row) in rows.into_iter().enumerate() {
        parser.push_row(idx + 1, row.as_ref())?;
    }
    Ok(parser.finish())
}

fn reader_builder(delimiter: u8) -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter);
    builder
}

pub fn delimiter_byte(delimiter: char) -> Result<u8, ParserError> {
    u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or(ParserError::InvalidDelimiter { delimiter })
}

/// Parses a whole delimited table held in memory.
pub fn parse_table(content: &str, delimiter: char) -> Result<ProductSystemData, ParserError> {
    let mut reader = reader_builder(delimiter_byte(delimiter)?).from_reader(content.as_bytes());
    let mut parser = TableParser::new();

    for (row_idx, record) in reader.records().enumerate() {
        let record = record.map_err(|source| ParserError::Csv { source })?;
        let line = record
            .position()
            .map(|pos| pos.line() as usize)
            .unwrap_or(row_idx + 1);
        let fields: Vec<&str> = record.iter().collect();
        parser.push_row(line, &fields)?;
    }

    let data = parser.finish();
    info!(processes = data.len(), "Parsed product system table");
    Ok(data)
}
