use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use circularity_parser::table::delimiter_byte;
use circularity_parser::{Flow, Process};
use serde::Serialize;
use tracing::info;

use crate::calculator::CircularityResult;
use crate::error::{CoreError, Result};
use crate::product_system::{ProductSummary, ProductSystem};

const ROW_WIDTH: usize = 8;
const FLOW_WIDTH: usize = 4;
const LAYOUT_CAPTIONS: [&str; ROW_WIDTH] = ["Input", "", "", "", "Output", "", "", ""];
const LAYOUT_COLUMNS: [&str; ROW_WIDTH] = [
    "flow", "category", "quantity", "unit", "flow", "category", "quantity", "unit",
];

/// Everything one analysis run produced, in a serializable shape.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub source: PathBuf,
    pub hash: String,
    pub selection: String,
    pub summary: ProductSummary,
    pub result: CircularityResult,
}

impl AnalysisReport {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn section_title(title: &str) -> Vec<String> {
    let mut row = vec![String::new(); ROW_WIDTH - 1];
    row[3] = title.to_string();
    row
}

fn flow_fields<F: Flow>(label: &str, flow: &F) -> Vec<String> {
    vec![
        label.to_string(),
        flow.category().to_string(),
        flow.value().to_string(),
        flow.unit().to_string(),
    ]
}

fn process_rows(process: &Process) -> Vec<Vec<String>> {
    let mut header = vec![String::new(); ROW_WIDTH - 1];
    header[3] = process.name.clone();
    header[4] = process.category.clone();

    let mut rows = vec![
        header,
        LAYOUT_CAPTIONS.map(String::from).to_vec(),
        LAYOUT_COLUMNS.map(String::from).to_vec(),
    ];

    for idx in 0..process.flow_count() {
        let mut row = match process.input_flows.get(idx) {
            Some(input) => flow_fields(&input.name, input),
            None => vec![String::new(); FLOW_WIDTH],
        };
        match process.output_flows.get(idx) {
            Some(output) => row.extend(flow_fields(output.kind.label(), output)),
            None => row.extend(vec![String::new(); FLOW_WIDTH]),
        }
        rows.push(row);
    }
    rows
}

/// Writes the processes, product system figures and indices as a delimited report.
///
/// Below its title row, the process section uses the same layout the table
/// parser reads. The title row itself is not a process header.
pub fn write_report<W: Write>(
    writer: W,
    system: &ProductSystem,
    result: &CircularityResult,
    delimiter: char,
) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter_byte(delimiter)?)
        .flexible(true)
        .from_writer(writer);

    csv_writer.write_record(section_title("Processes"))?;
    for process in system.processes() {
        for row in process_rows(process) {
            csv_writer.write_record(&row)?;
        }
    }

    let summary = system.summary();
    csv_writer.write_record(section_title("Product System Info"))?;
    let info_rows = [
        ("Product Life Time: ", summary.product_lifetime.to_string()),
        ("Product Utility: ", summary.product_utility.to_string()),
        ("Waste Eliminated: ", summary.waste_eliminated.to_string()),
        ("Recycled Input: ", summary.recycled_input.to_string()),
        ("Mass: ", summary.mass.to_string()),
    ];
    for (label, value) in info_rows {
        csv_writer.write_record([label, value.as_str()])?;
    }

    csv_writer.write_record(section_title("Results"))?;
    let result_rows = [
        ("X: ", result.x),
        ("Utility Factor: ", result.utility_factor),
        ("Linear Flow Index: ", result.linear_flow_index),
        ("Circularity Index: ", result.circularity_index),
    ];
    for (label, value) in result_rows {
        csv_writer.write_record([label, value.to_string().as_str()])?;
    }

    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn export_report(
    path: &Path,
    system: &ProductSystem,
    result: &CircularityResult,
    delimiter: char,
) -> Result<()> {
    let file = File::create(path).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_report(BufWriter::new(file), system, result, delimiter)?;
    info!(path = %path.display(), "Exported circularity report");
    Ok(())
}
