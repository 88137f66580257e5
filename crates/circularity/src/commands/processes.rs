use std::path::PathBuf;

use anyhow::{Context, Result};
use circularity_core::parser::Process;
use circularity_core::{filter_processes, read_table};
use clap::Args;
use comfy_table::{presets::UTF8_FULL, Table};

use super::SelectionArgs;
use crate::config::AppConfig;

#[derive(Args, Debug)]
pub struct ProcessesArgs {
    /// Product system table to inspect
    pub file: PathBuf,
    #[command(flatten)]
    pub selection: SelectionArgs,
    /// Field delimiter of the table
    #[arg(long)]
    pub delimiter: Option<char>,
}

/// One row per flow index; a shorter side is left blank.
pub fn process_table(process: &Process) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Input",
        "Category",
        "Quantity",
        "Unit",
        "Output",
        "Category",
        "Quantity",
        "Unit",
    ]);

    for idx in 0..process.flow_count() {
        let mut row = match process.input_flows.get(idx) {
            Some(flow) => vec![
                flow.name.clone(),
                flow.category.clone(),
                flow.value.to_string(),
                flow.unit.to_string(),
            ],
            None => vec![String::new(); 4],
        };
        match process.output_flows.get(idx) {
            Some(flow) => row.extend([
                flow.kind.to_string(),
                flow.category.clone(),
                flow.value.to_string(),
                flow.unit.to_string(),
            ]),
            None => row.extend(vec![String::new(); 4]),
        }
        table.add_row(row);
    }
    table
}

pub fn run(args: ProcessesArgs, config: &AppConfig) -> Result<()> {
    let delimiter = args.delimiter.unwrap_or(config.delimiter);
    let table = read_table(&args.file, delimiter)
        .with_context(|| format!("Failed to load table '{}'", args.file.display()))?;
    let selected = filter_processes(&table.data, &args.selection.filter())?;

    for process in selected.processes() {
        println!("{} [{}]", process.name, process.category);
        println!("{}", process_table(process));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use circularity_core::parser::parse_table;

    #[test]
    fn renders_normalized_flows() {
        let data = parse_table(
            ";;;Casting;Foundry;;\nInput;;;;Output;;;\nflow;category;quantity;unit;flow;category;quantity;unit\nPig Iron;Metal;2;t;Virgin Material;Iron;2000;g\n",
            ';',
        )
        .unwrap();

        let rendered = process_table(&data.processes()[0]).to_string();
        assert!(rendered.contains("Pig Iron"));
        assert!(rendered.contains("2000"));
        assert!(rendered.contains("Virgin Material"));
        assert!(rendered.contains("KG"));
    }
}
