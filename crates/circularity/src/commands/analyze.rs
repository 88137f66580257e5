use std::path::PathBuf;

use anyhow::{Context, Result};
use circularity_core::{
    export_report, filter_processes, read_table, AnalysisReport, CircularityEngine, ProductSystem,
};
use clap::Args;
use comfy_table::{presets::UTF8_FULL, Table};
use tracing::info;

use super::SelectionArgs;
use crate::config::AppConfig;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Product system table to analyse
    pub file: PathBuf,
    /// Product lifetime (L); falls back to `product_lifetime` in the config
    #[arg(long)]
    pub lifetime: Option<i32>,
    /// Product utility (U); falls back to `product_utility` in the config
    #[arg(long)]
    pub utility: Option<i32>,
    #[command(flatten)]
    pub selection: SelectionArgs,
    /// Field delimiter of the table and the exported report
    #[arg(long)]
    pub delimiter: Option<char>,
    /// Also write the delimited report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,
    /// Print the analysis as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Command-line values win; the config fills the gaps.
pub fn resolve_parameters(args: &AnalyzeArgs, config: &AppConfig) -> Result<(i32, i32)> {
    let lifetime = args
        .lifetime
        .or(config.product_lifetime)
        .context("product lifetime is required: pass --lifetime or set product_lifetime in the config")?;
    let utility = args
        .utility
        .or(config.product_utility)
        .context("product utility is required: pass --utility or set product_utility in the config")?;
    Ok((lifetime, utility))
}

pub fn analysis_table(report: &AnalysisReport) -> Table {
    let summary = &report.summary;
    let result = &report.result;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Metric", "Value"]);
    let rows = [
        ("Selection", report.selection.clone()),
        ("Processes", summary.process_count.to_string()),
        ("Product Life Time", summary.product_lifetime.to_string()),
        ("Product Utility", summary.product_utility.to_string()),
        ("Waste Eliminated", summary.waste_eliminated.to_string()),
        ("Recycled Input", summary.recycled_input.to_string()),
        ("Mass", summary.mass.to_string()),
        ("Primary Materials Energy (J)", summary.primary_materials_energy.to_string()),
        ("Secondary Materials Energy (J)", summary.secondary_materials_energy.to_string()),
        ("X", result.x.to_string()),
        ("Utility Factor", result.utility_factor.to_string()),
        ("Linear Flow Index", result.linear_flow_index.to_string()),
        ("Circularity Index", result.circularity_index.to_string()),
    ];
    for (metric, value) in rows {
        table.add_row(vec![metric.to_string(), value]);
    }
    table
}

pub fn run(args: AnalyzeArgs, config: &AppConfig) -> Result<()> {
    let (lifetime, utility) = resolve_parameters(&args, config)?;
    let delimiter = args.delimiter.unwrap_or(config.delimiter);

    let table = read_table(&args.file, delimiter)
        .with_context(|| format!("Failed to load table '{}'", args.file.display()))?;
    let filter = args.selection.filter();
    let selected = filter_processes(&table.data, &filter)?;

    let system = ProductSystem::new(selected, lifetime, utility);
    let result = CircularityEngine::new(&system).compute();
    let report = AnalysisReport {
        source: table.path.clone(),
        hash: table.hash.clone(),
        selection: filter.to_string(),
        summary: system.summary(),
        result,
    };

    if args.json {
        println!("{}", report.to_json_pretty()?);
    } else {
        println!("{}", analysis_table(&report));
    }

    if let Some(path) = &args.report {
        export_report(path, &system, &result, delimiter)
            .with_context(|| format!("Failed to export report to '{}'", path.display()))?;
        info!(path = %path.display(), "Report written");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(lifetime: Option<i32>, utility: Option<i32>) -> AnalyzeArgs {
        AnalyzeArgs {
            file: PathBuf::from("table.csv"),
            lifetime,
            utility,
            selection: SelectionArgs::default(),
            delimiter: None,
            report: None,
            json: false,
        }
    }

    #[test]
    fn flags_override_config() {
        let config = AppConfig {
            product_lifetime: Some(5),
            product_utility: Some(6),
            ..AppConfig::default()
        };
        assert_eq!(resolve_parameters(&args(Some(9), None), &config).unwrap(), (9, 6));
        assert_eq!(resolve_parameters(&args(None, None), &config).unwrap(), (5, 6));
    }

    #[test]
    fn missing_parameters_are_reported() {
        let err = resolve_parameters(&args(None, Some(3)), &AppConfig::default()).unwrap_err();
        assert!(err.to_string().contains("--lifetime"));
        let err = resolve_parameters(&args(Some(3), None), &AppConfig::default()).unwrap_err();
        assert!(err.to_string().contains("--utility"));
    }

    #[test]
    fn writes_report_next_to_table() {
        let dir = tempfile::tempdir().unwrap();
        let table = dir.path().join("table.csv");
        std::fs::write(
            &table,
            ";;;Casting;Foundry;;\nInput;;;;Output;;;\nflow;category;quantity;unit;flow;category;quantity;unit\nPig Iron;Metal;2;t;Virgin Material;Iron;2000;kg\n",
        )
        .unwrap();
        let report = dir.path().join("report.csv");

        let analyze = AnalyzeArgs {
            file: table,
            report: Some(report.clone()),
            json: true,
            ..args(Some(4), Some(4))
        };
        run(analyze, &AppConfig::default()).unwrap();

        let written = std::fs::read_to_string(report).unwrap();
        assert!(written.starts_with(";;;Processes;;;"));
        assert!(written.contains("Circularity Index"));
    }

    #[test]
    fn unmatched_selection_fails() {
        let dir = tempfile::tempdir().unwrap();
        let table = dir.path().join("table.csv");
        std::fs::write(
            &table,
            ";;;Casting;Foundry;;\nInput;;;;Output;;;\nflow;category;quantity;unit;flow;category;quantity;unit\nPig Iron;Metal;2;t;Virgin Material;Iron;2000;kg\n",
        )
        .unwrap();

        let analyze = AnalyzeArgs {
            file: table,
            selection: SelectionArgs {
                category: Some("Assembly".to_string()),
                name: None,
            },
            ..args(Some(4), Some(4))
        };
        let err = run(analyze, &AppConfig::default()).unwrap_err();
        assert!(err.to_string().contains("category 'Assembly'"));
    }
}
