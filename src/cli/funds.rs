use super::ui;
use crate::core::catalog::FundCatalog;
use crate::core::graph::Dag;
use crate::core::memo::SharedMemoCache;
use crate::core::resolver::{FundExposure, resolve_all};
use anyhow::Result;
use comfy_table::{Cell, Table};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Allowed distance of a fund's total exposure from 1.0 before it is flagged.
pub const TOTAL_TOLERANCE: f64 = 1e-9;

pub async fn run(catalog_path: &Path, precision: usize) -> Result<()> {
    let catalog = FundCatalog::load_from_path(catalog_path)?;
    let dag = Arc::new(Dag::build(&catalog));

    // A fund may be defined by more than one record
    let mut seen = HashSet::new();
    let funds: Vec<String> = catalog
        .fund_names()
        .into_iter()
        .filter(|name| seen.insert(*name))
        .map(String::from)
        .collect();
    info!(count = funds.len(), "Resolving all funds");

    let pb = ui::new_progress_bar(funds.len() as u64, true);
    pb.set_message("Resolving funds...");
    let results = resolve_all(dag, funds, SharedMemoCache::new(), &|| pb.inc(1)).await?;
    pb.finish_and_clear();

    println!(
        "\nCatalog: {}\n",
        ui::style_text(&catalog_path.display().to_string(), ui::StyleType::Title)
    );
    println!("{}", render_table(&results, precision));
    ui::print_separator();
    Ok(())
}

pub fn render_table(results: &[FundExposure], precision: usize) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Fund"),
        ui::header_cell("Shares"),
        ui::header_cell("Total Exposure"),
        ui::header_cell("Status"),
    ]);

    for result in results {
        let row = match &result.exposures {
            Ok(exposures) => {
                let total = exposures.total();
                let status = if (total - 1.0).abs() <= TOTAL_TOLERANCE {
                    Cell::new("OK")
                } else {
                    ui::error_cell("Weights do not sum to 1")
                };
                vec![
                    Cell::new(&result.fund),
                    Cell::new(exposures.len()),
                    ui::weight_cell(total, precision),
                    status,
                ]
            }
            Err(e) => vec![
                Cell::new(&result.fund),
                Cell::new("N/A"),
                Cell::new("N/A"),
                ui::error_cell(&e.to_string()),
            ],
        };
        table.add_row(row);
    }
    table
}
