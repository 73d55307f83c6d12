use super::ui;
use crate::core::catalog::FundCatalog;
use crate::core::exposure::ExposureMap;
use crate::core::graph::Dag;
use crate::core::resolver::{Strategy, resolve};
use anyhow::Result;
use comfy_table::{Cell, Table};
use std::path::Path;
use tracing::info;

pub fn run(
    catalog_path: &Path,
    fund: &str,
    strategy: Strategy,
    json: bool,
    precision: usize,
) -> Result<()> {
    let catalog = FundCatalog::load_from_path(catalog_path)?;
    let dag = Dag::build(&catalog);

    info!(fund, %strategy, "Resolving exposures");
    let exposures = resolve(fund, &dag, strategy, None)?;

    if json {
        println!("{}", render_json(&exposures)?);
    } else {
        display_exposure_table(fund, &exposures, precision);
    }
    Ok(())
}

/// Pretty JSON object of share to exposure, keys in lexical order.
pub fn render_json(exposures: &ExposureMap) -> Result<String> {
    let value = serde_json::to_value(exposures)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

pub fn render_table(exposures: &ExposureMap, precision: usize) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Share"),
        ui::header_cell("Exposure"),
        ui::header_cell("Allocation"),
    ]);

    for (share, weight) in exposures.sorted_by_weight() {
        table.add_row(vec![
            Cell::new(share),
            ui::weight_cell(weight, precision),
            ui::percentage_cell(weight, precision.saturating_sub(2)),
        ]);
    }
    table
}

fn display_exposure_table(fund: &str, exposures: &ExposureMap, precision: usize) {
    println!("\nFund: {}\n", ui::style_text(fund, ui::StyleType::Title));

    if exposures.is_empty() {
        println!(
            "{}",
            ui::style_text("No underlying shares", ui::StyleType::Subtle)
        );
    } else {
        println!("{}", render_table(exposures, precision));
    }

    println!(
        "\n{} {}",
        ui::style_text("Total Exposure:", ui::StyleType::TotalLabel),
        ui::style_text(
            &format!("{:.precision$}", exposures.total()),
            ui::StyleType::TotalValue
        )
    );

    ui::print_separator();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn fund_b() -> ExposureMap {
        [
            ("GreenCo".to_string(), 0.3),
            ("GrapeCo".to_string(), 0.2),
            ("MicroFit".to_string(), 0.5),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_render_json_sorted_by_share() {
        let json = render_json(&fund_b()).unwrap();
        let grape = json.find("GrapeCo").unwrap();
        let green = json.find("GreenCo").unwrap();
        let micro = json.find("MicroFit").unwrap();
        assert!(grape < green && green < micro);

        let parsed: ExposureMap = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, fund_b());
    }

    #[test]
    fn test_render_table_orders_by_exposure() {
        let rendered = render_table(&fund_b(), 4).to_string();
        let micro = rendered.find("MicroFit").unwrap();
        let green = rendered.find("GreenCo").unwrap();
        let grape = rendered.find("GrapeCo").unwrap();
        assert!(micro < green && green < grape);
        assert!(rendered.contains("0.5000"));
        assert!(rendered.contains("50.00%"));
    }

    #[test]
    fn test_run_with_catalog_file() -> Result<()> {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile()?;
        file.write_all(
            br#"[{"name": "Fund B", "holdings": [
                {"name": "GreenCo", "weight": 0.3},
                {"name": "GrapeCo", "weight": 0.2},
                {"name": "MicroFit", "weight": 0.5}]}]"#,
        )?;

        run(file.path(), "Fund B", Strategy::Trampoline, false, 4)?;
        run(file.path(), "Fund B", Strategy::Memoized, true, 4)?;

        let err = run(file.path(), "Fund Z", Strategy::Recursive, false, 4).unwrap_err();
        assert_eq!(err.to_string(), "Fund 'Fund Z' was not found");
        Ok(())
    }
}
