use super::ui;
use crate::core::{ConversionClient, CurrencyCatalog};
use anyhow::Result;
use comfy_table::Cell;

const CODES_PER_ROW: usize = 10;

pub async fn run(client: &ConversionClient) -> Result<()> {
    let pb = ui::new_spinner("Loading currencies");
    let catalog = client.list_currencies().await;
    pb.finish_and_clear();

    display_catalog(&catalog);
    Ok(())
}

fn display_catalog(catalog: &CurrencyCatalog) {
    if catalog.is_fallback() {
        println!(
            "{}",
            ui::style_text(
                "Error loading currency data. Using default currencies.",
                ui::StyleType::Error
            )
        );
    }

    let mut table = ui::new_styled_table();
    for row in catalog.codes().chunks(CODES_PER_ROW) {
        table.add_row(row.iter().map(|code| Cell::new(code.as_str())));
    }
    println!("{table}");
    println!(
        "{} {}",
        ui::style_text("Currencies:", ui::StyleType::TotalLabel),
        ui::style_text(&catalog.len().to_string(), ui::StyleType::TotalValue)
    );
}
