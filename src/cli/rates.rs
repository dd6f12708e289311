use super::ui;
use crate::OutputFormat;
use crate::core::RateHistory;
use crate::report::to_pretty_json;
use anyhow::Result;
use comfy_table::{Cell, Table};

pub fn display(history: &RateHistory, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", to_pretty_json(history)?),
        OutputFormat::Table => {
            println!("\n{}", ui::rates_title(history));
            if history.is_empty() {
                println!("{}", ui::no_rates_notice());
            } else {
                println!("{}", build_table(history));
            }
        }
    }
    Ok(())
}

/// One row per date and currency, in history order.
pub fn build_table(history: &RateHistory) -> Table {
    let mut table = ui::new_rates_table();
    for entry in history {
        for (code, pair) in &entry.rates {
            table.add_row(vec![
                Cell::new(&entry.date),
                ui::currency_cell(code),
                ui::rate_cell(pair.sale),
                ui::rate_cell(pair.purchase),
                ui::spread_cell(pair.sale, pair.purchase),
            ]);
        }
    }
    table
}
