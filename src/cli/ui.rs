use crate::core::RateHistory;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

const RATE_COLUMNS: [&str; 5] = ["Date", "Currency", "Sale", "Purchase", "Spread"];

/// Bold title naming the date range covered by `history`, newest first.
pub fn rates_title(history: &RateHistory) -> String {
    let title = match (history.first(), history.last()) {
        (Some(newest), Some(oldest)) if newest.date != oldest.date => {
            format!("PrivatBank exchange rates {} .. {}", newest.date, oldest.date)
        }
        (Some(only), _) => format!("PrivatBank exchange rates {}", only.date),
        _ => "PrivatBank exchange rates".to_string(),
    };
    style(title).bold().underlined().to_string()
}

pub fn no_rates_notice() -> String {
    style("No rates for the configured currencies").dim().to_string()
}

/// Rounded UTF-8 table with the rate columns already in the header.
pub fn new_rates_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(RATE_COLUMNS.iter().map(|name| {
            Cell::new(name)
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold)
        }));
    table
}

pub fn currency_cell(code: &str) -> Cell {
    Cell::new(code).add_attribute(Attribute::Bold)
}

pub fn rate_cell(value: f64) -> Cell {
    Cell::new(format!("{value:.4}")).set_alignment(CellAlignment::Right)
}

/// Sale minus purchase, red when the quote is inverted.
pub fn spread_cell(sale: f64, purchase: f64) -> Cell {
    let spread = sale - purchase;
    let cell = Cell::new(format!("{spread:.4}")).set_alignment(CellAlignment::Right);
    if spread < 0.0 {
        cell.fg(Color::Red)
    } else {
        cell.fg(Color::DarkGrey)
    }
}

/// Per-day fetch progress on stderr; hidden when stderr is not a terminal.
pub fn new_fetch_progress(days: u64) -> ProgressBar {
    let pb = ProgressBar::new(days);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} {msg} [{bar:30.cyan/blue}] {pos}/{len} days")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message("Fetching rates");
    pb
}
