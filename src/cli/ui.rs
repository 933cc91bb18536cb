use crate::core::currency::{Currency, format_amount};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    TotalLabel,
    Positive,
    Negative,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::TotalLabel => style(text).bold(),
        StyleType::Positive => style(text).green().bold(),
        StyleType::Negative => style(text).red().bold(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Right-aligned, uncolored amount.
pub fn amount_cell(amount: f64, currency: Currency) -> Cell {
    Cell::new(format_amount(amount, currency)).set_alignment(CellAlignment::Right)
}

/// Amount colored green when non-negative and red otherwise.
pub fn signed_amount_cell(amount: f64, currency: Currency) -> Cell {
    let color = if amount >= 0.0 {
        Color::Green
    } else {
        Color::Red
    };
    amount_cell(amount, currency).fg(color)
}

/// Styles a formatted amount by its sign, for use outside tables.
pub fn style_amount(amount: f64, currency: Currency) -> String {
    let text = format_amount(amount, currency);
    if amount >= 0.0 {
        style_text(&text, StyleType::Positive)
    } else {
        style_text(&text, StyleType::Negative)
    }
}
