//! Terminal tables for catalogs and mappings.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use ledger_map::{DestinationRow, FieldMappingModel, MappingSummary};
use ledger_model::{ConfidenceTier, DestinationField};

pub fn catalog_table(fields: &[&DestinationField]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Label"),
        header_cell("Required"),
        header_cell("Confidence"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    for field in fields {
        table.add_row(vec![
            Cell::new(&field.key).add_attribute(Attribute::Bold),
            Cell::new(&field.label),
            required_cell(field.required),
            confidence_cell(field),
            Cell::new(&field.description),
        ]);
    }
    table
}

/// Destination-first mapping table: one row per catalog field.
pub fn mapping_table(rows: &[DestinationRow<'_>]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Source column"),
        header_cell("Confidence"),
        header_cell("Required"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for row in rows {
        let source = match row.source {
            Some(source) => Cell::new(source).fg(Color::Green),
            None => dim_cell("-"),
        };
        let confidence = match row.source {
            Some(_) => confidence_cell(row.field),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(&row.field.label).add_attribute(Attribute::Bold),
            source,
            confidence,
            required_cell(row.field.required),
            Cell::new(&row.field.description),
        ]);
    }
    table
}

/// One-line progress summary, e.g. `11/12 columns mapped, 9/9 required`.
pub fn summary_line(summary: &MappingSummary) -> String {
    format!(
        "{}/{} columns mapped, {}/{} required",
        summary.mapped, summary.sources, summary.required_mapped, summary.required_total
    )
}

/// Lines describing what still blocks a complete import.
pub fn gaps(model: &FieldMappingModel) -> Vec<String> {
    let mut lines = Vec::new();
    for field in model.missing_required() {
        lines.push(format!("missing required field: {}", field.key));
    }
    for source in model.unmapped_sources() {
        lines.push(format!("unmapped column: {source}"));
    }
    lines
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn required_cell(required: bool) -> Cell {
    if required {
        Cell::new("yes").fg(Color::Red).add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn confidence_cell(field: &DestinationField) -> Cell {
    let color = match field.tier() {
        ConfidenceTier::High => Color::Green,
        ConfidenceTier::Medium => Color::Yellow,
        ConfidenceTier::Low => Color::DarkYellow,
        ConfidenceTier::None => Color::Red,
    };
    Cell::new(format!("{} ({}%)", field.tier(), field.confidence_percent())).fg(color)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
