use comfy_table::Table;

use ledger_catalog::load_default_catalog;
use ledger_cli::overrides::{MappingOverride, apply_overrides};
use ledger_cli::report::{catalog_table, gaps, mapping_table, summary_line};
use ledger_map::{FieldMappingModel, MappingError};

const HEADERS: &[&str] = &["Nº doc.", "Pos", "Importe ML", "Moneda", "Saldo final"];

fn model() -> FieldMappingModel {
    let loaded = load_default_catalog().expect("default catalog");
    FieldMappingModel::with_sources(loaded.catalog(), HEADERS.iter().copied())
}

fn overrides(values: &[&str]) -> Vec<MappingOverride> {
    values
        .iter()
        .map(|value| value.parse().expect("valid override"))
        .collect()
}

fn column(table: &Table, index: usize) -> Vec<String> {
    table
        .row_iter()
        .filter_map(|row| row.cell_iter().nth(index).map(|cell| cell.content()))
        .collect()
}

#[test]
fn catalog_table_lists_matching_fields() {
    let loaded = load_default_catalog().expect("default catalog");
    let fields = loaded.catalog.search("amount");
    let table = catalog_table(&fields);
    assert_eq!(column(&table, 0), vec!["amount", "amount_local_currency"]);
    assert_eq!(column(&table, 2), vec!["yes", "-"]);
    assert_eq!(column(&table, 3), vec!["high (95%)", "high (95%)"]);
}

#[test]
fn mapping_table_has_one_row_per_destination() {
    let model = model();
    let table = mapping_table(&model.rows(""));
    assert_eq!(table.row_iter().count(), model.catalog().len());

    let sources = column(&table, 1);
    assert!(sources.contains(&"Importe ML".to_string()));
    assert!(sources.contains(&"Moneda".to_string()));
    assert!(!sources.contains(&"Saldo final".to_string()));
    assert_eq!(sources.iter().filter(|s| *s != "-").count(), 4);
}

#[test]
fn summary_line_counts_required() {
    let model = model();
    let summary = model.summary();
    assert_eq!(summary_line(&summary), "4/5 columns mapped, 3/9 required");
    assert!(!summary.is_complete());
}

#[test]
fn gaps_name_missing_fields_and_unmapped_columns() {
    let model = model();
    let lines = gaps(&model);
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], "missing required field: description");
    assert_eq!(lines[6], "unmapped column: Saldo final");
}

#[test]
fn overrides_evict_previous_holder() {
    let mut model = model();
    assert_eq!(model.destination_for("Importe ML"), Some("amount"));

    apply_overrides(&mut model, &overrides(&["Saldo final=amount", "Pos="])).unwrap();
    assert_eq!(model.source_for("amount"), Some("Saldo final"));
    assert_eq!(model.destination_for("Importe ML"), None);
    assert_eq!(model.destination_for("Pos"), None);
    assert_eq!(model.required_completion_stats(), (2, 9));
}

#[test]
fn overrides_report_unknown_names() {
    let mut model = model();
    let error = apply_overrides(&mut model, &overrides(&["Saldo=amount"])).unwrap_err();
    assert_eq!(error, MappingError::UnknownField("Saldo".to_string()));

    let error =
        apply_overrides(&mut model, &overrides(&["Saldo final=currency_code"])).unwrap_err();
    assert_eq!(
        error,
        MappingError::UnknownDestination("currency_code".to_string())
    );
}
