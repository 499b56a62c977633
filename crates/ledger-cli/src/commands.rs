use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use ledger_catalog::{LoadedCatalog, load_catalog, load_default_catalog};
use ledger_cli::overrides::apply_overrides;
use ledger_cli::report::{catalog_table, gaps, mapping_table, summary_line};
use ledger_map::{FieldMappingModel, MappingSummary};

use crate::cli::{CheckArgs, FieldsArgs, MapArgs};

pub fn run_fields(args: &FieldsArgs) -> Result<()> {
    let loaded = resolve_catalog(args.catalog.as_deref())?;
    let term = args.search.as_deref().unwrap_or_default();
    let fields = loaded.catalog.search(term);
    println!("{}", catalog_table(&fields));
    println!(
        "{} of {} fields ({} required)",
        fields.len(),
        loaded.catalog.len(),
        loaded.catalog.required_count()
    );
    Ok(())
}

/// Map the given headers and print the result.
///
/// Returns the summary so the caller can pick the exit code.
pub fn run_map(args: &MapArgs) -> Result<MappingSummary> {
    let loaded = resolve_catalog(args.catalog.as_deref())?;
    let span = info_span!("map", catalog = %loaded.name, headers = args.headers.len());
    let _guard = span.enter();

    let mut model = FieldMappingModel::with_sources(loaded.catalog(), args.headers.iter());
    if args.no_auto {
        model.reset_all();
    }
    apply_overrides(&mut model, &args.overrides).context("apply --set overrides")?;

    let summary = model.summary();
    info!(
        mapped = summary.mapped,
        required_mapped = summary.required_mapped,
        required_total = summary.required_total,
        "mapping ready"
    );

    if args.json {
        let json = serde_json::to_string_pretty(model.mapping()).context("serialize mapping")?;
        println!("{json}");
        return Ok(summary);
    }

    println!("{}", mapping_table(&model.rows("")));
    println!("{}", summary_line(&summary));
    for line in gaps(&model) {
        println!("  {line}");
    }
    Ok(summary)
}

pub fn run_check(args: &CheckArgs) -> Result<()> {
    let loaded = load_catalog(&args.path)
        .with_context(|| format!("check {}", args.path.display()))?;
    let catalog = &loaded.catalog;
    println!(
        "{}: ok ({} fields, {} required, {} aliases)",
        loaded.name,
        catalog.len(),
        catalog.required_count(),
        catalog.aliases().len()
    );
    Ok(())
}

fn resolve_catalog(path: Option<&Path>) -> Result<LoadedCatalog> {
    match path {
        Some(path) => {
            load_catalog(path).with_context(|| format!("load catalog {}", path.display()))
        }
        None => load_default_catalog().context("load built-in catalog"),
    }
}
