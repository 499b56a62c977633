//! Property tests for mapping invariants.

use std::collections::BTreeMap;
use std::sync::Arc;

use proptest::prelude::*;

use ledger_map::FieldMappingModel;
use ledger_model::{AliasTable, Catalog, DestinationField};

const KEYS: &[&str] = &["amount", "vendor_id", "currency", "posting_date", "line_number"];
const SOURCES: &[&str] = &["Importe ML", "Acreedor", "Moneda", "Fe.Contab.", "Pos", "Extra", "CT"];

fn catalog() -> Arc<Catalog> {
    let fields = vec![
        DestinationField::new("amount", true, 0.95),
        DestinationField::new("vendor_id", false, 0.7),
        DestinationField::new("currency", false, 0.9),
        DestinationField::new("posting_date", true, 1.0),
        DestinationField::new("line_number", true, 1.0),
    ];
    let aliases: AliasTable = [
        ("Importe ML", "amount"),
        ("Acreedor", "vendor_id"),
        ("Fe.Contab.", "posting_date"),
        ("Pos", "line_number"),
    ]
    .into_iter()
    .collect();
    Arc::new(Catalog::new(fields, aliases).unwrap())
}

#[derive(Debug, Clone)]
enum Action {
    Set(usize, Option<usize>),
    Reset,
    Automatic,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        6 => (0..SOURCES.len(), proptest::option::of(0..KEYS.len()))
            .prop_map(|(s, k)| Action::Set(s, k)),
        1 => Just(Action::Reset),
        1 => Just(Action::Automatic),
    ]
}

fn sources() -> impl Strategy<Value = Vec<&'static str>> {
    proptest::sample::subsequence(SOURCES, 0..=SOURCES.len())
}

fn apply(model: &mut FieldMappingModel, action: &Action) {
    match action {
        Action::Set(source, key) => {
            let source = SOURCES[*source];
            let ok = model.set_mapping(source, key.map(|k| KEYS[k])).is_ok();
            assert_eq!(ok, model.mapping().contains(source));
        }
        Action::Reset => {
            model.reset_all();
        }
        Action::Automatic => {
            model.apply_automatic();
        }
    }
}

fn assert_invariants(model: &FieldMappingModel, sources: &[&str]) {
    let mut seen: BTreeMap<&str, &str> = BTreeMap::new();
    for (source, destination) in model.mapping().iter() {
        if let Some(key) = destination {
            assert!(
                seen.insert(key, source).is_none(),
                "destination {key} held twice"
            );
            assert_eq!(model.source_for(key), Some(source));
        }
    }
    for key in KEYS {
        if model.source_for(key).is_some() {
            assert!(seen.contains_key(key));
        }
    }

    let mapped: Vec<&str> = model.mapping().sources().collect();
    assert_eq!(mapped, sources);

    let (mapped_required, total_required) = model.required_completion_stats();
    assert!(mapped_required <= total_required);
    assert_eq!(total_required, 3);
    assert!(model.mapped_count() <= sources.len());
}

proptest! {
    #[test]
    fn invariants_hold_after_every_action(
        sources in sources(),
        actions in proptest::collection::vec(action(), 0..40),
    ) {
        let mut model = FieldMappingModel::with_sources(catalog(), sources.iter().copied());
        assert_invariants(&model, &sources);
        for action in &actions {
            apply(&mut model, action);
            assert_invariants(&model, &sources);
        }
    }

    #[test]
    fn apply_automatic_is_idempotent(
        sources in sources(),
        actions in proptest::collection::vec(action(), 0..20),
    ) {
        let mut model = FieldMappingModel::with_sources(catalog(), sources.iter().copied());
        for action in &actions {
            apply(&mut model, action);
        }
        let first = model.apply_automatic().clone();
        let second = model.apply_automatic().clone();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn set_mapping_targets_exactly_one_holder(
        sources in sources(),
        source in 0..SOURCES.len(),
        key in 0..KEYS.len(),
    ) {
        let mut model = FieldMappingModel::with_sources(catalog(), sources.iter().copied());
        let source = SOURCES[source];
        let key = KEYS[key];
        if model.set_mapping(source, Some(key)).is_ok() {
            prop_assert_eq!(model.source_for(key), Some(source));
            prop_assert_eq!(model.destination_for(source), Some(key));
            let holders = model
                .mapping()
                .iter()
                .filter(|(_, d)| *d == Some(key))
                .count();
            prop_assert_eq!(holders, 1);
        } else {
            prop_assert!(!sources.contains(&source));
        }
    }

    #[test]
    fn reset_all_clears_everything(sources in sources()) {
        let mut model = FieldMappingModel::with_sources(catalog(), sources.iter().copied());
        model.reset_all();
        prop_assert_eq!(model.mapped_count(), 0);
        prop_assert_eq!(model.required_completion_stats().0, 0);
        prop_assert_eq!(model.mapping().len(), sources.len());
    }
}
