use std::sync::Arc;

use ledger_map::{FieldMapping, HeaderNames, ImportSession};
use ledger_model::{AliasTable, Catalog, DestinationField, SessionContext, UserRef};

fn catalog() -> Arc<Catalog> {
    let aliases: AliasTable = [("Importe ML", "amount"), ("Acreedor", "vendor_id")]
        .into_iter()
        .collect();
    let fields = vec![
        DestinationField::new("amount", true, 0.95).with_label("Amount"),
        DestinationField::new("vendor_id", false, 0.7),
        DestinationField::new("currency", false, 0.9),
    ];
    Arc::new(Catalog::new(fields, aliases).expect("valid catalog"))
}

fn session() -> ImportSession {
    let context = SessionContext::new(UserRef::new("u-1", "Lucía"), "PRJ-9", "2023-12")
        .expect("valid context");
    ImportSession::new(context, catalog())
}

#[test]
fn new_session_has_nothing_pending() {
    let session = session();
    assert!(session.mapping().is_empty());
    assert!(!session.has_pending_changes());
    assert!(!session.is_applied());
    assert_eq!(session.context().user.name, "Lucía");
}

#[test]
fn seeded_mapping_is_pending_until_applied() {
    let mut session = session();
    session.load_headers(["Importe ML", "Acreedor", "Moneda"]);

    assert!(session.has_pending_changes());
    assert!(!session.is_applied());
    assert_eq!(
        session.display_headers(HeaderNames::Mapped),
        vec!["Importe ML", "Acreedor", "Moneda"]
    );

    let payload = session.apply();
    assert_eq!(payload.len(), 3);
    assert_eq!(payload["Importe ML"], "amount");
    assert_eq!(payload["Moneda"], "");
    assert!(session.is_applied());
    assert!(!session.has_pending_changes());
    assert_eq!(
        session.display_headers(HeaderNames::Mapped),
        vec!["Amount", "vendor_id", "Moneda"]
    );
    assert_eq!(
        session.display_headers(HeaderNames::Original),
        vec!["Importe ML", "Acreedor", "Moneda"]
    );
}

#[test]
fn edits_after_apply_do_not_change_displayed_names() {
    let mut session = session();
    session.load_headers(["Importe ML", "Acreedor", "Moneda"]);
    session.apply();

    session.set_mapping("Moneda", Some("currency")).unwrap();
    assert!(session.has_pending_changes());
    assert!(session.is_applied());
    assert_eq!(
        session.display_headers(HeaderNames::Mapped),
        vec!["Amount", "vendor_id", "Moneda"]
    );

    session.set_mapping("Moneda", None).unwrap();
    assert!(!session.has_pending_changes());
}

#[test]
fn reset_after_apply_is_pending() {
    let mut session = session();
    session.load_headers(["Importe ML"]);
    session.apply();
    session.reset_all();
    assert!(session.has_pending_changes());
    assert_eq!(session.summary().mapped, 0);

    session.apply_automatic();
    assert!(!session.has_pending_changes());
}

#[test]
fn loading_new_headers_drops_applied_snapshot() {
    let mut session = session();
    session.load_headers(["Importe ML"]);
    session.apply();

    session.load_headers(["CUENTA", "DESCRIPCIÓN"]);
    assert!(!session.is_applied());
    assert!(!session.has_pending_changes());
    assert_eq!(
        session.display_headers(HeaderNames::Mapped),
        vec!["CUENTA", "DESCRIPCIÓN"]
    );
}

#[test]
fn applied_mapping_serializes_as_payload() {
    let mut session = session();
    session.load_headers(["Moneda", "Importe ML"]);
    session.apply();

    let applied = session.applied().expect("applied snapshot");
    insta::assert_json_snapshot!(applied, @r###"
    {
      "Moneda": "",
      "Importe ML": "amount"
    }
    "###);

    let json = serde_json::to_string(applied).unwrap();
    let round: FieldMapping = serde_json::from_str(&json).unwrap();
    assert_eq!(&round, applied);
}
