use std::collections::BTreeMap;

use pairing_core::{PairingSettings, PipelineSession};
use pairing_core::ingest::{ColumnMapping, ImportRow};
use pairing_core::map::MatchCriteria;
use pairing_core::model::{FieldDefinition, FieldOption, FieldType, MatchFieldPatch, Side};
use serde_json::{Value, json};

fn stage(key: &str) -> FieldDefinition {
    FieldDefinition::new(key, "Stage", FieldType::Select).with_options(vec![
        FieldOption::new("Seed", "seed"),
        FieldOption::new("Series A", "series_a"),
    ])
}

fn founder_fields() -> Vec<FieldDefinition> {
    vec![
        FieldDefinition::new("company", "Company", FieldType::Text).with_required(true),
        stage("stage"),
        FieldDefinition::new("raise", "Raise", FieldType::Number),
        FieldDefinition::new("submit", "Submit", FieldType::Button),
    ]
}

fn investor_fields() -> Vec<FieldDefinition> {
    vec![
        FieldDefinition::new("fund", "Fund", FieldType::Text).with_required(true),
        // Same option values under a different subtype.
        FieldDefinition::new("target_stage", "Target stage", FieldType::Radio).with_options(vec![
            FieldOption::new("seed round", "seed"),
            FieldOption::new("A round", "series_a"),
        ]),
        FieldDefinition::new("cheque", "Cheque", FieldType::Number),
        FieldDefinition::new("max_cheque", "Max cheque", FieldType::Number),
    ]
}

fn session(settings: PairingSettings) -> PipelineSession {
    PipelineSession::new(
        founder_fields(),
        investor_fields(),
        MatchCriteria::new(),
        settings,
    )
    .expect("valid schemas")
}

fn row(pairs: &[(&str, Value)]) -> ImportRow {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.clone()))
        .collect::<BTreeMap<_, _>>()
}

#[test]
fn validates_submissions_per_side() {
    let session = session(PairingSettings::default());

    let ok = session
        .validate_submission(Side::Founder, &json!({"company": "Acme", "stage": "seed"}))
        .expect("valid founder submission");
    assert_eq!(ok.get("stage"), Some(&json!("seed")));

    let errors = session
        .validate_submission(Side::Investor, &json!({"target_stage": "Seed"}))
        .unwrap_err();
    assert_eq!(errors.len(), 2);
    assert!(errors.get("fund").is_some());
    assert!(errors.get("target_stage").is_some());
}

#[test]
fn single_compatible_counterpart_is_preselected() {
    let session = session(PairingSettings::default());

    assert_eq!(
        session.sole_counterpart("stage").map(|f| f.key.as_str()),
        Some("target_stage")
    );
    assert_eq!(session.compatible_counterparts("raise").len(), 2);
    assert!(session.sole_counterpart("raise").is_none());
    assert!(session.compatible_counterparts("submit").is_empty());
    assert!(session.compatible_counterparts("missing").is_empty());
}

#[test]
fn mapping_hides_fields_from_pickers() {
    let mut session = session(PairingSettings::default());
    session.map_fields("raise", "cheque").expect("compatible pair");

    let available: Vec<&str> = session
        .available_founder_fields()
        .iter()
        .map(|f| f.key.as_str())
        .collect();
    assert_eq!(available, vec!["company", "stage"]);

    let counterparts: Vec<&str> = session
        .compatible_counterparts("raise")
        .iter()
        .map(|f| f.key.as_str())
        .collect();
    assert_eq!(counterparts, vec!["max_cheque"]);
}

#[test]
fn map_fields_rejects_incompatible_unknown_and_duplicate_pairs() {
    let mut session = session(PairingSettings::default());

    assert!(session.map_fields("company", "cheque").is_err());
    assert!(session.map_fields("nope", "cheque").is_err());
    assert!(session.map_fields("raise", "nope").is_err());

    session.map_fields("raise", "cheque").expect("first mapping");
    assert!(session.map_fields("raise", "max_cheque").is_err());
    assert_eq!(
        session.criteria().get("raise").map(|f| f.investor_field.as_str()),
        Some("cheque")
    );
}

#[test]
fn default_weight_applies_to_new_pairs() {
    let mut settings = PairingSettings::default();
    settings.criteria.default_weight = Some(0.5);
    let mut session = session(settings);

    let field = session.map_fields("stage", "target_stage").expect("compatible");
    assert_eq!(field.weight, Some(0.5));

    assert!(session.edit_mapping("stage", "target_stage", &MatchFieldPatch::default().required(true)));
    assert!(!session.edit_mapping("stage", "cheque", &MatchFieldPatch::default().required(true)));
    assert!(session.criteria().get("stage").is_some_and(|f| f.required));

    insta::assert_snapshot!(session.criteria_json().expect("serialize"), @r#"[{"founderField":"stage","investorField":"target_stage","matchType":"exact","weight":0.5,"required":true}]"#);

    assert!(session.remove_mapping("stage").is_some());
    assert!(session.criteria().is_empty());
}

#[test]
fn create_mode_import_grows_the_schema() {
    let mut session = session(PairingSettings::default());
    let rows = vec![
        row(&[("Company", json!("Acme")), ("Stage", json!("Series B"))]),
        row(&[("Company", json!("Globex")), ("Stage", json!("seed"))]),
    ];
    let mapping = ColumnMapping::new()
        .with("company", "Company")
        .with("stage", "Stage");

    let outcome = session
        .import(Side::Founder, &rows, mapping, true)
        .expect("import");
    assert_eq!(outcome.submissions.len(), 2);
    assert!(outcome.options_to_add.is_some());

    let stage = session.schema(Side::Founder).get("stage").expect("stage field");
    assert!(stage.options.contains_value("Series B"));

    session
        .validate_submission(Side::Founder, &json!({"company": "Initech", "stage": "Series B"}))
        .expect("grown option accepted");
}

#[test]
fn import_without_create_mode_leaves_schema_alone() {
    let mut session = session(PairingSettings::default());
    let rows = vec![row(&[("Company", json!("Acme")), ("Stage", json!("Series B"))])];
    let mapping = ColumnMapping::new()
        .with("company", "Company")
        .with("stage", "Stage");

    let outcome = session
        .import(Side::Founder, &rows, mapping, false)
        .expect("import");
    assert_eq!(outcome.submissions, vec![json!({"company": "Acme"})]);
    assert!(outcome.options_to_add.is_none());
    assert_eq!(session.schema(Side::Founder).get("stage").map(|f| f.options.len()), Some(2));
}

#[test]
fn import_rejects_missing_columns_and_buttons() {
    let mut session = session(PairingSettings::default());
    let rows = vec![row(&[("Company", json!("Acme"))])];

    let missing = ColumnMapping::new().with("company", "Name");
    assert!(session.import(Side::Founder, &rows, missing, false).is_err());

    let button = ColumnMapping::new().with("submit", "Company");
    assert!(session.import(Side::Founder, &rows, button, false).is_err());
}

#[test]
fn suggested_mapping_uses_headers() {
    let session = session(PairingSettings::default());
    let rows = vec![row(&[
        ("Company", json!("Acme")),
        ("Stage", json!("Seed")),
        ("Raise", json!("1500000")),
    ])];

    let mapping = session.suggest_mapping(Side::Founder, &rows, false);
    assert_eq!(mapping.column_for("company"), Some("Company"));
    assert_eq!(mapping.column_for("stage"), Some("Stage"));
    assert_eq!(mapping.column_for("raise"), Some("Raise"));
    assert_eq!(mapping.column_for("submit"), None);
}

#[test]
fn set_schema_recompiles_validator() {
    let mut session = session(PairingSettings::default());
    session
        .set_schema(
            Side::Investor,
            vec![FieldDefinition::new("fund", "Fund", FieldType::Text)],
        )
        .expect("valid schema");

    assert_eq!(session.validator(Side::Investor).field_count(), 1);
    session
        .validate_submission(Side::Investor, &json!({}))
        .expect("nothing required anymore");

    let duplicate = vec![
        FieldDefinition::new("fund", "Fund", FieldType::Text),
        FieldDefinition::new("fund", "Fund again", FieldType::Text),
    ];
    assert!(session.set_schema(Side::Investor, duplicate).is_err());
    assert_eq!(session.schema(Side::Investor).len(), 1);
}

#[test]
fn settings_load_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("pairing.toml");

    let missing = PairingSettings::load_from(&path).expect("defaults");
    assert_eq!(missing, PairingSettings::default());

    let mut settings = PairingSettings::default();
    settings.import.preview_rows = 10;
    settings.criteria.default_weight = Some(0.25);
    settings.save_to(&path).expect("save");
    assert_eq!(PairingSettings::load_from(&path).expect("load"), settings);

    std::fs::write(&path, "[import\npreview_rows = ").expect("write");
    assert!(PairingSettings::load_from(&path).is_err());
}
