//! Tests for pairing-model types.

use pairing_model::{
    FieldDefinition, FieldOption, FieldSchema, FieldType, MatchField, MatchType, ModelError,
    NumericBounds,
};

#[test]
fn field_type_accepts_builder_aliases() {
    assert_eq!(FieldType::from_name("selectboxes"), FieldType::MultiSelect);
    assert_eq!(FieldType::from_name("textfield"), FieldType::Text);
    assert_eq!(FieldType::from_name("phoneNumber"), FieldType::Phone);
    assert_eq!(FieldType::from_name("datetime"), FieldType::Date);
    assert_eq!(
        FieldType::from_name("signature"),
        FieldType::Unknown("signature".to_string())
    );
}

#[test]
fn unknown_type_survives_round_trip() {
    let json = r#"[{"key":"sig","label":"Signature","type":"signature"}]"#;
    let schema: FieldSchema = serde_json::from_str(json).expect("parse schema");
    assert_eq!(
        schema.get("sig").map(|f| &f.field_type),
        Some(&FieldType::Unknown("signature".to_string()))
    );
    let out = serde_json::to_string(&schema).expect("serialize schema");
    assert!(out.contains(r#""type":"signature""#));
}

#[test]
fn field_definition_uses_camel_case() {
    let json = r#"{
        "key": "cheque",
        "label": "Cheque size",
        "type": "number",
        "required": true,
        "numericBounds": {"min": 10000, "max": 5000000},
        "isPersonalityDerived": false
    }"#;
    let field: FieldDefinition = serde_json::from_str(json).expect("parse field");
    assert_eq!(field.field_type, FieldType::Number);
    assert!(field.required);
    assert_eq!(field.numeric_bounds, Some(NumericBounds::range(10000.0, 5000000.0)));
    assert!(field.options.is_empty());
}

#[test]
fn options_without_labels_parse() {
    let json = r#"{"key":"interests","label":"Interests","type":"selectboxes",
        "options":[{"value":"tech"},{"value":"health"}]}"#;
    let field: FieldDefinition = serde_json::from_str(json).expect("parse field");
    assert!(field.is_option_bearing());
    assert_eq!(field.options.len(), 2);
    assert!(field.options.is_valid_loose("TECH"));
}

#[test]
fn schema_rejects_duplicate_keys() {
    let err = FieldSchema::new(vec![
        FieldDefinition::new("name", "Name", FieldType::Text),
        FieldDefinition::new("name", "Full name", FieldType::Text),
    ])
    .unwrap_err();
    assert_eq!(
        err,
        ModelError::DuplicateKey {
            key: "name".to_string()
        }
    );
}

#[test]
fn schema_rejects_duplicate_option_values() {
    let err = FieldSchema::new(vec![
        FieldDefinition::new("stage", "Stage", FieldType::Select).with_options(vec![
            FieldOption::new("Seed", "seed"),
            FieldOption::new("Pre-seed", "seed"),
        ]),
    ])
    .unwrap_err();
    assert!(matches!(err, ModelError::DuplicateOptionValue { .. }));
}

#[test]
fn schema_rejects_inverted_bounds() {
    let err = FieldSchema::new(vec![
        FieldDefinition::new("age", "Age", FieldType::Number)
            .with_bounds(NumericBounds::range(10.0, 1.0)),
    ])
    .unwrap_err();
    assert!(matches!(err, ModelError::InvertedBounds { .. }));
}

#[test]
fn data_fields_skip_buttons() {
    let schema = FieldSchema::new(vec![
        FieldDefinition::new("name", "Name", FieldType::Text),
        FieldDefinition::new("submit", "Submit", FieldType::Button),
    ])
    .expect("schema");
    let keys: Vec<&str> = schema.data_fields().map(|f| f.key.as_str()).collect();
    assert_eq!(keys, vec!["name"]);
}

#[test]
fn match_field_defaults_on_load() {
    let json = r#"{"founderField":"stage","investorField":"target_stage"}"#;
    let field: MatchField = serde_json::from_str(json).expect("parse match field");
    assert_eq!(field.match_type, MatchType::Exact);
    assert_eq!(field.weight, None);
    assert!(!field.required);
}
