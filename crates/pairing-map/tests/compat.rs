use pairing_map::{CompatibilityMatrix, compatible_fields, is_compatible};
use pairing_model::{FieldDefinition, FieldOption, FieldType};
use proptest::prelude::*;

fn stage_options(values: &[&str]) -> Vec<FieldOption> {
    values.iter().map(|v| FieldOption::from_value(*v)).collect()
}

fn founder_fields() -> Vec<FieldDefinition> {
    vec![
        FieldDefinition::new("stage", "Stage", FieldType::Select)
            .with_options(stage_options(&["pre_seed", "seed", "series_a"])),
        FieldDefinition::new("raise", "Raising", FieldType::Number),
        FieldDefinition::new("pitch", "Pitch", FieldType::Textarea),
        FieldDefinition::new("submit", "Submit", FieldType::Button),
    ]
}

fn investor_fields() -> Vec<FieldDefinition> {
    vec![
        FieldDefinition::new("target_stage", "Target stage", FieldType::Select).with_options(vec![
            FieldOption::new("Series A", "series_a"),
            FieldOption::new("Seed", "seed"),
            FieldOption::new("Pre-seed", "pre_seed"),
        ]),
        FieldDefinition::new("stages", "Stages", FieldType::MultiSelect)
            .with_options(stage_options(&["seed", "series_a", "pre_seed"])),
        FieldDefinition::new("sectors", "Sectors", FieldType::Select)
            .with_options(stage_options(&["seed", "series_a"])),
        FieldDefinition::new("min_cheque", "Min cheque", FieldType::Number),
        FieldDefinition::new("max_cheque", "Max cheque", FieldType::Number),
        FieldDefinition::new("thesis", "Thesis", FieldType::Text),
        FieldDefinition::new("go", "Go", FieldType::Button),
    ]
}

#[test]
fn option_sets_compare_by_value_ignoring_order_and_labels() {
    let founders = founder_fields();
    let investors = investor_fields();
    assert!(is_compatible(&founders[0], &investors[0]));
    assert!(!is_compatible(&founders[0], &investors[2]));
}

#[test]
fn cross_subtype_option_fields_with_equal_options_are_compatible() {
    let founders = founder_fields();
    let investors = investor_fields();
    // select vs multiselect over the same option values
    assert!(is_compatible(&founders[0], &investors[1]));
}

#[test]
fn scalar_fields_require_identical_type() {
    let founders = founder_fields();
    let investors = investor_fields();
    let pitch = &founders[2];
    let thesis = &investors[5];
    assert!(!is_compatible(pitch, thesis));
    assert!(is_compatible(&founders[1], &investors[3]));
}

#[test]
fn buttons_never_pair() {
    let founders = founder_fields();
    let investors = investor_fields();
    assert!(!is_compatible(&founders[3], &investors[6]));
    assert!(compatible_fields(&founders[3], &investors).is_empty());
}

#[test]
fn unknown_types_pair_by_name() {
    let a = FieldDefinition::new("a", "A", FieldType::from_name("signature"));
    let b = FieldDefinition::new("b", "B", FieldType::from_name("Signature"));
    let c = FieldDefinition::new("c", "C", FieldType::Text);
    assert!(is_compatible(&a, &b));
    assert!(!is_compatible(&a, &c));
}

#[test]
fn compatible_fields_returns_every_candidate_in_order() {
    let founders = founder_fields();
    let investors = investor_fields();
    let keys: Vec<&str> = compatible_fields(&founders[1], &investors)
        .iter()
        .map(|f| f.key.as_str())
        .collect();
    assert_eq!(keys, vec!["min_cheque", "max_cheque"]);
}

#[test]
fn no_compatible_field_is_an_empty_list() {
    let founders = founder_fields();
    let investors = investor_fields();
    assert!(compatible_fields(&founders[2], &investors).is_empty());
}

#[test]
fn matrix_is_queryable_from_both_sides() {
    let matrix = CompatibilityMatrix::build(&founder_fields(), &investor_fields());
    assert_eq!(matrix.for_founder("stage"), ["target_stage", "stages"]);
    assert_eq!(matrix.for_investor("min_cheque"), ["raise"]);
    assert!(matrix.for_investor("thesis").is_empty());
    assert!(matrix.is_pair("raise", "max_cheque"));
    assert_eq!(matrix.unmatched_founders(), vec!["pitch"]);
    assert_eq!(matrix.pair_count(), 4);
    assert!(matrix.for_founder("submit").is_empty());
}

fn arb_type() -> impl Strategy<Value = FieldType> {
    prop_oneof![
        Just(FieldType::Text),
        Just(FieldType::Number),
        Just(FieldType::Select),
        Just(FieldType::Radio),
        Just(FieldType::MultiSelect),
        Just(FieldType::Checkbox),
        Just(FieldType::Button),
        Just(FieldType::Date),
        Just(FieldType::Unknown("rating".to_string())),
    ]
}

fn arb_field() -> impl Strategy<Value = FieldDefinition> {
    (
        arb_type(),
        proptest::collection::btree_set("[a-d]", 0..4),
        proptest::collection::vec("[A-Z][a-z]{0,4}", 4),
    )
        .prop_map(|(field_type, values, labels)| {
            let options = values
                .into_iter()
                .zip(labels)
                .map(|(value, label)| FieldOption::new(label, value))
                .collect();
            FieldDefinition::new("f", "F", field_type).with_options(options)
        })
}

proptest! {
    #[test]
    fn compatibility_is_symmetric(a in arb_field(), b in arb_field()) {
        prop_assert_eq!(is_compatible(&a, &b), is_compatible(&b, &a));
    }

    #[test]
    fn option_order_does_not_matter(a in arb_field()) {
        let mut reversed = a.clone();
        let options: Vec<FieldOption> = a.options.iter().rev().cloned().collect();
        reversed.options = options.into_iter().collect();
        if a.carries_data() {
            prop_assert!(is_compatible(&a, &reversed));
        }
    }
}
