//! End-to-end behavior of the sample `User` / `Address` / `DetailedUser` models.

use std::sync::Arc;

use mk_schema::{
    ExtraFields, FieldSpec, FieldValue, IssueKind, Schema, ValidateOptions, catalog,
    from_text, from_text_with, validate, validate_pairs, validate_value,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Map, Value, json};

struct Models {
    user: Arc<Schema>,
    address: Arc<Schema>,
    detailed: Arc<Schema>,
}

fn models() -> Models {
    let user = catalog::user().unwrap();
    let address = catalog::address().unwrap();
    let detailed = catalog::detailed_user(&user, &address).unwrap();
    Models {
        user,
        address,
        detailed,
    }
}

fn obj(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

fn sarah() -> Value {
    json!({
        "name": "Sarah",
        "email": "sarah@example.com",
        "account_id": 9012,
        "age": 25,
        "addresses": [
            {"street": "123 Main St", "city": "New York", "country": "USA", "postal_code": "10001"},
            {"street": "456 Park Ave", "city": "Boston", "country": "USA", "postal_code": "02108"}
        ]
    })
}

#[test]
fn direct_and_mapping_construction_agree() {
    let m = models();
    let from_pairs = validate_pairs(
        &m.user,
        [
            ("name", json!("Salah")),
            ("email", json!("salah@gmail.com")),
            ("account_id", json!(12345)),
        ],
    )
    .unwrap();
    let from_map = validate(
        &m.user,
        &obj(json!({"name": "Salah", "email": "salah@gmail.com", "account_id": 12345})),
    )
    .unwrap();

    assert_eq!(from_pairs, from_map);
    assert_eq!(from_map.get_str("email"), Some("salah@gmail.com"));
    assert_eq!(from_map.get_int("account_id"), Some(12345));
}

#[test]
fn bad_email_and_negative_account_yield_two_entries() {
    let m = models();
    let report = validate(
        &m.user,
        &obj(json!({"name": "John", "email": "not-an-email", "account_id": -10})),
    )
    .unwrap_err();

    assert_eq!(report.len(), 2);
    assert_eq!(report.paths(), vec!["email", "account_id"]);
    assert_eq!(report.errors[0].kind, IssueKind::TypeMismatch);
    assert_eq!(report.errors[1].kind, IssueKind::Constraint);
    assert_eq!(report.errors[1].message, "must be positive, got -10");
    assert!(
        report
            .errors_at("account_id")
            .all(|e| e.kind != IssueKind::TypeMismatch)
    );
}

#[test]
fn non_numeric_account_id_is_type_error() {
    let m = models();
    let report = validate(
        &m.user,
        &obj(json!({"name": "John", "email": "john@example.com", "account_id": "abc"})),
    )
    .unwrap_err();
    assert_eq!(report.paths(), vec!["account_id"]);
    assert_eq!(report.errors[0].kind, IssueKind::TypeMismatch);
}

#[test]
fn numeric_string_account_id_depends_on_coercion() {
    let m = models();
    let text = r#"{"name": "John", "email": "john@example.com", "account_id": "100"}"#;

    let lax = from_text(&m.user, text).unwrap();
    assert_eq!(lax.get_int("account_id"), Some(100));

    let strict = from_text_with(&m.user, text, &ValidateOptions::strict()).unwrap_err();
    assert_eq!(strict.report().unwrap().paths(), vec!["account_id"]);
}

#[test]
fn detailed_user_text_starts_with_parent_fields() {
    let m = models();
    let user = validate_value(&m.detailed, &sarah(), &ValidateOptions::default()).unwrap();
    let text = user.to_text();

    assert!(
        text.starts_with(r#"{"name":"Sarah","email":"sarah@example.com","account_id":9012"#),
        "unexpected text: {text}"
    );
    assert!(text.contains(r#""is_active":true"#));
    assert!(text.contains(r#"{"street":"456 Park Ave","city":"Boston","country":"USA","postal_code":"02108"}"#));
}

#[test]
fn defaults_fill_absent_fields() {
    let m = models();
    let user = validate(
        &m.detailed,
        &obj(json!({"name": "Ana", "email": "ana@example.com", "account_id": 1, "age": 30})),
    )
    .unwrap();

    assert_eq!(user.get("is_active"), Some(&FieldValue::Bool(true)));
    assert_eq!(user.get("addresses"), Some(&FieldValue::List(Vec::new())));
}

#[test]
fn underage_user_is_rejected_with_constraint_message() {
    let m = models();
    let mut raw = obj(sarah());
    raw.insert("age".into(), json!(16));

    let report = validate(&m.detailed, &raw).unwrap_err();
    assert_eq!(report.paths(), vec!["age"]);
    assert_eq!(
        report.errors[0].message,
        "user must be at least 18 years old, got 16"
    );
}

#[test]
fn nested_list_errors_carry_index_path() {
    let m = models();
    let mut raw = obj(sarah());
    raw.insert(
        "addresses".into(),
        json!([
            {"street": "1 A St", "city": "X", "country": "Y", "postal_code": "1"},
            {"street": "2 B St", "city": 7, "country": "Y"}
        ]),
    );

    let report = validate(&m.detailed, &raw).unwrap_err();
    assert_eq!(
        report.paths(),
        vec!["addresses.1.city", "addresses.1.postal_code"]
    );
    assert_eq!(report.errors[1].kind, IssueKind::Missing);
}

#[test]
fn nested_model_field_error_is_dotted() {
    let m = models();
    let shipment = Arc::new(
        Schema::builder("Shipment")
            .field(FieldSpec::string("id"))
            .field(FieldSpec::model("destination", &m.address))
            .build()
            .unwrap(),
    );

    let report = validate(
        &shipment,
        &obj(json!({
            "id": "s-1",
            "destination": {"street": "x", "city": false, "country": "y", "postal_code": "z"}
        })),
    )
    .unwrap_err();
    assert_eq!(report.paths(), vec!["destination.city"]);

    let report = validate(&shipment, &obj(json!({"id": "s-1", "destination": "nowhere"})))
        .unwrap_err();
    assert_eq!(report.paths(), vec!["destination"]);
}

#[rstest]
#[case::constraint_first(true)]
#[case::constraint_last(false)]
fn aggregation_is_independent_of_declaration_order(#[case] constrained_first: bool) {
    let constrained = FieldSpec::integer("count").constraint(mk_schema::constraints::positive());
    let mut fields = vec![FieldSpec::string("a"), FieldSpec::string("b")];
    if constrained_first {
        fields.insert(0, constrained);
    } else {
        fields.push(constrained);
    }
    let schema = Arc::new(Schema::builder("Agg").fields(fields).build().unwrap());

    let report = validate(&schema, &obj(json!({"count": 0}))).unwrap_err();
    assert_eq!(report.len(), 3);
    assert_eq!(report.errors.iter().filter(|e| e.kind == IssueKind::Missing).count(), 2);
    assert_eq!(
        report.errors.iter().filter(|e| e.kind == IssueKind::Constraint).count(),
        1
    );
}

#[test]
fn mapping_round_trip_is_deep_equal() {
    let m = models();
    let original = validate_value(&m.detailed, &sarah(), &ValidateOptions::default()).unwrap();

    let again = validate(&m.detailed, &original.to_mapping()).unwrap();
    assert_eq!(again, original);

    let reparsed = from_text(&m.detailed, &original.to_text()).unwrap();
    assert_eq!(reparsed, original);
}

#[test]
fn to_text_is_deterministic() {
    let m = models();
    let user = validate_value(&m.detailed, &sarah(), &ValidateOptions::default()).unwrap();
    assert_eq!(user.to_text(), user.to_text());
}

#[test]
fn unknown_fields_are_ignored_by_default() {
    let m = models();
    let user = validate(
        &m.user,
        &obj(json!({"name": "Ali", "email": "ali@gmail.com", "account_id": 5678, "nickname": "al"})),
    )
    .unwrap();
    assert!(user.get("nickname").is_none());
    assert_eq!(user.len(), 3);
}

#[test]
fn forbidden_extra_key_inside_list_element_is_dotted() {
    let m = models();
    let mut input = sarah();
    input["addresses"][0]["floor"] = json!(3);
    input["nickname"] = json!("sa");

    assert!(validate_value(&m.detailed, &input, &ValidateOptions::default()).is_ok());

    let opts = ValidateOptions::default().with_extra_fields(ExtraFields::Forbid);
    let report = validate_value(&m.detailed, &input, &opts).unwrap_err();
    assert_eq!(report.paths(), vec!["addresses.0.floor", "nickname"]);
    assert!(report.errors.iter().all(|e| e.kind == IssueKind::ExtraForbidden));
}

#[test]
fn nested_instance_is_reachable() {
    let m = models();
    let user = validate_value(&m.detailed, &sarah(), &ValidateOptions::default()).unwrap();
    let addresses = user.get_list("addresses").unwrap();
    assert_eq!(addresses.len(), 2);
    let first = addresses[0].as_model().unwrap();
    assert_eq!(first.schema_name(), catalog::ADDRESS);
    assert_eq!(first.get_str("city"), Some("New York"));
}
