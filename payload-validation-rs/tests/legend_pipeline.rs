use payload_validation::prelude::*;
use payload_validation::sanitizers::{clean_object, sanitized};
use payload_validation::INVALID_ENTITY_TYPE;
use serde_json::{json, Value};
use test_case::test_case;

fn check(operation: &str, mut entry: Value) -> (Verdict, Value) {
    let legends = LegendRegistry::standard();
    let structural = JsonSchemaValidator::new();
    let verdict = Validator::new(&legends).validate(&structural, operation, &mut entry);
    (verdict, entry)
}

#[test]
fn test_every_standard_legend_compiles() {
    let legends = LegendRegistry::standard();
    let structural = JsonSchemaValidator::new();
    assert_eq!(legends.len(), 27);
    for operation in legends.operations() {
        let schema = legends.require(operation).unwrap();
        assert!(structural.compile(schema).is_ok(), "{} failed to compile", operation);
    }
}

#[test_case("tasks:close", json!({ "taskId": "15" }) ; "close with string id")]
#[test_case("tasks:save-client", json!({ "content": "Printer is broken", "typeId": 2 }) ; "client task")]
#[test_case("task types:retrieve", json!({ "page": 2 }) ; "empty legend")]
#[test_case("profiles:make helper", json!({ "userId": "3", "subdepartmentId": 4, "chief": "1" }) ; "helper with flag")]
#[test_case("tasks:retrieve", json!({ "limit": "20", "offset": "0", "filters": { "typeId": ["3", "4"], "closedById": null } }) ; "retrieve with filters")]
#[test_case("profiles:retrieve", json!({ "filters": { "role": ["helper", "client"], "displayName": "Ann" } }) ; "profile filters")]
fn test_accepted_payloads(operation: &str, entry: Value) {
    let (verdict, _) = check(operation, entry);
    assert!(verdict.is_valid(), "{:?}", verdict);
}

#[test_case("tasks:close", json!({}) ; "missing task id")]
#[test_case("tasks:close", json!({ "taskId": 0 }) ; "serial below one")]
#[test_case("tasks:retrieve", json!({ "limit": 51 }) ; "page too large")]
#[test_case("tasks:retrieve", json!({ "offset": -1 }) ; "negative offset")]
#[test_case("tasks:retrieve", json!({ "filters": { "typeId": [] } }) ; "empty id filter")]
#[test_case("tasks:retrieve", json!({ "order": [{ "column": "content", "direction": "ASC" }] }) ; "unknown order column")]
#[test_case("profiles:make helper", json!({ "userId": 1, "subdepartmentId": 2, "chief": "maybe" }) ; "unreadable flag")]
#[test_case("profiles:retrieve", json!({ "filters": { "role": "admin" } }) ; "unknown role")]
#[test_case("subdepartments:save", json!({ "name": "x".repeat(61) }) ; "name too long")]
fn test_rejected_payloads(operation: &str, entry: Value) {
    let (verdict, _) = check(operation, entry);
    assert!(!verdict.is_valid());
    assert!(!verdict.errors.is_empty());
}

#[test]
fn test_unknown_operation() {
    let (verdict, entry) = check("nonexistent:op", json!({ "x": 1 }));
    assert_eq!(
        serde_json::to_value(&verdict).unwrap(),
        json!({ "valid": false, "errors": [{ "message": INVALID_ENTITY_TYPE }] })
    );
    assert_eq!(entry, json!({ "x": 1 }));
}

#[test]
fn test_coercions_reach_the_entry() {
    let (_, entry) = check("tasks:retrieve", json!({ "offset": "5", "filters": { "typeId": ["3", "4"] } }));
    assert_eq!(entry, json!({ "offset": 5, "filters": { "typeId": [3, 4] } }));

    let (_, entry) = check("profiles:make helper", json!({ "userId": 1, "subdepartmentId": 2, "chief": "0" }));
    assert_eq!(entry["chief"], json!(false));

    let (verdict, entry) = check("profiles:make helper", json!({ "userId": 1, "subdepartmentId": 2, "chief": "maybe" }));
    assert_eq!(entry["chief"], json!("maybe"));
    assert!(verdict.errors.iter().any(|e| e.property.as_deref() == Some("/chief")));
}

#[test]
fn test_nested_order_elements() {
    let (verdict, entry) = check(
        "tasks:retrieve",
        json!({ "order": [
            { "column": "createdAt", "direction": "ASC" },
            { "column": "updatedAt", "direction": "DESC", "nulls": "last" }
        ] }),
    );
    assert!(verdict.is_valid(), "{:?}", verdict);
    assert_eq!(
        entry,
        json!({ "order": [
            { "column": "createdAt", "direction": "ASC" },
            { "column": "updatedAt", "direction": "DESC" }
        ] })
    );
}

#[test]
fn test_duplicate_order_rejected() {
    let (verdict, _) = check(
        "profiles:retrieve",
        json!({ "order": [
            { "column": "createdAt", "direction": "ASC" },
            { "column": "createdAt", "direction": "ASC" }
        ] }),
    );
    assert!(!verdict.is_valid());
    assert!(verdict.errors.iter().any(|e| e.attribute.as_deref() == Some("uniqueItems")));
}

#[test]
fn test_sanitizing_is_idempotent() {
    let legends = LegendRegistry::standard();
    let schema = legends.require("profiles:retrieve").unwrap();
    let entry = json!({
        "limit": " 10 ",
        "unknown": true,
        "order": [{ "column": "displayName", "direction": "ASC", "extra": 1 }],
        "filters": { "id": ["1", 2], "role": "helper", "bogus": "x" }
    });

    let (once, first) = sanitized(&entry, schema);
    let (twice, second) = sanitized(&once, schema);
    assert!(first.was_modified());
    assert!(!second.was_modified());
    assert_eq!(once, twice);
}

#[test]
fn test_defaults_on_caller_schema() {
    let schema = ObjectSchema::new()
        .property("limit", types::integer(Some(1), Some(50), false).with_default(json!(20)))
        .property("offset", types::integer(Some(0), None, false));

    let mut entry = json!({});
    let report = clean_object(&mut entry, &schema);
    assert_eq!(entry, json!({ "limit": 20 }));
    assert_eq!(report.defaulted, vec!["limit".to_string()]);

    let mut entry = json!({ "limit": 5 });
    clean_object(&mut entry, &schema);
    assert_eq!(entry, json!({ "limit": 5 }));
}

#[test]
fn test_required_variants_keep_their_constraints() {
    let catalog = TypeCatalog::standard();
    for base in BaseType::ALL {
        let optional = catalog.get(base, false);
        let required = catalog.get(base, true);
        assert!(!optional.is_required(), "{}", base);
        assert!(required.is_required(), "{}", base);
        assert_eq!(optional.kind(), required.kind(), "{}", base);
        assert_eq!(required.kind(), base.descriptor().kind(), "{}", base);
    }
}
