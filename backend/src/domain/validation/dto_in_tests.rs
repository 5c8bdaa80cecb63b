//! Regression coverage for this module.

use super::*;
use crate::domain::error_map::{DTO_IN_KEY, ErrorMap};
use crate::domain::AppErrorCode;
use rstest::rstest;
use serde::Serialize;
use serde_json::json;

/// Run a validator and project its result to `(is_valid, dto_in as JSON, errors)`.
fn run<T: Serialize>(validate: fn(&Value) -> Validated<T>, input: &Value) -> (bool, Value, ErrorMap) {
    let validated = validate(input);
    let dto_in = serde_json::to_value(validated.dto_in()).expect("serialise dto_in");
    (validated.is_valid(), dto_in, validated.errors().clone())
}

fn outcome(operation: &str, input: &Value) -> (bool, Value, ErrorMap) {
    match operation {
        "list" => run(validate_shopping_list_list, input),
        "get" => run(validate_shopping_list_get, input),
        "create" => run(validate_shopping_list_create, input),
        "delete" => run(validate_shopping_list_delete, input),
        "rename" => run(validate_shopping_list_rename, input),
        "archive" => run(validate_shopping_list_archive, input),
        "item/list" => run(validate_item_list, input),
        "item/add" => run(validate_item_add, input),
        "item/remove" => run(validate_item_remove, input),
        "item/complete" => run(validate_item_complete, input),
        "item/uncomplete" => run(validate_item_uncomplete, input),
        "member/add" => run(validate_member_add, input),
        "member/remove" => run(validate_member_remove, input),
        "member/leave" => run(validate_member_leave, input),
        other => panic!("unknown operation {other}"),
    }
}

fn well_formed(operation: &str) -> Value {
    match operation {
        "list" => json!({"archived": true}),
        "get" | "delete" | "archive" => json!({"id": "list-1"}),
        "create" => json!({"name": "Groceries"}),
        "rename" => json!({"id": "list-1", "name": "Weekend"}),
        "item/list" | "member/leave" => json!({"shoppingListId": "list-1"}),
        "item/add" => json!({
            "shoppingListId": "list-1",
            "name": "Milk",
            "productId": "p-42",
            "quantity": 2,
            "fit": "semi-skimmed"
        }),
        "item/remove" | "item/complete" | "item/uncomplete" => {
            json!({"shoppingListId": "list-1", "itemId": "item-1"})
        }
        "member/add" => json!({"shoppingListId": "list-1", "userId": "u2", "role": "Member"}),
        "member/remove" => json!({"shoppingListId": "list-1", "userId": "u2"}),
        other => panic!("unknown operation {other}"),
    }
}

#[rstest]
#[case("list")]
#[case("get")]
#[case("create")]
#[case("delete")]
#[case("rename")]
#[case("archive")]
#[case("item/list")]
#[case("item/add")]
#[case("item/remove")]
#[case("item/complete")]
#[case("item/uncomplete")]
#[case("member/add")]
#[case("member/remove")]
#[case("member/leave")]
fn well_formed_input_round_trips(#[case] operation: &str) {
    let input = well_formed(operation);
    let (is_valid, dto_in, errors) = outcome(operation, &input);
    assert!(is_valid, "{operation} rejected {input}: {errors:?}");
    assert!(errors.is_empty());
    assert_eq!(dto_in, input);
}

#[rstest]
#[case("get", "id")]
#[case("create", "name")]
#[case("delete", "id")]
#[case("rename", "id")]
#[case("rename", "name")]
#[case("archive", "id")]
#[case("item/list", "shoppingListId")]
#[case("item/add", "shoppingListId")]
#[case("item/add", "name")]
#[case("item/remove", "itemId")]
#[case("item/complete", "shoppingListId")]
#[case("item/uncomplete", "itemId")]
#[case("member/add", "userId")]
#[case("member/remove", "shoppingListId")]
#[case("member/leave", "shoppingListId")]
fn missing_required_field_yields_exactly_one_entry(
    #[case] operation: &str,
    #[case] field: &str,
) {
    let mut input = well_formed(operation);
    input
        .as_object_mut()
        .expect("object input")
        .remove(field);

    let (is_valid, dto_in, errors) = outcome(operation, &input);

    assert!(!is_valid);
    assert_eq!(errors.len(), 1, "{errors:?}");
    assert_eq!(
        errors.get(field).map(ErrorEntry::code),
        Some(AppErrorCode::MissingRequiredField)
    );
    assert!(dto_in.get(field).is_none(), "failed field leaked into dto_in");
}

#[rstest]
#[case(json!(null))]
#[case(json!([1, 2]))]
#[case(json!("Groceries"))]
fn non_object_input_is_invalid_dto_in(#[case] input: Value) {
    let validated = validate_shopping_list_create(&input);
    assert!(!validated.is_valid());
    assert_eq!(
        validated.errors().get(DTO_IN_KEY).map(ErrorEntry::code),
        Some(AppErrorCode::InvalidDtoIn)
    );
    assert_eq!(validated.dto_in(), &ShoppingListCreateDtoIn::default());
}

#[rstest]
fn independent_failures_accumulate() {
    let input = json!({"shoppingListId": 5, "name": "", "quantity": 0, "fit": true});
    let validated = validate_item_add(&input);

    assert!(!validated.is_valid());
    let codes: Vec<_> = validated
        .errors()
        .iter()
        .map(|(key, entry)| (key.to_owned(), entry.code()))
        .collect();
    assert_eq!(
        codes,
        vec![
            ("fit".to_owned(), AppErrorCode::InvalidFieldType),
            ("name".to_owned(), AppErrorCode::InvalidFieldValue),
            ("quantity".to_owned(), AppErrorCode::InvalidFieldValue),
            ("shoppingListId".to_owned(), AppErrorCode::InvalidFieldType),
        ]
    );
    assert_eq!(validated.dto_in(), &ItemAddDtoIn::default());
}

#[rstest]
fn valid_fields_survive_alongside_failures() {
    let validated = validate_shopping_list_rename(&json!({"id": "list-1", "name": 12}));
    assert!(!validated.is_valid());
    assert_eq!(validated.dto_in().id.as_deref(), Some("list-1"));
    assert!(validated.dto_in().name.is_none());
}

#[rstest]
fn null_optional_fields_are_treated_as_absent() {
    let validated = validate_item_add(&json!({
        "shoppingListId": "list-1",
        "name": "Milk",
        "quantity": null,
        "fit": null
    }));
    assert!(validated.is_valid());
    assert!(validated.dto_in().quantity.is_none());
    assert!(validated.dto_in().fit.is_none());
}

#[rstest]
#[case(json!("Owner"), Some(MemberRole::Owner), None)]
#[case(json!("Admin"), None, Some(AppErrorCode::InvalidFieldValue))]
#[case(json!(1), None, Some(AppErrorCode::InvalidFieldType))]
fn member_role_is_parsed(
    #[case] role: Value,
    #[case] expected_role: Option<MemberRole>,
    #[case] expected_error: Option<AppErrorCode>,
) {
    let validated =
        validate_member_add(&json!({"shoppingListId": "list-1", "userId": "u2", "role": role}));
    assert_eq!(validated.dto_in().role, expected_role);
    assert_eq!(
        validated.errors().get("role").map(ErrorEntry::code),
        expected_error
    );
}

#[rstest]
fn list_archived_must_be_boolean() {
    let validated = validate_shopping_list_list(&json!({"archived": "yes"}));
    assert!(!validated.is_valid());
    assert_eq!(
        validated.errors().get("archived").map(ErrorEntry::code),
        Some(AppErrorCode::InvalidFieldType)
    );
    assert!(validate_shopping_list_list(&json!({})).is_valid());
}
