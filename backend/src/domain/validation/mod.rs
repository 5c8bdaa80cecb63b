//! Input validation for every shopping list operation.
//!
//! Validation never short-circuits: each field is checked independently and
//! every failure is reported under its own key.

mod dto_in;
mod rules;

pub use dto_in::{
    ItemAddDtoIn, ItemRefDtoIn, MemberAddDtoIn, MemberRemoveDtoIn, ShoppingListCreateDtoIn,
    ShoppingListIdDtoIn, ShoppingListListDtoIn, ShoppingListRefDtoIn, ShoppingListRenameDtoIn,
    validate_item_add, validate_item_complete, validate_item_list, validate_item_remove,
    validate_item_uncomplete, validate_member_add, validate_member_leave, validate_member_remove,
    validate_shopping_list_archive, validate_shopping_list_create, validate_shopping_list_delete,
    validate_shopping_list_get, validate_shopping_list_list, validate_shopping_list_rename,
};
pub use rules::{FieldCheck, NumberRule, StringRule, check_boolean, check_number, check_string};

use super::error::Failure;
use super::error_map::{ErrorEntry, ErrorMap};

/// Validator output: validity flag, the fields that passed, and errors.
///
/// `dto_in` must not be used when `is_valid` is false; prefer
/// [`Validated::into_result`] which enforces that.
#[derive(Debug, Clone, PartialEq)]
pub struct Validated<T> {
    is_valid: bool,
    dto_in: T,
    errors: ErrorMap,
}

impl<T> Validated<T> {
    pub(crate) fn from_parts(dto_in: T, errors: ErrorMap) -> Self {
        Self {
            is_valid: errors.is_empty(),
            dto_in,
            errors,
        }
    }

    /// Whether every field passed.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Fields that passed validation.
    #[must_use]
    pub const fn dto_in(&self) -> &T {
        &self.dto_in
    }

    /// Per-field failures.
    #[must_use]
    pub const fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// Return the validated input, or an invalid-input failure with the errors.
    ///
    /// # Errors
    /// Returns [`Failure`] of kind `InvalidInput` when any field failed.
    pub fn into_result(self) -> Result<T, Failure> {
        if self.is_valid {
            Ok(self.dto_in)
        } else {
            Err(Failure::invalid_input(self.errors))
        }
    }
}

/// Unwrap a field that validation guarantees, reporting it missing otherwise.
///
/// Operations call this on validated input so they stay total when invoked
/// directly with a hand-built dtoIn.
///
/// # Errors
/// Returns an invalid-input [`Failure`] naming `field` when `value` is `None`.
pub fn require<T>(value: Option<T>, field: &str) -> Result<T, Failure> {
    value.ok_or_else(|| {
        Failure::invalid_input(ErrorMap::single(
            field,
            ErrorEntry::missing_required_field(field),
        ))
    })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;
    use crate::domain::{AppErrorCode, FailureKind};
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn into_result_blocks_invalid_input() {
        let failure = validate_shopping_list_get(&json!({}))
            .into_result()
            .expect_err("missing id rejected");
        assert_eq!(failure.kind(), FailureKind::InvalidInput);
        assert!(failure.errors().contains_key("id"));
    }

    #[rstest]
    fn require_reports_the_field() {
        let failure = require::<String>(None, "itemId").expect_err("none rejected");
        assert_eq!(
            failure.errors().get("itemId").map(ErrorEntry::code),
            Some(AppErrorCode::MissingRequiredField)
        );
        assert_eq!(require(Some(3), "quantity").ok(), Some(3));
    }
}
