//! Field-level type and range rules.
//!
//! Each rule inspects one optional JSON value and reports at most one error,
//! checked in order: presence, then type, then bounds. A present `null` is
//! treated as absent.

use serde_json::{Map, Value};

use crate::domain::error_map::{DTO_IN_KEY, ErrorEntry, ErrorMap};

/// Outcome of checking one field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldCheck<T> {
    /// Optional field not supplied.
    Absent,
    /// Field passed every rule.
    Valid(T),
    /// Field failed; the entry is stored under the field name.
    Invalid(ErrorEntry),
}

/// Constraints for string fields. Lengths count Unicode scalar values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StringRule {
    required: bool,
    min_length: Option<usize>,
    max_length: Option<usize>,
}

impl StringRule {
    /// A string that must be present.
    #[must_use]
    pub const fn required() -> Self {
        Self {
            required: true,
            min_length: None,
            max_length: None,
        }
    }

    /// A string that may be omitted.
    #[must_use]
    pub const fn optional() -> Self {
        Self {
            required: false,
            min_length: None,
            max_length: None,
        }
    }

    /// Restrict the accepted length to `min..=max`.
    #[must_use]
    pub const fn with_length(mut self, min: usize, max: usize) -> Self {
        self.min_length = Some(min);
        self.max_length = Some(max);
        self
    }
}

/// Constraints for numeric fields.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NumberRule {
    required: bool,
    min: Option<f64>,
    max: Option<f64>,
}

impl NumberRule {
    /// A number that must be present.
    #[must_use]
    pub const fn required() -> Self {
        Self {
            required: true,
            min: None,
            max: None,
        }
    }

    /// A number that may be omitted.
    #[must_use]
    pub const fn optional() -> Self {
        Self {
            required: false,
            min: None,
            max: None,
        }
    }

    /// Require the value to be at least `min`.
    #[must_use]
    pub const fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Require the value to be at most `max`.
    #[must_use]
    pub const fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|candidate| !candidate.is_null())
}

fn missing<T>(field: &str, required: bool) -> FieldCheck<T> {
    if required {
        FieldCheck::Invalid(ErrorEntry::missing_required_field(field))
    } else {
        FieldCheck::Absent
    }
}

/// Check a string field against `rule`.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use shopping_list::domain::validation::{check_string, FieldCheck, StringRule};
///
/// let value = json!("Groceries");
/// assert_eq!(
///     check_string(Some(&value), "name", StringRule::required().with_length(1, 255)),
///     FieldCheck::Valid("Groceries".to_owned())
/// );
/// ```
#[must_use]
pub fn check_string(value: Option<&Value>, field: &str, rule: StringRule) -> FieldCheck<String> {
    let Some(value) = present(value) else {
        return missing(field, rule.required);
    };
    let Some(text) = value.as_str() else {
        return FieldCheck::Invalid(ErrorEntry::invalid_field_type(field, "string"));
    };
    let length = text.chars().count();
    if let Some(min) = rule.min_length.filter(|min| length < *min) {
        return FieldCheck::Invalid(ErrorEntry::invalid_field_value(
            field,
            &format!("minimum length is {min}"),
        ));
    }
    if let Some(max) = rule.max_length.filter(|max| length > *max) {
        return FieldCheck::Invalid(ErrorEntry::invalid_field_value(
            field,
            &format!("maximum length is {max}"),
        ));
    }
    FieldCheck::Valid(text.to_owned())
}

/// Check a numeric field against `rule`.
#[must_use]
pub fn check_number(value: Option<&Value>, field: &str, rule: NumberRule) -> FieldCheck<f64> {
    let Some(value) = present(value) else {
        return missing(field, rule.required);
    };
    let Some(number) = value.as_f64() else {
        return FieldCheck::Invalid(ErrorEntry::invalid_field_type(field, "number"));
    };
    if let Some(min) = rule.min.filter(|min| number < *min) {
        return FieldCheck::Invalid(ErrorEntry::invalid_field_value(
            field,
            &format!("minimum value is {min}"),
        ));
    }
    if let Some(max) = rule.max.filter(|max| number > *max) {
        return FieldCheck::Invalid(ErrorEntry::invalid_field_value(
            field,
            &format!("maximum value is {max}"),
        ));
    }
    FieldCheck::Valid(number)
}

/// Check a boolean field; only presence and type are enforced.
#[must_use]
pub fn check_boolean(value: Option<&Value>, field: &str, required: bool) -> FieldCheck<bool> {
    let Some(value) = present(value) else {
        return missing(field, required);
    };
    value.as_bool().map_or_else(
        || FieldCheck::Invalid(ErrorEntry::invalid_field_type(field, "boolean")),
        FieldCheck::Valid,
    )
}

/// Accumulates field checks over one input object.
///
/// Every field is checked regardless of earlier failures, so independent
/// problems are all reported under their own keys.
pub(crate) struct FieldReader<'a> {
    input: &'a Map<String, Value>,
    errors: ErrorMap,
}

impl<'a> FieldReader<'a> {
    /// Start reading `input`; non-objects are rejected with `invalidDtoIn`.
    pub(crate) fn new(input: &'a Value) -> Result<Self, ErrorMap> {
        input
            .as_object()
            .map(|object| Self {
                input: object,
                errors: ErrorMap::new(),
            })
            .ok_or_else(|| ErrorMap::single(DTO_IN_KEY, ErrorEntry::invalid_dto_in()))
    }

    fn keep<T>(&mut self, field: &str, check: FieldCheck<T>) -> Option<T> {
        match check {
            FieldCheck::Absent => None,
            FieldCheck::Valid(value) => Some(value),
            FieldCheck::Invalid(entry) => {
                self.errors.insert(field, entry);
                None
            }
        }
    }

    pub(crate) fn string(&mut self, field: &str, rule: StringRule) -> Option<String> {
        let check = check_string(self.input.get(field), field, rule);
        self.keep(field, check)
    }

    pub(crate) fn number(&mut self, field: &str, rule: NumberRule) -> Option<f64> {
        let check = check_number(self.input.get(field), field, rule);
        self.keep(field, check)
    }

    pub(crate) fn boolean(&mut self, field: &str, required: bool) -> Option<bool> {
        let check = check_boolean(self.input.get(field), field, required);
        self.keep(field, check)
    }

    /// Record a custom failure for `field`, typically after a domain parse.
    pub(crate) fn reject(&mut self, field: &str, entry: ErrorEntry) {
        self.errors.insert(field, entry);
    }

    pub(crate) fn finish(self) -> ErrorMap {
        self.errors
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;
    use crate::domain::AppErrorCode;
    use rstest::rstest;
    use serde_json::json;

    fn code<T>(check: &FieldCheck<T>) -> Option<AppErrorCode> {
        match check {
            FieldCheck::Invalid(entry) => Some(entry.code()),
            _ => None,
        }
    }

    #[rstest]
    #[case(None, Some(AppErrorCode::MissingRequiredField))]
    #[case(Some(json!(null)), Some(AppErrorCode::MissingRequiredField))]
    #[case(Some(json!(7)), Some(AppErrorCode::InvalidFieldType))]
    #[case(Some(json!("")), Some(AppErrorCode::InvalidFieldValue))]
    #[case(Some(json!("a".repeat(256))), Some(AppErrorCode::InvalidFieldValue))]
    #[case(Some(json!("a".repeat(255))), None)]
    #[case(Some(json!("Milk")), None)]
    fn required_string_with_length(
        #[case] value: Option<Value>,
        #[case] expected: Option<AppErrorCode>,
    ) {
        let check = check_string(
            value.as_ref(),
            "name",
            StringRule::required().with_length(1, 255),
        );
        assert_eq!(code(&check), expected);
    }

    #[rstest]
    fn length_counts_characters_not_bytes() {
        let value = json!("ééé");
        let check = check_string(
            Some(&value),
            "name",
            StringRule::required().with_length(1, 3),
        );
        assert_eq!(check, FieldCheck::Valid("ééé".to_owned()));
    }

    #[rstest]
    fn optional_string_may_be_absent_or_null() {
        assert_eq!(
            check_string(None, "fit", StringRule::optional()),
            FieldCheck::Absent
        );
        assert_eq!(
            check_string(Some(&json!(null)), "fit", StringRule::optional()),
            FieldCheck::Absent
        );
    }

    #[rstest]
    #[case(json!(0), "Invalid value for field quantity: minimum value is 1")]
    #[case(json!(0.5), "Invalid value for field quantity: minimum value is 1")]
    #[case(json!(11), "Invalid value for field quantity: maximum value is 10")]
    fn number_bounds_report_the_limit(#[case] value: Value, #[case] message: &str) {
        let rule = NumberRule::optional().with_min(1.0).with_max(10.0);
        match check_number(Some(&value), "quantity", rule) {
            FieldCheck::Invalid(entry) => assert_eq!(entry.message(), message),
            other => panic!("expected invalid, got {other:?}"),
        }
    }

    #[rstest]
    #[case(json!("3"), Some(AppErrorCode::InvalidFieldType))]
    #[case(json!(3), None)]
    #[case(json!(1), None)]
    fn number_type_is_strict(#[case] value: Value, #[case] expected: Option<AppErrorCode>) {
        let check = check_number(Some(&value), "quantity", NumberRule::optional().with_min(1.0));
        assert_eq!(code(&check), expected);
    }

    #[rstest]
    #[case(Some(json!(true)), false, None)]
    #[case(Some(json!("true")), false, Some(AppErrorCode::InvalidFieldType))]
    #[case(None, true, Some(AppErrorCode::MissingRequiredField))]
    #[case(None, false, None)]
    fn boolean_checks(
        #[case] value: Option<Value>,
        #[case] required: bool,
        #[case] expected: Option<AppErrorCode>,
    ) {
        let check = check_boolean(value.as_ref(), "archived", required);
        assert_eq!(code(&check), expected);
    }

    #[rstest]
    #[case(json!([]))]
    #[case(json!("text"))]
    #[case(json!(null))]
    #[case(json!(42))]
    fn reader_rejects_non_objects(#[case] input: Value) {
        let errors = FieldReader::new(&input).err().expect("non-object rejected");
        assert_eq!(
            errors.get(DTO_IN_KEY).map(ErrorEntry::code),
            Some(AppErrorCode::InvalidDtoIn)
        );
    }
}
