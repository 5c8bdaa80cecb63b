//! Request pipeline shared by the shopping list endpoints.
//!
//! Stages run in a fixed order: parse, validate, identify. Authorization
//! context and the mutation itself belong to the service behind
//! [`ShoppingListOperations`](crate::domain::ports::ShoppingListOperations).

use std::collections::HashMap;

use actix_web::{HttpRequest, web};
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::validation::Validated;
use crate::domain::{Failure, Identity};

use super::state::HttpState;

/// Query parameters carried as `true`/`false` text but validated as booleans.
const BOOLEAN_QUERY_FIELDS: &[&str] = &["archived"];

/// JSON extractor settings turning unparsable bodies into `INVALID_DTO_IN`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|error, _req| {
        debug!(%error, "rejecting unparsable request body");
        Failure::invalid_dto_in().into()
    })
}

/// Query extractor settings turning malformed query strings into `INVALID_DTO_IN`.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|error, _req| {
        debug!(%error, "rejecting malformed query string");
        Failure::invalid_dto_in().into()
    })
}

/// Convert query pairs into the untyped record validators expect.
///
/// Boolean fields accept the literals `true` and `false`; anything else is
/// passed through as text so the validator reports a type error.
pub fn query_input(pairs: HashMap<String, String>) -> Value {
    let record: Map<String, Value> = pairs
        .into_iter()
        .map(|(key, raw)| {
            let value = if BOOLEAN_QUERY_FIELDS.contains(&key.as_str()) {
                match raw.as_str() {
                    "true" => Value::Bool(true),
                    "false" => Value::Bool(false),
                    _ => Value::String(raw),
                }
            } else {
                Value::String(raw)
            };
            (key, value)
        })
        .collect();
    Value::Object(record)
}

/// Validate `input`, then identify the caller.
///
/// Validation failures win over a missing identity, so an anonymous caller
/// sending a malformed payload sees 400, not 401.
///
/// # Errors
/// Returns the validator's failure, or an unauthenticated failure when the
/// identity extractor finds no caller.
pub fn prepare<D>(
    request: &HttpRequest,
    state: &HttpState,
    input: &Value,
    validate: fn(&Value) -> Validated<D>,
) -> Result<(Identity, D), Failure> {
    let dto_in = validate(input).into_result()?;
    let identity = state
        .identity
        .extract(request.headers())
        .map_err(Failure::unauthenticated)?;
    Ok((identity, dto_in))
}
