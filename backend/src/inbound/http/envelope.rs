//! The `{dtoOut, uuAppErrorMap}` response envelope shared by every endpoint.

use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::ErrorMap;

/// Response body wrapping an operation result and its error map.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use shopping_list::inbound::http::envelope::Envelope;
///
/// let body = serde_json::to_value(Envelope::success(json!({"id": "list-1"})))
///     .expect("serialise envelope");
/// assert_eq!(body, json!({"dtoOut": {"id": "list-1"}, "uuAppErrorMap": {}}));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    /// Operation-specific output; an empty object on failure.
    pub dto_out: T,
    /// Errors gathered along the pipeline; empty on success.
    pub uu_app_error_map: ErrorMap,
}

impl<T> Envelope<T> {
    /// Envelope with an empty error map.
    pub fn success(dto_out: T) -> Self {
        Self {
            dto_out,
            uu_app_error_map: ErrorMap::new(),
        }
    }
}

impl Envelope<Map<String, Value>> {
    /// Failure envelope: empty `dtoOut` plus the error map.
    pub fn failure(errors: ErrorMap) -> Self {
        Self {
            dto_out: Map::new(),
            uu_app_error_map: errors,
        }
    }
}

/// 200 response with `dto_out` wrapped in a success envelope.
pub fn respond<T: Serialize>(dto_out: T) -> HttpResponse {
    HttpResponse::Ok().json(Envelope::success(dto_out))
}
