//! HTTP adapter mapping for [`Failure`].
//!
//! Every failure renders the envelope with an empty `dtoOut`; the kind picks
//! the status and the captured trace id is echoed in a header.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use crate::domain::{Failure, FailureKind};
use crate::middleware::TRACE_ID_HEADER;

use super::envelope::Envelope;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Failure>;

fn status_for(kind: FailureKind) -> StatusCode {
    match kind {
        FailureKind::InvalidInput | FailureKind::Conflict => StatusCode::BAD_REQUEST,
        FailureKind::Unauthenticated => StatusCode::UNAUTHORIZED,
        FailureKind::Forbidden => StatusCode::FORBIDDEN,
        FailureKind::NotFound => StatusCode::NOT_FOUND,
        FailureKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Failure {
    fn status_code(&self) -> StatusCode {
        status_for(self.kind())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_string()));
        }
        builder.json(Envelope::failure(self.errors().clone()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{ErrorEntry, ErrorMap, TraceId};
    use actix_web::body::to_bytes;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[case(FailureKind::InvalidInput, StatusCode::BAD_REQUEST)]
    #[case(FailureKind::Unauthenticated, StatusCode::UNAUTHORIZED)]
    #[case(FailureKind::Forbidden, StatusCode::FORBIDDEN)]
    #[case(FailureKind::NotFound, StatusCode::NOT_FOUND)]
    #[case(FailureKind::Conflict, StatusCode::BAD_REQUEST)]
    #[case(FailureKind::Internal, StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_code_matches_failure_kind(#[case] kind: FailureKind, #[case] status: StatusCode) {
        let failure = Failure::new(kind, ErrorMap::new());
        assert_eq!(ResponseError::status_code(&failure), status);
    }

    #[rstest]
    #[actix_web::test]
    async fn response_carries_envelope_and_trace_id() {
        let trace_id: TraceId = "00000000-0000-0000-0000-000000000000"
            .parse()
            .expect("valid UUID");
        let failure = TraceId::scope(trace_id, async {
            Failure::forbidden(ErrorMap::single("authorization", ErrorEntry::not_owner()))
        })
        .await;

        let response = ResponseError::error_response(&failure);
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let header = response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        assert_eq!(header.as_deref(), Some("00000000-0000-0000-0000-000000000000"));

        let bytes = to_bytes(response.into_body())
            .await
            .expect("reading response body succeeds");
        let body: Value = serde_json::from_slice(&bytes).expect("envelope JSON");
        assert_eq!(body["dtoOut"], json!({}));
        assert_eq!(
            body["uuAppErrorMap"]["authorization"]["message"],
            json!("User is not the owner of this shopping list")
        );
    }

    #[rstest]
    fn failure_outside_a_request_has_no_trace_header() {
        let response = ResponseError::error_response(&Failure::invalid_dto_in());
        assert!(response.headers().get(TRACE_ID_HEADER).is_none());
    }
}
