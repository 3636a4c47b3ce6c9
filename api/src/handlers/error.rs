//! Mapping from domain errors to HTTP responses
//!
//! Every error body is `{"error": "<fixed message>"}`. Provider detail is
//! logged and never serialized.

use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::StatusCode,
    HttpRequest, HttpResponse, ResponseError,
};
use pv_core::errors::DomainError;
use pv_shared::{messages, ErrorResponse};
use std::fmt;

/// Domain error carried to the HTTP layer
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.public_message())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            DomainError::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let DomainError::RateLimited { retry_after_secs } = &self.0 {
            builder.insert_header(("Retry-After", retry_after_secs.to_string()));
        }
        builder.json(ErrorResponse::new(self.0.public_message()))
    }
}

/// Malformed or non-JSON bodies become 400 `Invalid request.`
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected request body on {}: {}", req.path(), err);
    let response = HttpResponse::BadRequest().json(ErrorResponse::new(messages::INVALID_REQUEST));
    InternalError::from_response(err, response).into()
}

/// Default service for unknown routes
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(messages::NOT_FOUND))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use pv_core::errors::{ProviderError, ValidationError};

    async fn body_of(err: ApiError) -> serde_json::Value {
        let bytes = to_bytes(err.error_response().into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn test_validation_errors_are_bad_request() {
        let err = ApiError::from(DomainError::from(ValidationError::InvalidPhoneFormat));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_of(err).await,
            serde_json::json!({"error": "Invalid phone number format."})
        );

        let err = ApiError::from(DomainError::from(ValidationError::MissingField { field: "code" }));
        assert_eq!(body_of(err).await["error"], "Invalid request.");
    }

    #[actix_web::test]
    async fn test_provider_detail_is_not_leaked() {
        let err = ApiError::from(DomainError::from(ProviderError::rejected(
            401,
            Some(20003),
            "Authenticate: account AC123 suspended",
        )));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_of(err).await;
        assert_eq!(body, serde_json::json!({"error": "Internal server error."}));
    }

    #[actix_web::test]
    async fn test_rate_limited_sets_retry_after() {
        let err = ApiError::from(DomainError::RateLimited { retry_after_secs: 42 });
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers().get("Retry-After").unwrap(), "42");
    }
}
