use actix_web::{web, HttpResponse};
use pv_core::services::VerificationProvider;
use uuid::Uuid;

use super::log_failure;
use crate::app::AppState;
use crate::dto::{StartVerificationRequest, StatusResponse};
use crate::handlers::ApiError;

/// Handler for POST /api/start-verification
///
/// # Request Body
///
/// ```json
/// { "phone": "+14155552671" }
/// ```
///
/// # Responses
///
/// - `200 {"status": "pending"}` - provider accepted the request
/// - `400 {"error": ...}` - phone missing or not a valid E.164 mobile number
/// - `429 {"error": ...}` - rate limit exceeded
/// - `500 {"error": "Internal server error."}` - provider failure
pub async fn start_verification<P>(
    state: web::Data<AppState<P>>,
    request: web::Json<StartVerificationRequest>,
) -> Result<HttpResponse, ApiError>
where
    P: VerificationProvider + 'static,
{
    let request_id = Uuid::new_v4();
    log::info!("[{}] Processing start-verification request", request_id);

    let status = state
        .gateway
        .start_verification(request.phone())
        .await
        .map_err(|e| {
            log_failure(&request_id, "start-verification", &e);
            ApiError::from(e)
        })?;

    log::info!("[{}] start-verification returned {}", request_id, status);
    Ok(HttpResponse::Ok().json(StatusResponse::new(status.into_inner())))
}
