use actix_web::{web, HttpResponse};
use pv_core::services::VerificationProvider;
use uuid::Uuid;

use super::log_failure;
use crate::app::AppState;
use crate::dto::{CheckVerificationRequest, StatusResponse};
use crate::handlers::ApiError;

/// Handler for POST /api/check-verification
///
/// `code` may be a JSON string or number. Any provider status is relayed
/// with 200; only `approved` means the code matched.
pub async fn check_verification<P>(
    state: web::Data<AppState<P>>,
    request: web::Json<CheckVerificationRequest>,
) -> Result<HttpResponse, ApiError>
where
    P: VerificationProvider + 'static,
{
    let request_id = Uuid::new_v4();
    log::info!("[{}] Processing check-verification request", request_id);

    let code = request.code();
    let status = state
        .gateway
        .check_verification(request.phone(), code.as_deref())
        .await
        .map_err(|e| {
            log_failure(&request_id, "check-verification", &e);
            ApiError::from(e)
        })?;

    log::info!("[{}] check-verification returned {}", request_id, status);
    Ok(HttpResponse::Ok().json(StatusResponse::new(status.into_inner())))
}
