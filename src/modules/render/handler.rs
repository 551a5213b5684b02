use super::dto::{SubmitRenderRequest, SubmitRenderResponse};
use super::error::RenderJobError;
use super::model::{JobId, RenderJob};
use crate::common::response::{ApiError, ApiSuccess, ErrorBody};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::warn;

/// Submit a render job
#[utoipa::path(
    post,
    path = "/render",
    request_body = SubmitRenderRequest,
    responses(
        (status = 202, description = "Job accepted", body = SubmitRenderResponse),
        (status = 400, description = "Invalid submission", body = ErrorBody),
        (status = 413, description = "Body too large", body = ErrorBody),
        (status = 500, description = "Internal Server Error", body = ErrorBody)
    ),
    tag = "Render"
)]
pub async fn submit_render(
    State(state): State<AppState>,
    payload: Result<Json<SubmitRenderRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!(error = %rejection, "unreadable render submission");
            let status = match rejection.status() {
                StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
                _ => StatusCode::BAD_REQUEST,
            };
            return ApiError::new(rejection.body_text(), status).into_response();
        }
    };

    match state.render_jobs.submit_job(req).await {
        Ok(job) => ApiSuccess(SubmitRenderResponse::from(&job), StatusCode::ACCEPTED).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Get a render job by ID
#[utoipa::path(
    get,
    path = "/render/{job_id}",
    params(
        ("job_id" = String, Path, description = "Render job ID")
    ),
    responses(
        (status = 200, description = "Render job", body = RenderJob),
        (status = 404, description = "Job not found", body = ErrorBody)
    ),
    tag = "Render"
)]
pub async fn get_render(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> impl IntoResponse {
    // A malformed id can never have been issued.
    let Ok(id) = job_id.parse::<JobId>() else {
        return ApiError::from(RenderJobError::NotFound).into_response();
    };

    match state.render_jobs.get_job(id).await {
        Ok(job) => ApiSuccess(job, StatusCode::OK).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
