use super::dto::{DownloadRequest, VideoDataResponse};
use super::service::DownloadService;
use crate::common::response::{ApiError, ApiResponse, ApiSuccess, ErrorBody};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;
use validator::Validate;

pub const MISSING_URL_MESSAGE: &str = "Missing 'youtube_url' in request body.";
pub const INVALID_URL_MESSAGE: &str = "Invalid YouTube URL format.";
pub const SUCCESS_MESSAGE: &str = "Video downloaded, uploaded to S3, and pre-signed URL generated.";

/// Download a YouTube video and return its metadata with a signed link
#[utoipa::path(
    post,
    path = "/download_youtube_data",
    request_body = DownloadRequest,
    params(
        ("X-API-Key" = Option<String>, Header, description = "Shared secret, required when the server has one configured")
    ),
    responses(
        (status = 200, description = "Video uploaded", body = ApiResponse<VideoDataResponse>),
        (status = 400, description = "Missing or invalid URL", body = ErrorBody),
        (status = 401, description = "Invalid API key", body = ErrorBody),
        (status = 500, description = "Pipeline failure", body = ErrorBody)
    ),
    tag = "Download",
    security(("api_key" = []))
)]
pub async fn download_youtube_data(
    State(state): State<AppState>,
    payload: Result<Json<DownloadRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("Bad request: {} ({})", MISSING_URL_MESSAGE, rejection.body_text());
            return ApiError::bad_request(MISSING_URL_MESSAGE).into_response();
        }
    };

    let Some(youtube_url) = request.youtube_url.clone() else {
        warn!("Bad request: {}", MISSING_URL_MESSAGE);
        return ApiError::bad_request(MISSING_URL_MESSAGE).into_response();
    };

    if request.validate().is_err() {
        warn!("Invalid YouTube URL format received: {}", youtube_url);
        return ApiError::bad_request(INVALID_URL_MESSAGE).into_response();
    }

    let span = info_span!("download", job_id = %Uuid::new_v4());
    info!(parent: &span, "Processing request for YouTube URL: {}", youtube_url);

    match DownloadService::process(&state, &youtube_url).instrument(span.clone()).await {
        Ok(data) => {
            info!(parent: &span, "Successfully processed {}.", youtube_url);
            ApiSuccess(ApiResponse::success(data, SUCCESS_MESSAGE), StatusCode::OK).into_response()
        }
        Err(e) => {
            error!(parent: &span, error = ?e, "Error processing YouTube link {}: {}", youtube_url, e);
            let message = format!(
                "Failed to process YouTube link: {}. Check server logs for details. \
                 Ensure FFmpeg is installed if high quality is desired, and AWS credentials/S3 config are correct.",
                e
            );
            ApiError::internal(message).with_youtube_url(youtube_url).into_response()
        }
    }
}
