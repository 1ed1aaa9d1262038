use super::types::{ErrorResponse, RecommendationResponse};
use crate::{
    Error,
    recommend::{ImageMime, Recommender, UploadedImage},
};
use axum::{
    extract::{Multipart, State, multipart::MultipartError},
    http::StatusCode,
    response::{Html, Json},
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

const INDEX_HTML: &str = include_str!("index.html");

pub type ApiError = (StatusCode, Json<ErrorResponse>);

#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
}

/// What the form carried. The image is optional here so the handler can
/// refuse the submission before anything goes upstream.
#[derive(Debug, Default)]
pub struct Submission {
    pub image: Option<UploadedImage>,
    pub requirements: Option<String>,
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn recommend(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<RecommendationResponse>, ApiError> {
    let request_id = Uuid::new_v4().to_string();

    let submission = read_submission(multipart).await.map_err(|e| {
        warn!("Rejected submission {}: {}", request_id, e.1.error);
        e
    })?;

    let image = match submission.image {
        Some(image) if !image.is_empty() => image,
        _ => {
            warn!("Submission {} carried no image", request_id);
            return Err(client_error(Error::MissingImage));
        }
    };

    info!("Processing recommendation request {}", request_id);

    match state
        .recommender
        .recommend(&image, submission.requirements.as_deref())
        .await
    {
        Ok(recommendations) => {
            info!("Recommendations ready for request {}", request_id);
            Ok(Json(RecommendationResponse {
                request_id,
                recommendations,
            }))
        }
        Err(e) => {
            error!("Recommendation request {} failed: {}", request_id, e);
            Err((
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: format!("An error occurred: {}", e),
                }),
            ))
        }
    }
}

pub async fn read_submission(mut multipart: Multipart) -> Result<Submission, ApiError> {
    let mut submission = Submission::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "image" => {
                let content_type = field.content_type().map(str::to_string);
                let file_name = field.file_name().map(str::to_string);
                debug!(
                    "Image field: file_name={:?} content_type={:?}",
                    file_name, content_type
                );

                let mime = content_type
                    .as_deref()
                    .and_then(ImageMime::from_content_type)
                    .or_else(|| file_name.as_deref().and_then(ImageMime::from_file_name))
                    .ok_or_else(|| {
                        client_error(Error::UnsupportedImage(
                            file_name
                                .or(content_type)
                                .unwrap_or_else(|| "unknown".to_string()),
                        ))
                    })?;

                let data = field.bytes().await.map_err(multipart_error)?;
                submission.image = Some(UploadedImage::new(data.to_vec(), mime));
            }
            "requirements" => {
                let text = field.text().await.map_err(multipart_error)?;
                submission.requirements = Some(text).filter(|t| !t.is_empty());
            }
            other => debug!("Ignoring multipart field '{}'", other),
        }
    }

    Ok(submission)
}

fn client_error(e: Error) -> ApiError {
    let status = match e {
        Error::UnsupportedImage(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        _ => StatusCode::BAD_REQUEST,
    };
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

fn multipart_error(e: MultipartError) -> ApiError {
    (
        e.status(),
        Json(ErrorResponse {
            error: Error::upload(e.body_text()).to_string(),
        }),
    )
}
