//! Axum route handlers for the resume parsing API and the upload form.

use anyhow::anyhow;
use axum::{
    extract::{rejection::JsonRejection, Multipart, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extraction::{media_type, spawn_extract, ExtractionError};
use crate::parsing::models::CandidateProfile;
use crate::parsing::pipeline::structure_resume;
use crate::presentation::notice::Notice;
use crate::presentation::render::render_page;
use crate::presentation::widget::WidgetState;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ParseResumeRequest {
    #[serde(rename = "resumeText", default)]
    pub resume_text: Option<String>,
}

/// A PDF received through the upload form.
struct UploadedResume {
    file_name: String,
    declared_type: String,
    data: Vec<u8>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/parse-resume
///
/// Body `{ "resumeText": string }`. Returns a Candidate Profile, or
/// `{ "error": string }` with status 500. A body that is not JSON of that
/// shape counts as missing input.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    payload: Result<Json<ParseResumeRequest>, JsonRejection>,
) -> Result<Json<CandidateProfile>, AppError> {
    let Json(request) = payload.map_err(|e| {
        warn!("Unreadable parse request body: {e}");
        AppError::MissingInput
    })?;

    let resume_text = request.resume_text.unwrap_or_default();
    let profile = structure_resume(&resume_text, state.model.as_ref()).await?;

    Ok(Json(profile))
}

/// GET /
pub async fn handle_index() -> Html<String> {
    Html(render_page(None, &WidgetState::Idle, None))
}

/// POST /upload
///
/// Multipart form with a `resume` file part. Extracts the text server-side,
/// runs the same pipeline as the JSON endpoint, and re-renders the page with
/// either the results view or a failure notice.
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> (StatusCode, Html<String>) {
    match upload_to_profile(&state, multipart).await {
        Ok(profile) => (
            StatusCode::OK,
            Html(render_page(
                Some(&Notice::parsed()),
                &WidgetState::Idle,
                Some(&profile),
            )),
        ),
        Err(err) => {
            let notice = match &err {
                AppError::Extraction(ExtractionError::InvalidFileType { .. }) => {
                    Notice::invalid_file_type()
                }
                other => Notice::failed(other.public_message()),
            };
            warn!("Upload failed: {err}");
            (err.status(), Html(render_page(Some(&notice), &WidgetState::Idle, None)))
        }
    }
}

async fn upload_to_profile(
    state: &AppState,
    multipart: Multipart,
) -> Result<CandidateProfile, AppError> {
    let upload = read_resume_part(multipart).await?;
    info!(
        file = %upload.file_name,
        bytes = upload.data.len(),
        "Received resume upload"
    );

    let extracted = spawn_extract(upload.data, upload.declared_type).await?;
    structure_resume(&extracted.text, state.model.as_ref()).await
}

/// Pulls the `resume` part out of the form. The declared type is checked
/// before the part's bytes are read.
async fn read_resume_part(mut multipart: Multipart) -> Result<UploadedResume, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Internal(anyhow!("Failed to read form field: {e}")))?
    {
        if field.name() != Some("resume") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
        let declared_type = field
            .content_type()
            .unwrap_or(media_type::OCTET_STREAM)
            .to_string();
        if !media_type::is_pdf(&declared_type) {
            return Err(ExtractionError::InvalidFileType {
                declared: declared_type,
            }
            .into());
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Internal(anyhow!("Failed to read file data: {e}")))?
            .to_vec();

        return Ok(UploadedResume {
            file_name,
            declared_type,
            data,
        });
    }

    Err(AppError::MissingInput)
}
