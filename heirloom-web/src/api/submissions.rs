//! Submission API handlers
//!
//! Three entry points feed the same pipeline: POST /api/memories (typed
//! memories, JSON), POST /api/uploads (file upload form, multipart), and
//! POST /api/recordings (browser audio capture, multipart).

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::{AssetUpload, Channel, Contributor, SubmissionInput};
use crate::services::category_normalizer;
use crate::AppState;

/// Successful submission response
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub id: Uuid,
    pub category: String,
}

/// POST /api/memories request (write form)
#[derive(Debug, Deserialize)]
pub struct MemoryRequest {
    pub category: String,
    pub title: String,
    #[serde(default)]
    pub body_text: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub occurred_on: String,
    #[serde(default)]
    pub date_is_approximate: bool,
    #[serde(default)]
    pub contributor_name: String,
    #[serde(default)]
    pub contributor_email: String,
    #[serde(default)]
    pub contributor_phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub people_mentioned: String,
}

/// POST /api/memories
///
/// Typed memory with no binary asset. Returns 201 with the record id.
pub async fn submit_memory(
    State(state): State<AppState>,
    Json(request): Json<MemoryRequest>,
) -> ApiResult<(StatusCode, Json<SubmissionResponse>)> {
    let input = SubmissionInput {
        category: request.category,
        title: request.title,
        description: request.description,
        body_text: request.body_text,
        occurred_on: parse_occurred_on(&request.occurred_on)?,
        date_is_approximate: request.date_is_approximate,
        contributor: Contributor {
            name: non_empty(request.contributor_name),
            email: non_empty(request.contributor_email),
            phone: non_empty(request.contributor_phone),
        },
        location: non_empty(request.location),
        people_mentioned: non_empty(request.people_mentioned),
        channel: Channel::WebForm,
    };

    let category = category_normalizer::normalize(&input.category).to_string();
    let id = state.coordinator.submit(input, None).await?;
    respond_created(id, category)
}

/// POST /api/uploads
///
/// Generic contribution form: metadata fields plus an optional file part
/// named `file`.
pub async fn submit_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<SubmissionResponse>)> {
    let (fields, upload) = read_multipart(multipart, "file").await?;
    let input = fields.into_input(Channel::WebUpload)?;

    let category = category_normalizer::normalize(&input.category).to_string();
    let id = state.coordinator.submit(input, upload).await?;
    respond_created(id, category)
}

/// POST /api/recordings
///
/// Browser-recorded audio: an `audio` part (webm blob) plus metadata
/// fields including the measured duration.
pub async fn submit_recording(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<SubmissionResponse>)> {
    let (mut fields, upload) = read_multipart(multipart, "audio").await?;
    if fields.category.is_empty() {
        fields.category = "recording".to_string();
    }
    let duration_seconds = fields.duration_seconds;
    let input = fields.into_input(Channel::WebRecording)?;

    let upload = upload.map(|mut u| {
        // Browsers name the posted blob "blob"; discard it so the router
        // generates the synthetic recording-<timestamp>.webm key
        u.filename_hint = None;
        u.duration_seconds = duration_seconds;
        if u.content_type_hint.is_none() {
            u.content_type_hint = Some("audio/webm".to_string());
        }
        u
    });

    let category = category_normalizer::normalize(&input.category).to_string();
    let id = state.coordinator.submit(input, upload).await?;
    respond_created(id, category)
}

/// Build submission routes
pub fn submission_routes() -> Router<AppState> {
    Router::new()
        .route("/api/memories", post(submit_memory))
        .route("/api/uploads", post(submit_upload))
        .route("/api/recordings", post(submit_recording))
}

fn respond_created(
    id: Uuid,
    category: String,
) -> ApiResult<(StatusCode, Json<SubmissionResponse>)> {
    Ok((StatusCode::CREATED, Json(SubmissionResponse { id, category })))
}

/// Accumulated text fields from a multipart submission
#[derive(Debug, Default)]
struct FormFields {
    category: String,
    title: String,
    description: String,
    body_text: String,
    occurred_on: String,
    date_is_approximate: bool,
    contributor_name: String,
    contributor_email: String,
    contributor_phone: String,
    location: String,
    people_mentioned: String,
    duration_seconds: Option<u32>,
}

impl FormFields {
    fn set(&mut self, name: &str, value: String) {
        match name {
            "category" => self.category = value,
            "title" => self.title = value,
            "description" => self.description = value,
            "body_text" => self.body_text = value,
            "occurred_on" => self.occurred_on = value,
            "date_is_approximate" => {
                self.date_is_approximate = matches!(value.as_str(), "true" | "on" | "1")
            }
            "contributor_name" => self.contributor_name = value,
            "contributor_email" => self.contributor_email = value,
            "contributor_phone" => self.contributor_phone = value,
            "location" => self.location = value,
            "people_mentioned" => self.people_mentioned = value,
            "duration_seconds" => self.duration_seconds = value.parse().ok(),
            // Unknown fields are ignored, not rejected
            _ => {}
        }
    }

    fn into_input(self, channel: Channel) -> ApiResult<SubmissionInput> {
        Ok(SubmissionInput {
            category: self.category,
            title: self.title,
            description: self.description,
            body_text: self.body_text,
            occurred_on: parse_occurred_on(&self.occurred_on)?,
            date_is_approximate: self.date_is_approximate,
            contributor: Contributor {
                name: non_empty(self.contributor_name),
                email: non_empty(self.contributor_email),
                phone: non_empty(self.contributor_phone),
            },
            location: non_empty(self.location),
            people_mentioned: non_empty(self.people_mentioned),
            channel,
        })
    }
}

/// Drain a multipart body into form fields plus the binary part (if any)
async fn read_multipart(
    mut multipart: Multipart,
    binary_field: &str,
) -> ApiResult<(FormFields, Option<AssetUpload>)> {
    let mut fields = FormFields::default();
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == binary_field {
            let filename_hint = field.file_name().map(|s| s.to_string());
            let content_type_hint = field.content_type().map(|s| s.to_string());
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Failed to read {name}: {e}")))?;
            // An empty file input still submits a zero-length part
            if !data.is_empty() {
                upload = Some(AssetUpload {
                    data: data.to_vec(),
                    filename_hint,
                    content_type_hint,
                    duration_seconds: None,
                });
            }
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Failed to read {name}: {e}")))?;
            fields.set(&name, value);
        }
    }

    Ok((fields, upload))
}

/// Empty or whitespace-only date input means "no date"
fn parse_occurred_on(raw: &str) -> ApiResult<Option<NaiveDate>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<NaiveDate>()
        .map(Some)
        .map_err(|_| ApiError::Unprocessable(format!("Invalid date: {trimmed}")))
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
