use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::render::{self, PageContext};
use super::AppState;

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, (StatusCode, String)> {
    render_page(&PageContext::empty(&state.model_name))
}

pub async fn review(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Html<String>, (StatusCode, String)> {
    let form = read_review_form(&mut multipart).await?;
    let page = run_review(&state, form).await;
    render_page(&page)
}

#[derive(Debug, Deserialize)]
pub struct ApiReviewRequest {
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct ApiReviewResponse {
    pub request_id: String,
    pub model: String,
    pub review: String,
}

pub async fn api_review(
    State(state): State<AppState>,
    Json(payload): Json<ApiReviewRequest>,
) -> Result<Json<ApiReviewResponse>, (StatusCode, String)> {
    if payload.code.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "code_required".into()));
    }

    let request_id = Uuid::new_v4().to_string();
    let review = state.review.generate_code_review(&payload.code).await;

    Ok(Json(ApiReviewResponse {
        request_id,
        model: state.model_name.clone(),
        review,
    }))
}

fn render_page(page: &PageContext) -> Result<Html<String>, (StatusCode, String)> {
    render::page(page)
        .map(Html)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

#[derive(Debug, Default)]
pub(crate) struct ReviewForm {
    pub file: Option<UploadedFile>,
    pub code: String,
}

#[derive(Debug)]
pub(crate) struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

async fn read_review_form(
    multipart: &mut Multipart,
) -> Result<ReviewForm, (StatusCode, String)> {
    let mut form = ReviewForm::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            format!("Invalid multipart payload: {e}"),
        )
    })? {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().map(|s| s.to_string()).unwrap_or_default();
                let bytes = field.bytes().await.map_err(|e| {
                    (
                        StatusCode::BAD_REQUEST,
                        format!("Failed to read field: {e}"),
                    )
                })?;

                // browsers send an empty file part when nothing is selected
                if filename.is_empty() {
                    continue;
                }

                form.file = Some(UploadedFile {
                    filename,
                    bytes: bytes.to_vec(),
                });
            }
            Some("code") => {
                form.code = field.text().await.map_err(|e| {
                    (
                        StatusCode::BAD_REQUEST,
                        format!("Failed to read field: {e}"),
                    )
                })?;
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Resolve the submission to one snippet and review it, or surface a warning
/// without touching the model.
pub(crate) async fn run_review(state: &AppState, form: ReviewForm) -> PageContext {
    match resolve_snippet(form) {
        Err(err) => PageContext::warning(&state.model_name, err.message()),
        Ok(code) => {
            let review = state.review.generate_code_review(&code).await;
            PageContext::reviewed(&state.model_name, code, review)
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum SnippetError {
    Blank,
    UnsupportedExtension(String),
    InvalidUtf8(String),
}

impl SnippetError {
    pub(crate) fn message(&self) -> String {
        match self {
            SnippetError::Blank => "⚠️ Please provide a code snippet.".to_string(),
            SnippetError::UnsupportedExtension(name) => {
                format!("⚠️ Only .py files are supported (got \"{name}\").")
            }
            SnippetError::InvalidUtf8(name) => {
                format!("⚠️ Could not decode \"{name}\" as UTF-8 text.")
            }
        }
    }
}

/// An uploaded file wins over the textarea when both are present.
fn resolve_snippet(form: ReviewForm) -> Result<String, SnippetError> {
    let code = match form.file {
        Some(file) => {
            if !file.filename.to_ascii_lowercase().ends_with(".py") {
                return Err(SnippetError::UnsupportedExtension(file.filename));
            }
            String::from_utf8(file.bytes)
                .map_err(|_| SnippetError::InvalidUtf8(file.filename))?
        }
        None => form.code,
    };

    if code.trim().is_empty() {
        return Err(SnippetError::Blank);
    }

    Ok(code)
}
