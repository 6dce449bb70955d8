use std::sync::Arc;

use anyhow::Context;
use askama::Template;
use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Extension, Json,
};
use bytes::Bytes;
use tracing::{info, warn};

use crate::analysis::{self, AnalysisReport, SkillVocabulary};
use crate::errors::AppError;
use crate::extraction::{extract_document, ExtractionError, ResumeDocument};
use crate::render::templates::{DocumentView, HomePage, ReportPage};
use crate::render::{self, WordCloudOptions, REPORT_FILE_NAME};
use crate::sessions::SessionId;
use crate::state::AppState;

/// Multipart field carrying the resume file.
const RESUME_FIELD: &str = "resume";

// ────────────────────────────────────────────────────────────────────────────
// HTML flow
// ────────────────────────────────────────────────────────────────────────────

/// GET /
pub async fn handle_home(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Result<Html<String>, AppError> {
    let document = state.sessions.document(session);
    let page = HomePage {
        document: document.as_deref().map(document_view),
        error: None,
    };
    Ok(Html(page.render()?))
}

/// POST /upload
pub async fn handle_upload(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let document = match extract_upload(&state, multipart).await {
        Ok(document) => Arc::new(document),
        Err(AppError::Extraction(e)) => {
            state.sessions.clear_document(session);
            return upload_page_with_error(StatusCode::UNPROCESSABLE_ENTITY, e.to_string());
        }
        Err(AppError::Validation(message)) => {
            state.sessions.clear_document(session);
            return upload_page_with_error(StatusCode::UNPROCESSABLE_ENTITY, message);
        }
        Err(e) => return Err(e),
    };

    state.sessions.set_document(session, Arc::clone(&document));
    let page = HomePage {
        document: Some(document_view(&document)),
        error: None,
    };
    Ok(Html(page.render()?).into_response())
}

/// POST /analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Result<Response, AppError> {
    let Some(document) = state.sessions.document(session) else {
        return upload_page_with_error(
            StatusCode::BAD_REQUEST,
            "Upload a resume before running the analysis.".to_string(),
        );
    };

    let report = analyze_text(&state, document.text.clone()).await?;

    let cloud = WordCloudOptions::default();
    let for_render = Arc::clone(&report);
    let artifacts = tokio::task::spawn_blocking(move || render::render_artifacts(&for_render, &cloud))
        .await
        .context("report rendering task failed")??;
    state.sessions.set_artifacts(session, artifacts);

    let page = ReportPage::new(&document.file_name, &report);
    Ok(Html(page.render()?).into_response())
}

/// GET /report/pdf
pub async fn handle_report_pdf(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Result<Response, AppError> {
    let artifacts = state
        .sessions
        .artifacts(session)
        .ok_or_else(no_report_yet)?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{REPORT_FILE_NAME}\""),
            ),
        ],
        artifacts.pdf,
    )
        .into_response())
}

/// GET /report/wordcloud.png
pub async fn handle_report_wordcloud(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Result<Response, AppError> {
    let artifacts = state
        .sessions
        .artifacts(session)
        .ok_or_else(no_report_yet)?;
    Ok(([(header::CONTENT_TYPE, "image/png")], artifacts.wordcloud_png).into_response())
}

// ────────────────────────────────────────────────────────────────────────────
// JSON API
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
pub async fn handle_api_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisReport>, AppError> {
    let document = extract_upload(&state, multipart).await?;
    let report = analyze_text(&state, document.text).await?;
    Ok(Json(Arc::unwrap_or_clone(report)))
}

// ────────────────────────────────────────────────────────────────────────────
// Shared steps
// ────────────────────────────────────────────────────────────────────────────

fn document_view(document: &ResumeDocument) -> DocumentView<'_> {
    DocumentView {
        file_name: &document.file_name,
        text: &document.text,
    }
}

fn upload_page_with_error(status: StatusCode, message: String) -> Result<Response, AppError> {
    warn!("Upload page error: {message}");
    let page = HomePage {
        document: None,
        error: Some(message),
    };
    Ok((status, Html(page.render()?)).into_response())
}

fn no_report_yet() -> AppError {
    AppError::NotFound("No report has been generated in this session yet".to_string())
}

/// Pulls the `resume` field out of a multipart body.
async fn read_resume_field(mut multipart: Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Could not read the upload: {e}")))?
    {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read the upload: {e}")))?;
        return Ok((file_name, bytes));
    }
    Err(AppError::Validation(format!(
        "No file was attached in the '{RESUME_FIELD}' field"
    )))
}

/// Reads the upload and extracts its text off the async runtime. A panic in
/// the PDF parser surfaces as an extraction error.
async fn extract_upload(state: &AppState, multipart: Multipart) -> Result<ResumeDocument, AppError> {
    let (file_name, raw) = read_resume_field(multipart).await?;
    info!("Received upload '{file_name}'");

    let pdf = Arc::clone(&state.pdf);
    let max_bytes = state.config.max_upload_bytes;
    let document = tokio::task::spawn_blocking(move || {
        extract_document(&file_name, raw, max_bytes, pdf.as_ref())
    })
    .await
    .map_err(|e| ExtractionError::Pdf(format!("parser aborted: {e}")))??;

    info!(
        "Extracted {} characters from '{}' ({:?}, {} bytes)",
        document.text.chars().count(),
        document.file_name,
        document.format,
        document.byte_len
    );
    Ok(document)
}

/// Reloads the skill vocabulary and runs the analysis pipeline.
async fn analyze_text(state: &AppState, text: String) -> Result<Arc<AnalysisReport>, AppError> {
    let skills_path = state.config.skills_path.clone();
    let corrector = Arc::clone(&state.corrector);
    let max_terms = state.config.wordcloud_max_words;

    let report = tokio::task::spawn_blocking(move || {
        let vocabulary = SkillVocabulary::load(&skills_path)?;
        Ok::<_, analysis::skills::VocabularyError>(analysis::analyze(
            &text,
            &vocabulary,
            corrector.as_ref(),
            max_terms,
        ))
    })
    .await
    .context("analysis task failed")?
    .map_err(|e| AppError::Configuration(e.to_string()))?;

    Ok(Arc::new(report))
}
