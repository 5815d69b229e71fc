use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::companion::dispatch::{handle, Action, Event};
use crate::errors::AppError;
use crate::ingest::Document;
use crate::models::session::{EventResponse, SessionView};
use crate::state::AppState;

const FILE_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}

/// Runs one event against a session while holding its lock, then snapshots it.
async fn dispatch(state: &AppState, id: Uuid, event: Event) -> Result<Json<EventResponse>, AppError> {
    let mut session = state
        .sessions
        .lock(id)
        .await
        .ok_or_else(|| session_not_found(id))?;

    let outcome = handle(event, &mut session, state.llm.as_ref(), &state.models).await?;

    Ok(Json(EventResponse {
        session: SessionView::from_state(id, &session),
        notice: outcome.notice,
        answer: outcome.answer,
        review: outcome.review,
    }))
}

/// Oversized bodies surface here as a read failure; report them against the cap.
fn upload_error(e: MultipartError, max_upload_bytes: usize) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(max_upload_bytes)
    } else {
        AppError::Validation(format!("Failed to read upload: {e}"))
    }
}

async fn press(state: &AppState, id: Uuid, action: Action) -> Result<Json<EventResponse>, AppError> {
    dispatch(state, id, Event::ButtonPressed(action)).await
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionView>) {
    let (id, session_entry) = state.sessions.create().await;
    let session = session_entry.lock().await;
    let live = state.sessions.len().await;
    info!(session_id = %id, live, "Session started");
    (StatusCode::CREATED, Json(SessionView::from_state(id, &session)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = state
        .sessions
        .lock(id)
        .await
        .ok_or_else(|| session_not_found(id))?;
    Ok(Json(SessionView::from_state(id, &session)))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(session_not_found(id))
    }
}

/// POST /api/v1/sessions/:id/document
///
/// Multipart upload; the document is read from the `file` field.
/// Anything other than PDF or DOCX is refused before the session is touched.
pub async fn handle_upload_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<EventResponse>, AppError> {
    let max_upload_bytes = state.config.max_upload_bytes;
    let mut document = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_error(e, max_upload_bytes))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| upload_error(e, max_upload_bytes))?;
        document = Some(Document::new(name, content_type, bytes));
        break;
    }

    let document = document
        .ok_or_else(|| AppError::Validation(format!("Missing multipart field '{FILE_FIELD}'")))?;
    if document.kind().is_none() {
        return Err(AppError::Validation(format!(
            "Unsupported file type for '{}'. Upload a PDF or DOCX.",
            document.name
        )));
    }

    info!(session_id = %id, file = %document.name, size = document.bytes.len(), "Document received");
    dispatch(&state, id, Event::FileUploaded(document)).await
}

/// POST /api/v1/sessions/:id/summary
pub async fn handle_summarize(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EventResponse>, AppError> {
    press(&state, id, Action::Summarize).await
}

/// POST /api/v1/sessions/:id/questions
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EventResponse>, AppError> {
    press(&state, id, Action::GenerateQuestions).await
}

/// POST /api/v1/sessions/:id/answers/reveal
pub async fn handle_reveal_answers(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EventResponse>, AppError> {
    press(&state, id, Action::RevealAnswers).await
}

/// POST /api/v1/sessions/:id/answers/hide
pub async fn handle_hide_answers(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EventResponse>, AppError> {
    press(&state, id, Action::HideAnswers).await
}

/// POST /api/v1/sessions/:id/answers/toggle
pub async fn handle_toggle_answers(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EventResponse>, AppError> {
    press(&state, id, Action::ToggleAnswers).await
}

/// POST /api/v1/sessions/:id/ask
///
/// The answer comes back in the response only; it is not kept in the session.
pub async fn handle_ask(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AskRequest>,
) -> Result<Json<EventResponse>, AppError> {
    dispatch(&state, id, Event::TextSubmitted(req.question)).await
}

/// POST /api/v1/sessions/:id/review
pub async fn handle_review_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EventResponse>, AppError> {
    press(&state, id, Action::ReviewResume).await
}
