//! Event dispatch: one call per user interaction.
//!
//! Every upload, button press or submitted question becomes an `Event` and
//! is handled against the session exactly once. The session already holds
//! anything produced earlier, so repeated events skip redundant work.

use std::io::Cursor;

use tracing::{info, warn};

use crate::companion::orchestrator::{self, Models};
use crate::errors::AppError;
use crate::ingest::{extract_text, Document};
use crate::llm_client::Inference;
use crate::session::state::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Summarize,
    GenerateQuestions,
    RevealAnswers,
    HideAnswers,
    ToggleAnswers,
    ReviewResume,
}

#[derive(Debug)]
pub enum Event {
    FileUploaded(Document),
    ButtonPressed(Action),
    TextSubmitted(String),
}

/// What a single event produced besides the session mutations.
/// `answer` and `review` are transient and never stored in the session.
#[derive(Debug, Default, PartialEq)]
pub struct Outcome {
    pub notice: Option<String>,
    pub answer: Option<String>,
    pub review: Option<String>,
}

pub async fn handle(
    event: Event,
    state: &mut SessionState,
    llm: &dyn Inference,
    models: &Models,
) -> Result<Outcome, AppError> {
    state.touch();
    match event {
        Event::FileUploaded(document) => ingest_document(document, state).await,
        Event::TextSubmitted(question) => {
            let answer = orchestrator::answer_question(state, &question, llm, models).await?;
            Ok(Outcome {
                answer,
                ..Outcome::default()
            })
        }
        Event::ButtonPressed(action) => match action {
            Action::Summarize => {
                orchestrator::summarize(state, llm, models).await?;
                Ok(Outcome::default())
            }
            Action::GenerateQuestions => {
                orchestrator::generate_questions(state, llm, models).await?;
                Ok(Outcome::default())
            }
            Action::RevealAnswers => {
                orchestrator::reveal_answers(state, llm, models).await?;
                Ok(Outcome::default())
            }
            Action::HideAnswers => {
                orchestrator::hide_answers(state);
                Ok(Outcome::default())
            }
            Action::ToggleAnswers => {
                orchestrator::toggle_answers(state, llm, models).await?;
                Ok(Outcome::default())
            }
            Action::ReviewResume => {
                let review = orchestrator::review_resume(state, llm, models).await?;
                Ok(Outcome {
                    review: Some(review),
                    ..Outcome::default()
                })
            }
        },
    }
}

/// Extracts the document and stores its text if it changed.
///
/// Failure clears the text slot rather than leaving the previous
/// document's text in place.
async fn ingest_document(document: Document, state: &mut SessionState) -> Result<Outcome, AppError> {
    let kind = document.kind().ok_or_else(|| {
        AppError::Validation(format!(
            "Unsupported file type for '{}'. Upload a PDF or DOCX.",
            document.name
        ))
    })?;

    let name = document.name;
    let bytes = document.bytes;
    let extracted = tokio::task::spawn_blocking(move || {
        let mut cursor = Cursor::new(bytes);
        extract_text(&mut cursor, kind)
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))?;

    let text = match extracted {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => {
            state.set_text("");
            return Err(AppError::Extraction(format!("'{name}' produced no text")));
        }
        Err(e) => {
            warn!(file = %name, error = %e, "Document extraction failed");
            state.set_text("");
            return Err(AppError::Extraction(format!("'{name}': {e}")));
        }
    };

    let changed = state.set_text(text);
    info!(file = %name, ?kind, changed, text_len = state.text.len(), "Document ingested");

    Ok(Outcome {
        notice: changed.then(|| {
            format!("File '{name}' uploaded and text stored. You can now generate content.")
        }),
        ..Outcome::default()
    })
}
