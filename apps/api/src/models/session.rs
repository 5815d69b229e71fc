use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::companion::mcq::{classify_question_set, parse_answer_key, AnswerKeyEntry};
use crate::session::state::{ArtifactKind, SessionState};

/// Read-only snapshot of a session for rendering.
/// The answer key is withheld while answers are hidden.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub has_text: bool,
    pub text_chars: usize,
    pub summary: Option<String>,
    pub question_set: Option<String>,
    pub question_set_conforms: Option<bool>,
    pub answers_visible: bool,
    pub answer_key: Option<String>,
    pub answers: Vec<AnswerKeyEntry>,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

impl SessionView {
    pub fn from_state(session_id: Uuid, state: &SessionState) -> Self {
        let show_key = state.answers_visible && !state.answer_key.is_empty();
        Self {
            session_id,
            has_text: state.has_text(),
            text_chars: state.text.chars().count(),
            summary: non_empty(state.artifact(ArtifactKind::Summary)),
            question_set: non_empty(state.artifact(ArtifactKind::QuestionSet)),
            question_set_conforms: state
                .has_question_set()
                .then(|| classify_question_set(&state.question_set).conforms),
            answers_visible: state.answers_visible,
            answer_key: show_key.then(|| state.answer_key.clone()),
            answers: if show_key {
                parse_answer_key(&state.answer_key)
            } else {
                Vec::new()
            },
            created_at: state.created_at,
            last_active: state.last_active,
        }
    }
}

/// Response to any session event.
#[derive(Debug, Clone, Serialize)]
pub struct EventResponse {
    pub session: SessionView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_key_hidden_until_visible() {
        let mut state = SessionState::new();
        state.set_text("material");
        state.set_artifact(ArtifactKind::QuestionSet, "1. Q?\na. w\nb. x\nc. y\nd. z");
        state.set_artifact(ArtifactKind::AnswerKey, "1. B");

        let view = SessionView::from_state(Uuid::nil(), &state);
        assert_eq!(view.answer_key, None);
        assert!(view.answers.is_empty());
        assert_eq!(view.question_set_conforms, Some(false));

        state.answers_visible = true;
        let view = SessionView::from_state(Uuid::nil(), &state);
        assert_eq!(view.answer_key.as_deref(), Some("1. B"));
        assert_eq!(view.answers.len(), 1);
        assert_eq!(view.answers[0].letter, 'B');
    }

    #[test]
    fn test_empty_session_view() {
        let view = SessionView::from_state(Uuid::nil(), &SessionState::new());
        assert!(!view.has_text);
        assert_eq!(view.summary, None);
        assert_eq!(view.question_set, None);
        assert_eq!(view.question_set_conforms, None);
    }
}
