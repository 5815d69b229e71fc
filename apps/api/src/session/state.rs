use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Summary,
    QuestionSet,
    AnswerKey,
}

/// Everything one user's session remembers between interactions.
///
/// Invariants:
/// - new source text invalidates every derived artifact
/// - a question set and its answer key are coupled: replacing the questions
///   clears the key and hides answers
#[derive(Debug, Clone)]
pub struct SessionState {
    pub text: String,
    pub summary: String,
    pub question_set: String,
    pub answer_key: String,
    pub answers_visible: bool,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl Default for SessionState {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            text: String::new(),
            summary: String::new(),
            question_set: String::new(),
            answer_key: String::new(),
            answers_visible: false,
            created_at: now,
            last_active: now,
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_text(&self) -> bool {
        !self.text.is_empty()
    }

    pub fn has_question_set(&self) -> bool {
        !self.question_set.is_empty()
    }

    /// Replaces the source text. Returns `false` (and touches nothing) when
    /// the text is unchanged.
    pub fn set_text(&mut self, new_text: impl Into<String>) -> bool {
        let new_text = new_text.into();
        if new_text == self.text {
            return false;
        }
        self.text = new_text;
        self.summary.clear();
        self.question_set.clear();
        self.answer_key.clear();
        self.answers_visible = false;
        true
    }

    pub fn set_artifact(&mut self, kind: ArtifactKind, value: impl Into<String>) {
        let value = value.into();
        match kind {
            ArtifactKind::Summary => self.summary = value,
            ArtifactKind::AnswerKey => self.answer_key = value,
            ArtifactKind::QuestionSet => {
                self.question_set = value;
                self.answer_key.clear();
                self.answers_visible = false;
            }
        }
    }

    pub fn artifact(&self, kind: ArtifactKind) -> &str {
        match kind {
            ArtifactKind::Summary => &self.summary,
            ArtifactKind::QuestionSet => &self.question_set,
            ArtifactKind::AnswerKey => &self.answer_key,
        }
    }

    /// No-op when there are no questions to show answers for.
    pub fn toggle_answers_visible(&mut self) {
        if self.has_question_set() {
            self.answers_visible = !self.answers_visible;
        }
    }

    /// Hides answers but keeps the key cached for the next reveal.
    pub fn hide_answers(&mut self) {
        self.answers_visible = false;
    }

    pub fn touch(&mut self) {
        self.last_active = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated() -> SessionState {
        let mut state = SessionState::new();
        state.set_text("chapter one");
        state.set_artifact(ArtifactKind::Summary, "summary");
        state.set_artifact(ArtifactKind::QuestionSet, "questions");
        state.set_artifact(ArtifactKind::AnswerKey, "1. A");
        state.answers_visible = true;
        state
    }

    #[test]
    fn test_new_session_is_empty() {
        let state = SessionState::new();
        assert!(state.text.is_empty());
        assert!(state.summary.is_empty());
        assert!(state.question_set.is_empty());
        assert!(state.answer_key.is_empty());
        assert!(!state.answers_visible);
    }

    #[test]
    fn test_new_text_invalidates_everything() {
        let mut state = populated();
        assert!(state.set_text("chapter two"));
        assert_eq!(state.text, "chapter two");
        assert_eq!(state.summary, "");
        assert_eq!(state.question_set, "");
        assert_eq!(state.answer_key, "");
        assert!(!state.answers_visible);
    }

    #[test]
    fn test_same_text_is_noop() {
        let mut state = populated();
        assert!(!state.set_text("chapter one"));
        assert_eq!(state.summary, "summary");
        assert_eq!(state.question_set, "questions");
        assert_eq!(state.answer_key, "1. A");
        assert!(state.answers_visible);
    }

    #[test]
    fn test_new_question_set_clears_answer_key() {
        let mut state = populated();
        state.set_artifact(ArtifactKind::QuestionSet, "other questions");
        assert_eq!(state.question_set, "other questions");
        assert_eq!(state.answer_key, "");
        assert!(!state.answers_visible);
        assert_eq!(state.summary, "summary");
    }

    #[test]
    fn test_other_artifacts_do_not_cascade() {
        let mut state = populated();
        state.set_artifact(ArtifactKind::Summary, "shorter summary");
        assert_eq!(state.answer_key, "1. A");
        assert!(state.answers_visible);
        assert_eq!(state.artifact(ArtifactKind::Summary), "shorter summary");
    }

    #[test]
    fn test_toggle_requires_question_set() {
        let mut state = SessionState::new();
        state.toggle_answers_visible();
        assert!(!state.answers_visible);

        state.set_artifact(ArtifactKind::QuestionSet, "q");
        state.toggle_answers_visible();
        assert!(state.answers_visible);
        state.toggle_answers_visible();
        assert!(!state.answers_visible);
    }

    #[test]
    fn test_hide_keeps_answer_key() {
        let mut state = populated();
        state.hide_answers();
        assert!(!state.answers_visible);
        assert_eq!(state.answer_key, "1. A");
    }
}
