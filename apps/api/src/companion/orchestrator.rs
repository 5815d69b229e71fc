//! Prompt orchestrator: one function per user action.
//!
//! Each operation reads its inputs from the session, builds a fixed prompt,
//! makes one synchronous inference call and writes the result back. Results
//! are stored only after the call succeeds, so a failure leaves the session
//! exactly as it was.

use tracing::{info, warn};

use crate::companion::mcq::classify_question_set;
use crate::companion::prompts::{
    ANSWER_KEY_PROMPT_TEMPLATE, ANSWER_PROMPT_TEMPLATE, QUESTION_SET_PROMPT_TEMPLATE,
    RESUME_REVIEW_PROMPT_TEMPLATE, SUMMARY_PROMPT_TEMPLATE,
};
use crate::errors::AppError;
use crate::llm_client::prompts::{fill_template, truncate_chars, MATERIAL_CHAR_LIMIT};
use crate::llm_client::Inference;
use crate::session::state::{ArtifactKind, SessionState};

/// Model identifiers per program.
#[derive(Debug, Clone)]
pub struct Models {
    pub study: String,
    pub review: String,
}

fn material(state: &SessionState) -> Result<&str, AppError> {
    if !state.has_text() {
        return Err(AppError::MissingInput("text"));
    }
    Ok(truncate_chars(&state.text, MATERIAL_CHAR_LIMIT))
}

pub fn summary_prompt(material: &str) -> String {
    fill_template(SUMMARY_PROMPT_TEMPLATE, &[("material", material)])
}

pub fn question_set_prompt(material: &str) -> String {
    fill_template(QUESTION_SET_PROMPT_TEMPLATE, &[("material", material)])
}

pub fn answer_prompt(material: &str, question: &str) -> String {
    fill_template(
        ANSWER_PROMPT_TEMPLATE,
        &[("material", material), ("question", question)],
    )
}

pub fn answer_key_prompt(question_set: &str) -> String {
    fill_template(ANSWER_KEY_PROMPT_TEMPLATE, &[("question_set", question_set)])
}

pub fn resume_review_prompt(material: &str) -> String {
    fill_template(RESUME_REVIEW_PROMPT_TEMPLATE, &[("material", material)])
}

pub async fn summarize(
    state: &mut SessionState,
    llm: &dyn Inference,
    models: &Models,
) -> Result<(), AppError> {
    let prompt = summary_prompt(material(state)?);
    let summary = llm.generate(&models.study, &prompt).await?;
    info!(summary_len = summary.len(), "Summary generated");
    state.set_artifact(ArtifactKind::Summary, summary);
    Ok(())
}

pub async fn generate_questions(
    state: &mut SessionState,
    llm: &dyn Inference,
    models: &Models,
) -> Result<(), AppError> {
    let prompt = question_set_prompt(material(state)?);
    let question_set = llm.generate(&models.study, &prompt).await?;

    let report = classify_question_set(&question_set);
    if report.conforms {
        info!(questions = report.question_count, "Question set generated");
    } else {
        warn!(
            questions = report.question_count,
            problems = ?report.problems,
            "Question set does not follow the MCQ layout"
        );
    }

    state.set_artifact(ArtifactKind::QuestionSet, question_set);
    Ok(())
}

/// Answers one question from the material. The answer is returned to the
/// caller only; it is never written to the session.
///
/// Without material or with a blank question this does nothing.
pub async fn answer_question(
    state: &SessionState,
    question: &str,
    llm: &dyn Inference,
    models: &Models,
) -> Result<Option<String>, AppError> {
    let question = question.trim();
    if !state.has_text() || question.is_empty() {
        return Ok(None);
    }
    let prompt = answer_prompt(truncate_chars(&state.text, MATERIAL_CHAR_LIMIT), question);
    let answer = llm.generate(&models.study, &prompt).await?;
    Ok(Some(answer))
}

/// Shows the answer key, generating it only if it is not cached yet.
/// Without a question set this does nothing.
pub async fn reveal_answers(
    state: &mut SessionState,
    llm: &dyn Inference,
    models: &Models,
) -> Result<(), AppError> {
    if !state.has_question_set() {
        return Ok(());
    }
    if state.answer_key.is_empty() {
        let prompt = answer_key_prompt(&state.question_set);
        let answer_key = llm.generate(&models.study, &prompt).await?;
        info!(answer_key_len = answer_key.len(), "Answer key generated");
        state.set_artifact(ArtifactKind::AnswerKey, answer_key);
    }
    state.answers_visible = true;
    Ok(())
}

pub fn hide_answers(state: &mut SessionState) {
    state.hide_answers();
}

/// Hides visible answers, otherwise reveals them.
pub async fn toggle_answers(
    state: &mut SessionState,
    llm: &dyn Inference,
    models: &Models,
) -> Result<(), AppError> {
    if !state.answers_visible && state.answer_key.is_empty() {
        return reveal_answers(state, llm, models).await;
    }
    state.toggle_answers_visible();
    Ok(())
}

/// Recruiter-style review of the uploaded resume. Returned only, never stored.
pub async fn review_resume(
    state: &SessionState,
    llm: &dyn Inference,
    models: &Models,
) -> Result<String, AppError> {
    let prompt = resume_review_prompt(material(state)?);
    let review = llm.generate(&models.review, &prompt).await?;
    info!(review_len = review.len(), "Resume review generated");
    Ok(review)
}
