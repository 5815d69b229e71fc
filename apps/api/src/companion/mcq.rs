//! Structural checks on generated MCQ text and answer keys.
//!
//! The model is asked for a fixed layout; these functions report how well a
//! reply follows it. They never reject a reply.

use serde::Serialize;

pub const EXPECTED_QUESTIONS: usize = 10;
pub const OPTION_LETTERS: [char; 4] = ['a', 'b', 'c', 'd'];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionSetReport {
    pub conforms: bool,
    pub question_count: usize,
    pub problems: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerKeyEntry {
    pub question: u32,
    pub letter: char,
}

#[derive(Debug, PartialEq)]
enum Line<'a> {
    Question(u32),
    Option(char),
    /// `3. B` or `Answer: B`: the answer leaked into the question set.
    AnswerLeak(&'a str),
    Other,
}

/// Drops Markdown emphasis and list bullets around a line.
fn normalize(line: &str) -> String {
    let stripped = line.replace("**", "").replace("__", "");
    let trimmed = stripped.trim();
    trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}

/// Splits `12. rest` / `12) rest` into `(12, "rest")`.
fn split_number(line: &str) -> Option<(u32, &str)> {
    let digits_end = line
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)?;
    if digits_end == 0 {
        return None;
    }
    let number = line[..digits_end].parse().ok()?;
    let rest = &line[digits_end..];
    let rest = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')'))?;
    Some((number, rest.trim()))
}

/// Parses `a. text`, `A) text`, `(b) text`. Returns the lowercase letter.
fn split_option(line: &str) -> Option<(char, &str)> {
    let line = line.strip_prefix('(').unwrap_or(line);
    let mut chars = line.chars();
    let letter = chars.next()?.to_ascii_lowercase();
    if !OPTION_LETTERS.contains(&letter) {
        return None;
    }
    let rest = chars.as_str();
    let rest = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')'))?;
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some((letter, rest.trim()))
}

fn lone_letter(rest: &str) -> Option<char> {
    let rest = rest.trim().trim_end_matches(['.', ')']);
    let mut chars = rest.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Some(c.to_ascii_uppercase()),
        _ => None,
    }
}

fn classify_line(line: &str) -> Line<'_> {
    if line.to_ascii_lowercase().starts_with("answer") && line.contains(':') {
        return Line::AnswerLeak(line);
    }
    if let Some((number, rest)) = split_number(line) {
        return match lone_letter(rest) {
            Some(_) => Line::AnswerLeak(line),
            None => Line::Question(number),
        };
    }
    if let Some((letter, _)) = split_option(line) {
        return Line::Option(letter);
    }
    Line::Other
}

fn close_question(number: usize, options: &mut Vec<char>, problems: &mut Vec<String>) {
    if number > 0 && options.as_slice() != OPTION_LETTERS.as_slice() {
        problems.push(format!(
            "question {number} has options {:?}, expected a-d",
            options.iter().collect::<String>()
        ));
    }
    options.clear();
}

/// Checks `text` against the MCQ layout: exactly ten questions numbered
/// 1..=10, each followed by options a–d in order, and no answers.
///
/// Lines that are neither questions nor options (a preamble, a wrapped
/// question) are ignored.
pub fn classify_question_set(text: &str) -> QuestionSetReport {
    let mut problems = Vec::new();
    let mut question_count = 0usize;
    // Options seen for the current question.
    let mut options: Vec<char> = Vec::new();

    for raw in text.lines() {
        let line = normalize(raw);
        if line.is_empty() {
            continue;
        }
        match classify_line(&line) {
            Line::Question(number) => {
                close_question(question_count, &mut options, &mut problems);
                question_count += 1;
                if number as usize != question_count {
                    problems.push(format!(
                        "question numbered {number} where {question_count} was expected"
                    ));
                }
            }
            Line::Option(letter) => {
                if question_count == 0 {
                    problems.push(format!("option '{letter}' before any question"));
                } else {
                    options.push(letter);
                }
            }
            Line::AnswerLeak(leak) => problems.push(format!("answer included: '{leak}'")),
            Line::Other => {}
        }
    }
    close_question(question_count, &mut options, &mut problems);

    if question_count != EXPECTED_QUESTIONS {
        problems.push(format!(
            "found {question_count} questions, expected {EXPECTED_QUESTIONS}"
        ));
    }

    QuestionSetReport {
        conforms: problems.is_empty(),
        question_count,
        problems,
    }
}

/// Extracts `(question, letter)` pairs from `1. A` style lines.
/// Letters are returned uppercase; unparseable lines are skipped.
pub fn parse_answer_key(text: &str) -> Vec<AnswerKeyEntry> {
    text.lines()
        .filter_map(|raw| {
            let line = normalize(raw);
            let (question, rest) = split_number(&line)?;
            let mut chars = rest.chars();
            let letter = chars.next()?.to_ascii_uppercase();
            if !('A'..='D').contains(&letter) {
                return None;
            }
            // "1. A" or "1. A) Paris", but not "1. Apple".
            if chars.next().is_some_and(|c| c.is_alphanumeric()) {
                return None;
            }
            Some(AnswerKeyEntry { question, letter })
        })
        .collect()
}
