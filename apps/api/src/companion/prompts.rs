// Prompt templates for the study and resume companion.
// Placeholders: {material}, {question}, {question_set}.

/// Revision summary. Replace `{material}`.
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"Summarize the following study material in a concise, easy-to-understand way.
Keep the key points, definitions, and explanations so the summary works for revision.

MATERIAL TO SUMMARIZE:
{material}"#;

/// Ten four-option MCQs, no answers. Replace `{material}`.
pub const QUESTION_SET_PROMPT_TEMPLATE: &str = r#"You are a helpful study companion.
Create exactly 10 multiple choice questions (MCQs) from the following material.

Use this format for every question:
1. question?
a. option A
b. option B
c. option C
d. option D

RULES:
1. Put the question and each option on separate lines
2. Every question has exactly 4 options, lettered a, b, c, d
3. Number the questions 1 to 10
4. You may use Markdown bold for the question line
5. Do NOT include the answers

MATERIAL TO CREATE MCQs FROM:
{material}"#;

/// Single question answered from the material only.
/// Replace `{material}` and `{question}`.
pub const ANSWER_PROMPT_TEMPLATE: &str = r#"Based ONLY on the study material provided below, answer the question clearly and concisely.
If the material does not contain the answer, say so instead of guessing.

STUDY MATERIAL:
{material}

QUESTION: {question}"#;

/// Answer key for an existing question set. Replace `{question_set}`.
pub const ANSWER_KEY_PROMPT_TEMPLATE: &str = r#"From the following MCQs, give only the correct option letter (A/B/C/D) for each question.
Return one line per question as a numbered list and nothing else.

MCQs:
{question_set}

Example format:
1. A
2. B
3. C
..."#;

/// Recruiter-style resume review. Replace `{material}`.
pub const RESUME_REVIEW_PROMPT_TEMPLATE: &str = r#"You are an expert resume reviewer and recruiter.
Review the following resume and suggest improvements for the job the candidate is applying for.

1. Give a short summary of the candidate.
2. Identify the candidate's key skills and suggest improvements to the weak sections.
3. Point out any missing details and suggest what to add.
4. Check the key details a recruiter looks for in a candidate for the role.
5. Provide an overall rating in the style of an ATS resume checker.
6. Give a rewritten version of the resume that applies your suggestions.

RESUME TEXT:
{material}"#;
