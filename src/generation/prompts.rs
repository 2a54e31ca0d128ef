//! Prompt templates sent to the generation provider

/// Prompt asking for one quiz question on `subject` at `difficulty`.
pub fn quiz_question(subject: &str, difficulty: &str) -> String {
    format!("Generate a quiz question for {subject} at {difficulty} difficulty")
}

/// Prompt asking for a detailed answer; the user's text is embedded verbatim.
pub fn doubt_answer(doubt: &str) -> String {
    format!("Answer the following question in detail: {doubt}")
}
