//! Events that can occur in a dialogue

use crate::generation::GenerationResult;

/// Bot commands understood by the dialogue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Quiz,
    Doubt,
    Cancel,
    Points,
    /// Anything else starting with `/`
    Unknown(String),
}

impl Command {
    /// Commands advertised in the client's command menu
    pub const MENU: [(&'static str, &'static str); 5] = [
        ("start", "Show the welcome message"),
        ("quiz", "Start a quiz"),
        ("doubt", "Ask a question"),
        ("cancel", "Cancel the current quiz or question"),
        ("points", "Show your points"),
    ];

    /// Parse the text after the leading `/`.
    ///
    /// A `@botname` suffix and any arguments are dropped.
    fn parse(body: &str) -> Self {
        let word = body.split_whitespace().next().unwrap_or_default();
        let name = word.split('@').next().unwrap_or_default().to_lowercase();
        match name.as_str() {
            "start" => Command::Start,
            "quiz" => Command::Quiz,
            "doubt" => Command::Doubt,
            "cancel" => Command::Cancel,
            "points" => Command::Points,
            _ => Command::Unknown(name),
        }
    }
}

/// What a generation request was for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationPurpose {
    QuizQuestion,
    DoubtAnswer,
}

impl GenerationPurpose {
    pub fn as_str(self) -> &'static str {
        match self {
            GenerationPurpose::QuizQuestion => "quiz_question",
            GenerationPurpose::DoubtAnswer => "doubt_answer",
        }
    }
}

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // User events
    Command(Command),
    Text(String),

    // Generation events
    GenerationComplete {
        purpose: GenerationPurpose,
        result: GenerationResult,
    },
}

impl Event {
    /// Classify an inbound message as a command or free text
    pub fn from_message(text: &str) -> Self {
        match text.strip_prefix('/') {
            Some(body) => Event::Command(Command::parse(body)),
            None => Event::Text(text.to_string()),
        }
    }
}
