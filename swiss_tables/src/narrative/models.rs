//! Payload types exchanged with a narrative generator.

use serde::{Deserialize, Serialize};

/// Structured prompt for the narrative generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeRequest {
    /// Prompt text describing the tournament situation
    pub context: String,
    /// Persona or tone instruction
    pub system_instruction: Option<String>,
    /// Whether the generator may ground its answer with web search
    pub use_search: bool,
}

impl NarrativeRequest {
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            system_instruction: None,
            use_search: false,
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn with_search(mut self) -> Self {
        self.use_search = true;
        self
    }
}

/// A cited source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub uri: String,
    pub title: String,
}

/// Generated text plus any sources it cites
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeReport {
    pub text: String,
    pub sources: Vec<Citation>,
}

/// What the caller gets back: never an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NarrativeOutcome {
    Generated(NarrativeReport),
    /// Every attempt failed; `message` is meant for the user
    Degraded { message: String },
}

impl NarrativeOutcome {
    /// Text to show the user either way
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Generated(report) => &report.text,
            Self::Degraded { message } => message,
        }
    }

    #[must_use]
    pub fn sources(&self) -> &[Citation] {
        match self {
            Self::Generated(report) => &report.sources,
            Self::Degraded { .. } => &[],
        }
    }

    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }
}
