//! Constants used throughout the SkillNaav core crate.
//!
//! Prompt layout, parser markers and upstream defaults live here so the prompt builder,
//! the parser and the configuration agree on the same values.

/// Number of questions every generated assessment asks for.
pub const QUESTION_COUNT: usize = 5;

/// Number of labelled options requested per question.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// Literal marker that introduces the correct-answer line of a block.
pub const CORRECT_ANSWER_MARKER: &str = "Correct Answer:";

/// System message sent ahead of the assessment prompt.
pub const SYSTEM_MESSAGE: &str = "You are a helpful assistant.";

/// Default chat-completion endpoint.
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default completion model.
pub const DEFAULT_MODEL: &str = "gpt-4";

/// Default upper bound on completion tokens.
pub const DEFAULT_MAX_TOKENS: u32 = 2048;

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default bound on a single upstream call, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Environment variable holding the upstream bearer token.
pub const ENV_API_KEY: &str = "OPENAI_API_KEY";

/// Environment variable overriding the chat-completion endpoint.
pub const ENV_API_URL: &str = "OPENAI_API_URL";

/// Environment variable overriding the completion model.
pub const ENV_MODEL: &str = "OPENAI_MODEL";

/// Environment variable overriding the completion token bound.
pub const ENV_MAX_TOKENS: &str = "OPENAI_MAX_TOKENS";

/// Environment variable overriding the sampling temperature.
pub const ENV_TEMPERATURE: &str = "OPENAI_TEMPERATURE";

/// Environment variable overriding the upstream timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "OPENAI_TIMEOUT_SECS";
