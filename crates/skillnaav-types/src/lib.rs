//! # SkillNaav Types
//!
//! Validated primitive types shared across the SkillNaav crates.
//!
//! Each type enforces its invariant at construction so that downstream code (prompt
//! building, HTTP handlers, the CLI) never has to re-check it.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// Errors raised when constructing a validated type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    /// The input was empty or contained only whitespace.
    #[error("text cannot be empty")]
    Empty,
    /// The input is not one of `easy`, `medium` or `hard`.
    #[error("unknown difficulty '{0}' (expected easy, medium or hard)")]
    UnknownDifficulty(String),
    /// The input is not a positive whole number of minutes.
    #[error("duration must be a positive whole number of minutes, got '{0}'")]
    InvalidDuration(String),
}

/// Text that holds at least one non-whitespace character.
///
/// Leading and trailing whitespace is stripped on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Trims `input` and wraps it, rejecting blank input with [`TypeError::Empty`].
    pub fn new(input: impl AsRef<str>) -> Result<Self, TypeError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TypeError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NonEmptyText::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Difficulty level requested for a generated assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = TypeError;

    /// Parses a difficulty, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(TypeError::UnknownDifficulty(s.trim().to_owned())),
        }
    }
}

/// Length of an assessment in whole minutes. Always greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DurationMinutes(NonZeroU32);

impl DurationMinutes {
    /// Wraps a minute count, rejecting zero.
    pub fn new(minutes: u32) -> Result<Self, TypeError> {
        NonZeroU32::new(minutes)
            .map(Self)
            .ok_or_else(|| TypeError::InvalidDuration(minutes.to_string()))
    }

    pub fn get(&self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for DurationMinutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DurationMinutes {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let minutes: u32 = trimmed
            .parse()
            .map_err(|_| TypeError::InvalidDuration(trimmed.to_owned()))?;
        Self::new(minutes)
    }
}

impl serde::Serialize for DurationMinutes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u32(self.get())
    }
}

impl<'de> serde::Deserialize<'de> for DurationMinutes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let minutes = u32::deserialize(deserializer)?;
        DurationMinutes::new(minutes).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_text_trims_input() {
        let text = NonEmptyText::new("  Rust ownership \n").expect("valid text");
        assert_eq!(text.as_str(), "Rust ownership");
        assert_eq!(text.to_string(), "Rust ownership");
    }

    #[test]
    fn test_non_empty_text_rejects_blank_input() {
        assert_eq!(NonEmptyText::new(""), Err(TypeError::Empty));
        assert_eq!(NonEmptyText::new(" \t\n"), Err(TypeError::Empty));
    }

    #[test]
    fn test_non_empty_text_deserialize_rejects_blank() {
        let err = serde_json::from_str::<NonEmptyText>("\"   \"").expect_err("should reject");
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_difficulty_parses_case_insensitively() {
        assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!(" Medium ".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
    }

    #[test]
    fn test_difficulty_rejects_unknown_level() {
        let err = "expert".parse::<Difficulty>().expect_err("should reject");
        assert_eq!(err, TypeError::UnknownDifficulty("expert".into()));
    }

    #[test]
    fn test_difficulty_serialises_lowercase() {
        let json = serde_json::to_string(&Difficulty::Medium).expect("serialise");
        assert_eq!(json, "\"medium\"");
    }

    #[test]
    fn test_duration_parses_positive_minutes() {
        let duration: DurationMinutes = " 30 ".parse().expect("valid duration");
        assert_eq!(duration.get(), 30);
    }

    #[test]
    fn test_duration_rejects_zero_negative_and_text() {
        assert!(DurationMinutes::new(0).is_err());
        assert!("0".parse::<DurationMinutes>().is_err());
        assert!("-5".parse::<DurationMinutes>().is_err());
        assert!("ten".parse::<DurationMinutes>().is_err());
        assert!("".parse::<DurationMinutes>().is_err());
    }
}
