//! Per-field validation rules
//!
//! The manifest document is duck-typed JSON, so every recognized field is
//! resolved once at load time by a pure validator `(raw value) -> FieldState`.
//! The loader maps each state to the field's diagnostic; the validators
//! themselves never report.

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Digit counts of the five hyphen-separated groups in a Windows update ID
pub const UPDATE_ID_GROUP_LENGTHS: [usize; 5] = [8, 4, 4, 4, 12];

/// Outcome of validating one raw manifest value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldState<T> {
    /// The key is not present in the document
    Absent,
    /// The key is present but the value failed its rule
    Invalid,
    /// The value passed its rule
    Valid(T),
}

impl<T> FieldState<T> {
    /// The validated value, if any
    pub fn into_valid(self) -> Option<T> {
        match self {
            FieldState::Valid(value) => Some(value),
            _ => None,
        }
    }

    /// True if the key was present but rejected
    pub fn is_invalid(&self) -> bool {
        matches!(self, FieldState::Invalid)
    }
}

/// Display mode of the packaged application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Hide all system chrome
    Fullscreen,
    /// Regular app window
    #[default]
    Standalone,
}

impl DisplayMode {
    /// Manifest representation of the mode
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Fullscreen => "fullscreen",
            DisplayMode::Standalone => "standalone",
        }
    }
}

/// Check a dotted application version string.
///
/// Accepts one to three dot-separated decimal components; every component
/// before the last must be below 100, the last below 1000.
pub fn is_valid_version(version: &str) -> bool {
    // Pattern: one to three dot-separated runs of decimal digits
    let grammar = Regex::new(r"^([0-9]+\.){0,2}[0-9]+$").unwrap();
    if !grammar.is_match(version) {
        return false;
    }

    let parts: Vec<&str> = version.split('.').collect();
    for (i, part) in parts.iter().enumerate() {
        let limit = if i + 1 == parts.len() { 1000 } else { 100 };
        // Overflow on parse means the component is far out of range
        match part.parse::<u64>() {
            Ok(value) if value < limit => {}
            _ => return false,
        }
    }
    true
}

/// Check a Windows update identifier.
///
/// Five hyphen-separated groups of exactly {8,4,4,4,12} decimal digits.
pub fn is_valid_update_id(id: &str) -> bool {
    let groups: Vec<&str> = id.split('-').collect();
    if groups.len() != UPDATE_ID_GROUP_LENGTHS.len() {
        return false;
    }
    groups
        .iter()
        .zip(UPDATE_ID_GROUP_LENGTHS.iter())
        .all(|(group, len)| group.len() == *len && group.bytes().all(|b| b.is_ascii_digit()))
}

/// Validate the application version field
pub fn version(raw: Option<&Value>) -> FieldState<String> {
    match raw {
        None => FieldState::Absent,
        Some(Value::String(s)) if is_valid_version(s) => FieldState::Valid(s.clone()),
        Some(_) => FieldState::Invalid,
    }
}

/// Validate the Windows update identifier field
pub fn update_id(raw: Option<&Value>) -> FieldState<String> {
    match raw {
        None => FieldState::Absent,
        Some(Value::String(s)) if is_valid_update_id(s) => FieldState::Valid(s.clone()),
        Some(_) => FieldState::Invalid,
    }
}

/// Validate the display-mode field
pub fn display(raw: Option<&Value>) -> FieldState<DisplayMode> {
    match raw {
        None => FieldState::Absent,
        Some(value) => match serde_json::from_value::<DisplayMode>(value.clone()) {
            Ok(mode) => FieldState::Valid(mode),
            Err(_) => FieldState::Invalid,
        },
    }
}

/// Coerce an Android boolean flag.
///
/// Boolean `true` and the literal string `"true"` count as set; everything
/// else, including an absent key, is false.
pub fn flag(raw: Option<&Value>) -> bool {
    match raw {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "true",
        _ => false,
    }
}

/// Validate a field whose value must be a string
pub fn string(raw: Option<&Value>) -> FieldState<String> {
    match raw {
        None => FieldState::Absent,
        Some(Value::String(s)) => FieldState::Valid(s.clone()),
        Some(_) => FieldState::Invalid,
    }
}

/// Validate a field whose value must be a non-empty string
pub fn non_empty_string(raw: Option<&Value>) -> FieldState<String> {
    match raw {
        None => FieldState::Absent,
        Some(Value::String(s)) if !s.is_empty() => FieldState::Valid(s.clone()),
        Some(_) => FieldState::Invalid,
    }
}
