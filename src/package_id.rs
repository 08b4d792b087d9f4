//! Package-identifier validation
//!
//! The packaging pipeline requires reverse-domain identifiers of the form
//! `com.example.app`: at least three dot-separated segments, each starting
//! with a letter. This is the subset the app stores on every target platform
//! accept, so one rule set covers them all.

use regex_lite::Regex;

use crate::diagnostics::Diagnostics;

/// Validate a candidate package identifier, reporting rejections to the sink.
///
/// Returns true if `candidate` is usable as the manifest's package ID.
pub fn validate(candidate: &str, sink: &dyn Diagnostics) -> bool {
    if candidate.is_empty() {
        sink.error("Package ID must not be empty");
        return false;
    }

    let segments: Vec<&str> = candidate.split('.').collect();
    if segments.len() < 3 {
        sink.error(&format!(
            "Package ID '{}' must have at least three dot-separated segments (e.g. com.example.app)",
            candidate
        ));
        return false;
    }

    // Pattern: a segment starts with a letter and continues with letters,
    // digits, or underscores
    let segment_re = Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]*$").unwrap();
    for segment in segments {
        if !segment_re.is_match(segment) {
            sink.error(&format!(
                "Package ID '{}': segment '{}' must start with a letter and contain only letters, digits, and underscores",
                candidate, segment
            ));
            return false;
        }
    }

    true
}
