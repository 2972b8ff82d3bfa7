//! Free-text field extractors.
//!
//! Each extractor scans an arbitrary text fragment for one field. Absence of
//! a match is a normal outcome, reported as `None`; extractors never fail.

use regex::Regex;

/// First `H:MM`/`HH:MM` occurrence, verbatim.
pub fn extract_time(text: &str) -> Option<String> {
    let re = Regex::new(r"\d{1,2}:\d{2}").unwrap();
    re.find(text).map(|m| m.as_str().to_string())
}

/// Distance in meters, normalized to a bare `m` suffix: "1400 m" -> "1400m".
pub fn extract_distance(text: &str) -> Option<String> {
    let re = Regex::new(r"(?i)(\d+)\s*m").unwrap();
    re.captures(text).map(|caps| format!("{}m", &caps[1]))
}

/// Prize amount with its currency token, verbatim, so the display layer can
/// re-render the source string. Accepts thousands separators and matches
/// "zł"/"PLN" case-insensitively.
pub fn extract_prize(text: &str) -> Option<String> {
    let re = Regex::new(r"(?i)(\d+[\s,]*\d*)\s*(zł|PLN)").unwrap();
    re.find(text).map(|m| m.as_str().to_string())
}
