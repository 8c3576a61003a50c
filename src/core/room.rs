//! Room code recognition

use regex::Regex;

use crate::utils::error::{ConversionError, ConversionResult};

/// Matches text that starts with one of the configured room prefixes
#[derive(Debug, Clone)]
pub struct RoomPattern {
    regex: Regex,
}

impl RoomPattern {
    pub fn from_prefixes<S: AsRef<str>>(prefixes: &[S]) -> ConversionResult<Self> {
        let alternatives: Vec<String> = prefixes
            .iter()
            .map(|p| p.as_ref().trim())
            .filter(|p| !p.is_empty())
            .map(regex::escape)
            .collect();
        if alternatives.is_empty() {
            return Err(ConversionError::invalid("no room prefixes configured"));
        }
        let regex = Regex::new(&format!("^(?:{})", alternatives.join("|")))
            .map_err(|e| ConversionError::invalid(format!("room pattern: {}", e)))?;
        Ok(RoomPattern { regex })
    }

    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text.trim_start())
    }
}
