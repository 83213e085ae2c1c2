// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Whole-word keyword matching.
//!
//! Keywords are treated as literals (all regex metacharacters escaped) and
//! wrapped in word boundaries, so `help` matches "help!" but not "helper",
//! and multi-word phrases like "good morning" match as a unit. Matching is
//! case-insensitive.

use regex::RegexBuilder;

use crate::error::VouchError;

/// A compiled keyword matcher.
///
/// Compile once per keyword and reuse across messages -- bulk scans
/// (keyword leaderboards) are O(messages) and should not recompile the
/// pattern per row.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keyword: String,
    pattern: regex::Regex,
}

impl KeywordMatcher {
    /// Compile a matcher for the given keyword.
    ///
    /// # Errors
    ///
    /// Returns `VouchError::Validation` if the keyword is empty or blank.
    pub fn new(keyword: &str) -> Result<Self, VouchError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(VouchError::Validation(
                "keyword must not be empty".to_string(),
            ));
        }
        let pattern = RegexBuilder::new(&format!(r"\b{}\b", regex::escape(keyword)))
            .case_insensitive(true)
            .build()
            .map_err(|e| VouchError::Internal(format!("keyword pattern failed to compile: {e}")))?;
        Ok(Self {
            keyword: keyword.to_string(),
            pattern,
        })
    }

    /// The keyword this matcher was compiled for (trimmed).
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Count whole-word occurrences of the keyword in `text`.
    pub fn count(&self, text: &str) -> usize {
        self.pattern.find_iter(text).count()
    }
}

/// Count whole-word occurrences of `keyword` in `text`.
///
/// Convenience wrapper for one-off counting; prefer [`KeywordMatcher`]
/// when scanning many messages with the same keyword.
pub fn count_occurrences(text: &str, keyword: &str) -> Result<usize, VouchError> {
    Ok(KeywordMatcher::new(keyword)?.count(text))
}

/// Format a keyword for display: first letter of each word uppercased.
pub fn display_name(keyword: &str) -> String {
    keyword
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
