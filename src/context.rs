//! Context extraction around regex matches.
//!
//! Each match yields the matched text plus up to `radius` characters on
//! either side. Offsets count characters, not bytes, so a window never
//! splits a multi-byte character.

use std::iter;

use crate::error::PipelineError;
use crate::pattern::Pattern;

/// A compiled pattern reused across many texts
#[derive(Debug, Clone)]
pub struct ContextExtractor {
    pattern: Pattern,
}

impl ContextExtractor {
    pub fn new(pattern: &str) -> Result<Self, PipelineError> {
        Ok(Self {
            pattern: Pattern::compile(pattern)?,
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Windows around every non-overlapping match, in match order.
    ///
    /// The left edge is clamped to the start of the text when the match
    /// begins within `radius` characters of it. The right edge is cut at the
    /// end of the text.
    pub fn extract(&self, text: &str, radius: usize) -> Result<Vec<String>, PipelineError> {
        let spans = self.pattern.find_spans(text)?;
        if spans.is_empty() {
            return Ok(Vec::new());
        }

        // Byte offset of every character, plus the end of the text
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(iter::once(text.len()))
            .collect();
        let char_len = boundaries.len() - 1;
        let to_char = |byte: usize| boundaries.binary_search(&byte).unwrap_or_else(|i| i);

        tracing::debug!(
            "Pattern {:?} matched {} times in {} characters",
            self.pattern.as_str(),
            spans.len(),
            char_len
        );

        let windows = spans
            .into_iter()
            .map(|(start, end)| {
                let start = to_char(start);
                let end = to_char(end);
                let left = if start <= radius { 0 } else { start - radius };
                let right = end.saturating_add(radius).min(char_len);
                text[boundaries[left]..boundaries[right]].to_string()
            })
            .collect();

        Ok(windows)
    }
}

/// Extract up to `radius` characters around every match of `pattern`.
///
/// # Errors
/// Returns `PipelineError::Pattern` if `pattern` is invalid.
///
/// # Example
/// ```ignore
/// use textprep::extract_context;
///
/// let windows = extract_context("The quick brown fox jumps over the lazy dog", "fox", 10)?;
/// assert_eq!(windows, vec!["ick brown fox jumps ove"]);
/// ```
pub fn extract_context(text: &str, pattern: &str, radius: usize) -> Result<Vec<String>, PipelineError> {
    ContextExtractor::new(pattern)?.extract(text, radius)
}
