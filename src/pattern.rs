//! Adaptive regex compilation.
//!
//! Most cleanup patterns fit the linear-time [`regex`] engine. Patterns that
//! need backreferences or look-around (for example `([a-z])\1\1+`) are only
//! accepted by [`fancy_regex`], so compilation tries the basic engine first
//! and falls up to the backtracking one when the pattern requires it.

use std::borrow::Cow;
use std::fmt;

use crate::error::PipelineError;

/// Engine selected for a compiled pattern
#[derive(Clone)]
enum Engine {
    Basic(regex::Regex),
    Fancy(fancy_regex::Regex),
}

/// A compiled pattern that remembers its source text
#[derive(Clone)]
pub struct Pattern {
    source: String,
    engine: Engine,
}

impl Pattern {
    /// Compile `source`, preferring the basic engine.
    ///
    /// # Errors
    /// Returns `PipelineError::Pattern` when neither engine accepts the pattern.
    /// The message comes from the backtracking engine, which sees the full syntax.
    pub fn compile(source: &str) -> Result<Self, PipelineError> {
        let engine = match regex::Regex::new(source) {
            Ok(re) => Engine::Basic(re),
            Err(_) => {
                let re = fancy_regex::Regex::new(source).map_err(|e| PipelineError::Pattern {
                    pattern: source.to_string(),
                    message: e.to_string(),
                })?;
                Engine::Fancy(re)
            }
        };

        Ok(Self {
            source: source.to_string(),
            engine,
        })
    }

    /// The pattern text this was compiled from
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the backtracking engine was needed
    pub fn is_fancy(&self) -> bool {
        matches!(self.engine, Engine::Fancy(_))
    }

    /// Replace every non-overlapping match of the pattern in `text`.
    ///
    /// `template` may reference capture groups as `$1`, `${1}` or `${name}`.
    /// Run [`expand_template`] first to accept `\1` and `\g<name>` as well.
    pub fn replace_all<'t>(&self, text: &'t str, template: &str) -> Result<Cow<'t, str>, PipelineError> {
        match &self.engine {
            Engine::Basic(re) => Ok(re.replace_all(text, template)),
            Engine::Fancy(re) => re
                .try_replacen(text, 0, template)
                .map_err(|e| self.match_error(e)),
        }
    }

    /// Byte spans of all non-overlapping matches, left to right.
    pub fn find_spans(&self, text: &str) -> Result<Vec<(usize, usize)>, PipelineError> {
        match &self.engine {
            Engine::Basic(re) => Ok(re.find_iter(text).map(|m| (m.start(), m.end())).collect()),
            Engine::Fancy(re) => re
                .find_iter(text)
                .map(|m| m.map(|m| (m.start(), m.end())).map_err(|e| self.match_error(e)))
                .collect(),
        }
    }

    fn match_error(&self, err: fancy_regex::Error) -> PipelineError {
        PipelineError::Match {
            pattern: self.source.clone(),
            message: err.to_string(),
        }
    }
}

/// Rewrite backslash group references into the engines' `${..}` form.
///
/// `\1`..`\99` and `\g<name>` become `${1}`..`${99}` and `${name}`, and `\\`
/// becomes a single backslash. `$` references pass through untouched, as does
/// any other backslash.
pub fn expand_template(template: &str) -> String {
    let mut out = String::with_capacity(template.len() + 4);
    let mut rest = template;

    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let digits = after.bytes().take(2).take_while(u8::is_ascii_digit).count();

        if digits > 0 {
            out.push_str(&format!("${{{}}}", &after[..digits]));
            rest = &after[digits..];
        } else if let Some(name) = group_name(after) {
            out.push_str(&format!("${{{}}}", name));
            rest = &after[name.len() + 3..];
        } else if let Some(stripped) = after.strip_prefix('\\') {
            out.push('\\');
            rest = stripped;
        } else {
            out.push('\\');
            rest = after;
        }
    }

    out.push_str(rest);
    out
}

/// Name inside a leading `g<name>`, if closed and non-empty
fn group_name(after: &str) -> Option<&str> {
    let inner = after.strip_prefix("g<")?;
    let name = &inner[..inner.find('>')?];
    (!name.is_empty()).then_some(name)
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let engine = if self.is_fancy() { "fancy" } else { "basic" };
        f.debug_struct("Pattern")
            .field("source", &self.source)
            .field("engine", &engine)
            .finish()
    }
}
