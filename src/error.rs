//! Error type shared by the pipeline, context extractor and config loader.

use std::fmt;

/// Error type for text preprocessing operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// A pattern was rejected by every regex engine
    Pattern { pattern: String, message: String },
    /// A compiled pattern failed while matching (backtrack limit and similar)
    Match { pattern: String, message: String },
    /// A step list document has the wrong structure
    Config(String),
    /// A file could not be read
    Io { path: String, message: String },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Pattern { pattern, message } => {
                write!(f, "Invalid pattern '{}': {}", pattern, message)
            }
            PipelineError::Match { pattern, message } => {
                write!(f, "Matching '{}' failed: {}", pattern, message)
            }
            PipelineError::Config(msg) => write!(f, "Config error: {}", msg),
            PipelineError::Io { path, message } => {
                write!(f, "Failed to read {}: {}", path, message)
            }
        }
    }
}

impl std::error::Error for PipelineError {}
