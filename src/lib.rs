//! # Textprep: Regex Text Preprocessing
//!
//! Textprep cleans ordered collections of text with a sequence of regex
//! steps, and pulls out the text surrounding regex matches.
//!
//! ## Features
//!
//! - **Sequential pipeline**: strip, replace and lowercase steps applied to a
//!   whole collection, one step at a time, preserving order and length
//! - **Default cleanup**: symbol stripping, space collapsing, lowercasing and
//!   repeated-letter limiting in one call
//! - **Context extraction**: fixed-radius character windows around matches
//! - **YAML step lists**: load pipelines from config files
//! - **Adaptive regex**: backreferences and look-around are supported by
//!   falling back to a backtracking engine only when a pattern needs it
//!
//! ## Example: Step list
//!
//! ```yaml
//! steps:
//!   - lowercase
//!   - ", "
//!   - ['([a-z])\1\1+', '${1}${1}']
//! ```
//!
//! ## Example: Library
//!
//! ```ignore
//! use textprep::{apply_pipeline, extract_context, Step, StepList};
//!
//! let steps = StepList::Custom(vec![Step::lowercase(), Step::strip(", ")]);
//! let cleaned = apply_pipeline(["The quick brown fox, jumps"], &steps)?;
//!
//! let windows = extract_context("The quick brown fox jumps over the lazy dog", "fox", 10)?;
//! ```

pub mod error;
pub mod pattern;
pub mod step;
pub mod pipeline;
pub mod context;
pub mod config;

// Re-export key types
pub use error::PipelineError;
pub use pattern::{expand_template, Pattern};
pub use step::{default_steps, Step, StepList, UnsupportedStep};
pub use pipeline::{apply_pipeline, CompiledPipeline};
pub use context::{extract_context, ContextExtractor};
pub use config::{load_steps_from_file, parse_steps_yaml, LoadedSteps, SkippedStep};
