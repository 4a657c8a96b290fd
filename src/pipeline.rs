//! Sequential regex pipeline.
//!
//! Steps run in list order and each step transforms the whole collection
//! before the next one starts. Output order and length always match the input.

use once_cell::sync::Lazy;

use crate::error::PipelineError;
use crate::pattern::{expand_template, Pattern};
use crate::step::{default_steps, Step, StepList};

/// Replacement used by strip steps
const STRIP_REPLACEMENT: &str = " ";

static DEFAULT_PIPELINE: Lazy<CompiledPipeline> = Lazy::new(|| {
    CompiledPipeline::compile(&default_steps()).expect("default cleanup patterns must compile")
});

/// A step with its pattern compiled
#[derive(Debug, Clone)]
enum CompiledStep {
    Substitute { pattern: Pattern, template: String },
    Lowercase,
}

/// A step list compiled once and applied to any number of collections
#[derive(Debug, Clone)]
pub struct CompiledPipeline {
    steps: Vec<(Step, CompiledStep)>,
}

impl CompiledPipeline {
    /// Compile every pattern in `steps`.
    ///
    /// # Errors
    /// Returns `PipelineError::Pattern` for the first invalid pattern.
    pub fn compile(steps: &[Step]) -> Result<Self, PipelineError> {
        let steps = steps
            .iter()
            .map(|step| {
                let compiled = match step {
                    Step::Strip(pattern) => CompiledStep::Substitute {
                        pattern: Pattern::compile(pattern)?,
                        template: STRIP_REPLACEMENT.to_string(),
                    },
                    Step::Replace { pattern, template } => CompiledStep::Substitute {
                        pattern: Pattern::compile(pattern)?,
                        template: expand_template(template),
                    },
                    Step::Lowercase => CompiledStep::Lowercase,
                };
                Ok((step.clone(), compiled))
            })
            .collect::<Result<Vec<_>, PipelineError>>()?;

        Ok(Self { steps })
    }

    /// The shared compiled default cleanup
    pub fn default_cleanup() -> &'static CompiledPipeline {
        &DEFAULT_PIPELINE
    }

    /// Number of compiled steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether there are no steps to run
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps in execution order
    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter().map(|(step, _)| step)
    }

    /// Run every step over the whole collection.
    pub fn apply<I, S>(&self, texts: I) -> Result<Vec<String>, PipelineError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut texts: Vec<String> = texts.into_iter().map(|s| s.as_ref().to_string()).collect();

        for (index, (step, compiled)) in self.steps.iter().enumerate() {
            tracing::debug!(
                "Step {}: {} over {} texts",
                index,
                step.describe(),
                texts.len()
            );
            texts = texts
                .iter()
                .map(|text| run_step(compiled, text))
                .collect::<Result<Vec<_>, PipelineError>>()?;
        }

        Ok(texts)
    }

    /// Run every step over a single text.
    pub fn apply_one(&self, text: &str) -> Result<String, PipelineError> {
        let mut out = text.to_string();
        for (_, compiled) in &self.steps {
            out = run_step(compiled, &out)?;
        }
        Ok(out)
    }
}

fn run_step(step: &CompiledStep, text: &str) -> Result<String, PipelineError> {
    match step {
        CompiledStep::Substitute { pattern, template } => {
            Ok(pattern.replace_all(text, template)?.into_owned())
        }
        CompiledStep::Lowercase => Ok(text.to_lowercase()),
    }
}

/// Apply a step list to an ordered collection of texts.
///
/// [`StepList::Disabled`] returns the texts unchanged and
/// [`StepList::Default`] runs the built-in cleanup.
///
/// # Errors
/// Returns `PipelineError::Pattern` if any custom pattern is invalid.
///
/// # Example
/// ```ignore
/// use textprep::{apply_pipeline, StepList};
///
/// let out = apply_pipeline(["The quick brown fox, jumps!"], &StepList::Default)?;
/// assert_eq!(out, vec!["the quick brown fox jumps"]);
/// ```
pub fn apply_pipeline<I, S>(texts: I, steps: &StepList) -> Result<Vec<String>, PipelineError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    match steps {
        StepList::Disabled => Ok(texts.into_iter().map(|s| s.as_ref().to_string()).collect()),
        StepList::Default => DEFAULT_PIPELINE.apply(texts),
        StepList::Custom(steps) => CompiledPipeline::compile(steps)?.apply(texts),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cleanup_sentence() {
        let out = apply_pipeline(
            ["The quick brown fox, jumps over the lazy dog."],
            &StepList::Default,
        )
        .unwrap();

        assert_eq!(out, vec!["the quick brown fox jumps over the lazy dog"]);
    }

    #[test]
    fn test_default_cleanup_repeats() {
        let out = apply_pipeline(["AAaaa"], &StepList::Default).unwrap();

        assert_eq!(out, vec!["aa"]);
    }

    #[test]
    fn test_default_cleanup_keeps_apostrophe() {
        let out = apply_pipeline(["Don't   stop"], &StepList::Default).unwrap();

        assert_eq!(out, vec!["don't stop"]);
    }

    #[test]
    fn test_inner_spaces_survive_edge_trim() {
        let out = apply_pipeline([" (a) - b "], &StepList::Default).unwrap();

        assert_eq!(out, vec!["a b"]);
    }

    #[test]
    fn test_repeat_limit_ignores_digits() {
        let out = apply_pipeline(["1111 zzzz"], &StepList::Default).unwrap();

        assert_eq!(out, vec!["1111 zz"]);
    }

    #[test]
    fn test_disabled_is_identity() {
        let texts = vec!["A  b!".to_string(), String::new()];
        let out = apply_pipeline(&texts, &StepList::Disabled).unwrap();

        assert_eq!(out, texts);
    }

    #[test]
    fn test_custom_steps() {
        let steps = StepList::Custom(vec![
            Step::lowercase(),
            Step::strip(", "),
            Step::replace(r"([a-z])\1\1+", "${1}${1}"),
        ]);
        let out = apply_pipeline(
            ["The quick brown fox, jumps over the lazy dog.", "AAaaa"],
            &steps,
        )
        .unwrap();

        assert_eq!(out, vec!["the quick brown fox jumps over the lazy dog.", "aa"]);
    }

    #[test]
    fn test_backslash_group_template() {
        let steps = StepList::Custom(vec![
            Step::lowercase(),
            Step::strip(", "),
            Step::replace(r"([a-z])\1\1+", r"\1\1"),
        ]);
        let out = apply_pipeline(
            ["The quick brown fox, jumps over the lazy dog.", "AAaaa"],
            &steps,
        )
        .unwrap();

        assert_eq!(out, vec!["the quick brown fox jumps over the lazy dog.", "aa"]);
    }

    #[test]
    fn test_steps_run_in_order() {
        let upper_first = StepList::Custom(vec![Step::strip("[A-Z]"), Step::lowercase()]);
        let lower_first = StepList::Custom(vec![Step::lowercase(), Step::strip("[A-Z]")]);

        assert_eq!(apply_pipeline(["Ab"], &upper_first).unwrap(), vec![" b"]);
        assert_eq!(apply_pipeline(["Ab"], &lower_first).unwrap(), vec!["ab"]);
    }

    #[test]
    fn test_empty_custom_list_is_identity() {
        let out = apply_pipeline(["Keep ME"], &StepList::Custom(vec![])).unwrap();

        assert_eq!(out, vec!["Keep ME"]);
    }

    #[test]
    fn test_custom_default_steps_match_default_cleanup() {
        let texts = ["AAaaa!", "Hello,   World"];
        let custom = apply_pipeline(texts, &StepList::Custom(default_steps())).unwrap();
        let default = apply_pipeline(texts, &StepList::Default).unwrap();

        assert_eq!(custom, default);
        assert_eq!(custom, vec!["aa", "hello world"]);
    }

    #[test]
    fn test_invalid_pattern_propagates() {
        let steps = StepList::Custom(vec![Step::Lowercase, Step::strip("[unclosed")]);
        let result = apply_pipeline(["text"], &steps);

        assert!(matches!(result, Err(PipelineError::Pattern { .. })));
    }

    #[test]
    fn test_length_preserved() {
        let texts = ["", "!!!", "a", "   "];
        let out = apply_pipeline(texts, &StepList::Default).unwrap();

        assert_eq!(out.len(), texts.len());
        assert_eq!(out, vec!["", "", "a", ""]);
    }

    #[test]
    fn test_apply_one_matches_apply() {
        let pipeline = CompiledPipeline::default_cleanup();

        assert_eq!(pipeline.len(), 5);
        assert!(!pipeline.is_empty());
        assert!(CompiledPipeline::compile(&[]).unwrap().is_empty());
        assert_eq!(pipeline.apply_one("Hellooo, World").unwrap(), "helloo world");
    }
}
