//! Step list loader.
//!
//! Loads a step list from YAML. The `steps` key selects the list:
//!
//! ```yaml
//! steps: default            # built-in cleanup
//! # steps: ~               # no transformation
//! # steps:
//! #   - lowercase
//! #   - ", "
//! #   - ['([a-z])\1\1+', '${1}${1}']
//! ```
//!
//! Elements of a custom list that are not a string or a pair of strings are
//! skipped with a warning and reported in [`LoadedSteps::skipped`].

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_yaml::Value as YamlValue;

use crate::error::PipelineError;
use crate::step::{Step, StepList};

/// Keywords selecting the built-in cleanup
pub const DEFAULT_KEYWORDS: [&str; 2] = ["default", "default_cleanup"];

/// Raw document shape
#[derive(Debug, Deserialize)]
struct StepsDocument {
    #[serde(default)]
    steps: Option<YamlValue>,
}

/// A list element that was not turned into a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedStep {
    /// Position in the `steps` sequence
    pub index: usize,
    /// Inline rendering of the element
    pub repr: String,
}

/// Result of loading a step list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSteps {
    pub steps: StepList,
    pub skipped: Vec<SkippedStep>,
}

impl LoadedSteps {
    fn new(steps: StepList) -> Self {
        Self {
            steps,
            skipped: Vec::new(),
        }
    }
}

/// Parse a step list document from a YAML string.
///
/// # Errors
/// Returns `PipelineError::Config` if the document is not valid YAML or
/// `steps` is neither `default`, null nor a sequence.
pub fn parse_steps_yaml(contents: &str) -> Result<LoadedSteps, PipelineError> {
    let doc: StepsDocument = serde_yaml::from_str(contents)
        .map_err(|e| PipelineError::Config(format!("Failed to parse YAML: {}", e)))?;

    match doc.steps {
        None | Some(YamlValue::Null) => Ok(LoadedSteps::new(StepList::Disabled)),
        Some(YamlValue::String(s)) if is_default_keyword(&s) => {
            Ok(LoadedSteps::new(StepList::Default))
        }
        Some(YamlValue::Sequence(items)) => Ok(steps_from_values(&items)),
        Some(other) => Err(PipelineError::Config(format!(
            "'steps' must be '{}', null or a list, got {:?}",
            DEFAULT_KEYWORDS[0], other
        ))),
    }
}

fn is_default_keyword(s: &str) -> bool {
    DEFAULT_KEYWORDS.iter().any(|k| s.eq_ignore_ascii_case(k))
}

/// Build a custom step list, skipping elements of unknown shape.
pub fn steps_from_values(values: &[YamlValue]) -> LoadedSteps {
    let mut steps = Vec::with_capacity(values.len());
    let mut skipped = Vec::new();

    for (index, value) in values.iter().enumerate() {
        match Step::from_value(value) {
            Ok(step) => steps.push(step),
            Err(unsupported) => {
                tracing::warn!("Failed to read step {} ({}). Continuing...", index, unsupported.repr);
                skipped.push(SkippedStep {
                    index,
                    repr: unsupported.repr,
                });
            }
        }
    }

    LoadedSteps {
        steps: StepList::Custom(steps),
        skipped,
    }
}

/// Load a step list document from a YAML file.
///
/// # Example
/// ```ignore
/// use textprep::config::load_steps_from_file;
///
/// let loaded = load_steps_from_file("cleanup.yaml")?;
/// let out = textprep::apply_pipeline(lines, &loaded.steps)?;
/// ```
pub fn load_steps_from_file<P: AsRef<Path>>(path: P) -> Result<LoadedSteps, PipelineError> {
    let path = path.as_ref();

    let contents = fs::read_to_string(path).map_err(|e| PipelineError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    parse_steps_yaml(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_default_keyword() {
        let loaded = parse_steps_yaml("steps: default").unwrap();
        assert_eq!(loaded.steps, StepList::Default);

        let loaded = parse_steps_yaml("steps: DEFAULT").unwrap();
        assert_eq!(loaded.steps, StepList::Default);

        let loaded = parse_steps_yaml("steps: default_cleanup").unwrap();
        assert_eq!(loaded.steps, StepList::Default);
    }

    #[test]
    fn test_null_and_missing_disable() {
        assert_eq!(parse_steps_yaml("steps: ~").unwrap().steps, StepList::Disabled);
        assert_eq!(parse_steps_yaml("{}").unwrap().steps, StepList::Disabled);
    }

    #[test]
    fn test_custom_list() {
        let yaml = r#"
steps:
  - LOWERCASE
  - ", "
  - ['([a-z])\1\1+', '${1}${1}']
"#;
        let loaded = parse_steps_yaml(yaml).unwrap();

        assert!(loaded.skipped.is_empty());
        assert_eq!(
            loaded.steps,
            StepList::Custom(vec![
                Step::Lowercase,
                Step::strip(", "),
                Step::replace(r"([a-z])\1\1+", "${1}${1}"),
            ])
        );
    }

    #[test]
    fn test_backslash_template_from_yaml() {
        let yaml = r#"
steps:
  - lowercase
  - ['([a-z])\1\1+', '\1\1']
"#;
        let loaded = parse_steps_yaml(yaml).unwrap();
        let out = crate::apply_pipeline(["AAaaa"], &loaded.steps).unwrap();

        assert!(loaded.skipped.is_empty());
        assert_eq!(out, vec!["aa"]);
    }

    #[test]
    fn test_unsupported_elements_are_skipped() {
        let yaml = r#"
steps:
  - 7
  - lowercase
  - [a, b, c]
  - "x"
"#;
        let loaded = parse_steps_yaml(yaml).unwrap();

        assert_eq!(
            loaded.steps,
            StepList::Custom(vec![Step::Lowercase, Step::strip("x")])
        );
        assert_eq!(loaded.skipped.len(), 2);
        assert_eq!(loaded.skipped[0], SkippedStep { index: 0, repr: "7".to_string() });
        assert_eq!(loaded.skipped[1].index, 2);
    }

    #[test]
    fn test_wrong_steps_type() {
        let result = parse_steps_yaml("steps: 3");
        assert!(matches!(result, Err(PipelineError::Config(_))));

        let result = parse_steps_yaml("steps: cleanup");
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("steps.yaml");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(b"steps:\n  - lowercase\n").unwrap();

        let loaded = load_steps_from_file(&path).unwrap();
        assert_eq!(loaded.steps, StepList::Custom(vec![Step::Lowercase]));
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_steps_from_file(temp_dir.path().join("absent.yaml"));

        assert!(matches!(result, Err(PipelineError::Io { .. })));
    }
}
