//! Pipeline steps and step lists.
//!
//! A [`Step`] is one unit of text transformation. A [`StepList`] chooses
//! between the built-in default cleanup, a caller-supplied list, or no
//! transformation at all.

use std::fmt;

use serde_yaml::Value as YamlValue;

/// Symbols removed by the default cleanup. The apostrophe is kept.
pub const DEFAULT_SYMBOLS: &str = r##"[!"#$%&()*+,\-./:;<=>\[\]?@\^_`{|}~\\]"##;

/// Runs of one or more spaces.
pub const DEFAULT_SPACES: &str = " +";

/// A lowercase letter repeated three or more times.
pub const DEFAULT_REPEATS: &str = r"([a-z])\1\1+";

/// Replacement keeping two letters of a repeated run.
pub const DEFAULT_REPEATS_TEMPLATE: &str = "${1}${1}";

/// Spaces left at either edge by symbol stripping.
pub const DEFAULT_EDGE_SPACES: &str = "^ +| +$";

/// One transformation applied to every text in a collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Replace every match of the pattern with a single space
    Strip(String),
    /// Replace every match of the pattern with a group-aware template
    Replace { pattern: String, template: String },
    /// Lowercase the whole text
    Lowercase,
}

impl Step {
    pub fn strip(pattern: impl Into<String>) -> Self {
        Step::Strip(pattern.into())
    }

    pub fn replace(pattern: impl Into<String>, template: impl Into<String>) -> Self {
        Step::Replace {
            pattern: pattern.into(),
            template: template.into(),
        }
    }

    pub fn lowercase() -> Self {
        Step::Lowercase
    }

    /// Short rendering used in log lines
    pub fn describe(&self) -> String {
        match self {
            Step::Strip(pattern) => format!("strip {:?}", pattern),
            Step::Replace { pattern, template } => {
                format!("replace {:?} with {:?}", pattern, template)
            }
            Step::Lowercase => "lowercase".to_string(),
        }
    }

    /// Build a step from an untyped YAML element.
    ///
    /// - a string equal to `lowercase` (any case) becomes [`Step::Lowercase`]
    /// - any other string becomes [`Step::Strip`]
    /// - a two-element sequence of strings becomes [`Step::Replace`]
    ///
    /// Every other shape is rejected with [`UnsupportedStep`].
    pub fn from_value(value: &YamlValue) -> Result<Self, UnsupportedStep> {
        match value {
            YamlValue::String(s) if s.to_lowercase() == "lowercase" => Ok(Step::Lowercase),
            YamlValue::String(s) => Ok(Step::Strip(s.clone())),
            YamlValue::Sequence(items) if items.len() == 2 => match (&items[0], &items[1]) {
                (YamlValue::String(pattern), YamlValue::String(template)) => {
                    Ok(Step::replace(pattern.as_str(), template.as_str()))
                }
                _ => Err(UnsupportedStep::new(value)),
            },
            _ => Err(UnsupportedStep::new(value)),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// A step element whose shape is not strip, replace or lowercase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedStep {
    /// Inline YAML rendering of the rejected element
    pub repr: String,
}

impl UnsupportedStep {
    fn new(value: &YamlValue) -> Self {
        let repr = serde_yaml::to_string(value)
            .map(|s| s.trim_end().replace('\n', " "))
            .unwrap_or_else(|_| format!("{:?}", value));
        Self { repr }
    }
}

impl fmt::Display for UnsupportedStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported step: {}", self.repr)
    }
}

/// Which transformations a pipeline run applies
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StepList {
    /// Return the input unchanged
    Disabled,
    /// The built-in cleanup, see [`default_steps`]
    #[default]
    Default,
    /// Exactly these steps, in order
    Custom(Vec<Step>),
}

impl StepList {
    /// Steps to run, with the default list expanded. `None` when disabled.
    pub fn resolve(&self) -> Option<Vec<Step>> {
        match self {
            StepList::Disabled => None,
            StepList::Default => Some(default_steps()),
            StepList::Custom(steps) => Some(steps.clone()),
        }
    }
}

impl From<Vec<Step>> for StepList {
    fn from(steps: Vec<Step>) -> Self {
        StepList::Custom(steps)
    }
}

/// The default cleanup, in order:
///
/// 1. strip symbols (apostrophes survive)
/// 2. collapse runs of spaces
/// 3. lowercase
/// 4. limit repeated lowercase letters to two (`aaaaaannn` -> `aann`)
/// 5. drop the space a stripped leading or trailing symbol leaves behind
///
/// Steps 1-4 alone leave a trailing space wherever the text ended in a
/// symbol (`"dog."` -> `"dog "`), which step 5 removes.
pub fn default_steps() -> Vec<Step> {
    vec![
        Step::strip(DEFAULT_SYMBOLS),
        Step::replace(DEFAULT_SPACES, " "),
        Step::lowercase(),
        Step::replace(DEFAULT_REPEATS, DEFAULT_REPEATS_TEMPLATE),
        Step::replace(DEFAULT_EDGE_SPACES, ""),
    ]
}
