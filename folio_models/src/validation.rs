use std::{collections::BTreeMap, fmt, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Deserializer};

use crate::contact::{FieldKind, FieldName};

pub static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Declared constraints of a single form field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConstraints {
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<Pattern>,
}

impl FieldConstraints {
    pub fn required() -> Self {
        Self {
            required: true,
            ..Default::default()
        }
    }

    pub fn with_kind(self, kind: FieldKind) -> Self {
        Self { kind, ..self }
    }

    pub fn with_min_length(self, min_length: usize) -> Self {
        Self {
            min_length: Some(min_length),
            ..self
        }
    }

    pub fn with_max_length(self, max_length: usize) -> Self {
        Self {
            max_length: Some(max_length),
            ..self
        }
    }

    pub fn with_pattern(self, pattern: Pattern) -> Self {
        Self {
            pattern: Some(pattern),
            ..self
        }
    }
}

/// Constraints for every field of the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidationRules {
    pub name: FieldConstraints,
    pub email: FieldConstraints,
    pub subject: FieldConstraints,
    pub message: FieldConstraints,
}

impl ValidationRules {
    pub fn get(&self, field: FieldName) -> &FieldConstraints {
        match field {
            FieldName::Name => &self.name,
            FieldName::Email => &self.email,
            FieldName::Subject => &self.subject,
            FieldName::Message => &self.message,
        }
    }
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            name: FieldConstraints::required()
                .with_min_length(2)
                .with_max_length(50),
            email: FieldConstraints::required().with_kind(FieldKind::Email),
            subject: FieldConstraints::required(),
            message: FieldConstraints::required()
                .with_min_length(5)
                .with_max_length(1000),
        }
    }
}

/// A compiled regular expression from the configuration.
#[derive(Clone)]
pub struct Pattern(Regex);

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Self)
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.0.is_match(value)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.as_str()).finish()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Pattern {}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(&s).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub message: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }
}

/// Per-field validation results of a whole submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    results: BTreeMap<FieldName, ValidationResult>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.results.values().all(|x| x.valid)
    }

    pub fn get(&self, field: FieldName) -> Option<&ValidationResult> {
        self.results.get(&field)
    }

    /// Fields that failed validation together with their messages.
    pub fn errors(&self) -> impl Iterator<Item = (FieldName, &str)> {
        self.results
            .iter()
            .filter_map(|(&field, result)| Some((field, result.message.as_deref()?)))
    }
}

impl FromIterator<(FieldName, ValidationResult)> for ValidationReport {
    fn from_iter<T: IntoIterator<Item = (FieldName, ValidationResult)>>(iter: T) -> Self {
        Self {
            results: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_regex() {
        for (input, expected) in [
            ("a@b.co", true),
            ("first.last@example.com", true),
            ("bad", false),
            ("a@b", false),
            ("a b@c.de", false),
            ("a@@b.co", false),
            ("@b.co", false),
        ] {
            assert_eq!(EMAIL_REGEX.is_match(input), expected, "{input}");
        }
    }

    #[test]
    fn report_collects_errors() {
        let report = [
            (FieldName::Name, ValidationResult::error("too short")),
            (FieldName::Email, ValidationResult::ok()),
        ]
        .into_iter()
        .collect::<ValidationReport>();

        assert!(!report.is_valid());
        assert_eq!(
            report.errors().collect::<Vec<_>>(),
            [(FieldName::Name, "too short")]
        );
        assert_eq!(report.get(FieldName::Email), Some(&ValidationResult::ok()));
    }

    #[test]
    fn deserialize_constraints() {
        let constraints = serde_json::from_value::<FieldConstraints>(serde_json::json!({
            "required": true,
            "min_length": 2,
            "pattern": "^[a-z]+$",
        }))
        .unwrap();

        assert_eq!(
            constraints,
            FieldConstraints::required()
                .with_min_length(2)
                .with_pattern(Pattern::new("^[a-z]+$").unwrap())
        );
    }

    #[test]
    fn deserialize_invalid_pattern() {
        let result = serde_json::from_value::<Pattern>(serde_json::json!("(unclosed"));
        assert!(result.is_err());
    }
}
