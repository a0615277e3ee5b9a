use std::sync::Arc;

use folio_models::{
    contact::{FieldKind, FieldName, SubmissionRequest},
    validation::{
        FieldConstraints, ValidationReport, ValidationResult, ValidationRules, EMAIL_REGEX,
    },
};
use folio_shared_contracts::validation::ValidationService;

#[derive(Debug, Clone)]
pub struct ValidationServiceImpl {
    rules: Arc<ValidationRules>,
}

impl ValidationServiceImpl {
    pub fn new(rules: ValidationRules) -> Self {
        Self {
            rules: rules.into(),
        }
    }
}

impl ValidationService for ValidationServiceImpl {
    fn validate_field(&self, field: FieldName, value: &str) -> ValidationResult {
        let constraints = self.rules.get(field);
        validate_value(field, value, constraints.kind, constraints)
    }

    #[tracing::instrument(skip_all)]
    fn validate(&self, request: &SubmissionRequest) -> ValidationReport {
        let report = FieldName::ALL
            .into_iter()
            .map(|field| (field, self.validate_field(field, request.get(field))))
            .collect::<ValidationReport>();

        for (field, message) in report.errors() {
            tracing::debug!(%field, error = message, "field failed validation");
        }

        report
    }
}

/// Checks one value against the constraints of its field. The rules run in
/// order and the first failure wins: required, email syntax, pattern,
/// minimum length, maximum length.
///
/// The value is trimmed first. Lengths count characters, not bytes.
pub fn validate_value(
    field: FieldName,
    value: &str,
    kind: FieldKind,
    constraints: &FieldConstraints,
) -> ValidationResult {
    let value = value.trim();

    if value.is_empty() {
        return if constraints.required {
            ValidationResult::error("This field is required")
        } else {
            ValidationResult::ok()
        };
    }

    let pattern_ok = constraints
        .pattern
        .as_ref()
        .is_none_or(|pattern| pattern.is_match(value));
    match kind {
        FieldKind::Email if !EMAIL_REGEX.is_match(value) || !pattern_ok => {
            return ValidationResult::error("Please enter a valid email address");
        }
        FieldKind::Text if !pattern_ok => {
            return ValidationResult::error(format!("Please enter a valid {field}"));
        }
        FieldKind::Email | FieldKind::Text => {}
    }

    let length = value.chars().count();
    if let Some(min_length) = constraints.min_length.filter(|&min| length < min) {
        return ValidationResult::error(format!(
            "{} must be at least {min_length} characters",
            field.label()
        ));
    }
    if let Some(max_length) = constraints.max_length.filter(|&max| length > max) {
        return ValidationResult::error(format!(
            "{} must be at most {max_length} characters",
            field.label()
        ));
    }

    ValidationResult::ok()
}
