use chrono::NaiveDateTime;

use crate::models::{DocumentRule, ExtractedFields, Field, ValidityRule};
use crate::validation::{ExpiryValidator, FormatValidator};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub field: Field,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub issues: Vec<ValidationIssue>,
}

/// Applies a document's validity rules to its extracted fields.
///
/// The outcome depends only on the fields, the rule and `now`.
pub struct PolicyValidator;

impl PolicyValidator {
    pub fn validate(
        rule: &DocumentRule,
        fields: &ExtractedFields,
        now: NaiveDateTime,
    ) -> ValidationOutcome {
        let mut issues = Vec::new();

        for validity_rule in &rule.validity_rules {
            let (field, check) = match *validity_rule {
                ValidityRule::RequiredField(field) => {
                    (field, FormatValidator::validate(fields, field))
                }
                ValidityRule::NotExpired(field) => match fields.get(field) {
                    Some(value) if !value.is_empty() => {
                        (field, ExpiryValidator::validate(value, now))
                    }
                    // absence is reported by RequiredField
                    _ => (field, Ok(())),
                },
            };
            if let Err(message) = check {
                issues.push(ValidationIssue { field, message });
            }
        }

        ValidationOutcome {
            is_valid: issues.is_empty(),
            issues,
        }
    }
}
