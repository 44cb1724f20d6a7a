use crate::models::{ExtractedFields, Field};

pub struct FormatValidator;

impl FormatValidator {
    /// Required fields must be present and non-empty.
    pub fn validate(fields: &ExtractedFields, field: Field) -> Result<(), String> {
        if fields.has(field) {
            Ok(())
        } else {
            Err(format!("{} is missing", field.name()))
        }
    }
}
