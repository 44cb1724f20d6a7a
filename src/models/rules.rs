use crate::models::{DocumentType, Field};
use crate::utils::{DocumentError, Result};

/// Per-document dispatch table: which fields are extracted and what makes
/// the result valid.
pub struct DocumentRules {
    pub documents: Vec<DocumentRule>,
}

pub struct DocumentRule {
    pub document_type: DocumentType,
    pub fields: Vec<Field>,
    pub validity_rules: Vec<ValidityRule>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidityRule {
    /// Field must be present and non-empty.
    RequiredField(Field),
    /// Field must hold a canonical date strictly after the processing time.
    NotExpired(Field),
}

impl DocumentRule {
    pub fn extracts(&self, field: Field) -> bool {
        self.fields.contains(&field)
    }
}

impl DocumentRules {
    pub fn new() -> Self {
        let mut documents = Vec::new();

        // PAN cards never expire; a matched number is the whole bar.
        documents.push(DocumentRule {
            document_type: DocumentType::Pan,
            fields: vec![
                Field::DocumentNumber,
                Field::FullName,
                Field::FathersName,
                Field::DateOfBirth,
            ],
            validity_rules: vec![ValidityRule::RequiredField(Field::DocumentNumber)],
        });

        documents.push(DocumentRule {
            document_type: DocumentType::Passport,
            fields: vec![
                Field::DocumentNumber,
                Field::FullName,
                Field::DateOfBirth,
                Field::DateOfIssue,
                Field::DateOfExpiry,
            ],
            validity_rules: vec![
                ValidityRule::RequiredField(Field::DocumentNumber),
                ValidityRule::RequiredField(Field::DateOfExpiry),
                ValidityRule::NotExpired(Field::DateOfExpiry),
            ],
        });

        DocumentRules { documents }
    }

    pub fn get_rule(&self, document_type: DocumentType) -> Result<&DocumentRule> {
        self.documents
            .iter()
            .find(|rule| rule.document_type == document_type)
            .ok_or_else(|| DocumentError::UnsupportedDocumentType(document_type.to_string()))
    }
}

impl Default for DocumentRules {
    fn default() -> Self {
        Self::new()
    }
}
