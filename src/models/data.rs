use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::utils::DocumentError;

/// Identity documents the engine knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DocumentType {
    #[serde(rename = "PAN")]
    Pan,
    #[serde(rename = "PASSPORT")]
    Passport,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Pan => "PAN",
            DocumentType::Passport => "PASSPORT",
        }
    }

    /// Tesseract language set for this document. PAN cards are bilingual.
    pub fn ocr_language(&self) -> &'static str {
        match self {
            DocumentType::Pan => "eng+hin",
            DocumentType::Passport => "eng",
        }
    }
}

impl FromStr for DocumentType {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pan" | "pan_card" => Ok(DocumentType::Pan),
            "passport" => Ok(DocumentType::Passport),
            _ => Err(DocumentError::UnsupportedDocumentType(s.to_string())),
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field of the extraction record, used by the per-document rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    DocumentNumber,
    FullName,
    FathersName,
    DateOfBirth,
    DateOfIssue,
    DateOfExpiry,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::DocumentNumber => "documentNumber",
            Field::FullName => "fullName",
            Field::FathersName => "fathersName",
            Field::DateOfBirth => "dateOfBirth",
            Field::DateOfIssue => "dateOfIssue",
            Field::DateOfExpiry => "dateOfExpiry",
        }
    }
}

/// Raw field values pulled out of OCR text, before validity is decided.
///
/// `document_number` and `full_name` are empty strings when nothing matched;
/// the optional fields are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    pub document_number: String,
    pub full_name: String,
    pub fathers_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub date_of_issue: Option<String>,
    pub date_of_expiry: Option<String>,
}

impl ExtractedFields {
    /// Whether a field carries a value. Empty strings count as missing.
    pub fn has(&self, field: Field) -> bool {
        self.get(field).map_or(false, |value| !value.is_empty())
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::DocumentNumber => Some(self.document_number.as_str()),
            Field::FullName => Some(self.full_name.as_str()),
            Field::FathersName => self.fathers_name.as_deref(),
            Field::DateOfBirth => self.date_of_birth.as_deref(),
            Field::DateOfIssue => self.date_of_issue.as_deref(),
            Field::DateOfExpiry => self.date_of_expiry.as_deref(),
        }
    }
}

/// The record returned for one processed document.
///
/// Built once by the extractor; `is_valid` is computed from the other fields
/// at construction and the record is read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    document_type: DocumentType,
    document_number: String,
    full_name: String,
    fathers_name: Option<String>,
    date_of_birth: Option<String>,
    date_of_issue: Option<String>,
    date_of_expiry: Option<String>,
    is_valid: bool,
}

impl ExtractionResult {
    pub(crate) fn new(document_type: DocumentType, fields: ExtractedFields, is_valid: bool) -> Self {
        ExtractionResult {
            document_type,
            document_number: fields.document_number,
            full_name: fields.full_name,
            fathers_name: fields.fathers_name,
            date_of_birth: fields.date_of_birth,
            date_of_issue: fields.date_of_issue,
            date_of_expiry: fields.date_of_expiry,
            is_valid,
        }
    }

    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    pub fn document_number(&self) -> &str {
        &self.document_number
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn fathers_name(&self) -> Option<&str> {
        self.fathers_name.as_deref()
    }

    pub fn date_of_birth(&self) -> Option<&str> {
        self.date_of_birth.as_deref()
    }

    pub fn date_of_issue(&self) -> Option<&str> {
        self.date_of_issue.as_deref()
    }

    pub fn date_of_expiry(&self) -> Option<&str> {
        self.date_of_expiry.as_deref()
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Copy of the extracted fields, without the derived validity flag.
    pub fn fields(&self) -> ExtractedFields {
        ExtractedFields {
            document_number: self.document_number.clone(),
            full_name: self.full_name.clone(),
            fathers_name: self.fathers_name.clone(),
            date_of_birth: self.date_of_birth.clone(),
            date_of_issue: self.date_of_issue.clone(),
            date_of_expiry: self.date_of_expiry.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_type_parsing() {
        assert_eq!("pan".parse::<DocumentType>().unwrap(), DocumentType::Pan);
        assert_eq!("PAN_CARD".parse::<DocumentType>().unwrap(), DocumentType::Pan);
        assert_eq!(" Passport ".parse::<DocumentType>().unwrap(), DocumentType::Passport);
        assert!(matches!(
            "driving_license".parse::<DocumentType>(),
            Err(DocumentError::UnsupportedDocumentType(t)) if t == "driving_license"
        ));
    }

    #[test]
    fn test_empty_strings_count_as_missing() {
        let fields = ExtractedFields {
            document_number: String::new(),
            fathers_name: Some(String::new()),
            date_of_birth: Some("1990-01-01".to_string()),
            ..Default::default()
        };
        assert!(!fields.has(Field::DocumentNumber));
        assert!(!fields.has(Field::FathersName));
        assert!(fields.has(Field::DateOfBirth));
        assert!(!fields.has(Field::DateOfExpiry));
    }

    #[test]
    fn test_result_serializes_flat_with_nulls() {
        let fields = ExtractedFields {
            document_number: "ABCDE1234F".to_string(),
            full_name: "RAHUL SHARMA".to_string(),
            fathers_name: Some("SURESH SHARMA".to_string()),
            date_of_birth: Some("1990-01-01".to_string()),
            ..Default::default()
        };
        let result = ExtractionResult::new(DocumentType::Pan, fields, true);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["documentType"], "PAN");
        assert_eq!(json["documentNumber"], "ABCDE1234F");
        assert_eq!(json["fathersName"], "SURESH SHARMA");
        assert_eq!(json["dateOfBirth"], "1990-01-01");
        assert!(json["dateOfIssue"].is_null());
        assert!(json["dateOfExpiry"].is_null());
        assert_eq!(json["isValid"], true);
    }
}
