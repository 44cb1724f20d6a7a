use std::sync::Arc;

use chrono::{Local, NaiveDateTime};

use crate::models::*;
use crate::processing::extractors::{
    extract_document_number, extract_fathers_name, extract_full_name, NameMatch,
};
use crate::processing::*;
use crate::utils::{DocumentError, Result};
use crate::validation::PolicyValidator;

/// Turns raw OCR text into a typed, validated [`ExtractionResult`].
///
/// An extractor holds no per-request state and can be shared across threads.
pub struct DocumentExtractor {
    config: ExtractorConfig,
    rules: DocumentRules,
    dates: DateParser,
    observer: Arc<dyn ExtractionObserver>,
}

impl DocumentExtractor {
    pub fn new() -> Self {
        Self::with_config(ExtractorConfig::default())
    }

    pub fn with_config(config: ExtractorConfig) -> Self {
        DocumentExtractor {
            dates: DateParser::new(config.context_window),
            rules: DocumentRules::new(),
            observer: Arc::new(LogObserver),
            config,
        }
    }

    /// Replace the event sink (a [`LogObserver`] by default).
    pub fn with_observer(mut self, observer: Arc<dyn ExtractionObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract fields from `raw_text`, judging expiry against the current local time.
    pub fn extract(&self, raw_text: &str, document_type: &str) -> Result<ExtractionResult> {
        self.extract_at(raw_text, document_type, Local::now().naive_local())
    }

    /// Same as [`extract`](Self::extract) with an explicit processing time.
    pub fn extract_at(
        &self,
        raw_text: &str,
        document_type: &str,
        now: NaiveDateTime,
    ) -> Result<ExtractionResult> {
        let document_type: DocumentType = document_type.parse()?;
        let rule = self.rules.get_rule(document_type)?;

        if raw_text.len() > self.config.max_input_bytes {
            return Err(DocumentError::Processing(format!(
                "OCR text is {} bytes, limit is {}",
                raw_text.len(),
                self.config.max_input_bytes
            )));
        }

        self.observer.on_event(&ExtractionEvent::Started {
            document_type,
            text_len: raw_text.len(),
        });

        let fields = self.extract_fields(raw_text, document_type, rule);
        let outcome = PolicyValidator::validate(rule, &fields, now);
        for issue in &outcome.issues {
            self.observer.on_event(&ExtractionEvent::ValidityIssue {
                field: issue.field,
                message: &issue.message,
            });
        }

        self.observer.on_event(&ExtractionEvent::Finished {
            document_type,
            is_valid: outcome.is_valid,
        });
        Ok(ExtractionResult::new(document_type, fields, outcome.is_valid))
    }

    /// Extract from undecoded OCR output. Text that is not UTF-8 is rejected.
    pub fn extract_bytes(&self, raw: &[u8], document_type: &str) -> Result<ExtractionResult> {
        let text = std::str::from_utf8(raw)
            .map_err(|e| DocumentError::Processing(format!("OCR text is not valid UTF-8: {}", e)))?;
        self.extract(text, document_type)
    }

    /// Preprocess an image, run OCR on it and extract from the recognized text.
    #[cfg(feature = "ocr")]
    pub fn extract_image(
        &self,
        image: &[u8],
        document_type: &str,
        ocr: &dyn OcrEngine,
    ) -> Result<ExtractionResult> {
        let parsed: DocumentType = document_type.parse()?;
        let processed = ImageProcessor::preprocess(image, &self.config.ocr)?;
        let text = ocr.recognize(&processed, parsed)?;
        self.extract(&text, document_type)
    }

    /// Recompute validity for an existing result at `now`.
    pub fn is_valid_at(&self, result: &ExtractionResult, now: NaiveDateTime) -> Result<bool> {
        let rule = self.rules.get_rule(result.document_type())?;
        Ok(PolicyValidator::validate(rule, &result.fields(), now).is_valid)
    }

    fn extract_fields(
        &self,
        text: &str,
        document_type: DocumentType,
        rule: &DocumentRule,
    ) -> ExtractedFields {
        let mut fields = ExtractedFields::default();

        if rule.extracts(Field::DocumentNumber) {
            fields.document_number = extract_document_number(text, document_type);
            self.observer.on_event(&ExtractionEvent::DocumentNumber {
                value: &fields.document_number,
            });
        }

        if rule.extracts(Field::FullName) {
            if let Some(name) = self.report_name(Field::FullName, extract_full_name(text)) {
                fields.full_name = name;
            }
        }

        if rule.extracts(Field::FathersName) {
            fields.fathers_name = self.report_name(Field::FathersName, extract_fathers_name(text));
        }

        let wants_dates = [Field::DateOfBirth, Field::DateOfIssue, Field::DateOfExpiry]
            .iter()
            .any(|field| rule.extracts(*field));
        if wants_dates {
            let dates = self.dates.extract(text);
            for candidate in &dates.candidates {
                self.observer
                    .on_event(&ExtractionEvent::DateCandidate { candidate });
            }

            let slots = [
                (Field::DateOfBirth, DateRole::Birth, &mut fields.date_of_birth),
                (Field::DateOfIssue, DateRole::Issue, &mut fields.date_of_issue),
                (Field::DateOfExpiry, DateRole::Expiry, &mut fields.date_of_expiry),
            ];
            for (field, role, slot) in slots {
                if !rule.extracts(field) {
                    continue;
                }
                *slot = dates.canonical(role);
                if let Some(date) = slot.as_deref() {
                    self.observer
                        .on_event(&ExtractionEvent::DateAssigned { role, date });
                }
            }
        }

        fields
    }

    fn report_name(&self, field: Field, found: Option<NameMatch>) -> Option<String> {
        match found {
            Some(name) => {
                self.observer.on_event(&ExtractionEvent::NameMatched {
                    field,
                    value: &name.value,
                    source: name.source,
                });
                Some(name.value)
            }
            None => {
                self.observer.on_event(&ExtractionEvent::NameMissing { field });
                None
            }
        }
    }
}

impl Default for DocumentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    const PAN_TEXT: &str = "INCOME TAX DEPARTMENT\n\
        GOVT. OF INDIA\n\
        Name: RAHUL SHARMA\n\
        Father's Name: SURESH SHARMA\n\
        Date of Birth: 15/08/1985\n\
        Permanent Account Number\n\
        ABCDE1234F\n";

    const PASSPORT_TEXT: &str = "REPUBLIC OF INDIA\n\
        Passport No. Z12345678\n\
        Surname: VERMA\n\
        Date of Birth 01 Jan 1990\n\
        Date of Issue 10/03/2015\n\
        Date of Expiry 09/03/2099\n";

    #[derive(Default)]
    struct RecordingObserver {
        kinds: Mutex<Vec<&'static str>>,
    }

    impl RecordingObserver {
        fn kinds(&self) -> Vec<&'static str> {
            self.kinds.lock().unwrap().clone()
        }
    }

    impl ExtractionObserver for RecordingObserver {
        fn on_event(&self, event: &ExtractionEvent<'_>) {
            self.kinds.lock().unwrap().push(event.kind());
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn extractor() -> DocumentExtractor {
        DocumentExtractor::new().with_observer(Arc::new(NoopObserver))
    }

    #[test]
    fn test_pan_card() {
        let result = extractor().extract_at(PAN_TEXT, "pan", now()).unwrap();
        assert_eq!(result.document_type(), DocumentType::Pan);
        assert_eq!(result.document_number(), "ABCDE1234F");
        assert_eq!(result.full_name(), "RAHUL SHARMA");
        assert_eq!(result.fathers_name(), Some("SURESH SHARMA"));
        assert_eq!(result.date_of_birth(), Some("1985-08-15"));
        assert_eq!(result.date_of_issue(), None);
        assert_eq!(result.date_of_expiry(), None);
        assert!(result.is_valid());
    }

    #[test]
    fn test_pan_never_carries_issue_or_expiry() {
        let text = "ABCDE1234F\n01/01/1990 ........................ 01/01/2000 ...................... 01/01/2010";
        let result = extractor().extract_at(text, "PAN_CARD", now()).unwrap();
        assert_eq!(result.date_of_birth(), Some("1990-01-01"));
        assert_eq!(result.date_of_issue(), None);
        assert_eq!(result.date_of_expiry(), None);
    }

    #[test]
    fn test_pan_wrong_number_shape_is_invalid() {
        let result = extractor()
            .extract_at("Name: A B\nABCDE12345", "pan", now())
            .unwrap();
        assert_eq!(result.document_number(), "");
        assert!(!result.is_valid());
    }

    #[test]
    fn test_passport() {
        let result = extractor().extract_at(PASSPORT_TEXT, "Passport", now()).unwrap();
        assert_eq!(result.document_type(), DocumentType::Passport);
        assert_eq!(result.document_number(), "Z12345678");
        assert_eq!(result.full_name(), "VERMA");
        assert_eq!(result.fathers_name(), None);
        assert_eq!(result.date_of_birth(), Some("1990-01-01"));
        assert_eq!(result.date_of_issue(), Some("2015-03-10"));
        assert_eq!(result.date_of_expiry(), Some("2099-03-09"));
        assert!(result.is_valid());
    }

    #[test]
    fn test_expired_passport() {
        let text = "Z12345678\nDate of Expiry: 01/01/2000";
        let result = extractor().extract_at(text, "passport", now()).unwrap();
        assert_eq!(result.date_of_expiry(), Some("2000-01-01"));
        assert!(!result.is_valid());
    }

    #[test]
    fn test_passport_without_expiry_is_invalid() {
        let result = extractor()
            .extract_at("Z12345678\nName: JOHN SMITH", "passport", now())
            .unwrap();
        assert_eq!(result.date_of_expiry(), None);
        assert!(!result.is_valid());
    }

    #[test]
    fn test_context_dates_skip_fallback() {
        let text = "Z12345678\nDOB: 01/01/1990 Issued: 01/01/2020";
        let result = extractor().extract_at(text, "passport", now()).unwrap();
        assert_eq!(result.date_of_birth(), Some("1990-01-01"));
        assert_eq!(result.date_of_issue(), Some("2020-01-01"));
        assert_eq!(result.date_of_expiry(), None);
    }

    #[test]
    fn test_label_beats_layout() {
        let text = "Passport Office\nRandom Capital Line\nName: JOHN SMITH\nAnother Capital Line";
        let result = extractor().extract_at(text, "passport", now()).unwrap();
        assert_eq!(result.full_name(), "JOHN SMITH");
    }

    #[test]
    fn test_unsupported_type() {
        let observer = Arc::new(RecordingObserver::default());
        let extractor = DocumentExtractor::new().with_observer(observer.clone());
        let result = extractor.extract_at(PAN_TEXT, "driving_license", now());
        assert!(matches!(
            result,
            Err(DocumentError::UnsupportedDocumentType(t)) if t == "driving_license"
        ));
        assert!(observer.kinds().is_empty());
    }

    #[test]
    fn test_absent_versus_empty() {
        let result = extractor().extract_at("nothing useful", "passport", now()).unwrap();
        assert_eq!(result.document_number(), "");
        assert_eq!(result.full_name(), "");
        assert_eq!(result.date_of_birth(), None);
        assert_eq!(result.date_of_issue(), None);
        assert_eq!(result.date_of_expiry(), None);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["documentNumber"], "");
        assert!(json["dateOfBirth"].is_null());
    }

    #[test]
    fn test_deterministic() {
        let extractor = extractor();
        let first = extractor.extract_at(PASSPORT_TEXT, "passport", now()).unwrap();
        let second = extractor.extract_at(PASSPORT_TEXT, "passport", now()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_validity_recomputes_identically() {
        let extractor = extractor();
        for (text, doc_type) in [(PAN_TEXT, "pan"), (PASSPORT_TEXT, "passport"), ("", "passport")] {
            let result = extractor.extract_at(text, doc_type, now()).unwrap();
            assert_eq!(extractor.is_valid_at(&result, now()).unwrap(), result.is_valid());
        }
    }

    #[test]
    fn test_input_limit() {
        let config = ExtractorConfig {
            max_input_bytes: 8,
            ..Default::default()
        };
        let extractor = DocumentExtractor::with_config(config).with_observer(Arc::new(NoopObserver));
        assert!(matches!(
            extractor.extract_at("ABCDE1234F", "pan", now()),
            Err(DocumentError::Processing(_))
        ));
    }

    #[test]
    fn test_invalid_utf8() {
        let result = extractor().extract_bytes(&[0x41, 0xff, 0xfe], "pan");
        assert!(matches!(result, Err(DocumentError::Processing(_))));
    }

    #[test]
    fn test_utf8_bytes() {
        let result = extractor().extract_bytes(PAN_TEXT.as_bytes(), "pan").unwrap();
        assert_eq!(result.document_number(), "ABCDE1234F");
    }

    #[test]
    fn test_event_stream() {
        let observer = Arc::new(RecordingObserver::default());
        let extractor = DocumentExtractor::new().with_observer(observer.clone());
        extractor.extract_at(PAN_TEXT, "pan", now()).unwrap();

        assert_eq!(
            observer.kinds(),
            vec![
                "started",
                "document_number",
                "name_matched",
                "name_matched",
                "date_candidate",
                "date_assigned",
                "finished",
            ]
        );
    }

    #[test]
    fn test_event_stream_reports_issues() {
        let observer = Arc::new(RecordingObserver::default());
        let extractor = DocumentExtractor::new().with_observer(observer.clone());
        extractor.extract_at("", "passport", now()).unwrap();

        let kinds = observer.kinds();
        assert_eq!(kinds.first(), Some(&"started"));
        assert_eq!(kinds.last(), Some(&"finished"));
        assert_eq!(kinds.iter().filter(|k| **k == "validity_issue").count(), 2);
        assert!(kinds.contains(&"name_missing"));
    }

    #[test]
    fn test_shared_across_threads() {
        let extractor = Arc::new(extractor());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let extractor = Arc::clone(&extractor);
                std::thread::spawn(move || extractor.extract_at(PAN_TEXT, "pan", now()).unwrap())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().document_number(), "ABCDE1234F");
        }
    }
}
