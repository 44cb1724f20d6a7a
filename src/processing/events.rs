//! Structured extraction events and the observers that receive them.
//!
//! The extractor reports what it found at each step through an injected
//! [`ExtractionObserver`] instead of writing to a process-wide logger, so
//! concurrent requests can each carry their own sink.

use crate::models::{DocumentType, Field};
use crate::processing::dates::{DateCandidate, DateRole};
use crate::processing::extractors::NameSource;

#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionEvent<'a> {
    Started {
        document_type: DocumentType,
        text_len: usize,
    },
    /// `value` is empty when no pattern matched.
    DocumentNumber { value: &'a str },
    DateCandidate { candidate: &'a DateCandidate },
    DateAssigned { role: DateRole, date: &'a str },
    NameMatched {
        field: Field,
        value: &'a str,
        source: NameSource,
    },
    NameMissing { field: Field },
    ValidityIssue { field: Field, message: &'a str },
    Finished {
        document_type: DocumentType,
        is_valid: bool,
    },
}

impl ExtractionEvent<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractionEvent::Started { .. } => "started",
            ExtractionEvent::DocumentNumber { .. } => "document_number",
            ExtractionEvent::DateCandidate { .. } => "date_candidate",
            ExtractionEvent::DateAssigned { .. } => "date_assigned",
            ExtractionEvent::NameMatched { .. } => "name_matched",
            ExtractionEvent::NameMissing { .. } => "name_missing",
            ExtractionEvent::ValidityIssue { .. } => "validity_issue",
            ExtractionEvent::Finished { .. } => "finished",
        }
    }
}

pub trait ExtractionObserver: Send + Sync {
    fn on_event(&self, event: &ExtractionEvent<'_>);
}

/// Forwards events to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl ExtractionObserver for LogObserver {
    fn on_event(&self, event: &ExtractionEvent<'_>) {
        match event {
            ExtractionEvent::Started {
                document_type,
                text_len,
            } => log::info!(
                "Starting extraction for {} ({} bytes of text)",
                document_type,
                text_len
            ),
            ExtractionEvent::DocumentNumber { value } if value.is_empty() => {
                log::debug!("No document number found")
            }
            ExtractionEvent::DocumentNumber { value } => {
                log::debug!("Found document number: {}", value)
            }
            ExtractionEvent::DateCandidate { candidate } => match (candidate.date, candidate.role) {
                (None, _) => log::debug!("Ignoring unparseable date '{}'", candidate.raw),
                (Some(date), Some(role)) => {
                    log::debug!("Date '{}' -> {} ({})", candidate.raw, date, role.as_str())
                }
                (Some(date), None) => log::debug!("Date '{}' -> {} (unlabeled)", candidate.raw, date),
            },
            ExtractionEvent::DateAssigned { role, date } => {
                log::debug!("Assigned {} date: {}", role.as_str(), date)
            }
            ExtractionEvent::NameMatched {
                field,
                value,
                source,
            } => log::debug!("Found {}: {} via {:?}", field.name(), value, source),
            ExtractionEvent::NameMissing { field } => log::debug!("No {} found", field.name()),
            ExtractionEvent::ValidityIssue { field, message } => {
                log::debug!("Validity issue on {}: {}", field.name(), message)
            }
            ExtractionEvent::Finished {
                document_type,
                is_valid,
            } => log::info!(
                "Extraction completed for {} (valid: {})",
                document_type,
                is_valid
            ),
        }
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ExtractionObserver for NoopObserver {
    fn on_event(&self, _event: &ExtractionEvent<'_>) {}
}
