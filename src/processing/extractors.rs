// Field-specific extraction over raw OCR text
use std::cmp::Reverse;

use crate::models::DocumentType;
use crate::processing::patterns::{NAME_LINE, PAN_NUMBER, PASSPORT_NUMBERS};

const NAME_LABELS: [&str; 3] = ["name:", "surname:", "given names:"];
const FATHER_LABELS: [&str; 2] = ["father's name:", "father:"];
const NON_NAME_WORDS: [&str; 4] = ["PASSPORT", "LICENSE", "VALID", "EXPIRES"];

/// How a name was located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSource {
    /// Text following a label such as `Name:`.
    Label(&'static str),
    /// A capitalized line picked up when no label was present.
    Layout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMatch {
    pub value: String,
    pub source: NameSource,
}

/// Document number for the given type, or an empty string when nothing matches.
pub fn extract_document_number(text: &str, document_type: DocumentType) -> String {
    match document_type {
        DocumentType::Pan => extract_pan_number(text),
        DocumentType::Passport => extract_passport_number(text),
    }
}

pub fn extract_pan_number(text: &str) -> String {
    PAN_NUMBER
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// First passport pattern that matches anywhere in the text wins.
pub fn extract_passport_number(text: &str) -> String {
    PASSPORT_NUMBERS
        .iter()
        .find_map(|pattern| pattern.find(text))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Non-blank lines, trimmed.
fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(str::trim).filter(|line| !line.is_empty())
}

/// Value following the label that starts earliest in the line. When two
/// labels start together the longer one is reported (`surname:` over `name:`).
/// ASCII lowercasing keeps byte offsets aligned with the original line.
fn value_after_label<'a>(line: &'a str, labels: &[&'static str]) -> Option<(&'static str, &'a str)> {
    let lower = line.to_ascii_lowercase();
    labels
        .iter()
        .filter_map(|&label| lower.find(label).map(|pos| (pos, label)))
        .min_by_key(|&(pos, label)| (pos, Reverse(label.len())))
        .map(|(pos, label)| (label, line[pos + label.len()..].trim()))
}

fn find_labeled(text: &str, labels: &[&'static str], skip: &[&'static str]) -> Option<NameMatch> {
    lines(text)
        .filter(|line| value_after_label(line, skip).is_none())
        .find_map(|line| match value_after_label(line, labels) {
            Some((label, value)) if !value.is_empty() => Some(NameMatch {
                value: value.to_string(),
                source: NameSource::Label(label),
            }),
            _ => None,
        })
}

fn find_name_line(text: &str) -> Option<NameMatch> {
    lines(text)
        .find(|line| {
            let upper = line.to_uppercase();
            NAME_LINE.is_match(line) && !NON_NAME_WORDS.iter().any(|word| upper.contains(word))
        })
        .map(|line| NameMatch {
            value: line.to_string(),
            source: NameSource::Layout,
        })
}

/// Holder's name: labeled line first, capitalized-line layout fallback second.
/// Lines carrying a father's-name label are never read as the holder's name.
pub fn extract_full_name(text: &str) -> Option<NameMatch> {
    find_labeled(text, &NAME_LABELS, &FATHER_LABELS).or_else(|| find_name_line(text))
}

/// Father's name, label-based only.
pub fn extract_fathers_name(text: &str) -> Option<NameMatch> {
    find_labeled(text, &FATHER_LABELS, &[])
}
