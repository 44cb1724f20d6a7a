//! Date discovery, parsing and role classification.

use chrono::NaiveDate;

use super::patterns::DATE_CANDIDATES;

/// Accepted layouts, tried in order. The first one that parses wins.
pub const DATE_FORMATS: [&str; 7] = [
    "%d/%m/%Y",
    "%Y/%m/%d",
    "%d-%m-%Y",
    "%Y-%m-%d",
    "%d %b %Y",
    "%d %B %Y",
    "%d.%m.%Y",
];

pub const CANONICAL_FORMAT: &str = "%Y-%m-%d";

const BIRTH_KEYWORDS: [&str; 4] = ["BIRTH", "DOB", "BORN", "जन्म"];
const ISSUE_KEYWORDS: [&str; 2] = ["ISSUE", "ISSUED"];
const EXPIRY_KEYWORDS: [&str; 3] = ["EXPIRY", "EXPIRES", "VALID UNTIL"];

/// Semantic role of a date on a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateRole {
    Birth,
    Issue,
    Expiry,
}

impl DateRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateRole::Birth => "birth",
            DateRole::Issue => "issue",
            DateRole::Expiry => "expiry",
        }
    }
}

/// Parse a date-shaped substring. `None` is the normal outcome for
/// false positives such as `31/02/2020`.
pub fn parse_date(candidate: &str) -> Option<NaiveDate> {
    let candidate = candidate.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(candidate, format).ok())
}

/// Parse a date already in `YYYY-MM-DD` form.
pub fn parse_canonical(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, CANONICAL_FORMAT).ok()
}

pub fn to_canonical(date: NaiveDate) -> String {
    date.format(CANONICAL_FORMAT).to_string()
}

/// Classify the text around a date. Birth beats issue beats expiry.
pub fn classify_context(context: &str) -> Option<DateRole> {
    let context = context.to_uppercase();
    let has_any = |keywords: &[&str]| keywords.iter().any(|k| context.contains(k));

    if has_any(&BIRTH_KEYWORDS) {
        Some(DateRole::Birth)
    } else if has_any(&ISSUE_KEYWORDS) {
        Some(DateRole::Issue)
    } else if has_any(&EXPIRY_KEYWORDS) {
        Some(DateRole::Expiry)
    } else {
        None
    }
}

/// Slice of `text` spanning `width` characters either side of `start..end`.
fn context_window(text: &str, start: usize, end: usize, width: usize) -> &str {
    let from = text[..start]
        .char_indices()
        .rev()
        .take(width)
        .last()
        .map_or(start, |(i, _)| i);
    let to = text[end..]
        .char_indices()
        .nth(width)
        .map_or(text.len(), |(i, _)| end + i);
    &text[from..to]
}

/// A date-shaped substring and what became of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateCandidate {
    pub raw: String,
    pub start: usize,
    pub end: usize,
    pub date: Option<NaiveDate>,
    pub role: Option<DateRole>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedDates {
    pub birth: Option<NaiveDate>,
    pub issue: Option<NaiveDate>,
    pub expiry: Option<NaiveDate>,
    pub candidates: Vec<DateCandidate>,
}

impl ExtractedDates {
    pub fn get(&self, role: DateRole) -> Option<NaiveDate> {
        match role {
            DateRole::Birth => self.birth,
            DateRole::Issue => self.issue,
            DateRole::Expiry => self.expiry,
        }
    }

    pub fn canonical(&self, role: DateRole) -> Option<String> {
        self.get(role).map(to_canonical)
    }

    fn slot_mut(&mut self, role: DateRole) -> &mut Option<NaiveDate> {
        match role {
            DateRole::Birth => &mut self.birth,
            DateRole::Issue => &mut self.issue,
            DateRole::Expiry => &mut self.expiry,
        }
    }
}

/// Finds dates in OCR text and assigns them birth/issue/expiry roles.
#[derive(Debug, Clone)]
pub struct DateParser {
    context_window: usize,
}

impl DateParser {
    pub fn new(context_window: usize) -> Self {
        DateParser { context_window }
    }

    /// All date-shaped substrings in order of appearance, parsed and classified.
    ///
    /// Each pattern is scanned independently, so overlapping matches from
    /// different patterns (`01-02-2020-03-04`) are all kept. Identical spans
    /// are reported once.
    pub fn find_candidates(&self, text: &str) -> Vec<DateCandidate> {
        let mut spans: Vec<(usize, usize)> = DATE_CANDIDATES
            .iter()
            .flat_map(|pattern| pattern.find_iter(text).map(|m| (m.start(), m.end())))
            .collect();
        spans.sort();
        spans.dedup();

        let mut candidates: Vec<DateCandidate> = Vec::with_capacity(spans.len());
        for (start, end) in spans {
            let raw = &text[start..end];
            let date = parse_date(raw);
            let role = date.and_then(|_| {
                classify_context(context_window(text, start, end, self.context_window))
            });
            candidates.push(DateCandidate {
                raw: raw.to_string(),
                start,
                end,
                date,
                role,
            });
        }
        candidates
    }

    /// Assign roles: context first, then chronological position for the rest.
    ///
    /// The first labeled date of each role wins. Unlabeled dates are sorted
    /// and fill only the slots still empty: earliest to birth, second to
    /// issue, latest to expiry (the last needs at least three dates).
    pub fn extract(&self, text: &str) -> ExtractedDates {
        let candidates = self.find_candidates(text);
        let mut dates = ExtractedDates::default();

        let mut unlabeled = Vec::new();
        for candidate in &candidates {
            let Some(date) = candidate.date else { continue };
            match candidate.role {
                Some(role) => {
                    dates.slot_mut(role).get_or_insert(date);
                }
                None => unlabeled.push(date),
            }
        }

        unlabeled.sort();
        if let Some(first) = unlabeled.first() {
            dates.birth.get_or_insert(*first);
        }
        if unlabeled.len() > 1 {
            dates.issue.get_or_insert(unlabeled[1]);
        }
        if unlabeled.len() > 2 {
            if let Some(last) = unlabeled.last() {
                dates.expiry.get_or_insert(*last);
            }
        }

        dates.candidates = candidates;
        dates
    }
}

impl Default for DateParser {
    fn default() -> Self {
        Self::new(20)
    }
}
