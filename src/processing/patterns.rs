//! Regex patterns shared by the field extractors.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // PAN: AAAAA9999A as a whole token
    pub static ref PAN_NUMBER: Regex = Regex::new(r"\b[A-Z]{5}[0-9]{4}[A-Z]\b").unwrap();

    // Passport numbers, tried in order
    pub static ref PASSPORT_NUMBERS: Vec<Regex> = vec![
        Regex::new(r"[A-Z][0-9]{8}").unwrap(),
        Regex::new(r"[A-Z]{2}[0-9]{7}").unwrap(),
        Regex::new(r"\b[0-9]{9}\b").unwrap(),
    ];

    // Date-shaped substrings. Parsing decides whether they are real dates.
    pub static ref DATE_CANDIDATES: Vec<Regex> = vec![
        // DD/MM/YYYY, DD-MM-YYYY, DD.MM.YYYY
        Regex::new(r"\b[0-9]{2}[/.\-][0-9]{2}[/.\-][0-9]{4}\b").unwrap(),
        // YYYY/MM/DD, YYYY-MM-DD
        Regex::new(r"\b[0-9]{4}[/\-][0-9]{2}[/\-][0-9]{2}\b").unwrap(),
        // 5 Jan 2020, 05 January 2020
        Regex::new(r"(?i)\b[0-9]{1,2}\s(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s[0-9]{4}\b").unwrap(),
    ];

    // Capitalized line made of letters, spaces, apostrophes and hyphens
    pub static ref NAME_LINE: Regex = Regex::new(r"^[A-Z][a-zA-Z\s'\-]{2,}$").unwrap();
}
