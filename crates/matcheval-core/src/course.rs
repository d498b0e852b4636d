//! Course-payload parsing and vocabulary flagging.
//!
//! Each source record carries two raw payload strings, one per scoring
//! method, encoding a list of course or skill entries in a small delimited
//! format: entries separated by `;`, sub-fields within an entry separated
//! by `|`, the whole string optionally prefixed with the literal marker
//! `CS=`. Everything in this module is a pure function over those strings.

use std::collections::HashSet;

/// Literal marker some payload exports prepend to the first entry.
const PAYLOAD_PREFIX: &str = "CS=";

/// Parses a raw payload string into table rows.
///
/// The string is split on `;` into entries after stripping the `CS=`
/// prefix; empty and whitespace-only entries are discarded. In
/// `simple_mode` each entry becomes a one-cell row as-is. Otherwise
/// entries are split on `|` into sub-fields:
///
/// * `fields_to_extract` holds 1-based sub-field indices; an index an
///   entry does not reach is silently dropped, so rows may come out with
///   different lengths.
/// * `None` keeps every sub-field in its original order.
pub fn parse_course_data(
    raw: &str,
    fields_to_extract: Option<&[usize]>,
    simple_mode: bool,
) -> Vec<Vec<String>> {
    let data = raw.strip_prefix(PAYLOAD_PREFIX).unwrap_or(raw).trim();
    let entries = data.split(';').map(str::trim).filter(|e| !e.is_empty());

    if simple_mode {
        return entries.map(|entry| vec![entry.to_string()]).collect();
    }

    entries
        .map(|entry| {
            let parts: Vec<&str> = entry.split('|').collect();
            match fields_to_extract {
                Some(indices) => indices
                    .iter()
                    .filter_map(|&i| i.checked_sub(1).and_then(|j| parts.get(j)))
                    .map(|part| part.trim().to_string())
                    .collect(),
                None => parts.iter().map(|part| part.trim().to_string()).collect(),
            }
        })
        .collect()
}

/// Splits a raw comma-separated key-skills cell into clean entries.
pub fn parse_key_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Case-insensitive membership set of known subject names.
#[derive(Debug, Clone, Default)]
pub struct SubjectVocabulary {
    names: HashSet<String>,
}

impl SubjectVocabulary {
    /// Builds the set from raw names, lowercasing each entry.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|name| name.as_ref().trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .collect();
        Self { names }
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, subject: &str) -> bool {
        self.names.contains(&subject.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// One table cell: plain text, or a subject flagged as absent from the
/// reference vocabulary. The flag is structural so the rendering boundary
/// decides how "unknown" looks; the cell text itself is never rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseCell {
    Text(String),
    UnknownSubject(String),
}

impl CourseCell {
    pub fn as_str(&self) -> &str {
        match self {
            CourseCell::Text(text) | CourseCell::UnknownSubject(text) => text,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, CourseCell::UnknownSubject(_))
    }
}

/// Flags the first column of each row when its subject is absent from the
/// vocabulary. Remaining columns pass through untouched; rows that came
/// out empty stay empty.
pub fn flag_unknown(rows: Vec<Vec<String>>, vocabulary: &SubjectVocabulary) -> Vec<Vec<CourseCell>> {
    rows.into_iter()
        .map(|row| {
            row.into_iter()
                .enumerate()
                .map(|(column, cell)| {
                    if column == 0 && !vocabulary.contains(&cell) {
                        CourseCell::UnknownSubject(cell)
                    } else {
                        CourseCell::Text(cell)
                    }
                })
                .collect()
        })
        .collect()
}
