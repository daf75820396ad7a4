/*!
 * Month facets for the document list.
 *
 * Facets are derived from the creation dates actually present in the archive and
 * recomputed on every request. Keys are zero-padded `YYYY-MM` strings, so plain
 * string ordering is chronological ordering.
 */

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::errors::InvalidFacetError;

/// One selectable month in the filter control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthFacet {
    /// Machine key, e.g. `2024-03`
    pub key: String,
    /// Display label, e.g. `March 2024`
    pub label: String,
}

/// A parsed month filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    /// Whether the timestamp falls in this year and month
    pub fn contains<Tz: TimeZone>(&self, timestamp: &DateTime<Tz>) -> bool {
        timestamp.year() == self.year && timestamp.month() == self.month
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = InvalidFacetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| InvalidFacetError {
            key: s.to_string(),
            reason: reason.to_string(),
        };

        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| invalid("expected YYYY-MM"))?;

        let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(year) || !all_digits(month) {
            return Err(invalid("expected YYYY-MM"));
        }

        let year: i32 = year.parse().map_err(|_| invalid("year out of range"))?;
        let month: u32 = month.parse().map_err(|_| invalid("month out of range"))?;
        if !(1..=12).contains(&month) {
            return Err(invalid("month must be between 01 and 12"));
        }

        Ok(Self { year, month })
    }
}

/// Derive the month facets for a set of documents, in UTC
pub fn derive_facets(documents: &[Document]) -> Vec<MonthFacet> {
    derive_facets_in(documents, &Utc)
}

/// Derive the month facets with creation dates shifted into `tz`.
///
/// Returns one facet per distinct month, newest first.
pub fn derive_facets_in<Tz>(documents: &[Document], tz: &Tz) -> Vec<MonthFacet>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut months: BTreeMap<String, String> = BTreeMap::new();

    for document in documents {
        let created = document.created.with_timezone(tz);
        months
            .entry(created.format("%Y-%m").to_string())
            .or_insert_with(|| created.format("%B %Y").to_string());
    }

    months
        .into_iter()
        .rev()
        .map(|(key, label)| MonthFacet { key, label })
        .collect()
}

/// Keep only the documents created in the selected month (UTC).
///
/// An absent or blank selection returns the input unchanged. A malformed key is
/// rejected with an error and nothing is filtered.
pub fn apply_facet(documents: Vec<Document>, selected: Option<&str>) -> Result<Vec<Document>, InvalidFacetError> {
    apply_facet_in(documents, selected, &Utc)
}

/// Like [`apply_facet`], with creation dates shifted into `tz`
pub fn apply_facet_in<Tz: TimeZone>(
    documents: Vec<Document>,
    selected: Option<&str>,
    tz: &Tz,
) -> Result<Vec<Document>, InvalidFacetError> {
    let selected = match selected.map(str::trim) {
        Some(key) if !key.is_empty() => key,
        _ => return Ok(documents),
    };

    let month: MonthKey = selected.parse()?;

    Ok(documents
        .into_iter()
        .filter(|doc| month.contains(&doc.created.with_timezone(tz)))
        .collect())
}
