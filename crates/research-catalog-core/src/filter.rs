//! Filter engine: year constraint plus free-text substring search.
//!
//! # Algorithm
//!
//! For each record of the active collection:
//!
//! 1. If a year is selected and [`extract_year`] differs from it, exclude.
//! 2. If the query is empty, include.
//! 3. Otherwise build the record's haystack (normalized id, title, status,
//!    area, DICIHT code, link, PDF path, summary, year and joined
//!    investigators, separated by `" | "`) and include the record when the
//!    normalized query is a substring of it.
//!
//! Output keeps collection order. Every segment is read from every record,
//! whatever its collection; absent fields are empty segments.

use crate::extract::{extract_year, join_investigators};
use crate::models::{CollectionKind, Dataset, Record};
use crate::normalize::{normalize, normalize_opt};

/// Separator between haystack segments.
const HAYSTACK_SEPARATOR: &str = " | ";

/// Concatenated normalized text searched by free-text queries.
pub fn haystack(record: Record<'_>) -> String {
    let segments = [
        normalize_opt(record.id()),
        normalize_opt(record.title()),
        normalize_opt(record.status()),
        normalize_opt(record.area()),
        normalize_opt(record.dicith()),
        normalize_opt(record.link()),
        normalize_opt(record.pdf()),
        normalize_opt(record.summary()),
        normalize(&extract_year(record)),
        normalize(&join_investigators(record.investigators())),
    ];
    segments.join(HAYSTACK_SEPARATOR)
}

/// Whether `record` passes both the year constraint and the query.
///
/// `needle` must already be normalized; `year` is compared verbatim and an
/// empty `year` means no constraint.
pub fn matches(record: Record<'_>, needle: &str, year: &str) -> bool {
    if !year.is_empty() && extract_year(record) != year {
        return false;
    }
    if needle.is_empty() {
        return true;
    }
    haystack(record).contains(needle)
}

/// Select the records matching `query` and `year`, preserving order.
pub fn filter_records<'a, I>(records: I, query: &str, year: &str) -> Vec<Record<'a>>
where
    I: IntoIterator<Item = Record<'a>>,
{
    let needle = normalize(query);
    records
        .into_iter()
        .filter(|record| matches(*record, &needle, year))
        .collect()
}

/// Filter one collection of `dataset`.
pub fn filter<'a>(
    dataset: &'a Dataset,
    kind: CollectionKind,
    query: &str,
    year: &str,
) -> Vec<Record<'a>> {
    filter_records(dataset.records(kind), query, year)
}
