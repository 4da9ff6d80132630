//! Pure derivation of one displayable view.
//!
//! # Responsibility
//! - Validate, filter and sort one collection for a given query.
//!
//! # Invariants
//! - `compute_view` never panics and never returns an unusable record.
//! - An absent collection derives the same view as an empty one.
//! - Records with a missing or unparseable `createdTime` sort after every
//!   parseable timestamp, in both time directions.
//! - `SortOrder::Unrecognized` leaves the filtered order untouched.

use crate::model::container::ContainerRecord;
use crate::model::query::{QueryState, SortOrder};
use crate::view::collation::{compare_names, contains_folded};
use std::cmp::Ordering;
use time::OffsetDateTime;

/// Derives the ordered, filtered view of `collection` for `query`.
pub fn compute_view(
    collection: Option<&[ContainerRecord]>,
    query: &QueryState,
) -> Vec<ContainerRecord> {
    let Some(records) = collection else {
        return Vec::new();
    };

    let mut view = filter_records(records, query.search_term.as_str());
    sort_records(&mut view, query.sort_order);
    view
}

/// Keeps usable records whose name contains `search_term`, ignoring case.
///
/// Relative order of kept records is preserved.
pub fn filter_records(records: &[ContainerRecord], search_term: &str) -> Vec<ContainerRecord> {
    let needle = search_term.to_lowercase();
    records
        .iter()
        .filter(|record| {
            record
                .usable_name()
                .is_some_and(|name| contains_folded(name, needle.as_str()))
        })
        .cloned()
        .collect()
}

/// Stable in-place sort of `records` by `order`.
///
/// Records without a usable name compare as an empty name; callers are
/// expected to filter first.
pub fn sort_records(records: &mut Vec<ContainerRecord>, order: SortOrder) {
    match order {
        SortOrder::NameAscending => {
            records.sort_by(|left, right| compare_names(name_key(left), name_key(right)));
        }
        SortOrder::NameDescending => {
            records.sort_by(|left, right| compare_names(name_key(right), name_key(left)));
        }
        SortOrder::TimeAscending => sort_by_created(records, false),
        SortOrder::TimeDescending => sort_by_created(records, true),
        SortOrder::Unrecognized => {}
    }
}

/// Orders two creation instants; unparseable ones go last either way.
pub fn compare_created(
    left: Option<OffsetDateTime>,
    right: Option<OffsetDateTime>,
    descending: bool,
) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) if descending => right.cmp(&left),
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn sort_by_created(records: &mut Vec<ContainerRecord>, descending: bool) {
    // Parse once per record instead of once per comparison.
    let mut keyed = std::mem::take(records)
        .into_iter()
        .map(|record| (record.created_instant(), record))
        .collect::<Vec<_>>();
    keyed.sort_by(|(left, _), (right, _)| compare_created(*left, *right, descending));
    records.extend(keyed.into_iter().map(|(_, record)| record));
}

fn name_key(record: &ContainerRecord) -> &str {
    record.usable_name().unwrap_or_default()
}
