//! Sort engine. Always returns a new vector; ties keep input order.

use std::cmp::Ordering;

use scoutads_common::{Creative, SortField, SortOrder};

pub fn sort_creatives(creatives: &[Creative], field: SortField, order: SortOrder) -> Vec<Creative> {
    let mut sorted = creatives.to_vec();
    // `sort_by` is stable, and reversing the comparator (not the output)
    // keeps equal keys in input order for both directions.
    sorted.sort_by(|a, b| {
        let ord = compare(a, b, field);
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
    sorted
}

/// Highest score first.
pub fn sort_by_score(creatives: &[Creative]) -> Vec<Creative> {
    sort_creatives(creatives, SortField::Score, SortOrder::Desc)
}

fn compare(a: &Creative, b: &Creative, field: SortField) -> Ordering {
    match field {
        SortField::Score | SortField::Unknown => a.score.cmp(&b.score),
        SortField::Duplicates => a.count_duplicates.cmp(&b.count_duplicates),
        SortField::DaysActive => a.days_active.cmp(&b.days_active),
        SortField::FirstSeen => a.first_seen.cmp(&b.first_seen),
        SortField::LastSeen => a.last_seen.cmp(&b.last_seen),
    }
}
