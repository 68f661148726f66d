//! Temporal bucketing of records into per-day category counts

use crate::date_key::{DateKey, DateWindow};
use crate::extract::CategorySet;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, instrument, warn};

/// Mapping from `DateKey` to per-category occurrence counts
///
/// A date absent from the bucket means zero occurrences for every category
/// on that day. Dates iterate in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bucket {
    counts: BTreeMap<DateKey, HashMap<String, u32>>,
    skipped: usize,
}

impl Bucket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `weight` occurrences of `category` on `key`
    pub fn increment(&mut self, key: DateKey, category: &str, weight: u32) {
        if weight == 0 {
            return;
        }
        *self
            .counts
            .entry(key)
            .or_default()
            .entry(category.to_string())
            .or_insert(0) += weight;
    }

    /// Occurrences of `category` on `key`; absent pairs count as zero
    pub fn count(&self, key: DateKey, category: &str) -> u32 {
        self.counts
            .get(&key)
            .and_then(|per_category| per_category.get(category))
            .copied()
            .unwrap_or(0)
    }

    /// All date keys present in the bucket, sorted ascending
    pub fn date_keys(&self) -> Vec<DateKey> {
        self.counts.keys().copied().collect()
    }

    /// Per-category totals across all dates, ordered by the given set
    pub fn totals(&self, categories: &CategorySet) -> Vec<(String, u32)> {
        categories
            .iter()
            .map(|category| {
                let total = self
                    .counts
                    .values()
                    .filter_map(|per_category| per_category.get(category))
                    .sum();
                (category.to_string(), total)
            })
            .collect()
    }

    /// Number of distinct dates in the bucket
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Records excluded because their date could not be normalized
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

/// Bucket a collection of records by calendar day.
///
/// Single pass: each record's raw date is normalized, records outside the
/// window are dropped, and each of the record's weighted tags increments
/// the matching `(date, category)` count. A record whose date fails to
/// normalize is excluded with a warning; the rest of the collection still
/// aggregates. Records with no tags contribute nothing.
#[instrument(skip_all)]
pub fn bucket_records<R, D, T, I>(
    records: &[R],
    window: &DateWindow,
    date_of: D,
    tags_of: T,
) -> Bucket
where
    D: Fn(&R) -> &str,
    T: Fn(&R) -> I,
    I: IntoIterator<Item = (String, u32)>,
{
    let mut bucket = Bucket::new();

    for record in records {
        let raw_date = date_of(record);
        let key = match DateKey::parse(raw_date) {
            Ok(key) => key,
            Err(err) => {
                warn!(%err, "excluding record with unparseable date");
                bucket.skipped += 1;
                continue;
            }
        };
        if !window.contains(key.date()) {
            continue;
        }
        for (category, weight) in tags_of(record) {
            bucket.increment(key, &category, weight);
        }
    }

    debug!(
        dates = bucket.len(),
        skipped = bucket.skipped,
        "bucketed {} records",
        records.len()
    );
    bucket
}
