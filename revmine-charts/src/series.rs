//! Materialization of buckets into the `{labels, datasets}` chart shape

use crate::bucket::Bucket;
use crate::color::ColorAssignment;
use crate::date_key::DateKey;
use crate::extract::CategorySet;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Color used when a dataset's category has no assignment
const UNASSIGNED_COLOR: &str = "#9e9e9e";

/// One series of counts for a single category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<u32>,
    pub background_color: String,
}

/// Final chart input: ordered date labels plus one positionally aligned,
/// zero-filled count series per category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartSeries {
    /// The neutral shape widgets render as "select inputs to view chart"
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.datasets.is_empty()
    }
}

/// Produce a `ChartSeries` from a bucket.
///
/// `date_keys` is the x-axis; callers usually pass `bucket.date_keys()` but
/// may supply a fixed externally-known range. Every category in the set
/// yields one dataset whose length equals the label count, with zeros where
/// the bucket has no entry. Dataset order matches the category set order
/// exactly; legend ordering and color alignment depend on it.
///
/// Empty categories or date keys are not an error: the result is the empty
/// series and a warning is logged.
pub fn materialize(
    bucket: &Bucket,
    categories: &CategorySet,
    date_keys: &[DateKey],
    colors: &ColorAssignment,
) -> ChartSeries {
    if categories.is_empty() || date_keys.is_empty() {
        warn!(
            categories = categories.len(),
            dates = date_keys.len(),
            "no categories or dates to materialize; returning empty series"
        );
        return ChartSeries::empty();
    }

    let labels = date_keys.iter().map(DateKey::to_string).collect();
    let datasets = categories
        .iter()
        .map(|category| Dataset {
            label: category.to_string(),
            data: date_keys
                .iter()
                .map(|key| bucket.count(*key, category))
                .collect(),
            background_color: colors
                .color_for(category)
                .unwrap_or(UNASSIGNED_COLOR)
                .to_string(),
        })
        .collect();

    ChartSeries { labels, datasets }
}
