//! Upstream record shapes supplied by the review/statistics retrieval service
//!
//! The dashboard API hands back two forms: raw reviews carrying per-record
//! tag lists, and pre-aggregated per-day statistics carrying occurrence
//! lists. Both forms expose their tags as weighted `(name, count)` pairs so
//! the aggregation pipeline can consume either one through the same surface.

use serde::{Deserialize, Serialize};

/// The kinds of categorical tags attached to a review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    Sentiments,
    Features,
    Descriptors,
}

/// One reviewed-app event as returned by the review retrieval endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Raw date string; canonicalized later by the date normalizer
    pub date: String,
    pub app_id: Option<String>,
    pub app_name: Option<String>,
    #[serde(default)]
    pub sentiments: Option<Vec<String>>,
    #[serde(default)]
    pub features: Option<Vec<String>>,
    #[serde(default)]
    pub descriptors: Option<Vec<String>>,
    #[serde(default)]
    pub review_text: Option<String>,
}

impl Review {
    /// Tags of the given kind as weighted pairs; each raw tag weighs 1
    pub fn tags(&self, kind: TagKind) -> Vec<(String, u32)> {
        let list = match kind {
            TagKind::Sentiments => &self.sentiments,
            TagKind::Features => &self.features,
            TagKind::Descriptors => &self.descriptors,
        };
        list.as_deref()
            .unwrap_or_default()
            .iter()
            .map(|name| (name.clone(), 1))
            .collect()
    }
}

/// One `{name, occurrences}` entry of a pre-aggregated statistic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagOccurrence {
    pub name: String,
    pub occurrences: u32,
}

/// Pre-aggregated per-day statistic as returned by the statistics endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStatistic {
    /// Raw date string; canonicalized later by the date normalizer
    pub date: String,
    pub app_id: Option<String>,
    pub app_name: Option<String>,
    #[serde(default)]
    pub sentiment_occurrences: Vec<TagOccurrence>,
    #[serde(default)]
    pub feature_occurrences: Vec<TagOccurrence>,
}

impl DailyStatistic {
    /// Tags of the given kind as weighted pairs, carrying the stored
    /// occurrence counts. Descriptors are not pre-aggregated upstream.
    pub fn tags(&self, kind: TagKind) -> Vec<(String, u32)> {
        let list = match kind {
            TagKind::Sentiments => &self.sentiment_occurrences,
            TagKind::Features => &self.feature_occurrences,
            TagKind::Descriptors => return Vec::new(),
        };
        list.iter()
            .map(|occ| (occ.name.clone(), occ.occurrences))
            .collect()
    }
}
