//! Per-widget chart data pipeline
//!
//! Every chart widget on the dashboard runs the same three stages with a
//! narrow configuration surface: extract (or take) a category set, bucket
//! records by calendar day within a date window, then materialize the
//! zero-filled series with session-stable colors. Widgets differ only in
//! their accessors and configuration, never in the pipeline itself.

use crate::bucket::bucket_records;
use crate::color::{ColorAssignment, ColorStrategy, NOT_RELEVANT};
use crate::date_key::{DateKey, DateWindow};
use crate::extract::{extract_categories, CategorySet};
use crate::series::{materialize, ChartSeries};
use tracing::{debug, instrument};

/// Where a chart's category set comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySource {
    /// Externally specified ordered set (e.g., the six sentiment names)
    Fixed(CategorySet),
    /// Discovered from the records themselves, first-seen order
    Discovered,
}

/// Configuration for one chart widget's pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Inclusive date-range filter applied during bucketing
    pub window: DateWindow,
    /// Fixed or discovered category set
    pub categories: CategorySource,
    /// Fallback coloring for non-canonical categories
    pub color_strategy: ColorStrategy,
    /// Whether the "Not relevant" category participates in aggregation.
    /// The source widgets disagreed on this, so it is a per-widget flag.
    pub include_not_relevant: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            window: DateWindow::unbounded(),
            categories: CategorySource::Discovered,
            color_strategy: ColorStrategy::PaletteCycle,
            include_not_relevant: true,
        }
    }
}

/// One widget's aggregation pipeline with its session color cache
///
/// Colors are assigned the first time a category appears and reused on
/// every subsequent run, so refreshes never reshuffle a chart's colors.
#[derive(Debug, Clone)]
pub struct ChartPipeline {
    config: PipelineConfig,
    colors: ColorAssignment,
}

impl ChartPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            colors: ColorAssignment::new(),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Colors assigned so far in this widget session
    pub fn colors(&self) -> &ColorAssignment {
        &self.colors
    }

    /// Run the full pipeline with the x-axis derived from the bucketed
    /// dates, sorted ascending.
    #[instrument(skip_all)]
    pub fn run<R, D, T, I>(&mut self, records: &[R], date_of: D, tags_of: T) -> ChartSeries
    where
        D: Fn(&R) -> &str,
        T: Fn(&R) -> I,
        I: IntoIterator<Item = (String, u32)>,
    {
        let categories = self.resolve_categories(records, &tags_of);
        let bucket = bucket_records(records, &self.config.window, &date_of, &tags_of);
        let date_keys = bucket.date_keys();
        self.colors.assign(&categories, self.config.color_strategy);

        debug!(
            categories = categories.len(),
            dates = date_keys.len(),
            skipped = bucket.skipped(),
            "materializing chart series"
        );
        materialize(&bucket, &categories, &date_keys, &self.colors)
    }

    /// Run the full pipeline against a fixed externally-known x-axis
    #[instrument(skip_all)]
    pub fn run_with_axis<R, D, T, I>(
        &mut self,
        records: &[R],
        axis: &[DateKey],
        date_of: D,
        tags_of: T,
    ) -> ChartSeries
    where
        D: Fn(&R) -> &str,
        T: Fn(&R) -> I,
        I: IntoIterator<Item = (String, u32)>,
    {
        let categories = self.resolve_categories(records, &tags_of);
        let bucket = bucket_records(records, &self.config.window, &date_of, &tags_of);
        self.colors.assign(&categories, self.config.color_strategy);
        materialize(&bucket, &categories, axis, &self.colors)
    }

    /// Per-category totals within the window, ordered like the resolved
    /// category set; input for the top-N selector.
    pub fn totals<R, D, T, I>(&self, records: &[R], date_of: D, tags_of: T) -> Vec<(String, u32)>
    where
        D: Fn(&R) -> &str,
        T: Fn(&R) -> I,
        I: IntoIterator<Item = (String, u32)>,
    {
        let categories = self.resolve_categories(records, &tags_of);
        let bucket = bucket_records(records, &self.config.window, &date_of, &tags_of);
        bucket.totals(&categories)
    }

    fn resolve_categories<R, T, I>(&self, records: &[R], tags_of: &T) -> CategorySet
    where
        T: Fn(&R) -> I,
        I: IntoIterator<Item = (String, u32)>,
    {
        let categories = match &self.config.categories {
            CategorySource::Fixed(set) => set.clone(),
            CategorySource::Discovered => extract_categories(records, tags_of),
        };
        if self.config.include_not_relevant {
            categories
        } else {
            categories.without(|name| name.eq_ignore_ascii_case(NOT_RELEVANT))
        }
    }
}

impl Default for ChartPipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}
