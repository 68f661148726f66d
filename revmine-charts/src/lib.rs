//! Chart data aggregation for the RevMine review-mining dashboard
//!
//! Turns collections of reviews or pre-aggregated per-day statistics into
//! the `{labels, datasets}` shape consumed by the dashboard's chart
//! renderer: category extraction, date normalization, temporal bucketing,
//! series materialization, stable color assignment, top-N selection, and a
//! generation-counter guard for widget refreshes.

pub mod bucket;
pub mod color;
pub mod date_key;
pub mod extract;
pub mod pipeline;
pub mod refresh;
pub mod series;
pub mod top_n;

// Re-export commonly used types
pub use bucket::{bucket_records, Bucket};
pub use color::{assign_colors, ColorAssignment, ColorStrategy, NOT_RELEVANT};
pub use date_key::{DateKey, DateWindow};
pub use extract::{extract_categories, CategorySet};
pub use pipeline::{CategorySource, ChartPipeline, PipelineConfig};
pub use refresh::{ChartWidget, RecordSource, RefreshCoordinator};
pub use series::{materialize, ChartSeries, Dataset};
pub use top_n::select_top;
