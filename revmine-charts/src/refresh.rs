//! Widget refresh coordination with stale-response discarding
//!
//! Fetches for independent widgets may be in flight concurrently, and a
//! widget's user can trigger a new refresh while an older fetch is still
//! pending. Each refresh takes a generation from the widget's coordinator
//! before awaiting the fetch; results from any generation but the latest
//! are discarded instead of overwriting fresher state.

use crate::pipeline::{ChartPipeline, PipelineConfig};
use crate::series::ChartSeries;
use async_trait::async_trait;
use revmine_common::{utils::new_widget_id, Result, WidgetId};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// Asynchronous collaborator that retrieves a widget's records
#[async_trait]
pub trait RecordSource: Send + Sync {
    type Record: Send;

    async fn fetch(&self) -> Result<Vec<Self::Record>>;
}

/// Monotonically increasing refresh generation counter for one widget
#[derive(Debug, Default)]
pub struct RefreshCoordinator {
    current: AtomicU64,
}

impl RefreshCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a refresh; the returned generation invalidates all earlier ones
    pub fn begin(&self) -> u64 {
        self.current.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether a generation is still the most recent one
    pub fn is_current(&self, generation: u64) -> bool {
        self.current.load(Ordering::SeqCst) == generation
    }

    /// Accept a result only if its generation is still current
    pub fn commit<T>(&self, generation: u64, value: T) -> Option<T> {
        if self.is_current(generation) {
            Some(value)
        } else {
            debug!(generation, "discarding stale refresh result");
            None
        }
    }
}

/// One chart widget: its data source, pipeline, and last committed series
pub struct ChartWidget<S: RecordSource> {
    pub id: WidgetId,
    source: S,
    pipeline: ChartPipeline,
    coordinator: RefreshCoordinator,
    series: Option<ChartSeries>,
}

impl<S: RecordSource> ChartWidget<S> {
    pub fn new(source: S, config: PipelineConfig) -> Self {
        Self {
            id: new_widget_id(),
            source,
            pipeline: ChartPipeline::new(config),
            coordinator: RefreshCoordinator::new(),
            series: None,
        }
    }

    /// The last committed series, if any refresh has succeeded
    pub fn series(&self) -> Option<&ChartSeries> {
        self.series.as_ref()
    }

    pub fn coordinator(&self) -> &RefreshCoordinator {
        &self.coordinator
    }

    /// Start a refresh, invalidating every earlier in-flight generation.
    ///
    /// Callers that drive fetches themselves (so several can be in flight
    /// for this widget at once) take a generation here before awaiting the
    /// fetch and hand it back to [`complete_refresh`](Self::complete_refresh)
    /// with the records.
    pub fn begin_refresh(&self) -> u64 {
        self.coordinator.begin()
    }

    /// Recompute and commit the series for a fetched generation.
    ///
    /// Returns whether the series was committed; a generation superseded by
    /// a later `begin_refresh` is discarded without touching widget state.
    pub fn complete_refresh<D, T, I>(
        &mut self,
        generation: u64,
        records: &[S::Record],
        date_of: D,
        tags_of: T,
    ) -> bool
    where
        D: Fn(&S::Record) -> &str,
        T: Fn(&S::Record) -> I,
        I: IntoIterator<Item = (String, u32)>,
    {
        if !self.coordinator.is_current(generation) {
            debug!(widget = %self.id, generation, "discarding stale refresh result");
            return false;
        }
        let series = self.pipeline.run(records, date_of, tags_of);
        match self.coordinator.commit(generation, series) {
            Some(series) => {
                self.series = Some(series);
                true
            }
            None => false,
        }
    }

    /// Fetch records and recompute the chart series in one step.
    ///
    /// A failed fetch leaves the previous series displayed and returns the
    /// error for the caller to log; it is never surfaced to the user. A
    /// result whose generation has been superseded is discarded.
    pub async fn refresh<D, T, I>(&mut self, date_of: D, tags_of: T) -> Result<()>
    where
        D: Fn(&S::Record) -> &str,
        T: Fn(&S::Record) -> I,
        I: IntoIterator<Item = (String, u32)>,
    {
        let generation = self.begin_refresh();
        let records = match self.source.fetch().await {
            Ok(records) => records,
            Err(err) => {
                warn!(widget = %self.id, %err, "fetch failed; keeping previous chart state");
                return Err(err);
            }
        };

        self.complete_refresh(generation, &records, date_of, tags_of);
        Ok(())
    }
}
