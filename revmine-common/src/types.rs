//! Common types used across the RevMine application

use uuid::Uuid;

/// Unique identifier for a chart widget instance
pub type WidgetId = Uuid;
