//! Utility functions used across the RevMine application

use uuid::Uuid;

/// Generate a new unique widget instance ID
pub fn new_widget_id() -> Uuid {
    Uuid::new_v4()
}
