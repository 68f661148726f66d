//! Stable color assignment for chart categories

use crate::extract::CategorySet;
use std::collections::HashMap;

/// Sentiment label the dashboard uses for reviews no descriptor applies to
pub const NOT_RELEVANT: &str = "Not relevant";

/// Canonical descriptor colors, matched case-insensitively. A recognized
/// name maps to the same color in every chart.
const CANONICAL_COLORS: &[(&str, &str)] = &[
    ("happiness", "#2ecc71"),
    ("sadness", "#3498db"),
    ("anger", "#e74c3c"),
    ("fear", "#9b59b6"),
    ("surprise", "#f1c40f"),
    ("disgust", "#795548"),
    ("not relevant", "#95a5a6"),
];

/// Fallback palette cycled through for categories with no canonical color
const FALLBACK_PALETTE: &[&str] = &[
    "#ff6b6b", "#4ecdc4", "#45b7d1", "#96ceb4", "#feca57", "#ff9ff3", "#54a0ff", "#5f27cd",
    "#00d2d3", "#ff9f43",
];

/// How to color categories that have no canonical name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorStrategy {
    /// Deterministic: draw from the fallback palette by first-seen order,
    /// cycling when exhausted. Required for charts that re-render without
    /// changing their category set.
    #[default]
    PaletteCycle,
    /// Random color per category, stable only within one assignment
    Random,
}

/// Category name to color mapping, assigned once per widget session
///
/// Lookups are case-insensitive. Assigning again for a name that already
/// has a color is a no-op, so re-renders never reshuffle colors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorAssignment {
    colors: HashMap<String, String>,
    palette_cursor: usize,
}

impl ColorAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign colors for every category in the set that does not have one
    /// yet. Canonical names take their table color; the rest follow the
    /// chosen strategy. The palette cursor persists across calls so cycling
    /// continues where it left off.
    pub fn assign(&mut self, categories: &CategorySet, strategy: ColorStrategy) {
        for name in categories.iter() {
            let key = name.to_lowercase();
            if self.colors.contains_key(&key) {
                continue;
            }
            let color = match canonical_color(&key) {
                Some(color) => color.to_string(),
                None => match strategy {
                    ColorStrategy::PaletteCycle => {
                        let color = FALLBACK_PALETTE[self.palette_cursor % FALLBACK_PALETTE.len()];
                        self.palette_cursor += 1;
                        color.to_string()
                    }
                    ColorStrategy::Random => random_color(),
                },
            };
            self.colors.insert(key, color);
        }
    }

    /// Color for a category, if one has been assigned
    pub fn color_for(&self, name: &str) -> Option<&str> {
        self.colors.get(&name.to_lowercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Build a fresh assignment for a category set
pub fn assign_colors(categories: &CategorySet, strategy: ColorStrategy) -> ColorAssignment {
    let mut assignment = ColorAssignment::new();
    assignment.assign(categories, strategy);
    assignment
}

fn canonical_color(lowercase_name: &str) -> Option<&'static str> {
    CANONICAL_COLORS
        .iter()
        .find(|(name, _)| *name == lowercase_name)
        .map(|(_, color)| *color)
}

fn random_color() -> String {
    format!(
        "#{:02x}{:02x}{:02x}",
        fastrand::u8(..),
        fastrand::u8(..),
        fastrand::u8(..)
    )
}
