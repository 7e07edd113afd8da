//! Sizing constants for the grid layout.
//!
//! [`GridMetrics`] collects every number the layout engine uses. The default
//! values reproduce the reference sizing; applications can override any
//! subset from a TOML table:
//!
//! ```
//! use kvgrid_core::GridMetrics;
//!
//! let metrics = GridMetrics::from_toml_str(r#"
//! char_width = 7
//! min_key_width = 90
//! "#)?;
//! assert_eq!(metrics.char_width, 7);
//! assert_eq!(metrics.side_margin, 20);
//! # Ok::<(), kvgrid_core::GridError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// Layout sizing configuration, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct GridMetrics {
    /// Distance from the grid's top edge to the first group's cursor.
    pub top_offset: i32,
    /// Approximate width of one character of label text.
    pub char_width: i32,
    /// Padding added to the measured width of the longest key.
    pub key_padding: i32,
    /// Lower bound of the key column width.
    pub min_key_width: i32,
    /// Left and right margin of each group box.
    pub side_margin: i32,
    /// Height of a group's title label.
    pub label_height: i32,
    /// Height of one key/value row.
    pub input_height: i32,
    /// Vertical padding between rows.
    pub row_padding: i32,
    /// Extra vertical gap between consecutive group boxes.
    pub group_gap: i32,
    /// Horizontal offset of the title inside its box.
    pub title_inset: i32,
    /// How far the title sits above the cursor, overlapping the box border.
    pub title_rise: i32,
    /// Added to the measured width of the title text.
    pub title_extra_width: i32,
    /// Horizontal offset of the key column inside its box.
    pub row_inset: i32,
    /// Gap between the key column and the value field.
    pub field_gap: i32,
    /// Horizontal space inside a box not taken by the value field.
    pub field_trailing: i32,
    pub title_font_size: u16,
    pub key_font_size: u16,
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self {
            top_offset: 15,
            char_width: 6,
            key_padding: 16,
            min_key_width: 70,
            side_margin: 20,
            label_height: 24,
            input_height: 25,
            row_padding: 4,
            group_gap: 10,
            title_inset: 10,
            title_rise: 7,
            title_extra_width: 20,
            row_inset: 15,
            field_gap: 5,
            field_trailing: 35,
            title_font_size: 10,
            key_font_size: 12,
        }
    }
}

impl GridMetrics {
    /// Parse metrics from a TOML table, filling missing fields with defaults.
    ///
    /// The result is validated before it is returned.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let metrics: Self = toml::from_str(source)?;
        metrics.validate()?;
        Ok(metrics)
    }

    /// Check that the metrics describe a usable layout.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("char_width", self.char_width),
            ("label_height", self.label_height),
            ("input_height", self.input_height),
        ];
        for (field, value) in positive {
            if value <= 0 {
                return Err(GridError::invalid_metrics(
                    field,
                    format!("must be positive, got {value}"),
                ));
            }
        }

        let non_negative = [
            ("top_offset", self.top_offset),
            ("key_padding", self.key_padding),
            ("min_key_width", self.min_key_width),
            ("side_margin", self.side_margin),
            ("row_padding", self.row_padding),
            ("group_gap", self.group_gap),
        ];
        for (field, value) in non_negative {
            if value < 0 {
                return Err(GridError::invalid_metrics(
                    field,
                    format!("must not be negative, got {value}"),
                ));
            }
        }

        Ok(())
    }

    /// Estimated pixel width of `text`, counted in characters.
    #[inline]
    pub fn text_width(&self, text: &str) -> i32 {
        let chars = i32::try_from(text.chars().count()).unwrap_or(i32::MAX);
        chars.saturating_mul(self.char_width)
    }
}
