//! Legend derivation.
//!
//! The legend is generated once from the classification scheme used for
//! the primary earthquake layer and never updated afterwards.

use serde::Serialize;

use crate::classify::ClassificationScheme;

/// One legend row: magnitude range and its swatch color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub lower: f64,
    /// Upper bound, or None for the open-ended top bucket.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper: Option<f64>,
    pub color: &'static str,
}

impl LegendEntry {
    /// Range label, e.g. `"2–3"` or `"5+"`.
    #[must_use]
    pub fn label(&self) -> String {
        match self.upper {
            Some(upper) => format!("{}\u{2013}{}", self.lower, upper),
            None => format!("{}+", self.lower),
        }
    }
}

/// Ordered legend rows, ascending by magnitude.
#[derive(Debug, Clone, Serialize)]
pub struct Legend {
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    /// Derive the legend from a scheme, one entry per bucket. The lowest
    /// bucket is displayed from zero; the highest is open-ended.
    #[must_use]
    pub fn from_scheme(scheme: &ClassificationScheme) -> Self {
        let bounds = scheme.bounds_ascending();
        let colors = scheme.colors_ascending();

        let entries = colors
            .into_iter()
            .enumerate()
            .map(|(i, color)| LegendEntry {
                lower: if i == 0 { 0.0 } else { bounds[i - 1] },
                upper: bounds.get(i).copied(),
                color,
            })
            .collect();

        Self { entries }
    }
}
