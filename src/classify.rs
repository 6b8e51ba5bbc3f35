//! Magnitude classification.
//!
//! Maps a magnitude to a discrete color bucket under an ordered scheme of
//! exclusive lower bounds. Classification is total: every finite magnitude
//! resolves to exactly one color.

/// One bucket: values strictly above `lower` (and at or below the next
/// bucket's bound) take `color`.
#[derive(Debug, Clone, Copy)]
struct Bucket {
    lower: f64,
    color: &'static str,
}

/// An ordered magnitude-to-color mapping.
///
/// Bounds are strictly decreasing; evaluation scans highest-to-lowest and
/// returns the color of the first bound strictly less than the magnitude,
/// falling back to `fallback` below all bounds. A magnitude exactly equal
/// to a bound falls to the next lower bucket.
#[derive(Debug, Clone)]
pub struct ClassificationScheme {
    buckets: Vec<Bucket>,
    fallback: &'static str,
}

impl ClassificationScheme {
    /// Create a scheme from `(lower_bound_exclusive, color)` pairs in
    /// descending bound order, plus the color for values below all bounds.
    ///
    /// # Panics
    ///
    /// Panics if the bounds are not strictly decreasing.
    #[must_use]
    pub fn new(buckets: &[(f64, &'static str)], fallback: &'static str) -> Self {
        for pair in buckets.windows(2) {
            assert!(
                pair[0].0 > pair[1].0,
                "scheme bounds must be strictly decreasing: {} then {}",
                pair[0].0,
                pair[1].0
            );
        }

        Self {
            buckets: buckets
                .iter()
                .map(|&(lower, color)| Bucket { lower, color })
                .collect(),
            fallback,
        }
    }

    /// The six-bucket gradient used for the all-earthquakes layer and the
    /// legend.
    #[must_use]
    pub fn six_bucket() -> Self {
        Self::new(
            &[
                (5.0, "#ea2c2c"),
                (4.0, "#ea822c"),
                (3.0, "#ee9c00"),
                (2.0, "#eecc00"),
                (1.0, "#d4ee00"),
            ],
            "#98ee00",
        )
    }

    /// The three-bucket threshold scheme used for the major-earthquakes
    /// layer.
    #[must_use]
    pub fn three_bucket() -> Self {
        Self::new(&[(6.0, "red"), (5.0, "orange")], "yellow")
    }

    /// Resolve a magnitude to its bucket color.
    #[must_use]
    pub fn classify(&self, magnitude: f64) -> &'static str {
        self.buckets
            .iter()
            .find(|b| magnitude > b.lower)
            .map_or(self.fallback, |b| b.color)
    }

    /// Bucket colors in ascending magnitude order, fallback first.
    #[must_use]
    pub fn colors_ascending(&self) -> Vec<&'static str> {
        let mut colors = vec![self.fallback];
        colors.extend(self.buckets.iter().rev().map(|b| b.color));
        colors
    }

    /// Exclusive lower bounds in ascending order.
    #[must_use]
    pub fn bounds_ascending(&self) -> Vec<f64> {
        self.buckets.iter().rev().map(|b| b.lower).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_bucket_totality() {
        let scheme = ClassificationScheme::six_bucket();
        let palette = scheme.colors_ascending();

        for mag in [-2.0, 0.0, 0.5, 1.0, 1.5, 2.0, 3.3, 4.4, 5.0, 5.1, 9.5] {
            let color = scheme.classify(mag);
            assert!(palette.contains(&color), "no bucket for magnitude {mag}");
        }
    }

    #[test]
    fn test_six_bucket_monotonic() {
        let scheme = ClassificationScheme::six_bucket();
        let palette = scheme.colors_ascending();
        let index = |color| {
            palette
                .iter()
                .position(|&c| c == color)
                .expect("known color")
        };

        let mut mags: Vec<f64> = Vec::new();
        let mut m = -1.0;
        while m < 8.0 {
            mags.push(m);
            m += 0.25;
        }

        for pair in mags.windows(2) {
            let lo = index(scheme.classify(pair[0]));
            let hi = index(scheme.classify(pair[1]));
            assert!(hi >= lo, "bucket order inverted between {} and {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_bound_is_exclusive() {
        let scheme = ClassificationScheme::six_bucket();
        // Exactly 5.0 is not ">5", so it belongs to the 4..=5 bucket.
        assert_eq!(scheme.classify(5.0), "#ea822c");
        assert_eq!(scheme.classify(5.000001), "#ea2c2c");
    }

    #[test]
    fn test_three_bucket_thresholds() {
        let scheme = ClassificationScheme::three_bucket();
        assert_eq!(scheme.classify(6.0), "orange");
        assert_eq!(scheme.classify(6.1), "red");
        assert_eq!(scheme.classify(3.0), "yellow");
    }

    #[test]
    fn test_below_all_bounds_falls_back() {
        let scheme = ClassificationScheme::six_bucket();
        assert_eq!(scheme.classify(0.0), "#98ee00");
        assert_eq!(scheme.classify(-3.2), "#98ee00");
    }

    #[test]
    #[should_panic(expected = "strictly decreasing")]
    fn test_unordered_bounds_rejected() {
        let _ = ClassificationScheme::new(&[(2.0, "a"), (2.0, "b")], "c");
    }
}
