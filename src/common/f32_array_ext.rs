//! `[f32]` extensions.

/// `[f32]` extensions.
pub trait F32ArrayExt {
    /// Returns the median value. For an even number of values, this is the
    /// mean of the two central values. Returns 0 for an empty slice.
    fn median(&self) -> f32;
}

impl F32ArrayExt for [f32] {
    fn median(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        };

        let mut sorted = self.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 0 {
            0.5 * (sorted[mid - 1] + sorted[mid])
        } else {
            sorted[mid]
        }
    }
}
