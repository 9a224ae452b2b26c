//! Window Statistics

/// Aggregate statistics over the held reading window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStats {
    /// Mean value
    pub mean: f64,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
}

impl WindowStats {
    /// Compute statistics from a slice of values; `None` when empty
    pub fn compute(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let min = values.iter().cloned().fold(f64::MAX, f64::min);
        let max = values.iter().cloned().fold(f64::MIN, f64::max);

        Some(Self { mean, min, max })
    }
}
