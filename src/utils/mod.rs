//! This module contains utility functions and helper macros used throughout
//! the sigbox crate.
//!
//! Key functionalities include:
//!
//! - Statistical primitives: Shapiro-Wilk, Anderson-Darling, Student/Welch
//!   t-tests, Mann-Whitney U, one-way ANOVA, Kruskal-Wallis and Levene tests.
//! - Linear-interpolation quantiles and per-group IQR trimming.
//! - The `with_field_fn!` macro generating builder-style `with_*` methods.

mod stats;
pub use stats::*;

#[macro_export]
macro_rules! with_field_fn {
    ($field_name: ident, $field_type: ty) => {
        paste::paste! {
            pub fn [<with_$field_name>](mut self, value: $field_type) -> Self {
            self.$field_name = value;
            self
            }
        }
    };
}
pub use with_field_fn;

/// Quantile of an ascending slice with linear interpolation between the
/// closest ranks (the default method of pandas and numpy).
pub fn quantile_sorted(
    sorted: &[f64],
    q: f64,
) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

/// Sorted copy of the values, NaNs ordered last.
pub fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Keeps the values lying within the `[q_min, q_max]` quantiles of the
/// sample. Input order is preserved.
pub fn iqr_trim(
    values: &[f64],
    q_min: f64,
    q_max: f64,
) -> Vec<f64> {
    let sorted = sorted_copy(values);
    match (quantile_sorted(&sorted, q_min), quantile_sorted(&sorted, q_max)) {
        (Some(low), Some(high)) => values
            .iter()
            .copied()
            .filter(|v| *v >= low && *v <= high)
            .collect(),
        _ => values.to_vec(),
    }
}

/// Minimum and maximum of the values, `None` for an empty input.
pub fn min_max<'a, I: IntoIterator<Item = &'a f64>>(values: I) -> Option<(f64, f64)> {
    values.into_iter().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
