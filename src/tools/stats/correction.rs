use itertools::Itertools;
use log::debug;

use crate::data_structs::enums::CorrectionMethod;
use crate::data_structs::results::{
    ComparisonResult,
    CorrectedResult,
};

/// Adjusts p-values for multiple testing, keeping their order.
///
/// Absent p-values stay absent and are not counted as tests. Adjusted
/// values are capped at 1.
pub fn correct_p_values(
    p_values: &[Option<f64>],
    method: CorrectionMethod,
) -> Vec<Option<f64>> {
    let defined = p_values.iter().flatten().copied().collect_vec();
    let adjusted = match method.procedure() {
        Some(procedure) if !defined.is_empty() => adjustp::adjust(&defined, procedure),
        _ => defined,
    };
    debug!(
        "Corrected {} of {} p-values with {}",
        adjusted.len(),
        p_values.len(),
        method
    );

    let mut adjusted = adjusted.into_iter().map(|p| p.clamp(0.0, 1.0));
    p_values
        .iter()
        .map(|p| p.and_then(|_| adjusted.next()))
        .collect_vec()
}

/// Attaches adjusted p-values and significance flags (`p_adjusted < alpha`)
/// to the comparisons.
pub fn correct(
    comparisons: Vec<ComparisonResult>,
    method: CorrectionMethod,
    alpha: f64,
) -> Vec<CorrectedResult> {
    let raw = comparisons.iter().map(|c| c.p_value).collect_vec();
    comparisons
        .into_iter()
        .zip(correct_p_values(&raw, method))
        .map(|(comparison, p_adjusted)| CorrectedResult {
            comparison,
            significant: p_adjusted.is_some_and(|p| p < alpha),
            p_adjusted,
        })
        .collect_vec()
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    fn unwrap_all(values: Vec<Option<f64>>) -> Vec<f64> {
        values.into_iter().map(Option::unwrap).collect()
    }

    #[test]
    fn bonferroni_multiplies_by_test_count() {
        let adjusted = unwrap_all(correct_p_values(
            &[Some(0.01), Some(0.02), Some(0.04)],
            CorrectionMethod::Bonferroni,
        ));
        for (a, e) in adjusted.iter().zip([0.03, 0.06, 0.12]) {
            assert_approx_eq!(*a, e);
        }
    }

    #[test]
    fn bonferroni_caps_at_one() {
        let adjusted = unwrap_all(correct_p_values(
            &[Some(0.5), Some(0.01)],
            CorrectionMethod::Bonferroni,
        ));
        assert_approx_eq!(adjusted[0], 1.0);
        assert_approx_eq!(adjusted[1], 0.02);
    }

    #[test]
    fn benjamini_hochberg_reference() {
        let adjusted = unwrap_all(correct_p_values(
            &[Some(0.04), Some(0.01), Some(0.02)],
            CorrectionMethod::BenjaminiHochberg,
        ));
        assert_approx_eq!(adjusted[0], 0.04);
        assert_approx_eq!(adjusted[1], 0.03);
        assert_approx_eq!(adjusted[2], 0.03);
    }

    #[test]
    fn benjamini_yekutieli_reference() {
        // harmonic factor 1 + 1/2 + 1/3 on top of the BH step-up
        let adjusted = unwrap_all(correct_p_values(
            &[Some(0.04), Some(0.01), Some(0.02)],
            CorrectionMethod::BenjaminiYekutieli,
        ));
        assert_approx_eq!(adjusted[0], 0.073333333);
        assert_approx_eq!(adjusted[1], 0.055);
        assert_approx_eq!(adjusted[2], 0.055);
    }

    #[test]
    fn benjamini_hochberg_monotone_in_rank() {
        let raw = [0.2, 0.001, 0.049, 0.03, 0.8, 0.011, 0.04, 0.5];
        let adjusted = unwrap_all(correct_p_values(
            &raw.iter().copied().map(Some).collect_vec(),
            CorrectionMethod::BenjaminiHochberg,
        ));
        let by_rank = raw
            .iter()
            .zip(adjusted.iter())
            .sorted_by(|a, b| a.0.total_cmp(b.0))
            .map(|(_, adj)| *adj)
            .collect_vec();
        assert!(by_rank.windows(2).all(|w| w[0] <= w[1]));
        for (r, a) in raw.iter().zip(adjusted.iter()) {
            assert!(a >= r);
        }
    }

    #[test]
    fn absent_values_are_skipped() {
        let adjusted = correct_p_values(
            &[Some(0.01), None, Some(0.02)],
            CorrectionMethod::Bonferroni,
        );
        assert!(adjusted[1].is_none());
        assert_approx_eq!(adjusted[0].unwrap(), 0.02);
        assert_approx_eq!(adjusted[2].unwrap(), 0.04);
        assert!(correct_p_values(&[None, None], CorrectionMethod::BenjaminiHochberg)
            .iter()
            .all(Option::is_none));
    }

    #[test]
    fn no_correction_is_identity() {
        let raw = [Some(0.3), Some(0.01)];
        assert_eq!(correct_p_values(&raw, CorrectionMethod::None), raw.to_vec());
    }
}
