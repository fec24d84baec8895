use std::cmp::Ordering;
use std::f64::consts::{
    FRAC_1_SQRT_2,
    PI,
};

use log::*;
use num::Float;
use statrs::distribution::{
    ChiSquared,
    ContinuousCDF,
    FisherSnedecor,
    Normal,
    StudentsT,
};
use statrs::statistics::Statistics;

use super::{
    quantile_sorted,
    sorted_copy,
};

/// Samples below this size (on both sides, without ties) get an exact
/// Mann-Whitney U p-value.
const MWU_EXACT_LIMIT: usize = 8;

fn std_normal() -> Normal {
    Normal::new(0.0, 1.0).expect("standard normal parameters are valid")
}

/// Evaluates `c[0] + c[1] * x + c[2] * x^2 + ...`.
fn poly(
    coefs: &[f64],
    x: f64,
) -> f64 {
    coefs
        .iter()
        .rev()
        .fold(0.0, |acc, c| acc * x + c)
}

/// Represents an observation in a rank-based test
#[derive(Debug)]
struct Observation<F: Float> {
    /// The observed value
    value: F,
    /// Which group the observation belongs to
    group: usize,
    /// The assigned rank of this observation
    rank:  f64,
}

/// Pools the groups, assigns 1-based ranks (ties get the average rank) and
/// returns the observations together with the sizes of every tie block.
fn rank_observations<F: Float>(groups: &[&[F]]) -> (Vec<Observation<F>>, Vec<usize>) {
    let mut observations: Vec<Observation<F>> = groups
        .iter()
        .enumerate()
        .flat_map(|(group, values)| {
            values.iter().map(move |&value| {
                Observation {
                    value,
                    group,
                    rank: 0.0,
                }
            })
        })
        .collect();

    observations.sort_by(|a, b| {
        a.value
            .partial_cmp(&b.value)
            .unwrap_or(Ordering::Equal)
    });

    let mut tie_groups: Vec<usize> = Vec::new();
    let mut i = 0;
    while i < observations.len() {
        let start = i;
        let mut end = i + 1;

        while end < observations.len() && observations[end].value == observations[start].value {
            end += 1;
        }

        let count = end - start;
        let avg_rank = (start as f64 + 1.0 + end as f64) / 2.0;
        for obs in observations[start..end].iter_mut() {
            obs.rank = avg_rank;
        }
        if count > 1 {
            tie_groups.push(count);
        }
        i = end;
    }

    (observations, tie_groups)
}

fn rank_sums<F: Float>(
    observations: &[Observation<F>],
    n_groups: usize,
) -> Vec<f64> {
    let mut sums = vec![0.0; n_groups];
    for obs in observations {
        sums[obs.group] += obs.rank;
    }
    sums
}

fn tie_sum(tie_groups: &[usize]) -> f64 {
    tie_groups
        .iter()
        .map(|&t| (t * t * t - t) as f64)
        .sum()
}

/// Probability that the Mann-Whitney U statistic is at least `u` under the
/// null hypothesis, from the exact permutation distribution.
fn mwu_exact_sf(
    u: usize,
    n1: usize,
    n2: usize,
) -> f64 {
    let max_u = n1 * n2;
    // counts[j][v]: orderings of i values from the first sample and j from
    // the second whose U statistic equals v
    let mut counts = vec![vec![0f64; max_u + 1]; n2 + 1];
    for row in counts.iter_mut() {
        row[0] = 1.0;
    }
    for _ in 1..=n1 {
        let mut next = vec![vec![0f64; max_u + 1]; n2 + 1];
        next[0][0] = 1.0;
        for j in 1..=n2 {
            for v in 0..=max_u {
                let largest_from_first = if v >= j { counts[j][v - j] } else { 0.0 };
                next[j][v] = largest_from_first + next[j - 1][v];
            }
        }
        counts = next;
    }
    let distribution = &counts[n2];
    let total: f64 = distribution.iter().sum();
    distribution[u.min(max_u)..].iter().sum::<f64>() / total
}

/// Performs the two-sided Mann-Whitney U test.
///
/// Returns the U statistic of `group1` and the p-value. Small samples
/// without ties use the exact distribution, otherwise the normal
/// approximation with tie and continuity correction is used. `None` when a
/// group is empty or when every observation is tied.
pub fn mann_whitney_u<F: Float>(
    group1: &[F],
    group2: &[F],
) -> Option<(f64, f64)> {
    debug!(
        "Performing Mann-Whitney U test: group1={}, group2={}",
        group1.len(),
        group2.len()
    );

    if group1.is_empty() || group2.is_empty() {
        warn!("Mann-Whitney U test: one or both groups are empty");
        return None;
    }

    let n1 = group1.len() as f64;
    let n2 = group2.len() as f64;
    let n_total = n1 + n2;

    let (observations, tie_groups) = rank_observations(&[group1, group2]);
    let r1 = rank_sums(&observations, 2)[0];

    let u1 = r1 - n1 * (n1 + 1.0) / 2.0;
    let u2 = n1 * n2 - u1;
    let u_max = u1.max(u2);

    if tie_groups.is_empty()
        && group1.len() < MWU_EXACT_LIMIT
        && group2.len() < MWU_EXACT_LIMIT
    {
        let sf = mwu_exact_sf(u_max.round() as usize, group1.len(), group2.len());
        let p_value = (2.0 * sf).min(1.0);
        trace!("Exact Mann-Whitney U: U={}, p={:.6}", u1, p_value);
        return Some((u1, p_value));
    }

    let mean_u = n1 * n2 / 2.0;
    let variance_u = n1 * n2 / 12.0
        * ((n_total + 1.0) - tie_sum(&tie_groups) / (n_total * (n_total - 1.0)));

    if variance_u <= 0.0 {
        warn!("Variance is zero in Mann-Whitney U test");
        return None;
    }

    let z = (u_max - mean_u - 0.5) / variance_u.sqrt();
    let p_value = (2.0 * std_normal().sf(z)).clamp(0.0, 1.0);

    trace!("Mann-Whitney U: U={}, z={:.4}, p={:.6}", u1, z, p_value);
    Some((u1, p_value))
}

/// Two-sample t-test for independent samples.
///
/// `equal_var = true` is Student's test with pooled variance, `false` is
/// Welch's test. Returns `(t, p)` or `None` when the standard error is zero
/// or there are not enough observations for the degrees of freedom.
pub fn ttest_ind(
    a: &[f64],
    b: &[f64],
    equal_var: bool,
) -> Option<(f64, f64)> {
    debug!(
        "Performing {} t-test: a={}, b={}",
        if equal_var { "Student" } else { "Welch" },
        a.len(),
        b.len()
    );

    if a.is_empty() || b.is_empty() {
        warn!("t-test: one or both groups are empty");
        return None;
    }
    if equal_var && a.len() + b.len() < 3 {
        return None;
    }
    if !equal_var && (a.len() < 2 || b.len() < 2) {
        return None;
    }

    let n1 = a.len() as f64;
    let n2 = b.len() as f64;
    let m1 = a.iter().mean();
    let m2 = b.iter().mean();
    let v1 = if a.len() > 1 { a.iter().variance() } else { 0.0 };
    let v2 = if b.len() > 1 { b.iter().variance() } else { 0.0 };

    let (std_err, df) = if equal_var {
        let df = n1 + n2 - 2.0;
        let pooled = ((n1 - 1.0) * v1 + (n2 - 1.0) * v2) / df;
        ((pooled * (1.0 / n1 + 1.0 / n2)).sqrt(), df)
    }
    else {
        let s1 = v1 / n1;
        let s2 = v2 / n2;
        let df = (s1 + s2).powi(2) / (s1.powi(2) / (n1 - 1.0) + s2.powi(2) / (n2 - 1.0));
        ((s1 + s2).sqrt(), df)
    };

    if !(std_err > 0.0) || !df.is_finite() {
        warn!("t-test statistic is undefined: zero variance");
        return None;
    }

    let t = (m1 - m2) / std_err;
    if !t.is_finite() {
        warn!("t-test statistic is undefined: non-finite input");
        return None;
    }
    let dist = StudentsT::new(0.0, 1.0, df).ok()?;
    let p_value = (2.0 * dist.sf(t.abs())).min(1.0);

    trace!("t-test: t={:.4}, df={:.2}, p={:.6}", t, df, p_value);
    Some((t, p_value))
}

/// One-way ANOVA F-test. `None` when a group is empty, when there are no
/// residual degrees of freedom or when the within-group variance is zero.
pub fn one_way_anova(groups: &[&[f64]]) -> Option<(f64, f64)> {
    let k = groups.len();
    if k < 2 || groups.iter().any(|g| g.is_empty()) {
        return None;
    }
    let n_total: usize = groups.iter().map(|g| g.len()).sum();
    if n_total <= k {
        return None;
    }

    let grand_mean = groups
        .iter()
        .flat_map(|g| g.iter())
        .mean();
    let (ss_between, ss_within) = groups
        .iter()
        .fold((0.0, 0.0), |(between, within), g| {
            let mean = g.iter().mean();
            let dev: f64 = g.iter().map(|v| (v - mean).powi(2)).sum();
            (
                between + g.len() as f64 * (mean - grand_mean).powi(2),
                within + dev,
            )
        });

    if ss_within <= 0.0 {
        warn!("ANOVA statistic is undefined: zero within-group variance");
        return None;
    }

    let df_between = (k - 1) as f64;
    let df_within = (n_total - k) as f64;
    let f = (ss_between / df_between) / (ss_within / df_within);
    if !f.is_finite() {
        warn!("ANOVA statistic is undefined: non-finite input");
        return None;
    }
    let p_value = FisherSnedecor::new(df_between, df_within)
        .ok()?
        .sf(f);

    debug!("ANOVA: F={:.4}, p={:.6}", f, p_value);
    Some((f, p_value))
}

/// Kruskal-Wallis H-test with tie correction.
pub fn kruskal_wallis<F: Float>(groups: &[&[F]]) -> Option<(f64, f64)> {
    let k = groups.len();
    if k < 2 || groups.iter().any(|g| g.is_empty()) {
        return None;
    }

    let (observations, tie_groups) = rank_observations(groups);
    let n = observations.len() as f64;
    let sums = rank_sums(&observations, k);

    let h = 12.0 / (n * (n + 1.0))
        * sums
            .iter()
            .zip(groups.iter())
            .map(|(r, g)| r * r / g.len() as f64)
            .sum::<f64>()
        - 3.0 * (n + 1.0);
    let correction = 1.0 - tie_sum(&tie_groups) / (n.powi(3) - n);

    if correction <= 0.0 {
        warn!("Kruskal-Wallis statistic is undefined: all values are tied");
        return None;
    }

    let h = h / correction;
    if !h.is_finite() {
        warn!("Kruskal-Wallis statistic is undefined: non-finite input");
        return None;
    }
    let p_value = ChiSquared::new((k - 1) as f64).ok()?.sf(h);

    debug!("Kruskal-Wallis: H={:.4}, p={:.6}", h, p_value);
    Some((h, p_value))
}

/// Levene's test for equal variances, centred on the group medians
/// (Brown-Forsythe variant).
pub fn levene(groups: &[&[f64]]) -> Option<(f64, f64)> {
    let deviations = groups
        .iter()
        .map(|g| {
            let median = quantile_sorted(&sorted_copy(g), 0.5)?;
            Some(g.iter().map(|v| (v - median).abs()).collect::<Vec<_>>())
        })
        .collect::<Option<Vec<_>>>()?;
    let refs: Vec<&[f64]> = deviations.iter().map(Vec::as_slice).collect();
    one_way_anova(&refs)
}

const SW_C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.071190, 4.434685, -2.706056];
const SW_C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
const SW_C3: [f64; 4] = [0.544, -0.39978, 0.025054, -6.714e-4];
const SW_C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
const SW_C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
const SW_C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];
const SW_G: [f64; 2] = [-2.273, 0.459];

/// Shapiro-Wilk W test for normality (Royston's approximation).
///
/// Returns `(W, p)`. `None` for fewer than three observations. A sample with
/// zero range gives `(1, 1)`.
pub fn shapiro_wilk(values: &[f64]) -> Option<(f64, f64)> {
    let n = values.len();
    if n < 3 || values.iter().any(|v| !v.is_finite()) {
        return None;
    }
    let x = sorted_copy(values);
    if x[n - 1] - x[0] == 0.0 {
        warn!("Shapiro-Wilk: input data has range zero");
        return Some((1.0, 1.0));
    }

    let nf = n as f64;
    let normal = std_normal();

    let coefs: Vec<f64> = if n == 3 {
        vec![-FRAC_1_SQRT_2, 0.0, FRAC_1_SQRT_2]
    }
    else {
        let m: Vec<f64> = (1..=n)
            .map(|i| normal.inverse_cdf((i as f64 - 0.375) / (nf + 0.25)))
            .collect();
        let summ2: f64 = m.iter().map(|v| v * v).sum();
        let ssumm2 = summ2.sqrt();
        let u = 1.0 / nf.sqrt();
        let a_n = m[n - 1] / ssumm2 + poly(&SW_C1, u);

        let mut a = vec![0.0; n];
        if n > 5 {
            let a_n1 = m[n - 2] / ssumm2 + poly(&SW_C2, u);
            let phi = (summ2 - 2.0 * m[n - 1].powi(2) - 2.0 * m[n - 2].powi(2))
                / (1.0 - 2.0 * a_n.powi(2) - 2.0 * a_n1.powi(2));
            let scale = phi.sqrt();
            for i in 2..n - 2 {
                a[i] = m[i] / scale;
            }
            a[1] = -a_n1;
            a[n - 2] = a_n1;
        }
        else {
            let phi = (summ2 - 2.0 * m[n - 1].powi(2)) / (1.0 - 2.0 * a_n.powi(2));
            let scale = phi.sqrt();
            for i in 1..n - 1 {
                a[i] = m[i] / scale;
            }
        }
        a[0] = -a_n;
        a[n - 1] = a_n;
        a
    };

    let mean = x.iter().mean();
    let ssq: f64 = x.iter().map(|v| (v - mean).powi(2)).sum();
    let numerator: f64 = coefs
        .iter()
        .zip(x.iter())
        .map(|(a, v)| a * v)
        .sum();
    let w = (numerator.powi(2) / ssq).min(1.0);

    if n == 3 {
        let p = 6.0 / PI * (w.sqrt().asin() - (0.75f64).sqrt().asin());
        return Some((w, p.clamp(0.0, 1.0)));
    }
    if w >= 1.0 {
        return Some((w, 1.0));
    }

    let y = (1.0 - w).ln();
    let z = if n <= 11 {
        let gamma = poly(&SW_G, nf);
        if y >= gamma {
            return Some((w, 0.0));
        }
        let y = -(gamma - y).ln();
        (y - poly(&SW_C3, nf)) / poly(&SW_C4, nf).exp()
    }
    else {
        let ln_n = nf.ln();
        (y - poly(&SW_C5, ln_n)) / poly(&SW_C6, ln_n).exp()
    };
    let p_value = normal.sf(z).clamp(0.0, 1.0);

    trace!("Shapiro-Wilk: n={}, W={:.5}, p={:.6}", n, w, p_value);
    Some((w, p_value))
}

/// Anderson-Darling test for normality with estimated mean and variance.
///
/// The statistic is adjusted for sample size and converted to a p-value
/// with the D'Agostino & Stephens approximation. Returns `(A², p)`, `None`
/// for fewer than three observations.
pub fn anderson_darling(values: &[f64]) -> Option<(f64, f64)> {
    let n = values.len();
    if n < 3 || values.iter().any(|v| !v.is_finite()) {
        return None;
    }
    let x = sorted_copy(values);
    let mean = x.iter().mean();
    let sd = x.iter().std_dev();
    if !(sd > 0.0) {
        warn!("Anderson-Darling: input data has zero variance");
        return Some((0.0, 1.0));
    }

    let normal = std_normal();
    let cdf: Vec<f64> = x
        .iter()
        .map(|v| {
            normal
                .cdf((v - mean) / sd)
                .clamp(f64::MIN_POSITIVE, 1.0 - f64::EPSILON)
        })
        .collect();

    let nf = n as f64;
    let s: f64 = (0..n)
        .map(|i| {
            (2.0 * (i + 1) as f64 - 1.0) / nf * (cdf[i].ln() + (1.0 - cdf[n - 1 - i]).ln())
        })
        .sum();
    let a2 = -nf - s;
    let a2_adj = a2 * (1.0 + 0.75 / nf + 2.25 / nf.powi(2));

    let p_value = if a2_adj >= 10.0 {
        // outside the range of the approximation
        0.0
    }
    else if a2_adj >= 0.6 {
        (1.2937 - 5.709 * a2_adj + 0.0186 * a2_adj.powi(2)).exp()
    }
    else if a2_adj >= 0.34 {
        (0.9177 - 4.279 * a2_adj - 1.38 * a2_adj.powi(2)).exp()
    }
    else if a2_adj >= 0.2 {
        1.0 - (-8.318 + 42.796 * a2_adj - 59.938 * a2_adj.powi(2)).exp()
    }
    else {
        1.0 - (-13.436 + 101.14 * a2_adj - 223.73 * a2_adj.powi(2)).exp()
    };
    let p_value = p_value.clamp(0.0, 1.0);

    trace!("Anderson-Darling: n={}, A2={:.5}, p={:.6}", n, a2, p_value);
    Some((a2, p_value))
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use statrs::distribution::{
        ContinuousCDF,
        Normal,
    };

    use super::*;

    /// Expected normal order statistics: a sample that is as normal as a
    /// sample of size `n` can be.
    fn normal_scores(
        n: usize,
        mean: f64,
        sd: f64,
    ) -> Vec<f64> {
        let normal = Normal::new(mean, sd).unwrap();
        (1..=n)
            .map(|i| normal.inverse_cdf((i as f64 - 0.375) / (n as f64 + 0.25)))
            .collect()
    }

    fn skewed(n: usize) -> Vec<f64> {
        (0..n).map(|i| (i as f64 * 0.45).exp()).collect()
    }

    #[test]
    fn test_utest() {
        let group1 = vec![1.5, 2.3, 3.1, 4.8, 5.7, 5.6];
        let group2 = vec![2.0, 3.5, 3.8, 4.0, 6.2, 3.5];

        let (u, p) = mann_whitney_u(&group1, &group2).unwrap();
        let (u_rev, p_rev) = mann_whitney_u(&group2, &group1).unwrap();
        assert_approx_eq!(p_rev, p);
        assert_approx_eq!(u + u_rev, 36.0);
        assert!(p > 0.5);
    }

    #[test]
    fn utest_exact_small_samples() {
        let (u, p) = mann_whitney_u(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]).unwrap();
        assert_approx_eq!(u, 0.0);
        // 2 / C(6, 3)
        assert_approx_eq!(p, 0.1);
    }

    #[test]
    fn utest_all_tied_is_undefined() {
        let tied = vec![2.0; 10];
        assert!(mann_whitney_u(&tied, &tied).is_none());
        assert!(mann_whitney_u::<f64>(&[], &[1.0]).is_none());
    }

    #[test]
    fn utest_shifted_samples() {
        let a: Vec<f64> = (0..20).map(f64::from).collect();
        let b: Vec<f64> = (0..20).map(|v| f64::from(v) + 30.0).collect();
        let (_, p) = mann_whitney_u(&a, &b).unwrap();
        assert!(p < 1e-6);
    }

    #[test]
    fn ttest_student_reference() {
        let (t, p) = ttest_ind(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], true).unwrap();
        assert_approx_eq!(t, -3.674234614, 1e-6);
        assert_approx_eq!(p, 0.021311641, 1e-5);
    }

    #[test]
    fn ttest_welch_equals_student_for_balanced_equal_variance() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [3.0, 4.0, 5.0, 6.0];
        let (t_s, _) = ttest_ind(&a, &b, true).unwrap();
        let (t_w, _) = ttest_ind(&a, &b, false).unwrap();
        assert_approx_eq!(t_s, t_w);
    }

    #[test]
    fn ttest_welch_reference() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [2.0, 4.0, 6.0, 8.0, 10.0];
        let (t, p) = ttest_ind(&a, &b, false).unwrap();
        assert_approx_eq!(t, -2.251436323, 1e-6);
        assert_approx_eq!(p, 0.069133593, 1e-5);
    }

    #[test]
    fn ttest_zero_variance_is_undefined() {
        assert!(ttest_ind(&[1.0, 1.0, 1.0], &[1.0, 1.0], true).is_none());
        assert!(ttest_ind(&[1.0, 1.0, 1.0], &[2.0, 2.0], false).is_none());
        assert!(ttest_ind(&[], &[2.0, 3.0], true).is_none());
    }

    #[test]
    fn anova_two_groups_matches_ttest() {
        let a = [1.0, 2.0, 3.0];
        let b = [4.0, 5.0, 6.0];
        let (f, p_anova) = one_way_anova(&[&a[..], &b[..]]).unwrap();
        let (t, p_t) = ttest_ind(&a, &b, true).unwrap();
        assert_approx_eq!(f, t * t, 1e-9);
        assert_approx_eq!(p_anova, p_t, 1e-9);
    }

    #[test]
    fn anova_degenerate() {
        let flat_a = [1.0, 1.0];
        let flat_b = [2.0, 2.0];
        let empty: [f64; 0] = [];
        assert!(one_way_anova(&[&flat_a[..], &flat_b[..]]).is_none());
        assert!(one_way_anova(&[&flat_a[..], &empty[..]]).is_none());
    }

    #[test]
    fn kruskal_reference() {
        let a = [1.0, 2.0, 3.0];
        let b = [4.0, 5.0, 6.0];
        let (h, p) = kruskal_wallis(&[&a[..], &b[..]]).unwrap();
        assert_approx_eq!(h, 27.0 / 7.0, 1e-9);
        assert_approx_eq!(p, 0.049534613, 1e-6);
    }

    #[test]
    fn kruskal_all_tied() {
        let a = [1.0, 1.0];
        assert!(kruskal_wallis(&[&a[..], &a[..], &a[..]]).is_none());
    }

    #[test]
    fn levene_detects_spread() {
        let narrow = normal_scores(30, 0.0, 1.0);
        let wide = normal_scores(30, 0.0, 10.0);
        let (_, p_diff) = levene(&[narrow.as_slice(), wide.as_slice()]).unwrap();
        let shifted = normal_scores(30, 5.0, 1.0);
        let (_, p_same) = levene(&[narrow.as_slice(), shifted.as_slice()]).unwrap();
        assert!(p_diff < 0.001);
        assert!(p_same > 0.9);
    }

    #[test]
    fn shapiro_normal_scores_pass() {
        for n in [3, 4, 5, 10, 11, 12, 30, 49] {
            let (w, p) = shapiro_wilk(&normal_scores(n, 10.0, 2.0)).unwrap();
            assert!(w > 0.9, "n={} w={}", n, w);
            assert!(p > 0.5, "n={} p={}", n, p);
        }
    }

    #[test]
    fn shapiro_skewed_fails() {
        let (_, p) = shapiro_wilk(&skewed(20)).unwrap();
        assert!(p < 0.01);
    }

    #[test]
    fn infinite_values_are_undefined() {
        let mut values = normal_scores(12, 0.0, 1.0);
        values[3] = f64::INFINITY;
        let finite = normal_scores(12, 2.0, 1.0);
        assert!(shapiro_wilk(&values).is_none());
        assert!(anderson_darling(&values).is_none());
        assert!(ttest_ind(&values, &finite, true).is_none());
        assert!(
            one_way_anova(&[values.as_slice(), finite.as_slice(), finite.as_slice()]).is_none()
        );
        assert!(levene(&[values.as_slice(), finite.as_slice()]).is_none());
        // ranks are still defined
        assert!(kruskal_wallis(&[values.as_slice(), finite.as_slice()]).is_some());
    }

    #[test]
    fn shapiro_small_and_constant() {
        assert!(shapiro_wilk(&[1.0, 2.0]).is_none());
        assert_eq!(shapiro_wilk(&[4.0, 4.0, 4.0]), Some((1.0, 1.0)));
        let (w, p) = shapiro_wilk(&[1.0, 2.0, 3.0]).unwrap();
        assert_approx_eq!(w, 1.0);
        assert_approx_eq!(p, 1.0);
    }

    #[test]
    fn anderson_darling_behaviour() {
        let (_, p_normal) = anderson_darling(&normal_scores(80, 0.0, 1.0)).unwrap();
        let (_, p_skewed) = anderson_darling(&skewed(80)).unwrap();
        assert!(p_normal > 0.5);
        assert!(p_skewed < 0.001);
        assert!(anderson_darling(&[1.0]).is_none());
    }
}
