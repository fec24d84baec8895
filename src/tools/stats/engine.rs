use itertools::Itertools;
use log::{
    debug,
    warn,
};

use super::selector::{
    apply_variant,
    select_pairwise,
    select_test,
};
use crate::data_structs::dataset::Group;
use crate::data_structs::enums::{
    TTestVariant,
    TestKind,
};
use crate::data_structs::results::{
    ComparisonResult,
    OmnibusResult,
};
use crate::error::SigboxError;
use crate::utils::{
    kruskal_wallis,
    mann_whitney_u,
    one_way_anova,
    ttest_ind,
};

/// Raw, uncorrected output of the significance engine for one biomarker.
#[derive(Debug, Clone, PartialEq)]
pub struct PairwiseOutcome {
    pub comparisons: Vec<ComparisonResult>,
    pub omnibus:     Option<OmnibusResult>,
}

/// Runs a two-sample test. `None` when the statistic is undefined.
pub fn run_two_sample(
    kind: TestKind,
    a: &[f64],
    b: &[f64],
) -> Option<(f64, f64)> {
    match kind {
        TestKind::TTest => ttest_ind(a, b, true),
        TestKind::WelchTTest => ttest_ind(a, b, false),
        TestKind::MannWhitneyU => mann_whitney_u(a, b),
        TestKind::Anova => one_way_anova(&[a, b]),
        TestKind::KruskalWallis => kruskal_wallis(&[a, b]),
    }
}

/// Runs the selected test on every unordered pair of `groups` and, when
/// there are three or more groups, one omnibus test over all of them.
///
/// `groups` are expected in plotting order; pair positions refer to it.
/// Pairs involving an empty group, or whose statistic is undefined, are
/// kept with an absent p-value.
pub fn run_pairwise(
    groups: &[Group],
    normal: &[bool],
    variant: TTestVariant,
) -> Result<PairwiseOutcome, SigboxError> {
    let k = groups.len();
    let omnibus_kind = select_test(k, normal)?;

    let comparisons = (0..k)
        .tuple_combinations()
        .map(|(i, j)| {
            let (a, b) = (&groups[i], &groups[j]);
            let test = if k == 2 {
                omnibus_kind
            }
            else {
                select_pairwise(normal[i], normal[j])
            };
            let test = apply_variant(test, variant);

            let outcome = if a.is_empty() || b.is_empty() {
                warn!(
                    "Comparison '{}' vs '{}' skipped: empty group",
                    a.label, b.label
                );
                None
            }
            else {
                run_two_sample(test, &a.values, &b.values)
            };
            if a.n() > 0 && b.n() > 0 && outcome.is_none() {
                warn!(
                    "{} between '{}' and '{}' is undefined, no bar will be drawn",
                    test, a.label, b.label
                );
            }
            debug!(
                "{} vs {}: {} p={:?}",
                a.label,
                b.label,
                test,
                outcome.map(|o| o.1)
            );

            ComparisonResult {
                group_a: a.label.clone(),
                group_b: b.label.clone(),
                positions: (i, j),
                test,
                statistic: outcome.map(|o| o.0),
                p_value: outcome.map(|o| o.1),
            }
        })
        .collect_vec();

    let omnibus = if k >= 3 {
        let samples = groups
            .iter()
            .filter(|g| !g.is_empty())
            .map(|g| g.values.as_slice())
            .collect_vec();
        let outcome = match omnibus_kind {
            TestKind::Anova => one_way_anova(&samples),
            _ => kruskal_wallis(&samples),
        };
        debug!("Omnibus {}: {:?}", omnibus_kind, outcome);
        Some(OmnibusResult {
            test:      omnibus_kind,
            statistic: outcome.map(|o| o.0),
            p_value:   outcome.map(|o| o.1),
        })
    }
    else {
        None
    };

    Ok(PairwiseOutcome {
        comparisons,
        omnibus,
    })
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;
    use crate::data_structs::dataset::GroupLabel;
    use crate::tools::stats::test_data::{
        normal_scores,
        skewed,
    };

    fn group(
        label: &str,
        values: Vec<f64>,
    ) -> Group {
        Group::new(GroupLabel::from(label), values)
    }

    #[test]
    fn two_normal_groups_use_ttest() {
        let groups = vec![
            group("0", normal_scores(30, 10.0, 0.5)),
            group("1", normal_scores(32, 12.0, 0.5)),
        ];
        let outcome = run_pairwise(&groups, &[true, true], TTestVariant::Student).unwrap();
        assert!(outcome.omnibus.is_none());
        assert_eq!(outcome.comparisons.len(), 1);
        let comparison = &outcome.comparisons[0];
        assert_eq!(comparison.test, TestKind::TTest);
        assert_eq!(comparison.positions, (0, 1));
        assert!(comparison.p_value.unwrap() < 0.01);
    }

    #[test]
    fn three_groups_with_one_non_normal() {
        let groups = vec![
            group("0", normal_scores(10, 5.0, 0.5)),
            group("1", normal_scores(10, 6.0, 0.5)),
            group("2", skewed()),
        ];
        let outcome =
            run_pairwise(&groups, &[true, true, false], TTestVariant::Student).unwrap();

        let omnibus = outcome.omnibus.unwrap();
        assert_eq!(omnibus.test, TestKind::KruskalWallis);
        assert!(omnibus.p_value.is_some());

        let tests = outcome
            .comparisons
            .iter()
            .map(|c| (c.positions, c.test))
            .collect_vec();
        assert_eq!(
            tests,
            vec![
                ((0, 1), TestKind::TTest),
                ((0, 2), TestKind::MannWhitneyU),
                ((1, 2), TestKind::MannWhitneyU),
            ]
        );
    }

    #[test]
    fn all_normal_groups_use_anova() {
        let groups = vec![
            group("a", normal_scores(12, 1.0, 1.0)),
            group("b", normal_scores(12, 2.0, 1.0)),
            group("c", normal_scores(12, 3.0, 1.0)),
        ];
        let outcome =
            run_pairwise(&groups, &[true, true, true], TTestVariant::Welch).unwrap();
        assert_eq!(outcome.omnibus.unwrap().test, TestKind::Anova);
        assert!(outcome
            .comparisons
            .iter()
            .all(|c| c.test == TestKind::WelchTTest));
    }

    #[test]
    fn degenerate_pairs_have_no_p_value() {
        let groups = vec![
            group("0", vec![1.0, 1.0, 1.0]),
            group("1", vec![1.0, 1.0, 1.0]),
            group("2", vec![]),
        ];
        let outcome =
            run_pairwise(&groups, &[true, true, true], TTestVariant::Student).unwrap();
        assert_eq!(outcome.comparisons.len(), 3);
        assert!(outcome.comparisons.iter().all(|c| !c.is_defined()));
        assert!(outcome.omnibus.unwrap().p_value.is_none());
    }

    #[test]
    fn direct_two_sample_run() {
        let (t, p) =
            run_two_sample(TestKind::TTest, &[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]).unwrap();
        assert_approx_eq!(t, -3.674234614, 1e-6);
        assert_approx_eq!(p, 0.021311641, 1e-5);
    }
}
