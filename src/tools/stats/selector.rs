use crate::data_structs::enums::{
    TTestVariant,
    TestKind,
};
use crate::error::SigboxError;

/// Picks the test for `group_count` groups from their normality flags.
///
/// Two groups get a t-test when both are normal, otherwise Mann-Whitney U.
/// Three or more groups get one-way ANOVA when all are normal, otherwise
/// Kruskal-Wallis.
pub fn select_test(
    group_count: usize,
    normal: &[bool],
) -> Result<TestKind, SigboxError> {
    if group_count < 2 {
        return Err(SigboxError::TooFewGroups(group_count));
    }
    if normal.len() != group_count {
        return Err(SigboxError::InvalidConfig(format!(
            "expected {} normality flags, got {}",
            group_count,
            normal.len()
        )));
    }

    let all_normal = normal.iter().all(|n| *n);
    Ok(match (group_count, all_normal) {
        (2, true) => TestKind::TTest,
        (2, false) => TestKind::MannWhitneyU,
        (_, true) => TestKind::Anova,
        (_, false) => TestKind::KruskalWallis,
    })
}

/// Test for a single pair inside a larger comparison.
pub fn select_pairwise(
    a_normal: bool,
    b_normal: bool,
) -> TestKind {
    if a_normal && b_normal {
        TestKind::TTest
    }
    else {
        TestKind::MannWhitneyU
    }
}

/// Replaces the t-test with its Welch form when requested.
pub(crate) fn apply_variant(
    kind: TestKind,
    variant: TTestVariant,
) -> TestKind {
    match (kind, variant) {
        (TestKind::TTest, TTestVariant::Welch) => TestKind::WelchTTest,
        (kind, _) => kind,
    }
}
