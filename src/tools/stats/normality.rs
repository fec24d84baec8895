use log::{
    debug,
    warn,
};

use crate::data_structs::dataset::Group;
use crate::data_structs::enums::NormalityTest;
use crate::data_structs::results::NormalityResult;
use crate::error::SigboxError;
use crate::utils::{
    anderson_darling,
    shapiro_wilk,
};

/// Smallest group a normality test is run on.
pub const MIN_NORMALITY_N: usize = 3;
/// Groups of this size and above use Anderson-Darling instead of
/// Shapiro-Wilk.
pub const ANDERSON_DARLING_MIN_N: usize = 50;

/// Normality test appropriate for a sample of size `n`.
pub fn normality_test_for(n: usize) -> NormalityTest {
    if n < ANDERSON_DARLING_MIN_N {
        NormalityTest::ShapiroWilk
    }
    else {
        NormalityTest::AndersonDarling
    }
}

/// Classifies a group as normal when the size-dependent normality test
/// gives `p > alpha`.
///
/// Groups with fewer than [MIN_NORMALITY_N] values are rejected with
/// [SigboxError::InsufficientData] and groups holding an infinite value with
/// [SigboxError::NonFiniteValue], without running a test.
pub fn check_normality(
    group: &Group,
    alpha: f64,
) -> Result<NormalityResult, SigboxError> {
    let n = group.n();
    if n < MIN_NORMALITY_N {
        return Err(SigboxError::InsufficientData(
            group.label.to_string(),
            n,
            MIN_NORMALITY_N,
        ));
    }

    if let Some(index) = group.values.iter().position(|v| !v.is_finite()) {
        return Err(SigboxError::NonFiniteValue(group.label.to_string(), index));
    }

    let test = normality_test_for(n);
    let (statistic, p_value) = match test {
        NormalityTest::ShapiroWilk => shapiro_wilk(&group.values),
        NormalityTest::AndersonDarling => anderson_darling(&group.values),
    }
    .ok_or_else(|| {
        SigboxError::InsufficientData(group.label.to_string(), n, MIN_NORMALITY_N)
    })?;

    if statistic.is_nan() || p_value.is_nan() {
        warn!(
            "{} test on group '{}' is undefined, treating it as not normal",
            test, group.label
        );
    }
    let is_normal = p_value > alpha;
    debug!(
        "Group '{}' (n={}): {} statistic={:.4}, p={:.4}, normal={}",
        group.label, n, test, statistic, p_value, is_normal
    );

    Ok(NormalityResult {
        group: group.label.clone(),
        n,
        test,
        statistic,
        p_value,
        is_normal,
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::data_structs::dataset::GroupLabel;
    use crate::tools::stats::test_data::{
        normal_scores,
        skewed,
    };

    #[rstest]
    #[case(3, NormalityTest::ShapiroWilk)]
    #[case(49, NormalityTest::ShapiroWilk)]
    #[case(50, NormalityTest::AndersonDarling)]
    #[case(500, NormalityTest::AndersonDarling)]
    fn test_choice_depends_on_size(
        #[case] n: usize,
        #[case] expected: NormalityTest,
    ) {
        assert_eq!(normality_test_for(n), expected);
    }

    #[test]
    fn normal_group() {
        let group = Group::new(GroupLabel::from("0"), normal_scores(30, 10.0, 0.5));
        let result = check_normality(&group, 0.05).unwrap();
        assert_eq!(result.test, NormalityTest::ShapiroWilk);
        assert!(result.is_normal);
        assert_eq!(result.n, 30);
    }

    #[test]
    fn large_group_uses_anderson_darling() {
        let group = Group::new(GroupLabel::from("0"), normal_scores(80, 0.0, 1.0));
        let result = check_normality(&group, 0.05).unwrap();
        assert_eq!(result.test, NormalityTest::AndersonDarling);
        assert!(result.is_normal);
    }

    #[test]
    fn skewed_group_is_not_normal() {
        let group = Group::new(GroupLabel::from("2"), skewed());
        let result = check_normality(&group, 0.05).unwrap();
        assert!(!result.is_normal);
        assert!(result.p_value < 0.01);
    }

    #[test]
    fn two_points_are_insufficient() {
        let group = Group::new(GroupLabel::from("control"), vec![1.0, 2.0]);
        assert_eq!(
            check_normality(&group, 0.05).unwrap_err(),
            SigboxError::InsufficientData("control".into(), 2, 3)
        );
    }

    #[test]
    fn infinite_value_is_a_data_error() {
        let mut values = normal_scores(10, 0.0, 1.0);
        values[9] = f64::INFINITY;
        let group = Group::new(GroupLabel::from("1"), values);
        let err = check_normality(&group, 0.05).unwrap_err();
        assert_eq!(err, SigboxError::NonFiniteValue("1".into(), 9));
        assert!(err.is_data());
    }
}
