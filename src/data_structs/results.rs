use serde::{
    Deserialize,
    Serialize,
};

use crate::data_structs::dataset::GroupLabel;
use crate::data_structs::enums::{
    CorrectionMethod,
    NormalityTest,
    TestKind,
};

/// Outcome of the normality check of one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalityResult {
    pub group:     GroupLabel,
    pub n:         usize,
    pub test:      NormalityTest,
    pub statistic: f64,
    pub p_value:   f64,
    pub is_normal: bool,
}

/// Raw result of one pairwise comparison.
///
/// `p_value` is `None` when the test statistic is undefined (empty group,
/// zero variance, all values tied).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub group_a:   GroupLabel,
    pub group_b:   GroupLabel,
    /// Positions of the two groups on the x axis.
    pub positions: (usize, usize),
    pub test:      TestKind,
    pub statistic: Option<f64>,
    pub p_value:   Option<f64>,
}

impl ComparisonResult {
    pub fn is_defined(&self) -> bool { self.p_value.is_some() }
}

/// Comparison with its multiple-testing adjusted p-value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectedResult {
    #[serde(flatten)]
    pub comparison:  ComparisonResult,
    pub p_adjusted:  Option<f64>,
    pub significant: bool,
}

/// Test over all groups of a biomarker, present when there are at least
/// three groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OmnibusResult {
    pub test:      TestKind,
    pub statistic: Option<f64>,
    pub p_value:   Option<f64>,
}

/// Complete analysis of one biomarker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomarkerReport {
    pub biomarker:   String,
    pub normality:   Vec<NormalityResult>,
    pub omnibus:     Option<OmnibusResult>,
    pub comparisons: Vec<CorrectedResult>,
    pub method:      CorrectionMethod,
    pub alpha:       f64,
}

impl BiomarkerReport {
    /// Significant comparisons, in comparison order.
    pub fn significant(&self) -> impl Iterator<Item = &CorrectedResult> {
        self.comparisons.iter().filter(|c| c.significant)
    }

    pub fn all_normal(&self) -> bool { self.normality.iter().all(|r| r.is_normal) }
}
