//! Statistical decision logic: per-group normality, test selection, the
//! pairwise significance engine and multiple-testing correction.
//!
//! The entry points are [analyze_biomarker] and [analyze_dataset]; the
//! individual steps are public so they can be tested and reused on their
//! own.

mod correction;
mod diagnostics;
mod engine;
mod normality;
mod selector;

pub use correction::{
    correct,
    correct_p_values,
};
pub use diagnostics::{
    normality_table,
    variance_table,
    NormalityRow,
    VarianceRow,
};
pub use engine::{
    run_pairwise,
    run_two_sample,
    PairwiseOutcome,
};
use itertools::Itertools;
use log::{
    debug,
    info,
    warn,
};
pub use normality::{
    check_normality,
    normality_test_for,
    ANDERSON_DARLING_MIN_N,
    MIN_NORMALITY_N,
};
pub use selector::{
    select_pairwise,
    select_test,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::data_structs::dataset::{
    Dataset,
    Group,
};
use crate::data_structs::enums::{
    CorrectionMethod,
    CorrectionScope,
    TTestVariant,
};
use crate::data_structs::results::{
    BiomarkerReport,
    NormalityResult,
};
use crate::error::SigboxError;
use crate::utils::iqr_trim;
use crate::with_field_fn;

/// Options of the statistical analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Significance threshold for adjusted p-values.
    pub alpha:             f64,
    /// Threshold of the normality tests.
    pub normality_alpha:   f64,
    pub correction_method: CorrectionMethod,
    pub correction_scope:  CorrectionScope,
    pub ttest_variant:     TTestVariant,
    /// Quantile bounds applied to each group before testing.
    pub trim:              Option<(f64, f64)>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            alpha:             0.05,
            normality_alpha:   0.05,
            correction_method: CorrectionMethod::default(),
            correction_scope:  CorrectionScope::default(),
            ttest_variant:     TTestVariant::default(),
            trim:              None,
        }
    }
}

impl AnalysisOptions {
    with_field_fn!(alpha, f64);

    with_field_fn!(normality_alpha, f64);

    with_field_fn!(correction_method, CorrectionMethod);

    with_field_fn!(correction_scope, CorrectionScope);

    with_field_fn!(ttest_variant, TTestVariant);

    with_field_fn!(trim, Option<(f64, f64)>);
}

struct RawAnalysis {
    biomarker: String,
    normality: Vec<NormalityResult>,
    outcome:   PairwiseOutcome,
}

fn analyze_raw(
    dataset: &Dataset,
    biomarker: &str,
    options: &AnalysisOptions,
) -> Result<RawAnalysis, SigboxError> {
    let mut groups = dataset.groups(biomarker)?;
    if let Some((q_min, q_max)) = options.trim {
        groups = groups
            .into_iter()
            .map(|g| Group::new(g.label, iqr_trim(&g.values, q_min, q_max)))
            .collect_vec();
    }
    if groups.len() < 2 {
        return Err(SigboxError::TooFewGroups(groups.len()));
    }

    let mut normality = Vec::with_capacity(groups.len());
    let mut flags = Vec::with_capacity(groups.len());
    for group in groups.iter() {
        if group.is_empty() {
            warn!(
                "Group '{}' has no values for {}, its comparisons are skipped",
                group.label, biomarker
            );
            // An empty group does not count against normality.
            flags.push(true);
            continue;
        }
        let result = check_normality(group, options.normality_alpha)?;
        flags.push(result.is_normal);
        normality.push(result);
    }

    let outcome = run_pairwise(&groups, &flags, options.ttest_variant)?;
    Ok(RawAnalysis {
        biomarker: biomarker.to_string(),
        normality,
        outcome,
    })
}

fn into_report(
    raw: RawAnalysis,
    method: CorrectionMethod,
    alpha: f64,
) -> BiomarkerReport {
    BiomarkerReport {
        biomarker: raw.biomarker,
        normality: raw.normality,
        omnibus: raw.outcome.omnibus,
        comparisons: correct(raw.outcome.comparisons, method, alpha),
        method,
        alpha,
    }
}

/// Full analysis of one biomarker with its comparisons corrected as one
/// family.
pub fn analyze_biomarker(
    dataset: &Dataset,
    biomarker: &str,
    options: &AnalysisOptions,
) -> Result<BiomarkerReport, SigboxError> {
    let raw = analyze_raw(dataset, biomarker, options)?;
    let report = into_report(raw, options.correction_method, options.alpha);
    debug!(
        "{}: {} comparisons, {} significant",
        biomarker,
        report.comparisons.len(),
        report.significant().count()
    );
    Ok(report)
}

/// Analyses every biomarker in order.
///
/// With [CorrectionScope::Global] the pairwise p-values of all biomarkers
/// are adjusted together.
pub fn analyze_dataset<S: AsRef<str>>(
    dataset: &Dataset,
    biomarkers: &[S],
    options: &AnalysisOptions,
) -> Result<Vec<BiomarkerReport>, SigboxError> {
    let reports = match options.correction_scope {
        CorrectionScope::PerBiomarker => biomarkers
            .iter()
            .map(|b| analyze_biomarker(dataset, b.as_ref(), options))
            .collect::<Result<Vec<_>, _>>()?,
        CorrectionScope::Global => {
            let raw = biomarkers
                .iter()
                .map(|b| analyze_raw(dataset, b.as_ref(), options))
                .collect::<Result<Vec<_>, _>>()?;
            let p_values = raw
                .iter()
                .flat_map(|r| r.outcome.comparisons.iter().map(|c| c.p_value))
                .collect_vec();
            let mut adjusted = correct_p_values(&p_values, options.correction_method).into_iter();

            raw.into_iter()
                .map(|r| {
                    let mut report = into_report(r, CorrectionMethod::None, options.alpha);
                    report.method = options.correction_method;
                    for corrected in report.comparisons.iter_mut() {
                        corrected.p_adjusted = adjusted.next().flatten();
                        corrected.significant =
                            corrected.p_adjusted.is_some_and(|p| p < options.alpha);
                    }
                    report
                })
                .collect_vec()
        },
    };

    info!(
        "Analysed {} biomarkers: {} significant comparisons",
        reports.len(),
        reports
            .iter()
            .map(|r| r.significant().count())
            .sum::<usize>()
    );
    Ok(reports)
}
