use itertools::Itertools;
use log::info;
use serde::{
    Deserialize,
    Serialize,
};

use super::correction::correct_p_values;
use crate::data_structs::dataset::{
    Dataset,
    GroupLabel,
};
use crate::data_structs::enums::CorrectionMethod;
use crate::error::SigboxError;
use crate::utils::{
    levene,
    shapiro_wilk,
};

/// Shapiro-Wilk result for one (biomarker, group) cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalityRow {
    pub biomarker:  String,
    pub group:      GroupLabel,
    pub n:          usize,
    pub statistic:  Option<f64>,
    pub p_value:    Option<f64>,
    pub p_adjusted: Option<f64>,
}

/// Levene (median centred) result for one biomarker across its groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarianceRow {
    pub biomarker:  String,
    pub groups:     usize,
    pub statistic:  Option<f64>,
    pub p_value:    Option<f64>,
    pub p_adjusted: Option<f64>,
}

/// Shapiro-Wilk p-value of every group of every biomarker, adjusted
/// together as a single family.
///
/// Groups too small for the test are reported without a p-value.
pub fn normality_table<S: AsRef<str>>(
    dataset: &Dataset,
    biomarkers: &[S],
    method: CorrectionMethod,
) -> Result<Vec<NormalityRow>, SigboxError> {
    let mut rows = Vec::new();
    for biomarker in biomarkers.iter().map(AsRef::as_ref) {
        for group in dataset.groups(biomarker)? {
            let outcome = shapiro_wilk(&group.values);
            rows.push(NormalityRow {
                biomarker:  biomarker.to_string(),
                n:          group.n(),
                group:      group.label,
                statistic:  outcome.map(|o| o.0),
                p_value:    outcome.map(|o| o.1),
                p_adjusted: None,
            });
        }
    }

    let raw = rows.iter().map(|r| r.p_value).collect_vec();
    for (row, adjusted) in rows.iter_mut().zip(correct_p_values(&raw, method)) {
        row.p_adjusted = adjusted;
    }
    info!("Normality table: {} rows", rows.len());
    Ok(rows)
}

/// Levene test across the groups of each biomarker, adjusted across
/// biomarkers.
pub fn variance_table<S: AsRef<str>>(
    dataset: &Dataset,
    biomarkers: &[S],
    method: CorrectionMethod,
) -> Result<Vec<VarianceRow>, SigboxError> {
    let mut rows = Vec::new();
    for biomarker in biomarkers.iter().map(AsRef::as_ref) {
        let groups = dataset.groups(biomarker)?;
        let samples = groups
            .iter()
            .filter(|g| !g.is_empty())
            .map(|g| g.values.as_slice())
            .collect_vec();
        let outcome = levene(&samples);
        rows.push(VarianceRow {
            biomarker:  biomarker.to_string(),
            groups:     samples.len(),
            statistic:  outcome.map(|o| o.0),
            p_value:    outcome.map(|o| o.1),
            p_adjusted: None,
        });
    }

    let raw = rows.iter().map(|r| r.p_value).collect_vec();
    for (row, adjusted) in rows.iter_mut().zip(correct_p_values(&raw, method)) {
        row.p_adjusted = adjusted;
    }
    info!("Variance table: {} rows", rows.len());
    Ok(rows)
}
