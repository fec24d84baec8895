use std::cmp::Ordering;
use std::fmt::Display;

use anyhow::Context;
use hashbrown::HashMap;
use itertools::Itertools;
use log::{
    debug,
    warn,
};
use polars::prelude::*;
use serde::{
    Deserialize,
    Serialize,
};

use crate::error::SigboxError;

/// Categorical label of a group of records.
///
/// Labels that parse as numbers sort numerically and come before the
/// others, which sort lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupLabel(String);

impl GroupLabel {
    pub fn new<S: Into<String>>(label: S) -> Self { Self(label.into()) }

    pub fn as_str(&self) -> &str { &self.0 }

    fn numeric(&self) -> Option<f64> {
        self.0
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }
}

impl PartialOrd for GroupLabel {
    fn partial_cmp(
        &self,
        other: &Self,
    ) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GroupLabel {
    fn cmp(
        &self,
        other: &Self,
    ) -> Ordering {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a.total_cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl Display for GroupLabel {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for GroupLabel {
    fn from(value: &str) -> Self { Self(value.to_string()) }
}

impl From<String> for GroupLabel {
    fn from(value: String) -> Self { Self(value) }
}

impl From<i64> for GroupLabel {
    fn from(value: i64) -> Self { Self(value.to_string()) }
}

/// Non-missing values of one biomarker for one group.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub label:  GroupLabel,
    pub values: Vec<f64>,
}

impl Group {
    pub fn new(
        label: GroupLabel,
        values: Vec<f64>,
    ) -> Self {
        Self { label, values }
    }

    pub fn n(&self) -> usize { self.values.len() }

    pub fn is_empty(&self) -> bool { self.values.is_empty() }
}

/// Table of records, each with a group label and one (possibly missing)
/// value per biomarker.
#[derive(Debug, Clone)]
pub struct Dataset {
    group_col:  String,
    labels:     Vec<GroupLabel>,
    biomarkers: Vec<String>,
    values:     HashMap<String, Vec<Option<f64>>>,
}

impl Dataset {
    /// Creates a dataset with one record per label and no biomarkers.
    pub fn new<L: Into<GroupLabel>>(
        group_col: &str,
        labels: Vec<L>,
    ) -> Self {
        Self {
            group_col:  group_col.to_string(),
            labels:     labels.into_iter().map(Into::into).collect(),
            biomarkers: Vec::new(),
            values:     HashMap::new(),
        }
    }

    /// Adds (or replaces) a biomarker column. NaN is treated as missing,
    /// infinite values are rejected.
    pub fn with_biomarker(
        mut self,
        name: &str,
        values: Vec<Option<f64>>,
    ) -> Result<Self, SigboxError> {
        if values.len() != self.labels.len() {
            return Err(SigboxError::ColumnLength(
                name.to_string(),
                values.len(),
                self.labels.len(),
            ));
        }
        if let Some(record) = values.iter().position(|v| v.is_some_and(f64::is_infinite)) {
            return Err(SigboxError::NonFiniteValue(name.to_string(), record));
        }
        let values = values
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect_vec();
        if self.values.insert(name.to_string(), values).is_none() {
            self.biomarkers.push(name.to_string());
        }
        Ok(self)
    }

    /// Builds a dataset from a polars [DataFrame].
    ///
    /// The group column is cast to strings, biomarker columns to `f64`.
    /// Records with a missing group label are skipped.
    pub fn from_dataframe<S: AsRef<str>>(
        df: &DataFrame,
        group_col: &str,
        biomarkers: &[S],
    ) -> anyhow::Result<Self> {
        let group_series = df
            .column(group_col)
            .map_err(|_| SigboxError::MissingColumn(group_col.to_string()))?
            .as_materialized_series()
            .cast(&DataType::String)
            .with_context(|| format!("Cannot cast '{}' to string labels", group_col))?;
        let group_values = group_series.str()?;

        let keep = group_values
            .into_iter()
            .map(|label| label.is_some())
            .collect_vec();
        let skipped = keep.iter().filter(|k| !**k).count();
        if skipped > 0 {
            warn!(
                "Skipping {} records with missing '{}' label",
                skipped, group_col
            );
        }

        let labels = group_values
            .into_iter()
            .flatten()
            .map(GroupLabel::from)
            .collect_vec();
        let mut dataset = Dataset::new(group_col, labels);

        for name in biomarkers.iter().map(AsRef::as_ref) {
            let series = df
                .column(name)
                .map_err(|_| SigboxError::MissingColumn(name.to_string()))?
                .as_materialized_series()
                .strict_cast(&DataType::Float64)
                .map_err(|_| SigboxError::NonNumericColumn(name.to_string()))?;
            let column = series
                .f64()?
                .into_iter()
                .zip(keep.iter())
                .filter_map(|(value, keep)| keep.then_some(value))
                .collect_vec();
            dataset = dataset.with_biomarker(name, column)?;
        }

        debug!(
            "Loaded {} records, {} groups, {} biomarkers",
            dataset.n_records(),
            dataset.group_labels().len(),
            dataset.biomarkers.len()
        );
        Ok(dataset)
    }

    pub fn group_col(&self) -> &str { &self.group_col }

    pub fn biomarkers(&self) -> &[String] { &self.biomarkers }

    pub fn n_records(&self) -> usize { self.labels.len() }

    pub fn has_biomarker(
        &self,
        name: &str,
    ) -> bool {
        self.values.contains_key(name)
    }

    /// Distinct group labels in sorted order.
    pub fn group_labels(&self) -> Vec<GroupLabel> {
        self.labels.iter().unique().sorted().cloned().collect_vec()
    }

    /// Raw column of a biomarker, aligned with the records.
    pub fn column(
        &self,
        biomarker: &str,
    ) -> Result<&[Option<f64>], SigboxError> {
        self.values
            .get(biomarker)
            .map(Vec::as_slice)
            .ok_or_else(|| SigboxError::MissingColumn(biomarker.to_string()))
    }

    /// Non-missing values of a biomarker split by group, in sorted label
    /// order. Groups with no values are kept, empty.
    pub fn groups(
        &self,
        biomarker: &str,
    ) -> Result<Vec<Group>, SigboxError> {
        let column = self.column(biomarker)?;
        let mut by_label: HashMap<&GroupLabel, Vec<f64>> = HashMap::new();
        for (label, value) in self.labels.iter().zip(column.iter()) {
            let entry = by_label.entry(label).or_default();
            if let Some(value) = value {
                entry.push(*value);
            }
        }
        Ok(by_label
            .into_iter()
            .sorted_by(|a, b| a.0.cmp(b.0))
            .map(|(label, values)| Group::new(label.clone(), values))
            .collect_vec())
    }
}
