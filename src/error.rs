use std::error::Error;
use std::fmt::{
    Display,
    Formatter,
};

/// Errors surfaced by the statistical core and by configuration checks.
///
/// Configuration and data errors are returned to the caller immediately.
/// Degenerate per-pair tests are not errors: they yield an absent p-value.
#[derive(Debug, Clone, PartialEq)]
pub enum SigboxError {
    /// Correction method name is not recognised.
    UnknownCorrectionMethod(String),
    /// P-value annotation format is not recognised.
    UnknownPValueFormat(String),
    /// Palette has no colour for a group label.
    MissingPaletteColor(String),
    /// Palette colour string could not be parsed.
    InvalidColor(String),
    /// Subplot grid has fewer cells than biomarkers: (cells, biomarkers).
    GridTooSmall(usize, usize),
    /// Any other invalid configuration value.
    InvalidConfig(String),
    /// Column is absent from the input table.
    MissingColumn(String),
    /// Column could not be interpreted as numeric.
    NonNumericColumn(String),
    /// Column length differs from the number of records: (column, len, expected).
    ColumnLength(String, usize, usize),
    /// Infinite value in a column or group: (name, position).
    NonFiniteValue(String, usize),
    /// Group has fewer observations than required: (group, n, required).
    InsufficientData(String, usize, usize),
    /// Fewer than two groups are available for comparison.
    TooFewGroups(usize),
}

impl SigboxError {
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            SigboxError::UnknownCorrectionMethod(_)
                | SigboxError::UnknownPValueFormat(_)
                | SigboxError::MissingPaletteColor(_)
                | SigboxError::InvalidColor(_)
                | SigboxError::GridTooSmall(..)
                | SigboxError::InvalidConfig(_)
        )
    }

    pub fn is_data(&self) -> bool { !self.is_config() }
}

impl Display for SigboxError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            SigboxError::UnknownCorrectionMethod(name) => {
                write!(
                    f,
                    "Unknown correction method '{}' (expected bonferroni, fdr_bh, fdr_by or none)",
                    name
                )
            },
            SigboxError::UnknownPValueFormat(name) => {
                write!(
                    f,
                    "Invalid p-value format '{}'. It should be 'text' or 'asterisk'",
                    name
                )
            },
            SigboxError::MissingPaletteColor(group) => {
                write!(f, "Palette has no color for group '{}'", group)
            },
            SigboxError::InvalidColor(color) => {
                write!(f, "Cannot parse color '{}'", color)
            },
            SigboxError::GridTooSmall(cells, biomarkers) => {
                write!(
                    f,
                    "Subplot grid has {} cells but {} biomarkers were requested",
                    cells, biomarkers
                )
            },
            SigboxError::InvalidConfig(desc) => {
                write!(f, "Invalid configuration: {}", desc)
            },
            SigboxError::MissingColumn(name) => {
                write!(f, "Column '{}' not found", name)
            },
            SigboxError::NonNumericColumn(name) => {
                write!(f, "Column '{}' is not numeric", name)
            },
            SigboxError::ColumnLength(name, len, expected) => {
                write!(
                    f,
                    "Column '{}' has {} values, expected {}",
                    name, len, expected
                )
            },
            SigboxError::NonFiniteValue(name, record) => {
                write!(f, "'{}' has an infinite value at position {}", name, record)
            },
            SigboxError::InsufficientData(group, n, required) => {
                write!(
                    f,
                    "Group '{}' has {} observations, at least {} required",
                    group, n, required
                )
            },
            SigboxError::TooFewGroups(n) => {
                write!(f, "At least 2 groups are required, got {}", n)
            },
        }
    }
}

impl Error for SigboxError {}
