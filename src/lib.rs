//! # sigbox
//!
//! `sigbox` renders boxplots of biomarker values across sample groups and
//! annotates them with significance bars derived from pairwise hypothesis
//! tests and multiple-testing correction. Figures are written as PNG files
//! ready for a manuscript.
//!
//! If you do not want to use sigbox as crate, check out the `sigbox`
//! command-line tool in the `console` workspace member.
//!
//! ## Key Features
//!
//! * **Automatic test selection**: every group is checked for normality
//!   (Shapiro-Wilk below 50 observations, Anderson-Darling above). Pairs of
//!   normal groups are compared with a t-test, anything else with the
//!   Mann-Whitney U test. With three or more groups an omnibus one-way ANOVA
//!   or Kruskal-Wallis test is run as well.
//! * **Multiple-testing correction**: Bonferroni, Benjamini-Hochberg and
//!   Benjamini-Yekutieli adjustment through [`CorrectionMethod`], applied per
//!   biomarker or across the whole figure.
//! * **Significance bar layout**: stacked bars and asterisk / p-value labels
//!   positioned with configurable geometry factors, see
//!   [`plots::SignificanceLayout`].
//! * **Diagnostics**: normality and variance-homogeneity tables over all
//!   biomarkers and groups.
//!
//! ## Structure
//!
//! * [`data_structs`]: the [`Dataset`], group labels, enumerations and the
//!   result types produced by the statistical core.
//! * [`io`]: reading datasets from CSV/TSV files with polars.
//! * [`tools`]: the statistical core (normality, test selection, pairwise
//!   engine, correction, diagnostics).
//! * [`plots`]: figure configuration, significance bar layout and rendering.
//! * [`utils`]: statistical primitives and small helpers.
//!
//! ## Usage
//!
//! ```no_run
//! use sigbox::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let dataset = read_dataset("cohort.csv", "group", &["TREM2", "YKL40"], b',')?;
//!     let config = PlotConfig::default()
//!         .with_subplots((1, 2))
//!         .with_correction_method(CorrectionMethod::BenjaminiHochberg)
//!         .with_image_name("trem2_ykl40.png".into());
//!
//!     let reports = generate_boxplots_with_significance(&dataset, &config)?;
//!     for report in reports {
//!         println!("{}: {} comparisons", report.biomarker, report.comparisons.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod data_structs;
pub mod error;
pub mod io;
pub mod plots;
pub mod prelude;
pub mod tools;
pub mod utils;

pub use crate::data_structs::dataset::{
    Dataset,
    GroupLabel,
};
pub use crate::data_structs::enums::{
    CorrectionMethod,
    CorrectionScope,
    NormalityTest,
    PValueFormat,
    TTestVariant,
    TestKind,
};
pub use crate::data_structs::results::{
    BiomarkerReport,
    ComparisonResult,
    CorrectedResult,
    NormalityResult,
    OmnibusResult,
};
pub use crate::error::SigboxError;
pub use crate::io::read_dataset;
pub use crate::plots::{
    generate_boxplots_with_significance,
    PlotConfig,
};
