use std::fs::File;
use std::io::BufReader;
use std::path::{
    Path,
    PathBuf,
};

use anyhow::Context;
use hashbrown::HashMap;
use log::debug;
use serde::{
    Deserialize,
    Serialize,
};

use super::color::resolve_palette;
use super::layout::Geometry;
use crate::data_structs::dataset::GroupLabel;
use crate::data_structs::enums::{
    CorrectionMethod,
    CorrectionScope,
    PValueFormat,
    TTestVariant,
};
use crate::error::SigboxError;
use crate::tools::stats::AnalysisOptions;
use crate::with_field_fn;

/// Every option of the figure and of the statistics behind it.
///
/// Built with [Default] and the `with_*` methods, or read from JSON where
/// absent keys keep their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Biomarkers to plot, in order. Empty means every biomarker of the
    /// dataset.
    pub biomarkers:          Vec<String>,
    /// Group label to colour name or `#rrggbb`.
    pub palette:             HashMap<String, String>,
    /// Subplot grid as (rows, columns).
    pub subplots:            (usize, usize),
    /// Figure size in inches.
    pub fig_size:            (f64, f64),
    pub dpi:                 u32,
    /// Tick labels replacing the group labels on the x axis.
    pub xtick_labels:        Option<Vec<String>>,
    pub image_name:          PathBuf,
    pub geometry:            Geometry,
    pub title:               bool,
    pub title_names:         HashMap<String, String>,
    pub y_labels:            bool,
    pub y_label_names:       HashMap<String, String>,
    pub correction_method:   CorrectionMethod,
    pub correction_scope:    CorrectionScope,
    pub alpha:               f64,
    pub normality_alpha:     f64,
    pub ttest_variant:       TTestVariant,
    pub p_value_format:      PValueFormat,
    pub iqr_min:             f64,
    pub iqr_max:             f64,
    /// Apply the IQR trim to the tested values as well as to the plot.
    pub trim_before_testing: bool,
    /// Marker diameter of the strip points, in points.
    pub jitter_size:         f64,
    pub point_alpha:         f64,
    pub show_fliers:         bool,
    /// Seed of the horizontal jitter.
    pub seed:                u64,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            biomarkers:          Vec::new(),
            palette:             HashMap::new(),
            subplots:            (1, 1),
            fig_size:            (10.0, 6.0),
            dpi:                 300,
            xtick_labels:        None,
            image_name:          PathBuf::from("boxplot.png"),
            geometry:            Geometry::default(),
            title:               true,
            title_names:         HashMap::new(),
            y_labels:            true,
            y_label_names:       HashMap::new(),
            correction_method:   CorrectionMethod::default(),
            correction_scope:    CorrectionScope::default(),
            alpha:               0.05,
            normality_alpha:     0.05,
            ttest_variant:       TTestVariant::default(),
            p_value_format:      PValueFormat::default(),
            iqr_min:             0.05,
            iqr_max:             0.95,
            trim_before_testing: false,
            jitter_size:         8.0,
            point_alpha:         0.8,
            show_fliers:         false,
            seed:                42,
        }
    }
}

impl PlotConfig {
    with_field_fn!(biomarkers, Vec<String>);

    with_field_fn!(palette, HashMap<String, String>);

    with_field_fn!(subplots, (usize, usize));

    with_field_fn!(fig_size, (f64, f64));

    with_field_fn!(dpi, u32);

    with_field_fn!(xtick_labels, Option<Vec<String>>);

    with_field_fn!(image_name, PathBuf);

    with_field_fn!(geometry, Geometry);

    with_field_fn!(title, bool);

    with_field_fn!(title_names, HashMap<String, String>);

    with_field_fn!(y_labels, bool);

    with_field_fn!(y_label_names, HashMap<String, String>);

    with_field_fn!(correction_method, CorrectionMethod);

    with_field_fn!(correction_scope, CorrectionScope);

    with_field_fn!(alpha, f64);

    with_field_fn!(normality_alpha, f64);

    with_field_fn!(ttest_variant, TTestVariant);

    with_field_fn!(p_value_format, PValueFormat);

    with_field_fn!(iqr_min, f64);

    with_field_fn!(iqr_max, f64);

    with_field_fn!(trim_before_testing, bool);

    with_field_fn!(jitter_size, f64);

    with_field_fn!(point_alpha, f64);

    with_field_fn!(show_fliers, bool);

    with_field_fn!(seed, u64);

    /// Reads a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Could not open config {}", path.display()))?;
        let config: PlotConfig = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Could not parse config {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Statistical options implied by this configuration.
    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions::default()
            .with_alpha(self.alpha)
            .with_normality_alpha(self.normality_alpha)
            .with_correction_method(self.correction_method)
            .with_correction_scope(self.correction_scope)
            .with_ttest_variant(self.ttest_variant)
            .with_trim(
                self.trim_before_testing
                    .then_some((self.iqr_min, self.iqr_max)),
            )
    }

    /// Title of a biomarker subplot.
    pub fn title_for<'a>(
        &'a self,
        biomarker: &'a str,
    ) -> &'a str {
        self.title_names
            .get(biomarker)
            .map(String::as_str)
            .unwrap_or(biomarker)
    }

    /// Y axis label of a biomarker subplot.
    pub fn y_label_for<'a>(
        &'a self,
        biomarker: &'a str,
    ) -> &'a str {
        self.y_label_names
            .get(biomarker)
            .map(String::as_str)
            .unwrap_or(biomarker)
    }

    /// Pixel size of the figure.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.fig_size.0 * self.dpi as f64).round() as u32,
            (self.fig_size.1 * self.dpi as f64).round() as u32,
        )
    }

    /// Converts a font size in points to pixels at the configured dpi.
    pub fn font_px(
        &self,
        points: f64,
    ) -> f64 {
        points * self.dpi as f64 / 72.0
    }

    /// Checks every option against the groups and the number of biomarkers
    /// to plot.
    pub fn validate(
        &self,
        labels: &[GroupLabel],
        n_biomarkers: usize,
    ) -> Result<(), SigboxError> {
        let invalid = |desc: String| Err(SigboxError::InvalidConfig(desc));
        let (rows, cols) = self.subplots;
        if rows == 0 || cols == 0 {
            return invalid(format!("subplot grid {}x{} has no cells", rows, cols));
        }
        if rows * cols < n_biomarkers {
            return Err(SigboxError::GridTooSmall(rows * cols, n_biomarkers));
        }
        if !(self.fig_size.0 > 0.0 && self.fig_size.1 > 0.0) || self.dpi == 0 {
            return invalid(format!(
                "figure size {:?} at {} dpi is empty",
                self.fig_size, self.dpi
            ));
        }
        if !(0.0..=1.0).contains(&self.iqr_min)
            || !(0.0..=1.0).contains(&self.iqr_max)
            || self.iqr_min >= self.iqr_max
        {
            return invalid(format!(
                "IQR bounds must satisfy 0 <= min < max <= 1, got {} and {}",
                self.iqr_min, self.iqr_max
            ));
        }
        for (name, value) in [
            ("alpha", self.alpha),
            ("normality_alpha", self.normality_alpha),
        ] {
            if !(value > 0.0 && value < 1.0) {
                return invalid(format!("{} must lie in (0, 1), got {}", name, value));
            }
        }
        if !(0.0..=1.0).contains(&self.point_alpha) {
            return invalid(format!(
                "point_alpha must lie in [0, 1], got {}",
                self.point_alpha
            ));
        }
        if !(self.jitter_size >= 0.0) {
            return invalid(format!(
                "jitter_size must be non-negative, got {}",
                self.jitter_size
            ));
        }
        if let Some(ticks) = &self.xtick_labels {
            if ticks.len() != labels.len() {
                return invalid(format!(
                    "{} x tick labels given for {} groups",
                    ticks.len(),
                    labels.len()
                ));
            }
        }
        self.geometry.validate()?;
        resolve_palette(&self.palette, labels)?;
        Ok(())
    }
}
