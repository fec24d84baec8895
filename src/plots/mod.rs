//! Figure generation: one boxplot with a jittered strip per biomarker,
//! annotated with stacked significance bars.
//!
//! [generate_boxplots_with_significance] validates the [PlotConfig], runs
//! the analysis of [crate::tools::stats], lays out the bars of every
//! subplot and writes the PNG.

mod boxplot;
mod color;
mod config;
mod layout;

use itertools::Itertools;
use log::info;

use self::boxplot::{
    render_figure,
    Panel,
};
pub use self::color::{
    parse_color,
    resolve_palette,
    DEFAULT_CYCLE,
};
pub use self::config::PlotConfig;
pub use self::layout::{
    BoxStats,
    Geometry,
    SignificanceBar,
    SignificanceLayout,
};
use crate::data_structs::dataset::Dataset;
use crate::data_structs::results::BiomarkerReport;
use crate::error::SigboxError;
use crate::tools::stats::analyze_dataset;
use crate::utils::{
    iqr_trim,
    min_max,
};

/// Biomarkers selected by the configuration, or all of the dataset.
fn selected_biomarkers(
    dataset: &Dataset,
    config: &PlotConfig,
) -> Vec<String> {
    if config.biomarkers.is_empty() {
        dataset.biomarkers().to_vec()
    }
    else {
        config.biomarkers.clone()
    }
}

fn build_panel(
    dataset: &Dataset,
    report: &BiomarkerReport,
    config: &PlotConfig,
) -> Result<Panel, SigboxError> {
    let groups = dataset
        .groups(&report.biomarker)?
        .into_iter()
        .map(|g| iqr_trim(&g.values, config.iqr_min, config.iqr_max))
        .collect_vec();
    let data_range = min_max(groups.iter().flatten()).unwrap_or((0.0, 1.0));
    let layout = SignificanceLayout::compute(
        data_range,
        &report.comparisons,
        &config.geometry,
        config.p_value_format,
    );
    Ok(Panel {
        biomarker: report.biomarker.clone(),
        groups,
        layout,
    })
}

/// Analyses every selected biomarker and renders the annotated figure to
/// `config.image_name`.
///
/// Configuration and data errors are returned before anything is drawn.
/// Returns the per-biomarker reports the figure was drawn from.
pub fn generate_boxplots_with_significance(
    dataset: &Dataset,
    config: &PlotConfig,
) -> anyhow::Result<Vec<BiomarkerReport>> {
    let biomarkers = selected_biomarkers(dataset, config);
    if biomarkers.is_empty() {
        return Err(SigboxError::InvalidConfig("no biomarkers to plot".into()).into());
    }
    let labels = dataset.group_labels();
    config.validate(&labels, biomarkers.len())?;
    if let Some(missing) = biomarkers.iter().find(|b| !dataset.has_biomarker(b)) {
        return Err(SigboxError::MissingColumn(missing.clone()).into());
    }
    let colors = resolve_palette(&config.palette, &labels)?;
    let tick_labels = config
        .xtick_labels
        .clone()
        .unwrap_or_else(|| labels.iter().map(ToString::to_string).collect_vec());

    info!(
        "Plotting data between quantiles {} and {}",
        config.iqr_min, config.iqr_max
    );
    let reports = analyze_dataset(dataset, &biomarkers, &config.analysis_options())?;
    let panels = reports
        .iter()
        .map(|report| build_panel(dataset, report, config))
        .collect::<Result<Vec<_>, _>>()?;

    render_figure(&panels, &tick_labels, &colors, config)?;
    info!("Saved figure to {}", config.image_name.display());
    Ok(reports)
}
