use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Args;
use console::style;
use itertools::Itertools;
use log::info;
use sigbox::prelude::*;

use crate::input::InputArgs;
use crate::utils::{
    into_map,
    parse_key_val,
    UtilsArgs,
};

/// Command-line options of the figure. Options left unset keep the value
/// of `--config`, or the library default.
#[derive(Args, Debug, Clone)]
pub(crate) struct PlotArgs {
    #[clap(flatten)]
    pub input: InputArgs,

    #[arg(long, help = "JSON file with figure and statistics options")]
    pub config:       Option<PathBuf>,
    #[arg(short, long, help = "Output PNG path [default: boxplot.png]")]
    pub output:       Option<PathBuf>,
    #[arg(long, help = "Write the per-biomarker test results as JSON")]
    pub report:       Option<PathBuf>,
    #[arg(
        long,
        value_parser = parse_key_val,
        help = "Group colour as GROUP=COLOR (name or #rrggbb). Repeat for every group"
    )]
    pub palette:      Vec<(String, String)>,
    #[arg(long, num_args = 2, value_names = ["ROWS", "COLS"], help = "Subplot grid")]
    pub grid:         Option<Vec<usize>>,
    #[arg(
        long,
        num_args = 2,
        value_names = ["WIDTH", "HEIGHT"],
        help = "Figure size in inches"
    )]
    pub size:         Option<Vec<f64>>,
    #[arg(long, help = "Resolution of the PNG [default: 300]")]
    pub dpi:          Option<u32>,
    #[arg(long, num_args = 1.., help = "X tick labels, one per group in axis order")]
    pub xticks:       Option<Vec<String>>,
    #[arg(
        long = "title-name",
        value_parser = parse_key_val,
        help = "Subplot title as BIOMARKER=TITLE"
    )]
    pub title_names:  Vec<(String, String)>,
    #[arg(
        long = "ylabel-name",
        value_parser = parse_key_val,
        help = "Y axis label as BIOMARKER=LABEL"
    )]
    pub ylabel_names: Vec<(String, String)>,
    #[arg(long, default_value_t = false, help = "Hide subplot titles")]
    pub no_title:     bool,
    #[arg(long, default_value_t = false, help = "Hide y axis labels")]
    pub no_ylabels:   bool,

    #[arg(long, value_enum, help = "Multiple-testing correction [default: fdr_bh]")]
    pub correction:          Option<CorrectionMethod>,
    #[arg(
        long,
        value_enum,
        help = "Correct per biomarker or across the figure [default: per-biomarker]"
    )]
    pub scope:               Option<CorrectionScope>,
    #[arg(long, value_enum, help = "Two-sample t-test variant [default: student]")]
    pub ttest:               Option<TTestVariant>,
    #[arg(long, value_enum, help = "Annotation format [default: text]")]
    pub format:              Option<PValueFormat>,
    #[arg(long, help = "Significance threshold of adjusted p-values [default: 0.05]")]
    pub alpha:               Option<f64>,
    #[arg(long, help = "Threshold of the normality tests [default: 0.05]")]
    pub normality_alpha:     Option<f64>,
    #[arg(long, help = "Lower plotting quantile [default: 0.05]")]
    pub iqr_min:             Option<f64>,
    #[arg(long, help = "Upper plotting quantile [default: 0.95]")]
    pub iqr_max:             Option<f64>,
    #[arg(
        long,
        default_value_t = false,
        help = "Apply the quantile trim to the tested values too"
    )]
    pub trim_before_testing: bool,
    #[arg(long, default_value_t = false, help = "Draw outliers beyond the whiskers")]
    pub show_fliers:         bool,
    #[arg(long, help = "Strip point diameter in points [default: 8]")]
    pub jitter_size:         Option<f64>,
    #[arg(long, help = "Strip point opacity [default: 0.8]")]
    pub point_alpha:         Option<f64>,
    #[arg(long, help = "Seed of the horizontal jitter [default: 42]")]
    pub seed:                Option<u64>,

    #[arg(long, help = "Spacing between stacked bars, fraction of the data range")]
    pub bar_height_factor: Option<f64>,
    #[arg(long, help = "Length of the bar tips, fraction of the data range")]
    pub bar_tips_factor:   Option<f64>,
    #[arg(long, help = "Gap below the first bar, fraction of the data range")]
    pub y_top_factor:      Option<f64>,
    #[arg(long, help = "Headroom above the last bar, fraction of the data range")]
    pub y_range_factor:    Option<f64>,
    #[arg(long, help = "Text offset above a bar, fraction of the data range")]
    pub asterisk_factor:   Option<f64>,
}

impl PlotArgs {
    /// Merges the JSON configuration with the command-line overrides.
    pub fn config(&self) -> anyhow::Result<PlotConfig> {
        let mut config = match &self.config {
            Some(path) => PlotConfig::from_json_file(path)?,
            None => PlotConfig::default(),
        };

        if !self.input.biomarkers.is_empty() {
            config.biomarkers = self.input.biomarkers.clone();
        }
        if let Some(output) = &self.output {
            config.image_name = output.clone();
        }
        config.palette.extend(into_map(&self.palette));
        config.title_names.extend(into_map(&self.title_names));
        config.y_label_names.extend(into_map(&self.ylabel_names));
        if let Some(grid) = &self.grid {
            config.subplots = (grid[0], grid[1]);
        }
        if let Some(size) = &self.size {
            config.fig_size = (size[0], size[1]);
        }
        if self.xticks.is_some() {
            config.xtick_labels = self.xticks.clone();
        }
        config.title &= !self.no_title;
        config.y_labels &= !self.no_ylabels;
        config.trim_before_testing |= self.trim_before_testing;
        config.show_fliers |= self.show_fliers;

        if let Some(value) = self.dpi {
            config.dpi = value;
        }
        if let Some(value) = self.correction {
            config.correction_method = value;
        }
        if let Some(value) = self.scope {
            config.correction_scope = value;
        }
        if let Some(value) = self.ttest {
            config.ttest_variant = value;
        }
        if let Some(value) = self.format {
            config.p_value_format = value;
        }
        if let Some(value) = self.alpha {
            config.alpha = value;
        }
        if let Some(value) = self.normality_alpha {
            config.normality_alpha = value;
        }
        if let Some(value) = self.iqr_min {
            config.iqr_min = value;
        }
        if let Some(value) = self.iqr_max {
            config.iqr_max = value;
        }
        if let Some(value) = self.jitter_size {
            config.jitter_size = value;
        }
        if let Some(value) = self.point_alpha {
            config.point_alpha = value;
        }
        if let Some(value) = self.seed {
            config.seed = value;
        }

        let geometry = &mut config.geometry;
        if let Some(value) = self.bar_height_factor {
            geometry.bar_height_factor = value;
        }
        if let Some(value) = self.bar_tips_factor {
            geometry.bar_tips_factor = value;
        }
        if let Some(value) = self.y_top_factor {
            geometry.y_top_factor = value;
        }
        if let Some(value) = self.y_range_factor {
            geometry.y_range_factor = value;
        }
        if let Some(value) = self.asterisk_factor {
            geometry.asterisk_factor = value;
        }
        Ok(config)
    }

    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        let config = self.config()?;
        if !utils.confirm_overwrite(&config.image_name)? {
            eprintln!("{}", style("Aborted").yellow());
            return Ok(());
        }

        let spinner = utils.spinner("Reading data")?;
        let dataset = self.input.read(&config.biomarkers)?;
        info!(
            "{} samples in {} groups of '{}'",
            dataset.n_records(),
            dataset.group_labels().len(),
            dataset.group_col()
        );

        spinner.set_message("Testing and drawing");
        let reports = generate_boxplots_with_significance(&dataset, &config)?;
        spinner.finish_and_clear();

        if let Some(path) = &self.report {
            let writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(writer, &reports)?;
            info!("Wrote report to {}", path.display());
        }
        print_summary(&reports);
        eprintln!(
            "Figure written to {}",
            style(config.image_name.display()).green()
        );
        Ok(())
    }
}

fn format_p(p: Option<f64>) -> String {
    p.map(|p| format!("{:.3e}", p))
        .unwrap_or_else(|| "n/a".to_string())
}

fn print_summary(reports: &[BiomarkerReport]) {
    for report in reports {
        let tests = report
            .comparisons
            .iter()
            .map(|c| c.comparison.test)
            .unique()
            .join(", ");
        eprintln!(
            "{} ({}, {}):",
            style(&report.biomarker).bold(),
            tests,
            report.method
        );
        if let Some(omnibus) = &report.omnibus {
            eprintln!("  {} p = {}", omnibus.test, format_p(omnibus.p_value));
        }
        for result in report.comparisons.iter() {
            let line = format!(
                "  {} vs {}: p = {}, adjusted = {}",
                result.comparison.group_a,
                result.comparison.group_b,
                format_p(result.comparison.p_value),
                format_p(result.p_adjusted)
            );
            if result.significant {
                eprintln!("{}", style(line).green());
            }
            else {
                eprintln!("{}", line);
            }
        }
    }
}
