use std::path::PathBuf;

use clap::Args;
use console::style;
use log::info;
use sigbox::prelude::*;

use crate::input::InputArgs;
use crate::utils::{
    write_tsv,
    UtilsArgs,
};

fn significant_count(
    adjusted: impl Iterator<Item = Option<f64>>,
    alpha: f64,
) -> usize {
    adjusted.flatten().filter(|p| *p < alpha).count()
}

#[derive(Args, Debug, Clone)]
pub(crate) struct NormalityArgs {
    #[clap(flatten)]
    pub input:      InputArgs,
    #[arg(short, long, help = "Output TSV path. Printed to stdout when omitted")]
    pub output:     Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = CorrectionMethod::BenjaminiHochberg)]
    pub correction: CorrectionMethod,
    #[arg(long, default_value_t = 0.05, help = "Threshold for flagging non-normal groups")]
    pub alpha:      f64,
}

impl NormalityArgs {
    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        if let Some(path) = &self.output {
            if !utils.confirm_overwrite(path)? {
                return Ok(());
            }
        }
        let spinner = utils.spinner("Testing normality")?;
        let dataset = self.input.read(&[])?;
        let rows = normality_table(&dataset, dataset.biomarkers(), self.correction)?;
        spinner.finish_and_clear();

        write_tsv(&rows, self.output.as_ref())?;
        let rejected = significant_count(rows.iter().map(|r| r.p_adjusted), self.alpha);
        info!(
            "Tested {} groups of {} biomarkers",
            rows.len(),
            dataset.biomarkers().len()
        );
        eprintln!(
            "{} of {} groups deviate from normality ({} adjusted p < {})",
            style(rejected).yellow(),
            rows.len(),
            self.correction,
            self.alpha
        );
        Ok(())
    }
}

#[derive(Args, Debug, Clone)]
pub(crate) struct VarianceArgs {
    #[clap(flatten)]
    pub input:      InputArgs,
    #[arg(short, long, help = "Output TSV path. Printed to stdout when omitted")]
    pub output:     Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = CorrectionMethod::BenjaminiHochberg)]
    pub correction: CorrectionMethod,
    #[arg(long, default_value_t = 0.05, help = "Threshold for flagging unequal variances")]
    pub alpha:      f64,
}

impl VarianceArgs {
    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        if let Some(path) = &self.output {
            if !utils.confirm_overwrite(path)? {
                return Ok(());
            }
        }
        let spinner = utils.spinner("Testing equality of variances")?;
        let dataset = self.input.read(&[])?;
        let rows = variance_table(&dataset, dataset.biomarkers(), self.correction)?;
        spinner.finish_and_clear();

        write_tsv(&rows, self.output.as_ref())?;
        let rejected = significant_count(rows.iter().map(|r| r.p_adjusted), self.alpha);
        eprintln!(
            "{} of {} biomarkers have unequal variances ({} adjusted p < {})",
            style(rejected).yellow(),
            rows.len(),
            self.correction,
            self.alpha
        );
        Ok(())
    }
}
