use std::path::PathBuf;

use clap::Args;
use console::style;
use sigbox::io::separator_for;
use sigbox::prelude::*;

#[derive(Args, Debug, Clone)]
pub(crate) struct InputArgs {
    #[arg(value_parser, help = "Path to a CSV or TSV table with one row per sample")]
    pub file:       PathBuf,
    #[arg(
        short,
        long = "group-col",
        default_value = "group",
        help = "Column holding the group label of each sample"
    )]
    pub group_col:  String,
    #[arg(
        short,
        long = "biomarker",
        help = "Biomarker column to analyse. Repeat for several"
    )]
    pub biomarkers: Vec<String>,
    #[arg(
        long,
        help = "Field separator. Defaults to tab for .tsv/.tab files and comma otherwise"
    )]
    pub sep:        Option<char>,
}

impl InputArgs {
    pub fn separator(&self) -> anyhow::Result<u8> {
        match self.sep {
            Some(c) if c.is_ascii() => Ok(c as u8),
            Some(c) => anyhow::bail!("Separator '{}' is not a single byte", c),
            None => Ok(separator_for(&self.file)),
        }
    }

    /// Reads the table with the given biomarkers, or the ones passed on the
    /// command line when `biomarkers` is empty.
    pub fn read(
        &self,
        biomarkers: &[String],
    ) -> anyhow::Result<Dataset> {
        let biomarkers = if biomarkers.is_empty() {
            self.biomarkers.as_slice()
        }
        else {
            biomarkers
        };
        if biomarkers.is_empty() {
            anyhow::bail!("No biomarkers selected. Pass them with -b/--biomarker");
        }
        if !self.file.is_file() {
            eprintln!("Path {} is not a file.", style(self.file.display()).red());
            anyhow::bail!("Missing input {}", self.file.display());
        }
        read_dataset(&self.file, &self.group_col, biomarkers, self.separator()?)
    }
}
