use std::fs::File;
use std::io::{
    stdout,
    Write,
};
use std::path::{
    Path,
    PathBuf,
};
use std::time::Duration;

use clap::Args;
use console::style;
use dialoguer::Confirm;
use hashbrown::HashMap;
use indicatif::{
    ProgressBar,
    ProgressStyle,
};
use serde::Serialize;

#[derive(Args, Debug, Clone)]
pub(crate) struct UtilsArgs {
    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence."
    )]
    pub verbose:  u8,
    #[arg(
        long,
        default_value_t = false,
        help = "Display a progress spinner."
    )]
    pub progress: bool,
    #[arg(
        short,
        long,
        default_value_t = false,
        help = "Overwrite existing output files without asking."
    )]
    pub force:    bool,
}

impl UtilsArgs {
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    pub fn setup(&self) -> anyhow::Result<()> {
        let filters =
            std::env::var("RUST_LOG").unwrap_or_else(|_| self.log_filter().to_string());
        pretty_env_logger::formatted_builder()
            .parse_filters(&filters)
            .try_init()?;
        Ok(())
    }

    /// Asks before overwriting an existing file unless `--force` is set.
    pub fn confirm_overwrite(
        &self,
        path: &Path,
    ) -> anyhow::Result<bool> {
        if self.force || !path.exists() {
            return Ok(true);
        }
        let answer = Confirm::new()
            .with_prompt(format!(
                "{} already exists. Overwrite?",
                style(path.display()).yellow()
            ))
            .default(false)
            .interact()?;
        Ok(answer)
    }

    pub fn spinner(
        &self,
        message: &str,
    ) -> anyhow::Result<ProgressBar> {
        if !self.progress {
            return Ok(ProgressBar::hidden());
        }
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        Ok(spinner)
    }
}

/// Parses `KEY=VALUE`.
pub(crate) fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    if key.is_empty() {
        return Err(format!("empty key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}

pub(crate) fn into_map(pairs: &[(String, String)]) -> HashMap<String, String> {
    pairs.iter().cloned().collect()
}

/// Writes rows as a tab-separated table to `path`, or to stdout.
pub(crate) fn write_tsv<T: Serialize>(
    rows: &[T],
    path: Option<&PathBuf>,
) -> anyhow::Result<()> {
    let sink: Box<dyn Write> = match path {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(stdout()),
    };
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(sink);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
