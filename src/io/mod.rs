//! Loading of tabular input through polars.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use log::info;
use polars::prelude::*;

use crate::data_structs::dataset::Dataset;

/// Field separator implied by the file extension: tab for `.tsv`/`.tab`,
/// comma otherwise.
pub fn separator_for<P: AsRef<Path>>(path: P) -> u8 {
    match path
        .as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .as_deref()
    {
        Some("tsv") | Some("tab") => b'\t',
        _ => b',',
    }
}

/// CSV options used by [read_dataset]: header row, the given separator,
/// `NA` treated as missing and the group column read as text.
pub fn csv_options(
    group_col: &str,
    separator: u8,
) -> CsvReadOptions {
    let overwrite = Schema::from_iter([Field::new(group_col.into(), DataType::String)]);
    CsvReadOptions::default()
        .with_has_header(true)
        .with_schema_overwrite(Some(Arc::new(overwrite)))
        .with_parse_options(
            CsvParseOptions::default()
                .with_separator(separator)
                .with_null_values(Some(NullValues::AllColumns(vec![
                    "NA".into(),
                    "N/A".into(),
                ]))),
        )
}

/// Reads a delimited file and builds a [Dataset] from the group column and
/// the listed biomarker columns.
pub fn read_dataset<P: AsRef<Path>, S: AsRef<str>>(
    path: P,
    group_col: &str,
    biomarkers: &[S],
    separator: u8,
) -> anyhow::Result<Dataset> {
    read_dataset_with_options(
        path,
        group_col,
        biomarkers,
        csv_options(group_col, separator),
    )
}

/// Same as [read_dataset] with caller supplied polars read options.
pub fn read_dataset_with_options<P: AsRef<Path>, S: AsRef<str>>(
    path: P,
    group_col: &str,
    biomarkers: &[S],
    options: CsvReadOptions,
) -> anyhow::Result<Dataset> {
    let path = path.as_ref();
    let df = options
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Could not open {}", path.display()))?
        .finish()
        .with_context(|| format!("Could not parse {}", path.display()))?;
    info!(
        "Read {} rows and {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );
    Dataset::from_dataframe(&df, group_col, biomarkers)
}
