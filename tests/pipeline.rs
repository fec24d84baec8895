use std::io::Write;
use std::path::PathBuf;

use sigbox::prelude::*;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/biomarkers.csv")
}

#[test]
fn reads_fixture() {
    let dataset = read_dataset(fixture(), "group", &["TREM2", "GFAP"], b',').unwrap();
    assert_eq!(dataset.n_records(), 45);
    assert_eq!(dataset.group_col(), "group");
    assert_eq!(
        dataset.group_labels(),
        vec![GroupLabel::from("0"), GroupLabel::from("1"), GroupLabel::from("2")]
    );
    // one missing GFAP value in group 1
    let sizes = dataset
        .groups("GFAP")
        .unwrap()
        .iter()
        .map(|g| g.n())
        .collect::<Vec<_>>();
    assert_eq!(sizes, vec![15, 14, 15]);
}

#[test]
fn figure_and_reports() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("trem2_gfap.png");
    let dataset = read_dataset(fixture(), "group", &["TREM2", "GFAP"], b',').unwrap();

    let config = PlotConfig::default()
        .with_subplots((1, 2))
        .with_fig_size((8.0, 4.0))
        .with_dpi(72)
        .with_p_value_format(PValueFormat::Asterisk)
        .with_image_name(image.clone());
    let reports = generate_boxplots_with_significance(&dataset, &config).unwrap();

    let bytes = std::fs::read(&image).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

    assert_eq!(reports.len(), 2);
    let trem2 = &reports[0];
    assert_eq!(trem2.biomarker, "TREM2");
    assert!(trem2.omnibus.is_some());
    assert_eq!(trem2.comparisons.len(), 3);
    assert_eq!(trem2.significant().count(), 3);

    let gfap = &reports[1];
    assert_eq!(gfap.comparisons.len(), 3);
    assert_eq!(gfap.significant().count(), 0);
    for result in gfap.comparisons.iter() {
        let (raw, adjusted) = (
            result.comparison.p_value.unwrap(),
            result.p_adjusted.unwrap(),
        );
        assert!(adjusted >= raw);
    }
}

#[test]
fn unknown_biomarker_is_reported() {
    let err = read_dataset(fixture(), "group", &["TREM2", "IL6"], b',').unwrap_err();
    assert_eq!(
        err.downcast_ref::<SigboxError>(),
        Some(&SigboxError::MissingColumn("IL6".into()))
    );
}

#[test]
fn infinite_value_is_reported() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "group,GFAP\n0,1.5\n0,2.5\n1,inf\n1,3.0").unwrap();
    let err = read_dataset(file.path(), "group", &["GFAP"], b',').unwrap_err();
    assert_eq!(
        err.downcast_ref::<SigboxError>(),
        Some(&SigboxError::NonFiniteValue("GFAP".into(), 2))
    );
}

#[test]
fn diagnostics_cover_every_cell() {
    let dataset = read_dataset(fixture(), "group", &["TREM2", "GFAP"], b',').unwrap();
    let normality =
        normality_table(&dataset, &["TREM2", "GFAP"], CorrectionMethod::BenjaminiHochberg)
            .unwrap();
    assert_eq!(normality.len(), 6);
    assert!(normality.iter().all(|r| r.p_adjusted.is_some()));

    let variance = variance_table(&dataset, &["TREM2", "GFAP"], CorrectionMethod::Bonferroni)
        .unwrap();
    assert_eq!(variance.len(), 2);
    assert!(variance.iter().all(|r| r.groups == 3));
}
