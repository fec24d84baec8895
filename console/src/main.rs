mod diagnostics;
mod input;
mod plot;
mod utils;

use clap::{
    Parser,
    Subcommand,
};
use diagnostics::{
    NormalityArgs,
    VarianceArgs,
};
use plot::PlotArgs;
use utils::UtilsArgs;
use wild::ArgsOs;

#[derive(Parser, Debug)]
#[command(
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None,)]
struct Cli {
    #[command(subcommand)]
    command: MainMenu,
}

#[derive(Subcommand, Debug)]
enum MainMenu {
    /// Draw boxplots annotated with significance bars.
    Plot {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  PlotArgs,
    },

    /// Shapiro-Wilk table for every biomarker and group.
    Normality {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  NormalityArgs,
    },

    /// Levene test of equal variances for every biomarker.
    Variance {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  VarianceArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let args: ArgsOs = wild::args_os();
    let cli = Cli::parse_from(args);

    match cli.command {
        MainMenu::Plot { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
        MainMenu::Normality { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
        MainMenu::Variance { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use sigbox::prelude::*;

    use super::*;

    #[test]
    fn plot_command() {
        let cli = Cli::try_parse_from([
            "sigbox",
            "plot",
            "cohort.tsv",
            "-g",
            "diagnosis",
            "-b",
            "TREM2",
            "-b",
            "YKL40",
            "--correction",
            "bonf",
            "--format",
            "asterisk",
            "--palette",
            "0=blue",
            "--palette",
            "1=#ff0000",
            "--grid",
            "1",
            "2",
            "-vv",
        ])
        .unwrap();
        match cli.command {
            MainMenu::Plot { utils, args } => {
                assert_eq!(utils.verbose, 2);
                assert_eq!(args.input.file, PathBuf::from("cohort.tsv"));
                assert_eq!(args.input.group_col, "diagnosis");
                assert_eq!(args.input.biomarkers, vec!["TREM2", "YKL40"]);
                assert_eq!(args.correction, Some(CorrectionMethod::Bonferroni));
                assert_eq!(args.format, Some(PValueFormat::Asterisk));
                assert_eq!(args.grid, Some(vec![1, 2]));

                let config = args.config().unwrap();
                assert_eq!(config.subplots, (1, 2));
                assert_eq!(config.palette.get("1").map(String::as_str), Some("#ff0000"));
                assert_eq!(config.biomarkers, vec!["TREM2", "YKL40"]);
                // untouched options keep their defaults
                assert_eq!(config.dpi, 300);
                assert_eq!(config.ttest_variant, TTestVariant::Student);
            },
            _ => panic!("expected plot"),
        }
    }

    #[test]
    fn diagnostics_commands() {
        let cli = Cli::try_parse_from([
            "sigbox",
            "normality",
            "cohort.csv",
            "-b",
            "TREM2",
            "-o",
            "normality.tsv",
        ])
        .unwrap();
        assert!(matches!(cli.command, MainMenu::Normality { .. }));

        let cli = Cli::try_parse_from(["sigbox", "variance", "cohort.csv", "-b", "TREM2"]).unwrap();
        match cli.command {
            MainMenu::Variance { args, .. } => {
                assert_eq!(args.input.group_col, "group");
                assert_eq!(args.correction, CorrectionMethod::BenjaminiHochberg);
            },
            _ => panic!("expected variance"),
        }
    }

    #[test]
    fn rejects_unknown_values() {
        assert!(Cli::try_parse_from([
            "sigbox",
            "plot",
            "cohort.csv",
            "-b",
            "TREM2",
            "--correction",
            "holm",
        ])
        .is_err());
        assert!(
            Cli::try_parse_from(["sigbox", "plot", "cohort.csv", "--palette", "blue"]).is_err()
        );
    }
}
