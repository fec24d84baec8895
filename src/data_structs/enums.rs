use std::fmt::Display;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};

use crate::error::SigboxError;

/// Multiple-testing correction procedure.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "console", derive(clap::ValueEnum))]
pub enum CorrectionMethod {
    /// Bonferroni family-wise error rate correction.
    #[cfg_attr(feature = "console", value(name = "bonferroni", alias = "bonf"))]
    Bonferroni,
    /// Benjamini-Hochberg false discovery rate.
    #[default]
    #[cfg_attr(feature = "console", value(name = "fdr_bh", alias = "bh"))]
    BenjaminiHochberg,
    /// Benjamini-Yekutieli false discovery rate.
    #[cfg_attr(feature = "console", value(name = "fdr_by", alias = "by"))]
    BenjaminiYekutieli,
    /// Raw p-values are used unchanged.
    #[cfg_attr(feature = "console", value(name = "none"))]
    None,
}

impl CorrectionMethod {
    pub(crate) fn procedure(&self) -> Option<adjustp::Procedure> {
        match self {
            CorrectionMethod::Bonferroni => Some(adjustp::Procedure::Bonferroni),
            CorrectionMethod::BenjaminiHochberg => {
                Some(adjustp::Procedure::BenjaminiHochberg)
            },
            CorrectionMethod::BenjaminiYekutieli => {
                Some(adjustp::Procedure::BenjaminiYekutieli)
            },
            CorrectionMethod::None => None,
        }
    }
}

impl Display for CorrectionMethod {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            CorrectionMethod::Bonferroni => write!(f, "bonferroni"),
            CorrectionMethod::BenjaminiHochberg => write!(f, "fdr_bh"),
            CorrectionMethod::BenjaminiYekutieli => write!(f, "fdr_by"),
            CorrectionMethod::None => write!(f, "none"),
        }
    }
}

impl FromStr for CorrectionMethod {
    type Err = SigboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bonferroni" | "bonf" => Ok(CorrectionMethod::Bonferroni),
            "fdr_bh" | "bh" => Ok(CorrectionMethod::BenjaminiHochberg),
            "fdr_by" | "by" => Ok(CorrectionMethod::BenjaminiYekutieli),
            "none" => Ok(CorrectionMethod::None),
            _ => Err(SigboxError::UnknownCorrectionMethod(s.to_string())),
        }
    }
}

impl Serialize for CorrectionMethod {
    fn serialize<S>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer, {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CorrectionMethod {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>, {
        let s = String::deserialize(deserializer)?;
        FromStr::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// How the significance of a comparison is printed above its bar.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "console", derive(clap::ValueEnum))]
pub enum PValueFormat {
    /// `***`, `**`, `*` or `ns`.
    Asterisk,
    /// `p ≤ 0.001` or `p = 0.012`.
    #[default]
    Text,
}

impl PValueFormat {
    pub fn annotate(
        &self,
        p_value: f64,
    ) -> String {
        match self {
            PValueFormat::Asterisk => {
                if p_value < 0.001 {
                    "***"
                }
                else if p_value < 0.01 {
                    "**"
                }
                else if p_value < 0.05 {
                    "*"
                }
                else {
                    "ns"
                }
                .to_string()
            },
            PValueFormat::Text => {
                if p_value < 0.001 {
                    "p ≤ 0.001".to_string()
                }
                else {
                    format!("p = {:.3}", p_value)
                }
            },
        }
    }
}

impl Display for PValueFormat {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            PValueFormat::Asterisk => write!(f, "asterisk"),
            PValueFormat::Text => write!(f, "text"),
        }
    }
}

impl FromStr for PValueFormat {
    type Err = SigboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asterisk" => Ok(PValueFormat::Asterisk),
            "text" => Ok(PValueFormat::Text),
            _ => Err(SigboxError::UnknownPValueFormat(s.to_string())),
        }
    }
}

impl Serialize for PValueFormat {
    fn serialize<S>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer, {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PValueFormat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>, {
        let s = String::deserialize(deserializer)?;
        FromStr::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Variance assumption of the two-sample t-test.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "console", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum TTestVariant {
    /// Pooled variance (equal variances assumed).
    #[default]
    Student,
    /// Separate variances with Welch-Satterthwaite degrees of freedom.
    Welch,
}

/// Which comparisons share one multiple-testing family.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "console", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum CorrectionScope {
    /// Each biomarker is corrected on its own.
    #[default]
    PerBiomarker,
    /// All pairwise comparisons of all biomarkers form one family.
    Global,
}

/// Hypothesis test applied to a pair of groups or to all groups at once.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, Serialize, Deserialize)]
pub enum TestKind {
    #[serde(rename = "t-test")]
    TTest,
    #[serde(rename = "Welch t-test")]
    WelchTTest,
    #[serde(rename = "Mann-Whitney U")]
    MannWhitneyU,
    #[serde(rename = "ANOVA")]
    Anova,
    #[serde(rename = "Kruskal-Wallis")]
    KruskalWallis,
}

impl Display for TestKind {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            TestKind::TTest => write!(f, "t-test"),
            TestKind::WelchTTest => write!(f, "Welch t-test"),
            TestKind::MannWhitneyU => write!(f, "Mann-Whitney U"),
            TestKind::Anova => write!(f, "ANOVA"),
            TestKind::KruskalWallis => write!(f, "Kruskal-Wallis"),
        }
    }
}

/// Normality test used by the classifier, chosen by sample size.
#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, Serialize, Deserialize)]
pub enum NormalityTest {
    #[serde(rename = "Shapiro-Wilk")]
    ShapiroWilk,
    #[serde(rename = "Anderson-Darling")]
    AndersonDarling,
}

impl Display for NormalityTest {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            NormalityTest::ShapiroWilk => write!(f, "Shapiro-Wilk"),
            NormalityTest::AndersonDarling => write!(f, "Anderson-Darling"),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("bonferroni", CorrectionMethod::Bonferroni)]
    #[case("Bonf", CorrectionMethod::Bonferroni)]
    #[case("fdr_bh", CorrectionMethod::BenjaminiHochberg)]
    #[case("BH", CorrectionMethod::BenjaminiHochberg)]
    #[case("fdr_by", CorrectionMethod::BenjaminiYekutieli)]
    #[case("none", CorrectionMethod::None)]
    fn parse_correction_method(
        #[case] name: &str,
        #[case] expected: CorrectionMethod,
    ) {
        assert_eq!(name.parse::<CorrectionMethod>().unwrap(), expected);
    }

    #[test]
    fn unknown_correction_method_is_config_error() {
        let err = "holm-sidak".parse::<CorrectionMethod>().unwrap_err();
        assert_eq!(err, SigboxError::UnknownCorrectionMethod("holm-sidak".into()));
        assert!(err.is_config());
    }

    #[test]
    fn correction_method_serde() {
        let json = serde_json::to_string(&CorrectionMethod::BenjaminiHochberg).unwrap();
        assert_eq!(json, "\"fdr_bh\"");
        let parsed: CorrectionMethod = serde_json::from_str("\"bonf\"").unwrap();
        assert_eq!(parsed, CorrectionMethod::Bonferroni);
        assert!(serde_json::from_str::<CorrectionMethod>("\"sidak\"").is_err());
    }

    #[rstest]
    #[case(0.0004, "***", "p ≤ 0.001")]
    #[case(0.004, "**", "p = 0.004")]
    #[case(0.0312, "*", "p = 0.031")]
    #[case(0.2, "ns", "p = 0.200")]
    fn annotation(
        #[case] p: f64,
        #[case] asterisk: &str,
        #[case] text: &str,
    ) {
        assert_eq!(PValueFormat::Asterisk.annotate(p), asterisk);
        assert_eq!(PValueFormat::Text.annotate(p), text);
    }

    #[test]
    fn invalid_p_value_format() {
        assert!("stars".parse::<PValueFormat>().is_err());
        assert_eq!("Asterisk".parse::<PValueFormat>().unwrap(), PValueFormat::Asterisk);
    }
}
