use serde::{
    Deserialize,
    Serialize,
};

use crate::data_structs::enums::PValueFormat;
use crate::data_structs::results::CorrectedResult;
use crate::error::SigboxError;
use crate::utils::{
    quantile_sorted,
    sorted_copy,
};

/// Geometry of the significance annotations, as fractions of the data
/// range of a subplot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geometry {
    /// Vertical spacing between stacked bars.
    pub bar_height_factor: f64,
    /// Length of the downward tips at both bar ends.
    pub bar_tips_factor:   f64,
    /// Gap between the highest value and the base of the bar stack.
    pub y_top_factor:      f64,
    /// Headroom added above the highest annotation.
    pub y_range_factor:    f64,
    /// Offset of the annotation text above its bar.
    pub asterisk_factor:   f64,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            bar_height_factor: 0.02,
            bar_tips_factor:   0.005,
            y_top_factor:      0.05,
            y_range_factor:    0.1,
            asterisk_factor:   0.02,
        }
    }
}

impl Geometry {
    pub fn validate(&self) -> Result<(), SigboxError> {
        let factors = [
            ("bar_height_factor", self.bar_height_factor),
            ("bar_tips_factor", self.bar_tips_factor),
            ("y_top_factor", self.y_top_factor),
            ("y_range_factor", self.y_range_factor),
            ("asterisk_factor", self.asterisk_factor),
        ];
        for (name, value) in factors {
            if !value.is_finite() || value < 0.0 {
                return Err(SigboxError::InvalidConfig(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// One horizontal bar between two group positions.
#[derive(Debug, Clone, PartialEq)]
pub struct SignificanceBar {
    pub x1:     usize,
    pub x2:     usize,
    pub y:      f64,
    pub tip_y:  f64,
    pub text_y: f64,
    pub label:  String,
}

/// Vertical placement of the significance bars of one subplot and the
/// resulting y axis limits.
#[derive(Debug, Clone, PartialEq)]
pub struct SignificanceLayout {
    pub y_range: f64,
    pub top:     f64,
    pub y_min:   f64,
    pub y_max:   f64,
    pub bars:    Vec<SignificanceBar>,
}

impl SignificanceLayout {
    /// Stacks one bar per significant comparison above the data range
    /// `(min, max)`, in comparison order.
    pub fn compute(
        data_range: (f64, f64),
        comparisons: &[CorrectedResult],
        geometry: &Geometry,
        format: PValueFormat,
    ) -> Self {
        let (min, max) = data_range;
        let y_range = match max - min {
            r if r > 0.0 => r,
            _ if max != 0.0 => max.abs(),
            _ => 1.0,
        };
        let top = max + y_range * geometry.y_top_factor;

        let bars: Vec<SignificanceBar> = comparisons
            .iter()
            .filter(|c| c.significant)
            .filter_map(|c| c.p_adjusted.map(|p| (c, p)))
            .enumerate()
            .map(|(i, (c, p))| {
                let y = top + y_range * geometry.bar_height_factor * (i + 1) as f64;
                let (x1, x2) = c.comparison.positions;
                SignificanceBar {
                    x1: x1.min(x2),
                    x2: x1.max(x2),
                    y,
                    tip_y: y - y_range * geometry.bar_tips_factor,
                    text_y: y + y_range * geometry.asterisk_factor,
                    label: format.annotate(p),
                }
            })
            .collect();

        let highest = bars
            .iter()
            .map(|b| b.text_y)
            .fold(top, f64::max);
        Self {
            y_range,
            top,
            y_min: min - 0.05 * y_range,
            y_max: highest + y_range * geometry.y_range_factor,
            bars,
        }
    }
}

/// Box and whisker summary of one group, whiskers at the most extreme
/// values within 1.5 IQR of the quartiles.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1:           f64,
    pub median:       f64,
    pub q3:           f64,
    pub whisker_low:  f64,
    pub whisker_high: f64,
    pub fliers:       Vec<f64>,
}

impl BoxStats {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let sorted = sorted_copy(values);
        let q1 = quantile_sorted(&sorted, 0.25)?;
        let median = quantile_sorted(&sorted, 0.5)?;
        let q3 = quantile_sorted(&sorted, 0.75)?;
        let iqr = q3 - q1;
        let (low_fence, high_fence) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

        let whisker_low = sorted
            .iter()
            .copied()
            .find(|v| *v >= low_fence)
            .unwrap_or(q1);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|v| *v <= high_fence)
            .unwrap_or(q3);
        let fliers = sorted
            .iter()
            .copied()
            .filter(|v| *v < low_fence || *v > high_fence)
            .collect();

        Some(Self {
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            fliers,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;
    use crate::data_structs::dataset::GroupLabel;
    use crate::data_structs::enums::TestKind;
    use crate::data_structs::results::ComparisonResult;

    fn corrected(
        positions: (usize, usize),
        p: Option<f64>,
        significant: bool,
    ) -> CorrectedResult {
        CorrectedResult {
            comparison: ComparisonResult {
                group_a: GroupLabel::from(positions.0 as i64),
                group_b: GroupLabel::from(positions.1 as i64),
                positions,
                test: TestKind::TTest,
                statistic: Some(1.0),
                p_value: p,
            },
            p_adjusted: p,
            significant,
        }
    }

    #[test]
    fn bars_stack_above_data() {
        let comparisons = vec![
            corrected((0, 1), Some(0.0004), true),
            corrected((0, 2), Some(0.2), false),
            corrected((1, 2), Some(0.03), true),
            corrected((2, 3), None, false),
        ];
        let layout = SignificanceLayout::compute(
            (0.0, 10.0),
            &comparisons,
            &Geometry::default(),
            PValueFormat::Asterisk,
        );

        assert_approx_eq!(layout.y_range, 10.0);
        assert_approx_eq!(layout.top, 10.5);
        assert_eq!(layout.bars.len(), 2);

        let first = &layout.bars[0];
        assert_eq!((first.x1, first.x2), (0, 1));
        assert_approx_eq!(first.y, 10.7);
        assert_approx_eq!(first.tip_y, 10.65);
        assert_approx_eq!(first.text_y, 10.9);
        assert_eq!(first.label, "***");

        let second = &layout.bars[1];
        assert_eq!((second.x1, second.x2), (1, 2));
        assert_approx_eq!(second.y, 10.9);
        assert_eq!(second.label, "*");

        assert_approx_eq!(layout.y_min, -0.5);
        assert_approx_eq!(layout.y_max, 11.1 + 1.0);
    }

    #[test]
    fn no_bars_uses_top() {
        let layout = SignificanceLayout::compute(
            (2.0, 4.0),
            &[corrected((0, 1), Some(0.5), false)],
            &Geometry::default(),
            PValueFormat::Text,
        );
        assert!(layout.bars.is_empty());
        assert_approx_eq!(layout.y_max, 4.1 + 0.2);
    }

    #[test]
    fn flat_data_range() {
        let layout =
            SignificanceLayout::compute((5.0, 5.0), &[], &Geometry::default(), PValueFormat::Text);
        assert_approx_eq!(layout.y_range, 5.0);
        let zero =
            SignificanceLayout::compute((0.0, 0.0), &[], &Geometry::default(), PValueFormat::Text);
        assert_approx_eq!(zero.y_range, 1.0);
    }

    #[test]
    fn text_labels() {
        let layout = SignificanceLayout::compute(
            (0.0, 1.0),
            &[corrected((1, 0), Some(0.012), true)],
            &Geometry::default(),
            PValueFormat::Text,
        );
        assert_eq!(layout.bars[0].label, "p = 0.012");
        assert_eq!((layout.bars[0].x1, layout.bars[0].x2), (0, 1));
    }

    #[test]
    fn negative_factor_rejected() {
        let geometry = Geometry {
            bar_tips_factor: -0.1,
            ..Geometry::default()
        };
        assert!(geometry.validate().unwrap_err().is_config());
        assert!(Geometry::default().validate().is_ok());
    }

    #[test]
    fn box_stats_with_outlier() {
        let stats = BoxStats::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]).unwrap();
        assert_approx_eq!(stats.q1, 2.25);
        assert_approx_eq!(stats.median, 3.5);
        assert_approx_eq!(stats.q3, 4.75);
        assert_approx_eq!(stats.whisker_low, 1.0);
        assert_approx_eq!(stats.whisker_high, 5.0);
        assert_eq!(stats.fliers, vec![100.0]);
        assert!(BoxStats::from_values(&[]).is_none());
    }
}
