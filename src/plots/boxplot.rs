use std::fmt::Display;

use anyhow::anyhow;
use log::trace;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{
    HPos,
    Pos,
    VPos,
};
use rand::rngs::StdRng;
use rand::{
    Rng,
    SeedableRng,
};

use super::config::PlotConfig;
use super::layout::{
    BoxStats,
    SignificanceLayout,
};

const BOX_HALF_WIDTH: f64 = 0.4;
const CAP_HALF_WIDTH: f64 = 0.2;
const JITTER_HALF_WIDTH: f64 = 0.1;
const BOX_FILL_ALPHA: f64 = 0.35;

const TITLE_PT: f64 = 20.0;
const AXIS_LABEL_PT: f64 = 18.0;
const TICK_LABEL_PT: f64 = 16.0;
const ANNOTATION_PT: f64 = 18.0;
const VALUE_TICK_PT: f64 = 12.0;
const LINE_PT: f64 = 2.0;

fn plot_err<E: Display>(e: E) -> anyhow::Error { anyhow!("Could not draw figure: {}", e) }

/// Plotted values and annotation layout of one subplot.
#[derive(Debug, Clone)]
pub(crate) struct Panel {
    pub biomarker: String,
    /// Values per group, in x axis order.
    pub groups:    Vec<Vec<f64>>,
    pub layout:    SignificanceLayout,
}

/// Draws all panels on a `rows x cols` grid and writes the PNG. Cells
/// without a panel stay blank.
pub(crate) fn render_figure(
    panels: &[Panel],
    tick_labels: &[String],
    colors: &[RGBColor],
    config: &PlotConfig,
) -> anyhow::Result<()> {
    let root = BitMapBackend::new(&config.image_name, config.pixel_size()).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let areas = root.split_evenly(config.subplots);
    for (area, panel) in areas.iter().zip(panels.iter()) {
        draw_panel(area, panel, tick_labels, colors, config, &mut rng)?;
    }

    root.present().map_err(plot_err)?;
    Ok(())
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &Panel,
    tick_labels: &[String],
    colors: &[RGBColor],
    config: &PlotConfig,
    rng: &mut StdRng,
) -> anyhow::Result<()> {
    let px = |pt: f64| config.font_px(pt);
    let line_width = px(LINE_PT).round().max(1.0) as u32;
    let k = tick_labels.len();
    let layout = &panel.layout;

    let mut builder = ChartBuilder::on(area);
    builder
        .margin(px(8.0) as u32)
        .x_label_area_size((px(TICK_LABEL_PT) * 2.0) as u32)
        .y_label_area_size((px(VALUE_TICK_PT) * 5.0 + px(AXIS_LABEL_PT) * 1.5) as u32);
    if config.title {
        builder.caption(
            config.title_for(&panel.biomarker),
            ("sans-serif", px(TITLE_PT)),
        );
    }
    let mut chart = builder
        .build_cartesian_2d(-0.5..(k as f64 - 0.5), layout.y_min..layout.y_max)
        .map_err(plot_err)?;

    let x_formatter = |v: &f64| {
        let idx = v.round();
        if (v - idx).abs() < 1e-6 && idx >= 0.0 && (idx as usize) < k {
            tick_labels[idx as usize].clone()
        }
        else {
            String::new()
        }
    };
    let mut mesh = chart.configure_mesh();
    mesh.disable_mesh()
        .x_labels(k)
        .x_label_formatter(&x_formatter)
        .x_label_style(("sans-serif", px(TICK_LABEL_PT)))
        .y_label_style(("sans-serif", px(VALUE_TICK_PT)));
    if config.y_labels {
        mesh.y_desc(config.y_label_for(&panel.biomarker))
            .axis_desc_style(("sans-serif", px(AXIS_LABEL_PT)));
    }
    mesh.draw().map_err(plot_err)?;

    for (i, (values, color)) in panel.groups.iter().zip(colors.iter()).enumerate() {
        let x = i as f64;
        if let Some(stats) = BoxStats::from_values(values) {
            let (left, right) = (x - BOX_HALF_WIDTH, x + BOX_HALF_WIDTH);
            chart
                .draw_series([
                    Rectangle::new(
                        [(left, stats.q1), (right, stats.q3)],
                        color.mix(BOX_FILL_ALPHA).filled(),
                    ),
                    Rectangle::new(
                        [(left, stats.q1), (right, stats.q3)],
                        color.stroke_width(line_width),
                    ),
                ])
                .map_err(plot_err)?;
            chart
                .draw_series(
                    [
                        vec![(left, stats.median), (right, stats.median)],
                        vec![(x, stats.q1), (x, stats.whisker_low)],
                        vec![(x, stats.q3), (x, stats.whisker_high)],
                        vec![
                            (x - CAP_HALF_WIDTH, stats.whisker_low),
                            (x + CAP_HALF_WIDTH, stats.whisker_low),
                        ],
                        vec![
                            (x - CAP_HALF_WIDTH, stats.whisker_high),
                            (x + CAP_HALF_WIDTH, stats.whisker_high),
                        ],
                    ]
                    .into_iter()
                    .map(|points| PathElement::new(points, color.stroke_width(line_width))),
                )
                .map_err(plot_err)?;
            if config.show_fliers {
                chart
                    .draw_series(stats.fliers.iter().map(|v| {
                        Circle::new((x, *v), px(3.0) as u32, color.stroke_width(line_width))
                    }))
                    .map_err(plot_err)?;
            }
        }

        let radius = (px(config.jitter_size) / 2.0).round() as u32;
        let points = values
            .iter()
            .map(|v| (x + rng.gen_range(-JITTER_HALF_WIDTH..JITTER_HALF_WIDTH), *v))
            .collect::<Vec<_>>();
        chart
            .draw_series(
                points
                    .into_iter()
                    .map(|p| Circle::new(p, radius, color.mix(config.point_alpha).filled())),
            )
            .map_err(plot_err)?;
    }

    let text_style = ("sans-serif", px(ANNOTATION_PT))
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    for bar in layout.bars.iter() {
        let (x1, x2) = (bar.x1 as f64, bar.x2 as f64);
        trace!(
            "{}: bar {}-{} at {:.4} '{}'",
            panel.biomarker,
            bar.x1,
            bar.x2,
            bar.y,
            bar.label
        );
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(x1, bar.tip_y), (x1, bar.y), (x2, bar.y), (x2, bar.tip_y)],
                BLACK.stroke_width(line_width),
            )))
            .map_err(plot_err)?;
        chart
            .draw_series(std::iter::once(Text::new(
                bar.label.clone(),
                ((x1 + x2) / 2.0, bar.text_y),
                text_style.clone(),
            )))
            .map_err(plot_err)?;
    }
    Ok(())
}
