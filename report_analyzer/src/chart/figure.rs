//!
//! A figure: a titled grid of chart panels rendered to a standalone SVG
//! document.
//!

use std::fmt::Write;

use crate::chart::scale::Scale;
use crate::chart::series::Series;

/// The number of panel columns in a figure.
const COLS: usize = 2;

/// The figure width in pixels.
const SVG_W: f64 = 960.0;

/// The figure title band height.
const TITLE_H: f64 = 48.0;

/// A single panel's width.
const PANEL_W: f64 = SVG_W / COLS as f64;

/// A single panel's height.
const PANEL_H: f64 = 300.0;

/// The chart area margins within a panel.
const CHART_LEFT: f64 = 64.0;
const CHART_RIGHT: f64 = 18.0;
const CHART_TOP: f64 = 34.0;
const CHART_BOTTOM: f64 = 52.0;

/// The series color palette.
const PALETTE: [&str; 6] = ["4C78A8", "F58518", "E45756", "72B7B2", "54A24B", "B279A2"];

/// The hue ramp endpoints for color-encoded scatter dimensions.
const HUE_LOW: (u8, u8, u8) = (0x4C, 0x78, 0xA8);
const HUE_HIGH: (u8, u8, u8) = (0xF5, 0x85, 0x18);

///
/// One chart panel: axes, scales, and the series drawn inside them.
///
#[derive(Debug, Clone)]
pub struct Panel {
    /// The panel title.
    pub title: String,
    /// The horizontal axis label.
    pub x_label: String,
    /// The vertical axis label.
    pub y_label: String,
    /// The horizontal scale; ignored when the axis is categorical.
    pub x_scale: Scale,
    /// The vertical scale.
    pub y_scale: Scale,
    /// Category labels for a categorical horizontal axis.
    pub categories: Option<Vec<String>>,
    /// The series drawn in the panel.
    pub series: Vec<Series>,
}

impl Panel {
    ///
    /// A constructor for a panel over a categorical horizontal axis.
    ///
    pub fn categorical(
        title: &str,
        x_label: &str,
        y_label: &str,
        categories: Vec<String>,
        series: Vec<Series>,
    ) -> Self {
        Self {
            title: title.to_owned(),
            x_label: x_label.to_owned(),
            y_label: y_label.to_owned(),
            x_scale: Scale::Linear,
            y_scale: Scale::Linear,
            categories: Some(categories),
            series,
        }
    }

    ///
    /// A constructor for a panel over numeric axes.
    ///
    pub fn numeric(
        title: &str,
        x_label: &str,
        y_label: &str,
        x_scale: Scale,
        y_scale: Scale,
        series: Vec<Series>,
    ) -> Self {
        Self {
            title: title.to_owned(),
            x_label: x_label.to_owned(),
            y_label: y_label.to_owned(),
            x_scale,
            y_scale,
            categories: None,
            series,
        }
    }

    ///
    /// Whether the panel has at least one value its scales can draw.
    ///
    fn is_drawable(&self) -> bool {
        self.series.iter().any(|series| {
            series.y_values().iter().any(|value| match self.y_scale {
                Scale::Linear => value.is_finite(),
                Scale::Log => *value > 0.0,
            })
        })
    }

    ///
    /// The vertical domain of the panel.
    ///
    fn y_domain(&self) -> (f64, f64) {
        let values: Vec<f64> = self
            .series
            .iter()
            .flat_map(|series| series.y_values())
            .filter(|value| match self.y_scale {
                Scale::Linear => true,
                Scale::Log => *value > 0.0,
            })
            .collect();
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        match self.y_scale {
            Scale::Log => (min * 0.55, max * 1.45),
            Scale::Linear => {
                let lo = min.min(0.0);
                let hi = if max > lo { max * 1.08 } else { lo + 1.0 };
                (lo, hi)
            }
        }
    }

    ///
    /// The horizontal domain of the panel, for numeric axes.
    ///
    fn x_domain(&self) -> (f64, f64) {
        let values: Vec<f64> = self
            .series
            .iter()
            .flat_map(|series| series.x_values())
            .filter(|value| match self.x_scale {
                Scale::Linear => true,
                Scale::Log => *value > 0.0,
            })
            .collect();
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        match self.x_scale {
            Scale::Log => (min * 0.55, max * 1.45),
            Scale::Linear => {
                let pad = (max - min).abs() * 0.05;
                let lo = min - pad;
                let hi = if max + pad > lo { max + pad } else { lo + 1.0 };
                (lo, hi)
            }
        }
    }
}

///
/// A titled grid of chart panels.
///
#[derive(Debug, Clone)]
pub struct Figure {
    /// The figure title.
    pub title: String,
    /// The panels, laid out row by row, two per row.
    pub panels: Vec<Panel>,
}

impl Figure {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(title: &str, panels: Vec<Panel>) -> Self {
        Self {
            title: title.to_owned(),
            panels,
        }
    }

    ///
    /// Renders the figure to an SVG document.
    ///
    /// Panels without drawable data are skipped; `None` means nothing at all
    /// could be drawn and no artifact should be written.
    ///
    pub fn render(&self) -> Option<String> {
        let drawable: Vec<&Panel> = self
            .panels
            .iter()
            .filter(|panel| panel.is_drawable())
            .collect();
        if drawable.is_empty() {
            return None;
        }

        let rows = (drawable.len() + COLS - 1) / COLS;
        let svg_h = TITLE_H + rows as f64 * PANEL_H + 20.0;

        let mut out = String::with_capacity(16 * 1024);
        let w = &mut out;

        writeln!(
            w,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{SVG_W}\" height=\"{svg_h}\" font-family=\"monospace,Arial,sans-serif\">"
        )
        .expect("Always valid");
        writeln!(
            w,
            "<rect width=\"{SVG_W}\" height=\"{svg_h}\" fill=\"#FAFAFA\"/>"
        )
        .expect("Always valid");
        writeln!(
            w,
            "<text x=\"{}\" y=\"30\" text-anchor=\"middle\" font-size=\"15\" font-weight=\"bold\" fill=\"#222\">{}</text>",
            SVG_W / 2.0,
            escape(self.title.as_str()),
        )
        .expect("Always valid");

        for (index, panel) in drawable.into_iter().enumerate() {
            let px = (index % COLS) as f64 * PANEL_W;
            let py = TITLE_H + (index / COLS) as f64 * PANEL_H;
            render_panel(w, panel, px, py);
        }

        writeln!(w, "</svg>").expect("Always valid");
        Some(out)
    }
}

///
/// Renders one panel at the given grid origin.
///
fn render_panel(w: &mut String, panel: &Panel, px: f64, py: f64) {
    let chart_w = PANEL_W - CHART_LEFT - CHART_RIGHT;
    let chart_h = PANEL_H - CHART_TOP - CHART_BOTTOM;
    let cx = px + CHART_LEFT;
    let cy = py + CHART_TOP;

    writeln!(
        w,
        "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" rx=\"6\" fill=\"white\" stroke=\"#DDD\" stroke-width=\"1\"/>",
        px + 4.0,
        py + 2.0,
        PANEL_W - 8.0,
        PANEL_H - 4.0
    )
    .expect("Always valid");
    writeln!(
        w,
        "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"10.5\" font-weight=\"bold\" fill=\"#333\">{}</text>",
        px + PANEL_W / 2.0,
        py + 18.0,
        escape(panel.title.as_str()),
    )
    .expect("Always valid");

    let (y_lo, y_hi) = panel.y_domain();
    let y_of = |value: f64| -> Option<f64> {
        panel
            .y_scale
            .position(value, y_lo, y_hi)
            .map(|t| cy + chart_h - t * chart_h)
    };

    // y ticks and grid
    for tick in panel.y_scale.ticks(y_lo, y_hi) {
        if let Some(ty) = y_of(tick) {
            writeln!(
                w,
                "<line x1=\"{cx:.1}\" y1=\"{ty:.1}\" x2=\"{:.1}\" y2=\"{ty:.1}\" stroke=\"#EEE\" stroke-width=\"1\"/>",
                cx + chart_w
            )
            .expect("Always valid");
            writeln!(
                w,
                "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"8\" fill=\"#888\">{}</text>",
                cx - 4.0,
                ty + 2.5,
                fmt_value(tick),
            )
            .expect("Always valid");
        }
    }

    // axis labels
    writeln!(
        w,
        "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"9\" fill=\"#555\">{}</text>",
        cx + chart_w / 2.0,
        py + PANEL_H - 8.0,
        escape(panel.x_label.as_str()),
    )
    .expect("Always valid");
    writeln!(
        w,
        "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"9\" fill=\"#555\" transform=\"rotate(-90 {:.1} {:.1})\">{}</text>",
        px + 12.0,
        cy + chart_h / 2.0,
        px + 12.0,
        cy + chart_h / 2.0,
        escape(panel.y_label.as_str()),
    )
    .expect("Always valid");

    match panel.categories.as_ref() {
        Some(categories) => {
            render_categorical(w, panel, categories, cx, cy, chart_w, chart_h, &y_of);
        }
        None => {
            render_numeric(w, panel, cx, cy, chart_w, chart_h, &y_of);
        }
    }

    // legend
    let mut legend_row = 0usize;
    for (series_index, series) in panel.series.iter().enumerate() {
        let label = match series {
            Series::Bars { label, .. } | Series::Line { label, .. } => label.as_str(),
            Series::Scatter { .. } => continue,
        };
        let color = PALETTE[series_index % PALETTE.len()];
        let ly = cy + 4.0 + legend_row as f64 * 11.0;
        writeln!(
            w,
            "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"7\" height=\"7\" fill=\"#{color}\" opacity=\"0.85\"/>",
            cx + chart_w - 86.0,
            ly,
        )
        .expect("Always valid");
        writeln!(
            w,
            "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"8\" fill=\"#444\">{}</text>",
            cx + chart_w - 76.0,
            ly + 6.5,
            escape(label),
        )
        .expect("Always valid");
        legend_row += 1;
    }

    // baseline
    writeln!(
        w,
        "<line x1=\"{cx:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"#BBB\" stroke-width=\"1\"/>",
        cy + chart_h,
        cx + chart_w,
        cy + chart_h
    )
    .expect("Always valid");
}

///
/// Renders bar and line series over category slots.
///
#[allow(clippy::too_many_arguments)]
fn render_categorical(
    w: &mut String,
    panel: &Panel,
    categories: &[String],
    cx: f64,
    cy: f64,
    chart_w: f64,
    chart_h: f64,
    y_of: &dyn Fn(f64) -> Option<f64>,
) {
    if categories.is_empty() {
        return;
    }
    let slot_w = chart_w / categories.len() as f64;
    let bar_series = panel
        .series
        .iter()
        .filter(|series| matches!(series, Series::Bars { .. }))
        .count();

    for (slot, category) in categories.iter().enumerate() {
        let label_x = cx + (slot as f64 + 0.5) * slot_w;
        writeln!(
            w,
            "<text x=\"{label_x:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"7.5\" fill=\"#666\">{}</text>",
            cy + chart_h + 12.0,
            escape(category.as_str()),
        )
        .expect("Always valid");
    }

    let baseline = y_of(0.0f64.max(panel.y_domain().0)).unwrap_or(cy + chart_h);

    let mut bar_index = 0usize;
    for (series_index, series) in panel.series.iter().enumerate() {
        let color = PALETTE[series_index % PALETTE.len()];
        match series {
            Series::Bars { values, .. } => {
                let group_w = slot_w * 0.72;
                let bar_w = group_w / bar_series.max(1) as f64;
                for (slot, value) in values.iter().enumerate() {
                    let value = match value {
                        Some(value) if value.is_finite() => *value,
                        _ => continue,
                    };
                    let top = match y_of(value) {
                        Some(top) => top,
                        None => continue,
                    };
                    let bx =
                        cx + slot as f64 * slot_w + (slot_w - group_w) / 2.0 + bar_index as f64 * bar_w;
                    let height = (baseline - top).max(0.0);
                    writeln!(
                        w,
                        "<rect x=\"{bx:.1}\" y=\"{top:.1}\" width=\"{:.1}\" height=\"{height:.1}\" rx=\"1.5\" fill=\"#{color}\" opacity=\"0.80\"/>",
                        (bar_w - 2.0).max(1.0),
                    )
                    .expect("Always valid");
                }
                bar_index += 1;
            }
            Series::Line { points, .. } => {
                let mut path = String::new();
                for (x, y) in points.iter() {
                    let slot_center = cx + (*x + 0.5) * slot_w;
                    if let Some(ly) = y_of(*y) {
                        path.push_str(if path.is_empty() { "M" } else { " L" });
                        write!(path, "{slot_center:.1} {ly:.1}").expect("Always valid");
                        writeln!(
                            w,
                            "<circle cx=\"{slot_center:.1}\" cy=\"{ly:.1}\" r=\"2.6\" fill=\"#{color}\"/>"
                        )
                        .expect("Always valid");
                    }
                }
                if !path.is_empty() {
                    writeln!(
                        w,
                        "<path d=\"{path}\" fill=\"none\" stroke=\"#{color}\" stroke-width=\"1.8\" opacity=\"0.9\"/>"
                    )
                    .expect("Always valid");
                }
            }
            Series::Scatter { .. } => {}
        }
    }
}

///
/// Renders line and scatter series over numeric axes.
///
fn render_numeric(
    w: &mut String,
    panel: &Panel,
    cx: f64,
    cy: f64,
    chart_w: f64,
    chart_h: f64,
    y_of: &dyn Fn(f64) -> Option<f64>,
) {
    let (x_lo, x_hi) = panel.x_domain();
    let x_of = |value: f64| -> Option<f64> {
        panel
            .x_scale
            .position(value, x_lo, x_hi)
            .map(|t| cx + t * chart_w)
    };

    for tick in panel.x_scale.ticks(x_lo, x_hi) {
        if let Some(tx) = x_of(tick) {
            writeln!(
                w,
                "<line x1=\"{tx:.1}\" y1=\"{cy:.1}\" x2=\"{tx:.1}\" y2=\"{:.1}\" stroke=\"#EEE\" stroke-width=\"1\"/>",
                cy + chart_h
            )
            .expect("Always valid");
            writeln!(
                w,
                "<text x=\"{tx:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"8\" fill=\"#888\">{}</text>",
                cy + chart_h + 12.0,
                fmt_value(tick),
            )
            .expect("Always valid");
        }
    }

    let hue_domain = {
        let hues: Vec<f64> = panel
            .series
            .iter()
            .filter_map(|series| match series {
                Series::Scatter { points, .. } => {
                    Some(points.iter().map(|point| point.hue).collect::<Vec<f64>>())
                }
                _ => None,
            })
            .flatten()
            .filter(|value| value.is_finite())
            .collect();
        let min = hues.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = hues.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        (min, max)
    };

    for (series_index, series) in panel.series.iter().enumerate() {
        let color = PALETTE[series_index % PALETTE.len()];
        match series {
            Series::Line { points, .. } => {
                let mut path = String::new();
                for (x, y) in points.iter() {
                    if let (Some(lx), Some(ly)) = (x_of(*x), y_of(*y)) {
                        path.push_str(if path.is_empty() { "M" } else { " L" });
                        write!(path, "{lx:.1} {ly:.1}").expect("Always valid");
                        writeln!(
                            w,
                            "<circle cx=\"{lx:.1}\" cy=\"{ly:.1}\" r=\"2.6\" fill=\"#{color}\"/>"
                        )
                        .expect("Always valid");
                    }
                }
                if !path.is_empty() {
                    writeln!(
                        w,
                        "<path d=\"{path}\" fill=\"none\" stroke=\"#{color}\" stroke-width=\"1.8\" opacity=\"0.9\"/>"
                    )
                    .expect("Always valid");
                }
            }
            Series::Scatter { hue_label, points } => {
                for point in points.iter() {
                    if let (Some(sx), Some(sy)) = (x_of(point.x), y_of(point.y)) {
                        let fill = hue_color(point.hue, hue_domain.0, hue_domain.1);
                        writeln!(
                            w,
                            "<circle cx=\"{sx:.1}\" cy=\"{sy:.1}\" r=\"4\" fill=\"{fill}\" opacity=\"0.85\" stroke=\"#555\" stroke-width=\"0.4\"/>"
                        )
                        .expect("Always valid");
                    }
                }
                if hue_domain.0.is_finite() && hue_domain.1.is_finite() {
                    let lx = cx + chart_w - 86.0;
                    writeln!(
                        w,
                        "<text x=\"{lx:.1}\" y=\"{:.1}\" font-size=\"8\" fill=\"#444\">{}</text>",
                        cy + 10.0,
                        escape(hue_label.as_str()),
                    )
                    .expect("Always valid");
                    for (offset, value) in [hue_domain.0, hue_domain.1].iter().enumerate() {
                        let ly = cy + 16.0 + offset as f64 * 11.0;
                        writeln!(
                            w,
                            "<circle cx=\"{:.1}\" cy=\"{ly:.1}\" r=\"3.5\" fill=\"{}\" opacity=\"0.85\"/>",
                            lx + 4.0,
                            hue_color(*value, hue_domain.0, hue_domain.1),
                        )
                        .expect("Always valid");
                        writeln!(
                            w,
                            "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"8\" fill=\"#444\">{}</text>",
                            lx + 12.0,
                            ly + 3.0,
                            fmt_value(*value),
                        )
                        .expect("Always valid");
                    }
                }
            }
            Series::Bars { .. } => {}
        }
    }
}

///
/// Interpolates the hue ramp for a color-encoded dimension.
///
fn hue_color(value: f64, min: f64, max: f64) -> String {
    let t = if max > min {
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    } else {
        0.5
    };
    let channel = |low: u8, high: u8| -> u8 {
        (low as f64 + (high as f64 - low as f64) * t).round() as u8
    };
    format!(
        "#{:02X}{:02X}{:02X}",
        channel(HUE_LOW.0, HUE_HIGH.0),
        channel(HUE_LOW.1, HUE_HIGH.1),
        channel(HUE_LOW.2, HUE_HIGH.2),
    )
}

///
/// Compact numeric formatting for tick and legend labels.
///
fn fmt_value(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 1_000_000.0 {
        format!("{:.1}M", value / 1e6)
    } else if magnitude >= 10_000.0 {
        format!("{:.0}k", value / 1e3)
    } else if magnitude >= 100.0 {
        format!("{value:.0}")
    } else if magnitude >= 1.0 {
        format!("{value:.2}")
    } else if magnitude > 0.0 {
        format!("{value:.3}")
    } else {
        "0".to_owned()
    }
}

///
/// Escapes text for SVG content.
///
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
