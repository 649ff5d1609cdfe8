use std::fs;
use std::path::Path;

use crate::error::RenderError;
use crate::model::{CurveKind, MetricSeries};

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 600.0;
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 70.0;
const GRID_STEPS: usize = 10;

const BLUE: &str = "#1f4fd8";
const RED: &str = "#d62728";

struct Frame {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl Frame {
    fn new() -> Self {
        Self {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width: WIDTH - MARGIN_LEFT - MARGIN_RIGHT,
            height: HEIGHT - MARGIN_TOP - MARGIN_BOTTOM,
        }
    }

    fn x(&self, value: f64) -> f64 {
        self.left + clamp_unit(value) * self.width
    }

    fn y(&self, value: f64) -> f64 {
        self.top + (1.0 - clamp_unit(value)) * self.height
    }

    fn right(&self) -> f64 {
        self.left + self.width
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

struct AxisLabels {
    title: String,
    x: &'static str,
    y: &'static str,
}

fn axis_labels(kind: CurveKind, list_number: usize) -> AxisLabels {
    match kind {
        CurveKind::PrecisionRecall => AxisLabels {
            title: format!("Precision-Recall Curve for Ranked List - {list_number}"),
            x: "Recall",
            y: "Precision",
        },
        CurveKind::Roc => AxisLabels {
            title: format!("ROC Curve for Ranked List - {list_number}"),
            x: "False Positive Rate (FPR)",
            y: "True Positive Rate (TPR)",
        },
    }
}

/// Renders the curve of `series` as a standalone SVG document.
///
/// Both axes span [0, 1] with a dashed grid every 0.1. Precision-recall plots
/// recall against precision; ROC plots FPR against TPR.
pub fn render_curve_svg(series: &MetricSeries, kind: CurveKind, list_number: usize) -> String {
    let frame = Frame::new();
    let labels = axis_labels(kind, list_number);
    let points = series.points(kind);

    let mut parts = vec![
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="Helvetica, Arial, sans-serif">"#
        ),
        format!(r#"<rect x="0" y="0" width="{WIDTH}" height="{HEIGHT}" fill="white"/>"#),
    ];

    for step in 0..=GRID_STEPS {
        let value = step as f64 / GRID_STEPS as f64;
        let x = frame.x(value);
        let y = frame.y(value);
        parts.push(format!(
            r##"<line x1="{x:.1}" y1="{:.1}" x2="{x:.1}" y2="{:.1}" stroke="#b0b0b0" stroke-dasharray="4 3" stroke-opacity="0.7"/>"##,
            frame.top,
            frame.bottom()
        ));
        parts.push(format!(
            r##"<line x1="{:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="#b0b0b0" stroke-dasharray="4 3" stroke-opacity="0.7"/>"##,
            frame.left,
            frame.right()
        ));
        parts.push(format!(
            r#"<text x="{x:.1}" y="{:.1}" font-size="12" text-anchor="middle">{value:.1}</text>"#,
            frame.bottom() + 20.0
        ));
        parts.push(format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="12" text-anchor="end">{value:.1}</text>"#,
            frame.left - 8.0,
            y + 4.0
        ));
    }

    parts.push(format!(
        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="none" stroke="black"/>"#,
        frame.left, frame.top, frame.width, frame.height
    ));
    parts.push(format!(
        r#"<text x="{:.1}" y="{:.1}" font-size="16" text-anchor="middle">{}</text>"#,
        WIDTH / 2.0,
        MARGIN_TOP / 2.0 + 6.0,
        escape_xml(&labels.title)
    ));
    parts.push(format!(
        r#"<text x="{:.1}" y="{:.1}" font-size="13" text-anchor="middle">{}</text>"#,
        frame.left + frame.width / 2.0,
        HEIGHT - 20.0,
        labels.x
    ));
    parts.push(format!(
        r#"<text x="20" y="{0:.1}" font-size="13" text-anchor="middle" transform="rotate(-90 20 {0:.1})">{1}</text>"#,
        frame.top + frame.height / 2.0,
        labels.y
    ));

    let polyline = points
        .iter()
        .map(|(x, y)| format!("{:.2},{:.2}", frame.x(*x), frame.y(*y)))
        .collect::<Vec<_>>()
        .join(" ");

    match kind {
        CurveKind::PrecisionRecall => {
            parts.push(format!(
                r#"<polyline points="{polyline}" fill="none" stroke="{BLUE}" stroke-width="1.5"/>"#
            ));
            for (x, y) in &points {
                parts.push(format!(
                    r#"<circle cx="{:.2}" cy="{:.2}" r="4" fill="{BLUE}"/>"#,
                    frame.x(*x),
                    frame.y(*y)
                ));
            }
            parts.extend(legend(
                &frame,
                LegendCorner::LowerLeft,
                &[LegendEntry::LineWithMarker(BLUE, "Precision-Recall Curve")],
            ));
        }
        CurveKind::Roc => {
            for (x, y) in &points {
                parts.push(format!(
                    r#"<circle cx="{:.2}" cy="{:.2}" r="5" fill="{BLUE}" fill-opacity="0.7" stroke="black"/>"#,
                    frame.x(*x),
                    frame.y(*y)
                ));
            }
            parts.push(format!(
                r#"<polyline points="{polyline}" fill="none" stroke="{RED}" stroke-width="2"/>"#
            ));
            parts.extend(legend(
                &frame,
                LegendCorner::LowerRight,
                &[
                    LegendEntry::Marker(BLUE, "Data Points"),
                    LegendEntry::Line(RED, "ROC Curve"),
                ],
            ));
        }
    }

    parts.push("</svg>".to_string());
    let mut svg = parts.join("\n");
    svg.push('\n');
    svg
}

pub fn write_curve(
    path: &Path,
    series: &MetricSeries,
    kind: CurveKind,
    list_number: usize,
) -> Result<(), RenderError> {
    fs::write(path, render_curve_svg(series, kind, list_number))
        .map_err(|source| RenderError::io(path, source))
}

enum LegendCorner {
    LowerLeft,
    LowerRight,
}

enum LegendEntry {
    Line(&'static str, &'static str),
    Marker(&'static str, &'static str),
    LineWithMarker(&'static str, &'static str),
}

fn legend(frame: &Frame, corner: LegendCorner, entries: &[LegendEntry]) -> Vec<String> {
    let box_width = 190.0;
    let row_height = 22.0;
    let box_height = row_height * entries.len() as f64 + 10.0;
    let left = match corner {
        LegendCorner::LowerLeft => frame.left + 12.0,
        LegendCorner::LowerRight => frame.right() - box_width - 12.0,
    };
    let top = frame.bottom() - box_height - 12.0;

    let mut parts = vec![format!(
        r##"<rect x="{left:.1}" y="{top:.1}" width="{box_width:.1}" height="{box_height:.1}" fill="white" fill-opacity="0.85" stroke="#cccccc" rx="4"/>"##
    )];

    for (index, entry) in entries.iter().enumerate() {
        let y = top + 5.0 + row_height * (index as f64 + 0.5);
        let sample_left = left + 10.0;
        let sample_right = left + 40.0;
        let sample_mid = (sample_left + sample_right) / 2.0;

        let (color, label) = match entry {
            LegendEntry::Line(color, label)
            | LegendEntry::Marker(color, label)
            | LegendEntry::LineWithMarker(color, label) => (*color, *label),
        };

        if matches!(entry, LegendEntry::Line(..) | LegendEntry::LineWithMarker(..)) {
            parts.push(format!(
                r#"<line x1="{sample_left:.1}" y1="{y:.1}" x2="{sample_right:.1}" y2="{y:.1}" stroke="{color}" stroke-width="2"/>"#
            ));
        }
        if matches!(entry, LegendEntry::Marker(..) | LegendEntry::LineWithMarker(..)) {
            parts.push(format!(
                r#"<circle cx="{sample_mid:.1}" cy="{y:.1}" r="4" fill="{color}" stroke="black" stroke-width="0.5"/>"#
            ));
        }
        parts.push(format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="12">{label}</text>"#,
            sample_right + 8.0,
            y + 4.0
        ));
    }

    parts
}

pub(crate) fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for character in value.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
