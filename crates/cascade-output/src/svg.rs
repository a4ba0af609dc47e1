//! SVG rendering of waterfall charts.

use crate::chart::BarTone;
use cascade_waterfall::{StepLabel, Waterfall};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Image size in pixels, matching a 4x4 inch figure at 80 dpi with room for labels.
const CHART_SIZE: (u32, u32) = (420, 420);

/// Errors that can occur while drawing a chart.
#[derive(Debug, Error)]
pub enum ChartError {
    /// Drawing backend error.
    #[error("Render error: {0}")]
    Render(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn render_error(err: impl std::fmt::Display) -> ChartError {
    ChartError::Render(err.to_string())
}

fn segment_label(value: &SegmentValue<usize>) -> String {
    match value {
        SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => StepLabel::ALL
            .get(*i)
            .map(|label| label.axis_label().to_string())
            .unwrap_or_default(),
        SegmentValue::Last => String::new(),
    }
}

fn tone_color(tone: BarTone) -> RGBColor {
    let (r, g, b) = tone.rgb();
    RGBColor(r, g, b)
}

/// Draw a waterfall as an SVG document.
///
/// One bar per step from its offset to its end, green for gains and red for
/// losses, with a black edge and the delta printed at the centre of the bar.
/// The x axis carries the short [`StepLabel::axis_label`] of each bar.
///
/// # Errors
///
/// Returns [`ChartError::Render`] when a bar bound is not finite, as happens
/// when a line item overflows against a tiny revenue.
pub fn render_waterfall_svg(title: &str, waterfall: &Waterfall) -> Result<String, ChartError> {
    if let Some(step) = waterfall
        .iter()
        .find(|step| !(step.delta.is_finite() && step.offset.is_finite()))
    {
        return Err(ChartError::Render(format!(
            "{} bar is not finite ({}% from {}%)",
            step.label, step.delta, step.offset
        )));
    }

    let (low, high) = waterfall.range();
    let padding = (high - low) * 0.05;
    let steps = waterfall.steps().len();
    // Integer ranges are inclusive here: 0..=5 gives one segment per step
    let segments = (0..steps - 1).into_segmented();

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 16))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(45)
            .build_cartesian_2d(segments, (low - padding)..(high + padding))
            .map_err(render_error)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_labels(steps + 1)
            .x_label_formatter(&segment_label)
            .x_label_style(("sans-serif", 9))
            .y_label_formatter(&|y| format!("{:.0}%", y))
            .draw()
            .map_err(render_error)?;

        chart
            .draw_series(waterfall.iter().map(|step| {
                let i = step.label.position();
                let (bottom, top) = step.bounds();
                let mut bar = Rectangle::new(
                    [(SegmentValue::Exact(i), bottom), (SegmentValue::Exact(i + 1), top)],
                    tone_color(BarTone::of(step)).filled(),
                );
                bar.set_margin(0, 0, 4, 4);
                bar
            }))
            .map_err(render_error)?;

        chart
            .draw_series(waterfall.iter().map(|step| {
                let i = step.label.position();
                let (bottom, top) = step.bounds();
                let mut edge = Rectangle::new(
                    [(SegmentValue::Exact(i), bottom), (SegmentValue::Exact(i + 1), top)],
                    BLACK.stroke_width(1),
                );
                edge.set_margin(0, 0, 4, 4);
                edge
            }))
            .map_err(render_error)?;

        let label_style = ("sans-serif", 10)
            .into_font()
            .color(&WHITE)
            .pos(Pos::new(HPos::Center, VPos::Center));
        chart
            .draw_series(waterfall.iter().map(|step| {
                let (bottom, top) = step.bounds();
                Text::new(
                    format!("{:.1}%", step.delta),
                    (SegmentValue::CenterOf(step.label.position()), (bottom + top) / 2.0),
                    label_style.clone(),
                )
            }))
            .map_err(render_error)?;

        root.present().map_err(render_error)?;
    }

    Ok(svg)
}

/// Draw a waterfall and write it to `path`.
pub fn write_waterfall_svg(
    path: &Path,
    title: &str,
    waterfall: &Waterfall,
) -> Result<(), ChartError> {
    let svg = render_waterfall_svg(title, waterfall)?;
    std::fs::write(path, svg)?;
    debug!(path = %path.display(), "wrote waterfall chart");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cascade_data::PeriodFinancials;
    use cascade_waterfall::compute_steps;
    use chrono::NaiveDate;

    #[test]
    fn test_segment_label() {
        assert_eq!(segment_label(&SegmentValue::CenterOf(1)), "COGS");
        assert_eq!(segment_label(&SegmentValue::CenterOf(3)), "D&A");
        assert_eq!(segment_label(&SegmentValue::Exact(5)), "Tax");
        assert_eq!(segment_label(&SegmentValue::Exact(6)), "");
        assert_eq!(segment_label(&SegmentValue::Last), "");
    }

    #[test]
    fn test_render_svg() {
        let waterfall = Waterfall::from_levels([100.0, 60.0, 40.0, 35.0, 30.0, 20.0]);
        let svg = render_waterfall_svg("XYZ FY2023", &waterfall).unwrap();

        assert!(svg.contains("<svg"));
        assert!(svg.contains("XYZ FY2023"));
        assert!(svg.contains("100.0%"));
        assert!(svg.contains("-40.0%"));
        assert!(svg.contains("COGS"));
        assert!(!svg.contains("Depreciation &amp; Amortization"));

        let upper = svg.to_uppercase();
        assert!(upper.contains("#008000"));
        assert!(upper.contains("#FF0000"));
    }

    #[test]
    fn test_render_svg_rejects_overflowing_levels() {
        let mut period = PeriodFinancials::new(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        period.total_revenue = Some(1e-300);
        period.gross_profit = Some(1e300);
        period.ebitda = Some(1e300);
        period.net_income = Some(5e299);
        let waterfall = compute_steps(&period).unwrap();

        let result = render_waterfall_svg("XYZ FY2023", &waterfall);
        assert!(matches!(result, Err(ChartError::Render(_))));
    }

    #[test]
    fn test_write_svg_skips_file_on_overflow() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        let waterfall = Waterfall::from_levels([100.0, f64::INFINITY, 0.0, 0.0, 0.0, 0.0]);

        assert!(write_waterfall_svg(&path, "T", &waterfall).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_write_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        let waterfall = Waterfall::from_levels([100.0, 50.0, 50.0, 50.0, 50.0, 50.0]);

        write_waterfall_svg(&path, "T", &waterfall).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("<svg"));
    }
}
