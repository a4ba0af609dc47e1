//! Terminal rendering of waterfall charts.

use cascade_data::PeriodFinancials;
use cascade_waterfall::{Waterfall, WaterfallStep, compute_steps};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Width of the label column, fits "Depreciation & Amortization".
const LABEL_WIDTH: usize = 28;

/// Default bar area width in characters.
pub const DEFAULT_CHART_WIDTH: usize = 50;

/// Colour class of a bar, decided by the sign of its delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarTone {
    /// Non-negative delta.
    Gain,
    /// Negative delta.
    Loss,
}

impl BarTone {
    /// Tone of a step.
    pub fn of(step: &WaterfallStep) -> Self {
        if step.is_gain() { Self::Gain } else { Self::Loss }
    }

    /// Glyph used to fill terminal bars.
    pub const fn glyph(&self) -> char {
        match self {
            Self::Gain => '█',
            Self::Loss => '▒',
        }
    }

    /// Fill colour used in images, as RGB.
    pub const fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Self::Gain => (0, 128, 0),
            Self::Loss => (255, 0, 0),
        }
    }
}

/// Waterfall of one period; `None` when the period has no revenue to chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodWaterfall {
    /// Period end date.
    pub period_ending: NaiveDate,
    /// Bars, if the period could be charted.
    pub waterfall: Option<Waterfall>,
}

impl PeriodWaterfall {
    /// Compute the waterfall of a period.
    pub fn from_period(period: &PeriodFinancials) -> Self {
        Self {
            period_ending: period.period_ending,
            waterfall: compute_steps(period),
        }
    }

    /// Chart title, e.g. `AAPL FY2023 (2023-09-30)`.
    pub fn title(&self, symbol: &str) -> String {
        format!(
            "{} FY{} ({})",
            symbol,
            self.period_ending.format("%Y"),
            self.period_ending.format("%Y-%m-%d")
        )
    }
}

/// Compute the waterfall of every period, keeping their order.
pub fn period_waterfalls(periods: &[PeriodFinancials]) -> Vec<PeriodWaterfall> {
    periods.iter().map(PeriodWaterfall::from_period).collect()
}

/// Map a level onto a bar column.
fn column(value: f64, low: f64, span: f64, width: usize) -> usize {
    let scaled = ((value - low) / span * width as f64).round();
    (scaled.max(0.0) as usize).min(width)
}

/// Draw a waterfall as horizontal bars on a shared scale.
///
/// Each row shows the label, the signed delta to one decimal place and a bar
/// spanning from the step's offset to its end. Gains are drawn with `█`,
/// losses with `▒`; a zero step is marked with `│`.
pub fn render_waterfall_text(title: &str, waterfall: &Waterfall, width: usize) -> String {
    let width = width.max(10);
    let (low, high) = waterfall.range();
    let span = (high - low).max(f64::EPSILON);

    let mut output = String::new();
    output.push_str(title);
    output.push('\n');
    output.push_str(&"-".repeat(LABEL_WIDTH + 10 + width + 2));
    output.push('\n');

    for step in waterfall {
        let (bottom, top) = step.bounds();
        let start = column(bottom, low, span, width);
        let end = column(top, low, span, width);

        let mut bar: Vec<char> = vec![' '; width];
        if end > start {
            let glyph = BarTone::of(step).glyph();
            bar[start..end].fill(glyph);
        } else {
            bar[start.min(width - 1)] = '│';
        }

        output.push_str(&format!(
            "{:<LABEL_WIDTH$} {:>7.1}% |{}|\n",
            step.label.as_str(),
            step.delta,
            bar.into_iter().collect::<String>()
        ));
    }

    output.push_str(&format!(
        "{:<LABEL_WIDTH$} {:>7.1}%\n",
        "Net margin",
        waterfall.final_level()
    ));
    output
}
