//! Waterfall bars.

use crate::label::StepLabel;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One bar of a waterfall chart, in percent of revenue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterfallStep {
    /// Bar label.
    pub label: StepLabel,
    /// Signed height of the bar.
    pub delta: f64,
    /// Level the bar starts from: the sum of all previous deltas.
    pub offset: f64,
}

impl WaterfallStep {
    /// Create a step.
    pub const fn new(label: StepLabel, delta: f64, offset: f64) -> Self {
        Self {
            label,
            delta,
            offset,
        }
    }

    /// Level the bar ends at.
    pub fn end(&self) -> f64 {
        self.offset + self.delta
    }

    /// Whether the bar goes up (or is flat).
    pub fn is_gain(&self) -> bool {
        self.delta >= 0.0
    }

    /// Lower and upper edge of the bar.
    pub fn bounds(&self) -> (f64, f64) {
        let end = self.end();
        (self.offset.min(end), self.offset.max(end))
    }
}

impl fmt::Display for WaterfallStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.1}%", self.label, self.delta)
    }
}

/// The six bars of one period's waterfall, in [`StepLabel::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Waterfall {
    steps: [WaterfallStep; 6],
}

impl Waterfall {
    /// Build the bars from the six cumulative levels (percent of revenue).
    ///
    /// Each delta is the difference to the previous level, the first one
    /// measured from zero. Offsets are the running sum of deltas.
    pub fn from_levels(levels: [f64; 6]) -> Self {
        let mut previous_level = 0.0;
        let mut running_total = 0.0;

        let steps = StepLabel::ALL.map(|label| {
            let level = levels[label.position()];
            let delta = level - previous_level;
            let step = WaterfallStep::new(label, delta, running_total);
            previous_level = level;
            running_total += delta;
            step
        });

        Self { steps }
    }

    /// Bars in order.
    pub const fn steps(&self) -> &[WaterfallStep; 6] {
        &self.steps
    }

    /// Iterate over the bars.
    pub fn iter(&self) -> std::slice::Iter<'_, WaterfallStep> {
        self.steps.iter()
    }

    /// Bar with the given label.
    pub const fn step(&self, label: StepLabel) -> &WaterfallStep {
        &self.steps[label.position()]
    }

    /// Level reached after the last bar, i.e. net margin in percent.
    pub fn final_level(&self) -> f64 {
        self.steps[5].end()
    }

    /// Lowest and highest level touched by any bar, always including zero.
    pub fn range(&self) -> (f64, f64) {
        self.steps.iter().fold((0.0_f64, 0.0_f64), |(lo, hi), step| {
            let (low, high) = step.bounds();
            (lo.min(low), hi.max(high))
        })
    }
}

impl<'a> IntoIterator for &'a Waterfall {
    type Item = &'a WaterfallStep;
    type IntoIter = std::slice::Iter<'a, WaterfallStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
