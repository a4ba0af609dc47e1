#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/cascade/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod chart;
pub mod export;
pub mod report;
pub mod svg;
pub mod table;

pub use chart::{
    BarTone, DEFAULT_CHART_WIDTH, PeriodWaterfall, period_waterfalls, render_waterfall_text,
};
pub use export::{ExportError, ExportFormat, Exporter, StatementExport, WaterfallExport};
pub use report::{ReportBuilder, ReportError, StatementReport};
pub use svg::{ChartError, render_waterfall_svg, write_waterfall_svg};
pub use table::{IncomeTable, format_amount};
