//! Rendering of reports for the terminal and the filesystem.

use super::data_pipeline::CliError;
use cascade::StatementReport;
use cascade::data::to_dataframe;
use cascade::output::{
    DEFAULT_CHART_WIDTH, ExportFormat, Exporter, IncomeTable, StatementExport, WaterfallExport,
    render_waterfall_text, write_waterfall_svg,
};
use clap::ValueEnum;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// How `show` prints the statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    /// ASCII table followed by terminal charts.
    #[default]
    Text,
    /// Markdown table, charts in code blocks.
    Markdown,
    /// Full JSON report.
    Json,
    /// Polars DataFrame followed by terminal charts.
    Frame,
}

/// What `export` writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum ExportTarget {
    /// Statement amounts, one row per period.
    #[default]
    Statements,
    /// Waterfall bars, one row per step.
    Waterfalls,
}

impl fmt::Display for ExportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Statements => f.write_str("statements"),
            Self::Waterfalls => f.write_str("waterfalls"),
        }
    }
}

/// Options of the `show` and `interactive` commands.
#[derive(Debug, Clone)]
pub(crate) struct ShowOptions {
    pub(crate) format: OutputFormat,
    pub(crate) charts: bool,
    pub(crate) chart_width: usize,
    pub(crate) svg_dir: Option<PathBuf>,
}

impl Default for ShowOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            charts: true,
            chart_width: DEFAULT_CHART_WIDTH,
            svg_dir: None,
        }
    }
}

/// Message printed when a source has nothing for a symbol.
pub(crate) fn no_data_message(symbol: &str) -> String {
    format!("No income statement data for {}", symbol)
}

/// Render a report the way `show` prints it.
pub(crate) fn render_report(
    report: &StatementReport,
    options: &ShowOptions,
) -> Result<String, CliError> {
    if report.is_empty() {
        return Ok(format!("{}\n", no_data_message(&report.symbol)));
    }

    let mut output = match options.format {
        OutputFormat::Json => return Ok(format!("{}\n", report.to_json()?)),
        OutputFormat::Text => IncomeTable::new(&report.symbol, &report.periods).to_ascii_table(),
        OutputFormat::Markdown => IncomeTable::new(&report.symbol, &report.periods).to_markdown(),
        OutputFormat::Frame => format!("{}\n", to_dataframe(&report.periods)?),
    };

    if !options.charts {
        return Ok(output);
    }

    for period in &report.waterfalls {
        let Some(waterfall) = &period.waterfall else {
            warn!(
                symbol = %report.symbol,
                period_ending = %period.period_ending,
                "no revenue reported, waterfall skipped"
            );
            continue;
        };

        let chart = render_waterfall_text(
            &period.title(&report.symbol),
            waterfall,
            options.chart_width,
        );
        output.push('\n');
        if options.format == OutputFormat::Markdown {
            output.push_str("```text\n");
            output.push_str(&chart);
            output.push_str("```\n");
        } else {
            output.push_str(&chart);
        }
    }

    Ok(output)
}

/// Write one SVG per charted period into `dir`, named `SYMBOL-YYYY-MM-DD.svg`.
pub(crate) fn write_svgs(report: &StatementReport, dir: &Path) -> Result<Vec<PathBuf>, CliError> {
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::new();
    for period in &report.waterfalls {
        if let Some(waterfall) = &period.waterfall {
            let path = dir.join(format!("{}-{}.svg", report.symbol, period.period_ending));
            write_waterfall_svg(&path, &period.title(&report.symbol), waterfall)?;
            written.push(path);
        }
    }

    info!(symbol = %report.symbol, charts = written.len(), dir = %dir.display(), "wrote SVG charts");
    Ok(written)
}

/// Export part of a report to `path`; returns the number of periods written.
pub(crate) fn export_report(
    report: &StatementReport,
    target: ExportTarget,
    path: &Path,
    format: ExportFormat,
) -> Result<usize, CliError> {
    let count = match target {
        ExportTarget::Statements => {
            let export = StatementExport::new(report.symbol.clone(), report.periods.clone());
            export.export_to_file(path, format)?;
            export.periods.len()
        }
        ExportTarget::Waterfalls => {
            let export = WaterfallExport::new(report.symbol.clone(), report.waterfalls.clone());
            export.export_to_file(path, format)?;
            export.charted()
        }
    };
    Ok(count)
}
