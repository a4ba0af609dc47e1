//! Drivers of the `show`, `export` and `interactive` subcommands.
//!
//! Every driver writes to a caller-supplied writer so the terminal session
//! can be replayed in tests.

use super::data_pipeline::{CliError, fetch_report};
use super::presenter::{
    ExportTarget, ShowOptions, export_report, no_data_message, render_report, write_svgs,
};
use cascade::output::ExportFormat;
use cascade::{FetchConfig, IncomeStatementSource};
use std::io::Write;
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

/// Prompt of the interactive session.
pub(crate) const PROMPT: &str = "Enter symbol (or 'exit'):";

/// Fetch, render and print one symbol, writing SVG charts when requested.
pub(crate) async fn show_symbol<S, W>(
    source: &S,
    symbol: &str,
    config: &FetchConfig,
    options: &ShowOptions,
    out: &mut W,
) -> Result<(), CliError>
where
    S: IncomeStatementSource,
    W: Write,
{
    let report = fetch_report(source, symbol, config).await?;
    out.write_all(render_report(&report, options)?.as_bytes())?;

    if report.is_empty() {
        return Ok(());
    }

    if let Some(dir) = &options.svg_dir {
        let written = write_svgs(&report, dir)?;
        writeln!(out, "Wrote {} chart(s) to {}", written.len(), dir.display())?;
    }
    Ok(())
}

/// Fetch one symbol and export its statements or waterfalls to `path`.
pub(crate) async fn export_symbol<S, W>(
    source: &S,
    symbol: &str,
    config: &FetchConfig,
    target: ExportTarget,
    path: &Path,
    format: ExportFormat,
    out: &mut W,
) -> Result<(), CliError>
where
    S: IncomeStatementSource,
    W: Write,
{
    let report = fetch_report(source, symbol, config).await?;
    if report.is_empty() {
        writeln!(out, "{}", no_data_message(&report.symbol))?;
        return Ok(());
    }

    let count = export_report(&report, target, path, format)?;
    writeln!(
        out,
        "Exported {} of {} period(s) for {} to {}",
        target,
        count,
        report.symbol,
        path.display()
    )?;
    Ok(())
}

/// Prompt for symbols until `exit`, `quit` or end of input.
///
/// A symbol that fails is reported and the session carries on. Returns the
/// number of symbols shown.
pub(crate) async fn run_session<R, S, W>(
    input: R,
    source: &S,
    config: &FetchConfig,
    options: &ShowOptions,
    out: &mut W,
) -> Result<usize, CliError>
where
    R: AsyncBufRead + Unpin,
    S: IncomeStatementSource,
    W: Write,
{
    let mut lines = input.lines();
    let mut shown = 0;

    loop {
        write!(out, "{} ", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        let symbol = line.trim();
        if symbol.is_empty() {
            continue;
        }
        if symbol.eq_ignore_ascii_case("exit") || symbol.eq_ignore_ascii_case("quit") {
            break;
        }

        match show_symbol(source, symbol, config, options, out).await {
            Ok(()) => shown += 1,
            Err(e) => {
                warn!(symbol, error = %e, "failed to show symbol");
                writeln!(out, "Error: {}", e)?;
            }
        }
    }

    Ok(shown)
}
