use crate::analyzer::{with_monthly_returns, with_moving_averages};
use crate::cleaner::{drop_corporate_actions, into_price_table};
use crate::fetcher::PriceSource;
use crate::model::{HistoryRequest, PipelineError, PriceTable};
use crate::reporter::write_report;
use crate::visualizer::ChartDisplay;
use std::io::Write;
use tracing::info;

/// Fetches, cleans and derives the indicator columns. Fails before anything is shown.
pub async fn build_table(
    source: &dyn PriceSource,
    request: &HistoryRequest,
) -> Result<PriceTable, PipelineError> {
    info!("Fetching {} history for {}...", request.period, request.ticker);
    let raw = source.fetch_history(request).await?;

    info!("Cleaning {} raw rows...", raw.len());
    let table = into_price_table(&request.ticker, drop_corporate_actions(raw))?;

    info!("Calculating moving averages and monthly returns...");
    let table = with_monthly_returns(with_moving_averages(table));

    if let Some(last) = table.bars.last() {
        info!(
            "Last bar {}: close {:.2} | 50-day MA {} | 200-day MA {}",
            last.date,
            last.close,
            format_optional(last.ma_50),
            format_optional(last.ma_200)
        );
    }
    Ok(table)
}

/// Runs the whole analysis: table, both charts, then the report.
pub async fn run<D: ChartDisplay, W: Write>(
    source: &dyn PriceSource,
    request: &HistoryRequest,
    display: &mut D,
    out: &mut W,
) -> Result<PriceTable, PipelineError> {
    let table = build_table(source, request).await?;

    info!("Showing price chart...");
    display.show_price_chart(&table)?;

    info!("Showing monthly returns distribution...");
    display.show_returns_distribution(&table)?;

    write_report(out)?;
    Ok(table)
}

fn format_optional(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "n/a".into())
}
