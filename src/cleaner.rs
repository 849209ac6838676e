use crate::model::{CleanError, DIVIDENDS, PriceBar, PriceTable, RawFrame, STOCK_SPLITS};
use crate::utils::exchange_date;
use tracing::{info, warn};

/// Drops the dividend and stock split columns. Missing columns are not an error.
pub fn drop_corporate_actions(mut frame: RawFrame) -> RawFrame {
    frame.drop_column(DIVIDENDS);
    frame.drop_column(STOCK_SPLITS);
    frame
}

/// Builds the date-indexed price table: one bar per trading date, ascending.
/// When a date appears more than once the last row wins.
pub fn into_price_table(ticker: &str, frame: RawFrame) -> Result<PriceTable, CleanError> {
    let open = required(&frame, "Open")?;
    let high = required(&frame, "High")?;
    let low = required(&frame, "Low")?;
    let close = required(&frame, "Close")?;
    let volume = required(&frame, "Volume")?;

    let mut bars = Vec::with_capacity(frame.len());
    for (i, &ts) in frame.timestamps.iter().enumerate() {
        let date = exchange_date(ts, frame.gmt_offset).ok_or(CleanError::InvalidTimestamp(ts))?;
        bars.push(PriceBar::new(
            date,
            open[i],
            high[i],
            low[i],
            close[i],
            volume[i].max(0.0).round() as u64,
        ));
    }

    // Stable sort keeps provider order among equal dates, so dedup retains the last one.
    bars.sort_by_key(|b| b.date);
    let before = bars.len();
    bars.reverse();
    bars.dedup_by_key(|b| b.date);
    bars.reverse();
    if bars.len() != before {
        warn!("Collapsed {} duplicate trading dates for {}", before - bars.len(), ticker);
    }

    info!("Cleaned table for {}: {} bars", ticker, bars.len());
    Ok(PriceTable::new(ticker, bars))
}

fn required<'a>(frame: &'a RawFrame, name: &'static str) -> Result<&'a [f64], CleanError> {
    let values = frame.column(name).ok_or(CleanError::MissingColumn(name))?;
    if values.len() != frame.len() {
        return Err(CleanError::LengthMismatch {
            name: name.to_string(),
            expected: frame.len(),
            actual: values.len(),
        });
    }
    Ok(values)
}
