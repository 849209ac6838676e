use crate::model::{MonthlyReturn, PriceBar, PriceTable};
use crate::utils::{month_end, next_month_end};
use chrono::NaiveDate;
use tracing::info;

/// Resamples daily closes to calendar month ends, carrying the last close
/// forward through months without any trading.
pub fn monthly_closes(bars: &[PriceBar]) -> Vec<(NaiveDate, f64)> {
    let (Some(first), Some(last)) = (bars.first(), bars.last()) else {
        return Vec::new();
    };

    let mut result = Vec::new();
    let mut cursor = 0;
    let mut carried = first.close;
    let mut label = month_end(first.date);
    let final_label = month_end(last.date);

    while label <= final_label {
        while cursor < bars.len() && bars[cursor].date <= label {
            carried = bars[cursor].close;
            cursor += 1;
        }
        result.push((label, carried));
        match next_month_end(label) {
            Some(next) => label = next,
            None => break,
        }
    }
    result
}

/// Fractional change between consecutive values; the first has none.
pub fn pct_change(values: &[f64]) -> Vec<Option<f64>> {
    let mut result = Vec::with_capacity(values.len());
    if !values.is_empty() {
        result.push(None);
    }
    result.extend(values.windows(2).map(|w| Some((w[1] - w[0]) / w[0])));
    result
}

pub fn with_monthly_returns(mut table: PriceTable) -> PriceTable {
    let monthly = monthly_closes(&table.bars);
    let closes: Vec<f64> = monthly.iter().map(|(_, c)| *c).collect();
    let changes = pct_change(&closes);

    table.monthly = monthly
        .into_iter()
        .zip(changes)
        .map(|((month_end, close), returns)| MonthlyReturn {
            month_end,
            close,
            returns,
        })
        .collect();

    info!(
        "Computed {} monthly points for {}",
        table.monthly.len(),
        table.ticker
    );
    table
}
