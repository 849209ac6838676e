use crate::model::PriceTable;
use tracing::info;

pub const SHORT_WINDOW: usize = 50;
pub const LONG_WINDOW: usize = 200;

/// Trailing simple moving average aligned with `data`.
/// The first `window_size - 1` positions have no value.
pub fn moving_average(data: &[f64], window_size: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; data.len()];
    if window_size == 0 || data.len() < window_size {
        return result;
    }
    for (i, window) in data.windows(window_size).enumerate() {
        result[i + window_size - 1] = Some(window.iter().sum::<f64>() / window_size as f64);
    }
    result
}

/// Fills the 50- and 200-day averages of the close column.
pub fn with_moving_averages(mut table: PriceTable) -> PriceTable {
    let closes = table.closes();
    let short = moving_average(&closes, SHORT_WINDOW);
    let long = moving_average(&closes, LONG_WINDOW);

    for ((bar, s), l) in table.bars.iter_mut().zip(short).zip(long) {
        bar.ma_50 = s;
        bar.ma_200 = l;
    }

    if table.bars.len() < LONG_WINDOW {
        info!(
            "Only {} bars for {}, the {}-day average stays undefined",
            table.bars.len(),
            table.ticker,
            LONG_WINDOW
        );
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PriceBar;
    use approx::assert_abs_diff_eq;
    use chrono::{Duration, NaiveDate};

    #[test]
    fn undefined_until_window_fills() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ma = moving_average(&data, 3);
        assert_eq!(ma, vec![None, None, Some(2.0), Some(3.0), Some(4.0)]);
    }

    #[test]
    fn short_input_and_zero_window_are_all_undefined() {
        assert_eq!(moving_average(&[1.0, 2.0], 3), vec![None, None]);
        assert_eq!(moving_average(&[1.0, 2.0], 0), vec![None, None]);
        assert!(moving_average(&[], 5).is_empty());
    }

    #[test]
    fn window_of_one_is_identity() {
        let data = [4.0, 8.5, -1.0];
        let ma: Vec<f64> = moving_average(&data, 1).into_iter().flatten().collect();
        assert_eq!(ma, data.to_vec());
    }

    #[test]
    fn fills_both_columns() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let bars = (0..LONG_WINDOW)
            .map(|i| {
                let p = 100.0 + i as f64;
                PriceBar::new(start + Duration::days(i as i64), p, p, p, p, 1)
            })
            .collect();
        let table = with_moving_averages(PriceTable::new("TEST", bars));

        assert_eq!(table.bars[SHORT_WINDOW - 2].ma_50, None);
        assert_abs_diff_eq!(table.bars[SHORT_WINDOW - 1].ma_50.unwrap(), 124.5, epsilon = 1e-9);
        assert_eq!(table.bars[LONG_WINDOW - 2].ma_200, None);
        assert_abs_diff_eq!(table.bars[LONG_WINDOW - 1].ma_200.unwrap(), 199.5, epsilon = 1e-9);
    }
}
