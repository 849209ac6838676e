// Charts module: plot data for the two charts, independent of how they are drawn.

use crate::analyzer::{DENSITY_POINTS, Histogram, RETURN_BINS, density_curve};
use crate::model::PriceTable;
use chrono::NaiveDate;

/// Points drawn per histogram bin so bars read as filled columns.
const BAR_STROKES: usize = 4;

pub struct PriceChart {
    pub title: String,
    pub close: Vec<(f64, f64)>,
    pub ma_short: Vec<(f64, f64)>,
    pub ma_long: Vec<(f64, f64)>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_labels: Vec<String>,
    pub y_labels: Vec<String>,
}

impl PriceChart {
    /// x is days since the first bar; undefined averages are left out.
    pub fn from_table(table: &PriceTable) -> Self {
        let first = table.first_date();
        let day = |date: NaiveDate| first.map(|f| (date - f).num_days() as f64).unwrap_or(0.0);

        let close: Vec<(f64, f64)> = table.bars.iter().map(|b| (day(b.date), b.close)).collect();
        let ma_short: Vec<(f64, f64)> = table
            .bars
            .iter()
            .filter_map(|b| b.ma_50.map(|v| (day(b.date), v)))
            .collect();
        let ma_long: Vec<(f64, f64)> = table
            .bars
            .iter()
            .filter_map(|b| b.ma_200.map(|v| (day(b.date), v)))
            .collect();

        let x_max = close.last().map(|p| p.0).unwrap_or(0.0).max(1.0);
        let (y_min, y_max) = padded_range(
            close
                .iter()
                .chain(ma_short.iter())
                .chain(ma_long.iter())
                .map(|p| p.1),
        );

        let x_labels = match (table.first_date(), table.last_date()) {
            (Some(f), Some(l)) => {
                let mid = f + (l - f) / 2;
                vec![f, mid, l]
                    .into_iter()
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .collect()
            }
            _ => Vec::new(),
        };

        Self {
            title: format!("{} Stock Price with 50 & 200 Moving Averages", table.ticker),
            close,
            ma_short,
            ma_long,
            x_bounds: [0.0, x_max],
            y_bounds: [y_min, y_max],
            x_labels,
            y_labels: value_labels(y_min, y_max, 1),
        }
    }
}

pub struct ReturnsChart {
    pub title: String,
    pub histogram: Histogram,
    pub bars: Vec<(f64, f64)>,
    pub density: Vec<(f64, f64)>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_labels: Vec<String>,
    pub y_labels: Vec<String>,
}

impl ReturnsChart {
    pub fn from_table(table: &PriceTable) -> Self {
        let returns = table.defined_returns();
        let histogram = Histogram::new(&returns, RETURN_BINS);
        let density = density_curve(
            &returns,
            DENSITY_POINTS,
            histogram.total() as f64 * histogram.bin_width,
        );

        let (min, width) = (histogram.min, histogram.bin_width);
        let bars = histogram
            .counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .flat_map(|(i, &count)| {
                let left = min + width * i as f64;
                (0..BAR_STROKES).map(move |s| {
                    let offset = (s as f64 + 0.5) / BAR_STROKES as f64;
                    (left + width * offset, count as f64)
                })
            })
            .collect();

        let (x_min, x_max) = if histogram.counts.is_empty() {
            (-1.0, 1.0)
        } else {
            (histogram.min, histogram.max())
        };
        let peak = density
            .iter()
            .map(|p| p.1)
            .fold(histogram.max_count() as f64, f64::max)
            .max(1.0);
        let y_max = peak * 1.1;

        Self {
            title: "Monthly Returns Distribution".to_string(),
            histogram,
            bars,
            density,
            x_bounds: [x_min, x_max],
            y_bounds: [0.0, y_max],
            x_labels: value_labels(x_min, x_max, 3),
            y_labels: value_labels(0.0, y_max, 0),
        }
    }
}

fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() {
        return (0.0, 1.0);
    }
    let pad = ((hi - lo) * 0.05).max(hi.abs() * 0.01).max(1e-6);
    (lo - pad, hi + pad)
}

fn value_labels(lo: f64, hi: f64, precision: usize) -> Vec<String> {
    [lo, (lo + hi) / 2.0, hi]
        .iter()
        .map(|v| format!("{:.*}", precision, v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{with_monthly_returns, with_moving_averages};
    use crate::model::PriceBar;
    use chrono::Duration;

    fn table(days: usize) -> PriceTable {
        let start = NaiveDate::from_ymd_opt(2021, 1, 4).unwrap();
        let bars = (0..days)
            .map(|i| {
                let p = 100.0 + (i as f64 * 0.1).sin() * 10.0;
                PriceBar::new(start + Duration::days(i as i64), p, p, p, p, 10)
            })
            .collect();
        with_monthly_returns(with_moving_averages(PriceTable::new("TEST", bars)))
    }

    #[test]
    fn price_chart_skips_undefined_averages() {
        let chart = PriceChart::from_table(&table(250));
        assert_eq!(chart.close.len(), 250);
        assert_eq!(chart.ma_short.len(), 201);
        assert_eq!(chart.ma_long.len(), 51);
        assert_eq!(chart.ma_long[0].0, 199.0);
        assert_eq!(chart.x_bounds, [0.0, 249.0]);
        assert!(chart.y_bounds[0] < 90.0 && chart.y_bounds[1] > 110.0);
        assert_eq!(chart.x_labels.first().map(String::as_str), Some("2021-01-04"));
        assert!(chart.title.starts_with("TEST "));
    }

    #[test]
    fn returns_chart_counts_defined_returns() {
        let t = table(400);
        let chart = ReturnsChart::from_table(&t);
        assert_eq!(chart.histogram.counts.len(), RETURN_BINS);
        assert_eq!(chart.histogram.total(), t.defined_returns().len());
        assert_eq!(chart.density.len(), DENSITY_POINTS);
        assert!(chart.y_bounds[1] >= chart.histogram.max_count() as f64);
    }

    #[test]
    fn empty_table_still_has_bounds() {
        let empty = PriceTable::new("EMPTY", Vec::new());
        let price = PriceChart::from_table(&empty);
        assert!(price.close.is_empty());
        assert_eq!(price.y_bounds, [0.0, 1.0]);

        let returns = ReturnsChart::from_table(&empty);
        assert!(returns.bars.is_empty());
        assert!(returns.density.is_empty());
        assert_eq!(returns.x_bounds, [-1.0, 1.0]);
    }
}
