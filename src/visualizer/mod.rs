// Visualizer module: chart data plus the surfaces that show it.

pub mod charts;
pub mod terminal;

use crate::model::PriceTable;
use charts::{PriceChart, ReturnsChart};
use thiserror::Error;
use tracing::info;

pub use terminal::{TerminalDisplay, restore_terminal};

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}

/// Surface for the two charts. Nothing shown here is written to disk.
pub trait ChartDisplay {
    /// Close price with the 50- and 200-day averages.
    fn show_price_chart(&mut self, table: &PriceTable) -> Result<(), DisplayError>;
    /// Histogram and density of the monthly returns.
    fn show_returns_distribution(&mut self, table: &PriceTable) -> Result<(), DisplayError>;
}

/// Logs a one-line summary of each chart instead of drawing it.
pub struct HeadlessDisplay;

impl ChartDisplay for HeadlessDisplay {
    fn show_price_chart(&mut self, table: &PriceTable) -> Result<(), DisplayError> {
        let chart = PriceChart::from_table(table);
        info!(
            "{}: {} closes, {} points of 50-day MA, {} points of 200-day MA, price range {:.2}..{:.2}",
            chart.title,
            chart.close.len(),
            chart.ma_short.len(),
            chart.ma_long.len(),
            chart.y_bounds[0],
            chart.y_bounds[1]
        );
        Ok(())
    }

    fn show_returns_distribution(&mut self, table: &PriceTable) -> Result<(), DisplayError> {
        let chart = ReturnsChart::from_table(table);
        info!(
            "{}: {} returns in {} bins, tallest bin {}",
            chart.title,
            chart.histogram.total(),
            chart.histogram.counts.len(),
            chart.histogram.max_count()
        );
        Ok(())
    }
}
