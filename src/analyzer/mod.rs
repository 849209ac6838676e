// Analyzer module: moving averages, monthly returns and their distribution.

pub mod distribution;
pub mod moving_average;
pub mod returns;

pub use distribution::{DENSITY_POINTS, Histogram, RETURN_BINS, density_curve};
pub use moving_average::{LONG_WINDOW, SHORT_WINDOW, moving_average, with_moving_averages};
pub use returns::{monthly_closes, pct_change, with_monthly_returns};
