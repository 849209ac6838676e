// Fetcher module: market-data sources behind a common trait.

pub mod traits;
pub mod yahoo;

pub use traits::PriceSource;
pub use yahoo::YahooSource;
