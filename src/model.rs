// Core structs: RawFrame, PriceBar, PriceTable and the error types
use chrono::NaiveDate;
use thiserror::Error;

pub const DIVIDENDS: &str = "Dividends";
pub const STOCK_SPLITS: &str = "Stock Splits";

/// Provider output before cleaning: a timestamp index plus named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFrame {
    /// Unix timestamps (seconds) of each row.
    pub timestamps: Vec<i64>,
    /// Exchange offset from GMT in seconds, used to derive trading dates.
    pub gmt_offset: i64,
    pub columns: Vec<(String, Vec<f64>)>,
}

impl RawFrame {
    pub fn new(timestamps: Vec<i64>, gmt_offset: i64) -> Self {
        Self {
            timestamps,
            gmt_offset,
            columns: Vec::new(),
        }
    }

    pub fn with_column(mut self, name: &str, values: Vec<f64>) -> Self {
        self.columns.push((name.to_string(), values));
        self
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Removes a column if present. Absent columns are ignored.
    pub fn drop_column(&mut self, name: &str) {
        self.columns.retain(|(n, _)| n != name);
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub ma_50: Option<f64>,
    pub ma_200: Option<f64>,
}

impl PriceBar {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
            ma_50: None,
            ma_200: None,
        }
    }
}

/// One month-end resample point of the close series.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyReturn {
    pub month_end: NaiveDate,
    pub close: f64,
    pub returns: Option<f64>,
}

/// Daily bars ordered by date plus the monthly return series.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    pub ticker: String,
    pub bars: Vec<PriceBar>,
    pub monthly: Vec<MonthlyReturn>,
}

impl PriceTable {
    pub fn new(ticker: impl Into<String>, bars: Vec<PriceBar>) -> Self {
        Self {
            ticker: ticker.into(),
            bars,
            monthly: Vec::new(),
        }
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Defined monthly returns, in month order.
    pub fn defined_returns(&self) -> Vec<f64> {
        self.monthly.iter().filter_map(|m| m.returns).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|b| b.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|b| b.date)
    }
}

#[derive(Debug, Clone)]
pub struct HistoryRequest {
    pub ticker: String,
    pub period: String,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    HttpError(String),
    #[error("provider responded with status {0}")]
    InvalidResponse(u16),
    #[error("provider error [{code}]: {description}")]
    ProviderError { code: String, description: String },
    #[error("failed to parse provider response: {0}")]
    ParseError(String),
    #[error("no data returned for {0}")]
    NoData(String),
}

#[derive(Debug, Error)]
pub enum CleanError {
    #[error("missing column: {0}")]
    MissingColumn(&'static str),
    #[error("column {name} has {actual} rows, expected {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(i64),
}

/// Any failure that stops a pipeline run. Fetch and Clean are the data
/// acquisition failures; nothing is displayed or reported after them.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("malformed price data: {0}")]
    Clean(#[from] CleanError),
    #[error("display failed: {0}")]
    Display(#[from] crate::visualizer::DisplayError),
    #[error("report output failed: {0}")]
    Report(#[from] std::io::Error),
}
