use crate::fetcher::traits::PriceSource;
use crate::model::{DIVIDENDS, FetchError, HistoryRequest, RawFrame, STOCK_SPLITS};
use crate::utils::exchange_date;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct YahooResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<YahooErrorBody>,
}

#[derive(Debug, Deserialize)]
struct YahooErrorBody {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
    events: Option<Events>,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QuoteData {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<f64>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Events {
    dividends: HashMap<String, DividendEvent>,
    splits: HashMap<String, SplitEvent>,
}

#[derive(Debug, Deserialize)]
struct DividendEvent {
    amount: f64,
    date: i64,
}

#[derive(Debug, Deserialize)]
struct SplitEvent {
    date: i64,
    numerator: f64,
    denominator: f64,
}

/// Daily history from the Yahoo Finance chart API.
pub struct YahooSource {
    client: Client,
    base_url: String,
}

impl YahooSource {
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) MaLens/0.1")
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| FetchError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn build_url(&self, req: &HistoryRequest) -> String {
        format!(
            "{}/{}?range={}&interval=1d&events=div,splits",
            self.base_url, req.ticker, req.period
        )
    }
}

#[async_trait::async_trait]
impl PriceSource for YahooSource {
    async fn fetch_history(&self, req: &HistoryRequest) -> Result<RawFrame, FetchError> {
        let url = self.build_url(req);
        info!("Requesting {} ({}) from {}", req.ticker, req.period, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::HttpError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::HttpError(e.to_string()))?;

        if !status.is_success() {
            warn!("Provider responded [{}] for {}", status, req.ticker);
            // Unknown tickers come back as 404 with an error payload.
            if let Ok(parsed) = serde_json::from_str::<YahooResponse>(&body) {
                if let Some(error) = parsed.chart.error {
                    return Err(FetchError::ProviderError {
                        code: error.code,
                        description: error.description,
                    });
                }
            }
            return Err(FetchError::InvalidResponse(status.as_u16()));
        }

        parse_chart(&body, &req.ticker)
    }
}

/// Parses a chart API payload into a raw frame with OHLCV and corporate action columns.
/// Rows with a missing open, high, low or close are skipped; a missing volume reads as 0.
pub fn parse_chart(json: &str, ticker: &str) -> Result<RawFrame, FetchError> {
    let response: YahooResponse =
        serde_json::from_str(json).map_err(|e| FetchError::ParseError(e.to_string()))?;

    if let Some(error) = response.chart.error {
        return Err(FetchError::ProviderError {
            code: error.code,
            description: error.description,
        });
    }

    let data = response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| FetchError::NoData(ticker.to_string()))?;
    let quote = data
        .indicators
        .quote
        .into_iter()
        .next()
        .unwrap_or_default();
    let gmt_offset = data.meta.gmtoffset;

    let events = data.events.unwrap_or_default();
    let dividends: HashMap<NaiveDate, f64> = events
        .dividends
        .values()
        .filter_map(|d| exchange_date(d.date, gmt_offset).map(|date| (date, d.amount)))
        .collect();
    let splits: HashMap<NaiveDate, f64> = events
        .splits
        .values()
        .filter(|s| s.denominator != 0.0)
        .filter_map(|s| {
            exchange_date(s.date, gmt_offset).map(|date| (date, s.numerator / s.denominator))
        })
        .collect();

    let mut timestamps = Vec::new();
    let (mut open, mut high, mut low, mut close, mut volume) =
        (Vec::new(), Vec::new(), Vec::new(), Vec::new(), Vec::new());
    let (mut dividend_col, mut split_col) = (Vec::new(), Vec::new());

    for (i, &ts) in data.timestamp.iter().enumerate() {
        let (Some(o), Some(h), Some(l), Some(c)) = (
            value_at(&quote.open, i),
            value_at(&quote.high, i),
            value_at(&quote.low, i),
            value_at(&quote.close, i),
        ) else {
            continue;
        };

        let date = exchange_date(ts, gmt_offset);
        timestamps.push(ts);
        open.push(o);
        high.push(h);
        low.push(l);
        close.push(c);
        volume.push(value_at(&quote.volume, i).unwrap_or(0.0));
        dividend_col.push(date.and_then(|d| dividends.get(&d).copied()).unwrap_or(0.0));
        split_col.push(date.and_then(|d| splits.get(&d).copied()).unwrap_or(0.0));
    }

    if timestamps.is_empty() {
        return Err(FetchError::NoData(ticker.to_string()));
    }

    info!("Parsed {} daily rows for {}", timestamps.len(), ticker);

    Ok(RawFrame::new(timestamps, gmt_offset)
        .with_column("Open", open)
        .with_column("High", high)
        .with_column("Low", low)
        .with_column("Close", close)
        .with_column("Volume", volume)
        .with_column(DIVIDENDS, dividend_col)
        .with_column(STOCK_SPLITS, split_col))
}

fn value_at(col: &[Option<f64>], i: usize) -> Option<f64> {
    col.get(i).copied().flatten()
}
