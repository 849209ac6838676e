use crate::model::{FetchError, HistoryRequest, RawFrame};

#[async_trait::async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_history(&self, req: &HistoryRequest) -> Result<RawFrame, FetchError>;
}
