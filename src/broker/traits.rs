use async_trait::async_trait;

use crate::error::TradingError;

use super::types::{AccountSnapshot, BrokerResponse, OrderPayload, PriceQuote};

pub type BrokerResult<T> = Result<T, TradingError>;

#[async_trait]
pub trait Brokerage: Send + Sync {
    fn name(&self) -> &'static str;

    /// Current balance of the configured account.
    async fn get_account(&self) -> BrokerResult<AccountSnapshot>;

    /// Best bid/ask for one instrument. No quote entries is `EmptyQuote`.
    async fn get_price(&self, instrument: &str) -> BrokerResult<PriceQuote>;

    /// Submits the order. Any HTTP status is returned as-is; only transport
    /// failures are errors.
    async fn create_order(&self, payload: &OrderPayload) -> BrokerResult<BrokerResponse>;
}
