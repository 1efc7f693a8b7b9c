pub mod oanda;
pub mod traits;
pub mod types;

pub use oanda::OandaClient;
pub use traits::{BrokerResult, Brokerage};
pub use types::{AccountSnapshot, BrokerResponse, OrderPayload, OrderType, PriceQuote, TradeRequest};
