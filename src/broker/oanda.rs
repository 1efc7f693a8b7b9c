use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::OandaConfig;
use crate::error::{ServiceError, TradingError};

use super::{
    traits::{BrokerResult, Brokerage},
    types::{AccountSnapshot, BrokerResponse, OrderPayload, PriceQuote},
};

const SERVICE: &str = "OANDA";

/// OANDA v20 REST adapter.
#[derive(Clone)]
pub struct OandaClient {
    client: Client,
    base_url: String,
    account_id: String,
    api_key: String,
    timeout_secs: u64,
}

#[derive(Deserialize)]
struct AccountEnvelope {
    account: AccountBody,
}

#[derive(Deserialize)]
struct AccountBody {
    balance: String,
    #[serde(default)]
    currency: Option<String>,
}

#[derive(Deserialize)]
struct PricingEnvelope {
    #[serde(default)]
    prices: Vec<PriceEntry>,
}

#[derive(Deserialize)]
struct PriceEntry {
    #[serde(default)]
    bids: Vec<PriceBucket>,
    #[serde(default)]
    asks: Vec<PriceBucket>,
}

#[derive(Deserialize)]
struct PriceBucket {
    price: String,
}

impl OandaClient {
    pub fn new(config: &OandaConfig, timeout_secs: u64) -> Result<Self, TradingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|source| ServiceError::Transport {
                service: SERVICE,
                operation: "client setup",
                source,
            })?;

        info!(
            "🏦 OANDA client ready ({} environment, {})",
            config.environment, config.base_url
        );

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            account_id: config.account_id.clone(),
            api_key: config.api_key.clone(),
            timeout_secs,
        })
    }

    fn auth_headers(&self, req: RequestBuilder) -> RequestBuilder {
        req.bearer_auth(&self.api_key)
            .header("Accept-Datetime-Format", "RFC3339")
    }

    async fn send(&self, operation: &'static str, req: RequestBuilder) -> Result<BrokerResponse, ServiceError> {
        let resp = self
            .auth_headers(req)
            .send()
            .await
            .map_err(|e| self.transport_error(operation, e))?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| self.transport_error(operation, e))?;
        debug!("OANDA {} -> HTTP {}", operation, status);
        Ok(BrokerResponse { status, body })
    }

    fn transport_error(&self, operation: &'static str, source: reqwest::Error) -> ServiceError {
        if source.is_timeout() {
            ServiceError::Timeout {
                service: SERVICE,
                operation,
                secs: self.timeout_secs,
            }
        } else {
            ServiceError::Transport {
                service: SERVICE,
                operation,
                source,
            }
        }
    }
}

#[async_trait]
impl Brokerage for OandaClient {
    fn name(&self) -> &'static str {
        "oanda"
    }

    async fn get_account(&self) -> BrokerResult<AccountSnapshot> {
        let operation = "GetAccountBalance";
        let url = format!("{}/v3/accounts/{}", self.base_url, self.account_id);
        let resp = check_status(operation, self.send(operation, self.client.get(&url)).await?)?;
        parse_account(&self.account_id, &resp.body)
    }

    async fn get_price(&self, instrument: &str) -> BrokerResult<PriceQuote> {
        let operation = "GetPrice";
        let url = format!("{}/v3/accounts/{}/pricing", self.base_url, self.account_id);
        let req = self.client.get(&url).query(&[("instruments", instrument)]);
        let resp = check_status(operation, self.send(operation, req).await?)?;
        parse_pricing(instrument, &resp.body)
    }

    async fn create_order(&self, payload: &OrderPayload) -> BrokerResult<BrokerResponse> {
        let url = format!("{}/v3/accounts/{}/orders", self.base_url, self.account_id);
        let resp = self.send("CreateOrder", self.client.post(&url).json(payload)).await?;
        Ok(resp)
    }
}

/// Passes 2xx responses through; anything else becomes `ServiceError::Http`
/// carrying the status and the raw body.
pub fn check_status(operation: &'static str, resp: BrokerResponse) -> Result<BrokerResponse, ServiceError> {
    if (200..300).contains(&resp.status) {
        Ok(resp)
    } else {
        Err(http_error(operation, resp))
    }
}

fn http_error(operation: &'static str, resp: BrokerResponse) -> ServiceError {
    ServiceError::Http {
        service: SERVICE,
        operation,
        status: resp.status,
        body: resp.body,
    }
}

fn decode_error(operation: &'static str, reason: impl ToString, body: &str) -> ServiceError {
    ServiceError::Decode {
        service: SERVICE,
        operation,
        reason: reason.to_string(),
        body: body.to_string(),
    }
}

fn parse_decimal(operation: &'static str, raw: &str, body: &str) -> Result<Decimal, ServiceError> {
    Decimal::from_str(raw.trim()).map_err(|e| decode_error(operation, format!("bad number '{}': {}", raw, e), body))
}

/// Decodes an AccountDetails response body.
pub fn parse_account(account_id: &str, body: &str) -> BrokerResult<AccountSnapshot> {
    let operation = "GetAccountBalance";
    let envelope: AccountEnvelope =
        serde_json::from_str(body).map_err(|e| decode_error(operation, e, body))?;
    let balance = parse_decimal(operation, &envelope.account.balance, body)?;

    Ok(AccountSnapshot {
        account_id: account_id.to_string(),
        balance,
        currency: envelope.account.currency,
    })
}

/// Decodes a PricingInfo response body using the first price entry.
pub fn parse_pricing(instrument: &str, body: &str) -> BrokerResult<PriceQuote> {
    let operation = "GetPrice";
    let envelope: PricingEnvelope =
        serde_json::from_str(body).map_err(|e| decode_error(operation, e, body))?;

    let empty = || TradingError::EmptyQuote {
        instrument: instrument.to_string(),
    };
    let entry = envelope.prices.first().ok_or_else(empty)?;
    let bid = entry.bids.first().ok_or_else(empty)?;
    let ask = entry.asks.first().ok_or_else(empty)?;

    let quote = PriceQuote {
        instrument: instrument.to_string(),
        bid: parse_decimal(operation, &bid.price, body)?,
        ask: parse_decimal(operation, &ask.price, body)?,
    };
    if quote.mid().is_none() {
        return Err(TradingError::QuoteOverflow {
            instrument: quote.instrument,
        });
    }
    Ok(quote)
}
