use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::oanda;
use crate::error::ValidationError;

#[derive(Clone, Debug, PartialEq)]
pub struct AccountSnapshot {
    pub account_id: String,
    pub balance: Decimal,
    pub currency: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PriceQuote {
    pub instrument: String,
    pub bid: Decimal,
    pub ask: Decimal,
}

impl PriceQuote {
    /// Arithmetic mean of best bid and best ask, `None` if `bid + ask`
    /// leaves the decimal range.
    pub fn mid(&self) -> Option<Decimal> {
        self.bid.checked_add(self.ask).map(|sum| sum / Decimal::TWO)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    Market,
    Limit,
    Stop,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Market => "MARKET",
            OrderType::Limit => "LIMIT",
            OrderType::Stop => "STOP",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "MARKET" => Ok(OrderType::Market),
            "LIMIT" => Ok(OrderType::Limit),
            "STOP" => Ok(OrderType::Stop),
            _ => Err(ValidationError::UnknownOrderType {
                value: s.to_string(),
            }),
        }
    }
}

/// A complete, validated order. `price` is present iff the order is not MARKET.
#[derive(Clone, Debug, PartialEq)]
pub struct TradeRequest {
    instrument: String,
    units: i64,
    order_type: OrderType,
    price: Option<Decimal>,
    stop_loss_price: Option<Decimal>,
    take_profit_price: Option<Decimal>,
}

impl TradeRequest {
    /// A price given for a MARKET order is dropped; LIMIT/STOP without one is rejected.
    pub fn new(
        instrument: impl Into<String>,
        units: i64,
        order_type: OrderType,
        price: Option<Decimal>,
        stop_loss_price: Option<Decimal>,
        take_profit_price: Option<Decimal>,
    ) -> Result<Self, ValidationError> {
        let price = match order_type {
            OrderType::Market => None,
            OrderType::Limit | OrderType::Stop => Some(price.ok_or(ValidationError::MissingEntryPrice {
                order_type: order_type.to_string(),
            })?),
        };

        Ok(Self {
            instrument: instrument.into(),
            units,
            order_type,
            price,
            stop_loss_price,
            take_profit_price,
        })
    }

    pub fn instrument(&self) -> &str {
        &self.instrument
    }

    pub fn units(&self) -> i64 {
        self.units
    }

    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    pub fn price(&self) -> Option<Decimal> {
        self.price
    }

    pub fn stop_loss_price(&self) -> Option<Decimal> {
        self.stop_loss_price
    }

    pub fn take_profit_price(&self) -> Option<Decimal> {
        self.take_profit_price
    }
}

/// CreateOrder request body
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OrderPayload {
    pub order: OrderBody,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBody {
    pub instrument: String,
    /// Stringified signed integer; the sign encodes direction.
    pub units: String,
    #[serde(rename = "type")]
    pub type_: OrderType,
    pub position_fill: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss_on_fill: Option<OnFillDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take_profit_on_fill: Option<OnFillDetails>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnFillDetails {
    pub time_in_force: String,
    pub price: String,
}

impl OnFillDetails {
    fn gtc(price: Decimal) -> Self {
        Self {
            time_in_force: oanda::ON_FILL_TIME_IN_FORCE.to_string(),
            price: price.to_string(),
        }
    }
}

impl From<&TradeRequest> for OrderPayload {
    fn from(req: &TradeRequest) -> Self {
        let price = match req.order_type {
            OrderType::Market => None,
            _ => req.price.map(|p| p.to_string()),
        };

        OrderPayload {
            order: OrderBody {
                instrument: req.instrument.clone(),
                units: req.units.to_string(),
                type_: req.order_type,
                position_fill: oanda::POSITION_FILL_DEFAULT.to_string(),
                price,
                stop_loss_on_fill: req.stop_loss_price.map(OnFillDetails::gtc),
                take_profit_on_fill: req.take_profit_price.map(OnFillDetails::gtc),
            },
        }
    }
}

/// Raw HTTP outcome as returned by the brokerage
#[derive(Clone, Debug, PartialEq)]
pub struct BrokerResponse {
    pub status: u16,
    pub body: String,
}

impl BrokerResponse {
    pub fn is_created(&self) -> bool {
        self.status == oanda::ORDER_CREATED_STATUS
    }
}
