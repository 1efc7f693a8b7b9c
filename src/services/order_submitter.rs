use rust_decimal::Decimal;
use tracing::{error, info, warn};

use crate::broker::{Brokerage, OrderPayload, OrderType, TradeRequest};
use crate::constants::fields;
use crate::error::{TradingError, ValidationError};
use crate::services::plan_parser::{FieldValue, ParsedTradePlan};

/// Checks the plan holds every required field and turns it into an order.
pub fn build_trade_request(plan: &ParsedTradePlan) -> Result<TradeRequest, ValidationError> {
    let instrument = match required(plan, fields::INSTRUMENT)? {
        FieldValue::Text(s) => s.clone(),
        _ => return Err(ValidationError::WrongType { field: fields::INSTRUMENT }),
    };
    let units = match required(plan, fields::UNITS)? {
        FieldValue::Integer(u) => *u,
        _ => return Err(ValidationError::WrongType { field: fields::UNITS }),
    };
    let order_type = match required(plan, fields::ORDER_TYPE)? {
        FieldValue::Text(s) => s.parse::<OrderType>()?,
        _ => return Err(ValidationError::WrongType { field: fields::ORDER_TYPE }),
    };

    let price = optional_decimal(plan, fields::PRICE)?;
    if order_type == OrderType::Market && price.is_some() {
        warn!("⚠️ [ORDER] Ignoring price {:?} on MARKET order", price);
    }

    TradeRequest::new(
        instrument,
        units,
        order_type,
        price,
        optional_decimal(plan, fields::STOP_LOSS_PRICE)?,
        optional_decimal(plan, fields::TAKE_PROFIT_PRICE)?,
    )
}

fn required<'a>(plan: &'a ParsedTradePlan, field: &'static str) -> Result<&'a FieldValue, ValidationError> {
    match plan.get(field) {
        None => Err(ValidationError::MissingField { field }),
        Some(FieldValue::Null) => Err(ValidationError::NullField { field }),
        Some(value) => Ok(value),
    }
}

fn optional_decimal(plan: &ParsedTradePlan, field: &'static str) -> Result<Option<Decimal>, ValidationError> {
    match plan.get(field) {
        None | Some(FieldValue::Null) => Ok(None),
        Some(FieldValue::Decimal(d)) => Ok(Some(*d)),
        Some(_) => Err(ValidationError::WrongType { field }),
    }
}

pub struct OrderSubmitter<'a> {
    broker: &'a dyn Brokerage,
    dry_run: bool,
}

impl<'a> OrderSubmitter<'a> {
    pub fn new(broker: &'a dyn Brokerage, dry_run: bool) -> Self {
        Self { broker, dry_run }
    }

    /// Validates the plan, then submits it. Nothing reaches the brokerage
    /// unless validation passes.
    pub async fn submit_plan(&self, plan: &ParsedTradePlan) -> Result<bool, TradingError> {
        let request = build_trade_request(plan)?;
        self.submit(&request).await
    }

    /// `Ok(true)` when the brokerage reports the order created, `Ok(false)`
    /// on any other status (logged with the status and body).
    pub async fn submit(&self, request: &TradeRequest) -> Result<bool, TradingError> {
        let payload = OrderPayload::from(request);
        let order_type = request.order_type();

        info!(
            "🚀 [ORDER] Submitting: {} {} units of {} via {}",
            order_type,
            request.units(),
            request.instrument(),
            self.broker.name()
        );
        info!(
            "🚀 [ORDER] Payload: {}",
            serde_json::to_string(&payload).unwrap_or_else(|_| format!("{:?}", payload))
        );

        if self.dry_run {
            info!("🧪 [DRY RUN] {} order not sent", order_type);
            return Ok(true);
        }

        let response = self.broker.create_order(&payload).await?;
        if response.is_created() {
            info!("✅ [SUCCESS] {} order placed successfully: {}", order_type, response.body);
            Ok(true)
        } else {
            error!(
                "❌ [FAILED] Error placing {} order: Status Code: {} Response: {}",
                order_type, response.status, response.body
            );
            Ok(false)
        }
    }
}
