//! One-shot trade pipeline
//!
//! Account → idea → price → plan → parse → submit, each stage awaited in turn.
//! The first failure ends the run, tagged with the stage it happened in.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;

use crate::agents::{Agent, IdeaAgent, PlanAgent};
use crate::broker::{AccountSnapshot, Brokerage, PriceQuote};
use crate::config::AppConfig;
use crate::constants::{fields, trading::PRICE_DISPLAY_DP};
use crate::error::{Stage, StageContext, StageError, TradingError};
use crate::llm::TextGenerator;
use crate::services::order_submitter::OrderSubmitter;
use crate::services::plan_parser::{parse_trade_plan, ParsedTradePlan};
use crate::services::risk::risk_budget;

/// Everything a finished run saw, for the caller to report.
#[derive(Clone, Debug)]
pub struct RunReport {
    pub account: AccountSnapshot,
    pub risk_budget: Decimal,
    pub instrument: String,
    pub quote: PriceQuote,
    pub plan: ParsedTradePlan,
    pub order_placed: bool,
}

pub struct TradePipeline<'a> {
    broker: &'a dyn Brokerage,
    llm: &'a dyn TextGenerator,
    risk_pct: Decimal,
    dry_run: bool,
}

impl<'a> TradePipeline<'a> {
    pub fn new(broker: &'a dyn Brokerage, llm: &'a dyn TextGenerator, config: &AppConfig) -> Self {
        Self::with_settings(broker, llm, config.risk_pct, config.dry_run)
    }

    pub fn with_settings(
        broker: &'a dyn Brokerage,
        llm: &'a dyn TextGenerator,
        risk_pct: Decimal,
        dry_run: bool,
    ) -> Self {
        Self {
            broker,
            llm,
            risk_pct,
            dry_run,
        }
    }

    pub async fn run(&self, today: NaiveDate) -> Result<RunReport, StageError> {
        info!("🏦 [ACCOUNT] Fetching account details...");
        let account = self.broker.get_account().await.stage(Stage::Account)?;
        let currency = account.currency.as_deref();
        info!("🏦 [ACCOUNT] Account balance: {}", account.balance);

        let risk = risk_budget(account.balance, self.risk_pct);
        info!("🛡️ [RISK] The trade risk is {}", risk);

        let idea_query = IdeaAgent::query(account.balance, self.risk_pct, risk, currency, today);
        let instrument = IdeaAgent.run(&idea_query, self.llm).await.stage(Stage::Idea)?;

        let quote = self.broker.get_price(&instrument).await.stage(Stage::Price)?;
        let mid = quote
            .mid()
            .ok_or_else(|| TradingError::QuoteOverflow {
                instrument: instrument.clone(),
            })
            .stage(Stage::Price)?;
        info!(
            "💱 [PRICE] The current market price of {} is {:.prec$}",
            instrument,
            mid,
            prec = PRICE_DISPLAY_DP as usize
        );

        let plan_query = PlanAgent::query(&instrument, mid, risk, currency);
        let plan_text = PlanAgent.run(&plan_query, self.llm).await.stage(Stage::Plan)?;

        let plan = parse_trade_plan(&plan_text).stage(Stage::Parse)?;
        log_plan(&plan);

        info!("🚀 [ORDER] Placing the order...");
        let order_placed = OrderSubmitter::new(self.broker, self.dry_run)
            .submit_plan(&plan)
            .await
            .stage(Stage::Submit)?;

        if order_placed {
            info!("✅ Order was successful");
        } else {
            info!("❌ Order failed");
        }

        Ok(RunReport {
            account,
            risk_budget: risk,
            instrument,
            quote,
            plan,
            order_placed,
        })
    }
}

fn log_plan(plan: &ParsedTradePlan) {
    info!("📝 [PLAN] Parsed trade args:");
    info!("📝 [PLAN] Instrument: {}", plan.describe(fields::INSTRUMENT));
    info!("📝 [PLAN] Units: {}", plan.describe(fields::UNITS));
    info!("📝 [PLAN] Order Type: {}", plan.describe(fields::ORDER_TYPE));
    info!("📝 [PLAN] Price: {}", plan.describe(fields::PRICE));
    info!("📝 [PLAN] Stop Loss: {}", plan.describe(fields::STOP_LOSS_PRICE));
    info!("📝 [PLAN] Take Profit: {}", plan.describe(fields::TAKE_PROFIT_PRICE));
    info!("📝 [PLAN] Reason: {}", plan.describe(fields::REASON));
}
