use rust_decimal::Decimal;

use crate::agents::{money, Agent};
use crate::constants::trading::{PLAN_PRICE_DP, PRICE_DISPLAY_DP, UNITS_ROUNDING};

pub struct PlanAgent;

impl PlanAgent {
    pub fn query(instrument: &str, market_price: Decimal, risk_budget: Decimal, currency: Option<&str>) -> String {
        format!(
            r#"price, stop_loss_price and take_profit_price are to be rounded to {dp} decimal places.
Only return the trade idea in the following **exact format** (no commentary, no extra text):

instrument: "{instrument}"
units: <int>
order_type: "<MARKET or STOP or LIMIT>"
price: <float or None>
stop_loss_price: <float>
take_profit_price: <float>
reason: "<string explaining the trade idea in roughly two sentences>"

Your trade should risk {risk}. Calculate position size using stop loss distance assuming $1 per 1000 units. Round units to the nearest {lot}.

Current price for {instrument} is {price:.prec$}."#,
            dp = PLAN_PRICE_DP,
            instrument = instrument,
            risk = money(risk_budget, currency),
            lot = UNITS_ROUNDING,
            price = market_price,
            prec = PRICE_DISPLAY_DP as usize,
        )
    }
}

impl Agent for PlanAgent {
    fn name(&self) -> &str {
        "Plan-Agent"
    }

    fn system_prompt(&self) -> &str {
        r#"You are a forex trading assistant in a demo environment. Each week, generate **one swing trade** idea based on the provided forex pair and current price.
Use negative units for a short position.
Use price: None for MARKET orders.
"#
    }
}
