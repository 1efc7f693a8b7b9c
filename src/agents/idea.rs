use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::agents::{money, Agent};

pub struct IdeaAgent;

impl IdeaAgent {
    pub fn query(
        balance: Decimal,
        risk_pct: Decimal,
        risk_budget: Decimal,
        currency: Option<&str>,
        today: NaiveDate,
    ) -> String {
        format!(
            "Date: {}\nAccount size: {}\nRisk per trade: {} percent of account ({})\nPip value: ~$1 per 10,000 units",
            today.format("%Y-%m-%d"),
            money(balance, currency),
            risk_pct.normalize(),
            money(risk_budget, currency),
        )
    }
}

impl Agent for IdeaAgent {
    fn name(&self) -> &str {
        "Idea-Agent"
    }

    fn system_prompt(&self) -> &str {
        r#"You are a simulated forex trading assistant operating in a demo environment. Once per week, you generate one swing trade idea based on current market conditions.

Return the output in this format:
<str, The instrument to trade (e.g., "EUR_USD")>

Return only the instrument symbol, without quotes.
Do not include any extra text.
"#
    }
}
