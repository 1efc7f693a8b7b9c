pub mod idea;
pub mod plan;

use crate::error::TradingError;
use crate::llm::TextGenerator;

use tracing::info;

pub use idea::IdeaAgent;
pub use plan::PlanAgent;

pub trait Agent {
    fn name(&self) -> &str;
    fn system_prompt(&self) -> &str;

    /// Sends the query and returns the reply trimmed. The reply's shape is
    /// not checked here.
    async fn run(&self, query: &str, llm: &dyn TextGenerator) -> Result<String, TradingError> {
        info!("🤖 [AGENT] Sending request to {}...", self.name());
        let response = llm.generate(self.system_prompt(), query).await?;
        let response = response.trim().to_string();
        info!("🤖 [AGENT] Response from {}: {}", self.name(), response);
        Ok(response)
    }
}

/// `1000.00 SGD`, or just the amount when the currency is unknown.
pub(crate) fn money(amount: rust_decimal::Decimal, currency: Option<&str>) -> String {
    match currency {
        Some(c) => format!("{} {}", amount, c),
        None => amount.to_string(),
    }
}
