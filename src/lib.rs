//! FX Swing Trader - one-shot LLM-assisted forex order pipeline
//!
//! Reads the OANDA account balance, asks a language model for a currency
//! pair and a trade plan, parses the plan and submits a single order.

pub mod agents;
pub mod broker;
pub mod config;
pub mod constants;
pub mod error;
pub mod llm;
pub mod pipeline;
pub mod services;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{Stage, StageError, TradingError};
pub use pipeline::{RunReport, TradePipeline};
pub use services::plan_parser::{parse_trade_plan, FieldValue, ParsedTradePlan};

#[cfg(test)]
mod config_tests;
