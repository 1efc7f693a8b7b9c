//! Custom error types for the trading pipeline
//!
//! Provides structured, typed errors instead of generic Box<dyn Error>

use std::fmt;

use thiserror::Error;

/// Top-level trading pipeline errors
#[derive(Error, Debug)]
pub enum TradingError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    #[error("No quotes returned for {instrument}")]
    EmptyQuote { instrument: String },

    #[error("Quote for {instrument} is out of decimal range")]
    QuoteOverflow { instrument: String },

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Startup configuration errors. Always raised before any network call.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} environment variable not set")]
    MissingVar { name: &'static str },

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Remote service errors (brokerage or text generation)
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{service} {operation} failed with HTTP {status}: {body}")]
    Http {
        service: &'static str,
        operation: &'static str,
        status: u16,
        body: String,
    },

    #[error("{service} {operation} request failed: {source}")]
    Transport {
        service: &'static str,
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} {operation} timed out after {secs}s")]
    Timeout {
        service: &'static str,
        operation: &'static str,
        secs: u64,
    },

    #[error("LLM request failed: {0}")]
    Llm(#[from] async_openai::error::OpenAIError),

    #[error("LLM returned no candidates")]
    NoCandidates,

    #[error("{service} {operation} decode failed: {reason} (body: {body})")]
    Decode {
        service: &'static str,
        operation: &'static str,
        reason: String,
        body: String,
    },
}

/// A recognised numeric field held a value that is not a plain numeric literal
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("field '{field}' has non-numeric value '{value}'")]
pub struct ParseError {
    pub field: String,
    pub value: String,
}

/// The parsed plan cannot be turned into a submittable order
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("required field '{field}' missing from trade plan")]
    MissingField { field: &'static str },

    #[error("required field '{field}' is None in trade plan")]
    NullField { field: &'static str },

    #[error("field '{field}' has unexpected type")]
    WrongType { field: &'static str },

    #[error("unknown order type '{value}' (expected MARKET, LIMIT or STOP)")]
    UnknownOrderType { value: String },

    #[error("{order_type} order requires an entry price")]
    MissingEntryPrice { order_type: String },
}

/// Pipeline stage, used to label the diagnostic of a failed run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Account,
    Idea,
    Price,
    Plan,
    Parse,
    Submit,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Account => "account reader",
            Stage::Idea => "idea generator",
            Stage::Price => "price reader",
            Stage::Plan => "plan generator",
            Stage::Parse => "trade-plan parser",
            Stage::Submit => "order submitter",
        };
        f.write_str(name)
    }
}

/// A pipeline failure tagged with the stage it happened in
#[derive(Error, Debug)]
#[error("{stage} failed: {source}")]
pub struct StageError {
    pub stage: Stage,
    #[source]
    pub source: TradingError,
}

/// Helper for tagging errors with their stage
pub trait StageContext<T> {
    fn stage(self, stage: Stage) -> Result<T, StageError>;
}

impl<T, E: Into<TradingError>> StageContext<T> for Result<T, E> {
    fn stage(self, stage: Stage) -> Result<T, StageError> {
        self.map_err(|e| StageError {
            stage,
            source: e.into(),
        })
    }
}
