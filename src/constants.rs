//! Application-wide constants and magic numbers
//!
//! This module centralizes all hardcoded values to improve maintainability
//! and make the codebase easier to tune.

/// OANDA v20 REST constants
pub mod oanda {
    /// Practice (demo) REST host
    pub const PRACTICE_URL: &str = "https://api-fxpractice.oanda.com";

    /// Live REST host
    pub const LIVE_URL: &str = "https://api-fxtrade.oanda.com";

    /// Status returned by CreateOrder when the order was accepted
    pub const ORDER_CREATED_STATUS: u16 = 201;

    /// Position fill mode sent with every order
    pub const POSITION_FILL_DEFAULT: &str = "DEFAULT";

    /// Time in force for stop-loss / take-profit on-fill instructions
    pub const ON_FILL_TIME_IN_FORCE: &str = "GTC";
}

/// Generative text service constants
pub mod llm {
    /// Google's OpenAI-compatible Gemini endpoint
    pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai/";

    pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
}

/// Trading constants
pub mod trading {
    /// Percent of the account balance risked on the single trade
    pub const DEFAULT_RISK_PCT: f64 = 1.0;

    /// Decimal places used when showing the market price
    pub const PRICE_DISPLAY_DP: u32 = 5;

    /// Decimal places the plan prompt asks the model to round prices to
    pub const PLAN_PRICE_DP: u32 = 3;

    /// Units the plan prompt asks the model to round position size to
    pub const UNITS_ROUNDING: u32 = 100;
}

/// Network constants
pub mod network {
    /// Upper bound on any single remote call
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
}

/// Plan field names recognised by the parser and the order submitter
pub mod fields {
    pub const INSTRUMENT: &str = "instrument";
    pub const UNITS: &str = "units";
    pub const ORDER_TYPE: &str = "order_type";
    pub const PRICE: &str = "price";
    pub const STOP_LOSS_PRICE: &str = "stop_loss_price";
    pub const TAKE_PROFIT_PRICE: &str = "take_profit_price";
    pub const REASON: &str = "reason";

    /// Literal the model uses for "no value"
    pub const NULL_MARKER: &str = "None";

    /// Fields coerced to decimals
    pub const DECIMAL_FIELDS: [&str; 3] = [PRICE, STOP_LOSS_PRICE, TAKE_PROFIT_PRICE];
}
