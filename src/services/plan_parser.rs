//! Free-text trade plan parser.
//!
//! Turns the model's `key: value` reply into a sparse field map. Lines that do
//! not look like `key: value` are skipped, so surrounding commentary is
//! harmless. Numeric fields are coerced strictly: a malformed number is a
//! `ParseError`, never a silent zero.

use regex::Regex;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::constants::fields;
use crate::error::ParseError;

/// One coerced plan value. `Null` is the model's explicit `None`, which is
/// not the same thing as the key being absent.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Null,
    Integer(i64),
    Decimal(Decimal),
    Text(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str(fields::NULL_MARKER),
            FieldValue::Integer(v) => write!(f, "{}", v),
            FieldValue::Decimal(v) => write!(f, "{}", v),
            FieldValue::Text(v) => f.write_str(v),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedTradePlan {
    fields: BTreeMap<String, FieldValue>,
}

impl ParsedTradePlan {
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn reason(&self) -> Option<&str> {
        match self.get(fields::REASON) {
            Some(FieldValue::Text(reason)) => Some(reason.as_str()),
            _ => None,
        }
    }

    /// Human-readable value for logs: the value, `None`, or `<missing>`.
    pub fn describe(&self, key: &str) -> String {
        self.get(key)
            .map(|v| v.to_string())
            .unwrap_or_else(|| "<missing>".to_string())
    }
}

impl FromIterator<(String, FieldValue)> for ParsedTradePlan {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        // Later duplicates win.
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

fn line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"^\s*(\w+):\s+"?([^"\n]+)"?\s*$"#).expect("line pattern is valid"))
}

fn decimal_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]+)?|\.[0-9]+)$").expect("decimal pattern is valid")
    })
}

/// Parses a model reply into a sparse plan.
pub fn parse_trade_plan(text: &str) -> Result<ParsedTradePlan, ParseError> {
    text.lines()
        .filter_map(split_line)
        .map(|(key, raw)| coerce(key, raw).map(|value| (key.to_string(), value)))
        .collect()
}

/// `(key, value)` for a `key: value` / `key: "value"` line, value trimmed.
pub fn split_line(line: &str) -> Option<(&str, &str)> {
    let caps = line_pattern().captures(line)?;
    let key = caps.get(1)?.as_str();
    let value = caps.get(2)?.as_str().trim();
    Some((key, value))
}

fn coerce(key: &str, raw: &str) -> Result<FieldValue, ParseError> {
    if raw == fields::NULL_MARKER {
        return Ok(FieldValue::Null);
    }

    let invalid = || ParseError {
        field: key.to_string(),
        value: raw.to_string(),
    };

    if key == fields::UNITS {
        parse_integer_literal(raw).map(FieldValue::Integer).ok_or_else(invalid)
    } else if fields::DECIMAL_FIELDS.iter().any(|f| *f == key) {
        parse_decimal_literal(raw).map(FieldValue::Decimal).ok_or_else(invalid)
    } else {
        Ok(FieldValue::Text(raw.to_string()))
    }
}

/// Plain `[+-]digits`; anything else (separators, units, exponents) is rejected.
pub fn parse_integer_literal(raw: &str) -> Option<i64> {
    let digits = raw.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<i64>().ok()
}

/// Plain decimal literal such as `1.095`, `-0.5`, `.75` or `12`.
///
/// Literals that do not fit a `Decimal` exactly are rejected rather than
/// rounded.
pub fn parse_decimal_literal(raw: &str) -> Option<Decimal> {
    if !decimal_pattern().is_match(raw) {
        return None;
    }

    let (sign, body) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.strip_prefix('+').unwrap_or(raw)),
    };
    let zero = if body.starts_with('.') { "0" } else { "" };
    let fraction_digits = body.split_once('.').map_or(0, |(_, frac)| frac.len());

    let value = Decimal::from_str(&format!("{}{}{}", sign, zero, body)).ok()?;
    (value.scale() as usize == fraction_digits).then_some(value)
}
