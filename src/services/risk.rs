use rust_decimal::Decimal;

/// Cash amount risked on the trade: `balance * risk_pct / 100`, to the cent.
pub fn risk_budget(balance: Decimal, risk_pct: Decimal) -> Decimal {
    (balance * risk_pct / Decimal::ONE_HUNDRED).round_dp(2)
}
