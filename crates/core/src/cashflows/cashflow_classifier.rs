//! Flow classification for NAV/unit accounting.
//!
//! Only external flows (money crossing the portfolio boundary) issue or
//! redeem units. Dividends, taxes and fund sweeps are reshuffles of money
//! the portfolio already owns.

/// Flow type for unit accounting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowType {
    /// Money entering or leaving the portfolio. Changes units.
    External,

    /// Money moving within the portfolio. Moves NAV only.
    Internal,
}

const EXTERNAL_TYPES: &[&str] = &["DEPOSIT", "WITHDRAW", "WITHDRAWAL", "COUPON"];

const NOISE_KEYWORDS: &[&str] = &["dividend", "tax", "fund"];

fn is_external_type(cashflow_type: &str) -> bool {
    let normalized = cashflow_type.trim().to_uppercase();
    let leading = normalized
        .split(|c: char| !c.is_ascii_alphabetic())
        .next()
        .unwrap_or_default();
    EXTERNAL_TYPES
        .iter()
        .any(|t| normalized == *t || leading == *t)
}

fn is_noise_remark(remark: &str) -> bool {
    let lowered = remark.to_lowercase();
    NOISE_KEYWORDS.iter().any(|k| lowered.contains(k))
}

/// Classify a cashflow from its broker type and remark.
///
/// External:
/// - DEPOSIT, WITHDRAW/WITHDRAWAL, COUPON (exact or as the leading word)
///
/// Internal:
/// - any type whose remark mentions a dividend, tax or fund movement
/// - every other type
pub fn classify_cashflow(cashflow_type: &str, remark: &str) -> FlowType {
    if is_external_type(cashflow_type) && !is_noise_remark(remark) {
        FlowType::External
    } else {
        FlowType::Internal
    }
}

pub fn is_external_cashflow(cashflow_type: &str, remark: &str) -> bool {
    classify_cashflow(cashflow_type, remark) == FlowType::External
}
