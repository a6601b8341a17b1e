use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Default reporting currency for snapshots and NAV.
pub const DEFAULT_REPORTING_CURRENCY: &str = "SGD";

/// Units issued on the first ever snapshot.
pub const SEED_UNITS: Decimal = Decimal::ONE_THOUSAND;

/// Decimal precision for persisted monetary values.
///
/// `nav` and `units` are exempt: they are stored at full scale so that the
/// carried state still multiplies back to total assets.
pub const DECIMAL_PRECISION: u32 = 6;

/// Decimal precision for display and ingestion rounding.
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Tolerance for `nav * units == total_assets` and the component sum check.
pub const NAV_TOLERANCE: Decimal = dec!(0.01);

/// Contract multiplier applied to option trades.
pub const OPTION_CONTRACT_MULTIPLIER: i64 = 100;

/// Order status kept at ingestion.
pub const ORDER_STATUS_FILLED_ALL: &str = "FILLED_ALL";
