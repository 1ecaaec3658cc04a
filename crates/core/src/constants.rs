use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Bonus credited to a referrer's referral balance for each signup.
pub fn default_referral_bonus() -> Decimal {
    dec!(50)
}

/// Decimal precision for monetary values.
pub const MONEY_DECIMAL_PRECISION: u32 = 2;

/// Reference prefix for gateway-initiated deposits.
pub const DEPOSIT_REFERENCE_PREFIX: &str = "dep-";

/// Reference prefix for referral bonus awards, keyed by the referred user.
pub const REFERRAL_AWARD_REFERENCE_PREFIX: &str = "referral-award:";
