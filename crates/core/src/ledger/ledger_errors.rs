use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by ledger operations.
///
/// Every kind maps to an actionable user-facing message in the calling
/// layer; storage faults are reported separately as database errors and are
/// the only failures safe to retry blindly.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Product {0} is not open for investment")]
    ProductUnavailable(String),

    #[error("Unit count must be a positive whole number, got {0}")]
    InvalidUnits(i64),

    #[error("Amount must be positive, got {0}")]
    InvalidAmount(Decimal),

    #[error("Insufficient funds: balance {balance} is below the required {required}")]
    InsufficientFunds {
        balance: Decimal,
        required: Decimal,
    },

    #[error("No wallet found for user {0}")]
    WalletNotFound(String),

    #[error("No referral balance available to transfer")]
    NoReferralBalance,

    #[error("Payment {0} could not be verified as successful")]
    PaymentUnverified(String),

    #[error("No investment matches certificate token {0}")]
    CertificateNotFound(String),
}

impl From<LedgerError> for String {
    fn from(error: LedgerError) -> Self {
        error.to_string()
    }
}
