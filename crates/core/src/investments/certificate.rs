//! Certificate token generation for investment verification.
//!
//! Each successful investment carries an opaque token that the certificate
//! layer prints (as a barcode) and that support staff can later resolve back
//! to the investment. Tokens are fingerprints of the purchase, not secrets.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Computes a practically-unique certificate token for an investment.
///
/// The token is a SHA-256 hash over the purchase identity (user, product,
/// units, issue time) plus a random nonce so that identical purchases in the
/// same instant still get distinct tokens.
pub fn generate_certificate_token(
    user_id: &str,
    product_id: &str,
    units: i64,
    issued_at: &DateTime<Utc>,
) -> String {
    let mut hasher = Sha256::new();

    hasher.update(user_id.as_bytes());
    hasher.update(b"|");
    hasher.update(product_id.as_bytes());
    hasher.update(b"|");
    hasher.update(units.to_string().as_bytes());
    hasher.update(b"|");
    hasher.update(issued_at.to_rfc3339().as_bytes());
    hasher.update(b"|");
    hasher.update(Uuid::new_v4().as_bytes());

    hex::encode(hasher.finalize())
}
