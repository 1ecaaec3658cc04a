//! Tests for wallet domain models.

#[cfg(test)]
mod tests {
    use crate::wallets::{NewWallet, Wallet};
    use rust_decimal_macros::dec;

    #[test]
    fn test_can_cover_exact_amount() {
        let wallet = Wallet {
            balance: dec!(100),
            ..Default::default()
        };
        assert!(wallet.can_cover(dec!(100)));
    }

    #[test]
    fn test_can_cover_insufficient() {
        let wallet = Wallet {
            balance: dec!(99.99),
            ..Default::default()
        };
        assert!(!wallet.can_cover(dec!(100)));
    }

    #[test]
    fn test_has_referral_balance_zero() {
        let wallet = Wallet::default();
        assert!(!wallet.has_referral_balance());
    }

    #[test]
    fn test_has_referral_balance_positive() {
        let wallet = Wallet {
            referral_balance: dec!(0.01),
            ..Default::default()
        };
        assert!(wallet.has_referral_balance());
    }

    #[test]
    fn test_new_wallet_validate_empty_user() {
        let new_wallet = NewWallet {
            user_id: "  ".to_string(),
        };
        assert!(new_wallet.validate().is_err());
    }

    #[test]
    fn test_new_wallet_validate_ok() {
        let new_wallet = NewWallet {
            user_id: "user-1".to_string(),
        };
        assert!(new_wallet.validate().is_ok());
    }

    #[test]
    fn test_wallet_serializes_camel_case() {
        let wallet = Wallet {
            id: "w-1".to_string(),
            user_id: "user-1".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&wallet).unwrap();
        assert!(json.get("userId").is_some());
        assert!(json.get("referralBalance").is_some());
    }
}
