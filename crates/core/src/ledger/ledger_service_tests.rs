#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;
    use diesel::sqlite::SqliteConnection;
    use diesel::Connection;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use crate::db::DbTransactionExecutor;
    use crate::entries::{
        EntryStatus, EntryType, LedgerEntry, LedgerEntryRepositoryTrait, NewLedgerEntry,
    };
    use crate::errors::{DatabaseError, Error, Result};
    use crate::investments::{
        Investment, InvestmentRepositoryTrait, InvestmentStatus, NewInvestment,
    };
    use crate::ledger::{LedgerError, LedgerService, LedgerServiceTrait};
    use crate::products::{
        NewProduct, Product, ProductRepositoryTrait, ProductStatus, ProductUpdate,
    };
    use crate::wallets::{NewWallet, Wallet, WalletRepositoryTrait};

    // --- In-memory store shared by the mock repositories ---

    #[derive(Default, Clone)]
    struct StoreState {
        wallets: Vec<Wallet>,
        entries: Vec<LedgerEntry>,
        products: Vec<Product>,
        investments: Vec<Investment>,
    }

    #[derive(Default)]
    struct MockStore {
        state: Mutex<StoreState>,
        fail_investment_create: AtomicBool,
    }

    impl MockStore {
        fn snapshot(&self) -> StoreState {
            self.state.lock().unwrap().clone()
        }

        fn restore(&self, snapshot: StoreState) {
            *self.state.lock().unwrap() = snapshot;
        }

        fn insert_product(&self, product: Product) {
            self.state.lock().unwrap().products.push(product);
        }

        fn wallet_for(&self, user_id: &str) -> Option<Wallet> {
            self.state
                .lock()
                .unwrap()
                .wallets
                .iter()
                .find(|w| w.user_id == user_id)
                .cloned()
        }

        fn product(&self, product_id: &str) -> Option<Product> {
            self.state
                .lock()
                .unwrap()
                .products
                .iter()
                .find(|p| p.id == product_id)
                .cloned()
        }

        fn entries_for(&self, wallet_id: &str) -> Vec<LedgerEntry> {
            self.state
                .lock()
                .unwrap()
                .entries
                .iter()
                .filter(|e| e.wallet_id == wallet_id)
                .cloned()
                .collect()
        }

        fn completed_total(&self, wallet_id: &str) -> Decimal {
            self.entries_for(wallet_id)
                .iter()
                .filter(|e| e.is_completed())
                .map(|e| e.amount)
                .sum()
        }
    }

    fn make_wallet(user_id: &str) -> Wallet {
        let now = Utc::now().naive_utc();
        Wallet {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            balance: Decimal::ZERO,
            referral_balance: Decimal::ZERO,
            created_at: now,
            updated_at: now,
        }
    }

    fn make_product(
        unit_amount: Decimal,
        target_amount: Decimal,
        current_amount: Decimal,
        status: ProductStatus,
    ) -> Product {
        let now = Utc::now().naive_utc();
        Product {
            id: Uuid::new_v4().to_string(),
            title: "Maize Farm 2026".to_string(),
            description: None,
            target_amount,
            current_amount,
            unit_amount,
            cycle_months: 6,
            return_per_cycle: dec!(15),
            status,
            created_at: now,
            updated_at: now,
        }
    }

    // --- Mock repositories ---

    struct MockWalletRepository {
        store: Arc<MockStore>,
    }

    #[async_trait]
    impl WalletRepositoryTrait for MockWalletRepository {
        fn get_by_user_id(&self, user_id: &str) -> Result<Wallet> {
            self.store
                .wallet_for(user_id)
                .ok_or_else(|| LedgerError::WalletNotFound(user_id.to_string()).into())
        }

        fn find_by_user_id(&self, user_id: &str) -> Result<Option<Wallet>> {
            Ok(self.store.wallet_for(user_id))
        }

        async fn create(&self, new_wallet: NewWallet) -> Result<Wallet> {
            let wallet = make_wallet(&new_wallet.user_id);
            self.store
                .state
                .lock()
                .unwrap()
                .wallets
                .push(wallet.clone());
            Ok(wallet)
        }

        fn find_by_user_id_in_tx(
            &self,
            _conn: &mut SqliteConnection,
            user_id: &str,
        ) -> Result<Option<Wallet>> {
            Ok(self.store.wallet_for(user_id))
        }

        fn create_in_tx(
            &self,
            _conn: &mut SqliteConnection,
            new_wallet: NewWallet,
        ) -> Result<Wallet> {
            let wallet = make_wallet(&new_wallet.user_id);
            self.store
                .state
                .lock()
                .unwrap()
                .wallets
                .push(wallet.clone());
            Ok(wallet)
        }

        fn update_balances_in_tx(
            &self,
            _conn: &mut SqliteConnection,
            wallet_id: &str,
            balance: Decimal,
            referral_balance: Decimal,
        ) -> Result<Wallet> {
            let mut state = self.store.state.lock().unwrap();
            let wallet = state
                .wallets
                .iter_mut()
                .find(|w| w.id == wallet_id)
                .ok_or_else(|| {
                    Error::Database(DatabaseError::NotFound(wallet_id.to_string()))
                })?;
            wallet.balance = balance;
            wallet.referral_balance = referral_balance;
            wallet.updated_at = Utc::now().naive_utc();
            Ok(wallet.clone())
        }
    }

    struct MockEntryRepository {
        store: Arc<MockStore>,
    }

    impl LedgerEntryRepositoryTrait for MockEntryRepository {
        fn list_for_wallet(&self, wallet_id: &str) -> Result<Vec<LedgerEntry>> {
            Ok(self.store.entries_for(wallet_id))
        }

        fn find_by_reference(&self, reference: &str) -> Result<Option<LedgerEntry>> {
            Ok(self
                .store
                .state
                .lock()
                .unwrap()
                .entries
                .iter()
                .find(|e| e.reference.as_deref() == Some(reference))
                .cloned())
        }

        fn sum_completed_for_wallet(&self, wallet_id: &str) -> Result<Decimal> {
            Ok(self.store.completed_total(wallet_id))
        }

        fn create_in_tx(
            &self,
            _conn: &mut SqliteConnection,
            new_entry: NewLedgerEntry,
        ) -> Result<LedgerEntry> {
            new_entry.validate()?;
            let entry = LedgerEntry {
                id: Uuid::new_v4().to_string(),
                wallet_id: new_entry.wallet_id,
                amount: new_entry.amount,
                entry_type: new_entry.entry_type,
                status: new_entry.status,
                reference: new_entry.reference,
                description: new_entry.description,
                created_at: Utc::now().naive_utc(),
            };
            self.store
                .state
                .lock()
                .unwrap()
                .entries
                .push(entry.clone());
            Ok(entry)
        }

        fn find_by_reference_in_tx(
            &self,
            _conn: &mut SqliteConnection,
            reference: &str,
        ) -> Result<Option<LedgerEntry>> {
            self.find_by_reference(reference)
        }
    }

    struct MockProductRepository {
        store: Arc<MockStore>,
    }

    #[async_trait]
    impl ProductRepositoryTrait for MockProductRepository {
        fn get_by_id(&self, product_id: &str) -> Result<Product> {
            self.store.product(product_id).ok_or_else(|| {
                Error::Database(DatabaseError::NotFound(product_id.to_string()))
            })
        }

        fn list(&self, status_filter: Option<ProductStatus>) -> Result<Vec<Product>> {
            Ok(self
                .store
                .state
                .lock()
                .unwrap()
                .products
                .iter()
                .filter(|p| status_filter.map_or(true, |s| p.status == s))
                .cloned()
                .collect())
        }

        async fn create(&self, _new_product: NewProduct) -> Result<Product> {
            unimplemented!()
        }

        async fn update(&self, _product_update: ProductUpdate) -> Result<Product> {
            unimplemented!()
        }

        async fn set_status(
            &self,
            _product_id: &str,
            _status: ProductStatus,
        ) -> Result<Product> {
            unimplemented!()
        }

        fn find_by_id_in_tx(
            &self,
            _conn: &mut SqliteConnection,
            product_id: &str,
        ) -> Result<Option<Product>> {
            Ok(self.store.product(product_id))
        }

        fn add_funding_in_tx(
            &self,
            _conn: &mut SqliteConnection,
            product_id: &str,
            amount: Decimal,
        ) -> Result<Product> {
            let mut state = self.store.state.lock().unwrap();
            let product = state
                .products
                .iter_mut()
                .find(|p| p.id == product_id)
                .ok_or_else(|| {
                    Error::Database(DatabaseError::NotFound(product_id.to_string()))
                })?;
            product.current_amount += amount;
            product.updated_at = Utc::now().naive_utc();
            Ok(product.clone())
        }

        fn set_status_in_tx(
            &self,
            _conn: &mut SqliteConnection,
            product_id: &str,
            status: ProductStatus,
        ) -> Result<Product> {
            let mut state = self.store.state.lock().unwrap();
            let product = state
                .products
                .iter_mut()
                .find(|p| p.id == product_id)
                .ok_or_else(|| {
                    Error::Database(DatabaseError::NotFound(product_id.to_string()))
                })?;
            product.status = status;
            Ok(product.clone())
        }
    }

    struct MockInvestmentRepository {
        store: Arc<MockStore>,
    }

    #[async_trait]
    impl InvestmentRepositoryTrait for MockInvestmentRepository {
        fn get_by_id(&self, investment_id: &str) -> Result<Investment> {
            self.store
                .state
                .lock()
                .unwrap()
                .investments
                .iter()
                .find(|i| i.id == investment_id)
                .cloned()
                .ok_or_else(|| {
                    Error::Database(DatabaseError::NotFound(investment_id.to_string()))
                })
        }

        fn list_for_user(&self, user_id: &str) -> Result<Vec<Investment>> {
            Ok(self
                .store
                .state
                .lock()
                .unwrap()
                .investments
                .iter()
                .filter(|i| i.user_id == user_id)
                .cloned()
                .collect())
        }

        fn find_by_certificate_token(&self, token: &str) -> Result<Option<Investment>> {
            Ok(self
                .store
                .state
                .lock()
                .unwrap()
                .investments
                .iter()
                .find(|i| i.certificate_token.as_deref() == Some(token))
                .cloned())
        }

        async fn set_status(
            &self,
            _investment_id: &str,
            _status: InvestmentStatus,
        ) -> Result<Investment> {
            unimplemented!()
        }

        fn create_in_tx(
            &self,
            _conn: &mut SqliteConnection,
            new_investment: NewInvestment,
        ) -> Result<Investment> {
            if self.store.fail_investment_create.load(Ordering::SeqCst) {
                return Err(Error::Database(DatabaseError::Internal(
                    "simulated storage fault".to_string(),
                )));
            }
            let investment = Investment {
                id: Uuid::new_v4().to_string(),
                user_id: new_investment.user_id,
                product_id: new_investment.product_id,
                units: new_investment.units,
                amount: new_investment.amount,
                status: InvestmentStatus::Active,
                certificate_token: new_investment.certificate_token,
                created_at: Utc::now().naive_utc(),
            };
            self.store
                .state
                .lock()
                .unwrap()
                .investments
                .push(investment.clone());
            Ok(investment)
        }
    }

    /// Executor that snapshots the store and restores it when the closure
    /// aborts, mirroring a rolled-back transaction.
    #[derive(Clone)]
    struct MockExecutor {
        store: Arc<MockStore>,
    }

    impl DbTransactionExecutor for MockExecutor {
        fn execute<F, T>(&self, f: F) -> Result<T>
        where
            F: FnOnce(&mut SqliteConnection) -> Result<T>,
        {
            let mut conn = SqliteConnection::establish(":memory:")
                .map_err(|e| Error::Database(DatabaseError::ConnectionFailed(e.to_string())))?;
            let snapshot = self.store.snapshot();
            match f(&mut conn) {
                Ok(value) => Ok(value),
                Err(e) => {
                    self.store.restore(snapshot);
                    Err(e)
                }
            }
        }
    }

    fn setup() -> (Arc<MockStore>, LedgerService<MockExecutor>) {
        let store = Arc::new(MockStore::default());
        let service = LedgerService::new(
            Arc::new(MockWalletRepository {
                store: store.clone(),
            }),
            Arc::new(MockEntryRepository {
                store: store.clone(),
            }),
            Arc::new(MockProductRepository {
                store: store.clone(),
            }),
            Arc::new(MockInvestmentRepository {
                store: store.clone(),
            }),
            MockExecutor {
                store: store.clone(),
            },
        );
        (store, service)
    }

    // --- invest ---

    #[tokio::test]
    async fn test_invest_crosses_funding_target() {
        let (store, service) = setup();
        service.fund_wallet("user-1", dec!(10000), None).await.unwrap();
        let product = make_product(dec!(2000), dec!(5000), dec!(4000), ProductStatus::Active);
        let product_id = product.id.clone();
        store.insert_product(product);

        let investment = service.invest("user-1", &product_id, 1).await.unwrap();

        assert_eq!(investment.amount, dec!(2000));
        assert_eq!(investment.units, 1);
        assert_eq!(investment.status, InvestmentStatus::Active);
        assert!(investment.certificate_token.is_some());

        let wallet = store.wallet_for("user-1").unwrap();
        assert_eq!(wallet.balance, dec!(8000));

        let product = store.product(&product_id).unwrap();
        assert_eq!(product.current_amount, dec!(6000));
        assert_eq!(product.status, ProductStatus::Funded);

        let entries = store.entries_for(&wallet.id);
        assert_eq!(entries.len(), 2);
        let investment_entry = entries
            .iter()
            .find(|e| e.entry_type == EntryType::Investment)
            .unwrap();
        assert_eq!(investment_entry.amount, dec!(-2000));
        assert_eq!(investment_entry.status, EntryStatus::Completed);
    }

    #[tokio::test]
    async fn test_invest_insufficient_funds_changes_nothing() {
        let (store, service) = setup();
        service.fund_wallet("user-1", dec!(10000), None).await.unwrap();
        let product = make_product(dec!(2000), dec!(100000), dec!(0), ProductStatus::Active);
        let product_id = product.id.clone();
        store.insert_product(product);
        let before = store.snapshot();

        let err = service.invest("user-1", &product_id, 10).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Ledger(LedgerError::InsufficientFunds { .. })
        ));

        let after = store.snapshot();
        assert_eq!(after.entries.len(), before.entries.len());
        assert_eq!(after.investments.len(), 0);
        assert_eq!(store.wallet_for("user-1").unwrap().balance, dec!(10000));
        assert_eq!(store.product(&product_id).unwrap().current_amount, dec!(0));
    }

    #[tokio::test]
    async fn test_invest_rejects_non_positive_units() {
        let (_store, service) = setup();
        for units in [0, -3] {
            let err = service.invest("user-1", "prod-1", units).await.unwrap_err();
            assert!(matches!(err, Error::Ledger(LedgerError::InvalidUnits(u)) if u == units));
        }
    }

    #[tokio::test]
    async fn test_invest_missing_product_unavailable() {
        let (_store, service) = setup();
        let err = service.invest("user-1", "no-such", 1).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Ledger(LedgerError::ProductUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_invest_funded_product_unavailable() {
        let (store, service) = setup();
        service.fund_wallet("user-1", dec!(10000), None).await.unwrap();
        let product = make_product(dec!(2000), dec!(5000), dec!(6000), ProductStatus::Funded);
        let product_id = product.id.clone();
        store.insert_product(product);

        let err = service.invest("user-1", &product_id, 1).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Ledger(LedgerError::ProductUnavailable(_))
        ));
        assert_eq!(store.wallet_for("user-1").unwrap().balance, dec!(10000));
    }

    #[tokio::test]
    async fn test_invest_without_wallet_fails() {
        let (store, service) = setup();
        let product = make_product(dec!(2000), dec!(5000), dec!(0), ProductStatus::Active);
        let product_id = product.id.clone();
        store.insert_product(product);

        let err = service.invest("user-1", &product_id, 1).await.unwrap_err();
        assert!(matches!(err, Error::Ledger(LedgerError::WalletNotFound(_))));
    }

    #[tokio::test]
    async fn test_invest_rolls_back_on_storage_fault() {
        let (store, service) = setup();
        service.fund_wallet("user-1", dec!(10000), None).await.unwrap();
        let product = make_product(dec!(2000), dec!(5000), dec!(4000), ProductStatus::Active);
        let product_id = product.id.clone();
        store.insert_product(product);
        let before = store.snapshot();

        store.fail_investment_create.store(true, Ordering::SeqCst);
        let err = service.invest("user-1", &product_id, 1).await.unwrap_err();
        assert!(matches!(err, Error::Database(DatabaseError::Internal(_))));

        // Wallet debit, entry append, and funding increment all rolled back.
        let after = store.snapshot();
        assert_eq!(store.wallet_for("user-1").unwrap().balance, dec!(10000));
        assert_eq!(after.entries.len(), before.entries.len());
        assert_eq!(after.investments.len(), 0);
        let product = store.product(&product_id).unwrap();
        assert_eq!(product.current_amount, dec!(4000));
        assert_eq!(product.status, ProductStatus::Active);
    }

    // --- fund_wallet / withdraw ---

    #[tokio::test]
    async fn test_fund_wallet_creates_wallet_lazily() {
        let (store, service) = setup();
        let wallet = service
            .fund_wallet("user-1", dec!(250.50), None)
            .await
            .unwrap();
        assert_eq!(wallet.balance, dec!(250.50));
        assert_eq!(store.entries_for(&wallet.id).len(), 1);
    }

    #[tokio::test]
    async fn test_fund_wallet_rejects_non_positive_amount() {
        let (_store, service) = setup();
        let err = service
            .fund_wallet("user-1", dec!(0), None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Ledger(LedgerError::InvalidAmount(_))));
    }

    #[tokio::test]
    async fn test_fund_wallet_is_idempotent_by_reference() {
        let (store, service) = setup();
        let reference = Some("dep-abc123".to_string());
        service
            .fund_wallet("user-1", dec!(100), reference.clone())
            .await
            .unwrap();
        let wallet = service
            .fund_wallet("user-1", dec!(100), reference)
            .await
            .unwrap();

        assert_eq!(wallet.balance, dec!(100));
        assert_eq!(store.entries_for(&wallet.id).len(), 1);
    }

    #[tokio::test]
    async fn test_withdraw_decrements_balance() {
        let (store, service) = setup();
        service.fund_wallet("user-1", dec!(500), None).await.unwrap();
        let wallet = service.withdraw("user-1", dec!(120)).await.unwrap();

        assert_eq!(wallet.balance, dec!(380));
        let entries = store.entries_for(&wallet.id);
        let withdrawal = entries
            .iter()
            .find(|e| e.entry_type == EntryType::Withdrawal)
            .unwrap();
        assert_eq!(withdrawal.amount, dec!(-120));
    }

    #[tokio::test]
    async fn test_withdraw_insufficient_funds() {
        let (store, service) = setup();
        service.fund_wallet("user-1", dec!(100), None).await.unwrap();
        let err = service.withdraw("user-1", dec!(100.01)).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Ledger(LedgerError::InsufficientFunds { .. })
        ));
        assert_eq!(store.wallet_for("user-1").unwrap().balance, dec!(100));
    }

    // --- referral bonus ---

    #[tokio::test]
    async fn test_award_then_transfer_referral_bonus() {
        let (store, service) = setup();
        service.fund_wallet("user-1", dec!(100), None).await.unwrap();
        service
            .award_referral_bonus("user-1", "user-2")
            .await
            .unwrap();

        let wallet = store.wallet_for("user-1").unwrap();
        assert_eq!(wallet.referral_balance, dec!(50));
        assert_eq!(wallet.balance, dec!(100));

        let wallet = service.transfer_referral_bonus("user-1").await.unwrap();
        assert_eq!(wallet.balance, dec!(150));
        assert_eq!(wallet.referral_balance, dec!(0));

        // One PENDING award entry, one COMPLETED transfer entry.
        let entries = store.entries_for(&wallet.id);
        let bonus_entries: Vec<_> = entries
            .iter()
            .filter(|e| e.entry_type == EntryType::ReferralBonus)
            .collect();
        assert_eq!(bonus_entries.len(), 2);
        assert!(bonus_entries
            .iter()
            .any(|e| e.status == EntryStatus::Pending));
        assert!(bonus_entries
            .iter()
            .any(|e| e.status == EntryStatus::Completed && e.amount == dec!(50)));
    }

    #[tokio::test]
    async fn test_award_referral_bonus_is_idempotent() {
        let (store, service) = setup();
        service
            .award_referral_bonus("user-1", "user-2")
            .await
            .unwrap();
        service
            .award_referral_bonus("user-1", "user-2")
            .await
            .unwrap();

        let wallet = store.wallet_for("user-1").unwrap();
        assert_eq!(wallet.referral_balance, dec!(50));
        assert_eq!(store.entries_for(&wallet.id).len(), 1);
    }

    #[tokio::test]
    async fn test_transfer_without_referral_balance_fails() {
        let (_store, service) = setup();
        let err = service
            .transfer_referral_bonus("user-1")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Ledger(LedgerError::WalletNotFound(_))));

        let (_store, service) = setup();
        service.fund_wallet("user-1", dec!(100), None).await.unwrap();
        let err = service
            .transfer_referral_bonus("user-1")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Ledger(LedgerError::NoReferralBalance)));
    }

    // --- conservation ---

    #[tokio::test]
    async fn test_balance_matches_completed_entries_across_operations() {
        let (store, service) = setup();
        let product = make_product(dec!(500), dec!(10000), dec!(0), ProductStatus::Active);
        let product_id = product.id.clone();
        store.insert_product(product);

        service.fund_wallet("user-1", dec!(3000), None).await.unwrap();
        service.invest("user-1", &product_id, 2).await.unwrap();
        service.withdraw("user-1", dec!(750)).await.unwrap();
        service
            .award_referral_bonus("user-1", "user-2")
            .await
            .unwrap();
        service.transfer_referral_bonus("user-1").await.unwrap();

        let wallet = store.wallet_for("user-1").unwrap();
        assert_eq!(wallet.balance, store.completed_total(&wallet.id));
        assert_eq!(wallet.balance, dec!(1300));
    }
}
