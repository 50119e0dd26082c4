use crypto_payment_engine::{
    db_types::{NewPayment, PaymentId, PaymentRecord, PaymentStatus},
    traits::{PaymentStore, PaymentStoreError, PriceFeed, PriceFeedError, TransitionResult},
};
use mockall::mock;

mock! {
    pub Store {}
    impl PaymentStore for Store {
        async fn create_payment(&self, payment: NewPayment) -> Result<PaymentRecord, PaymentStoreError>;
        async fn fetch_payment(&self, id: &PaymentId) -> Result<Option<PaymentRecord>, PaymentStoreError>;
        async fn fetch_all_payments(&self) -> Result<Vec<PaymentRecord>, PaymentStoreError>;
        async fn transition_payment(&self, id: &PaymentId, new_status: PaymentStatus) -> Result<TransitionResult, PaymentStoreError>;
    }
}

mock! {
    pub Feed {}
    impl PriceFeed for Feed {
        async fn usd_price(&self, coin_id: &str) -> Result<f64, PriceFeedError>;
    }
}
