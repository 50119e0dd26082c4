use std::{collections::HashMap, sync::Arc};

use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    db_types::{NewPayment, PaymentId, PaymentRecord, PaymentStatus},
    traits::{PaymentStore, PaymentStoreError, TransitionResult},
};

/// The in-process storage backend. All state lives behind one `RwLock`ed map and is lost on restart, which is an
/// explicit design decision for this system.
///
/// The server runs on a multi-threaded runtime, so map mutations must be mutually exclusive; the lock provides
/// that. Cloning is cheap and every clone shares the same state.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<StoreInner>>,
}

#[derive(Default)]
struct StoreInner {
    payments: HashMap<PaymentId, PaymentRecord>,
    // Insertion order of ids, so that fetch_all_payments has a stable order.
    order: Vec<PaymentId>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PaymentStore for MemoryStore {
    async fn create_payment(&self, payment: NewPayment) -> Result<PaymentRecord, PaymentStoreError> {
        let mut inner = self.inner.write().await;
        let mut id = PaymentId::random();
        while inner.payments.contains_key(&id) {
            id = PaymentId::random();
        }
        let record = PaymentRecord {
            id: id.clone(),
            status: PaymentStatus::Pending,
            plan: payment.plan,
            price_usd: payment.price_usd,
            currency: payment.currency,
            exact_amount: payment.exact_amount,
            created_at: Utc::now(),
        };
        inner.order.push(id.clone());
        inner.payments.insert(id, record.clone());
        Ok(record)
    }

    async fn fetch_payment(&self, id: &PaymentId) -> Result<Option<PaymentRecord>, PaymentStoreError> {
        let inner = self.inner.read().await;
        Ok(inner.payments.get(id).cloned())
    }

    async fn fetch_all_payments(&self) -> Result<Vec<PaymentRecord>, PaymentStoreError> {
        let inner = self.inner.read().await;
        Ok(inner.order.iter().filter_map(|id| inner.payments.get(id)).cloned().collect())
    }

    async fn transition_payment(
        &self,
        id: &PaymentId,
        new_status: PaymentStatus,
    ) -> Result<TransitionResult, PaymentStoreError> {
        let mut inner = self.inner.write().await;
        match inner.payments.get_mut(id) {
            None => Ok(TransitionResult::NotFound),
            Some(record) if !record.status.is_pending() => Ok(TransitionResult::NotPending(record.status)),
            Some(record) => {
                record.status = new_status;
                Ok(TransitionResult::Applied(record.clone()))
            },
        }
    }
}
