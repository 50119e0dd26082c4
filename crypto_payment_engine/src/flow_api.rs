use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{NewPayment, PaymentId, PaymentRecord, PaymentStatus},
    traits::{PaymentStore, PaymentStoreError, TransitionResult},
};

/// `PaymentFlowApi` is the primary API for the payment lifecycle: creation, status queries and the single
/// pending → approved/rejected transition. Both the HTTP handlers and the operator-inbox poller drive the store
/// through this API.
pub struct PaymentFlowApi<B> {
    store: B,
}

impl<B> Debug for PaymentFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PaymentFlowApi")
    }
}

impl<B> PaymentFlowApi<B>
where B: PaymentStore
{
    pub fn new(store: B) -> Self {
        Self { store }
    }

    /// Record a brand-new payment. The store assigns the id and the `Pending` status.
    pub async fn new_payment(&self, payment: NewPayment) -> Result<PaymentRecord, PaymentStoreError> {
        let record = self.store.create_payment(payment).await?;
        debug!("🪙️ Payment [{}] created for plan '{}' ({} {})", record.id, record.plan, record.exact_amount, record.currency);
        Ok(record)
    }

    pub async fn fetch_payment(&self, id: &PaymentId) -> Result<Option<PaymentRecord>, PaymentStoreError> {
        self.store.fetch_payment(id).await
    }

    /// The current status of a payment, or `None` for an id the store has never seen.
    pub async fn payment_status(&self, id: &PaymentId) -> Result<Option<PaymentStatus>, PaymentStoreError> {
        Ok(self.store.fetch_payment(id).await?.map(|record| record.status))
    }

    pub async fn fetch_all_payments(&self) -> Result<Vec<PaymentRecord>, PaymentStoreError> {
        self.store.fetch_all_payments().await
    }

    /// Try to move a payment out of `Pending`. This is idempotent against records that have already been
    /// resolved; see [`TransitionResult`].
    pub async fn transition(
        &self,
        id: &PaymentId,
        new_status: PaymentStatus,
    ) -> Result<TransitionResult, PaymentStoreError> {
        let result = self.store.transition_payment(id, new_status).await?;
        match &result {
            TransitionResult::Applied(record) => info!("🪙️ Payment [{}] is now {}", record.id, record.status),
            TransitionResult::NotPending(current) => {
                debug!("🪙️ Ignoring {new_status} for payment [{id}]: already {current}")
            },
            TransitionResult::NotFound => debug!("🪙️ Ignoring {new_status} for unknown payment [{id}]"),
        }
        Ok(result)
    }
}
