use thiserror::Error;

use crate::db_types::{NewPayment, PaymentId, PaymentRecord, PaymentStatus};

#[derive(Debug, Clone, Error)]
pub enum PaymentStoreError {
    #[error("Storage backend error: {0}")]
    BackendError(String),
}

/// The outcome of a status transition request. A transition that cannot be applied is a reported no-op, never an
/// error: redundant approve/reject commands are expected in normal operation (the operator and the manual
/// endpoints can race) and must not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionResult {
    /// The record was pending and has been moved to the requested status.
    Applied(PaymentRecord),
    /// The record has already left `Pending`; its current (terminal) status is reported.
    NotPending(PaymentStatus),
    /// No record with the given id exists. The store does not create one.
    NotFound,
}

impl TransitionResult {
    pub fn is_applied(&self) -> bool {
        matches!(self, TransitionResult::Applied(_))
    }
}

/// The behaviour a storage backend must expose to hold payment records.
///
/// Records are append-only apart from the single status transition: they are never deleted, and every id maps to
/// at most one record.
#[allow(async_fn_in_trait)]
pub trait PaymentStore {
    /// Generate a fresh unique id, insert a `Pending` record for `payment` and return it.
    async fn create_payment(&self, payment: NewPayment) -> Result<PaymentRecord, PaymentStoreError>;

    /// Fetch a single record by id.
    async fn fetch_payment(&self, id: &PaymentId) -> Result<Option<PaymentRecord>, PaymentStoreError>;

    /// Fetch every record, in insertion order.
    async fn fetch_all_payments(&self) -> Result<Vec<PaymentRecord>, PaymentStoreError>;

    /// Move the record to `new_status` iff it is currently `Pending`. See [`TransitionResult`] for the no-op
    /// outcomes.
    async fn transition_payment(
        &self,
        id: &PaymentId,
        new_status: PaymentStatus,
    ) -> Result<TransitionResult, PaymentStoreError>;
}
