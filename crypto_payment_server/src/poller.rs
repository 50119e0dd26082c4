//! The operator-inbox poller.
//!
//! A single long-running task owns the inbox cursor and repeatedly long-polls the Telegram `getUpdates` endpoint
//! for the operator's `/approve` and `/reject` replies. The loop never terminates on error: any fetch failure is
//! logged, followed by a short pause and a retry. The only way out is the injected shutdown signal.

use std::time::Duration;

use crypto_payment_engine::{
    db_types::{PaymentId, PaymentStatus},
    traits::{PaymentStore, TransitionResult},
    MemoryStore,
    PaymentFlowApi,
};
use log::*;
use telegram_tools::{TelegramApi, Update};
use tokio::{sync::watch, task::JoinHandle};

use crate::notifier::PaymentNotifier;

/// Server-side bound on the `getUpdates` long poll, to avoid busy-waking.
const LONG_POLL_SECS: u64 = 30;
/// Pause after a failed fetch before retrying.
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Parse an operator message into a command. The leading token must be exactly `/approve` or `/reject`
/// (case-sensitive), followed by the payment id. Anything else, including a command with no id, is ignored.
pub fn parse_command(text: &str) -> Option<(PaymentStatus, PaymentId)> {
    let mut tokens = text.split_whitespace();
    let status = match tokens.next()? {
        "/approve" => PaymentStatus::Approved,
        "/reject" => PaymentStatus::Rejected,
        _ => return None,
    };
    let id = tokens.next()?;
    Some((status, PaymentId(id.to_string())))
}

/// The stateful poller task. The cursor is the highest inbox sequence number consumed so far; it advances for
/// every update in a batch, whether or not the update parsed as a command, so a malformed message is never
/// re-fetched.
pub struct UpdatePoller<B> {
    cursor: i64,
    telegram: TelegramApi,
    flow: PaymentFlowApi<B>,
    notifier: PaymentNotifier,
}

impl<B> UpdatePoller<B>
where B: PaymentStore
{
    pub fn new(telegram: TelegramApi, flow: PaymentFlowApi<B>, notifier: PaymentNotifier) -> Self {
        Self { cursor: 0, telegram, flow, notifier }
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Run the polling loop until `shutdown` fires (or its sender is dropped).
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        info!("🤖️ Operator inbox poller started");
        loop {
            let fetch = self.telegram.get_updates(self.cursor + 1, LONG_POLL_SECS);
            let fetched = tokio::select! {
                biased;
                _ = shutdown.changed() => {
                    info!("🤖️ Operator inbox poller shutting down");
                    return;
                },
                fetched = fetch => fetched,
            };
            match fetched {
                Ok(updates) => {
                    let applied = self.process_batch(&updates).await;
                    for (id, status) in applied {
                        self.notifier.confirmation(status, &id).await;
                    }
                },
                Err(e) => {
                    error!("🤖️ Could not fetch operator inbox updates. {e}");
                    tokio::time::sleep(RETRY_DELAY).await;
                },
            }
        }
    }

    /// Consume one batch of updates in order, advancing the cursor past every one of them and applying any
    /// recognized commands to the store. Returns the transitions that actually applied, so the caller can send
    /// confirmations for those and only those.
    pub async fn process_batch(&mut self, updates: &[Update]) -> Vec<(PaymentId, PaymentStatus)> {
        let mut applied = Vec::new();
        for update in updates {
            // Monotonic: a batch should arrive in ascending order, but never let the cursor move backwards.
            self.cursor = self.cursor.max(update.update_id);
            let Some(text) = update.text() else { continue };
            debug!("🤖️ Operator message: {}", text.trim());
            let Some((status, id)) = parse_command(text.trim()) else { continue };
            match self.flow.transition(&id, status).await {
                Ok(TransitionResult::Applied(record)) => {
                    info!("🤖️ Payment [{}] {status} by operator", record.id);
                    applied.push((id, status));
                },
                // Resolved or unknown ids are expected (duplicate replies, typos); nothing further to do.
                Ok(TransitionResult::NotPending(_)) | Ok(TransitionResult::NotFound) => {},
                Err(e) => error!("🤖️ Could not apply operator command for [{id}]. {e}"),
            }
        }
        applied
    }
}

/// Starts the inbox poller. Do not await the returned JoinHandle directly: it runs until `shutdown` fires.
pub fn start_update_poller(
    telegram: TelegramApi,
    flow: PaymentFlowApi<MemoryStore>,
    notifier: PaymentNotifier,
    shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    let poller = UpdatePoller::new(telegram, flow, notifier);
    tokio::spawn(poller.run(shutdown))
}
