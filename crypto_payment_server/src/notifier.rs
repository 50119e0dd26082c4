use crypto_payment_engine::{
    db_types::{PaymentId, PaymentRecord, PaymentStatus},
    Conversion,
};
use log::*;
use telegram_tools::TelegramApi;

/// Formats payment events into operator-readable Telegram messages and delivers them on a best-effort basis:
/// a failed send is logged and otherwise dropped. No caller's success path depends on delivery.
#[derive(Clone)]
pub struct PaymentNotifier {
    telegram: TelegramApi,
}

impl PaymentNotifier {
    pub fn new(telegram: TelegramApi) -> Self {
        Self { telegram }
    }

    /// Alert the operator to a freshly created payment, quoting the two commands they can reply with.
    pub async fn new_payment_alert(&self, record: &PaymentRecord, conversion: &Conversion) {
        let text = format!(
            "🔔 *NEW PAYMENT REQUEST*\n\n\
             📦 *Plan:* {plan}\n\
             💰 *Price:* ${price}\n\
             🪙 *Crypto:* {currency}\n\
             🔢 *Amount:* {amount}\n\
             📊 *Rate:* ${rate} USD ({source})\n\
             🆔 *ID:* `{id}`\n\
             ⏰ *Time:* {time}\n\n\
             _Reply with:_\n\
             ✅ `/approve {id}`\n\
             ❌ `/reject {id}`",
            plan = record.plan,
            price = record.price_usd,
            currency = record.currency.to_uppercase(),
            amount = record.exact_amount,
            rate = conversion.rate,
            source = conversion.source,
            id = record.id,
            time = record.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
        );
        self.send(&text, true).await;
    }

    /// Confirm an applied (or manually re-requested) transition back to the operator chat.
    pub async fn confirmation(&self, status: PaymentStatus, id: &PaymentId) {
        match status {
            PaymentStatus::Approved => self.approval_confirmation(id).await,
            PaymentStatus::Rejected => self.rejection_confirmation(id).await,
            PaymentStatus::Pending => {},
        }
    }

    pub async fn approval_confirmation(&self, id: &PaymentId) {
        self.send(&format!("✅ Payment {id} APPROVED! The customer can now download."), false).await;
    }

    pub async fn rejection_confirmation(&self, id: &PaymentId) {
        self.send(&format!("❌ Payment {id} REJECTED!"), false).await;
    }

    async fn send(&self, text: &str, markdown: bool) {
        if let Err(e) = self.telegram.send_message(text, markdown).await {
            error!("🔔️ Could not deliver an operator notification. {e}");
        }
    }
}
