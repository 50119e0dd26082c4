use actix_web::{body::MessageBody, http::StatusCode, test, test::TestRequest, web::ServiceConfig, App};
use chrono::Utc;
use cpg_common::CryptoAmount;
use crypto_payment_engine::db_types::{PaymentId, PaymentRecord, PaymentStatus};
use telegram_tools::{TelegramApi, TelegramConfig};

use crate::notifier::PaymentNotifier;

/// A notifier whose sends fail instantly instead of reaching the real Bot API. Deliveries are best-effort, so
/// the handlers under test carry on regardless.
pub fn unreachable_notifier() -> PaymentNotifier {
    let config = TelegramConfig { api_url: "http://127.0.0.1:0".to_string(), ..TelegramConfig::default() };
    let telegram = TelegramApi::new(config).expect("client construction cannot fail");
    PaymentNotifier::new(telegram)
}

pub fn test_record(id: &str, status: PaymentStatus) -> PaymentRecord {
    PaymentRecord {
        id: PaymentId(id.to_string()),
        status,
        plan: "Pro".to_string(),
        price_usd: 100.0,
        currency: "btc".to_string(),
        exact_amount: CryptoAmount::new("btc", 0.001),
        created_at: Utc::now(),
    }
}

pub async fn get_request(path: &str, configure: fn(&mut ServiceConfig)) -> (StatusCode, String) {
    let req = TestRequest::get().uri(path).to_request();
    let service = test::init_service(App::new().configure(configure)).await;
    let res = test::call_service(&service, req).await;
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    (status, body)
}

pub async fn post_request(
    path: &str,
    body: serde_json::Value,
    configure: fn(&mut ServiceConfig),
) -> (StatusCode, String) {
    let req = TestRequest::post().uri(path).set_json(&body).to_request();
    let service = test::init_service(App::new().configure(configure)).await;
    let res = test::call_service(&service, req).await;
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    (status, body)
}
