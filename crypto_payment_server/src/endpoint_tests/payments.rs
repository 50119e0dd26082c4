use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::Utc;
use crypto_payment_engine::{
    db_types::{PaymentId, PaymentRecord, PaymentStatus},
    traits::{PriceFeedError, TransitionResult},
    PaymentFlowApi,
    PriceOracle,
};
use serde_json::{json, Value};

use super::{
    helpers::{get_request, post_request, test_record, unreachable_notifier},
    mocks::{MockFeed, MockStore},
};
use crate::routes::{ApprovePaymentRoute, ListPaymentsRoute, NewPaymentRoute, PaymentStatusRoute};

//----------------------------------------   Status lookup   --------------------------------------------------

#[actix_web::test]
async fn status_of_an_unknown_id_is_reported_not_errored() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/api/status/PAY-DOESNOTEX", configure_unknown_status).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"status":"unknown"}"#);
}

fn configure_unknown_status(cfg: &mut ServiceConfig) {
    let mut store = MockStore::new();
    store.expect_fetch_payment().returning(|_| Ok(None));
    cfg.app_data(web::Data::new(PaymentFlowApi::new(store))).service(PaymentStatusRoute::<MockStore>::new());
}

#[actix_web::test]
async fn status_of_a_pending_payment() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/api/status/PAY-TEST0001", configure_pending_status).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"status":"pending"}"#);
}

fn configure_pending_status(cfg: &mut ServiceConfig) {
    let mut store = MockStore::new();
    store.expect_fetch_payment().returning(|_| Ok(Some(test_record("PAY-TEST0001", PaymentStatus::Pending))));
    cfg.app_data(web::Data::new(PaymentFlowApi::new(store))).service(PaymentStatusRoute::<MockStore>::new());
}

//----------------------------------------  Payment creation  -------------------------------------------------

#[actix_web::test]
async fn creation_rejects_missing_fields() {
    let _ = env_logger::try_init().ok();
    let (status, body) = post_request("/api/notify", json!({"plan": "Pro", "price": 100}), configure_create).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Missing fields");
}

#[actix_web::test]
async fn creation_prices_via_the_fallback_when_the_feed_is_down() {
    let _ = env_logger::try_init().ok();
    let request = json!({"plan": "Pro", "price": 100, "crypto": "btc", "amount": 0});
    let (status, body) = post_request("/api/notify", request, configure_create).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["paymentId"], "PAY-TEST0001");
    assert_eq!(body["exactAmount"], "0.00100000");
    assert_eq!(body["currencySymbol"], "BTC");
}

#[actix_web::test]
async fn creation_rejects_an_unsupported_currency() {
    let _ = env_logger::try_init().ok();
    let request = json!({"plan": "Pro", "price": 100, "crypto": "wen", "amount": 0});
    let (status, body) = post_request("/api/notify", request, configure_create).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["success"], false);
}

// Feed down, store echoing the priced payment back as a pending record.
fn configure_create(cfg: &mut ServiceConfig) {
    let mut store = MockStore::new();
    store.expect_create_payment().returning(|payment| {
        Ok(PaymentRecord {
            id: PaymentId("PAY-TEST0001".to_string()),
            status: PaymentStatus::Pending,
            plan: payment.plan,
            price_usd: payment.price_usd,
            currency: payment.currency,
            exact_amount: payment.exact_amount,
            created_at: Utc::now(),
        })
    });
    let mut feed = MockFeed::new();
    feed.expect_usd_price().returning(|_| Err(PriceFeedError::RequestFailed("connection refused".to_string())));
    cfg.app_data(web::Data::new(PaymentFlowApi::new(store)))
        .app_data(web::Data::new(PriceOracle::new(feed)))
        .app_data(web::Data::new(unreachable_notifier()))
        .service(NewPaymentRoute::<MockStore, MockFeed>::new());
}

//----------------------------------------  Manual overrides  -------------------------------------------------

#[actix_web::test]
async fn manual_approval_of_an_unknown_id_fails_softly() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/api/approve/PAY-DOESNOTEX", configure_approve_unknown).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Payment PAY-DOESNOTEX not found");
}

fn configure_approve_unknown(cfg: &mut ServiceConfig) {
    let mut store = MockStore::new();
    store.expect_transition_payment().returning(|_, _| Ok(TransitionResult::NotFound));
    cfg.app_data(web::Data::new(PaymentFlowApi::new(store)))
        .app_data(web::Data::new(unreachable_notifier()))
        .service(ApprovePaymentRoute::<MockStore>::new());
}

#[actix_web::test]
async fn repeated_manual_approvals_all_report_success() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/api/approve/PAY-TEST0001", configure_approve_repeatedly).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["success"], true);
    // Second call: the record has already left pending, but the endpoint still reports success.
    let (status, body) = get_request("/api/approve/PAY-TEST0001", configure_approve_repeatedly).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Payment PAY-TEST0001 approved");
}

fn configure_approve_repeatedly(cfg: &mut ServiceConfig) {
    let mut store = MockStore::new();
    let mut first = true;
    store.expect_transition_payment().returning(move |_, _| {
        if first {
            first = false;
            Ok(TransitionResult::Applied(test_record("PAY-TEST0001", PaymentStatus::Approved)))
        } else {
            Ok(TransitionResult::NotPending(PaymentStatus::Approved))
        }
    });
    cfg.app_data(web::Data::new(PaymentFlowApi::new(store)))
        .app_data(web::Data::new(unreachable_notifier()))
        .service(ApprovePaymentRoute::<MockStore>::new());
}

//----------------------------------------   Admin listing   --------------------------------------------------

#[actix_web::test]
async fn listing_dumps_the_whole_store() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/api/payments", configure_listing).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["PAY-TEST0001"]["status"], "pending");
    assert_eq!(body["PAY-TEST0002"]["status"], "approved");
    assert_eq!(body["PAY-TEST0001"]["exactAmount"], "0.00100000");
}

fn configure_listing(cfg: &mut ServiceConfig) {
    let mut store = MockStore::new();
    store.expect_fetch_all_payments().returning(|| {
        Ok(vec![test_record("PAY-TEST0001", PaymentStatus::Pending), test_record("PAY-TEST0002", PaymentStatus::Approved)])
    });
    cfg.app_data(web::Data::new(PaymentFlowApi::new(store))).service(ListPaymentsRoute::<MockStore>::new());
}
