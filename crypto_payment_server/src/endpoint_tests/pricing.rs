use actix_web::{http::StatusCode, web, web::ServiceConfig};
use crypto_payment_engine::{traits::PriceFeedError, PriceOracle};
use serde_json::Value;

use super::{helpers::get_request, mocks::MockFeed};
use crate::routes::PricePreviewRoute;

#[actix_web::test]
async fn preview_uses_the_live_quote() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/api/price/btc/100", configure_live_feed).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["rate"], 50_000.0);
    assert_eq!(body["exactAmount"], "0.00200000");
    assert_eq!(body["currency"], "btc");
}

fn configure_live_feed(cfg: &mut ServiceConfig) {
    let mut feed = MockFeed::new();
    feed.expect_usd_price().returning(|_| Ok(50_000.0));
    cfg.app_data(web::Data::new(PriceOracle::new(feed))).service(PricePreviewRoute::<MockFeed>::new());
}

#[actix_web::test]
async fn preview_falls_back_when_the_feed_is_down() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/api/price/btc/100", configure_dead_feed).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["rate"], 100_000.0);
    assert_eq!(body["exactAmount"], "0.00100000");
}

#[actix_web::test]
async fn preview_of_an_unknown_currency_fails_softly() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/api/price/wen/100", configure_dead_feed).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn preview_of_an_unparseable_amount_fails_softly() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/api/price/btc/lots", configure_dead_feed).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Invalid USD amount: lots");
}

fn configure_dead_feed(cfg: &mut ServiceConfig) {
    let mut feed = MockFeed::new();
    feed.expect_usd_price().returning(|_| Err(PriceFeedError::RequestFailed("connection refused".to_string())));
    cfg.app_data(web::Data::new(PriceOracle::new(feed))).service(PricePreviewRoute::<MockFeed>::new());
}
