use std::time::Duration;

use actix_files::Files;
use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use crypto_payment_engine::{MemoryStore, PaymentFlowApi, PriceOracle};
use telegram_tools::TelegramApi;
use tokio::sync::watch;

use crate::{
    config::ServerConfig,
    errors::ServerError,
    integrations::CoinGeckoFeed,
    notifier::PaymentNotifier,
    poller::start_update_poller,
    routes::{
        health,
        ApprovePaymentRoute,
        ListPaymentsRoute,
        NewPaymentRoute,
        PaymentStatusRoute,
        PricePreviewRoute,
        RejectPaymentRoute,
    },
};

/// Construct the store, the Telegram client and the price feed, start the inbox poller and run the HTTP server
/// until it exits. The poller is signalled to stop once the server has come down.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let store = MemoryStore::new();
    let telegram =
        TelegramApi::new(config.telegram.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let feed = CoinGeckoFeed::new(&config.price_api_url).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let poller = start_update_poller(
        telegram.clone(),
        PaymentFlowApi::new(store.clone()),
        PaymentNotifier::new(telegram.clone()),
        shutdown_rx,
    );
    let srv = create_server_instance(config, store, telegram, feed)?;
    let result = srv.await.map_err(|e| ServerError::Unspecified(e.to_string()));
    let _ = shutdown_tx.send(true);
    let _ = poller.await;
    result
}

pub fn create_server_instance(
    config: ServerConfig,
    store: MemoryStore,
    telegram: TelegramApi,
    feed: CoinGeckoFeed,
) -> Result<Server, ServerError> {
    let static_dir = config.static_dir.clone();
    let srv = HttpServer::new(move || {
        let flow = PaymentFlowApi::new(store.clone());
        let oracle = PriceOracle::new(feed.clone());
        let notifier = PaymentNotifier::new(telegram.clone());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("cps::access_log"))
            .app_data(web::Data::new(flow))
            .app_data(web::Data::new(oracle))
            .app_data(web::Data::new(notifier))
            .service(health)
            .service(NewPaymentRoute::<MemoryStore, CoinGeckoFeed>::new())
            .service(PricePreviewRoute::<CoinGeckoFeed>::new())
            .service(PaymentStatusRoute::<MemoryStore>::new())
            .service(ListPaymentsRoute::<MemoryStore>::new())
            .service(ApprovePaymentRoute::<MemoryStore>::new())
            .service(RejectPaymentRoute::<MemoryStore>::new())
            // The static client page; registered last so the API routes take precedence.
            .service(Files::new("/", static_dir.clone()).index_file("index.html"))
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
