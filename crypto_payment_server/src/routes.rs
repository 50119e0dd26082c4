//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! Handlers are generic over the storage backend ([`PaymentStore`]) and, where pricing is involved, the live
//! price source ([`PriceFeed`]), so the endpoint tests can drive them with mocks. Since actix-web cannot handle
//! generics in handlers directly, each route is registered through the `route!` macro below.

use actix_web::{get, web, HttpResponse, Responder};
use crypto_payment_engine::{
    db_types::{NewPayment, PaymentId, PaymentStatus},
    traits::{PaymentStore, PriceFeed, TransitionResult},
    PaymentFlowApi,
    PriceOracle,
};
use log::*;

use crate::{
    data_objects::{ErrorResponse, JsonResponse, NewPaymentParams, NewPaymentResult, PricePreview, StatusResult},
    errors::ServerError,
    notifier::PaymentNotifier,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

// -------------------------------------------  New payment  ---------------------------------------------------
route!(new_payment => Post "/api/notify" impl PaymentStore, PriceFeed);
/// Route handler for the payment creation endpoint
///
/// The client posts `{plan, price, crypto, amount}`. The server prices the request through the oracle, records a
/// `pending` payment and alerts the operator over Telegram. The alert is awaited (so the operator sees payments
/// in creation order) but its outcome never affects the response: a failed alert is logged and the creation still
/// succeeds.
pub async fn new_payment<B: PaymentStore, F: PriceFeed>(
    body: web::Json<NewPaymentParams>,
    flow: web::Data<PaymentFlowApi<B>>,
    oracle: web::Data<PriceOracle<F>>,
    notifier: web::Data<PaymentNotifier>,
) -> Result<HttpResponse, ServerError> {
    let params = body.into_inner();
    let (Some(plan), Some(price), Some(crypto), Some(_amount)) =
        (params.plan, params.price, params.crypto, params.amount)
    else {
        debug!("💻️ Rejecting payment request with missing fields");
        return Ok(HttpResponse::BadRequest().json(ErrorResponse::new("Missing fields")));
    };
    if plan.trim().is_empty() || crypto.trim().is_empty() {
        debug!("💻️ Rejecting payment request with empty fields");
        return Ok(HttpResponse::BadRequest().json(ErrorResponse::new("Missing fields")));
    }
    let conversion = match oracle.convert(&crypto, price).await {
        Ok(conversion) => conversion,
        Err(e) => {
            debug!("💻️ Rejecting payment request. {e}");
            return Ok(HttpResponse::BadRequest().json(ErrorResponse::new(e)));
        },
    };
    let currency = crypto.to_lowercase();
    let payment =
        NewPayment { plan, price_usd: price, currency: currency.clone(), exact_amount: conversion.amount.clone() };
    let record = flow.new_payment(payment).await?;
    info!("💻️ New payment request [{}]", record.id);
    notifier.new_payment_alert(&record, &conversion).await;
    Ok(HttpResponse::Ok().json(NewPaymentResult {
        success: true,
        payment_id: record.id,
        exact_amount: conversion.amount,
        currency_symbol: currency.to_uppercase(),
    }))
}

// ------------------------------------------  Price preview  --------------------------------------------------
route!(price_preview => Get "/api/price/{crypto}/{usd}" impl PriceFeed);
/// Route handler for the price preview endpoint
///
/// Converts a USD amount into the given crypto without touching the store. An unrecoverable pricing failure
/// (unknown currency, unparseable amount) comes back success-shaped with `success: false`, not as an HTTP error.
pub async fn price_preview<F: PriceFeed>(
    path: web::Path<(String, String)>,
    oracle: web::Data<PriceOracle<F>>,
) -> Result<HttpResponse, ServerError> {
    let (crypto, usd) = path.into_inner();
    trace!("💻️ Price preview: {usd} USD in {crypto}");
    let Ok(usd) = usd.parse::<f64>() else {
        return Ok(HttpResponse::Ok().json(ErrorResponse::new(format!("Invalid USD amount: {usd}"))));
    };
    match oracle.convert(&crypto, usd).await {
        Ok(conversion) => Ok(HttpResponse::Ok().json(PricePreview {
            success: true,
            exact_amount: conversion.amount,
            rate: conversion.rate,
            currency: crypto.to_lowercase(),
        })),
        Err(e) => {
            debug!("💻️ Could not preview a price. {e}");
            Ok(HttpResponse::Ok().json(ErrorResponse::new(e)))
        },
    }
}

// ------------------------------------------  Status lookup  --------------------------------------------------
route!(payment_status => Get "/api/status/{id}" impl PaymentStore);
/// Route handler for the status lookup endpoint
///
/// The web client polls this while the operator decides. An id the store has never seen reports
/// `{"status": "unknown"}` rather than a 404, so the polling client needs no error handling.
pub async fn payment_status<B: PaymentStore>(
    path: web::Path<PaymentId>,
    flow: web::Data<PaymentFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    trace!("💻️ Status lookup for [{id}]");
    let status = flow.payment_status(&id).await?;
    let result = status.map(StatusResult::from).unwrap_or_else(StatusResult::unknown);
    Ok(HttpResponse::Ok().json(result))
}

// -------------------------------------------  List payments  -------------------------------------------------
route!(list_payments => Get "/api/payments" impl PaymentStore);
/// Route handler for the admin listing endpoint. Returns the full id → record mapping.
pub async fn list_payments<B: PaymentStore>(
    flow: web::Data<PaymentFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET all payments");
    let payments = flow.fetch_all_payments().await?;
    let mut dump = serde_json::Map::new();
    for record in payments {
        let value = serde_json::to_value(&record).map_err(|e| ServerError::Unspecified(e.to_string()))?;
        dump.insert(record.id.to_string(), value);
    }
    Ok(HttpResponse::Ok().json(serde_json::Value::Object(dump)))
}

// -----------------------------------------  Manual overrides  ------------------------------------------------
route!(approve_payment => Get "/api/approve/{id}" impl PaymentStore);
/// Route handler for the manual approve endpoint, which bypasses the Telegram channel. See [`manual_transition`].
pub async fn approve_payment<B: PaymentStore>(
    path: web::Path<PaymentId>,
    flow: web::Data<PaymentFlowApi<B>>,
    notifier: web::Data<PaymentNotifier>,
) -> Result<HttpResponse, ServerError> {
    manual_transition(path.into_inner(), PaymentStatus::Approved, flow.as_ref(), notifier.as_ref()).await
}

route!(reject_payment => Get "/api/reject/{id}" impl PaymentStore);
/// Route handler for the manual reject endpoint, which bypasses the Telegram channel. See [`manual_transition`].
pub async fn reject_payment<B: PaymentStore>(
    path: web::Path<PaymentId>,
    flow: web::Data<PaymentFlowApi<B>>,
    notifier: web::Data<PaymentNotifier>,
) -> Result<HttpResponse, ServerError> {
    manual_transition(path.into_inner(), PaymentStatus::Rejected, flow.as_ref(), notifier.as_ref()).await
}

/// Shared path for the manual endpoints. The state change goes through the same guarded transition the poller
/// uses, so a record that has already been resolved keeps its terminal status; the endpoint still reports success
/// and still sends the confirmation message for any known id, resolved or not. Only an unknown id is an error.
async fn manual_transition<B: PaymentStore>(
    id: PaymentId,
    new_status: PaymentStatus,
    flow: &PaymentFlowApi<B>,
    notifier: &PaymentNotifier,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ Manual {new_status} requested for [{id}]");
    match flow.transition(&id, new_status).await? {
        TransitionResult::NotFound => {
            Ok(HttpResponse::Ok().json(ErrorResponse::new(format!("Payment {id} not found"))))
        },
        TransitionResult::Applied(_) | TransitionResult::NotPending(_) => {
            notifier.confirmation(new_status, &id).await;
            Ok(HttpResponse::Ok().json(JsonResponse::success(format!("Payment {id} {new_status}"))))
        },
    }
}
