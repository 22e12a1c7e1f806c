use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::MySqlPool;

use crate::config::LedgerConfig;
use crate::core::{ApiResponse, Result};
use crate::modules::payments::{
    models::{CollectCustomerPaymentRequest, PayeeKind, PaymentOutcome, RecordVendorPaymentRequest},
    services::{BalanceService, PaymentService},
};

/// Paging for payment history
#[derive(Debug, Default, Deserialize)]
pub struct ListPaymentsQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// POST /vendors/{vendor_id}/payments
///
/// Pays down a vendor's payable. Without `allocations` the amount goes to
/// the oldest open receipts first.
///
/// # Returns
/// - 201: Payment recorded, body carries the allocation breakdown
/// - 200: Transaction ID already recorded, body is the earlier payment
/// - 400: Invalid amount, method, transaction ID, or overpayment
/// - 404: Vendor (or a directed receipt) not found
pub async fn record_vendor_payment(
    vendor_id: web::Path<String>,
    request: web::Json<RecordVendorPaymentRequest>,
    pool: web::Data<MySqlPool>,
    limits: web::Data<LedgerConfig>,
) -> Result<HttpResponse> {
    let command = request.into_inner().into_command(limits.get_ref())?;

    let service = PaymentService::new(pool.get_ref().clone());
    let outcome = service.record_vendor_payment(&vendor_id, command).await?;

    Ok(payment_response(outcome))
}

/// POST /customers/payments
///
/// Collects a customer payment against open invoices, oldest first unless
/// `allocations` directs it.
pub async fn collect_customer_payment(
    request: web::Json<CollectCustomerPaymentRequest>,
    pool: web::Data<MySqlPool>,
    limits: web::Data<LedgerConfig>,
) -> Result<HttpResponse> {
    let (customer_id, command) = request.into_inner().into_command(limits.get_ref())?;

    let service = PaymentService::new(pool.get_ref().clone());
    let outcome = service.collect_customer_payment(&customer_id, command).await?;

    Ok(payment_response(outcome))
}

/// 201 for a new payment, 200 when a retry matched an earlier one
fn payment_response(outcome: PaymentOutcome) -> HttpResponse {
    match outcome {
        PaymentOutcome::Recorded(record) => ApiResponse::created(record),
        PaymentOutcome::Replayed(record) => ApiResponse::ok(record),
    }
}

/// GET /vendors/{vendor_id}/payments
pub async fn list_vendor_payments(
    vendor_id: web::Path<String>,
    query: web::Query<ListPaymentsQuery>,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse> {
    list_payments(PayeeKind::Vendor, &vendor_id, &query, pool).await
}

/// GET /customers/{customer_id}/payments
pub async fn list_customer_payments(
    customer_id: web::Path<String>,
    query: web::Query<ListPaymentsQuery>,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse> {
    list_payments(PayeeKind::Customer, &customer_id, &query, pool).await
}

async fn list_payments(
    kind: PayeeKind,
    payee_id: &str,
    query: &ListPaymentsQuery,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse> {
    let service = PaymentService::new(pool.get_ref().clone());
    let payments = service
        .list_payments(kind, payee_id, query.limit, query.offset)
        .await?;

    Ok(ApiResponse::ok(payments))
}

/// GET /payments/{payment_id}
pub async fn get_payment(
    payment_id: web::Path<String>,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse> {
    let service = PaymentService::new(pool.get_ref().clone());
    let payment = service.get_payment(&payment_id).await?;

    Ok(ApiResponse::ok(payment))
}

/// GET /vendors/{vendor_id}/balance
pub async fn vendor_balance(
    vendor_id: web::Path<String>,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse> {
    let service = BalanceService::new(pool.get_ref().clone());
    Ok(ApiResponse::ok(
        service.balance_report(PayeeKind::Vendor, &vendor_id).await?,
    ))
}

/// POST /vendors/{vendor_id}/balance/reconcile
pub async fn reconcile_vendor_balance(
    vendor_id: web::Path<String>,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse> {
    let service = BalanceService::new(pool.get_ref().clone());
    Ok(ApiResponse::ok(
        service.reconcile(PayeeKind::Vendor, &vendor_id).await?,
    ))
}

/// GET /customers/{customer_id}/balance
pub async fn customer_balance(
    customer_id: web::Path<String>,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse> {
    let service = BalanceService::new(pool.get_ref().clone());
    Ok(ApiResponse::ok(
        service
            .balance_report(PayeeKind::Customer, &customer_id)
            .await?,
    ))
}

/// POST /customers/{customer_id}/balance/reconcile
pub async fn reconcile_customer_balance(
    customer_id: web::Path<String>,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse> {
    let service = BalanceService::new(pool.get_ref().clone());
    Ok(ApiResponse::ok(
        service.reconcile(PayeeKind::Customer, &customer_id).await?,
    ))
}

/// Configure payment and balance routes
///
/// Must be registered before the customer routes so that
/// `/customers/payments` is not taken for a customer id.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/customers/payments").route(web::post().to(collect_customer_payment)),
    )
    .service(
        web::resource("/customers/{customer_id}/payments")
            .route(web::get().to(list_customer_payments)),
    )
    .service(
        web::resource("/customers/{customer_id}/balance").route(web::get().to(customer_balance)),
    )
    .service(
        web::resource("/customers/{customer_id}/balance/reconcile")
            .route(web::post().to(reconcile_customer_balance)),
    )
    .service(
        web::resource("/vendors/{vendor_id}/payments")
            .route(web::post().to(record_vendor_payment))
            .route(web::get().to(list_vendor_payments)),
    )
    .service(web::resource("/vendors/{vendor_id}/balance").route(web::get().to(vendor_balance)))
    .service(
        web::resource("/vendors/{vendor_id}/balance/reconcile")
            .route(web::post().to(reconcile_vendor_balance)),
    )
    .service(web::resource("/payments/{payment_id}").route(web::get().to(get_payment)));
}
