use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::MySqlPool;

use crate::core::{ApiResponse, PaymentStatus, Result};
use crate::modules::customers::{models::CreateInvoiceRequest, services::BillingService};

#[derive(Debug, Default, Deserialize)]
pub struct ListInvoicesQuery {
    pub status: Option<String>,
}

/// POST /customers/{customer_id}/invoices
pub async fn create_invoice(
    customer_id: web::Path<String>,
    request: web::Json<CreateInvoiceRequest>,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse> {
    let service = BillingService::new(pool.get_ref().clone());
    let invoice = service
        .create_invoice(&customer_id, request.into_inner())
        .await?;

    Ok(ApiResponse::created(invoice))
}

/// GET /customers/{customer_id}/invoices?status=
pub async fn list_invoices(
    customer_id: web::Path<String>,
    query: web::Query<ListInvoicesQuery>,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse> {
    let status = PaymentStatus::parse_filter(query.status.as_deref())?;

    let service = BillingService::new(pool.get_ref().clone());
    let invoices = service.list_invoices(&customer_id, status).await?;

    Ok(ApiResponse::ok(invoices))
}

/// GET /invoices/{invoice_id}
pub async fn get_invoice(
    invoice_id: web::Path<String>,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse> {
    let service = BillingService::new(pool.get_ref().clone());
    let invoice = service.get_invoice(&invoice_id).await?;

    Ok(ApiResponse::ok(invoice))
}
