use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::MySqlPool;

use crate::core::{ApiResponse, PaymentStatus, Result};
use crate::modules::vendors::{models::CreateReceiptRequest, services::ReceiptService};

#[derive(Debug, Default, Deserialize)]
pub struct ListReceiptsQuery {
    pub status: Option<String>,
}

/// POST /vendors/{vendor_id}/receipts
///
/// Records received goods and adds the receipt total to the vendor's payable.
pub async fn create_receipt(
    vendor_id: web::Path<String>,
    request: web::Json<CreateReceiptRequest>,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse> {
    let service = ReceiptService::new(pool.get_ref().clone());
    let receipt = service
        .create_receipt(&vendor_id, request.into_inner())
        .await?;

    Ok(ApiResponse::created(receipt))
}

/// GET /vendors/{vendor_id}/receipts?status=
pub async fn list_receipts(
    vendor_id: web::Path<String>,
    query: web::Query<ListReceiptsQuery>,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse> {
    let status = PaymentStatus::parse_filter(query.status.as_deref())?;

    let service = ReceiptService::new(pool.get_ref().clone());
    let receipts = service.list_receipts(&vendor_id, status).await?;

    Ok(ApiResponse::ok(receipts))
}

/// GET /receipts/{receipt_id}
pub async fn get_receipt(
    receipt_id: web::Path<String>,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse> {
    let service = ReceiptService::new(pool.get_ref().clone());
    let receipt = service.get_receipt(&receipt_id).await?;

    Ok(ApiResponse::ok(receipt))
}
