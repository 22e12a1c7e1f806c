use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::MySqlPool;

use crate::core::{ApiResponse, Result};
use crate::modules::vendors::{models::CreateVendorRequest, services::VendorService};

#[derive(Debug, Default, Deserialize)]
pub struct ListVendorsQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// POST /vendors
pub async fn create_vendor(
    request: web::Json<CreateVendorRequest>,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse> {
    let service = VendorService::new(pool.get_ref().clone());
    let vendor = service.create_vendor(request.into_inner()).await?;

    Ok(ApiResponse::created(vendor))
}

/// GET /vendors
pub async fn list_vendors(
    query: web::Query<ListVendorsQuery>,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse> {
    let service = VendorService::new(pool.get_ref().clone());
    let vendors = service.list_vendors(query.limit, query.offset).await?;

    Ok(ApiResponse::ok(vendors))
}

/// GET /vendors/{vendor_id}
pub async fn get_vendor(
    vendor_id: web::Path<String>,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse> {
    let service = VendorService::new(pool.get_ref().clone());
    let vendor = service.get_vendor(&vendor_id).await?;

    Ok(ApiResponse::ok(vendor))
}

/// DELETE /vendors/{vendor_id}
///
/// # Returns
/// - 204: Vendor, receipts and payment history removed
/// - 404: Vendor not found
/// - 409: Vendor still has an outstanding payable
pub async fn delete_vendor(
    vendor_id: web::Path<String>,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse> {
    let service = VendorService::new(pool.get_ref().clone());
    service.delete_vendor(&vendor_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
