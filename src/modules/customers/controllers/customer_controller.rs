use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::MySqlPool;

use crate::core::{ApiResponse, Result};
use crate::modules::customers::{models::CreateCustomerRequest, services::CustomerService};

#[derive(Debug, Default, Deserialize)]
pub struct ListCustomersQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// POST /customers
pub async fn create_customer(
    request: web::Json<CreateCustomerRequest>,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse> {
    let service = CustomerService::new(pool.get_ref().clone());
    let customer = service.create_customer(request.into_inner()).await?;

    Ok(ApiResponse::created(customer))
}

/// GET /customers
pub async fn list_customers(
    query: web::Query<ListCustomersQuery>,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse> {
    let service = CustomerService::new(pool.get_ref().clone());
    let customers = service.list_customers(query.limit, query.offset).await?;

    Ok(ApiResponse::ok(customers))
}

/// GET /customers/{customer_id}
pub async fn get_customer(
    customer_id: web::Path<String>,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse> {
    let service = CustomerService::new(pool.get_ref().clone());
    let customer = service.get_customer(&customer_id).await?;

    Ok(ApiResponse::ok(customer))
}

/// DELETE /customers/{customer_id}
///
/// 409 while the customer still owes anything.
pub async fn delete_customer(
    customer_id: web::Path<String>,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse> {
    let service = CustomerService::new(pool.get_ref().clone());
    service.delete_customer(&customer_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
