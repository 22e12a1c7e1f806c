pub mod customers;
pub mod health;
pub mod payments;
pub mod vendors;

use actix_web::web;

/// Registers every business route; mounted under `/api`
///
/// Payment routes go first: `/customers/payments` must win over
/// `/customers/{customer_id}`.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.configure(payments::controllers::configure)
        .configure(vendors::controllers::configure)
        .configure(customers::controllers::configure);
}
