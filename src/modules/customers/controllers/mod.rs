pub mod customer_controller;
pub mod invoice_controller;

use actix_web::web;

/// Configure customer and billing routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/customers")
            .route(web::post().to(customer_controller::create_customer))
            .route(web::get().to(customer_controller::list_customers)),
    )
    .service(
        web::resource("/customers/{customer_id}")
            .route(web::get().to(customer_controller::get_customer))
            .route(web::delete().to(customer_controller::delete_customer)),
    )
    .service(
        web::resource("/customers/{customer_id}/invoices")
            .route(web::post().to(invoice_controller::create_invoice))
            .route(web::get().to(invoice_controller::list_invoices)),
    )
    .service(
        web::resource("/invoices/{invoice_id}").route(web::get().to(invoice_controller::get_invoice)),
    );
}
