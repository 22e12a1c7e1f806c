pub mod receipt_controller;
pub mod vendor_controller;

use actix_web::web;

/// Configure vendor and receiving routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/vendors")
            .route(web::post().to(vendor_controller::create_vendor))
            .route(web::get().to(vendor_controller::list_vendors)),
    )
    .service(
        web::resource("/vendors/{vendor_id}")
            .route(web::get().to(vendor_controller::get_vendor))
            .route(web::delete().to(vendor_controller::delete_vendor)),
    )
    .service(
        web::resource("/vendors/{vendor_id}/receipts")
            .route(web::post().to(receipt_controller::create_receipt))
            .route(web::get().to(receipt_controller::list_receipts)),
    )
    .service(
        web::resource("/receipts/{receipt_id}").route(web::get().to(receipt_controller::get_receipt)),
    );
}
