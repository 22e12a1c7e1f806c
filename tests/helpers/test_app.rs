// Builds the same App the binary serves, minus CORS and request logging.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error,
};
use sqlx::MySqlPool;
use storeledger::config::LedgerConfig;
use storeledger::middleware::{json_error_handler, path_error_handler, query_error_handler, RequestId};
use storeledger::modules::{configure_api, health};

pub fn test_app(
    pool: MySqlPool,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Response = ServiceResponse<impl MessageBody>,
        Config = (),
        InitError = (),
        Error = Error,
    >,
> {
    App::new()
        .wrap(RequestId)
        .app_data(web::Data::new(pool))
        .app_data(web::Data::new(LedgerConfig::default()))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .configure(health::controllers::configure)
        .service(web::scope("/api").configure(configure_api))
}
