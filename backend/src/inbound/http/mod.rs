//! HTTP inbound adapter exposing the storefront REST endpoints.
//!
//! Every route hangs off `/api`. Handlers translate requests into calls on
//! the driving ports held by [`state::HttpState`] and map domain errors onto
//! the JSON error envelope in [`error`].

pub mod admin;
pub mod auth;
pub mod contact;
pub mod dto;
pub mod error;
pub mod health;
pub mod orders;
pub mod products;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api` route.
///
/// Fixed product paths are registered before `/products/{id}` so they are
/// not captured as ids.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::register)
        .service(auth::login)
        .service(auth::logout)
        .service(auth::profile)
        .service(products::list_products)
        .service(products::featured_products)
        .service(products::active_categories)
        .service(products::active_subcategories)
        .service(products::get_product)
        .service(orders::place_order)
        .service(orders::my_orders)
        .service(contact::submit_contact)
        .configure(admin::configure);
}

/// JSON extractor settings: malformed bodies become validation envelopes.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(256 * 1024)
        .error_handler(validation::json_error_handler)
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(validation::query_error_handler)
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(validation::path_error_handler)
}
