//! Back-office handlers under `/api/admin`.
//!
//! Every handler starts with [`SessionContext::require_admin`], so anonymous
//! callers get 401 and customers get 403 before any port is touched.
//!
//! [`SessionContext::require_admin`]: crate::inbound::http::session::SessionContext::require_admin

pub mod categories;
pub mod overview;
pub mod products;
pub mod subcategories;

use actix_web::web;

/// Register every back-office route on `cfg`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(products::list_products)
        .service(products::create_product)
        .service(products::update_product)
        .service(products::delete_product)
        .service(categories::list_categories)
        .service(categories::create_category)
        .service(categories::update_category)
        .service(categories::delete_category)
        .service(subcategories::list_subcategories)
        .service(subcategories::create_subcategory)
        .service(subcategories::subcategories_of)
        .service(subcategories::update_subcategory)
        .service(subcategories::delete_subcategory)
        .service(overview::list_orders)
        .service(overview::stats)
        .service(overview::notify);
}
