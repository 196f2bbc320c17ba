//! OpenAPI documentation for the storefront API.
//!
//! [`ApiDoc`] gathers every handler annotated with `#[utoipa::path]` plus the
//! request and response schemas. Swagger UI serves it in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::admin::categories::CategoryRequest;
use crate::inbound::http::admin::overview::NotifyRequest;
use crate::inbound::http::admin::products::ProductRequest;
use crate::inbound::http::admin::subcategories::SubcategoryRequest;
use crate::inbound::http::auth::{LoginRequest, RegisterRequest};
use crate::inbound::http::contact::ContactRequest;
use crate::inbound::http::dto::{
    CategoryResponse, CustomerResponse, DashboardResponse, MessageResponse, OrderItemResponse,
    OrderResponse, PlacedOrderResponse, ProductListResponse, ProductResponse, SubcategoryResponse,
    UserResponse,
};
use crate::inbound::http::orders::{OrderLineRequest, PlaceOrderRequest};
use crate::inbound::http::session::SESSION_COOKIE;

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE,
                "Encrypted session cookie issued by POST /api/auth/login.",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Luxury Lighting storefront API",
        description = "Catalogue browsing, customer accounts, checkout, contact, and the back office."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::profile,
        crate::inbound::http::products::list_products,
        crate::inbound::http::products::featured_products,
        crate::inbound::http::products::active_categories,
        crate::inbound::http::products::active_subcategories,
        crate::inbound::http::products::get_product,
        crate::inbound::http::orders::place_order,
        crate::inbound::http::orders::my_orders,
        crate::inbound::http::contact::submit_contact,
        crate::inbound::http::admin::products::list_products,
        crate::inbound::http::admin::products::create_product,
        crate::inbound::http::admin::products::update_product,
        crate::inbound::http::admin::products::delete_product,
        crate::inbound::http::admin::categories::list_categories,
        crate::inbound::http::admin::categories::create_category,
        crate::inbound::http::admin::categories::update_category,
        crate::inbound::http::admin::categories::delete_category,
        crate::inbound::http::admin::subcategories::list_subcategories,
        crate::inbound::http::admin::subcategories::subcategories_of,
        crate::inbound::http::admin::subcategories::create_subcategory,
        crate::inbound::http::admin::subcategories::update_subcategory,
        crate::inbound::http::admin::subcategories::delete_subcategory,
        crate::inbound::http::admin::overview::list_orders,
        crate::inbound::http::admin::overview::stats,
        crate::inbound::http::admin::overview::notify,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        MessageResponse,
        UserResponse,
        CategoryResponse,
        SubcategoryResponse,
        ProductResponse,
        ProductListResponse,
        CustomerResponse,
        OrderItemResponse,
        OrderResponse,
        PlacedOrderResponse,
        DashboardResponse,
        RegisterRequest,
        LoginRequest,
        PlaceOrderRequest,
        OrderLineRequest,
        ContactRequest,
        ProductRequest,
        CategoryRequest,
        SubcategoryRequest,
        NotifyRequest,
    )),
    tags(
        (name = "auth", description = "Registration, login, and the current profile"),
        (name = "products", description = "Public catalogue browsing"),
        (name = "orders", description = "Checkout and order history"),
        (name = "contact", description = "Contact form"),
        (name = "admin", description = "Back office, administrators only"),
        (name = "health", description = "Readiness and liveness probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn error_schema_exposes_code_and_message() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error = schemas.get("Error").expect("Error schema");

        assert_object_schema_has_field(error, "code");
        assert_object_schema_has_field(error, "message");
    }

    #[test]
    fn product_schema_carries_euro_prices() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let product = schemas.get("ProductResponse").expect("ProductResponse schema");

        assert_object_schema_has_field(product, "priceEur");
        assert_object_schema_has_field(product, "exchangeRate");
    }

    #[test]
    fn documents_public_and_admin_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/auth/login",
            "/api/products",
            "/api/products/{id}",
            "/api/orders/my",
            "/api/admin/subcategories/{id}",
            "/api/admin/notify",
            "/health/ready",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
