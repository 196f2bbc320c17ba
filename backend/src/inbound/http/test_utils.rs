//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::config::CookieContentSecurity;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use chrono::{TimeZone, Utc};

use super::session::SESSION_COOKIE;
use super::state::HttpState;
use crate::domain::ports::{
    MockAccountService, MockCatalogueCommand, MockCatalogueQuery, MockContactService,
    MockDashboardQuery, MockOrderService,
};
use crate::domain::{Email, User, UserId, Username};

/// Session middleware mirroring production settings minus `Secure`, so plain
/// HTTP test requests carry the cookie.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_secure(false)
        .build()
}

/// One mock per driving port; set expectations, then call [`Self::into_state`].
#[derive(Default)]
pub struct MockPorts {
    pub accounts: MockAccountService,
    pub catalogue: MockCatalogueQuery,
    pub catalogue_admin: MockCatalogueCommand,
    pub orders: MockOrderService,
    pub contact: MockContactService,
    pub dashboard: MockDashboardQuery,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState {
            accounts: Arc::new(self.accounts),
            catalogue: Arc::new(self.catalogue),
            catalogue_admin: Arc::new(self.catalogue_admin),
            orders: Arc::new(self.orders),
            contact: Arc::new(self.contact),
            dashboard: Arc::new(self.dashboard),
        }
    }
}

/// Fixed user; `is_admin` decides which guards it passes.
pub fn sample_user(is_admin: bool) -> User {
    User {
        id: UserId::from_uuid(uuid::Uuid::from_u128(0x3fa8_5f64_5717_4562_b3fc_2c96_3f66_afa6)),
        email: Email::parse("ana@example.com").expect("fixture email"),
        username: Username::parse("ana").expect("fixture username"),
        first_name: "Ana".to_owned(),
        last_name: "Petrova".to_owned(),
        is_admin,
        created_at: Utc
            .with_ymd_and_hms(2025, 3, 1, 9, 30, 0)
            .single()
            .expect("fixture timestamp"),
    }
}

/// Initialise the full `/api` surface over `state`, plus a `/test-login`
/// route that logs in [`sample_user`] with the requested admin flag.
pub async fn init_api(
    state: HttpState,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(super::json_config())
            .app_data(super::query_config())
            .app_data(super::path_config())
            .wrap(test_session_middleware())
            .route(
                "/test-login/{admin}",
                web::post().to(
                    |session: super::session::SessionContext, admin: web::Path<bool>| async move {
                        session.persist_user(&sample_user(admin.into_inner()))?;
                        Ok::<_, crate::domain::Error>(actix_web::HttpResponse::Ok().finish())
                    },
                ),
            )
            .service(web::scope("/api").configure(super::configure_api)),
    )
    .await
}

/// Log in through `/test-login` and return the issued session cookie.
pub async fn login_cookie(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    is_admin: bool,
) -> Cookie<'static> {
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri(&format!("/test-login/{is_admin}"))
            .to_request(),
    )
    .await;
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned)
        .expect("session cookie issued")
}

/// A product view priced at `price` BGN in a "Люстри" category.
pub fn sample_product(name: &str, price: f64) -> crate::domain::ProductView {
    use crate::domain::{
        CategoryId, CategorySummary, Price, Product, ProductDetails, ProductId, ProductView,
    };

    let category_id = CategoryId::random();
    let at = Utc
        .with_ymd_and_hms(2025, 2, 1, 12, 0, 0)
        .single()
        .expect("fixture timestamp");
    ProductView {
        product: Product {
            id: ProductId::random(),
            details: ProductDetails {
                name: name.to_owned(),
                description: format!("{name} description"),
                price: Price::new(price).expect("fixture price"),
                original_price: None,
                image: String::new(),
                images: Vec::new(),
                category_id,
                subcategory_id: None,
                brand: None,
                model: None,
                specifications: std::collections::BTreeMap::new(),
                tags: Vec::new(),
                in_stock: true,
                stock_quantity: 3,
                featured: false,
                rating: 0.0,
                review_count: 0,
                is_active: true,
            },
            created_at: at,
            updated_at: at,
        },
        category: Some(CategorySummary {
            id: category_id,
            name: "Люстри".to_owned(),
        }),
        subcategory: None,
    }
}
