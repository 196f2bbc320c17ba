//! Shared harness for HTTP contract tests.
//!
//! The app mirrors the production wiring over the in-memory store, with a
//! low-cost Argon2 hasher so registration stays fast.

use std::sync::Arc;

use actix_session::config::CookieContentSecurity;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use mockable::{Clock, DefaultClock};
use serde_json::{Value, json};

use storefront::Trace;
use storefront::domain::ports::{MailNotifier, PasswordHasher};
use storefront::domain::{
    AccountServiceImpl, CatalogueService, ContactServiceImpl, DashboardService, DashboardSources,
    Email, OrderServiceImpl,
};
use storefront::inbound::http::session::SESSION_COOKIE;
use storefront::inbound::http::state::HttpState;
use storefront::inbound::http::{configure_api, json_config, path_config, query_config};
use storefront::outbound::memory::InMemoryStore;
use storefront::outbound::notify::LoggingMailNotifier;
use storefront::outbound::security::Argon2Hasher;

pub const ADMIN_EMAIL: &str = "admin@luxury.com";

fn state_over(store: &Arc<InMemoryStore>) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let hasher: Arc<dyn PasswordHasher> =
        Arc::new(Argon2Hasher::with_costs(8, 1, 1).expect("cheap argon2 params"));
    let notifier: Arc<dyn MailNotifier> = Arc::new(LoggingMailNotifier);
    let catalogue = Arc::new(CatalogueService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        clock.clone(),
    ));
    HttpState {
        accounts: Arc::new(AccountServiceImpl::new(
            store.clone(),
            hasher,
            clock.clone(),
            Email::parse(ADMIN_EMAIL).expect("admin email"),
        )),
        catalogue: catalogue.clone(),
        catalogue_admin: catalogue,
        orders: Arc::new(OrderServiceImpl::new(
            store.clone(),
            store.clone(),
            store.clone(),
            clock,
        )),
        contact: Arc::new(ContactServiceImpl::new(notifier, "inbox@luxury.com")),
        dashboard: Arc::new(DashboardService::new(DashboardSources {
            products: store.clone(),
            categories: store.clone(),
            subcategories: store.clone(),
            users: store.clone(),
            orders: store.clone(),
        })),
    }
}

/// Full `/api` surface over a fresh in-memory store.
pub async fn init_app()
-> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let store = Arc::new(InMemoryStore::new());
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_secure(false)
        .build();
    test::init_service(
        App::new()
            .app_data(web::Data::new(state_over(&store)))
            .app_data(json_config())
            .app_data(query_config())
            .app_data(path_config())
            .wrap(Trace)
            .service(web::scope("/api").wrap(session).configure(configure_api)),
    )
    .await
}

/// Issue a request, optionally with a session cookie, and decode the body.
pub async fn call<S>(
    app: &S,
    request: test::TestRequest,
    cookie: Option<&Cookie<'static>>,
) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = match cookie {
        Some(cookie) => request.cookie(cookie.clone()),
        None => request,
    };
    let res = test::call_service(app, request.to_request()).await;
    let status = res.status();
    let body = test::read_body(res).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("json body")
    };
    (status, value)
}

pub async fn register<S>(app: &S, username: &str, email: &str) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let (status, body) = call(
        app,
        test::TestRequest::post().uri("/api/auth/register").set_json(json!({
            "username": username,
            "email": email,
            "password": "secret123",
            "firstName": "Test",
            "lastName": "User"
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register {username}: {body}");
    body
}

/// Log in and return the session cookie.
pub async fn login<S>(app: &S, username: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({"username": username, "password": "secret123"}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK, "login {username}");
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned)
        .expect("session cookie")
}

/// Register and log in the administrator.
pub async fn admin_session<S>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    register(app, "admin", ADMIN_EMAIL).await;
    login(app, "admin").await
}

/// Register and log in an ordinary customer.
pub async fn customer_session<S>(app: &S, username: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    register(app, username, &format!("{username}@example.com")).await;
    login(app, username).await
}

/// Create a category as admin and return its id.
pub async fn create_category<S>(app: &S, admin: &Cookie<'static>, name: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let (status, body) = call(
        app,
        test::TestRequest::post()
            .uri("/api/admin/categories")
            .set_json(json!({"name": name, "description": format!("{name} range")})),
        Some(admin),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create category: {body}");
    body["id"].as_str().expect("category id").to_owned()
}

/// Create an in-stock product as admin and return the response body.
pub async fn create_product<S>(
    app: &S,
    admin: &Cookie<'static>,
    category_id: &str,
    name: &str,
    price: f64,
) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let (status, body) = call(
        app,
        test::TestRequest::post()
            .uri("/api/admin/products")
            .set_json(json!({
                "name": name,
                "description": format!("{name} for the living room"),
                "price": price,
                "image": "/img/lamp.jpg",
                "categoryId": category_id,
                "stockQuantity": 5,
                "specifications": {"power": "60W"}
            })),
        Some(admin),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create product: {body}");
    body
}
