//! Domain primitives, aggregates, and the services that drive them.
//!
//! Purpose: define strongly typed storefront entities (accounts, catalogue,
//! orders, contact mail) plus the services implementing the driving ports.
//! Nothing here knows about HTTP or SQL; adapters plug in through
//! [`ports`].
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`]: the API error payload every adapter returns.
//! - Identifier newtypes such as [`ProductId`] and [`UserId`].
//! - [`Price`]: BGN amounts with the fixed euro conversion.
//! - Service implementations wired by the server: [`AccountServiceImpl`],
//!   [`CatalogueService`], [`OrderServiceImpl`], [`ContactServiceImpl`],
//!   [`DashboardService`], and the [`DemoDataSeeder`].

pub mod account_service;
pub mod auth;
pub mod catalogue;
pub mod catalogue_service;
pub mod contact;
pub mod contact_service;
pub mod dashboard_service;
pub mod error;
pub mod ids;
pub mod money;
pub mod order;
pub mod order_service;
pub mod ports;
pub mod seed;
pub mod trace_id;
pub mod user;

mod port_error_mapping;
#[cfg(test)]
pub(crate) mod test_support;

pub use self::account_service::AccountServiceImpl;
pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MIN, Registration, RegistrationDraft,
    RegistrationValidationError,
};
pub use self::catalogue::{
    ADMIN_PAGE_SIZE, CatalogueValidationError, Category, CategoryDetails, CategoryDraft,
    CategorySummary, FEATURED_LIMIT, MAX_PAGE_SIZE, Page, PageRequest, PageRequestError, Product,
    ProductDetails, ProductDraft, ProductFilter, ProductListQuery, ProductSort, ProductSummary,
    ProductView, STOREFRONT_PAGE_SIZE, Subcategory, SubcategoryDetails, SubcategoryDraft,
    SubcategorySummary, SubcategoryView,
};
pub use self::catalogue_service::CatalogueService;
pub use self::contact::{ContactDraft, ContactMessage, ContactValidationError, OutgoingMail};
pub use self::contact_service::ContactServiceImpl;
pub use self::dashboard_service::{DashboardService, DashboardSources};
pub use self::error::{Error, ErrorCode};
pub use self::ids::{CategoryId, OrderId, ProductId, SubcategoryId, UserId};
pub use self::money::{BGN_PER_EUR, Price, PriceError, round_to_cents};
pub use self::order::{
    CustomerSummary, MAX_LINE_QUANTITY, Order, OrderItem, OrderItemView, OrderLine, OrderRequest,
    OrderValidationError, OrderView,
};
pub use self::order_service::OrderServiceImpl;
pub use self::seed::{DemoDataSeeder, SeedAdmin, SeedOutcome};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Email, PasswordHash, StoredUser, User, UserValidationError, Username};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use storefront::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("product not found"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
