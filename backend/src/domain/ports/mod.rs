//! Domain ports.
//!
//! Driven ports (`*Repository`, [`PasswordHasher`], [`MailNotifier`]) are
//! implemented by outbound adapters. Driving ports ([`AccountService`],
//! [`CatalogueQuery`], [`CatalogueCommand`], [`OrderService`],
//! [`ContactService`], [`DashboardQuery`]) are what inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod account_service;
mod catalogue_command;
mod catalogue_query;
mod catalogue_repository;
mod contact_service;
mod dashboard_query;
mod mail_notifier;
mod order_repository;
mod order_service;
mod password_hasher;
mod user_repository;

#[cfg(test)]
pub use account_service::MockAccountService;
pub use account_service::AccountService;
#[cfg(test)]
pub use catalogue_command::MockCatalogueCommand;
pub use catalogue_command::CatalogueCommand;
#[cfg(test)]
pub use catalogue_query::MockCatalogueQuery;
pub use catalogue_query::CatalogueQuery;
#[cfg(test)]
pub use catalogue_repository::{
    MockCategoryRepository, MockProductRepository, MockSubcategoryRepository,
};
pub use catalogue_repository::{
    CatalogueRepositoryError, CategoryRepository, ProductRepository, SubcategoryRepository,
};
#[cfg(test)]
pub use contact_service::MockContactService;
pub use contact_service::ContactService;
#[cfg(test)]
pub use dashboard_query::MockDashboardQuery;
pub use dashboard_query::{DashboardQuery, DashboardStats, RECENT_ORDERS};
#[cfg(test)]
pub use mail_notifier::MockMailNotifier;
pub use mail_notifier::{MailNotifier, MailNotifierError};
#[cfg(test)]
pub use order_repository::MockOrderRepository;
pub use order_repository::{OrderRepository, OrderRepositoryError};
#[cfg(test)]
pub use order_service::MockOrderService;
pub use order_service::OrderService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
