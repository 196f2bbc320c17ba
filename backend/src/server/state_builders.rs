//! Builders wiring repositories, adapters, and services into [`HttpState`].

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::info;
use url::Url;

use storefront::domain::ports::{
    CategoryRepository, MailNotifier, OrderRepository, PasswordHasher, ProductRepository,
    SubcategoryRepository, UserRepository,
};
use storefront::domain::{
    AccountServiceImpl, CatalogueService, ContactServiceImpl, DashboardService, DashboardSources,
    DemoDataSeeder, Email, OrderServiceImpl,
};
use storefront::inbound::http::state::HttpState;
use storefront::outbound::memory::InMemoryStore;
use storefront::outbound::notify::{HttpRelayMailNotifier, LoggingMailNotifier};
use storefront::outbound::persistence::{
    DbPool, DieselCategoryRepository, DieselOrderRepository, DieselProductRepository,
    DieselSubcategoryRepository, DieselUserRepository,
};
use storefront::outbound::security::Argon2Hasher;

/// Where the driven repositories keep their data.
pub enum StoreBackend {
    Postgres(DbPool),
    Memory(Arc<InMemoryStore>),
}

/// One handle per driven repository port.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub subcategories: Arc<dyn SubcategoryRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub orders: Arc<dyn OrderRepository>,
}

impl Repositories {
    pub fn from_backend(backend: &StoreBackend) -> Self {
        match backend {
            StoreBackend::Postgres(pool) => Self {
                users: Arc::new(DieselUserRepository::new(pool.clone())),
                categories: Arc::new(DieselCategoryRepository::new(pool.clone())),
                subcategories: Arc::new(DieselSubcategoryRepository::new(pool.clone())),
                products: Arc::new(DieselProductRepository::new(pool.clone())),
                orders: Arc::new(DieselOrderRepository::new(pool.clone())),
            },
            StoreBackend::Memory(store) => Self {
                users: store.clone(),
                categories: store.clone(),
                subcategories: store.clone(),
                products: store.clone(),
                orders: store.clone(),
            },
        }
    }
}

/// Non-repository inputs to the services.
pub struct ServiceSettings {
    pub admin_email: Email,
    pub contact_inbox: Email,
    pub mail_relay: Option<Url>,
    pub mail_from: String,
}

/// Pick the relay notifier when an endpoint is configured.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the HTTP client cannot be built.
fn build_notifier(settings: &ServiceSettings) -> std::io::Result<Arc<dyn MailNotifier>> {
    match &settings.mail_relay {
        Some(endpoint) => {
            info!(%endpoint, "mail delivered through HTTP relay");
            let notifier = HttpRelayMailNotifier::new(endpoint.clone(), settings.mail_from.clone())
                .map_err(|err| std::io::Error::other(format!("mail relay client: {err}")))?;
            Ok(Arc::new(notifier))
        }
        None => {
            info!("no mail relay configured; outgoing mail is only logged");
            Ok(Arc::new(LoggingMailNotifier))
        }
    }
}

/// Everything start-up needs from the wiring step.
pub struct Wiring {
    pub http_state: HttpState,
    pub seeder: DemoDataSeeder,
}

/// Assemble the HTTP state and demo-data seeder over one set of repositories.
///
/// # Errors
///
/// Returns [`std::io::Error`] when an outbound adapter fails to initialise.
pub fn build_wiring(repos: &Repositories, settings: &ServiceSettings) -> std::io::Result<Wiring> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2Hasher::new());
    let notifier = build_notifier(settings)?;

    let catalogue = Arc::new(CatalogueService::new(
        repos.categories.clone(),
        repos.subcategories.clone(),
        repos.products.clone(),
        clock.clone(),
    ));
    let http_state = HttpState {
        accounts: Arc::new(AccountServiceImpl::new(
            repos.users.clone(),
            hasher.clone(),
            clock.clone(),
            settings.admin_email.clone(),
        )),
        catalogue: catalogue.clone(),
        catalogue_admin: catalogue,
        orders: Arc::new(OrderServiceImpl::new(
            repos.orders.clone(),
            repos.products.clone(),
            repos.users.clone(),
            clock.clone(),
        )),
        contact: Arc::new(ContactServiceImpl::new(
            notifier,
            settings.contact_inbox.to_string(),
        )),
        dashboard: Arc::new(DashboardService::new(DashboardSources {
            products: repos.products.clone(),
            categories: repos.categories.clone(),
            subcategories: repos.subcategories.clone(),
            users: repos.users.clone(),
            orders: repos.orders.clone(),
        })),
    };
    let seeder = DemoDataSeeder {
        users: repos.users.clone(),
        categories: repos.categories.clone(),
        subcategories: repos.subcategories.clone(),
        products: repos.products.clone(),
        hasher,
        clock,
    };
    Ok(Wiring { http_state, seeder })
}
