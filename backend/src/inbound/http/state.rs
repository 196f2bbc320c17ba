//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! they can be exercised against mocks without any I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountService, CatalogueCommand, CatalogueQuery, ContactService, DashboardQuery,
    OrderService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountService>,
    pub catalogue: Arc<dyn CatalogueQuery>,
    pub catalogue_admin: Arc<dyn CatalogueCommand>,
    pub orders: Arc<dyn OrderService>,
    pub contact: Arc<dyn ContactService>,
    pub dashboard: Arc<dyn DashboardQuery>,
}
