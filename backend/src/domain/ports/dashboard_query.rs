//! Driving port for the back-office dashboard.
use async_trait::async_trait;

use crate::domain::{Error, OrderView};

/// Number of recent orders shown on the dashboard.
pub const RECENT_ORDERS: u32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub products: u64,
    pub categories: u64,
    pub subcategories: u64,
    pub users: u64,
    pub orders: u64,
    pub recent_orders: Vec<OrderView>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardQuery: Send + Sync {
    async fn stats(&self) -> Result<DashboardStats, Error>;
}
