//! Order persistence port.
use async_trait::async_trait;

use crate::domain::{Order, UserId};

use super::define_port_error;

define_port_error! {
    pub enum OrderRepositoryError {
        Connection { message: String } => "order store connection failed: {message}",
        Query { message: String } => "order store query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist an order and its lines atomically.
    async fn insert(&self, order: &Order) -> Result<(), OrderRepositoryError>;

    /// A customer's orders, newest first.
    async fn list_for_user(&self, user: &UserId) -> Result<Vec<Order>, OrderRepositoryError>;

    /// All orders newest first, optionally truncated to `limit`.
    async fn list_recent(&self, limit: Option<u32>) -> Result<Vec<Order>, OrderRepositoryError>;

    async fn count(&self) -> Result<u64, OrderRepositoryError>;
}
