//! Driving port for checkout and order history.
use async_trait::async_trait;

use crate::domain::{Error, OrderRequest, OrderView, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Price the cart against the current catalogue and store the order.
    async fn place_order(&self, user: &UserId, request: OrderRequest) -> Result<OrderView, Error>;

    async fn orders_for(&self, user: &UserId) -> Result<Vec<OrderView>, Error>;

    /// Every order, newest first, with customer details resolved.
    async fn all_orders(&self) -> Result<Vec<OrderView>, Error>;
}
