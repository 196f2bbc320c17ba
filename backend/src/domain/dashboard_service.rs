//! Back-office dashboard figures.

use std::sync::Arc;

use async_trait::async_trait;

use super::Error;
use super::order_service::assemble_order_views;
use super::port_error_mapping::{map_catalogue_error, map_order_error, map_user_error};
use super::ports::{
    CategoryRepository, DashboardQuery, DashboardStats, OrderRepository, ProductRepository,
    RECENT_ORDERS, SubcategoryRepository, UserRepository,
};

/// Repositories the dashboard reads from.
#[derive(Clone)]
pub struct DashboardSources {
    pub products: Arc<dyn ProductRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub subcategories: Arc<dyn SubcategoryRepository>,
    pub users: Arc<dyn UserRepository>,
    pub orders: Arc<dyn OrderRepository>,
}

#[derive(Clone)]
pub struct DashboardService {
    sources: DashboardSources,
}

impl DashboardService {
    pub fn new(sources: DashboardSources) -> Self {
        Self { sources }
    }
}

#[async_trait]
impl DashboardQuery for DashboardService {
    async fn stats(&self) -> Result<DashboardStats, Error> {
        let s = &self.sources;
        let products = s.products.count().await.map_err(map_catalogue_error)?;
        let categories = s.categories.count().await.map_err(map_catalogue_error)?;
        let subcategories = s.subcategories.count().await.map_err(map_catalogue_error)?;
        let users = s.users.count().await.map_err(map_user_error)?;
        let orders = s.orders.count().await.map_err(map_order_error)?;

        let recent = s
            .orders
            .list_recent(Some(RECENT_ORDERS))
            .await
            .map_err(map_order_error)?;
        let recent_orders =
            assemble_order_views(recent, s.products.as_ref(), Some(s.users.as_ref())).await?;

        Ok(DashboardStats {
            products,
            categories,
            subcategories,
            users,
            orders,
            recent_orders,
        })
    }
}
