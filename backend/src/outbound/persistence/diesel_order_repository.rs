//! PostgreSQL-backed order repository.
//!
//! An order is one `orders` row plus its `order_items`; both are written in
//! one transaction and read back with a second query keyed by order id.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use super::diesel_error_mapping::{count_from_db, order_diesel_error, order_pool_error};
use super::models::{OrderItemRow, OrderRow, order_from_rows, order_rows};
use super::pool::DbPool;
use super::schema::{order_items, orders};
use crate::domain::ports::{OrderRepository, OrderRepositoryError};
use crate::domain::{Order, UserId};

#[derive(Clone)]
pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Attach lines to their headers, preserving header order.
async fn with_items(
    conn: &mut AsyncPgConnection,
    headers: Vec<OrderRow>,
) -> Result<Vec<Order>, OrderRepositoryError> {
    if headers.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<Uuid> = headers.iter().map(|header| header.id).collect();
    let lines: Vec<OrderItemRow> = order_items::table
        .filter(order_items::order_id.eq_any(ids))
        .order((order_items::order_id.asc(), order_items::position.asc()))
        .select(OrderItemRow::as_select())
        .load(conn)
        .await
        .map_err(|err| order_diesel_error(err, "load order items"))?;

    let mut grouped: HashMap<Uuid, Vec<OrderItemRow>> = HashMap::new();
    for line in lines {
        grouped.entry(line.order_id).or_default().push(line);
    }
    headers
        .into_iter()
        .map(|header| {
            let lines = grouped.remove(&header.id).unwrap_or_default();
            order_from_rows(header, lines).map_err(OrderRepositoryError::query)
        })
        .collect()
}

#[async_trait]
impl OrderRepository for DieselOrderRepository {
    async fn insert(&self, order: &Order) -> Result<(), OrderRepositoryError> {
        let (header, lines) = order_rows(order).map_err(OrderRepositoryError::query)?;
        let mut conn = self.pool.get().await.map_err(order_pool_error)?;
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                diesel::insert_into(orders::table)
                    .values(&header)
                    .execute(conn)
                    .await?;
                diesel::insert_into(order_items::table)
                    .values(&lines)
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| order_diesel_error(err, "insert order"))
    }

    async fn list_for_user(&self, user: &UserId) -> Result<Vec<Order>, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(order_pool_error)?;
        let headers: Vec<OrderRow> = orders::table
            .filter(orders::user_id.eq(user.as_uuid()))
            .order((orders::created_at.desc(), orders::id.asc()))
            .select(OrderRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| order_diesel_error(err, "list orders for user"))?;
        with_items(&mut conn, headers).await
    }

    async fn list_recent(&self, limit: Option<u32>) -> Result<Vec<Order>, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(order_pool_error)?;
        let mut query = orders::table
            .order((orders::created_at.desc(), orders::id.asc()))
            .select(OrderRow::as_select())
            .into_boxed();
        if let Some(limit) = limit {
            query = query.limit(i64::from(limit));
        }
        let headers: Vec<OrderRow> = query
            .load(&mut conn)
            .await
            .map_err(|err| order_diesel_error(err, "list orders"))?;
        with_items(&mut conn, headers).await
    }

    async fn count(&self) -> Result<u64, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(order_pool_error)?;
        let count: i64 = orders::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| order_diesel_error(err, "count orders"))?;
        Ok(count_from_db(count))
    }
}
