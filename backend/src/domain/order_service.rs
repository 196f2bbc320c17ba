//! Checkout and order history.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use super::port_error_mapping::{map_catalogue_error, map_order_error, map_user_error};
use super::ports::{OrderRepository, OrderService, ProductRepository, UserRepository};
use super::{
    CustomerSummary, Error, Order, OrderItem, OrderItemView, OrderRequest, OrderView, ProductId,
    ProductSummary, UserId,
};

#[derive(Clone)]
pub struct OrderServiceImpl {
    orders: Arc<dyn OrderRepository>,
    products: Arc<dyn ProductRepository>,
    users: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl OrderServiceImpl {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        products: Arc<dyn ProductRepository>,
        users: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            orders,
            products,
            users,
            clock,
        }
    }
}

/// Attach product summaries, and optionally customer details, to orders.
///
/// Products or customers deleted since the order was placed resolve to
/// `None` rather than failing the whole listing.
pub(crate) async fn assemble_order_views(
    orders: Vec<Order>,
    products: &dyn ProductRepository,
    customers: Option<&dyn UserRepository>,
) -> Result<Vec<OrderView>, Error> {
    let product_ids: Vec<ProductId> = orders
        .iter()
        .flat_map(|order| order.items.iter().map(|item| item.product_id))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let summaries: HashMap<ProductId, ProductSummary> = if product_ids.is_empty() {
        HashMap::new()
    } else {
        products
            .find_many(&product_ids)
            .await
            .map_err(map_catalogue_error)?
            .iter()
            .map(|product| (product.id, product.summary()))
            .collect()
    };

    let customer_index: HashMap<UserId, CustomerSummary> = match customers {
        Some(users) if !orders.is_empty() => {
            let ids: Vec<UserId> = orders
                .iter()
                .map(|order| order.user_id)
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect();
            users
                .find_many(&ids)
                .await
                .map_err(map_user_error)?
                .into_iter()
                .map(|user| {
                    (
                        user.id,
                        CustomerSummary {
                            id: user.id,
                            email: user.email.into(),
                            username: user.username.into(),
                            first_name: user.first_name,
                            last_name: user.last_name,
                        },
                    )
                })
                .collect()
        }
        _ => HashMap::new(),
    };

    Ok(orders
        .into_iter()
        .map(|order| OrderView {
            items: order
                .items
                .iter()
                .map(|item| OrderItemView {
                    item: *item,
                    product: summaries.get(&item.product_id).cloned(),
                })
                .collect(),
            customer: customer_index.get(&order.user_id).cloned(),
            order,
        })
        .collect())
}

#[async_trait]
impl OrderService for OrderServiceImpl {
    async fn place_order(&self, user: &UserId, request: OrderRequest) -> Result<OrderView, Error> {
        let ids: Vec<ProductId> = request.lines().iter().map(|line| line.product_id).collect();
        let catalogue: HashMap<ProductId, _> = self
            .products
            .find_many(&ids)
            .await
            .map_err(map_catalogue_error)?
            .into_iter()
            .map(|product| (product.id, product))
            .collect();

        let mut items = Vec::with_capacity(request.lines().len());
        let mut views = Vec::with_capacity(request.lines().len());
        for line in request.lines() {
            let Some(product) = catalogue.get(&line.product_id) else {
                return Err(Error::not_found(format!(
                    "product {} not found",
                    line.product_id
                ))
                .with_details(json!({ "productId": line.product_id })));
            };
            let item = OrderItem {
                product_id: line.product_id,
                quantity: line.quantity,
                unit_price: product.details.price,
            };
            items.push(item);
            views.push(OrderItemView {
                item,
                product: Some(product.summary()),
            });
        }

        let order = Order::place(*user, items, self.clock.utc());
        self.orders.insert(&order).await.map_err(map_order_error)?;
        info!(order_id = %order.id, user_id = %user, total = order.total, "order placed");

        Ok(OrderView {
            order,
            items: views,
            customer: None,
        })
    }

    async fn orders_for(&self, user: &UserId) -> Result<Vec<OrderView>, Error> {
        let orders = self
            .orders
            .list_for_user(user)
            .await
            .map_err(map_order_error)?;
        assemble_order_views(orders, self.products.as_ref(), None).await
    }

    async fn all_orders(&self) -> Result<Vec<OrderView>, Error> {
        let orders = self
            .orders
            .list_recent(None)
            .await
            .map_err(map_order_error)?;
        assemble_order_views(orders, self.products.as_ref(), Some(self.users.as_ref())).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rstest::rstest;

    use super::*;
    use crate::domain::ports::{MockOrderRepository, MockProductRepository, MockUserRepository};
    use crate::domain::test_support::FixedClock;
    use crate::domain::{
        CategoryId, Email, ErrorCode, Price, Product, ProductDetails, User, Username,
    };

    fn product(price: f64) -> Product {
        let stamp = FixedClock::at(2024, 12, 1).utc();
        Product {
            id: ProductId::random(),
            details: ProductDetails {
                name: format!("Лампа {price}"),
                description: "Описание".to_owned(),
                price: Price::new(price).expect("valid price"),
                original_price: None,
                image: String::new(),
                images: Vec::new(),
                category_id: CategoryId::random(),
                subcategory_id: None,
                brand: None,
                model: None,
                specifications: BTreeMap::new(),
                tags: Vec::new(),
                in_stock: true,
                stock_quantity: 0,
                featured: false,
                rating: 0.0,
                review_count: 0,
                is_active: true,
            },
            created_at: stamp,
            updated_at: stamp,
        }
    }

    fn service(
        orders: MockOrderRepository,
        products: MockProductRepository,
        users: MockUserRepository,
    ) -> OrderServiceImpl {
        OrderServiceImpl::new(
            Arc::new(orders),
            Arc::new(products),
            Arc::new(users),
            Arc::new(FixedClock::at(2025, 4, 2)),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn place_order_prices_lines_from_catalogue() {
        let chandelier = product(2599.99);
        let strip = product(79.99);
        let known = vec![chandelier.clone(), strip.clone()];

        let mut products = MockProductRepository::new();
        products
            .expect_find_many()
            .returning(move |_| Ok(known.clone()));
        let mut orders = MockOrderRepository::new();
        orders
            .expect_insert()
            .withf(|order| (order.total - 2759.97).abs() < 1e-9)
            .times(1)
            .returning(|_| Ok(()));

        let request = OrderRequest::new(vec![(chandelier.id, 1), (strip.id, 2)])
            .expect("valid request");
        let view = service(orders, products, MockUserRepository::new())
            .place_order(&UserId::random(), request)
            .await
            .expect("order placed");

        assert_eq!(view.items.len(), 2);
        assert_eq!(view.order.created_at.to_rfc3339(), "2025-04-02T00:00:00+00:00");
        assert_eq!(
            view.items[1].product.as_ref().map(|p| p.name.as_str()),
            Some("Лампа 79.99")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn place_order_with_unknown_product_is_not_found() {
        let mut products = MockProductRepository::new();
        products.expect_find_many().returning(|_| Ok(Vec::new()));
        let mut orders = MockOrderRepository::new();
        orders.expect_insert().never();

        let request =
            OrderRequest::new(vec![(ProductId::random(), 1)]).expect("valid request");
        let err = service(orders, products, MockUserRepository::new())
            .place_order(&UserId::random(), request)
            .await
            .expect_err("unknown product");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn all_orders_resolve_customers_and_tolerate_deleted_products() {
        let buyer = User {
            id: UserId::random(),
            email: Email::parse("buyer@example.com").expect("valid email"),
            username: Username::parse("buyer").expect("valid username"),
            first_name: "Георги".to_owned(),
            last_name: "Иванов".to_owned(),
            is_admin: false,
            created_at: FixedClock::at(2024, 1, 1).utc(),
        };
        let gone = product(10.0);
        let order = Order::place(
            buyer.id,
            vec![OrderItem {
                product_id: gone.id,
                quantity: 1,
                unit_price: gone.details.price,
            }],
            FixedClock::at(2025, 1, 1).utc(),
        );

        let mut orders = MockOrderRepository::new();
        let stored = vec![order];
        orders
            .expect_list_recent()
            .withf(|limit| limit.is_none())
            .returning(move |_| Ok(stored.clone()));
        let mut products = MockProductRepository::new();
        products.expect_find_many().returning(|_| Ok(Vec::new()));
        let mut users = MockUserRepository::new();
        let known = buyer.clone();
        users
            .expect_find_many()
            .returning(move |_| Ok(vec![known.clone()]));

        let views = service(orders, products, users)
            .all_orders()
            .await
            .expect("listing succeeds");
        let view = views.first().expect("one order");
        assert_eq!(
            view.customer.as_ref().map(|c| c.email.as_str()),
            Some("buyer@example.com")
        );
        assert_eq!(view.items[0].product, None);
    }
}
