//! Response payloads shared by the public and back-office handlers.
//!
//! Domain types stay serialisation-neutral; these structs fix the camelCase
//! wire shape clients depend on.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::ports::DashboardStats;
use crate::domain::{
    BGN_PER_EUR, Category, CategoryId, CategorySummary, CustomerSummary, OrderId, OrderView, Page,
    ProductId, ProductSummary, ProductView, SubcategoryId, SubcategorySummary, SubcategoryView,
    User, UserId, round_to_cents,
};

/// Plain acknowledgement, e.g. `{"msg": "logged out"}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub msg: String,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

/// Public account fields. The password hash never leaves the domain.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email.into(),
            username: user.username.into(),
            first_name: user.first_name,
            last_name: user.last_name,
            is_admin: user.is_admin,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
    pub image: String,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        let details = category.details;
        Self {
            id: category.id,
            name: details.name,
            description: details.description,
            image: details.image,
            is_active: details.is_active,
            sort_order: details.sort_order,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

/// A subcategory with its parent category summary populated.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubcategoryResponse {
    pub id: SubcategoryId,
    pub name: String,
    pub description: String,
    pub category_id: CategoryId,
    pub category: Option<CategorySummary>,
    pub image: String,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SubcategoryView> for SubcategoryResponse {
    fn from(view: SubcategoryView) -> Self {
        let SubcategoryView {
            subcategory,
            category,
        } = view;
        let details = subcategory.details;
        Self {
            id: subcategory.id,
            name: details.name,
            description: details.description,
            category_id: details.category_id,
            category,
            image: details.image,
            is_active: details.is_active,
            sort_order: details.sort_order,
            created_at: subcategory.created_at,
            updated_at: subcategory.updated_at,
        }
    }
}

/// A product with both currencies and its category names.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Price in BGN.
    pub price: f64,
    pub price_eur: f64,
    pub original_price: Option<f64>,
    pub original_price_eur: Option<f64>,
    /// BGN per EUR used for the derived prices.
    pub exchange_rate: f64,
    pub image: String,
    pub images: Vec<String>,
    pub category_id: CategoryId,
    pub category: Option<CategorySummary>,
    pub subcategory_id: Option<SubcategoryId>,
    pub subcategory: Option<SubcategorySummary>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub specifications: BTreeMap<String, String>,
    pub tags: Vec<String>,
    pub in_stock: bool,
    pub stock_quantity: u32,
    pub featured: bool,
    pub rating: f64,
    pub review_count: u32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProductView> for ProductResponse {
    fn from(view: ProductView) -> Self {
        let ProductView {
            product,
            category,
            subcategory,
        } = view;
        let price_eur = product.price_eur();
        let original_price_eur = product.original_price_eur();
        let details = product.details;
        Self {
            id: product.id,
            name: details.name,
            description: details.description,
            price: details.price.bgn(),
            price_eur,
            original_price: details.original_price.map(|price| price.bgn()),
            original_price_eur,
            exchange_rate: BGN_PER_EUR,
            image: details.image,
            images: details.images,
            category_id: details.category_id,
            category,
            subcategory_id: details.subcategory_id,
            subcategory,
            brand: details.brand,
            model: details.model,
            specifications: details.specifications,
            tags: details.tags,
            in_stock: details.in_stock,
            stock_quantity: details.stock_quantity,
            featured: details.featured,
            rating: details.rating,
            review_count: details.review_count,
            is_active: details.is_active,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// One page of products plus the pagination counters.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub products: Vec<ProductResponse>,
    pub total_pages: u64,
    pub current_page: u32,
    pub total: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl From<Page<ProductView>> for ProductListResponse {
    fn from(page: Page<ProductView>) -> Self {
        Self {
            total_pages: page.total_pages(),
            current_page: page.request.page(),
            total: page.total,
            has_next_page: page.has_next(),
            has_prev_page: page.has_prev(),
            products: page.items.into_iter().map(ProductResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<CustomerSummary> for CustomerResponse {
    fn from(customer: CustomerSummary) -> Self {
        Self {
            id: customer.id,
            email: customer.email,
            username: customer.username,
            first_name: customer.first_name,
            last_name: customer.last_name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub product_id: ProductId,
    pub quantity: u32,
    /// BGN price at the time the order was placed.
    pub unit_price: f64,
    /// `None` once the product has been deleted.
    pub product: Option<ProductSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: OrderId,
    pub user_id: UserId,
    /// Populated in back-office listings only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<CustomerResponse>,
    pub items: Vec<OrderItemResponse>,
    pub total: f64,
    pub total_eur: f64,
    pub created_at: DateTime<Utc>,
}

impl From<OrderView> for OrderResponse {
    fn from(view: OrderView) -> Self {
        let OrderView {
            order,
            items,
            customer,
        } = view;
        Self {
            id: order.id,
            user_id: order.user_id,
            user: customer.map(CustomerResponse::from),
            items: items
                .into_iter()
                .map(|line| OrderItemResponse {
                    product_id: line.item.product_id,
                    quantity: line.item.quantity,
                    unit_price: line.item.unit_price.bgn(),
                    product: line.product,
                })
                .collect(),
            total: order.total,
            total_eur: round_to_cents(order.total / BGN_PER_EUR),
            created_at: order.created_at,
        }
    }
}

/// Body of a successful checkout.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlacedOrderResponse {
    pub msg: String,
    pub order: OrderResponse,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub total_products: u64,
    pub total_categories: u64,
    pub total_subcategories: u64,
    pub total_users: u64,
    pub total_orders: u64,
    pub recent_orders: Vec<OrderResponse>,
}

impl From<DashboardStats> for DashboardResponse {
    fn from(stats: DashboardStats) -> Self {
        Self {
            total_products: stats.products,
            total_categories: stats.categories,
            total_subcategories: stats.subcategories,
            total_users: stats.users,
            total_orders: stats.orders,
            recent_orders: stats
                .recent_orders
                .into_iter()
                .map(OrderResponse::from)
                .collect(),
        }
    }
}
