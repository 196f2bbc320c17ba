//! Internal Diesel row structs and their conversions to domain types.
//!
//! Rows never leave the persistence layer. Conversions from rows return
//! `Result<_, String>` because a stored value can violate a domain rule
//! (negative price, malformed email) if the database was edited by hand.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{categories, order_items, orders, products, subcategories, users};
use crate::domain::{
    Category, CategoryDetails, CategoryId, Email, Order, OrderId, OrderItem, PasswordHash, Price,
    Product, ProductDetails, ProductId, StoredUser, Subcategory, SubcategoryDetails,
    SubcategoryId, User, UserId, Username,
};

fn to_db_count(value: u32, field: &str) -> Result<i32, String> {
    i32::try_from(value).map_err(|_| format!("{field} {value} does not fit the database column"))
}

fn from_db_count(value: i32, field: &str) -> Result<u32, String> {
    u32::try_from(value).map_err(|_| format!("stored {field} {value} is negative"))
}

fn price(value: f64, field: &str) -> Result<Price, String> {
    Price::new(value).map_err(|err| format!("stored {field} is invalid: {err}"))
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    pub(crate) fn from_stored(stored: &StoredUser) -> Self {
        let user = &stored.user;
        Self {
            id: *user.id.as_uuid(),
            email: user.email.as_ref().to_owned(),
            username: user.username.as_ref().to_owned(),
            password_hash: stored.password_hash.as_str().to_owned(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            is_admin: user.is_admin,
            created_at: user.created_at,
        }
    }

    pub(crate) fn into_stored(self) -> Result<StoredUser, String> {
        let password_hash = PasswordHash::new(self.password_hash.clone());
        Ok(StoredUser {
            user: self.into_user()?,
            password_hash,
        })
    }

    pub(crate) fn into_user(self) -> Result<User, String> {
        Ok(User {
            id: UserId::from_uuid(self.id),
            email: Email::try_from(self.email).map_err(|err| err.to_string())?,
            username: Username::try_from(self.username).map_err(|err| err.to_string())?,
            first_name: self.first_name,
            last_name: self.last_name,
            is_admin: self.is_admin,
            created_at: self.created_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Categories and subcategories
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CategoryRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image: String,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Category> for CategoryRow {
    fn from(category: &Category) -> Self {
        let details = &category.details;
        Self {
            id: *category.id.as_uuid(),
            name: details.name.clone(),
            description: details.description.clone(),
            image: details.image.clone(),
            is_active: details.is_active,
            sort_order: details.sort_order,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: CategoryId::from_uuid(row.id),
            details: CategoryDetails {
                name: row.name,
                description: row.description,
                image: row.image,
                is_active: row.is_active,
                sort_order: row.sort_order,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = subcategories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SubcategoryRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category_id: Uuid,
    pub image: String,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Subcategory> for SubcategoryRow {
    fn from(subcategory: &Subcategory) -> Self {
        let details = &subcategory.details;
        Self {
            id: *subcategory.id.as_uuid(),
            name: details.name.clone(),
            description: details.description.clone(),
            category_id: *details.category_id.as_uuid(),
            image: details.image.clone(),
            is_active: details.is_active,
            sort_order: details.sort_order,
            created_at: subcategory.created_at,
            updated_at: subcategory.updated_at,
        }
    }
}

impl From<SubcategoryRow> for Subcategory {
    fn from(row: SubcategoryRow) -> Self {
        Self {
            id: SubcategoryId::from_uuid(row.id),
            details: SubcategoryDetails {
                name: row.name,
                description: row.description,
                category_id: CategoryId::from_uuid(row.category_id),
                image: row.image,
                is_active: row.is_active,
                sort_order: row.sort_order,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub image: String,
    pub images: Vec<String>,
    pub category_id: Uuid,
    pub subcategory_id: Option<Uuid>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub specifications: serde_json::Value,
    pub tags: Vec<String>,
    pub in_stock: bool,
    pub stock_quantity: i32,
    pub featured: bool,
    pub rating: f64,
    pub review_count: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductRow {
    pub(crate) fn try_from_product(product: &Product) -> Result<Self, String> {
        let details = &product.details;
        let specifications = serde_json::to_value(&details.specifications)
            .map_err(|err| format!("specifications are not serialisable: {err}"))?;
        Ok(Self {
            id: *product.id.as_uuid(),
            name: details.name.clone(),
            description: details.description.clone(),
            price: details.price.bgn(),
            original_price: details.original_price.map(Price::bgn),
            image: details.image.clone(),
            images: details.images.clone(),
            category_id: *details.category_id.as_uuid(),
            subcategory_id: details.subcategory_id.map(|id| *id.as_uuid()),
            brand: details.brand.clone(),
            model: details.model.clone(),
            specifications,
            tags: details.tags.clone(),
            in_stock: details.in_stock,
            stock_quantity: to_db_count(details.stock_quantity, "stock quantity")?,
            featured: details.featured,
            rating: details.rating,
            review_count: to_db_count(details.review_count, "review count")?,
            is_active: details.is_active,
            created_at: product.created_at,
            updated_at: product.updated_at,
        })
    }

    pub(crate) fn into_product(self) -> Result<Product, String> {
        let specifications: BTreeMap<String, String> =
            serde_json::from_value(self.specifications)
                .map_err(|err| format!("stored specifications are invalid: {err}"))?;
        Ok(Product {
            id: ProductId::from_uuid(self.id),
            details: ProductDetails {
                name: self.name,
                description: self.description,
                price: price(self.price, "price")?,
                original_price: self
                    .original_price
                    .map(|value| price(value, "original price"))
                    .transpose()?,
                image: self.image,
                images: self.images,
                category_id: CategoryId::from_uuid(self.category_id),
                subcategory_id: self.subcategory_id.map(SubcategoryId::from_uuid),
                brand: self.brand,
                model: self.model,
                specifications,
                tags: self.tags,
                in_stock: self.in_stock,
                stock_quantity: from_db_count(self.stock_quantity, "stock quantity")?,
                featured: self.featured,
                rating: self.rating,
                review_count: from_db_count(self.review_count, "review count")?,
                is_active: self.is_active,
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OrderRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub total: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = order_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OrderItemRow {
    pub order_id: Uuid,
    pub position: i32,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: f64,
}

/// Split an order into its header row and positioned line rows.
pub(crate) fn order_rows(order: &Order) -> Result<(OrderRow, Vec<OrderItemRow>), String> {
    let header = OrderRow {
        id: *order.id.as_uuid(),
        user_id: *order.user_id.as_uuid(),
        total: order.total,
        created_at: order.created_at,
    };
    let lines = order
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let position = i32::try_from(index).map_err(|_| "too many order lines".to_owned())?;
            Ok(OrderItemRow {
                order_id: header.id,
                position,
                product_id: *item.product_id.as_uuid(),
                quantity: to_db_count(item.quantity, "quantity")?,
                unit_price: item.unit_price.bgn(),
            })
        })
        .collect::<Result<Vec<_>, String>>()?;
    Ok((header, lines))
}

/// Rebuild an order from its header and lines already sorted by position.
pub(crate) fn order_from_rows(header: OrderRow, lines: Vec<OrderItemRow>) -> Result<Order, String> {
    let items = lines
        .into_iter()
        .map(|line| {
            Ok(OrderItem {
                product_id: ProductId::from_uuid(line.product_id),
                quantity: from_db_count(line.quantity, "quantity")?,
                unit_price: price(line.unit_price, "unit price")?,
            })
        })
        .collect::<Result<Vec<_>, String>>()?;
    Ok(Order {
        id: OrderId::from_uuid(header.id),
        user_id: UserId::from_uuid(header.user_id),
        items,
        total: header.total,
        created_at: header.created_at,
    })
}
