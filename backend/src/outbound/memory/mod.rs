//! In-memory store backing every repository port.
//!
//! Used when no database URL is configured and by the HTTP contract tests.
//! Each collection sits behind its own `RwLock`; guards are never held across
//! an `.await`. When more than one lock is needed they are taken in the order
//! users, categories, subcategories, products, orders.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::ports::{
    CatalogueRepositoryError, CategoryRepository, OrderRepository, OrderRepositoryError,
    ProductRepository, SubcategoryRepository, UserRepository, UserRepositoryError,
};
use crate::domain::{
    Category, CategoryId, Order, Product, ProductId, ProductListQuery, StoredUser, Subcategory,
    SubcategoryId, User, UserId,
};

#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: RwLock<HashMap<UserId, StoredUser>>,
    categories: RwLock<HashMap<CategoryId, Category>>,
    subcategories: RwLock<HashMap<SubcategoryId, Subcategory>>,
    products: RwLock<HashMap<ProductId, Product>>,
    orders: RwLock<Vec<Order>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

const POISONED: &str = "in-memory store lock poisoned";
const CATEGORY_NOT_FOUND: &str = "category not found";

fn catalogue_poisoned<T>(_: PoisonError<T>) -> CatalogueRepositoryError {
    CatalogueRepositoryError::query(POISONED)
}

fn users_poisoned<T>(_: PoisonError<T>) -> UserRepositoryError {
    UserRepositoryError::query(POISONED)
}

fn orders_poisoned<T>(_: PoisonError<T>) -> OrderRepositoryError {
    OrderRepositoryError::query(POISONED)
}

fn count_of(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}

fn category_name_taken(
    categories: &HashMap<CategoryId, Category>,
    candidate: &Category,
) -> bool {
    categories
        .values()
        .any(|other| other.id != candidate.id && other.details.name == candidate.details.name)
}

fn subcategory_name_taken(
    subcategories: &HashMap<SubcategoryId, Subcategory>,
    candidate: &Subcategory,
) -> bool {
    subcategories.values().any(|other| {
        other.id != candidate.id
            && other.details.category_id == candidate.details.category_id
            && other.details.name == candidate.details.name
    })
}

/// Mirrors the `subcategories.category_id` foreign key.
fn require_parent(
    categories: &HashMap<CategoryId, Category>,
    subcategory: &Subcategory,
) -> Result<(), CatalogueRepositoryError> {
    if categories.contains_key(&subcategory.details.category_id) {
        Ok(())
    } else {
        Err(CatalogueRepositoryError::missing_parent(CATEGORY_NOT_FOUND))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: &StoredUser) -> Result<(), UserRepositoryError> {
        let mut users = self.users.write().map_err(users_poisoned)?;
        let candidate = &user.user;
        if users
            .values()
            .any(|existing| existing.user.email == candidate.email)
        {
            return Err(UserRepositoryError::duplicate_email());
        }
        if users
            .values()
            .any(|existing| existing.user.username == candidate.username)
        {
            return Err(UserRepositoryError::duplicate_username());
        }
        users.insert(candidate.id, user.clone());
        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StoredUser>, UserRepositoryError> {
        let users = self.users.read().map_err(users_poisoned)?;
        Ok(users
            .values()
            .find(|stored| stored.user.username.as_ref() == username)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let users = self.users.read().map_err(users_poisoned)?;
        Ok(users.get(id).map(|stored| stored.user.clone()))
    }

    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<User>, UserRepositoryError> {
        let users = self.users.read().map_err(users_poisoned)?;
        Ok(ids
            .iter()
            .filter_map(|id| users.get(id).map(|stored| stored.user.clone()))
            .collect())
    }

    async fn count(&self) -> Result<u64, UserRepositoryError> {
        let users = self.users.read().map_err(users_poisoned)?;
        Ok(count_of(users.len()))
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn list(&self, active_only: bool) -> Result<Vec<Category>, CatalogueRepositoryError> {
        let categories = self.categories.read().map_err(catalogue_poisoned)?;
        let mut listed: Vec<Category> = categories
            .values()
            .filter(|category| !active_only || category.details.is_active)
            .cloned()
            .collect();
        listed.sort_by(Category::display_order);
        Ok(listed)
    }

    async fn find(&self, id: &CategoryId) -> Result<Option<Category>, CatalogueRepositoryError> {
        let categories = self.categories.read().map_err(catalogue_poisoned)?;
        Ok(categories.get(id).cloned())
    }

    async fn insert(&self, category: &Category) -> Result<(), CatalogueRepositoryError> {
        let mut categories = self.categories.write().map_err(catalogue_poisoned)?;
        if category_name_taken(&categories, category) {
            return Err(CatalogueRepositoryError::duplicate(
                "category name already exists",
            ));
        }
        categories.insert(category.id, category.clone());
        Ok(())
    }

    async fn update(&self, category: &Category) -> Result<bool, CatalogueRepositoryError> {
        let mut categories = self.categories.write().map_err(catalogue_poisoned)?;
        if !categories.contains_key(&category.id) {
            return Ok(false);
        }
        if category_name_taken(&categories, category) {
            return Err(CatalogueRepositoryError::duplicate(
                "category name already exists",
            ));
        }
        categories.insert(category.id, category.clone());
        Ok(true)
    }

    async fn delete(&self, id: &CategoryId) -> Result<bool, CatalogueRepositoryError> {
        let mut categories = self.categories.write().map_err(catalogue_poisoned)?;
        let mut subcategories = self.subcategories.write().map_err(catalogue_poisoned)?;
        if categories.remove(id).is_none() {
            return Ok(false);
        }
        subcategories.retain(|_, subcategory| subcategory.details.category_id != *id);
        Ok(true)
    }

    async fn count(&self) -> Result<u64, CatalogueRepositoryError> {
        let categories = self.categories.read().map_err(catalogue_poisoned)?;
        Ok(count_of(categories.len()))
    }
}

#[async_trait]
impl SubcategoryRepository for InMemoryStore {
    async fn list(
        &self,
        category: Option<CategoryId>,
        active_only: bool,
    ) -> Result<Vec<Subcategory>, CatalogueRepositoryError> {
        let subcategories = self.subcategories.read().map_err(catalogue_poisoned)?;
        let mut listed: Vec<Subcategory> = subcategories
            .values()
            .filter(|subcategory| {
                category.is_none_or(|id| subcategory.details.category_id == id)
                    && (!active_only || subcategory.details.is_active)
            })
            .cloned()
            .collect();
        listed.sort_by(Subcategory::display_order);
        Ok(listed)
    }

    async fn find(
        &self,
        id: &SubcategoryId,
    ) -> Result<Option<Subcategory>, CatalogueRepositoryError> {
        let subcategories = self.subcategories.read().map_err(catalogue_poisoned)?;
        Ok(subcategories.get(id).cloned())
    }

    async fn insert(&self, subcategory: &Subcategory) -> Result<(), CatalogueRepositoryError> {
        let categories = self.categories.read().map_err(catalogue_poisoned)?;
        let mut subcategories = self.subcategories.write().map_err(catalogue_poisoned)?;
        require_parent(&categories, subcategory)?;
        if subcategory_name_taken(&subcategories, subcategory) {
            return Err(CatalogueRepositoryError::duplicate(
                "subcategory name already exists in this category",
            ));
        }
        subcategories.insert(subcategory.id, subcategory.clone());
        Ok(())
    }

    async fn update(&self, subcategory: &Subcategory) -> Result<bool, CatalogueRepositoryError> {
        let categories = self.categories.read().map_err(catalogue_poisoned)?;
        let mut subcategories = self.subcategories.write().map_err(catalogue_poisoned)?;
        if !subcategories.contains_key(&subcategory.id) {
            return Ok(false);
        }
        require_parent(&categories, subcategory)?;
        if subcategory_name_taken(&subcategories, subcategory) {
            return Err(CatalogueRepositoryError::duplicate(
                "subcategory name already exists in this category",
            ));
        }
        subcategories.insert(subcategory.id, subcategory.clone());
        Ok(true)
    }

    async fn delete(&self, id: &SubcategoryId) -> Result<bool, CatalogueRepositoryError> {
        let mut subcategories = self.subcategories.write().map_err(catalogue_poisoned)?;
        Ok(subcategories.remove(id).is_some())
    }

    async fn count(&self) -> Result<u64, CatalogueRepositoryError> {
        let subcategories = self.subcategories.read().map_err(catalogue_poisoned)?;
        Ok(count_of(subcategories.len()))
    }
}

#[async_trait]
impl ProductRepository for InMemoryStore {
    async fn list(
        &self,
        query: &ProductListQuery,
    ) -> Result<(Vec<Product>, u64), CatalogueRepositoryError> {
        let products = self.products.read().map_err(catalogue_poisoned)?;
        let mut matching: Vec<&Product> = products
            .values()
            .filter(|product| query.filter.matches(product))
            .collect();
        matching.sort_by(|a, b| query.sort.compare(a, b));
        let total = count_of(matching.len());
        let offset = usize::try_from(query.page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.page.limit()).unwrap_or(usize::MAX);
        let page = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        Ok((page, total))
    }

    async fn find(&self, id: &ProductId) -> Result<Option<Product>, CatalogueRepositoryError> {
        let products = self.products.read().map_err(catalogue_poisoned)?;
        Ok(products.get(id).cloned())
    }

    async fn find_many(&self, ids: &[ProductId]) -> Result<Vec<Product>, CatalogueRepositoryError> {
        let products = self.products.read().map_err(catalogue_poisoned)?;
        Ok(ids.iter().filter_map(|id| products.get(id).cloned()).collect())
    }

    async fn insert(&self, product: &Product) -> Result<(), CatalogueRepositoryError> {
        let mut products = self.products.write().map_err(catalogue_poisoned)?;
        products.insert(product.id, product.clone());
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<bool, CatalogueRepositoryError> {
        let mut products = self.products.write().map_err(catalogue_poisoned)?;
        match products.get_mut(&product.id) {
            Some(slot) => {
                *slot = product.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &ProductId) -> Result<bool, CatalogueRepositoryError> {
        let mut products = self.products.write().map_err(catalogue_poisoned)?;
        Ok(products.remove(id).is_some())
    }

    async fn count(&self) -> Result<u64, CatalogueRepositoryError> {
        let products = self.products.read().map_err(catalogue_poisoned)?;
        Ok(count_of(products.len()))
    }

    async fn count_in_category(&self, id: &CategoryId) -> Result<u64, CatalogueRepositoryError> {
        let products = self.products.read().map_err(catalogue_poisoned)?;
        Ok(count_of(
            products
                .values()
                .filter(|product| product.details.category_id == *id)
                .count(),
        ))
    }

    async fn count_in_subcategory(
        &self,
        id: &SubcategoryId,
    ) -> Result<u64, CatalogueRepositoryError> {
        let products = self.products.read().map_err(catalogue_poisoned)?;
        Ok(count_of(
            products
                .values()
                .filter(|product| product.details.subcategory_id == Some(*id))
                .count(),
        ))
    }
}

#[async_trait]
impl OrderRepository for InMemoryStore {
    async fn insert(&self, order: &Order) -> Result<(), OrderRepositoryError> {
        let mut orders = self.orders.write().map_err(orders_poisoned)?;
        orders.push(order.clone());
        Ok(())
    }

    async fn list_for_user(&self, user: &UserId) -> Result<Vec<Order>, OrderRepositoryError> {
        let orders = self.orders.read().map_err(orders_poisoned)?;
        let mut mine: Vec<Order> = orders
            .iter()
            .filter(|order| order.user_id == *user)
            .cloned()
            .collect();
        mine.sort_by(Order::newest_first);
        Ok(mine)
    }

    async fn list_recent(&self, limit: Option<u32>) -> Result<Vec<Order>, OrderRepositoryError> {
        let orders = self.orders.read().map_err(orders_poisoned)?;
        let mut all = orders.clone();
        all.sort_by(Order::newest_first);
        if let Some(limit) = limit {
            all.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }
        Ok(all)
    }

    async fn count(&self) -> Result<u64, OrderRepositoryError> {
        let orders = self.orders.read().map_err(orders_poisoned)?;
        Ok(count_of(orders.len()))
    }
}

#[cfg(test)]
mod tests;
