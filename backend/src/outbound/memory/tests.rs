//! Store semantics the services rely on: uniqueness, cascade, listing.

use std::collections::BTreeMap;

use chrono::{Duration, TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::{
    CategoryDetails, Email, OrderItem, PageRequest, PasswordHash, Price, ProductDetails,
    ProductFilter, ProductSort, SubcategoryDetails, Username,
};

fn at(minute: i64) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, 1, 8, 0, 0)
        .single()
        .expect("valid instant")
        + Duration::minutes(minute)
}

fn category(name: &str) -> Category {
    Category {
        id: CategoryId::random(),
        details: CategoryDetails {
            name: name.to_owned(),
            description: String::new(),
            image: String::new(),
            is_active: true,
            sort_order: 0,
        },
        created_at: at(0),
        updated_at: at(0),
    }
}

fn subcategory(name: &str, parent: &Category) -> Subcategory {
    Subcategory {
        id: SubcategoryId::random(),
        details: SubcategoryDetails {
            name: name.to_owned(),
            description: String::new(),
            category_id: parent.id,
            image: String::new(),
            is_active: true,
            sort_order: 0,
        },
        created_at: at(0),
        updated_at: at(0),
    }
}

fn product(name: &str, price: f64, parent: &Category, minute: i64) -> Product {
    Product {
        id: ProductId::random(),
        details: ProductDetails {
            name: name.to_owned(),
            description: String::new(),
            price: Price::new(price).expect("valid price"),
            original_price: None,
            image: String::new(),
            images: Vec::new(),
            category_id: parent.id,
            subcategory_id: None,
            brand: None,
            model: None,
            specifications: BTreeMap::new(),
            tags: Vec::new(),
            in_stock: true,
            stock_quantity: 3,
            featured: false,
            rating: 0.0,
            review_count: 0,
            is_active: true,
        },
        created_at: at(minute),
        updated_at: at(minute),
    }
}

fn account(email: &str, username: &str) -> StoredUser {
    StoredUser {
        user: User {
            id: UserId::random(),
            email: Email::parse(email).expect("valid email"),
            username: Username::parse(username).expect("valid username"),
            first_name: String::new(),
            last_name: String::new(),
            is_admin: false,
            created_at: at(0),
        },
        password_hash: PasswordHash::new("$test$secret"),
    }
}

#[fixture]
fn store() -> InMemoryStore {
    InMemoryStore::new()
}

#[rstest]
#[tokio::test]
async fn duplicate_email_and_username_are_distinguished(store: InMemoryStore) {
    UserRepository::insert(&store, &account("ana@example.com", "ana"))
        .await
        .expect("first insert");

    let same_email = UserRepository::insert(&store, &account("ANA@example.com", "other")).await;
    assert_eq!(same_email, Err(UserRepositoryError::duplicate_email()));

    let same_username = UserRepository::insert(&store, &account("b@example.com", "Ana")).await;
    assert_eq!(same_username, Err(UserRepositoryError::duplicate_username()));

    assert_eq!(UserRepository::count(&store).await, Ok(1));
}

#[rstest]
#[tokio::test]
async fn category_names_are_unique_on_insert_and_update(store: InMemoryStore) {
    let lamps = category("Лампиони");
    let chandeliers = category("Люстри");
    CategoryRepository::insert(&store, &lamps).await.expect("insert");
    CategoryRepository::insert(&store, &chandeliers)
        .await
        .expect("insert");

    let clash = CategoryRepository::insert(&store, &category("Люстри")).await;
    assert!(matches!(clash, Err(CatalogueRepositoryError::Duplicate { .. })));

    let mut renamed = lamps.clone();
    renamed.details.name = "Люстри".to_owned();
    let rename = CategoryRepository::update(&store, &renamed).await;
    assert!(matches!(rename, Err(CatalogueRepositoryError::Duplicate { .. })));

    // Saving a category under its own name is not a clash.
    assert_eq!(CategoryRepository::update(&store, &lamps).await, Ok(true));
}

#[rstest]
#[tokio::test]
async fn subcategory_names_are_unique_per_category(store: InMemoryStore) {
    let chandeliers = category("Люстри");
    let pendants = category("Пендели");
    CategoryRepository::insert(&store, &chandeliers)
        .await
        .expect("insert");
    CategoryRepository::insert(&store, &pendants)
        .await
        .expect("insert");
    let modern = subcategory("Модерни", &chandeliers);
    SubcategoryRepository::insert(&store, &modern)
        .await
        .expect("insert");

    let clash = SubcategoryRepository::insert(&store, &subcategory("Модерни", &chandeliers)).await;
    assert!(matches!(clash, Err(CatalogueRepositoryError::Duplicate { .. })));

    SubcategoryRepository::insert(&store, &subcategory("Модерни", &pendants))
        .await
        .expect("same name in another category");
}

#[rstest]
#[tokio::test]
async fn subcategories_need_an_existing_category(store: InMemoryStore) {
    let chandeliers = category("Люстри");
    let removed = category("Изтрита");
    CategoryRepository::insert(&store, &chandeliers)
        .await
        .expect("insert");

    let orphan = SubcategoryRepository::insert(&store, &subcategory("Модерни", &removed)).await;
    assert_eq!(
        orphan,
        Err(CatalogueRepositoryError::missing_parent("category not found"))
    );

    let modern = subcategory("Модерни", &chandeliers);
    SubcategoryRepository::insert(&store, &modern)
        .await
        .expect("insert");
    let mut moved = modern.clone();
    moved.details.category_id = removed.id;
    let moved = SubcategoryRepository::update(&store, &moved).await;
    assert!(matches!(moved, Err(CatalogueRepositoryError::MissingParent { .. })));

    let kept = SubcategoryRepository::find(&store, &modern.id)
        .await
        .expect("find");
    assert_eq!(kept, Some(modern));
}

#[rstest]
#[tokio::test]
async fn deleting_a_category_removes_its_subcategories(store: InMemoryStore) {
    let chandeliers = category("Люстри");
    let kept = category("Аплици");
    CategoryRepository::insert(&store, &chandeliers)
        .await
        .expect("insert");
    CategoryRepository::insert(&store, &kept).await.expect("insert");
    SubcategoryRepository::insert(&store, &subcategory("Модерни", &chandeliers))
        .await
        .expect("insert");
    SubcategoryRepository::insert(&store, &subcategory("Стенни", &kept))
        .await
        .expect("insert");

    assert_eq!(
        CategoryRepository::delete(&store, &chandeliers.id).await,
        Ok(true)
    );
    let remaining = SubcategoryRepository::list(&store, None, false)
        .await
        .expect("list");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].details.category_id, kept.id);

    assert_eq!(
        CategoryRepository::delete(&store, &chandeliers.id).await,
        Ok(false)
    );
}

#[rstest]
#[tokio::test]
async fn product_listing_filters_sorts_and_pages(store: InMemoryStore) {
    let chandeliers = category("Люстри");
    let other = category("Аплици");
    for (name, price, minute) in [("Б", 300.0, 1), ("А", 100.0, 2), ("В", 200.0, 3)] {
        ProductRepository::insert(&store, &product(name, price, &chandeliers, minute))
            .await
            .expect("insert");
    }
    ProductRepository::insert(&store, &product("Г", 50.0, &other, 4))
        .await
        .expect("insert");

    let query = ProductListQuery {
        filter: ProductFilter {
            category_id: Some(chandeliers.id),
            ..ProductFilter::default()
        },
        sort: ProductSort::PriceAsc,
        page: PageRequest::new(1, 2).expect("page"),
    };
    let (first, total) = ProductRepository::list(&store, &query).await.expect("list");
    assert_eq!(total, 3);
    let names: Vec<_> = first.iter().map(|p| p.details.name.as_str()).collect();
    assert_eq!(names, ["А", "В"]);

    let second = ProductListQuery {
        page: PageRequest::new(2, 2).expect("page"),
        ..query
    };
    let (rest, _) = ProductRepository::list(&store, &second).await.expect("list");
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].details.name, "Б");

    assert_eq!(
        ProductRepository::count_in_category(&store, &chandeliers.id).await,
        Ok(3)
    );
}

#[rstest]
#[tokio::test]
async fn recent_orders_are_newest_first_and_limited(store: InMemoryStore) {
    let buyer = UserId::random();
    let item = OrderItem {
        product_id: ProductId::random(),
        quantity: 1,
        unit_price: Price::new(10.0).expect("price"),
    };
    for minute in [5, 1, 9] {
        let order = Order::place(buyer, vec![item], at(minute));
        OrderRepository::insert(&store, &order)
            .await
            .expect("insert");
    }
    OrderRepository::insert(&store, &Order::place(UserId::random(), vec![item], at(7)))
        .await
        .expect("insert");

    let recent = OrderRepository::list_recent(&store, Some(2))
        .await
        .expect("recent");
    let stamps: Vec<_> = recent.iter().map(|order| order.created_at).collect();
    assert_eq!(stamps, [at(9), at(7)]);

    let mine = OrderRepository::list_for_user(&store, &buyer)
        .await
        .expect("mine");
    assert_eq!(mine.len(), 3);
    assert_eq!(mine[0].created_at, at(9));
}
