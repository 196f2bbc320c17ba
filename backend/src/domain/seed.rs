//! Demo catalogue and administrator account for fresh installations.
//!
//! Seeding only runs against a store without categories, so restarting a
//! seeded server never duplicates data.

use std::collections::BTreeMap;
use std::sync::Arc;

use mockable::Clock;
use tracing::{info, warn};

use super::port_error_mapping::{map_catalogue_error, map_hasher_error, map_user_error};
use super::ports::{
    CategoryRepository, PasswordHasher, ProductRepository, SubcategoryRepository, UserRepository,
    UserRepositoryError,
};
use super::{
    Category, CategoryDetails, CategoryId, Email, Error, Price, Product, ProductDetails,
    ProductId, StoredUser, Subcategory, SubcategoryDetails, SubcategoryId, User, UserId, Username,
};

/// Credentials of the seeded administrator.
#[derive(Debug, Clone)]
pub struct SeedAdmin {
    pub email: Email,
    pub username: Username,
    pub password: String,
}

/// What a seeding run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store already had categories; nothing was written.
    Skipped,
    Seeded {
        categories: usize,
        subcategories: usize,
        products: usize,
    },
}

struct CategorySeed {
    name: &'static str,
    description: &'static str,
    subcategories: &'static [(&'static str, &'static str)],
}

struct ProductSeed {
    name: &'static str,
    description: &'static str,
    price: f64,
    image: &'static str,
    category: &'static str,
    subcategory: Option<&'static str>,
    featured: bool,
    stock: u32,
}

const CATEGORIES: &[CategorySeed] = &[
    CategorySeed {
        name: "Люстри",
        description: "Елегантни люстри за всяка стая",
        subcategories: &[
            ("Кристални люстри", "Луксозни кристални люстри"),
            ("Модерни люстри", "Съвременни дизайнерски люстри"),
            ("Класически люстри", "Традиционни и винтидж люстри"),
        ],
    },
    CategorySeed {
        name: "Настолни лампи",
        description: "Стилни настолни лампи за работа и четене",
        subcategories: &[
            ("Офис лампи", "Настолни лампи за работно място"),
            ("Нощни лампи", "Лампи за спалня и нощно осветление"),
            ("Декоративни лампи", "Дизайнерски настолни лампи"),
        ],
    },
    CategorySeed {
        name: "Стенни лампи",
        description: "Модерни стенни лампи за акцентно осветление",
        subcategories: &[],
    },
    CategorySeed {
        name: "Подови лампи",
        description: "Дизайнерски подови лампи за атмосферно осветление",
        subcategories: &[],
    },
    CategorySeed {
        name: "LED осветление",
        description: "Енергоспестяващо LED осветление",
        subcategories: &[
            ("LED панели", "Таванни LED панели"),
            ("LED ленти", "Гъвкави LED ленти за декорация"),
            ("Smart LED", "Интелигентно LED осветление"),
        ],
    },
];

const PRODUCTS: &[ProductSeed] = &[
    ProductSeed {
        name: "Кристална люстра \"Диамант\"",
        description: "Луксозна кристална люстра с 12 крака, перфектна за елегантни трапезарии и салони.",
        price: 2599.99,
        image: "https://images.unsplash.com/photo-1513506003901-1e6a229e2d15?w=400&h=400&fit=crop",
        category: "Люстри",
        subcategory: Some("Кристални люстри"),
        featured: true,
        stock: 5,
    },
    ProductSeed {
        name: "Модерна настолна лампа \"Минимал\"",
        description: "Стилна LED настолна лампа с безжично зареждане и регулируема яркост.",
        price: 199.99,
        image: "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=400&h=400&fit=crop",
        category: "Настолни лампи",
        subcategory: Some("Офис лампи"),
        featured: false,
        stock: 15,
    },
    ProductSeed {
        name: "Стенна лампа \"Арт Деко\"",
        description: "Винтидж стенна лампа в стил Арт Деко с месингова отделка.",
        price: 299.99,
        image: "https://images.unsplash.com/photo-1524484485831-a92ffc0de03f?w=400&h=400&fit=crop",
        category: "Стенни лампи",
        subcategory: None,
        featured: true,
        stock: 8,
    },
    ProductSeed {
        name: "Подова лампа \"Скандинавски стил\"",
        description: "Елегантна подова лампа с дървена основа и текстилен абажур.",
        price: 399.99,
        image: "https://images.unsplash.com/photo-1586023492125-27b2c045efd7?w=400&h=400&fit=crop",
        category: "Подови лампи",
        subcategory: None,
        featured: false,
        stock: 12,
    },
    ProductSeed {
        name: "LED панел \"Умен дом\"",
        description: "Интелигентен LED панел с контрол чрез смартфон и променлива цветова температура.",
        price: 159.99,
        image: "https://images.unsplash.com/photo-1558618047-3c8c76ca7d13?w=400&h=400&fit=crop",
        category: "LED осветление",
        subcategory: Some("LED панели"),
        featured: true,
        stock: 20,
    },
    ProductSeed {
        name: "Индустриална люстра \"Лофт\"",
        description: "Метална люстра в индустриален стил с Edison лампи.",
        price: 899.99,
        image: "https://images.unsplash.com/photo-1524484485831-a92ffc0de03f?w=400&h=400&fit=crop",
        category: "Люстри",
        subcategory: Some("Модерни люстри"),
        featured: false,
        stock: 3,
    },
    ProductSeed {
        name: "Настолна лампа \"Ретро\"",
        description: "Винтидж настолна лампа с медна основа и класически дизайн.",
        price: 149.99,
        image: "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=400&h=400&fit=crop",
        category: "Настолни лампи",
        subcategory: Some("Декоративни лампи"),
        featured: false,
        stock: 18,
    },
    ProductSeed {
        name: "LED лента \"Амбиент\"",
        description: "Гъвкава RGB LED лента с дистанционно управление.",
        price: 79.99,
        image: "https://images.unsplash.com/photo-1558618047-3c8c76ca7d13?w=400&h=400&fit=crop",
        category: "LED осветление",
        subcategory: Some("LED ленти"),
        featured: false,
        stock: 25,
    },
];

/// Repositories and helpers the seeder writes through.
#[derive(Clone)]
pub struct DemoDataSeeder {
    pub users: Arc<dyn UserRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub subcategories: Arc<dyn SubcategoryRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub clock: Arc<dyn Clock>,
}

impl DemoDataSeeder {
    /// Seed the administrator and demo catalogue unless categories exist.
    pub async fn seed(&self, admin: &SeedAdmin) -> Result<SeedOutcome, Error> {
        if self.categories.count().await.map_err(map_catalogue_error)? > 0 {
            info!("store already holds categories; skipping demo data");
            return Ok(SeedOutcome::Skipped);
        }

        self.seed_admin(admin).await?;

        let now = self.clock.utc();
        let mut category_ids: BTreeMap<&str, CategoryId> = BTreeMap::new();
        let mut subcategory_ids: BTreeMap<&str, SubcategoryId> = BTreeMap::new();
        for (position, seed) in (1_i32..).zip(CATEGORIES) {
            let category = Category {
                id: CategoryId::random(),
                details: CategoryDetails {
                    name: seed.name.to_owned(),
                    description: seed.description.to_owned(),
                    image: String::new(),
                    is_active: true,
                    sort_order: position,
                },
                created_at: now,
                updated_at: now,
            };
            self.categories
                .insert(&category)
                .await
                .map_err(map_catalogue_error)?;
            category_ids.insert(seed.name, category.id);

            for (order, (name, description)) in (1_i32..).zip(seed.subcategories) {
                let subcategory = Subcategory {
                    id: SubcategoryId::random(),
                    details: SubcategoryDetails {
                        name: (*name).to_owned(),
                        description: (*description).to_owned(),
                        category_id: category.id,
                        image: String::new(),
                        is_active: true,
                        sort_order: order,
                    },
                    created_at: now,
                    updated_at: now,
                };
                self.subcategories
                    .insert(&subcategory)
                    .await
                    .map_err(map_catalogue_error)?;
                subcategory_ids.insert(name, subcategory.id);
            }
        }

        let mut products = 0;
        for seed in PRODUCTS {
            let Some(category_id) = category_ids.get(seed.category).copied() else {
                warn!(product = seed.name, "demo product references unknown category");
                continue;
            };
            let price = Price::new(seed.price)
                .map_err(|err| Error::internal(format!("demo price for {}: {err}", seed.name)))?;
            let product = Product {
                id: ProductId::random(),
                details: ProductDetails {
                    name: seed.name.to_owned(),
                    description: seed.description.to_owned(),
                    price,
                    original_price: None,
                    image: seed.image.to_owned(),
                    images: vec![seed.image.to_owned()],
                    category_id,
                    subcategory_id: seed
                        .subcategory
                        .and_then(|name| subcategory_ids.get(name).copied()),
                    brand: None,
                    model: None,
                    specifications: BTreeMap::new(),
                    tags: Vec::new(),
                    in_stock: true,
                    stock_quantity: seed.stock,
                    featured: seed.featured,
                    rating: 0.0,
                    review_count: 0,
                    is_active: true,
                },
                created_at: now,
                updated_at: now,
            };
            self.products
                .insert(&product)
                .await
                .map_err(map_catalogue_error)?;
            products += 1;
        }

        let outcome = SeedOutcome::Seeded {
            categories: category_ids.len(),
            subcategories: subcategory_ids.len(),
            products,
        };
        info!(?outcome, "demo data seeded");
        Ok(outcome)
    }

    async fn seed_admin(&self, admin: &SeedAdmin) -> Result<(), Error> {
        let password_hash = self.hasher.hash(&admin.password).map_err(map_hasher_error)?;
        let stored = StoredUser {
            user: User {
                id: UserId::random(),
                email: admin.email.clone(),
                username: admin.username.clone(),
                first_name: "Admin".to_owned(),
                last_name: "User".to_owned(),
                is_admin: true,
                created_at: self.clock.utc(),
            },
            password_hash,
        };
        match self.users.insert(&stored).await {
            Ok(()) => {
                info!(email = %admin.email, "demo administrator created");
                Ok(())
            }
            Err(UserRepositoryError::DuplicateEmail {} | UserRepositoryError::DuplicateUsername {}) => {
                info!(email = %admin.email, "administrator account already present");
                Ok(())
            }
            Err(err) => Err(map_user_error(err)),
        }
    }
}
