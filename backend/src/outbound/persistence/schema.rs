//! Diesel table definitions for the storefront schema.
//!
//! These must match `backend/migrations` exactly; `diesel print-schema`
//! against a migrated database regenerates them.

diesel::table! {
    /// Customer and administrator accounts. `email` and `username` are
    /// unique and stored lower-cased.
    users (id) {
        id -> Uuid,
        email -> Varchar,
        username -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Text,
        first_name -> Text,
        last_name -> Text,
        is_admin -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    categories (id) {
        id -> Uuid,
        name -> Varchar,
        description -> Text,
        image -> Text,
        is_active -> Bool,
        sort_order -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Unique on `(category_id, name)`; rows cascade with their category.
    subcategories (id) {
        id -> Uuid,
        name -> Varchar,
        description -> Text,
        category_id -> Uuid,
        image -> Text,
        is_active -> Bool,
        sort_order -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    products (id) {
        id -> Uuid,
        name -> Varchar,
        description -> Text,
        /// BGN amount.
        price -> Float8,
        original_price -> Nullable<Float8>,
        image -> Text,
        images -> Array<Text>,
        category_id -> Uuid,
        subcategory_id -> Nullable<Uuid>,
        brand -> Nullable<Text>,
        model -> Nullable<Text>,
        /// Flat JSON object of string values.
        specifications -> Jsonb,
        tags -> Array<Text>,
        in_stock -> Bool,
        stock_quantity -> Int4,
        featured -> Bool,
        rating -> Float8,
        review_count -> Int4,
        is_active -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    orders (id) {
        id -> Uuid,
        user_id -> Uuid,
        total -> Float8,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Order lines in checkout order. `product_id` has no foreign key so
    /// history survives product deletion.
    order_items (order_id, position) {
        order_id -> Uuid,
        position -> Int4,
        product_id -> Uuid,
        quantity -> Int4,
        unit_price -> Float8,
    }
}

diesel::joinable!(subcategories -> categories (category_id));
diesel::joinable!(orders -> users (user_id));
diesel::joinable!(order_items -> orders (order_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    categories,
    subcategories,
    products,
    orders,
    order_items,
);
