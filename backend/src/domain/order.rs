//! Orders placed from the cart.
//!
//! An order freezes the unit price of every line at placement time so later
//! catalogue edits never change what a customer was charged.

use chrono::{DateTime, Utc};

use super::{OrderId, Price, ProductId, ProductSummary, UserId, round_to_cents};

/// Largest quantity accepted on a single line.
pub const MAX_LINE_QUANTITY: u32 = 10_000;

/// Why an order request was rejected before touching the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OrderValidationError {
    #[error("order must contain at least one item")]
    Empty,
    #[error("item {index} quantity must be between 1 and {max}")]
    QuantityOutOfRange { index: usize, max: u32 },
}

/// Product and quantity requested by the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Validated cart contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    lines: Vec<OrderLine>,
}

impl OrderRequest {
    /// Validate raw `(product, quantity)` pairs.
    ///
    /// # Examples
    /// ```
    /// use storefront::domain::{OrderRequest, OrderValidationError, ProductId};
    ///
    /// assert_eq!(OrderRequest::new(Vec::new()), Err(OrderValidationError::Empty));
    /// let request = OrderRequest::new(vec![(ProductId::random(), 2)]).unwrap();
    /// assert_eq!(request.lines().len(), 1);
    /// ```
    pub fn new(raw: Vec<(ProductId, i64)>) -> Result<Self, OrderValidationError> {
        if raw.is_empty() {
            return Err(OrderValidationError::Empty);
        }
        let lines = raw
            .into_iter()
            .enumerate()
            .map(|(index, (product_id, quantity))| {
                u32::try_from(quantity)
                    .ok()
                    .filter(|qty| (1..=MAX_LINE_QUANTITY).contains(qty))
                    .map(|quantity| OrderLine {
                        product_id,
                        quantity,
                    })
                    .ok_or(OrderValidationError::QuantityOutOfRange {
                        index,
                        max: MAX_LINE_QUANTITY,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { lines })
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }
}

/// A priced order line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: Price,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        self.unit_price.bgn() * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
    /// Sum of line totals in BGN, rounded to cents.
    pub total: f64,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Create a new order, computing its total from the priced lines.
    pub fn place(user_id: UserId, items: Vec<OrderItem>, created_at: DateTime<Utc>) -> Self {
        let total = round_to_cents(items.iter().map(OrderItem::line_total).sum());
        Self {
            id: OrderId::random(),
            user_id,
            items,
            total,
            created_at,
        }
    }

    /// Newest orders first; ties by id for a stable order.
    pub fn newest_first(a: &Self, b: &Self) -> std::cmp::Ordering {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    }
}

/// Customer details shown in the back office.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerSummary {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

/// An order line with the product resolved, when it still exists.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemView {
    pub item: OrderItem,
    pub product: Option<ProductSummary>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderView {
    pub order: Order,
    pub items: Vec<OrderItemView>,
    pub customer: Option<CustomerSummary>,
}
