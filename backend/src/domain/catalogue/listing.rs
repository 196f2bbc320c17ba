//! Filtering, ordering, and pagination of product listings.
//!
//! Both persistence adapters implement the same semantics: the in-memory
//! store calls [`ProductFilter::matches`] and [`ProductSort::compare`]
//! directly, while the Diesel adapter translates them into SQL.

use std::cmp::Ordering;

use super::Product;
use crate::domain::{CategoryId, SubcategoryId};

/// Page size of the public product listing.
pub const STOREFRONT_PAGE_SIZE: u32 = 12;
/// Page size of the back-office product table.
pub const ADMIN_PAGE_SIZE: u32 = 10;
/// Default number of featured products.
pub const FEATURED_LIMIT: u32 = 6;
/// Largest page a client may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Sort keys accepted by product listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductSort {
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
    #[default]
    Newest,
}

impl ProductSort {
    /// Interpret a `sort` query value. Unknown or missing keys fall back to
    /// newest first.
    ///
    /// # Examples
    /// ```
    /// use storefront::domain::ProductSort;
    ///
    /// assert_eq!(ProductSort::parse_lenient(Some("price_desc")), ProductSort::PriceDesc);
    /// assert_eq!(ProductSort::parse_lenient(Some("popular")), ProductSort::Newest);
    /// ```
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("price_asc") => Self::PriceAsc,
            Some("price_desc") => Self::PriceDesc,
            Some("name_asc") => Self::NameAsc,
            Some("name_desc") => Self::NameDesc,
            _ => Self::Newest,
        }
    }

    /// Total order over products. Ties fall back to newest first, then id.
    pub fn compare(self, a: &Product, b: &Product) -> Ordering {
        let primary = match self {
            Self::PriceAsc => a.details.price.bgn().total_cmp(&b.details.price.bgn()),
            Self::PriceDesc => b.details.price.bgn().total_cmp(&a.details.price.bgn()),
            Self::NameAsc => name_key(a).cmp(&name_key(b)),
            Self::NameDesc => name_key(b).cmp(&name_key(a)),
            Self::Newest => Ordering::Equal,
        };
        primary
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| a.id.cmp(&b.id))
    }
}

fn name_key(product: &Product) -> String {
    product.details.name.to_lowercase()
}

/// Predicates applied to a product listing. `None` means "do not filter".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub category_id: Option<CategoryId>,
    pub subcategory_id: Option<SubcategoryId>,
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub in_stock: Option<bool>,
    pub featured: Option<bool>,
    /// Hide products an administrator switched off.
    pub active_only: bool,
}

impl ProductFilter {
    /// Trimmed, non-empty search term.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }

    pub fn matches(&self, product: &Product) -> bool {
        let details = &product.details;
        let price = details.price.bgn();

        self.category_id.is_none_or(|id| details.category_id == id)
            && self
                .subcategory_id
                .is_none_or(|id| details.subcategory_id == Some(id))
            && self.min_price.is_none_or(|min| price >= min)
            && self.max_price.is_none_or(|max| price <= max)
            && self.in_stock.is_none_or(|flag| details.in_stock == flag)
            && self.featured.is_none_or(|flag| details.featured == flag)
            && (!self.active_only || details.is_active)
            && self.search_term().is_none_or(|term| {
                let needle = term.to_lowercase();
                details.name.to_lowercase().contains(&needle)
                    || details.description.to_lowercase().contains(&needle)
            })
    }
}

/// Why a page request was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    #[error("page must be at least 1")]
    PageOutOfRange,
    #[error("limit must be between 1 and {max}")]
    LimitOutOfRange { max: u32 },
}

impl PageRequestError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::PageOutOfRange => "page",
            Self::LimitOutOfRange { .. } => "limit",
        }
    }
}

/// One-based page number and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::PageOutOfRange);
        }
        if limit == 0 || limit > MAX_PAGE_SIZE {
            return Err(PageRequestError::LimitOutOfRange { max: MAX_PAGE_SIZE });
        }
        Ok(Self { page, limit })
    }

    /// First page of `limit` items, clamped into the accepted range.
    pub fn first(limit: u32) -> Self {
        Self {
            page: 1,
            limit: limit.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub const fn page(self) -> u32 {
        self.page
    }

    pub const fn limit(self) -> u32 {
        self.limit
    }

    pub fn offset(self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

/// A complete listing request.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductListQuery {
    pub filter: ProductFilter,
    pub sort: ProductSort,
    pub page: PageRequest,
}

impl ProductListQuery {
    /// Featured, in-stock, active products, newest first.
    pub fn featured(limit: u32) -> Self {
        Self {
            filter: ProductFilter {
                featured: Some(true),
                in_stock: Some(true),
                active_only: true,
                ..ProductFilter::default()
            },
            sort: ProductSort::Newest,
            page: PageRequest::first(limit),
        }
    }
}

/// A slice of results plus the total number of matches.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub request: PageRequest,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(u64::from(self.request.limit()))
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.request.page()) < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.request.page() > 1
    }

    /// Transform every item while keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            request: self.request,
        }
    }
}
