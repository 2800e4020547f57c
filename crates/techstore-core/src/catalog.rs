//! # Catalog
//!
//! The fixed, immutable list of purchasable products.
//!
//! Built once at startup and shared read-only afterwards. Iteration order is
//! declaration order, which is the order of the product grid.

use std::collections::HashSet;

use crate::error::{CoreError, CoreResult};
use crate::types::{Product, ProductId};
use crate::validation::validate_product;

/// Immutable product catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate ids and invalid products.
    pub fn new(products: Vec<Product>) -> CoreResult<Self> {
        let mut seen = HashSet::with_capacity(products.len());

        for product in &products {
            validate_product(product)?;
            if !seen.insert(product.id) {
                return Err(CoreError::DuplicateProduct(product.id));
            }
        }

        Ok(Catalog { products })
    }

    /// Looks up a product by id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Looks up a product by id, failing with `ProductNotFound`.
    pub fn require(&self, id: ProductId) -> CoreResult<&Product> {
        self.get(id).ok_or(CoreError::ProductNotFound(id))
    }

    /// Products in grid order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// The storefront's built-in catalog.
impl Default for Catalog {
    fn default() -> Self {
        Catalog {
            products: vec![
                Product::new(1, "Laptop Pro", 1299, "💻", "Electronics"),
                Product::new(2, "Smartphone X", 899, "📱", "Electronics"),
                Product::new(3, "Wireless Headphones", 199, "🎧", "Audio"),
                Product::new(4, "Tablet Plus", 599, "📱", "Electronics"),
                Product::new(5, "Smartwatch", 299, "⌚", "Accessories"),
                Product::new(6, "4K Camera", 799, "📷", "Photography"),
            ],
        }
    }
}
