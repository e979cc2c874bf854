//! Catalog and cart.
//!
//! Every product sells at one flat price. Money is kept in cents.

use crate::style::Color;

/// Price of every product, in cents.
pub const UNIT_PRICE_CENTS: u64 = 1999;

/// A product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Product {
    /// Catalog id.
    pub id: u32,
    /// Display name.
    pub label: &'static str,
    /// Image path.
    pub image: &'static str,
}

impl Product {
    /// Creates a product.
    #[must_use]
    pub const fn new(id: u32, label: &'static str, image: &'static str) -> Self {
        Self { id, label, image }
    }
}

/// One horizontal row of product cards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductRow {
    /// Ring colour framing each card.
    pub ring: Color,
    /// Cards, left to right.
    pub products: &'static [Product],
}

const FIRST_ROW: [Product; 5] = [
    Product::new(1, "ThreadFury", "/prod2.jpg"),
    Product::new(2, "DripNest", "/prod3.jpg"),
    Product::new(3, "VibeStitch", "/prod4.jpg"),
    Product::new(4, "NoChill Tees", "/prod5.jpg"),
    Product::new(5, "CoolCruck", "/prod11.jpg"),
];

const SECOND_ROW: [Product; 5] = [
    Product::new(6, "NeonNude", "/prod6.jpg"),
    Product::new(7, "Savage Cotton", "/prod7.jpg"),
    Product::new(8, "INK'D", "/prod8.jpg"),
    Product::new(9, "DripNest", "/prod9.jpg"),
    Product::new(10, "VibeStitch", "/prod10.jpg"),
];

/// The two product rows shown on the page.
#[must_use]
pub fn catalog() -> [ProductRow; 2] {
    [
        ProductRow {
            ring: Color::RING_PURPLE,
            products: &FIRST_ROW,
        },
        ProductRow {
            ring: Color::RING_PINK,
            products: &SECOND_ROW,
        },
    ]
}

/// Formats cents as dollars, e.g. `3998` -> `"$39.98"`.
#[must_use]
pub fn format_price(cents: u64) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

/// Items added this session, in order. Duplicates are separate lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<Product>,
}

impl Cart {
    /// Creates an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a product.
    pub fn add(&mut self, product: Product) {
        self.items.push(product);
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if nothing was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Lines in the order they were added.
    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// Item count times the unit price, in cents.
    #[must_use]
    pub fn subtotal_cents(&self) -> u64 {
        self.items.len() as u64 * UNIT_PRICE_CENTS
    }

    /// Subtotal formatted for display.
    #[must_use]
    pub fn subtotal(&self) -> String {
        format_price(self.subtotal_cents())
    }
}
