//! Page shell state: cart panel and checkout overlay.
//!
//! Adding a product opens the cart. Proceeding to checkout closes the cart
//! and shows the form. The host reads two animated values to place the
//! overlays: the cart panel's horizontal offset (1 = off-screen right,
//! 0 = docked), carried by a spring, and the checkout overlay's opacity.

use crate::animation::{Fade, Spring};
use crate::checkout::CheckoutForm;
use crate::shop::{Cart, Product};

/// Visibility and contents of the page chrome.
#[derive(Debug, Clone)]
pub struct ShellState {
    cart: Cart,
    cart_open: bool,
    checkout_visible: bool,
    checkout: CheckoutForm,
    cart_offset: Spring,
    checkout_opacity: Fade,
}

impl ShellState {
    /// Creates the shell with an empty, closed cart.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cart: Cart::new(),
            cart_open: false,
            checkout_visible: false,
            checkout: CheckoutForm,
            cart_offset: Spring::cart_panel(1.0),
            checkout_opacity: Fade::new(0.0),
        }
    }

    /// Adds a product and opens the cart.
    pub fn add_to_cart(&mut self, product: Product) {
        self.cart.add(product);
        tracing::debug!(id = product.id, items = self.cart.len(), "added to cart");
        self.open_cart();
    }

    /// Opens the cart panel.
    pub fn open_cart(&mut self) {
        self.cart_open = true;
        self.cart_offset.set_target(0.0);
    }

    /// Closes the cart panel.
    pub fn close_cart(&mut self) {
        self.cart_open = false;
        self.cart_offset.set_target(1.0);
    }

    /// Closes the cart and shows the checkout form.
    pub fn show_checkout(&mut self) {
        self.close_cart();
        self.checkout_visible = true;
        self.checkout_opacity.set_target(1.0);
        tracing::debug!(items = self.cart.len(), "checkout shown");
    }

    /// Hides the checkout form.
    pub fn close_checkout(&mut self) {
        self.checkout_visible = false;
        self.checkout_opacity.set_target(0.0);
    }

    /// Advances overlay animations by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.cart_offset.update(dt);
        self.checkout_opacity.update(dt);
    }

    /// The cart.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Count shown on the cart badge.
    #[must_use]
    pub fn badge_count(&self) -> usize {
        self.cart.len()
    }

    /// True while the cart panel is open.
    #[must_use]
    pub fn is_cart_open(&self) -> bool {
        self.cart_open
    }

    /// True while the checkout form is shown.
    #[must_use]
    pub fn is_checkout_visible(&self) -> bool {
        self.checkout_visible
    }

    /// The checkout form, while visible.
    #[must_use]
    pub fn checkout(&self) -> Option<&CheckoutForm> {
        self.checkout_visible.then_some(&self.checkout)
    }

    /// Cart panel offset as a fraction of its width.
    #[must_use]
    pub fn cart_offset(&self) -> f32 {
        self.cart_offset.position()
    }

    /// Checkout overlay opacity.
    #[must_use]
    pub fn checkout_opacity(&self) -> f32 {
        self.checkout_opacity.value()
    }

    /// True once no overlay is mid-transition.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.cart_offset.is_at_rest() && self.checkout_opacity.is_complete()
    }
}

impl Default for ShellState {
    fn default() -> Self {
        Self::new()
    }
}
