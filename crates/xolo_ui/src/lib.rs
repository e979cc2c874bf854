//! # XOLO UI
//!
//! State for the storefront page that hosts the smoke overlay.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                      PAGE SHELL                         │
//! ├────────────────────────────────────────────────────────┤
//! │  InputEvent → InputState → CursorFollower               │
//! │                                                         │
//! │  catalog() → "+" → ShellState::add_to_cart → Cart       │
//! │                         ↓                               │
//! │          cart panel ⇄ checkout form (animated)          │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here draws. The host reads the state each frame and renders it.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod animation;
pub mod checkout;
pub mod cursor;
pub mod input;
pub mod shell;
pub mod shop;
pub mod style;

pub use animation::{Fade, Spring};
pub use checkout::{CheckoutForm, FieldKind, FormField};
pub use cursor::CursorFollower;
pub use input::{InputEvent, InputState};
pub use shell::ShellState;
pub use shop::{catalog, format_price, Cart, Product, ProductRow, UNIT_PRICE_CENTS};
pub use style::Color;
