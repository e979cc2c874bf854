//! # XOLO
//!
//! The storefront page: product rows, cart, checkout, a custom cursor and
//! the smoke overlay, all driven by one host.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                          STOREFRONT                            │
//! ├───────────────────────────────────────────────────────────────┤
//! │  InputEvent ─┬─> InputState / CursorFollower                   │
//! │              └─> SmokeEffect::handle_event (spawn)             │
//! │                                                               │
//! │  Refresh ────> ShellState::update (panel transitions)          │
//! │  Smoke frame ─> SmokeEffect::on_frame (tick + render)          │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! The page only hands the smoke effect its enable flag. The effect owns
//! its engine, surface and listeners.
//!
//! ## Modules
//!
//! - `storefront`: page composition
//! - `session`: scripted visitor input for headless runs

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod session;
pub mod storefront;

pub use xolo_smoke as smoke;
pub use xolo_ui as ui;

pub use session::{SessionScript, SessionSummary};
pub use storefront::Storefront;
