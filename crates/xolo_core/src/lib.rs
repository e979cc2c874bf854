//! # XOLO Core
//!
//! Allocation-free building blocks shared by the XOLO crates.
//!
//! ## Architecture Rules
//!
//! 1. **No heap allocations in the frame loop** - records are recycled, not freed
//! 2. **Bounded growth** - every pool has a hard capacity
//!
//! ## Example
//!
//! ```rust
//! use xolo_core::Pool;
//!
//! let mut pool: Pool<[f32; 2]> = Pool::new(8);
//! let record = pool.acquire().expect("pool has room");
//! pool.release(record);
//! assert_eq!(pool.allocated_count(), 1);
//! assert_eq!(pool.free_count(), 1);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod memory;

pub use memory::Pool;
