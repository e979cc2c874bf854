//! # Memory Management
//!
//! Free-list pools for records that churn every frame.
//!
//! ## Design Philosophy
//!
//! Records are created lazily, up to a fixed capacity. After warm-up:
//! - No heap allocations
//! - No deallocations, retired records wait in the free list
//! - Predictable, flat frame cost

mod pool;

pub use pool::Pool;
