//! # Pool Churn Integration Test
//!
//! Proves a pool stays bounded under sustained acquire/release churn.

use xolo_core::Pool;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Record {
    generation: u32,
}

/// Test: 10,000 frames of churn never create more records than capacity.
#[test]
fn test_churn_stays_bounded() {
    let mut pool: Pool<Record> = Pool::new(64);
    let mut live: Vec<Record> = Vec::with_capacity(64);

    for frame in 0..10_000u32 {
        // Spawn a burst
        for _ in 0..(frame % 7) {
            if let Some(mut record) = pool.acquire() {
                record.generation = frame;
                live.push(record);
            }
        }

        // Retire everything older than 3 frames
        let mut i = live.len();
        while i > 0 {
            i -= 1;
            if frame.saturating_sub(live[i].generation) > 3 {
                let record = live.remove(i);
                assert!(pool.release(record));
            }
        }

        assert!(pool.allocated_count() <= pool.capacity());
        assert_eq!(pool.in_use_count(), live.len());
    }
}

/// Test: a fully released pool hands back exactly `capacity` records.
#[test]
fn test_full_cycle_returns_everything() {
    let mut pool: Pool<Record> = Pool::new(16);

    let taken: Vec<Record> = std::iter::from_fn(|| pool.acquire()).collect();
    assert_eq!(taken.len(), 16);

    for record in taken {
        pool.release(record);
    }

    assert_eq!(pool.free_count(), 16);
    assert_eq!(pool.allocated_count(), 16);
}
