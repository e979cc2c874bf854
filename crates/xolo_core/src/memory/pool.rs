//! # Free-List Pool
//!
//! Capacity-bounded recycler for objects that are acquired and released
//! every frame.

/// A free-list pool of reusable records.
///
/// Records are moved out of the pool by [`Pool::acquire`] and moved back in
/// by [`Pool::release`]. Ownership makes it impossible for a record to be
/// both handed out and waiting in the free list at the same time.
///
/// New records are created with `T::default()` only while the free list is
/// empty and fewer than `capacity` records exist. Once warm, the pool never
/// allocates again.
///
/// # Thread Safety
///
/// This pool is NOT thread-safe. It is meant to be owned by a single
/// frame-driven system.
///
/// # Example
///
/// ```rust
/// use xolo_core::Pool;
///
/// #[derive(Default)]
/// struct Spark { x: f32, y: f32, life: f32 }
///
/// let mut pool: Pool<Spark> = Pool::new(2);
///
/// // First acquisitions create records lazily
/// let a = pool.acquire().unwrap();
/// let b = pool.acquire().unwrap();
/// assert!(pool.acquire().is_none());
///
/// // Released records are handed out again
/// pool.release(a);
/// let _reused = pool.acquire().unwrap();
/// assert_eq!(pool.allocated_count(), 2);
/// # drop(b);
/// ```
#[derive(Debug)]
pub struct Pool<T> {
    /// Records waiting for reuse.
    free: Vec<T>,
    /// Number of records ever created by this pool.
    allocated: usize,
    /// Hard limit on `allocated`.
    capacity: usize,
}

impl<T: Default> Pool<T> {
    /// Creates an empty pool that will create at most `capacity` records.
    ///
    /// The free list reserves room for every record up front, so releasing
    /// never reallocates.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            free: Vec::with_capacity(capacity),
            allocated: 0,
            capacity,
        }
    }

    /// Takes a record out of the pool.
    ///
    /// Reuses a released record when one is available, otherwise creates a
    /// new one while under capacity. Returns `None` once every record is
    /// handed out.
    ///
    /// The returned record still holds whatever state it had when released;
    /// callers overwrite it.
    pub fn acquire(&mut self) -> Option<T> {
        if let Some(record) = self.free.pop() {
            return Some(record);
        }

        if self.allocated < self.capacity {
            self.allocated += 1;
            return Some(T::default());
        }

        None
    }

    /// Creates records until `count` of them (or `capacity`) exist.
    ///
    /// Lets the owner pay every allocation before the first frame.
    pub fn prewarm(&mut self, count: usize) {
        let target = count.min(self.capacity);
        while self.allocated < target {
            self.free.push(T::default());
            self.allocated += 1;
        }
    }
}

impl<T> Pool<T> {
    /// Returns a record to the pool.
    ///
    /// Returns `false` (and drops the record) if the pool already holds every
    /// record it created, i.e. the record did not come from this pool.
    pub fn release(&mut self, record: T) -> bool {
        if self.free.len() >= self.allocated {
            return false;
        }

        self.free.push(record);
        true
    }

    /// Returns the maximum number of records this pool will create.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of records created so far.
    #[inline]
    #[must_use]
    pub const fn allocated_count(&self) -> usize {
        self.allocated
    }

    /// Returns the number of records waiting in the free list.
    #[inline]
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Returns the number of records currently handed out.
    #[inline]
    #[must_use]
    pub fn in_use_count(&self) -> usize {
        self.allocated - self.free.len()
    }
}
