//! # Ring Pool
//!
//! Fixed-size slot array written through a single wrapping cursor.

/// A fixed-capacity pool that always accepts a write.
///
/// Every `write` lands in `slots[cursor]` and advances the cursor modulo
/// `N`, overwriting whatever was stored there. The slot sacrificed is always
/// the oldest *written* one, regardless of its contents. There is no free
/// list and no handle: callers that need "is this slot in use" keep that
/// flag inside `T`.
///
/// # Thread Safety
///
/// This pool is NOT thread-safe. It is owned by exactly one render thread.
///
/// # Example
///
/// ```rust
/// use embergrid_core::RingPool;
///
/// let mut pool: RingPool<u8, 2> = RingPool::new();
/// pool.write(1);
/// pool.write(2);
/// let evicted = pool.write(3);
/// assert_eq!(evicted.index, 0);
/// assert_eq!(evicted.previous, 1);
/// ```
#[derive(Debug, Clone)]
pub struct RingPool<T, const N: usize> {
    /// The storage array.
    slots: [T; N],
    /// Index the next write lands on.
    cursor: usize,
    /// Writes since construction or the last `clear`.
    writes: u64,
}

/// Result of a ring write: where it landed and what it replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overwritten<T> {
    /// Slot index that received the write.
    pub index: usize,
    /// Value that occupied the slot before the write.
    pub previous: T,
}

impl<T: Copy + Default, const N: usize> RingPool<T, N> {
    /// Creates a pool with every slot set to `T::default()`.
    ///
    /// All memory is inline; nothing is allocated after this returns.
    ///
    /// # Panics
    ///
    /// Panics if `N == 0`.
    #[must_use]
    pub fn new() -> Self {
        assert!(N > 0, "RingPool capacity must be greater than zero");
        Self {
            slots: [T::default(); N],
            cursor: 0,
            writes: 0,
        }
    }

    /// Returns the total capacity.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Returns the index the next write will land on.
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the number of writes performed.
    #[inline]
    #[must_use]
    pub const fn writes(&self) -> u64 {
        self.writes
    }

    /// Writes `value` at the cursor and advances it.
    ///
    /// This is a **O(1)** operation with **zero heap allocations** and it
    /// never fails.
    pub fn write(&mut self, value: T) -> Overwritten<T> {
        let index = self.cursor;
        let previous = std::mem::replace(&mut self.slots[index], value);
        self.cursor = (index + 1) % N;
        self.writes += 1;
        Overwritten { index, previous }
    }

    /// Gets a reference to the slot at `index`.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    /// Iterates over all slots in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.slots.iter()
    }

    /// Iterates mutably over all slots in index order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.slots.iter_mut()
    }

    /// Resets every slot to `T::default()` and rewinds the cursor.
    pub fn clear(&mut self) {
        self.slots = [T::default(); N];
        self.cursor = 0;
        self.writes = 0;
    }
}

impl<T: Copy + Default, const N: usize> Default for RingPool<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
