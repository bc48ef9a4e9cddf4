//! Single-entry keyed surface cache.

use crate::draw::{Canvas, Surface, MAX_SURFACE_EDGE};
use embergrid_core::Rgba;
use std::fmt::Debug;

/// Cache entry state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CacheState {
    /// Never requested, or disposed.
    #[default]
    Empty,
    /// Content does not (or may not) match the stored key.
    Stale,
    /// Content matches the stored key and size.
    Fresh,
}

/// Cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Rebuild callback invocations.
    pub rebuilds: u64,
    /// Surface allocations.
    pub reallocations: u64,
    /// `ensure_fresh` calls that were a no-op.
    pub hits: u64,
}

/// Caches one off-screen [`Surface`] and rebuilds it only when the key or
/// the requested size changes, or after [`invalidate`](Self::invalidate).
///
/// # Example
///
/// ```
/// use embergrid_rendering::cache::SurfaceCache;
///
/// let mut cache: SurfaceCache<u8> = SurfaceCache::new();
/// let mut builds = 0;
/// for _ in 0..3 {
///     cache.ensure_fresh(7, 16, 16, |_, _| builds += 1);
/// }
/// assert_eq!(builds, 1);
/// ```
#[derive(Debug)]
pub struct SurfaceCache<K> {
    surface: Option<Surface>,
    key: Option<K>,
    state: CacheState,
    stats: CacheStats,
}

impl<K: Copy + PartialEq + Debug> SurfaceCache<K> {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            surface: None,
            key: None,
            state: CacheState::Empty,
            stats: CacheStats::default(),
        }
    }

    /// Makes the cached surface match `key` at `width`x`height` and returns it.
    ///
    /// `rebuild` receives a transparent surface of exactly the requested size
    /// and runs at most once per call, only when the key or size changed or
    /// the entry was invalidated. Each dimension is clamped to
    /// `1..=MAX_SURFACE_EDGE`.
    pub fn ensure_fresh<F>(&mut self, key: K, width: u32, height: u32, rebuild: F) -> &Surface
    where
        F: FnOnce(&mut Surface, &K),
    {
        let size = (
            width.clamp(1, MAX_SURFACE_EDGE),
            height.clamp(1, MAX_SURFACE_EDGE),
        );
        if size != (width, height) {
            tracing::warn!(width, height, clamped = ?size, "cache request size clamped");
        }

        if self.state == CacheState::Empty {
            self.state = CacheState::Stale;
        }

        let reallocate = self.surface.as_ref().map_or(true, |s| s.size() != size);
        if reallocate {
            if let Some(old) = self.surface.take() {
                tracing::debug!(from = ?old.size(), to = ?size, "cache surface resized");
            }
            self.state = CacheState::Stale;
            self.stats.reallocations += 1;
        }
        if self.key != Some(key) {
            self.state = CacheState::Stale;
        }

        let surface = self
            .surface
            .get_or_insert_with(|| Surface::new(size.0, size.1));

        if self.state == CacheState::Fresh {
            self.stats.hits += 1;
            return surface;
        }

        if !reallocate {
            surface.clear(Rgba::TRANSPARENT);
        }
        rebuild(surface, &key);
        self.key = Some(key);
        self.state = CacheState::Fresh;
        self.stats.rebuilds += 1;
        tracing::debug!(?key, width = size.0, height = size.1, "cache rebuilt");
        surface
    }

    /// Copies the cached surface verbatim onto `dst` at `(x, y)`.
    ///
    /// Does nothing while the cache is empty.
    pub fn blit(&self, dst: &mut dyn Canvas, x: i32, y: i32) {
        if let Some(surface) = &self.surface {
            dst.draw_surface(surface, (x, y));
        }
    }

    /// Forces the next [`ensure_fresh`](Self::ensure_fresh) to rebuild.
    pub fn invalidate(&mut self) {
        if self.state == CacheState::Fresh {
            self.state = CacheState::Stale;
            tracing::debug!(key = ?self.key, "cache invalidated");
        }
    }

    /// Releases the surface and returns to [`CacheState::Empty`].
    pub fn dispose(&mut self) {
        self.surface = None;
        self.key = None;
        self.state = CacheState::Empty;
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> CacheState {
        self.state
    }

    /// Key the cached content was built for.
    #[must_use]
    pub const fn key(&self) -> Option<K> {
        self.key
    }

    /// Size of the cached surface, if any.
    #[must_use]
    pub fn size(&self) -> Option<(u32, u32)> {
        self.surface.as_ref().map(Surface::size)
    }

    /// Counters since construction.
    #[must_use]
    pub const fn stats(&self) -> CacheStats {
        self.stats
    }
}

impl<K: Copy + PartialEq + Debug> Default for SurfaceCache<K> {
    fn default() -> Self {
        Self::new()
    }
}
