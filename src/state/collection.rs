// Displayed collection state.
// Tracks a listing through cache display, background refresh, and settlement.

use chrono::{DateTime, Utc};

use crate::cache::CachedData;

/// Lifecycle phase of a displayed collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing shown yet.
    #[default]
    Empty,
    /// Showing a snapshot from the cache.
    Cached,
    /// A network refresh is in flight.
    Loading,
    /// The refresh settled.
    Ready,
}

/// Change to a collection emitted by the view controller.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionUpdate<T> {
    /// A cached snapshot was found on mount.
    Cached(CachedData<Vec<T>>),
    /// The network refresh started.
    Loading,
    /// The refresh settled with this result.
    Fresh(Vec<T>),
    /// The refresh failed; keep whatever is displayed.
    Unchanged,
}

/// A displayed, wholesale-replaced list of items.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    items: Vec<T>,
    phase: Phase,
    cached_at: Option<DateTime<Utc>>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            phase: Phase::Empty,
            cached_at: None,
        }
    }
}

impl<T> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Loading indicator: on until the refresh settles.
    pub fn is_loading(&self) -> bool {
        self.phase != Phase::Ready
    }

    /// When the displayed snapshot was cached, if it came from the cache.
    pub fn cached_at(&self) -> Option<DateTime<Utc>> {
        self.cached_at
    }

    /// Apply a controller update.
    pub fn apply(&mut self, update: CollectionUpdate<T>) {
        match update {
            CollectionUpdate::Cached(snapshot) => self.show_cached(snapshot),
            CollectionUpdate::Loading => self.begin_refresh(),
            CollectionUpdate::Fresh(items) => self.finish(items),
            CollectionUpdate::Unchanged => self.settle(),
        }
    }

    /// Show a cached snapshot. Ignored once the refresh has settled.
    pub fn show_cached(&mut self, snapshot: CachedData<Vec<T>>) {
        if self.phase == Phase::Ready {
            return;
        }
        self.items = snapshot.data;
        self.cached_at = Some(snapshot.cached_at);
        self.phase = Phase::Cached;
    }

    pub fn begin_refresh(&mut self) {
        if self.phase != Phase::Ready {
            self.phase = Phase::Loading;
        }
    }

    /// Replace the items with the refresh result.
    pub fn finish(&mut self, items: Vec<T>) {
        self.items = items;
        self.cached_at = None;
        self.phase = Phase::Ready;
    }

    /// Stop loading without replacing the items.
    pub fn settle(&mut self) {
        self.phase = Phase::Ready;
    }
}
