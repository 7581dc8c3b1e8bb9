use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a catalog entry.
///
/// Ids are only ever handed out by an [`IdAllocator`] when a song passes
/// validation, so a `SongId` in hand always belongs to a real entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SongId(u64);

impl SongId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<SongId> for u64 {
    fn from(id: SongId) -> Self {
        id.0
    }
}

/// Sequential source of [`SongId`]s, starting at 1.
///
/// [`Song::new`](crate::Song::new) draws from a process-wide allocator.
/// Callers that need predictable numbering (tests, isolated catalogs) own
/// one and pass it to [`Song::with_allocator`](crate::Song::with_allocator).
#[derive(Debug)]
pub struct IdAllocator {
    next: AtomicU64,
}

static GLOBAL: IdAllocator = IdAllocator::new();

impl IdAllocator {
    /// The first id an allocator hands out.
    pub const FIRST: u64 = 1;

    #[must_use]
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(Self::FIRST),
        }
    }

    /// The allocator behind [`Song::new`](crate::Song::new).
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// The id the next successful construction will receive.
    #[must_use]
    pub fn peek(&self) -> SongId {
        SongId(self.next.load(Ordering::Relaxed))
    }

    /// Start numbering from [`Self::FIRST`] again.
    pub fn reset(&self) {
        self.next.store(Self::FIRST, Ordering::Relaxed);
    }

    /// Consume the next id. Only called once validation has passed.
    pub(crate) fn allocate(&self) -> SongId {
        SongId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator_starts_at_one() {
        let ids = IdAllocator::new();
        assert_eq!(ids.peek().get(), 1);
        assert_eq!(ids.allocate().get(), 1);
        assert_eq!(ids.allocate().get(), 2);
        assert_eq!(ids.peek().get(), 3);
    }

    #[test]
    fn test_peek_does_not_consume() {
        let ids = IdAllocator::new();
        assert_eq!(ids.peek(), ids.peek());
        assert_eq!(ids.allocate().get(), 1);
    }

    #[test]
    fn test_reset() {
        let ids = IdAllocator::new();
        ids.allocate();
        ids.allocate();
        ids.reset();
        assert_eq!(ids.allocate().get(), 1);
    }

    #[test]
    fn test_song_id_display() {
        let ids = IdAllocator::new();
        let id = ids.allocate();
        assert_eq!(id.to_string(), "1");
        assert_eq!(u64::from(id), 1);
    }
}
