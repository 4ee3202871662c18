//! LRU (Least Recently Used) replacement policy.

use crate::common::{FrameId, PolicyKind};
use crate::vm::frame::{Eviction, FrameTable};
use crate::vm::page_table::{EntryId, PageTable};
use crate::vm::replacer::Replacer;

/// Exact LRU using logical timestamps.
///
/// Every admit, hit and post-eviction install stamps the frame with the next
/// value of a shared counter. Stamps are unique, so the victim (the minimum
/// stamp) is never tied.
#[derive(Debug)]
pub struct LruReplacer {
    frames: FrameTable,
    stamps: Vec<u64>,
    ticker: u64,
}

impl LruReplacer {
    /// Create an LRU replacer over `capacity` frames.
    pub fn new(capacity: usize) -> Self {
        Self {
            frames: FrameTable::new(capacity),
            stamps: Vec::with_capacity(capacity),
            ticker: 0,
        }
    }

    /// Last-use stamp of an occupied frame.
    pub fn stamp(&self, frame: FrameId) -> Option<u64> {
        self.stamps.get(frame.0).copied()
    }

    fn tick(&mut self) -> u64 {
        let now = self.ticker;
        self.ticker += 1;
        now
    }
}

impl Replacer for LruReplacer {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Lru
    }

    fn capacity(&self) -> usize {
        self.frames.capacity()
    }

    fn len(&self) -> usize {
        self.frames.len()
    }

    fn admit(&mut self, table: &mut PageTable, entry: EntryId, frame: FrameId) {
        self.frames.fill(table, entry, frame);
        let now = self.tick();
        self.stamps.push(now);
    }

    fn touch(&mut self, table: &mut PageTable, entry: EntryId, frame: FrameId) {
        table[entry].mark_referenced();
        let now = self.tick();
        self.stamps[frame.0] = now;
    }

    fn evict(&mut self, table: &mut PageTable, entry: EntryId) -> Eviction {
        assert!(self.is_full(), "evict called with free frames remaining");

        let frame = self
            .stamps
            .iter()
            .enumerate()
            .min_by_key(|&(_, &stamp)| stamp)
            .map(|(i, _)| FrameId::new(i))
            .unwrap_or_else(|| unreachable!("victim selection on an empty frame table"));

        let eviction = self.frames.swap_in(table, frame, entry);
        let now = self.tick();
        self.stamps[frame.0] = now;
        eviction
    }
}
