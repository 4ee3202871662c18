//! Optimal (Belady) replacement policy.
//!
//! Evicts the resident page whose next reference lies furthest in the
//! future. Requires knowledge of the whole trace, supplied as a
//! [`LookaheadIndex`].

use crate::common::{FrameId, PolicyKind};
use crate::vm::frame::{Eviction, FrameTable};
use crate::vm::page_table::{EntryId, PageTable};
use crate::vm::replacer::{LookaheadIndex, Replacer};

/// Optimal eviction policy.
///
/// Every reference consumes the head of its page's lookahead queue, so the
/// head is always that page's next use. Ties (only possible between pages
/// never referenced again) go to the lowest frame.
#[derive(Debug)]
pub struct OptimalReplacer {
    frames: FrameTable,
    lookahead: LookaheadIndex,
}

impl OptimalReplacer {
    /// Create an optimal replacer over `capacity` frames.
    pub fn new(capacity: usize, lookahead: LookaheadIndex) -> Self {
        Self {
            frames: FrameTable::new(capacity),
            lookahead,
        }
    }

    /// Next-use position of the page held in `frame`.
    pub fn next_use(&self, table: &PageTable, frame: FrameId) -> Option<u64> {
        self.frames
            .get(frame)
            .map(|entry| self.lookahead.next_use(table[entry].page().as_str()))
    }

    fn consume(&mut self, table: &PageTable, entry: EntryId) {
        self.lookahead.advance(table[entry].page().as_str());
    }

    /// Frame whose page is referenced furthest in the future.
    fn select_victim(&self, table: &PageTable) -> FrameId {
        let mut best: Option<(FrameId, u64)> = None;

        for (frame, entry) in self.frames.iter() {
            let next = self.lookahead.next_use(table[entry].page().as_str());
            // Strict comparison: the first frame reaching the maximum wins
            if best.map_or(true, |(_, b)| next > b) {
                best = Some((frame, next));
            }
        }

        match best {
            Some((frame, _)) => frame,
            None => unreachable!("victim selection on an empty frame table"),
        }
    }
}

impl Replacer for OptimalReplacer {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Optimal
    }

    fn capacity(&self) -> usize {
        self.frames.capacity()
    }

    fn len(&self) -> usize {
        self.frames.len()
    }

    fn admit(&mut self, table: &mut PageTable, entry: EntryId, frame: FrameId) {
        self.frames.fill(table, entry, frame);
        self.consume(table, entry);
    }

    fn touch(&mut self, table: &mut PageTable, entry: EntryId, _frame: FrameId) {
        table[entry].mark_referenced();
        self.consume(table, entry);
    }

    fn evict(&mut self, table: &mut PageTable, entry: EntryId) -> Eviction {
        assert!(self.is_full(), "evict called with free frames remaining");

        let frame = self.select_victim(table);
        let eviction = self.frames.swap_in(table, frame, entry);
        self.consume(table, entry);
        eviction
    }
}
