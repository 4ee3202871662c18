//! CLOCK (second chance) replacement policy.

use crate::common::{FrameId, PolicyKind};
use crate::vm::frame::{Eviction, FrameTable};
use crate::vm::page_table::{EntryId, PageTable};
use crate::vm::replacer::Replacer;

/// Second-chance clock over the frames in fill order.
///
/// The hand sweeps the ring; a referenced page has its bit cleared and is
/// skipped, the first unreferenced page is the victim. After an eviction
/// the hand rests one past the victim.
///
/// A sweep clears at most `capacity` bits before it must meet a clear one,
/// so eviction takes at most `2 × capacity` steps.
#[derive(Debug)]
pub struct ClockReplacer {
    frames: FrameTable,
    hand: usize,
    last_sweep: usize,
}

impl ClockReplacer {
    /// Create a clock replacer over `capacity` frames.
    pub fn new(capacity: usize) -> Self {
        Self {
            frames: FrameTable::new(capacity),
            hand: 0,
            last_sweep: 0,
        }
    }

    /// Frame the hand points at.
    pub fn hand(&self) -> FrameId {
        FrameId::new(self.hand)
    }

    /// Frames inspected by the most recent eviction, victim included.
    pub fn last_sweep(&self) -> usize {
        self.last_sweep
    }

    fn advance(&mut self) {
        self.hand = (self.hand + 1) % self.frames.capacity();
    }
}

impl Replacer for ClockReplacer {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Clock
    }

    fn capacity(&self) -> usize {
        self.frames.capacity()
    }

    fn len(&self) -> usize {
        self.frames.len()
    }

    fn admit(&mut self, table: &mut PageTable, entry: EntryId, frame: FrameId) {
        self.frames.fill(table, entry, frame);
    }

    fn touch(&mut self, table: &mut PageTable, entry: EntryId, _frame: FrameId) {
        table[entry].mark_referenced();
    }

    fn evict(&mut self, table: &mut PageTable, entry: EntryId) -> Eviction {
        assert!(self.is_full(), "evict called with free frames remaining");

        let limit = 2 * self.frames.capacity();

        for step in 1..=limit {
            let frame = self.hand();
            let occupant = match self.frames.get(frame) {
                Some(e) => e,
                None => unreachable!("clock hand on empty {}", frame),
            };

            if table[occupant].is_referenced() {
                table[occupant].clear_referenced();
                self.advance();
                continue;
            }

            let eviction = self.frames.swap_in(table, frame, entry);
            self.advance();
            self.last_sweep = step;
            return eviction;
        }

        unreachable!("clock sweep exceeded {} steps", limit);
    }
}
