//! Frame table - the fixed set of physical frame slots.
//!
//! A [`FrameTable`] records which page table entry occupies each frame:
//! - Slots fill in index order until the table is full
//! - Once full, a slot only changes hands through [`FrameTable::swap_in`]
//!
//! Every replacement policy keeps one of these and layers its own
//! bookkeeping (clock hand, aging registers, timestamps) on top.

use crate::common::FrameId;
use crate::vm::page_table::{EntryId, PageTable};

/// Result of evicting a page to make room for another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eviction {
    /// Frame that changed hands.
    pub frame: FrameId,
    /// Entry that was removed.
    pub victim: EntryId,
    /// Whether the victim was dirty and had to be written back.
    pub writeback: bool,
}

/// Fixed-capacity table of occupied frames.
#[derive(Debug)]
pub struct FrameTable {
    /// Occupant of each filled frame, indexed by `FrameId`.
    slots: Vec<EntryId>,

    /// Number of frames (immutable after construction).
    capacity: usize,
}

impl FrameTable {
    /// Create an empty frame table.
    ///
    /// # Panics
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");

        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Number of frames.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of occupied frames.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// True once every frame is occupied. Never resets.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    /// The next frame to be filled, if any remain.
    #[inline]
    pub fn next_free(&self) -> Option<FrameId> {
        (!self.is_full()).then(|| FrameId::new(self.slots.len()))
    }

    /// Occupant of a frame.
    #[inline]
    pub fn get(&self, frame: FrameId) -> Option<EntryId> {
        self.slots.get(frame.0).copied()
    }

    /// Iterate `(frame, occupant)` pairs in frame order.
    pub fn iter(&self) -> impl Iterator<Item = (FrameId, EntryId)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, &entry)| (FrameId::new(i), entry))
    }

    /// Place `entry` into the free slot `frame` and mark it resident.
    ///
    /// # Panics
    /// Panics if the table is full or `frame` is not the next free slot.
    pub fn fill(&mut self, table: &mut PageTable, entry: EntryId, frame: FrameId) {
        assert_eq!(
            self.next_free(),
            Some(frame),
            "admit into {} but next free slot is {:?}",
            frame,
            self.next_free()
        );

        self.slots.push(entry);
        table[entry].install(frame);
    }

    /// Evict the occupant of `frame` and install `entry` in its place.
    ///
    /// # Panics
    /// Panics if `frame` is not occupied.
    pub fn swap_in(&mut self, table: &mut PageTable, frame: FrameId, entry: EntryId) -> Eviction {
        let slot = self
            .slots
            .get_mut(frame.0)
            .unwrap_or_else(|| panic!("evict from unoccupied {}", frame));

        let victim = std::mem::replace(slot, entry);
        let writeback = table[victim].evict();
        table[entry].install(frame);

        log::debug!(
            "evict {} from {} (writeback: {}) for {}",
            table[victim].page(),
            frame,
            writeback,
            table[entry].page()
        );

        Eviction {
            frame,
            victim,
            writeback,
        }
    }
}
