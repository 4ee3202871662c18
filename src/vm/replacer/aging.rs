//! Aging replacement policy.

use crate::common::config::AGING_MSB;
use crate::common::{AgingSelection, FrameId, PolicyKind};
use crate::vm::frame::{Eviction, FrameTable};
use crate::vm::page_table::{EntryId, PageTable};
use crate::vm::replacer::Replacer;

/// Aging approximation of LRU.
///
/// Each frame owns an 8-bit register. On every [`refresh`](Replacer::refresh)
/// the register shifts right by one and takes the page's referenced bit as
/// its new top bit; the referenced bit is then cleared. The victim is the
/// frame with the smallest register, preferring frames not referenced since
/// the last refresh.
#[derive(Debug)]
pub struct AgingReplacer {
    frames: FrameTable,
    registers: Vec<u8>,
    selection: AgingSelection,
}

impl AgingReplacer {
    /// Create an aging replacer over `capacity` frames.
    pub fn new(capacity: usize, selection: AgingSelection) -> Self {
        Self {
            frames: FrameTable::new(capacity),
            registers: Vec::with_capacity(capacity),
            selection,
        }
    }

    /// Register value of an occupied frame.
    pub fn register(&self, frame: FrameId) -> Option<u8> {
        self.registers.get(frame.0).copied()
    }

    fn select_victim(&self, table: &PageTable) -> FrameId {
        let unreferenced = self
            .frames
            .iter()
            .filter(|&(_, entry)| !table[entry].is_referenced())
            .map(|(frame, _)| frame);

        let candidate = match self.selection {
            AgingSelection::Strict => self.min_register(unreferenced),
            AgingSelection::Compatible => self.min_register(unreferenced).map(|frame| {
                // First frame anywhere holding the subset's minimum value
                let value = self.registers[frame.0];
                let first = self.registers.iter().position(|&r| r == value);
                FrameId::new(first.unwrap_or(frame.0))
            }),
        };

        // Every page referenced since the last refresh: search them all
        match candidate.or_else(|| self.min_register(self.frames.iter().map(|(f, _)| f))) {
            Some(frame) => frame,
            None => unreachable!("victim selection on an empty frame table"),
        }
    }

    /// First frame with the smallest register among `frames`.
    fn min_register(&self, frames: impl Iterator<Item = FrameId>) -> Option<FrameId> {
        let mut best: Option<(FrameId, u8)> = None;
        for frame in frames {
            let value = self.registers[frame.0];
            if best.map_or(true, |(_, b)| value < b) {
                best = Some((frame, value));
            }
        }
        best.map(|(frame, _)| frame)
    }
}

impl Replacer for AgingReplacer {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Aging
    }

    fn capacity(&self) -> usize {
        self.frames.capacity()
    }

    fn len(&self) -> usize {
        self.frames.len()
    }

    fn admit(&mut self, table: &mut PageTable, entry: EntryId, frame: FrameId) {
        self.frames.fill(table, entry, frame);
        self.registers.push(0);
    }

    fn touch(&mut self, table: &mut PageTable, entry: EntryId, _frame: FrameId) {
        table[entry].mark_referenced();
    }

    fn evict(&mut self, table: &mut PageTable, entry: EntryId) -> Eviction {
        assert!(self.is_full(), "evict called with free frames remaining");

        let frame = self.select_victim(table);
        let eviction = self.frames.swap_in(table, frame, entry);
        self.registers[frame.0] = 0;
        eviction
    }

    fn refresh(&mut self, table: &mut PageTable) {
        for (frame, entry) in self.frames.iter() {
            let reg = &mut self.registers[frame.0];
            *reg >>= 1;
            if table[entry].is_referenced() {
                *reg |= AGING_MSB;
            }
            table[entry].clear_referenced();
        }
        log::debug!("aging refresh: registers {:02x?}", self.registers);
    }
}
