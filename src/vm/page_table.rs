//! Page table - per-page metadata for every page ever referenced.

use std::collections::HashMap;
use std::ops::{Index, IndexMut};

use crate::common::{page_prefix, FrameId, PageId};

/// Handle to an entry in the [`PageTable`].
///
/// Entries are never removed, so a handle stays valid for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(pub usize);

/// Metadata for one page.
///
/// Residency is represented by the frame slot itself: a page is resident
/// exactly when `frame` is `Some`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTableEntry {
    page: PageId,
    frame: Option<FrameId>,
    dirty: bool,
    referenced: bool,
}

impl PageTableEntry {
    /// Create a non-resident entry with all bits clear.
    pub fn new(page: PageId) -> Self {
        Self {
            page,
            frame: None,
            dirty: false,
            referenced: false,
        }
    }

    /// The page this entry describes.
    #[inline]
    pub fn page(&self) -> &PageId {
        &self.page
    }

    /// Frame holding the page, if resident.
    #[inline]
    pub fn frame(&self) -> Option<FrameId> {
        self.frame
    }

    /// The valid bit.
    #[inline]
    pub fn is_resident(&self) -> bool {
        self.frame.is_some()
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn is_referenced(&self) -> bool {
        self.referenced
    }

    /// Mark the page modified.
    ///
    /// # Panics
    /// Panics if the page is not resident.
    #[inline]
    pub fn mark_dirty(&mut self) {
        assert!(self.is_resident(), "dirty bit set on non-resident {}", self.page);
        self.dirty = true;
    }

    #[inline]
    pub fn mark_referenced(&mut self) {
        self.referenced = true;
    }

    #[inline]
    pub fn clear_referenced(&mut self) {
        self.referenced = false;
    }

    /// Place the page in `frame`; it becomes resident and referenced.
    pub fn install(&mut self, frame: FrameId) {
        self.frame = Some(frame);
        self.referenced = true;
    }

    /// Remove the page from its frame, clearing every bit.
    ///
    /// Returns whether the page was dirty, i.e. whether it must be written
    /// back.
    pub fn evict(&mut self) -> bool {
        let was_dirty = self.dirty;
        self.frame = None;
        self.dirty = false;
        self.referenced = false;
        was_dirty
    }
}

/// Maps pages to their entries.
///
/// Created empty, grows on first reference to each page and never shrinks;
/// evicted pages keep their entry, ready to fault back in.
#[derive(Debug, Default)]
pub struct PageTable {
    entries: Vec<PageTableEntry>,
    index: HashMap<PageId, EntryId>,
}

impl PageTable {
    /// Create an empty page table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the entry for an address or page prefix.
    pub fn lookup(&self, address: &str) -> Option<EntryId> {
        self.index.get(page_prefix(address)).copied()
    }

    /// Find the entry for an address or page prefix, creating a
    /// non-resident one if absent.
    pub fn get_or_insert(&mut self, address: &str) -> EntryId {
        let page = page_prefix(address);
        if let Some(id) = self.lookup(page) {
            return id;
        }

        let id = EntryId(self.entries.len());
        let page = PageId::from_address(page);
        self.entries.push(PageTableEntry::new(page.clone()));
        self.index.insert(page, id);
        id
    }

    /// Number of distinct pages seen.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of pages currently resident.
    pub fn resident_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_resident()).count()
    }

    /// Iterate entries in first-reference order.
    pub fn iter(&self) -> impl Iterator<Item = &PageTableEntry> {
        self.entries.iter()
    }
}

impl Index<EntryId> for PageTable {
    type Output = PageTableEntry;

    fn index(&self, id: EntryId) -> &PageTableEntry {
        &self.entries[id.0]
    }
}

impl IndexMut<EntryId> for PageTable {
    fn index_mut(&mut self, id: EntryId) -> &mut PageTableEntry {
        &mut self.entries[id.0]
    }
}
