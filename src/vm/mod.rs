//! Virtual memory simulation.
//!
//! The simulator keeps a page table for every page ever referenced and a
//! fixed set of frames managed by one replacement policy.
//!
//! # Components
//! - [`Simulator`] - The driver loop over a reference stream
//! - [`PageTable`] / [`PageTableEntry`] - Per-page valid, dirty and referenced bits
//! - [`FrameTable`] - Frame slots shared by every policy
//! - [`SimStats`] / [`Report`] - Counters and the final report
//! - [`replacer`] - Replacement policy implementations

mod frame;
mod page_table;
pub mod replacer;
mod simulator;
mod stats;

pub use frame::{Eviction, FrameTable};
pub use page_table::{EntryId, PageTable, PageTableEntry};
pub use simulator::{simulate, AccessEvent, Outcome, Simulator};
pub use stats::{Report, SimStats};
