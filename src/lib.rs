//! vmsim - a virtual memory page replacement simulator.
//!
//! Feeds a trace of memory references through a fixed number of physical
//! frames and counts page faults and disk writebacks, so replacement
//! policies can be compared on identical traces.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                             vmsim                               │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                 Trace Input (trace/)                     │   │
//! │  │        TraceReader → TraceRecord (address, R/W)          │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                  Simulation (vm/)                        │   │
//! │  │   ┌─────────────────────────────────────────────────┐   │   │
//! │  │   │  Replacement Policies: OPT | CLOCK | AGING | LRU │   │   │
//! │  │   │            (selected per run)                    │   │   │
//! │  │   └─────────────────────────────────────────────────┘   │   │
//! │  │      Simulator + PageTable + FrameTable + SimStats       │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                       Report                             │   │
//! │  │      accesses, faults, writebacks, frames, policy        │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (PageId, FrameId, Error, config)
//! - [`trace`] - Trace records and the line reader
//! - [`vm`] - Page table, replacement policies and the driver
//!
//! # Quick Start
//! ```
//! use vmsim::common::{PolicyKind, SimConfig};
//! use vmsim::trace::TraceRecord;
//! use vmsim::vm::simulate;
//!
//! let trace = vec![
//!     TraceRecord::read("0041f7a0"),
//!     TraceRecord::write("13f5e2c0"),
//!     TraceRecord::read("0041f000"),
//! ];
//!
//! let config = SimConfig::new(2, PolicyKind::Lru, None).unwrap();
//! let report = simulate(config, &trace, |_, _| {}).unwrap();
//!
//! assert_eq!(report.total_accesses, 3);
//! assert_eq!(report.total_faults, 2);
//! ```

pub mod common;
pub mod trace;
pub mod vm;

// Re-export commonly used items at crate root for convenience
pub use common::config::PAGE_ID_LEN;
pub use common::{Error, FrameId, PageId, PolicyKind, Result, SimConfig};

pub use trace::{read_trace, AccessMode, TraceReader, TraceRecord};
pub use vm::{simulate, Outcome, Report, Simulator};
