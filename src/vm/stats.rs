//! Simulation counters and the final report.

use std::fmt;

use crate::common::PolicyKind;

/// Counters accumulated over one run.
///
/// Owned by the [`Simulator`](crate::vm::Simulator); created zeroed and
/// frozen into a [`Report`] when the run finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimStats {
    /// References processed.
    pub accesses: u64,

    /// References to a resident page.
    pub hits: u64,

    /// References to a non-resident page.
    pub faults: u64,

    /// Faults that displaced a resident page.
    pub evictions: u64,

    /// Evictions of dirty pages.
    pub writebacks: u64,

    /// Aging refreshes performed.
    pub refreshes: u64,
}

impl SimStats {
    /// Create a stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate page fault rate (0.0 to 1.0).
    pub fn fault_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            self.faults as f64 / self.accesses as f64
        }
    }
}

/// Final result of a simulation run.
///
/// `Display` renders the classic report banner.
///
/// # Example
/// ```
/// use vmsim::common::PolicyKind;
/// use vmsim::vm::{Report, SimStats};
///
/// let stats = SimStats { accesses: 10, faults: 4, writebacks: 1, ..SimStats::new() };
/// let report = Report::new(PolicyKind::Clock, 3, &stats);
/// assert!(report.to_string().contains("Total Page Faults: 4"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub policy_name: String,
    pub frame_count: usize,
    pub total_accesses: u64,
    pub total_faults: u64,
    pub total_writebacks: u64,
    pub total_hits: u64,
    pub total_evictions: u64,
    pub total_refreshes: u64,
}

impl Report {
    /// Freeze counters into a report.
    pub fn new(policy: PolicyKind, frame_count: usize, stats: &SimStats) -> Self {
        Self {
            policy_name: policy.name().to_string(),
            frame_count,
            total_accesses: stats.accesses,
            total_faults: stats.faults,
            total_writebacks: stats.writebacks,
            total_hits: stats.hits,
            total_evictions: stats.evictions,
            total_refreshes: stats.refreshes,
        }
    }

    /// Calculate page fault rate (0.0 to 1.0).
    pub fn fault_rate(&self) -> f64 {
        if self.total_accesses == 0 {
            0.0
        } else {
            self.total_faults as f64 / self.total_accesses as f64
        }
    }
}

const BANNER: &str = "+++++++++++++++++++++++++++++++++";

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", BANNER)?;
        writeln!(f, "Algorithm: {}", self.policy_name)?;
        writeln!(f, "Number of Frames: {}", self.frame_count)?;
        writeln!(f, "Total Memory Accesses: {}", self.total_accesses)?;
        writeln!(f, "Total Page Faults: {}", self.total_faults)?;
        writeln!(f, "Total Writes to Disk: {}", self.total_writebacks)?;
        write!(f, "{}", BANNER)
    }
}
