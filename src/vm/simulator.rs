//! Simulator - the driver that turns a reference stream into faults.
//!
//! The [`Simulator`] provides:
//! - Page table lookup for every reference
//! - Hit / fault classification
//! - Admission into free frames, eviction once full
//! - Periodic aging refresh

use std::fmt;

use crate::common::{FrameId, PageId, PolicyKind, Result, SimConfig};
use crate::trace::TraceRecord;
use crate::vm::page_table::PageTable;
use crate::vm::replacer::{build_replacer, LookaheadIndex, Replacer};
use crate::vm::stats::{Report, SimStats};

/// How a single reference was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The page was resident.
    Hit,
    /// The page faulted into a free frame.
    FaultNoEviction,
    /// The page faulted and displaced a clean page.
    FaultEvictClean,
    /// The page faulted and displaced a dirty page, which was written back.
    FaultEvictDirty,
}

impl Outcome {
    /// Log line for this outcome.
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Hit => "hit",
            Outcome::FaultNoEviction => "page fault - no eviction",
            Outcome::FaultEvictClean => "page fault - evict clean",
            Outcome::FaultEvictDirty => "page fault - evict dirty",
        }
    }

    #[inline]
    pub fn is_fault(self) -> bool {
        self != Outcome::Hit
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the driver learned from one reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessEvent {
    pub outcome: Outcome,
    /// Frame now holding the referenced page.
    pub frame: FrameId,
    /// Page displaced by this reference, if any.
    pub victim: Option<PageId>,
}

/// Drives one simulation run.
///
/// # Architecture
/// ```text
/// ┌────────────────────────────────────────────────────────────┐
/// │                        Simulator                           │
/// │  ┌──────────────┐   ┌──────────────────────────────────┐   │
/// │  │ page_table   │   │   replacer: Box<dyn Replacer>    │   │
/// │  │PageId → Entry│◀──│  Optimal | Clock | Aging | LRU   │   │
/// │  └──────────────┘   └──────────────────────────────────┘   │
/// │  ┌──────────────┐   ┌──────────────┐                       │
/// │  │    stats     │   │refresh every │                       │
/// │  │  SimStats    │   │ R (aging)    │                       │
/// │  └──────────────┘   └──────────────┘                       │
/// └────────────────────────────────────────────────────────────┘
/// ```
///
/// References must be fed strictly in trace order; every decision depends
/// on the state left by the previous one.
///
/// # Usage
/// ```
/// use vmsim::common::{PolicyKind, SimConfig};
/// use vmsim::trace::TraceRecord;
/// use vmsim::vm::{Outcome, Simulator};
///
/// let config = SimConfig::new(1, PolicyKind::Clock, None).unwrap();
/// let mut sim = Simulator::new(config).unwrap();
///
/// assert_eq!(sim.access(&TraceRecord::write("aaaaa000")).outcome, Outcome::FaultNoEviction);
/// assert_eq!(sim.access(&TraceRecord::read("bbbbb000")).outcome, Outcome::FaultEvictDirty);
///
/// let report = sim.finish();
/// assert_eq!(report.total_writebacks, 1);
/// ```
pub struct Simulator {
    config: SimConfig,
    page_table: PageTable,
    replacer: Box<dyn Replacer>,
    stats: SimStats,
}

impl Simulator {
    /// Create a simulator for a streaming policy.
    ///
    /// # Errors
    /// - `Error::MissingLookahead` if `config` selects the optimal policy;
    ///   use [`Simulator::for_trace`] or [`Simulator::with_lookahead`]
    pub fn new(config: SimConfig) -> Result<Self> {
        Self::build(config, None)
    }

    /// Create a simulator with a precomputed lookahead index.
    ///
    /// The index is only consulted by the optimal policy and must describe
    /// the exact trace that will be fed to [`access`](Self::access).
    pub fn with_lookahead(config: SimConfig, lookahead: LookaheadIndex) -> Result<Self> {
        Self::build(config, Some(lookahead))
    }

    /// Create a simulator for a fully materialized trace, prescanning it
    /// when the optimal policy is selected.
    pub fn for_trace(config: SimConfig, records: &[TraceRecord]) -> Result<Self> {
        let lookahead = (config.policy() == PolicyKind::Optimal)
            .then(|| LookaheadIndex::build(records.iter().map(TraceRecord::page)));
        Self::build(config, lookahead)
    }

    fn build(config: SimConfig, lookahead: Option<LookaheadIndex>) -> Result<Self> {
        let replacer = build_replacer(&config, lookahead)?;

        log::info!(
            "starting {} simulation with {} frames{}",
            config.policy(),
            config.frames(),
            config
                .refresh_interval()
                .map(|r| format!(", refresh every {} references", r))
                .unwrap_or_default()
        );

        Ok(Self {
            config,
            page_table: PageTable::new(),
            replacer,
            stats: SimStats::new(),
        })
    }

    // ========================================================================
    // Driver
    // ========================================================================

    /// Process the next reference.
    pub fn access(&mut self, record: &TraceRecord) -> AccessEvent {
        self.stats.accesses += 1;

        let entry = self.page_table.get_or_insert(record.page());

        let (outcome, frame, victim) = match self.page_table[entry].frame() {
            Some(frame) => {
                self.stats.hits += 1;
                self.replacer.touch(&mut self.page_table, entry, frame);
                (Outcome::Hit, frame, None)
            }
            None => {
                self.stats.faults += 1;

                if !self.replacer.is_full() {
                    let frame = FrameId::new(self.replacer.len());
                    self.replacer.admit(&mut self.page_table, entry, frame);
                    (Outcome::FaultNoEviction, frame, None)
                } else {
                    let eviction = self.replacer.evict(&mut self.page_table, entry);
                    self.stats.evictions += 1;

                    let outcome = if eviction.writeback {
                        self.stats.writebacks += 1;
                        Outcome::FaultEvictDirty
                    } else {
                        Outcome::FaultEvictClean
                    };
                    let victim = self.page_table[eviction.victim].page().clone();
                    (outcome, eviction.frame, Some(victim))
                }
            }
        };

        // The page is resident now, so the dirty bit may be set.
        if record.mode.is_write() {
            self.page_table[entry].mark_dirty();
        }

        if let Some(r) = self.config.refresh_interval() {
            if self.stats.accesses % r == 0 {
                self.replacer.refresh(&mut self.page_table);
                self.stats.refreshes += 1;
            }
        }

        log::trace!("{} -> {} ({})", record, outcome, frame);

        AccessEvent {
            outcome,
            frame,
            victim,
        }
    }

    /// Finish the run and produce its report.
    pub fn finish(self) -> Report {
        let report = Report::new(self.config.policy(), self.config.frames(), &self.stats);
        log::info!(
            "{} finished: {} accesses, {} faults, {} writebacks",
            report.policy_name,
            report.total_accesses,
            report.total_faults,
            report.total_writebacks
        );
        report
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// Counters so far.
    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    pub fn page_table(&self) -> &PageTable {
        &self.page_table
    }

    /// The active replacement policy.
    pub fn replacer(&self) -> &dyn Replacer {
        self.replacer.as_ref()
    }
}

/// Run a materialized trace to completion.
///
/// `observer` sees every reference with its resolution, in order; pass
/// `|_, _| {}` to ignore them.
pub fn simulate<F>(config: SimConfig, records: &[TraceRecord], mut observer: F) -> Result<Report>
where
    F: FnMut(&TraceRecord, &AccessEvent),
{
    let mut sim = Simulator::for_trace(config, records)?;
    for record in records {
        let event = sim.access(record);
        observer(record, &event);
    }
    Ok(sim.finish())
}
