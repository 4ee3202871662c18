//! Page replacement policy implementations (replacers).
//!
//! Implements:
//! - [`OptimalReplacer`] - Evicts the page used furthest in the future
//! - [`ClockReplacer`] - Second-chance clock
//! - [`AgingReplacer`] - 8-bit aging registers refreshed every R references
//! - [`LruReplacer`] - Exact least-recently-used
//!
//! All four share the [`Replacer`] contract, so the
//! [`Simulator`](crate::vm::Simulator) never branches on the policy.

mod aging;
mod clock;
mod lookahead;
mod lru;
mod optimal;

pub use aging::AgingReplacer;
pub use clock::ClockReplacer;
pub use lookahead::{LookaheadIndex, NEVER};
pub use lru::LruReplacer;
pub use optimal::OptimalReplacer;

use crate::common::{Error, FrameId, PolicyKind, Result, SimConfig};
use crate::vm::frame::Eviction;
use crate::vm::page_table::{EntryId, PageTable};

/// A page replacement policy over a fixed set of frames.
///
/// The driver calls [`admit`](Replacer::admit) while free frames remain and
/// [`evict`](Replacer::evict) once the policy is full. Calling either in the
/// wrong state is a programming error and panics.
pub trait Replacer {
    /// Which policy this is.
    fn kind(&self) -> PolicyKind;

    /// Number of frames.
    fn capacity(&self) -> usize;

    /// Number of occupied frames.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True once every frame holds a page. Monotone within a run.
    fn is_full(&self) -> bool {
        self.len() >= self.capacity()
    }

    /// Place `entry` into the free frame `frame`, marking it resident and
    /// referenced.
    fn admit(&mut self, table: &mut PageTable, entry: EntryId, frame: FrameId);

    /// Record a hit on the resident `entry` held in `frame`.
    fn touch(&mut self, table: &mut PageTable, entry: EntryId, frame: FrameId);

    /// Choose a victim, evict it and install `entry` in its frame.
    fn evict(&mut self, table: &mut PageTable, entry: EntryId) -> Eviction;

    /// Periodic refresh driven by the simulator. Only aging uses it.
    fn refresh(&mut self, _table: &mut PageTable) {}
}

/// Build the replacer selected by `config`.
///
/// # Errors
/// - `Error::MissingLookahead` if the optimal policy is selected and no
///   lookahead index is supplied
pub fn build_replacer(
    config: &SimConfig,
    lookahead: Option<LookaheadIndex>,
) -> Result<Box<dyn Replacer>> {
    let frames = config.frames();

    let replacer: Box<dyn Replacer> = match config.policy() {
        PolicyKind::Optimal => {
            let index = lookahead.ok_or(Error::MissingLookahead)?;
            Box::new(OptimalReplacer::new(frames, index))
        }
        PolicyKind::Clock => Box::new(ClockReplacer::new(frames)),
        PolicyKind::Aging => Box::new(AgingReplacer::new(frames, config.aging_selection())),
        PolicyKind::Lru => Box::new(LruReplacer::new(frames)),
    };

    Ok(replacer)
}
