//! Configuration for a simulation run.

use std::fmt;
use std::num::{NonZeroU64, NonZeroUsize};
use std::str::FromStr;

use crate::common::{Error, Result};

/// Number of leading address characters that form a page identifier.
///
/// This is part of the trace format: `0041f7a0` and `0041f000` name the
/// same page.
pub const PAGE_ID_LEN: usize = 5;

/// Bit OR-ed into an aging register when its page was referenced since the
/// last refresh.
pub const AGING_MSB: u8 = 0x80;

/// Which replacement policy drives the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    /// Belady's optimal policy, using a prescan of the whole trace.
    Optimal,
    /// Second-chance clock.
    Clock,
    /// 8-bit aging counters refreshed every R references.
    Aging,
    /// Exact least-recently-used.
    Lru,
}

impl PolicyKind {
    /// All policies, in command-line order.
    pub const ALL: [PolicyKind; 4] = [
        PolicyKind::Optimal,
        PolicyKind::Clock,
        PolicyKind::Aging,
        PolicyKind::Lru,
    ];

    /// The command-line selector (`opt`, `clock`, `aging`, `lru`).
    pub fn selector(self) -> &'static str {
        match self {
            PolicyKind::Optimal => "opt",
            PolicyKind::Clock => "clock",
            PolicyKind::Aging => "aging",
            PolicyKind::Lru => "lru",
        }
    }

    /// The name printed in the report.
    pub fn name(self) -> &'static str {
        match self {
            PolicyKind::Optimal => "Optimal",
            PolicyKind::Clock => "Clock",
            PolicyKind::Aging => "Aging",
            PolicyKind::Lru => "Least Recently Used",
        }
    }
}

impl FromStr for PolicyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PolicyKind::ALL
            .into_iter()
            .find(|kind| kind.selector() == s)
            .ok_or_else(|| Error::UnknownPolicy(s.to_string()))
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the aging policy picks its victim when some frames are unreferenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgingSelection {
    /// Search only unreferenced frames for the smallest register.
    #[default]
    Strict,
    /// Take the smallest register among unreferenced frames, then evict the
    /// first frame anywhere holding that value, even a referenced one.
    /// Reproduces reports produced by the original simulator.
    Compatible,
}

/// Validated simulation configuration.
///
/// # Example
/// ```
/// use vmsim::common::config::{PolicyKind, SimConfig};
///
/// let config = SimConfig::new(8, PolicyKind::Aging, Some(16)).unwrap();
/// assert_eq!(config.frames(), 8);
/// assert_eq!(config.refresh_interval(), Some(16));
///
/// assert!(SimConfig::new(8, PolicyKind::Aging, None).is_err());
/// assert!(SimConfig::new(0, PolicyKind::Lru, None).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    frames: NonZeroUsize,
    policy: PolicyKind,
    refresh: Option<NonZeroU64>,
    aging_selection: AgingSelection,
}

impl SimConfig {
    /// Validate and build a configuration.
    ///
    /// # Errors
    /// - `Error::InvalidFrameCount` if `frames` is 0
    /// - `Error::MissingRefreshInterval` if the policy is aging and `refresh` is `None`
    /// - `Error::InvalidRefreshInterval` if the policy is aging and `refresh` is 0
    pub fn new(frames: usize, policy: PolicyKind, refresh: Option<u64>) -> Result<Self> {
        let frames = NonZeroUsize::new(frames).ok_or(Error::InvalidFrameCount(frames))?;

        // Refresh only means something to aging; other policies ignore it.
        let refresh = match policy {
            PolicyKind::Aging => {
                let r = refresh.ok_or(Error::MissingRefreshInterval)?;
                Some(NonZeroU64::new(r).ok_or(Error::InvalidRefreshInterval(r))?)
            }
            _ => None,
        };

        Ok(Self {
            frames,
            policy,
            refresh,
            aging_selection: AgingSelection::default(),
        })
    }

    /// Choose the aging victim search.
    pub fn with_aging_selection(mut self, selection: AgingSelection) -> Self {
        self.aging_selection = selection;
        self
    }

    /// Number of physical frames.
    #[inline]
    pub fn frames(&self) -> usize {
        self.frames.get()
    }

    /// Active replacement policy.
    #[inline]
    pub fn policy(&self) -> PolicyKind {
        self.policy
    }

    /// Refresh interval in references; `Some` only for aging.
    #[inline]
    pub fn refresh_interval(&self) -> Option<u64> {
        self.refresh.map(NonZeroU64::get)
    }

    /// Aging victim search.
    #[inline]
    pub fn aging_selection(&self) -> AgingSelection {
        self.aging_selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_selectors_round_trip() {
        for kind in PolicyKind::ALL {
            assert_eq!(kind.selector().parse::<PolicyKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_policy() {
        match "fifo".parse::<PolicyKind>() {
            Err(Error::UnknownPolicy(name)) => assert_eq!(name, "fifo"),
            other => panic!("Expected UnknownPolicy, got {:?}", other),
        }
        // Selectors are case-sensitive
        assert!("LRU".parse::<PolicyKind>().is_err());
    }

    #[test]
    fn test_policy_names() {
        assert_eq!(PolicyKind::Lru.to_string(), "Least Recently Used");
        assert_eq!(PolicyKind::Optimal.to_string(), "Optimal");
    }

    #[test]
    fn test_zero_frames_rejected() {
        assert!(matches!(
            SimConfig::new(0, PolicyKind::Clock, None),
            Err(Error::InvalidFrameCount(0))
        ));
    }

    #[test]
    fn test_aging_requires_refresh() {
        assert!(matches!(
            SimConfig::new(4, PolicyKind::Aging, None),
            Err(Error::MissingRefreshInterval)
        ));
        assert!(matches!(
            SimConfig::new(4, PolicyKind::Aging, Some(0)),
            Err(Error::InvalidRefreshInterval(0))
        ));
    }

    #[test]
    fn test_refresh_ignored_for_other_policies() {
        let config = SimConfig::new(4, PolicyKind::Lru, Some(0)).unwrap();
        assert_eq!(config.refresh_interval(), None);
    }

    #[test]
    fn test_aging_selection_default() {
        let config = SimConfig::new(4, PolicyKind::Aging, Some(10)).unwrap();
        assert_eq!(config.aging_selection(), AgingSelection::Strict);

        let config = config.with_aging_selection(AgingSelection::Compatible);
        assert_eq!(config.aging_selection(), AgingSelection::Compatible);
    }
}
