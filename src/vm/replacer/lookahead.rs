//! Lookahead index - future reference positions for the optimal policy.

use std::collections::{HashMap, VecDeque};

use crate::common::{page_prefix, PageId};

/// Sentinel position for "never referenced again".
///
/// Sorts after every real trace position, so a page with no further
/// references is always the furthest in the future.
pub const NEVER: u64 = u64::MAX;

/// For each page, the ascending trace positions at which it is referenced,
/// terminated by [`NEVER`].
///
/// Built once by prescanning the whole trace. The front of each queue is
/// consumed as the simulation reaches that reference, so the head is always
/// the page's next use and victim selection compares heads in O(1) per
/// frame.
///
/// # Example
/// ```
/// use vmsim::vm::replacer::{LookaheadIndex, NEVER};
///
/// let mut index = LookaheadIndex::build(["aaaaa", "bbbbb", "aaaaa"]);
/// assert_eq!(index.next_use("aaaaa"), 0);
///
/// index.advance("aaaaa");
/// assert_eq!(index.next_use("aaaaa"), 2);
///
/// index.advance("aaaaa");
/// assert_eq!(index.next_use("aaaaa"), NEVER);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LookaheadIndex {
    queues: HashMap<PageId, VecDeque<u64>>,
}

impl LookaheadIndex {
    /// Prescan a trace given as raw addresses (or page prefixes).
    pub fn build<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut queues: HashMap<PageId, VecDeque<u64>> = HashMap::new();

        for (pos, address) in addresses.into_iter().enumerate() {
            let page = page_prefix(address.as_ref());
            match queues.get_mut(page) {
                Some(q) => q.push_back(pos as u64),
                None => {
                    queues.insert(PageId::from_address(page), VecDeque::from([pos as u64]));
                }
            }
        }

        for q in queues.values_mut() {
            q.push_back(NEVER);
        }

        log::debug!("lookahead index built for {} pages", queues.len());

        Self { queues }
    }

    /// Position of the next reference to the page of `address`, or [`NEVER`].
    pub fn next_use(&self, address: &str) -> u64 {
        self.queues
            .get(page_prefix(address))
            .and_then(|q| q.front().copied())
            .unwrap_or(NEVER)
    }

    /// Consume the reference just made to the page of `address`.
    ///
    /// The sentinel is never consumed.
    pub fn advance(&mut self, address: &str) {
        if let Some(q) = self.queues.get_mut(page_prefix(address)) {
            if q.len() > 1 {
                q.pop_front();
            }
        }
    }

    /// Number of distinct pages in the trace.
    pub fn page_count(&self) -> usize {
        self.queues.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_groups_by_prefix() {
        let index = LookaheadIndex::build(["0041f7a0", "13f5e2c0", "0041f000"]);
        assert_eq!(index.page_count(), 2);
        assert_eq!(index.next_use("0041f"), 0);
        assert_eq!(index.next_use("13f5e"), 1);
    }

    #[test]
    fn test_raw_addresses_resolve_to_page() {
        let mut index = LookaheadIndex::build(["0041f7a0", "13f5e2c0", "0041f000"]);
        assert_eq!(index.next_use("0041f7a0"), 0);

        index.advance("0041fabc");
        assert_eq!(index.next_use("0041f000"), 2);
        assert_eq!(index.next_use("0041f"), 2);
    }

    #[test]
    fn test_advance_walks_positions() {
        let mut index = LookaheadIndex::build(["a", "b", "a", "c", "a"]);

        index.advance("a");
        assert_eq!(index.next_use("a"), 2);
        index.advance("a");
        assert_eq!(index.next_use("a"), 4);
        index.advance("a");
        assert_eq!(index.next_use("a"), NEVER);
    }

    #[test]
    fn test_sentinel_never_consumed() {
        let mut index = LookaheadIndex::build(["a"]);
        index.advance("a");
        index.advance("a");
        assert_eq!(index.next_use("a"), NEVER);
    }

    #[test]
    fn test_unknown_page_is_never() {
        let mut index = LookaheadIndex::build(["a"]);
        assert_eq!(index.next_use("zzz"), NEVER);
        index.advance("zzz");
        assert_eq!(index.page_count(), 1);
    }
}
