//! Page identifier type and the address codec.

use std::borrow::Borrow;
use std::fmt;

use crate::common::config::PAGE_ID_LEN;

/// Maps a raw trace address to its page-number prefix.
///
/// The page is the first [`PAGE_ID_LEN`] characters of the address token;
/// shorter tokens are their own page. Addresses sharing the prefix are the
/// same page.
///
/// # Example
/// ```
/// use vmsim::common::page_prefix;
///
/// assert_eq!(page_prefix("0041f7a0"), "0041f");
/// assert_eq!(page_prefix("0041f000"), "0041f");
/// assert_eq!(page_prefix("7ff"), "7ff");
/// ```
pub fn page_prefix(address: &str) -> &str {
    match address.char_indices().nth(PAGE_ID_LEN) {
        Some((end, _)) => &address[..end],
        None => address,
    }
}

/// Identifies a virtual page.
///
/// Borrows as `str` so a [`PageTable`](crate::vm::PageTable) can be probed
/// with the prefix slice returned by [`page_prefix`] without allocating.
///
/// # Example
/// ```
/// use vmsim::PageId;
///
/// let page = PageId::from_address("0041f7a0");
/// assert_eq!(page.as_str(), "0041f");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(Box<str>);

impl PageId {
    /// Create the PageId for a raw trace address.
    pub fn from_address(address: &str) -> Self {
        PageId(page_prefix(address).into())
    }

    /// The page-number prefix.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PageId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Page({})", self.0)
    }
}
