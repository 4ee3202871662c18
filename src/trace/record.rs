//! A single trace record: an address and an access mode.

use std::fmt;
use std::str::FromStr;

use crate::common::{page_prefix, Error, Result};

/// Whether a reference reads or writes its page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessMode {
    /// `R` in the trace.
    Read,
    /// `W` in the trace. Marks the page dirty.
    Write,
}

impl AccessMode {
    /// Check if this access dirties the page.
    #[inline]
    pub fn is_write(self) -> bool {
        self == AccessMode::Write
    }
}

impl FromStr for AccessMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "R" => Ok(AccessMode::Read),
            "W" => Ok(AccessMode::Write),
            other => Err(format!("unknown access mode '{}' (expected R or W)", other)),
        }
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessMode::Read => f.write_str("R"),
            AccessMode::Write => f.write_str("W"),
        }
    }
}

/// One memory reference from a trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceRecord {
    /// Raw address token as it appeared in the trace.
    pub address: String,
    /// Read or write.
    pub mode: AccessMode,
}

impl TraceRecord {
    /// Create a record.
    pub fn new(address: impl Into<String>, mode: AccessMode) -> Self {
        Self {
            address: address.into(),
            mode,
        }
    }

    /// Shorthand for a read reference.
    pub fn read(address: impl Into<String>) -> Self {
        Self::new(address, AccessMode::Read)
    }

    /// Shorthand for a write reference.
    pub fn write(address: impl Into<String>) -> Self {
        Self::new(address, AccessMode::Write)
    }

    /// The page this record references.
    #[inline]
    pub fn page(&self) -> &str {
        page_prefix(&self.address)
    }
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.address, self.mode)
    }
}

/// Parse one trace line.
///
/// Fields are whitespace separated: `address mode`. Anything after the mode
/// is ignored. Blank lines yield `Ok(None)`.
///
/// # Errors
/// `Error::MalformedRecord` if the mode is missing or is not `R`/`W`.
pub fn parse_record(line_no: usize, line: &str) -> Result<Option<TraceRecord>> {
    let mut fields = line.split_whitespace();

    let address = match fields.next() {
        Some(a) => a,
        None => return Ok(None),
    };

    let mode = fields
        .next()
        .ok_or_else(|| Error::MalformedRecord {
            line: line_no,
            reason: format!("missing access mode after '{}'", address),
        })?
        .parse::<AccessMode>()
        .map_err(|reason| Error::MalformedRecord {
            line: line_no,
            reason,
        })?;

    Ok(Some(TraceRecord::new(address, mode)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_read_and_write() {
        let rec = parse_record(1, "0041f7a0 R").unwrap().unwrap();
        assert_eq!(rec, TraceRecord::read("0041f7a0"));
        assert_eq!(rec.page(), "0041f");

        let rec = parse_record(2, "  13f5e2c0\tW  ").unwrap().unwrap();
        assert_eq!(rec.mode, AccessMode::Write);
        assert!(rec.mode.is_write());
    }

    #[test]
    fn test_parse_ignores_trailing_fields() {
        let rec = parse_record(1, "0041f7a0 W extra stuff").unwrap().unwrap();
        assert_eq!(rec, TraceRecord::write("0041f7a0"));
    }

    #[test]
    fn test_blank_line_skipped() {
        assert_eq!(parse_record(1, "").unwrap(), None);
        assert_eq!(parse_record(1, "   \t").unwrap(), None);
    }

    #[test]
    fn test_missing_mode() {
        match parse_record(7, "0041f7a0") {
            Err(Error::MalformedRecord { line, reason }) => {
                assert_eq!(line, 7);
                assert!(reason.contains("missing access mode"));
            }
            other => panic!("Expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_mode() {
        assert!(matches!(
            parse_record(2, "0041f7a0 X"),
            Err(Error::MalformedRecord { line: 2, .. })
        ));
        // Modes are case-sensitive
        assert!(parse_record(2, "0041f7a0 r").is_err());
    }

    #[test]
    fn test_record_display() {
        assert_eq!(TraceRecord::write("abc").to_string(), "abc W");
    }
}
