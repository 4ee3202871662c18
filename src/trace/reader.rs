//! Line-oriented trace reader.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use crate::common::Result;
use crate::trace::record::{parse_record, TraceRecord};

/// Reads trace records one line at a time.
///
/// Blank lines are skipped. The first malformed record ends the iteration
/// with an error; callers are expected to abort the run.
///
/// # Example
/// ```
/// use vmsim::trace::TraceReader;
///
/// let input = "0041f7a0 R\n13f5e2c0 W\n";
/// let records: Vec<_> = TraceReader::new(input.as_bytes())
///     .collect::<vmsim::Result<_>>()
///     .unwrap();
/// assert_eq!(records.len(), 2);
/// ```
pub struct TraceReader<R> {
    lines: Lines<R>,
    line_no: usize,
    failed: bool,
}

impl<R: BufRead> TraceReader<R> {
    /// Wrap a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            failed: false,
        }
    }
}

impl TraceReader<BufReader<File>> {
    /// Open a trace file.
    ///
    /// # Errors
    /// - `Error::Io` if the file cannot be opened
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        for line in self.lines.by_ref() {
            self.line_no += 1;
            let line_no = self.line_no;

            let parsed = line
                .map_err(Into::into)
                .and_then(|l| parse_record(line_no, &l));

            match parsed {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => continue,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }

        None
    }
}

/// Read a whole trace file into memory.
///
/// The optimal policy needs the full trace before simulation starts, so the
/// driver works on a materialized trace.
///
/// # Errors
/// - `Error::Io` if the file cannot be read
/// - `Error::MalformedRecord` on the first bad record
pub fn read_trace<P: AsRef<Path>>(path: P) -> Result<Vec<TraceRecord>> {
    let records = TraceReader::open(path)?.collect::<Result<Vec<_>>>()?;
    log::debug!("read {} trace records", records.len());
    Ok(records)
}
