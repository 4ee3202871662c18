//! Trace input - the reference stream.
//!
//! This module turns trace text into references:
//! - [`TraceRecord`] / [`AccessMode`] - One `address mode` pair
//! - [`TraceReader`] - Line-oriented reader over any `BufRead`
//! - [`read_trace`] - Materialize a whole trace file

mod reader;
mod record;

pub use reader::{read_trace, TraceReader};
pub use record::{parse_record, AccessMode, TraceRecord};
