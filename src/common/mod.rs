//! Common types and utilities shared across vmsim.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration and constants
//! - Error types
//! - Identifiers (PageId, FrameId) and the address codec

pub mod config;
pub mod error;
mod frame_id;
mod page_id;

pub use config::{AgingSelection, PolicyKind, SimConfig};
pub use error::{Error, Result};
pub use frame_id::FrameId;
pub use page_id::{page_prefix, PageId};
