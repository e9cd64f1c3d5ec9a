//! # glimpse-dump
//!
//! Self-contained HTML debug dumps for when no structured backend is
//! registered: append a message plus an optional value snapshot to a log
//! file as a styled, collapsible HTML fragment, or as a bare timestamped
//! line in plain mode.
//!
//! Dump files are browsable as-is. Nested arrays and objects fold behind
//! `+`/`-` toggles, and a writer appending to an existing file resumes
//! the toggle numbering where the previous dump left off.
//!
//! ## Key Types
//!
//! - [`DumpWriter`] - One-shot builder that renders and appends a dump
//! - [`DumpValue`] - Explicit value model for dumped structures
//! - [`ToggleAllocator`] - Sequential ids for collapsible regions
//!
//! ## Usage
//!
//! ```rust,ignore
//! use glimpse_dump::{DumpValue, DumpWriter};
//!
//! DumpWriter::new("cart state after checkout")
//!     .value(DumpValue::from(serde_json::json!({"items": [1, 2]})))
//!     .criticality("high")
//!     .write();
//! ```
//!
//! `write()` never fails the caller: any I/O problem is logged at `warn`
//! level and the dump is skipped.

mod collaborators;
mod html;
mod toggle;
mod value;
mod writer;

pub use collaborators::{IdentitySource, LogPathConfig};
pub use toggle::ToggleAllocator;
pub use value::{DumpValue, Field, Visibility};
pub use writer::DumpWriter;
