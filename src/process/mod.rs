//! File processing and formatting pipeline.
//!
//! This module orchestrates the two-call formatting process:
//!
//! **Pass 1 - Embedded blocks:**
//! - Scan for rule blocks that still look minified (declaration-dense,
//!   newline-sparse) and expand each one in place
//!
//! **Pass 2 - Full document:**
//! - Structural splitting, depth indentation, and blank-line collapse
//!   over the whole text
//!
//! The main entry points are [`format_document`] for in-memory text,
//! [`format_file`] for reader/writer pairs, and [`format_path`] which
//! runs the read / backup / overwrite cycle on a file on disk.

pub mod pipeline;

pub use pipeline::{backup_path_for, format_document, format_file, format_path, FormatOutcome};
