// src/specs/mod.rs
//! # Page-reading rules
//!
//! Everything that knows *where the ground truth lives* in cppreference
//! markup: which tables on the current page declare feature-test macros and
//! defect reports, which classes mark revisions, and where the support tables
//! sit on the fetched support pages.
//!
//! ## What lives here
//! - [`criteria`]: the relevance criteria of the current page and the
//!   per-row relevance test.
//! - [`revisions`]: since/until marker discovery and revision range selection.
//! - [`support`]: the row filter over one support table of a fetched page.
//! - [`xref`]: widening the paper set from a cross-reference page.
//!
//! ## What does **not** live here
//! - Fetching (see `core::net`) and merging (see `table::merge`).
//! - Output formatting (see `render`).
//!
//! All functions take an already parsed document and return plain values, so
//! they are testable offline against captured HTML.

pub mod criteria;
pub mod revisions;
pub mod support;
pub mod xref;

pub use criteria::{build_criteria, is_relevant, Criteria};
pub use revisions::{discover_markers, select_revisions, MarkerSet};
pub use support::{filter_rows, SupportKind};
