// src/lib.rs
//! Support-status tables for cppreference pages.
//!
//! Given the page being read, pick the standard revisions it applies to,
//! fetch the matching "compiler support" pages, keep the rows that concern
//! the page and merge them into one compiler table and one library table.
//!
//! ```text
//! runner::augment
//!   ├─ specs::build_criteria / specs::discover_markers → select_revisions
//!   ├─ PageSource::fetch_pages (support pages ∥ cross-reference page)
//!   └─ per page, in catalog order:
//!        table::tabulate_element → specs::filter_rows → table::merge
//! render::to_html / render::to_delimited
//! ```

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod error;
pub mod specs;
pub mod table;

pub mod csv;
pub mod file;
pub mod render;
pub mod runner;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{Error, Result};
pub use runner::{augment, Augmentation, CurrentPage};
