// src/table/mod.rs
//! Table model shared by every stage of the pipeline.
//!
//! - [`Cell`]: one physical cell with its text, link targets, identifiers and
//!   cited paper numbers. Cells are shared as [`CellRef`] (`Rc`), so "the same
//!   cell" means the same allocation (`Rc::ptr_eq`), while merge logic compares
//!   normalized text.
//! - [`Grid`]: a table with every row/column span expanded ([`tabulate`]).
//! - [`TableSection`]: one header row plus body rows of equal width, and the
//!   schema-reconciling [`merge`] that folds one section into another.
//!
//! Nothing here knows about markup beyond [`Cell::from_element`] and
//! [`tabulate_element`]; filters and the merger work on these values only.

mod cell;
mod grid;
mod section;

pub use cell::{Cell, CellRef, CellTag};
pub use grid::{tabulate, tabulate_element, Grid, GridRow, SourceRow};
pub use section::{merge, Row, TableSection};
