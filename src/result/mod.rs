//! Module containing the result types used by the library.
//!
//! [`SasaResult`] is the simplest result type, it contains the total SASA
//! value and the SASA values for each atom in the structure.
//!
//! [`SasaTree`] is a forest of result trees. Each tree mirrors the hierarchy
//! of the structure it was computed for (result → structure → chain →
//! residue → atom), with atom areas summed into every level above them.
//!
//! Structs in this module are annotated with [`serde::Serialize`], which
//! allows them to be serialized to JSON for consumption by other programs.
//!
//! ## Notes
//!
//! Nodes are only ever created by the tree builder; consumers walk a
//! finished [`SasaTree`] read-only.
//!
pub mod node;

// Modules to re-export at the top level
mod builder;
mod result_;
mod tree;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use self::builder::{atom_nodearea, range_nodearea};
pub use self::tree::*;
pub use result_::*;
