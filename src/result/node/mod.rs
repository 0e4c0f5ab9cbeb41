//! Nodes of a result tree.
mod node_;
mod properties;

pub use node_::*;
pub use properties::*;
