// Copyright 2023. Oliver Wissett, Matt Greenig, and Pietro Sormanni. All rights reserved.

//! Hierarchical SASA result trees.
//!
//! Given a [`Structure`](structure::Structure) and the per-atom values of a
//! [`SasaResult`](result::SasaResult), [`SasaTree`](result::SasaTree) builds a
//! tree mirroring the molecule (result → structure → chain → residue → atom)
//! and sums atom areas into every level above them. Trees built
//! independently, e.g. on different threads, can be merged into one forest
//! with [`SasaTree::join`](result::SasaTree::join).
//!
//! ```
//! use sasa_tree::{
//!     parameters::Parameters,
//!     result::{node::NodeType, SasaResult, SasaTree},
//!     structure::Structure,
//! };
//!
//! let mut structure = Structure::new_empty(Some("gly"));
//! structure.add_atom("N", "GLY", "1", 'A')?;
//! structure.add_atom("CA", "GLY", "1", 'A')?;
//!
//! let result = SasaResult::new(vec![10.0, 5.0], Parameters::default());
//! let tree = SasaTree::from_result(&result, &structure, "gly")?;
//!
//! let chain = tree.get_nodes(NodeType::Chain)[0];
//! assert_eq!(tree[chain].area().unwrap().total(), 15.0);
//! # Ok::<(), sasa_tree::error::SasaError>(())
//! ```

#[macro_use]
extern crate log;

pub mod classifier;
pub mod error;
pub mod parameters;
pub mod result;
pub mod structure;
pub mod uids;

pub use error::SasaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Debug,
    Normal,
    NoWarnings,
    Silent,
}

impl Verbosity {
    pub fn level_filter(&self) -> log::LevelFilter {
        match self {
            Verbosity::Debug => log::LevelFilter::Debug,
            Verbosity::Normal => log::LevelFilter::Info,
            Verbosity::NoWarnings => log::LevelFilter::Error,
            Verbosity::Silent => log::LevelFilter::Off,
        }
    }
}

// ---------------- //
// Public Functions //
// ---------------- //

/// Installs an `env_logger` logger at the given verbosity. `RUST_LOG`, if
/// set, takes precedence. Does nothing if a logger is already installed.
pub fn init_logger(verbosity: Verbosity) {
    let _ = env_logger::Builder::new()
        .filter_level(verbosity.level_filter())
        .parse_default_env()
        .try_init();
}
