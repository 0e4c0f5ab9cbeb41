//! Atom classification used when a [`Structure`](crate::structure::Structure)
//! is assembled.
//!
//! The tree engine only consumes the outcome of classification (radius,
//! polarity class, backbone flag); how a classifier arrives at it is up to the
//! implementation. [`ElementClassifier`] is the default: it derives everything
//! from the element letter of the atom name.

use std::collections::HashMap;

use crate::result::node::NodeArea;

/// Polarity class of an atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AtomClass {
    Polar,
    Apolar,
    Unknown,
}

/// Atom names that belong to the main chain of proteins and nucleic acids.
const BACKBONE_ATOMS: &[&str] = &[
    "N", "CA", "C", "O", "OXT", "P", "OP1", "OP2", "O5'", "C5'", "C4'",
    "O4'", "C3'", "O3'", "O2'", "C2'", "C1'",
];

/// Returns true if the atom name is a backbone atom. Surrounding whitespace
/// (as found in fixed-width PDB columns) is ignored.
pub fn atom_is_backbone(atom_name: &str) -> bool {
    let name = atom_name.trim();
    BACKBONE_ATOMS.iter().any(|bb| *bb == name)
}

/// Assigns radius, polarity and reference areas to atoms and residues.
///
/// Implementations must be thread-safe, structures holding a classifier are
/// shared between tree-building threads.
pub trait Classifier: Send + Sync {
    /// Name recorded on every run node built from a structure classified by
    /// this classifier.
    fn name(&self) -> &str;

    /// Van der Waals radius in Ångström.
    fn radius(&self, res_name: &str, atom_name: &str) -> f64;

    fn class(&self, res_name: &str, atom_name: &str) -> AtomClass;

    /// Expected area of a fully exposed residue of this type, if known.
    fn reference_area(&self, _res_name: &str) -> Option<NodeArea> {
        None
    }
}

/// Name of [`ElementClassifier`].
pub const DEFAULT_CLASSIFIER_NAME: &str = "element";

/// Element based classifier.
///
/// Radii are the Bondi/Tsai values for the common biomolecular elements; N
/// and O are polar, C and S apolar, everything else unknown.
#[derive(Debug, Clone, Default)]
pub struct ElementClassifier {
    reference_areas: HashMap<String, NodeArea>,
}

impl ElementClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach reference areas keyed by residue name (e.g. `"ALA"`).
    pub fn with_reference_areas(
        mut self,
        reference_areas: HashMap<String, NodeArea>,
    ) -> Self {
        self.reference_areas = reference_areas;
        self
    }

    fn element(atom_name: &str) -> Option<char> {
        atom_name
            .trim()
            .chars()
            .find(|c| c.is_ascii_alphabetic())
            .map(|c| c.to_ascii_uppercase())
    }
}

impl Classifier for ElementClassifier {
    fn name(&self) -> &str {
        DEFAULT_CLASSIFIER_NAME
    }

    fn radius(&self, _res_name: &str, atom_name: &str) -> f64 {
        match Self::element(atom_name) {
            Some('C') => 1.70,
            Some('N') => 1.55,
            Some('O') => 1.52,
            Some('S') => 1.80,
            Some('P') => 1.80,
            Some('H') => 1.10,
            _ => 1.80,
        }
    }

    fn class(&self, _res_name: &str, atom_name: &str) -> AtomClass {
        match Self::element(atom_name) {
            Some('N') | Some('O') => AtomClass::Polar,
            Some('C') | Some('S') => AtomClass::Apolar,
            _ => AtomClass::Unknown,
        }
    }

    fn reference_area(&self, res_name: &str) -> Option<NodeArea> {
        self.reference_areas.get(res_name.trim()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backbone_names() {
        assert!(atom_is_backbone("N"));
        assert!(atom_is_backbone(" CA "));
        assert!(atom_is_backbone("O5'"));
        assert!(!atom_is_backbone("CB"));
        assert!(!atom_is_backbone(""));
    }

    #[test]
    fn element_classes() {
        let classifier = ElementClassifier::new();
        assert_eq!(classifier.class("MET", "N"), AtomClass::Polar);
        assert_eq!(classifier.class("MET", "SD"), AtomClass::Apolar);
        assert_eq!(classifier.class("HOH", "X1"), AtomClass::Unknown);
        assert!(classifier.radius("MET", "N") > 0.0);
        assert_eq!(classifier.name(), DEFAULT_CLASSIFIER_NAME);
    }

    #[test]
    fn reference_areas() {
        let mut refs = HashMap::new();
        refs.insert(
            "ALA".to_owned(),
            NodeArea::new("ALA", 40.0, 20.0, 60.0, 0.0),
        );
        let classifier =
            ElementClassifier::new().with_reference_areas(refs);
        assert!(classifier.reference_area("ALA").is_some());
        assert!(classifier.reference_area("GLY").is_none());
    }
}
