use crate::parameters::Parameters;

use super::NodeArea;

#[derive(Debug, Clone, serde::Serialize)]
pub struct AtomProperties {
    pub is_polar: bool, // Polar
    pub is_bb: bool,    // Is backbone
    pub radius: f64,    // Atomic radius
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, serde::Serialize)]
pub struct ResidueProperties {
    pub n_atoms: usize,             // Number of atoms
    pub number: String,             // Residue number, incl. insertion code
    pub reference: Option<NodeArea>, // Reference area (if available)
}

impl ResidueProperties {
    /// Numeric part of the residue number.
    pub fn resnum(&self) -> Option<i32> {
        let number = self.number.trim();
        match self.inscode() {
            Some(code) => number[..number.len() - code.len_utf8()].parse().ok(),
            None => number.parse().ok(),
        }
    }

    /// Insertion code, i.e. a trailing non-numeric character of the residue
    /// number.
    pub fn inscode(&self) -> Option<char> {
        let number = self.number.trim();
        let last = number.chars().last()?;
        if last.is_ascii_digit() || number.len() == last.len_utf8() {
            None
        } else {
            Some(last)
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ChainProperties {
    pub n_residues: usize, // Number of residues
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct StructureProperties {
    pub n_chains: usize,      // Number of chains
    pub chain_labels: String, // One character per chain, in order
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ResultProperties {
    pub classified_by: String,  // Classifier name
    pub parameters: Parameters, // Calculation parameters
    pub n_structures: usize,    // Number of structures
}
