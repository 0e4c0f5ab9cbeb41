use std::fmt;

use crate::parameters::Parameters;

/// Per-atom SASA values of one calculation.
///
/// Values are indexed like the atoms of the
/// [`Structure`](crate::structure::Structure) they were computed for.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SasaResult {
    /// Total SASA value
    pub total: f64,

    /// SASA value of every atom
    sasa: Vec<f64>,

    /// Parameters the values were computed with
    parameters: Parameters,
}

impl SasaResult {
    /// Creates a [`SasaResult`] from per-atom values; the total is their sum.
    pub fn new(sasa: Vec<f64>, parameters: Parameters) -> SasaResult {
        let total = sasa.iter().sum();
        SasaResult {
            total,
            sasa,
            parameters,
        }
    }

    /// Replace the total, for results whose total was computed externally.
    pub fn with_total(mut self, total: f64) -> SasaResult {
        self.total = total;
        self
    }

    /// Number of atoms in the structure
    pub fn n_atoms(&self) -> usize {
        self.sasa.len()
    }

    /// Returns a copy of the SASA values for each ATOM in the molecule
    pub fn atom_sasa(&self) -> Vec<f64> {
        self.sasa.clone()
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Returns an iterator over the SASA values in the result
    pub fn iter(&self) -> SasaResultIter<'_> {
        SasaResultIter {
            result: self,
            index: 0,
        }
    }

    /// Returns the SASA value for the atom at the given index
    pub fn get(&self, index: usize) -> Option<f64> {
        self.sasa.get(index).copied()
    }
}

impl fmt::Display for SasaResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.total)
    }
}

pub struct SasaResultIter<'a> {
    result: &'a SasaResult,
    index: usize,
}

impl<'a> Iterator for SasaResultIter<'a> {
    type Item = f64;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.result.get(self.index)?;
        self.index += 1;
        Some(value)
    }
}
