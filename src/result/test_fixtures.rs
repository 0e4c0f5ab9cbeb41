//! Shared test data: a synthetic ubiquitin-like chain (76 residues, heavy
//! atoms only, starting with an 8-atom MET) and helpers around it.

use crate::{
    classifier::AtomClass,
    error::SasaError,
    parameters::Parameters,
    result::{node::NodeArea, SasaResult},
    structure::{Structure, StructureSource},
};

const UBIQUITIN: &str =
    "MQIFVKTLTGKTITLEVEPSDTIENVKAKIQDKEGIPPDQQRLIFAGKQLEDGRTLSDYNIQKESTLHLVLRLRGG";

fn residue(code: char) -> (&'static str, &'static [&'static str]) {
    match code {
        'A' => ("ALA", &["CB"]),
        'R' => ("ARG", &["CB", "CG", "CD", "NE", "CZ", "NH1", "NH2"]),
        'N' => ("ASN", &["CB", "CG", "OD1", "ND2"]),
        'D' => ("ASP", &["CB", "CG", "OD1", "OD2"]),
        'C' => ("CYS", &["CB", "SG"]),
        'Q' => ("GLN", &["CB", "CG", "CD", "OE1", "NE2"]),
        'E' => ("GLU", &["CB", "CG", "CD", "OE1", "OE2"]),
        'G' => ("GLY", &[]),
        'H' => ("HIS", &["CB", "CG", "ND1", "CD2", "CE1", "NE2"]),
        'I' => ("ILE", &["CB", "CG1", "CG2", "CD1"]),
        'L' => ("LEU", &["CB", "CG", "CD1", "CD2"]),
        'K' => ("LYS", &["CB", "CG", "CD", "CE", "NZ"]),
        'M' => ("MET", &["CB", "CG", "SD", "CE"]),
        'F' => ("PHE", &["CB", "CG", "CD1", "CD2", "CE1", "CE2", "CZ"]),
        'P' => ("PRO", &["CB", "CG", "CD"]),
        'S' => ("SER", &["CB", "OG"]),
        'T' => ("THR", &["CB", "OG1", "CG2"]),
        'W' => (
            "TRP",
            &["CB", "CG", "CD1", "CD2", "NE1", "CE2", "CE3", "CZ2", "CZ3", "CH2"],
        ),
        'Y' => ("TYR", &["CB", "CG", "CD1", "CD2", "CE1", "CE2", "CZ", "OH"]),
        'V' => ("VAL", &["CB", "CG1", "CG2"]),
        _ => ("UNK", &[]),
    }
}

pub(crate) fn ubiquitin() -> Structure {
    let mut structure = Structure::new_empty(Some("1ubq"));
    for (i, code) in UBIQUITIN.chars().enumerate() {
        let (name, side_chain) = residue(code);
        let number = (i + 1).to_string();
        for atom in ["N", "CA", "C", "O"].iter().chain(side_chain.iter()) {
            structure.add_atom(atom, name, &number, 'A').unwrap();
        }
    }
    structure
}

/// Deterministic, strictly positive per-atom values.
pub(crate) fn ubiquitin_result(structure: &Structure) -> SasaResult {
    let sasa = (0..structure.n_atoms())
        .map(|i| 0.5 + ((i * 37) % 23) as f64 * 0.75)
        .collect();
    SasaResult::new(sasa, Parameters::default())
}

pub(crate) fn assert_close(a: f64, b: f64) {
    let scale = a.abs().max(b.abs()).max(1.0);
    assert!((a - b).abs() <= 1e-10 * scale, "{} != {}", a, b);
}

/// Delegates to a [`Structure`] but fails the name lookup of one atom.
pub(crate) struct FailingStructure<'a> {
    inner: &'a Structure,
    fail_atom: usize,
}

impl<'a> FailingStructure<'a> {
    pub(crate) fn new(inner: &'a Structure, fail_atom: usize) -> Self {
        Self { inner, fail_atom }
    }
}

impl StructureSource for FailingStructure<'_> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn n_atoms(&self) -> usize {
        self.inner.n_atoms()
    }

    fn atom_name(&self, atom: usize) -> Result<&str, SasaError> {
        if atom == self.fail_atom {
            return Err(SasaError::Lookup(format!("atom {} unavailable", atom)));
        }
        self.inner.atom_name(atom)
    }

    fn atom_radius(&self, atom: usize) -> Result<f64, SasaError> {
        self.inner.atom_radius(atom)
    }

    fn atom_class(&self, atom: usize) -> Result<AtomClass, SasaError> {
        self.inner.atom_class(atom)
    }

    fn residue_name(&self, residue: usize) -> Result<&str, SasaError> {
        self.inner.residue_name(residue)
    }

    fn residue_number(&self, residue: usize) -> Result<&str, SasaError> {
        self.inner.residue_number(residue)
    }

    fn residue_atom_range(
        &self,
        residue: usize,
    ) -> Result<(usize, usize), SasaError> {
        self.inner.residue_atom_range(residue)
    }

    fn residue_reference_area(&self, residue: usize) -> Option<&NodeArea> {
        self.inner.residue_reference_area(residue)
    }

    fn chain_labels(&self) -> &str {
        self.inner.chain_labels()
    }

    fn chain_atom_range(
        &self,
        label: char,
    ) -> Result<(usize, usize), SasaError> {
        self.inner.chain_atom_range(label)
    }

    fn chain_residue_range(
        &self,
        label: char,
    ) -> Result<(usize, usize), SasaError> {
        self.inner.chain_residue_range(label)
    }

    fn n_chains(&self) -> usize {
        self.inner.n_chains()
    }

    fn classifier_name(&self) -> &str {
        self.inner.classifier_name()
    }
}
