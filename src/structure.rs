//! Molecular structure as seen by the tree builder.
//!
//! [`StructureSource`] is the set of lookups the level generators need; any
//! type answering them can be turned into a result tree. [`Structure`] is the
//! in-memory implementation, assembled atom by atom or loaded from a PDB file
//! through `pdbtbx`.

use std::{fmt, path::Path};

use crate::{
    classifier::{self, AtomClass, Classifier, ElementClassifier},
    error::SasaError,
    result::node::NodeArea,
};

/// Lookups consumed by the level generators.
///
/// Atom and residue indices are zero based and dense. Ranges are inclusive
/// `(first, last)` pairs.
pub trait StructureSource {
    fn name(&self) -> &str;

    fn n_atoms(&self) -> usize;

    fn atom_name(&self, atom: usize) -> Result<&str, SasaError>;

    fn atom_radius(&self, atom: usize) -> Result<f64, SasaError>;

    fn atom_class(&self, atom: usize) -> Result<AtomClass, SasaError>;

    fn atom_is_backbone(&self, atom_name: &str) -> bool {
        classifier::atom_is_backbone(atom_name)
    }

    fn residue_name(&self, residue: usize) -> Result<&str, SasaError>;

    /// Residue number as written in the input, insertion code included.
    fn residue_number(&self, residue: usize) -> Result<&str, SasaError>;

    fn residue_atom_range(
        &self,
        residue: usize,
    ) -> Result<(usize, usize), SasaError>;

    fn residue_reference_area(&self, residue: usize) -> Option<&NodeArea>;

    /// One character per chain, in the order the chains appear.
    fn chain_labels(&self) -> &str;

    fn chain_atom_range(&self, label: char)
        -> Result<(usize, usize), SasaError>;

    fn chain_residue_range(
        &self,
        label: char,
    ) -> Result<(usize, usize), SasaError>;

    fn n_chains(&self) -> usize;

    fn classifier_name(&self) -> &str;
}

#[derive(Debug, Clone)]
struct AtomRecord {
    name: String,
    radius: f64,
    class: AtomClass,
}

#[derive(Debug, Clone)]
struct ResidueRecord {
    name: String,
    number: String,
    first_atom: usize,
    last_atom: usize,
    reference: Option<NodeArea>,
}

#[derive(Debug, Clone)]
struct ChainRecord {
    label: char,
    first_atom: usize,
    last_atom: usize,
    first_residue: usize,
    last_residue: usize,
}

/// In-memory structure.
///
/// Atoms are classified by the structure's [`Classifier`] as they are added.
/// Residues and chains are derived from the atom sequence: a new residue
/// starts whenever residue number, residue name or chain label changes, a new
/// chain whenever the chain label changes. Chains must be contiguous.
pub struct Structure {
    name: String,
    classifier: Box<dyn Classifier>,
    atoms: Vec<AtomRecord>,
    residues: Vec<ResidueRecord>,
    chains: Vec<ChainRecord>,
    chain_labels: String,
}

impl Structure {
    /// Creates an empty structure classified by [`ElementClassifier`].
    ///
    /// ## Arguments
    /// * `name` - Name of the structure (default: "Unnamed")
    ///
    pub fn new_empty(name: Option<&str>) -> Structure {
        Self::with_classifier(name, Box::new(ElementClassifier::new()))
    }

    pub fn with_classifier(
        name: Option<&str>,
        classifier: Box<dyn Classifier>,
    ) -> Structure {
        Structure {
            name: name.unwrap_or("Unnamed").to_owned(),
            classifier,
            atoms: Vec::new(),
            residues: Vec::new(),
            chains: Vec::new(),
            chain_labels: String::new(),
        }
    }

    /// Loads the first model of a PDB file with the default classifier.
    ///
    /// The structure is named after the file stem. Hetero atoms and
    /// hydrogens are skipped.
    pub fn from_path<P: AsRef<Path>>(pdb_path: P) -> Result<Structure, SasaError> {
        let path = pdb_path.as_ref();
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("Unnamed")
            .to_owned();

        let path_str = path.to_str().ok_or_else(|| {
            SasaError::Structure(format!(
                "path is not valid UTF-8: {}",
                path.display()
            ))
        })?;

        let (pdb, warnings) =
            pdbtbx::open(path_str, pdbtbx::StrictnessLevel::Loose).map_err(
                |errors| {
                    SasaError::Structure(
                        errors
                            .iter()
                            .map(|e| e.to_string())
                            .collect::<Vec<_>>()
                            .join("; "),
                    )
                },
            )?;

        for warning in &warnings {
            warn!("{}: {}", name, warning);
        }

        let mut structure = Structure::new_empty(Some(&name));
        structure.add_pdb(&pdb)?;
        Ok(structure)
    }

    /// Builds a structure from an already parsed PDB, first model only.
    pub fn from_pdb(
        pdb: &pdbtbx::PDB,
        name: Option<&str>,
        classifier: Box<dyn Classifier>,
    ) -> Result<Structure, SasaError> {
        let mut structure = Structure::with_classifier(name, classifier);
        structure.add_pdb(pdb)?;
        Ok(structure)
    }

    fn add_pdb(&mut self, pdb: &pdbtbx::PDB) -> Result<(), SasaError> {
        let model = pdb.models().next().ok_or_else(|| {
            SasaError::Structure("PDB file contains no models".to_owned())
        })?;

        for chain in model.chains() {
            let label = chain_label(chain.id())?;

            for residue in chain.residues() {
                let res_name = residue.name().unwrap_or("UNK");
                let res_number = match residue.insertion_code() {
                    Some(code) => {
                        format!("{}{}", residue.serial_number(), code)
                    }
                    None => residue.serial_number().to_string(),
                };

                // Only the first alternate location of a residue is kept.
                let mut altloc: Option<&str> = None;
                let mut seen: Vec<&str> = Vec::new();

                for conformer in residue.conformers() {
                    if let Some(location) = conformer.alternative_location() {
                        match altloc {
                            Some(first) if first != location => continue,
                            Some(_) => {}
                            None => altloc = Some(location),
                        }
                    }

                    for atom in conformer.atoms() {
                        if atom.hetero()
                            || is_hydrogen(atom.name())
                            || seen.contains(&atom.name())
                        {
                            continue;
                        }
                        seen.push(atom.name());
                        self.add_atom(
                            atom.name(),
                            res_name,
                            &res_number,
                            label,
                        )?;
                    }
                }
            }
        }

        debug!(
            "Loaded {}: {} atoms, {} residues, chains '{}'",
            self.name,
            self.atoms.len(),
            self.residues.len(),
            self.chain_labels
        );

        Ok(())
    }

    /// Appends an atom to the structure.
    pub fn add_atom(
        &mut self,
        atom_name: &str,
        res_name: &str,
        res_number: &str,
        chain_label: char,
    ) -> Result<(), SasaError> {
        if !chain_label.is_ascii() || chain_label.is_ascii_control() {
            return Err(SasaError::Structure(format!(
                "invalid chain label {:?}",
                chain_label
            )));
        }

        let atom_name = atom_name.trim();
        let res_name = res_name.trim();
        let res_number = res_number.trim();

        if atom_name.is_empty() || res_name.is_empty() {
            return Err(SasaError::Structure(format!(
                "atom without name or residue name ({:?} {:?} {} {})",
                atom_name, res_name, res_number, chain_label
            )));
        }

        let atom_index = self.atoms.len();

        let new_chain = self
            .chains
            .last()
            .map_or(true, |chain| chain.label != chain_label);

        if new_chain && self.chain_labels.contains(chain_label) {
            return Err(SasaError::Structure(format!(
                "chain {} is not contiguous (atom {} {} {})",
                chain_label, atom_name, res_name, res_number
            )));
        }

        let new_residue = new_chain
            || self.residues.last().map_or(true, |residue| {
                residue.number != res_number || residue.name != res_name
            });

        if new_residue {
            self.residues.push(ResidueRecord {
                name: res_name.to_owned(),
                number: res_number.to_owned(),
                first_atom: atom_index,
                last_atom: atom_index,
                reference: self.classifier.reference_area(res_name),
            });
        } else if let Some(residue) = self.residues.last_mut() {
            residue.last_atom = atom_index;
        }

        let residue_index = self.residues.len() - 1;
        if new_chain {
            self.chains.push(ChainRecord {
                label: chain_label,
                first_atom: atom_index,
                last_atom: atom_index,
                first_residue: residue_index,
                last_residue: residue_index,
            });
            self.chain_labels.push(chain_label);
        } else if let Some(chain) = self.chains.last_mut() {
            chain.last_atom = atom_index;
            chain.last_residue = residue_index;
        }

        self.atoms.push(AtomRecord {
            name: atom_name.to_owned(),
            radius: self.classifier.radius(res_name, atom_name),
            class: self.classifier.class(res_name, atom_name),
        });

        Ok(())
    }

    /// Returns a string slice to the name of the structure
    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn n_residues(&self) -> usize {
        self.residues.len()
    }

    fn atom(&self, atom: usize) -> Result<&AtomRecord, SasaError> {
        self.atoms.get(atom).ok_or_else(|| {
            SasaError::Lookup(format!(
                "atom index {} out of range ({} atoms)",
                atom,
                self.atoms.len()
            ))
        })
    }

    fn residue(&self, residue: usize) -> Result<&ResidueRecord, SasaError> {
        self.residues.get(residue).ok_or_else(|| {
            SasaError::Lookup(format!(
                "residue index {} out of range ({} residues)",
                residue,
                self.residues.len()
            ))
        })
    }

    fn chain(&self, label: char) -> Result<&ChainRecord, SasaError> {
        self.chains
            .iter()
            .find(|chain| chain.label == label)
            .ok_or_else(|| {
                SasaError::Lookup(format!("no chain with label {}", label))
            })
    }
}

/// Chain labels are single characters; longer ids can't be represented.
fn chain_label(id: &str) -> Result<char, SasaError> {
    let mut chars = id.chars();
    match (chars.next(), chars.next()) {
        (Some(label), None) => Ok(label),
        (None, _) => Err(SasaError::Structure("chain without label".to_owned())),
        (Some(_), Some(_)) => Err(SasaError::Structure(format!(
            "chain id '{}' is longer than one character",
            id
        ))),
    }
}

fn is_hydrogen(atom_name: &str) -> bool {
    matches!(
        atom_name.trim().chars().find(|c| !c.is_ascii_digit()),
        Some('H') | Some('D')
    )
}

impl StructureSource for Structure {
    fn name(&self) -> &str {
        &self.name
    }

    fn n_atoms(&self) -> usize {
        self.atoms.len()
    }

    fn atom_name(&self, atom: usize) -> Result<&str, SasaError> {
        Ok(&self.atom(atom)?.name)
    }

    fn atom_radius(&self, atom: usize) -> Result<f64, SasaError> {
        Ok(self.atom(atom)?.radius)
    }

    fn atom_class(&self, atom: usize) -> Result<AtomClass, SasaError> {
        Ok(self.atom(atom)?.class)
    }

    fn residue_name(&self, residue: usize) -> Result<&str, SasaError> {
        Ok(&self.residue(residue)?.name)
    }

    fn residue_number(&self, residue: usize) -> Result<&str, SasaError> {
        Ok(&self.residue(residue)?.number)
    }

    fn residue_atom_range(
        &self,
        residue: usize,
    ) -> Result<(usize, usize), SasaError> {
        let residue = self.residue(residue)?;
        Ok((residue.first_atom, residue.last_atom))
    }

    fn residue_reference_area(&self, residue: usize) -> Option<&NodeArea> {
        self.residues.get(residue)?.reference.as_ref()
    }

    fn chain_labels(&self) -> &str {
        &self.chain_labels
    }

    fn chain_atom_range(
        &self,
        label: char,
    ) -> Result<(usize, usize), SasaError> {
        let chain = self.chain(label)?;
        Ok((chain.first_atom, chain.last_atom))
    }

    fn chain_residue_range(
        &self,
        label: char,
    ) -> Result<(usize, usize), SasaError> {
        let chain = self.chain(label)?;
        Ok((chain.first_residue, chain.last_residue))
    }

    fn n_chains(&self) -> usize {
        self.chains.len()
    }

    fn classifier_name(&self) -> &str {
        self.classifier.name()
    }
}

// --------------------- //
// Trait Implementations //
// --------------------- //

impl fmt::Debug for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Structure")
            .field("name", &self.name)
            .field("classifier", &self.classifier.name())
            .field("n_atoms", &self.atoms.len())
            .field("n_residues", &self.residues.len())
            .field("chain_labels", &self.chain_labels)
            .finish()
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(pdb_name: {})", self.name)
    }
}

// ----- //
// Tests //
// ----- //
