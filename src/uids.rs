use std::fmt::Display;

use crate::result::{
    node::{NodeId, NodeType},
    SasaTree,
};

/// ID for a residue, which is a tuple of the residue number and insertion code.
pub type ResId = (i32, Option<char>);

/// Unique ID for a chain, residue or atom node, e.g. `A:52A:CA`.
///
/// Unique within one structure; ids of nodes from different result trees in
/// the same forest may coincide.
#[derive(Debug, PartialEq, Eq, Hash, Clone, PartialOrd, Ord)]
pub struct NodeUid {
    // NOTE: The ordering of the fields is important, because it determines the
    // precedence of the fields in derive `Ord` and `PartialOrd` implementations.
    //
    /// Chain ID.
    chain: char,

    /// Residue ID - tuple of residue number and insertion code.
    res_id: Option<ResId>,

    /// Atom name - Such as "CA" or "O".
    atom_name: Option<String>,
}

impl NodeUid {
    pub fn new(
        chain: char,
        res_id: Option<ResId>,
        atom_name: Option<String>,
    ) -> Self {
        debug_assert!(
            atom_name.is_none() || res_id.is_some(),
            "Atom name provided without residue ID"
        );

        Self {
            chain,
            res_id,
            atom_name,
        }
    }

    /// Derives the uid of a node from its ancestry. `None` for root, result
    /// and structure nodes, and for residues whose number is not numeric.
    pub(crate) fn from_node(tree: &SasaTree, id: NodeId) -> Option<Self> {
        let node = tree.get(id)?;

        match node.nodetype() {
            NodeType::Root | NodeType::Result | NodeType::Structure => None,
            NodeType::Chain => {
                Some(Self::new(node.name().chars().next()?, None, None))
            }
            NodeType::Residue => {
                let chain = Self::from_node(tree, node.parent()?)?;
                let residue = node.as_residue().ok()?;
                let res_id = (residue.resnum()?, residue.inscode());
                Some(Self::new(chain.chain, Some(res_id), None))
            }
            NodeType::Atom => {
                let residue = Self::from_node(tree, node.parent()?)?;
                Some(Self::new(
                    residue.chain,
                    residue.res_id,
                    Some(node.name().to_owned()),
                ))
            }
        }
    }

    pub fn chain(&self) -> &char {
        &self.chain
    }

    pub fn res_id(&self) -> Option<&ResId> {
        self.res_id.as_ref()
    }

    pub fn atom_name(&self) -> Option<&str> {
        self.atom_name.as_deref()
    }
}

impl Display for NodeUid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.chain)?;

        // Add the residue ID if it exists...
        if let Some((resnum, inscode)) = self.res_id {
            write!(f, ":{}", resnum)?;
            if let Some(code) = inscode {
                write!(f, "{}", code)?;
            }
        }

        // ...and the atom name.
        if let Some(atom_name) = &self.atom_name {
            write!(f, ":{}", atom_name)?;
        }

        Ok(())
    }
}

impl serde::Serialize for NodeUid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        parameters::Parameters, result::SasaResult, structure::Structure,
    };

    fn tree() -> SasaTree {
        let mut structure = Structure::new_empty(Some("uid"));
        structure.add_atom("N", "SER", "52", 'H').unwrap();
        structure.add_atom("CA", "SER", "52A", 'H').unwrap();
        structure.add_atom("N", "ALA", "X", 'H').unwrap();
        let result = SasaResult::new(vec![1.0; 3], Parameters::default());
        SasaTree::from_result(&result, &structure, "uid").unwrap()
    }

    #[test]
    fn uids_from_ancestry() {
        let tree = tree();

        let chain = tree.get_nodes(NodeType::Chain)[0];
        assert_eq!(tree.uid(chain).unwrap().to_string(), "H");

        let residues = tree.get_nodes(NodeType::Residue);
        let uid = tree.uid(residues[1]).unwrap();
        assert_eq!(uid.res_id(), Some(&(52, Some('A'))));
        assert_eq!(uid.to_string(), "H:52A");

        let atoms = tree.get_nodes(NodeType::Atom);
        let uid = tree.uid(atoms[1]).unwrap();
        assert_eq!(uid.atom_name(), Some("CA"));
        assert_eq!(uid.to_string(), "H:52A:CA");
        assert_eq!(serde_json::to_string(&uid).unwrap(), "\"H:52A:CA\"");
    }

    #[test]
    fn no_uid_above_chain_or_for_odd_numbers() {
        let tree = tree();
        assert!(tree.uid(tree.root()).is_none());
        assert!(tree.uid(tree.get_nodes(NodeType::Result)[0]).is_none());
        assert!(tree.uid(tree.get_nodes(NodeType::Structure)[0]).is_none());

        let residues = tree.get_nodes(NodeType::Residue);
        assert!(tree.uid(residues[2]).is_none());
    }

    #[test]
    fn ordering() {
        let a = NodeUid::new('A', Some((10, None)), None);
        let b = NodeUid::new('A', Some((10, Some('A'))), None);
        let c = NodeUid::new('B', Some((1, None)), None);
        assert!(a < b);
        assert!(b < c);
    }
}
