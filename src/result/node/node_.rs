//! Node types, areas and the node record itself.
//!
//! A [`Node`] is a tagged union over the six levels of a result tree. The tag
//! is never stored separately from the payload: [`Node::nodetype`] is derived
//! from the [`NodeProperties`] variant, so the two cannot disagree.

use std::{
    fmt,
    ops::{Add, AddAssign, Sub},
    str::FromStr,
};

use crate::{classifier::AtomClass, error::SasaError, parameters::Parameters};

use super::properties::{
    AtomProperties, ChainProperties, ResidueProperties, ResultProperties,
    StructureProperties,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Root,
    Result,
    Structure,
    Chain,
    Residue,
    Atom,
}

impl FromStr for NodeType {
    type Err = String;

    fn from_str(level: &str) -> Result<Self, Self::Err> {
        match level.to_lowercase().as_str() {
            "root" => Ok(NodeType::Root),
            "result" => Ok(NodeType::Result),
            "structure" => Ok(NodeType::Structure),
            "chain" => Ok(NodeType::Chain),
            "residue" => Ok(NodeType::Residue),
            "atom" => Ok(NodeType::Atom),
            _ => Err(format!("Invalid node type: {}", level)),
        }
    }
}

impl NodeType {
    pub fn to_str(&self) -> &'static str {
        match self {
            NodeType::Root => "root",
            NodeType::Result => "result",
            NodeType::Structure => "structure",
            NodeType::Chain => "chain",
            NodeType::Residue => "residue",
            NodeType::Atom => "atom",
        }
    }

    /// Whether nodes of this type get their area by summing their children.
    pub fn is_aggregated(&self) -> bool {
        matches!(
            self,
            NodeType::Structure | NodeType::Chain | NodeType::Residue
        )
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

/// Index of a node inside the forest that owns it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Struct for storing SASA area values for a node.
///
/// For areas produced by the tree builder `total == main_chain + side_chain`
/// and `total == polar + apolar + unknown` hold up to rounding.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct NodeArea {
    #[serde(skip)]
    name: String,
    total: f64,
    main_chain: f64,
    side_chain: f64,
    polar: f64,
    apolar: f64,
    unknown: f64,
}

impl Sub for &NodeArea {
    type Output = NodeArea;

    fn sub(self, rhs: Self) -> Self::Output {
        NodeArea {
            name: self.name.clone(),
            total: self.total - rhs.total,
            main_chain: self.main_chain - rhs.main_chain,
            side_chain: self.side_chain - rhs.side_chain,
            polar: self.polar - rhs.polar,
            apolar: self.apolar - rhs.apolar,
            unknown: self.unknown - rhs.unknown,
        }
    }
}

impl Sub for NodeArea {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        &self - &rhs
    }
}

impl AddAssign<&NodeArea> for NodeArea {
    fn add_assign(&mut self, rhs: &NodeArea) {
        self.total += rhs.total;
        self.main_chain += rhs.main_chain;
        self.side_chain += rhs.side_chain;
        self.polar += rhs.polar;
        self.apolar += rhs.apolar;
        self.unknown += rhs.unknown;
    }
}

impl Add for &NodeArea {
    type Output = NodeArea;

    fn add(self, rhs: Self) -> Self::Output {
        let mut sum = self.clone();
        sum += rhs;
        sum
    }
}

impl Add for NodeArea {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += &rhs;
        self
    }
}

impl NodeArea {
    /// An all-zero area labelled with `name`.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            ..Self::default()
        }
    }

    /// Area from its main/side-chain and polar/apolar components. The total
    /// is `main_chain + side_chain`, whatever is not polar or apolar is
    /// counted as unknown.
    pub fn new(
        name: &str,
        main_chain: f64,
        side_chain: f64,
        polar: f64,
        apolar: f64,
    ) -> Self {
        let total = main_chain + side_chain;
        Self {
            name: name.to_owned(),
            total,
            main_chain,
            side_chain,
            polar,
            apolar,
            unknown: total - polar - apolar,
        }
    }

    /// Direct area of a single atom: the whole value goes to exactly one of
    /// main/side chain and exactly one of polar/apolar/unknown.
    pub fn from_atom(
        name: &str,
        value: f64,
        is_backbone: bool,
        class: AtomClass,
    ) -> Self {
        let mut area = Self::named(name);
        area.total = value;
        if is_backbone {
            area.main_chain = value;
        } else {
            area.side_chain = value;
        }
        match class {
            AtomClass::Polar => area.polar = value,
            AtomClass::Apolar => area.apolar = value,
            AtomClass::Unknown => area.unknown = value,
        }
        area
    }

    /// Component-wise ratio against a reference area. Components whose
    /// reference is zero are `NaN`.
    pub fn relative_to(&self, reference: &NodeArea) -> NodeArea {
        fn ratio(value: f64, reference: f64) -> f64 {
            if reference == 0.0 {
                f64::NAN
            } else {
                value / reference
            }
        }

        NodeArea {
            name: self.name.clone(),
            total: ratio(self.total, reference.total),
            main_chain: ratio(self.main_chain, reference.main_chain),
            side_chain: ratio(self.side_chain, reference.side_chain),
            polar: ratio(self.polar, reference.polar),
            apolar: ratio(self.apolar, reference.apolar),
            unknown: ratio(self.unknown, reference.unknown),
        }
    }

    /// Name of the node this area belongs to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the total SASA area for the node.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Returns the main chain SASA area for the node.
    pub fn main_chain(&self) -> f64 {
        self.main_chain
    }

    /// Returns the side chain SASA area for the node.
    pub fn side_chain(&self) -> f64 {
        self.side_chain
    }

    /// Returns the polar SASA area for the node.
    pub fn polar(&self) -> f64 {
        self.polar
    }

    /// Returns the apolar SASA area for the node.
    pub fn apolar(&self) -> f64 {
        self.apolar
    }

    /// Returns the unknown SASA area for the node.
    pub fn unknown(&self) -> f64 {
        self.unknown
    }
}

/// Enum for storing different types of node properties.
#[derive(Debug, serde::Serialize, Clone)]
#[serde(untagged)]
pub enum NodeProperties {
    Root,
    Result(ResultProperties),
    Structure(StructureProperties),
    Chain(ChainProperties),
    Residue(ResidueProperties),
    Atom(AtomProperties),
}

impl NodeProperties {
    pub fn nodetype(&self) -> NodeType {
        match self {
            NodeProperties::Root => NodeType::Root,
            NodeProperties::Result(_) => NodeType::Result,
            NodeProperties::Structure(_) => NodeType::Structure,
            NodeProperties::Chain(_) => NodeType::Chain,
            NodeProperties::Residue(_) => NodeType::Residue,
            NodeProperties::Atom(_) => NodeType::Atom,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    properties: NodeProperties,
    area: Option<NodeArea>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(
        name: &str,
        properties: NodeProperties,
        area: Option<NodeArea>,
    ) -> Self {
        Self {
            name: name.to_owned(),
            properties,
            area,
            parent: None,
            children: Vec::new(),
        }
    }

    pub(crate) fn root() -> Self {
        Self::new("", NodeProperties::Root, None)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nodetype(&self) -> NodeType {
        self.properties.nodetype()
    }

    pub fn properties(&self) -> &NodeProperties {
        &self.properties
    }

    /// Area of the node; `None` for root and result nodes.
    pub fn area(&self) -> Option<&NodeArea> {
        self.area.as_ref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in generation order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Set the aggregated area. Areas are written exactly once.
    pub(crate) fn set_area(&mut self, area: NodeArea) {
        debug_assert!(self.area.is_none(), "area of {} set twice", self.name);
        self.area = Some(area);
    }

    fn wrong_type(&self, expected: NodeType) -> SasaError {
        SasaError::ContractViolation {
            expected,
            found: self.nodetype(),
        }
    }

    pub fn as_result(&self) -> Result<&ResultProperties, SasaError> {
        match &self.properties {
            NodeProperties::Result(p) => Ok(p),
            _ => Err(self.wrong_type(NodeType::Result)),
        }
    }

    pub fn as_structure(&self) -> Result<&StructureProperties, SasaError> {
        match &self.properties {
            NodeProperties::Structure(p) => Ok(p),
            _ => Err(self.wrong_type(NodeType::Structure)),
        }
    }

    pub fn as_chain(&self) -> Result<&ChainProperties, SasaError> {
        match &self.properties {
            NodeProperties::Chain(p) => Ok(p),
            _ => Err(self.wrong_type(NodeType::Chain)),
        }
    }

    pub fn as_residue(&self) -> Result<&ResidueProperties, SasaError> {
        match &self.properties {
            NodeProperties::Residue(p) => Ok(p),
            _ => Err(self.wrong_type(NodeType::Residue)),
        }
    }

    pub fn as_atom(&self) -> Result<&AtomProperties, SasaError> {
        match &self.properties {
            NodeProperties::Atom(p) => Ok(p),
            _ => Err(self.wrong_type(NodeType::Atom)),
        }
    }

    pub fn result_classified_by(&self) -> Result<&str, SasaError> {
        Ok(&self.as_result()?.classified_by)
    }

    pub fn result_parameters(&self) -> Result<&Parameters, SasaError> {
        Ok(&self.as_result()?.parameters)
    }

    pub fn result_n_structures(&self) -> Result<usize, SasaError> {
        Ok(self.as_result()?.n_structures)
    }

    pub fn structure_n_chains(&self) -> Result<usize, SasaError> {
        Ok(self.as_structure()?.n_chains)
    }

    pub fn structure_chain_labels(&self) -> Result<&str, SasaError> {
        Ok(&self.as_structure()?.chain_labels)
    }

    pub fn chain_n_residues(&self) -> Result<usize, SasaError> {
        Ok(self.as_chain()?.n_residues)
    }

    pub fn residue_n_atoms(&self) -> Result<usize, SasaError> {
        Ok(self.as_residue()?.n_atoms)
    }

    pub fn residue_number(&self) -> Result<&str, SasaError> {
        Ok(&self.as_residue()?.number)
    }

    /// Reference area of a residue; `Ok(None)` means no reference is known.
    pub fn residue_reference(
        &self,
    ) -> Result<Option<&NodeArea>, SasaError> {
        Ok(self.as_residue()?.reference.as_ref())
    }

    pub fn atom_is_polar(&self) -> Result<bool, SasaError> {
        Ok(self.as_atom()?.is_polar)
    }

    pub fn atom_is_mainchain(&self) -> Result<bool, SasaError> {
        Ok(self.as_atom()?.is_bb)
    }

    pub fn atom_radius(&self) -> Result<f64, SasaError> {
        Ok(self.as_atom()?.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom_node() -> Node {
        Node::new(
            "N",
            NodeProperties::Atom(AtomProperties {
                is_polar: true,
                is_bb: true,
                radius: 1.55,
            }),
            Some(NodeArea::from_atom("N", 3.5, true, AtomClass::Polar)),
        )
    }

    #[test]
    fn nodetype_roundtrip_names() {
        for t in [
            NodeType::Root,
            NodeType::Result,
            NodeType::Structure,
            NodeType::Chain,
            NodeType::Residue,
            NodeType::Atom,
        ] {
            assert_eq!(t.to_str().parse::<NodeType>().unwrap(), t);
        }
        assert_eq!("ATOM".parse::<NodeType>().unwrap(), NodeType::Atom);
        assert!("model".parse::<NodeType>().is_err());
    }

    #[test]
    fn atom_area_splits() {
        let a = NodeArea::from_atom("CB", 2.0, false, AtomClass::Apolar);
        assert_eq!(a.total(), 2.0);
        assert_eq!(a.main_chain(), 0.0);
        assert_eq!(a.side_chain(), 2.0);
        assert_eq!(a.polar(), 0.0);
        assert_eq!(a.apolar(), 2.0);
        assert_eq!(a.unknown(), 0.0);

        let u = NodeArea::from_atom("X", 1.5, true, AtomClass::Unknown);
        assert_eq!(u.main_chain(), 1.5);
        assert_eq!(u.unknown(), 1.5);
    }

    #[test]
    fn area_arithmetic() {
        let a = NodeArea::from_atom("N", 3.0, true, AtomClass::Polar);
        let b = NodeArea::from_atom("CB", 2.0, false, AtomClass::Apolar);
        let sum = &a + &b;
        assert_eq!(sum.name(), "N");
        assert_eq!(sum.total(), 5.0);
        assert_eq!(sum.main_chain() + sum.side_chain(), 5.0);
        assert_eq!(sum.polar() + sum.apolar() + sum.unknown(), 5.0);

        let diff = sum - b;
        assert_eq!(diff.total(), 3.0);
        assert_eq!(diff.apolar(), 0.0);
    }

    #[test]
    fn relative_area() {
        let abs = NodeArea::new("ALA", 10.0, 20.0, 15.0, 15.0);
        let reference = NodeArea::new("ALA", 20.0, 40.0, 30.0, 30.0);
        let rel = abs.relative_to(&reference);
        assert!((rel.total() - 0.5).abs() < 1e-12);
        assert!((rel.side_chain() - 0.5).abs() < 1e-12);
        assert!(rel.unknown().is_nan());
    }

    #[test]
    fn type_gated_accessors() {
        let atom = atom_node();
        assert_eq!(atom.nodetype(), NodeType::Atom);
        assert!(atom.atom_is_polar().unwrap());
        assert!(atom.atom_is_mainchain().unwrap());
        assert_eq!(atom.atom_radius().unwrap(), 1.55);

        match atom.residue_n_atoms() {
            Err(SasaError::ContractViolation { expected, found }) => {
                assert_eq!(expected, NodeType::Residue);
                assert_eq!(found, NodeType::Atom);
            }
            other => panic!("expected contract violation, got {:?}", other),
        }
        assert!(atom.chain_n_residues().is_err());
        assert!(atom.structure_chain_labels().is_err());
        assert!(atom.result_classified_by().is_err());
    }

    #[test]
    fn root_has_no_area() {
        let root = Node::root();
        assert_eq!(root.nodetype(), NodeType::Root);
        assert!(root.area().is_none());
        assert!(root.parent().is_none());
        assert!(root.atom_radius().is_err());
    }
}
