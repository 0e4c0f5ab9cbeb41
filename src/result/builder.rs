//! Level generators, subtree builder and aggregation.
//!
//! Each generator produces exactly one node for one index and, for
//! non-leaf levels, asks [`build_children`] to fill in the level below. The
//! calls nest top-down, but areas flow bottom-up: a node is aggregated right
//! after its last child exists.
//!
//! Nodes are pushed into the arena in generation order, so everything a
//! failed generator produced sits at the end of the arena. Rolling back is a
//! truncation to the length recorded before the attempt.

use crate::{
    classifier::AtomClass, error::SasaError, result::SasaResult,
    structure::StructureSource,
};

use super::{
    node::{
        AtomProperties, ChainProperties, Node, NodeArea, NodeId,
        NodeProperties, ResidueProperties, ResultProperties,
        StructureProperties,
    },
    tree::SasaTree,
};

/// Number of indices in the inclusive range `[first, last]`.
fn range_len(first: usize, last: usize) -> Result<usize, SasaError> {
    if last < first {
        return Err(SasaError::EmptyRange { first, last });
    }
    Ok(last - first + 1)
}

/// Direct area of one atom.
pub fn atom_nodearea<S: StructureSource + ?Sized>(
    structure: &S,
    result: &SasaResult,
    atom: usize,
) -> Result<NodeArea, SasaError> {
    let name = structure.atom_name(atom)?;
    let value = result.get(atom).ok_or_else(|| {
        SasaError::Lookup(format!(
            "no SASA value for atom {} ({} values)",
            atom,
            result.n_atoms()
        ))
    })?;

    Ok(NodeArea::from_atom(
        name,
        value,
        structure.atom_is_backbone(name),
        structure.atom_class(atom)?,
    ))
}

/// Sum of the direct areas of the atoms `first..=last`, without building a
/// tree.
pub fn range_nodearea<S: StructureSource + ?Sized>(
    name: &str,
    structure: &S,
    result: &SasaResult,
    first: usize,
    last: usize,
) -> Result<NodeArea, SasaError> {
    range_len(first, last)?;

    let mut area = NodeArea::named(name);
    for atom in first..=last {
        area += &atom_nodearea(structure, result, atom)?;
    }
    Ok(area)
}

/// Sums the areas of the direct children of `node` into its own area.
///
/// No-op for root, result and atom nodes: the first two never carry an
/// area and atoms get theirs directly from the result.
pub(crate) fn aggregate(tree: &mut SasaTree, node: NodeId) {
    let parent = &tree[node];
    if !parent.nodetype().is_aggregated() {
        return;
    }

    let mut area = NodeArea::named(parent.name());
    for child in parent.children() {
        if let Some(child_area) = tree[*child].area() {
            area += child_area;
        }
    }

    tree.node_mut(node).set_area(area);
}

/// Generates the children `first..=last` of `parent` in ascending index
/// order, links them under `parent` and aggregates `parent`.
///
/// On failure every node produced for this range is removed again and
/// `parent` is left without children.
pub(crate) fn build_children<S: StructureSource + ?Sized>(
    tree: &mut SasaTree,
    structure: &S,
    result: &SasaResult,
    parent: NodeId,
    first: usize,
    last: usize,
    generator: fn(&mut SasaTree, &S, &SasaResult, usize) -> Result<NodeId, SasaError>,
) -> Result<(), SasaError> {
    let count = range_len(first, last)?;
    let mark = tree.len();

    let generate = |tree: &mut SasaTree| -> Result<Vec<NodeId>, SasaError> {
        let mut children = Vec::new();
        children.try_reserve_exact(count)?;
        for index in first..=last {
            let child = generator(tree, structure, result, index)?;
            tree.node_mut(child).parent = Some(parent);
            children.push(child);
        }
        Ok(children)
    };

    match generate(&mut *tree) {
        Ok(children) => {
            tree.node_mut(parent).children = children;
            aggregate(tree, parent);
            Ok(())
        }
        Err(e) => {
            trace!(
                "Discarding {} node(s) generated under {}: {}",
                tree.len() - mark,
                tree[parent].name(),
                e
            );
            tree.truncate(mark);
            Err(e)
        }
    }
}

fn generate_atom<S: StructureSource + ?Sized>(
    tree: &mut SasaTree,
    structure: &S,
    result: &SasaResult,
    atom: usize,
) -> Result<NodeId, SasaError> {
    let name = structure.atom_name(atom)?;
    let class = structure.atom_class(atom)?;

    let properties = AtomProperties {
        is_polar: class == AtomClass::Polar,
        is_bb: structure.atom_is_backbone(name),
        radius: structure.atom_radius(atom)?,
    };
    let area = atom_nodearea(structure, result, atom)?;

    tree.push_node(Node::new(
        name,
        NodeProperties::Atom(properties),
        Some(area),
    ))
}

fn generate_residue<S: StructureSource + ?Sized>(
    tree: &mut SasaTree,
    structure: &S,
    result: &SasaResult,
    residue: usize,
) -> Result<NodeId, SasaError> {
    let (first, last) = structure.residue_atom_range(residue)?;

    let properties = ResidueProperties {
        n_atoms: range_len(first, last)?,
        number: structure.residue_number(residue)?.to_owned(),
        reference: structure.residue_reference_area(residue).cloned(),
    };

    let node = tree.push_node(Node::new(
        structure.residue_name(residue)?,
        NodeProperties::Residue(properties),
        None,
    ))?;

    build_children(tree, structure, result, node, first, last, generate_atom::<S>)?;

    Ok(node)
}

fn generate_chain<S: StructureSource + ?Sized>(
    tree: &mut SasaTree,
    structure: &S,
    result: &SasaResult,
    chain: usize,
) -> Result<NodeId, SasaError> {
    let label = structure.chain_labels().chars().nth(chain).ok_or_else(|| {
        SasaError::Lookup(format!(
            "chain index {} out of range (labels '{}')",
            chain,
            structure.chain_labels()
        ))
    })?;

    let (first_atom, last_atom) = structure.chain_atom_range(label)?;
    let (first_residue, last_residue) = structure.chain_residue_range(label)?;

    trace!(
        "Chain {}: atoms {}-{}, residues {}-{}",
        label,
        first_atom,
        last_atom,
        first_residue,
        last_residue
    );

    let properties = ChainProperties {
        n_residues: range_len(first_residue, last_residue)?,
    };

    let node = tree.push_node(Node::new(
        &label.to_string(),
        NodeProperties::Chain(properties),
        None,
    ))?;

    build_children(
        tree,
        structure,
        result,
        node,
        first_residue,
        last_residue,
        generate_residue::<S>,
    )?;

    Ok(node)
}

fn generate_structure<S: StructureSource + ?Sized>(
    tree: &mut SasaTree,
    structure: &S,
    result: &SasaResult,
    _index: usize,
) -> Result<NodeId, SasaError> {
    let chain_labels = structure.chain_labels();
    let n_chains = structure.n_chains();

    let last_chain = n_chains.checked_sub(1).ok_or_else(|| {
        SasaError::Structure(format!(
            "structure {} has no chains",
            structure.name()
        ))
    })?;

    let properties = StructureProperties {
        n_chains,
        chain_labels: chain_labels.to_owned(),
    };

    let node = tree.push_node(Node::new(
        chain_labels,
        NodeProperties::Structure(properties),
        None,
    ))?;

    build_children(
        tree,
        structure,
        result,
        node,
        0,
        last_chain,
        generate_chain::<S>,
    )?;

    Ok(node)
}

/// Generates a result (computation run) node holding exactly one structure.
pub(crate) fn generate_result<S: StructureSource + ?Sized>(
    tree: &mut SasaTree,
    structure: &S,
    result: &SasaResult,
    name: &str,
) -> Result<NodeId, SasaError> {
    let properties = ResultProperties {
        classified_by: structure.classifier_name().to_owned(),
        parameters: result.parameters().clone(),
        n_structures: 1,
    };

    let node = tree.push_node(Node::new(
        name,
        NodeProperties::Result(properties),
        None,
    ))?;

    build_children(
        tree,
        structure,
        result,
        node,
        0,
        0,
        generate_structure::<S>,
    )?;

    Ok(node)
}
