use std::ops::Index;

use serde::ser::{SerializeMap, SerializeSeq};

use crate::{error::SasaError, structure::StructureSource, uids::NodeUid};

use super::{
    builder,
    node::{Node, NodeArea, NodeId, NodeType},
    SasaResult,
};

/// A forest of result trees.
///
/// The forest is rooted in a synthetic root node (type [`NodeType::Root`],
/// empty name) whose children are the result nodes of the calculations added
/// to it. Nodes live in an arena owned by the forest and are addressed by
/// [`NodeId`]; a node's children are kept in generation order and their ids
/// ascend.
#[derive(Debug, Clone)]
pub struct SasaTree {
    nodes: Vec<Node>,
}

impl Default for SasaTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SasaTree {
    /// Creates an empty forest holding only the root.
    pub fn new() -> Self {
        SasaTree {
            nodes: vec![Node::root()],
        }
    }

    /// Build a [`SasaTree`] holding a single result.
    pub fn from_result<S: StructureSource + ?Sized>(
        result: &SasaResult,
        structure: &S,
        name: &str,
    ) -> Result<Self, SasaError> {
        let mut tree = Self::new();
        tree.add_result(result, structure, name)?;
        Ok(tree)
    }

    /// Builds the tree of `result` for `structure` and appends it as the
    /// last child of the root.
    ///
    /// On failure the forest is left exactly as it was.
    pub fn add_result<S: StructureSource + ?Sized>(
        &mut self,
        result: &SasaResult,
        structure: &S,
        name: &str,
    ) -> Result<NodeId, SasaError> {
        if name.trim().is_empty() {
            return Err(SasaError::InvalidOperation(format!(
                "result for {} needs a non-empty name",
                structure.name()
            )));
        }
        if result.n_atoms() != structure.n_atoms() {
            return Err(SasaError::Lookup(format!(
                "result has {} values but structure {} has {} atoms",
                result.n_atoms(),
                structure.name(),
                structure.n_atoms()
            )));
        }

        let root = self.root();
        self.nodes[root.0].children.try_reserve(1)?;
        let mark = self.nodes.len();

        match builder::generate_result(self, structure, result, name) {
            Ok(run) => {
                self.nodes[run.0].parent = Some(root);
                self.nodes[root.0].children.push(run);
                debug!(
                    "Added result {} for {} ({} nodes)",
                    name,
                    structure.name(),
                    self.nodes.len() - mark
                );
                Ok(run)
            }
            Err(e) => {
                self.truncate(mark);
                warn!(
                    "Failed to build result tree {} for {}: {}",
                    name,
                    structure.name(),
                    e
                );
                Err(e)
            }
        }
    }

    /// Moves every result of `other` to the end of this forest's results.
    ///
    /// `other` is consumed. Node payloads and areas are untouched; only
    /// the ids of the moved nodes change. If space for the moved nodes
    /// can't be reserved, nothing is moved and `other` is dropped.
    pub fn join(&mut self, other: SasaTree) -> Result<(), SasaError> {
        let root = self.root();
        let offset = self.nodes.len() - 1;
        let remap = |id: NodeId| NodeId(id.0 + offset);

        let mut nodes = other.nodes.into_iter();
        let other_root = match nodes.next() {
            Some(node) => node,
            None => return Ok(()),
        };

        self.nodes.try_reserve(nodes.len())?;
        self.nodes[root.0]
            .children
            .try_reserve(other_root.children.len())?;

        for mut node in nodes {
            node.parent = match node.parent {
                Some(NodeId(0)) | None => Some(root),
                Some(parent) => Some(remap(parent)),
            };
            for child in node.children.iter_mut() {
                *child = remap(*child);
            }
            self.nodes.push(node);
        }

        let joined = other_root.children.len();
        self.nodes[root.0]
            .children
            .extend(other_root.children.into_iter().map(remap));

        debug!(
            "Joined {} result(s), forest now holds {} result(s)",
            joined,
            self.nodes[root.0].children.len()
        );

        Ok(())
    }

    /// Frees the subtree below `node`, which must be the root of the forest.
    ///
    /// Freeing any other node is refused with
    /// [`SasaError::InvalidOperation`] and leaves the forest unchanged.
    /// Afterwards the forest is empty, as if created by [`SasaTree::new`].
    pub fn free(&mut self, node: NodeId) -> Result<(), SasaError> {
        let target = self.get(node).ok_or_else(|| {
            SasaError::InvalidOperation(format!("unknown node {}", node))
        })?;

        if target.parent().is_some() {
            return Err(SasaError::InvalidOperation(format!(
                "can't free {} node {} ({}) that isn't the root of its tree",
                target.nodetype(),
                node,
                target.name()
            )));
        }

        let released = self.nodes.len() - 1;
        self.truncate(1);
        self.nodes[0].children = Vec::new();
        debug!("Freed {} node(s)", released);

        Ok(())
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the forest holds no results.
    pub fn is_empty(&self) -> bool {
        self.nodes[0].children.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_type(&self, id: NodeId) -> Option<NodeType> {
        self.get(id).map(Node::nodetype)
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(Node::name)
    }

    pub fn area(&self, id: NodeId) -> Option<&NodeArea> {
        self.get(id)?.area()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent()
    }

    pub fn children(&self, id: NodeId) -> Option<&[NodeId]> {
        self.get(id).map(Node::children)
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.children().first().copied()
    }

    /// The sibling following `id` under the same parent.
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.get(self.parent(id)?)?.children();
        let position = siblings.binary_search(&id).ok()?;
        siblings.get(position + 1).copied()
    }

    /// Area of a residue relative to its reference area.
    ///
    /// `Ok(None)` if the residue has no reference.
    pub fn relative_area(
        &self,
        id: NodeId,
    ) -> Result<Option<NodeArea>, SasaError> {
        let node = self.get(id).ok_or_else(|| {
            SasaError::InvalidOperation(format!("unknown node {}", id))
        })?;

        let reference = match node.residue_reference()? {
            Some(reference) => reference,
            None => return Ok(None),
        };

        Ok(node.area().map(|area| area.relative_to(reference)))
    }

    /// Unique id of a chain, residue or atom node.
    pub fn uid(&self, id: NodeId) -> Option<NodeUid> {
        NodeUid::from_node(self, id)
    }

    /// Pre-order traversal of the whole forest, root first.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder {
            tree: self,
            stack: vec![self.root()],
        }
    }

    /// Post-order traversal of the subtree below `id`: every node comes
    /// after all of its descendants.
    pub fn post_order(&self, id: NodeId) -> PostOrder<'_> {
        let stack = match self.get(id) {
            Some(_) => vec![(id, false)],
            None => Vec::new(),
        };
        PostOrder { tree: self, stack }
    }

    /// Returns the ids of all nodes of the given type, in pre-order.
    pub fn get_nodes(&self, nodetype: NodeType) -> Vec<NodeId> {
        self.iter()
            .filter(|id| self[*id].nodetype() == nodetype)
            .collect()
    }

    /// Serialize the forest to JSON.
    pub fn to_json_string(&self, pretty: bool) -> Result<String, SasaError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Only the root may have an empty name.
    pub(crate) fn push_node(&mut self, node: Node) -> Result<NodeId, SasaError> {
        if node.name().trim().is_empty() {
            return Err(SasaError::InvalidOperation(format!(
                "{} node needs a non-empty name",
                node.nodetype()
            )));
        }
        self.nodes.try_reserve(1)?;
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        Ok(id)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Drops every node with an id of `len` or above. Callers must make sure
    /// no remaining node links to a dropped one.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len);
    }
}

impl Index<NodeId> for SasaTree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

impl<'a> IntoIterator for &'a SasaTree {
    type Item = NodeId;
    type IntoIter = PreOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct PreOrder<'a> {
    tree: &'a SasaTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree[id].children().iter().rev().copied());
        Some(id)
    }
}

pub struct PostOrder<'a> {
    tree: &'a SasaTree,
    stack: Vec<(NodeId, bool)>,
}

impl<'a> Iterator for PostOrder<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        while let Some((id, expanded)) = self.stack.pop() {
            if expanded {
                return Some(id);
            }
            self.stack.push((id, true));
            self.stack.extend(
                self.tree[id]
                    .children()
                    .iter()
                    .rev()
                    .map(|child| (*child, false)),
            );
        }
        None
    }
}

/// Serializable view of one node and its subtree.
struct NodeView<'a> {
    tree: &'a SasaTree,
    id: NodeId,
}

impl serde::Serialize for NodeView<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let node = &self.tree[self.id];
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("name", node.name())?;
        map.serialize_entry("type", &node.nodetype())?;
        if let Some(area) = node.area() {
            map.serialize_entry("area", area)?;
        }
        if node.nodetype() != NodeType::Root {
            map.serialize_entry("properties", node.properties())?;
        }
        if !node.children().is_empty() {
            map.serialize_entry(
                "children",
                &ChildrenView {
                    tree: self.tree,
                    children: node.children(),
                },
            )?;
        }
        map.end()
    }
}

struct ChildrenView<'a> {
    tree: &'a SasaTree,
    children: &'a [NodeId],
}

impl serde::Serialize for ChildrenView<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.children.len()))?;
        for id in self.children {
            seq.serialize_element(&NodeView {
                tree: self.tree,
                id: *id,
            })?;
        }
        seq.end()
    }
}

impl serde::Serialize for SasaTree {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        NodeView {
            tree: self,
            id: self.root(),
        }
        .serialize(serializer)
    }
}
