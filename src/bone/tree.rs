//! Arena-backed transform hierarchy
//!
//! Stands in for the host scene graph: every node has a name, an optional
//! parent, ordered children and a world-space frame. Nodes are addressed by
//! `NodeId`, and identity comparison on ids replaces engine reference identity.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Handle to a node inside a `BoneTree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// World-space position and orientation of a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Frame {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Frame {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub frame: Frame,
}

/// Read-only access to a transform hierarchy.
pub trait HierarchyWalker {
    fn contains(&self, node: NodeId) -> bool;

    /// `root` and every transitive child, depth-first, children in sibling order.
    fn descendants(&self, root: NodeId) -> Vec<NodeId>;

    fn name(&self, node: NodeId) -> &str;

    fn frame(&self, node: NodeId) -> Frame;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// True when `ancestor` is `node` itself or sits on its parent chain.
    fn is_descendant_of(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }
}

#[derive(Debug, Clone, Default)]
pub struct BoneTree {
    nodes: Vec<Node>,
}

impl BoneTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parentless node
    pub fn add_root(&mut self, name: impl Into<String>, frame: Frame) -> NodeId {
        self.push(name.into(), None, frame)
    }

    /// Add a node as the last child of `parent`.
    ///
    /// Returns `None` if `parent` is not part of this tree.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        frame: Frame,
    ) -> Option<NodeId> {
        if !self.contains(parent) {
            return None;
        }
        let id = self.push(name.into(), Some(parent), frame);
        self.nodes[parent.index()].children.push(id);
        Some(id)
    }

    fn push(&mut self, name: String, parent: Option<NodeId>, frame: Frame) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            name,
            parent,
            children: Vec::new(),
            frame,
        });
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All node ids in insertion order
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(|i| NodeId(i as u32))
    }

    /// First node whose name matches exactly
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.ids().find(|&id| self.nodes[id.index()].name == name)
    }
}

impl HierarchyWalker for BoneTree {
    fn contains(&self, node: NodeId) -> bool {
        node.index() < self.nodes.len()
    }

    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.contains(root) {
            return out;
        }

        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            // Reverse so the first sibling is popped first
            stack.extend(self.nodes[id.index()].children.iter().rev().copied());
        }
        out
    }

    fn name(&self, node: NodeId) -> &str {
        self.node(node).map(|n| n.name.as_str()).unwrap_or("")
    }

    fn frame(&self, node: NodeId) -> Frame {
        self.node(node).map(|n| n.frame).unwrap_or_default()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }
}
