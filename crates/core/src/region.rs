//! Region tree and region handles
//!
//! A `RegionTree` models the containment hierarchy of rendered UI: every node
//! has at most one parent, and a region "contains" every node in its subtree,
//! including itself. Node IDs are never reused, so a handle to a removed node
//! cannot alias a node inserted later.

use crate::error::Error;
use crate::Result;
use ahash::AHashMap;
use smallvec::SmallVec;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Identifier of a node in a `RegionTree`
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct NodeId(u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Root-to-node path, root first
pub type RegionPath = SmallVec<[NodeId; 8]>;

#[derive(Debug, Default)]
struct Node {
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
}

/// Arena of mounted nodes with parent links
#[derive(Debug, Default)]
pub struct RegionTree {
    nodes: AHashMap<NodeId, Node>,
    next_id: u32,
}

impl RegionTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Mount a new parentless node
    pub fn insert_root(&mut self) -> NodeId {
        let id = self.allocate();
        self.nodes.insert(id, Node::default());
        id
    }

    /// Mount a new node under `parent`
    pub fn insert_child(&mut self, parent: NodeId) -> Result<NodeId> {
        if !self.nodes.contains_key(&parent) {
            return Err(Error::UnknownNode(parent));
        }

        let id = self.allocate();
        self.nodes.insert(
            id,
            Node {
                parent: Some(parent),
                children: SmallVec::new(),
            },
        );
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.push(id);
        }
        Ok(id)
    }

    /// Unmount `node` and its whole subtree
    ///
    /// Returns the removed IDs. Removing an unknown node is a no-op.
    pub fn remove(&mut self, node: NodeId) -> Vec<NodeId> {
        let Some(parent) = self.nodes.get(&node).map(|n| n.parent) else {
            return Vec::new();
        };

        if let Some(p) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            p.children.retain(|c| *c != node);
        }

        let mut removed = Vec::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if let Some(n) = self.nodes.remove(&id) {
                stack.extend(n.children);
                removed.push(id);
            }
        }
        removed
    }

    /// Whether `node` is currently mounted
    pub fn is_mounted(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    /// Parent of `node`, if mounted and not a root
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node).and_then(|n| n.parent)
    }

    /// Children of `node` in insertion order
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(&node)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Inclusive containment: true when `node` is `region` or lies beneath it
    ///
    /// Unmounted nodes are contained in nothing.
    pub fn contains(&self, region: NodeId, node: NodeId) -> bool {
        if !self.is_mounted(region) {
            return false;
        }

        let mut current = Some(node).filter(|n| self.is_mounted(*n));
        while let Some(id) = current {
            if id == region {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Root-to-node path, empty when `node` is not mounted
    pub fn path(&self, node: NodeId) -> RegionPath {
        let mut path = RegionPath::new();
        let mut current = Some(node).filter(|n| self.is_mounted(*n));
        while let Some(id) = current {
            path.push(id);
            current = self.parent(id);
        }
        path.reverse();
        path
    }

    /// Number of mounted nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no nodes are mounted
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Shared handle to a widget's rendered region
///
/// Cloning shares the slot. The owning widget sets it on mount and clears it on
/// unmount; observers read whatever is current at the time they look.
#[derive(Clone, Debug, Default)]
pub struct RegionRef {
    slot: Rc<Cell<Option<NodeId>>>,
}

impl RegionRef {
    /// Create an empty handle
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the handle at a mounted node
    pub fn set(&self, node: NodeId) {
        self.slot.set(Some(node));
    }

    /// Clear the handle (region torn down)
    pub fn clear(&self) {
        self.slot.set(None);
    }

    /// Current node, if any
    pub fn get(&self) -> Option<NodeId> {
        self.slot.get()
    }

    /// Whether the handle currently points at a node
    pub fn is_set(&self) -> bool {
        self.slot.get().is_some()
    }
}
