//! Trie storage for registered routes.
//!
//! # Responsibilities
//! - Own every node of the route trie
//! - Create children lazily (get-or-create per segment)
//! - Rebuild the canonical pattern of a node for diagnostics
//!
//! # Design Decisions
//! - Arena of nodes addressed by `NodeId`, root at index 0
//! - Parent links are indices, never references (no ownership cycles)
//! - Nodes are never removed

use std::collections::HashMap;

/// Index of a node inside a [`Trie`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The root node, present in every trie.
    pub const ROOT: NodeId = NodeId(0);
}

/// What kind of edge leads into a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    /// Reached by exact text equality.
    Static(String),
    /// Named parameter capturing one segment.
    Param(String),
    /// Terminal `*` capturing the remainder of the path.
    Trailer,
}

/// A single trie vertex.
#[derive(Debug, Clone)]
pub struct Node<T> {
    kind: NodeKind,
    handler: Option<T>,
    static_paths: HashMap<String, NodeId>,
    variable_path: Option<NodeId>,
    parent: Option<NodeId>,
}

impl<T> Node<T> {
    fn new(parent: Option<NodeId>, kind: NodeKind) -> Self {
        Self {
            kind,
            handler: None,
            static_paths: HashMap::new(),
            variable_path: None,
            parent,
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Literal text or parameter name. `None` for the root and the wildcard.
    pub fn segment(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Static(s) | NodeKind::Param(s) => Some(s.as_str()),
            NodeKind::Root | NodeKind::Trailer => None,
        }
    }

    pub fn is_trailer(&self) -> bool {
        self.kind == NodeKind::Trailer
    }

    pub fn handler(&self) -> Option<&T> {
        self.handler.as_ref()
    }

    pub fn static_child(&self, segment: &str) -> Option<NodeId> {
        self.static_paths.get(segment).copied()
    }

    pub fn variable_child(&self) -> Option<NodeId> {
        self.variable_path
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// Arena-backed route trie.
#[derive(Debug, Clone)]
pub struct Trie<T> {
    nodes: Vec<Node<T>>,
}

impl<T> Trie<T> {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(None, NodeKind::Root)],
        }
    }

    pub fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.0]
    }

    /// Number of allocated nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Variable child of `id` when it is a wildcard.
    pub fn trailer_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)
            .variable_path
            .filter(|&child| self.node(child).is_trailer())
    }

    /// Returns the static child for `segment`, creating it if absent.
    pub fn static_child_or_insert(&mut self, parent: NodeId, segment: &str) -> NodeId {
        if let Some(child) = self.node(parent).static_child(segment) {
            return child;
        }
        let child = self.alloc(parent, NodeKind::Static(segment.to_string()));
        self.nodes[parent.0]
            .static_paths
            .insert(segment.to_string(), child);
        child
    }

    /// Returns the variable child of `parent`, creating it with `kind` if
    /// the slot is empty. An occupied slot is returned as-is; callers
    /// compare its kind to detect conflicts.
    pub fn variable_child_or_insert(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        if let Some(child) = self.node(parent).variable_path {
            return child;
        }
        let child = self.alloc(parent, kind);
        self.nodes[parent.0].variable_path = Some(child);
        child
    }

    /// Attaches `handler` to `id`, handing it back if one is already set.
    pub fn set_handler(&mut self, id: NodeId, handler: T) -> Result<(), T> {
        let slot = &mut self.nodes[id.0].handler;
        if slot.is_some() {
            return Err(handler);
        }
        *slot = Some(handler);
        Ok(())
    }

    /// Canonical pattern leading to `id`, e.g. `/users/:id/*`. A literal
    /// `*` inside a static segment is written as `\*` so it never reads as
    /// the wildcard.
    pub fn pattern_of(&self, id: NodeId) -> String {
        let mut labels = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id);
            match node.kind() {
                NodeKind::Root => {}
                NodeKind::Static(s) => labels.push(s.replace('*', "\\*")),
                NodeKind::Param(name) => labels.push(format!(":{}", name)),
                NodeKind::Trailer => labels.push("*".to_string()),
            }
            current = node.parent();
        }
        labels.reverse();
        format!("/{}", labels.join("/"))
    }

    /// All nodes carrying a handler, in allocation order.
    pub fn handlers(&self) -> impl Iterator<Item = (NodeId, &T)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, node)| node.handler().map(|h| (NodeId(i), h)))
    }

    fn alloc(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(Some(parent), kind));
        id
    }
}

impl<T> Default for Trie<T> {
    fn default() -> Self {
        Self::new()
    }
}
