use crate::foundation::core::{NodeId, Point};
use crate::foundation::error::{PlaybackError, PlaybackResult};

/// One tree node. Children are owned through the arena; `parent` is a back-reference only.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub value: f64,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    pub parent: Option<NodeId>,
    pub position: Point,
    /// `1 + max(left, right)`, with `-1` for a missing child.
    pub height: i32,
}

/// Arena-backed binary search tree.
///
/// A node's id is its slot in the arena, and the id counter is the arena length, so `clone` is a
/// plain O(n) copy that keeps ids, heights, positions and parent links and shares nothing with
/// the source.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.and_then(|id| self.node(id))
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Id the next created node receives.
    pub fn next_id(&self) -> NodeId {
        NodeId(self.nodes.len() as u32)
    }

    /// Nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Node holding `value`, if any.
    pub fn find(&self, value: f64) -> Option<&Node> {
        let mut at = self.root;
        while let Some(id) = at {
            let node = &self.nodes[id.index()];
            if value > node.value {
                at = node.right;
            } else if value < node.value {
                at = node.left;
            } else {
                return Some(node);
            }
        }
        None
    }

    pub fn height_of(&self, id: Option<NodeId>) -> i32 {
        id.map_or(-1, |id| self.nodes[id.index()].height)
    }

    /// Values in sorted (in-order) order.
    pub fn in_order(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = Vec::new();
        let mut at = self.root;
        while at.is_some() || !stack.is_empty() {
            while let Some(id) = at {
                stack.push(id);
                at = self.nodes[id.index()].left;
            }
            if let Some(id) = stack.pop() {
                out.push(self.nodes[id.index()].value);
                at = self.nodes[id.index()].right;
            }
        }
        out
    }

    /// Every reachable node has children heights within one of each other, and its stored height
    /// matches its children.
    pub fn is_balanced(&self) -> bool {
        self.reachable().iter().all(|&id| {
            let node = &self.nodes[id.index()];
            let lh = self.height_of(node.left);
            let rh = self.height_of(node.right);
            (lh - rh).abs() <= 1 && node.height == lh.max(rh) + 1
        })
    }

    /// Whether any node's two children are rendered closer than `min_spacing` apart horizontally.
    pub fn detect_crowding(&self, min_spacing: f64) -> bool {
        self.reachable().iter().any(|&id| {
            let node = &self.nodes[id.index()];
            match (node.left, node.right) {
                (Some(l), Some(r)) => {
                    self.nodes[r.index()].position.x - self.nodes[l.index()].position.x
                        < min_spacing
                }
                _ => false,
            }
        })
    }

    /// Ids reachable from the root, in pre-order.
    pub(crate) fn reachable(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            let node = &self.nodes[id.index()];
            stack.extend(node.right);
            stack.extend(node.left);
        }
        out
    }

    pub(crate) fn require(&self, id: NodeId) -> PlaybackResult<&Node> {
        self.node(id)
            .ok_or_else(|| PlaybackError::malformed(format!("unknown node id {id}")))
    }

    pub(crate) fn at(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub(crate) fn set_root(&mut self, root: Option<NodeId>) {
        self.root = root;
    }

    pub(crate) fn alloc(&mut self, value: f64, position: Point, parent: Option<NodeId>) -> NodeId {
        let id = self.next_id();
        self.nodes.push(Node {
            id,
            value,
            left: None,
            right: None,
            parent,
            position,
            height: 0,
        });
        id
    }

    pub(crate) fn recompute_height(&mut self, id: NodeId) {
        let node = &self.nodes[id.index()];
        let height = self.height_of(node.left).max(self.height_of(node.right)) + 1;
        self.nodes[id.index()].height = height;
    }

    /// Recompute heights from `id` up to the root.
    pub(crate) fn recompute_heights_upward(&mut self, id: NodeId) {
        let mut at = Some(id);
        while let Some(id) = at {
            self.recompute_height(id);
            at = self.nodes[id.index()].parent;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tree/avl.rs"]
mod tests;
