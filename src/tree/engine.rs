use crate::foundation::core::{NodeId, Point};
use crate::trace::instruction::{Instruction, Link, NodeMove, RotateDir};
use crate::trace::log::Command;
use crate::tree::avl::Tree;

/// Layout constants for node placement.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutOpts {
    /// Horizontal gap at the root; halves with every level.
    pub half_width: f64,
    /// Vertical distance between levels.
    pub level_height: f64,
    /// Sibling spacing below which the layout counts as crowded.
    pub min_spacing: f64,
}

impl Default for LayoutOpts {
    fn default() -> Self {
        Self {
            half_width: 300.0,
            level_height: 50.0,
            min_spacing: 30.0,
        }
    }
}

/// Canonical AVL tree that turns inserted values into instruction commands.
///
/// The engine's tree always holds the state after every command generated so far; the playback
/// side reconstructs intermediate states by replaying the commands.
#[derive(Clone, Debug, Default)]
pub struct TreeEngine {
    tree: Tree,
    layout: LayoutOpts,
}

impl TreeEngine {
    pub fn new(layout: LayoutOpts) -> Self {
        Self {
            tree: Tree::new(),
            layout,
        }
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn layout(&self) -> &LayoutOpts {
        &self.layout
    }

    /// Insert `values` in order, one command per value.
    ///
    /// Never fails: a value equal to a stored one yields a single `ValueFound` step and leaves the
    /// tree untouched. Non-numeric input is filtered before it gets here.
    #[tracing::instrument(skip(self))]
    pub fn insert_values(&mut self, values: &[f64]) -> Vec<Command> {
        values
            .iter()
            .map(|&value| {
                let mut steps = Vec::new();
                let mut inserter = Inserter {
                    tree: &mut self.tree,
                    layout: &self.layout,
                    value,
                    steps: &mut steps,
                };
                let root = inserter.tree.root_id();
                let new_root = inserter.descend(
                    root,
                    Point::ORIGIN,
                    self.layout.half_width,
                    None,
                );
                self.tree.set_root(Some(new_root));
                tracing::debug!(value, steps = steps.len(), "generated command");
                Command {
                    name: format!("INSERT {value}"),
                    steps,
                }
            })
            .collect()
    }

    pub fn detect_crowding(&self) -> bool {
        self.tree.detect_crowding(self.layout.min_spacing)
    }
}

/// State for a single insertion: the value being inserted and the steps emitted so far.
struct Inserter<'a> {
    tree: &'a mut Tree,
    layout: &'a LayoutOpts,
    value: f64,
    steps: &'a mut Vec<Instruction>,
}

impl Inserter<'_> {
    /// Insert below `at` and return the root of the (possibly rotated) subtree.
    fn descend(
        &mut self,
        at: Option<NodeId>,
        position: Point,
        gap: f64,
        parent: Option<NodeId>,
    ) -> NodeId {
        let value = self.value;
        let Some(id) = at else {
            let id = self.tree.alloc(value, position, parent);
            self.steps.push(Instruction::CreateNode {
                id,
                attached_to: parent,
                value,
                position,
                explanation: format!("Empty node found, inserting {value}"),
            });
            return id;
        };

        let node = self.tree.at(id).clone();
        let child_gap = gap / 2.0;
        let below = node.position.y + self.layout.level_height;
        if value > node.value {
            self.steps.push(Instruction::CompareWith {
                id,
                go_to: node.right,
                explanation: format!("{value} > {}, insert right", node.value),
            });
            let child_pos = Point::new(node.position.x + child_gap, below);
            let child = self.descend(node.right, child_pos, child_gap, Some(id));
            self.tree.get_mut(id).right = Some(child);
            self.tree.get_mut(child).parent = Some(id);
        } else if value < node.value {
            self.steps.push(Instruction::CompareWith {
                id,
                go_to: node.left,
                explanation: format!("{value} < {}, insert left", node.value),
            });
            let child_pos = Point::new(node.position.x - child_gap, below);
            let child = self.descend(node.left, child_pos, child_gap, Some(id));
            self.tree.get_mut(id).left = Some(child);
            self.tree.get_mut(child).parent = Some(id);
        } else {
            self.steps.push(Instruction::ValueFound {
                id,
                explanation: format!("{} found, nothing added", node.value),
            });
        }

        self.tree.recompute_height(id);
        let (left, right) = (self.tree.at(id).left, self.tree.at(id).right);
        let balance = self.tree.height_of(left) - self.tree.height_of(right);

        if balance > 1 {
            if let Some(left) = left
                && value > self.tree.at(left).value
            {
                self.rotate(left, RotateDir::Left, Some(id), child_gap);
            }
            self.rotate(id, RotateDir::Right, parent, gap)
        } else if balance < -1 {
            if let Some(right) = right
                && value < self.tree.at(right).value
            {
                self.rotate(right, RotateDir::Right, Some(id), child_gap);
            }
            self.rotate(id, RotateDir::Left, parent, gap)
        } else {
            id
        }
    }

    /// Rotate `n1` in `dir`, reattach the result under `receiver`, relayout it and emit the
    /// `Rotate` step. Returns the new subtree root.
    fn rotate(
        &mut self,
        n1: NodeId,
        dir: RotateDir,
        receiver: Option<NodeId>,
        gap: f64,
    ) -> NodeId {
        let heavy = match dir {
            RotateDir::Right => self.tree.at(n1).left,
            RotateDir::Left => self.tree.at(n1).right,
        };
        let Some(n2) = heavy else {
            return n1;
        };
        let inner = match dir {
            RotateDir::Right => self.tree.at(n2).right,
            RotateDir::Left => self.tree.at(n2).left,
        };

        let mut links_removed = vec![Link::new(n1, n2)];
        let mut links_added = vec![Link::new(n2, n1)];
        if let Some(b) = inner {
            links_removed.push(Link::new(n2, b));
            links_added.push(Link::new(n1, b));
            self.tree.get_mut(b).parent = Some(n1);
        }

        match dir {
            RotateDir::Right => {
                self.tree.get_mut(n1).left = inner;
                self.tree.get_mut(n2).right = Some(n1);
            }
            RotateDir::Left => {
                self.tree.get_mut(n1).right = inner;
                self.tree.get_mut(n2).left = Some(n1);
            }
        }
        self.tree.get_mut(n1).parent = Some(n2);
        self.tree.recompute_height(n1);
        self.tree.recompute_height(n2);

        let (v1, v2) = (self.tree.at(n1).value, self.tree.at(n2).value);
        let explanation = format!("rotate {dir}, bringing {v2} to {v1}");

        self.tree.get_mut(n2).parent = receiver;
        match receiver {
            Some(r) => {
                links_removed.push(Link::new(r, n1));
                links_added.push(Link::new(r, n2));
                let receiver = self.tree.get_mut(r);
                if receiver.left == Some(n1) {
                    receiver.left = Some(n2);
                } else if receiver.right == Some(n1) {
                    receiver.right = Some(n2);
                }
                self.tree.recompute_height(r);
            }
            None => self.tree.set_root(Some(n2)),
        }

        let anchor = self.tree.at(n1).position;
        let mut movements = Vec::new();
        self.relayout(Some(n2), anchor, gap, &mut movements);

        tracing::debug!(%dir, n1 = %n1, n2 = %n2, moved = movements.len(), "rotation");
        self.steps.push(Instruction::Rotate {
            direction: dir,
            links_removed,
            links_added,
            movements,
            n1,
            n2,
            explanation,
        });
        n2
    }

    /// Place `at` on `position` and its descendants below it, pre-order.
    fn relayout(
        &mut self,
        at: Option<NodeId>,
        position: Point,
        gap: f64,
        movements: &mut Vec<NodeMove>,
    ) {
        let Some(id) = at else {
            return;
        };
        let node = self.tree.get_mut(id);
        node.position = position;
        let (left, right) = (node.left, node.right);
        movements.push(NodeMove { id, to: position });

        let child_gap = gap / 2.0;
        let below = position.y + self.layout.level_height;
        self.relayout(
            left,
            Point::new(position.x - child_gap, below),
            child_gap,
            movements,
        );
        self.relayout(
            right,
            Point::new(position.x + child_gap, below),
            child_gap,
            movements,
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tree/engine.rs"]
mod tests;
