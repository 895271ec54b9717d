use crate::foundation::core::NodeId;
use crate::foundation::error::{PlaybackError, PlaybackResult};
use crate::trace::instruction::{Instruction, Link, NodeMove};
use crate::tree::avl::Tree;

impl Tree {
    /// Advance this tree by one instruction.
    ///
    /// Every referenced id is checked first; on error the tree is left exactly as it was.
    pub fn apply(&mut self, instruction: &Instruction) -> PlaybackResult<()> {
        match instruction {
            Instruction::CreateNode {
                id,
                attached_to,
                value,
                position,
                ..
            } => {
                let slot = self.create_slot(*id, *attached_to, *value)?;
                let created = self.alloc(*value, *position, *attached_to);
                match slot {
                    Some((parent, Side::Left)) => self.get_mut(parent).left = Some(created),
                    Some((parent, Side::Right)) => self.get_mut(parent).right = Some(created),
                    None => self.set_root(Some(created)),
                }
                if let Some(parent) = attached_to {
                    self.recompute_heights_upward(*parent);
                }
                Ok(())
            }
            Instruction::CompareWith { id, go_to, .. } => {
                self.require(*id)?;
                if let Some(go_to) = go_to {
                    self.require(*go_to)?;
                }
                Ok(())
            }
            Instruction::ValueFound { id, .. } => self.require(*id).map(|_| ()),
            Instruction::Rotate {
                links_removed,
                links_added,
                movements,
                n1,
                ..
            } => {
                let mut staged = self.clone();
                staged.relink(*n1, links_removed, links_added, movements)?;
                *self = staged;
                Ok(())
            }
        }
    }

    /// Copy of this tree advanced by one instruction.
    pub fn applied(&self, instruction: &Instruction) -> PlaybackResult<Tree> {
        let mut next = self.clone();
        next.apply(instruction)?;
        Ok(next)
    }

    fn create_slot(
        &self,
        id: NodeId,
        attached_to: Option<NodeId>,
        value: f64,
    ) -> PlaybackResult<Option<(NodeId, Side)>> {
        if id != self.next_id() {
            return Err(PlaybackError::malformed(format!(
                "create_node {id} out of order, next id is {}",
                self.next_id()
            )));
        }
        let Some(parent) = attached_to else {
            if self.root_id().is_some() {
                return Err(PlaybackError::malformed(format!(
                    "create_node {id} has no parent but the tree has a root"
                )));
            }
            return Ok(None);
        };
        let node = self.require(parent)?;
        let (side, slot) = if value > node.value {
            (Side::Right, node.right)
        } else if value < node.value {
            (Side::Left, node.left)
        } else {
            return Err(PlaybackError::malformed(format!(
                "create_node {id} duplicates the value of {parent}"
            )));
        };
        if slot.is_some() {
            return Err(PlaybackError::malformed(format!(
                "create_node {id}: {side:?} child of {parent} is occupied"
            )));
        }
        Ok(Some((parent, side)))
    }

    fn relink(
        &mut self,
        n1: NodeId,
        removed: &[Link],
        added: &[Link],
        movements: &[NodeMove],
    ) -> PlaybackResult<()> {
        self.require(n1)?;
        for link in removed {
            self.require(link.child)?;
            let (left, right) = {
                let parent = self.require(link.parent)?;
                (parent.left, parent.right)
            };
            if left == Some(link.child) {
                self.get_mut(link.parent).left = None;
            } else if right == Some(link.child) {
                self.get_mut(link.parent).right = None;
            } else {
                return Err(PlaybackError::malformed(format!("no link {link} to remove")));
            }
            self.get_mut(link.child).parent = None;
        }

        for link in added {
            let child_value = self.require(link.child)?.value;
            let parent_value = self.require(link.parent)?.value;
            let side = if child_value > parent_value {
                Side::Right
            } else if child_value < parent_value {
                Side::Left
            } else {
                return Err(PlaybackError::malformed(format!(
                    "link {link} joins equal values"
                )));
            };
            let slot = match side {
                Side::Left => &mut self.get_mut(link.parent).left,
                Side::Right => &mut self.get_mut(link.parent).right,
            };
            if slot.is_some() {
                return Err(PlaybackError::malformed(format!(
                    "link {link}: {side:?} slot is occupied"
                )));
            }
            *slot = Some(link.child);
            self.get_mut(link.child).parent = Some(link.parent);
        }

        for movement in movements {
            self.require(movement.id)?;
            self.get_mut(movement.id).position = movement.to;
        }

        let mut root = self.root_id();
        while let Some(parent) = root.and_then(|id| self.at(id).parent) {
            root = Some(parent);
        }
        self.set_root(root);
        self.recompute_heights_upward(n1);
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

#[cfg(test)]
#[path = "../../tests/unit/tree/replay.rs"]
mod tests;
