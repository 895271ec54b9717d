use std::fmt;
use std::str::FromStr;

use crate::foundation::core::{NodeId, Point};
use crate::foundation::error::PlaybackError;

/// Parent-to-child edge, written `"<parent>-<child>"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Link {
    pub parent: NodeId,
    pub child: NodeId,
}

impl Link {
    pub fn new(parent: NodeId, child: NodeId) -> Self {
        Self { parent, child }
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.parent, self.child)
    }
}

impl FromStr for Link {
    type Err = PlaybackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (parent, child) = s
            .split_once('-')
            .ok_or_else(|| PlaybackError::malformed(format!("'{s}' is not a link")))?;
        Ok(Self {
            parent: parent.parse()?,
            child: child.parse()?,
        })
    }
}

impl From<Link> for String {
    fn from(link: Link) -> Self {
        link.to_string()
    }
}

impl TryFrom<String> for Link {
    type Error = PlaybackError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Target position for one node of a rotated subtree.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NodeMove {
    pub id: NodeId,
    pub to: Point,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotateDir {
    Left,
    Right,
}

impl fmt::Display for RotateDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// One atomic, self-describing effect of an insertion.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Instruction {
    /// A leaf is created and, unless it is the new root, attached below `attached_to`.
    CreateNode {
        id: NodeId,
        attached_to: Option<NodeId>,
        value: f64,
        position: Point,
        explanation: String,
    },
    /// The inserted value is compared with node `id`; descent continues into `go_to` if it exists.
    CompareWith {
        id: NodeId,
        go_to: Option<NodeId>,
        explanation: String,
    },
    /// The inserted value is already stored at `id`.
    ValueFound { id: NodeId, explanation: String },
    /// `n2` is rotated above `n1`.
    Rotate {
        direction: RotateDir,
        links_removed: Vec<Link>,
        links_added: Vec<Link>,
        movements: Vec<NodeMove>,
        n1: NodeId,
        n2: NodeId,
        explanation: String,
    },
}

impl Instruction {
    pub fn explanation(&self) -> &str {
        match self {
            Self::CreateNode { explanation, .. }
            | Self::CompareWith { explanation, .. }
            | Self::ValueFound { explanation, .. }
            | Self::Rotate { explanation, .. } => explanation,
        }
    }

    /// Short tag for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CreateNode { .. } => "create_node",
            Self::CompareWith { .. } => "compare_with",
            Self::ValueFound { .. } => "value_found",
            Self::Rotate { .. } => "rotate",
        }
    }

    pub fn is_rotation(&self) -> bool {
        matches!(self, Self::Rotate { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trace/instruction.rs"]
mod tests;
