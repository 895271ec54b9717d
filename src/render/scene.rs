use crate::foundation::core::{NodeId, Point, Rgba8};
use crate::trace::instruction::Link;
use crate::tree::avl::Tree;

/// Colors and sizes used for node sprites and effect transients.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StyleOpts {
    pub node_radius: f64,
    pub font_size: f64,
    pub fill: Rgba8,
    pub border: Rgba8,
    pub text: Rgba8,
    pub link: Rgba8,
    /// Line and disc drawn while a node is created.
    pub create: Rgba8,
    /// Line drawn from a compared node to the child the search continues into.
    pub compare: Rgba8,
    pub glow_fill: Rgba8,
    pub glow_border: Rgba8,
    pub glow_text: Rgba8,
}

impl Default for StyleOpts {
    fn default() -> Self {
        Self {
            node_radius: 15.0,
            font_size: 12.0,
            fill: Rgba8::WHITE,
            border: Rgba8::BLACK,
            text: Rgba8::BLACK,
            link: Rgba8::BLACK,
            create: Rgba8::GREY,
            compare: Rgba8::ORANGE,
            glow_fill: Rgba8::ORANGE,
            glow_border: Rgba8::GREY,
            glow_text: Rgba8::WHITE,
        }
    }
}

/// Identifies the transient object a running effect owns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EffectTag(pub u32);

#[derive(Clone, Debug, PartialEq)]
pub struct NodeSprite {
    pub id: NodeId,
    pub value: f64,
    pub position: Point,
    pub fill: Rgba8,
    pub border: Rgba8,
    pub text: Rgba8,
}

impl NodeSprite {
    pub fn new(id: NodeId, value: f64, position: Point, style: &StyleOpts) -> Self {
        Self {
            id,
            value,
            position,
            fill: style.fill,
            border: style.border,
            text: style.text,
        }
    }
}

/// Line growing from `from` toward `to`; `to` is the current tip.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    pub tag: EffectTag,
    pub from: Point,
    pub to: Point,
    pub color: Rgba8,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Disc {
    pub tag: EffectTag,
    pub center: Point,
    pub radius: f64,
    pub color: Rgba8,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EdgeObject {
    Link(Link),
    Stroke(Stroke),
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeObject {
    Node(NodeSprite),
    Disc(Disc),
}

/// Everything a renderer draws: an `edges` bucket under a `nodes` bucket, each in draw order.
///
/// Links and node sprites persist; strokes and discs live only while the effect that owns them
/// runs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub edges: Vec<EdgeObject>,
    pub nodes: Vec<NodeObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scene showing `tree` at rest: one sprite per reachable node, one link per parent edge.
    pub fn from_tree(tree: &Tree, style: &StyleOpts) -> Self {
        let mut scene = Self::new();
        for id in tree.reachable() {
            let node = tree.at(id);
            scene.add_sprite(NodeSprite::new(id, node.value, node.position, style));
            for child in [node.left, node.right].into_iter().flatten() {
                scene.add_link(Link::new(id, child));
            }
        }
        scene
    }

    pub fn sprites(&self) -> impl Iterator<Item = &NodeSprite> {
        self.nodes.iter().filter_map(|object| match object {
            NodeObject::Node(sprite) => Some(sprite),
            NodeObject::Disc(_) => None,
        })
    }

    pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
        self.edges.iter().filter_map(|object| match object {
            EdgeObject::Link(link) => Some(*link),
            EdgeObject::Stroke(_) => None,
        })
    }

    pub fn sprite(&self, id: NodeId) -> Option<&NodeSprite> {
        self.sprites().find(|sprite| sprite.id == id)
    }

    pub fn sprite_mut(&mut self, id: NodeId) -> Option<&mut NodeSprite> {
        self.nodes.iter_mut().find_map(|object| match object {
            NodeObject::Node(sprite) if sprite.id == id => Some(sprite),
            _ => None,
        })
    }

    pub fn has_link(&self, link: Link) -> bool {
        self.links().any(|l| l == link)
    }

    /// Add `link` unless it is already present.
    pub fn add_link(&mut self, link: Link) {
        if !self.has_link(link) {
            self.edges.push(EdgeObject::Link(link));
        }
    }

    /// Returns whether the link was present.
    pub fn remove_link(&mut self, link: Link) -> bool {
        let before = self.edges.len();
        self.edges
            .retain(|object| !matches!(object, EdgeObject::Link(l) if *l == link));
        self.edges.len() != before
    }

    /// Add `sprite`, replacing any sprite with the same id.
    pub fn add_sprite(&mut self, sprite: NodeSprite) {
        match self.sprite_mut(sprite.id) {
            Some(existing) => *existing = sprite,
            None => self.nodes.push(NodeObject::Node(sprite)),
        }
    }

    pub fn push_stroke(&mut self, stroke: Stroke) {
        self.edges.push(EdgeObject::Stroke(stroke));
    }

    pub fn push_disc(&mut self, disc: Disc) {
        self.nodes.push(NodeObject::Disc(disc));
    }

    pub fn stroke_mut(&mut self, tag: EffectTag) -> Option<&mut Stroke> {
        self.edges.iter_mut().find_map(|object| match object {
            EdgeObject::Stroke(stroke) if stroke.tag == tag => Some(stroke),
            _ => None,
        })
    }

    pub fn disc_mut(&mut self, tag: EffectTag) -> Option<&mut Disc> {
        self.nodes.iter_mut().find_map(|object| match object {
            NodeObject::Disc(disc) if disc.tag == tag => Some(disc),
            _ => None,
        })
    }

    /// Drop the stroke or disc owned by `tag`, if any.
    pub fn remove_transient(&mut self, tag: EffectTag) {
        self.edges
            .retain(|object| !matches!(object, EdgeObject::Stroke(s) if s.tag == tag));
        self.nodes
            .retain(|object| !matches!(object, NodeObject::Disc(d) if d.tag == tag));
    }

    pub fn has_transients(&self) -> bool {
        self.edges
            .iter()
            .any(|object| matches!(object, EdgeObject::Stroke(_)))
            || self
                .nodes
                .iter()
                .any(|object| matches!(object, NodeObject::Disc(_)))
    }

    /// Same persistent content as `other`, ignoring bucket order.
    pub fn same_content(&self, other: &Scene) -> bool {
        let mut a: Vec<_> = self.links().collect();
        let mut b: Vec<_> = other.links().collect();
        a.sort_by_key(|l| (l.parent, l.child));
        b.sort_by_key(|l| (l.parent, l.child));
        if a != b || self.sprites().count() != other.sprites().count() {
            return false;
        }
        self.sprites()
            .all(|sprite| other.sprite(sprite.id) == Some(sprite))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/scene.rs"]
mod tests;
