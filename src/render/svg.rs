use std::fmt::Write as _;

use crate::foundation::core::Point;
use crate::render::camera::Camera;
use crate::render::scene::{EdgeObject, NodeObject, NodeSprite, Scene, StyleOpts};

/// Write `scene` as a standalone SVG document of `width` x `height` pixels seen through `camera`.
///
/// Edges are drawn under nodes. A link whose endpoint has no sprite yet is skipped.
pub fn scene_to_svg(
    scene: &Scene,
    camera: &Camera,
    style: &StyleOpts,
    width: u32,
    height: u32,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );

    let _ = writeln!(out, r#"  <g id="edges">"#);
    for edge in &scene.edges {
        match edge {
            EdgeObject::Link(link) => {
                let (Some(parent), Some(child)) = (scene.sprite(link.parent), scene.sprite(link.child))
                else {
                    continue;
                };
                line(&mut out, camera, parent.position, child.position, &style.link.to_css());
            }
            EdgeObject::Stroke(stroke) => {
                line(&mut out, camera, stroke.from, stroke.to, &stroke.color.to_css());
            }
        }
    }
    let _ = writeln!(out, "  </g>");

    let _ = writeln!(out, r#"  <g id="nodes">"#);
    for node in &scene.nodes {
        match node {
            NodeObject::Node(sprite) => sprite_svg(&mut out, camera, style, sprite),
            NodeObject::Disc(disc) => {
                let c = camera.world_to_screen(disc.center);
                let _ = writeln!(
                    out,
                    r#"    <circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}"/>"#,
                    c.x,
                    c.y,
                    disc.radius * camera.zoom,
                    disc.color.to_css()
                );
            }
        }
    }
    let _ = writeln!(out, "  </g>");
    out.push_str("</svg>\n");
    out
}

fn line(out: &mut String, camera: &Camera, from: Point, to: Point, color: &str) {
    let a = camera.world_to_screen(from);
    let b = camera.world_to_screen(to);
    let _ = writeln!(
        out,
        r#"    <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{color}" stroke-width="{:.2}"/>"#,
        a.x,
        a.y,
        b.x,
        b.y,
        2.0 * camera.zoom
    );
}

fn sprite_svg(out: &mut String, camera: &Camera, style: &StyleOpts, sprite: &NodeSprite) {
    let c = camera.world_to_screen(sprite.position);
    let _ = writeln!(
        out,
        r#"    <g id="node-{}"><circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}" stroke="{}"/><text x="{:.2}" y="{:.2}" font-size="{:.2}" text-anchor="middle" dominant-baseline="central" fill="{}">{}</text></g>"#,
        sprite.id,
        c.x,
        c.y,
        style.node_radius * camera.zoom,
        sprite.fill.to_css(),
        sprite.border.to_css(),
        c.x,
        c.y,
        style.font_size * camera.zoom,
        sprite.text.to_css(),
        sprite.value
    );
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
