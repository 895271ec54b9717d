use super::*;
use crate::render::scene::{NodeSprite, StyleOpts};

fn scene_with_node() -> Scene {
    let mut scene = Scene::new();
    scene.add_sprite(NodeSprite::new(
        NodeId(0),
        5.0,
        Point::ORIGIN,
        &StyleOpts::default(),
    ));
    scene
}

#[test]
fn progress_never_overshoots() {
    let mut progress = Progress::new(0);
    assert_eq!(progress.total, 1);
    progress.advance();
    progress.advance();
    assert_eq!(progress.elapsed, 1);
    assert!(progress.is_done());
}

#[test]
fn line_grows_then_disappears() {
    let mut scene = Scene::new();
    let mut effect = Effect::DrawLine {
        tag: EffectTag(3),
        from: Point::ORIGIN,
        to: Point::new(100.0, 0.0),
        color: Rgba8::GREY,
        progress: Progress::new(4),
    };
    effect.begin(&mut scene);
    assert!(!effect.step(&mut scene, Ease::Linear));
    assert!(!effect.step(&mut scene, Ease::Linear));
    assert_eq!(
        scene.stroke_mut(EffectTag(3)).map(|s| s.to),
        Some(Point::new(50.0, 0.0))
    );
    assert!(!effect.step(&mut scene, Ease::Linear));
    assert!(effect.step(&mut scene, Ease::Linear));
    assert!(!scene.has_transients());
}

#[test]
fn glow_fades_and_snaps_back() {
    let mut scene = scene_with_node();
    let mut effect = Effect::Glow {
        id: NodeId(0),
        target: Palette {
            fill: Rgba8::ORANGE,
            border: Rgba8::GREY,
            text: Rgba8::WHITE,
        },
        saved: None,
        progress: Progress::new(2),
    };
    effect.begin(&mut scene);
    assert!(!effect.step(&mut scene, Ease::Linear));
    let sprite = scene.sprite(NodeId(0)).unwrap();
    assert_eq!(sprite.fill, Rgba8::opaque(255, 210, 128));

    assert!(effect.step(&mut scene, Ease::Linear));
    assert_eq!(scene, scene_with_node());
}

#[test]
fn cancelled_move_returns_home() {
    let mut scene = scene_with_node();
    let mut effect = Effect::MoveNode {
        id: NodeId(0),
        to: Point::new(40.0, 40.0),
        from: None,
        progress: Progress::new(10),
    };
    effect.begin(&mut scene);
    effect.step(&mut scene, Ease::InOutQuad);
    effect.step(&mut scene, Ease::InOutQuad);
    assert_ne!(scene.sprite(NodeId(0)).unwrap().position, Point::ORIGIN);

    effect.cancel(&mut scene);
    effect.cancel(&mut scene);
    assert_eq!(scene.sprite(NodeId(0)).unwrap().position, Point::ORIGIN);
    assert_eq!(effect.progress().elapsed, 0);
}

#[test]
fn finish_without_begin_lands_on_final_state() {
    let mut scene = scene_with_node();
    let mut effect = Effect::MoveNode {
        id: NodeId(0),
        to: Point::new(40.0, 40.0),
        from: None,
        progress: Progress::new(10),
    };
    effect.finish(&mut scene);
    effect.finish(&mut scene);
    assert_eq!(
        scene.sprite(NodeId(0)).unwrap().position,
        Point::new(40.0, 40.0)
    );
    assert!(effect.progress().is_done());
}
