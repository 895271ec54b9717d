use super::*;
use crate::trace::log::Command;
use crate::tree::engine::{LayoutOpts, TreeEngine};

const TIMING: Timing = Timing {
    effect_ticks: 4,
    ease: Ease::Linear,
};

fn style() -> StyleOpts {
    StyleOpts::default()
}

fn commands(values: &[f64]) -> (TreeEngine, Vec<Command>) {
    let mut engine = TreeEngine::new(LayoutOpts::default());
    let commands = engine.insert_values(values);
    (engine, commands)
}

/// Run every instruction, checking at each one that ticking and skipping agree.
fn play_checked(commands: &[Command]) -> Scene {
    let mut scene = Scene::new();
    for instruction in commands.iter().flat_map(|c| &c.steps) {
        let mut skipped = scene.clone();
        InstructionAnimation::new(instruction, &skipped, TIMING, &style())
            .unwrap()
            .skip(&mut skipped);

        let mut anim = InstructionAnimation::new(instruction, &scene, TIMING, &style()).unwrap();
        assert_eq!(anim.run_to_completion(&mut scene), Outcome::Completed);
        assert_eq!(anim.state(), AnimationState::Done);
        assert_eq!(scene, skipped, "{instruction:?}");
        assert!(!scene.has_transients());
    }
    scene
}

#[test]
fn tick_and_skip_agree_for_every_kind() {
    // Covers create (root and attached), compare with and without a target, found, and both
    // single and double rotations.
    let (engine, commands) = commands(&[3.0, 2.0, 1.0, 1.5, 1.7, 1.6, 2.0]);
    let scene = play_checked(&commands);
    assert!(scene.same_content(&Scene::from_tree(engine.tree(), &style())));
}

#[test]
fn create_attached_stages() {
    let (_, commands) = commands(&[5.0, 3.0]);
    let mut scene = Scene::new();
    InstructionAnimation::new(&commands[0].steps[0], &scene, TIMING, &style())
        .unwrap()
        .skip(&mut scene);

    let create = commands[1].steps.last().unwrap();
    let mut anim = InstructionAnimation::new(create, &scene, TIMING, &style()).unwrap();
    assert_eq!(anim.stages().len(), 2);
    assert_eq!(anim.state(), AnimationState::Idle);

    anim.tick(&mut scene);
    assert_eq!(anim.state(), AnimationState::Running);
    assert!(scene.has_transients());
    assert!(!scene.has_link(Link::new(NodeId(0), NodeId(1))));

    anim.run_to_completion(&mut scene);
    assert!(scene.has_link(Link::new(NodeId(0), NodeId(1))));
    assert_eq!(
        scene.sprite(NodeId(1)).map(|s| s.position),
        Some(Point::new(-150.0, 50.0))
    );
}

#[test]
fn cancel_at_any_tick_restores_the_scene() {
    let (_, commands) = commands(&[3.0, 2.0, 1.0]);
    let steps: Vec<&Instruction> = commands.iter().flat_map(|c| &c.steps).collect();
    let rotate_at = steps.iter().position(|i| i.is_rotation()).unwrap();

    let mut before = Scene::new();
    for instruction in &steps[..rotate_at] {
        InstructionAnimation::new(instruction, &before, TIMING, &style())
            .unwrap()
            .skip(&mut before);
    }

    for ticks in 0..8 {
        let mut scene = before.clone();
        let mut anim =
            InstructionAnimation::new(steps[rotate_at], &scene, TIMING, &style()).unwrap();
        for _ in 0..ticks {
            anim.tick(&mut scene);
        }
        if anim.state() == AnimationState::Done {
            continue;
        }
        anim.cancel(&mut scene);
        assert_eq!(anim.outcome(), Some(Outcome::Cancelled));
        assert_eq!(scene, before, "cancelled after {ticks} ticks");
    }
}

#[test]
fn requested_cancel_resolves_on_next_tick() {
    let (_, commands) = commands(&[5.0, 5.0]);
    let mut scene = Scene::new();
    InstructionAnimation::new(&commands[0].steps[0], &scene, TIMING, &style())
        .unwrap()
        .skip(&mut scene);
    let before = scene.clone();

    let mut anim = InstructionAnimation::new(&commands[1].steps[0], &scene, TIMING, &style()).unwrap();
    anim.tick(&mut scene);
    anim.tick(&mut scene);
    assert_ne!(scene, before);

    anim.request_cancel();
    assert_eq!(anim.state(), AnimationState::Cancelling);
    assert_eq!(anim.tick(&mut scene), AnimationState::Done);
    assert_eq!(anim.outcome(), Some(Outcome::Cancelled));
    assert_eq!(scene, before);
}

#[test]
fn unknown_nodes_are_rejected_up_front() {
    let scene = Scene::new();
    let compare = Instruction::CompareWith {
        id: NodeId(4),
        go_to: None,
        explanation: String::new(),
    };
    let err = InstructionAnimation::new(&compare, &scene, TIMING, &style()).unwrap_err();
    assert!(matches!(err, PlaybackError::MalformedTrace(_)));
}

#[test]
fn rotation_requires_links_it_removes() {
    let (_, commands) = commands(&[3.0, 2.0, 1.0]);
    let rotate = commands[2].steps.iter().find(|i| i.is_rotation()).unwrap();
    let mut scene = Scene::new();
    for id in 0..3 {
        scene.add_sprite(NodeSprite::new(NodeId(id), f64::from(id), Point::ORIGIN, &style()));
    }
    assert!(InstructionAnimation::new(rotate, &scene, TIMING, &style()).is_err());
}
