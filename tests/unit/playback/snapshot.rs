use super::*;
use crate::render::scene::StyleOpts;
use crate::tree::engine::{LayoutOpts, TreeEngine};

fn state() -> (Tree, Scene) {
    let mut engine = TreeEngine::new(LayoutOpts::default());
    engine.insert_values(&[2.0, 1.0]);
    let tree = engine.tree().clone();
    let scene = Scene::from_tree(&tree, &StyleOpts::default());
    (tree, scene)
}

#[test]
fn capture_is_first_wins() {
    let (tree, scene) = state();
    let mut cache = SnapshotCache::new();
    assert!(cache.capture(Cursor::new(1, 0), &tree, &scene));
    assert!(!cache.capture(Cursor::new(1, 0), &Tree::new(), &Scene::new()));
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.lookup(Cursor::new(1, 0)).unwrap().tree, tree);
}

#[test]
fn lookup_of_unknown_position_fails() {
    let cache = SnapshotCache::new();
    let err = cache.lookup(Cursor::new(3, 1)).unwrap_err();
    assert!(matches!(err, PlaybackError::MissingSnapshot(at) if at == Cursor::new(3, 1)));
    assert_eq!(err.to_string(), "missing snapshot at (3, 1)");
}

#[test]
fn restore_hands_out_independent_copies() {
    let (tree, scene) = state();
    let mut cache = SnapshotCache::new();
    cache.capture(Cursor::START, &tree, &scene);

    let mut restored = cache.restore(Cursor::START).unwrap();
    restored.scene.edges.clear();
    restored.tree = Tree::new();

    let again = cache.restore(Cursor::START).unwrap();
    assert_eq!(again.tree, tree);
    assert_eq!(again.scene, scene);
}
