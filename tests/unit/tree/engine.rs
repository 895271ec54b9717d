use super::*;
use crate::trace::instruction::Instruction;

fn engine_with(values: &[f64]) -> (TreeEngine, Vec<Command>) {
    let mut engine = TreeEngine::new(LayoutOpts::default());
    let commands = engine.insert_values(values);
    (engine, commands)
}

fn rotations(command: &Command) -> Vec<&Instruction> {
    command.steps.iter().filter(|i| i.is_rotation()).collect()
}

#[test]
fn first_insert_creates_root_at_origin() {
    let (engine, commands) = engine_with(&[5.0]);
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].name, "INSERT 5");
    assert_eq!(
        commands[0].steps,
        vec![Instruction::CreateNode {
            id: NodeId(0),
            attached_to: None,
            value: 5.0,
            position: Point::ORIGIN,
            explanation: "Empty node found, inserting 5".to_string(),
        }]
    );
    assert_eq!(engine.tree().root_id(), Some(NodeId(0)));
}

#[test]
fn children_are_placed_half_a_gap_away() {
    let (engine, commands) = engine_with(&[5.0, 3.0, 8.0]);
    let tree = engine.tree();
    assert_eq!(tree.at(NodeId(1)).position, Point::new(-150.0, 50.0));
    assert_eq!(tree.at(NodeId(2)).position, Point::new(150.0, 50.0));
    assert_eq!(
        commands[2].steps[0].explanation(),
        "8 > 5, insert right"
    );
    assert_eq!(
        commands[1].steps[0].explanation(),
        "3 < 5, insert left"
    );
}

#[test]
fn left_left_case_rotates_right_once() {
    let (engine, commands) = engine_with(&[3.0, 2.0, 1.0]);
    let tree = engine.tree();
    let root = tree.root().unwrap();
    assert_eq!(root.value, 2.0);
    assert_eq!(root.height, 1);
    assert_eq!(tree.find(1.0).unwrap().height, 0);
    assert_eq!(tree.find(3.0).unwrap().height, 0);

    let rotated = rotations(&commands[2]);
    assert_eq!(rotated.len(), 1);
    let Instruction::Rotate {
        direction,
        links_removed,
        links_added,
        movements,
        n1,
        n2,
        explanation,
    } = rotated[0]
    else {
        unreachable!()
    };
    assert_eq!(*direction, RotateDir::Right);
    assert_eq!((*n1, *n2), (NodeId(0), NodeId(1)));
    assert_eq!(links_removed, &vec![Link::new(NodeId(0), NodeId(1))]);
    assert_eq!(links_added, &vec![Link::new(NodeId(1), NodeId(0))]);
    assert_eq!(explanation, "rotate right, bringing 2 to 3");
    assert_eq!(
        movements,
        &vec![
            NodeMove { id: NodeId(1), to: Point::new(0.0, 0.0) },
            NodeMove { id: NodeId(2), to: Point::new(-150.0, 50.0) },
            NodeMove { id: NodeId(0), to: Point::new(150.0, 50.0) },
        ]
    );
    assert!(tree.is_balanced());
}

#[test]
fn left_right_case_rotates_twice() {
    let (engine, commands) = engine_with(&[3.0, 1.0, 2.0]);
    let rotated = rotations(&commands[2]);
    assert_eq!(rotated.len(), 2);

    let Instruction::Rotate { links_removed, links_added, explanation, .. } = rotated[0] else {
        unreachable!()
    };
    assert_eq!(explanation, "rotate left, bringing 2 to 1");
    assert_eq!(
        links_removed,
        &vec![Link::new(NodeId(1), NodeId(2)), Link::new(NodeId(0), NodeId(1))]
    );
    assert_eq!(
        links_added,
        &vec![Link::new(NodeId(2), NodeId(1)), Link::new(NodeId(0), NodeId(2))]
    );
    assert_eq!(rotated[1].explanation(), "rotate right, bringing 2 to 3");

    let tree = engine.tree();
    assert_eq!(tree.root().map(|n| n.value), Some(2.0));
    assert_eq!(tree.in_order(), vec![1.0, 2.0, 3.0]);
    assert_eq!(tree.at(NodeId(0)).position, Point::new(150.0, 50.0));
    assert_eq!(tree.at(NodeId(1)).position, Point::new(-150.0, 50.0));
}

#[test]
fn right_left_case_mirrors() {
    let (engine, commands) = engine_with(&[1.0, 3.0, 2.0]);
    let rotated = rotations(&commands[2]);
    assert_eq!(rotated.len(), 2);
    assert_eq!(rotated[0].explanation(), "rotate right, bringing 2 to 3");
    assert_eq!(rotated[1].explanation(), "rotate left, bringing 2 to 1");
    assert_eq!(engine.tree().root().map(|n| n.value), Some(2.0));
}

#[test]
fn duplicate_is_a_single_value_found() {
    let (mut engine, _) = engine_with(&[5.0]);
    let before = engine.tree().clone();
    let commands = engine.insert_values(&[5.0]);
    assert_eq!(commands.len(), 1);
    assert_eq!(
        commands[0].steps,
        vec![Instruction::ValueFound {
            id: NodeId(0),
            explanation: "5 found, nothing added".to_string(),
        }]
    );
    assert_eq!(engine.tree(), &before);
}

#[test]
fn generation_is_deterministic() {
    let values = [10.0, 20.0, 30.0, 25.0, 5.0, 1.0, 27.0];
    let (a_engine, a) = engine_with(&values);
    let (b_engine, b) = engine_with(&values);
    assert_eq!(a, b);
    assert_eq!(a_engine.tree(), b_engine.tree());
}

#[test]
fn sequential_inserts_stay_balanced() {
    let values: Vec<f64> = (1..=40).map(f64::from).collect();
    let (engine, _) = engine_with(&values);
    assert!(engine.tree().is_balanced());
    assert_eq!(engine.tree().in_order(), values);
}

#[test]
fn crowding_shows_up_on_deep_trees() {
    let shallow: Vec<f64> = (1..=15).map(f64::from).collect();
    assert!(!engine_with(&shallow).0.detect_crowding());

    let deep: Vec<f64> = (1..=63).map(f64::from).collect();
    assert!(engine_with(&deep).0.detect_crowding());
}
