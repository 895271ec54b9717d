use super::*;
use crate::foundation::core::NodeId;

fn found(id: u32) -> Instruction {
    Instruction::ValueFound {
        id: NodeId(id),
        explanation: format!("{id} found, nothing added"),
    }
}

fn trace_with(lengths: &[usize]) -> Trace {
    let mut trace = Trace::new();
    for (i, &len) in lengths.iter().enumerate() {
        trace.push(Command {
            name: format!("INSERT {i}"),
            steps: (0..len as u32).map(found).collect(),
        });
    }
    trace
}

#[test]
fn contains_accepts_instructions_and_end_sentinel_only() {
    let trace = trace_with(&[2, 1]);
    assert!(trace.contains(Cursor::new(0, 1)));
    assert!(trace.contains(Cursor::new(1, 0)));
    assert!(trace.contains(Cursor::new(2, 0)));
    assert!(!trace.contains(Cursor::new(0, 2)));
    assert!(!trace.contains(Cursor::new(2, 1)));
    assert!(!trace.contains(Cursor::new(3, 0)));
}

#[test]
fn last_position_and_totals() {
    let trace = trace_with(&[2, 3]);
    assert_eq!(trace.total_instructions(), 5);
    assert_eq!(trace.last_position(), Some(Cursor::new(1, 2)));
    assert_eq!(Trace::new().last_position(), None);
    assert_eq!(trace.command_len(7), 0);
}

#[test]
fn iter_walks_in_trace_order() {
    let trace = trace_with(&[2, 1]);
    let positions: Vec<Cursor> = trace.iter().map(|(at, _)| at).collect();
    assert_eq!(
        positions,
        vec![Cursor::new(0, 0), Cursor::new(0, 1), Cursor::new(1, 0)]
    );
}
