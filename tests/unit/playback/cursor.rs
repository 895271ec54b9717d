use super::*;
use crate::playback::sink::Recorder;
use crate::tree::engine::{LayoutOpts, TreeEngine};

/// Trace with commands of 1, 2 and 4 instructions.
fn trace() -> Trace {
    let mut engine = TreeEngine::new(LayoutOpts::default());
    let mut trace = Trace::new();
    trace.extend(engine.insert_values(&[5.0, 3.0, 1.0]));
    assert_eq!(
        trace.commands().iter().map(|c| c.len()).collect::<Vec<_>>(),
        vec![1, 2, 4]
    );
    trace
}

#[test]
fn ordering_is_lexicographic() {
    assert!(Cursor::new(0, 5) < Cursor::new(1, 0));
    assert!(Cursor::new(1, 1) > Cursor::new(1, 0));
    assert_eq!(Cursor::new(2, 3).to_string(), "(2, 3)");
}

#[test]
fn next_rolls_over_and_clamps() {
    let trace = trace();
    assert_eq!(Cursor::new(0, 0).next(&trace), Cursor::new(1, 0));
    assert_eq!(Cursor::new(1, 0).next(&trace), Cursor::new(1, 1));
    assert_eq!(Cursor::new(2, 3).next(&trace), trace.end());
    assert_eq!(trace.end().next(&trace), trace.end());
}

#[test]
fn prev_rolls_back_and_clamps() {
    let trace = trace();
    assert_eq!(Cursor::START.prev(&trace), Cursor::START);
    assert_eq!(Cursor::new(2, 0).prev(&trace), Cursor::new(1, 1));
    assert_eq!(trace.end().prev(&trace), Cursor::new(2, 3));
}

#[test]
fn increment_raises_furthest_and_set_does_not() {
    let trace = trace();
    let mut log = Recorder::new();
    let mut cursor = PlaybackCursor::new();
    cursor.increment(&trace, &mut log);
    cursor.increment(&trace, &mut log);
    assert_eq!(cursor.furthest(), Cursor::new(1, 1));
    assert_eq!(log.selections, vec![Cursor::new(1, 0), Cursor::new(1, 1)]);

    cursor.set(Cursor::new(2, 2), &trace, &mut log).unwrap();
    assert_eq!(cursor.furthest(), Cursor::new(1, 1));
    assert!(cursor.at_furthest());

    cursor.decrement(&trace, &mut log);
    cursor.decrement(&trace, &mut log);
    assert_eq!(log.selected, Some(Cursor::new(2, 0)));

    cursor.set(Cursor::START, &trace, &mut log).unwrap();
    assert!(!cursor.at_furthest());
}

#[test]
fn silent_moves_publish_nothing_until_asked() {
    let trace = trace();
    let mut log = Recorder::new();
    let mut cursor = PlaybackCursor::new();
    for _ in 0..10 {
        cursor.increment_silent(&trace);
    }
    assert!(cursor.at_end(&trace));
    assert!(log.selections.is_empty());

    cursor.publish(&trace, &mut log);
    assert_eq!(log.selected, Some(Cursor::new(2, 3)));
}

#[test]
fn set_rejects_positions_outside_the_trace() {
    let trace = trace();
    let mut log = Recorder::new();
    let mut cursor = PlaybackCursor::new();
    let err = cursor
        .set(Cursor::new(0, 1), &trace, &mut log)
        .unwrap_err();
    assert!(matches!(err, PlaybackError::InvalidPointer(p) if p == Cursor::new(0, 1)));
    assert_eq!(cursor.position(), Cursor::START);
    assert!(log.selections.is_empty());
    assert!(cursor.set_silent(trace.end(), &trace).is_ok());
}

#[test]
fn progress_counts_completed_instructions() {
    let trace = trace();
    let mut cursor = PlaybackCursor::new();
    assert_eq!(cursor.progress(&trace), 0.0);
    cursor.set_silent(Cursor::new(2, 1), &trace).unwrap();
    assert_eq!(cursor.flat_index(&trace), 4);
    assert_eq!(cursor.progress(&trace), 4.0 / 7.0);
    cursor.set_silent(trace.end(), &trace).unwrap();
    assert_eq!(cursor.progress(&trace), 1.0);
    assert_eq!(PlaybackCursor::new().progress(&Trace::new()), 0.0);
}
