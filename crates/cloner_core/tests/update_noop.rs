use cloner_core::{update, Msg, TrackerState};

#[test]
fn update_is_noop() {
    let state = TrackerState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
