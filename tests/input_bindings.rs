use bevy::prelude::*;

use rail_runner::gameplay::Command;
use rail_runner::interaction::inputmap::parse::{default_input_map, parse_input_toml};
use rail_runner::interaction::inputmap::types::{Action, FrameActions, Gesture, RawBindingToken};

#[test]
fn shipped_bindings_cover_every_action() {
    let raw = std::fs::read_to_string("assets/config/input.toml").unwrap();
    let parsed = parse_input_toml(&raw);
    assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
    for action in Action::ALL {
        assert!(
            parsed.input_map.bindings.contains_key(&action),
            "{} unbound",
            action.name()
        );
    }
    assert_eq!(
        parsed.input_map.bindings.len(),
        default_input_map().bindings.len()
    );
}

#[test]
fn unknown_names_are_reported_and_skipped() {
    let parsed = parse_input_toml(
        r#"
[bindings]
Teleport = ["Key:KeyT"]
Jump = ["Key:Space", "Key:Hyper", "Touch:Pinch"]
"#,
    );
    assert_eq!(parsed.errors.len(), 3, "{:?}", parsed.errors);
    let jump = parsed.input_map.bindings.get(&Action::Jump).unwrap();
    assert_eq!(jump.as_slice(), &[RawBindingToken::Key(KeyCode::Space)]);
}

#[test]
fn swipes_map_to_lane_and_vertical_moves() {
    let map = default_input_map();
    let cases = [
        (Vec2::new(-80.0, 5.0), Gesture::SwipeLeft, Action::MoveLeft),
        (Vec2::new(80.0, -5.0), Gesture::SwipeRight, Action::MoveRight),
        // screen y grows downward
        (Vec2::new(3.0, -90.0), Gesture::SwipeUp, Action::Jump),
        (Vec2::new(3.0, 90.0), Gesture::SwipeDown, Action::Slide),
    ];
    for (delta, gesture, action) in cases {
        assert_eq!(map.gesture_cfg.classify(delta), Some(gesture));
        assert!(map
            .actions_for(RawBindingToken::Touch(gesture))
            .any(|a| a == action));
    }
    // short drags are neither swipe nor tap
    assert_eq!(map.gesture_cfg.classify(Vec2::new(30.0, 0.0)), None);
}

#[test]
fn only_gameplay_actions_become_commands() {
    let mut actions = FrameActions::default();
    actions.insert(Action::Jump);
    actions.insert(Action::Confirm);
    actions.insert(Action::ToggleMusic);
    let cmds = actions.commands();
    assert!(cmds.contains(Command::Jump));
    assert_eq!(cmds.iter().count(), 1);
}
