//! Systems for input action evaluation.
use bevy::prelude::*;

use super::types::*;

/// Rebuilds [`FrameActions`] from this frame's key presses and finished touches.
pub fn system_collect_actions(
    keyboard: Res<ButtonInput<KeyCode>>,
    touches: Res<Touches>,
    input_map: Res<InputMap>,
    mut actions: ResMut<FrameActions>,
) {
    actions.clear();
    for (action, key) in input_map.keys() {
        if keyboard.just_pressed(key) {
            actions.insert(action);
        }
    }
    for touch in touches.iter_just_released() {
        let delta = touch.position() - touch.start_position();
        let Some(gesture) = input_map.gesture_cfg.classify(delta) else {
            continue;
        };
        for action in input_map.actions_for(RawBindingToken::Touch(gesture)) {
            actions.insert(action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::inputmap::parse::default_input_map;

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<Touches>()
            .init_resource::<FrameActions>()
            .insert_resource(default_input_map())
            .add_systems(Update, system_collect_actions);
        app
    }

    #[test]
    fn key_press_fires_once() {
        let mut app = app();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::ArrowLeft);
        app.update();
        let a = *app.world().resource::<FrameActions>();
        assert!(a.contains(Action::MoveLeft));
        assert!(!a.contains(Action::Jump));

        // still held: no longer just pressed
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .clear();
        app.update();
        assert!(app.world().resource::<FrameActions>().is_empty());
    }

    #[test]
    fn space_is_both_jump_and_confirm() {
        let mut app = app();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Space);
        app.update();
        let a = *app.world().resource::<FrameActions>();
        assert!(a.contains(Action::Jump));
        assert!(a.contains(Action::Confirm));
    }
}
