use super::types::*;
use bevy::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct ParsedInputConfig {
    pub input_map: InputMap,
    pub errors: Vec<String>,
}

#[derive(Debug, serde::Deserialize)]
struct GestureToml {
    swipe_min_distance: Option<f32>,
    tap_max_move: Option<f32>,
}

#[derive(Debug, serde::Deserialize)]
struct RootToml {
    bindings: Option<HashMap<String, Vec<String>>>,
    gesture: Option<GestureToml>,
}

/// Parses `input.toml`. Bad entries are reported and skipped; the rest still loads.
pub fn parse_input_toml(raw: &str) -> ParsedInputConfig {
    let mut result = ParsedInputConfig::default();
    let root: RootToml = match toml::from_str(raw) {
        Ok(r) => r,
        Err(e) => {
            result.errors.push(format!("Top-level parse: {e}"));
            return result;
        }
    };

    let mut input_map = InputMap::default();
    // sorted so error order is stable
    let mut entries: Vec<(String, Vec<String>)> =
        root.bindings.unwrap_or_default().into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    for (name, specs) in entries {
        let Some(action) = Action::from_name(&name) else {
            result
                .errors
                .push(format!("Binding references unknown action '{name}'"));
            continue;
        };
        for spec in specs {
            match parse_token(spec.trim()) {
                Ok(token) => input_map.bind(action, token),
                Err(err) => result.errors.push(format!("[binding {name} '{spec}'] {err}")),
            }
        }
    }

    if let Some(g) = root.gesture {
        let defaults = GestureConfig::default();
        input_map.gesture_cfg = GestureConfig {
            swipe_min_distance: g.swipe_min_distance.unwrap_or(defaults.swipe_min_distance),
            tap_max_move: g.tap_max_move.unwrap_or(defaults.tap_max_move),
        };
    }
    result.input_map = input_map;
    result
}

fn parse_token(s: &str) -> Result<RawBindingToken, String> {
    if let Some(rest) = s.strip_prefix("Key:") {
        return parse_keycode(rest).map(RawBindingToken::Key);
    }
    if let Some(rest) = s.strip_prefix("Touch:") {
        let g = match rest {
            "SwipeLeft" => Gesture::SwipeLeft,
            "SwipeRight" => Gesture::SwipeRight,
            "SwipeUp" => Gesture::SwipeUp,
            "SwipeDown" => Gesture::SwipeDown,
            "Tap" => Gesture::Tap,
            other => return Err(format!("Unknown touch gesture '{other}'")),
        };
        return Ok(RawBindingToken::Touch(g));
    }
    Err(format!("Unrecognized token '{s}'"))
}

fn parse_keycode(name: &str) -> Result<KeyCode, String> {
    let kc = match name {
        "ArrowLeft" => KeyCode::ArrowLeft,
        "ArrowRight" => KeyCode::ArrowRight,
        "ArrowUp" => KeyCode::ArrowUp,
        "ArrowDown" => KeyCode::ArrowDown,
        "Space" => KeyCode::Space,
        "Enter" => KeyCode::Enter,
        "Escape" => KeyCode::Escape,
        "Backspace" => KeyCode::Backspace,
        "Tab" => KeyCode::Tab,
        "ShiftLeft" => KeyCode::ShiftLeft,
        "ControlLeft" => KeyCode::ControlLeft,
        "F1" => KeyCode::F1,
        "F2" => KeyCode::F2,
        "F3" => KeyCode::F3,
        "F4" => KeyCode::F4,
        "A" | "KeyA" => KeyCode::KeyA,
        "B" | "KeyB" => KeyCode::KeyB,
        "C" | "KeyC" => KeyCode::KeyC,
        "D" | "KeyD" => KeyCode::KeyD,
        "E" | "KeyE" => KeyCode::KeyE,
        "M" | "KeyM" => KeyCode::KeyM,
        "N" | "KeyN" => KeyCode::KeyN,
        "P" | "KeyP" => KeyCode::KeyP,
        "Q" | "KeyQ" => KeyCode::KeyQ,
        "R" | "KeyR" => KeyCode::KeyR,
        "S" | "KeyS" => KeyCode::KeyS,
        "W" | "KeyW" => KeyCode::KeyW,
        other => return Err(format!("Unsupported KeyCode '{other}' (extend parser)")),
    };
    Ok(kc)
}

/// Bindings used when no `input.toml` can be read.
pub fn default_input_map() -> InputMap {
    parse_input_toml(DEFAULT_INPUT_TOML).input_map
}

pub const DEFAULT_INPUT_TOML: &str = r#"
[bindings]
MoveLeft = ["Key:ArrowLeft", "Touch:SwipeLeft"]
MoveRight = ["Key:ArrowRight", "Touch:SwipeRight"]
Jump = ["Key:ArrowUp", "Key:Space", "Touch:SwipeUp"]
Slide = ["Key:ArrowDown", "Touch:SwipeDown"]
Pause = ["Key:Escape"]
Confirm = ["Key:Enter", "Key:Space", "Touch:Tap"]
Menu = ["Key:KeyM"]
ToggleSound = ["Key:KeyN"]
ToggleMusic = ["Key:KeyB"]

[gesture]
swipe_min_distance = 50.0
tap_max_move = 12.0
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_parse_cleanly() {
        let parsed = parse_input_toml(DEFAULT_INPUT_TOML);
        assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
        let jump: Vec<Action> = parsed
            .input_map
            .actions_for(RawBindingToken::Key(KeyCode::Space))
            .collect();
        assert_eq!(jump, vec![Action::Jump, Action::Confirm]);
    }

    #[test]
    fn bad_entries_are_reported_and_skipped() {
        let raw = r#"
[bindings]
Jump = ["Key:ArrowUp", "Key:Hyperspace"]
Fly = ["Key:KeyW"]
Slide = ["Touch:Pinch", "Mouse:Left"]
"#;
        let parsed = parse_input_toml(raw);
        assert_eq!(parsed.errors.len(), 4, "{:?}", parsed.errors);
        assert_eq!(
            parsed.input_map.actions_for(RawBindingToken::Key(KeyCode::ArrowUp)).count(),
            1
        );
        assert!(parsed.input_map.bindings.get(&Action::Slide).is_none());
    }

    #[test]
    fn garbage_is_a_top_level_error() {
        let parsed = parse_input_toml("[[[ nope");
        assert_eq!(parsed.errors.len(), 1);
        assert!(parsed.input_map.bindings.is_empty());
    }
}
