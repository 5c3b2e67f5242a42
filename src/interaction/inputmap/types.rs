use bevy::prelude::*;
use smallvec::SmallVec;
use std::collections::HashMap;

use crate::gameplay::{Command, FrameCommands};

/// Everything a binding can trigger. The first five map onto session commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    Slide,
    Pause,
    Confirm,
    Menu,
    ToggleSound,
    ToggleMusic,
}

impl Action {
    pub const ALL: [Action; 9] = [
        Self::MoveLeft,
        Self::MoveRight,
        Self::Jump,
        Self::Slide,
        Self::Pause,
        Self::Confirm,
        Self::Menu,
        Self::ToggleSound,
        Self::ToggleMusic,
    ];

    /// PascalCase name as written in `input.toml`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::MoveLeft => "MoveLeft",
            Self::MoveRight => "MoveRight",
            Self::Jump => "Jump",
            Self::Slide => "Slide",
            Self::Pause => "Pause",
            Self::Confirm => "Confirm",
            Self::Menu => "Menu",
            Self::ToggleSound => "ToggleSound",
            Self::ToggleMusic => "ToggleMusic",
        }
    }

    pub fn command(self) -> Option<Command> {
        match self {
            Self::MoveLeft => Some(Command::MoveLeft),
            Self::MoveRight => Some(Command::MoveRight),
            Self::Jump => Some(Command::Jump),
            Self::Slide => Some(Command::Slide),
            Self::Pause => Some(Command::Pause),
            _ => None,
        }
    }

    fn bit(self) -> u16 {
        1 << self as u16
    }
}

/// Actions triggered this frame. Rebuilt every frame, so each action fires at most once.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameActions(u16);

impl FrameActions {
    pub fn insert(&mut self, action: Action) {
        self.0 |= action.bit();
    }
    pub fn contains(&self, action: Action) -> bool {
        self.0 & action.bit() != 0
    }
    pub fn clear(&mut self) {
        self.0 = 0;
    }
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        Action::ALL.into_iter().filter(|a| self.contains(*a))
    }
    /// The session-facing subset.
    pub fn commands(&self) -> FrameCommands {
        self.iter().filter_map(Action::command).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    SwipeLeft,
    SwipeRight,
    SwipeUp,
    SwipeDown,
    Tap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawBindingToken {
    Key(KeyCode),
    Touch(Gesture),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GestureConfig {
    /// Minimum travel (logical px) along the dominant axis for a swipe.
    pub swipe_min_distance: f32,
    /// Maximum travel for a touch to count as a tap.
    pub tap_max_move: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            swipe_min_distance: 50.0,
            tap_max_move: 12.0,
        }
    }
}

impl GestureConfig {
    /// Classifies a finished touch by its start-to-end delta (screen space, +y down).
    /// Ties between axes resolve vertically; short or ambiguous strokes yield nothing.
    pub fn classify(&self, delta: Vec2) -> Option<Gesture> {
        if delta.length() <= self.tap_max_move {
            return Some(Gesture::Tap);
        }
        if delta.x.abs() > delta.y.abs() {
            if delta.x > self.swipe_min_distance {
                Some(Gesture::SwipeRight)
            } else if delta.x < -self.swipe_min_distance {
                Some(Gesture::SwipeLeft)
            } else {
                None
            }
        } else if delta.y < -self.swipe_min_distance {
            Some(Gesture::SwipeUp)
        } else if delta.y > self.swipe_min_distance {
            Some(Gesture::SwipeDown)
        } else {
            None
        }
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct InputMap {
    pub bindings: HashMap<Action, SmallVec<[RawBindingToken; 4]>>,
    pub gesture_cfg: GestureConfig,
}

impl InputMap {
    pub fn bind(&mut self, action: Action, token: RawBindingToken) {
        let list = self.bindings.entry(action).or_default();
        if !list.contains(&token) {
            list.push(token);
        }
    }

    /// Actions bound to `token`, in [`Action::ALL`] order.
    pub fn actions_for(&self, token: RawBindingToken) -> impl Iterator<Item = Action> + '_ {
        Action::ALL
            .into_iter()
            .filter(move |a| self.bindings.get(a).is_some_and(|l| l.contains(&token)))
    }

    pub fn keys(&self) -> impl Iterator<Item = (Action, KeyCode)> + '_ {
        self.bindings.iter().flat_map(|(action, tokens)| {
            tokens.iter().filter_map(move |t| match t {
                RawBindingToken::Key(k) => Some((*action, *k)),
                RawBindingToken::Touch(_) => None,
            })
        })
    }
}
