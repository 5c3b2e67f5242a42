//! Central system ordering labels to make the per-frame sequence explicit.
//! Stages (high-level, all in `Update`):
//! 1. InputCollect (keyboard / touch -> command set)
//! 2. Simulation (one session tick; collaborator requests land in the outbox)
//! 3. Presentation (outbox -> entities, transforms, audio, screens)
//! 4. Hud (text refresh)
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct InputCollectSet;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct SimulationSet;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PresentationSet;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct HudSet;
