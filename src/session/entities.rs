use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::GameState;
use crate::camera::LatestCameraFrame;
use crate::checkpoints::{CheckpointReached, MissionComplete};

/// Ask for a fresh run from the spawn point.
#[derive(Message, Clone, Copy, Debug, Default)]
pub struct RestartRequested;

/// Everything a session tick publishes to the rest of the app.
#[derive(SystemParam)]
pub struct TickOutputs<'w> {
    pub(super) camera: ResMut<'w, LatestCameraFrame>,
    pub(super) reached: MessageWriter<'w, CheckpointReached>,
    pub(super) complete: MessageWriter<'w, MissionComplete>,
    pub(super) next_state: ResMut<'w, NextState<GameState>>,
}
