//! Per-frame orchestration of one delivery run.
//!
//! [`SessionState`] owns the flight integrator, the checkpoint set and the
//! camera rig. The systems here feed it the frame's intent and the drone
//! body, then fan its report out as messages, camera placement and state
//! transitions.

mod entities;
mod state;
mod systems;

pub use entities::RestartRequested;
pub use state::SessionState;

use bevy::prelude::*;

use crate::GameState;
use crate::controls::{ActiveDevice, GatherIntent};

/// System set that advances the session and publishes the camera frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionTick;

/// Session lifecycle: start, tick, halt, restart.
pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<RestartRequested>()
            .configure_sets(Update, SessionTick.after(GatherIntent))
            .add_systems(Startup, systems::start_session)
            .add_systems(
                Update,
                (
                    systems::run_session_tick.run_if(in_state(GameState::Flying)),
                    systems::frame_idle.run_if(not(in_state(GameState::Flying))),
                )
                    .in_set(SessionTick)
                    .run_if(resource_exists::<SessionState>),
            )
            .add_systems(
                Update,
                (
                    systems::retune_on_device_change.run_if(resource_changed::<ActiveDevice>),
                    systems::handle_restart,
                )
                    .before(SessionTick)
                    .run_if(resource_exists::<SessionState>),
            )
            .add_systems(OnExit(GameState::Flying), systems::halt_drone);
    }
}
