#![warn(missing_docs)]
//! Drone courier: fly a package through a city checkpoint course.
//!
//! Keyboard and touch input drive a physics-backed drone. A chase or
//! first-person camera follows it, and egui overlays report checkpoints and
//! the final delivery.

mod camera;
mod checkpoints;
mod city;
mod controls;
mod drone;
mod hud;
mod launch_params;
pub mod math;
mod session;

use bevy::app::AppExit;
use bevy::prelude::*;
#[cfg(feature = "native")]
use bevy::remote::{RemotePlugin, http::RemoteHttpPlugin};
use bevy_inspector_egui::quick::WorldInspectorPlugin;

/// Application-wide game state, used for system scheduling.
#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash, Reflect)]
pub enum GameState {
    /// Start overlay up, drone idle.
    #[default]
    Start,
    /// Controls and the session tick run.
    Flying,
    /// Goal reached; end overlay up.
    Complete,
    /// World inspector open (Tab to toggle).
    Debugging,
}

fn main() {
    let params = launch_params::parse();

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Drone Courier".into(),
            ..default()
        }),
        ..default()
    }))
    .register_type::<GameState>()
    .init_state::<GameState>()
    .add_plugins(bevy_egui::EguiPlugin::default())
    .add_plugins(controls::ControlsPlugin(params.controls()))
    .add_plugins(drone::DronePlugin(params.drone()))
    .add_plugins(camera::CameraRigPlugin(camera::CameraConfig::default()))
    .add_plugins(checkpoints::CheckpointPlugin(params.checkpoints()))
    .add_plugins(session::SessionPlugin)
    .add_plugins(city::CityPlugin(params.city()))
    .add_plugins(hud::HudPlugin(hud::HudConfig::default()))
    .add_systems(Update, exit_on_esc)
    .add_systems(Update, toggle_inspector)
    .add_plugins(WorldInspectorPlugin::new().run_if(in_state(GameState::Debugging)));

    #[cfg(feature = "native")]
    app.add_plugins(RemotePlugin::default())
        .add_plugins(RemoteHttpPlugin::default());

    info!("Launch parameters: {params:?}");
    app.run();
}

fn toggle_inspector(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<GameState>>,
    mut next: ResMut<NextState<GameState>>,
) {
    if keys.just_pressed(KeyCode::Tab) {
        let new_state = match state.get() {
            GameState::Flying => GameState::Debugging,
            GameState::Debugging => GameState::Flying,
            _ => return,
        };
        debug!("Switching to {new_state:?}");
        next.set(new_state);
    }
}

fn exit_on_esc(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
