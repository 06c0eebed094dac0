use avian3d::prelude::*;
use bevy::prelude::*;

use super::entities::{RestartRequested, TickOutputs};
use super::state::SessionState;
use crate::GameState;
use crate::camera::{CameraConfig, CameraRig, LatestCameraFrame};
use crate::checkpoints::course::{self, CheckpointSet};
use crate::checkpoints::{CheckpointConfig, CheckpointReached, MissionComplete};
use crate::controls::{ActiveDevice, ControlIntent};
use crate::drone::flight::FlightIntegrator;
use crate::drone::{Drone, DroneBody, DroneBodyQuery, DroneConfig};

/// Picks the course layout and builds the [`SessionState`].
pub fn start_session(
    mut commands: Commands,
    drone: Res<DroneConfig>,
    camera: Res<CameraConfig>,
    checkpoints: Res<CheckpointConfig>,
    device: Res<ActiveDevice>,
) {
    let mut pool = course::layout_pool();
    if let Some(pinned) = checkpoints.pinned_layout
        && pinned >= pool.len()
    {
        warn!(
            "Layout {pinned} does not exist ({} available); picking one at random",
            pool.len()
        );
    }
    let Some(index) = course::choose_layout(pool.len(), checkpoints.pinned_layout, &mut rand::rng())
    else {
        warn!("No course layouts available; session not started");
        return;
    };
    let layout = pool.swap_remove(index);

    let flight = FlightIntegrator::new(
        drone.spawn,
        drone.tuning_for(device.class),
        drone.initial_camera_mode,
    );
    let rig = CameraRig::new(camera.tuning_for(device.class));
    info!(
        "Session started on '{}' with {} checkpoints ({:?} controls)",
        layout.name,
        layout.checkpoints.len(),
        device.class
    );
    commands.insert_resource(SessionState::new(
        flight,
        CheckpointSet::new(layout.checkpoints),
        rig,
        layout.name,
        device.class,
    ));
}

/// `true` only on the first of a run of frames without a body.
fn first_miss(reported: &mut bool, missing: bool) -> bool {
    let first = missing && !*reported;
    *reported = missing;
    first
}

/// One flying frame: intent in, body written and read back, results out.
pub fn run_session_tick(
    time: Res<Time>,
    intent: Res<ControlIntent>,
    mut session: ResMut<SessionState>,
    mut bodies: DroneBodyQuery,
    mut out: TickOutputs,
    mut reported_missing: Local<bool>,
) {
    let mut body = DroneBody::from_query(&mut bodies);
    if first_miss(&mut reported_missing, body.is_none()) {
        debug!("Drone body not spawned yet; skipping ticks");
    }
    let report = session.tick(&intent, time.delta_secs(), body.as_mut());

    if let Some(mode) = report.camera_mode_changed {
        info!("Camera mode: {}", mode.label());
    }
    for event in &report.reached {
        info!("Checkpoint '{}' reached", event.id);
        out.reached.write(CheckpointReached {
            id: event.id.clone(),
            heading: event.heading.clone(),
            kind: event.kind,
        });
    }
    if report.mission_complete {
        let heading = report
            .reached
            .iter()
            .find(|event| event.completes_mission())
            .map(|event| event.heading.clone())
            .unwrap_or_default();
        info!("Mission complete on '{}'", session.layout_name());
        out.complete.write(MissionComplete { heading });
        out.next_state.set(GameState::Complete);
    }
    if report.camera.is_some() {
        out.camera.0 = report.camera;
    }
}

/// Keeps the camera on the drone while no flying happens.
pub fn frame_idle(
    time: Res<Time>,
    mut session: ResMut<SessionState>,
    mut latest: ResMut<LatestCameraFrame>,
) {
    if let Some(frame) = session.frame_idle(time.delta_secs()) {
        latest.0 = Some(frame);
    }
}

/// Stops the body so it does not drift while an overlay is shown.
pub fn halt_drone(mut query: Query<&mut LinearVelocity, With<Drone>>) {
    let Ok(mut velocity) = query.single_mut() else {
        return;
    };
    velocity.0 = Vec3::ZERO;
}

/// Swaps flight and camera presets when the device class changes.
pub fn retune_on_device_change(
    device: Res<ActiveDevice>,
    drone: Res<DroneConfig>,
    camera: Res<CameraConfig>,
    mut session: ResMut<SessionState>,
) {
    let class = device.class;
    if session.retune(class, drone.tuning_for(class), camera.tuning_for(class)) {
        info!("Session tuned for {class:?}");
    }
}

/// Back to spawn with every checkpoint cleared, then to the start overlay.
pub fn handle_restart(
    mut requests: MessageReader<RestartRequested>,
    mut session: ResMut<SessionState>,
    mut bodies: DroneBodyQuery,
    mut latest: ResMut<LatestCameraFrame>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if requests.read().count() == 0 {
        return;
    }
    let mut body = DroneBody::from_query(&mut bodies);
    session.restart(body.as_mut());
    latest.0 = None;
    next_state.set(GameState::Start);
    info!("Session restarted on '{}'", session.layout_name());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_body_is_reported_once_per_outage() {
        let mut reported = false;
        let seen: Vec<bool> = [true, true, true, false, true, true]
            .into_iter()
            .map(|missing| first_miss(&mut reported, missing))
            .collect();
        assert_eq!(seen, [true, false, false, false, true, false]);
    }
}
