//! One drone session: flight, checkpoints and camera advanced together.
//!
//! Frame order is fixed: write the body from intent, read the body back,
//! evaluate checkpoints, then place the camera from the same position.

use bevy::prelude::*;

use crate::camera::{CameraFrame, CameraMode, CameraRig, RigTuning};
use crate::checkpoints::course::{CheckpointEvent, CheckpointSet};
use crate::controls::{ControlIntent, DeviceClass};
use crate::drone::flight::{FlightIntegrator, FlightState, FlightTuning, PhysicsBody};

/// Everything one frame produced for the presentation layer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// Checkpoints that became reached this frame.
    pub reached: Vec<CheckpointEvent>,
    /// Set when the goal was among `reached`.
    pub mission_complete: bool,
    /// New camera mode if it flipped this frame.
    pub camera_mode_changed: Option<CameraMode>,
    /// Camera placement to apply.
    pub camera: Option<CameraFrame>,
}

/// Session-owned game state; the ECS layer only feeds it and applies results.
#[derive(Resource)]
pub struct SessionState {
    flight: FlightIntegrator,
    checkpoints: CheckpointSet,
    rig: CameraRig,
    layout_name: &'static str,
    device: DeviceClass,
}

impl SessionState {
    pub fn new(
        flight: FlightIntegrator,
        checkpoints: CheckpointSet,
        rig: CameraRig,
        layout_name: &'static str,
        device: DeviceClass,
    ) -> Self {
        Self {
            flight,
            checkpoints,
            rig,
            layout_name,
            device,
        }
    }

    pub fn flight(&self) -> &FlightState {
        self.flight.state()
    }

    pub fn checkpoints(&self) -> &CheckpointSet {
        &self.checkpoints
    }

    pub fn layout_name(&self) -> &'static str {
        self.layout_name
    }

    pub fn tuning(&self) -> &FlightTuning {
        self.flight.tuning()
    }

    /// Applies `device` presets to flight and camera. Returns `false`, and
    /// leaves speed alone, when the session already runs on `device`.
    pub fn retune(
        &mut self,
        device: DeviceClass,
        flight: FlightTuning,
        rig: RigTuning,
    ) -> bool {
        if device == self.device {
            return false;
        }
        self.device = device;
        self.flight.set_tuning(flight);
        self.rig.set_tuning(rig);
        true
    }

    /// Runs one frame. A missing body skips the frame entirely.
    pub fn tick<B: PhysicsBody + ?Sized>(
        &mut self,
        intent: &ControlIntent,
        dt: f32,
        body: Option<&mut B>,
    ) -> TickReport {
        let Some(body) = body else {
            return TickReport::default();
        };
        let Some(outcome) = self.flight.tick(intent, dt, Some(&mut *body)) else {
            return TickReport::default();
        };

        let state = self.flight.state();
        let position = state.position;
        let reached = self.checkpoints.check_all(position);
        let mission_complete = reached.iter().any(CheckpointEvent::completes_mission);
        let camera = self
            .rig
            .update(Some(position), state.yaw, state.camera_mode, dt);

        TickReport {
            reached,
            mission_complete,
            camera_mode_changed: outcome.camera_mode_changed,
            camera,
        }
    }

    /// Places the camera without flying, e.g. while an overlay is up.
    pub fn frame_idle(&mut self, dt: f32) -> Option<CameraFrame> {
        let state = self.flight.state();
        self.rig
            .update(Some(state.position), state.yaw, state.camera_mode, dt)
    }

    /// Back to spawn with every checkpoint cleared.
    pub fn restart<B: PhysicsBody + ?Sized>(&mut self, body: Option<&mut B>) {
        self.flight.reset(body);
        self.checkpoints.reset_all();
        self.rig.reset();
    }
}
