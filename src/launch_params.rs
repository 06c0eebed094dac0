//! Launch parameter parsing.
//!
//! With the `native` feature, parameters come from command-line arguments via
//! clap. Otherwise (web builds) the defaults are used.

use bevy::prelude::*;

use crate::camera::CameraMode;
use crate::checkpoints::CheckpointConfig;
use crate::city::CityConfig;
use crate::controls::{ControlsConfig, DeviceClass};
use crate::drone::DroneConfig;

/// Which control presets to start with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "native", derive(clap::ValueEnum))]
pub enum DeviceChoice {
    /// Desktop presets, switching to touch on the first touch.
    #[default]
    Auto,
    Desktop,
    Touch,
}

/// Launch parameters for the game.
#[derive(Debug, Default)]
pub struct LaunchParams {
    pub device: DeviceChoice,
    /// Pinned course layout index.
    pub layout: Option<usize>,
    /// Start in first-person view.
    pub first_person: bool,
    /// City height noise seed.
    pub seed: Option<u32>,
}

impl LaunchParams {
    pub fn controls(&self) -> ControlsConfig {
        let (device, auto_detect_touch) = match self.device {
            DeviceChoice::Auto => (DeviceClass::Desktop, true),
            DeviceChoice::Desktop => (DeviceClass::Desktop, false),
            DeviceChoice::Touch => (DeviceClass::Touch, false),
        };
        ControlsConfig {
            device,
            auto_detect_touch,
            ..default()
        }
    }

    pub fn drone(&self) -> DroneConfig {
        let initial_camera_mode = if self.first_person {
            CameraMode::FirstPerson
        } else {
            CameraMode::Chase
        };
        DroneConfig {
            initial_camera_mode,
            ..default()
        }
    }

    pub fn checkpoints(&self) -> CheckpointConfig {
        CheckpointConfig {
            pinned_layout: self.layout,
            ..default()
        }
    }

    pub fn city(&self) -> CityConfig {
        let defaults = CityConfig::default();
        CityConfig {
            seed: self.seed.unwrap_or(defaults.seed),
            ..defaults
        }
    }
}

#[cfg(feature = "native")]
mod native {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    #[command(about = "Fly a delivery drone through a city checkpoint course")]
    struct CliArgs {
        /// Control presets: auto switches to touch on the first touch.
        #[arg(long, value_enum, default_value_t = DeviceChoice::default())]
        device: DeviceChoice,

        /// Course layout index (random when omitted or out of range).
        #[arg(long)]
        layout: Option<usize>,

        /// Start in first-person view.
        #[arg(long)]
        first_person: bool,

        /// City building height seed.
        #[arg(long)]
        seed: Option<u32>,
    }

    pub fn parse() -> LaunchParams {
        let args = CliArgs::parse();
        LaunchParams {
            device: args.device,
            layout: args.layout,
            first_person: args.first_person,
            seed: args.seed,
        }
    }
}

/// Parse launch parameters from CLI args (native) or use defaults.
pub fn parse() -> LaunchParams {
    #[cfg(feature = "native")]
    {
        native::parse()
    }
    #[cfg(not(feature = "native"))]
    {
        LaunchParams::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_auto_detect_on_desktop() {
        let params = LaunchParams::default();
        let controls = params.controls();
        assert_eq!(controls.device, DeviceClass::Desktop);
        assert!(controls.auto_detect_touch);
        assert_eq!(params.drone().initial_camera_mode, CameraMode::Chase);
        assert_eq!(params.checkpoints().pinned_layout, None);
        assert_eq!(params.city().seed, CityConfig::default().seed);
    }

    #[test]
    fn explicit_device_disables_auto_detect() {
        let params = LaunchParams {
            device: DeviceChoice::Touch,
            ..default()
        };
        let controls = params.controls();
        assert_eq!(controls.device, DeviceClass::Touch);
        assert!(!controls.auto_detect_touch);
    }

    #[test]
    fn flags_flow_into_configs() {
        let params = LaunchParams {
            layout: Some(1),
            first_person: true,
            seed: Some(7),
            ..default()
        };
        assert_eq!(params.drone().initial_camera_mode, CameraMode::FirstPerson);
        assert_eq!(params.checkpoints().pinned_layout, Some(1));
        assert_eq!(params.city().seed, 7);
    }
}
