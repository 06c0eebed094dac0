//! Static city scene: ground, noise-height buildings, sun and sky colour.
//!
//! Purely visual apart from the static colliders. Lots near the spawn point
//! or any course checkpoint stay empty so every layout is flyable.

mod lots;
mod systems;

use bevy::prelude::*;

/// Per-plugin configuration for the city block grid.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct CityConfig {
    /// Seed for the building height noise.
    pub seed: u32,
    /// Lots per side, measured from the centre (`2n + 1` in total).
    pub blocks_per_side: i32,
    /// Distance between adjacent lot centres.
    pub block_spacing: f32,
    /// Building footprint edge length.
    pub footprint: f32,
    /// Octaves for the height noise.
    pub noise_octaves: usize,
    /// Spatial scale divisor for height noise sampling.
    pub noise_scale: f64,
    /// Shortest building.
    pub min_height: f32,
    /// Tallest building.
    pub max_height: f32,
    /// Horizontal distance kept free around spawn and checkpoints.
    pub clearance: f32,
    /// Ground plane edge length.
    pub ground_size: f32,
    pub ground_color: Color,
    pub building_color: Color,
    /// Background clear color.
    pub clear_color: Color,
    /// Sun illuminance (lux).
    pub sun_illuminance: f32,
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            blocks_per_side: 6,
            block_spacing: 8.0,
            footprint: 5.0,
            noise_octaves: 4,
            noise_scale: 30.0,
            min_height: 2.0,
            max_height: 14.0,
            clearance: 4.0,
            ground_size: 200.0,
            ground_color: Color::srgb(0.18, 0.2, 0.22),
            building_color: Color::srgb(0.55, 0.57, 0.62),
            clear_color: Color::srgb(0.53, 0.72, 0.9),
            sun_illuminance: 9000.0,
        }
    }
}

/// Ground, buildings and lighting.
pub struct CityPlugin(pub CityConfig);

impl Plugin for CityPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<CityConfig>()
            .insert_resource(self.0.clone())
            .insert_resource(ClearColor(self.0.clear_color))
            .add_systems(
                Startup,
                (
                    systems::spawn_ground,
                    systems::spawn_buildings,
                    systems::spawn_sun,
                ),
            );
    }
}
