use bevy::prelude::*;
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

use super::CityConfig;
use crate::math;

/// One building: footprint centre on the ground plane and its height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lot {
    pub center: Vec2,
    pub height: f32,
}

/// Building lots for the configured grid, skipping any lot whose footprint
/// comes within `cfg.clearance` of a point in `keep_clear` (XZ only).
pub fn building_lots(cfg: &CityConfig, keep_clear: &[Vec3]) -> Vec<Lot> {
    let fbm: Fbm<Perlin> = Fbm::new(cfg.seed).set_octaves(cfg.noise_octaves);
    let n = cfg.blocks_per_side;
    let reach = cfg.footprint * std::f32::consts::FRAC_1_SQRT_2 + cfg.clearance;

    let mut lots = Vec::new();
    for ix in -n..=n {
        for iz in -n..=n {
            let center = Vec2::new(ix as f32, iz as f32) * cfg.block_spacing;
            let blocked = keep_clear
                .iter()
                .any(|p| p.xz().distance_squared(center) < reach * reach);
            if blocked {
                continue;
            }
            let noise_val = fbm.get([
                center.x as f64 / cfg.noise_scale,
                center.y as f64 / cfg.noise_scale,
            ]);
            lots.push(Lot {
                center,
                height: math::map_noise_to_range(noise_val, cfg.min_height, cfg.max_height),
            });
        }
    }
    lots
}
