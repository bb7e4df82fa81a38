use crate::GalaxyParameters;
use bevy::color::LinearRgba;
use bevy::math::Vec3;
use rand::{Rng, SeedableRng, rngs::StdRng};
use rayon::prelude::*;
use std::f32::consts::TAU;

// Particles per rng stream. Fixed so the output for a seed never depends on the thread count.
const CHUNK_SIZE: usize = 4096;

/// Index-aligned particle data: particle `i` is `positions[i]` / `colors[i]`.
///
/// Colors are linear RGB.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GalaxyBuffers {
    pub positions: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 3]>,
}

impl GalaxyBuffers {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// `x, y, z` triples laid out back to back, `3 * len()` floats.
    pub fn flat_positions(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// `r, g, b` triples laid out back to back, `3 * len()` floats.
    pub fn flat_colors(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }
}

/// Generates a galaxy, using `params.seed` when set and a fresh random seed otherwise.
pub fn generate(params: &GalaxyParameters) -> GalaxyBuffers {
    let seed = params.seed.unwrap_or_else(rand::random);
    generate_seeded(params, seed)
}

/// Generates a galaxy from an explicit seed. Same parameters and seed give bit-identical buffers.
pub fn generate_seeded(params: &GalaxyParameters, seed: u64) -> GalaxyBuffers {
    let count = params.count as usize;
    let mut positions = vec![[0.0; 3]; count];
    let mut colors = vec![[0.0; 3]; count];

    let inside = LinearRgba::from(params.inside_color);
    let outside = LinearRgba::from(params.outside_color);

    positions
        .par_chunks_mut(CHUNK_SIZE)
        .zip(colors.par_chunks_mut(CHUNK_SIZE))
        .enumerate()
        .for_each(|(chunk_index, (positions, colors))| {
            let mut rng = StdRng::seed_from_u64(chunk_seed(seed, chunk_index));
            let first = chunk_index * CHUNK_SIZE;

            for (offset, (position, color)) in positions.iter_mut().zip(colors.iter_mut()).enumerate()
            {
                let radius = rng.random::<f32>() * params.radius;
                let angle = branch_angle(first + offset, params.branches) + radius * params.spin;

                let scatter = Vec3::new(
                    perturbation(rng.random(), rng.random_bool(0.5), radius, params),
                    perturbation(rng.random(), rng.random_bool(0.5), radius, params),
                    perturbation(rng.random(), rng.random_bool(0.5), radius, params),
                );

                *position = (Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius) + scatter)
                    .to_array();

                let t = if params.radius > 0.0 {
                    radius / params.radius
                } else {
                    0.0
                };
                *color = lerp_color(inside, outside, t);
            }
        });

    GalaxyBuffers { positions, colors }
}

fn chunk_seed(seed: u64, chunk_index: usize) -> u64 {
    seed ^ (chunk_index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Angle of the arm that particle `index` belongs to. Zero branches count as one.
pub fn branch_angle(index: usize, branches: u32) -> f32 {
    let branches = branches.max(1);
    TAU * (index % branches as usize) as f32 / branches as f32
}

/// Offset along one axis for a particle at `radius` from the center.
///
/// `base` is a uniform draw in `[0, 1)`; raising it to `randomness_power` pulls most particles
/// toward the arm centerline.
pub fn perturbation(base: f32, negative: bool, radius: f32, params: &GalaxyParameters) -> f32 {
    let sign = if negative { -1.0 } else { 1.0 };
    base.powf(params.randomness_power) * sign * params.randomness * radius
}

pub fn lerp_color(inside: LinearRgba, outside: LinearRgba, t: f32) -> [f32; 3] {
    [
        inside.red + t * (outside.red - inside.red),
        inside.green + t * (outside.green - inside.green),
        inside.blue + t * (outside.blue - inside.blue),
    ]
}
