//! Procedural spiral galaxy point clouds.
//!
//! [`generate`] turns a [`GalaxyParameters`] set into index-aligned position and color
//! buffers. Nothing here touches the renderer; the caller decides how the buffers reach the GPU.
mod generate;
mod parameters;

pub use generate::{
    GalaxyBuffers, branch_angle, generate, generate_seeded, lerp_color, perturbation,
};
pub use parameters::GalaxyParameters;
