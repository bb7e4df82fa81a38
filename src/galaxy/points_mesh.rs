use bevy::{
    prelude::*,
    render::{
        mesh::{Indices, PrimitiveTopology},
        render_asset::RenderAssetUsages,
    },
};
use galaxy_points::GalaxyBuffers;
use rayon::prelude::*;

// Billboard corners, expanded in view space by the point material.
const CORNERS: [[f32; 2]; 4] = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Builds one mesh holding a quad per particle.
///
/// All four vertices of a quad carry the particle center and color; UV0 holds the corner.
pub fn build_points_mesh(buffers: &GalaxyBuffers) -> Mesh {
    let count = buffers.len();

    let mut positions = vec![[0.0f32; 3]; count * 4];
    let mut colors = vec![[0.0f32; 4]; count * 4];
    let mut indices = vec![0u32; count * 6];

    positions
        .par_chunks_exact_mut(4)
        .zip(buffers.positions.par_iter())
        .for_each(|(quad, center)| quad.fill(*center));

    colors
        .par_chunks_exact_mut(4)
        .zip(buffers.colors.par_iter())
        .for_each(|(quad, &[r, g, b])| quad.fill([r, g, b, 1.0]));

    indices
        .par_chunks_exact_mut(6)
        .enumerate()
        .for_each(|(i, quad)| {
            let base = (i * 4) as u32;
            for (index, offset) in quad.iter_mut().zip(QUAD_INDICES) {
                *index = base + offset;
            }
        });

    let corners: Vec<[f32; 2]> = CORNERS.iter().copied().cycle().take(count * 4).collect();

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, corners)
    .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors)
    .with_inserted_indices(Indices::U32(indices))
}
