//! Radial noise deformation driven by band offsets.

use crate::error::{PipelineError, Result};
use crate::noise::NoiseField;

use super::mesh::SphereMesh;

/// Displace every vertex of `mesh` along its base direction.
///
/// For base direction `d`:
/// `distance = (base_radius + bass_offset) + noise(d) * amplitude * treble_offset`
///
/// Distances are always computed from the stored base directions, so
/// repeated calls never accumulate. All distances are validated before the
/// mesh is written; on error the mesh keeps its previous positions. On
/// success the mesh is flagged for normal recomputation.
pub fn deform<N: NoiseField + ?Sized>(
    mesh: &mut SphereMesh,
    bass_offset: f32,
    treble_offset: f32,
    noise: &N,
    amplitude: f32,
) -> Result<()> {
    for (name, value) in [
        ("bass offset", bass_offset),
        ("treble offset", treble_offset),
        ("amplitude", amplitude),
    ] {
        if !value.is_finite() {
            return Err(PipelineError::InvalidInput(format!(
                "{} must be finite, got {}",
                name, value
            )));
        }
    }

    let radius = mesh.base_radius() + bass_offset;
    let displacement = amplitude * treble_offset;

    let distances = mesh
        .base_directions()
        .iter()
        .enumerate()
        .map(|(index, d)| {
            let n = noise.sample_3d(d.x, d.y, d.z);
            let distance = radius + n * displacement;
            if distance.is_finite() {
                Ok(distance)
            } else {
                Err(PipelineError::InvalidInput(format!(
                    "non-finite distance {} at vertex {}",
                    distance, index
                )))
            }
        })
        .collect::<Result<Vec<f32>>>()?;

    mesh.set_distances(&distances);
    Ok(())
}
