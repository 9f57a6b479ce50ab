//! UV sphere mesh that keeps its base directions apart from its deformed
//! positions.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use std::f32::consts::PI;

use crate::error::{PipelineError, Result};
use crate::params::SphereParams;

/// Vertex data uploaded to the GPU (position + normal)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Sphere mesh owned by the deformation pass and read by the renderer
pub struct SphereMesh {
    /// Unit directions of the undeformed sphere (never modified)
    directions: Vec<Vec3>,
    /// Current deformed positions
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    face_normals: Vec<Vec3>,
    indices: Vec<u32>,
    base_radius: f32,
    /// Set by deformation, cleared by `recompute_normals`
    normals_dirty: bool,
}

impl SphereMesh {
    /// Generate a UV sphere with every vertex at `params.radius`.
    ///
    /// Vertex grid is `(height_segments + 1) x (width_segments + 1)`; the
    /// seam column is duplicated and each pole is a row of coincident
    /// vertices.
    pub fn uv_sphere(params: &SphereParams) -> Self {
        let width = params.width_segments.max(3);
        let height = params.height_segments.max(2);

        let mut directions = Vec::with_capacity((width + 1) * (height + 1));
        let mut grid = Vec::with_capacity(height + 1);

        for iy in 0..=height {
            let v = iy as f32 / height as f32;
            let theta = v * PI;
            let mut row = Vec::with_capacity(width + 1);

            for ix in 0..=width {
                let u = ix as f32 / width as f32;
                let phi = u * 2.0 * PI;

                row.push(directions.len() as u32);
                directions.push(Vec3::new(
                    -phi.cos() * theta.sin(),
                    theta.cos(),
                    phi.sin() * theta.sin(),
                ));
            }
            grid.push(row);
        }

        // Counter-clockwise seen from outside; pole rows get one triangle per quad
        let mut indices = Vec::new();
        for iy in 0..height {
            for ix in 0..width {
                let a = grid[iy][ix + 1];
                let b = grid[iy][ix];
                let c = grid[iy + 1][ix];
                let d = grid[iy + 1][ix + 1];

                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != height - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Self::from_unit_directions(directions, indices, params.radius)
    }

    /// Build a mesh from arbitrary vertex positions.
    ///
    /// Positions are normalized into base directions and placed at
    /// `base_radius`. Fails with `DegenerateVertex` on a zero-length or
    /// non-finite position, and `InvalidInput` on an out-of-range index.
    pub fn from_positions(
        positions: &[Vec3],
        indices: Vec<u32>,
        base_radius: f32,
    ) -> Result<Self> {
        let mut directions = Vec::with_capacity(positions.len());
        for (index, position) in positions.iter().enumerate() {
            let direction = position
                .try_normalize()
                .ok_or(PipelineError::DegenerateVertex { index })?;
            directions.push(direction);
        }

        if indices.len() % 3 != 0 {
            return Err(PipelineError::InvalidInput(format!(
                "index count {} is not a multiple of 3",
                indices.len()
            )));
        }
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= positions.len()) {
            return Err(PipelineError::InvalidInput(format!(
                "index {} out of range for {} vertices",
                bad,
                positions.len()
            )));
        }

        Ok(Self::from_unit_directions(directions, indices, base_radius))
    }

    fn from_unit_directions(directions: Vec<Vec3>, indices: Vec<u32>, base_radius: f32) -> Self {
        let positions = directions.iter().map(|&d| d * base_radius).collect();

        let mut mesh = Self {
            normals: directions.clone(),
            face_normals: vec![Vec3::ZERO; indices.len() / 3],
            directions,
            positions,
            indices,
            base_radius,
            normals_dirty: true,
        };
        mesh.recompute_normals();
        mesh
    }

    pub fn base_radius(&self) -> f32 {
        self.base_radius
    }

    pub fn base_directions(&self) -> &[Vec3] {
        &self.directions
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn face_normals(&self) -> &[Vec3] {
        &self.face_normals
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.directions.len()
    }

    /// True after deformation until normals are recomputed
    pub fn needs_normal_update(&self) -> bool {
        self.normals_dirty
    }

    /// Place every vertex along its base direction at the given distance.
    ///
    /// `distances` must hold one value per vertex; this is checked by the
    /// deformation pass before calling.
    pub(crate) fn set_distances(&mut self, distances: &[f32]) {
        debug_assert_eq!(distances.len(), self.directions.len());

        for ((position, direction), &distance) in self
            .positions
            .iter_mut()
            .zip(&self.directions)
            .zip(distances)
        {
            *position = *direction * distance;
        }
        self.normals_dirty = true;
    }

    /// Recompute face normals and area-weighted vertex normals.
    ///
    /// Vertices not referenced by any face (or only by zero-area faces)
    /// fall back to their base direction.
    pub fn recompute_normals(&mut self) {
        self.normals.iter_mut().for_each(|n| *n = Vec3::ZERO);

        for (face, tri) in self.face_normals.iter_mut().zip(self.indices.chunks_exact(3)) {
            let i0 = tri[0] as usize;
            let i1 = tri[1] as usize;
            let i2 = tri[2] as usize;

            let p0 = self.positions[i0];
            let p1 = self.positions[i1];
            let p2 = self.positions[i2];

            // Unnormalized cross product: magnitude is twice the triangle area
            let weighted = (p1 - p0).cross(p2 - p0);
            self.normals[i0] += weighted;
            self.normals[i1] += weighted;
            self.normals[i2] += weighted;

            *face = weighted.normalize_or_zero();
        }

        for (normal, direction) in self.normals.iter_mut().zip(&self.directions) {
            *normal = normal.try_normalize().unwrap_or(*direction);
        }

        self.normals_dirty = false;
    }

    /// Interleaved GPU vertices (position + normal)
    pub fn gpu_vertices(&self) -> Vec<Vertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .map(|(p, n)| Vertex {
                position: p.to_array(),
                normal: n.to_array(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uv_sphere_creation() {
        let params = SphereParams::default();
        let mesh = SphereMesh::uv_sphere(&params);

        // Check vertex count: (width + 1) * (height + 1)
        assert_eq!(mesh.vertex_count(), 31 * 11);

        // Pole rows contribute one triangle per quad, other rows two
        let triangles = 30 * 2 + 30 * 2 * 8;
        assert_eq!(mesh.indices().len(), triangles * 3);
        assert_eq!(mesh.face_normals().len(), triangles);
    }

    #[test]
    fn test_new_sphere_sits_at_base_radius() {
        let mesh = SphereMesh::uv_sphere(&SphereParams::default());

        for (p, d) in mesh.positions().iter().zip(mesh.base_directions()) {
            assert!((d.length() - 1.0).abs() < 1e-5);
            assert!((p.length() - 10.0).abs() < 1e-4);
        }
        assert!(!mesh.needs_normal_update());
    }

    #[test]
    fn test_normals_point_outward() {
        let mesh = SphereMesh::uv_sphere(&SphereParams::default());

        for (n, d) in mesh.normals().iter().zip(mesh.base_directions()) {
            assert!((n.length() - 1.0).abs() < 1e-4);
            assert!(n.dot(*d) > 0.8, "normal {:?} not outward for {:?}", n, d);
        }

        for (tri, face) in mesh.indices().chunks_exact(3).zip(mesh.face_normals()) {
            let centroid = tri
                .iter()
                .map(|&i| mesh.positions()[i as usize])
                .sum::<Vec3>()
                / 3.0;
            assert!(face.dot(centroid) > 0.0);
        }
    }

    #[test]
    fn test_set_distances_marks_dirty_until_recompute() {
        let mut mesh = SphereMesh::uv_sphere(&SphereParams::default());
        let distances = vec![12.0; mesh.vertex_count()];

        mesh.set_distances(&distances);
        assert!(mesh.needs_normal_update());
        assert!((mesh.positions()[40].length() - 12.0).abs() < 1e-4);

        mesh.recompute_normals();
        assert!(!mesh.needs_normal_update());
    }

    #[test]
    fn test_from_positions_rejects_zero_vertex() {
        let positions = [Vec3::X, Vec3::ZERO, Vec3::Y];
        let result = SphereMesh::from_positions(&positions, vec![0, 1, 2], 1.0);
        assert_eq!(
            result.err(),
            Some(PipelineError::DegenerateVertex { index: 1 })
        );
    }

    #[test]
    fn test_from_positions_rejects_bad_indices() {
        let positions = [Vec3::X, Vec3::Y, Vec3::Z];
        assert!(SphereMesh::from_positions(&positions, vec![0, 1, 3], 1.0).is_err());
        assert!(SphereMesh::from_positions(&positions, vec![0, 1], 1.0).is_err());
    }

    #[test]
    fn test_from_positions_normalizes_to_base_radius() {
        let positions = [
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(0.0, 0.5, 0.0),
            Vec3::Z * 7.0,
        ];
        let mesh = SphereMesh::from_positions(&positions, vec![0, 1, 2], 2.0).unwrap();

        let expected = [Vec3::X, Vec3::Y, Vec3::Z];
        for ((d, p), e) in mesh
            .base_directions()
            .iter()
            .zip(mesh.positions())
            .zip(expected)
        {
            assert!(d.abs_diff_eq(e, 1e-6));
            assert!(p.abs_diff_eq(e * 2.0, 1e-6));
        }
    }

    #[test]
    fn test_gpu_vertices_match_positions() {
        let mesh = SphereMesh::uv_sphere(&SphereParams::default());
        let vertices = mesh.gpu_vertices();

        assert_eq!(vertices.len(), mesh.vertex_count());
        assert_eq!(vertices[5].position, mesh.positions()[5].to_array());
        assert_eq!(vertices[5].normal, mesh.normals()[5].to_array());
    }
}
