//! Indexed triangle mesh as it appears in a scene description.
//!
//! A mesh is only a container: the renderer expands it into individual
//! triangles so the BVH can partition them.

use prism_math::Vec3;
use serde::Deserialize;

/// Vertex positions plus a flat index list where every 3 indices form a triangle.
#[derive(Clone, Debug, Deserialize)]
pub struct Mesh {
    /// Vertex positions (one Vec3 per vertex)
    #[serde(rename = "vertices")]
    pub positions: Vec<Vec3>,

    /// Triangle indices
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a new mesh from positions and indices.
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self { positions, indices }
    }

    /// Check that the index list is well formed.
    ///
    /// Returns a human-readable reason on failure.
    pub fn check(&self) -> Result<(), String> {
        if self.indices.len() % 3 != 0 {
            return Err(format!(
                "index count {} is not a multiple of 3",
                self.indices.len()
            ));
        }

        let vertex_count = self.positions.len();
        if let Some(bad) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(format!(
                "index {} out of range for {} vertices",
                bad, vertex_count
            ));
        }

        Ok(())
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate over triangle corner positions.
    ///
    /// Triangles referencing out-of-range vertices are skipped; call
    /// [`Mesh::check`] first to reject them instead.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).filter_map(|face| {
            let v0 = *self.positions.get(face[0] as usize)?;
            let v1 = *self.positions.get(face[1] as usize)?;
            let v2 = *self.positions.get(face[2] as usize)?;
            Some([v0, v1, v2])
        })
    }
}
