//! Mesh geometry buffers and view-space normalization.

use glam::Vec3;

/// Uniform size (largest bounding-box dimension) a normalized mesh fills in
/// view space. Parts range from 5 mm clips to 1.5 m body panels with no unit
/// metadata in the file, so every mesh is rescaled to this before rendering.
pub const VIEW_TARGET_SIZE: f32 = 3.0;

/// Triangle soup decoded from an STL buffer.
///
/// `positions` and `normals` are parallel flat buffers, 3 floats per vertex
/// and 9 floats per triangle. STL stores one facet normal per triangle; the
/// decoder repeats it for each of the triangle's three vertices so the
/// buffers stay the same length (flat shading).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshGeometry {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
}

impl MeshGeometry {
    pub fn with_capacity(triangles: usize) -> Self {
        Self {
            positions: Vec::with_capacity(triangles * 9),
            normals: Vec::with_capacity(triangles * 9),
        }
    }

    /// Append one triangle: three vertex positions sharing a facet normal.
    pub fn push_triangle(&mut self, vertices: [[f32; 3]; 3], normal: [f32; 3]) {
        for v in &vertices {
            self.positions.extend_from_slice(v);
            self.normals.extend_from_slice(&normal);
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 9
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Axis-aligned bounding box of all vertex positions.
    pub fn aabb(&self) -> Aabb {
        Aabb::from_positions(&self.positions)
    }

    /// Center the mesh at the origin and uniformly scale it so its largest
    /// dimension equals `target_size`. Degenerate meshes (all vertices
    /// coincident) are centered but left unscaled. Idempotent: running it
    /// again on already-normalized geometry changes nothing.
    pub fn normalize(&mut self, target_size: f32) {
        if self.is_empty() {
            return;
        }

        let aabb = self.aabb();
        let center = aabb.center();
        let max_dim = aabb.max_dim();
        let scale = if max_dim > 1e-9 {
            target_size / max_dim
        } else {
            1.0
        };

        for v in self.positions.chunks_exact_mut(3) {
            v[0] = (v[0] - center.x) * scale;
            v[1] = (v[1] - center.y) * scale;
            v[2] = (v[2] - center.z) * scale;
        }
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Compute an AABB from a flat position buffer (3 floats per vertex).
    pub fn from_positions(positions: &[f32]) -> Self {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);

        for v in positions.chunks_exact(3) {
            min.x = min.x.min(v[0]);
            min.y = min.y.min(v[1]);
            min.z = min.z.min(v[2]);
            max.x = max.x.max(v[0]);
            max.y = max.y.max(v[1]);
            max.z = max.z.max(v[2]);
        }

        Self { min, max }
    }

    /// Center of the bounding box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Extent along each axis
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Largest of the three box dimensions
    pub fn max_dim(&self) -> f32 {
        let s = self.size();
        s.x.max(s.y).max(s.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_triangle_mesh() -> MeshGeometry {
        let mut mesh = MeshGeometry::default();
        mesh.push_triangle(
            [[0.0, 0.0, 0.0], [10.0, 0.0, 0.0], [0.0, 4.0, 0.0]],
            [0.0, 0.0, 1.0],
        );
        mesh.push_triangle(
            [[0.0, 0.0, 2.0], [10.0, 0.0, 2.0], [0.0, 4.0, 2.0]],
            [0.0, 0.0, 1.0],
        );
        mesh
    }

    #[test]
    fn test_push_triangle_keeps_buffers_parallel() {
        let mesh = two_triangle_mesh();
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.positions.len(), 18);
        assert_eq!(mesh.positions.len(), mesh.normals.len());
        assert_eq!(mesh.positions.len() % 9, 0);
    }

    #[test]
    fn test_aabb_of_known_mesh() {
        let mesh = two_triangle_mesh();
        let aabb = mesh.aabb();
        assert_eq!(aabb.min, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(10.0, 4.0, 2.0));
        assert_eq!(aabb.center(), Vec3::new(5.0, 2.0, 1.0));
        assert!((aabb.max_dim() - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_centers_and_scales() {
        let mut mesh = two_triangle_mesh();
        mesh.normalize(VIEW_TARGET_SIZE);

        let aabb = mesh.aabb();
        assert!(aabb.center().length() < 1e-5);
        assert!((aabb.max_dim() - VIEW_TARGET_SIZE).abs() < 1e-5);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut mesh = two_triangle_mesh();
        mesh.normalize(VIEW_TARGET_SIZE);
        let once = mesh.clone();
        mesh.normalize(VIEW_TARGET_SIZE);

        for (a, b) in once.positions.iter().zip(mesh.positions.iter()) {
            assert!((a - b).abs() < 1e-5, "{a} vs {b}");
        }
    }

    #[test]
    fn test_normalize_degenerate_mesh() {
        let mut mesh = MeshGeometry::default();
        mesh.push_triangle(
            [[3.0, 3.0, 3.0], [3.0, 3.0, 3.0], [3.0, 3.0, 3.0]],
            [0.0, 0.0, 1.0],
        );
        mesh.normalize(VIEW_TARGET_SIZE);

        // Centered at origin, no scale blow-up
        for v in mesh.positions.chunks_exact(3) {
            assert!(v.iter().all(|c| c.abs() < 1e-6));
        }
    }

    #[test]
    fn test_normalize_empty_mesh_is_noop() {
        let mut mesh = MeshGeometry::default();
        mesh.normalize(VIEW_TARGET_SIZE);
        assert!(mesh.is_empty());
    }
}
