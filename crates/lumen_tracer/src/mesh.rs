//! Indexed triangle mesh for the ray tracer.
//!
//! Object-space positions are transformed once per `update_transforms` call;
//! intersection always runs against the cached world-space data, pruned by
//! the world AABB.

use crate::hittable::{CullMode, HitRecord, Hittable};
use crate::triangle::{self, Triangle};
use lumen_core::Mesh;
use lumen_math::{Aabb, Quat, Ray, Transform, Vec3};

#[derive(Debug, Clone)]
pub struct TriangleMesh {
    pub positions: Vec<Vec3>,
    /// One normal per index triple
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub cull_mode: CullMode,
    pub material_index: usize,
    pub transform: Transform,

    pub transformed_positions: Vec<Vec3>,
    pub transformed_normals: Vec<Vec3>,
    /// Object-space bounds
    pub aabb: Aabb,
    pub transformed_aabb: Aabb,
}

impl TriangleMesh {
    /// Build a mesh from a triangle list. Normals, bounds and world data are
    /// computed immediately.
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>, cull_mode: CullMode, material_index: usize) -> Self {
        let mut mesh = Self {
            positions,
            normals: Vec::new(),
            indices,
            cull_mode,
            material_index,
            transform: Transform::IDENTITY,
            transformed_positions: Vec::new(),
            transformed_normals: Vec::new(),
            aabb: Aabb::EMPTY,
            transformed_aabb: Aabb::EMPTY,
        };
        mesh.calculate_normals();
        mesh.update_aabb();
        mesh.update_transforms();
        mesh
    }

    /// Empty mesh to be filled with [`TriangleMesh::append_triangle`].
    pub fn empty(cull_mode: CullMode, material_index: usize) -> Self {
        Self::new(Vec::new(), Vec::new(), cull_mode, material_index)
    }

    /// Copy the geometry of a shared mesh, resolving strips into a list.
    pub fn from_mesh(mesh: &Mesh, cull_mode: CullMode, material_index: usize) -> Self {
        let positions = mesh.vertices.iter().map(|v| v.position).collect();
        let indices = mesh.triangles().flatten().collect();
        let mut result = Self::new(positions, indices, cull_mode, material_index);
        result.transform = mesh.transform;
        result.update_transforms();
        result
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Append a triangle's vertices. With `defer_update` the caller is
    /// expected to call [`TriangleMesh::update_aabb`] and
    /// [`TriangleMesh::update_transforms`] after the last append.
    pub fn append_triangle(&mut self, triangle: &Triangle, defer_update: bool) {
        let base = self.positions.len() as u32;
        self.positions.extend([triangle.v0, triangle.v1, triangle.v2]);
        self.indices.extend([base, base + 1, base + 2]);
        self.normals.push(triangle.normal);

        if !defer_update {
            self.update_aabb();
            self.update_transforms();
        }
    }

    /// One face normal per index triple. Triples with an out-of-range index
    /// get a zero normal and are never hit.
    pub fn calculate_normals(&mut self) {
        let count = self.positions.len();
        self.normals = self
            .indices
            .chunks_exact(3)
            .map(|tri| {
                let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
                if i0 >= count || i1 >= count || i2 >= count {
                    log::warn!("Mesh triangle {:?} references a missing vertex", tri);
                    return Vec3::ZERO;
                }
                let p0 = self.positions[i0];
                (self.positions[i1] - p0).cross(self.positions[i2] - p0).normalize_or_zero()
            })
            .collect();
    }

    /// Recompute object-space bounds from the positions.
    pub fn update_aabb(&mut self) {
        self.aabb = Aabb::enclosing(&self.positions);
    }

    /// Transform positions and normals to world space and refresh the world
    /// bounds.
    pub fn update_transforms(&mut self) {
        let matrix = self.transform.to_matrix();
        self.transformed_positions = self.positions.iter().map(|&p| matrix.transform_point3(p)).collect();
        self.transformed_normals = self
            .normals
            .iter()
            .map(|&n| matrix.transform_vector3(n).normalize_or_zero())
            .collect();
        self.transformed_aabb = self.aabb.transformed(&matrix);
    }

    pub fn set_translation(&mut self, translation: Vec3) {
        self.transform.translation = translation;
        self.update_transforms();
    }

    pub fn set_rotation_y(&mut self, yaw: f32) {
        self.transform.rotation = Quat::from_rotation_y(yaw);
        self.update_transforms();
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.transform.scale = scale;
        self.update_transforms();
    }

    /// World-space vertices and normal of triangle `n`.
    fn world_triangle(&self, n: usize) -> Option<(Vec3, Vec3, Vec3, Vec3)> {
        let tri = self.indices.get(3 * n..3 * n + 3)?;
        let p = &self.transformed_positions;
        Some((
            *p.get(tri[0] as usize)?,
            *p.get(tri[1] as usize)?,
            *p.get(tri[2] as usize)?,
            *self.transformed_normals.get(n)?,
        ))
    }
}

impl Hittable for TriangleMesh {
    fn hit(&self, ray: &Ray, rec: &mut HitRecord) -> bool {
        if !self.transformed_aabb.hit(ray) {
            return false;
        }

        let mut hit_anything = false;
        for n in 0..self.triangle_count() {
            let Some((v0, v1, v2, normal)) = self.world_triangle(n) else {
                continue;
            };
            if let Some(t) = triangle::intersect(v0, v1, v2, normal, self.cull_mode, ray) {
                hit_anything |= rec.offer(ray, t, normal, self.material_index);
            }
        }
        hit_anything
    }

    fn occludes(&self, ray: &Ray) -> bool {
        if !self.transformed_aabb.hit(ray) {
            return false;
        }

        let cull_mode = self.cull_mode.inverted();
        (0..self.triangle_count()).any(|n| {
            self.world_triangle(n)
                .and_then(|(v0, v1, v2, normal)| triangle::intersect(v0, v1, v2, normal, cull_mode, ray))
                .is_some()
        })
    }

    fn bounding_box(&self) -> Aabb {
        self.transformed_aabb
    }
}
