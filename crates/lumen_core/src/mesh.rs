//! Mesh geometry shared by the rasterizer and the ray tracer.
//!
//! A mesh is a vertex array, an index array interpreted through a
//! [`Topology`], and a world [`Transform`]. Winding is clockwise for front
//! faces in the left-handed frame, so the face normal of `(p0, p1, p2)` is
//! `(p1 - p0) × (p2 - p0)`.

use std::path::Path;

use lumen_math::{Color, Mat4, Transform, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while building or loading a mesh.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("Failed to load OBJ {path}: {source}")]
    Obj {
        path: String,
        #[source]
        source: tobj::LoadError,
    },

    #[error("No geometry found in {0}")]
    NoGeometry(String),

    #[error("Triangle list has {0} indices, which is not a multiple of 3")]
    IncompleteTriangleList(usize),

    #[error("Index {index} at position {position} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        position: usize,
        index: u32,
        vertex_count: usize,
    },
}

pub type MeshResult<T> = Result<T, MeshError>;

/// Input vertex of the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub color: Color,
    pub uv: Vec2,
    pub normal: Vec3,
    pub tangent: Vec3,
}

impl Vertex {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_uv(mut self, uv: Vec2) -> Self {
        self.uv = uv;
        self
    }

    pub fn with_normal(mut self, normal: Vec3) -> Self {
        self.normal = normal;
        self
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            color: Color::ONE,
            uv: Vec2::ZERO,
            normal: Vec3::ZERO,
            tangent: Vec3::ZERO,
        }
    }
}

/// How the index array is split into triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    /// Every three indices form a triangle.
    #[default]
    TriangleList,
    /// Sliding window of three with the winding flipped on odd steps.
    TriangleStrip,
}

#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub topology: Topology,
    pub transform: Transform,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>, topology: Topology) -> Self {
        Self {
            vertices,
            indices,
            topology,
            transform: Transform::IDENTITY,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// World matrix (`scale`, then `rotation`, then `translation`).
    pub fn world_matrix(&self) -> Mat4 {
        self.transform.to_matrix()
    }

    /// Number of triangles the topology produces, degenerate ones included.
    pub fn triangle_count(&self) -> usize {
        match self.topology {
            Topology::TriangleList => self.indices.len() / 3,
            Topology::TriangleStrip => self.indices.len().saturating_sub(2),
        }
    }

    /// Vertex indices of triangle `n`, with strip winding already corrected.
    pub fn triangle(&self, n: usize) -> Option<[u32; 3]> {
        if n >= self.triangle_count() {
            return None;
        }
        let idx = &self.indices;
        let tri = match self.topology {
            Topology::TriangleList => [idx[3 * n], idx[3 * n + 1], idx[3 * n + 2]],
            Topology::TriangleStrip => {
                let i = n + 2;
                if i % 2 == 0 {
                    [idx[i - 2], idx[i - 1], idx[i]]
                } else {
                    [idx[i - 1], idx[i - 2], idx[i]]
                }
            }
        };
        Some(tri)
    }

    /// All triangles whose indices are in range. Invalid ones are logged and
    /// skipped; [`Mesh::validate`] reports them as errors instead.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        let vertex_count = self.vertices.len();
        (0..self.triangle_count()).filter_map(move |n| {
            let tri = self.triangle(n)?;
            if tri.iter().any(|&i| i as usize >= vertex_count) {
                log::warn!("Skipping triangle {} with out-of-range index {:?}", n, tri);
                return None;
            }
            Some(tri)
        })
    }

    /// Check that the index data can be rasterized without skipping anything.
    pub fn validate(&self) -> MeshResult<()> {
        if self.topology == Topology::TriangleList && self.indices.len() % 3 != 0 {
            return Err(MeshError::IncompleteTriangleList(self.indices.len()));
        }
        let vertex_count = self.vertices.len();
        if let Some((position, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|(_, &i)| i as usize >= vertex_count)
        {
            return Err(MeshError::IndexOutOfRange {
                position,
                index,
                vertex_count,
            });
        }
        Ok(())
    }

    /// Smooth vertex normals from area-weighted face normals.
    pub fn compute_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.vertices.len()];
        for [i0, i1, i2] in self.triangles().collect::<Vec<_>>() {
            let (i0, i1, i2) = (i0 as usize, i1 as usize, i2 as usize);
            let p0 = self.vertices[i0].position;
            let face = (self.vertices[i1].position - p0).cross(self.vertices[i2].position - p0);
            normals[i0] += face;
            normals[i1] += face;
            normals[i2] += face;
        }
        for (vertex, normal) in self.vertices.iter_mut().zip(normals) {
            vertex.normal = normal.try_normalize().unwrap_or(Vec3::Y);
        }
    }

    /// Per-vertex tangents from UV derivatives, made orthogonal to the normal.
    ///
    /// Normals must already be set.
    pub fn compute_tangents(&mut self) {
        let mut tangents = vec![Vec3::ZERO; self.vertices.len()];
        for [i0, i1, i2] in self.triangles().collect::<Vec<_>>() {
            let (i0, i1, i2) = (i0 as usize, i1 as usize, i2 as usize);
            let (v0, v1, v2) = (&self.vertices[i0], &self.vertices[i1], &self.vertices[i2]);

            let edge0 = v1.position - v0.position;
            let edge1 = v2.position - v0.position;
            let diff0 = v1.uv - v0.uv;
            let diff1 = v2.uv - v0.uv;

            let det = diff0.x * diff1.y - diff0.y * diff1.x;
            if det.abs() < f32::EPSILON {
                continue;
            }
            let tangent = (edge0 * diff1.y - edge1 * diff0.y) / det;
            tangents[i0] += tangent;
            tangents[i1] += tangent;
            tangents[i2] += tangent;
        }

        for (vertex, tangent) in self.vertices.iter_mut().zip(tangents) {
            let n = vertex.normal;
            // Gram-Schmidt
            vertex.tangent = (tangent - n * n.dot(tangent))
                .try_normalize()
                .unwrap_or_else(|| n.any_orthonormal_vector());
        }
    }

    /// Load a triangulated OBJ file. All models in the file are merged.
    ///
    /// V is flipped so UV `(0, 0)` is the top-left of the texture. Missing
    /// normals are computed; tangents always are.
    pub fn load_obj(path: impl AsRef<Path>) -> MeshResult<Self> {
        let path = path.as_ref();
        let (models, _materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                single_index: true,
                triangulate: true,
                ..Default::default()
            },
        )
        .map_err(|source| MeshError::Obj {
            path: path.display().to_string(),
            source,
        })?;

        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        let mut has_normals = true;

        for model in &models {
            let m = &model.mesh;
            let base = vertices.len() as u32;
            let count = m.positions.len() / 3;
            has_normals &= m.normals.len() == m.positions.len();

            for i in 0..count {
                let mut vertex = Vertex::new(Vec3::from_slice(&m.positions[3 * i..3 * i + 3]));
                if let Some(n) = m.normals.get(3 * i..3 * i + 3) {
                    vertex.normal = Vec3::from_slice(n);
                }
                if let Some(uv) = m.texcoords.get(2 * i..2 * i + 2) {
                    vertex.uv = Vec2::new(uv[0], 1.0 - uv[1]);
                }
                vertices.push(vertex);
            }
            indices.extend(m.indices.iter().map(|&i| base + i));
        }

        if indices.is_empty() {
            return Err(MeshError::NoGeometry(path.display().to_string()));
        }

        let mut mesh = Self::new(vertices, indices, Topology::TriangleList);
        mesh.validate()?;
        if !has_normals {
            mesh.compute_normals();
        }
        mesh.compute_tangents();

        log::info!(
            "Loaded {} ({} vertices, {} triangles)",
            path.display(),
            mesh.vertices.len(),
            mesh.triangle_count()
        );
        Ok(mesh)
    }

    /// Axis-aligned unit quad in the XY plane facing -Z, as a 4-index strip.
    pub fn quad(size: f32) -> Self {
        let h = size * 0.5;
        let vertices = vec![
            Vertex::new(Vec3::new(-h, h, 0.0)).with_uv(Vec2::new(0.0, 0.0)),
            Vertex::new(Vec3::new(h, h, 0.0)).with_uv(Vec2::new(1.0, 0.0)),
            Vertex::new(Vec3::new(-h, -h, 0.0)).with_uv(Vec2::new(0.0, 1.0)),
            Vertex::new(Vec3::new(h, -h, 0.0)).with_uv(Vec2::new(1.0, 1.0)),
        ];
        let mut mesh = Self::new(vertices, vec![0, 1, 2, 3], Topology::TriangleStrip);
        mesh.compute_normals();
        mesh.compute_tangents();
        mesh
    }
}
