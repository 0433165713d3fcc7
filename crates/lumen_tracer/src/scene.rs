//! Scene container for the ray tracer and the built-in reference scenes.

use crate::hittable::{CullMode, HitRecord, Hittable};
use crate::mesh::TriangleMesh;
use crate::plane::Plane;
use crate::sphere::Sphere;
use crate::triangle::Triangle;
use lumen_core::{Light, Material};
use lumen_math::{color, Camera, Color, Ray, Vec3};

/// Everything a frame needs: primitives, materials, lights and the camera.
///
/// Material 0 is a solid red fallback so an unassigned index is visible.
#[derive(Debug, Clone)]
pub struct Scene {
    pub camera: Camera,
    pub spheres: Vec<Sphere>,
    pub planes: Vec<Plane>,
    pub triangles: Vec<Triangle>,
    pub meshes: Vec<TriangleMesh>,
    pub materials: Vec<Material>,
    pub lights: Vec<Light>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Camera::default())
    }
}

fn closest<H: Hittable>(objects: &[H], ray: &Ray, rec: &mut HitRecord) {
    for object in objects {
        object.hit(ray, rec);
    }
}

fn any<H: Hittable>(objects: &[H], ray: &Ray) -> bool {
    objects.iter().any(|object| object.occludes(ray))
}

impl Scene {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            spheres: Vec::new(),
            planes: Vec::new(),
            triangles: Vec::new(),
            meshes: Vec::new(),
            materials: vec![Material::solid(color::RED)],
            lights: Vec::new(),
        }
    }

    pub fn add_material(&mut self, material: Material) -> usize {
        self.materials.push(material);
        self.materials.len() - 1
    }

    pub fn add_sphere(&mut self, center: Vec3, radius: f32, material_index: usize) -> usize {
        self.spheres.push(Sphere::new(center, radius, material_index));
        self.spheres.len() - 1
    }

    pub fn add_plane(&mut self, origin: Vec3, normal: Vec3, material_index: usize) -> usize {
        self.planes.push(Plane::new(origin, normal, material_index));
        self.planes.len() - 1
    }

    pub fn add_triangle(&mut self, triangle: Triangle) -> usize {
        self.triangles.push(triangle);
        self.triangles.len() - 1
    }

    pub fn add_mesh(&mut self, mesh: TriangleMesh) -> usize {
        self.meshes.push(mesh);
        self.meshes.len() - 1
    }

    pub fn add_point_light(&mut self, origin: Vec3, intensity: f32, color: Color) -> usize {
        self.lights.push(Light::point(origin, intensity, color));
        self.lights.len() - 1
    }

    pub fn add_directional_light(&mut self, direction: Vec3, intensity: f32, color: Color) -> usize {
        self.lights.push(Light::directional(direction, intensity, color));
        self.lights.len() - 1
    }

    /// Material for a hit, falling back to material 0 for a bad index.
    pub fn material(&self, index: usize) -> Material {
        self.materials
            .get(index)
            .or_else(|| self.materials.first())
            .copied()
            .unwrap_or_default()
    }

    /// Run every primitive against `rec`, leaving the closest hit in it.
    pub fn closest_hit(&self, ray: &Ray, rec: &mut HitRecord) -> bool {
        closest(&self.spheres, ray, rec);
        closest(&self.planes, ray, rec);
        closest(&self.triangles, ray, rec);
        closest(&self.meshes, ray, rec);
        rec.did_hit
    }

    /// Any-hit query for shadow rays; stops at the first occluder.
    pub fn does_hit(&self, ray: &Ray) -> bool {
        any(&self.spheres, ray) || any(&self.planes, ray) || any(&self.triangles, ray) || any(&self.meshes, ray)
    }

    pub fn primitive_count(&self) -> usize {
        self.spheres.len() + self.planes.len() + self.triangles.len() + self.meshes.len()
    }

    fn reference_camera(aspect_ratio: f32) -> Camera {
        Camera::new(Vec3::new(0.0, 3.0, -9.0), 45.0, aspect_ratio)
    }

    /// Five walls of a box around the origin, open towards the camera.
    fn add_room(&mut self, material_index: usize) {
        self.add_plane(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z, material_index);
        self.add_plane(Vec3::ZERO, Vec3::Y, material_index);
        self.add_plane(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y, material_index);
        self.add_plane(Vec3::new(5.0, 0.0, 0.0), Vec3::NEG_X, material_index);
        self.add_plane(Vec3::new(-5.0, 0.0, 0.0), Vec3::X, material_index);
    }

    fn add_reference_lights(&mut self) {
        self.add_point_light(Vec3::new(0.0, 5.0, 5.0), 50.0, Color::new(1.0, 0.61, 0.45));
        self.add_point_light(Vec3::new(-2.5, 5.0, -5.0), 70.0, Color::new(1.0, 0.8, 0.45));
        self.add_point_light(Vec3::new(2.5, 2.5, -5.0), 50.0, Color::new(0.34, 0.47, 0.68));
    }

    /// Two rows of Cook-Torrance spheres (metal at the bottom, plastic on
    /// top, rough to smooth from left to right) in a Lambert box.
    pub fn spheres_and_planes(aspect_ratio: f32) -> Self {
        let mut scene = Self::new(Self::reference_camera(aspect_ratio));

        let silver = Color::new(0.972, 0.960, 0.915);
        let gray = Color::splat(0.75);
        let rough_metal = scene.add_material(Material::cook_torrance(silver, 1.0, 1.0));
        let medium_metal = scene.add_material(Material::cook_torrance(silver, 1.0, 0.6));
        let smooth_metal = scene.add_material(Material::cook_torrance(silver, 1.0, 0.1));
        let rough_plastic = scene.add_material(Material::cook_torrance(gray, 0.0, 1.0));
        let medium_plastic = scene.add_material(Material::cook_torrance(gray, 0.0, 0.6));
        let smooth_plastic = scene.add_material(Material::cook_torrance(gray, 0.0, 0.1));
        let walls = scene.add_material(Material::lambert(Color::new(0.49, 0.57, 0.57), 1.0));

        scene.add_room(walls);

        scene.add_sphere(Vec3::new(-1.75, 1.0, 0.0), 0.75, rough_metal);
        scene.add_sphere(Vec3::new(0.0, 1.0, 0.0), 0.75, medium_metal);
        scene.add_sphere(Vec3::new(1.75, 1.0, 0.0), 0.75, smooth_metal);
        scene.add_sphere(Vec3::new(-1.75, 3.0, 0.0), 0.75, rough_plastic);
        scene.add_sphere(Vec3::new(0.0, 3.0, 0.0), 0.75, medium_plastic);
        scene.add_sphere(Vec3::new(1.75, 3.0, 0.0), 0.75, smooth_plastic);

        scene.add_reference_lights();
        scene
    }

    /// One triangle per cull mode (back, front, none from left to right)
    /// above a pyramid mesh, in the same box as
    /// [`Scene::spheres_and_planes`].
    pub fn triangle_showcase(aspect_ratio: f32) -> Self {
        let mut scene = Self::new(Self::reference_camera(aspect_ratio));

        let white = scene.add_material(Material::lambert(Color::ONE, 1.0));
        let phong = scene.add_material(Material::lambert_phong(Color::new(0.8, 0.3, 0.2), 0.7, 0.5, 30.0));
        let walls = scene.add_material(Material::lambert(Color::new(0.49, 0.57, 0.57), 1.0));

        scene.add_room(walls);

        let base = [
            Vec3::new(-0.75, 1.5, 0.0),
            Vec3::new(0.75, 0.0, 0.0),
            Vec3::new(-0.75, 0.0, 0.0),
        ];
        let cull_modes = [CullMode::BackFace, CullMode::FrontFace, CullMode::None];
        for (x, cull_mode) in [-1.75, 0.0, 1.75].into_iter().zip(cull_modes) {
            let offset = Vec3::new(x, 4.5, 0.0);
            scene.add_triangle(Triangle::new(
                base[0] + offset,
                base[1] + offset,
                base[2] + offset,
                cull_mode,
                white,
            ));
        }

        let mut pyramid = TriangleMesh::new(
            vec![
                Vec3::new(0.0, 2.0, 0.0),
                Vec3::new(1.0, 0.0, -1.0),
                Vec3::new(-1.0, 0.0, -1.0),
                Vec3::new(-1.0, 0.0, 1.0),
                Vec3::new(1.0, 0.0, 1.0),
            ],
            vec![0, 1, 2, 0, 2, 3, 0, 3, 4, 0, 4, 1],
            CullMode::BackFace,
            phong,
        );
        pyramid.set_rotation_y(std::f32::consts::FRAC_PI_4 * 0.5);
        pyramid.set_translation(Vec3::new(0.0, 0.0, 1.0));
        scene.add_mesh(pyramid);

        scene.add_reference_lights();
        scene
    }
}
