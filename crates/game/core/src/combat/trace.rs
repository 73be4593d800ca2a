//! Ray casting seam.

use glam::Vec3;

use crate::state::{UnitId, WorldState};

/// A ray limited to `max_distance`. `direction` is expected to be normalized.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub max_distance: f32,
}

/// First collider hit by a ray.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RayHit {
    pub point: Vec3,
    pub distance: f32,
    /// The unit owning the collider, `None` for terrain.
    pub unit: Option<UnitId>,
}

/// Physics query used by traced hit resolution.
pub trait CollisionOracle {
    fn raycast(&self, ray: &Ray) -> Option<RayHit>;
}

impl<F> CollisionOracle for F
where
    F: Fn(&Ray) -> Option<RayHit>,
{
    fn raycast(&self, ray: &Ray) -> Option<RayHit> {
        self(ray)
    }
}

/// Treats every living unit as a sphere of its radius.
///
/// Spheres that contain the ray origin are not reported, so a unit firing
/// from its own centre never hits itself.
impl CollisionOracle for WorldState {
    fn raycast(&self, ray: &Ray) -> Option<RayHit> {
        self.units()
            .filter(|unit| unit.is_alive())
            .filter_map(|unit| {
                let distance = sphere_entry(ray, unit.position, unit.radius)?;
                Some(RayHit {
                    point: ray.origin + ray.direction * distance,
                    distance,
                    unit: Some(unit.id),
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

fn sphere_entry(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let offset = ray.origin - center;
    let b = offset.dot(ray.direction);
    let c = offset.length_squared() - radius * radius;
    if c <= 0.0 {
        return None;
    }
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let t = -b - discriminant.sqrt();
    (t >= 0.0 && t <= ray.max_distance).then_some(t)
}
