// systems/picking.rs
//
// Ray casting against analytic bounding spheres.

use glam::Vec3;

/// Half-line in world space. `dir` is unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    /// Build a ray, normalizing `dir`. Returns `None` for a zero direction.
    pub fn new(origin: Vec3, dir: Vec3) -> Option<Self> {
        let dir = dir.try_normalize()?;
        Some(Self { origin, dir })
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// Sphere used as a pick target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

/// Distance along the ray to the first surface crossing in front of the
/// origin, or `None` on a miss. A ray starting inside the sphere reports
/// the exit point.
pub fn intersect_sphere(ray: &Ray, sphere: &BoundingSphere) -> Option<f32> {
    let oc = ray.origin - sphere.center;
    let b = oc.dot(ray.dir);
    let c = oc.length_squared() - sphere.radius * sphere.radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    let t1 = -b - sq;
    let t2 = -b + sq;
    if t1 >= 0.0 {
        Some(t1)
    } else if t2 >= 0.0 {
        Some(t2)
    } else {
        None
    }
}

/// Index and distance of the nearest sphere the ray hits.
/// Ties keep the earlier index.
pub fn nearest_hit<I>(ray: &Ray, spheres: I) -> Option<(usize, f32)>
where
    I: IntoIterator<Item = BoundingSphere>,
{
    let mut best: Option<(usize, f32)> = None;
    for (i, s) in spheres.into_iter().enumerate() {
        if let Some(t) = intersect_sphere(ray, &s) {
            if best.map_or(true, |(_, bt)| t < bt) {
                best = Some((i, t));
            }
        }
    }
    best
}
