use glam::Vec3;

/// Half-line used for pointer picking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray; `direction` is normalized. Returns `None` for a zero direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        Some(Self { origin, direction })
    }

    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }

    /// Slab test against an axis-aligned box.
    ///
    /// Returns the distance along the ray at which it enters the box, `0.0`
    /// when the origin is inside, or `None` on a miss.
    pub fn intersect_aabb(&self, min: Vec3, max: Vec3) -> Option<f32> {
        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;

        for axis in 0..3 {
            let origin = self.origin[axis];
            let direction = self.direction[axis];
            if direction == 0.0 {
                // Parallel to this slab: inside it or never.
                if origin < min[axis] || origin > max[axis] {
                    return None;
                }
                continue;
            }
            let inv = direction.recip();
            let t1 = (min[axis] - origin) * inv;
            let t2 = (max[axis] - origin) * inv;
            t_near = t_near.max(t1.min(t2));
            t_far = t_far.min(t1.max(t2));
        }

        if t_far < 0.0 || t_near > t_far {
            None
        } else {
            Some(t_near.max(0.0))
        }
    }
}
