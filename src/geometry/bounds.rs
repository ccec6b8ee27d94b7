use glam::Vec3;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds3 {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds3 {
    /// Smallest box holding every point, or `None` when there are none.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self { min: first, max: first }, |b, p| Self {
            min: b.min.min(p),
            max: b.max.max(p),
        }))
    }

    /// `[min_x, min_y, min_z, max_x, max_y, max_z]`
    pub fn to_array(&self) -> [f32; 6] {
        [
            self.min.x, self.min.y, self.min.z, self.max.x, self.max.y, self.max.z,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(Bounds3::from_points(std::iter::empty()), None);
    }

    #[test]
    fn test_bounds() {
        let bounds = Bounds3::from_points([
            Vec3::new(-10.0, -5.0, 1.0),
            Vec3::new(10.0, 5.0, -1.0),
            Vec3::new(0.0, 7.0, 0.0),
        ])
        .unwrap();
        assert_eq!(bounds.to_array(), [-10.0, -5.0, -1.0, 10.0, 7.0, 1.0]);
    }

    #[test]
    fn test_single_point() {
        let bounds = Bounds3::from_points([Vec3::ONE]).unwrap();
        assert_eq!(bounds.min, bounds.max);
    }
}
