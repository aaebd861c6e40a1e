//! Centered object normalization
//!
//! Whatever size and offset a loaded mesh has, it is scaled so its largest
//! dimension equals the requested object scale and shifted so its bounding
//! box center lands on the origin.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Bounds of a vertex cloud; `None` when there are no vertices
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        points.into_iter().fold(None, |acc, p| match acc {
            None => Some(Self::new(p, p)),
            Some(b) => Some(Self::new(b.min.min(p), b.max.max(p))),
        })
    }

    /// Bounds from a flat `[x, y, z, x, y, z, ...]` position buffer
    pub fn from_positions(positions: &[f32]) -> Option<Self> {
        Self::from_points(
            positions
                .chunks_exact(3)
                .map(|p| Vec3::new(p[0], p[1], p[2])),
        )
    }

    /// No point lies inside: some axis has `max < min` (an empty geometry
    /// reports `min = +inf`, `max = -inf`)
    pub fn is_empty(&self) -> bool {
        self.max.cmplt(self.min).any()
    }

    /// Finite and non-empty, so it can be normalized
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && !self.is_empty()
    }

    /// Zero for an empty box
    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            self.max - self.min
        }
    }

    /// Zero for an empty box
    pub fn center(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            (self.min + self.max) * 0.5
        }
    }
}

/// Recentering and uniform scale for one mesh instance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshTransform {
    /// Negated bounding-box center (unscaled)
    pub center_offset: Vec3,
    pub normalized_scale: f32,
}

impl MeshTransform {
    /// Translation applied after scaling so the box center sits at the origin
    pub fn translation(&self) -> Vec3 {
        self.center_offset * self.normalized_scale
    }

    /// `T(center_offset * s) * S(s)`
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.translation()) * Mat4::from_scale(Vec3::splat(self.normalized_scale))
    }
}

/// Normalize a mesh's bounds to `target_scale`
///
/// A zero-size box passes `target_scale` through instead of dividing by zero.
pub fn compute_mesh_transform(bounds: &Aabb, target_scale: f32) -> MeshTransform {
    let max_dim = bounds.size().max_element();
    let normalized_scale = if max_dim > 0.0 {
        target_scale / max_dim
    } else {
        target_scale
    };
    MeshTransform {
        center_offset: -bounds.center(),
        normalized_scale,
    }
}

/// Object placement: rotation (radians, applied X then Y then Z as in an
/// `XYZ` Euler order) around the normalized mesh
pub fn object_matrix(rotation: [f32; 3], transform: &MeshTransform) -> Mat4 {
    Mat4::from_rotation_x(rotation[0])
        * Mat4::from_rotation_y(rotation[1])
        * Mat4::from_rotation_z(rotation[2])
        * transform.matrix()
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct MeshKey {
    bounds: Aabb,
    target_scale: u32,
}

/// Memoized mesh transform, recomputed when the bounds or scale change
#[derive(Debug, Default)]
pub struct MeshTransformCache {
    key: Option<MeshKey>,
    transform: Option<MeshTransform>,
}

impl MeshTransformCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transform for `bounds`; `None` until a valid bounding box is available
    pub fn get(&mut self, bounds: Option<&Aabb>, target_scale: f32) -> Option<MeshTransform> {
        let Some(bounds) = bounds.filter(|b| b.is_valid()) else {
            self.key = None;
            self.transform = None;
            return None;
        };

        let key = MeshKey {
            bounds: *bounds,
            target_scale: target_scale.to_bits(),
        };
        if self.key != Some(key) {
            let transform = compute_mesh_transform(bounds, target_scale);
            log::debug!(
                "Mesh normalized: size {:?} -> scale {}",
                bounds.size(),
                transform.normalized_scale
            );
            self.key = Some(key);
            self.transform = Some(transform);
        }
        self.transform
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_largest_dimension() {
        let bounds = Aabb::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(5.0, 4.0, 4.0));
        let t = compute_mesh_transform(&bounds, 2.0);
        assert_eq!(t.normalized_scale, 0.5);
        assert_eq!(t.center_offset, Vec3::new(-3.0, -3.0, -3.5));

        // The box center maps to the origin
        let center = t.matrix().transform_point3(bounds.center());
        assert!(center.length() < 1e-6);

        // The longest side now spans target_scale
        let a = t.matrix().transform_point3(bounds.min);
        let b = t.matrix().transform_point3(bounds.max);
        assert!(((b - a).max_element() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_volume_passes_scale_through() {
        let p = Vec3::new(0.3, -1.0, 7.0);
        let t = compute_mesh_transform(&Aabb::new(p, p), 1.5);
        assert_eq!(t.normalized_scale, 1.5);
        assert!(t.normalized_scale.is_finite());
        assert_eq!(t.center_offset, -p);
    }

    #[test]
    fn test_transform_is_bit_identical() {
        let bounds = Aabb::new(Vec3::new(-0.7, 0.1, -3.3), Vec3::new(0.9, 2.2, 1.1));
        let a = compute_mesh_transform(&bounds, 0.77);
        let b = compute_mesh_transform(&bounds, 0.77);
        assert_eq!(a.normalized_scale.to_bits(), b.normalized_scale.to_bits());
        assert_eq!(a.center_offset.to_array().map(f32::to_bits), b.center_offset.to_array().map(f32::to_bits));
    }

    #[test]
    fn test_empty_box_has_zero_extent() {
        let empty = Aabb::new(Vec3::INFINITY, Vec3::NEG_INFINITY);
        assert!(empty.is_empty());
        assert!(!empty.is_valid());
        assert_eq!(empty.size(), Vec3::ZERO);
        assert_eq!(empty.center(), Vec3::ZERO);

        let t = compute_mesh_transform(&empty, 2.0);
        assert!(t.center_offset.is_finite());
        assert_eq!(t.normalized_scale, 2.0);
    }

    #[test]
    fn test_box_validity() {
        assert!(Aabb::new(Vec3::ZERO, Vec3::ONE).is_valid());
        // A single point is degenerate but still valid
        assert!(Aabb::new(Vec3::ONE, Vec3::ONE).is_valid());
        // Inverted on one axis
        let inverted = Aabb::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        assert!(inverted.is_empty());
        assert!(!inverted.is_valid());
        assert!(!Aabb::new(Vec3::new(f32::NAN, 0.0, 0.0), Vec3::ONE).is_valid());
        assert!(!Aabb::new(Vec3::ZERO, Vec3::new(f32::INFINITY, 1.0, 1.0)).is_valid());
    }

    #[test]
    fn test_cache_ignores_invalid_bounds() {
        let mut cache = MeshTransformCache::new();
        let empty = Aabb::new(Vec3::INFINITY, Vec3::NEG_INFINITY);
        assert!(cache.get(Some(&empty), 1.0).is_none());
    }

    #[test]
    fn test_bounds_from_positions() {
        let positions = [0.0, 1.0, -2.0, 3.0, -1.0, 0.5, 1.0, 4.0, 2.0, 9.0];
        let bounds = Aabb::from_positions(&positions).unwrap();
        // The trailing partial vertex is ignored
        assert_eq!(bounds.min, Vec3::new(0.0, -1.0, -2.0));
        assert_eq!(bounds.max, Vec3::new(3.0, 4.0, 2.0));

        assert!(Aabb::from_positions(&[]).is_none());
        assert!(Aabb::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn test_object_matrix_rotates_after_centering() {
        let bounds = Aabb::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(3.0, 3.0, 3.0));
        let t = compute_mesh_transform(&bounds, 1.0);
        let m = object_matrix([0.0, std::f32::consts::FRAC_PI_2, 0.0], &t);

        // Center stays at the origin under any rotation
        assert!(m.transform_point3(bounds.center()).length() < 1e-6);
        // +X corner of the box ends up on -Z after a quarter turn about Y
        let p = m.transform_point3(Vec3::new(3.0, 2.0, 2.0));
        assert!((p - Vec3::new(0.0, 0.0, -0.5)).length() < 1e-5);
    }

    #[test]
    fn test_cache_tracks_bounds_and_scale() {
        let mut cache = MeshTransformCache::new();
        assert!(cache.get(None, 2.0).is_none());

        let bounds = Aabb::new(Vec3::ZERO, Vec3::new(4.0, 1.0, 1.0));
        assert_eq!(cache.get(Some(&bounds), 2.0).unwrap().normalized_scale, 0.5);
        assert_eq!(cache.get(Some(&bounds), 1.0).unwrap().normalized_scale, 0.25);

        let bigger = Aabb::new(Vec3::ZERO, Vec3::new(8.0, 1.0, 1.0));
        assert_eq!(cache.get(Some(&bigger), 1.0).unwrap().normalized_scale, 0.125);

        // Losing the mesh drops the transform
        assert!(cache.get(None, 1.0).is_none());
    }
}
