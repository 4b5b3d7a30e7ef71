//! Transform baking
//!
//! ASE node transforms are unreliable in the target engine's importer, so
//! the emitted `NODE_TM` block is always identity and all spatial transform
//! is baked directly into vertex and normal data. The bake matrix composes
//! scale, then rotation, then translation, with each channel individually
//! switchable so callers can freeze only part of an object's transform.
//!
//! Normals use the inverse-transpose of the 3x3 linear part and are
//! re-normalized afterwards; transforming them with the position matrix
//! would shear them under non-uniform scale.

use nalgebra::{Matrix3, Matrix4, Vector3, Vector4};

use crate::model::{Normal, Transform, Vertex};

/// Which transform channels to bake into vertex data
///
/// Disabled channels are treated as identity and left for the consumer to
/// apply elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BakeFlags {
    /// Bake world translation
    pub apply_location: bool,
    /// Bake world rotation
    pub apply_rotation: bool,
    /// Bake world scale
    pub apply_scale: bool,
}

impl BakeFlags {
    /// Bake every channel (the exporter default)
    pub fn all() -> Self {
        Self {
            apply_location: true,
            apply_rotation: true,
            apply_scale: true,
        }
    }

    /// Bake nothing; positions pass through untouched
    pub fn none() -> Self {
        Self {
            apply_location: false,
            apply_rotation: false,
            apply_scale: false,
        }
    }
}

impl Default for BakeFlags {
    fn default() -> Self {
        Self::all()
    }
}

/// Compose the 4x4 bake matrix from a decomposed transform
///
/// Order is scale first, then rotation, then translation, matching how the
/// decomposition was taken apart.
pub fn bake_matrix(transform: &Transform, flags: &BakeFlags) -> Matrix4<f64> {
    let mut m = Matrix4::identity();

    if flags.apply_scale {
        m = Matrix4::new_nonuniform_scaling(&transform.scale) * m;
    }
    if flags.apply_rotation {
        m = transform.rotation.to_homogeneous() * m;
    }
    if flags.apply_location {
        m = Matrix4::new_translation(&transform.translation) * m;
    }

    m
}

/// Normal matrix for a bake matrix: inverse-transpose of the 3x3 linear part
///
/// A degenerate linear part (zero scale on some axis) has no inverse; fall
/// back to identity rather than poisoning every normal with NaN.
pub fn normal_matrix(bake: &Matrix4<f64>) -> Matrix3<f64> {
    let linear = bake.fixed_view::<3, 3>(0, 0).into_owned();
    match linear.try_inverse() {
        Some(inverse) => inverse.transpose(),
        None => Matrix3::identity(),
    }
}

/// Apply the bake matrix to a vertex position
pub fn bake_vertex(bake: &Matrix4<f64>, v: &Vertex) -> Vertex {
    let p = bake * Vector4::new(v.x, v.y, v.z, 1.0);
    Vertex::new(p.x, p.y, p.z)
}

/// Apply the normal matrix to a normal and re-normalize
pub fn bake_normal(normal_m: &Matrix3<f64>, n: &Normal) -> Normal {
    let v = normal_m * Vector3::new(n.x, n.y, n.z);
    Normal::new(v.x, v.y, v.z).normalized()
}
