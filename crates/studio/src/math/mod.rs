pub mod bounds;
pub mod float;
pub mod point;

pub use glam::Vec3;

/// A raw triple as the editing layer stores it.
pub type Float3 = [f32; 3];

pub trait Float3Ext {
    fn vec(self) -> Vec3;
}

impl Float3Ext for Float3 {
    fn vec(self) -> Vec3 {
        Vec3::from_array(self)
    }
}

/// Returns an orthonormal basis `(t, b)` perpendicular to `n`.
///
/// `n` must be normalized.
pub fn orthonormal_basis(n: Vec3) -> (Vec3, Vec3) {
    let helper = if n.x.abs() > 0.9 { Vec3::Y } else { Vec3::X };
    let t = n.cross(helper).normalize();
    let b = n.cross(t);
    (t, b)
}

/// Lat-long mapping of a direction into `[0, 1]^2`
pub fn sphere_uv_from_direction(direction: Vec3) -> [f32; 2] {
    let theta = f32::acos(direction.y.clamp(-1.0, 1.0));
    let phi = f32::atan2(-direction.z, direction.x) + std::f32::consts::PI;
    [
        phi / (2.0 * std::f32::consts::PI),
        theta / std::f32::consts::PI,
    ]
}
