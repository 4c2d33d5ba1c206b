//! Math utilities and types
//!
//! Provides the vector and point aliases sprite geometry converts into.

pub use nalgebra::{Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }
}

#[cfg(test)]
mod tests {
    use super::utils::{deg_to_rad, rad_to_deg};
    use super::constants::PI;
    use approx::assert_relative_eq;

    #[test]
    fn test_degree_radian_roundtrip() {
        assert_relative_eq!(deg_to_rad(180.0), PI, epsilon = 1e-6);
        assert_relative_eq!(rad_to_deg(PI / 2.0), 90.0, epsilon = 1e-4);
    }
}
