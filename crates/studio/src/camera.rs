use rand::{distributions::Uniform, prelude::Distribution};

use crate::{
    error::RendererError,
    math::{float::Vec3AsNonZero, point::Point, Vec3},
    ray::Ray,
    Rng,
};

/// Where the camera stands and how its lens behaves
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    pub origin: Point,
    pub look_at: Point,
    pub up: Vec3,
    /// Vertical field of view, in degrees
    pub vfov: f32,
    /// Distance to the plane in focus, in world unit
    pub focal_distance: f32,
    /// Zero gives a pinhole camera
    pub lens_radius: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            origin: Point::new(0.0, 0.0, 10.0),
            look_at: Point::ORIGIN,
            up: Vec3::Y,
            vfov: 40.0,
            focal_distance: 100.0,
            lens_radius: 0.0,
        }
    }
}

/// A thin lens camera
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    origin: Point,
    forward: Vec3,
    right: Vec3,
    up: Vec3,
    /// Half extent of the viewport at unit distance
    half_width: f32,
    half_height: f32,
    focal_distance: f32,
    lens_radius: f32,

    /// width of the sensor, in pixel
    pub width: u32,
    /// height of the sensor, in pixel
    pub height: u32,
}

impl Camera {
    pub fn new(settings: &CameraSettings, width: u32, height: u32) -> Result<Self, RendererError> {
        if width == 0 || height == 0 {
            return Err(RendererError::new("camera sensor has no pixel"));
        }
        if !(settings.vfov > 0.0 && settings.vfov < 180.0) {
            return Err(RendererError::new(format!(
                "field of view must lie in ]0, 180[, got {}",
                settings.vfov
            )));
        }
        if !(settings.focal_distance > 0.0) || settings.lens_radius < 0.0 {
            return Err(RendererError::new("invalid lens parameters"));
        }

        let forward = (settings.look_at - settings.origin)
            .into_non_zero(1e-6)
            .ok_or_else(|| RendererError::new("camera looks at its own position"))?
            .normalize();
        let right = forward
            .cross(settings.up)
            .into_non_zero(1e-6)
            .ok_or_else(|| RendererError::new("camera up vector is parallel to its view"))?
            .normalize();
        let up = right.cross(forward);

        let half_height = f32::tan(settings.vfov.to_radians() / 2.);
        let aspect_ratio = width as f32 / height as f32;

        Ok(Self {
            origin: settings.origin,
            forward,
            right,
            up,
            half_width: half_height * aspect_ratio,
            half_height,
            focal_distance: settings.focal_distance,
            lens_radius: settings.lens_radius,
            width,
            height,
        })
    }

    /// Generate a ray going through the given pixel coordinate.
    ///
    /// Simulate the lens aperture stochastically
    pub fn ray(&self, rng: &mut Rng, coords: PixelCoord) -> Ray {
        let vx = 2. * (coords.x / self.width as f32) - 1.;
        let vy = 1. - 2. * (coords.y / self.height as f32);

        let direction =
            self.forward + vx * self.half_width * self.right + vy * self.half_height * self.up;
        if self.lens_radius == 0.0 {
            return Ray::new(self.origin, direction);
        }

        let focus = self.origin + self.focal_distance * direction;
        let [dx, dy] = sample_unit_disk(rng);
        let lens_origin =
            self.origin + self.lens_radius * (dx * self.right + dy * self.up);
        Ray::new(lens_origin, focus - lens_origin)
    }
}

fn sample_unit_disk(rng: &mut Rng) -> [f32; 2] {
    let uniform = Uniform::new(0., 1.);
    let r = f32::sqrt(uniform.sample(rng));
    let theta = 2.0 * std::f32::consts::PI * uniform.sample(rng);
    [r * theta.cos(), r * theta.sin()]
}

/// Represent a coordinate in the pixel space.
///
/// $\left(0, 0\right)$ is the top left corner of the image.
#[derive(Debug, Clone, Copy)]
pub struct PixelCoord {
    pub x: f32,
    pub y: f32,
}

impl PixelCoord {
    /// Sample a point around the pixel located at `coords`
    ///
    /// Given a pixel coordinate (x, y), the sample is taken uniformely in
    /// $\left[x, x+1\right[ \times \left[y, y+1\right[$
    pub fn sample_around(rng: &mut Rng, x: u32, y: u32) -> PixelCoord {
        let uniform = Uniform::new(0., 1.);
        let dx = uniform.sample(rng);
        let dy = uniform.sample(rng);
        PixelCoord {
            x: x as f32 + dx,
            y: y as f32 + dy,
        }
    }

    pub fn center(x: u32, y: u32) -> PixelCoord {
        PixelCoord {
            x: x as f32 + 0.5,
            y: y as f32 + 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn center_pixel_looks_forward() {
        let camera = Camera::new(&CameraSettings::default(), 64, 64).unwrap();
        let mut rng = Rng::seed_from_u64(0);
        let ray = camera.ray(&mut rng, PixelCoord { x: 32.0, y: 32.0 });
        assert_eq!(ray.origin, Point::new(0.0, 0.0, 10.0));
        assert!(ray.direction.abs_diff_eq(-Vec3::Z, 1e-6));

        // top left goes up and left
        let corner = camera.ray(&mut rng, PixelCoord { x: 0.0, y: 0.0 });
        assert!(corner.direction.x < 0.0 && corner.direction.y > 0.0);
    }

    #[test]
    fn thin_lens_rays_converge_on_focal_plane() {
        let settings = CameraSettings {
            focal_distance: 10.0,
            lens_radius: 0.5,
            ..Default::default()
        };
        let camera = Camera::new(&settings, 32, 32).unwrap();
        let mut rng = Rng::seed_from_u64(3);
        for _ in 0..16 {
            let ray = camera.ray(&mut rng, PixelCoord { x: 16.0, y: 16.0 });
            let t = (0.0 - ray.origin.vec().z) / ray.direction.z;
            assert!(ray.at(t).vec().abs_diff_eq(Vec3::ZERO, 1e-4));
        }
    }

    #[test]
    fn degenerate_settings_are_rejected() {
        let looking_at_itself = CameraSettings {
            look_at: Point::new(0.0, 0.0, 10.0),
            ..Default::default()
        };
        assert!(Camera::new(&looking_at_itself, 8, 8).is_err());

        let up_along_view = CameraSettings {
            up: Vec3::Z,
            ..Default::default()
        };
        assert!(Camera::new(&up_along_view, 8, 8).is_err());
        assert!(Camera::new(&CameraSettings::default(), 0, 8).is_err());
    }
}
