use crate::{
    color::Rgb,
    error::BuildError,
    math::{float::Vec3AsNonZero, point::Point, sphere_uv_from_direction, Vec3},
};

/// A light the renderer can sample
#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    Point {
        position: Point,
        intensity: Rgb,
    },
    Spot {
        position: Point,
        /// Normalized
        direction: Vec3,
        intensity: Rgb,
        cos_total_width: f32,
        cos_falloff_start: f32,
    },
    InfiniteArea(EnvironmentMap),
}

impl Light {
    /// Builds a spot light from its cone half angles, in radians
    pub fn spot(
        position: Point,
        direction: Vec3,
        intensity: Rgb,
        cone_angle: f32,
        falloff_start: f32,
    ) -> Result<Self, BuildError> {
        if !(0.0 <= falloff_start && falloff_start <= cone_angle) {
            return Err(BuildError::InvalidSpotCone {
                cone_angle,
                falloff_start,
            });
        }
        let direction = direction
            .into_non_zero(1e-6)
            .ok_or_else(|| BuildError::degenerate("spot light direction is zero"))?
            .normalize();

        Ok(Light::Spot {
            position,
            direction,
            intensity,
            cos_total_width: cone_angle.cos(),
            cos_falloff_start: falloff_start.cos(),
        })
    }

    /// Smooth cone attenuation of a spot light in direction `w`, 1 for other lights
    pub fn falloff(&self, w: Vec3) -> f32 {
        let Light::Spot {
            direction,
            cos_total_width,
            cos_falloff_start,
            ..
        } = self
        else {
            return 1.0;
        };

        let cos_theta = w.normalize_or_zero().dot(*direction);
        if cos_theta < *cos_total_width {
            0.0
        } else if cos_theta >= *cos_falloff_start {
            1.0
        } else {
            let delta = (cos_theta - cos_total_width) / (cos_falloff_start - cos_total_width);
            delta * delta * delta * delta
        }
    }
}

/// A lat-long environment image in linear colors
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentMap {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Rgb>,
}

impl EnvironmentMap {
    pub fn uniform(color: Rgb) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![color],
        }
    }

    /// Radiance coming from `direction`
    pub fn lookup(&self, direction: Vec3) -> Rgb {
        if self.pixels.is_empty() {
            return Rgb::default();
        }
        let [u, v] = sphere_uv_from_direction(direction.normalize_or_zero());
        let x = ((u * self.width as f32) as u32).min(self.width - 1);
        let y = ((v * self.height as f32) as u32).min(self.height - 1);
        self.pixels
            .get((y * self.width + x) as usize)
            .copied()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spot_cone_is_validated() {
        let spot = |cone, falloff| Light::spot(Point::ORIGIN, -Vec3::Y, Rgb::splat(1.0), cone, falloff);
        assert!(spot(0.5, 0.25).is_ok());
        assert!(spot(0.0, 0.0).is_ok());
        assert!(matches!(spot(0.25, 0.5), Err(BuildError::InvalidSpotCone { .. })));
        assert!(matches!(spot(0.5, -0.1), Err(BuildError::InvalidSpotCone { .. })));
        assert!(matches!(
            Light::spot(Point::ORIGIN, Vec3::ZERO, Rgb::splat(1.0), 0.5, 0.25),
            Err(BuildError::DegenerateGeometry { .. })
        ));
    }

    #[test]
    fn spot_falloff() {
        let spot = Light::spot(Point::ORIGIN, -Vec3::Y, Rgb::splat(1.0), 0.5, 0.25).unwrap();
        assert_eq!(spot.falloff(-Vec3::Y), 1.0);
        assert_eq!(spot.falloff(Vec3::X), 0.0);
        let inside = Vec3::new(0.35f32.tan(), -1.0, 0.0);
        let f = spot.falloff(inside);
        assert!(0.0 < f && f < 1.0);
    }

    #[test]
    fn environment_lookup_stays_in_bounds() {
        let map = EnvironmentMap {
            width: 2,
            height: 1,
            pixels: vec![Rgb::splat(0.25), Rgb::splat(0.75)],
        };
        for d in [Vec3::X, -Vec3::X, Vec3::Y, -Vec3::Y, Vec3::Z, -Vec3::Z] {
            let c = map.lookup(d);
            assert!(c == Rgb::splat(0.25) || c == Rgb::splat(0.75));
        }
        assert_eq!(EnvironmentMap::uniform(Rgb::splat(2.0)).lookup(Vec3::Z), Rgb::splat(2.0));
    }
}
