use std::fmt::Display;

use super::{path::BoundedPath, shape::ShapeKind};
use crate::math::Float3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightKind {
    Point,
    Spot,
    Area,
    InfiniteArea,
}

impl LightKind {
    pub const ALL: [LightKind; 4] = [Self::Point, Self::Spot, Self::Area, Self::InfiniteArea];
}

impl Display for LightKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            LightKind::Point => "Point",
            LightKind::Spot => "Spot",
            LightKind::Area => "Area",
            LightKind::InfiniteArea => "Infinite Area",
        })
    }
}

/// An editable light source. Angles are in radians.
#[derive(Debug, Clone, PartialEq)]
pub enum LightDescriptor {
    Point {
        position: Float3,
        intensity: Float3,
    },
    Spot {
        position: Float3,
        direction: Float3,
        intensity: Float3,
        /// Half angle of the cone
        cone_angle: f32,
        /// Angle at which the intensity starts to fall off, at most `cone_angle`
        falloff_start: f32,
    },
    /// Emitting surface. Accepted by the editor, produces no light when built.
    Area {
        emission: Float3,
        shape_kind: ShapeKind,
    },
    InfiniteArea {
        image_path: BoundedPath,
    },
}

impl LightDescriptor {
    pub const DEFAULT_ENVIRONMENT_PATH: &'static str = "./data/images/envmap.png";

    pub fn new(kind: LightKind) -> Self {
        match kind {
            LightKind::Point => LightDescriptor::Point {
                position: [0.0; 3],
                intensity: [0.0; 3],
            },
            LightKind::Spot => LightDescriptor::Spot {
                position: [0.0; 3],
                direction: [0.0; 3],
                intensity: [0.0; 3],
                cone_angle: 0.0,
                falloff_start: 0.0,
            },
            LightKind::Area => LightDescriptor::Area {
                emission: [0.0; 3],
                shape_kind: ShapeKind::Disk,
            },
            LightKind::InfiniteArea => LightDescriptor::InfiniteArea {
                image_path: BoundedPath(Self::DEFAULT_ENVIRONMENT_PATH.to_owned()),
            },
        }
    }

    pub fn kind(&self) -> LightKind {
        match self {
            LightDescriptor::Point { .. } => LightKind::Point,
            LightDescriptor::Spot { .. } => LightKind::Spot,
            LightDescriptor::Area { .. } => LightKind::Area,
            LightDescriptor::InfiniteArea { .. } => LightKind::InfiniteArea,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_light_has_requested_kind() {
        for kind in LightKind::ALL {
            assert_eq!(LightDescriptor::new(kind).kind(), kind);
        }
    }

    #[test]
    fn environment_defaults_to_bundled_map() {
        let LightDescriptor::InfiniteArea { image_path } = LightDescriptor::new(LightKind::InfiniteArea)
        else {
            panic!("expected an infinite area light")
        };
        assert_eq!(image_path.as_str(), "./data/images/envmap.png");
    }
}
