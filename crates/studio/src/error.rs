use derive_more::{Display, Error};

use crate::render::SessionState;

/// Why a single shape or light could not be turned into a renderer primitive.
///
/// These never abort a scene build: the descriptor is skipped and the build goes on.
#[derive(Debug, Clone, PartialEq, Display, Error)]
pub enum BuildError {
    #[display("invalid material type {value}, expected 0 (glass), 1 (mirror) or 2 (diffuse)")]
    InvalidMaterialType { value: i32 },
    #[display("could not load model {path}: {reason}")]
    ModelLoadError { path: String, reason: String },
    #[display("could not load environment map {path}: {reason}")]
    EnvironmentMapError { path: String, reason: String },
    #[display("degenerate geometry: {reason}")]
    DegenerateGeometry { reason: String },
    #[display("invalid spot cone: falloff start {falloff_start} must lie in [0, {cone_angle}]")]
    InvalidSpotCone { cone_angle: f32, falloff_start: f32 },
}

impl BuildError {
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("invalid tile configuration: {reason}")]
pub struct InvalidTileConfiguration {
    pub reason: String,
}

/// Failure reported by a renderer backend
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("{reason}")]
pub struct RendererError {
    pub reason: String,
}

impl RendererError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Display, Error)]
pub enum SessionError {
    #[display("{_0}")]
    InvalidTileConfiguration(InvalidTileConfiguration),
    #[display("cannot {action} while the session is {state:?}")]
    InvalidState {
        action: &'static str,
        state: SessionState,
    },
    #[display("descriptors are already used by another render session")]
    DescriptorsInUse,
    #[display("renderer rejected its configuration: {reason}")]
    ConfigureFailed { reason: String },
    #[display("render failed after tile {last_completed_tile}: {reason}")]
    RenderFailure {
        last_completed_tile: u32,
        reason: String,
    },
}

impl From<InvalidTileConfiguration> for SessionError {
    fn from(value: InvalidTileConfiguration) -> Self {
        Self::InvalidTileConfiguration(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum EditError {
    #[display("descriptors are locked by an active render session")]
    SessionActive,
    #[display("no descriptor with this handle")]
    UnknownDescriptor,
}

#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum PathError {
    #[display("path is {len} bytes long, at most {max} are allowed")]
    TooLong { len: usize, max: usize },
}
