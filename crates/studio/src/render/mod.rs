//! Tile by tile rendering of a scene into a preview.
//!
//! A [GridCoordinator] owns one [RenderSession] at a time and moves it through
//! `Idle -> Building -> Rendering -> Finished`:
//! - [GridCoordinator::start] builds the scene from the descriptors and binds it into the [Renderer],
//! - each [GridCoordinator::advance] renders one tile and pushes it, post-processed, to the [crate::preview::PreviewSink],
//! - [GridCoordinator::cancel] stops early, [GridCoordinator::reset] goes back to `Idle`.

pub mod coordinator;
pub mod reference;
pub mod renderer;
pub mod tile;

use std::time::Instant;

pub use coordinator::GridCoordinator;
pub use reference::ReferenceRenderer;
pub use renderer::{Film, RenderSetup, Renderer, SamplerSettings, TileResult};
pub use tile::{Region, TileGrid, TileIndex};

use crate::{color::post::PostProcess, descriptor::EditLock, scene::BuildIssue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Building,
    Rendering,
    Finished,
}

/// Why a session reached [SessionState::Finished]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Completed,
    Cancelled,
    /// The renderer failed, the tiles after `last_completed_tile` were not rendered
    Failed { last_completed_tile: TileIndex },
}

/// One attempt at rendering an image, from scene build to completion.
#[derive(Debug, Default)]
pub struct RenderSession {
    state: SessionState,
    grid: Option<TileGrid>,
    post_process: PostProcess,
    frame: u32,
    /// Last completed tile, 0 before the first one
    current_tile: TileIndex,
    progress: f32,
    finish_reason: Option<FinishReason>,
    end_step_done: bool,
    started_at: Option<Instant>,
    build_issues: Vec<BuildIssue>,
    edit_lock: Option<EditLock>,
}

impl RenderSession {
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Fraction of the tiles completed, in `[0, 1]`
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn current_tile(&self) -> TileIndex {
        self.current_tile
    }

    pub fn tile_count(&self) -> u32 {
        self.grid.map_or(0, |grid| grid.tile_count())
    }

    pub fn grid(&self) -> Option<&TileGrid> {
        self.grid.as_ref()
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.finish_reason
    }

    /// Whether the end-of-render step ran
    pub fn end_step_done(&self) -> bool {
        self.end_step_done
    }

    /// Descriptors skipped while building the scene
    pub fn build_issues(&self) -> &[BuildIssue] {
        &self.build_issues
    }
}
