use std::{sync::Arc, time::Instant};

use rayon::prelude::*;

use super::{
    renderer::{RenderSetup, Renderer, SamplerSettings},
    tile::TileIndex,
    FinishReason, RenderSession, SessionState,
};
use crate::{
    config::RenderConfig,
    descriptor::Descriptors,
    error::SessionError,
    preview::PreviewSink,
    scene::SceneBuilder,
    utils::timer::format_elapsed,
};

/// Drives a [Renderer] tile by tile and forwards finished tiles to a [PreviewSink]
pub struct GridCoordinator<'a, R, P: ?Sized> {
    renderer: R,
    sink: &'a P,
    session: RenderSession,
}

impl<'a, R: Renderer, P: PreviewSink + ?Sized> GridCoordinator<'a, R, P> {
    pub fn new(renderer: R, sink: &'a P) -> Self {
        Self {
            renderer,
            sink,
            session: RenderSession::default(),
        }
    }

    pub fn session(&self) -> &RenderSession {
        &self.session
    }

    pub fn state(&self) -> SessionState {
        self.session.state
    }

    pub fn progress(&self) -> f32 {
        self.session.progress
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn transition(&mut self, to: SessionState) {
        log::debug!("Render session: {:?} -> {:?}", self.session.state, to);
        self.session.state = to;
    }

    /// Builds the scene for `frame` and starts rendering it.
    ///
    /// The descriptors stay locked until [GridCoordinator::reset]. On error the session is
    /// back to `Idle` and nothing was sent to the renderer's film.
    pub fn start(
        &mut self,
        descriptors: &Descriptors,
        config: &RenderConfig,
        frame: u32,
        builder: &SceneBuilder,
    ) -> Result<(), SessionError> {
        if self.session.state != SessionState::Idle {
            return Err(SessionError::InvalidState {
                action: "start a render",
                state: self.session.state,
            });
        }

        let grid = config.tile_grid()?;
        let edit_lock = descriptors.lock().ok_or(SessionError::DescriptorsInUse)?;

        self.session = RenderSession {
            grid: Some(grid),
            post_process: config.post_process,
            frame,
            edit_lock: Some(edit_lock),
            ..Default::default()
        };
        self.transition(SessionState::Building);

        let built = builder.build(
            descriptors.shapes(),
            descriptors.lights(),
            config.build_options(frame),
        );
        self.session.build_issues = built.issues;

        let setup = RenderSetup {
            camera: config.camera,
            scene: Arc::new(built.scene),
            sampler: SamplerSettings {
                samples_per_pixel: config.samples_per_pixel,
                seed: config.seed,
            },
            integrator: config.integrator,
            grid,
        };
        let bound = self
            .renderer
            .configure(setup)
            .and_then(|_| self.renderer.begin_session());
        if let Err(err) = bound {
            log::error!("Could not start rendering: {err}");
            self.session = RenderSession::default();
            return Err(SessionError::ConfigureFailed { reason: err.reason });
        }

        log::info!(
            "Rendering frame {frame}: {}x{} pixels in {} tiles",
            grid.region().width,
            grid.region().height,
            grid.tile_count()
        );
        self.session.started_at = Some(Instant::now());
        self.transition(SessionState::Rendering);
        Ok(())
    }

    /// Renders the next tile and publishes it. Returns the completed tile, or `None` when
    /// the session is not rendering.
    ///
    /// A renderer error ends the session: it is `Finished` afterwards.
    pub fn advance(&mut self) -> Result<Option<TileIndex>, SessionError> {
        if self.session.state != SessionState::Rendering {
            return Ok(None);
        }

        let tile_count = self.session.tile_count();
        let expected = self.session.current_tile + 1;

        let result = match self.renderer.process_next_tile() {
            Ok(result) => result,
            Err(err) => return Err(self.fail(err.reason)),
        };
        if result.index != expected {
            return Err(self.fail(format!(
                "renderer completed tile {}, expected tile {expected}",
                result.index
            )));
        }

        self.session.current_tile = expected;
        self.session.progress = expected as f32 / tile_count as f32;
        log::trace!("Tile {expected}/{tile_count} done");
        self.publish_tile(expected);

        match (self.renderer.is_finished(), expected == tile_count) {
            (true, true) => self.complete(),
            (false, false) => (),
            (true, false) => {
                return Err(self.fail(format!(
                    "renderer finished after tile {expected} of {tile_count}"
                )))
            }
            (false, true) => {
                return Err(self.fail("renderer did not finish after the last tile".to_owned()))
            }
        }

        Ok(Some(expected))
    }

    /// Stops a running session without the end-of-render step. Returns whether there was
    /// anything to cancel.
    pub fn cancel(&mut self) -> bool {
        if self.session.state != SessionState::Rendering {
            return false;
        }

        log::info!(
            "Render cancelled after tile {}/{}",
            self.session.current_tile,
            self.session.tile_count()
        );
        self.session.finish_reason = Some(FinishReason::Cancelled);
        self.transition(SessionState::Finished);
        true
    }

    /// Forgets the finished session and unlocks the descriptors
    pub fn reset(&mut self) -> Result<(), SessionError> {
        match self.session.state {
            SessionState::Idle | SessionState::Finished => {
                self.transition(SessionState::Idle);
                self.session = RenderSession::default();
                Ok(())
            }
            state => Err(SessionError::InvalidState {
                action: "reset",
                state,
            }),
        }
    }

    /// Post-processes the pixels of `index` and sends them to the sink
    fn publish_tile(&self, index: TileIndex) {
        let Some(tile) = self.session.grid.and_then(|grid| grid.tile(index)) else {
            return;
        };
        let film = self.renderer.film();
        let post_process = self.session.post_process;
        let sink = self.sink;

        tile.ys().into_par_iter().for_each(|y| {
            for x in tile.xs() {
                sink.set_pixel(x, y, post_process.to_rgb8(film.get(x, y)));
            }
        });
        sink.commit();
    }

    fn complete(&mut self) {
        self.session.finish_reason = Some(FinishReason::Completed);
        self.transition(SessionState::Finished);

        if self.session.end_step_done {
            return;
        }
        self.session.end_step_done = true;
        self.renderer.end_session();
        let elapsed = self
            .session
            .started_at
            .map(|start| format_elapsed(start.elapsed()))
            .unwrap_or_default();
        log::info!("Render of frame {} finished in {elapsed}", self.session.frame);
    }

    fn fail(&mut self, reason: String) -> SessionError {
        let last_completed_tile = self.session.current_tile;
        log::error!("Render failed after tile {last_completed_tile}: {reason}");
        self.session.finish_reason = Some(FinishReason::Failed {
            last_completed_tile,
        });
        self.transition(SessionState::Finished);
        SessionError::RenderFailure {
            last_completed_tile,
            reason,
        }
    }
}
