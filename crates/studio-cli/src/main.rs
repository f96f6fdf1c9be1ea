mod output;
mod progress;
mod utils;

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use output::FileOutput;
use progress::PercentBar;
use studio::{
    camera::CameraSettings,
    color::post::PostProcess,
    config::{AccelerationKind, RenderConfig},
    loader::{ImageEnvironmentLoader, ObjImporter},
    preview::PreviewBuffer,
    render::{GridCoordinator, ReferenceRenderer, SessionState},
    scene::{examples::ExampleScene, SceneBuilder},
    utils::timer::timed_scope_log,
};
use utils::{AvailableIntegrator, AvailableScene, Dimensions, Frames, RegionArg, TileCounts};

#[derive(Parser, Debug)]
pub struct Args {
    #[arg(long, value_enum, default_value_t)]
    /// Scene selector
    scene: AvailableScene,

    #[arg(short, long, default_value = "1024x768")]
    /// Screen dimension in format `width`x`height`
    dimensions: Dimensions,

    #[arg(short, long, default_value = "10x10")]
    /// Number of tiles in format `columns`x`rows`
    tiles: TileCounts,

    #[arg(long, default_value_t = 16)]
    /// Samples per pixel
    spp: u32,

    #[arg(short, long, value_enum, default_value_t)]
    integrator: AvailableIntegrator,

    #[arg(long, default_value_t = 3)]
    /// Depth after which paths may be terminated, path integrator only
    rr_depth: u32,

    #[arg(long)]
    /// Maximum bounce count of the direct integrator, unbounded if absent
    max_depth: Option<u32>,

    #[arg(long)]
    /// Test every primitive instead of building a BVH
    exhaustive: bool,

    #[arg(long)]
    /// Disable gamma correction of the preview
    no_gamma: bool,

    #[arg(long)]
    /// Enable tone mapping of the preview
    tone_map: bool,

    #[arg(short, long)]
    /// Only render this part of the image, in format `x,y,width,height`
    region: Option<RegionArg>,

    #[arg(long, default_value = "0")]
    /// Frames to render, either "3" or "0..24" (inclusive)
    frames: Frames,

    #[arg(long)]
    /// Load per-frame geometry for meshes supporting key frames
    key_frames: bool,

    #[arg(long, default_value_t)]
    /// Seed to use for all the random stuff.
    /// Given a seed, the rendering is deterministic (the output only depends on x, y, sample and seed).
    seed: u64,

    #[arg(short, long, default_value = "output/render.png")]
    output: std::path::PathBuf,
}

impl Args {
    fn render_config(&self) -> RenderConfig {
        RenderConfig {
            image_width: self.dimensions.width,
            image_height: self.dimensions.height,
            tiles_x: self.tiles.x,
            tiles_y: self.tiles.y,
            samples_per_pixel: self.spp,
            integrator: self.integrator.with_depths(self.rr_depth, self.max_depth),
            acceleration: if self.exhaustive {
                AccelerationKind::Exhaustive
            } else {
                AccelerationKind::Bvh
            },
            post_process: PostProcess {
                gamma_correction: !self.no_gamma,
                tone_mapping: self.tone_map,
            },
            region: self.region.map(|RegionArg(region)| region),
            frames: self.frames.0.clone(),
            key_frames: self.key_frames,
            seed: self.seed,
            camera: CameraSettings::default(),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let config = args.render_config();

    let example: ExampleScene = args.scene.into();
    log::info!("loading scene {}", example.name());
    let descriptors = example.descriptors();

    let builder = SceneBuilder::new(&ObjImporter, &ImageEnvironmentLoader);
    let preview = PreviewBuffer::new(config.image_width, config.image_height);
    let output = FileOutput::new(&args.output, config.frames.clone().count() > 1);
    let mut coordinator = GridCoordinator::new(ReferenceRenderer::new(), &preview);

    for frame in config.frames.clone() {
        coordinator
            .start(&descriptors, &config, frame, &builder)
            .with_context(|| format!("Could not start rendering frame {frame}"))?;

        timed_scope_log("Render frame", || -> Result<()> {
            while coordinator.state() == SessionState::Rendering {
                coordinator.advance()?;
                print!(
                    "\r{}",
                    PercentBar {
                        percent: coordinator.progress(),
                        width: 50
                    }
                );
                std::io::stdout().flush()?;
            }
            println!();
            Ok(())
        })
        .res?;

        output.save(frame, &preview.snapshot())?;
        coordinator.reset()?;
    }

    log::info!("Done");
    Ok(())
}
