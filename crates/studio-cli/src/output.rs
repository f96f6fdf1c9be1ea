use std::path::PathBuf;

use anyhow::{Context, Result};
use image::RgbImage;

/// Saves previews as PNG files.
///
/// A single frame goes to `path` as is. With several frames, the frame number is appended to
/// the file stem: `out.png` becomes `out_000012.png`.
pub struct FileOutput {
    path: PathBuf,
    multiple_frames: bool,
}

impl FileOutput {
    pub fn new(path: impl Into<PathBuf>, multiple_frames: bool) -> Self {
        Self {
            path: path.into(),
            multiple_frames,
        }
    }

    pub fn frame_path(&self, frame: u32) -> PathBuf {
        if !self.multiple_frames {
            return self.path.clone();
        }
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "frame".to_owned());
        let ext = self
            .path
            .extension()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "png".to_owned());
        self.path.with_file_name(format!("{stem}_{frame:06}.{ext}"))
    }

    pub fn save(&self, frame: u32, image: &RgbImage) -> Result<PathBuf> {
        let path = self.frame_path(frame);
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Could not create {}", dir.display()))?;
        }
        image
            .save(&path)
            .with_context(|| format!("Could not save {}", path.display()))?;
        log::info!("Saved {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::FileOutput;

    #[test]
    fn frame_paths() {
        let single = FileOutput::new("out/render.png", false);
        assert_eq!(single.frame_path(4), PathBuf::from("out/render.png"));

        let many = FileOutput::new("out/render.png", true);
        assert_eq!(many.frame_path(4), PathBuf::from("out/render_000004.png"));
    }
}
