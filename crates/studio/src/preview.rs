//! Where post-processed pixels go.
//!
//! A [PreviewSink] is written to by the coordinator, possibly from several threads at once,
//! and made visible with [PreviewSink::commit]. [PreviewBuffer] is an in-memory sink whose
//! committed snapshots never show a half-written pixel.

use std::sync::{
    atomic::{AtomicU32, AtomicUsize, Ordering},
    Arc, RwLock,
};

use image::RgbImage;

use crate::color::Rgb8;

pub trait PreviewSink: Sync {
    fn set_pixel(&self, x: u32, y: u32, color: Rgb8);

    /// Makes the writes done so far visible
    fn commit(&self);
}

/// An in-memory [PreviewSink].
///
/// Pixels are staged in one atomic word each, [PreviewBuffer::snapshot] returns the image as of
/// the last commit.
#[derive(Debug)]
pub struct PreviewBuffer {
    width: u32,
    height: u32,
    staging: Vec<AtomicU32>,
    committed: RwLock<Arc<RgbImage>>,
    commits: AtomicUsize,
}

fn pack([r, g, b]: Rgb8) -> u32 {
    u32::from_le_bytes([r, g, b, 0])
}

fn unpack(value: u32) -> Rgb8 {
    let [r, g, b, _] = value.to_le_bytes();
    [r, g, b]
}

impl PreviewBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            staging: (0..len).map(|_| AtomicU32::new(0)).collect(),
            committed: RwLock::new(Arc::new(RgbImage::new(width, height))),
            commits: AtomicUsize::new(0),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The image as of the last [PreviewSink::commit]
    pub fn snapshot(&self) -> Arc<RgbImage> {
        match self.committed.read() {
            Ok(image) => image.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn commit_count(&self) -> usize {
        self.commits.load(Ordering::Acquire)
    }
}

impl PreviewSink for PreviewBuffer {
    fn set_pixel(&self, x: u32, y: u32, color: Rgb8) {
        if x >= self.width || y >= self.height {
            crate::utils::log_once::warn_once!("preview write out of bounds ignored");
            return;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.staging[idx].store(pack(color), Ordering::Relaxed);
    }

    fn commit(&self) {
        let image = RgbImage::from_fn(self.width, self.height, |x, y| {
            let idx = y as usize * self.width as usize + x as usize;
            image::Rgb(unpack(self.staging[idx].load(Ordering::Relaxed)))
        });

        let mut committed = match self.committed.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *committed = Arc::new(image);
        self.commits.fetch_add(1, Ordering::AcqRel);
    }
}

#[cfg(test)]
mod tests {
    use rayon::prelude::*;

    use super::*;

    #[test]
    fn writes_show_after_commit() {
        let preview = PreviewBuffer::new(4, 3);
        preview.set_pixel(1, 2, [10, 20, 30]);
        assert_eq!(preview.snapshot().get_pixel(1, 2).0, [0, 0, 0]);

        preview.commit();
        assert_eq!(preview.snapshot().get_pixel(1, 2).0, [10, 20, 30]);
        assert_eq!(preview.commit_count(), 1);
    }

    #[test]
    fn old_snapshots_are_immutable() {
        let preview = PreviewBuffer::new(2, 2);
        preview.set_pixel(0, 0, [1, 1, 1]);
        preview.commit();
        let before = preview.snapshot();

        preview.set_pixel(0, 0, [2, 2, 2]);
        preview.commit();
        assert_eq!(before.get_pixel(0, 0).0, [1, 1, 1]);
        assert_eq!(preview.snapshot().get_pixel(0, 0).0, [2, 2, 2]);
    }

    #[test]
    fn parallel_writes() {
        let preview = PreviewBuffer::new(64, 64);
        (0..64u32).into_par_iter().for_each(|y| {
            for x in 0..64 {
                preview.set_pixel(x, y, [x as u8, y as u8, 255]);
            }
        });
        preview.set_pixel(64, 0, [1, 2, 3]);
        preview.commit();

        let image = preview.snapshot();
        assert!(image
            .enumerate_pixels()
            .all(|(x, y, p)| p.0 == [x as u8, y as u8, 255]));
    }
}
