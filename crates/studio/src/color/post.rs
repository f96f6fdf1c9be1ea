//! Display transform applied to accumulated colors before they reach a preview.
//!
//! The order is fixed: clamp, then gamma, then tone mapping. Both the gamma curve and
//! the tone-mapping operator expect their input in `[0, 1]`.

use super::{Rgb, Rgb8};

pub const DISPLAY_GAMMA: f32 = 2.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostProcess {
    pub gamma_correction: bool,
    pub tone_mapping: bool,
}

impl Default for PostProcess {
    fn default() -> Self {
        Self {
            gamma_correction: true,
            tone_mapping: false,
        }
    }
}

pub fn clamp(c: f32) -> f32 {
    if c.is_nan() {
        0.0
    } else {
        c.clamp(0.0, 1.0)
    }
}

pub fn gamma(c: f32) -> f32 {
    c.powf(1.0 / DISPLAY_GAMMA)
}

/// Reinhard operator
pub fn tone_map(c: f32) -> f32 {
    c / (1.0 + c)
}

impl PostProcess {
    pub fn apply(&self, color: Rgb) -> Rgb {
        color.map(|c| {
            let mut c = clamp(c);
            if self.gamma_correction {
                c = gamma(c);
            }
            if self.tone_mapping {
                c = tone_map(c);
            }
            c
        })
    }

    pub fn to_rgb8(&self, color: Rgb) -> Rgb8 {
        self.apply(color).to_byte_array()
    }
}
