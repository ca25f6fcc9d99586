//! Per-key RGB animation
//!
//! Every key carries an intensity in `0..=100`. A press sets it to full, then it fades by a fixed step per tick.
//! The color of every lit key comes from one shared hue, so the whole pad shifts color as keys are pressed.
use crate::KEY_COUNT;
use crate::config::{LightConfig, PixelStyle, ReleaseBehavior};
use crate::edge::KeyEdges;

/// Intensity of a key right after it is pressed
pub const MAX_INTENSITY: u8 = 100;

/// Packed pixel of an unlit key
pub const PIXEL_OFF: u32 = 0x0000_0000;
/// Packed pixel of a lit key when [`PixelStyle::OnOff`] is used
pub const PIXEL_ON: u32 = 0xFFFF_FFFF;

/// One packed word per key, in scan order
pub type Frame = [u32; KEY_COUNT];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack as `G R B A` from the most significant byte down, alpha fixed to `0xFF`
    pub fn pack_grb(self) -> u32 {
        (self.g as u32) << 24 | (self.r as u32) << 16 | (self.b as u32) << 8 | 0xFF
    }
}

fn channel(component: f32) -> u8 {
    let scaled = component * 255.0 + 0.5;
    if scaled <= 0.0 {
        0
    } else if scaled >= 255.0 {
        255
    } else {
        scaled as u8
    }
}

/// Standard HSV to RGB conversion. `hue` is in degrees and taken modulo 360, `s` and `v` are in `0.0..=1.0`.
pub fn hsv_to_rgb(hue: u16, s: f32, v: f32) -> Rgb {
    let h = (hue % 360) as f32 / 60.0;
    let sector = h as u8;
    let f = h - sector as f32;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    let (r, g, b) = match sector {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    Rgb::new(channel(r), channel(g), channel(b))
}

/// The trait for a strip of addressable LEDs that accepts whole frames.
pub trait FrameSink {
    type Error: core::fmt::Debug;

    /// Write one frame, exactly one word per key
    async fn write_frame(&mut self, frame: &Frame) -> Result<(), Self::Error>;
}

/// Keeps per-key intensity and renders one frame per tick.
pub struct LedAnimator {
    intensities: [u8; KEY_COUNT],
    frame: Frame,
    config: LightConfig,
}

impl LedAnimator {
    pub fn new(config: LightConfig) -> Self {
        Self {
            intensities: [0; KEY_COUNT],
            frame: [PIXEL_OFF; KEY_COUNT],
            config,
        }
    }

    /// Light a key at full intensity
    pub fn trigger(&mut self, idx: usize) {
        if let Some(intensity) = self.intensities.get_mut(idx) {
            *intensity = MAX_INTENSITY;
        }
    }

    /// Key released. Only clears the key when [`ReleaseBehavior::Clear`] is configured.
    pub fn release(&mut self, idx: usize) {
        if self.config.release == ReleaseBehavior::Clear {
            if let Some(intensity) = self.intensities.get_mut(idx) {
                *intensity = 0;
            }
        }
    }

    pub fn intensity(&self, idx: usize) -> u8 {
        self.intensities.get(idx).copied().unwrap_or(0)
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Fade every key without an edge this tick, then rebuild the whole frame with `hue`.
    pub fn render(&mut self, edges: &KeyEdges, hue: u16) -> &Frame {
        for (idx, edge) in edges.iter().enumerate() {
            if edge.is_none() {
                self.intensities[idx] = self.intensities[idx].saturating_sub(self.config.decay_step);
            }
            self.frame[idx] = self.pixel(self.intensities[idx], hue);
        }
        &self.frame
    }

    fn pixel(&self, intensity: u8, hue: u16) -> u32 {
        if intensity == 0 {
            return PIXEL_OFF;
        }
        match self.config.style {
            PixelStyle::OnOff => PIXEL_ON,
            PixelStyle::Hsv => {
                let value = intensity.min(MAX_INTENSITY) as f32 / MAX_INTENSITY as f32;
                hsv_to_rgb(hue, 1.0, value).pack_grb()
            }
        }
    }
}
