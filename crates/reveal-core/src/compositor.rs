//! Software compositing of the two layers through the mask.
//!
//! GPU backends do the same blend in a shader; this is the reference path and
//! the one the canvas frontend uses.

use crate::error::LayerError;
use crate::mask::MaskField;
use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Decoded RGBA8 raster.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Layer {
    pub fn new(width: u32, height: u32, pixels: Vec<Rgba>) -> Result<Self, LayerError> {
        if width == 0 || height == 0 {
            return Err(LayerError::Empty);
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(LayerError::PixelCount {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build from tightly packed RGBA bytes (canvas `ImageData` layout).
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self, LayerError> {
        let pixels: &[Rgba] = bytemuck::try_cast_slice(bytes).map_err(|_| LayerError::PixelCount {
            width,
            height,
            expected: width as usize * height as usize,
            actual: bytes.len() / 4,
        })?;
        Self::new(width, height, pixels.to_vec())
    }

    pub fn filled(width: u32, height: u32, color: Rgba) -> Result<Self, LayerError> {
        Self::new(width, height, vec![color; width as usize * height as usize])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Nearest-pixel lookup at normalized `(u, v)`.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> Rgba {
        let x = ((u * self.width as f32) as u32).min(self.width - 1);
        let y = ((v * self.height as f32) as u32).min(self.height - 1);
        self.pixel(x, y)
    }
}

/// Which layer is drawn full-frame and which shows through the mask.
#[derive(Clone, Copy, Debug)]
pub struct LayerPair<'a> {
    pub base: &'a Layer,
    pub revealed: &'a Layer,
}

impl<'a> LayerPair<'a> {
    /// `first` is the normal image, `second` the one normally revealed;
    /// `inverted` swaps them.
    pub fn assign(inverted: bool, first: &'a Layer, second: &'a Layer) -> Self {
        if inverted {
            Self {
                base: second,
                revealed: first,
            }
        } else {
            Self {
                base: first,
                revealed: second,
            }
        }
    }
}

#[inline]
fn unit(c: u8) -> f32 {
    c as f32 / 255.0
}

#[inline]
fn byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}

/// Overlay blend of pure white onto `c`.
#[inline]
fn overlay_white(c: f32) -> f32 {
    if c <= 0.5 {
        2.0 * c
    } else {
        1.0
    }
}

/// Blend one pixel: `revealed` over `base` with coverage `m`, then the wet
/// highlight at `highlight * m` opacity.
pub fn blend_pixel(base: Rgba, revealed: Rgba, m: f32, highlight: Option<f32>) -> Rgba {
    let m = m.clamp(0.0, 1.0);
    if m == 0.0 {
        return base;
    }
    let mix = |b: u8, r: u8| unit(b) * (1.0 - m) + unit(r) * m;
    let mut rgb = [
        mix(base.r, revealed.r),
        mix(base.g, revealed.g),
        mix(base.b, revealed.b),
    ];
    if let Some(opacity) = highlight {
        let k = opacity * m;
        for c in &mut rgb {
            *c += (overlay_white(*c) - *c) * k;
        }
    }
    Rgba::new(
        byte(rgb[0]),
        byte(rgb[1]),
        byte(rgb[2]),
        byte(mix(base.a, revealed.a)),
    )
}

/// Compose a full frame into `out`. Layers and mask are sampled by normalized
/// coordinates, so they only need compatible aspect ratios.
pub fn composite(pair: LayerPair<'_>, mask: &MaskField, highlight: Option<f32>, out: &mut Layer) {
    let (w, h) = (out.width, out.height);
    for y in 0..h {
        let v = (y as f32 + 0.5) / h as f32;
        for x in 0..w {
            let u = (x as f32 + 0.5) / w as f32;
            let m = mask.sample(u, v);
            let px = blend_pixel(pair.base.sample(u, v), pair.revealed.sample(u, v), m, highlight);
            out.pixels[y as usize * w as usize + x as usize] = px;
        }
    }
}
