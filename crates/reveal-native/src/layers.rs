// Procedural stand-ins for the two image layers.
//
// The "normal" layer is a soft portrait-like gradient with a few blurred
// blobs; the "glitch" layer is derived from it with channel splitting,
// displaced scanline slices and posterization.

use glam::Vec2;
use rand::{rngs::StdRng, Rng, SeedableRng};
use reveal_core::{Layer, LayerError, Rgba};

const CHANNEL_SHIFT_PX: i32 = 6;
const SLICE_COUNT: usize = 14;
const SLICE_MAX_SHIFT_PX: i32 = 40;
const POSTERIZE_LEVELS: f32 = 4.0;

fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}

pub fn normal_layer(width: u32, height: u32) -> Result<Layer, LayerError> {
    let size = Vec2::new(width as f32, height as f32);
    let blobs = [
        (Vec2::new(0.5, 0.42), 0.28, [0.93, 0.78, 0.66]),
        (Vec2::new(0.3, 0.75), 0.22, [0.35, 0.52, 0.70]),
        (Vec2::new(0.78, 0.2), 0.18, [0.95, 0.60, 0.45]),
    ];
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        for x in 0..width {
            let uv = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) / size;
            let mut rgb = [0.12 + 0.2 * uv.y, 0.14 + 0.1 * uv.x, 0.22 + 0.25 * (1.0 - uv.y)];
            for (center, radius, color) in blobs {
                let d = uv.distance(center) / radius;
                let w = (-d * d * 2.0).exp();
                for (c, target) in rgb.iter_mut().zip(color) {
                    *c += (target - *c) * w;
                }
            }
            pixels.push(Rgba::new(to_byte(rgb[0]), to_byte(rgb[1]), to_byte(rgb[2]), 255));
        }
    }
    Layer::new(width, height, pixels)
}

/// Glitched copy of `normal`. Deterministic per `seed`.
pub fn glitch_layer(normal: &Layer, seed: u32) -> Result<Layer, LayerError> {
    let (w, h) = (normal.width() as i32, normal.height() as i32);
    let mut rng = StdRng::seed_from_u64(seed as u64);

    // Per-row horizontal offsets from a handful of random slices.
    let mut row_shift = vec![0i32; h as usize];
    for _ in 0..SLICE_COUNT {
        let start = rng.gen_range(0..h);
        let len = rng.gen_range(2..(h / 12).max(3));
        let shift = rng.gen_range(-SLICE_MAX_SHIFT_PX..=SLICE_MAX_SHIFT_PX);
        for row in row_shift.iter_mut().skip(start as usize).take(len as usize) {
            *row = shift;
        }
    }

    let fetch = |x: i32, y: i32| normal.pixel(x.rem_euclid(w) as u32, y.clamp(0, h - 1) as u32);
    let posterize = |c: u8| {
        let v = c as f32 / 255.0;
        to_byte((v * POSTERIZE_LEVELS).round() / POSTERIZE_LEVELS)
    };

    let mut pixels = Vec::with_capacity((w * h) as usize);
    for y in 0..h {
        let sx = row_shift[y as usize];
        for x in 0..w {
            let r = fetch(x + sx + CHANNEL_SHIFT_PX, y).r;
            let g = fetch(x + sx, y).g;
            let b = fetch(x + sx - CHANNEL_SHIFT_PX, y).b;
            // Scanline darkening on every third row.
            let dim = if y % 3 == 0 { 0.8 } else { 1.0 };
            let px = Rgba::new(
                posterize(255 - r),
                posterize((g as f32 * dim) as u8),
                posterize(b.saturating_add(40)),
                255,
            );
            pixels.push(px);
        }
    }
    Layer::new(normal.width(), normal.height(), pixels)
}
