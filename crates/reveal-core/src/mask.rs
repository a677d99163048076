//! Metaball mask: three follower circles become one organic silhouette.
//!
//! The pipeline runs as ordered stages over a [`MaskField`]:
//!
//! 1. [`rasterize`] samples the union of the circles through a noise warp,
//!    which breaks their circular symmetry;
//! 2. [`gaussian_blur`] smears neighbouring shapes into each other;
//! 3. [`threshold`] snaps the blur back to a near-binary outline, so touching
//!    blobs fuse into one contiguous shape.
//!
//! The field lives on a grid that may be coarser than the render surface;
//! distances are expressed in render units and converted per cell.

use crate::config::RevealConfig;
use crate::constants::{
    BLUR_SIGMA, NOISE_OCTAVES, NOISE_PERIOD_SEC, THRESHOLD_BIAS, THRESHOLD_GAIN,
};
use crate::presets::IntensityParams;
use glam::Vec2;
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use smallvec::SmallVec;
use std::f32::consts::TAU;

/// Filled circle in render units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    fn is_drawable(&self) -> bool {
        self.center.is_finite() && self.radius.is_finite() && self.radius > 0.0
    }
}

/// Row-major scalar field with values in [0,1].
#[derive(Clone, Debug, PartialEq)]
pub struct MaskField {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl MaskField {
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        self.data[y * self.width + x] = value;
    }

    pub fn clear(&mut self) {
        self.data.fill(0.0);
    }

    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|v| *v <= 0.0)
    }

    /// Mean value over the field.
    pub fn coverage(&self) -> f32 {
        self.data.iter().sum::<f32>() / self.data.len() as f32
    }

    /// Bilinear lookup at normalized `(u, v)`, clamped to the edges.
    pub fn sample(&self, u: f32, v: f32) -> f32 {
        let fx = (u * self.width as f32 - 0.5).clamp(0.0, (self.width - 1) as f32);
        let fy = (v * self.height as f32 - 0.5).clamp(0.0, (self.height - 1) as f32);
        let x0 = fx.floor() as usize;
        let y0 = fy.floor() as usize;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);
        let tx = fx - x0 as f32;
        let ty = fy - y0 as f32;
        let top = self.get(x0, y0) * (1.0 - tx) + self.get(x1, y0) * tx;
        let bottom = self.get(x0, y1) * (1.0 - tx) + self.get(x1, y1) * tx;
        top * (1.0 - ty) + bottom * ty
    }

    /// Quantize to one byte per cell (for texture upload).
    pub fn write_u8(&self, out: &mut Vec<u8>) {
        out.clear();
        out.extend(
            self.data
                .iter()
                .map(|v| (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8),
        );
    }
}

/// Noise displacement applied while rasterizing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Warp {
    /// Peak displacement in render units.
    pub scale: f32,
    /// Noise frequency in cycles per render unit.
    pub frequency: f32,
}

impl Warp {
    pub const NONE: Warp = Warp {
        scale: 0.0,
        frequency: 0.0,
    };
}

/// Noise frequency at `time_sec`, oscillating smoothly between `base` and
/// `2 * base` over [`NOISE_PERIOD_SEC`].
pub fn noise_frequency(base: f32, time_sec: f32) -> f32 {
    let phase = (time_sec / NOISE_PERIOD_SEC).fract() * TAU;
    base * (1.5 - 0.5 * phase.cos())
}

/// Two independent fractal-noise channels driving the x and y displacement.
pub struct NoiseField {
    x: Fbm<Perlin>,
    y: Fbm<Perlin>,
}

impl NoiseField {
    pub fn new(seed: u32) -> Self {
        Self {
            x: Fbm::<Perlin>::new(seed).set_octaves(NOISE_OCTAVES),
            y: Fbm::<Perlin>::new(seed.wrapping_add(1)).set_octaves(NOISE_OCTAVES),
        }
    }

    /// Displacement at render-space point `p` for `warp`, in render units.
    pub fn displacement(&self, p: Vec2, warp: Warp) -> Vec2 {
        if warp.scale == 0.0 {
            return Vec2::ZERO;
        }
        let q = [
            (p.x * warp.frequency) as f64,
            (p.y * warp.frequency) as f64,
        ];
        let n = Vec2::new(self.x.get(q) as f32, self.y.get(q) as f32).clamp(-Vec2::ONE, Vec2::ONE);
        n * (0.5 * warp.scale)
    }
}

/// Stage 1: union of `circles` sampled through the noise warp. Edges are
/// anti-aliased over one grid cell. Overwrites the whole field.
pub fn rasterize(
    field: &mut MaskField,
    circles: &[Circle],
    render_size: Vec2,
    noise: &NoiseField,
    warp: Warp,
) {
    field.clear();
    let live: SmallVec<[Circle; 3]> = circles.iter().copied().filter(Circle::is_drawable).collect();
    if live.is_empty() {
        return;
    }

    let cell = render_size / Vec2::new(field.width as f32, field.height as f32);
    let aa = cell.max_element().max(f32::EPSILON);

    // Cells farther than this from every circle cannot be reached by the warp.
    let margin = 0.5 * warp.scale.abs() + aa;
    let mut lo = Vec2::splat(f32::INFINITY);
    let mut hi = Vec2::splat(f32::NEG_INFINITY);
    for c in &live {
        lo = lo.min(c.center - Vec2::splat(c.radius + margin));
        hi = hi.max(c.center + Vec2::splat(c.radius + margin));
    }
    let x0 = ((lo.x / cell.x).floor().max(0.0) as usize).min(field.width);
    let x1 = ((hi.x / cell.x).ceil().max(0.0) as usize).min(field.width);
    let y0 = ((lo.y / cell.y).floor().max(0.0) as usize).min(field.height);
    let y1 = ((hi.y / cell.y).ceil().max(0.0) as usize).min(field.height);

    for y in y0..y1 {
        for x in x0..x1 {
            let p = (Vec2::new(x as f32, y as f32) + 0.5) * cell;
            let q = p + noise.displacement(p, warp);
            let mut value = 0.0f32;
            for c in &live {
                let edge = (c.radius - q.distance(c.center)) / aa + 0.5;
                value = value.max(edge.clamp(0.0, 1.0));
            }
            field.set(x, y, value);
        }
    }
}

/// Normalized 1-D Gaussian kernel covering ±3σ (σ in grid cells).
pub fn gaussian_kernel(sigma: f32) -> Vec<f32> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return vec![1.0];
    }
    let radius = (3.0 * sigma).ceil() as isize;
    let denom = 2.0 * sigma * sigma;
    let mut kernel: Vec<f32> = (-radius..=radius)
        .map(|i| (-((i * i) as f32) / denom).exp())
        .collect();
    let sum: f32 = kernel.iter().sum();
    for k in &mut kernel {
        *k /= sum;
    }
    kernel
}

/// Stage 2: separable blur. Outside the field counts as empty, so shapes fade
/// toward the border like a filter region would.
pub fn gaussian_blur(field: &mut MaskField, kernel: &[f32], scratch: &mut Vec<f32>) {
    if kernel.len() <= 1 || field.is_blank() {
        return;
    }
    let (w, h) = (field.width, field.height);
    let r = (kernel.len() / 2) as isize;
    scratch.clear();
    scratch.resize(w * h, 0.0);

    for y in 0..h {
        let row = &field.data[y * w..(y + 1) * w];
        for x in 0..w {
            let mut acc = 0.0;
            for (k, weight) in kernel.iter().enumerate() {
                let sx = x as isize + k as isize - r;
                if sx >= 0 && (sx as usize) < w {
                    acc += weight * row[sx as usize];
                }
            }
            scratch[y * w + x] = acc;
        }
    }

    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0;
            for (k, weight) in kernel.iter().enumerate() {
                let sy = y as isize + k as isize - r;
                if sy >= 0 && (sy as usize) < h {
                    acc += weight * scratch[sy as usize * w + x];
                }
            }
            field.data[y * w + x] = acc;
        }
    }
}

/// Contrast curve that turns a blurred value into a near-binary one.
#[inline]
pub fn threshold_value(alpha: f32) -> f32 {
    (THRESHOLD_GAIN * alpha + THRESHOLD_BIAS).clamp(0.0, 1.0)
}

/// Stage 3.
pub fn threshold(field: &mut MaskField) {
    for v in &mut field.data {
        *v = threshold_value(*v);
    }
}

/// Runs the full pipeline for one instance, reusing its buffers every frame.
pub struct MaskGenerator {
    field: MaskField,
    scratch: Vec<f32>,
    kernel: Vec<f32>,
    noise: NoiseField,
    intensity: IntensityParams,
    render_size: Vec2,
}

impl MaskGenerator {
    pub fn new(config: &RevealConfig) -> Self {
        let (w, h) = config.mask_size();
        let render_size = Vec2::new(config.render_width, config.render_height);
        let units_per_cell = render_size.x / w as f32;
        Self {
            field: MaskField::new(w, h),
            scratch: Vec::with_capacity(w * h),
            kernel: gaussian_kernel(BLUR_SIGMA / units_per_cell),
            noise: NoiseField::new(config.seed),
            intensity: config.intensity.params(),
            render_size,
        }
    }

    pub fn render_size(&self) -> Vec2 {
        self.render_size
    }

    /// Distortion in effect at `time_sec`.
    pub fn warp(&self, time_sec: f32) -> Warp {
        Warp {
            scale: self.intensity.distortion_scale,
            frequency: noise_frequency(self.intensity.base_frequency, time_sec),
        }
    }

    /// Displacement the warp applies at render-space point `p`.
    pub fn displacement_at(&self, p: Vec2, time_sec: f32) -> Vec2 {
        self.noise.displacement(p, self.warp(time_sec))
    }

    pub fn generate(&mut self, circles: &[Circle], time_sec: f32) -> &MaskField {
        let warp = self.warp(time_sec);
        rasterize(&mut self.field, circles, self.render_size, &self.noise, warp);
        gaussian_blur(&mut self.field, &self.kernel, &mut self.scratch);
        threshold(&mut self.field);
        &self.field
    }

    /// Result of the last [`generate`](Self::generate).
    pub fn field(&self) -> &MaskField {
        &self.field
    }
}
