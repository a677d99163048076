// Host-side tests for the mask pipeline stages and generator.

use glam::Vec2;
use reveal_core::{
    gaussian_blur, gaussian_kernel, noise_frequency, rasterize, threshold, threshold_value,
    Circle, Intensity, MaskField, MaskGenerator, NoiseField, RevealConfig, Warp,
};

const SIZE: Vec2 = Vec2::new(200.0, 200.0);

fn circle(x: f32, y: f32, r: f32) -> Circle {
    Circle {
        center: Vec2::new(x, y),
        radius: r,
    }
}

fn small_config(intensity: Intensity) -> RevealConfig {
    RevealConfig {
        intensity,
        render_width: 200.0,
        render_height: 200.0,
        mask_scale: 1.0,
        ..Default::default()
    }
}

#[test]
fn noise_frequency_oscillates_between_base_and_double() {
    let base = 0.008;
    assert!((noise_frequency(base, 0.0) - base).abs() < 1e-7);
    assert!((noise_frequency(base, 3.0) - 2.0 * base).abs() < 1e-6);
    assert!((noise_frequency(base, 6.0) - base).abs() < 1e-6);
    for i in 0..600 {
        let f = noise_frequency(base, i as f32 * 0.05);
        assert!(f >= base - 1e-7 && f <= 2.0 * base + 1e-7);
    }
    // Continuous across the loop boundary.
    let a = noise_frequency(base, 5.999);
    let b = noise_frequency(base, 6.001);
    assert!((a - b).abs() < 1e-6);
}

#[test]
fn threshold_curve_is_sharp() {
    assert_eq!(threshold_value(0.0), 0.0);
    assert_eq!(threshold_value(0.4), 0.0);
    let mid = threshold_value(0.42);
    assert!(mid > 0.0 && mid < 1.0);
    assert_eq!(threshold_value(0.5), 1.0);
    assert_eq!(threshold_value(1.0), 1.0);
}

#[test]
fn kernel_is_normalized_and_symmetric() {
    let k = gaussian_kernel(6.0);
    assert_eq!(k.len(), 37);
    assert!((k.iter().sum::<f32>() - 1.0).abs() < 1e-5);
    for i in 0..k.len() / 2 {
        assert!((k[i] - k[k.len() - 1 - i]).abs() < 1e-7);
    }
    assert_eq!(gaussian_kernel(0.0), vec![1.0]);
}

#[test]
fn rasterize_without_warp_fills_circles_only() {
    let mut field = MaskField::new(200, 200);
    let noise = NoiseField::new(0);
    rasterize(&mut field, &[circle(100.0, 100.0, 30.0)], SIZE, &noise, Warp::NONE);
    assert_eq!(field.get(100, 100), 1.0);
    assert_eq!(field.get(100, 125), 1.0);
    assert_eq!(field.get(100, 140), 0.0);
    assert_eq!(field.get(10, 10), 0.0);
}

#[test]
fn zero_radius_circles_draw_nothing() {
    let mut field = MaskField::new(50, 50);
    let noise = NoiseField::new(0);
    let circles = [circle(25.0, 25.0, 0.0); 3];
    rasterize(&mut field, &circles, Vec2::new(50.0, 50.0), &noise, Warp::NONE);
    assert!(field.is_blank());
}

#[test]
fn blur_then_threshold_fuses_nearby_circles() {
    let noise = NoiseField::new(0);
    let circles = [circle(60.0, 100.0, 40.0), circle(140.0, 100.0, 36.0)];
    let mut field = MaskField::new(200, 200);
    rasterize(&mut field, &circles, SIZE, &noise, Warp::NONE);
    // Gap between the two discs before fusion.
    assert_eq!(field.get(101, 100), 0.0);

    let mut scratch = Vec::new();
    gaussian_blur(&mut field, &gaussian_kernel(12.0), &mut scratch);
    let blurred_gap = field.get(101, 100);
    assert!(blurred_gap > 0.0 && blurred_gap < 1.0);
    threshold(&mut field);
    assert_eq!(field.get(101, 100), 1.0, "blobs did not merge");
    assert_eq!(field.get(60, 100), 1.0);
    assert_eq!(field.get(5, 5), 0.0);
}

#[test]
fn distant_circles_stay_separate() {
    let noise = NoiseField::new(0);
    let circles = [circle(30.0, 100.0, 20.0), circle(170.0, 100.0, 20.0)];
    let mut field = MaskField::new(200, 200);
    rasterize(&mut field, &circles, SIZE, &noise, Warp::NONE);
    let mut scratch = Vec::new();
    gaussian_blur(&mut field, &gaussian_kernel(12.0), &mut scratch);
    threshold(&mut field);
    assert_eq!(field.get(100, 100), 0.0);
    assert_eq!(field.get(30, 100), 1.0);
}

#[test]
fn warp_breaks_circular_symmetry() {
    let noise = NoiseField::new(7);
    let warp = Warp {
        scale: 120.0,
        frequency: 0.05,
    };
    let mut plain = MaskField::new(200, 200);
    let mut warped = MaskField::new(200, 200);
    rasterize(&mut plain, &[circle(100.0, 100.0, 50.0)], SIZE, &noise, Warp::NONE);
    rasterize(&mut warped, &[circle(100.0, 100.0, 50.0)], SIZE, &noise, warp);
    assert_ne!(plain, warped);
}

#[test]
fn displacement_is_bounded_by_half_scale() {
    let noise = NoiseField::new(3);
    let warp = Warp {
        scale: 60.0,
        frequency: 0.008,
    };
    for i in 0..50 {
        for j in 0..50 {
            let d = noise.displacement(Vec2::new(i as f32 * 10.0, j as f32 * 10.0), warp);
            assert!(d.x.abs() <= 30.0 + 1e-4 && d.y.abs() <= 30.0 + 1e-4);
        }
    }
    assert_eq!(noise.displacement(Vec2::new(5.0, 5.0), Warp::NONE), Vec2::ZERO);
}

#[test]
fn generator_is_blank_without_reveal() {
    let mut generator = MaskGenerator::new(&small_config(Intensity::Medium));
    let field = generator.generate(&[circle(100.0, 100.0, 0.0); 3], 1.0);
    assert!(field.is_blank());
}

#[test]
fn generator_covers_head_and_clears_far_corners() {
    for intensity in [Intensity::Subtle, Intensity::Medium] {
        let mut generator = MaskGenerator::new(&small_config(intensity));
        let circles = [
            circle(100.0, 100.0, 60.0),
            circle(95.0, 105.0, 48.0),
            circle(90.0, 110.0, 36.0),
        ];
        let field = generator.generate(&circles, 2.5);
        assert_eq!(field.get(100, 100), 1.0, "{intensity}");
        assert_eq!(field.get(0, 0), 0.0, "{intensity}");
        assert_eq!(field.get(199, 0), 0.0, "{intensity}");
        assert!(field.coverage() > 0.1 && field.coverage() < 0.6);
    }
}

#[test]
fn generator_is_deterministic_per_seed_and_time() {
    let circles = [circle(100.0, 100.0, 50.0), circle(80.0, 90.0, 40.0)];
    let mut a = MaskGenerator::new(&small_config(Intensity::Extreme));
    let mut b = MaskGenerator::new(&small_config(Intensity::Extreme));
    assert_eq!(a.generate(&circles, 1.25), b.generate(&circles, 1.25));
}

#[test]
fn mask_sampling_and_quantization() {
    let mut field = MaskField::new(2, 1);
    field.set(1, 0, 1.0);
    assert_eq!(field.sample(0.0, 0.5), 0.0);
    assert_eq!(field.sample(1.0, 0.5), 1.0);
    assert!((field.sample(0.5, 0.5) - 0.5).abs() < 1e-6);
    let mut bytes = Vec::new();
    field.write_u8(&mut bytes);
    assert_eq!(bytes, vec![0, 255]);
}
