// Host-side tests for layer handling and the blend.

use reveal_core::{
    blend_pixel, composite, FrameClock, InputEvent, Layer, LayerError, LayerPair, MaskField,
    PointerSample, RevealConfig, RevealEngine, Rgba,
};

fn gradient(width: u32, height: u32, salt: u8) -> Layer {
    let pixels = (0..width * height)
        .map(|i| {
            let v = (i * 37 % 256) as u8;
            Rgba::new(v, v.wrapping_add(salt), 255 - v, 255)
        })
        .collect();
    Layer::new(width, height, pixels).unwrap()
}

#[test]
fn layer_construction_checks_dimensions() {
    assert_eq!(Layer::new(0, 4, Vec::new()), Err(LayerError::Empty));
    assert_eq!(
        Layer::new(2, 2, vec![Rgba::BLACK; 3]),
        Err(LayerError::PixelCount {
            width: 2,
            height: 2,
            expected: 4,
            actual: 3
        })
    );
    assert!(Layer::from_rgba_bytes(2, 1, &[0; 7]).is_err());
    let layer = Layer::from_rgba_bytes(2, 1, &[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
    assert_eq!(layer.pixel(1, 0), Rgba::new(5, 6, 7, 8));
    assert_eq!(layer.as_bytes(), &[1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn nearest_sampling_clamps_to_edges() {
    let layer = gradient(2, 2, 0);
    assert_eq!(layer.sample(0.0, 0.0), layer.pixel(0, 0));
    assert_eq!(layer.sample(0.99, 0.99), layer.pixel(1, 1));
    assert_eq!(layer.sample(1.0, 1.0), layer.pixel(1, 1));
}

#[test]
fn blend_endpoints_select_one_layer() {
    let base = Rgba::new(10, 20, 30, 255);
    let revealed = Rgba::new(200, 150, 100, 255);
    assert_eq!(blend_pixel(base, revealed, 0.0, None), base);
    assert_eq!(blend_pixel(base, revealed, 1.0, None), revealed);
    assert_eq!(blend_pixel(base, revealed, -3.0, Some(0.1)), base);
    let half = blend_pixel(Rgba::BLACK, Rgba::new(200, 200, 200, 255), 0.5, None);
    assert_eq!(half, Rgba::new(100, 100, 100, 255));
}

#[test]
fn highlight_brightens_revealed_region_only() {
    let grey = Rgba::new(100, 100, 100, 255);
    let lit = blend_pixel(Rgba::BLACK, grey, 1.0, Some(0.1));
    assert!(lit.r > grey.r && lit.g > grey.g && lit.b > grey.b);
    assert_eq!(blend_pixel(Rgba::WHITE, Rgba::WHITE, 1.0, Some(0.1)), Rgba::WHITE);
    assert_eq!(blend_pixel(grey, Rgba::BLACK, 0.0, Some(0.1)), grey);
}

#[test]
fn composite_follows_mask_coverage() {
    let a = Layer::filled(4, 4, Rgba::new(255, 0, 0, 255)).unwrap();
    let b = Layer::filled(4, 4, Rgba::new(0, 0, 255, 255)).unwrap();
    let mut mask = MaskField::new(2, 2);
    mask.set(0, 0, 1.0);
    let mut out = Layer::filled(4, 4, Rgba::BLACK).unwrap();
    composite(LayerPair::assign(false, &a, &b), &mask, None, &mut out);
    // Top-left mask cell covers the top-left 2x2 block.
    assert_eq!(out.pixel(0, 0), b.pixel(0, 0));
    assert_eq!(out.pixel(3, 3), a.pixel(3, 3));
    assert_eq!(out.pixel(3, 0), a.pixel(3, 0));
}

#[test]
fn inverted_pair_equals_swapped_inputs() {
    let a = gradient(8, 8, 3);
    let b = gradient(8, 8, 90);
    let mut mask = MaskField::new(8, 8);
    for y in 0..8 {
        for x in 0..8 {
            mask.set(x, y, (x + y) as f32 / 14.0);
        }
    }
    let mut inverted = Layer::filled(8, 8, Rgba::BLACK).unwrap();
    let mut swapped = inverted.clone();
    composite(LayerPair::assign(true, &a, &b), &mask, Some(0.1), &mut inverted);
    composite(LayerPair::assign(false, &b, &a), &mask, Some(0.1), &mut swapped);
    assert_eq!(inverted, swapped);
}

#[test]
fn engine_inversion_matches_swapped_layers() {
    let config = RevealConfig {
        render_width: 80.0,
        render_height: 100.0,
        mask_scale: 1.0,
        ..Default::default()
    };
    let mut plain = RevealEngine::new(config.clone()).unwrap();
    let mut inverted = RevealEngine::new(RevealConfig {
        inverted: true,
        ..config
    })
    .unwrap();
    for engine in [&mut plain, &mut inverted] {
        engine.handle(InputEvent::PointerEnter);
        engine.handle(InputEvent::PointerMove(PointerSample::new(30.0, 60.0, 80.0, 100.0)));
        for i in 1..=40 {
            engine.tick(FrameClock::new(1.0 / 60.0, i as f32 / 60.0));
        }
    }

    let normal = gradient(80, 100, 11);
    let glitch = gradient(80, 100, 170);
    let mut out_inverted = Layer::filled(80, 100, Rgba::BLACK).unwrap();
    let mut out_swapped = out_inverted.clone();
    assert!(inverted.composite(&normal, &glitch, &mut out_inverted));
    assert!(plain.composite(&glitch, &normal, &mut out_swapped));
    assert_eq!(out_inverted, out_swapped);
}
