// Host-side tests for the spring integrator.

use reveal_core::spring::{self, substeps};
use reveal_core::{Physics, Spring1, Spring2, SpringParams, MAX_FRAME_DT_SEC, MAX_SUBSTEP_SEC};
use strum::IntoEnumIterator;

const DT: f32 = 1.0 / 60.0;

fn run_to(params: SpringParams, target: f32, frames: usize) -> Spring1 {
    let mut s = Spring1::at_rest(0.0);
    for _ in 0..frames {
        s.step(target, params, DT);
    }
    s
}

#[test]
fn converges_to_target_for_every_preset() {
    for physics in Physics::iter() {
        let s = run_to(physics.params(), 1.0, 60 * 20);
        assert!(
            (s.value - 1.0).abs() < 1e-3,
            "{physics} did not settle: {}",
            s.value
        );
        assert!(s.velocity.abs() < 1e-2);
    }
}

#[test]
fn stays_finite_for_every_preset_and_layer() {
    for physics in Physics::iter() {
        let preset = physics.preset();
        for layer in 0..3 {
            let mut s = Spring1::at_rest(0.0);
            for i in 0..600 {
                let target = if (i / 30) % 2 == 0 { 1.0 } else { -1.0 };
                s.step(target, preset.layer(layer), DT);
                assert!(s.value.is_finite() && s.velocity.is_finite());
                assert!(s.value.abs() < 5.0, "{physics} layer {layer} blew up");
            }
        }
    }
}

#[test]
fn elastic_overshoots_and_standard_does_not() {
    let mut elastic = Spring1::at_rest(0.0);
    let mut standard = Spring1::at_rest(0.0);
    let mut elastic_peak = 0.0f32;
    let mut standard_peak = 0.0f32;
    for _ in 0..180 {
        elastic.step(1.0, Physics::Elastic.params(), DT);
        standard.step(1.0, Physics::Standard.params(), DT);
        elastic_peak = elastic_peak.max(elastic.value);
        standard_peak = standard_peak.max(standard.value);
    }
    assert!(elastic_peak > 1.05, "elastic peak {elastic_peak}");
    assert!(standard_peak <= 1.0 + 1e-4, "standard peak {standard_peak}");
}

#[test]
fn zero_and_negative_dt_leave_state_unchanged() {
    let start = Spring1 {
        value: 0.3,
        velocity: 0.7,
    };
    for dt in [0.0, -0.016, f32::NAN, f32::INFINITY] {
        let mut s = start;
        s.step(1.0, Physics::Standard.params(), dt);
        assert_eq!(s, start, "dt={dt}");
    }
}

#[test]
fn non_finite_target_or_bad_params_are_ignored() {
    let start = Spring1 {
        value: 0.3,
        velocity: 0.1,
    };
    let mut s = start;
    s.step(f32::NAN, Physics::Standard.params(), DT);
    assert_eq!(s, start);

    let mut s = start;
    s.step(1.0, SpringParams::new(0.0, 120.0, 25.0), DT);
    assert_eq!(s, start);

    let mut s = start;
    s.step(1.0, SpringParams::new(1.0, f32::INFINITY, 25.0), DT);
    assert_eq!(s, start);
}

#[test]
fn non_finite_state_snaps_to_target() {
    let mut s = Spring1 {
        value: f32::NAN,
        velocity: 0.0,
    };
    s.step(0.25, Physics::Standard.params(), DT);
    assert_eq!(s.value, 0.25);
    assert_eq!(s.velocity, 0.0);
}

#[test]
fn long_frames_are_clamped() {
    let params = Physics::Standard.params();
    let mut long = Spring1::at_rest(0.0);
    long.step(1.0, params, 5.0);
    let mut capped = Spring1::at_rest(0.0);
    capped.step(1.0, params, MAX_FRAME_DT_SEC);
    assert_eq!(long, capped);
}

#[test]
fn substeps_never_exceed_ceiling() {
    for dt in [1e-4, 1.0 / 144.0, 1.0 / 60.0, 1.0 / 30.0, 0.1, 2.0] {
        let (count, h) = substeps(dt);
        assert!(count >= 1);
        assert!(h <= MAX_SUBSTEP_SEC + 1e-7, "dt={dt} h={h}");
        assert!((h * count as f32 - dt.min(MAX_FRAME_DT_SEC)).abs() < 1e-5);
    }
}

#[test]
fn scalar_step_matches_struct_form() {
    let p = Physics::Heavy.params();
    let (x, v) = spring::step(0.2, 0.0, 0.9, p.mass, p.stiffness, p.damping, DT);
    let mut s = Spring1 {
        value: 0.2,
        velocity: 0.0,
    };
    s.step(0.9, p, DT);
    assert_eq!((x, v), (s.value, s.velocity));
}

#[test]
fn two_dimensional_spring_moves_both_axes() {
    let mut s = Spring2::at_rest(glam::Vec2::new(0.5, 0.5));
    let target = glam::Vec2::new(0.9, 0.1);
    for _ in 0..240 {
        s.step(target, Physics::Standard.params(), DT);
    }
    assert!(s.value.distance(target) < 1e-3);
}

#[test]
fn damping_ratio_classifies_presets() {
    assert!(Physics::Standard.params().damping_ratio() > 1.0);
    assert!(Physics::Heavy.params().damping_ratio() > 1.0);
    assert!(Physics::Elastic.params().damping_ratio() < 1.0);
    assert!(Physics::Nervous.params().damping_ratio() < 1.0);
}
