mod layers;
mod render;

use std::time::Instant;

use clap::Parser;
use winit::{
    dpi::LogicalSize,
    event::*,
    event_loop::EventLoop,
    window::{Window, WindowBuilder},
};

use reveal_core::{FrameClock, InputEvent, PointerSample, RevealEngine, RevealOptions};

const TITLE: &str = "Liquid Reveal (native)";
const WHEEL_LINE_PROGRESS: f32 = 0.04; // scroll progress per wheel notch

/// Organic liquid reveal between a normal and a glitched layer.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// hover | click | scroll | auto
    #[arg(long)]
    mode: Option<String>,
    /// standard | heavy | elastic | nervous
    #[arg(long)]
    physics: Option<String>,
    /// subtle | medium | extreme
    #[arg(long)]
    intensity: Option<String>,
    /// Head radius as a fraction of the render width
    #[arg(long)]
    base_radius: Option<f32>,
    /// Swap which layer is revealed
    #[arg(long)]
    inverted: bool,
    #[arg(long)]
    width: Option<f32>,
    #[arg(long)]
    height: Option<f32>,
    /// Noise and glitch seed
    #[arg(long)]
    seed: Option<u32>,
    /// Skip the highlight pass
    #[arg(long)]
    no_highlight: bool,
}

impl Args {
    fn options(&self) -> RevealOptions {
        RevealOptions {
            mode: self.mode.clone(),
            physics: self.physics.clone(),
            intensity: self.intensity.clone(),
            base_radius: self.base_radius,
            inverted: Some(self.inverted),
            render_width: self.width,
            render_height: self.height,
            seed: self.seed,
            highlight: Some(!self.no_highlight),
            ..Default::default()
        }
    }
}

/// Mouse wheel stands in for page scroll: progress in [0, 1].
#[derive(Default)]
struct VirtualScroll {
    progress: f32,
}

impl VirtualScroll {
    fn apply(&mut self, delta: MouseScrollDelta, height: f32) -> f32 {
        let step = match delta {
            MouseScrollDelta::LineDelta(_, y) => -y * WHEEL_LINE_PROGRESS,
            MouseScrollDelta::PixelDelta(p) if height > 0.0 => -(p.y as f32) / height,
            MouseScrollDelta::PixelDelta(_) => 0.0,
        };
        self.progress = (self.progress + step).clamp(0.0, 1.0);
        self.progress
    }
}

fn pointer_sample(window: &Window, x: f64, y: f64) -> PointerSample {
    let size = window.inner_size();
    PointerSample::new(x as f32, y as f32, size.width as f32, size.height as f32)
}

fn update_title(window: &Window, prompt: Option<&str>) {
    match prompt {
        Some(text) => window.set_title(&format!("{TITLE} - {text}")),
        None => window.set_title(TITLE),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let mut engine = RevealEngine::from_options(&args.options())?;
    let config = engine.config().clone();
    log::info!(
        "mode={} physics={} intensity={} inverted={}",
        config.mode,
        config.physics,
        config.intensity,
        config.inverted
    );

    let (w, h) = (config.render_width.round() as u32, config.render_height.round() as u32);
    let normal = layers::normal_layer(w, h)?;
    let glitch = layers::glitch_layer(&normal, config.seed)?;
    let pair = engine.layers(&normal, &glitch);

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(TITLE)
        .with_inner_size(LogicalSize::new(config.render_width, config.render_height))
        .build(&event_loop)?;

    let mut state = pollster::block_on(render::GpuState::new(
        &window,
        pair.base,
        pair.revealed,
        config.mask_size(),
        engine.highlight(),
    ))?;
    update_title(state.window, engine.prompt());

    let start = Instant::now();
    let mut last_frame = start;
    let mut scroll = VirtualScroll::default();
    let mut shown_prompt = engine.prompt();

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => state.resize(size),
            WindowEvent::CloseRequested => {
                engine.teardown();
                elwt.exit();
            }
            WindowEvent::CursorEntered { .. } => engine.handle(InputEvent::PointerEnter),
            WindowEvent::CursorLeft { .. } => engine.handle(InputEvent::PointerLeave),
            WindowEvent::CursorMoved { position, .. } => engine.handle(InputEvent::PointerMove(
                pointer_sample(state.window, position.x, position.y),
            )),
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => engine.handle(InputEvent::Click),
            WindowEvent::MouseWheel { delta, .. } => {
                let height = state.window.inner_size().height as f32;
                engine.handle(InputEvent::Scroll(scroll.apply(delta, height)));
            }
            _ => {}
        },
        Event::AboutToWait => {
            let now = Instant::now();
            let clock = FrameClock::new(
                (now - last_frame).as_secs_f32(),
                (now - start).as_secs_f32(),
            );
            last_frame = now;
            let Some(geometry) = engine.tick(clock) else {
                return;
            };
            if geometry.prompt != shown_prompt {
                update_title(state.window, geometry.prompt);
                shown_prompt = geometry.prompt;
            }
            if let Some(mask) = engine.mask() {
                state.upload_mask(mask);
            }
            match state.render() {
                Ok(_) => state.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("surface out of memory");
                    engine.teardown();
                    elwt.exit();
                }
                Err(e) => log::warn!("surface error: {e:?}"),
            }
        }
        _ => {}
    })?;
    Ok(())
}
