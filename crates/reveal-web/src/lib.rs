#![cfg(target_arch = "wasm32")]
mod dom;
mod events;
mod frame;

use instant::Instant;
use reveal_core::{Layer, RevealEngine, RevealOptions, Rgba};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("reveal-web loaded");
    Ok(())
}

/// A mounted reveal. Call `destroy()` when the canvas goes away.
#[wasm_bindgen]
pub struct LiquidReveal {
    instance: Rc<RefCell<frame::Instance>>,
    tick: frame::FrameLoop,
}

#[wasm_bindgen]
impl LiquidReveal {
    pub fn destroy(&mut self) {
        if !self.is_live() {
            return;
        }
        self.instance.borrow_mut().destroy();
        // Dropping the callback breaks the loop's self-reference.
        self.tick.borrow_mut().take();
        log::info!("[reveal] destroyed");
    }

    #[wasm_bindgen(js_name = isLive)]
    pub fn is_live(&self) -> bool {
        self.instance.borrow().engine.is_live()
    }
}

impl Drop for LiquidReveal {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Mount a reveal on `#canvas_id` between the images at `normal_url` and
/// `glitch_url`. `options_json` takes the camelCase option names
/// (`{"mode":"click","physics":"elastic"}`); omitted fields use defaults.
#[wasm_bindgen]
pub async fn mount(
    canvas_id: String,
    normal_url: String,
    glitch_url: String,
    options_json: Option<String>,
) -> Result<LiquidReveal, JsValue> {
    mount_inner(&canvas_id, &normal_url, &glitch_url, options_json.as_deref())
        .await
        .map_err(|e| {
            log::error!("mount error: {e:?}");
            JsValue::from_str(&e.to_string())
        })
}

async fn mount_inner(
    canvas_id: &str,
    normal_url: &str,
    glitch_url: &str,
    options_json: Option<&str>,
) -> anyhow::Result<LiquidReveal> {
    let options: RevealOptions = match options_json {
        Some(json) if !json.trim().is_empty() => serde_json::from_str(json)?,
        _ => RevealOptions::default(),
    };
    let engine = RevealEngine::from_options(&options)?;
    let config = engine.config().clone();

    let (window, document) = dom::window_document()?;
    let canvas = dom::canvas_by_id(&document, canvas_id)?;
    let (w, h) = (
        config.render_width.round() as u32,
        config.render_height.round() as u32,
    );
    canvas.set_width(w);
    canvas.set_height(h);
    let ctx = dom::context_2d(&canvas)?;

    let normal = dom::load_layer(&document, normal_url, w, h).await?;
    let glitch = dom::load_layer(&document, glitch_url, w, h).await?;
    let out = Layer::filled(w, h, Rgba::BLACK)?;

    let now = Instant::now();
    let instance = Rc::new(RefCell::new(frame::Instance {
        engine,
        ctx,
        normal,
        glitch,
        out,
        started: now,
        last_instant: now,
        raf_id: None,
        listeners: Default::default(),
    }));

    let sink = {
        let instance = instance.clone();
        move |ev| instance.borrow_mut().engine.handle(ev)
    };
    let listeners = events::wire_input(config.mode, &window, &canvas, sink)?;
    instance.borrow_mut().listeners = listeners;

    let tick = frame::start_loop(instance.clone());
    log::info!(
        "[reveal] mounted #{canvas_id} mode={} physics={} intensity={} inverted={}",
        config.mode,
        config.physics,
        config.intensity,
        config.inverted
    );
    Ok(LiquidReveal { instance, tick })
}
