use crate::events::Listeners;
use instant::Instant;
use reveal_core::{FrameClock, Layer, RevealEngine};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{Clamped, JsCast};
use web_sys as web;

const PROMPT_FONT: &str = "600 16px system-ui, sans-serif";
const PROMPT_FILL: &str = "rgba(255, 255, 255, 0.9)";
const PROMPT_MARGIN_PX: f64 = 28.0; // from the bottom edge

/// Pending requestAnimationFrame callback; `None` once the loop is dropped.
pub type FrameLoop = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

pub struct Instance {
    pub engine: RevealEngine,
    pub ctx: web::CanvasRenderingContext2d,
    pub normal: Layer,
    pub glitch: Layer,
    pub out: Layer,
    pub started: Instant,
    pub last_instant: Instant,
    pub raf_id: Option<i32>,
    pub listeners: Listeners,
}

impl Instance {
    /// Advance and draw one frame. Returns `false` once the engine is torn down.
    pub fn frame(&mut self) -> bool {
        let now = Instant::now();
        let clock = FrameClock::new(
            (now - self.last_instant).as_secs_f32(),
            (now - self.started).as_secs_f32(),
        );
        self.last_instant = now;

        let Some(geometry) = self.engine.tick(clock) else {
            return false;
        };
        if !self
            .engine
            .composite(&self.normal, &self.glitch, &mut self.out)
        {
            return false;
        }
        if let Err(e) = self.present(geometry.prompt) {
            log::warn!("[frame] present failed: {e:?}");
        }
        true
    }

    fn present(&self, prompt: Option<&str>) -> anyhow::Result<()> {
        let (w, h) = (self.out.width(), self.out.height());
        let image =
            web::ImageData::new_with_u8_clamped_array_and_sh(Clamped(self.out.as_bytes()), w, h)
                .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        self.ctx
            .put_image_data(&image, 0.0, 0.0)
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        if let Some(text) = prompt {
            self.ctx.set_font(PROMPT_FONT);
            self.ctx.set_text_align("center");
            self.ctx.set_fill_style_str(PROMPT_FILL);
            self.ctx
                .fill_text(text, w as f64 * 0.5, h as f64 - PROMPT_MARGIN_PX)
                .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        }
        Ok(())
    }

    /// Tear the engine down, cancel the pending frame and detach listeners.
    pub fn destroy(&mut self) {
        self.engine.teardown();
        if let (Some(id), Some(w)) = (self.raf_id.take(), web::window()) {
            let _ = w.cancel_animation_frame(id);
        }
        self.listeners.remove_all();
    }
}

/// Drive `instance` from requestAnimationFrame until it stops being live.
pub fn start_loop(instance: Rc<RefCell<Instance>>) -> FrameLoop {
    let tick: FrameLoop = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let inst = instance.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let live = inst.borrow_mut().frame();
        let next = if live {
            web::window().and_then(|w| {
                tick_clone
                    .borrow()
                    .as_ref()
                    .and_then(|cb| w.request_animation_frame(cb.as_ref().unchecked_ref()).ok())
            })
        } else {
            log::debug!("[frame] loop stopped");
            None
        };
        inst.borrow_mut().raf_id = next;
    }) as Box<dyn FnMut()>));

    let first = web::window().and_then(|w| {
        tick.borrow()
            .as_ref()
            .and_then(|cb| w.request_animation_frame(cb.as_ref().unchecked_ref()).ok())
    });
    instance.borrow_mut().raf_id = first;
    tick
}
