use reveal_core::{scroll_progress, InputEvent, Mode, PointerSample};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// DOM listeners owned by one mounted instance, removed on destroy.
#[derive(Default)]
pub struct Listeners {
    attached: Vec<(web::EventTarget, &'static str, Closure<dyn FnMut(web::Event)>)>,
}

impl Listeners {
    pub fn add(
        &mut self,
        target: &web::EventTarget,
        name: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<()> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        self.attached.push((target.clone(), name, closure));
        Ok(())
    }

    pub fn remove_all(&mut self) {
        for (target, name, closure) in self.attached.drain(..) {
            let _ = target.remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        }
    }
}

/// Pointer position relative to the canvas' on-screen box.
#[inline]
pub fn pointer_sample(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> PointerSample {
    let rect = canvas.get_bounding_client_rect();
    PointerSample::new(
        (ev.client_x() as f64 - rect.left()) as f32,
        (ev.client_y() as f64 - rect.top()) as f32,
        rect.width() as f32,
        rect.height() as f32,
    )
}

/// Progress of the canvas through the viewport, for scroll mode.
pub fn canvas_scroll_progress(window: &web::Window, canvas: &web::HtmlCanvasElement) -> f32 {
    let rect = canvas.get_bounding_client_rect();
    let viewport = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    scroll_progress(rect.top() as f32, rect.height() as f32, viewport as f32)
}

/// Attach the listeners `mode` consumes; every event goes to `sink`.
pub fn wire_input(
    mode: Mode,
    window: &web::Window,
    canvas: &web::HtmlCanvasElement,
    sink: impl Fn(InputEvent) + Clone + 'static,
) -> anyhow::Result<Listeners> {
    let mut listeners = Listeners::default();
    match mode {
        Mode::Hover | Mode::Click => {
            let c = canvas.clone();
            let s = sink.clone();
            listeners.add(canvas, "pointermove", move |ev| {
                if let Some(ev) = ev.dyn_ref::<web::MouseEvent>() {
                    s(InputEvent::PointerMove(pointer_sample(ev, &c)));
                }
            })?;
            if mode == Mode::Hover {
                let s = sink.clone();
                listeners.add(canvas, "pointerenter", move |_| s(InputEvent::PointerEnter))?;
                let s = sink.clone();
                listeners.add(canvas, "pointerleave", move |_| s(InputEvent::PointerLeave))?;
            } else {
                let s = sink.clone();
                listeners.add(canvas, "click", move |_| s(InputEvent::Click))?;
            }
        }
        Mode::Scroll => {
            let w = window.clone();
            let c = canvas.clone();
            let s = sink.clone();
            listeners.add(window, "scroll", move |_| {
                s(InputEvent::Scroll(canvas_scroll_progress(&w, &c)));
            })?;
            // Initial position before the first scroll event.
            sink(InputEvent::Scroll(canvas_scroll_progress(window, canvas)));
        }
        Mode::Auto => {}
    }
    log::debug!("[events] mode={mode} listeners={}", listeners.attached.len());
    Ok(listeners)
}
