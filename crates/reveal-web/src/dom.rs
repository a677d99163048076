use reveal_core::Layer;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Wraps a JS exception, or the object a failed `dyn_into` hands back.
fn js_err(e: impl std::fmt::Debug) -> anyhow::Error {
    anyhow::anyhow!(format!("{:?}", e))
}

#[inline]
pub fn window_document() -> anyhow::Result<(web::Window, web::Document)> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    Ok((window, document))
}

pub fn canvas_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{id}"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| anyhow::anyhow!("#{id} is not a canvas"))
}

pub fn context_2d(canvas: &web::HtmlCanvasElement) -> anyhow::Result<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(js_err)?
        .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(js_err)
}

/// Source rectangle that fills `width x height` from an image of `iw x ih`,
/// cropping the overflow evenly (CSS `object-fit: cover`).
pub fn cover_rect(iw: f64, ih: f64, width: f64, height: f64) -> (f64, f64, f64, f64) {
    let scale = (width / iw).max(height / ih);
    let sw = width / scale;
    let sh = height / scale;
    ((iw - sw) * 0.5, (ih - sh) * 0.5, sw, sh)
}

/// Fetch and decode `url`, then rasterize it at the render size.
pub async fn load_layer(
    document: &web::Document,
    url: &str,
    width: u32,
    height: u32,
) -> anyhow::Result<Layer> {
    let img = web::HtmlImageElement::new().map_err(js_err)?;
    img.set_cross_origin(Some("anonymous"));
    img.set_src(url);
    JsFuture::from(img.decode())
        .await
        .map_err(|e| anyhow::anyhow!("failed to decode {url}: {e:?}"))?;
    let (iw, ih) = (img.natural_width(), img.natural_height());
    if iw == 0 || ih == 0 {
        anyhow::bail!("{url} has no pixels");
    }

    let scratch = document
        .create_element("canvas")
        .map_err(js_err)?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(js_err)?;
    scratch.set_width(width);
    scratch.set_height(height);
    let ctx = context_2d(&scratch)?;
    let (sx, sy, sw, sh) = cover_rect(iw as f64, ih as f64, width as f64, height as f64);
    ctx.draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
        &img,
        sx,
        sy,
        sw,
        sh,
        0.0,
        0.0,
        width as f64,
        height as f64,
    )
    .map_err(js_err)?;
    let data = ctx
        .get_image_data(0.0, 0.0, width as f64, height as f64)
        .map_err(js_err)?
        .data();
    log::debug!("[dom] loaded {url} ({iw}x{ih}) -> {width}x{height}");
    Ok(Layer::from_rgba_bytes(width, height, &data)?)
}
