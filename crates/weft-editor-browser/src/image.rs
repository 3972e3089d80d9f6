//! Image pipeline: file reading, canvas re-encoding and interactive resize.

use js_sys::Promise;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    CanvasRenderingContext2d, Document, File, FileReader, HtmlCanvasElement, HtmlImageElement,
    Window,
};
use weft_editor_core::{
    DataUri, EditorError, ImageEmbed, ImageQuality, SmolStr, constrain_dimensions,
    display_percentage, parse_percentage, reencode,
};

use crate::dom_error;

/// Read `file` into a base64 data URI.
pub async fn read_file_as_data_uri(file: &File) -> Result<String, EditorError> {
    let reader = FileReader::new().map_err(dom_error)?;

    let promise = Promise::new(&mut |resolve, reject| {
        let onload = Closure::once_into_js(move || {
            resolve.call0(&JsValue::NULL).ok();
        });
        let onerror = Closure::once_into_js(move || {
            reject.call0(&JsValue::NULL).ok();
        });
        reader.set_onload(Some(onload.unchecked_ref()));
        reader.set_onerror(Some(onerror.unchecked_ref()));
    });

    reader.read_as_data_url(file).map_err(dom_error)?;
    JsFuture::from(promise)
        .await
        .map_err(|_| EditorError::Decode(format!("could not read `{}`", file.name())))?;

    reader
        .result()
        .map_err(dom_error)?
        .as_string()
        .ok_or_else(|| EditorError::InvalidDataUri("reader produced no text".into()))
}

/// Decode `source`, scale it to `max_width` and re-encode as `mime`.
///
/// Suspends until the browser has decoded the source. Falls back to the
/// software encoder when no 2D canvas context is available.
pub async fn compress(
    source: &str,
    max_width: Option<u32>,
    mime: &str,
    quality: ImageQuality,
) -> Result<ImageEmbed, EditorError> {
    let document = crate::document()?;
    let img = document
        .create_element("img")
        .map_err(dom_error)?
        .dyn_into::<HtmlImageElement>()
        .map_err(|_| EditorError::Dom("<img> is not an HtmlImageElement".into()))?;

    let promise = Promise::new(&mut |resolve, reject| {
        let onload = Closure::once_into_js(move || {
            resolve.call0(&JsValue::NULL).ok();
        });
        let onerror = Closure::once_into_js(move || {
            reject.call0(&JsValue::NULL).ok();
        });
        img.set_onload(Some(onload.unchecked_ref()));
        img.set_onerror(Some(onerror.unchecked_ref()));
    });
    img.set_src(source);
    JsFuture::from(promise)
        .await
        .map_err(|_| EditorError::Decode("image source could not be decoded".into()))?;

    let (src_w, src_h) = (img.natural_width(), img.natural_height());
    if src_w == 0 || src_h == 0 {
        return Err(EditorError::Decode("image has no dimensions".into()));
    }
    let (width, height) = constrain_dimensions(src_w, src_h, max_width);
    tracing::debug!(target: "weft::image", src_w, src_h, width, height, mime, "compress");

    match canvas_encode(&document, &img, width, height, mime, quality)? {
        Some(data_uri) => {
            let mime_type = data_uri
                .strip_prefix("data:")
                .and_then(|rest| rest.split([';', ',']).next())
                .filter(|m| !m.is_empty())
                .map(SmolStr::new)
                .unwrap_or_else(|| SmolStr::new(mime));
            Ok(ImageEmbed {
                data_uri,
                mime_type,
                width,
                height,
            })
        }
        None => {
            tracing::debug!(target: "weft::image", "no 2d context, software re-encode");
            reencode(&DataUri::parse(source)?, max_width, mime, quality)
        }
    }
}

fn canvas_encode(
    document: &Document,
    img: &HtmlImageElement,
    width: u32,
    height: u32,
    mime: &str,
    quality: ImageQuality,
) -> Result<Option<String>, EditorError> {
    let canvas = document
        .create_element("canvas")
        .map_err(dom_error)?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| EditorError::Dom("<canvas> is not an HtmlCanvasElement".into()))?;
    canvas.set_width(width);
    canvas.set_height(height);

    let Some(ctx) = canvas.get_context("2d").map_err(dom_error)? else {
        return Ok(None);
    };
    let ctx = ctx
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| EditorError::Dom("unexpected 2d context type".into()))?;
    ctx.draw_image_with_html_image_element_and_dw_and_dh(
        img,
        0.0,
        0.0,
        f64::from(width),
        f64::from(height),
    )
    .map_err(dom_error)?;

    canvas
        .to_data_url_with_type_and_encoder_options(mime, &JsValue::from_f64(quality.fraction()))
        .map(Some)
        .map_err(|e| EditorError::Encode(format!("{e:?}")))
}

/// Result of the resize prompt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeOutcome {
    /// New display width, in percent.
    Resized(f64),
    Unchanged,
}

/// Ask the user for a new display width and apply it.
///
/// The prompt is seeded with the current width as a percentage of the
/// width the image takes at `100%`.
pub fn resize_interactive(window: &Window, img: &HtmlImageElement) -> ResizeOutcome {
    let style = img.style();
    let current = img.width();
    let _ = style.set_property("width", "100%");
    let full = img.width();
    let _ = style.remove_property("width");
    img.set_width(current);

    let percent = display_percentage(f64::from(current), f64::from(full)).unwrap_or(100);
    let answer = match window.prompt_with_message_and_default("Image size in %", &percent.to_string())
    {
        Ok(answer) => answer,
        Err(err) => {
            tracing::warn!(target: "weft::image", ?err, "resize prompt failed");
            return ResizeOutcome::Unchanged;
        }
    };
    let Some(value) = answer.as_deref().and_then(parse_percentage) else {
        return ResizeOutcome::Unchanged;
    };

    match style.set_property("width", &format!("{value}%")) {
        Ok(()) => {
            tracing::debug!(target: "weft::image", value, "image resized");
            ResizeOutcome::Resized(value)
        }
        Err(err) => {
            tracing::warn!(target: "weft::image", ?err, "could not apply image width");
            ResizeOutcome::Unchanged
        }
    }
}
