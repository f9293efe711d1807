//! Browser bindings for the gallery controller.
//!
//! `WebGallery` owns a core `Gallery` whose host is a plain JS object of
//! camelCase hook functions (`requestMainVisual`, `addMarker`, ...). Hooks
//! that are absent are skipped. Hooks must not call back into the
//! `WebGallery` synchronously; completions are reported later, e.g. from an
//! image `load` handler or a timer.

use std::time::Duration;

use js_sys::{Array, Function, Object, Reflect};
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use galleria_core::{
    Config, DisplayTree, Dispatch, Gallery, GalleryError, ImageEntry, ImageList, ImageSource,
    Lightbox, LightboxHandle, Marker, TransitionId, VisualId,
};

mod logging;

pub use logging::init_logging;

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn js_err(context: &str, e: impl std::fmt::Display) -> JsError {
    JsError::new(&format!("{context}: {e}"))
}

/// Stylesheet variable holding the crossfade duration.
const DURATION_CSS_VARIABLE: &str = "--animation-duration";

/// `document.documentElement.style.setProperty(name, value)`, when a
/// document exists.
fn set_root_css_variable(name: &str, value: &str) -> Result<(), JsValue> {
    let global = js_sys::global();
    let document = Reflect::get(&global, &"document".into())?;
    if jsvalue_is_undefined_or_null(&document) {
        return Ok(());
    }
    let root = Reflect::get(&document, &"documentElement".into())?;
    let style = Reflect::get(&root, &"style".into())?;
    let set_property: Function = Reflect::get(&style, &"setProperty".into())?.dyn_into()?;
    set_property.call2(&style, &JsValue::from_str(name), &JsValue::from_str(value))?;
    Ok(())
}

/// Non-negative integer returned by a hook, as a handle.
fn as_handle(v: &JsValue) -> Option<u32> {
    v.as_f64()
        .filter(|n| *n >= 0.0 && n.fract() == 0.0 && *n <= f64::from(u32::MAX))
        .map(|n| n as u32)
}

/// Host that forwards every request to a hook on a JS object.
struct JsHost {
    hooks: Object,
}

impl JsHost {
    fn hook(&self, name: &str) -> Option<Function> {
        let value = Reflect::get(&self.hooks, &JsValue::from_str(name)).ok()?;
        value.dyn_into::<Function>().ok()
    }

    fn call(&self, name: &str, args: &[JsValue]) -> Option<JsValue> {
        let f = self.hook(name)?;
        let argv: Array = args.iter().collect();
        match f.apply(&self.hooks, &argv) {
            Ok(v) => Some(v),
            Err(e) => {
                log::warn!("hook {name} threw: {e:?}");
                None
            }
        }
    }

    fn to_js<T: Serialize>(value: &T) -> JsValue {
        swb::to_value(value).unwrap_or(JsValue::UNDEFINED)
    }
}

impl ImageSource for JsHost {
    fn request_thumbnail(&mut self, index: usize, image: &ImageEntry) {
        self.call(
            "requestThumbnail",
            &[JsValue::from(index as u32), Self::to_js(image)],
        );
    }

    fn request_main_visual(&mut self, ticket: TransitionId, index: usize, image: &ImageEntry) {
        self.call(
            "requestMainVisual",
            &[
                JsValue::from(ticket.0),
                JsValue::from(index as u32),
                Self::to_js(image),
            ],
        );
    }
}

impl DisplayTree for JsHost {
    fn set_transition_duration(&mut self, duration: Duration) {
        let ms = duration.as_millis() as f64;
        let css = format!("{ms}ms");
        if self.hook("setTransitionDuration").is_some() {
            self.call(
                "setTransitionDuration",
                &[JsValue::from(ms), JsValue::from_str(&css)],
            );
        } else if let Err(e) = set_root_css_variable(DURATION_CSS_VARIABLE, &css) {
            log::warn!("could not set {DURATION_CSS_VARIABLE}: {e:?}");
        }
    }

    fn insert_thumbnail(&mut self, index: usize, image: &ImageEntry) {
        self.call(
            "insertThumbnail",
            &[JsValue::from(index as u32), Self::to_js(image)],
        );
    }

    fn set_thumbnail_visible(&mut self, index: usize, visible: bool) {
        self.call(
            "setThumbnailVisible",
            &[JsValue::from(index as u32), JsValue::from(visible)],
        );
    }

    fn show_thumbnail_placeholder(&mut self, index: usize) {
        self.call("showThumbnailPlaceholder", &[JsValue::from(index as u32)]);
    }

    fn set_thumbnail_active(&mut self, index: usize, active: bool) {
        self.call(
            "setThumbnailActive",
            &[JsValue::from(index as u32), JsValue::from(active)],
        );
    }

    fn scroll_thumbnail_into_view(&mut self, index: usize) {
        self.call("scrollThumbnailIntoView", &[JsValue::from(index as u32)]);
    }

    fn set_counter_text(&mut self, text: &str) {
        self.call("setCounterText", &[JsValue::from_str(text)]);
    }

    fn mount_main_visual(&mut self, visual: VisualId, image: &ImageEntry) {
        self.call(
            "mountMainVisual",
            &[JsValue::from(visual.0), Self::to_js(image)],
        );
    }

    fn unmount_main_visual(&mut self, visual: VisualId) {
        self.call("unmountMainVisual", &[JsValue::from(visual.0)]);
    }

    fn show_main_placeholder(&mut self, index: usize, image: &ImageEntry) -> Option<VisualId> {
        let v = self.call(
            "showMainPlaceholder",
            &[JsValue::from(index as u32), Self::to_js(image)],
        )?;
        as_handle(&v).map(VisualId)
    }

    fn add_marker(&mut self, visual: VisualId, marker: Marker) {
        self.call(
            "addMarker",
            &[JsValue::from(visual.0), JsValue::from_str(marker.class_name())],
        );
    }

    fn remove_marker(&mut self, visual: VisualId, marker: Marker) {
        self.call(
            "removeMarker",
            &[JsValue::from(visual.0), JsValue::from_str(marker.class_name())],
        );
    }

    fn await_exit(&mut self, ticket: TransitionId, visual: VisualId, duration: Duration) {
        self.call(
            "awaitExit",
            &[
                JsValue::from(ticket.0),
                JsValue::from(visual.0),
                JsValue::from(duration.as_millis() as f64),
            ],
        );
    }

    fn render_overlay(&mut self, index: usize, image: &ImageEntry) {
        self.call(
            "renderOverlay",
            &[JsValue::from(index as u32), Self::to_js(image)],
        );
    }

    fn set_drag_tracking(&mut self, active: bool) {
        self.call("setDragTracking", &[JsValue::from(active)]);
    }
}

impl Lightbox for JsHost {
    fn build_lightbox(&mut self, visual: VisualId) -> Option<LightboxHandle> {
        let v = self.call("buildLightbox", &[JsValue::from(visual.0)])?;
        as_handle(&v).map(LightboxHandle)
    }

    fn open_lightbox(&mut self, handle: LightboxHandle, slide: usize) {
        self.call(
            "openLightbox",
            &[JsValue::from(handle.0), JsValue::from(slide as u32)],
        );
    }
}

#[wasm_bindgen]
pub struct WebGallery {
    core: Gallery<JsHost>,
}

impl WebGallery {
    fn dispatch_to_js(
        &self,
        d: Result<Dispatch, GalleryError>,
        ctx: &str,
    ) -> Result<JsValue, JsError> {
        let d = d.map_err(|e| js_err(ctx, e))?;
        swb::to_value(&d).map_err(|e| js_err(ctx, e))
    }
}

#[wasm_bindgen]
impl WebGallery {
    /// Create a gallery. `images` is an array of `{ src, alt, title,
    /// description, type? }` objects; `config` is a config object or
    /// undefined/null for defaults; `hooks` holds the host functions.
    /// Example:
    ///   new WebGallery(images, { transition_ms: 300 }, hooks)
    #[wasm_bindgen(constructor)]
    pub fn new(images: JsValue, config: JsValue, hooks: Object) -> Result<WebGallery, JsError> {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        let images: ImageList = swb::from_value(images).map_err(|e| js_err("images error", e))?;
        let cfg: Config = if jsvalue_is_undefined_or_null(&config) {
            Config::default()
        } else {
            swb::from_value(config).map_err(|e| js_err("config error", e))?
        };
        let core = Gallery::new(images, cfg, JsHost { hooks }).map_err(|e| js_err("gallery", e))?;
        Ok(WebGallery { core })
    }

    /// Insert thumbnails and load the first image.
    pub fn start(&mut self) -> Result<(), JsError> {
        self.core.start().map_err(|e| js_err("start", e))
    }

    #[wasm_bindgen(js_name = thumbnailDecoded)]
    pub fn thumbnail_decoded(&mut self, index: u32) -> Result<(), JsError> {
        self.core
            .thumbnail_decoded(index as usize)
            .map_err(|e| js_err("thumbnailDecoded", e))
    }

    #[wasm_bindgen(js_name = thumbnailFailed)]
    pub fn thumbnail_failed(&mut self, index: u32, reason: String) -> Result<(), JsError> {
        self.core
            .thumbnail_failed(index as usize, &reason)
            .map_err(|e| js_err("thumbnailFailed", e))
    }

    /// Returns the dispatch outcome, e.g. `{ accepted: 3 }` or `"dropped"`.
    #[wasm_bindgen(js_name = clickThumbnail)]
    pub fn click_thumbnail(&mut self, index: u32) -> Result<JsValue, JsError> {
        let d = self.core.click_thumbnail(index as usize);
        self.dispatch_to_js(d, "clickThumbnail")
    }

    #[wasm_bindgen(js_name = clickPrev)]
    pub fn click_prev(&mut self) -> Result<JsValue, JsError> {
        let d = self.core.click_prev();
        self.dispatch_to_js(d, "clickPrev")
    }

    #[wasm_bindgen(js_name = clickNext)]
    pub fn click_next(&mut self) -> Result<JsValue, JsError> {
        let d = self.core.click_next();
        self.dispatch_to_js(d, "clickNext")
    }

    #[wasm_bindgen(js_name = touchStart)]
    pub fn touch_start(&mut self, x: f32) {
        self.core.touch_start(x);
    }

    #[wasm_bindgen(js_name = touchEnd)]
    pub fn touch_end(&mut self, x: f32, viewport_width: f32) -> Result<JsValue, JsError> {
        let d = self.core.touch_end(x, viewport_width);
        self.dispatch_to_js(d, "touchEnd")
    }

    /// Horizontal wheel delta; `in_main_region` is whether the event target
    /// lies in the main display or its overlay.
    pub fn wheel(&mut self, delta_x: f32, in_main_region: bool) -> Result<JsValue, JsError> {
        let d = self.core.wheel(delta_x, in_main_region);
        self.dispatch_to_js(d, "wheel")
    }

    #[wasm_bindgen(js_name = mouseDown)]
    pub fn mouse_down(&mut self, x: f32, in_main_region: bool) -> Result<(), JsError> {
        self.core
            .mouse_down(x, in_main_region)
            .map_err(|e| js_err("mouseDown", e))
    }

    #[wasm_bindgen(js_name = mouseMove)]
    pub fn mouse_move(&mut self, x: f32) -> Result<JsValue, JsError> {
        let d = self.core.mouse_move(x);
        self.dispatch_to_js(d, "mouseMove")
    }

    #[wasm_bindgen(js_name = mouseUp)]
    pub fn mouse_up(&mut self) {
        self.core.mouse_up();
    }

    #[wasm_bindgen(js_name = mainVisualResolved)]
    pub fn main_visual_resolved(&mut self, ticket: u32, visual: u32) -> Result<(), JsError> {
        self.core
            .main_visual_resolved(TransitionId(ticket), VisualId(visual))
            .map_err(|e| js_err("mainVisualResolved", e))
    }

    #[wasm_bindgen(js_name = mainVisualReady)]
    pub fn main_visual_ready(&mut self, ticket: u32) -> Result<(), JsError> {
        self.core
            .main_visual_ready(TransitionId(ticket))
            .map_err(|e| js_err("mainVisualReady", e))
    }

    #[wasm_bindgen(js_name = mainVisualFailed)]
    pub fn main_visual_failed(&mut self, ticket: u32, reason: String) -> Result<(), JsError> {
        self.core
            .main_visual_failed(TransitionId(ticket), &reason)
            .map_err(|e| js_err("mainVisualFailed", e))
    }

    #[wasm_bindgen(js_name = exitFinished)]
    pub fn exit_finished(&mut self, ticket: u32) -> Result<(), JsError> {
        self.core
            .exit_finished(TransitionId(ticket))
            .map_err(|e| js_err("exitFinished", e))
    }

    #[wasm_bindgen(js_name = openLightbox)]
    pub fn open_lightbox(&mut self) -> bool {
        self.core.open_lightbox()
    }

    /// Snapshot of state, phase, deferred intents and thumbnail status.
    pub fn state(&self) -> Result<JsValue, JsError> {
        swb::to_value(&self.core.snapshot()).map_err(|e| js_err("state", e))
    }

    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&mut self) -> Result<JsValue, JsError> {
        let events = self.core.drain_events();
        swb::to_value(&events).map_err(|e| js_err("drainEvents", e))
    }

    /// Transition time as a CSS duration, e.g. `"500ms"`.
    #[wasm_bindgen(js_name = cssDuration)]
    pub fn css_duration(&self) -> String {
        self.core.config().css_duration()
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
