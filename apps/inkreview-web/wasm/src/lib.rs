//! WASM front end for the red-ink review service
//!
//! Mounts onto the review page, validates the chosen PDF, uploads it to the
//! service and renders the per-page analysis. All state lives in Rust; the
//! page only provides the markup and calls `mount`.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { mount } from './pkg/inkreview_wasm.js';
//!
//! await init();
//!
//! // Defaults match the stock page: POST /upload, field "file",
//! // element ids uploadBox, fileInput, fileInfo, ...
//! const app = mount();
//!
//! // Buttons marked data-action="upload" / data-action="reset" are wired
//! // automatically; the same operations are available directly:
//! const result = await app.upload();
//! app.reset();
//!
//! // Overrides, all optional:
//! const custom = mount({ upload_url: '/api/upload', log_level: 'debug' });
//! ```

pub mod config;
pub mod dom;
pub mod events;
pub mod file;
pub mod logging;
pub mod transport;

use std::cell::RefCell;
use std::rc::Rc;

use inkreview_core::ReviewController;
use wasm_bindgen::prelude::*;

pub use config::{AppConfig, ElementIds};
pub use dom::DomView;
pub use file::BrowserFile;
pub use transport::FetchTransport;

pub type Controller = ReviewController<BrowserFile, DomView>;

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get the library version
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Escape text for insertion as HTML
#[wasm_bindgen(js_name = escapeHtml)]
pub fn escape_html(text: &str) -> String {
    inkreview_core::escape_html(text).into_string()
}

/// Escape text and turn its line breaks (real or literal `\n`) into `<br>`
#[wasm_bindgen(js_name = formatMultiline)]
pub fn format_multiline(text: &str) -> String {
    inkreview_core::format_multiline(text).into_string()
}

/// Bind to the review page and wire its events
///
/// `config` is an optional object overriding [`AppConfig`] fields.
#[wasm_bindgen]
pub fn mount(config: JsValue) -> Result<ReviewApp, JsValue> {
    let config = AppConfig::from_js(config)?;
    logging::init(config.log_level());

    let view = DomView::new(&config.elements)?;
    let controller = Rc::new(RefCell::new(ReviewController::new(config.client, view)));
    events::wire(&controller)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "review page mounted");
    Ok(ReviewApp { controller })
}

/// Handle to a mounted review page
#[wasm_bindgen]
pub struct ReviewApp {
    controller: Rc<RefCell<Controller>>,
}

#[wasm_bindgen]
impl ReviewApp {
    /// Upload the selected file and render the results
    ///
    /// Resolves to the parsed response; rejects with the failure message
    /// after the user has been notified.
    pub async fn upload(&self) -> Result<JsValue, JsValue> {
        let controller = Rc::clone(&self.controller);
        let result = events::run_upload(controller, FetchTransport)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        serde_wasm_bindgen::to_value(&result)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Forget the selected file and show the upload box again
    pub fn reset(&self) -> Result<(), JsValue> {
        self.controller
            .borrow_mut()
            .reset()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Whether the review service answers its health check
    #[wasm_bindgen(js_name = checkHealth)]
    pub async fn check_health(&self) -> bool {
        let config = self.controller.borrow().config().clone();
        FetchTransport.check_health(&config).await
    }

    /// Visible panel: "empty", "file-chosen", "loading" or "results"
    #[wasm_bindgen(getter)]
    pub fn panel(&self) -> String {
        self.controller.borrow().panel().as_str().to_string()
    }

    #[wasm_bindgen(getter, js_name = hasFile)]
    pub fn has_file(&self) -> bool {
        self.controller.borrow().selected().is_some()
    }

    /// Name of the selected file, if any
    #[wasm_bindgen(getter, js_name = fileName)]
    pub fn file_name(&self) -> Option<String> {
        self.controller
            .borrow()
            .selected()
            .map(|file| file.name().to_string())
    }
}
