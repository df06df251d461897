//! `fetch`-based transport to the review service

use inkreview_core::{ClientConfig, HealthStatus, ReviewError, UploadTransport};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Request, RequestInit, Response};

use crate::file::BrowserFile;

#[derive(Debug, Default, Clone, Copy)]
pub struct FetchTransport;

/// Best-effort message out of a rejected promise
pub(crate) fn js_error_message(err: &JsValue) -> String {
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

fn transfer_error(err: JsValue) -> ReviewError {
    ReviewError::TransferError(js_error_message(&err))
}

async fn fetch(request: &Request) -> Result<Response, JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    let response = JsFuture::from(window.fetch_with_request(request)).await?;
    response.dyn_into()
}

async fn response_text(response: &Response) -> Result<String, JsValue> {
    let text = JsFuture::from(response.text()?).await?;
    text.as_string()
        .ok_or_else(|| JsValue::from_str("Response body is not text"))
}

impl FetchTransport {
    async fn post_file(&self, config: &ClientConfig, file: &BrowserFile) -> Result<String, JsValue> {
        let form = FormData::new()?;
        form.append_with_blob_and_filename(&config.upload_field, file.file(), &file.file().name())?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_body(&form);

        let request = Request::new_with_str_and_init(&config.upload_url, &opts)?;
        let response = fetch(&request).await?;

        // Error statuses still carry a JSON `error` worth showing.
        if !response.ok() {
            tracing::warn!(status = response.status(), "upload answered with an error status");
        }

        response_text(&response).await
    }

    /// Ask the service's health endpoint whether it is up
    pub async fn check_health(&self, config: &ClientConfig) -> bool {
        match self.get_health(config).await {
            Ok(status) => status.is_ok(),
            Err(err) => {
                tracing::warn!(error = %js_error_message(&err), "health check failed");
                false
            }
        }
    }

    async fn get_health(&self, config: &ClientConfig) -> Result<HealthStatus, JsValue> {
        let opts = RequestInit::new();
        opts.set_method("GET");

        let request = Request::new_with_str_and_init(&config.health_url, &opts)?;
        let response = fetch(&request).await?;
        if !response.ok() {
            return Err(JsValue::from_str(&format!(
                "Health check failed: {}",
                response.status()
            )));
        }

        let body = response_text(&response).await?;
        serde_json::from_str(&body).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl UploadTransport<BrowserFile> for FetchTransport {
    async fn upload(&self, config: &ClientConfig, file: &BrowserFile) -> Result<String, ReviewError> {
        self.post_file(config, file).await.map_err(transfer_error)
    }
}
