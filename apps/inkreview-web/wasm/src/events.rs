//! DOM event wiring
//!
//! Every handler borrows the controller only for the duration of one
//! synchronous call. Uploads run on `spawn_local` and release the borrow
//! while the request is in flight.

use std::cell::RefCell;
use std::rc::Rc;

use inkreview_core::{ClientConfig, ReviewError, SelectionSource, UploadResult, UploadTransport};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Event, EventTarget, FileList, HtmlInputElement};

use crate::file::{first_file, BrowserFile};
use crate::transport::FetchTransport;
use crate::Controller;

/// Register `handler` for `kind` events on `target` for the page's lifetime
fn listen<H>(target: &EventTarget, kind: &str, handler: H) -> Result<(), JsValue>
where
    H: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Suppress the browser's own drag handling so the drop reaches us
fn suppress(event: &Event) {
    event.prevent_default();
    event.stop_propagation();
}

/// Run one upload end to end: begin, await the transport, complete
pub async fn run_upload(
    controller: Rc<RefCell<Controller>>,
    transport: FetchTransport,
) -> Result<UploadResult, ReviewError> {
    let (file, config): (_, ClientConfig) = {
        let mut controller = controller.borrow_mut();
        let file = controller.begin_submit()?;
        (file, controller.config().clone())
    };
    let outcome = transport.upload(&config, &file).await;
    controller.borrow_mut().complete_submit(outcome)
}

/// First dropped file; copied into `input` when its type is `accepted`,
/// as the picker would have left it
pub fn mirror_drop(
    input: &HtmlInputElement,
    files: Option<FileList>,
    accepted: &str,
) -> Option<BrowserFile> {
    let dropped = first_file(files.clone());
    if dropped
        .as_ref()
        .is_some_and(|file| file.file().type_() == accepted)
    {
        input.set_files(files.as_ref());
    }
    dropped
}

pub fn wire(controller: &Rc<RefCell<Controller>>) -> Result<(), JsValue> {
    let (upload_box, file_input) = {
        let controller = controller.borrow();
        let view = controller.view();
        (view.upload_box().clone(), view.file_input().clone())
    };

    {
        let controller = Rc::clone(controller);
        listen(&file_input, "change", move |event| {
            let files = event
                .target()
                .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
                .and_then(|input| input.files());
            if let Err(err) = controller
                .borrow_mut()
                .select_file(first_file(files), SelectionSource::Picker)
            {
                tracing::debug!(error = %err, "picker selection rejected");
            }
        })?;
    }

    {
        let file_input = file_input.clone();
        listen(&upload_box, "click", move |_event| {
            file_input.click();
        })?;
    }

    {
        let controller = Rc::clone(controller);
        listen(&upload_box, "dragover", move |event| {
            suppress(&event);
            controller.borrow_mut().drag_over();
        })?;
    }

    {
        let controller = Rc::clone(controller);
        listen(&upload_box, "dragleave", move |event| {
            suppress(&event);
            controller.borrow_mut().drag_leave();
        })?;
    }

    {
        let controller = Rc::clone(controller);
        let file_input = file_input.clone();
        listen(&upload_box, "drop", move |event| {
            suppress(&event);
            let files = event
                .dyn_ref::<DragEvent>()
                .and_then(|drag| drag.data_transfer())
                .and_then(|transfer| transfer.files());
            let accepted = controller.borrow().config().accepted_mime.clone();
            let dropped = mirror_drop(&file_input, files, &accepted);
            if let Err(err) = controller.borrow_mut().drop_file(dropped) {
                tracing::debug!(error = %err, "dropped file rejected");
            }
        })?;
    }

    wire_actions(controller)
}

/// Hook up `data-action="upload"` and `data-action="reset"` buttons
fn wire_actions(controller: &Rc<RefCell<Controller>>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document")?;
    let buttons = document.query_selector_all("[data-action]")?;

    for index in 0..buttons.length() {
        let Some(button) = buttons
            .item(index)
            .and_then(|node| node.dyn_into::<web_sys::Element>().ok())
        else {
            continue;
        };
        let action = button.get_attribute("data-action").unwrap_or_default();
        let controller = Rc::clone(controller);

        match action.as_str() {
            "upload" => listen(&button, "click", move |event| {
                event.prevent_default();
                let controller = Rc::clone(&controller);
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(err) = run_upload(controller, FetchTransport).await {
                        tracing::debug!(error = %err, "upload ended without results");
                    }
                });
            })?,
            "reset" => listen(&button, "click", move |event| {
                event.prevent_default();
                if let Err(err) = controller.borrow_mut().reset() {
                    tracing::debug!(error = %err, "reset ignored");
                }
            })?,
            other => tracing::debug!(action = other, "unknown data-action"),
        }
    }

    Ok(())
}

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn file_input() -> HtmlInputElement {
        let document = web_sys::window().unwrap().document().unwrap();
        let input: HtmlInputElement = document
            .create_element("input")
            .unwrap()
            .dyn_into()
            .unwrap();
        input.set_type("file");
        input
    }

    fn file_list(name: &str, mime: &str) -> FileList {
        let transfer = web_sys::DataTransfer::new().unwrap();
        let parts = js_sys::Array::of1(&JsValue::from_str("%PDF-1.4"));
        let options = web_sys::FilePropertyBag::new();
        options.set_type(mime);
        let file =
            web_sys::File::new_with_str_sequence_and_options(&parts, name, &options).unwrap();
        transfer.items().add_with_file(&file).unwrap();
        transfer.files().unwrap()
    }

    #[wasm_bindgen_test]
    fn test_pdf_drop_is_mirrored_into_input() {
        let input = file_input();
        let files = file_list("a.pdf", "application/pdf");
        let dropped = mirror_drop(&input, Some(files), "application/pdf");

        assert_eq!(dropped.map(|file| file.file().name()).as_deref(), Some("a.pdf"));
        let files = input.files().unwrap();
        assert_eq!(files.length(), 1);
        assert_eq!(files.get(0).unwrap().name(), "a.pdf");
    }

    #[wasm_bindgen_test]
    fn test_non_pdf_drop_leaves_input_alone() {
        let input = file_input();
        let files = file_list("b.png", "image/png");
        let dropped = mirror_drop(&input, Some(files), "application/pdf");

        assert!(dropped.is_some());
        assert_eq!(input.files().map(|files| files.length()).unwrap_or(0), 0);
    }

    #[wasm_bindgen_test]
    fn test_empty_drop_yields_nothing() {
        let input = file_input();
        assert!(mirror_drop(&input, None, "application/pdf").is_none());
    }
}
