//! DOM-backed view
//!
//! Looks up the page's panels once at mount time and implements the
//! controller's view on top of them.

use inkreview_core::{Markup, Panel, ResultsSurface, ReviewView};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, HtmlElement, HtmlInputElement, ScrollBehavior, ScrollIntoViewOptions, Window,
};

use crate::config::ElementIds;

pub struct DomView {
    window: Window,
    document: Document,
    upload_box: HtmlElement,
    file_input: HtmlInputElement,
    file_info: HtmlElement,
    file_name: HtmlElement,
    loading: HtmlElement,
    results: HtmlElement,
    result_file_name: HtmlElement,
    total_pages: HtmlElement,
    results_container: HtmlElement,
}

fn element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element #{}", id)))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Element #{} has the wrong type", id)))
}

fn set_visible(element: &HtmlElement, visible: bool) {
    let display = if visible { "block" } else { "none" };
    if let Err(err) = element.style().set_property("display", display) {
        tracing::warn!(id = %element.id(), ?err, "failed to toggle panel");
    }
}

impl DomView {
    /// Bind to the elements named in `ids`
    ///
    /// # Errors
    /// Returns an error if there is no document or an element is missing
    pub fn new(ids: &ElementIds) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("No window")?;
        let document = window.document().ok_or("No document")?;

        Ok(Self {
            upload_box: element(&document, &ids.upload_box)?,
            file_input: element(&document, &ids.file_input)?,
            file_info: element(&document, &ids.file_info)?,
            file_name: element(&document, &ids.file_name)?,
            loading: element(&document, &ids.loading)?,
            results: element(&document, &ids.results)?,
            result_file_name: element(&document, &ids.result_file_name)?,
            total_pages: element(&document, &ids.total_pages)?,
            results_container: element(&document, &ids.results_container)?,
            window,
            document,
        })
    }

    pub fn upload_box(&self) -> &HtmlElement {
        &self.upload_box
    }

    pub fn file_input(&self) -> &HtmlInputElement {
        &self.file_input
    }

    fn panel_element(&self, panel: Panel) -> &HtmlElement {
        match panel {
            Panel::Empty => &self.upload_box,
            Panel::FileChosen => &self.file_info,
            Panel::Loading => &self.loading,
            Panel::Results => &self.results,
        }
    }
}

impl ResultsSurface for DomView {
    fn show_results(&mut self) {
        set_visible(&self.results, true);
    }

    fn set_summary(&mut self, filename: &str, total_pages: u32) {
        self.result_file_name.set_text_content(Some(filename));
        self.total_pages
            .set_text_content(Some(&total_pages.to_string()));
    }

    fn clear_pages(&mut self) {
        self.results_container.set_inner_html("");
    }

    fn append_page(&mut self, block: &Markup) {
        let appended = self.document.create_element("div").and_then(|div| {
            div.set_class_name("page-result");
            div.set_inner_html(block.as_str());
            self.results_container.append_child(&div)
        });
        if let Err(err) = appended {
            tracing::warn!(?err, "failed to append page block");
        }
    }

    fn scroll_to_results(&mut self) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        self.results
            .scroll_into_view_with_scroll_into_view_options(&options);
    }
}

impl ReviewView for DomView {
    fn show_panel(&mut self, panel: Panel) {
        for candidate in Panel::ALL {
            set_visible(self.panel_element(candidate), candidate == panel);
        }
    }

    fn set_file_name(&mut self, name: &str) {
        self.file_name.set_text_content(Some(name));
    }

    fn set_drag_highlight(&mut self, active: bool) {
        let classes = self.upload_box.class_list();
        let toggled = if active {
            classes.add_1("dragover")
        } else {
            classes.remove_1("dragover")
        };
        if let Err(err) = toggled {
            tracing::warn!(?err, "failed to toggle drag highlight");
        }
    }

    fn notify(&mut self, message: &str) {
        if self.window.alert_with_message(message).is_err() {
            web_sys::console::error_1(&message.into());
        }
    }

    fn clear_file_input(&mut self) {
        self.file_input.set_value("");
    }
}

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use inkreview_core::render::render;
    use inkreview_core::{PageResult, UploadResult};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    /// Build the review page skeleton inside a fresh container
    fn mount_fixture() -> DomView {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(old) = document.get_element_by_id("fixture") {
            old.remove();
        }
        let fixture = document.create_element("div").unwrap();
        fixture.set_id("fixture");
        fixture.set_inner_html(
            r#"<div id="uploadBox"><input type="file" id="fileInput"></div>
            <div id="fileInfo"><span id="fileName"></span></div>
            <div id="loadingSection"></div>
            <div id="resultsSection">
                <span id="resultFileName"></span><span id="totalPages"></span>
                <div id="resultsContainer"></div>
            </div>"#,
        );
        document.body().unwrap().append_child(&fixture).unwrap();
        DomView::new(&ElementIds::default()).unwrap()
    }

    fn display(view: &DomView, panel: Panel) -> String {
        view.panel_element(panel)
            .style()
            .get_property_value("display")
            .unwrap()
    }

    #[wasm_bindgen_test]
    fn test_missing_element_is_error() {
        let ids = ElementIds {
            loading: "no-such-element".to_string(),
            ..Default::default()
        };
        mount_fixture();
        assert!(DomView::new(&ids).is_err());
    }

    #[wasm_bindgen_test]
    fn test_exactly_one_panel_visible() {
        let mut view = mount_fixture();
        for panel in Panel::ALL {
            view.show_panel(panel);
            for other in Panel::ALL {
                let expected = if other == panel { "block" } else { "none" };
                assert_eq!(display(&view, other), expected);
            }
        }
    }

    #[wasm_bindgen_test]
    fn test_drag_highlight_class() {
        let mut view = mount_fixture();
        view.set_drag_highlight(true);
        assert!(view.upload_box().class_list().contains("dragover"));
        view.set_drag_highlight(false);
        assert!(!view.upload_box().class_list().contains("dragover"));
    }

    #[wasm_bindgen_test]
    fn test_rendering_twice_replaces_blocks() {
        let mut view = mount_fixture();
        let result = UploadResult {
            success: true,
            filename: "a.pdf".to_string(),
            total_pages: 2,
            results: vec![
                PageResult {
                    page: 1,
                    ..Default::default()
                },
                PageResult {
                    page: 2,
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        render(&result, &mut view).unwrap();
        render(&result, &mut view).unwrap();

        let document = web_sys::window().unwrap().document().unwrap();
        let blocks = document
            .query_selector_all("#resultsContainer > .page-result")
            .unwrap();
        assert_eq!(blocks.length(), 2);
        assert_eq!(
            document
                .get_element_by_id("resultFileName")
                .unwrap()
                .text_content(),
            Some("a.pdf".to_string())
        );
    }
}
