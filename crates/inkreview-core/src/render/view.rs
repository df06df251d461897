//! Template view models
//!
//! Every string field is [`Markup`]: server text is escaped while the view
//! model is built, and the templates insert it as-is.

use askama::Template;

use super::escape::{escape_html, format_multiline, Markup};
use crate::model::{EditRow, EditTable, PageResult};

/// Schemes a server-supplied image URL may carry
const LINK_SCHEMES: [&str; 2] = ["http", "https"];

/// `url` if it is relative or uses an allowed scheme
///
/// Browsers ignore ASCII whitespace and control characters inside a scheme,
/// so they are dropped before the scheme is read.
pub fn link_target(url: &str) -> Option<&str> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }
    let normalized: String = url
        .chars()
        .filter(|c| !c.is_ascii_control() && !c.is_ascii_whitespace())
        .collect();
    match normalized.find([':', '/', '?', '#']) {
        Some(at) if normalized[at..].starts_with(':') => {
            let scheme = &normalized[..at];
            LINK_SCHEMES
                .iter()
                .any(|allowed| scheme.eq_ignore_ascii_case(allowed))
                .then_some(url)
        }
        _ => Some(url),
    }
}

const EMPTY_TABLE: &str = r#"<div class="empty-result"><p>분석 결과가 없습니다.</p></div>"#;

#[derive(Template)]
#[template(path = "edit_table.html", escape = "none")]
pub struct TableView {
    pub rows: Vec<RowView>,
}

pub struct RowView {
    pub order: Markup,
    pub action: Markup,
    pub original_class: &'static str,
    pub original_text: Markup,
    pub new_text: Markup,
    pub location: Markup,
}

impl From<&EditRow> for RowView {
    fn from(row: &EditRow) -> Self {
        Self {
            order: escape_html(&row.order.to_string()),
            action: escape_html(row.action.label()),
            original_class: if row.action.is_delete() {
                "text-deleted"
            } else {
                ""
            },
            original_text: format_multiline(row.original_text.as_deref().unwrap_or_default()),
            new_text: format_multiline(row.new_text.as_deref().unwrap_or_default()),
            location: escape_html(row.location.as_deref().unwrap_or_default()),
        }
    }
}

impl TableView {
    /// Markup for `table`, or the empty-state notice when it has no rows
    pub fn render_table(table: &EditTable) -> Result<Markup, askama::Error> {
        if table.rows.is_empty() {
            return Ok(Markup::trusted(EMPTY_TABLE));
        }
        let view = TableView {
            rows: table.rows.iter().map(RowView::from).collect(),
        };
        Ok(Markup::trusted(view.render()?))
    }
}

#[derive(Template)]
#[template(path = "page_result.html", escape = "none")]
pub struct PageView {
    pub page: u32,
    pub badge_class: &'static str,
    pub badge_text: Markup,
    pub has_images: bool,
    pub page_url: Markup,
    pub has_debug: bool,
    pub debug_url: Markup,
    pub has_edits: bool,
    pub table: Markup,
}

impl PageView {
    pub fn build(page: &PageResult) -> Result<Self, askama::Error> {
        let has_edits = page.has_edits();
        let (badge_class, badge_text) = if has_edits {
            (
                "badge-success",
                escape_html(&format!("{}개 수정사항 발견", page.edits.len())),
            )
        } else {
            ("badge-info", escape_html("수정사항 없음"))
        };

        // Only relative and http(s) URLs are linked. The overlay is only
        // shown next to the page image it annotates.
        let page_url = page.image_url.as_deref().and_then(link_target);
        let debug_url = page.debug_url.as_deref().and_then(link_target);
        let rejected = |raw: &Option<String>, kept: Option<&str>| {
            raw.as_deref().is_some_and(|url| !url.trim().is_empty()) && kept.is_none()
        };
        if rejected(&page.image_url, page_url) || rejected(&page.debug_url, debug_url) {
            tracing::warn!(page = page.page, "dropped image URL with a disallowed scheme");
        }
        let page_url = page_url.unwrap_or_default();
        let debug_url = debug_url.unwrap_or_default();
        let has_images = !page_url.is_empty();

        let table = if has_edits {
            TableView::render_table(&page.table)?
        } else {
            Markup::default()
        };

        Ok(Self {
            page: page.page,
            badge_class,
            badge_text,
            has_images,
            page_url: escape_html(page_url),
            has_debug: has_images && !debug_url.is_empty(),
            debug_url: escape_html(debug_url),
            has_edits,
            table,
        })
    }
}
