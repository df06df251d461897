//! Result rendering
//!
//! Turns an [`UploadResult`] into page blocks and writes them to a
//! [`ResultsSurface`]. The markup comes from askama templates fed with view
//! models whose text fields are escaped up front.

mod escape;
mod view;

pub use escape::{escape_html, format_multiline, Markup};
pub use view::{link_target, PageView, RowView, TableView};

use askama::Template;

use crate::error::ReviewError;
use crate::model::{EditTable, PageResult, UploadResult};

/// Where rendered results end up
pub trait ResultsSurface {
    fn show_results(&mut self);
    fn set_summary(&mut self, filename: &str, total_pages: u32);
    /// Remove every page block from a previous render
    fn clear_pages(&mut self);
    fn append_page(&mut self, block: &Markup);
    fn scroll_to_results(&mut self);
}

/// Markup for one page block (the contents of its `page-result` container)
pub fn render_page(page: &PageResult) -> Result<Markup, ReviewError> {
    let view = PageView::build(page)?;
    Ok(Markup::trusted(view.render()?))
}

pub fn render_table(table: &EditTable) -> Result<Markup, ReviewError> {
    Ok(TableView::render_table(table)?)
}

/// Render every page of `result` onto `surface`, replacing what a previous
/// call put there
///
/// All blocks are rendered before the surface is touched, so a template
/// failure leaves the previous results in place.
pub fn render<S: ResultsSurface + ?Sized>(
    result: &UploadResult,
    surface: &mut S,
) -> Result<(), ReviewError> {
    let blocks = result
        .results
        .iter()
        .map(render_page)
        .collect::<Result<Vec<_>, _>>()?;

    surface.show_results();
    surface.set_summary(&result.filename, result.total_pages);
    surface.clear_pages();
    for block in &blocks {
        surface.append_page(block);
    }
    surface.scroll_to_results();

    tracing::debug!(pages = blocks.len(), "rendered results");
    Ok(())
}
