//! Upload-and-review controller
//!
//! Owns the selected file and the visible panel, and drives a [`ReviewView`]
//! through selection, upload and rendering. The upload itself is delegated to
//! an [`UploadTransport`]; the browser build wires in `fetch`, tests wire in
//! fakes.
//!
//! ## Flow
//!
//! ```text
//! select_file ──▶ FileChosen ──submit──▶ Loading ──ok──▶ Results
//!                                            └──err──▶ Empty (notice shown)
//! ```
//!
//! `submit` is split into [`ReviewController::begin_submit`] and
//! [`ReviewController::complete_submit`] so callers holding the controller
//! in a `RefCell` can release it while the request is in flight.

use crate::config::ClientConfig;
use crate::error::ReviewError;
use crate::model::UploadResult;
use crate::render::{self, ResultsSurface};
use crate::selection::{validate_candidate, FileLike, SelectedFile, SelectionSource};
use crate::state::{Panel, PanelEvent};

/// Sends one file to the review service
#[allow(async_fn_in_trait)]
pub trait UploadTransport<F> {
    /// Upload `file` and return the raw response body
    ///
    /// Network failures are reported as [`ReviewError::TransferError`]. The
    /// body is returned whatever the HTTP status, since the service reports
    /// its own failures as JSON.
    async fn upload(&self, config: &ClientConfig, file: &F) -> Result<String, ReviewError>;
}

/// Everything the controller shows to the user
pub trait ReviewView: ResultsSurface {
    /// Make `panel` the only visible panel
    fn show_panel(&mut self, panel: Panel);
    fn set_file_name(&mut self, name: &str);
    fn set_drag_highlight(&mut self, active: bool);
    /// Blocking notice, `alert()` in the browser
    fn notify(&mut self, message: &str);
    fn clear_file_input(&mut self);
}

pub struct ReviewController<F, V> {
    config: ClientConfig,
    view: V,
    panel: Panel,
    selected: Option<SelectedFile<F>>,
    in_flight: bool,
}

impl<F, V> ReviewController<F, V>
where
    F: FileLike + Clone,
    V: ReviewView,
{
    /// Create a controller and show the empty upload panel
    pub fn new(config: ClientConfig, mut view: V) -> Self {
        view.show_panel(Panel::Empty);
        Self {
            config,
            view,
            panel: Panel::Empty,
            selected: None,
            in_flight: false,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    pub fn selected(&self) -> Option<&SelectedFile<F>> {
        self.selected.as_ref()
    }

    pub fn is_uploading(&self) -> bool {
        self.in_flight
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    fn transition(&mut self, event: PanelEvent) -> Result<(), ReviewError> {
        let next = self.panel.apply(event)?;
        tracing::debug!(from = ?self.panel, to = ?next, ?event, "panel transition");
        self.panel = next;
        self.view.show_panel(next);
        Ok(())
    }

    fn report(&mut self, err: &ReviewError, source: Option<SelectionSource>) {
        self.view.notify(&err.user_message(source));
    }

    /// Make `candidate` the file to upload
    ///
    /// A rejected candidate leaves the selection and the panel untouched;
    /// the user gets a notice instead.
    pub fn select_file(
        &mut self,
        candidate: Option<F>,
        source: SelectionSource,
    ) -> Result<(), ReviewError> {
        // Checked first so a rejected transition never drops the current file.
        if let Err(err) = self.panel.apply(PanelEvent::FileSelected) {
            tracing::warn!(panel = ?self.panel, "file selected while not accepting files");
            return Err(err);
        }

        let selected = match validate_candidate(candidate, &self.config) {
            Ok(selected) => selected,
            Err(err) => {
                tracing::debug!(error = %err, ?source, "rejected file");
                self.report(&err, Some(source));
                return Err(err);
            }
        };

        tracing::debug!(name = selected.name(), size = selected.size(), ?source, "file selected");
        self.view.set_file_name(selected.name());
        self.selected = Some(selected);
        self.transition(PanelEvent::FileSelected)
    }

    pub fn drag_over(&mut self) {
        self.view.set_drag_highlight(true);
    }

    pub fn drag_leave(&mut self) {
        self.view.set_drag_highlight(false);
    }

    /// Drop handler: clear the highlight, then select the first dropped file
    pub fn drop_file(&mut self, candidate: Option<F>) -> Result<(), ReviewError> {
        self.view.set_drag_highlight(false);
        self.select_file(candidate, SelectionSource::Drop)
    }

    /// Return to the empty upload panel, forgetting the selected file
    pub fn reset(&mut self) -> Result<(), ReviewError> {
        self.transition(PanelEvent::Reset)?;
        self.selected = None;
        self.view.clear_file_input();
        Ok(())
    }

    /// Start an upload: check there is a file, switch to the loading panel and
    /// hand back the file for the transport
    pub fn begin_submit(&mut self) -> Result<F, ReviewError> {
        if self.in_flight {
            tracing::warn!("upload requested while another is in flight");
            return Err(ReviewError::SubmissionInFlight);
        }

        let file = match &self.selected {
            Some(selected) => selected.handle().clone(),
            None => {
                let err = ReviewError::NoFileSelected;
                self.report(&err, None);
                return Err(err);
            }
        };

        self.transition(PanelEvent::SubmitStarted)?;
        self.in_flight = true;
        tracing::info!(name = %file.name(), url = %self.config.upload_url, "uploading");
        Ok(file)
    }

    /// Finish an upload started with [`begin_submit`](Self::begin_submit)
    ///
    /// `outcome` is the raw response body or the transport's error. On success
    /// the results are rendered; on any failure the user is notified and the
    /// controller returns to the empty panel.
    pub fn complete_submit(
        &mut self,
        outcome: Result<String, ReviewError>,
    ) -> Result<UploadResult, ReviewError> {
        self.in_flight = false;

        let parsed = outcome.and_then(|body| UploadResult::from_response_body(&body));
        let rendered = parsed.and_then(|result| {
            self.transition(PanelEvent::Succeeded)?;
            render::render(&result, &mut self.view)?;
            Ok(result)
        });

        match rendered {
            Ok(result) => {
                tracing::info!(
                    pages = result.results.len(),
                    edits = result.edit_count(),
                    "upload analysed"
                );
                Ok(result)
            }
            Err(err) => {
                if matches!(err, ReviewError::TransferError(_)) {
                    tracing::error!(error = %err, "upload failed");
                } else {
                    tracing::warn!(error = %err, "upload rejected");
                }
                self.report(&err, None);
                self.fail_to_empty();
                Err(err)
            }
        }
    }

    /// Back to the empty panel after a failed upload, from wherever it failed
    fn fail_to_empty(&mut self) {
        let event = if self.panel == Panel::Loading {
            PanelEvent::Failed
        } else {
            PanelEvent::Reset
        };
        if let Err(err) = self.transition(event) {
            tracing::warn!(error = %err, "could not return to the empty panel");
        }
        self.selected = None;
        self.view.clear_file_input();
    }

    /// Upload the selected file and render the analysis
    pub async fn submit<T>(&mut self, transport: &T) -> Result<UploadResult, ReviewError>
    where
        T: UploadTransport<F>,
    {
        let file = self.begin_submit()?;
        let outcome = transport.upload(&self.config, &file).await;
        self.complete_submit(outcome)
    }
}
