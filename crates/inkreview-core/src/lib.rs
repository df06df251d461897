//! Core of the red-ink review client
//!
//! Everything here is platform independent: the response model, file
//! validation, the panel state machine, the controller and the HTML
//! rendering. The browser crate supplies the DOM view and the `fetch`
//! transport through the [`ReviewView`] and [`UploadTransport`] traits.

pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod render;
pub mod selection;
pub mod state;

pub use config::ClientConfig;
pub use controller::{ReviewController, ReviewView, UploadTransport};
pub use error::{ConfigError, ReviewError};
pub use model::{EditAction, EditOrder, EditRow, EditTable, HealthStatus, PageResult, UploadResult};
pub use render::{escape_html, format_multiline, Markup, ResultsSurface};
pub use selection::{FileLike, SelectedFile, SelectionSource};
pub use state::{Panel, PanelEvent};
