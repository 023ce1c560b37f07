//! Widget engine: template evaluation, environment detection, the
//! static/api widget variants and the grid that composes their output
//! into extra status-line rows.

pub mod detect;
pub mod grid;
pub mod template;

mod error;
mod renderer;
mod widget;

pub use error::{Error, Result};
pub use grid::GridCell;
pub use renderer::{MultilineRenderer, RenderReport};
pub use widget::{build_widget, ApiWidget, StaticWidget, Widget};
