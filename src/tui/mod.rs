//! Terminal User Interface
//!
//! The presentation shell: landing view, wizard modal, and file picker,
//! driven by a single event dispatch loop.

pub mod app;
pub mod events;
pub mod file_picker;
pub mod render;
pub mod runner;
pub mod wizard_render;

pub use app::App;
pub use events::{AppMode, EventHandler, TuiEvent};
pub use runner::run;
