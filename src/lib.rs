//! Game Creator - terminal wizard for creating a game entry
//!
//! Walks the user through three steps: name the game, choose how to deliver
//! it (a hosted URL, inline HTML/CSS/JavaScript, or uploaded files), then
//! enter the details and submit. The finished payload is handed to a
//! [`sink::SubmissionSink`].
//!
//! ## Quick Start
//!
//! ```bash
//! # Interactive wizard
//! game-creator
//!
//! # Headless submission
//! game-creator submit --name "Pixel Quest" --url https://example.com/pq
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod sink;
pub mod tui;
pub mod wizard;

// Re-export commonly used types
pub use error::GameCreatorError;
pub use wizard::{Submission, Wizard};
