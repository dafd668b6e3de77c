//! Presentation Module
//!
//! Displays generation results and handles artifact downloads.

pub mod terminal;

pub use terminal::TerminalPresenter;
