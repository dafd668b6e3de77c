//! Wizard Module
//!
//! The four-step design wizard: a validating state machine plus the
//! interactive terminal driver that walks a user through it.

pub mod controller;
pub mod driver;

pub use controller::{Advance, WizardController, WizardStep};
pub use driver::{run_wizard, submit};
