//! Error Types
//!
//! Typed errors for the recoverable failure kinds of the wizard core.
//! Application-boundary code uses `anyhow`; these enums exist where callers
//! need to distinguish what went wrong.

use thiserror::Error;

/// A single template type failed to load or parse.
///
/// Non-fatal: the type is logged and left out of the catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The current step's requirement is unmet.
///
/// Advancing is refused and the wizard state is unchanged. How the failure
/// is shown to the user is the presentation layer's business.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("select a website type before continuing")]
    MissingSiteType,

    #[error("select at least one page before continuing")]
    NoPagesSelected,

    #[error("select a color theme before continuing")]
    MissingTheme,
}

/// A wizard operation that could not be carried out.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{operation} is not available on the {step} step")]
    WrongStep {
        operation: &'static str,
        step: &'static str,
    },

    #[error("the wizard has already completed")]
    AlreadyComplete,
}
