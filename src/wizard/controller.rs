//! Wizard Controller
//!
//! The four-step linear state machine behind the design wizard.
//! Advancing is gated on the current step's requirement; retreating never
//! validates. Selection setters only apply while the controller sits on
//! the matching step.

use crate::error::{ValidationError, WizardError};
use crate::types::WizardSelection;

/// A decision point in the wizard, in order. `Complete` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WizardStep {
    SiteType,
    Pages,
    Theme,
    Features,
    Complete,
}

impl WizardStep {
    /// 1-based position shown in the step indicator.
    pub fn number(&self) -> usize {
        match self {
            WizardStep::SiteType => 1,
            WizardStep::Pages => 2,
            WizardStep::Theme => 3,
            WizardStep::Features => 4,
            WizardStep::Complete => 5,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::SiteType => "Website Type",
            WizardStep::Pages => "Pages",
            WizardStep::Theme => "Color Theme",
            WizardStep::Features => "Features",
            WizardStep::Complete => "Complete",
        }
    }

    fn next(&self) -> WizardStep {
        match self {
            WizardStep::SiteType => WizardStep::Pages,
            WizardStep::Pages => WizardStep::Theme,
            WizardStep::Theme => WizardStep::Features,
            WizardStep::Features | WizardStep::Complete => WizardStep::Complete,
        }
    }

    fn previous(&self) -> Option<WizardStep> {
        match self {
            WizardStep::SiteType => None,
            WizardStep::Pages => Some(WizardStep::SiteType),
            WizardStep::Theme => Some(WizardStep::Pages),
            WizardStep::Features => Some(WizardStep::Theme),
            // Terminal: the surrounding application resets instead.
            WizardStep::Complete => None,
        }
    }
}

/// Outcome of a successful [`WizardController::advance`].
#[derive(Clone, Debug, PartialEq)]
pub enum Advance {
    /// Moved to the next decision point.
    Next(WizardStep),
    /// All four steps are done; the selection is ready for generation.
    Complete(WizardSelection),
}

/// Drives a single pass through the wizard.
///
/// Owns the [`WizardSelection`] it accumulates; there is no other writer.
#[derive(Clone, Debug)]
pub struct WizardController {
    step: WizardStep,
    selection: WizardSelection,
}

impl WizardController {
    /// A fresh wizard sitting on the first step with an empty selection.
    pub fn new() -> Self {
        Self {
            step: WizardStep::SiteType,
            selection: WizardSelection::default(),
        }
    }

    pub fn current_step(&self) -> WizardStep {
        self.step
    }

    pub fn selection(&self) -> &WizardSelection {
        &self.selection
    }

    /// Record the site type. Only valid on the first step.
    pub fn select_site_type(&mut self, site_type: impl Into<String>) -> Result<(), WizardError> {
        self.ensure_step(WizardStep::SiteType, "select_site_type")?;
        self.selection.template_type = Some(site_type.into());
        Ok(())
    }

    /// Record the chosen pages. Only valid on the pages step.
    pub fn select_pages(&mut self, pages: Vec<String>) -> Result<(), WizardError> {
        self.ensure_step(WizardStep::Pages, "select_pages")?;
        self.selection.selected_pages = pages;
        Ok(())
    }

    /// Record the color theme. Only valid on the theme step.
    pub fn select_theme(&mut self, theme: impl Into<String>) -> Result<(), WizardError> {
        self.ensure_step(WizardStep::Theme, "select_theme")?;
        self.selection.selected_theme = Some(theme.into());
        Ok(())
    }

    /// Record the chosen features. Only valid on the features step.
    pub fn select_features(&mut self, features: Vec<String>) -> Result<(), WizardError> {
        self.ensure_step(WizardStep::Features, "select_features")?;
        self.selection.selected_features = features;
        Ok(())
    }

    /// Check the current step's requirement against the selection.
    ///
    /// The mapping is fixed here rather than derived from whatever the
    /// presentation layer happens to show.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.step {
            WizardStep::SiteType => {
                if self.selection.template_type.is_none() {
                    return Err(ValidationError::MissingSiteType);
                }
            }
            WizardStep::Pages => {
                if self.selection.selected_pages.is_empty() {
                    return Err(ValidationError::NoPagesSelected);
                }
            }
            WizardStep::Theme => {
                if self.selection.selected_theme.is_none() {
                    return Err(ValidationError::MissingTheme);
                }
            }
            // Features are optional; Complete has nothing left to check.
            WizardStep::Features | WizardStep::Complete => {}
        }
        Ok(())
    }

    /// Advance past the current step.
    ///
    /// Refused with no state change when the step's requirement is unmet.
    /// Advancing past the final step transitions to `Complete` and yields
    /// the accumulated selection for generation.
    pub fn advance(&mut self) -> Result<Advance, WizardError> {
        if self.step == WizardStep::Complete {
            return Err(WizardError::AlreadyComplete);
        }

        self.validate()?;
        self.step = self.step.next();

        if self.step == WizardStep::Complete {
            Ok(Advance::Complete(self.selection.clone()))
        } else {
            Ok(Advance::Next(self.step))
        }
    }

    /// Move back one step. Never validates. Returns whether a move
    /// happened; on the first step this is a no-op.
    pub fn retreat(&mut self) -> bool {
        match self.step.previous() {
            Some(previous) => {
                self.step = previous;
                true
            }
            None => false,
        }
    }

    fn ensure_step(
        &self,
        expected: WizardStep,
        operation: &'static str,
    ) -> Result<(), WizardError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(WizardError::WrongStep {
                operation,
                step: self.step.title(),
            })
        }
    }
}

impl Default for WizardController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    /// Walk a controller through the first three steps with valid input.
    fn controller_on_features() -> WizardController {
        let mut c = WizardController::new();
        c.select_site_type("blog").unwrap();
        c.advance().unwrap();
        c.select_pages(vec!["home".to_string(), "post".to_string()])
            .unwrap();
        c.advance().unwrap();
        c.select_theme("dark").unwrap();
        c.advance().unwrap();
        assert_eq!(c.current_step(), WizardStep::Features);
        c
    }

    #[test]
    fn test_advance_requires_site_type() {
        let mut c = WizardController::new();
        let err = c.advance().unwrap_err();
        assert_eq!(
            err,
            WizardError::Validation(ValidationError::MissingSiteType)
        );
        assert_eq!(c.current_step(), WizardStep::SiteType);

        c.select_site_type("business").unwrap();
        assert_eq!(c.advance().unwrap(), Advance::Next(WizardStep::Pages));
    }

    #[test]
    fn test_advance_requires_nonempty_pages() {
        let mut c = WizardController::new();
        c.select_site_type("business").unwrap();
        c.advance().unwrap();

        c.select_pages(vec![]).unwrap();
        let err = c.advance().unwrap_err();
        assert_eq!(
            err,
            WizardError::Validation(ValidationError::NoPagesSelected)
        );
        assert_eq!(c.current_step(), WizardStep::Pages);

        c.select_pages(vec!["home".to_string()]).unwrap();
        assert_eq!(c.advance().unwrap(), Advance::Next(WizardStep::Theme));
    }

    #[test]
    fn test_advance_requires_theme() {
        let mut c = WizardController::new();
        c.select_site_type("portfolio").unwrap();
        c.advance().unwrap();
        c.select_pages(vec!["gallery".to_string()]).unwrap();
        c.advance().unwrap();

        let err = c.advance().unwrap_err();
        assert_eq!(err, WizardError::Validation(ValidationError::MissingTheme));
        assert_eq!(c.current_step(), WizardStep::Theme);
    }

    #[test]
    fn test_features_step_advances_with_empty_selection() {
        let mut c = controller_on_features();

        // Features stay empty; the step must still complete.
        match c.advance().unwrap() {
            Advance::Complete(selection) => {
                assert_eq!(selection.template_type.as_deref(), Some("blog"));
                assert_eq!(selection.selected_pages, vec!["home", "post"]);
                assert_eq!(selection.selected_theme.as_deref(), Some("dark"));
                assert!(selection.selected_features.is_empty());
            }
            other => panic!("expected completion, got {:?}", other),
        }
        assert_eq!(c.current_step(), WizardStep::Complete);
    }

    #[test]
    fn test_completion_carries_all_fields_as_last_set() {
        let mut c = controller_on_features();
        c.select_features(vec!["comments".to_string()]).unwrap();
        // Last write wins.
        c.select_features(vec!["search".to_string(), "newsletter".to_string()])
            .unwrap();

        match c.advance().unwrap() {
            Advance::Complete(selection) => {
                assert_eq!(selection.selected_features, vec!["search", "newsletter"]);
            }
            other => panic!("expected completion, got {:?}", other),
        }
    }

    #[test]
    fn test_retreat_is_a_noop_on_the_first_step() {
        let mut c = WizardController::new();
        assert!(!c.retreat());
        assert_eq!(c.current_step(), WizardStep::SiteType);
    }

    #[test]
    fn test_retreat_never_validates() {
        let mut c = WizardController::new();
        c.select_site_type("ecommerce").unwrap();
        c.advance().unwrap();

        // Pages requirement is unmet; moving backward is still allowed.
        assert!(c.retreat());
        assert_eq!(c.current_step(), WizardStep::SiteType);
    }

    #[test]
    fn test_setters_are_rejected_on_the_wrong_step() {
        let mut c = WizardController::new();
        let err = c.select_theme("dark").unwrap_err();
        assert!(matches!(err, WizardError::WrongStep { .. }));
        assert!(c.selection().selected_theme.is_none());

        let err = c.select_pages(vec!["home".to_string()]).unwrap_err();
        assert!(matches!(err, WizardError::WrongStep { .. }));
    }

    #[test]
    fn test_advance_after_completion_is_an_error() {
        let mut c = controller_on_features();
        c.advance().unwrap();

        assert_eq!(c.advance().unwrap_err(), WizardError::AlreadyComplete);
        assert!(!c.retreat());
    }
}
