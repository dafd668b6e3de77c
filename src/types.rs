//! Siteforge - Type Definitions
//!
//! Shared types for the website builder: template descriptors, the wizard
//! selection, generation results, and the external collaborator traits.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ─── Template Catalog ────────────────────────────────────────────

/// A selectable page within a template descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageEntry {
    pub id: String,
    pub name: String,
    /// Pre-checked in the page picker when true.
    pub default: bool,
}

/// A theme or feature option: an identifier plus a display label.
///
/// Descriptors may declare options as bare strings, in which case the
/// string serves as both.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceOption {
    pub id: String,
    pub label: String,
}

/// Parsed `template.json` for one site type.
///
/// Immutable once loaded; sequence order follows the descriptor document
/// and is the display order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TemplateDescriptor {
    pub pages: Vec<PageEntry>,
    pub themes: Vec<ChoiceOption>,
    pub features: Vec<ChoiceOption>,
}

// ─── Wizard Selection ────────────────────────────────────────────

/// Accumulated user selections, one field per wizard step.
///
/// Serializes to the generation request body:
/// `{ templateType, selectedPages, selectedTheme, selectedFeatures }`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WizardSelection {
    pub template_type: Option<String>,
    pub selected_pages: Vec<String>,
    pub selected_theme: Option<String>,
    pub selected_features: Vec<String>,
}

// ─── Generation ──────────────────────────────────────────────────

/// Terminal response from the design-generation service.
///
/// Exactly one response per submission: either the failure shape (`error`
/// set) or the success shape, whose artifact URLs may each be absent.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerationResult {
    /// Build the failure shape from any error message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            preview_url: None,
            download_url: None,
            error: Some(message.into()),
        }
    }

    /// Classify the result into its terminal outcome.
    ///
    /// A result with neither artifact URL nor error is the distinct
    /// ready-for-download state, not a guess at one of the others.
    pub fn outcome(&self) -> GenerationOutcome<'_> {
        if let Some(message) = &self.error {
            return GenerationOutcome::Failed(message);
        }
        if let Some(url) = &self.preview_url {
            return GenerationOutcome::Preview(url);
        }
        GenerationOutcome::ReadyForDownload
    }
}

/// The three terminal states a generation can land in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerationOutcome<'a> {
    Failed(&'a str),
    Preview(&'a str),
    ReadyForDownload,
}

// ─── Collaborator Traits ─────────────────────────────────────────

/// Boundary to the remote design-generation service.
///
/// A single attempt per call, no built-in retry. Implementations must fold
/// every transport-level failure into the `GenerationResult` error shape
/// rather than letting the caller observe a raw exception.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(&self, selection: &WizardSelection) -> GenerationResult;
}

/// Boundary to whatever displays generation results to the user.
#[async_trait]
pub trait ResultPresenter: Send + Sync {
    /// Render the terminal state of a generation result.
    fn present(&self, result: &GenerationResult);

    /// Fetch the generated artifact to disk. An error condition when the
    /// result carries no download URL.
    async fn download(&self, result: &GenerationResult) -> anyhow::Result<std::path::PathBuf>;
}

// ─── Configuration ───────────────────────────────────────────────

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderConfig {
    pub api_url: String,
    pub templates_dir: String,
    pub output_dir: String,
    pub site_types: Vec<String>,
    pub request_timeout_secs: u64,
    pub log_level: LogLevel,
    pub version: String,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Returns the default `BuilderConfig`. The four site types match the
/// descriptors shipped under `templates/`.
pub fn default_config() -> BuilderConfig {
    BuilderConfig {
        api_url: "http://localhost:5000".to_string(),
        templates_dir: "templates".to_string(),
        output_dir: ".".to_string(),
        site_types: vec![
            "business".to_string(),
            "ecommerce".to_string(),
            "portfolio".to_string(),
            "blog".to_string(),
        ],
        request_timeout_secs: 30,
        log_level: LogLevel::Info,
        version: "0.1.0".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_serializes_to_request_body() {
        let selection = WizardSelection {
            template_type: Some("blog".to_string()),
            selected_pages: vec!["home".to_string(), "post".to_string()],
            selected_theme: Some("dark".to_string()),
            selected_features: vec![],
        };

        let body = serde_json::to_value(&selection).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "templateType": "blog",
                "selectedPages": ["home", "post"],
                "selectedTheme": "dark",
                "selectedFeatures": [],
            })
        );
    }

    #[test]
    fn test_error_result_classifies_as_failed() {
        let result = GenerationResult::failure("service unavailable");
        assert_eq!(result.outcome(), GenerationOutcome::Failed("service unavailable"));
    }

    #[test]
    fn test_error_wins_over_preview() {
        // A malformed service response could set both; the error state must win.
        let result = GenerationResult {
            preview_url: Some("/api/preview/abc".to_string()),
            download_url: None,
            error: Some("generator crashed".to_string()),
        };
        assert_eq!(result.outcome(), GenerationOutcome::Failed("generator crashed"));
    }

    #[test]
    fn test_preview_outcome() {
        let result = GenerationResult {
            preview_url: Some("/api/preview/abc".to_string()),
            download_url: Some("/api/download/abc".to_string()),
            error: None,
        };
        assert_eq!(result.outcome(), GenerationOutcome::Preview("/api/preview/abc"));
    }

    #[test]
    fn test_no_urls_is_ready_for_download() {
        let result = GenerationResult::default();
        assert_eq!(result.outcome(), GenerationOutcome::ReadyForDownload);
    }

    #[test]
    fn test_result_tolerates_extra_service_fields() {
        let raw = r#"{"success": true, "downloadUrl": "/api/download/xyz"}"#;
        let result: GenerationResult = serde_json::from_str(raw).unwrap();
        assert_eq!(result.download_url.as_deref(), Some("/api/download/xyz"));
        assert!(result.error.is_none());
    }
}
