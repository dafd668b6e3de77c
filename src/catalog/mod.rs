//! Template Catalog
//!
//! Loads one `template.json` descriptor per site type from the templates
//! directory and exposes read-only accessors for pages, themes, and
//! features. A type that fails to load is logged and skipped; the rest
//! of the catalog stays usable.

pub mod loader;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::CatalogError;
use crate::types::{ChoiceOption, PageEntry, TemplateDescriptor};

/// The loaded template descriptors for a session.
///
/// Built once at startup and never mutated afterward.
pub struct TemplateCatalog {
    /// Descriptors keyed by site type.
    templates: HashMap<String, TemplateDescriptor>,
    /// Successfully loaded types, in the order they were requested.
    types: Vec<String>,
}

impl TemplateCatalog {
    /// Load descriptors for the requested site types from `templates_dir`.
    ///
    /// Each type is fetched in its own task with no ordering guarantee
    /// between them. A failure loading one type does not prevent the
    /// others; failed types are logged at warn level and left out of the
    /// catalog.
    pub async fn load(templates_dir: &str, types: &[String]) -> Self {
        let mut handles = Vec::with_capacity(types.len());

        for site_type in types {
            let path = descriptor_path(templates_dir, site_type);
            let site_type = site_type.clone();
            handles.push(tokio::spawn(async move {
                let result = load_descriptor(&path).await;
                (site_type, result)
            }));
        }

        let mut templates = HashMap::new();
        let mut loaded = Vec::new();

        for handle in handles {
            let (site_type, result) = match handle.await {
                Ok(r) => r,
                Err(_) => continue,
            };

            match result {
                Ok(descriptor) => {
                    debug!("Loaded template descriptor for '{}'", site_type);
                    templates.insert(site_type.clone(), descriptor);
                    loaded.push(site_type);
                }
                Err(e) => {
                    warn!("Skipping template type '{}': {}", site_type, e);
                }
            }
        }

        // Tasks complete in any order; present types as requested.
        loaded.sort_by_key(|t| types.iter().position(|requested| requested == t));

        Self {
            templates,
            types: loaded,
        }
    }

    /// Successfully loaded site types, in requested order.
    pub fn types(&self) -> &[String] {
        &self.types
    }

    /// Returns `true` when no descriptor could be loaded.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// The full descriptor for a site type, if it was loaded.
    pub fn descriptor(&self, site_type: &str) -> Option<&TemplateDescriptor> {
        self.templates.get(site_type)
    }

    /// Pages for a site type, in descriptor order. Empty when the type is
    /// unknown or failed to load.
    pub fn pages(&self, site_type: &str) -> &[PageEntry] {
        self.templates
            .get(site_type)
            .map(|d| d.pages.as_slice())
            .unwrap_or(&[])
    }

    /// Themes for a site type; same fallback as [`pages`](Self::pages).
    pub fn themes(&self, site_type: &str) -> &[ChoiceOption] {
        self.templates
            .get(site_type)
            .map(|d| d.themes.as_slice())
            .unwrap_or(&[])
    }

    /// Features for a site type; same fallback as [`pages`](Self::pages).
    pub fn features(&self, site_type: &str) -> &[ChoiceOption] {
        self.templates
            .get(site_type)
            .map(|d| d.features.as_slice())
            .unwrap_or(&[])
    }
}

/// Path convention: `<templates_dir>/<type>/template.json`.
fn descriptor_path(templates_dir: &str, site_type: &str) -> PathBuf {
    Path::new(templates_dir).join(site_type).join("template.json")
}

async fn load_descriptor(path: &Path) -> Result<TemplateDescriptor, CatalogError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;

    loader::parse_descriptor(&raw).map_err(|source| CatalogError::Parse {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_descriptor(dir: &Path, site_type: &str, contents: &str) {
        let type_dir = dir.join(site_type);
        fs::create_dir_all(&type_dir).unwrap();
        fs::write(type_dir.join("template.json"), contents).unwrap();
    }

    fn requested(types: &[&str]) -> Vec<String> {
        types.iter().map(|t| t.to_string()).collect()
    }

    #[tokio::test]
    async fn test_load_survives_a_missing_type() {
        let dir = tempfile::tempdir().unwrap();
        write_descriptor(
            dir.path(),
            "business",
            r#"{"pages": {"home": {"name": "Home", "default": true}}, "themes": ["professional"]}"#,
        );
        write_descriptor(
            dir.path(),
            "blog",
            r#"{"pages": {"post": {"name": "Blog Post", "default": true}}}"#,
        );

        let catalog = TemplateCatalog::load(
            &dir.path().to_string_lossy(),
            &requested(&["business", "blog", "missing"]),
        )
        .await;

        assert_eq!(catalog.types(), &["business", "blog"]);
        assert!(catalog.descriptor("missing").is_none());
        assert_eq!(catalog.pages("business")[0].id, "home");
    }

    #[tokio::test]
    async fn test_load_skips_a_malformed_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        write_descriptor(dir.path(), "portfolio", "not json at all");
        write_descriptor(dir.path(), "blog", r#"{"themes": ["light", "dark"]}"#);

        let catalog = TemplateCatalog::load(
            &dir.path().to_string_lossy(),
            &requested(&["portfolio", "blog"]),
        )
        .await;

        assert_eq!(catalog.types(), &["blog"]);
        assert_eq!(catalog.themes("blog").len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_type_yields_empty_sequences() {
        let dir = tempfile::tempdir().unwrap();
        let catalog =
            TemplateCatalog::load(&dir.path().to_string_lossy(), &requested(&["business"])).await;

        assert!(catalog.is_empty());
        assert!(catalog.pages("business").is_empty());
        assert!(catalog.themes("business").is_empty());
        assert!(catalog.features("business").is_empty());
    }
}
