//! File-based Technique Catalog Loader
//!
//! Reads the technique library once at startup. JSON by default, YAML when
//! the file extension is `.yaml` or `.yml`.

use std::path::Path;
use tokio::fs;

use crate::domain::coaching::{BarrierCategory, CatalogError, Technique, TechniqueCatalog};

/// Serialization format of a catalog file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Yaml,
}

impl CatalogFormat {
    /// Picks the format from the file extension.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => CatalogFormat::Yaml,
            _ => CatalogFormat::Json,
        }
    }

    /// Parses a list of techniques from file contents.
    pub fn parse(&self, contents: &str) -> Result<Vec<Technique>, CatalogError> {
        match self {
            CatalogFormat::Json => {
                serde_json::from_str(contents).map_err(|e| CatalogError::Parse(e.to_string()))
            }
            CatalogFormat::Yaml => {
                serde_yaml::from_str(contents).map_err(|e| CatalogError::Parse(e.to_string()))
            }
        }
    }
}

/// Loads the technique catalog from disk.
///
/// A missing file yields an empty catalog and a warning; every intervention
/// request then fails with `EmptyCatalog` until the file is provided.
/// Unreadable or unparseable files and duplicate names are errors.
pub async fn load_catalog(path: impl AsRef<Path>) -> Result<TechniqueCatalog, CatalogError> {
    let path = path.as_ref();

    if !fs::try_exists(path)
        .await
        .map_err(|e| CatalogError::Io(e.to_string()))?
    {
        tracing::warn!(path = %path.display(), "Technique catalog not found, starting with an empty catalog");
        return Ok(TechniqueCatalog::empty());
    }

    let contents = fs::read_to_string(path)
        .await
        .map_err(|e| CatalogError::Io(e.to_string()))?;

    let techniques = CatalogFormat::from_path(path).parse(&contents)?;
    let catalog = TechniqueCatalog::new(techniques)?;

    tracing::info!(
        path = %path.display(),
        techniques = catalog.len(),
        capability = catalog.count_for(BarrierCategory::Capability),
        opportunity = catalog.count_for(BarrierCategory::Opportunity),
        motivation = catalog.count_for(BarrierCategory::Motivation),
        "Loaded technique catalog"
    );
    for category in uncovered_categories(&catalog) {
        tracing::warn!(
            %category,
            "No technique targets this category; its barriers get the first catalog entry"
        );
    }

    Ok(catalog)
}

/// Categories without any technique, in declaration order.
///
/// Empty for an empty catalog, which is reported separately.
fn uncovered_categories(catalog: &TechniqueCatalog) -> Vec<BarrierCategory> {
    if catalog.is_empty() {
        return Vec::new();
    }
    BarrierCategory::ALL
        .into_iter()
        .filter(|category| catalog.count_for(*category) == 0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const JSON_CATALOG: &str = r#"[
        {
            "name": "Temptation Bundling",
            "target_component": "motivation",
            "barrier_keywords": ["Boring", "tired"],
            "prompt_template": "Pair [GOAL] with something you enjoy.",
            "theory": "Behavioral Economics",
            "duration_minutes": 5,
            "evidence_base": "Milkman et al., 2014"
        },
        {
            "id": "Implementation Intentions",
            "category": "capability",
            "keywords": ["forget"],
            "template": "When X happens, I will [GOAL].",
            "theory": "Goal Setting Theory"
        }
    ]"#;

    #[test]
    fn format_follows_extension() {
        assert_eq!(CatalogFormat::from_path(Path::new("lib.yaml")), CatalogFormat::Yaml);
        assert_eq!(CatalogFormat::from_path(Path::new("lib.YML")), CatalogFormat::Yaml);
        assert_eq!(CatalogFormat::from_path(Path::new("lib.json")), CatalogFormat::Json);
        assert_eq!(CatalogFormat::from_path(Path::new("library")), CatalogFormat::Json);
    }

    #[tokio::test]
    async fn loads_json_catalog_with_aliases() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("techniques_library.json");
        std::fs::write(&path, JSON_CATALOG).unwrap();

        let catalog = load_catalog(&path).await.unwrap();

        assert_eq!(catalog.len(), 2);
        let first = catalog.first().unwrap();
        assert_eq!(first.name, "Temptation Bundling");
        assert_eq!(first.barrier_keywords, vec!["boring", "tired"]);
        let second = catalog.iter().nth(1).unwrap();
        assert_eq!(second.name, "Implementation Intentions");
        assert_eq!(second.target_component, BarrierCategory::Capability);
        assert_eq!(second.duration_minutes, 0);
    }

    #[tokio::test]
    async fn loads_yaml_catalog() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("techniques.yaml");
        std::fs::write(
            &path,
            "- name: Environmental Restructuring\n  target_component: opportunity\n  barrier_keywords: [time, busy]\n  prompt_template: Make [GOAL] the easy default.\n",
        )
        .unwrap();

        let catalog = load_catalog(&path).await.unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.first().unwrap().target_component,
            BarrierCategory::Opportunity
        );
    }

    #[tokio::test]
    async fn missing_file_yields_empty_catalog() {
        let dir = TempDir::new().unwrap();
        let catalog = load_catalog(dir.path().join("absent.json")).await.unwrap();
        assert!(catalog.is_empty());
    }

    #[tokio::test]
    async fn malformed_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "[{\"name\": ").unwrap();

        let result = load_catalog(&path).await;
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[tokio::test]
    async fn duplicate_names_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dupes.json");
        std::fs::write(
            &path,
            r#"[
                {"name": "A", "target_component": "motivation", "prompt_template": "x"},
                {"name": "A", "target_component": "capability", "prompt_template": "y"}
            ]"#,
        )
        .unwrap();

        let result = load_catalog(&path).await;
        assert!(matches!(result, Err(CatalogError::DuplicateTechnique(name)) if name == "A"));
    }

    #[tokio::test]
    async fn reports_categories_without_techniques() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("techniques_library.json");
        std::fs::write(&path, JSON_CATALOG).unwrap();

        let catalog = load_catalog(&path).await.unwrap();

        assert_eq!(catalog.count_for(BarrierCategory::Motivation), 1);
        assert_eq!(
            uncovered_categories(&catalog),
            vec![BarrierCategory::Opportunity]
        );
        assert!(uncovered_categories(&TechniqueCatalog::empty()).is_empty());
    }
}
