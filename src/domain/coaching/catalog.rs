//! The immutable, ordered technique catalog.

use std::collections::HashSet;

use super::{BarrierCategory, CatalogError, Technique};

/// Ordered list of techniques loaded once at startup.
///
/// Order is significant: selection ties are always broken by catalog
/// position. Names are unique and keywords are lower-cased on construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TechniqueCatalog {
    techniques: Vec<Technique>,
}

impl TechniqueCatalog {
    /// Builds a catalog, normalizing keywords and rejecting duplicate names.
    pub fn new(techniques: Vec<Technique>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(techniques.len());

        for (position, technique) in techniques.into_iter().enumerate() {
            let technique = technique.normalized();
            if technique.name.is_empty() {
                return Err(CatalogError::UnnamedTechnique(position));
            }
            if !seen.insert(technique.name.clone()) {
                return Err(CatalogError::DuplicateTechnique(technique.name));
            }
            normalized.push(technique);
        }

        Ok(Self {
            techniques: normalized,
        })
    }

    /// A catalog with no techniques. Selection against it always fails.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.techniques.len()
    }

    pub fn is_empty(&self) -> bool {
        self.techniques.is_empty()
    }

    /// Techniques in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Technique> {
        self.techniques.iter()
    }

    /// First technique in catalog order.
    pub fn first(&self) -> Option<&Technique> {
        self.techniques.first()
    }

    /// Techniques targeting `category`, in catalog order.
    pub fn for_category(&self, category: BarrierCategory) -> impl Iterator<Item = &Technique> {
        self.techniques
            .iter()
            .filter(move |t| t.target_component == category)
    }

    /// Number of techniques per category.
    pub fn count_for(&self, category: BarrierCategory) -> usize {
        self.for_category(category).count()
    }
}
