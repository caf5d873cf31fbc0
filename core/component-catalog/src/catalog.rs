//! FILENAME: core/component-catalog/src/catalog.rs
//! Component Catalog - immutable lookup of component metadata.
//!
//! The catalog is built once (from code or JSON) and then only read, so it
//! can be shared by reference or `Arc` without locking.

use rustc_hash::FxHashMap;
use crate::error::CatalogError;
use crate::metadata::ComponentMetadata;

/// Collects metadata before freezing it into a `ComponentCatalog`.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    components: Vec<ComponentMetadata>,
    index: FxHashMap<String, usize>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a component. Names are unique regardless of case.
    pub fn register(mut self, metadata: ComponentMetadata) -> Result<Self, CatalogError> {
        let key = metadata.name.to_lowercase();
        if self.index.contains_key(&key) {
            return Err(CatalogError::DuplicateComponent(metadata.name));
        }
        self.index.insert(key, self.components.len());
        self.components.push(metadata);
        Ok(self)
    }

    pub fn build(self) -> ComponentCatalog {
        let mut components = self.components;
        components.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

        let index = components
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.to_lowercase(), i))
            .collect();

        log::debug!(target: "CATALOG", "built component catalog with {} components", components.len());
        ComponentCatalog { components, index }
    }
}

/// Read-only set of component metadata, sorted by name.
#[derive(Debug, Clone, Default)]
pub struct ComponentCatalog {
    components: Vec<ComponentMetadata>,
    index: FxHashMap<String, usize>,
}

impl ComponentCatalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Builds a catalog from a JSON array of component metadata.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let components: Vec<ComponentMetadata> = serde_json::from_str(json)?;
        components
            .into_iter()
            .try_fold(CatalogBuilder::new(), CatalogBuilder::register)
            .map(CatalogBuilder::build)
    }

    pub fn to_json(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string(&self.components)?)
    }

    /// Looks up a component by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&ComponentMetadata> {
        self.index
            .get(&name.to_lowercase())
            .and_then(|&i| self.components.get(i))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// All components, sorted by name.
    pub fn components(&self) -> &[ComponentMetadata] {
        &self.components
    }

    /// Components in `category` (case-insensitive), sorted by name.
    pub fn by_category<'a>(&'a self, category: &str) -> impl Iterator<Item = &'a ComponentMetadata> + 'a {
        let category = category.to_lowercase();
        self.components
            .iter()
            .filter(move |c| c.category.to_lowercase() == category)
    }

    /// Distinct non-empty categories, sorted.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self
            .components
            .iter()
            .map(|c| c.category.as_str())
            .filter(|c| !c.is_empty())
            .collect();
        categories.sort_unstable();
        categories.dedup();
        categories
    }
}
