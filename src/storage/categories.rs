//! Category repository
//!
//! Port trait for category persistence plus the in-memory adapter.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{DomainError, DomainResult};
use crate::models::{Category, CategoryId};

/// Port for category persistence
pub trait CategoryRepository: Send + Sync {
    /// Insert or replace a category
    fn save(&self, category: Category) -> DomainResult<()>;

    /// Get a category by ID
    fn find_by_id(&self, id: CategoryId) -> DomainResult<Option<Category>>;

    /// Get all categories, sorted by name
    fn find_all(&self) -> DomainResult<Vec<Category>>;

    /// Check if a category name is already taken (case-insensitive)
    fn exists_by_name(&self, name: &str) -> DomainResult<bool>;

    /// Delete a category, reporting whether it existed
    fn delete_by_id(&self, id: CategoryId) -> DomainResult<bool>;
}

/// In-memory category repository
#[derive(Debug, Default)]
pub struct InMemoryCategoryRepository {
    data: RwLock<HashMap<CategoryId, Category>>,
}

impl InMemoryCategoryRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

impl CategoryRepository for InMemoryCategoryRepository {
    fn save(&self, category: Category) -> DomainResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| DomainError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(category.id(), category);
        Ok(())
    }

    fn find_by_id(&self, id: CategoryId) -> DomainResult<Option<Category>> {
        let data = self
            .data
            .read()
            .map_err(|e| DomainError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    fn find_all(&self) -> DomainResult<Vec<Category>> {
        let data = self
            .data
            .read()
            .map_err(|e| DomainError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut categories: Vec<_> = data.values().cloned().collect();
        categories.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(categories)
    }

    fn exists_by_name(&self, name: &str) -> DomainResult<bool> {
        let data = self
            .data
            .read()
            .map_err(|e| DomainError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.to_lowercase();
        Ok(data.values().any(|c| c.name().to_lowercase() == name_lower))
    }

    fn delete_by_id(&self, id: CategoryId) -> DomainResult<bool> {
        let mut data = self
            .data
            .write()
            .map_err(|e| DomainError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }
}
