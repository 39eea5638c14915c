//! Category service
//!
//! Manages the category catalog. Categories emit no events; commands return
//! the updated aggregate directly.

use crate::error::{DomainError, DomainResult};
use crate::models::{Category, CategoryId, CategoryType};
use crate::storage::CategoryRepository;

/// Service for category management
pub struct CategoryService<'a> {
    categories: &'a dyn CategoryRepository,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(categories: &'a dyn CategoryRepository) -> Self {
        Self { categories }
    }

    /// Create a category; names are unique ignoring case
    pub fn create(
        &self,
        name: &str,
        category_type: CategoryType,
        color: &str,
        icon: Option<String>,
    ) -> DomainResult<Category> {
        if self.categories.exists_by_name(name)? {
            return Err(DomainError::invalid_state(format!(
                "A category named '{name}' already exists"
            )));
        }

        let category = Category::create(name, category_type, color, icon)?;
        self.categories.save(category.clone())?;
        Ok(category)
    }

    /// Rename a category
    pub fn rename(&self, id: CategoryId, name: &str) -> DomainResult<Category> {
        let mut category = self.load(id)?;
        category.rename(name)?;
        self.categories.save(category.clone())?;
        Ok(category)
    }

    /// Change a category's display color
    pub fn change_color(&self, id: CategoryId, color: &str) -> DomainResult<Category> {
        let mut category = self.load(id)?;
        category.change_color(color)?;
        self.categories.save(category.clone())?;
        Ok(category)
    }

    /// Change or clear a category's icon
    pub fn change_icon(&self, id: CategoryId, icon: Option<String>) -> DomainResult<Category> {
        let mut category = self.load(id)?;
        category.change_icon(icon);
        self.categories.save(category.clone())?;
        Ok(category)
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> DomainResult<Category> {
        self.load(id)
    }

    /// Get all categories, sorted by name
    pub fn list(&self) -> DomainResult<Vec<Category>> {
        self.categories.find_all()
    }

    fn load(&self, id: CategoryId) -> DomainResult<Category> {
        self.categories
            .find_by_id(id)?
            .ok_or_else(|| DomainError::not_found("Category", id))
    }
}
