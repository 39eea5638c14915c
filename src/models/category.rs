//! Category aggregate
//!
//! Categories label transactions and anchor budgets. They are simple named
//! values with a display color and optional icon; they emit no domain
//! events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DomainError, DomainResult};

use super::ids::CategoryId;

/// Whether a category classifies money coming in or going out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryType {
    Income,
    Expense,
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// A label for transactions and budgets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    id: CategoryId,

    /// Category name (e.g., "Groceries")
    name: String,

    /// Income or expense category; fixed at creation
    #[serde(rename = "type")]
    category_type: CategoryType,

    /// Display color as a #RRGGBB hex code
    color: String,

    /// Optional display icon, free-form
    icon: Option<String>,

    /// When the category was created
    created_at: DateTime<Utc>,
}

impl Category {
    /// Create a new category
    pub fn create(
        name: impl Into<String>,
        category_type: CategoryType,
        color: impl Into<String>,
        icon: Option<String>,
    ) -> DomainResult<Self> {
        let name = name.into();
        Self::validate_name(&name)?;
        let color = color.into();
        Self::validate_color(&color)?;

        Ok(Self {
            id: CategoryId::new(),
            name,
            category_type,
            color,
            icon,
            created_at: Utc::now(),
        })
    }

    /// Change the category name
    pub fn rename(&mut self, name: impl Into<String>) -> DomainResult<()> {
        let name = name.into();
        Self::validate_name(&name)?;
        self.name = name;
        Ok(())
    }

    /// Change the display color
    pub fn change_color(&mut self, color: impl Into<String>) -> DomainResult<()> {
        let color = color.into();
        Self::validate_color(&color)?;
        self.color = color;
        Ok(())
    }

    /// Change or clear the display icon; icons are not validated
    pub fn change_icon(&mut self, icon: Option<String>) {
        self.icon = icon;
    }

    pub fn id(&self) -> CategoryId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category_type(&self) -> CategoryType {
        self.category_type
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn validate_name(name: &str) -> DomainResult<()> {
        if name.trim().is_empty() {
            return Err(DomainError::invalid_argument(
                "Category name must not be blank",
            ));
        }
        Ok(())
    }

    fn validate_color(color: &str) -> DomainResult<()> {
        let valid = color.len() == 7
            && color.starts_with('#')
            && color[1..].chars().all(|c| c.is_ascii_hexdigit());
        if !valid {
            return Err(DomainError::invalid_argument(format!(
                "Color must be a valid hex code (#RRGGBB), got: {color}"
            )));
        }
        Ok(())
    }
}
