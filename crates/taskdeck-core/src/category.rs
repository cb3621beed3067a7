//! Categories that group tasks on the board.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::CategoryId;

/// Colour given to categories created without one.
pub const DEFAULT_CATEGORY_COLOR: &str = "#5B4EF5";
/// Icon given to categories created without one.
pub const DEFAULT_CATEGORY_ICON: &str = "Folder";

/// Named grouping for tasks with display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Store-assigned identifier.
    pub id: CategoryId,
    /// Display label; tasks point at categories by this name.
    pub name: String,
    /// Display colour.
    #[serde(default = "default_color")]
    pub color: String,
    /// Display icon identifier.
    #[serde(default = "default_icon")]
    pub icon: String,
}

fn default_color() -> String {
    DEFAULT_CATEGORY_COLOR.to_owned()
}

fn default_icon() -> String {
    DEFAULT_CATEGORY_ICON.to_owned()
}

impl Category {
    /// Materialize a freshly created category.
    #[must_use]
    pub fn from_new(id: CategoryId, new: NewCategory) -> Self {
        Self {
            id,
            name: new.name,
            color: new.color.unwrap_or_else(default_color),
            icon: new.icon.unwrap_or_else(default_icon),
        }
    }

    /// Merge a partial update; the identifier never changes.
    pub fn apply(&mut self, patch: CategoryPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(icon) = patch.icon {
            self.icon = icon;
        }
    }
}

/// Input fields for creating a category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    /// Display label.
    pub name: String,
    /// Optional colour.
    #[serde(default)]
    pub color: Option<String>,
    /// Optional icon.
    #[serde(default)]
    pub icon: Option<String>,
}

impl NewCategory {
    /// Start a category with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Reject blank names.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyCategoryName`] when the name is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyCategoryName);
        }
        Ok(())
    }
}

/// Partial category update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement colour.
    pub color: Option<String>,
    /// Replacement icon.
    pub icon: Option<String>,
}

impl CategoryPatch {
    /// Patch that only renames.
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Find the category carrying `id`.
#[must_use]
pub fn find_category<'a>(categories: &'a [Category], id: &CategoryId) -> Option<&'a Category> {
    categories.iter().find(|category| &category.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_new_fills_display_defaults() {
        let category = Category::from_new(CategoryId::from_number(4), NewCategory::new("Errands"));
        assert_eq!(category.color, DEFAULT_CATEGORY_COLOR);
        assert_eq!(category.icon, DEFAULT_CATEGORY_ICON);
    }

    #[test]
    fn apply_keeps_identifier() {
        let mut category = Category::from_new(CategoryId::from_number(2), NewCategory::new("Work"));
        category.apply(CategoryPatch::rename("Office"));
        assert_eq!(category.id.as_str(), "2");
        assert_eq!(category.name, "Office");
    }

    #[test]
    fn find_category_by_id() {
        let categories = vec![
            Category::from_new(CategoryId::from_number(1), NewCategory::new("Work")),
            Category::from_new(CategoryId::from_number(2), NewCategory::new("Home")),
        ];
        let found = find_category(&categories, &CategoryId::from("2"));
        assert_eq!(found.map(|c| c.name.as_str()), Some("Home"));
        assert!(find_category(&categories, &CategoryId::from("99")).is_none());
    }

    #[test]
    fn validate_rejects_blank_name() {
        assert_eq!(
            NewCategory::new("  ").validate(),
            Err(ValidationError::EmptyCategoryName)
        );
    }
}
