//! Core category domain types and the conversions between the persisted and
//! wire shapes.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// A validated, non-empty category name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyCategoryName] if `name` is
    /// empty or contains only whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyCategoryName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if the non-empty invariant is violated it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CategoryName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryName::new(s)
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Database identifier for a category.
pub type CategoryId = i64;

/// A category for grouping expenses, e.g., 'Groceries', 'Eating Out'.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Category {
    /// The identifier assigned by the database.
    pub id: CategoryId,
    /// The unique name of the category.
    pub name: CategoryName,
}

/// The wire shape of a category used by the JSON API.
///
/// `id` is null until the category has been persisted; clients may omit it
/// (or send any value) on create, the server ignores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryData {
    /// The identifier of the category, if it has been persisted.
    ///
    /// Clients may omit this field entirely.
    #[serde(default)]
    pub id: Option<CategoryId>,
    /// The raw, unvalidated category name.
    pub name: String,
}

impl From<Category> for CategoryData {
    fn from(category: Category) -> Self {
        Self {
            id: Some(category.id),
            name: category.name.to_string(),
        }
    }
}

impl TryFrom<&CategoryData> for CategoryName {
    type Error = Error;

    /// Validate the name carried by the wire shape.
    ///
    /// Any `id` in the data is deliberately ignored: identifiers are assigned
    /// by the database on create and taken from the URL path on update.
    fn try_from(data: &CategoryData) -> Result<Self, Self::Error> {
        CategoryName::new(&data.name)
    }
}

/// Form data for category creation and editing.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryFormData {
    pub name: String,
}
