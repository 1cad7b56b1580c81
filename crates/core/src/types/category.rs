//! Product categories.
//!
//! Two distinct notions live here:
//!
//! - [`CATALOG`] - the fixed list of names offered when a vendor picks
//!   categories for a product.
//! - [`Categories`] - the validated, non-empty list attached to a product.
//!   Products may use names outside the catalog (bulk imports do), so the
//!   set of categories actually in use is derived from the products.

use serde::{Deserialize, Serialize};

/// Category assigned to bulk-imported rows that name none.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// An entry of the predefined category catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogCategory {
    pub id: &'static str,
    pub name: &'static str,
}

/// Predefined categories offered for selection.
pub const CATALOG: &[CatalogCategory] = &[
    CatalogCategory { id: "1", name: "Fashion" },
    CatalogCategory { id: "2", name: "Electronics" },
    CatalogCategory { id: "3", name: "Home & Decor" },
    CatalogCategory { id: "4", name: "Beauty & Skincare" },
    CatalogCategory { id: "5", name: "Sports & Fitness" },
    CatalogCategory { id: "6", name: "Books & Media" },
    CatalogCategory { id: "7", name: "Food & Beverages" },
    CatalogCategory { id: "8", name: "Toys & Games" },
    CatalogCategory { id: "9", name: "Health & Wellness" },
    CatalogCategory { id: "10", name: "Automotive" },
];

/// Errors that can occur when building [`Categories`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CategoriesError {
    /// No category names were given.
    #[error("at least one category is required")]
    Empty,
    /// One of the names is empty or whitespace.
    #[error("category names cannot be blank")]
    BlankName,
}

/// The categories a product belongs to.
///
/// Always holds at least one name. Names are trimmed, duplicates are
/// dropped, and the first-seen order is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Categories(Vec<String>);

impl Categories {
    /// Build a category list from raw names.
    ///
    /// # Errors
    ///
    /// Returns `CategoriesError::Empty` for an empty input and
    /// `CategoriesError::BlankName` if any name is blank.
    pub fn parse<I, S>(names: I) -> Result<Self, CategoriesError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                return Err(CategoriesError::BlankName);
            }
            if !out.iter().any(|existing| existing == name) {
                out.push(name.to_owned());
            }
        }

        if out.is_empty() {
            return Err(CategoriesError::Empty);
        }

        Ok(Self(out))
    }

    /// The single-entry `["Uncategorized"]` list.
    #[must_use]
    pub fn uncategorized() -> Self {
        Self(vec![UNCATEGORIZED.to_owned()])
    }

    /// Exact, case-sensitive membership test.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|c| c == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<String>> for Categories {
    type Error = CategoriesError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Self::parse(names)
    }
}

impl From<Categories> for Vec<String> {
    fn from(categories: Categories) -> Self {
        categories.0
    }
}
