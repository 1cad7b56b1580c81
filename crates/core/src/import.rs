//! Bulk product rows.
//!
//! [`BulkRow`] is the row shape accepted by the bulk-create endpoint. Rows
//! can also be written as header-less CSV, one product per line:
//!
//! ```text
//! name,image,whatsapp,instagram,category1|category2
//! ```
//!
//! Only `name` and `image` are required; missing trailing columns are fine.

use serde::{Deserialize, Serialize};

use crate::types::{Categories, CategoriesError};

/// Separator between category names inside the CSV categories column.
pub const CATEGORY_SEPARATOR: char = '|';

/// Errors that can occur while reading CSV rows.
#[derive(thiserror::Error, Debug)]
pub enum ImportError {
    /// The CSV could not be read.
    #[error("line {line}: {source}")]
    Csv {
        line: u64,
        #[source]
        source: csv::Error,
    },
}

/// One product in a bulk upload.
///
/// Older clients send a single `category` instead of `categories`; both are
/// accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkRow {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl BulkRow {
    /// Categories this row should be stored with.
    ///
    /// A non-empty `categories` list wins, then a non-blank `category`,
    /// then `["Uncategorized"]`.
    ///
    /// # Errors
    ///
    /// Returns `CategoriesError::BlankName` if `categories` contains a blank
    /// entry.
    pub fn resolved_categories(&self) -> Result<Categories, CategoriesError> {
        match (&self.categories, &self.category) {
            (Some(names), _) if !names.is_empty() => Categories::parse(names),
            (_, Some(name)) if !name.trim().is_empty() => Categories::parse([name]),
            _ => Ok(Categories::uncategorized()),
        }
    }
}

/// Parse header-less CSV into bulk rows.
///
/// Fields are trimmed, blank lines are skipped, and empty optional columns
/// are treated as absent. Quoted fields may contain commas.
///
/// # Errors
///
/// Returns `ImportError::Csv` if the input is not valid CSV.
pub fn parse_csv(text: &str) -> Result<Vec<BulkRow>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| ImportError::Csv {
            line: source.position().map_or(0, csv::Position::line),
            source,
        })?;

        if record.iter().all(str::is_empty) {
            continue;
        }

        let field = |i: usize| record.get(i).filter(|v| !v.is_empty()).map(str::to_owned);

        let categories = field(4).map(|column| {
            column
                .split(CATEGORY_SEPARATOR)
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_owned)
                .collect::<Vec<_>>()
        });

        rows.push(BulkRow {
            name: field(0).unwrap_or_default(),
            image: field(1).unwrap_or_default(),
            whatsapp_link: field(2),
            instagram_link: field(3),
            categories: categories.filter(|names| !names.is_empty()),
            category: None,
        });
    }

    Ok(rows)
}
