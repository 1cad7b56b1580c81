//! Product repository.
//!
//! Products are held in insertion order; lookups are linear scans, which is
//! fine at directory scale. Every mutation takes the write lock for its
//! whole duration.

use std::collections::BTreeSet;

use chrono::Utc;

use marketboard_core::{ProductId, UserId};

use super::{Database, RepositoryError};
use crate::models::{NewProduct, Product, ProductUpdate};

/// Repository for product listings.
pub struct ProductRepository<'a> {
    db: &'a Database,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Store a single product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Persistence` if the snapshot write fails.
    pub async fn create(&self, product: NewProduct) -> Result<Product, RepositoryError> {
        let created = product.into_product(Utc::now());
        self.db.products.write().await.push(created.clone());

        self.db.persist().await?;
        Ok(created)
    }

    /// Store a batch of products under a single lock.
    ///
    /// Every product gets its own ID; all share one timestamp.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Persistence` if the snapshot write fails.
    pub async fn create_many(
        &self,
        products: Vec<NewProduct>,
    ) -> Result<Vec<Product>, RepositoryError> {
        let now = Utc::now();
        let created: Vec<Product> = products
            .into_iter()
            .map(|product| product.into_product(now))
            .collect();

        self.db
            .products
            .write()
            .await
            .extend(created.iter().cloned());

        self.db.persist().await?;
        Ok(created)
    }

    /// Get a product by ID.
    pub async fn get_by_id(&self, id: ProductId) -> Option<Product> {
        self.db
            .products
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// All products owned by `vendor_id`.
    pub async fn get_by_vendor_id(&self, vendor_id: UserId) -> Vec<Product> {
        self.filtered(|p| p.vendor_id == vendor_id).await
    }

    /// All products tagged with `category` (exact, case-sensitive match).
    pub async fn get_by_category(&self, category: &str) -> Vec<Product> {
        self.filtered(|p| p.categories.contains(category)).await
    }

    /// Every product.
    pub async fn get_all(&self) -> Vec<Product> {
        self.db.products.read().await.clone()
    }

    /// Merge a partial update into a product.
    ///
    /// Returns `None` if no such product exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Persistence` if the snapshot write fails.
    pub async fn update(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Option<Product>, RepositoryError> {
        let updated = {
            let mut products = self.db.products.write().await;
            let Some(product) = products.iter_mut().find(|p| p.id == id) else {
                return Ok(None);
            };
            update.apply(product, Utc::now());
            product.clone()
        };

        self.db.persist().await?;
        Ok(Some(updated))
    }

    /// Remove a product. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Persistence` if the snapshot write fails.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let removed = {
            let mut products = self.db.products.write().await;
            let before = products.len();
            products.retain(|p| p.id != id);
            products.len() != before
        };

        if removed {
            self.db.persist().await?;
        }
        Ok(removed)
    }

    /// Sorted, de-duplicated union of every product's categories.
    pub async fn list_categories_in_use(&self) -> Vec<String> {
        self.db
            .products
            .read()
            .await
            .iter()
            .flat_map(|p| p.categories.iter().map(str::to_owned))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    async fn filtered(&self, predicate: impl Fn(&Product) -> bool) -> Vec<Product> {
        self.db
            .products
            .read()
            .await
            .iter()
            .filter(|p| predicate(p))
            .cloned()
            .collect()
    }
}
