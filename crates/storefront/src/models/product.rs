//! Product domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use marketboard_core::{Categories, ProductId, UserId};

/// A product listed by a vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    /// Owning vendor. Never changes after creation.
    pub vendor_id: UserId,
    pub name: String,
    /// Image URL.
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram_link: Option<String>,
    pub categories: Categories,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub vendor_id: UserId,
    pub name: String,
    pub image: String,
    pub whatsapp_link: Option<String>,
    pub instagram_link: Option<String>,
    pub categories: Categories,
}

impl NewProduct {
    /// Materialize the product with a fresh ID and timestamps.
    #[must_use]
    pub fn into_product(self, now: DateTime<Utc>) -> Product {
        Product {
            id: ProductId::generate(),
            vendor_id: self.vendor_id,
            name: self.name,
            image: self.image,
            whatsapp_link: self.whatsapp_link,
            instagram_link: self.instagram_link,
            categories: self.categories,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A partial change to a product.
///
/// `None` leaves a field untouched. For the contact links, `Some(None)`
/// clears the link.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub image: Option<String>,
    pub whatsapp_link: Option<Option<String>>,
    pub instagram_link: Option<Option<String>>,
    pub categories: Option<Categories>,
}

impl ProductUpdate {
    /// Merge the provided fields into `product` and stamp `updated_at`.
    ///
    /// `id`, `vendor_id` and `created_at` are never touched.
    pub fn apply(self, product: &mut Product, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(image) = self.image {
            product.image = image;
        }
        if let Some(link) = self.whatsapp_link {
            product.whatsapp_link = link;
        }
        if let Some(link) = self.instagram_link {
            product.instagram_link = link;
        }
        if let Some(categories) = self.categories {
            product.categories = categories;
        }
        product.updated_at = now;
    }
}
