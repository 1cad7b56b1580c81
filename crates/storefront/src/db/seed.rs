//! Demo data for local development.
//!
//! Four vendors with a handful of products each. All demo vendors share the
//! password [`DEMO_PASSWORD`].

use marketboard_core::{Categories, Email, Role};

use super::{Database, RepositoryError};
use crate::models::NewProduct;

/// Password of every demo vendor account.
pub const DEMO_PASSWORD: &str = "password123";

struct DemoVendor {
    email: &'static str,
    name: &'static str,
    products: &'static [DemoProduct],
}

struct DemoProduct {
    name: &'static str,
    image: &'static str,
    whatsapp: &'static str,
    instagram: Option<&'static str>,
    categories: &'static [&'static str],
}

const fn product(
    name: &'static str,
    image: &'static str,
    whatsapp: &'static str,
    instagram: Option<&'static str>,
    categories: &'static [&'static str],
) -> DemoProduct {
    DemoProduct {
        name,
        image,
        whatsapp,
        instagram,
        categories,
    }
}

const FASHION_IG: Option<&str> = Some("https://instagram.com/fashionboutique");
const TECH_IG: Option<&str> = Some("https://instagram.com/techstore");
const HOME_IG: Option<&str> = Some("https://instagram.com/homedecor");
const BEAUTY_IG: Option<&str> = Some("https://instagram.com/beautyessentials");

const DEMO_VENDORS: &[DemoVendor] = &[
    DemoVendor {
        email: "fashion@example.com",
        name: "Fashion Boutique",
        products: &[
            product(
                "Designer Leather Jacket",
                "https://images.unsplash.com/photo-1551028719-00167b16eac5?w=500&h=500&fit=crop",
                "https://wa.me/+2349123205081",
                FASHION_IG,
                &["Fashion"],
            ),
            product(
                "Vintage Denim Jeans",
                "https://images.unsplash.com/photo-1542272604-787c3835535d?w=500&h=500&fit=crop",
                "https://wa.me/08085035143",
                FASHION_IG,
                &["Fashion"],
            ),
            product(
                "Silk Scarf Collections",
                "https://unsplash.com/photos/three-gray-green-and-white-scarf-on-top-of-table-CNjfgzoY8JU?w=500&h=500&fit=crop",
                "https://wa.me/08085035143",
                None,
                &["Fashion"],
            ),
        ],
    },
    DemoVendor {
        email: "electronics@example.com",
        name: "Tech Store",
        products: &[
            product(
                "Wireless Bluetooth Headphones",
                "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?w=500&h=500&fit=crop",
                "https://wa.me/2345678901",
                TECH_IG,
                &["Electronics"],
            ),
            product(
                "Smart Watch Pro",
                "https://images.unsplash.com/photo-1523275335684-37898b6baf30?w=500&h=500&fit=crop",
                "https://wa.me/2345678901",
                TECH_IG,
                &["Electronics", "Sports & Fitness"],
            ),
            product(
                "Portable Power Bank",
                "https://images.unsplash.com/photo-1609091839311-d5365fcc91c1?w=500&h=500&fit=crop",
                "https://wa.me/2345678901",
                None,
                &["Electronics"],
            ),
            product(
                "USB-C Charging Cable",
                "https://images.unsplash.com/photo-1587825140708-dfaf72ae4b04?w=500&h=500&fit=crop",
                "https://wa.me/2345678901",
                None,
                &["Electronics"],
            ),
        ],
    },
    DemoVendor {
        email: "home@example.com",
        name: "Home Decor Co",
        products: &[
            product(
                "Modern Floor Lamp",
                "https://images.unsplash.com/photo-1507473885765-e6ed057f782c?w=500&h=500&fit=crop",
                "https://wa.me/3456789012",
                HOME_IG,
                &["Home & Decor"],
            ),
            product(
                "Decorative Throw Pillows",
                "https://images.unsplash.com/photo-1584100936595-1b7dfa4a584e?w=500&h=500&fit=crop",
                "https://wa.me/3456789012",
                HOME_IG,
                &["Home & Decor"],
            ),
            product(
                "Ceramic Plant Pot Set",
                "https://images.unsplash.com/photo-1485955900006-10f4d324d411?w=500&h=500&fit=crop",
                "https://wa.me/3456789012",
                None,
                &["Home & Decor"],
            ),
        ],
    },
    DemoVendor {
        email: "beauty@example.com",
        name: "Beauty Essentials",
        products: &[
            product(
                "Organic Face Serum",
                "https://images.unsplash.com/photo-1556228578-0d85b1a4d571?w=500&h=500&fit=crop",
                "https://wa.me/4567890123",
                BEAUTY_IG,
                &["Beauty & Skincare", "Health & Wellness"],
            ),
            product(
                "Luxury Lipstick Set",
                "https://images.unsplash.com/photo-1586495777744-4413f21062fa?w=500&h=500&fit=crop",
                "https://wa.me/4567890123",
                BEAUTY_IG,
                &["Beauty & Skincare"],
            ),
            product(
                "Natural Body Lotion",
                "https://images.unsplash.com/photo-1556229010-6c3f2c9ca5f8?w=500&h=500&fit=crop",
                "https://wa.me/4567890123",
                None,
                &["Beauty & Skincare", "Health & Wellness"],
            ),
            product(
                "Perfume Collection",
                "https://images.unsplash.com/photo-1541643600914-78b084683601?w=500&h=500&fit=crop",
                "https://wa.me/4567890123",
                BEAUTY_IG,
                &["Beauty & Skincare"],
            ),
        ],
    },
];

/// Populate an empty store with the demo vendors and their products.
///
/// `password_hash` is the stored hash of [`DEMO_PASSWORD`]. Does nothing if
/// any account already exists. Returns whether data was inserted.
///
/// # Errors
///
/// Returns `RepositoryError` if an insert or snapshot write fails, or if
/// the built-in data is malformed.
pub async fn seed_demo_data(db: &Database, password_hash: &str) -> Result<bool, RepositoryError> {
    let users = db.users();
    if users.count().await > 0 {
        tracing::debug!("Store already has accounts, skipping demo seed");
        return Ok(false);
    }

    let mut products = Vec::new();
    for vendor in DEMO_VENDORS {
        let email = Email::parse(vendor.email)
            .map_err(|e| RepositoryError::DataCorruption(format!("demo email: {e}")))?;
        let account = users
            .create(
                &email,
                password_hash.to_owned(),
                Role::Vendor,
                vendor.name.to_owned(),
            )
            .await?;

        for item in vendor.products {
            let categories = Categories::parse(item.categories)
                .map_err(|e| RepositoryError::DataCorruption(format!("demo categories: {e}")))?;
            products.push(NewProduct {
                vendor_id: account.id,
                name: item.name.to_owned(),
                image: item.image.to_owned(),
                whatsapp_link: Some(item.whatsapp.to_owned()),
                instagram_link: item.instagram.map(str::to_owned),
                categories,
            });
        }
    }

    let created = db.products().create_many(products).await?;
    tracing::info!(
        vendors = DEMO_VENDORS.len(),
        products = created.len(),
        "Seeded demo data"
    );

    Ok(true)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeds_four_vendors_and_fourteen_products() {
        let db = Database::in_memory();

        assert!(seed_demo_data(&db, "hash").await.unwrap());

        assert_eq!(db.users().count().await, 4);
        assert_eq!(db.products().get_all().await.len(), 14);

        let tech = db
            .users()
            .find_by_email(&Email::parse("electronics@example.com").unwrap())
            .await
            .unwrap();
        assert_eq!(tech.role, Role::Vendor);
        assert_eq!(db.products().get_by_vendor_id(tech.id).await.len(), 4);
    }

    #[tokio::test]
    async fn test_second_run_is_a_no_op() {
        let db = Database::in_memory();
        seed_demo_data(&db, "hash").await.unwrap();

        assert!(!seed_demo_data(&db, "hash").await.unwrap());
        assert_eq!(db.products().get_all().await.len(), 14);
    }

    #[tokio::test]
    async fn test_seeded_categories_in_use() {
        let db = Database::in_memory();
        seed_demo_data(&db, "hash").await.unwrap();

        assert_eq!(
            db.products().list_categories_in_use().await,
            [
                "Beauty & Skincare",
                "Electronics",
                "Fashion",
                "Health & Wellness",
                "Home & Decor",
                "Sports & Fitness",
            ]
        );
    }
}
