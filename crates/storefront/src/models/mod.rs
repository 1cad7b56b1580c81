//! Domain models for the storefront.
//!
//! - [`user`] - Registered accounts (credential store records)
//! - [`product`] - Vendor product listings and their change sets
//! - [`session`] - The identity carried inside a session token

pub mod product;
pub mod session;
pub mod user;

pub use product::{NewProduct, Product, ProductUpdate};
pub use session::Identity;
pub use user::{User, UserUpdate};
