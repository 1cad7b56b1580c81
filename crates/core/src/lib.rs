//! Marketboard Core - Shared types library.
//!
//! This crate provides the domain types used across all Marketboard components:
//! - `storefront` - JSON API server for vendors and customers
//! - `cli` - Command-line tools for tokens, password hashes, and bulk imports
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no storage,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, emails, roles, and categories
//! - [`contact`] - Deep links into external messaging apps
//! - [`import`] - Bulk product rows and their CSV form

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod contact;
pub mod import;
pub mod types;

pub use types::*;
