//! Foundation types for zauth.
//!
//! This crate provides the tags and records shared by the zauth crates.
//! Every other zauth crate depends on `zauth-types`.
//!
//! # Key Types
//!
//! - [`KeyType`] — Closed tag selecting a signature scheme (ECDSA or EdDSA)
//! - [`Property`] — A credential property record, raw or already hashed
//! - [`PropertyType`] — Whether a property carries a raw or hashed value

pub mod error;
pub mod key;
pub mod property;

pub use error::TypeError;
pub use key::KeyType;
pub use property::{properties_from_map, property_map, Property, PropertyType};
