//! Asset Key Core Library
//!
//! This crate provides the path-key codec used to name and address uploaded image
//! assets in an object store, together with its configuration and error types.
//!
//! # Path format
//!
//! An asset is stored under `folder/name(id){size}.ext`:
//!
//! - `folder/` is omitted for root assets
//! - `(id)` is present only when the asset was given a uniqueness token
//! - `{size}` is present only for resized variants (`sm`, `md`, `lg`, `xl`)
//!
//! Marker delimiters never appear inside a base name, so every path decodes back to the
//! key it was built from.

pub mod codec;
pub mod config;
pub mod error;
pub mod key;
pub mod reconcile;
pub mod size_tag;

// Re-export commonly used types
pub use codec::PathKeyCodec;
pub use config::Config;
pub use error::KeyError;
pub use key::id::{IdSource, ShortRandom};
pub use key::normalize::{normalize, sanitize_base_name};
pub use key::{replace_extension, AssetKey, DraftKey};
pub use reconcile::AssetSource;
pub use size_tag::SizeTag;
