//! Storefront showcase addressing.

mod slug;

pub use slug::{resolve_slug, slugify, SlugResolution, Storefront};
