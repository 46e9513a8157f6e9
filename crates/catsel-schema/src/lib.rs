//! Catalog metadata records and their typed properties.
//!
//! Shared by the selection engine (`catsel-core`) and the offline tool
//! (`catsel-cli`).

pub mod accessors;
pub mod conditions;
pub mod property;
pub mod types;

// Re-exports
pub use property::{
    BundleObjectProperty, ChannelProperty, GvkProperty, PackageProperty,
    PackageRequiredProperty, Property, PropertyError, TypedProperty,
};
pub use types::*;
