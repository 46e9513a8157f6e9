//! Catalog metadata selection engine.
//!
//! Turns catalog records into ranked, constrained candidate sets for an
//! external dependency solver:
//!
//! - [`filter`]: predicate algebra over any record with a property list
//! - [`sort`]: best-candidate-first ordering of bundles
//! - [`range`]: semantic version range expressions
//! - [`catalog`]: the read-only catalog seam and an in-memory implementation
//! - [`variables`]: solver inputs, including the required-package source
//!
//! Nothing here performs I/O; callers hand in catalog snapshots.

pub mod catalog;
pub mod error;
pub mod filter;
pub mod range;
pub mod sort;
pub mod variables;

pub use catalog::{CatalogClient, CatalogError, InMemoryCatalog};
pub use error::ResolutionError;
pub use filter::Predicate;
pub use range::{RangeError, VersionRange};
pub use variables::{
    Constraint, Identifier, RequiredPackageSource, SliceVariableSource, Variable, VariableSource,
    build_required_package_source,
};
