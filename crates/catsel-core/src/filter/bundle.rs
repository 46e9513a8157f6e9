//! Bundle predicates.
//!
//! A bundle whose properties cannot be read never matches: accessor errors
//! inside these predicates exclude the bundle instead of aborting the filter.

use catsel_schema::Bundle;
use tracing::trace;

use super::Predicate;
use crate::range::VersionRange;

/// Bundles whose `olm.package` property names `package_name` (case-sensitive).
pub fn with_package_name(package_name: impl Into<String>) -> Predicate<Bundle> {
    let package_name = package_name.into();
    Predicate::new(move |bundle: &Bundle| match bundle.package_name() {
        Ok(name) => name == package_name,
        Err(err) => {
            trace!(bundle = %bundle.name, error = %err, "excluding bundle without package name");
            false
        }
    })
}

/// Bundles with the given bundle name.
pub fn with_name(name: impl Into<String>) -> Predicate<Bundle> {
    let name = name.into();
    Predicate::new(move |bundle: &Bundle| bundle.name == name)
}

/// Bundles whose version lies inside `range`. Unversioned bundles never match.
pub fn in_version_range(range: VersionRange) -> Predicate<Bundle> {
    Predicate::new(move |bundle: &Bundle| match bundle.version() {
        Ok(Some(version)) => range.contains(&version),
        Ok(None) => false,
        Err(err) => {
            trace!(bundle = %bundle.name, error = %err, "excluding bundle with unreadable version");
            false
        }
    })
}

/// Bundles that are members of `channel_name`.
pub fn in_channel(channel_name: impl Into<String>) -> Predicate<Bundle> {
    let channel_name = channel_name.into();
    Predicate::new(move |bundle: &Bundle| match bundle.in_channel(&channel_name) {
        Ok(member) => member,
        Err(err) => {
            trace!(bundle = %bundle.name, error = %err, "excluding bundle with unreadable channels");
            false
        }
    })
}
