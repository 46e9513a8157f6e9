//! Typed facts derived from a record's property list.
//!
//! Nothing here caches or mutates: every call re-reads the properties, so
//! repeated calls on the same record return the same answer and records can be
//! shared freely across threads.

use serde::de::DeserializeOwned;

use crate::property::{
    ChannelProperty, GvkProperty, PackageProperty, Property, PropertyError, TYPE_CHANNEL,
    TYPE_GVK, TYPE_PACKAGE, TypedProperty,
};
use crate::types::HasProperties;

/// Decode every property of `type_` on `record`, in source order.
///
/// # Errors
///
/// Returns [`PropertyError::Decode`] for the first value that does not match `T`.
pub fn decode_all<T, R>(record: &R, type_: &str) -> Result<Vec<T>, PropertyError>
where
    T: DeserializeOwned,
    R: HasProperties + ?Sized,
{
    record
        .properties()
        .iter()
        .filter(|p| p.type_ == type_)
        .map(|p| p.decode::<T>())
        .collect()
}

/// Decode the single property of `type_` on `record`.
///
/// # Errors
///
/// Returns [`PropertyError::Missing`] when there is none,
/// [`PropertyError::Duplicate`] when there are several, and
/// [`PropertyError::Decode`] when the value does not match `T`.
pub fn decode_one<T, R>(record: &R, type_: &str) -> Result<T, PropertyError>
where
    T: DeserializeOwned,
    R: HasProperties + ?Sized,
{
    single(record, type_)?.decode()
}

/// Every property of `type_` on `record`, decoded into its [`TypedProperty`]
/// variant, in source order.
///
/// # Errors
///
/// Returns [`PropertyError::Decode`] for the first malformed value.
pub fn typed_all<R>(record: &R, type_: &str) -> Result<Vec<TypedProperty>, PropertyError>
where
    R: HasProperties + ?Sized,
{
    record
        .properties()
        .iter()
        .filter(|p| p.type_ == type_)
        .map(Property::typed)
        .collect()
}

fn single<'a, R>(record: &'a R, type_: &str) -> Result<&'a Property, PropertyError>
where
    R: HasProperties + ?Sized,
{
    let mut matching = record.properties().iter().filter(|p| p.type_ == type_);
    let Some(first) = matching.next() else {
        return Err(PropertyError::Missing {
            type_: type_.to_string(),
        });
    };
    let extra = matching.count();
    if extra > 0 {
        return Err(PropertyError::Duplicate {
            type_: type_.to_string(),
            count: extra + 1,
        });
    }
    Ok(first)
}

/// The decoded `olm.package` property.
///
/// # Errors
///
/// Returns [`PropertyError::Missing`], [`PropertyError::Duplicate`] or
/// [`PropertyError::Decode`] as [`decode_one`] does.
pub fn package_property<R: HasProperties + ?Sized>(
    record: &R,
) -> Result<PackageProperty, PropertyError> {
    match single(record, TYPE_PACKAGE)?.typed()? {
        TypedProperty::Package(pkg) => Ok(pkg),
        // typed() dispatches on the type string, so nothing else comes back
        _ => Err(PropertyError::Missing {
            type_: TYPE_PACKAGE.to_string(),
        }),
    }
}

/// Package name from the `olm.package` property.
///
/// # Errors
///
/// Fails when the record has zero or several package properties, or when the
/// property cannot be decoded.
pub fn package_name<R: HasProperties + ?Sized>(record: &R) -> Result<String, PropertyError> {
    package_property(record).map(|p| p.package_name)
}

/// Version from the `olm.package` property.
///
/// An absent (or empty) version field yields `Ok(None)`; a version that is
/// present but not valid semver is an error.
///
/// # Errors
///
/// Everything [`package_name`] fails on, plus [`PropertyError::InvalidVersion`].
pub fn version<R: HasProperties + ?Sized>(
    record: &R,
) -> Result<Option<semver::Version>, PropertyError> {
    let pkg = package_property(record)?;
    match pkg.version.as_deref() {
        None | Some("") => Ok(None),
        Some(raw) => semver::Version::parse(raw)
            .map(Some)
            .map_err(|source| PropertyError::InvalidVersion {
                value: raw.to_string(),
                source,
            }),
    }
}

/// All `olm.channel` properties of `record`.
///
/// # Errors
///
/// Returns [`PropertyError::Decode`] if any channel property is malformed.
pub fn channels<R: HasProperties + ?Sized>(
    record: &R,
) -> Result<Vec<ChannelProperty>, PropertyError> {
    Ok(typed_all(record, TYPE_CHANNEL)?
        .into_iter()
        .filter_map(|p| match p {
            TypedProperty::Channel(channel) => Some(channel),
            _ => None,
        })
        .collect())
}

/// APIs the record provides (`olm.gvk`).
///
/// # Errors
///
/// Returns [`PropertyError::Decode`] if any `olm.gvk` property is malformed.
pub fn provided_apis<R: HasProperties + ?Sized>(
    record: &R,
) -> Result<Vec<GvkProperty>, PropertyError> {
    Ok(typed_all(record, TYPE_GVK)?
        .into_iter()
        .filter_map(|p| match p {
            TypedProperty::Gvk(gvk) => Some(gvk),
            _ => None,
        })
        .collect())
}

/// Whether `record` declares membership of `channel_name`.
///
/// # Errors
///
/// See [`channels`].
pub fn in_channel<R: HasProperties + ?Sized>(
    record: &R,
    channel_name: &str,
) -> Result<bool, PropertyError> {
    Ok(channels(record)?
        .iter()
        .any(|c| c.channel_name == channel_name))
}
