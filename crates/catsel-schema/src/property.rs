//! Catalog properties.
//!
//! A [`Property`] is the raw `{ "type": ..., "value": ... }` pair found on
//! every catalog record. [`TypedProperty`] decodes the value into one of the
//! known shapes, keyed by the `type` string, and keeps anything else as
//! [`TypedProperty::Unknown`] so newer catalogs still load.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `olm.package`: the package a bundle belongs to, plus its version.
pub const TYPE_PACKAGE: &str = "olm.package";
/// `olm.package.required`: a dependency on another package.
pub const TYPE_PACKAGE_REQUIRED: &str = "olm.package.required";
/// `olm.channel`: membership of a bundle in a channel.
pub const TYPE_CHANNEL: &str = "olm.channel";
/// `olm.gvk`: an API (group/version/kind) provided by a bundle.
pub const TYPE_GVK: &str = "olm.gvk";
/// `olm.gvk.required`: an API required by a bundle.
pub const TYPE_GVK_REQUIRED: &str = "olm.gvk.required";
/// `olm.bundle.object`: an encoded manifest shipped with a bundle.
pub const TYPE_BUNDLE_OBJECT: &str = "olm.bundle.object";

/// Errors raised while interpreting the properties of a record.
///
/// Every variant describes a malformed property: one that is missing,
/// duplicated where uniqueness is required, or undecodable.
#[derive(thiserror::Error, Debug)]
pub enum PropertyError {
    /// No property of the required type exists.
    #[error("property {type_:?} not found")]
    Missing {
        /// The property type that was looked up.
        type_: String,
    },

    /// More than one property of a type that must be unique.
    #[error("expected exactly one {type_:?} property, found {count}")]
    Duplicate {
        /// The property type that was looked up.
        type_: String,
        /// How many properties of that type were found.
        count: usize,
    },

    /// The JSON value could not be decoded into the expected shape.
    #[error("failed to decode {type_:?} property: {source}")]
    Decode {
        /// The property type being decoded.
        type_: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The version field is present but is not a semantic version.
    #[error("invalid version {value:?}: {source}")]
    InvalidVersion {
        /// The raw version string.
        value: String,
        /// Underlying semver error.
        #[source]
        source: semver::Error,
    },
}

/// A raw catalog property, as it appears in the catalog JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Property type, e.g. `olm.package`.
    #[serde(rename = "type")]
    pub type_: String,

    /// Undecoded JSON payload.
    pub value: Value,
}

impl Property {
    /// Create a property from a type and an already-built JSON value.
    pub fn new(type_: impl Into<String>, value: Value) -> Self {
        Self {
            type_: type_.into(),
            value,
        }
    }

    /// Build an `olm.package` property.
    pub fn package(package_name: &str, version: Option<&str>) -> Self {
        let mut value = serde_json::json!({ "packageName": package_name });
        if let Some(version) = version {
            value["version"] = Value::from(version);
        }
        Self::new(TYPE_PACKAGE, value)
    }

    /// Build an `olm.channel` property.
    pub fn channel(channel_name: &str, priority: i64) -> Self {
        Self::new(
            TYPE_CHANNEL,
            serde_json::json!({ "channelName": channel_name, "priority": priority }),
        )
    }

    /// Decode the value into `T`, tagging failures with this property's type.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::Decode`] if the value does not match `T`.
    pub fn decode<T: serde::de::DeserializeOwned>(&self) -> Result<T, PropertyError> {
        T::deserialize(&self.value).map_err(|source| PropertyError::Decode {
            type_: self.type_.clone(),
            source,
        })
    }

    /// Decode into the matching [`TypedProperty`] variant.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::Decode`] if the type is known but its value is
    /// malformed. Unknown types never fail.
    pub fn typed(&self) -> Result<TypedProperty, PropertyError> {
        Ok(match self.type_.as_str() {
            TYPE_PACKAGE => TypedProperty::Package(self.decode()?),
            TYPE_PACKAGE_REQUIRED => TypedProperty::PackageRequired(self.decode()?),
            TYPE_CHANNEL => TypedProperty::Channel(self.decode()?),
            TYPE_GVK => TypedProperty::Gvk(self.decode()?),
            TYPE_GVK_REQUIRED => TypedProperty::GvkRequired(self.decode()?),
            TYPE_BUNDLE_OBJECT => TypedProperty::BundleObject(self.decode()?),
            _ => TypedProperty::Unknown {
                type_: self.type_.clone(),
                value: self.value.clone(),
            },
        })
    }
}

/// A property decoded according to its type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedProperty {
    /// `olm.package`
    Package(PackageProperty),
    /// `olm.package.required`
    PackageRequired(PackageRequiredProperty),
    /// `olm.channel`
    Channel(ChannelProperty),
    /// `olm.gvk`
    Gvk(GvkProperty),
    /// `olm.gvk.required`
    GvkRequired(GvkProperty),
    /// `olm.bundle.object`
    BundleObject(BundleObjectProperty),
    /// Any type this crate does not model; kept verbatim.
    Unknown {
        /// Property type.
        type_: String,
        /// Undecoded payload.
        value: Value,
    },
}

/// Payload of `olm.package`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageProperty {
    /// Name of the package the bundle belongs to.
    pub package_name: String,
    /// Version string; absent for some bundles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Payload of `olm.package.required`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageRequiredProperty {
    /// Name of the required package.
    pub package_name: String,
    /// Range expression the required package must satisfy.
    pub version_range: String,
}

/// Payload of `olm.channel`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelProperty {
    /// Channel the bundle is a member of.
    pub channel_name: String,
    /// Ordering hint within the channel.
    #[serde(default)]
    pub priority: i64,
}

/// Payload of `olm.gvk` and `olm.gvk.required`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GvkProperty {
    /// API group.
    pub group: String,
    /// API version.
    pub version: String,
    /// Resource kind.
    pub kind: String,
}

/// Payload of `olm.bundle.object`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleObjectProperty {
    /// Base64-encoded manifest.
    pub data: String,
}
