//! Catalog record kinds: bundles, channels and packages.

use serde::{Deserialize, Serialize};

use crate::accessors;
use crate::property::{ChannelProperty, Property, PropertyError};

/// `schema` value of bundle documents in a file-based catalog.
pub const SCHEMA_BUNDLE: &str = "olm.bundle";
/// `schema` value of channel documents in a file-based catalog.
pub const SCHEMA_CHANNEL: &str = "olm.channel";
/// `schema` value of package documents in a file-based catalog.
pub const SCHEMA_PACKAGE: &str = "olm.package";

/// Capability shared by every catalog record kind: it carries a property list.
///
/// Accessors and predicates are written once against this trait and work for
/// [`Bundle`], [`Channel`] and [`Package`] alike.
pub trait HasProperties {
    /// The record's properties, in source order.
    fn properties(&self) -> &[Property];
}

impl<T: HasProperties + ?Sized> HasProperties for std::sync::Arc<T> {
    fn properties(&self) -> &[Property] {
        (**self).properties()
    }
}

impl<T: HasProperties + ?Sized> HasProperties for &T {
    fn properties(&self) -> &[Property] {
        (**self).properties()
    }
}

/// One installable unit from a catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    /// Bundle name, unique within one catalog snapshot.
    pub name: String,

    /// Package declared at the document level. Informational; the
    /// authoritative package name comes from the `olm.package` property.
    #[serde(default)]
    pub package: String,

    /// Bundle image reference.
    #[serde(default)]
    pub image: String,

    /// Typed key/value facts about the bundle.
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl Bundle {
    /// Create a bundle with the given name and properties.
    pub fn new(name: impl Into<String>, properties: Vec<Property>) -> Self {
        Self {
            name: name.into(),
            properties,
            ..Self::default()
        }
    }

    /// Package name from the `olm.package` property.
    ///
    /// # Errors
    ///
    /// See [`accessors::package_name`].
    pub fn package_name(&self) -> Result<String, PropertyError> {
        accessors::package_name(self)
    }

    /// Semantic version from the `olm.package` property.
    ///
    /// # Errors
    ///
    /// See [`accessors::version`].
    pub fn version(&self) -> Result<Option<semver::Version>, PropertyError> {
        accessors::version(self)
    }

    /// Channels the bundle is a member of.
    ///
    /// # Errors
    ///
    /// See [`accessors::channels`].
    pub fn channels(&self) -> Result<Vec<ChannelProperty>, PropertyError> {
        accessors::channels(self)
    }

    /// Whether the bundle belongs to `channel_name`.
    ///
    /// # Errors
    ///
    /// See [`accessors::in_channel`].
    pub fn in_channel(&self, channel_name: &str) -> Result<bool, PropertyError> {
        accessors::in_channel(self, channel_name)
    }
}

impl HasProperties for Bundle {
    fn properties(&self) -> &[Property] {
        &self.properties
    }
}

/// A single entry of a channel's upgrade graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelEntry {
    /// Name of the bundle this entry refers to.
    pub name: String,
    /// Bundle this entry replaces, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replaces: Option<String>,
    /// Bundles this entry skips.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skips: Vec<String>,
    /// Range of versions this entry can upgrade from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_range: Option<String>,
}

/// A named stream of bundle releases for a package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    /// Channel name, e.g. `stable`.
    pub name: String,
    /// Package the channel belongs to.
    #[serde(default)]
    pub package: String,
    /// Bundles published in this channel.
    #[serde(default)]
    pub entries: Vec<ChannelEntry>,
    /// Additional channel properties.
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl HasProperties for Channel {
    fn properties(&self) -> &[Property] {
        &self.properties
    }
}

/// Top-level package metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    /// Package name.
    pub name: String,
    /// Channel used when a request names none.
    #[serde(default)]
    pub default_channel: String,
    /// Human-readable summary.
    #[serde(default)]
    pub description: String,
    /// Additional package properties.
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl HasProperties for Package {
    fn properties(&self) -> &[Property] {
        &self.properties
    }
}
