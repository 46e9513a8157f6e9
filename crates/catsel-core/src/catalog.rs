//! Read-only access to catalog contents.
//!
//! [`CatalogClient`] is the seam the variable sources query lazily.
//! [`InMemoryCatalog`] is the stock implementation, built either from records
//! or from a rendered file-based catalog (a stream of JSON documents tagged by
//! `schema`).

use std::collections::BTreeMap;
use std::sync::Arc;

use catsel_schema::{
    Bundle, Channel, Package, Property, SCHEMA_BUNDLE, SCHEMA_CHANNEL, SCHEMA_PACKAGE,
};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised by a catalog data source.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog content is not valid JSON.
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A document with a known schema could not be decoded.
    #[error("invalid {schema} document #{index}: {source}")]
    Document {
        /// The document's `schema` value.
        schema: String,
        /// Position of the document in the stream, starting at 0.
        index: usize,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The data source could not be reached or read.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Read-only source of bundles for the variable sources.
///
/// Implementations must be cheap to query repeatedly and safe to share between
/// threads; callers never mutate what they get back.
pub trait CatalogClient: Send + Sync {
    /// Every bundle in the catalog snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the underlying data cannot be read.
    fn bundles(&self) -> Result<Vec<Arc<Bundle>>, CatalogError>;
}

impl<T: CatalogClient + ?Sized> CatalogClient for Arc<T> {
    fn bundles(&self) -> Result<Vec<Arc<Bundle>>, CatalogError> {
        (**self).bundles()
    }
}

/// An immutable catalog snapshot held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    packages: Vec<Arc<Package>>,
    channels: Vec<Arc<Channel>>,
    bundles: Vec<Arc<Bundle>>,
}

impl InMemoryCatalog {
    /// Build a catalog from already-materialised records, as-is.
    pub fn new(packages: Vec<Package>, channels: Vec<Channel>, bundles: Vec<Bundle>) -> Self {
        Self {
            packages: packages.into_iter().map(Arc::new).collect(),
            channels: channels.into_iter().map(Arc::new).collect(),
            bundles: bundles.into_iter().map(Arc::new).collect(),
        }
    }

    /// Package documents, in load order.
    pub fn packages(&self) -> &[Arc<Package>] {
        &self.packages
    }

    /// Channel documents, in load order.
    pub fn channels(&self) -> &[Arc<Channel>] {
        &self.channels
    }

    /// A catalog holding only bundles.
    pub fn from_bundles(bundles: Vec<Bundle>) -> Self {
        Self::new(Vec::new(), Vec::new(), bundles)
    }

    /// Parse a rendered file-based catalog.
    ///
    /// The input is a stream of JSON objects (concatenated or newline
    /// separated). Documents with schema `olm.package`, `olm.channel` and
    /// `olm.bundle` are kept; other schemas are skipped. Channel membership is
    /// projected onto bundles: every bundle listed in a channel's entries gets
    /// an `olm.channel` property for that channel unless it already has one.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Json`] for malformed JSON and
    /// [`CatalogError::Document`] for a known document that fails to decode.
    pub fn from_json_str(content: &str) -> Result<Self, CatalogError> {
        let mut packages = Vec::new();
        let mut channels: Vec<Channel> = Vec::new();
        let mut bundles: Vec<Bundle> = Vec::new();

        for (index, doc) in serde_json::Deserializer::from_str(content)
            .into_iter::<Value>()
            .enumerate()
        {
            let doc = doc?;
            let schema = doc
                .get("schema")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let wrap = |source: serde_json::Error| CatalogError::Document {
                schema: schema.clone(),
                index,
                source,
            };
            match schema.as_str() {
                SCHEMA_PACKAGE => packages.push(serde_json::from_value(doc).map_err(wrap)?),
                SCHEMA_CHANNEL => channels.push(serde_json::from_value(doc).map_err(wrap)?),
                SCHEMA_BUNDLE => bundles.push(serde_json::from_value(doc).map_err(wrap)?),
                other => {
                    warn!(schema = other, index, "skipping catalog document with unsupported schema");
                }
            }
        }

        project_channel_membership(&channels, &mut bundles);
        debug!(
            packages = packages.len(),
            channels = channels.len(),
            bundles = bundles.len(),
            "loaded file-based catalog"
        );
        Ok(Self::new(packages, channels, bundles))
    }
}

impl CatalogClient for InMemoryCatalog {
    fn bundles(&self) -> Result<Vec<Arc<Bundle>>, CatalogError> {
        Ok(self.bundles.clone())
    }
}

/// Add an `olm.channel` property to each bundle for every channel of its
/// package that lists it, skipping channels the bundle already declares.
fn project_channel_membership(channels: &[Channel], bundles: &mut [Bundle]) {
    // (package, bundle name) -> channel names, in channel document order
    let mut membership: BTreeMap<(&str, &str), Vec<&str>> = BTreeMap::new();
    for channel in channels {
        for entry in &channel.entries {
            membership
                .entry((channel.package.as_str(), entry.name.as_str()))
                .or_default()
                .push(channel.name.as_str());
        }
    }

    for bundle in bundles.iter_mut() {
        let Some(names) = membership.get(&(bundle.package.as_str(), bundle.name.as_str())) else {
            continue;
        };
        let declared: Vec<String> = bundle
            .channels()
            .map(|cs| cs.into_iter().map(|c| c.channel_name).collect())
            .unwrap_or_default();
        let missing: Vec<Property> = names
            .iter()
            .filter(|name| !declared.iter().any(|d| d == *name))
            .map(|name| Property::channel(name, 0))
            .collect();
        bundle.properties.extend(missing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FBC: &str = r#"
{"schema":"olm.package","name":"etcd","defaultChannel":"stable"}
{"schema":"olm.channel","name":"stable","package":"etcd","entries":[{"name":"etcd.v1.0.0"},{"name":"etcd.v1.1.0","replaces":"etcd.v1.0.0"}]}
{"schema":"olm.channel","name":"alpha","package":"etcd","entries":[{"name":"etcd.v1.1.0"}]}
{"schema":"olm.bundle","name":"etcd.v1.0.0","package":"etcd","image":"quay.io/etcd:v1.0.0","properties":[{"type":"olm.package","value":{"packageName":"etcd","version":"1.0.0"}}]}
{"schema":"olm.bundle","name":"etcd.v1.1.0","package":"etcd","image":"quay.io/etcd:v1.1.0","properties":[{"type":"olm.package","value":{"packageName":"etcd","version":"1.1.0"}},{"type":"olm.channel","value":{"channelName":"alpha","priority":0}}]}
{"schema":"olm.deprecations","package":"etcd"}
"#;

    #[test]
    fn test_from_json_str() {
        let catalog = InMemoryCatalog::from_json_str(FBC).unwrap();
        assert_eq!(catalog.packages().len(), 1);
        assert_eq!(catalog.channels().len(), 2);
        assert_eq!(catalog.packages()[0].default_channel, "stable");

        let bundles = catalog.bundles().unwrap();
        assert_eq!(bundles.len(), 2);
        assert_eq!(bundles[0].name, "etcd.v1.0.0");
        assert_eq!(bundles[0].image, "quay.io/etcd:v1.0.0");
        assert_eq!(bundles[0].package_name().unwrap(), "etcd");
    }

    #[test]
    fn test_channel_membership_projection() {
        let catalog = InMemoryCatalog::from_json_str(FBC).unwrap();
        let bundles = catalog.bundles().unwrap();

        assert!(bundles[0].in_channel("stable").unwrap());
        assert!(!bundles[0].in_channel("alpha").unwrap());

        // already declared alpha; gains stable without duplicating alpha
        let names: Vec<String> = bundles[1]
            .channels()
            .unwrap()
            .into_iter()
            .map(|c| c.channel_name)
            .collect();
        assert_eq!(names, vec!["alpha", "stable"]);
    }

    #[test]
    fn test_invalid_documents() {
        assert!(matches!(
            InMemoryCatalog::from_json_str("{not json"),
            Err(CatalogError::Json(_))
        ));
        let bad_bundle = r#"{"schema":"olm.bundle","properties":"nope"}"#;
        assert!(matches!(
            InMemoryCatalog::from_json_str(bad_bundle),
            Err(CatalogError::Document { index: 0, .. })
        ));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = InMemoryCatalog::from_json_str("").unwrap();
        assert!(catalog.bundles().unwrap().is_empty());
    }
}
