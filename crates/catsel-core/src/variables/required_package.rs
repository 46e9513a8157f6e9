//! The required-package variable source.

use std::fmt;
use std::sync::{Arc, LazyLock};

use catsel_schema::Bundle;
use regex::Regex;
use tracing::debug;

use super::{RequiredPackageVariable, SliceVariableSource, Variable, VariableSource};
use crate::catalog::CatalogClient;
use crate::error::ResolutionError;
use crate::filter::{Predicate, and, bundle, filter};
use crate::range::VersionRange;
use crate::sort::sort_bundles;

const MAX_CHANNEL_NAME_LEN: usize = 253;

/// DNS-1123 subdomain. The pattern is a literal, so compiling it cannot fail.
static CHANNEL_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$")
        .expect("channel name pattern is a valid regex")
});

/// Produces the single variable that asks the solver for one package.
///
/// Construction validates the request and assembles the constraint
/// predicate; the catalog is only queried when [`VariableSource::variables`]
/// is called.
#[derive(Clone)]
pub struct RequiredPackageSource {
    client: Arc<dyn CatalogClient>,
    package_name: String,
    version_range: Option<VersionRange>,
    channel: Option<String>,
    predicate: Predicate<Bundle>,
}

impl fmt::Debug for RequiredPackageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequiredPackageSource")
            .field("package_name", &self.package_name)
            .field("version_range", &self.version_range.as_ref().map(VersionRange::as_str))
            .field("channel", &self.channel)
            .finish_non_exhaustive()
    }
}

impl RequiredPackageSource {
    /// Require any bundle of `package_name`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::EmptyPackageName`] if the name is empty.
    pub fn new(
        client: Arc<dyn CatalogClient>,
        package_name: impl Into<String>,
    ) -> Result<Self, ResolutionError> {
        let package_name = package_name.into();
        if package_name.is_empty() {
            return Err(ResolutionError::EmptyPackageName);
        }
        let mut source = Self {
            client,
            package_name,
            version_range: None,
            channel: None,
            predicate: Predicate::new(|_: &Bundle| true),
        };
        source.rebuild_predicate();
        Ok(source)
    }

    /// Restrict candidates to versions inside `range`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::InvalidVersionRange`] if `range` does not parse.
    pub fn with_version_range(mut self, range: &str) -> Result<Self, ResolutionError> {
        let parsed = VersionRange::parse(range).map_err(|source| {
            ResolutionError::InvalidVersionRange {
                range: range.to_string(),
                source,
            }
        })?;
        self.version_range = Some(parsed);
        self.rebuild_predicate();
        Ok(self)
    }

    /// Restrict candidates to members of `channel`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::InvalidChannelName`] unless `channel` is a
    /// DNS-1123 subdomain of at most 253 characters.
    pub fn with_channel(mut self, channel: &str) -> Result<Self, ResolutionError> {
        if channel.len() > MAX_CHANNEL_NAME_LEN || !CHANNEL_NAME.is_match(channel) {
            return Err(ResolutionError::InvalidChannelName(channel.to_string()));
        }
        self.channel = Some(channel.to_string());
        self.rebuild_predicate();
        Ok(self)
    }

    /// The requested package.
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// The version range, if one was given.
    pub fn version_range(&self) -> Option<&VersionRange> {
        self.version_range.as_ref()
    }

    /// The channel, if one was given.
    pub fn channel(&self) -> Option<&str> {
        self.channel.as_deref()
    }

    /// The combined constraint candidates must satisfy.
    pub fn predicate(&self) -> &Predicate<Bundle> {
        &self.predicate
    }

    /// Whether `bundle` satisfies every constraint of this request.
    pub fn accepts(&self, bundle: &Bundle) -> bool {
        self.predicate.test(bundle)
    }

    /// Put this source in front of `existing`, if any.
    pub fn chain(self, existing: Option<Box<dyn VariableSource>>) -> SliceVariableSource {
        let mut chain = SliceVariableSource::new();
        chain.push(Box::new(self));
        if let Some(existing) = existing {
            chain.push(existing);
        }
        chain
    }

    fn rebuild_predicate(&mut self) {
        let mut parts = vec![bundle::with_package_name(self.package_name.clone())];
        if let Some(range) = &self.version_range {
            parts.push(bundle::in_version_range(range.clone()));
        }
        if let Some(channel) = &self.channel {
            parts.push(bundle::in_channel(channel.clone()));
        }
        self.predicate = and(parts);
    }
}

impl VariableSource for RequiredPackageSource {
    fn variables(&self) -> Result<Vec<Variable>, ResolutionError> {
        let all = self.client.bundles()?;
        let total = all.len();
        let mut candidates = filter(all, &self.predicate);
        sort_bundles(&mut candidates);
        debug!(
            package = %self.package_name,
            candidates = candidates.len(),
            total,
            "selected required package candidates"
        );

        if candidates.is_empty() {
            return Err(ResolutionError::NoCandidates {
                package_name: self.package_name.clone(),
                version_range: self.version_range.as_ref().map(|r| r.as_str().to_string()),
                channel: self.channel.clone(),
            });
        }
        Ok(vec![Variable::RequiredPackage(RequiredPackageVariable::new(
            self.package_name.clone(),
            candidates,
        ))])
    }
}

/// Build the source requiring `package_name`.
///
/// Empty `version_range` or `channel` strings mean "unconstrained".
///
/// # Errors
///
/// Returns [`ResolutionError::EmptyPackageName`],
/// [`ResolutionError::InvalidVersionRange`] or
/// [`ResolutionError::InvalidChannelName`] for an invalid request.
pub fn build_required_package_source(
    client: Arc<dyn CatalogClient>,
    package_name: &str,
    version_range: Option<&str>,
    channel: Option<&str>,
) -> Result<RequiredPackageSource, ResolutionError> {
    let mut source = RequiredPackageSource::new(client, package_name)?;
    if let Some(range) = version_range.filter(|r| !r.is_empty()) {
        source = source.with_version_range(range)?;
    }
    if let Some(channel) = channel.filter(|c| !c.is_empty()) {
        source = source.with_channel(channel)?;
    }
    debug!(?source, "built required package source");
    Ok(source)
}
