//! Domain-specific errors for building and querying resolution inputs

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::range::RangeError;

/// Errors raised while building variable sources or producing variables.
#[derive(Error, Debug)]
pub enum ResolutionError {
    /// A required package was requested without a name.
    #[error("package name must not be empty")]
    EmptyPackageName,

    /// The requested version range does not parse.
    #[error("invalid version range {range:?}: {source}")]
    InvalidVersionRange {
        /// The expression as supplied.
        range: String,
        /// Why it failed to parse.
        #[source]
        source: RangeError,
    },

    /// The requested channel name is not a valid channel identifier.
    #[error("invalid channel name {0:?}: must be a lowercase DNS-1123 subdomain")]
    InvalidChannelName(String),

    /// The catalog could not be read.
    #[error("catalog query failed: {0}")]
    Catalog(#[from] CatalogError),

    /// No bundle satisfies the request.
    #[error(
        "no package {package_name:?}{} found",
        describe_constraints(.version_range.as_deref(), .channel.as_deref())
    )]
    NoCandidates {
        /// Requested package.
        package_name: String,
        /// Requested version range, if any.
        version_range: Option<String>,
        /// Requested channel, if any.
        channel: Option<String>,
    },

    /// A caller-provided source failed.
    #[error("{context}: {message}")]
    Source {
        /// Which source failed.
        context: String,
        /// What went wrong.
        message: String,
    },
}

impl ResolutionError {
    /// Wrap a failure from a caller-provided variable source.
    pub fn source_failed(context: impl Into<String>, msg: impl std::fmt::Display) -> Self {
        Self::Source {
            context: context.into(),
            message: msg.to_string(),
        }
    }
}

fn describe_constraints(version_range: Option<&str>, channel: Option<&str>) -> String {
    let mut out = String::new();
    if let Some(range) = version_range {
        out.push_str(&format!(" matching version {range:?}"));
    }
    if let Some(channel) = channel {
        out.push_str(&format!(" in channel {channel:?}"));
    }
    out
}
