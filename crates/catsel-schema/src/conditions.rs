//! Status condition vocabulary.
//!
//! The tables are plain `const` data: built at compile time, never mutated.

/// Condition type: the requested package has been installed.
pub const TYPE_INSTALLED: &str = "Installed";
/// Condition type: the requested package has been resolved to a bundle.
pub const TYPE_RESOLVED: &str = "Resolved";

/// No bundle could be looked up for the request.
pub const REASON_BUNDLE_LOOKUP_FAILED: &str = "BundleLookupFailed";
/// Installing the resolved bundle failed.
pub const REASON_INSTALLATION_FAILED: &str = "InstallationFailed";
/// Installation state cannot be determined yet.
pub const REASON_INSTALLATION_STATUS_UNKNOWN: &str = "InstallationStatusUnknown";
/// The resolved bundle was installed.
pub const REASON_INSTALLATION_SUCCEEDED: &str = "InstallationSucceeded";
/// The request itself is invalid (bad version range, bad channel name, ...).
pub const REASON_INVALID_SPEC: &str = "InvalidSpec";
/// The solver found no consistent selection.
pub const REASON_RESOLUTION_FAILED: &str = "ResolutionFailed";
/// Resolution has not run yet.
pub const REASON_RESOLUTION_UNKNOWN: &str = "ResolutionUnknown";
/// Generic success.
pub const REASON_SUCCESS: &str = "Success";

/// Every condition type, sorted.
pub const CONDITION_TYPES: &[&str] = &[TYPE_INSTALLED, TYPE_RESOLVED];

/// Every condition reason, sorted.
pub const CONDITION_REASONS: &[&str] = &[
    REASON_BUNDLE_LOOKUP_FAILED,
    REASON_INSTALLATION_FAILED,
    REASON_INSTALLATION_STATUS_UNKNOWN,
    REASON_INSTALLATION_SUCCEEDED,
    REASON_INVALID_SPEC,
    REASON_RESOLUTION_FAILED,
    REASON_RESOLUTION_UNKNOWN,
    REASON_SUCCESS,
];

/// Whether `value` is a known condition type.
pub fn is_condition_type(value: &str) -> bool {
    CONDITION_TYPES.binary_search(&value).is_ok()
}

/// Whether `value` is a known condition reason.
pub fn is_condition_reason(value: &str) -> bool {
    CONDITION_REASONS.binary_search(&value).is_ok()
}
