//! Select command

use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result};
use catsel_core::filter::{self, and};
use catsel_core::{
    InMemoryCatalog, ResolutionError, Variable, VariableSource, build_required_package_source,
};
use catsel_schema::{Bundle, accessors};
use catsel_schema::conditions::{
    REASON_INVALID_SPEC, REASON_RESOLUTION_FAILED, REASON_SUCCESS, TYPE_RESOLVED,
};
use crossterm::style::Stylize;
use serde::Serialize;
use tracing::{info, warn};

use crate::SelectArgs;

/// Status condition summarising a selection.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Condition {
    /// Condition type.
    #[serde(rename = "type")]
    pub type_: &'static str,
    /// `"True"` or `"False"`.
    pub status: &'static str,
    /// Machine-readable reason.
    pub reason: &'static str,
    /// Human-readable detail.
    pub message: String,
}

/// One ranked candidate.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Bundle name.
    pub name: String,
    /// Bundle version, if it has a readable one.
    pub version: Option<String>,
    /// Bundle image reference.
    pub image: String,
    /// Channels the bundle belongs to.
    pub channels: Vec<String>,
    /// APIs the bundle provides, as `group/version/Kind`.
    pub provided_apis: Vec<String>,
}

/// Outcome of `catsel select`, as printed with `--json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Requested package.
    pub package: String,
    /// Requested version range, if any.
    pub version_range: Option<String>,
    /// Requested channel, if any.
    pub channel: Option<String>,
    /// Default channel of the package, when the catalog declares one.
    pub default_channel: Option<String>,
    /// Resolution status.
    pub condition: Condition,
    /// Candidates, best first.
    pub candidates: Vec<Candidate>,
}

/// Rank the bundles in `args.catalog` that satisfy the package request.
pub fn select(args: &SelectArgs) -> Result<()> {
    let content = fs::read_to_string(&args.catalog)
        .with_context(|| format!("Failed to read catalog {}", args.catalog.display()))?;
    let catalog = InMemoryCatalog::from_json_str(&content)
        .with_context(|| format!("Failed to parse catalog {}", args.catalog.display()))?;

    let default_channel = default_channel(&catalog, &args.package);
    if let Some(channel) = args
        .channel
        .as_deref()
        .filter(|c| !c.is_empty() && !channel_declared(&catalog, &args.package, c))
    {
        warn!(package = %args.package, channel, "channel is not declared in the catalog");
    }

    let outcome = candidates(Arc::new(catalog), args);
    let report = report(args, default_channel, &outcome);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if outcome.is_ok() {
        print_table(&report);
    }

    let bundles =
        outcome.with_context(|| format!("Failed to select package '{}'", args.package))?;
    info!(package = %args.package, count = bundles.len(), "selection complete");
    Ok(())
}

/// Default channel of `package_name`, if the catalog has a package document for it.
fn default_channel(catalog: &InMemoryCatalog, package_name: &str) -> Option<String> {
    filter::filter(
        catalog.packages().iter().cloned(),
        &filter::package::with_name(package_name),
    )
    .first()
    .map(|pkg| pkg.default_channel.clone())
    .filter(|c| !c.is_empty())
}

/// Whether the catalog has a channel document named `channel` for `package_name`.
fn channel_declared(catalog: &InMemoryCatalog, package_name: &str, channel: &str) -> bool {
    let matching = and(vec![
        filter::channel::with_package_name(package_name),
        filter::channel::with_name(channel),
    ]);
    !filter::filter(catalog.channels().iter().cloned(), &matching).is_empty()
}

fn candidates(
    catalog: Arc<InMemoryCatalog>,
    args: &SelectArgs,
) -> Result<Vec<Arc<Bundle>>, ResolutionError> {
    let chain = build_required_package_source(
        catalog,
        &args.package,
        args.version_range.as_deref(),
        args.channel.as_deref(),
    )?
    .chain(None);

    Ok(chain
        .variables()?
        .into_iter()
        .find_map(|v| match v {
            Variable::RequiredPackage(required) => Some(required.bundles().to_vec()),
            Variable::Custom { .. } => None,
        })
        .unwrap_or_default())
}

/// Map a selection outcome onto a `Resolved` condition.
pub fn condition(outcome: &Result<Vec<Arc<Bundle>>, ResolutionError>) -> Condition {
    match outcome {
        Ok(bundles) => Condition {
            type_: TYPE_RESOLVED,
            status: "True",
            reason: REASON_SUCCESS,
            message: match bundles.first() {
                Some(best) => format!("resolved to {:?}", best.name),
                None => "no candidates".to_string(),
            },
        },
        Err(err) => Condition {
            type_: TYPE_RESOLVED,
            status: "False",
            reason: match err {
                ResolutionError::EmptyPackageName
                | ResolutionError::InvalidVersionRange { .. }
                | ResolutionError::InvalidChannelName(_) => REASON_INVALID_SPEC,
                _ => REASON_RESOLUTION_FAILED,
            },
            message: err.to_string(),
        },
    }
}

fn report(
    args: &SelectArgs,
    default_channel: Option<String>,
    outcome: &Result<Vec<Arc<Bundle>>, ResolutionError>,
) -> Report {
    let candidates = outcome
        .as_ref()
        .map(|bundles| bundles.iter().map(|b| candidate(b)).collect())
        .unwrap_or_default();
    Report {
        package: args.package.clone(),
        version_range: args.version_range.clone().filter(|r| !r.is_empty()),
        channel: args.channel.clone().filter(|c| !c.is_empty()),
        default_channel,
        condition: condition(outcome),
        candidates,
    }
}

fn candidate(bundle: &Bundle) -> Candidate {
    Candidate {
        name: bundle.name.clone(),
        version: bundle.version().ok().flatten().as_ref().map(ToString::to_string),
        image: bundle.image.clone(),
        channels: bundle
            .channels()
            .map(|cs| cs.into_iter().map(|c| c.channel_name).collect())
            .unwrap_or_default(),
        provided_apis: accessors::provided_apis(bundle)
            .map(|apis| {
                apis.into_iter()
                    .map(|gvk| format!("{}/{}/{}", gvk.group, gvk.version, gvk.kind))
                    .collect()
            })
            .unwrap_or_default(),
    }
}

fn print_table(report: &Report) {
    let name_width = report
        .candidates
        .iter()
        .map(|c| c.name.len())
        .max()
        .unwrap_or(0)
        .max(4);

    println!("{}", report.condition.message.as_str().green());
    println!();
    let header = format!("  {:<name_width$}  {:<12}  CHANNELS", "NAME", "VERSION");
    println!("{}", header.bold());
    for c in &report.candidates {
        let version = format!("{:<12}", c.version.as_deref().unwrap_or("-"));
        println!(
            "  {:<name_width$}  {}  {}",
            c.name,
            version.dark_grey(),
            c.channels.join(",")
        );
    }
}
