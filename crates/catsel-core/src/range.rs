//! Semantic version range expressions.
//!
//! Supported syntax:
//! - comparators: `=`, `==`, `!=`, `!`, `>`, `>=`, `<`, `<=`, or a bare version
//!   (exact match); whitespace between operator and version is allowed
//! - whitespace-separated comparators must all hold (`>=1.0.0 <2.0.0`)
//! - `||` separates alternatives (`<1.0.0 || >=2.0.0`)
//! - `x`, `X` or `*` wildcards in minor or patch position (`1.x`, `>=1.2.x`)

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use semver::Version;
use thiserror::Error;

/// Errors produced while parsing a [`VersionRange`].
#[derive(Error, Debug)]
pub enum RangeError {
    /// The expression, or one of its `||` alternatives, is empty.
    #[error("empty version range")]
    Empty,

    /// An operator with no version after it.
    #[error("operator {0:?} is not followed by a version")]
    DanglingOperator(String),

    /// A comparator whose version part is not a semantic version.
    #[error("invalid version {token:?}: {source}")]
    InvalidVersion {
        /// The offending token.
        token: String,
        /// Underlying semver error.
        #[source]
        source: semver::Error,
    },

    /// A wildcard in an unsupported position or with an unsupported operator.
    #[error("invalid wildcard {0:?}")]
    InvalidWildcard(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl Op {
    /// Longest operators first so `>=` is not read as `>`.
    const PREFIXES: [(&'static str, Op); 8] = [
        (">=", Op::Ge),
        ("<=", Op::Le),
        ("==", Op::Eq),
        ("!=", Op::Ne),
        (">", Op::Gt),
        ("<", Op::Lt),
        ("=", Op::Eq),
        ("!", Op::Ne),
    ];

    fn split(token: &str) -> (Option<Op>, &str) {
        for (prefix, op) in Self::PREFIXES {
            if let Some(rest) = token.strip_prefix(prefix) {
                return (Some(op), rest);
            }
        }
        (None, token)
    }

    fn accepts(self, ord: Ordering) -> bool {
        match self {
            Op::Eq => ord == Ordering::Equal,
            Op::Ne => ord != Ordering::Equal,
            Op::Gt => ord == Ordering::Greater,
            Op::Ge => ord != Ordering::Less,
            Op::Lt => ord == Ordering::Less,
            Op::Le => ord != Ordering::Greater,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Comparator {
    op: Op,
    version: Version,
}

impl Comparator {
    fn matches(&self, candidate: &Version) -> bool {
        self.op.accepts(candidate.cmp_precedence(&self.version))
    }
}

/// A parsed range expression; see the module docs for the grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    raw: String,
    alternatives: Vec<Vec<Comparator>>,
}

impl VersionRange {
    /// Parse a range expression.
    ///
    /// # Errors
    ///
    /// Returns a [`RangeError`] describing the first problem found.
    pub fn parse(expr: &str) -> Result<Self, RangeError> {
        let alternatives = expr
            .split("||")
            .map(parse_group)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            raw: expr.trim().to_string(),
            alternatives,
        })
    }

    /// Whether `version` satisfies the range.
    pub fn contains(&self, version: &Version) -> bool {
        self.alternatives
            .iter()
            .any(|group| group.iter().all(|c| c.matches(version)))
    }

    /// The expression as written (trimmed).
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for VersionRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn parse_group(group: &str) -> Result<Vec<Comparator>, RangeError> {
    let mut comparators = Vec::new();
    let mut tokens = group.split_whitespace();

    while let Some(token) = tokens.next() {
        let (op, mut rest) = Op::split(token);
        if rest.is_empty() {
            rest = tokens
                .next()
                .ok_or_else(|| RangeError::DanglingOperator(token.to_string()))?;
        }
        parse_comparator(op, rest, &mut comparators)?;
    }

    if comparators.is_empty() {
        return Err(RangeError::Empty);
    }
    Ok(comparators)
}

fn is_wildcard(part: &str) -> bool {
    matches!(part, "x" | "X" | "*")
}

fn parse_comparator(
    op: Option<Op>,
    text: &str,
    out: &mut Vec<Comparator>,
) -> Result<(), RangeError> {
    let parts: Vec<&str> = text.split('.').collect();
    if !parts.iter().any(|p| is_wildcard(p)) {
        let version = Version::parse(text).map_err(|source| RangeError::InvalidVersion {
            token: text.to_string(),
            source,
        })?;
        out.push(Comparator {
            op: op.unwrap_or(Op::Eq),
            version,
        });
        return Ok(());
    }

    let (lower, upper) =
        wildcard_bounds(&parts).ok_or_else(|| RangeError::InvalidWildcard(text.to_string()))?;
    match op.unwrap_or(Op::Eq) {
        Op::Eq => {
            out.push(Comparator { op: Op::Ge, version: lower });
            out.push(Comparator { op: Op::Lt, version: upper });
        }
        Op::Gt => out.push(Comparator { op: Op::Ge, version: upper }),
        Op::Ge => out.push(Comparator { op: Op::Ge, version: lower }),
        Op::Lt => out.push(Comparator { op: Op::Lt, version: lower }),
        Op::Le => out.push(Comparator { op: Op::Lt, version: upper }),
        Op::Ne => return Err(RangeError::InvalidWildcard(text.to_string())),
    }
    Ok(())
}

/// `[1, x]` covers `[1.0.0, 2.0.0)`, `[1, 2, x]` covers `[1.2.0, 1.3.0)`.
fn wildcard_bounds(parts: &[&str]) -> Option<(Version, Version)> {
    let major: u64 = parts.first()?.parse().ok()?;
    match parts {
        [_, minor, rest @ ..] if is_wildcard(minor) && rest.iter().all(|p| is_wildcard(p)) => {
            Some((Version::new(major, 0, 0), Version::new(major.checked_add(1)?, 0, 0)))
        }
        [_, minor, patch] if is_wildcard(patch) => {
            let minor: u64 = minor.parse().ok()?;
            Some((
                Version::new(major, minor, 0),
                Version::new(major, minor.checked_add(1)?, 0),
            ))
        }
        _ => None,
    }
}
