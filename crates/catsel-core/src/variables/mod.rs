//! Solver inputs.
//!
//! A [`VariableSource`] yields [`Variable`]s on demand. Sources are built up
//! front but only touch the catalog when the solver asks for their variables.

mod required_package;

pub use required_package::{RequiredPackageSource, build_required_package_source};

use std::fmt;
use std::sync::Arc;

use catsel_schema::Bundle;

use crate::error::ResolutionError;

/// Unique name of a variable within one resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

impl Identifier {
    /// Wrap a string as an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier of the variable standing for `bundle`.
    pub fn for_bundle(bundle: &Bundle) -> Self {
        Self(bundle.name.clone())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A rule the solver must respect for a variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// The variable must be selected.
    Mandatory,
    /// If the variable is selected, at least one of these must be too.
    /// Earlier identifiers are preferred.
    Dependency(Vec<Identifier>),
}

/// A request for one package, satisfied by any of its candidate bundles.
#[derive(Debug, Clone)]
pub struct RequiredPackageVariable {
    id: Identifier,
    package_name: String,
    bundles: Vec<Arc<Bundle>>,
}

impl RequiredPackageVariable {
    /// Create the variable; `bundles` must already be in preference order.
    pub fn new(package_name: impl Into<String>, bundles: Vec<Arc<Bundle>>) -> Self {
        let package_name = package_name.into();
        Self {
            id: Identifier::new(format!("required package {package_name}")),
            package_name,
            bundles,
        }
    }

    /// The requested package.
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// Candidate bundles, best first.
    pub fn bundles(&self) -> &[Arc<Bundle>] {
        &self.bundles
    }
}

/// One input to the solver.
#[derive(Debug, Clone)]
pub enum Variable {
    /// A package the request requires.
    RequiredPackage(RequiredPackageVariable),
    /// Any other input supplied by a caller-provided source.
    Custom {
        /// Variable identifier.
        id: Identifier,
        /// Rules attached to the variable.
        constraints: Vec<Constraint>,
    },
}

impl Variable {
    /// The variable's identifier.
    pub fn identifier(&self) -> &Identifier {
        match self {
            Variable::RequiredPackage(v) => &v.id,
            Variable::Custom { id, .. } => id,
        }
    }

    /// The rules the solver must apply to this variable.
    ///
    /// A required package is mandatory and depends on its candidates, in
    /// preference order.
    pub fn constraints(&self) -> Vec<Constraint> {
        match self {
            Variable::RequiredPackage(v) => vec![
                Constraint::Mandatory,
                Constraint::Dependency(
                    v.bundles.iter().map(|b| Identifier::for_bundle(b)).collect(),
                ),
            ],
            Variable::Custom { constraints, .. } => constraints.clone(),
        }
    }
}

/// Something that produces solver variables on demand.
pub trait VariableSource: fmt::Debug + Send + Sync {
    /// Produce this source's variables.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolutionError`] if the source cannot produce its inputs.
    fn variables(&self) -> Result<Vec<Variable>, ResolutionError>;
}

impl<T: VariableSource + ?Sized> VariableSource for Box<T> {
    fn variables(&self) -> Result<Vec<Variable>, ResolutionError> {
        (**self).variables()
    }
}

impl<T: VariableSource + ?Sized> VariableSource for Arc<T> {
    fn variables(&self) -> Result<Vec<Variable>, ResolutionError> {
        (**self).variables()
    }
}

/// A fixed list of variables, handy for caller-provided inputs.
#[derive(Debug, Clone, Default)]
pub struct StaticVariableSource(pub Vec<Variable>);

impl VariableSource for StaticVariableSource {
    fn variables(&self) -> Result<Vec<Variable>, ResolutionError> {
        Ok(self.0.clone())
    }
}

/// An ordered chain of sources whose variables are concatenated in order.
#[derive(Debug, Default)]
pub struct SliceVariableSource(Vec<Box<dyn VariableSource>>);

impl SliceVariableSource {
    /// An empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source to the end of the chain.
    pub fn push(&mut self, source: Box<dyn VariableSource>) {
        self.0.push(source);
    }

    /// Number of sources in the chain.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the chain has no sources.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The sources, in order.
    pub fn sources(&self) -> &[Box<dyn VariableSource>] {
        &self.0
    }
}

impl From<Vec<Box<dyn VariableSource>>> for SliceVariableSource {
    fn from(sources: Vec<Box<dyn VariableSource>>) -> Self {
        Self(sources)
    }
}

impl VariableSource for SliceVariableSource {
    fn variables(&self) -> Result<Vec<Variable>, ResolutionError> {
        let mut out = Vec::new();
        for source in &self.0 {
            out.extend(source.variables()?);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catsel_schema::Property;

    fn custom(id: &str) -> Variable {
        Variable::Custom {
            id: Identifier::new(id),
            constraints: vec![Constraint::Mandatory],
        }
    }

    #[derive(Debug)]
    struct Failing;

    impl VariableSource for Failing {
        fn variables(&self) -> Result<Vec<Variable>, ResolutionError> {
            Err(ResolutionError::source_failed("failing source", "boom"))
        }
    }

    #[test]
    fn test_required_package_constraints() {
        let bundles = vec![
            Arc::new(Bundle::new("pkg.v2", vec![Property::package("pkg", Some("2.0.0"))])),
            Arc::new(Bundle::new("pkg.v1", vec![Property::package("pkg", Some("1.0.0"))])),
        ];
        let var = Variable::RequiredPackage(RequiredPackageVariable::new("pkg", bundles));
        assert_eq!(var.identifier().as_str(), "required package pkg");
        assert_eq!(
            var.constraints(),
            vec![
                Constraint::Mandatory,
                Constraint::Dependency(vec![Identifier::new("pkg.v2"), Identifier::new("pkg.v1")]),
            ]
        );
    }

    #[test]
    fn test_slice_source_concatenates_in_order() {
        let chain = SliceVariableSource::from(vec![
            Box::new(StaticVariableSource(vec![custom("a"), custom("b")])) as Box<dyn VariableSource>,
            Box::new(StaticVariableSource(vec![custom("c")])),
        ]);
        let ids: Vec<String> = chain
            .variables()
            .unwrap()
            .iter()
            .map(|v| v.identifier().to_string())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_slice_source_propagates_errors() {
        let mut chain = SliceVariableSource::new();
        assert!(chain.is_empty());
        chain.push(Box::new(StaticVariableSource(vec![custom("a")])));
        chain.push(Box::new(Failing));
        assert_eq!(chain.len(), 2);
        assert!(matches!(
            chain.variables(),
            Err(ResolutionError::Source { .. })
        ));
    }
}
