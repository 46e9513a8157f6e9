//! Package predicates.

use catsel_schema::Package;

use super::Predicate;

/// Packages named `name`.
pub fn with_name(name: impl Into<String>) -> Predicate<Package> {
    let name = name.into();
    Predicate::new(move |package: &Package| package.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{filter, or};

    #[test]
    fn test_package_predicates() {
        let packages = vec![
            Package {
                name: "etcd".into(),
                default_channel: "stable".into(),
                ..Package::default()
            },
            Package {
                name: "prometheus".into(),
                default_channel: "beta".into(),
                ..Package::default()
            },
        ];

        let kept = filter(&packages, &or(vec![with_name("prometheus"), with_name("nope")]));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "prometheus");

        let kept = filter(&packages, &with_name("etcd"));
        assert_eq!(kept[0].default_channel, "stable");
    }
}
