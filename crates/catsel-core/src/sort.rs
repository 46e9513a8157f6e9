//! Best-candidate-first ordering of bundles.
//!
//! Bundles are grouped by package name (ascending) and, within a package,
//! ordered by version from highest to lowest so the latest release is tried
//! first. Unreadable metadata never aborts a sort: a bundle whose package
//! name or version cannot be determined is pushed after the ones that can.

use std::borrow::Borrow;
use std::cmp::Ordering;

use catsel_schema::Bundle;

/// Total preorder over bundles: package name ascending, then version descending.
///
/// Suitable for `sort_by`. Bundles that tie at both levels compare `Equal`;
/// there is no further tie-break.
pub fn by_package_and_version(a: &Bundle, b: &Bundle) -> Ordering {
    package_order(a, b).then_with(|| version_order(a, b))
}

/// `true` iff `a` ranks strictly before `b`.
pub fn less_than(a: &Bundle, b: &Bundle) -> bool {
    by_package_and_version(a, b) == Ordering::Less
}

/// Sort `bundles` in place, best candidate first.
///
/// The sort is stable, so bundles that rank equal keep their input order.
pub fn sort_bundles<B: Borrow<Bundle>>(bundles: &mut [B]) {
    bundles.sort_by(|a, b| {
        by_package_and_version(
            <B as Borrow<Bundle>>::borrow(a),
            <B as Borrow<Bundle>>::borrow(b),
        )
    });
}

/// Return a sorted copy of `bundles`, leaving the input untouched.
pub fn sorted<B: Borrow<Bundle> + Clone>(bundles: &[B]) -> Vec<B> {
    let mut out = bundles.to_vec();
    sort_bundles(&mut out);
    out
}

/// Bundles with both a package name and a readable version form the first
/// tier; everything else ranks after them.
fn tier(bundle: &Bundle) -> u8 {
    match (bundle.package_name(), bundle.version()) {
        (Ok(_), Ok(Some(_))) => 0,
        _ => 1,
    }
}

fn package_order(a: &Bundle, b: &Bundle) -> Ordering {
    tier(a).cmp(&tier(b)).then_with(|| {
        match (a.package_name(), b.package_name()) {
            (Ok(name_a), Ok(name_b)) => name_a.cmp(&name_b),
            (Ok(_), Err(_)) => Ordering::Less,
            (Err(_), Ok(_)) => Ordering::Greater,
            (Err(_), Err(_)) => Ordering::Equal,
        }
    })
}

fn version_order(a: &Bundle, b: &Bundle) -> Ordering {
    match (a.version(), b.version()) {
        // highest first
        (Ok(Some(ver_a)), Ok(Some(ver_b))) => ver_b.cmp_precedence(&ver_a),
        (Ok(Some(_)), Ok(None)) => Ordering::Less,
        (Ok(None), Ok(Some(_))) => Ordering::Greater,
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Ok(None), Ok(None)) | (Err(_), Err(_)) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catsel_schema::Property;

    fn bundle(name: &str, pkg: &str, version: Option<&str>) -> Bundle {
        Bundle::new(name, vec![Property::package(pkg, version)])
    }

    fn names(bundles: &[&Bundle]) -> Vec<String> {
        bundles.iter().map(|b| b.name.clone()).collect()
    }

    fn sort_refs<'a>(mut bundles: Vec<&'a Bundle>) -> Vec<&'a Bundle> {
        bundles.sort_by(|a, b| by_package_and_version(a, b));
        bundles
    }

    #[test]
    fn test_sort_by_package_name() {
        let b1 = bundle("b1", "package-a", Some("1.0.0"));
        let b2 = bundle("b2", "package-b", Some("1.0.0"));
        let b3 = bundle("b3", "package-c", Some("1.0.0"));

        let sorted = sort_refs(vec![&b2, &b3, &b1]);
        assert_eq!(names(&sorted), vec!["b1", "b2", "b3"]);
    }

    #[test]
    fn test_sort_by_version() {
        let mk = |name: &str, ver: &str| {
            Bundle::new(
                name,
                vec![
                    Property::package("package-a", Some(ver)),
                    Property::channel("alpha", 0),
                ],
            )
        };
        let b1 = mk("b1", "1.0.0");
        let b2 = mk("b2", "1.0.1");
        let b3 = mk("b3", "2.0.0");

        let sorted = sort_refs(vec![&b2, &b3, &b1]);
        assert_eq!(names(&sorted), vec!["b3", "b2", "b1"]);
    }

    #[test]
    fn test_sort_with_missing_properties() {
        let b1 = bundle("b1", "package-a", Some("1.0.0"));
        let b2 = bundle("b2", "package-a", None);
        let b3 = bundle("b3", "package-a", Some("2.0.0"));
        let b4 = bundle("b4", "package-b", Some("2.0.0"));
        let b5 = Bundle::new("b5", vec![]);

        let sorted = sort_refs(vec![&b2, &b3, &b1, &b4, &b5]);
        // highest version of the first package, then its lower versions, then
        // the next package; incomplete bundles last
        assert_eq!(names(&sorted), vec!["b3", "b1", "b4", "b2", "b5"]);
    }

    #[test]
    fn test_unreadable_metadata_ranks_last() {
        let good = bundle("good", "zzz", Some("0.0.1"));
        let bad_version = bundle("bad-version", "aaa", Some("not-semver"));
        let duplicate = Bundle::new(
            "duplicate",
            vec![
                Property::package("aaa", Some("9.9.9")),
                Property::package("aaa", Some("9.9.9")),
            ],
        );

        assert!(less_than(&good, &bad_version));
        assert!(less_than(&good, &duplicate));
        assert!(!less_than(&bad_version, &good));
        assert!(!less_than(&duplicate, &good));
        // a readable name still ranks ahead of an unreadable one
        assert!(less_than(&bad_version, &duplicate));

        let also_duplicate = Bundle::new("also-duplicate", vec![]);
        assert_eq!(by_package_and_version(&duplicate, &also_duplicate), Ordering::Equal);
    }

    #[test]
    fn test_unversioned_bundles_stay_grouped_by_package() {
        let a1 = bundle("a1", "a", None);
        let b1 = bundle("b1", "b", None);
        let a2 = bundle("a2", "a", None);
        let out = sorted(&[&a1, &b1, &a2]);
        assert_eq!(names(&out), vec!["a1", "a2", "b1"]);

        let bad_a = bundle("bad-a", "a", Some("garbage"));
        let none_z = bundle("none-z", "z", None);
        assert!(less_than(&bad_a, &none_z));
        assert!(!less_than(&none_z, &bad_a));
    }

    #[test]
    fn test_both_unversioned_are_equal() {
        let a = bundle("a", "pkg", None);
        let b = bundle("b", "pkg", None);
        assert_eq!(by_package_and_version(&a, &b), Ordering::Equal);
        assert!(!less_than(&a, &b));
        assert!(!less_than(&b, &a));
    }

    #[test]
    fn test_strictness_and_transitivity() {
        let all = [
            bundle("a1", "a", Some("1.0.0")),
            bundle("a2", "a", Some("2.0.0")),
            bundle("a3", "a", Some("2.0.0-rc.1")),
            bundle("b1", "b", Some("0.1.0")),
            bundle("b2", "b", None),
            bundle("c1", "c", Some("bogus")),
            bundle("c2", "c", None),
            bundle("a4", "a", None),
            Bundle::new("none", vec![]),
        ];
        for x in &all {
            assert!(!less_than(x, x), "{} < itself", x.name);
            for y in &all {
                if less_than(x, y) {
                    assert!(!less_than(y, x), "{} and {} both less", x.name, y.name);
                }
                for z in &all {
                    if less_than(x, y) && less_than(y, z) {
                        assert!(less_than(x, z), "{} {} {}", x.name, y.name, z.name);
                    }
                }
            }
        }
    }

    #[test]
    fn test_sorted_groups_packages() {
        let input = vec![
            bundle("b-1", "b", Some("1.0.0")),
            bundle("a-1", "a", Some("1.0.0")),
            bundle("b-3", "b", Some("3.0.0")),
            bundle("a-2", "a", Some("2.0.0")),
            bundle("b-2", "b", Some("2.0.0")),
        ];
        let out = sorted(&input.iter().collect::<Vec<_>>());
        assert_eq!(names(&out), vec!["a-2", "a-1", "b-3", "b-2", "b-1"]);

        for pair in out.windows(2) {
            let (pa, pb) = (pair[0].package_name().unwrap(), pair[1].package_name().unwrap());
            assert!(pa <= pb);
            if pa == pb {
                assert!(pair[0].version().unwrap() >= pair[1].version().unwrap());
            }
        }
        // input untouched
        assert_eq!(input[0].name, "b-1");
    }

    #[test]
    fn test_sort_arc_bundles() {
        use std::sync::Arc;
        let mut bundles = vec![
            Arc::new(bundle("old", "a", Some("1.0.0"))),
            Arc::new(bundle("new", "a", Some("1.1.0"))),
        ];
        sort_bundles(&mut bundles);
        assert_eq!(bundles[0].name, "new");
    }
}
