//! Channel predicates.

use catsel_schema::Channel;

use super::Predicate;

/// Channels named `name`.
pub fn with_name(name: impl Into<String>) -> Predicate<Channel> {
    let name = name.into();
    Predicate::new(move |channel: &Channel| channel.name == name)
}

/// Channels belonging to `package_name`.
pub fn with_package_name(package_name: impl Into<String>) -> Predicate<Channel> {
    let package_name = package_name.into();
    Predicate::new(move |channel: &Channel| channel.package == package_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{and, filter, not};
    use catsel_schema::ChannelEntry;

    fn channel(name: &str, package: &str, bundles: &[&str]) -> Channel {
        Channel {
            name: name.into(),
            package: package.into(),
            entries: bundles
                .iter()
                .map(|b| ChannelEntry {
                    name: (*b).into(),
                    ..ChannelEntry::default()
                })
                .collect(),
            properties: vec![],
        }
    }

    #[test]
    fn test_channel_predicates() {
        let channels = vec![
            channel("stable", "etcd", &["etcd.v1"]),
            channel("alpha", "etcd", &["etcd.v1", "etcd.v2"]),
            channel("stable", "other", &["other.v1"]),
        ];

        let kept = filter(&channels, &and(vec![with_name("stable"), with_package_name("etcd")]));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].package, "etcd");

        let kept = filter(&channels, &not(with_package_name("etcd")));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].package, "other");
    }
}
