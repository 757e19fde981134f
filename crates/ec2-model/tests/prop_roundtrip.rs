//! Property tests: serialize-then-parse is the identity on model values, and
//! canonical serialization is deterministic.

use ec2_model::common::{Filter, ResourceTag};
use ec2_model::instances::{StopInstances, TerminateInstances};
use ec2_model::security::{IpPermission, IpRange, UserIdGroupPair};
use ec2_model::tags::{CreateTags, DeleteTag, DeleteTags, DescribeTags};
use ec2_xml::{from_document_str, to_document_string};
use proptest::collection::vec;
use proptest::option;
use proptest::prelude::*;

/// XML-safe text that is never whitespace-only: empty, or anchored on a
/// non-space character.
fn text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-zA-Z0-9<>&'\"=:/_.-][ a-zA-Z0-9<>&'\"=:/_.-]{0,20}",
    ]
}

fn resource_id() -> impl Strategy<Value = String> {
    "(i|vol|ami|sg)-[0-9a-f]{8}"
}

fn tag() -> impl Strategy<Value = ResourceTag> {
    (text(), text()).prop_map(|(key, value)| ResourceTag { key, value })
}

fn delete_tag() -> impl Strategy<Value = DeleteTag> {
    (text(), option::of(text())).prop_map(|(key, value)| DeleteTag { key, value })
}

fn filter() -> impl Strategy<Value = Filter> {
    (text(), vec(text(), 0..4)).prop_map(|(name, value_set)| Filter { name, value_set })
}

fn ip_permission() -> impl Strategy<Value = IpPermission> {
    (
        prop_oneof![Just("tcp".to_string()), Just("udp".to_string()), Just("-1".to_string())],
        option::of(0i32..=65535),
        option::of(0i32..=65535),
        vec(
            (option::of(text()), option::of(text()), option::of(text())).prop_map(
                |(user_id, group_id, group_name)| UserIdGroupPair {
                    user_id,
                    group_id,
                    group_name,
                },
            ),
            0..3,
        ),
        vec(
            "[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}/[0-9]{1,2}"
                .prop_map(|cidr_ip| IpRange { cidr_ip }),
            0..3,
        ),
    )
        .prop_map(|(ip_protocol, from_port, to_port, groups, ip_ranges)| IpPermission {
            ip_protocol,
            from_port,
            to_port,
            groups,
            ip_ranges,
        })
}

proptest! {
    #[test]
    fn create_tags_roundtrips(
        resources in vec(resource_id(), 0..4),
        tags in vec(tag(), 0..4),
    ) {
        let request = CreateTags {
            resources_set: resources,
            tag_set: tags,
        };
        let xml = to_document_string(&request).unwrap();
        let back: CreateTags = from_document_str(&xml).unwrap();
        prop_assert_eq!(back, request);
    }

    #[test]
    fn delete_tags_roundtrips(
        resources in vec(resource_id(), 0..4),
        tags in vec(delete_tag(), 0..4),
    ) {
        let request = DeleteTags {
            resources_set: resources,
            tag_set: tags,
        };
        let xml = to_document_string(&request).unwrap();
        let back: DeleteTags = from_document_str(&xml).unwrap();
        prop_assert_eq!(back, request);
    }

    #[test]
    fn describe_tags_roundtrips(filters in vec(filter(), 0..4)) {
        let request = DescribeTags { filter_set: filters };
        let xml = to_document_string(&request).unwrap();
        let back: DescribeTags = from_document_str(&xml).unwrap();
        prop_assert_eq!(back, request);
    }

    #[test]
    fn instance_id_sets_roundtrip(ids in vec(resource_id(), 0..6), force in option::of(any::<bool>())) {
        let stop = StopInstances { instances_set: ids.clone(), force };
        let xml = to_document_string(&stop).unwrap();
        let back: StopInstances = from_document_str(&xml).unwrap();
        prop_assert_eq!(back, stop);

        let terminate = TerminateInstances { instances_set: ids };
        let xml = to_document_string(&terminate).unwrap();
        let back: TerminateInstances = from_document_str(&xml).unwrap();
        prop_assert_eq!(back, terminate);
    }

    #[test]
    fn ip_permissions_roundtrip(permissions in vec(ip_permission(), 0..3)) {
        let request = ec2_model::security::AuthorizeSecurityGroupIngress {
            user_id: None,
            group_id: Some("sg-deadbeef".to_string()),
            group_name: None,
            ip_permissions: permissions,
        };
        let xml = to_document_string(&request).unwrap();
        let back: ec2_model::security::AuthorizeSecurityGroupIngress =
            from_document_str(&xml).unwrap();
        prop_assert_eq!(back, request);
    }

    #[test]
    fn canonical_serialization_is_deterministic(tags in vec(tag(), 0..4)) {
        let request = CreateTags {
            resources_set: vec!["ami-00000000".to_string()],
            tag_set: tags,
        };
        let first = to_document_string(&request).unwrap();
        let second = to_document_string(&request).unwrap();
        prop_assert_eq!(first, second);
    }
}
