//! Choice-group behavior: exactly one alternative on the wire, rejection of
//! inputs that populate more than one.

use ec2_model::images::{
    ImageAttributeChange, LaunchPermission, LaunchPermissionChange, ModifyImageAttribute,
};
use ec2_model::instances::{BlockDeviceMapping, DeviceMapping, EbsBlockDevice, RunInstances};
use ec2_xml::{WireError, from_document_str, to_document_string};

const NS: &str = "http://ec2.amazonaws.com/doc/2012-08-15/";

fn launch_request(mapping: BlockDeviceMapping) -> RunInstances {
    RunInstances {
        image_id: "ami-60a54009".to_string(),
        min_count: 1,
        max_count: 1,
        key_name: None,
        group_set: vec![],
        user_data: None,
        instance_type: None,
        placement: None,
        kernel_id: None,
        ramdisk_id: None,
        block_device_mapping: vec![mapping],
        monitoring: None,
        subnet_id: None,
        disable_api_termination: None,
        instance_initiated_shutdown_behavior: None,
        private_ip_address: None,
        client_token: None,
        ebs_optimized: None,
    }
}

#[test]
fn virtual_name_alternative_serializes_alone() {
    let request = launch_request(BlockDeviceMapping {
        device_name: "/dev/sdb".to_string(),
        device: DeviceMapping::VirtualName("ephemeral0".to_string()),
    });
    let xml = to_document_string(&request).expect("serialize");
    assert!(xml.contains("<virtualName>ephemeral0</virtualName>"));
    assert!(!xml.contains("<ebs>"));
    assert!(!xml.contains("noDevice"));
}

#[test]
fn ebs_alternative_serializes_alone() {
    let request = launch_request(BlockDeviceMapping {
        device_name: "/dev/sdh".to_string(),
        device: DeviceMapping::Ebs(EbsBlockDevice {
            snapshot_id: Some("snap-1a2b3c4d".to_string()),
            volume_size: Some(100),
            delete_on_termination: Some(true),
        }),
    });
    let xml = to_document_string(&request).expect("serialize");
    assert!(xml.contains(
        "<ebs><snapshotId>snap-1a2b3c4d</snapshotId><volumeSize>100</volumeSize>\
         <deleteOnTermination>true</deleteOnTermination></ebs>"
    ));
    assert!(!xml.contains("virtualName"));
    let back: RunInstances = from_document_str(&xml).expect("parse");
    assert_eq!(back, request);
}

#[test]
fn no_device_round_trips_as_empty_element() {
    let request = launch_request(BlockDeviceMapping {
        device_name: "/dev/sdc".to_string(),
        device: DeviceMapping::NoDevice,
    });
    let xml = to_document_string(&request).expect("serialize");
    assert!(xml.contains("<noDevice/>"));
    let back: RunInstances = from_document_str(&xml).expect("parse");
    assert_eq!(
        back.block_device_mapping[0].device,
        DeviceMapping::NoDevice
    );
}

#[test]
fn two_alternatives_in_one_mapping_are_rejected() {
    let xml = format!(
        "<RunInstances xmlns=\"{NS}\"><imageId>ami-60a54009</imageId>\
         <minCount>1</minCount><maxCount>1</maxCount><groupSet></groupSet>\
         <blockDeviceMapping><item><deviceName>/dev/sdb</deviceName>\
         <virtualName>ephemeral0</virtualName><noDevice/>\
         </item></blockDeviceMapping></RunInstances>"
    );
    let err = from_document_str::<RunInstances>(&xml).unwrap_err();
    assert!(matches!(err, WireError::UnexpectedElement { .. }));
}

#[test]
fn mapping_with_no_alternative_is_rejected() {
    let xml = format!(
        "<RunInstances xmlns=\"{NS}\"><imageId>ami-60a54009</imageId>\
         <minCount>1</minCount><maxCount>1</maxCount><groupSet></groupSet>\
         <blockDeviceMapping><item><deviceName>/dev/sdb</deviceName>\
         </item></blockDeviceMapping></RunInstances>"
    );
    let err = from_document_str::<RunInstances>(&xml).unwrap_err();
    assert!(matches!(err, WireError::MissingElement { .. }));
}

#[test]
fn launch_permission_user_and_group_alternatives() {
    let request = ModifyImageAttribute {
        image_id: "ami-61a54008".to_string(),
        change: ImageAttributeChange::LaunchPermission(LaunchPermissionChange {
            add: vec![LaunchPermission::Group("all".to_string())],
            remove: vec![LaunchPermission::UserId("111122223333".to_string())],
        }),
    };
    let xml = to_document_string(&request).expect("serialize");
    assert!(xml.contains("<add><item><group>all</group></item></add>"));
    assert!(xml.contains(
        "<remove><item><userId>111122223333</userId></item></remove>"
    ));
    let back: ModifyImageAttribute = from_document_str(&xml).expect("parse");
    assert_eq!(back, request);
}

#[test]
fn image_attribute_alternatives_are_mutually_exclusive() {
    // description following launchPermission is a second choice alternative.
    let xml = format!(
        "<ModifyImageAttribute xmlns=\"{NS}\"><imageId>ami-61a54008</imageId>\
         <launchPermission><add><item><group>all</group></item></add></launchPermission>\
         <description><value>mine</value></description></ModifyImageAttribute>"
    );
    let err = from_document_str::<ModifyImageAttribute>(&xml).unwrap_err();
    assert!(matches!(err, WireError::UnexpectedElement { .. }));
}

#[test]
fn description_alternative_round_trips() {
    let request = ModifyImageAttribute {
        image_id: "ami-61a54008".to_string(),
        change: ImageAttributeChange::Description("Standard Web Server AMI".to_string()),
    };
    let xml = to_document_string(&request).expect("serialize");
    assert!(xml.contains("<description><value>Standard Web Server AMI</value></description>"));
    let back: ModifyImageAttribute = from_document_str(&xml).expect("parse");
    assert_eq!(back, request);
}

#[test]
fn product_codes_alternative_round_trips() {
    let request = ModifyImageAttribute {
        image_id: "ami-61a54008".to_string(),
        change: ImageAttributeChange::ProductCodes(vec!["774F4FF8".to_string()]),
    };
    let xml = to_document_string(&request).expect("serialize");
    assert!(xml.contains(
        "<productCodes><item><productCode>774F4FF8</productCode></item></productCodes>"
    ));
    let back: ModifyImageAttribute = from_document_str(&xml).expect("parse");
    assert_eq!(back, request);
}
