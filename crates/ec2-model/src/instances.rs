//! Instance lifecycle operations: launch, describe, state changes, and
//! console output.

use std::io::Write;

use chrono::{DateTime, Utc};
use ec2_xml::{FromXml, Result, ToXml, WireError, XmlDocument, XmlReader, XmlWriter};
use serde::{Deserialize, Serialize};

use crate::common::{
    Filter, GroupItem, InstanceMonitoringState, InstanceState, Placement, ProductCode,
    ResourceTag, StateReason, read_item_set, read_wrapped_string_set, try_read_item_set,
    write_item_set, write_item_set_if_any, write_wrapped_string_set,
};

/// Detailed monitoring flag on a launch request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringRequest {
    pub enabled: bool,
}

impl ToXml for MonitoringRequest {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.bool_element("enabled", self.enabled)?;
        w.end()
    }
}

impl FromXml for MonitoringRequest {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let enabled = r.read_bool_element("enabled")?;
        r.read_end()?;
        Ok(Self { enabled })
    }
}

/// EBS settings for a device in a launch-time block device mapping.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EbsBlockDevice {
    pub snapshot_id: Option<String>,
    pub volume_size: Option<i32>,
    pub delete_on_termination: Option<bool>,
}

impl ToXml for EbsBlockDevice {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.opt_text_element("snapshotId", self.snapshot_id.as_deref())?;
        w.opt_i32_element("volumeSize", self.volume_size)?;
        w.opt_bool_element("deleteOnTermination", self.delete_on_termination)?;
        w.end()
    }
}

impl FromXml for EbsBlockDevice {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let snapshot_id = r.try_read_text_element("snapshotId")?;
        let volume_size = r.try_read_i32_element("volumeSize")?;
        let delete_on_termination = r.try_read_bool_element("deleteOnTermination")?;
        r.read_end()?;
        Ok(Self {
            snapshot_id,
            volume_size,
            delete_on_termination,
        })
    }
}

/// The schema's block-device-mapping choice group: exactly one of a virtual
/// (ephemeral) device name, an EBS volume description, or a suppressed
/// device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DeviceMapping {
    VirtualName(String),
    Ebs(EbsBlockDevice),
    NoDevice,
}

/// One entry in a launch-time block device mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockDeviceMapping {
    pub device_name: String,
    pub device: DeviceMapping,
}

impl ToXml for BlockDeviceMapping {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("deviceName", &self.device_name)?;
        match &self.device {
            DeviceMapping::VirtualName(virtual_name) => {
                w.text_element("virtualName", virtual_name)?;
            }
            DeviceMapping::Ebs(ebs) => ebs.to_xml(w, "ebs")?,
            DeviceMapping::NoDevice => w.empty_element("noDevice")?,
        }
        w.end()
    }
}

impl FromXml for BlockDeviceMapping {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let device_name = r.read_text_element("deviceName")?;
        let child = r.peek_child_name()?;
        let device = match child.as_deref() {
            Some("virtualName") => {
                DeviceMapping::VirtualName(r.read_text_element("virtualName")?)
            }
            Some("ebs") => {
                r.read_start("ebs")?;
                DeviceMapping::Ebs(EbsBlockDevice::from_xml(r)?)
            }
            Some("noDevice") => {
                r.read_start("noDevice")?;
                r.read_end()?;
                DeviceMapping::NoDevice
            }
            Some(other) => {
                return Err(WireError::unexpected_element(
                    "one of virtualName, ebs, noDevice",
                    other,
                ));
            }
            None => {
                return Err(WireError::missing_element(
                    "one of virtualName, ebs, noDevice",
                    r.current_element(),
                ));
            }
        };
        r.read_end()?;
        Ok(Self {
            device_name,
            device,
        })
    }
}

/// EBS attachment details as reported on a running instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EbsInstanceBlockDevice {
    pub volume_id: String,
    pub status: String,
    pub attach_time: DateTime<Utc>,
    pub delete_on_termination: Option<bool>,
}

impl ToXml for EbsInstanceBlockDevice {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("volumeId", &self.volume_id)?;
        w.text_element("status", &self.status)?;
        w.datetime_element("attachTime", &self.attach_time)?;
        w.opt_bool_element("deleteOnTermination", self.delete_on_termination)?;
        w.end()
    }
}

impl FromXml for EbsInstanceBlockDevice {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let volume_id = r.read_text_element("volumeId")?;
        let status = r.read_text_element("status")?;
        let attach_time = r.read_datetime_element("attachTime")?;
        let delete_on_termination = r.try_read_bool_element("deleteOnTermination")?;
        r.read_end()?;
        Ok(Self {
            volume_id,
            status,
            attach_time,
            delete_on_termination,
        })
    }
}

/// One entry in a running instance's block device mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceBlockDeviceMapping {
    pub device_name: String,
    pub ebs: EbsInstanceBlockDevice,
}

impl ToXml for InstanceBlockDeviceMapping {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("deviceName", &self.device_name)?;
        self.ebs.to_xml(w, "ebs")?;
        w.end()
    }
}

impl FromXml for InstanceBlockDeviceMapping {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let device_name = r.read_text_element("deviceName")?;
        r.read_start("ebs")?;
        let ebs = EbsInstanceBlockDevice::from_xml(r)?;
        r.read_end()?;
        Ok(Self { device_name, ebs })
    }
}

/// A launched instance as the service describes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunningInstance {
    pub instance_id: String,
    pub image_id: String,
    pub instance_state: InstanceState,
    pub private_dns_name: String,
    pub dns_name: String,
    pub reason: Option<String>,
    pub key_name: Option<String>,
    pub ami_launch_index: Option<String>,
    pub product_codes: Vec<ProductCode>,
    pub instance_type: String,
    pub launch_time: DateTime<Utc>,
    pub placement: Option<Placement>,
    pub kernel_id: Option<String>,
    pub ramdisk_id: Option<String>,
    pub platform: Option<String>,
    pub monitoring: Option<InstanceMonitoringState>,
    pub subnet_id: Option<String>,
    pub vpc_id: Option<String>,
    pub private_ip_address: Option<String>,
    pub ip_address: Option<String>,
    pub source_dest_check: Option<bool>,
    pub group_set: Vec<GroupItem>,
    pub state_reason: Option<StateReason>,
    pub architecture: Option<String>,
    pub root_device_type: Option<String>,
    pub root_device_name: Option<String>,
    pub block_device_mapping: Vec<InstanceBlockDeviceMapping>,
    pub virtualization_type: Option<String>,
    pub client_token: Option<String>,
    pub tag_set: Vec<ResourceTag>,
    pub hypervisor: Option<String>,
    pub ebs_optimized: Option<bool>,
}

impl ToXml for RunningInstance {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("instanceId", &self.instance_id)?;
        w.text_element("imageId", &self.image_id)?;
        self.instance_state.to_xml(w, "instanceState")?;
        w.text_element("privateDnsName", &self.private_dns_name)?;
        w.text_element("dnsName", &self.dns_name)?;
        w.opt_text_element("reason", self.reason.as_deref())?;
        w.opt_text_element("keyName", self.key_name.as_deref())?;
        w.opt_text_element("amiLaunchIndex", self.ami_launch_index.as_deref())?;
        write_item_set_if_any(w, "productCodes", &self.product_codes)?;
        w.text_element("instanceType", &self.instance_type)?;
        w.datetime_element("launchTime", &self.launch_time)?;
        if let Some(placement) = &self.placement {
            placement.to_xml(w, "placement")?;
        }
        w.opt_text_element("kernelId", self.kernel_id.as_deref())?;
        w.opt_text_element("ramdiskId", self.ramdisk_id.as_deref())?;
        w.opt_text_element("platform", self.platform.as_deref())?;
        if let Some(monitoring) = &self.monitoring {
            monitoring.to_xml(w, "monitoring")?;
        }
        w.opt_text_element("subnetId", self.subnet_id.as_deref())?;
        w.opt_text_element("vpcId", self.vpc_id.as_deref())?;
        w.opt_text_element("privateIpAddress", self.private_ip_address.as_deref())?;
        w.opt_text_element("ipAddress", self.ip_address.as_deref())?;
        w.opt_bool_element("sourceDestCheck", self.source_dest_check)?;
        write_item_set(w, "groupSet", &self.group_set)?;
        if let Some(state_reason) = &self.state_reason {
            state_reason.to_xml(w, "stateReason")?;
        }
        w.opt_text_element("architecture", self.architecture.as_deref())?;
        w.opt_text_element("rootDeviceType", self.root_device_type.as_deref())?;
        w.opt_text_element("rootDeviceName", self.root_device_name.as_deref())?;
        write_item_set_if_any(w, "blockDeviceMapping", &self.block_device_mapping)?;
        w.opt_text_element("virtualizationType", self.virtualization_type.as_deref())?;
        w.opt_text_element("clientToken", self.client_token.as_deref())?;
        write_item_set_if_any(w, "tagSet", &self.tag_set)?;
        w.opt_text_element("hypervisor", self.hypervisor.as_deref())?;
        w.opt_bool_element("ebsOptimized", self.ebs_optimized)?;
        w.end()
    }
}

impl FromXml for RunningInstance {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let instance_id = r.read_text_element("instanceId")?;
        let image_id = r.read_text_element("imageId")?;
        r.read_start("instanceState")?;
        let instance_state = InstanceState::from_xml(r)?;
        let private_dns_name = r.read_text_element("privateDnsName")?;
        let dns_name = r.read_text_element("dnsName")?;
        let reason = r.try_read_text_element("reason")?;
        let key_name = r.try_read_text_element("keyName")?;
        let ami_launch_index = r.try_read_text_element("amiLaunchIndex")?;
        let product_codes = try_read_item_set(r, "productCodes")?;
        let instance_type = r.read_text_element("instanceType")?;
        let launch_time = r.read_datetime_element("launchTime")?;
        let placement = if r.try_read_start("placement")? {
            Some(Placement::from_xml(r)?)
        } else {
            None
        };
        let kernel_id = r.try_read_text_element("kernelId")?;
        let ramdisk_id = r.try_read_text_element("ramdiskId")?;
        let platform = r.try_read_text_element("platform")?;
        let monitoring = if r.try_read_start("monitoring")? {
            Some(InstanceMonitoringState::from_xml(r)?)
        } else {
            None
        };
        let subnet_id = r.try_read_text_element("subnetId")?;
        let vpc_id = r.try_read_text_element("vpcId")?;
        let private_ip_address = r.try_read_text_element("privateIpAddress")?;
        let ip_address = r.try_read_text_element("ipAddress")?;
        let source_dest_check = r.try_read_bool_element("sourceDestCheck")?;
        let group_set = read_item_set(r, "groupSet")?;
        let state_reason = if r.try_read_start("stateReason")? {
            Some(StateReason::from_xml(r)?)
        } else {
            None
        };
        let architecture = r.try_read_text_element("architecture")?;
        let root_device_type = r.try_read_text_element("rootDeviceType")?;
        let root_device_name = r.try_read_text_element("rootDeviceName")?;
        let block_device_mapping = try_read_item_set(r, "blockDeviceMapping")?;
        let virtualization_type = r.try_read_text_element("virtualizationType")?;
        let client_token = r.try_read_text_element("clientToken")?;
        let tag_set = try_read_item_set(r, "tagSet")?;
        let hypervisor = r.try_read_text_element("hypervisor")?;
        let ebs_optimized = r.try_read_bool_element("ebsOptimized")?;
        r.read_end()?;
        Ok(Self {
            instance_id,
            image_id,
            instance_state,
            private_dns_name,
            dns_name,
            reason,
            key_name,
            ami_launch_index,
            product_codes,
            instance_type,
            launch_time,
            placement,
            kernel_id,
            ramdisk_id,
            platform,
            monitoring,
            subnet_id,
            vpc_id,
            private_ip_address,
            ip_address,
            source_dest_check,
            group_set,
            state_reason,
            architecture,
            root_device_type,
            root_device_name,
            block_device_mapping,
            virtualization_type,
            client_token,
            tag_set,
            hypervisor,
            ebs_optimized,
        })
    }
}

/// One reservation: the instances a single launch produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub reservation_id: String,
    pub owner_id: String,
    pub group_set: Vec<GroupItem>,
    pub instances_set: Vec<RunningInstance>,
    pub requester_id: Option<String>,
}

impl ToXml for Reservation {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("reservationId", &self.reservation_id)?;
        w.text_element("ownerId", &self.owner_id)?;
        write_item_set(w, "groupSet", &self.group_set)?;
        write_item_set(w, "instancesSet", &self.instances_set)?;
        w.opt_text_element("requesterId", self.requester_id.as_deref())?;
        w.end()
    }
}

impl FromXml for Reservation {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let reservation_id = r.read_text_element("reservationId")?;
        let owner_id = r.read_text_element("ownerId")?;
        let group_set = read_item_set(r, "groupSet")?;
        let instances_set = read_item_set(r, "instancesSet")?;
        let requester_id = r.try_read_text_element("requesterId")?;
        r.read_end()?;
        Ok(Self {
            reservation_id,
            owner_id,
            group_set,
            instances_set,
            requester_id,
        })
    }
}

/// A state transition reported by terminate, start, and stop calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceStateChange {
    pub instance_id: String,
    pub current_state: InstanceState,
    pub previous_state: InstanceState,
}

impl ToXml for InstanceStateChange {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("instanceId", &self.instance_id)?;
        self.current_state.to_xml(w, "currentState")?;
        self.previous_state.to_xml(w, "previousState")?;
        w.end()
    }
}

impl FromXml for InstanceStateChange {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let instance_id = r.read_text_element("instanceId")?;
        r.read_start("currentState")?;
        let current_state = InstanceState::from_xml(r)?;
        r.read_start("previousState")?;
        let previous_state = InstanceState::from_xml(r)?;
        r.read_end()?;
        Ok(Self {
            instance_id,
            current_state,
            previous_state,
        })
    }
}

/// Launch instances of an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunInstances {
    pub image_id: String,
    pub min_count: i32,
    pub max_count: i32,
    pub key_name: Option<String>,
    pub group_set: Vec<GroupItem>,
    /// Base64 user data, delivered as the `data` child of `userData`.
    pub user_data: Option<String>,
    pub instance_type: Option<String>,
    pub placement: Option<Placement>,
    pub kernel_id: Option<String>,
    pub ramdisk_id: Option<String>,
    pub block_device_mapping: Vec<BlockDeviceMapping>,
    pub monitoring: Option<MonitoringRequest>,
    pub subnet_id: Option<String>,
    pub disable_api_termination: Option<bool>,
    pub instance_initiated_shutdown_behavior: Option<String>,
    pub private_ip_address: Option<String>,
    pub client_token: Option<String>,
    pub ebs_optimized: Option<bool>,
}

impl ToXml for RunInstances {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("imageId", &self.image_id)?;
        w.i32_element("minCount", self.min_count)?;
        w.i32_element("maxCount", self.max_count)?;
        w.opt_text_element("keyName", self.key_name.as_deref())?;
        write_item_set(w, "groupSet", &self.group_set)?;
        if let Some(user_data) = &self.user_data {
            w.start("userData")?;
            if !user_data.is_empty() {
                w.text_element("data", user_data)?;
            }
            w.end()?;
        }
        w.opt_text_element("instanceType", self.instance_type.as_deref())?;
        if let Some(placement) = &self.placement {
            placement.to_xml(w, "placement")?;
        }
        w.opt_text_element("kernelId", self.kernel_id.as_deref())?;
        w.opt_text_element("ramdiskId", self.ramdisk_id.as_deref())?;
        write_item_set(w, "blockDeviceMapping", &self.block_device_mapping)?;
        if let Some(monitoring) = &self.monitoring {
            monitoring.to_xml(w, "monitoring")?;
        }
        w.opt_text_element("subnetId", self.subnet_id.as_deref())?;
        w.opt_bool_element("disableApiTermination", self.disable_api_termination)?;
        w.opt_text_element(
            "instanceInitiatedShutdownBehavior",
            self.instance_initiated_shutdown_behavior.as_deref(),
        )?;
        w.opt_text_element("privateIpAddress", self.private_ip_address.as_deref())?;
        w.opt_text_element("clientToken", self.client_token.as_deref())?;
        w.opt_bool_element("ebsOptimized", self.ebs_optimized)?;
        w.end()
    }
}

impl FromXml for RunInstances {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let image_id = r.read_text_element("imageId")?;
        let min_count = r.read_i32_element("minCount")?;
        let max_count = r.read_i32_element("maxCount")?;
        let key_name = r.try_read_text_element("keyName")?;
        let group_set = read_item_set(r, "groupSet")?;
        let user_data = if r.try_read_start("userData")? {
            let data = r.try_read_text_element("data")?;
            r.read_end()?;
            Some(data.unwrap_or_default())
        } else {
            None
        };
        let instance_type = r.try_read_text_element("instanceType")?;
        let placement = if r.try_read_start("placement")? {
            Some(Placement::from_xml(r)?)
        } else {
            None
        };
        let kernel_id = r.try_read_text_element("kernelId")?;
        let ramdisk_id = r.try_read_text_element("ramdiskId")?;
        let block_device_mapping = read_item_set(r, "blockDeviceMapping")?;
        let monitoring = if r.try_read_start("monitoring")? {
            Some(MonitoringRequest::from_xml(r)?)
        } else {
            None
        };
        let subnet_id = r.try_read_text_element("subnetId")?;
        let disable_api_termination = r.try_read_bool_element("disableApiTermination")?;
        let instance_initiated_shutdown_behavior =
            r.try_read_text_element("instanceInitiatedShutdownBehavior")?;
        let private_ip_address = r.try_read_text_element("privateIpAddress")?;
        let client_token = r.try_read_text_element("clientToken")?;
        let ebs_optimized = r.try_read_bool_element("ebsOptimized")?;
        r.read_end()?;
        Ok(Self {
            image_id,
            min_count,
            max_count,
            key_name,
            group_set,
            user_data,
            instance_type,
            placement,
            kernel_id,
            ramdisk_id,
            block_device_mapping,
            monitoring,
            subnet_id,
            disable_api_termination,
            instance_initiated_shutdown_behavior,
            private_ip_address,
            client_token,
            ebs_optimized,
        })
    }
}

impl XmlDocument for RunInstances {
    const ELEMENT: &'static str = "RunInstances";
}

/// The reservation created by a launch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunInstancesResponse {
    pub request_id: String,
    pub reservation_id: String,
    pub owner_id: String,
    pub group_set: Vec<GroupItem>,
    pub instances_set: Vec<RunningInstance>,
    pub requester_id: Option<String>,
}

impl ToXml for RunInstancesResponse {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("requestId", &self.request_id)?;
        w.text_element("reservationId", &self.reservation_id)?;
        w.text_element("ownerId", &self.owner_id)?;
        write_item_set(w, "groupSet", &self.group_set)?;
        write_item_set(w, "instancesSet", &self.instances_set)?;
        w.opt_text_element("requesterId", self.requester_id.as_deref())?;
        w.end()
    }
}

impl FromXml for RunInstancesResponse {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let request_id = r.read_text_element("requestId")?;
        let reservation_id = r.read_text_element("reservationId")?;
        let owner_id = r.read_text_element("ownerId")?;
        let group_set = read_item_set(r, "groupSet")?;
        let instances_set = read_item_set(r, "instancesSet")?;
        let requester_id = r.try_read_text_element("requesterId")?;
        r.read_end()?;
        Ok(Self {
            request_id,
            reservation_id,
            owner_id,
            group_set,
            instances_set,
            requester_id,
        })
    }
}

impl XmlDocument for RunInstancesResponse {
    const ELEMENT: &'static str = "RunInstancesResponse";
}

/// Describe launched instances, optionally restricted by id and filters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DescribeInstances {
    pub instances_set: Vec<String>,
    pub filter_set: Vec<Filter>,
}

impl ToXml for DescribeInstances {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        write_wrapped_string_set(w, "instancesSet", "instanceId", &self.instances_set)?;
        write_item_set_if_any(w, "filterSet", &self.filter_set)?;
        w.end()
    }
}

impl FromXml for DescribeInstances {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let instances_set = read_wrapped_string_set(r, "instancesSet", "instanceId")?;
        let filter_set = try_read_item_set(r, "filterSet")?;
        r.read_end()?;
        Ok(Self {
            instances_set,
            filter_set,
        })
    }
}

impl XmlDocument for DescribeInstances {
    const ELEMENT: &'static str = "DescribeInstances";
}

/// The reservations matching a describe call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescribeInstancesResponse {
    pub request_id: String,
    pub reservation_set: Vec<Reservation>,
}

impl ToXml for DescribeInstancesResponse {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("requestId", &self.request_id)?;
        write_item_set(w, "reservationSet", &self.reservation_set)?;
        w.end()
    }
}

impl FromXml for DescribeInstancesResponse {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let request_id = r.read_text_element("requestId")?;
        let reservation_set = read_item_set(r, "reservationSet")?;
        r.read_end()?;
        Ok(Self {
            request_id,
            reservation_set,
        })
    }
}

impl XmlDocument for DescribeInstancesResponse {
    const ELEMENT: &'static str = "DescribeInstancesResponse";
}

/// Terminate instances.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TerminateInstances {
    pub instances_set: Vec<String>,
}

impl ToXml for TerminateInstances {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        write_wrapped_string_set(w, "instancesSet", "instanceId", &self.instances_set)?;
        w.end()
    }
}

impl FromXml for TerminateInstances {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let instances_set = read_wrapped_string_set(r, "instancesSet", "instanceId")?;
        r.read_end()?;
        Ok(Self { instances_set })
    }
}

impl XmlDocument for TerminateInstances {
    const ELEMENT: &'static str = "TerminateInstances";
}

/// State transitions for terminated instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminateInstancesResponse {
    pub request_id: String,
    pub instances_set: Vec<InstanceStateChange>,
}

impl ToXml for TerminateInstancesResponse {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("requestId", &self.request_id)?;
        write_item_set(w, "instancesSet", &self.instances_set)?;
        w.end()
    }
}

impl FromXml for TerminateInstancesResponse {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let request_id = r.read_text_element("requestId")?;
        let instances_set = read_item_set(r, "instancesSet")?;
        r.read_end()?;
        Ok(Self {
            request_id,
            instances_set,
        })
    }
}

impl XmlDocument for TerminateInstancesResponse {
    const ELEMENT: &'static str = "TerminateInstancesResponse";
}

/// Start previously stopped EBS-backed instances.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StartInstances {
    pub instances_set: Vec<String>,
}

impl ToXml for StartInstances {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        write_wrapped_string_set(w, "instancesSet", "instanceId", &self.instances_set)?;
        w.end()
    }
}

impl FromXml for StartInstances {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let instances_set = read_wrapped_string_set(r, "instancesSet", "instanceId")?;
        r.read_end()?;
        Ok(Self { instances_set })
    }
}

impl XmlDocument for StartInstances {
    const ELEMENT: &'static str = "StartInstances";
}

/// State transitions for started instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartInstancesResponse {
    pub request_id: String,
    pub instances_set: Vec<InstanceStateChange>,
}

impl ToXml for StartInstancesResponse {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("requestId", &self.request_id)?;
        write_item_set(w, "instancesSet", &self.instances_set)?;
        w.end()
    }
}

impl FromXml for StartInstancesResponse {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let request_id = r.read_text_element("requestId")?;
        let instances_set = read_item_set(r, "instancesSet")?;
        r.read_end()?;
        Ok(Self {
            request_id,
            instances_set,
        })
    }
}

impl XmlDocument for StartInstancesResponse {
    const ELEMENT: &'static str = "StartInstancesResponse";
}

/// Stop running EBS-backed instances.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StopInstances {
    pub instances_set: Vec<String>,
    /// Force the stop without flushing file system caches.
    pub force: Option<bool>,
}

impl ToXml for StopInstances {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        write_wrapped_string_set(w, "instancesSet", "instanceId", &self.instances_set)?;
        w.opt_bool_element("force", self.force)?;
        w.end()
    }
}

impl FromXml for StopInstances {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let instances_set = read_wrapped_string_set(r, "instancesSet", "instanceId")?;
        let force = r.try_read_bool_element("force")?;
        r.read_end()?;
        Ok(Self {
            instances_set,
            force,
        })
    }
}

impl XmlDocument for StopInstances {
    const ELEMENT: &'static str = "StopInstances";
}

/// State transitions for stopped instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopInstancesResponse {
    pub request_id: String,
    pub instances_set: Vec<InstanceStateChange>,
}

impl ToXml for StopInstancesResponse {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("requestId", &self.request_id)?;
        write_item_set(w, "instancesSet", &self.instances_set)?;
        w.end()
    }
}

impl FromXml for StopInstancesResponse {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let request_id = r.read_text_element("requestId")?;
        let instances_set = read_item_set(r, "instancesSet")?;
        r.read_end()?;
        Ok(Self {
            request_id,
            instances_set,
        })
    }
}

impl XmlDocument for StopInstancesResponse {
    const ELEMENT: &'static str = "StopInstancesResponse";
}

/// Reboot running instances.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RebootInstances {
    pub instances_set: Vec<String>,
}

impl ToXml for RebootInstances {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        write_wrapped_string_set(w, "instancesSet", "instanceId", &self.instances_set)?;
        w.end()
    }
}

impl FromXml for RebootInstances {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let instances_set = read_wrapped_string_set(r, "instancesSet", "instanceId")?;
        r.read_end()?;
        Ok(Self { instances_set })
    }
}

impl XmlDocument for RebootInstances {
    const ELEMENT: &'static str = "RebootInstances";
}

/// Acknowledgement of a reboot request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebootInstancesResponse {
    pub request_id: String,
    /// The wire element is named `return`.
    pub success: bool,
}

impl ToXml for RebootInstancesResponse {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("requestId", &self.request_id)?;
        w.bool_element("return", self.success)?;
        w.end()
    }
}

impl FromXml for RebootInstancesResponse {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let request_id = r.read_text_element("requestId")?;
        let success = r.read_bool_element("return")?;
        r.read_end()?;
        Ok(Self {
            request_id,
            success,
        })
    }
}

impl XmlDocument for RebootInstancesResponse {
    const ELEMENT: &'static str = "RebootInstancesResponse";
}

/// Fetch an instance's console output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetConsoleOutput {
    pub instance_id: String,
}

impl ToXml for GetConsoleOutput {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("instanceId", &self.instance_id)?;
        w.end()
    }
}

impl FromXml for GetConsoleOutput {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let instance_id = r.read_text_element("instanceId")?;
        r.read_end()?;
        Ok(Self { instance_id })
    }
}

impl XmlDocument for GetConsoleOutput {
    const ELEMENT: &'static str = "GetConsoleOutput";
}

/// Console output snapshot: capture time plus base64 content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetConsoleOutputResponse {
    pub request_id: String,
    pub instance_id: String,
    pub timestamp: DateTime<Utc>,
    /// Base64-encoded console text, kept opaque.
    pub output: String,
}

impl ToXml for GetConsoleOutputResponse {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("requestId", &self.request_id)?;
        w.text_element("instanceId", &self.instance_id)?;
        w.datetime_element("timestamp", &self.timestamp)?;
        w.text_element("output", &self.output)?;
        w.end()
    }
}

impl FromXml for GetConsoleOutputResponse {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let request_id = r.read_text_element("requestId")?;
        let instance_id = r.read_text_element("instanceId")?;
        let timestamp = r.read_datetime_element("timestamp")?;
        let output = r.read_text_element("output")?;
        r.read_end()?;
        Ok(Self {
            request_id,
            instance_id,
            timestamp,
            output,
        })
    }
}

impl XmlDocument for GetConsoleOutputResponse {
    const ELEMENT: &'static str = "GetConsoleOutputResponse";
}
