//! EBS volume operations: create, delete, attach, detach, describe.

use std::io::Write;

use chrono::{DateTime, Utc};
use ec2_xml::{FromXml, Result, ToXml, XmlDocument, XmlReader, XmlWriter};
use serde::{Deserialize, Serialize};

use crate::common::{
    Filter, ResourceTag, read_item_set, read_wrapped_string_set, try_read_item_set,
    write_item_set, write_item_set_if_any, write_wrapped_string_set,
};

/// A volume attachment as reported by attach, detach, and describe calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub volume_id: String,
    pub instance_id: String,
    pub device: String,
    pub status: String,
    pub attach_time: DateTime<Utc>,
    pub delete_on_termination: Option<bool>,
}

impl ToXml for Attachment {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("volumeId", &self.volume_id)?;
        w.text_element("instanceId", &self.instance_id)?;
        w.text_element("device", &self.device)?;
        w.text_element("status", &self.status)?;
        w.datetime_element("attachTime", &self.attach_time)?;
        w.opt_bool_element("deleteOnTermination", self.delete_on_termination)?;
        w.end()
    }
}

impl FromXml for Attachment {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let volume_id = r.read_text_element("volumeId")?;
        let instance_id = r.read_text_element("instanceId")?;
        let device = r.read_text_element("device")?;
        let status = r.read_text_element("status")?;
        let attach_time = r.read_datetime_element("attachTime")?;
        let delete_on_termination = r.try_read_bool_element("deleteOnTermination")?;
        r.read_end()?;
        Ok(Self {
            volume_id,
            instance_id,
            device,
            status,
            attach_time,
            delete_on_termination,
        })
    }
}

/// An EBS volume as the service describes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    pub volume_id: String,
    /// Size in GiB; a string on the wire.
    pub size: String,
    /// Empty when the volume was not created from a snapshot.
    pub snapshot_id: String,
    pub availability_zone: String,
    pub status: String,
    pub create_time: DateTime<Utc>,
    pub attachment_set: Vec<Attachment>,
    pub tag_set: Vec<ResourceTag>,
    pub volume_type: String,
    pub iops: Option<i32>,
}

impl ToXml for Volume {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("volumeId", &self.volume_id)?;
        w.text_element("size", &self.size)?;
        w.text_element("snapshotId", &self.snapshot_id)?;
        w.text_element("availabilityZone", &self.availability_zone)?;
        w.text_element("status", &self.status)?;
        w.datetime_element("createTime", &self.create_time)?;
        write_item_set(w, "attachmentSet", &self.attachment_set)?;
        write_item_set_if_any(w, "tagSet", &self.tag_set)?;
        w.text_element("volumeType", &self.volume_type)?;
        w.opt_i32_element("iops", self.iops)?;
        w.end()
    }
}

impl FromXml for Volume {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let volume_id = r.read_text_element("volumeId")?;
        let size = r.read_text_element("size")?;
        let snapshot_id = r.read_text_element("snapshotId")?;
        let availability_zone = r.read_text_element("availabilityZone")?;
        let status = r.read_text_element("status")?;
        let create_time = r.read_datetime_element("createTime")?;
        let attachment_set = read_item_set(r, "attachmentSet")?;
        let tag_set = try_read_item_set(r, "tagSet")?;
        let volume_type = r.read_text_element("volumeType")?;
        let iops = r.try_read_i32_element("iops")?;
        r.read_end()?;
        Ok(Self {
            volume_id,
            size,
            snapshot_id,
            availability_zone,
            status,
            create_time,
            attachment_set,
            tag_set,
            volume_type,
            iops,
        })
    }
}

/// Create an EBS volume, either empty or from a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateVolume {
    /// Size in GiB; required unless a snapshot supplies it.
    pub size: Option<String>,
    pub snapshot_id: Option<String>,
    pub availability_zone: String,
    pub volume_type: Option<String>,
    pub iops: Option<i32>,
}

impl ToXml for CreateVolume {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.opt_text_element("size", self.size.as_deref())?;
        w.opt_text_element("snapshotId", self.snapshot_id.as_deref())?;
        w.text_element("availabilityZone", &self.availability_zone)?;
        w.opt_text_element("volumeType", self.volume_type.as_deref())?;
        w.opt_i32_element("iops", self.iops)?;
        w.end()
    }
}

impl FromXml for CreateVolume {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let size = r.try_read_text_element("size")?;
        let snapshot_id = r.try_read_text_element("snapshotId")?;
        let availability_zone = r.read_text_element("availabilityZone")?;
        let volume_type = r.try_read_text_element("volumeType")?;
        let iops = r.try_read_i32_element("iops")?;
        r.read_end()?;
        Ok(Self {
            size,
            snapshot_id,
            availability_zone,
            volume_type,
            iops,
        })
    }
}

impl XmlDocument for CreateVolume {
    const ELEMENT: &'static str = "CreateVolume";
}

/// The volume that was created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateVolumeResponse {
    pub request_id: String,
    pub volume_id: String,
    pub size: String,
    pub snapshot_id: String,
    pub availability_zone: String,
    pub status: String,
    pub create_time: DateTime<Utc>,
    pub volume_type: String,
    pub iops: Option<i32>,
}

impl ToXml for CreateVolumeResponse {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("requestId", &self.request_id)?;
        w.text_element("volumeId", &self.volume_id)?;
        w.text_element("size", &self.size)?;
        w.text_element("snapshotId", &self.snapshot_id)?;
        w.text_element("availabilityZone", &self.availability_zone)?;
        w.text_element("status", &self.status)?;
        w.datetime_element("createTime", &self.create_time)?;
        w.text_element("volumeType", &self.volume_type)?;
        w.opt_i32_element("iops", self.iops)?;
        w.end()
    }
}

impl FromXml for CreateVolumeResponse {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let request_id = r.read_text_element("requestId")?;
        let volume_id = r.read_text_element("volumeId")?;
        let size = r.read_text_element("size")?;
        let snapshot_id = r.read_text_element("snapshotId")?;
        let availability_zone = r.read_text_element("availabilityZone")?;
        let status = r.read_text_element("status")?;
        let create_time = r.read_datetime_element("createTime")?;
        let volume_type = r.read_text_element("volumeType")?;
        let iops = r.try_read_i32_element("iops")?;
        r.read_end()?;
        Ok(Self {
            request_id,
            volume_id,
            size,
            snapshot_id,
            availability_zone,
            status,
            create_time,
            volume_type,
            iops,
        })
    }
}

impl XmlDocument for CreateVolumeResponse {
    const ELEMENT: &'static str = "CreateVolumeResponse";
}

/// Delete a volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteVolume {
    pub volume_id: String,
}

impl ToXml for DeleteVolume {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("volumeId", &self.volume_id)?;
        w.end()
    }
}

impl FromXml for DeleteVolume {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let volume_id = r.read_text_element("volumeId")?;
        r.read_end()?;
        Ok(Self { volume_id })
    }
}

impl XmlDocument for DeleteVolume {
    const ELEMENT: &'static str = "DeleteVolume";
}

/// Acknowledgement of a volume deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteVolumeResponse {
    pub request_id: String,
    /// The wire element is named `return`.
    pub success: bool,
}

impl ToXml for DeleteVolumeResponse {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("requestId", &self.request_id)?;
        w.bool_element("return", self.success)?;
        w.end()
    }
}

impl FromXml for DeleteVolumeResponse {
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

impl XmlDocument for DeleteVolumeResponse {
    const ELEMENT: &'static str = "DeleteVolumeResponse";
}

/// Attach a volume to an instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachVolume {
    pub volume_id: String,
    pub instance_id: String,
    pub device: String,
}

impl ToXml for AttachVolume {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("volumeId", &self.volume_id)?;
        w.text_element("instanceId", &self.instance_id)?;
        w.text_element("device", &self.device)?;
        w.end()
    }
}

impl FromXml for AttachVolume {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let volume_id = r.read_text_element("volumeId")?;
        let instance_id = r.read_text_element("instanceId")?;
        let device = r.read_text_element("device")?;
        r.read_end()?;
        Ok(Self {
            volume_id,
            instance_id,
            device,
        })
    }
}

impl XmlDocument for AttachVolume {
    const ELEMENT: &'static str = "AttachVolume";
}

/// The attachment in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachVolumeResponse {
    pub request_id: String,
    pub volume_id: String,
    pub instance_id: String,
    pub device: String,
    pub status: String,
    pub attach_time: DateTime<Utc>,
}

impl ToXml for AttachVolumeResponse {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("requestId", &self.request_id)?;
        w.text_element("volumeId", &self.volume_id)?;
        w.text_element("instanceId", &self.instance_id)?;
        w.text_element("device", &self.device)?;
        w.text_element("status", &self.status)?;
        w.datetime_element("attachTime", &self.attach_time)?;
        w.end()
    }
}

impl FromXml for AttachVolumeResponse {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let request_id = r.read_text_element("requestId")?;
        let volume_id = r.read_text_element("volumeId")?;
        let instance_id = r.read_text_element("instanceId")?;
        let device = r.read_text_element("device")?;
        let status = r.read_text_element("status")?;
        let attach_time = r.read_datetime_element("attachTime")?;
        r.read_end()?;
        Ok(Self {
            request_id,
            volume_id,
            instance_id,
            device,
            status,
            attach_time,
        })
    }
}

impl XmlDocument for AttachVolumeResponse {
    const ELEMENT: &'static str = "AttachVolumeResponse";
}

/// Detach a volume from an instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetachVolume {
    pub volume_id: String,
    pub instance_id: Option<String>,
    pub device: Option<String>,
    /// Force the detachment even if the instance does not release the volume.
    pub force: Option<bool>,
}

impl ToXml for DetachVolume {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("volumeId", &self.volume_id)?;
        w.opt_text_element("instanceId", self.instance_id.as_deref())?;
        w.opt_text_element("device", self.device.as_deref())?;
        w.opt_bool_element("force", self.force)?;
        w.end()
    }
}

impl FromXml for DetachVolume {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let volume_id = r.read_text_element("volumeId")?;
        let instance_id = r.try_read_text_element("instanceId")?;
        let device = r.try_read_text_element("device")?;
        let force = r.try_read_bool_element("force")?;
        r.read_end()?;
        Ok(Self {
            volume_id,
            instance_id,
            device,
            force,
        })
    }
}

impl XmlDocument for DetachVolume {
    const ELEMENT: &'static str = "DetachVolume";
}

/// The detachment in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetachVolumeResponse {
    pub request_id: String,
    pub volume_id: String,
    pub instance_id: String,
    pub device: String,
    pub status: String,
    pub attach_time: DateTime<Utc>,
}

impl ToXml for DetachVolumeResponse {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("requestId", &self.request_id)?;
        w.text_element("volumeId", &self.volume_id)?;
        w.text_element("instanceId", &self.instance_id)?;
        w.text_element("device", &self.device)?;
        w.text_element("status", &self.status)?;
        w.datetime_element("attachTime", &self.attach_time)?;
        w.end()
    }
}

impl FromXml for DetachVolumeResponse {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let request_id = r.read_text_element("requestId")?;
        let volume_id = r.read_text_element("volumeId")?;
        let instance_id = r.read_text_element("instanceId")?;
        let device = r.read_text_element("device")?;
        let status = r.read_text_element("status")?;
        let attach_time = r.read_datetime_element("attachTime")?;
        r.read_end()?;
        Ok(Self {
            request_id,
            volume_id,
            instance_id,
            device,
            status,
            attach_time,
        })
    }
}

impl XmlDocument for DetachVolumeResponse {
    const ELEMENT: &'static str = "DetachVolumeResponse";
}

/// Describe volumes, optionally restricted by id and filters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DescribeVolumes {
    pub volume_set: Vec<String>,
    pub filter_set: Vec<Filter>,
}

impl ToXml for DescribeVolumes {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        write_wrapped_string_set(w, "volumeSet", "volumeId", &self.volume_set)?;
        write_item_set_if_any(w, "filterSet", &self.filter_set)?;
        w.end()
    }
}

impl FromXml for DescribeVolumes {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let volume_set = read_wrapped_string_set(r, "volumeSet", "volumeId")?;
        let filter_set = try_read_item_set(r, "filterSet")?;
        r.read_end()?;
        Ok(Self {
            volume_set,
            filter_set,
        })
    }
}

impl XmlDocument for DescribeVolumes {
    const ELEMENT: &'static str = "DescribeVolumes";
}

/// The volumes matching a describe call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescribeVolumesResponse {
    pub request_id: String,
    pub volume_set: Vec<Volume>,
}

impl ToXml for DescribeVolumesResponse {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("requestId", &self.request_id)?;
        write_item_set(w, "volumeSet", &self.volume_set)?;
        w.end()
    }
}

impl FromXml for DescribeVolumesResponse {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let request_id = r.read_text_element("requestId")?;
        let volume_set = read_item_set(r, "volumeSet")?;
        r.read_end()?;
        Ok(Self {
            request_id,
            volume_set,
        })
    }
}

impl XmlDocument for DescribeVolumesResponse {
    const ELEMENT: &'static str = "DescribeVolumesResponse";
}
