//! Machine image operations: describe and attribute modification.

use std::io::Write;

use ec2_xml::{FromXml, Result, ToXml, WireError, XmlDocument, XmlReader, XmlWriter};
use serde::{Deserialize, Serialize};

use crate::common::{
    Filter, ProductCode, ResourceTag, StateReason, read_item_set, read_wrapped_string_set,
    try_read_item_set, try_read_wrapped_string_set, write_item_set, write_item_set_if_any,
    write_wrapped_string_set, write_wrapped_string_set_if_any,
};
use crate::instances::BlockDeviceMapping;

/// A machine image as the service describes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub image_id: String,
    pub image_location: Option<String>,
    pub image_state: String,
    pub image_owner_id: String,
    pub is_public: bool,
    pub product_codes: Vec<ProductCode>,
    pub architecture: Option<String>,
    pub image_type: Option<String>,
    pub kernel_id: Option<String>,
    pub ramdisk_id: Option<String>,
    pub platform: Option<String>,
    pub state_reason: Option<StateReason>,
    pub image_owner_alias: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub root_device_type: Option<String>,
    pub root_device_name: Option<String>,
    pub block_device_mapping: Vec<BlockDeviceMapping>,
    pub virtualization_type: Option<String>,
    pub tag_set: Vec<ResourceTag>,
    pub hypervisor: Option<String>,
}

impl ToXml for Image {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("imageId", &self.image_id)?;
        w.opt_text_element("imageLocation", self.image_location.as_deref())?;
        w.text_element("imageState", &self.image_state)?;
        w.text_element("imageOwnerId", &self.image_owner_id)?;
        w.bool_element("isPublic", self.is_public)?;
        write_item_set_if_any(w, "productCodes", &self.product_codes)?;
        w.opt_text_element("architecture", self.architecture.as_deref())?;
        w.opt_text_element("imageType", self.image_type.as_deref())?;
        w.opt_text_element("kernelId", self.kernel_id.as_deref())?;
        w.opt_text_element("ramdiskId", self.ramdisk_id.as_deref())?;
        w.opt_text_element("platform", self.platform.as_deref())?;
        if let Some(state_reason) = &self.state_reason {
            state_reason.to_xml(w, "stateReason")?;
        }
        w.opt_text_element("imageOwnerAlias", self.image_owner_alias.as_deref())?;
        w.opt_text_element("name", self.name.as_deref())?;
        w.opt_text_element("description", self.description.as_deref())?;
        w.opt_text_element("rootDeviceType", self.root_device_type.as_deref())?;
        w.opt_text_element("rootDeviceName", self.root_device_name.as_deref())?;
        write_item_set_if_any(w, "blockDeviceMapping", &self.block_device_mapping)?;
        w.opt_text_element("virtualizationType", self.virtualization_type.as_deref())?;
        write_item_set_if_any(w, "tagSet", &self.tag_set)?;
        w.opt_text_element("hypervisor", self.hypervisor.as_deref())?;
        w.end()
    }
}

impl FromXml for Image {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let image_id = r.read_text_element("imageId")?;
        let image_location = r.try_read_text_element("imageLocation")?;
        let image_state = r.read_text_element("imageState")?;
        let image_owner_id = r.read_text_element("imageOwnerId")?;
        let is_public = r.read_bool_element("isPublic")?;
        let product_codes = try_read_item_set(r, "productCodes")?;
        let architecture = r.try_read_text_element("architecture")?;
        let image_type = r.try_read_text_element("imageType")?;
        let kernel_id = r.try_read_text_element("kernelId")?;
        let ramdisk_id = r.try_read_text_element("ramdiskId")?;
        let platform = r.try_read_text_element("platform")?;
        let state_reason = if r.try_read_start("stateReason")? {
            Some(StateReason::from_xml(r)?)
        } else {
            None
        };
        let image_owner_alias = r.try_read_text_element("imageOwnerAlias")?;
        let name = r.try_read_text_element("name")?;
        let description = r.try_read_text_element("description")?;
        let root_device_type = r.try_read_text_element("rootDeviceType")?;
        let root_device_name = r.try_read_text_element("rootDeviceName")?;
        let block_device_mapping = try_read_item_set(r, "blockDeviceMapping")?;
        let virtualization_type = r.try_read_text_element("virtualizationType")?;
        let tag_set = try_read_item_set(r, "tagSet")?;
        let hypervisor = r.try_read_text_element("hypervisor")?;
        r.read_end()?;
        Ok(Self {
            image_id,
            image_location,
            image_state,
            image_owner_id,
            is_public,
            product_codes,
            architecture,
            image_type,
            kernel_id,
            ramdisk_id,
            platform,
            state_reason,
            image_owner_alias,
            name,
            description,
            root_device_type,
            root_device_name,
            block_device_mapping,
            virtualization_type,
            tag_set,
            hypervisor,
        })
    }
}

/// Describe machine images visible to the caller.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DescribeImages {
    /// Restrict to images launchable by these users (`self`, `all`, or ids).
    pub executable_by_set: Vec<String>,
    pub images_set: Vec<String>,
    /// Restrict to images owned by these owners (`self`, `amazon`, or ids).
    pub owners_set: Vec<String>,
    pub filter_set: Vec<Filter>,
}

impl ToXml for DescribeImages {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        write_wrapped_string_set_if_any(w, "executableBySet", "user", &self.executable_by_set)?;
        write_wrapped_string_set_if_any(w, "imagesSet", "imageId", &self.images_set)?;
        write_wrapped_string_set_if_any(w, "ownersSet", "owner", &self.owners_set)?;
        write_item_set_if_any(w, "filterSet", &self.filter_set)?;
        w.end()
    }
}

impl FromXml for DescribeImages {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let executable_by_set = try_read_wrapped_string_set(r, "executableBySet", "user")?;
        let images_set = try_read_wrapped_string_set(r, "imagesSet", "imageId")?;
        let owners_set = try_read_wrapped_string_set(r, "ownersSet", "owner")?;
        let filter_set = try_read_item_set(r, "filterSet")?;
        r.read_end()?;
        Ok(Self {
            executable_by_set,
            images_set,
            owners_set,
            filter_set,
        })
    }
}

impl XmlDocument for DescribeImages {
    const ELEMENT: &'static str = "DescribeImages";
}

/// The images matching a describe call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescribeImagesResponse {
    pub request_id: String,
    pub images_set: Vec<Image>,
}

impl ToXml for DescribeImagesResponse {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("requestId", &self.request_id)?;
        write_item_set(w, "imagesSet", &self.images_set)?;
        w.end()
    }
}

impl FromXml for DescribeImagesResponse {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let request_id = r.read_text_element("requestId")?;
        let images_set = read_item_set(r, "imagesSet")?;
        r.read_end()?;
        Ok(Self {
            request_id,
            images_set,
        })
    }
}

impl XmlDocument for DescribeImagesResponse {
    const ELEMENT: &'static str = "DescribeImagesResponse";
}

/// The schema's launch-permission choice group: a permission names either a
/// single account or the `all` group, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LaunchPermission {
    UserId(String),
    Group(String),
}

impl ToXml for LaunchPermission {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        match self {
            Self::UserId(user_id) => w.text_element("userId", user_id)?,
            Self::Group(group) => w.text_element("group", group)?,
        }
        w.end()
    }
}

impl FromXml for LaunchPermission {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let child = r.peek_child_name()?;
        let permission = match child.as_deref() {
            Some("userId") => Self::UserId(r.read_text_element("userId")?),
            Some("group") => Self::Group(r.read_text_element("group")?),
            Some(other) => {
                return Err(WireError::unexpected_element("userId or group", other));
            }
            None => {
                return Err(WireError::missing_element(
                    "userId or group",
                    r.current_element(),
                ));
            }
        };
        r.read_end()?;
        Ok(permission)
    }
}

/// Launch permissions to grant and to withdraw.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LaunchPermissionChange {
    pub add: Vec<LaunchPermission>,
    pub remove: Vec<LaunchPermission>,
}

impl ToXml for LaunchPermissionChange {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        write_item_set_if_any(w, "add", &self.add)?;
        write_item_set_if_any(w, "remove", &self.remove)?;
        w.end()
    }
}

impl FromXml for LaunchPermissionChange {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let add = try_read_item_set(r, "add")?;
        let remove = try_read_item_set(r, "remove")?;
        r.read_end()?;
        Ok(Self { add, remove })
    }
}

/// The attribute being modified: the request-level choice group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImageAttributeChange {
    LaunchPermission(LaunchPermissionChange),
    ProductCodes(Vec<String>),
    Description(String),
}

/// Modify one attribute of a machine image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifyImageAttribute {
    pub image_id: String,
    pub change: ImageAttributeChange,
}

impl ToXml for ModifyImageAttribute {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("imageId", &self.image_id)?;
        match &self.change {
            ImageAttributeChange::LaunchPermission(change) => {
                change.to_xml(w, "launchPermission")?;
            }
            ImageAttributeChange::ProductCodes(codes) => {
                write_wrapped_string_set(w, "productCodes", "productCode", codes)?;
            }
            ImageAttributeChange::Description(description) => {
                w.start("description")?;
                w.text_element("value", description)?;
                w.end()?;
            }
        }
        w.end()
    }
}

impl FromXml for ModifyImageAttribute {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let image_id = r.read_text_element("imageId")?;
        let child = r.peek_child_name()?;
        let change = match child.as_deref() {
            Some("launchPermission") => {
                r.read_start("launchPermission")?;
                ImageAttributeChange::LaunchPermission(LaunchPermissionChange::from_xml(r)?)
            }
            Some("productCodes") => ImageAttributeChange::ProductCodes(
                read_wrapped_string_set(r, "productCodes", "productCode")?,
            ),
            Some("description") => {
                r.read_start("description")?;
                let value = r.read_text_element("value")?;
                r.read_end()?;
                ImageAttributeChange::Description(value)
            }
            Some(other) => {
                return Err(WireError::unexpected_element(
                    "one of launchPermission, productCodes, description",
                    other,
                ));
            }
            None => {
                return Err(WireError::missing_element(
                    "one of launchPermission, productCodes, description",
                    r.current_element(),
                ));
            }
        };
        r.read_end()?;
        Ok(Self { image_id, change })
    }
}

impl XmlDocument for ModifyImageAttribute {
    const ELEMENT: &'static str = "ModifyImageAttribute";
}

/// Acknowledgement of an attribute modification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifyImageAttributeResponse {
    pub request_id: String,
    /// The wire element is named `return`.
    pub success: bool,
}

impl ToXml for ModifyImageAttributeResponse {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("requestId", &self.request_id)?;
        w.bool_element("return", self.success)?;
        w.end()
    }
}

impl FromXml for ModifyImageAttributeResponse {
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

impl XmlDocument for ModifyImageAttributeResponse {
    const ELEMENT: &'static str = "ModifyImageAttributeResponse";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_permission_alternatives_are_exclusive() {
        // The enum admits one alternative at a time by construction; the
        // parser must reject an item carrying both.
        let xml = "<ModifyImageAttribute xmlns=\"http://ec2.amazonaws.com/doc/2012-08-15/\">\
                   <imageId>ami-1</imageId><launchPermission><add>\
                   <item><userId>123456789012</userId><group>all</group></item>\
                   </add></launchPermission></ModifyImageAttribute>";
        let err = ec2_xml::from_document_str::<ModifyImageAttribute>(xml).unwrap_err();
        assert!(matches!(err, WireError::UnexpectedElement { .. }));
    }
}
