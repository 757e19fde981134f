//! Resource tagging operations: create, delete, describe.

use std::io::Write;

use ec2_xml::{FromXml, Result, ToXml, XmlDocument, XmlReader, XmlWriter};
use serde::{Deserialize, Serialize};

use crate::common::{
    Filter, ResourceTag, read_item_set, read_wrapped_string_set, try_read_item_set,
    write_item_set, write_item_set_if_any, write_wrapped_string_set,
};

/// A tag scheduled for deletion. An absent value deletes the tag regardless
/// of its value; an empty value deletes only the empty-string value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteTag {
    pub key: String,
    pub value: Option<String>,
}

impl ToXml for DeleteTag {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("key", &self.key)?;
        w.opt_text_element("value", self.value.as_deref())?;
        w.end()
    }
}

impl FromXml for DeleteTag {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let key = r.read_text_element("key")?;
        let value = r.try_read_text_element("value")?;
        r.read_end()?;
        Ok(Self { key, value })
    }
}

/// One tag binding in a describe-tags result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagSetItem {
    pub resource_id: String,
    /// `instance`, `volume`, `image`, `security-group`, …
    pub resource_type: String,
    pub key: String,
    pub value: String,
}

impl ToXml for TagSetItem {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("resourceId", &self.resource_id)?;
        w.text_element("resourceType", &self.resource_type)?;
        w.text_element("key", &self.key)?;
        w.text_element("value", &self.value)?;
        w.end()
    }
}

impl FromXml for TagSetItem {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let resource_id = r.read_text_element("resourceId")?;
        let resource_type = r.read_text_element("resourceType")?;
        let key = r.read_text_element("key")?;
        let value = r.read_text_element("value")?;
        r.read_end()?;
        Ok(Self {
            resource_id,
            resource_type,
            key,
            value,
        })
    }
}

/// Attach tags to resources.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CreateTags {
    pub resources_set: Vec<String>,
    pub tag_set: Vec<ResourceTag>,
}

impl ToXml for CreateTags {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        write_wrapped_string_set(w, "resourcesSet", "resourceId", &self.resources_set)?;
        write_item_set(w, "tagSet", &self.tag_set)?;
        w.end()
    }
}

impl FromXml for CreateTags {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let resources_set = read_wrapped_string_set(r, "resourcesSet", "resourceId")?;
        let tag_set = read_item_set(r, "tagSet")?;
        r.read_end()?;
        Ok(Self {
            resources_set,
            tag_set,
        })
    }
}

impl XmlDocument for CreateTags {
    const ELEMENT: &'static str = "CreateTags";
}

/// Acknowledgement of a tag creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTagsResponse {
    pub request_id: String,
    /// The wire element is named `return`.
    pub success: bool,
}

impl ToXml for CreateTagsResponse {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("requestId", &self.request_id)?;
        w.bool_element("return", self.success)?;
        w.end()
    }
}

impl FromXml for CreateTagsResponse {
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

impl XmlDocument for CreateTagsResponse {
    const ELEMENT: &'static str = "CreateTagsResponse";
}

/// Remove tags from resources.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeleteTags {
    pub resources_set: Vec<String>,
    pub tag_set: Vec<DeleteTag>,
}

impl ToXml for DeleteTags {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        write_wrapped_string_set(w, "resourcesSet", "resourceId", &self.resources_set)?;
        write_item_set(w, "tagSet", &self.tag_set)?;
        w.end()
    }
}

impl FromXml for DeleteTags {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let resources_set = read_wrapped_string_set(r, "resourcesSet", "resourceId")?;
        let tag_set = read_item_set(r, "tagSet")?;
        r.read_end()?;
        Ok(Self {
            resources_set,
            tag_set,
        })
    }
}

impl XmlDocument for DeleteTags {
    const ELEMENT: &'static str = "DeleteTags";
}

/// Acknowledgement of a tag deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteTagsResponse {
    pub request_id: String,
    /// The wire element is named `return`.
    pub success: bool,
}

impl ToXml for DeleteTagsResponse {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("requestId", &self.request_id)?;
        w.bool_element("return", self.success)?;
        w.end()
    }
}

impl FromXml for DeleteTagsResponse {
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

impl XmlDocument for DeleteTagsResponse {
    const ELEMENT: &'static str = "DeleteTagsResponse";
}

/// Describe tag bindings, optionally filtered.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DescribeTags {
    pub filter_set: Vec<Filter>,
}

impl ToXml for DescribeTags {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        write_item_set_if_any(w, "filterSet", &self.filter_set)?;
        w.end()
    }
}

impl FromXml for DescribeTags {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let filter_set = try_read_item_set(r, "filterSet")?;
        r.read_end()?;
        Ok(Self { filter_set })
    }
}

impl XmlDocument for DescribeTags {
    const ELEMENT: &'static str = "DescribeTags";
}

/// The tag bindings matching a describe call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescribeTagsResponse {
    pub request_id: String,
    pub tag_set: Vec<TagSetItem>,
}

impl ToXml for DescribeTagsResponse {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("requestId", &self.request_id)?;
        write_item_set(w, "tagSet", &self.tag_set)?;
        w.end()
    }
}

impl FromXml for DescribeTagsResponse {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let request_id = r.read_text_element("requestId")?;
        let tag_set = read_item_set(r, "tagSet")?;
        r.read_end()?;
        Ok(Self {
            request_id,
            tag_set,
        })
    }
}

impl XmlDocument for DescribeTagsResponse {
    const ELEMENT: &'static str = "DescribeTagsResponse";
}
