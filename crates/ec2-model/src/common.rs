//! Types shared across API areas, and the set-element helpers every module
//! builds on.

use std::io::Write;

use ec2_xml::{FromXml, Result, ToXml, XmlReader, XmlWriter};
use serde::{Deserialize, Serialize};

/// A key/value tag attached to a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceTag {
    pub key: String,
    /// May legitimately be empty; an empty value is still a value.
    pub value: String,
}

impl ToXml for ResourceTag {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("key", &self.key)?;
        w.text_element("value", &self.value)?;
        w.end()
    }
}

impl FromXml for ResourceTag {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let key = r.read_text_element("key")?;
        let value = r.read_text_element("value")?;
        r.read_end()?;
        Ok(Self { key, value })
    }
}

/// A describe-call filter: a name and the values it matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub name: String,
    pub value_set: Vec<String>,
}

impl ToXml for Filter {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("name", &self.name)?;
        write_wrapped_string_set(w, "valueSet", "value", &self.value_set)?;
        w.end()
    }
}

impl FromXml for Filter {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let name = r.read_text_element("name")?;
        let value_set = read_wrapped_string_set(r, "valueSet", "value")?;
        r.read_end()?;
        Ok(Self { name, value_set })
    }
}

/// A security group reference as it appears in group sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupItem {
    pub group_id: Option<String>,
    pub group_name: Option<String>,
}

impl GroupItem {
    /// Reference a group by id.
    pub fn by_id(group_id: impl Into<String>) -> Self {
        Self {
            group_id: Some(group_id.into()),
            group_name: None,
        }
    }

    /// Reference a group by name.
    pub fn by_name(group_name: impl Into<String>) -> Self {
        Self {
            group_id: None,
            group_name: Some(group_name.into()),
        }
    }
}

impl ToXml for GroupItem {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.opt_text_element("groupId", self.group_id.as_deref())?;
        w.opt_text_element("groupName", self.group_name.as_deref())?;
        w.end()
    }
}

impl FromXml for GroupItem {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let group_id = r.try_read_text_element("groupId")?;
        let group_name = r.try_read_text_element("groupName")?;
        r.read_end()?;
        Ok(Self {
            group_id,
            group_name,
        })
    }
}

/// An instance lifecycle state: numeric code plus symbolic name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceState {
    /// Low byte of the state code; 0 pending, 16 running, 32 shutting-down,
    /// 48 terminated, 64 stopping, 80 stopped.
    pub code: i32,
    pub name: String,
}

impl ToXml for InstanceState {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.i32_element("code", self.code)?;
        w.text_element("name", &self.name)?;
        w.end()
    }
}

impl FromXml for InstanceState {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let code = r.read_i32_element("code")?;
        let name = r.read_text_element("name")?;
        r.read_end()?;
        Ok(Self { code, name })
    }
}

/// Where an instance runs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Placement {
    pub availability_zone: Option<String>,
    pub group_name: Option<String>,
    pub tenancy: Option<String>,
}

impl ToXml for Placement {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.opt_text_element("availabilityZone", self.availability_zone.as_deref())?;
        w.opt_text_element("groupName", self.group_name.as_deref())?;
        w.opt_text_element("tenancy", self.tenancy.as_deref())?;
        w.end()
    }
}

impl FromXml for Placement {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let availability_zone = r.try_read_text_element("availabilityZone")?;
        let group_name = r.try_read_text_element("groupName")?;
        let tenancy = r.try_read_text_element("tenancy")?;
        r.read_end()?;
        Ok(Self {
            availability_zone,
            group_name,
            tenancy,
        })
    }
}

/// A DevPay product code attached to an image or instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCode {
    pub product_code: String,
    pub code_type: Option<String>,
}

impl ToXml for ProductCode {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("productCode", &self.product_code)?;
        w.opt_text_element("type", self.code_type.as_deref())?;
        w.end()
    }
}

impl FromXml for ProductCode {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let product_code = r.read_text_element("productCode")?;
        let code_type = r.try_read_text_element("type")?;
        r.read_end()?;
        Ok(Self {
            product_code,
            code_type,
        })
    }
}

/// Why an instance moved to its current state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateReason {
    pub code: String,
    pub message: String,
}

impl ToXml for StateReason {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("code", &self.code)?;
        w.text_element("message", &self.message)?;
        w.end()
    }
}

impl FromXml for StateReason {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let code = r.read_text_element("code")?;
        let message = r.read_text_element("message")?;
        r.read_end()?;
        Ok(Self { code, message })
    }
}

/// Monitoring state as reported on a running instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceMonitoringState {
    /// `enabled`, `disabled`, or `pending`.
    pub state: String,
}

impl ToXml for InstanceMonitoringState {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("state", &self.state)?;
        w.end()
    }
}

impl FromXml for InstanceMonitoringState {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let state = r.read_text_element("state")?;
        r.read_end()?;
        Ok(Self { state })
    }
}

/// Write a `<name><item>…</item>…</name>` container.
pub(crate) fn write_item_set<W: Write, T: ToXml>(
    w: &mut XmlWriter<W>,
    name: &str,
    items: &[T],
) -> Result<()> {
    w.start(name)?;
    for item in items {
        item.to_xml(w, "item")?;
    }
    w.end()
}

/// Write an item container only when it has members. Optional containers are
/// canonically omitted when empty.
pub(crate) fn write_item_set_if_any<W: Write, T: ToXml>(
    w: &mut XmlWriter<W>,
    name: &str,
    items: &[T],
) -> Result<()> {
    if items.is_empty() {
        return Ok(());
    }
    write_item_set(w, name, items)
}

/// Read a required `<name><item>…</item>…</name>` container.
pub(crate) fn read_item_set<T: FromXml>(r: &mut XmlReader<'_>, name: &str) -> Result<Vec<T>> {
    r.read_start(name)?;
    let items = read_items(r)?;
    r.read_end()?;
    Ok(items)
}

/// Read an optional item container; absence decodes to an empty list.
pub(crate) fn try_read_item_set<T: FromXml>(
    r: &mut XmlReader<'_>,
    name: &str,
) -> Result<Vec<T>> {
    if !r.try_read_start(name)? {
        return Ok(Vec::new());
    }
    let items = read_items(r)?;
    r.read_end()?;
    Ok(items)
}

fn read_items<T: FromXml>(r: &mut XmlReader<'_>) -> Result<Vec<T>> {
    let mut items = Vec::new();
    while r.try_read_start("item")? {
        items.push(T::from_xml(r)?);
    }
    Ok(items)
}

/// Write a `<name><item><inner>value</inner></item>…</name>` container, the
/// shape the schema uses for lists of ids and names.
pub(crate) fn write_wrapped_string_set<W: Write>(
    w: &mut XmlWriter<W>,
    name: &str,
    inner: &str,
    values: &[String],
) -> Result<()> {
    w.start(name)?;
    for value in values {
        w.start("item")?;
        w.text_element(inner, value)?;
        w.end()?;
    }
    w.end()
}

/// Write a wrapped string container only when it has members.
pub(crate) fn write_wrapped_string_set_if_any<W: Write>(
    w: &mut XmlWriter<W>,
    name: &str,
    inner: &str,
    values: &[String],
) -> Result<()> {
    if values.is_empty() {
        return Ok(());
    }
    write_wrapped_string_set(w, name, inner, values)
}

/// Read a required wrapped string container.
pub(crate) fn read_wrapped_string_set(
    r: &mut XmlReader<'_>,
    name: &str,
    inner: &str,
) -> Result<Vec<String>> {
    r.read_start(name)?;
    let values = read_wrapped_items(r, inner)?;
    r.read_end()?;
    Ok(values)
}

/// Read an optional wrapped string container; absence decodes to empty.
pub(crate) fn try_read_wrapped_string_set(
    r: &mut XmlReader<'_>,
    name: &str,
    inner: &str,
) -> Result<Vec<String>> {
    if !r.try_read_start(name)? {
        return Ok(Vec::new());
    }
    let values = read_wrapped_items(r, inner)?;
    r.read_end()?;
    Ok(values)
}

fn read_wrapped_items(r: &mut XmlReader<'_>, inner: &str) -> Result<Vec<String>> {
    let mut values = Vec::new();
    while r.try_read_start("item")? {
        values.push(r.read_text_element(inner)?);
        r.read_end()?;
    }
    Ok(values)
}
