//! Security group operations: create, delete, ingress rules, describe.

use std::io::Write;

use ec2_xml::{FromXml, Result, ToXml, XmlDocument, XmlReader, XmlWriter};
use serde::{Deserialize, Serialize};

use crate::common::{
    Filter, ResourceTag, read_item_set, read_wrapped_string_set, try_read_item_set,
    try_read_wrapped_string_set, write_item_set, write_item_set_if_any,
    write_wrapped_string_set, write_wrapped_string_set_if_any,
};

/// A source or destination security group in a permission rule.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserIdGroupPair {
    pub user_id: Option<String>,
    pub group_id: Option<String>,
    pub group_name: Option<String>,
}

impl ToXml for UserIdGroupPair {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.opt_text_element("userId", self.user_id.as_deref())?;
        w.opt_text_element("groupId", self.group_id.as_deref())?;
        w.opt_text_element("groupName", self.group_name.as_deref())?;
        w.end()
    }
}

impl FromXml for UserIdGroupPair {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let user_id = r.try_read_text_element("userId")?;
        let group_id = r.try_read_text_element("groupId")?;
        let group_name = r.try_read_text_element("groupName")?;
        r.read_end()?;
        Ok(Self {
            user_id,
            group_id,
            group_name,
        })
    }
}

/// A CIDR source or destination in a permission rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpRange {
    pub cidr_ip: String,
}

impl ToXml for IpRange {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("cidrIp", &self.cidr_ip)?;
        w.end()
    }
}

impl FromXml for IpRange {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let cidr_ip = r.read_text_element("cidrIp")?;
        r.read_end()?;
        Ok(Self { cidr_ip })
    }
}

/// One permission rule: protocol, port range, and its sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpPermission {
    /// `tcp`, `udp`, `icmp`, or `-1` for all protocols.
    pub ip_protocol: String,
    pub from_port: Option<i32>,
    pub to_port: Option<i32>,
    pub groups: Vec<UserIdGroupPair>,
    pub ip_ranges: Vec<IpRange>,
}

impl ToXml for IpPermission {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("ipProtocol", &self.ip_protocol)?;
        w.opt_i32_element("fromPort", self.from_port)?;
        w.opt_i32_element("toPort", self.to_port)?;
        write_item_set(w, "groups", &self.groups)?;
        write_item_set(w, "ipRanges", &self.ip_ranges)?;
        w.end()
    }
}

impl FromXml for IpPermission {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let ip_protocol = r.read_text_element("ipProtocol")?;
        let from_port = r.try_read_i32_element("fromPort")?;
        let to_port = r.try_read_i32_element("toPort")?;
        let groups = read_item_set(r, "groups")?;
        let ip_ranges = read_item_set(r, "ipRanges")?;
        r.read_end()?;
        Ok(Self {
            ip_protocol,
            from_port,
            to_port,
            groups,
            ip_ranges,
        })
    }
}

/// A security group as the service describes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityGroup {
    pub owner_id: String,
    pub group_id: String,
    pub group_name: String,
    pub group_description: String,
    pub vpc_id: Option<String>,
    pub ip_permissions: Vec<IpPermission>,
    pub ip_permissions_egress: Vec<IpPermission>,
    pub tag_set: Vec<ResourceTag>,
}

impl ToXml for SecurityGroup {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("ownerId", &self.owner_id)?;
        w.text_element("groupId", &self.group_id)?;
        w.text_element("groupName", &self.group_name)?;
        w.text_element("groupDescription", &self.group_description)?;
        w.opt_text_element("vpcId", self.vpc_id.as_deref())?;
        write_item_set(w, "ipPermissions", &self.ip_permissions)?;
        write_item_set(w, "ipPermissionsEgress", &self.ip_permissions_egress)?;
        write_item_set_if_any(w, "tagSet", &self.tag_set)?;
        w.end()
    }
}

impl FromXml for SecurityGroup {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let owner_id = r.read_text_element("ownerId")?;
        let group_id = r.read_text_element("groupId")?;
        let group_name = r.read_text_element("groupName")?;
        let group_description = r.read_text_element("groupDescription")?;
        let vpc_id = r.try_read_text_element("vpcId")?;
        let ip_permissions = read_item_set(r, "ipPermissions")?;
        let ip_permissions_egress = read_item_set(r, "ipPermissionsEgress")?;
        let tag_set = try_read_item_set(r, "tagSet")?;
        r.read_end()?;
        Ok(Self {
            owner_id,
            group_id,
            group_name,
            group_description,
            vpc_id,
            ip_permissions,
            ip_permissions_egress,
            tag_set,
        })
    }
}

/// Create a security group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSecurityGroup {
    pub group_name: String,
    pub group_description: String,
    /// Create in this VPC rather than EC2-Classic.
    pub vpc_id: Option<String>,
}

impl ToXml for CreateSecurityGroup {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("groupName", &self.group_name)?;
        w.text_element("groupDescription", &self.group_description)?;
        w.opt_text_element("vpcId", self.vpc_id.as_deref())?;
        w.end()
    }
}

impl FromXml for CreateSecurityGroup {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let group_name = r.read_text_element("groupName")?;
        let group_description = r.read_text_element("groupDescription")?;
        let vpc_id = r.try_read_text_element("vpcId")?;
        r.read_end()?;
        Ok(Self {
            group_name,
            group_description,
            vpc_id,
        })
    }
}

impl XmlDocument for CreateSecurityGroup {
    const ELEMENT: &'static str = "CreateSecurityGroup";
}

/// The created group's id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSecurityGroupResponse {
    pub request_id: String,
    /// The wire element is named `return`.
    pub success: bool,
    pub group_id: String,
}

impl ToXml for CreateSecurityGroupResponse {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("requestId", &self.request_id)?;
        w.bool_element("return", self.success)?;
        w.text_element("groupId", &self.group_id)?;
        w.end()
    }
}

impl FromXml for CreateSecurityGroupResponse {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let request_id = r.read_text_element("requestId")?;
        let success = r.read_bool_element("return")?;
        let group_id = r.read_text_element("groupId")?;
        r.read_end()?;
        Ok(Self {
            request_id,
            success,
            group_id,
        })
    }
}

impl XmlDocument for CreateSecurityGroupResponse {
    const ELEMENT: &'static str = "CreateSecurityGroupResponse";
}

/// Delete a security group, referenced by id or by name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeleteSecurityGroup {
    pub group_id: Option<String>,
    pub group_name: Option<String>,
}

impl ToXml for DeleteSecurityGroup {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.opt_text_element("groupId", self.group_id.as_deref())?;
        w.opt_text_element("groupName", self.group_name.as_deref())?;
        w.end()
    }
}

impl FromXml for DeleteSecurityGroup {
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

impl XmlDocument for DeleteSecurityGroup {
    const ELEMENT: &'static str = "DeleteSecurityGroup";
}

/// Acknowledgement of a group deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteSecurityGroupResponse {
    pub request_id: String,
    /// The wire element is named `return`.
    pub success: bool,
}

impl ToXml for DeleteSecurityGroupResponse {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("requestId", &self.request_id)?;
        w.bool_element("return", self.success)?;
        w.end()
    }
}

impl FromXml for DeleteSecurityGroupResponse {
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

impl XmlDocument for DeleteSecurityGroupResponse {
    const ELEMENT: &'static str = "DeleteSecurityGroupResponse";
}

/// Grant ingress rules to a security group.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AuthorizeSecurityGroupIngress {
    pub user_id: Option<String>,
    pub group_id: Option<String>,
    pub group_name: Option<String>,
    pub ip_permissions: Vec<IpPermission>,
}

impl ToXml for AuthorizeSecurityGroupIngress {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.opt_text_element("userId", self.user_id.as_deref())?;
        w.opt_text_element("groupId", self.group_id.as_deref())?;
        w.opt_text_element("groupName", self.group_name.as_deref())?;
        write_item_set(w, "ipPermissions", &self.ip_permissions)?;
        w.end()
    }
}

impl FromXml for AuthorizeSecurityGroupIngress {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let user_id = r.try_read_text_element("userId")?;
        let group_id = r.try_read_text_element("groupId")?;
        let group_name = r.try_read_text_element("groupName")?;
        let ip_permissions = read_item_set(r, "ipPermissions")?;
        r.read_end()?;
        Ok(Self {
            user_id,
            group_id,
            group_name,
            ip_permissions,
        })
    }
}

impl XmlDocument for AuthorizeSecurityGroupIngress {
    const ELEMENT: &'static str = "AuthorizeSecurityGroupIngress";
}

/// Acknowledgement of an ingress grant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorizeSecurityGroupIngressResponse {
    pub request_id: String,
    /// The wire element is named `return`.
    pub success: bool,
}

impl ToXml for AuthorizeSecurityGroupIngressResponse {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("requestId", &self.request_id)?;
        w.bool_element("return", self.success)?;
        w.end()
    }
}

impl FromXml for AuthorizeSecurityGroupIngressResponse {
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

impl XmlDocument for AuthorizeSecurityGroupIngressResponse {
    const ELEMENT: &'static str = "AuthorizeSecurityGroupIngressResponse";
}

/// Withdraw ingress rules from a security group.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RevokeSecurityGroupIngress {
    pub user_id: Option<String>,
    pub group_id: Option<String>,
    pub group_name: Option<String>,
    pub ip_permissions: Vec<IpPermission>,
}

impl ToXml for RevokeSecurityGroupIngress {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.opt_text_element("userId", self.user_id.as_deref())?;
        w.opt_text_element("groupId", self.group_id.as_deref())?;
        w.opt_text_element("groupName", self.group_name.as_deref())?;
        write_item_set(w, "ipPermissions", &self.ip_permissions)?;
        w.end()
    }
}

impl FromXml for RevokeSecurityGroupIngress {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let user_id = r.try_read_text_element("userId")?;
        let group_id = r.try_read_text_element("groupId")?;
        let group_name = r.try_read_text_element("groupName")?;
        let ip_permissions = read_item_set(r, "ipPermissions")?;
        r.read_end()?;
        Ok(Self {
            user_id,
            group_id,
            group_name,
            ip_permissions,
        })
    }
}

impl XmlDocument for RevokeSecurityGroupIngress {
    const ELEMENT: &'static str = "RevokeSecurityGroupIngress";
}

/// Acknowledgement of an ingress withdrawal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevokeSecurityGroupIngressResponse {
    pub request_id: String,
    /// The wire element is named `return`.
    pub success: bool,
}

impl ToXml for RevokeSecurityGroupIngressResponse {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("requestId", &self.request_id)?;
        w.bool_element("return", self.success)?;
        w.end()
    }
}

impl FromXml for RevokeSecurityGroupIngressResponse {
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

impl XmlDocument for RevokeSecurityGroupIngressResponse {
    const ELEMENT: &'static str = "RevokeSecurityGroupIngressResponse";
}

/// Describe security groups, by name, id, and filters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DescribeSecurityGroups {
    pub security_group_set: Vec<String>,
    pub security_group_id_set: Vec<String>,
    pub filter_set: Vec<Filter>,
}

impl ToXml for DescribeSecurityGroups {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        write_wrapped_string_set(w, "securityGroupSet", "groupName", &self.security_group_set)?;
        write_wrapped_string_set_if_any(
            w,
            "securityGroupIdSet",
            "groupId",
            &self.security_group_id_set,
        )?;
        write_item_set_if_any(w, "filterSet", &self.filter_set)?;
        w.end()
    }
}

impl FromXml for DescribeSecurityGroups {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let security_group_set =
            read_wrapped_string_set(r, "securityGroupSet", "groupName")?;
        let security_group_id_set =
            try_read_wrapped_string_set(r, "securityGroupIdSet", "groupId")?;
        let filter_set = try_read_item_set(r, "filterSet")?;
        r.read_end()?;
        Ok(Self {
            security_group_set,
            security_group_id_set,
            filter_set,
        })
    }
}

impl XmlDocument for DescribeSecurityGroups {
    const ELEMENT: &'static str = "DescribeSecurityGroups";
}

/// The groups matching a describe call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescribeSecurityGroupsResponse {
    pub request_id: String,
    pub security_group_info: Vec<SecurityGroup>,
}

impl ToXml for DescribeSecurityGroupsResponse {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("requestId", &self.request_id)?;
        write_item_set(w, "securityGroupInfo", &self.security_group_info)?;
        w.end()
    }
}

impl FromXml for DescribeSecurityGroupsResponse {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let request_id = r.read_text_element("requestId")?;
        let security_group_info = read_item_set(r, "securityGroupInfo")?;
        r.read_end()?;
        Ok(Self {
            request_id,
            security_group_info,
        })
    }
}

impl XmlDocument for DescribeSecurityGroupsResponse {
    const ELEMENT: &'static str = "DescribeSecurityGroupsResponse";
}
