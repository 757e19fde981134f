//! Key pair operations: create, delete, describe.

use std::io::Write;

use ec2_xml::{FromXml, Result, ToXml, XmlDocument, XmlReader, XmlWriter};
use serde::{Deserialize, Serialize};

use crate::common::{
    Filter, read_item_set, read_wrapped_string_set, try_read_item_set, write_item_set,
    write_item_set_if_any, write_wrapped_string_set,
};

/// A key pair as the service describes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyPair {
    pub key_name: String,
    pub key_fingerprint: String,
}

impl ToXml for KeyPair {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("keyName", &self.key_name)?;
        w.text_element("keyFingerprint", &self.key_fingerprint)?;
        w.end()
    }
}

impl FromXml for KeyPair {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let key_name = r.read_text_element("keyName")?;
        let key_fingerprint = r.read_text_element("keyFingerprint")?;
        r.read_end()?;
        Ok(Self {
            key_name,
            key_fingerprint,
        })
    }
}

/// Create a 2048-bit RSA key pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateKeyPair {
    pub key_name: String,
}

impl ToXml for CreateKeyPair {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("keyName", &self.key_name)?;
        w.end()
    }
}

impl FromXml for CreateKeyPair {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let key_name = r.read_text_element("keyName")?;
        r.read_end()?;
        Ok(Self { key_name })
    }
}

impl XmlDocument for CreateKeyPair {
    const ELEMENT: &'static str = "CreateKeyPair";
}

/// The created key pair, including its one-time private key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateKeyPairResponse {
    pub request_id: String,
    pub key_name: String,
    pub key_fingerprint: String,
    /// Unencrypted PEM-encoded private key; only ever returned here.
    pub key_material: String,
}

impl ToXml for CreateKeyPairResponse {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("requestId", &self.request_id)?;
        w.text_element("keyName", &self.key_name)?;
        w.text_element("keyFingerprint", &self.key_fingerprint)?;
        w.text_element("keyMaterial", &self.key_material)?;
        w.end()
    }
}

impl FromXml for CreateKeyPairResponse {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let request_id = r.read_text_element("requestId")?;
        let key_name = r.read_text_element("keyName")?;
        let key_fingerprint = r.read_text_element("keyFingerprint")?;
        let key_material = r.read_text_element("keyMaterial")?;
        r.read_end()?;
        Ok(Self {
            request_id,
            key_name,
            key_fingerprint,
            key_material,
        })
    }
}

impl XmlDocument for CreateKeyPairResponse {
    const ELEMENT: &'static str = "CreateKeyPairResponse";
}

/// Delete a key pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteKeyPair {
    pub key_name: String,
}

impl ToXml for DeleteKeyPair {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("keyName", &self.key_name)?;
        w.end()
    }
}

impl FromXml for DeleteKeyPair {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let key_name = r.read_text_element("keyName")?;
        r.read_end()?;
        Ok(Self { key_name })
    }
}

impl XmlDocument for DeleteKeyPair {
    const ELEMENT: &'static str = "DeleteKeyPair";
}

/// Acknowledgement of a key pair deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteKeyPairResponse {
    pub request_id: String,
    /// The wire element is named `return`.
    pub success: bool,
}

impl ToXml for DeleteKeyPairResponse {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("requestId", &self.request_id)?;
        w.bool_element("return", self.success)?;
        w.end()
    }
}

impl FromXml for DeleteKeyPairResponse {
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

impl XmlDocument for DeleteKeyPairResponse {
    const ELEMENT: &'static str = "DeleteKeyPairResponse";
}

/// Describe key pairs, optionally restricted by name and filters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DescribeKeyPairs {
    pub key_set: Vec<String>,
    pub filter_set: Vec<Filter>,
}

impl ToXml for DescribeKeyPairs {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        write_wrapped_string_set(w, "keySet", "keyName", &self.key_set)?;
        write_item_set_if_any(w, "filterSet", &self.filter_set)?;
        w.end()
    }
}

impl FromXml for DescribeKeyPairs {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let key_set = read_wrapped_string_set(r, "keySet", "keyName")?;
        let filter_set = try_read_item_set(r, "filterSet")?;
        r.read_end()?;
        Ok(Self {
            key_set,
            filter_set,
        })
    }
}

impl XmlDocument for DescribeKeyPairs {
    const ELEMENT: &'static str = "DescribeKeyPairs";
}

/// The key pairs matching a describe call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescribeKeyPairsResponse {
    pub request_id: String,
    pub key_set: Vec<KeyPair>,
}

impl ToXml for DescribeKeyPairsResponse {
    fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name)?;
        w.text_element("requestId", &self.request_id)?;
        write_item_set(w, "keySet", &self.key_set)?;
        w.end()
    }
}

impl FromXml for DescribeKeyPairsResponse {
    fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
        let request_id = r.read_text_element("requestId")?;
        let key_set = read_item_set(r, "keySet")?;
        r.read_end()?;
        Ok(Self {
            request_id,
            key_set,
        })
    }
}

impl XmlDocument for DescribeKeyPairsResponse {
    const ELEMENT: &'static str = "DescribeKeyPairsResponse";
}
