//! XML wire runtime for the Amazon EC2 SOAP API (2012-08-15).
//!
//! This crate carries the transport-independent half of the data binding:
//! the pull reader and event writer, the XSD scalar codecs, the
//! [`ToXml`]/[`FromXml`] traits implemented by the typed API shapes, and
//! SOAP 1.1 envelope framing. The typed shapes themselves live in the
//! `ec2-model` crate.
//!
//! # Example
//!
//! ```
//! use ec2_xml::{FromXml, Result, ToXml, XmlDocument, XmlReader, XmlWriter};
//! use std::io::Write;
//!
//! #[derive(Debug, PartialEq)]
//! struct DeleteKeyPair {
//!     key_name: String,
//! }
//!
//! impl ToXml for DeleteKeyPair {
//!     fn to_xml<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
//!         w.start(name)?;
//!         w.text_element("keyName", &self.key_name)?;
//!         w.end()
//!     }
//! }
//!
//! impl FromXml for DeleteKeyPair {
//!     fn from_xml(r: &mut XmlReader<'_>) -> Result<Self> {
//!         let key_name = r.read_text_element("keyName")?;
//!         r.read_end()?;
//!         Ok(Self { key_name })
//!     }
//! }
//!
//! impl XmlDocument for DeleteKeyPair {
//!     const ELEMENT: &'static str = "DeleteKeyPair";
//! }
//!
//! let request = DeleteKeyPair { key_name: "gsg-keypair".to_string() };
//! let xml = ec2_xml::to_document_string(&request).unwrap();
//! let back: DeleteKeyPair = ec2_xml::from_document_str(&xml).unwrap();
//! assert_eq!(back, request);
//! ```

mod document;
mod envelope;
mod error;
mod reader;
pub mod scalar;
mod writer;

/// The EC2 API namespace every document element lives in.
pub const EC2_NS: &str = "http://ec2.amazonaws.com/doc/2012-08-15/";

/// The API version the namespace pins.
pub const API_VERSION: &str = "2012-08-15";

pub use document::{
    FromXml, ToXml, XmlDocument, from_document_str, root_local_name, to_document_string,
    to_document_string_with,
};
pub use envelope::{
    Fault, SOAP_NS, envelope_body_local_name, envelope_fault, from_envelope_str,
    to_envelope_string, to_envelope_string_with,
};
pub use error::{Result, WireError};
pub use reader::XmlReader;
pub use writer::{PrefixStyle, XmlWriter, XmlWriterOptions};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
