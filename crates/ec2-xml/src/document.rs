//! Wire traits and document-level entry points.

use std::io::Write;

use crate::error::Result;
use crate::reader::XmlReader;
use crate::writer::{XmlWriter, XmlWriterOptions};

/// Serialize a value as one XML element, start tag through end tag.
pub trait ToXml {
    fn to_xml<W: Write>(&self, writer: &mut XmlWriter<W>, name: &str) -> Result<()>;
}

/// Parse a value from an element's content. The caller has consumed the
/// start tag; the implementation consumes the children in schema order and
/// the end tag.
pub trait FromXml: Sized {
    fn from_xml(reader: &mut XmlReader<'_>) -> Result<Self>;
}

/// A type that is a complete EC2 document: one request or response message
/// whose root element carries the EC2 namespace.
pub trait XmlDocument: ToXml + FromXml {
    /// Local name of the document element.
    const ELEMENT: &'static str;
}

/// Serialize a document in canonical form (no declaration, no indentation,
/// default namespace on the root).
pub fn to_document_string<T: XmlDocument>(value: &T) -> Result<String> {
    to_document_string_with(value, &XmlWriterOptions::default())
}

/// Serialize a document with explicit output options.
pub fn to_document_string_with<T: XmlDocument>(
    value: &T,
    options: &XmlWriterOptions,
) -> Result<String> {
    let mut writer = XmlWriter::with_options(Vec::new(), options.clone());
    value.to_xml(&mut writer, T::ELEMENT)?;
    Ok(String::from_utf8(writer.into_inner())?)
}

/// Parse a document, requiring the expected root element and nothing after it.
pub fn from_document_str<T: XmlDocument>(input: &str) -> Result<T> {
    let mut reader = XmlReader::from_str(input);
    reader.read_document_start(T::ELEMENT)?;
    let value = T::from_xml(&mut reader)?;
    reader.expect_eof()?;
    Ok(value)
}

/// Local name of the document element, without parsing the body. Used to
/// dispatch an incoming document to the right parser.
pub fn root_local_name(input: &str) -> Result<String> {
    XmlReader::from_str(input).peek_root_name()
}
