//! SOAP 1.1 envelope framing.
//!
//! EC2 documents travel inside a SOAP envelope on the wire. The body holds
//! exactly one document element; a service-side failure arrives as a
//! `Fault` instead, which decodes to [`WireError::SoapFault`]. Per SOAP 1.1
//! the fault's child elements are unqualified.

use crate::document::XmlDocument;
use crate::error::{Result, WireError};
use crate::reader::XmlReader;
use crate::writer::{XmlWriter, XmlWriterOptions};

/// SOAP 1.1 envelope namespace.
pub const SOAP_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// A decoded SOAP fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    /// Fault code, e.g. `Client.InvalidInstanceID.NotFound`.
    pub fault_code: String,
    /// Human-readable fault message.
    pub fault_string: String,
    /// Character data of the detail entry, when present.
    pub detail: Option<String>,
}

/// Wrap a document in a SOAP envelope, with an XML declaration and the
/// customary `soapenv` prefix for the framing elements.
pub fn to_envelope_string<T: XmlDocument>(body: &T) -> Result<String> {
    to_envelope_string_with(
        body,
        &XmlWriterOptions {
            declaration: true,
            prefix: crate::writer::PrefixStyle::Named("soapenv".to_string()),
            ..Default::default()
        },
    )
}

/// Wrap a document in a SOAP envelope with explicit output options. The
/// first namespace bound is the SOAP namespace, so the configured prefix
/// style applies to the framing elements; the EC2 namespace is declared on
/// the envelope as well.
pub fn to_envelope_string_with<T: XmlDocument>(
    body: &T,
    options: &XmlWriterOptions,
) -> Result<String> {
    let mut writer = XmlWriter::with_options(Vec::new(), options.clone());
    writer.bind(SOAP_NS);
    writer.bind(crate::EC2_NS);
    writer.start_ns(SOAP_NS, "Envelope")?;
    writer.start_ns(SOAP_NS, "Body")?;
    body.to_xml(&mut writer, T::ELEMENT)?;
    writer.end()?;
    writer.end()?;
    Ok(String::from_utf8(writer.into_inner())?)
}

/// Unwrap a SOAP envelope and parse its body as the expected document.
/// An optional header is skipped; a fault body becomes an error.
pub fn from_envelope_str<T: XmlDocument>(input: &str) -> Result<T> {
    let mut reader = XmlReader::from_str(input);
    if reader.peek_root_name()? != "Envelope" {
        return Err(WireError::NotAnEnvelope);
    }
    reader.read_document_start_ns(SOAP_NS, "Envelope")?;
    if reader.try_read_start_ns(SOAP_NS, "Header")? {
        reader.skip_to_end()?;
    }
    reader.read_start_ns(SOAP_NS, "Body")?;
    match reader.peek_child_name()?.as_deref() {
        None => return Err(WireError::EmptyBody),
        Some("Fault") => {
            reader.read_start_ns(SOAP_NS, "Fault")?;
            let fault = parse_fault(&mut reader)?;
            return Err(WireError::SoapFault(fault));
        }
        Some(_) => {}
    }
    reader.read_start(T::ELEMENT)?;
    let value = T::from_xml(&mut reader)?;
    reader.read_end()?;
    reader.read_end()?;
    reader.expect_eof()?;
    Ok(value)
}

/// Local name of the document element inside an envelope's body, without
/// parsing the document itself.
pub fn envelope_body_local_name(input: &str) -> Result<String> {
    let mut reader = XmlReader::from_str(input);
    if reader.peek_root_name()? != "Envelope" {
        return Err(WireError::NotAnEnvelope);
    }
    reader.read_document_start_ns(SOAP_NS, "Envelope")?;
    if reader.try_read_start_ns(SOAP_NS, "Header")? {
        reader.skip_to_end()?;
    }
    reader.read_start_ns(SOAP_NS, "Body")?;
    reader.peek_child_name()?.ok_or(WireError::EmptyBody)
}

/// Decode the fault carried in an envelope body, if that is what it holds.
/// Returns `None` for an envelope carrying an ordinary document.
pub fn envelope_fault(input: &str) -> Result<Option<Fault>> {
    let mut reader = XmlReader::from_str(input);
    if reader.peek_root_name()? != "Envelope" {
        return Err(WireError::NotAnEnvelope);
    }
    reader.read_document_start_ns(SOAP_NS, "Envelope")?;
    if reader.try_read_start_ns(SOAP_NS, "Header")? {
        reader.skip_to_end()?;
    }
    reader.read_start_ns(SOAP_NS, "Body")?;
    if reader.peek_child_name()?.as_deref() == Some("Fault") {
        reader.read_start_ns(SOAP_NS, "Fault")?;
        return Ok(Some(parse_fault(&mut reader)?));
    }
    Ok(None)
}

/// Parse the children of an already-opened `Fault` element.
fn parse_fault(reader: &mut XmlReader<'_>) -> Result<Fault> {
    reader.expect_start(None, "faultcode")?;
    let fault_code = reader.read_text()?;
    reader.read_end()?;
    reader.expect_start(None, "faultstring")?;
    let fault_string = reader.read_text()?;
    reader.read_end()?;
    if reader.try_expect_start(None, "faultactor")? {
        reader.skip_to_end()?;
    }
    let detail = if reader.try_expect_start(None, "detail")? {
        Some(reader.collect_subtree_text()?)
    } else {
        None
    };
    reader.read_end()?;
    Ok(Fault {
        fault_code,
        fault_string,
        detail,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_fault_body() {
        let xml = "<soapenv:Envelope xmlns:soapenv=\"http://schemas.xmlsoap.org/soap/envelope/\">\
            <soapenv:Body><soapenv:Fault>\
            <faultcode>Client.InvalidInstanceID.NotFound</faultcode>\
            <faultstring>The instance ID 'i-deadbeef' does not exist</faultstring>\
            <detail><Errors><Error><Code>InvalidInstanceID.NotFound</Code></Error></Errors></detail>\
            </soapenv:Fault></soapenv:Body></soapenv:Envelope>";
        let mut reader = XmlReader::from_str(xml);
        reader
            .read_document_start_ns(SOAP_NS, "Envelope")
            .expect("envelope");
        reader.read_start_ns(SOAP_NS, "Body").expect("body");
        reader.read_start_ns(SOAP_NS, "Fault").expect("fault");
        let fault = parse_fault(&mut reader).expect("parse fault");
        assert_eq!(fault.fault_code, "Client.InvalidInstanceID.NotFound");
        assert!(fault.fault_string.contains("does not exist"));
        assert_eq!(fault.detail.as_deref(), Some("InvalidInstanceID.NotFound"));
    }

    #[test]
    fn non_envelope_root_is_rejected() {
        let err = envelope_body_local_name(
            "<DescribeTags xmlns=\"http://ec2.amazonaws.com/doc/2012-08-15/\"/>",
        )
        .unwrap_err();
        assert!(matches!(err, WireError::NotAnEnvelope));
    }
}
